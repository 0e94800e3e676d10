use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A player's place on a team roster.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum PlayerRole {
    #[default]
    Main,
    Reserve,
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerRole::Main => write!(f, "main"),
            PlayerRole::Reserve => write!(f, "reserve"),
        }
    }
}

impl FromStr for PlayerRole {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> anyhow::Result<Self> {
        let string = string.trim().to_lowercase();

        match string.as_str() {
            "m" | "main" => Ok(Self::Main),
            "r" | "reserve" => Ok(Self::Reserve),
            _ => Err(anyhow::Error::msg(format!(
                "Error trying to convert '{string}' to a PlayerRole!"
            ))),
        }
    }
}
