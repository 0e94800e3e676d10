// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Where a match is in its life.
///
/// `Scheduled` is the only state a match is created in. `InProgress` and
/// `Played` are only ever derived from entered sets, `Cancelled` only comes
/// from an explicit cancellation.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InProgress,
    Played,
    Cancelled,
}

impl MatchStatus {
    pub const ALL: [MatchStatus; 4] = [
        MatchStatus::Scheduled,
        MatchStatus::InProgress,
        MatchStatus::Played,
        MatchStatus::Cancelled,
    ];

    /// Whether a result may be entered for a match in this state.
    #[must_use]
    pub fn accepts_result(self) -> bool {
        matches!(self, Self::Scheduled | Self::InProgress)
    }

    #[must_use]
    pub fn can_be_cancelled(self) -> bool {
        self != Self::Played
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheduled => write!(f, "scheduled"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Played => write!(f, "played"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for MatchStatus {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "in_progress" => Ok(Self::InProgress),
            "played" => Ok(Self::Played),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(anyhow::Error::msg(format!("invalid status: {value}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_open_matches_accept_results() {
        assert!(MatchStatus::Scheduled.accepts_result());
        assert!(MatchStatus::InProgress.accepts_result());
        assert!(!MatchStatus::Played.accepts_result());
        assert!(!MatchStatus::Cancelled.accepts_result());
    }

    #[test]
    fn parse_status() -> anyhow::Result<()> {
        for status in MatchStatus::ALL {
            assert_eq!(MatchStatus::from_str(&status.to_string())?, status);
        }
        assert_eq!(MatchStatus::from_str("PLAYED")?, MatchStatus::Played);
        assert!(MatchStatus::from_str("finished").is_err());

        Ok(())
    }
}
