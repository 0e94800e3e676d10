// This file is part of padel-league.
//
// padel-league is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// padel-league is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::{Id, error::InvalidTeam, group::Group, role::PlayerRole};

pub const MAX_PLAYER_NAME: usize = 100;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Team {
    pub id: Id,
    pub name: String,
    pub group: Group,
    #[serde(default = "active_default")]
    pub active: bool,
}

fn active_default() -> bool {
    true
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.active {
            write!(f, "{} {} ({})", self.id, self.name, self.group)
        } else {
            write!(f, "{} {} ({}) archived", self.id, self.name, self.group)
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Player {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Binds one player to one team.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TeamPlayer {
    pub team_id: Id,
    pub player_id: Id,
    pub role: PlayerRole,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct NewPlayer {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A roster slot when creating or updating a team.
///
/// Refers to an existing player by `player_id`, or names a new player to be
/// created along with the team. Exactly one of the two must be given.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TeamPlayerInput {
    #[serde(default)]
    pub player_id: Option<Id>,
    #[serde(default)]
    pub name: Option<String>,
    pub role: PlayerRole,
}

impl TeamPlayerInput {
    #[must_use]
    pub fn existing(player_id: Id, role: PlayerRole) -> Self {
        Self {
            player_id: Some(player_id),
            name: None,
            role,
        }
    }

    #[must_use]
    pub fn new_player(name: &str, role: PlayerRole) -> Self {
        Self {
            player_id: None,
            name: Some(name.to_string()),
            role,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct NewTeam {
    #[serde(default)]
    pub name: Option<String>,
    pub group: Group,
    pub players: Vec<TeamPlayerInput>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TeamUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub group: Option<Group>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub players: Option<Vec<TeamPlayerInput>>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RosterEntry {
    pub id: Id,
    pub name: String,
    pub role: PlayerRole,
}

/// A team together with its roster.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TeamDetail {
    pub team: Team,
    pub players: Vec<RosterEntry>,
}

/// # Errors
///
/// If the name is empty after trimming or longer than [`MAX_PLAYER_NAME`].
pub fn validate_player_name(name: &str) -> Result<String, InvalidTeam> {
    let name = name.trim();
    if name.is_empty() {
        return Err(InvalidTeam::EmptyPlayerName);
    }
    if name.chars().count() > MAX_PLAYER_NAME {
        return Err(InvalidTeam::PlayerNameTooLong);
    }

    Ok(name.to_string())
}

/// Checks the role counts of a roster and the shape of every slot.
///
/// Rules: 2 to 3 players, at least 2 main, at most 1 reserve, each slot names
/// exactly one of an existing player or a new one, and no existing player is
/// listed twice. Whether referenced players exist is up to the store.
///
/// # Errors
///
/// The first rule the roster breaks.
pub fn validate_composition(players: &[TeamPlayerInput]) -> Result<(), InvalidTeam> {
    if players.len() < 2 {
        return Err(InvalidTeam::TooFewPlayers(players.len()));
    }
    if players.len() > 3 {
        return Err(InvalidTeam::TooManyPlayers(players.len()));
    }

    let main = players
        .iter()
        .filter(|player| player.role == PlayerRole::Main)
        .count();
    let reserve = players.len() - main;

    if main < 2 {
        return Err(InvalidTeam::TooFewMain(main));
    }
    if reserve > 1 {
        return Err(InvalidTeam::TooManyReserves(reserve));
    }

    let mut seen = FxHashSet::default();
    for player in players {
        match (player.player_id, &player.name) {
            (Some(id), None) => {
                if !seen.insert(id) {
                    return Err(InvalidTeam::DuplicatePlayer(id));
                }
            }
            (None, Some(name)) => {
                validate_player_name(name)?;
            }
            _ => return Err(InvalidTeam::PlayerReference),
        }
    }

    Ok(())
}

/// Builds a team name out of its players' names.
///
/// Every player name with at least two words contributes the first three
/// letters of its second word, uppercased. The parts are joined with `" | "`,
/// so `["Milos Milutinovic", "Marko Jovanovic"]` becomes `"MIL | JOV"`.
#[must_use]
pub fn team_name_from_players<'a, I>(names: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let codes: Vec<String> = names
        .into_iter()
        .filter_map(|name| name.split_whitespace().nth(1))
        .map(|surname| surname.chars().take(3).collect::<String>().to_uppercase())
        .collect();

    if codes.is_empty() {
        None
    } else {
        Some(codes.join(" | "))
    }
}

/// Splits `"Milos Milutinovic-Marko Milutinovic"` style rosters into names.
///
/// Hyphens, en dashes and em dashes all separate players.
#[must_use]
pub fn split_player_names(players: &str) -> Vec<&str> {
    players
        .split(['-', '–', '—'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}
