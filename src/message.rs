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

//! The line protocol spoken by `padel-league-server`.
//!
//! A request is one line, `<command> [arguments]`. Ids are plain integers and
//! structured arguments are [RON]. Optional fields in RON arguments may be
//! written without `Some(..)`.
//!
//! The server answers `= <command> <ron>` on success and
//! `? <command> <kind>: <error>` on failure, where `kind` is one of
//! `not_found`, `invalid`, `conflict` or `parse`.
//!
//! ```text
//! create_player (name: "Ana Lopez")
//! create_team (group: A, players: [(player_id: 1, role: Main), (name: "Eva Ruiz", role: Main)])
//! schedule_match (date: "2025-03-01T18:00:00Z", group: A, home_team_id: 3, away_team_id: 7)
//! enter_result 9 [(set_number: 1, home_games: 6, away_games: 4), (set_number: 2, home_games: 6, away_games: 3)]
//! enter_result 9 6-4 6-3
//! standings A
//! ```
//!
//! [RON]: https://github.com/ron-rs/ron

use std::str::FromStr;

use ron::extensions::Extensions;
use serde::de::DeserializeOwned;

use crate::{
    Id,
    group::Group,
    matches::{MatchFilter, MatchUpdate, NewMatch},
    results::SetInput,
    team::{NewPlayer, NewTeam, PlayerUpdate, TeamUpdate},
};

pub const COMMANDS: [&str; 24] = [
    "activate_team",
    "archive_team",
    "cancel_match",
    "create_player",
    "create_team",
    "delete_match",
    "delete_team",
    "enter_result",
    "match",
    "matches",
    "ping",
    "player",
    "player_teams",
    "players",
    "save",
    "schedule_match",
    "standings",
    "stats",
    "team",
    "team_standing",
    "teams",
    "update_match",
    "update_player",
    "update_team",
];

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Message {
    /// Reactivate an archived team.
    ///
    /// `activate_team <id>`
    ActivateTeam(Id),

    /// Take a team out of the table without deleting it.
    ///
    /// `archive_team <id>`
    ArchiveTeam(Id),

    /// `cancel_match <id>`
    CancelMatch(Id),

    /// `create_player <NewPlayer>`
    CreatePlayer(NewPlayer),

    /// `create_team <NewTeam>`
    CreateTeam(NewTeam),

    /// `delete_match <id>`
    DeleteMatch(Id),

    /// Only allowed for teams without matches.
    ///
    /// `delete_team <id>`
    DeleteTeam(Id),

    /// A blank line or a comment.
    Empty,

    /// Replace the sets of a match. The sets are a RON list of
    /// `(set_number, home_games, away_games)` or scores like `6-4 3-6`,
    /// numbered in order.
    ///
    /// `enter_result <id> <sets>`
    EnterResult(Id, Vec<SetInput>),

    /// `match <id>`
    Match(Id),

    /// `matches [MatchFilter]`
    Matches(MatchFilter),

    /// `ping`
    Ping,

    /// `player <id>`
    Player(Id),

    /// `player_teams <id>`
    PlayerTeams(Id),

    /// `players`
    Players,

    /// Write the league to the data file now.
    ///
    /// `save`
    Save,

    /// `schedule_match <NewMatch>`
    ScheduleMatch(NewMatch),

    /// `standings [A|B]`
    Standings(Option<Group>),

    /// `stats`
    Stats,

    /// `team <id>`
    Team(Id),

    /// `team_standing <id>`
    TeamStanding(Id),

    /// `teams [A|B] [all]`
    Teams {
        group: Option<Group>,
        include_archived: bool,
    },

    /// `update_match <id> <MatchUpdate>`
    UpdateMatch(Id, MatchUpdate),

    /// `update_player <id> <PlayerUpdate>`
    UpdatePlayer(Id, PlayerUpdate),

    /// `update_team <id> <TeamUpdate>`
    UpdateTeam(Id, TeamUpdate),
}

impl FromStr for Message {
    type Err = anyhow::Error;

    fn from_str(message: &str) -> anyhow::Result<Self> {
        let message = message.trim();
        if message.is_empty() || message.starts_with('#') {
            return Ok(Self::Empty);
        }

        let (command, args) = message
            .split_once(char::is_whitespace)
            .map_or((message, ""), |(command, args)| (command, args.trim()));

        match command {
            "activate_team" => Ok(Self::ActivateTeam(parse_id(args)?)),
            "archive_team" => Ok(Self::ArchiveTeam(parse_id(args)?)),
            "cancel_match" => Ok(Self::CancelMatch(parse_id(args)?)),
            "create_player" => Ok(Self::CreatePlayer(from_ron(args)?)),
            "create_team" => Ok(Self::CreateTeam(from_ron(args)?)),
            "delete_match" => Ok(Self::DeleteMatch(parse_id(args)?)),
            "delete_team" => Ok(Self::DeleteTeam(parse_id(args)?)),
            "enter_result" => {
                let (id, sets) = split_id(args)?;
                Ok(Self::EnterResult(id, parse_sets(sets)?))
            }
            "match" => Ok(Self::Match(parse_id(args)?)),
            "matches" => {
                if args.is_empty() {
                    Ok(Self::Matches(MatchFilter::default()))
                } else {
                    Ok(Self::Matches(from_ron(args)?))
                }
            }
            "ping" => Ok(Self::Ping),
            "player" => Ok(Self::Player(parse_id(args)?)),
            "player_teams" => Ok(Self::PlayerTeams(parse_id(args)?)),
            "players" => Ok(Self::Players),
            "save" => Ok(Self::Save),
            "schedule_match" => Ok(Self::ScheduleMatch(from_ron(args)?)),
            "standings" => {
                if args.is_empty() {
                    Ok(Self::Standings(None))
                } else {
                    Ok(Self::Standings(Some(Group::from_str(args)?)))
                }
            }
            "stats" => Ok(Self::Stats),
            "team" => Ok(Self::Team(parse_id(args)?)),
            "team_standing" => Ok(Self::TeamStanding(parse_id(args)?)),
            "teams" => {
                let mut group = None;
                let mut include_archived = false;

                for arg in args.split_whitespace() {
                    if arg == "all" {
                        include_archived = true;
                    } else {
                        group = Some(Group::from_str(arg)?);
                    }
                }

                Ok(Self::Teams {
                    group,
                    include_archived,
                })
            }
            "update_match" => {
                let (id, update) = split_id(args)?;
                Ok(Self::UpdateMatch(id, from_ron(update)?))
            }
            "update_player" => {
                let (id, update) = split_id(args)?;
                Ok(Self::UpdatePlayer(id, from_ron(update)?))
            }
            "update_team" => {
                let (id, update) = split_id(args)?;
                Ok(Self::UpdateTeam(id, from_ron(update)?))
            }
            _ => Err(anyhow::Error::msg(format!("unknown command: {command}"))),
        }
    }
}

impl Message {
    /// Whether the message changes the league.
    #[must_use]
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Self::ActivateTeam(_)
                | Self::ArchiveTeam(_)
                | Self::CancelMatch(_)
                | Self::CreatePlayer(_)
                | Self::CreateTeam(_)
                | Self::DeleteMatch(_)
                | Self::DeleteTeam(_)
                | Self::EnterResult(..)
                | Self::ScheduleMatch(_)
                | Self::UpdateMatch(..)
                | Self::UpdatePlayer(..)
                | Self::UpdateTeam(..)
        )
    }
}

fn parse_id(arg: &str) -> anyhow::Result<Id> {
    if arg.is_empty() {
        return Err(anyhow::Error::msg("expected an id"));
    }

    arg.parse()
        .map_err(|err| anyhow::Error::msg(format!("id {arg}: {err}")))
}

/// Splits `<id> <rest>`.
fn split_id(args: &str) -> anyhow::Result<(Id, &str)> {
    let (id, rest) = args
        .split_once(char::is_whitespace)
        .ok_or_else(|| anyhow::Error::msg("expected an id and an argument"))?;

    Ok((parse_id(id)?, rest.trim()))
}

/// Reads a RON argument, allowing `Option` fields without `Some(..)`.
///
/// # Errors
///
/// If `ron` is not a valid `T`.
pub fn from_ron<T: DeserializeOwned>(ron: &str) -> anyhow::Result<T> {
    if ron.is_empty() {
        return Err(anyhow::Error::msg("expected a RON argument"));
    }

    ron::Options::default()
        .with_default_extension(Extensions::IMPLICIT_SOME)
        .from_str(ron)
        .map_err(|err| anyhow::Error::msg(format!("RON: {err}")))
}

fn parse_sets(sets: &str) -> anyhow::Result<Vec<SetInput>> {
    if sets.starts_with('[') {
        return from_ron(sets);
    }

    (1..)
        .zip(sets.split_whitespace())
        .map(|(set_number, score)| {
            let (home, away) = score
                .split_once('-')
                .ok_or_else(|| anyhow::Error::msg(format!("set score {score}: expected h-a")))?;

            Ok(SetInput::new(
                set_number,
                home.parse()
                    .map_err(|err| anyhow::Error::msg(format!("set score {score}: {err}")))?,
                away.parse()
                    .map_err(|err| anyhow::Error::msg(format!("set score {score}: {err}")))?,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::role::PlayerRole;
    use crate::team::TeamPlayerInput;

    use super::*;

    #[test]
    fn comments_and_blank_lines() -> anyhow::Result<()> {
        assert_eq!(Message::from_str("")?, Message::Empty);
        assert_eq!(Message::from_str("   \n")?, Message::Empty);
        assert_eq!(Message::from_str("# standings A")?, Message::Empty);

        Ok(())
    }

    #[test]
    fn standings_and_teams() -> anyhow::Result<()> {
        assert_eq!(Message::from_str("standings")?, Message::Standings(None));
        assert_eq!(
            Message::from_str("standings b\n")?,
            Message::Standings(Some(Group::B))
        );
        assert_eq!(
            Message::from_str("teams A all")?,
            Message::Teams {
                group: Some(Group::A),
                include_archived: true,
            }
        );
        assert_eq!(
            Message::from_str("teams")?,
            Message::Teams {
                group: None,
                include_archived: false,
            }
        );
        assert!(Message::from_str("standings C").is_err());

        Ok(())
    }

    #[test]
    fn ids() -> anyhow::Result<()> {
        assert_eq!(Message::from_str("cancel_match 12")?, Message::CancelMatch(12));
        assert!(Message::from_str("cancel_match").is_err());
        assert!(Message::from_str("cancel_match twelve").is_err());
        assert!(Message::from_str("cancel_match -1").is_err());

        Ok(())
    }

    #[test]
    fn ron_arguments() -> anyhow::Result<()> {
        assert_eq!(
            Message::from_str(
                r#"create_team (group: B, players: [(player_id: 4, role: Main), (name: "Eva Ruiz", role: Main)])"#
            )?,
            Message::CreateTeam(NewTeam {
                name: None,
                group: Group::B,
                players: vec![
                    TeamPlayerInput::existing(4, PlayerRole::Main),
                    TeamPlayerInput::new_player("Eva Ruiz", PlayerRole::Main),
                ],
            })
        );

        assert_eq!(
            Message::from_str(
                r#"schedule_match (date: "2025-03-01T18:00:00Z", group: A, home_team_id: 3, away_team_id: 7)"#
            )?,
            Message::ScheduleMatch(NewMatch {
                date: Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap(),
                group: Group::A,
                round: None,
                home_team_id: 3,
                away_team_id: 7,
            })
        );

        assert_eq!(
            Message::from_str("update_team 5 (active: false)")?,
            Message::UpdateTeam(
                5,
                TeamUpdate {
                    active: Some(false),
                    ..TeamUpdate::default()
                }
            )
        );

        assert!(Message::from_str("create_team (group: C, players: [])").is_err());

        Ok(())
    }

    #[test]
    fn results_in_both_forms() -> anyhow::Result<()> {
        let expected = Message::EnterResult(
            9,
            vec![SetInput::new(1, 6, 4), SetInput::new(2, 3, 6), SetInput::new(3, 7, 5)],
        );

        assert_eq!(Message::from_str("enter_result 9 6-4 3-6 7-5")?, expected);
        assert_eq!(
            Message::from_str(
                "enter_result 9 [(set_number: 1, home_games: 6, away_games: 4), (set_number: 2, home_games: 3, away_games: 6), (set_number: 3, home_games: 7, away_games: 5)]"
            )?,
            expected
        );
        assert!(Message::from_str("enter_result 9 6:4").is_err());

        Ok(())
    }

    #[test]
    fn every_command_is_known() {
        for command in COMMANDS {
            let error = Message::from_str(command)
                .err()
                .map(|err| err.to_string())
                .unwrap_or_default();
            assert!(!error.starts_with("unknown command"), "{command}");
        }
        assert!(Message::from_str("drop_table").is_err());
    }
}
