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

use thiserror::Error;

use crate::{Id, group::Group, status::MatchStatus};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Entity {
    Match,
    Player,
    Team,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Match => write!(f, "match"),
            Self::Player => write!(f, "player"),
            Self::Team => write!(f, "team"),
        }
    }
}

/// Broad class of a [`LeagueError`], used by callers to pick a reply code.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Conflict,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::Validation => write!(f, "invalid"),
            Self::Conflict => write!(f, "conflict"),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum InvalidResult {
    #[error("result: a match has between 1 and 3 sets, got {0}")]
    SetCount(usize),
    #[error("result: set number {0} is not between 1 and 3")]
    SetNumber(i32),
    #[error("result: set number {0} is entered more than once")]
    DuplicateSet(u8),
    #[error("result: games cannot be negative (set {0})")]
    NegativeGames(u8),
    #[error("result: set {0} cannot have both scores as 0")]
    ZeroZero(u8),
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum InvalidTeam {
    #[error("team: a team must have at least 2 players, got {0}")]
    TooFewPlayers(usize),
    #[error("team: a team cannot have more than 3 players, got {0}")]
    TooManyPlayers(usize),
    #[error("team: a team must have at least 2 main players, got {0}")]
    TooFewMain(usize),
    #[error("team: a team cannot have more than 1 reserve player, got {0}")]
    TooManyReserves(usize),
    #[error("team: player {0} is listed more than once")]
    DuplicatePlayer(Id),
    #[error("team: player {0} does not exist")]
    UnknownPlayer(Id),
    #[error("team: give either a player id or a player name")]
    PlayerReference,
    #[error("team: a player name cannot be empty")]
    EmptyPlayerName,
    #[error("team: a player name cannot exceed 100 characters")]
    PlayerNameTooLong,
    #[error("team: the team name cannot be empty")]
    EmptyName,
    #[error("team: a team with name '{0}' already exists")]
    DuplicateName(String),
    #[error("team: team {0} still has matches")]
    HasMatches(Id),
    #[error("team: team {0} cannot change group while it has matches")]
    GroupChange(Id),
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum InvalidMatch {
    #[error("match: home team and away team must be different")]
    SameTeams,
    #[error("match: team {team} is not in group {group}")]
    GroupMismatch { team: Id, group: Group },
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LeagueError {
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: Id },
    #[error("match {id} cannot be updated (status: {status})")]
    Conflict { id: Id, status: MatchStatus },
    #[error(transparent)]
    Result(#[from] InvalidResult),
    #[error(transparent)]
    Team(#[from] InvalidTeam),
    #[error(transparent)]
    Match(#[from] InvalidMatch),
}

impl LeagueError {
    #[must_use]
    pub fn not_found(entity: Entity, id: Id) -> Self {
        Self::NotFound { entity, id }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Result(_) | Self::Team(_) | Self::Match(_) => ErrorKind::Validation,
        }
    }
}
