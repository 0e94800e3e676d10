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

//! Entering set-by-set results and moving matches through their states.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    Id,
    error::{Entity, InvalidResult, LeagueError},
    matches::{Match, SetScore, status_from_sets},
    store::MatchStore,
};

pub const MAX_SETS: usize = 3;

/// A set as it arrives from a client, before any checks.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SetInput {
    pub set_number: i32,
    pub home_games: i32,
    pub away_games: i32,
}

impl SetInput {
    #[must_use]
    pub fn new(set_number: i32, home_games: i32, away_games: i32) -> Self {
        Self {
            set_number,
            home_games,
            away_games,
        }
    }
}

/// Checks a result and returns its sets ordered by set number.
///
/// # Errors
///
/// If there are not 1 to 3 sets, a set number is outside 1 to 3 or repeated,
/// a game count is negative, or a set is 0-0.
pub fn validate_sets(sets: &[SetInput]) -> Result<Vec<SetScore>, InvalidResult> {
    if sets.is_empty() || sets.len() > MAX_SETS {
        return Err(InvalidResult::SetCount(sets.len()));
    }

    let mut scores: Vec<SetScore> = Vec::with_capacity(sets.len());
    for set in sets {
        let set_number = u8::try_from(set.set_number)
            .ok()
            .filter(|number| (1..=3).contains(number))
            .ok_or(InvalidResult::SetNumber(set.set_number))?;

        if scores.iter().any(|score| score.set_number == set_number) {
            return Err(InvalidResult::DuplicateSet(set_number));
        }

        let home_games =
            u32::try_from(set.home_games).map_err(|_| InvalidResult::NegativeGames(set_number))?;
        let away_games =
            u32::try_from(set.away_games).map_err(|_| InvalidResult::NegativeGames(set_number))?;

        if home_games == 0 && away_games == 0 {
            return Err(InvalidResult::ZeroZero(set_number));
        }

        scores.push(SetScore {
            set_number,
            home_games,
            away_games,
        });
    }

    scores.sort_unstable_by_key(|score| score.set_number);
    Ok(scores)
}

/// Replaces the sets of a match and derives its new status from them.
///
/// The whole input is checked before the store is touched. A match with a
/// strict leader in sets becomes `Played`, any other result leaves it
/// `InProgress`.
///
/// # Errors
///
/// [`LeagueError::Result`] for a malformed result, [`LeagueError::NotFound`]
/// for an unknown match and [`LeagueError::Conflict`] when the match is
/// already played or cancelled.
pub fn enter_result<S>(store: &mut S, match_id: Id, sets: &[SetInput]) -> Result<Match, LeagueError>
where
    S: MatchStore + ?Sized,
{
    let scores = validate_sets(sets)?;

    let game = store
        .get_match(match_id)
        .ok_or_else(|| LeagueError::not_found(Entity::Match, match_id))?;

    if !game.status.accepts_result() {
        return Err(LeagueError::Conflict {
            id: match_id,
            status: game.status,
        });
    }

    let status = status_from_sets(scores.iter().copied());
    store.replace_sets(match_id, &scores)?;
    store.set_status(match_id, status)?;
    debug!("match {match_id}: {} -> {status}", game.status);

    store
        .get_match(match_id)
        .ok_or_else(|| LeagueError::not_found(Entity::Match, match_id))
}
