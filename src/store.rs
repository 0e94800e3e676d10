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

//! The narrow interface the result and standings engines work against.

use crate::{
    Id,
    error::LeagueError,
    group::Group,
    matches::{Match, SetScore},
    status::MatchStatus,
    team::Team,
};

pub trait MatchStore {
    fn get_match(&self, id: Id) -> Option<Match>;

    /// Drops every set of the match and stores `sets` in their place.
    ///
    /// # Errors
    ///
    /// If the match does not exist.
    fn replace_sets(&mut self, match_id: Id, sets: &[SetScore]) -> Result<(), LeagueError>;

    /// # Errors
    ///
    /// If the match does not exist.
    fn set_status(&mut self, match_id: Id, status: MatchStatus) -> Result<(), LeagueError>;

    /// Removes the match and its sets.
    ///
    /// # Errors
    ///
    /// If the match does not exist.
    fn delete_match(&mut self, id: Id) -> Result<Match, LeagueError>;

    fn list_played_with_sets(&self) -> Vec<Match>;

    fn list_by_team(&self, team_id: Id, status: MatchStatus) -> Vec<Match>;
}

pub trait TeamStore {
    /// Active teams, restricted to `group` when one is given.
    fn list_active(&self, group: Option<Group>) -> Vec<Team>;
}
