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

//! The league table.
//!
//! Standings are never stored. Every call reads the active teams and the
//! played matches from the stores and builds the table from scratch.

use std::{cmp::Ordering, fmt};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    Id,
    error::{Entity, LeagueError},
    group::Group,
    matches::{Match, Side},
    status::MatchStatus,
    store::{MatchStore, TeamStore},
};

/// One row of the league table.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TeamStanding {
    pub position: usize,
    pub team_id: Id,
    pub team_name: String,
    pub group: Group,
    pub matches_played: u32,
    pub matches_won: u32,
    pub matches_lost: u32,
    pub sets_for: u32,
    pub sets_against: u32,
    pub games_for: u64,
    pub games_against: u64,
    pub points: u32,
    pub set_diff: i64,
    pub game_diff: i64,
}

impl TeamStanding {
    fn new(team_id: Id, team_name: String, group: Group) -> Self {
        Self {
            team_id,
            team_name,
            group,
            ..Self::default()
        }
    }

    /// Adds one played match, seen from `side`.
    fn record(&mut self, game: &Match, side: Side) {
        let (home_sets, away_sets) = game.sets_won();
        let (sets_for, sets_against) = match side {
            Side::Home => (home_sets, away_sets),
            Side::Away => (away_sets, home_sets),
        };

        self.matches_played += 1;
        if sets_for > sets_against {
            self.matches_won += 1;
        } else {
            self.matches_lost += 1;
        }

        self.points += calculate_match_points(sets_for, sets_against);
        self.sets_for += sets_for;
        self.sets_against += sets_against;

        self.set_diff += i64::from(sets_for) - i64::from(sets_against);

        for set in &game.sets {
            let (games_for, games_against) = set.games(side);
            self.games_for += u64::from(games_for);
            self.games_against += u64::from(games_against);
            self.game_diff += i64::from(games_for) - i64::from(games_against);
        }
    }
}

/// Points for one match, from the sets each side won in it.
///
/// | sets | points |
/// |------|--------|
/// | 2-0  | 3      |
/// | 2-1  | 2      |
/// | 1-2  | 1      |
/// | 0-2  | 0      |
///
/// Any other score is worth nothing.
#[must_use]
pub fn calculate_match_points(team_sets_won: u32, opponent_sets_won: u32) -> u32 {
    match (team_sets_won, opponent_sets_won) {
        (2, 0) => 3,
        (2, 1) => 2,
        (1, 2) => 1,
        _ => 0,
    }
}

/// The table order: points, matches won, set difference and game difference,
/// all descending, then the team name ignoring case.
///
/// Ties on all of those fall back to the team id so the order stays total.
#[must_use]
pub fn ranking(a: &TeamStanding, b: &TeamStanding) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.matches_won.cmp(&a.matches_won))
        .then_with(|| b.set_diff.cmp(&a.set_diff))
        .then_with(|| b.game_diff.cmp(&a.game_diff))
        .then_with(|| {
            a.team_name
                .to_lowercase()
                .cmp(&b.team_name.to_lowercase())
        })
        .then_with(|| a.team_id.cmp(&b.team_id))
}

/// Builds the ranked table of the active teams, optionally of one group.
///
/// Only played matches count. Archived teams are left out of the table but
/// their matches still count for their opponents.
#[must_use]
pub fn compute_standings<T, M>(teams: &T, matches: &M, group: Option<Group>) -> Vec<TeamStanding>
where
    T: TeamStore + ?Sized,
    M: MatchStore + ?Sized,
{
    let mut standings: FxHashMap<Id, TeamStanding> = teams
        .list_active(group)
        .into_iter()
        .map(|team| (team.id, TeamStanding::new(team.id, team.name, team.group)))
        .collect();

    for game in matches
        .list_played_with_sets()
        .iter()
        .filter(|game| game.status == MatchStatus::Played)
    {
        for side in [Side::Home, Side::Away] {
            if let Some(standing) = standings.get_mut(&game.team_id(side)) {
                standing.record(game, side);
            }
        }
    }

    let mut standings: Vec<TeamStanding> = standings.into_values().collect();
    standings.sort_by(ranking);

    for (position, standing) in (1..).zip(standings.iter_mut()) {
        standing.position = position;
    }

    standings
}

/// The row of one team in the full table.
///
/// # Errors
///
/// If the team is unknown or archived.
pub fn team_standing<T, M>(teams: &T, matches: &M, team_id: Id) -> Result<TeamStanding, LeagueError>
where
    T: TeamStore + ?Sized,
    M: MatchStore + ?Sized,
{
    compute_standings(teams, matches, None)
        .into_iter()
        .find(|standing| standing.team_id == team_id)
        .ok_or_else(|| LeagueError::not_found(Entity::Team, team_id))
}

/// A table ready for printing.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Standings(pub Vec<TeamStanding>);

impl fmt::Display for Standings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>3} {:<24} {:>2} {:>3} {:>3} {:>3} {:>7} {:>4} {:>9} {:>5} {:>4}",
            "#", "Team", "G", "P", "W", "L", "Sets", "+/-", "Games", "+/-", "Pts"
        )?;
        writeln!(f, "{}", "-".repeat(78))?;

        for row in &self.0 {
            writeln!(
                f,
                "{:>3} {:<24} {:>2} {:>3} {:>3} {:>3} {:>7} {:>4} {:>9} {:>5} {:>4}",
                row.position,
                row.team_name,
                row.group,
                row.matches_played,
                row.matches_won,
                row.matches_lost,
                format!("{}:{}", row.sets_for, row.sets_against),
                row.set_diff,
                format!("{}:{}", row.games_for, row.games_against),
                row.game_diff,
                row.points,
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standing(name: &str, points: u32, won: u32, set_diff: i64, game_diff: i64) -> TeamStanding {
        TeamStanding {
            team_name: name.to_string(),
            points,
            matches_won: won,
            set_diff,
            game_diff,
            ..TeamStanding::default()
        }
    }

    #[test]
    fn points_table() {
        assert_eq!(calculate_match_points(2, 0), 3);
        assert_eq!(calculate_match_points(2, 1), 2);
        assert_eq!(calculate_match_points(1, 2), 1);
        assert_eq!(calculate_match_points(0, 2), 0);
        assert_eq!(calculate_match_points(1, 0), 0);
        assert_eq!(calculate_match_points(3, 0), 0);
    }

    #[test]
    fn ranking_keys_in_order() {
        let mut rows = vec![
            standing("delta", 3, 1, 2, 5),
            standing("Alpha", 3, 1, 2, 5),
            standing("charlie", 3, 1, 2, 6),
            standing("bravo", 3, 1, 1, 9),
            standing("echo", 3, 2, 0, 0),
            standing("foxtrot", 4, 1, 0, 0),
        ];
        rows.sort_by(ranking);

        let names: Vec<&str> = rows.iter().map(|row| row.team_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["foxtrot", "echo", "charlie", "Alpha", "delta", "bravo"]
        );
    }

    #[test]
    fn table_prints_a_row_per_team() {
        let table = Standings(vec![standing("Alpha", 3, 1, 2, 5)]).to_string();
        assert_eq!(table.lines().count(), 3);
        assert!(table.contains("Alpha"));
    }
}
