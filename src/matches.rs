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

use std::{cmp::Ordering, fmt};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Id, group::Group, status::MatchStatus};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Side {
    Home,
    Away,
}

/// A validated set score, not yet stored.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SetScore {
    pub set_number: u8,
    pub home_games: u32,
    pub away_games: u32,
}

impl SetScore {
    /// The side that took more games, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        match self.home_games.cmp(&self.away_games) {
            Ordering::Greater => Some(Side::Home),
            Ordering::Less => Some(Side::Away),
            Ordering::Equal => None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MatchSet {
    pub id: Id,
    pub match_id: Id,
    pub set_number: u8,
    pub home_games: u32,
    pub away_games: u32,
}

impl MatchSet {
    #[must_use]
    pub fn score(&self) -> SetScore {
        SetScore {
            set_number: self.set_number,
            home_games: self.home_games,
            away_games: self.away_games,
        }
    }

    /// Games taken by `side` and by its opponent.
    #[must_use]
    pub fn games(&self, side: Side) -> (u32, u32) {
        match side {
            Side::Home => (self.home_games, self.away_games),
            Side::Away => (self.away_games, self.home_games),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Match {
    pub id: Id,
    pub date: DateTime<Utc>,
    pub group: Group,
    #[serde(default)]
    pub round: Option<String>,
    pub home_team_id: Id,
    pub away_team_id: Id,
    #[serde(default)]
    pub status: MatchStatus,
    /// Always sorted by set number.
    #[serde(default)]
    pub sets: Vec<MatchSet>,
}

impl Match {
    /// Which side `team_id` played on, if it played in this match at all.
    #[must_use]
    pub fn side_of(&self, team_id: Id) -> Option<Side> {
        if self.home_team_id == team_id {
            Some(Side::Home)
        } else if self.away_team_id == team_id {
            Some(Side::Away)
        } else {
            None
        }
    }

    #[must_use]
    pub fn involves(&self, team_id: Id) -> bool {
        self.side_of(team_id).is_some()
    }

    #[must_use]
    pub fn team_id(&self, side: Side) -> Id {
        match side {
            Side::Home => self.home_team_id,
            Side::Away => self.away_team_id,
        }
    }

    #[must_use]
    pub fn sets_won(&self) -> (u32, u32) {
        count_sets_won(self.sets.iter().map(MatchSet::score))
    }

    /// The id of the team that won more sets, if either did.
    #[must_use]
    pub fn winner(&self) -> Option<Id> {
        if self.sets.is_empty() {
            return None;
        }

        let (home, away) = self.sets_won();
        match home.cmp(&away) {
            Ordering::Greater => Some(self.home_team_id),
            Ordering::Less => Some(self.away_team_id),
            Ordering::Equal => None,
        }
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} vs {} {}",
            self.id,
            self.date.format("%F %R"),
            self.group,
            self.home_team_id,
            self.away_team_id,
            self.status,
        )?;

        for set in &self.sets {
            write!(f, " {}-{}", set.home_games, set.away_games)?;
        }

        Ok(())
    }
}

/// Counts the sets won by the home side and by the away side.
///
/// A set with equal games counts for nobody.
#[must_use]
pub fn count_sets_won<I>(sets: I) -> (u32, u32)
where
    I: IntoIterator<Item = SetScore>,
{
    let mut home = 0;
    let mut away = 0;

    for set in sets {
        match set.winner() {
            Some(Side::Home) => home += 1,
            Some(Side::Away) => away += 1,
            None => {}
        }
    }

    (home, away)
}

/// The status a match with these sets is in.
///
/// A strict leader in sets means the match was played, anything else leaves
/// it in progress.
#[must_use]
pub fn status_from_sets<I>(sets: I) -> MatchStatus
where
    I: IntoIterator<Item = SetScore>,
{
    let (home, away) = count_sets_won(sets);
    if home == away {
        MatchStatus::InProgress
    } else {
        MatchStatus::Played
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NewMatch {
    pub date: DateTime<Utc>,
    pub group: Group,
    #[serde(default)]
    pub round: Option<String>,
    pub home_team_id: Id,
    pub away_team_id: Id,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MatchUpdate {
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub group: Option<Group>,
    #[serde(default)]
    pub round: Option<String>,
    #[serde(default)]
    pub home_team_id: Option<Id>,
    #[serde(default)]
    pub away_team_id: Option<Id>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MatchFilter {
    #[serde(default)]
    pub group: Option<Group>,
    #[serde(default)]
    pub status: Option<MatchStatus>,
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
    #[serde(default)]
    pub team_id: Option<Id>,
}

impl MatchFilter {
    #[must_use]
    pub fn matches(&self, game: &Match) -> bool {
        let day = game.date.date_naive();

        self.group.is_none_or(|group| game.group == group)
            && self.status.is_none_or(|status| game.status == status)
            && self.date_from.is_none_or(|from| day >= from)
            && self.date_to.is_none_or(|to| day <= to)
            && self.team_id.is_none_or(|team_id| game.involves(team_id))
    }
}
