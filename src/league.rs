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

use std::{
    collections::BTreeMap,
    fmt,
    fs::{self, File},
    io::{ErrorKind, Write},
    path::Path,
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    Id,
    error::{Entity, InvalidMatch, InvalidTeam, LeagueError},
    group::Group,
    matches::{Match, MatchFilter, MatchSet, MatchUpdate, NewMatch, SetScore, status_from_sets},
    message::Message,
    results::{self, SetInput},
    role::PlayerRole,
    standings::{self, TeamStanding},
    status::MatchStatus,
    store::{MatchStore, TeamStore},
    team::{
        NewPlayer, NewTeam, Player, PlayerUpdate, RosterEntry, Team, TeamDetail, TeamPlayer,
        TeamPlayerInput, TeamUpdate, team_name_from_players, validate_composition,
        validate_player_name,
    },
};

/// Everything the league knows: players, teams, rosters and matches.
///
/// The tables are ordered by id, which is also the order things were created
/// in. Ids come from one counter shared by every table.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct League {
    #[serde(default)]
    next_id: Id,
    #[serde(default)]
    players: BTreeMap<Id, Player>,
    #[serde(default)]
    teams: BTreeMap<Id, Team>,
    #[serde(default)]
    team_players: Vec<TeamPlayer>,
    #[serde(default)]
    matches: BTreeMap<Id, Match>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TeamCounts {
    pub active: usize,
    pub total: usize,
    pub group_a: usize,
    pub group_b: usize,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MatchCounts {
    pub scheduled: usize,
    pub in_progress: usize,
    pub played: usize,
    pub cancelled: usize,
    pub total: usize,
}

/// Counters for the admin dashboard.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct LeagueStats {
    pub teams: TeamCounts,
    pub matches: MatchCounts,
}

impl fmt::Display for LeagueStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "teams: {} active of {} (group A: {}, group B: {})",
            self.teams.active, self.teams.total, self.teams.group_a, self.teams.group_b
        )?;
        write!(
            f,
            "matches: {} total, {} scheduled, {} in progress, {} played, {} cancelled",
            self.matches.total,
            self.matches.scheduled,
            self.matches.in_progress,
            self.matches.played,
            self.matches.cancelled
        )
    }
}

impl League {
    /// Reads a league saved with [`League::save`].
    ///
    /// A missing file is an empty league.
    ///
    /// # Errors
    ///
    /// If the file can't be read or isn't valid RON.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        match fs::read_to_string(path) {
            Ok(string) => match ron::from_str(&string) {
                Ok(league) => Ok(league),
                Err(err) => Err(anyhow::Error::msg(format!(
                    "RON: {}: {err}",
                    path.display()
                ))),
            },
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    info!("{} not found, starting an empty league", path.display());
                    Ok(Self::default())
                }
                _ => Err(anyhow::Error::msg(format!("{}: {err}", path.display()))),
            },
        }
    }

    /// # Errors
    ///
    /// If the league can't be serialized or the file can't be written.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        let mut file = File::create(path)?;
        file.write_all(string.as_bytes())?;
        debug!("saved league to {}", path.display());

        Ok(())
    }

    fn next_id(&mut self) -> Id {
        self.next_id += 1;
        self.next_id
    }

    // Players

    /// # Errors
    ///
    /// If the name is empty or too long.
    pub fn create_player(&mut self, new_player: NewPlayer) -> Result<Player, LeagueError> {
        let name = validate_player_name(&new_player.name)?;
        let player = Player {
            id: self.next_id(),
            name,
            email: new_player.email,
            phone: new_player.phone,
        };

        info!("new player {} {}", player.id, player.name);
        self.players.insert(player.id, player.clone());
        Ok(player)
    }

    /// # Errors
    ///
    /// If the player does not exist.
    pub fn player(&self, id: Id) -> Result<&Player, LeagueError> {
        self.players
            .get(&id)
            .ok_or_else(|| LeagueError::not_found(Entity::Player, id))
    }

    /// All players, by name.
    #[must_use]
    pub fn players(&self) -> Vec<Player> {
        let mut players: Vec<Player> = self.players.values().cloned().collect();
        players.sort_by_cached_key(|player| (player.name.to_lowercase(), player.id));
        players
    }

    /// # Errors
    ///
    /// If the player does not exist or the new name is invalid.
    pub fn update_player(&mut self, id: Id, update: PlayerUpdate) -> Result<Player, LeagueError> {
        let name = update
            .name
            .as_deref()
            .map(validate_player_name)
            .transpose()?;

        let player = self
            .players
            .get_mut(&id)
            .ok_or_else(|| LeagueError::not_found(Entity::Player, id))?;

        if let Some(name) = name {
            player.name = name;
        }
        if update.email.is_some() {
            player.email = update.email;
        }
        if update.phone.is_some() {
            player.phone = update.phone;
        }

        Ok(player.clone())
    }

    /// The teams a player is on, with the role they have there.
    ///
    /// # Errors
    ///
    /// If the player does not exist.
    pub fn player_teams(&self, id: Id) -> Result<Vec<(Team, PlayerRole)>, LeagueError> {
        self.player(id)?;

        Ok(self
            .team_players
            .iter()
            .filter(|link| link.player_id == id)
            .filter_map(|link| {
                self.teams
                    .get(&link.team_id)
                    .map(|team| (team.clone(), link.role))
            })
            .collect())
    }

    // Teams

    /// Checks a roster without touching anything.
    fn check_roster(&self, players: &[TeamPlayerInput]) -> Result<(), LeagueError> {
        validate_composition(players)?;

        for id in players.iter().filter_map(|player| player.player_id) {
            if !self.players.contains_key(&id) {
                return Err(InvalidTeam::UnknownPlayer(id).into());
            }
        }

        Ok(())
    }

    fn roster_names<'a>(&'a self, players: &'a [TeamPlayerInput]) -> Vec<&'a str> {
        players
            .iter()
            .filter_map(|player| match (&player.name, player.player_id) {
                (Some(name), _) => Some(name.trim()),
                (None, Some(id)) => self.players.get(&id).map(|player| player.name.as_str()),
                (None, None) => None,
            })
            .collect()
    }

    fn check_team_name(&self, name: &str, team_id: Option<Id>) -> Result<String, LeagueError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(InvalidTeam::EmptyName.into());
        }

        if self
            .teams
            .values()
            .any(|team| team.name == name && Some(team.id) != team_id)
        {
            return Err(InvalidTeam::DuplicateName(name.to_string()).into());
        }

        Ok(name.to_string())
    }

    /// Creates the players named inline and links everyone to the team.
    ///
    /// The roster has to have passed [`League::check_roster`].
    fn set_roster(&mut self, team_id: Id, players: Vec<TeamPlayerInput>) -> Result<(), LeagueError> {
        self.team_players.retain(|link| link.team_id != team_id);

        for player in players {
            let player_id = match (player.player_id, player.name) {
                (Some(id), _) => id,
                (None, Some(name)) => {
                    self.create_player(NewPlayer {
                        name,
                        ..NewPlayer::default()
                    })?
                    .id
                }
                (None, None) => return Err(InvalidTeam::PlayerReference.into()),
            };

            self.team_players.push(TeamPlayer {
                team_id,
                player_id,
                role: player.role,
            });
        }

        Ok(())
    }

    fn roster(&self, team_id: Id) -> Vec<RosterEntry> {
        self.team_players
            .iter()
            .filter(|link| link.team_id == team_id)
            .filter_map(|link| {
                self.players.get(&link.player_id).map(|player| RosterEntry {
                    id: player.id,
                    name: player.name.clone(),
                    role: link.role,
                })
            })
            .collect()
    }

    fn detail(&self, team: &Team) -> TeamDetail {
        TeamDetail {
            team: team.clone(),
            players: self.roster(team.id),
        }
    }

    /// Creates a team and any players it names inline.
    ///
    /// Without a name the team is named after its players' surnames.
    ///
    /// # Errors
    ///
    /// If the roster is invalid, a referenced player does not exist, or the
    /// name is empty or taken. Nothing is created in that case.
    pub fn create_team(&mut self, new_team: NewTeam) -> Result<TeamDetail, LeagueError> {
        self.check_roster(&new_team.players)?;

        let name = match &new_team.name {
            Some(name) => name.clone(),
            None => team_name_from_players(self.roster_names(&new_team.players))
                .ok_or(InvalidTeam::EmptyName)?,
        };
        let name = self.check_team_name(&name, None)?;

        let team = Team {
            id: self.next_id(),
            name,
            group: new_team.group,
            active: true,
        };
        self.set_roster(team.id, new_team.players)?;
        self.teams.insert(team.id, team.clone());

        info!("new team {team}");
        Ok(self.detail(&team))
    }

    /// # Errors
    ///
    /// If the team does not exist.
    pub fn team(&self, id: Id) -> Result<TeamDetail, LeagueError> {
        self.teams
            .get(&id)
            .map(|team| self.detail(team))
            .ok_or_else(|| LeagueError::not_found(Entity::Team, id))
    }

    /// Teams by name, optionally of one group and optionally with the
    /// archived ones.
    #[must_use]
    pub fn teams(&self, group: Option<Group>, include_archived: bool) -> Vec<TeamDetail> {
        let mut teams: Vec<TeamDetail> = self
            .teams
            .values()
            .filter(|team| include_archived || team.active)
            .filter(|team| group.is_none_or(|group| team.group == group))
            .map(|team| self.detail(team))
            .collect();

        teams.sort_by_cached_key(|detail| (detail.team.name.to_lowercase(), detail.team.id));
        teams
    }

    /// # Errors
    ///
    /// If the team does not exist or any of the changes is invalid. A team
    /// with matches cannot move to the other group. Nothing changes in that
    /// case.
    pub fn update_team(&mut self, id: Id, update: TeamUpdate) -> Result<TeamDetail, LeagueError> {
        if !self.teams.contains_key(&id) {
            return Err(LeagueError::not_found(Entity::Team, id));
        }

        let name = match &update.name {
            Some(name) => Some(self.check_team_name(name, Some(id))?),
            None => None,
        };
        if let Some(players) = &update.players {
            self.check_roster(players)?;
        }
        if let Some(group) = update.group
            && self.teams.get(&id).is_some_and(|team| team.group != group)
            && self.has_matches(id)
        {
            return Err(InvalidTeam::GroupChange(id).into());
        }

        if let Some(players) = update.players {
            self.set_roster(id, players)?;
        }

        let team = self
            .teams
            .get_mut(&id)
            .ok_or_else(|| LeagueError::not_found(Entity::Team, id))?;
        if let Some(name) = name {
            team.name = name;
        }
        if let Some(group) = update.group {
            team.group = group;
        }
        if let Some(active) = update.active {
            team.active = active;
        }

        let team = team.clone();
        debug!("updated team {team}");
        Ok(self.detail(&team))
    }

    fn set_active(&mut self, id: Id, active: bool) -> Result<TeamDetail, LeagueError> {
        let team = self
            .teams
            .get_mut(&id)
            .ok_or_else(|| LeagueError::not_found(Entity::Team, id))?;
        team.active = active;

        let team = team.clone();
        info!("team {team}");
        Ok(self.detail(&team))
    }

    /// Soft-deletes a team. It drops out of the table but keeps its matches.
    ///
    /// # Errors
    ///
    /// If the team does not exist.
    pub fn archive_team(&mut self, id: Id) -> Result<TeamDetail, LeagueError> {
        self.set_active(id, false)
    }

    /// # Errors
    ///
    /// If the team does not exist.
    pub fn activate_team(&mut self, id: Id) -> Result<TeamDetail, LeagueError> {
        self.set_active(id, true)
    }

    /// Removes a team for good: first its roster links, then the team.
    ///
    /// # Errors
    ///
    /// If the team does not exist or any match still refers to it.
    pub fn delete_team(&mut self, id: Id) -> Result<Team, LeagueError> {
        if !self.teams.contains_key(&id) {
            return Err(LeagueError::not_found(Entity::Team, id));
        }
        if self.has_matches(id) {
            return Err(InvalidTeam::HasMatches(id).into());
        }

        self.team_players.retain(|link| link.team_id != id);
        let team = self
            .teams
            .remove(&id)
            .ok_or_else(|| LeagueError::not_found(Entity::Team, id))?;

        info!("deleted team {team}");
        Ok(team)
    }

    // Matches

    fn has_matches(&self, team_id: Id) -> bool {
        MatchStatus::ALL
            .into_iter()
            .any(|status| !self.list_by_team(team_id, status).is_empty())
    }

    fn check_teams(&self, group: Group, home_team_id: Id, away_team_id: Id) -> Result<(), LeagueError> {
        if home_team_id == away_team_id {
            return Err(InvalidMatch::SameTeams.into());
        }

        for id in [home_team_id, away_team_id] {
            let team = self
                .teams
                .get(&id)
                .ok_or_else(|| LeagueError::not_found(Entity::Team, id))?;

            if team.group != group {
                return Err(InvalidMatch::GroupMismatch { team: id, group }.into());
            }
        }

        Ok(())
    }

    /// # Errors
    ///
    /// If the teams are the same, don't exist, or aren't both in the match's
    /// group.
    pub fn schedule_match(&mut self, new_match: NewMatch) -> Result<Match, LeagueError> {
        self.check_teams(new_match.group, new_match.home_team_id, new_match.away_team_id)?;

        let game = Match {
            id: self.next_id(),
            date: new_match.date,
            group: new_match.group,
            round: new_match.round,
            home_team_id: new_match.home_team_id,
            away_team_id: new_match.away_team_id,
            status: MatchStatus::Scheduled,
            sets: Vec::new(),
        };

        info!("new match {game}");
        self.matches.insert(game.id, game.clone());
        Ok(game)
    }

    /// # Errors
    ///
    /// If the match does not exist.
    pub fn find_match(&self, id: Id) -> Result<&Match, LeagueError> {
        self.matches
            .get(&id)
            .ok_or_else(|| LeagueError::not_found(Entity::Match, id))
    }

    /// Matches passing `filter`, latest first.
    #[must_use]
    pub fn matches(&self, filter: &MatchFilter) -> Vec<Match> {
        let mut matches: Vec<Match> = self
            .matches
            .values()
            .filter(|game| filter.matches(game))
            .cloned()
            .collect();

        matches.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        matches
    }

    /// Changes when, where or between whom a match is played.
    ///
    /// Played matches may be edited too, to fix mistakes. Unless the match is
    /// cancelled or has no sets yet, its status is derived from its sets again
    /// afterwards.
    ///
    /// # Errors
    ///
    /// If the match does not exist, or the teams after the update are the
    /// same, don't exist, or aren't both in the match's group. The teams are
    /// only checked when the group or a team changes.
    pub fn update_match(&mut self, id: Id, update: MatchUpdate) -> Result<Match, LeagueError> {
        let mut game = self.find_match(id)?.clone();
        let check_teams = update.group.is_some()
            || update.home_team_id.is_some()
            || update.away_team_id.is_some();

        if let Some(date) = update.date {
            game.date = date;
        }
        if let Some(group) = update.group {
            game.group = group;
        }
        if update.round.is_some() {
            game.round = update.round;
        }
        if let Some(home_team_id) = update.home_team_id {
            game.home_team_id = home_team_id;
        }
        if let Some(away_team_id) = update.away_team_id {
            game.away_team_id = away_team_id;
        }

        if check_teams {
            self.check_teams(game.group, game.home_team_id, game.away_team_id)?;
        }

        if game.status != MatchStatus::Cancelled && !game.sets.is_empty() {
            let status = status_from_sets(game.sets.iter().map(MatchSet::score));
            if status != game.status {
                debug!("match {id}: {} -> {status}", game.status);
                game.status = status;
            }
        }

        self.matches.insert(id, game.clone());
        Ok(game)
    }

    /// See [`results::enter_result`].
    ///
    /// # Errors
    ///
    /// If the result is malformed, the match does not exist, or it is already
    /// played or cancelled.
    pub fn enter_result(&mut self, id: Id, sets: &[SetInput]) -> Result<Match, LeagueError> {
        let game = results::enter_result(self, id, sets)?;
        info!("result {game}");
        Ok(game)
    }

    /// Calls a match off. Cancelling twice is harmless.
    ///
    /// # Errors
    ///
    /// If the match does not exist or is already played.
    pub fn cancel_match(&mut self, id: Id) -> Result<Match, LeagueError> {
        let status = self.find_match(id)?.status;
        if !status.can_be_cancelled() {
            return Err(LeagueError::Conflict { id, status });
        }

        self.set_status(id, MatchStatus::Cancelled)?;
        info!("match {id}: {status} -> {}", MatchStatus::Cancelled);
        self.find_match(id).cloned()
    }

    // Read side

    #[must_use]
    pub fn standings(&self, group: Option<Group>) -> Vec<TeamStanding> {
        standings::compute_standings(self, self, group)
    }

    /// # Errors
    ///
    /// If the team is unknown or archived.
    pub fn team_standing(&self, team_id: Id) -> Result<TeamStanding, LeagueError> {
        standings::team_standing(self, self, team_id)
    }

    #[must_use]
    pub fn stats(&self) -> LeagueStats {
        let mut stats = LeagueStats::default();

        for team in self.teams.values() {
            stats.teams.total += 1;
            if team.active {
                stats.teams.active += 1;
                match team.group {
                    Group::A => stats.teams.group_a += 1,
                    Group::B => stats.teams.group_b += 1,
                }
            }
        }

        for game in self.matches.values() {
            stats.matches.total += 1;
            match game.status {
                MatchStatus::Scheduled => stats.matches.scheduled += 1,
                MatchStatus::InProgress => stats.matches.in_progress += 1,
                MatchStatus::Played => stats.matches.played += 1,
                MatchStatus::Cancelled => stats.matches.cancelled += 1,
            }
        }

        stats
    }

    /// Answers one protocol message.
    ///
    /// Replies are RON. `Ok(None)` means there is nothing to reply.
    ///
    /// # Errors
    ///
    /// If the request fails; the error is a [`LeagueError`] when the league
    /// refused it.
    pub fn update(&mut self, message: Message) -> anyhow::Result<Option<String>> {
        match message {
            Message::Empty => Ok(None),
            Message::Ping | Message::Save => Ok(Some(String::new())),
            Message::Standings(group) => reply(&self.standings(group)),
            Message::TeamStanding(id) => reply(&self.team_standing(id)?),
            Message::Teams {
                group,
                include_archived,
            } => reply(&self.teams(group, include_archived)),
            Message::Team(id) => reply(&self.team(id)?),
            Message::CreateTeam(new_team) => reply(&self.create_team(new_team)?),
            Message::UpdateTeam(id, update) => reply(&self.update_team(id, update)?),
            Message::ArchiveTeam(id) => reply(&self.archive_team(id)?),
            Message::ActivateTeam(id) => reply(&self.activate_team(id)?),
            Message::DeleteTeam(id) => reply(&self.delete_team(id)?),
            Message::Players => reply(&self.players()),
            Message::Player(id) => reply(self.player(id)?),
            Message::CreatePlayer(new_player) => reply(&self.create_player(new_player)?),
            Message::UpdatePlayer(id, update) => reply(&self.update_player(id, update)?),
            Message::PlayerTeams(id) => reply(&self.player_teams(id)?),
            Message::Matches(filter) => reply(&self.matches(&filter)),
            Message::Match(id) => reply(self.find_match(id)?),
            Message::ScheduleMatch(new_match) => reply(&self.schedule_match(new_match)?),
            Message::UpdateMatch(id, update) => reply(&self.update_match(id, update)?),
            Message::EnterResult(id, sets) => reply(&self.enter_result(id, &sets)?),
            Message::CancelMatch(id) => reply(&self.cancel_match(id)?),
            Message::DeleteMatch(id) => reply(&self.delete_match(id)?),
            Message::Stats => reply(&self.stats()),
        }
    }
}

fn reply<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<Option<String>> {
    Ok(Some(ron::ser::to_string(value)?))
}

impl MatchStore for League {
    fn get_match(&self, id: Id) -> Option<Match> {
        self.matches.get(&id).cloned()
    }

    fn replace_sets(&mut self, match_id: Id, sets: &[SetScore]) -> Result<(), LeagueError> {
        if !self.matches.contains_key(&match_id) {
            return Err(LeagueError::not_found(Entity::Match, match_id));
        }

        let mut new_sets = Vec::with_capacity(sets.len());
        for score in sets {
            new_sets.push(MatchSet {
                id: self.next_id(),
                match_id,
                set_number: score.set_number,
                home_games: score.home_games,
                away_games: score.away_games,
            });
        }
        new_sets.sort_unstable_by_key(|set| set.set_number);

        let game = self
            .matches
            .get_mut(&match_id)
            .ok_or_else(|| LeagueError::not_found(Entity::Match, match_id))?;
        game.sets = new_sets;

        Ok(())
    }

    fn set_status(&mut self, match_id: Id, status: MatchStatus) -> Result<(), LeagueError> {
        let game = self
            .matches
            .get_mut(&match_id)
            .ok_or_else(|| LeagueError::not_found(Entity::Match, match_id))?;
        game.status = status;

        Ok(())
    }

    fn delete_match(&mut self, id: Id) -> Result<Match, LeagueError> {
        let game = self
            .matches
            .remove(&id)
            .ok_or_else(|| LeagueError::not_found(Entity::Match, id))?;

        info!("deleted match {game} and its {} sets", game.sets.len());
        Ok(game)
    }

    fn list_played_with_sets(&self) -> Vec<Match> {
        self.matches
            .values()
            .filter(|game| game.status == MatchStatus::Played)
            .cloned()
            .collect()
    }

    fn list_by_team(&self, team_id: Id, status: MatchStatus) -> Vec<Match> {
        self.matches
            .values()
            .filter(|game| game.status == status && game.involves(team_id))
            .cloned()
            .collect()
    }
}

impl TeamStore for League {
    fn list_active(&self, group: Option<Group>) -> Vec<Team> {
        self.teams
            .values()
            .filter(|team| team.active && group.is_none_or(|group| team.group == group))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn new_team(league: &mut League, name: &str) -> anyhow::Result<Id> {
        let detail = league.create_team(NewTeam {
            name: Some(name.to_string()),
            group: Group::A,
            players: vec![
                TeamPlayerInput::new_player(&format!("{name} One"), PlayerRole::Main),
                TeamPlayerInput::new_player(&format!("{name} Two"), PlayerRole::Main),
            ],
        })?;

        Ok(detail.team.id)
    }

    fn new_match(league: &mut League, home: Id, away: Id) -> anyhow::Result<Id> {
        let game = league.schedule_match(NewMatch {
            date: Utc.with_ymd_and_hms(2025, 11, 30, 16, 0, 0).unwrap(),
            group: Group::A,
            round: None,
            home_team_id: home,
            away_team_id: away,
        })?;

        Ok(game.id)
    }

    fn to_group_b() -> TeamUpdate {
        TeamUpdate {
            group: Some(Group::B),
            ..TeamUpdate::default()
        }
    }

    fn ids(matches: &[Match]) -> Vec<Id> {
        matches.iter().map(|game| game.id).collect()
    }

    #[test]
    fn teams_with_matches_keep_their_group() -> anyhow::Result<()> {
        let mut league = League::default();
        let x = new_team(&mut league, "X")?;
        let y = new_team(&mut league, "Y")?;
        let z = new_team(&mut league, "Z")?;
        let game = new_match(&mut league, x, y)?;

        assert_eq!(
            league.update_team(x, to_group_b()),
            Err(LeagueError::Team(InvalidTeam::GroupChange(x)))
        );
        assert_eq!(
            league.update_team(y, to_group_b()),
            Err(LeagueError::Team(InvalidTeam::GroupChange(y)))
        );
        assert_eq!(league.team(x)?.team.group, Group::A);

        let same_group = TeamUpdate {
            group: Some(Group::A),
            ..TeamUpdate::default()
        };
        assert!(league.update_team(x, same_group).is_ok());
        assert_eq!(league.update_team(z, to_group_b())?.team.group, Group::B);

        league.delete_match(game)?;
        assert_eq!(league.update_team(x, to_group_b())?.team.group, Group::B);

        Ok(())
    }

    #[test]
    fn matches_by_team_and_status() -> anyhow::Result<()> {
        let mut league = League::default();
        let x = new_team(&mut league, "X")?;
        let y = new_team(&mut league, "Y")?;
        let z = new_team(&mut league, "Z")?;
        let home = new_match(&mut league, x, y)?;
        let away = new_match(&mut league, z, x)?;

        league.enter_result(home, &[SetInput::new(1, 6, 4), SetInput::new(2, 6, 3)])?;

        assert_eq!(ids(&league.list_by_team(x, MatchStatus::Played)), vec![home]);
        assert_eq!(ids(&league.list_by_team(x, MatchStatus::Scheduled)), vec![away]);
        assert_eq!(ids(&league.list_by_team(y, MatchStatus::Played)), vec![home]);
        assert!(league.list_by_team(y, MatchStatus::Scheduled).is_empty());
        assert_eq!(ids(&league.list_by_team(z, MatchStatus::Scheduled)), vec![away]);
        assert!(league.list_by_team(x, MatchStatus::Cancelled).is_empty());

        league.cancel_match(away)?;
        assert_eq!(ids(&league.list_by_team(x, MatchStatus::Cancelled)), vec![away]);

        Ok(())
    }

    #[test]
    fn only_group_and_team_changes_check_the_teams() -> anyhow::Result<()> {
        let mut league = League::default();
        let x = new_team(&mut league, "X")?;
        let y = new_team(&mut league, "Y")?;
        let game = new_match(&mut league, x, y)?;

        // A data file edited by hand.
        if let Some(team) = league.teams.get_mut(&x) {
            team.group = Group::B;
        }

        let date = Utc.with_ymd_and_hms(2025, 12, 7, 18, 0, 0).unwrap();
        let moved = league.update_match(
            game,
            MatchUpdate {
                date: Some(date),
                round: Some("2".to_string()),
                ..MatchUpdate::default()
            },
        )?;
        assert_eq!(moved.date, date);
        assert_eq!(moved.round.as_deref(), Some("2"));

        assert_eq!(
            league.update_match(
                game,
                MatchUpdate {
                    group: Some(Group::A),
                    ..MatchUpdate::default()
                }
            ),
            Err(LeagueError::Match(InvalidMatch::GroupMismatch {
                team: x,
                group: Group::A,
            }))
        );
        assert_eq!(league.find_match(game)?, &moved);

        Ok(())
    }
}
