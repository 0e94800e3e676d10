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

//! Bulk loading of teams and match schedules.

use std::{fmt, io::Read, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::{info, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    Id,
    error::{InvalidTeam, LeagueError},
    group::Group,
    league::League,
    matches::{MatchFilter, NewMatch},
    message::from_ron,
    team::{NewTeam, split_player_names, team_name_from_players},
};

const DATE_TIME_FORMATS: [&str; 7] = [
    "%Y-%m-%d %a %H:%M",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y"];

/// `(teams: [NewTeam, ...])`
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TeamsFile {
    pub teams: Vec<NewTeam>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ImportReport {
    pub created: usize,
    /// One line per skipped entry, saying why.
    pub skipped: Vec<String>,
}

impl ImportReport {
    fn skip(&mut self, reason: String) {
        warn!("skipped: {reason}");
        self.skipped.push(reason);
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "created {}, skipped {}", self.created, self.skipped.len())?;
        for reason in &self.skipped {
            write!(f, "\n  {reason}")?;
        }

        Ok(())
    }
}

/// Creates every team of a [`TeamsFile`]. Teams whose name is taken are
/// skipped, as are teams the league rejects.
///
/// # Errors
///
/// If the file is not a valid [`TeamsFile`].
pub fn import_teams(league: &mut League, ron: &str) -> anyhow::Result<ImportReport> {
    let file: TeamsFile = from_ron(ron)?;
    let mut report = ImportReport::default();

    for (index, new_team) in file.teams.into_iter().enumerate() {
        let label = new_team
            .name
            .clone()
            .unwrap_or_else(|| format!("team #{}", index + 1));

        match league.create_team(new_team) {
            Ok(detail) => {
                info!("imported team {}", detail.team);
                report.created += 1;
            }
            Err(LeagueError::Team(InvalidTeam::DuplicateName(name))) => {
                report.skip(format!("{name}: already exists"));
            }
            Err(err) => report.skip(format!("{label}: {err}")),
        }
    }

    Ok(report)
}

/// Where the interesting columns of a schedule are.
#[derive(Debug, Default)]
struct Columns {
    date: Option<usize>,
    time: Option<usize>,
    home: Option<usize>,
    away: Option<usize>,
    group: Option<usize>,
    round: Option<usize>,
}

impl Columns {
    fn new(headers: &csv::StringRecord) -> Self {
        let mut columns = Self::default();

        for (index, header) in headers.iter().enumerate() {
            let header = header.trim().to_lowercase();

            if header.contains("round") || header.contains("kolo") {
                columns.round.get_or_insert(index);
            } else if header.contains("start") || header.contains("date") {
                columns.date.get_or_insert(index);
            } else if header.contains("end") || header.contains("time") {
                columns.time.get_or_insert(index);
            } else if header.contains("team a") {
                columns.home = Some(index);
            } else if header.contains("team b") {
                columns.away = Some(index);
            } else if header.contains("home") {
                columns.home.get_or_insert(index);
            } else if header.contains("away") {
                columns.away.get_or_insert(index);
            } else if header.contains("group") || header.contains("grupa") {
                columns.group.get_or_insert(index);
            }
        }

        columns
    }
}

fn field(record: &csv::StringRecord, column: Option<usize>) -> Option<&str> {
    column
        .and_then(|column| record.get(column))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Reads a schedule date, optionally completed by a separate time column.
///
/// A bare date without a usable time is midnight.
#[must_use]
pub fn parse_datetime(date: &str, time: Option<&str>) -> Option<DateTime<Utc>> {
    let date = date.trim();

    let parse = |string: &str| {
        DATE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(string, format).ok())
    };

    parse(date)
        .or_else(|| time.and_then(|time| parse(&format!("{date} {}", time.trim()))))
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(date, format).ok())
                .and_then(|day| day.and_hms_opt(0, 0, 0))
        })
        .map(|date_time| date_time.and_utc())
}

/// Reads a group cell such as `A`, `b` or `Grupa B`.
#[must_use]
pub fn parse_group(cell: &str) -> Option<Group> {
    Group::from_str(cell)
        .ok()
        .or_else(|| cell.split_whitespace().find_map(|word| Group::from_str(word).ok()))
}

/// Schedules the matches of a CSV schedule.
///
/// Team cells hold the players' names separated by dashes and are matched to
/// teams by the name they generate. Without a group column the home team's
/// group is used. Rows that can't be used are skipped and reported, as are
/// matches already in the league.
///
/// # Errors
///
/// If the CSV can't be read or has no date or team columns.
pub fn import_matches<R: Read>(league: &mut League, reader: R) -> anyhow::Result<ImportReport> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::new(reader.headers()?);
    if columns.date.is_none() || columns.home.is_none() || columns.away.is_none() {
        return Err(anyhow::Error::msg(
            "the schedule needs a date column and two team columns",
        ));
    }

    let teams: FxHashMap<String, (Id, Group)> = league
        .teams(None, true)
        .into_iter()
        .map(|detail| (detail.team.name, (detail.team.id, detail.team.group)))
        .collect();

    let mut report = ImportReport::default();

    for (index, record) in reader.records().enumerate() {
        let line = index + 2;
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                report.skip(format!("line {line}: {err}"));
                continue;
            }
        };

        let Some(date) = field(&record, columns.date) else {
            report.skip(format!("line {line}: no date"));
            continue;
        };
        let Some(date) = parse_datetime(date, field(&record, columns.time)) else {
            report.skip(format!("line {line}: could not parse date '{date}'"));
            continue;
        };

        let mut sides = Vec::with_capacity(2);
        for column in [columns.home, columns.away] {
            let players = field(&record, column).unwrap_or_default();
            let name = team_name_from_players(split_player_names(players));

            match name.as_ref().and_then(|name| teams.get(name)) {
                Some(team) => sides.push(*team),
                None => {
                    report.skip(format!(
                        "line {line}: no team for '{players}' ({})",
                        name.as_deref().unwrap_or_default()
                    ));
                    break;
                }
            }
        }
        let &[(home_team_id, home_group), (away_team_id, _)] = sides.as_slice() else {
            continue;
        };

        let group = match field(&record, columns.group) {
            Some(cell) => match parse_group(cell) {
                Some(group) => group,
                None => {
                    report.skip(format!("line {line}: invalid group '{cell}'"));
                    continue;
                }
            },
            None => home_group,
        };

        let already_scheduled = league
            .matches(&MatchFilter {
                team_id: Some(home_team_id),
                ..MatchFilter::default()
            })
            .iter()
            .any(|game| {
                game.date == date
                    && game.home_team_id == home_team_id
                    && game.away_team_id == away_team_id
            });
        if already_scheduled {
            report.skip(format!("line {line}: match already exists"));
            continue;
        }

        let new_match = NewMatch {
            date,
            group,
            round: field(&record, columns.round).map(ToString::to_string),
            home_team_id,
            away_team_id,
        };

        match league.schedule_match(new_match) {
            Ok(_) => report.created += 1,
            Err(err) => report.skip(format!("line {line}: {err}")),
        }
    }

    Ok(report)
}
