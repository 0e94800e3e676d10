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
    fs::{self, File},
    io::Write,
    path::PathBuf,
};

use clap::{CommandFactory, Parser, Subcommand};
use log::info;
use padel_league::{
    COPYRIGHT, Id, LONG_VERSION,
    config::Config,
    group::Group,
    import::{import_matches, import_teams},
    league::League,
    matches::MatchFilter,
    role::PlayerRole,
    standings::Standings,
    status::MatchStatus,
    utils::{self, create_data_folder},
};

/// Padel League
///
/// Loads teams and schedules into the league data file and prints the table.
/// Stop the server first, it overwrites the data file when it saves.
#[derive(Parser, Debug)]
#[command(long_version = LONG_VERSION, about = "Padel League")]
struct Args {
    /// A RON config file
    #[arg(long, value_name = "file")]
    config: Option<PathBuf>,

    /// Where the league is kept, relative paths are inside the data folder
    #[arg(long, value_name = "file")]
    data_file: Option<PathBuf>,

    /// Whether to log on the debug level
    #[arg(long)]
    debug: bool,

    /// Build the manpage
    #[arg(long)]
    man: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the teams of a RON file: (teams: [(name: .., group: A, players: [..]), ..])
    ImportTeams { file: PathBuf },

    /// Schedule the matches of a CSV file with date, group, team a and team b
    /// columns
    ImportMatches { file: PathBuf },

    /// Print the matches, latest first
    Matches {
        /// scheduled, in_progress, played or cancelled
        #[arg(long)]
        status: Option<MatchStatus>,

        /// Only this group
        #[arg(long)]
        group: Option<Group>,

        /// Only the matches of this team
        #[arg(long, value_name = "id")]
        team: Option<Id>,
    },

    /// Print the players and the teams they play on
    Players {
        /// Only players with this role on a team: main or reserve
        #[arg(long)]
        role: Option<PlayerRole>,
    },

    /// Print the league table
    Standings {
        /// Only this group
        #[arg(long)]
        group: Option<Group>,
    },

    /// Print how many teams and matches there are
    Stats,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(data_file) = &args.data_file {
        config.data_file.clone_from(data_file);
    }
    utils::init_logger("padel_league", args.debug || config.debug, config.systemd);

    if args.man {
        let mut buffer: Vec<u8> = Vec::default();
        let cmd = Args::command().name("padel-league").long_version(None);
        let man = clap_mangen::Man::new(cmd).date("2026-10-17");

        man.render(&mut buffer)?;
        write!(buffer, "{COPYRIGHT}")?;

        fs::write("padel-league.1", buffer)?;
        return Ok(());
    }

    let Some(command) = args.command else {
        Args::command().print_help()?;
        return Ok(());
    };

    create_data_folder()?;
    let data_file = config.data_file();
    let mut league = League::load(&data_file)?;

    match command {
        Command::ImportTeams { file } => {
            let report = import_teams(&mut league, &fs::read_to_string(&file)?)?;
            league.save(&data_file)?;
            info!("{}: {}", file.display(), report.created);
            println!("{report}");
        }
        Command::ImportMatches { file } => {
            let report = import_matches(&mut league, File::open(&file)?)?;
            league.save(&data_file)?;
            info!("{}: {}", file.display(), report.created);
            println!("{report}");
        }
        Command::Matches {
            status,
            group,
            team,
        } => {
            let filter = MatchFilter {
                group,
                status,
                team_id: team,
                ..MatchFilter::default()
            };
            for game in league.matches(&filter) {
                println!("{game}");
            }
        }
        Command::Players { role } => {
            for player in league.players() {
                let teams: Vec<String> = league
                    .player_teams(player.id)?
                    .into_iter()
                    .filter(|(_, team_role)| role.is_none_or(|role| role == *team_role))
                    .map(|(team, team_role)| format!("{} ({team_role})", team.name))
                    .collect();

                if role.is_none() || !teams.is_empty() {
                    println!("{} {}: {}", player.id, player.name, teams.join(", "));
                }
            }
        }
        Command::Standings { group } => {
            print!("{}", Standings(league.standings(group)));
        }
        Command::Stats => println!("{}", league.stats()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn filters_parse_ignoring_case() -> anyhow::Result<()> {
        let args = Args::try_parse_from([
            "padel-league",
            "matches",
            "--status",
            "PLAYED",
            "--group",
            "b",
        ])?;
        let Some(Command::Matches { status, group, team }) = args.command else {
            panic!("expected the matches command");
        };
        assert_eq!(status, Some(MatchStatus::Played));
        assert_eq!(group, Some(Group::B));
        assert_eq!(team, None);

        let args = Args::try_parse_from(["padel-league", "players", "--role", "Reserve"])?;
        let Some(Command::Players { role }) = args.command else {
            panic!("expected the players command");
        };
        assert_eq!(role, Some(PlayerRole::Reserve));

        assert!(Args::try_parse_from(["padel-league", "matches", "--status", "finished"]).is_err());
        assert!(Args::try_parse_from(["padel-league", "players", "--role", "coach"]).is_err());

        Ok(())
    }
}
