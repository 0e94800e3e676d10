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

use std::{io::Write as _, path::PathBuf};

use clap::{CommandFactory, Parser};
use padel_league::{COPYRIGHT, LONG_VERSION, config::Config};

/// Padel League Server
///
/// This is a TCP server that keeps the league and answers requests from
/// clients, one line per request.
#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Debug)]
#[command(long_version = LONG_VERSION, about = "Padel League Server")]
pub(crate) struct Args {
    /// A RON config file, flags override what it sets
    #[arg(long, value_name = "file")]
    pub config: Option<PathBuf>,

    /// Listen on host
    #[arg(long)]
    pub host: Option<String>,

    /// Listen on port
    #[arg(long)]
    pub port: Option<u16>,

    /// Where the league is kept, relative paths are inside the data folder
    #[arg(long, value_name = "file")]
    pub data_file: Option<PathBuf>,

    /// Seconds between saves of the data file
    #[arg(long, value_name = "seconds")]
    pub save_interval: Option<u64>,

    /// Whether to log on the debug level
    #[arg(long)]
    pub debug: bool,

    /// Whether to skip the data file
    #[arg(long)]
    pub skip_the_data_file: bool,

    /// Whether the application is being run by systemd
    #[arg(long)]
    pub systemd: bool,

    /// Build the manpage
    #[arg(long)]
    pub man: bool,
}

impl Args {
    /// The config file, if any, with the flags applied on top.
    pub(crate) fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(host) = &self.host {
            config.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(data_file) = &self.data_file {
            config.data_file.clone_from(data_file);
        }
        if let Some(save_interval) = self.save_interval {
            config.save_interval_secs = save_interval;
        }

        config.debug |= self.debug;
        config.skip_data_file |= self.skip_the_data_file;
        config.systemd |= self.systemd;

        Ok(config)
    }

    pub(crate) fn generate_man_page() -> anyhow::Result<()> {
        let mut buffer: Vec<u8> = Vec::default();
        let cmd = Self::command()
            .name("padel-league-server")
            .long_version(None);
        let man = clap_mangen::Man::new(cmd).date("2026-10-17");

        man.render(&mut buffer)?;
        write!(buffer, "{COPYRIGHT}")?;

        std::fs::write("padel-league-server.1", buffer)?;
        Ok(())
    }
}
