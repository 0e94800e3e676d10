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
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::utils::data_file;

pub const DEFAULT_HOST: &str = "[::]";
pub const DEFAULT_PORT: u16 = 49200;
pub const DATA_FILE: &str = "league.ron";

const HOUR_IN_SECONDS: u64 = 60 * 60;

/// Settings shared by the binaries.
///
/// Every field has a default, so a config file only needs the fields it
/// changes:
///
/// ```ron
/// (port: 49300, save_interval_secs: 600)
/// ```
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Relative paths are inside the data folder.
    pub data_file: PathBuf,
    pub save_interval_secs: u64,
    pub skip_data_file: bool,
    pub debug: bool,
    pub systemd: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DATA_FILE),
            save_interval_secs: HOUR_IN_SECONDS,
            skip_data_file: false,
            debug: false,
            systemd: false,
        }
    }
}

impl Config {
    /// Reads a RON config file. A missing file gives the defaults.
    ///
    /// # Errors
    ///
    /// If the file can't be read or isn't valid RON.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        match fs::read_to_string(path) {
            Ok(string) => ron::from_str(&string)
                .map_err(|err| anyhow::Error::msg(format!("RON: {}: {err}", path.display()))),
            Err(err) => match err.kind() {
                ErrorKind::NotFound => Ok(Self::default()),
                _ => Err(anyhow::Error::msg(format!("{}: {err}", path.display()))),
            },
        }
    }

    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn data_file(&self) -> PathBuf {
        data_file(&self.data_file)
    }

    #[must_use]
    pub fn save_interval(&self) -> Duration {
        Duration::from_secs(self.save_interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() -> anyhow::Result<()> {
        let config: Config = ron::from_str("(port: 49300, debug: true)")?;

        assert_eq!(config.port, 49300);
        assert!(config.debug);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.save_interval(), Duration::from_secs(HOUR_IN_SECONDS));
        assert_eq!(config.address(), "[::]:49300");

        Ok(())
    }

    #[test]
    fn missing_config_file() -> anyhow::Result<()> {
        let config = Config::load(Path::new("/nonexistent/padel-league.ron"))?;
        assert_eq!(config, Config::default());

        Ok(())
    }
}
