use std::{
    env, fs,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Utc;
use env_logger::Builder;
use log::LevelFilter;

use crate::HOME;

/// Sets up `env_logger`.
///
/// `name` is the log target of the calling binary, it and the library log at
/// the Debug level when `debug` is set.
pub fn init_logger(name: &str, debug: bool, systemd: bool) {
    let mut builder = Builder::new();

    if systemd {
        builder.format(|formatter, record| {
            writeln!(formatter, "[{}]: {}", record.level(), record.args())
        });
    } else {
        builder.format(|formatter, record| {
            writeln!(
                formatter,
                "{} [{}] ({}): {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S %z"),
                record.level(),
                record.target(),
                record.args()
            )
        });
    }

    if let Ok(var) = env::var("RUST_LOG") {
        builder.parse_filters(&var);
    } else {
        // if no RUST_LOG provided, default to logging at the Info level
        builder.filter(None, LevelFilter::Info);

        if debug {
            builder.filter(Some(name), LevelFilter::Debug);
            builder.filter(Some("padel_league"), LevelFilter::Debug);
        }
    }

    builder.init();
}

/// `<data_dir>/padel-league`, or the working directory when the platform has
/// no data directory.
#[must_use]
pub fn data_folder() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from("."), |dir| dir.join(HOME))
}

/// # Errors
///
/// If the folder can't be created.
pub fn create_data_folder() -> anyhow::Result<()> {
    let folder = data_folder();
    fs::create_dir_all(&folder)
        .map_err(|err| anyhow::Error::msg(format!("{}: {err}", folder.display())))
}

/// Resolves a file name inside the data folder. Absolute paths are kept.
#[must_use]
pub fn data_file<P: AsRef<Path>>(file: P) -> PathBuf {
    let file = file.as_ref();
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        data_folder().join(file)
    }
}
