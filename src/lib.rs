//! A league backend for a two-group padel round robin.
//!
//! Teams of two or three players play matches of up to three sets inside
//! their group. Results are entered set by set, and the league table is
//! computed from the played matches whenever it is asked for.
//!
//! ## Feature Flags
//!
//! By default the `server` feature flag is enabled.
//!
//! * bench - enable the `criterion` benchmarks
//! * server - enable the `padel-league-server` binary
//!
//! ## Message Protocol
//!
//! Get more information about the [message protocol] used by the server.
//!
//! [message protocol]: https://docs.rs/padel-league/latest/padel_league/message/enum.Message.html

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

#![deny(clippy::panic)]

pub mod config;
pub mod error;
pub mod group;
pub mod import;
pub mod league;
pub mod matches;
pub mod message;
pub mod results;
pub mod role;
pub mod standings;
pub mod status;
pub mod store;
pub mod team;
pub mod utils;

pub type Id = u128;
pub const HOME: &str = "padel-league";
pub const SERVER_PORT: &str = ":49200";

pub const COPYRIGHT: &str = r".SH COPYRIGHT
Copyright (C) 2025-2026 Developers of the padel-league project

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU Affero General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU Affero General Public License for more details.

You should have received a copy of the GNU Affero General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.
";

pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "
Copyright (c) 2025 Developers of the padel-league project
Licensed under the AGPLv3"
);
