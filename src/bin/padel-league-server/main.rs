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

#![deny(clippy::expect_used)]
#![deny(clippy::indexing_slicing)]
#![deny(clippy::panic)]
#![deny(clippy::unwrap_used)]

mod command_line;
mod tests;

use std::{
    fmt,
    io::{BufRead, BufReader, Write},
    net::{TcpListener, TcpStream},
    path::PathBuf,
    process::exit,
    str::FromStr,
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};

use clap::Parser;
use log::{debug, error, info, trace};
use padel_league::{
    Id,
    config::DEFAULT_HOST,
    error::LeagueError,
    league::League,
    message::Message,
    utils::{self, create_data_folder},
};

use crate::command_line::Args;

type Request = (String, Option<Sender<String>>);

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.config()?;
    utils::init_logger("padel_league_server", config.debug, config.systemd);

    if args.man {
        return Args::generate_man_page();
    }

    let (tx, rx) = mpsc::channel();
    let mut server = Server::default();

    if config.skip_data_file {
        info!("skipping the data file");
    } else {
        create_data_folder()?;
        server.load_data_file(config.data_file())?;
        Server::exit_on_ctrlc(tx.clone(), config.systemd)?;
    }

    thread::spawn(move || handle_error(server.handle_messages(&rx)));
    Server::save(tx.clone(), config.save_interval());

    let mut address = config.address();
    let listener = match TcpListener::bind(&address) {
        Ok(listener) => listener,
        Err(error) if config.host == DEFAULT_HOST => {
            error!("TcpLister::bind: {error}");

            address = format!("0.0.0.0:{}", config.port);
            TcpListener::bind(&address)?
        }
        Err(error) => return Err(anyhow::Error::msg(format!("{address}: {error}"))),
    };

    info!("listening on {address} ...");
    serve(&listener, &tx);

    Ok(())
}

/// Accepts connections until the listener fails. Connection ids start at 1,
/// 0 is the server itself.
fn serve(listener: &TcpListener, tx: &Sender<Request>) {
    for (index, stream) in (1..).zip(listener.incoming()) {
        let stream = match stream {
            Ok(stream) => stream,
            Err(error) => {
                error!("stream: {error}");
                continue;
            }
        };

        let tx = tx.clone();

        thread::spawn(move || {
            if let Err(error) = handle_connection(index, stream, &tx) {
                error!("connection {index}: {error}");
            }
        });
    }
}

fn handle_connection(index: Id, stream: TcpStream, tx: &Sender<Request>) -> anyhow::Result<()> {
    match stream.peer_addr() {
        Ok(address) => info!("{index} connected from {address}"),
        Err(error) => debug!("{index} peer_addr: {error}"),
    }

    let mut reader = BufReader::new(stream.try_clone()?);
    let (client_tx, client_rx) = mpsc::channel();

    thread::spawn(move || {
        if let Err(error) = receiving_and_writing(stream, &client_rx) {
            error!("receiving_and_writing: {error}");
        }
    });

    let mut buf = String::new();
    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }

        let line = buf.trim();
        if line.chars().any(|ch| ch.is_control()) {
            client_tx.send("? _ parse: control characters are not allowed".to_string())?;
            continue;
        }

        tx.send((format!("{index} {line}"), Some(client_tx.clone())))?;
    }

    info!("{index} disconnected");
    Ok(())
}

fn receiving_and_writing<T: Send + Write>(
    mut stream: T,
    client_rx: &Receiver<String>,
) -> anyhow::Result<()> {
    for mut message in client_rx {
        message.push('\n');
        if let Err(error) = stream.write_all(message.as_bytes()) {
            return Err(anyhow::Error::msg(format!("{message}: {error}")));
        }
    }

    Ok(())
}

fn handle_error<T, E: fmt::Display>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => {
            error!("{error}");
            exit(1)
        }
    }
}

#[derive(Debug, Default)]
struct Server {
    league: League,
    /// `None` when the data file is skipped.
    data_file: Option<PathBuf>,
    unsaved_changes: bool,
}

impl Server {
    fn exit_on_ctrlc(tx: Sender<Request>, systemd: bool) -> anyhow::Result<()> {
        ctrlc::set_handler(move || {
            if !systemd {
                println!();
            }
            handle_error(tx.send(("0 exit".to_string(), None)));
        })?;

        Ok(())
    }

    fn handle_messages(&mut self, rx: &Receiver<Request>) -> anyhow::Result<()> {
        for (message, option_tx) in rx {
            if let Some(reply) = self.handle_messages_internal(&message)
                && let Some(tx) = option_tx
                && let Err(error) = tx.send(reply)
            {
                debug!("the client left before the reply: {error}");
            }
        }

        Err(anyhow::Error::msg("every sender is gone"))
    }

    /// Answers one `<index> <request>` line.
    fn handle_messages_internal(&mut self, message: &str) -> Option<String> {
        let (index, line) = message.split_once(' ').unwrap_or((message, ""));
        let index: Id = index.parse().ok()?;
        let line = line.trim();
        let command = line.split_whitespace().next().unwrap_or("_");

        if index == 0 && command == "exit" {
            self.shutdown();
            exit(0);
        }

        let message = match Message::from_str(line) {
            Ok(Message::Empty) => return None,
            Ok(message) => message,
            Err(error) => return Some(format!("? {command} parse: {error}")),
        };

        if command == "ping" {
            trace!("{index} {line}");
        } else {
            debug!("{index} {line}");
        }

        let mutates = message.mutates();
        let save = matches!(message, Message::Save);

        match self.league.update(message) {
            Ok(reply) => {
                self.unsaved_changes |= mutates;
                if save {
                    self.save_league(index == 0);
                }

                match reply {
                    Some(reply) if !reply.is_empty() => Some(format!("= {command} {reply}")),
                    _ => Some(format!("= {command}")),
                }
            }
            Err(error) => {
                let kind = error
                    .downcast_ref::<LeagueError>()
                    .map_or_else(|| "invalid".to_string(), |error| error.kind().to_string());

                info!("{index} {command}: {error}");
                Some(format!("? {command} {kind}: {error}"))
            }
        }
    }

    fn load_data_file(&mut self, data_file: PathBuf) -> anyhow::Result<()> {
        self.league = League::load(&data_file)?;
        info!("league data in {}", data_file.display());
        self.data_file = Some(data_file);

        Ok(())
    }

    fn save(tx: Sender<Request>, interval: Duration) {
        thread::spawn(move || {
            loop {
                thread::sleep(interval);
                handle_error(tx.send(("0 save".to_string(), None)));
            }
        });
    }

    /// Saves whether or not anything changed.
    fn shutdown(&mut self) {
        self.save_league(false);
        info!("exit");
    }

    /// Scheduled saves are skipped when nothing changed.
    fn save_league(&mut self, scheduled: bool) {
        if scheduled && !self.unsaved_changes {
            return;
        }

        if let Some(data_file) = &self.data_file {
            match self.league.save(data_file) {
                Ok(()) => self.unsaved_changes = false,
                Err(error) => error!("save file: {error}"),
            }
        }
    }
}
