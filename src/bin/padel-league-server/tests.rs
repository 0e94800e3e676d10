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

#![allow(clippy::indexing_slicing, clippy::unwrap_used)]
#![cfg(test)]

use super::*;

use std::{env, fs, process};

use padel_league::standings::TeamStanding;

const CREATE_X: &str = r#"1 create_team (name: "X", group: A, players: [(name: "Ana Lopez", role: Main), (name: "Eva Ruiz", role: Main)])"#;
const CREATE_Y: &str = r#"1 create_team (name: "Y", group: A, players: [(name: "Mia Perez", role: Main), (name: "Lia Diaz", role: Main)])"#;

fn reply(server: &mut Server, message: &str) -> String {
    server.handle_messages_internal(message).unwrap()
}

/// A server with teams X (id 1) and Y (id 4) and a match between them (id 7).
fn server_with_a_match() -> Server {
    let mut server = Server::default();

    assert!(reply(&mut server, CREATE_X).starts_with("= create_team "));
    assert!(reply(&mut server, CREATE_Y).starts_with("= create_team "));
    assert!(
        reply(
            &mut server,
            r#"1 schedule_match (date: "2025-11-30T16:00:00Z", group: A, home_team_id: 1, away_team_id: 4)"#
        )
        .starts_with("= schedule_match ")
    );

    server
}

#[test]
fn replies() {
    let mut server = server_with_a_match();

    assert_eq!(reply(&mut server, "1 ping"), "= ping");
    assert_eq!(server.handle_messages_internal("1 # a comment"), None);
    assert_eq!(server.handle_messages_internal("1"), None);
    assert!(reply(&mut server, "1 enter_result 7 6-4 6-3").contains("Played"));

    let standings = reply(&mut server, "1 standings A");
    let standings: Vec<TeamStanding> =
        ron::from_str(standings.strip_prefix("= standings ").unwrap()).unwrap();
    assert_eq!(standings.len(), 2);
    assert_eq!(standings[0].team_name, "X");
    assert_eq!(standings[0].points, 3);
}

#[test]
fn error_kinds() {
    let mut server = server_with_a_match();

    assert!(reply(&mut server, "1 match 99").starts_with("? match not_found: "));
    assert!(reply(&mut server, "1 enter_result 7 0-0").starts_with("? enter_result invalid: "));
    assert!(reply(&mut server, "1 standings C").starts_with("? standings parse: "));
    assert!(reply(&mut server, "1 fly_away").starts_with("? fly_away parse: "));

    reply(&mut server, "1 cancel_match 7");
    assert!(reply(&mut server, "1 enter_result 7 6-4 6-3").starts_with("? enter_result conflict: "));
}

#[test]
fn only_the_server_sends_exit() {
    let mut server = Server::default();
    assert!(reply(&mut server, "1 exit").starts_with("? exit parse: "));
}

#[test]
fn scheduled_saves_skip_an_unchanged_league() {
    let path = env::temp_dir().join(format!("padel-league-server-{}.ron", process::id()));
    let mut server = Server {
        data_file: Some(path.clone()),
        ..Server::default()
    };

    assert_eq!(reply(&mut server, "0 save"), "= save");
    assert!(!path.exists());

    reply(&mut server, CREATE_X);
    assert!(server.unsaved_changes);
    reply(&mut server, "0 save");
    assert!(!server.unsaved_changes);

    let league = League::load(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(league.teams(None, false).len(), 1);
}

#[test]
fn shutting_down_always_saves() {
    let path = env::temp_dir().join(format!("padel-league-shutdown-{}.ron", process::id()));
    let mut server = Server {
        data_file: Some(path.clone()),
        ..Server::default()
    };

    assert!(!server.unsaved_changes);
    server.shutdown();
    assert!(path.exists());

    let league = League::load(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(league, League::default());
}

#[test]
fn writes_one_reply_per_line() {
    let (tx, rx) = mpsc::channel();
    tx.send("= ping".to_string()).unwrap();
    tx.send("= stats".to_string()).unwrap();
    drop(tx);

    let mut buffer = Vec::new();
    receiving_and_writing(&mut buffer, &rx).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), "= ping\n= stats\n");
}

#[test]
fn over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();

    let (tx, rx) = mpsc::channel();
    let mut server = Server::default();
    thread::spawn(move || server.handle_messages(&rx));
    thread::spawn(move || serve(&listener, &tx));

    let mut stream = TcpStream::connect(address).unwrap();
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut buf = String::new();

    stream.write_all(b"ping\n").unwrap();
    reader.read_line(&mut buf).unwrap();
    assert_eq!(buf, "= ping\n");

    buf.clear();
    stream.write_all(b"stats\n").unwrap();
    reader.read_line(&mut buf).unwrap();
    assert!(buf.starts_with("= stats "));
}
