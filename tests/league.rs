use chrono::{TimeZone, Utc};

use padel_league::{
    Id,
    error::{InvalidMatch, LeagueError},
    group::Group,
    import::{import_matches, import_teams},
    league::League,
    matches::{MatchFilter, MatchUpdate},
    results::SetInput,
    role::PlayerRole,
    standings::TeamStanding,
    status::MatchStatus,
    team::{PlayerUpdate, TeamUpdate},
};

const TEAMS: &str = r#"(teams: [
    (group: A, players: [(name: "Milos Milutinovic", role: Main), (name: "Marko Petrovic", role: Main)]),
    (group: A, players: [(name: "Ana Lopez", role: Main), (name: "Eva Ruiz", role: Main)]),
    (group: A, players: [(name: "Mia Perez", role: Main), (name: "Lia Diaz", role: Main), (name: "Sara Gil", role: Reserve)]),
    (group: A, players: [(name: "Milos Milutinovic", role: Main), (name: "Marko Petrovic", role: Main)]),
    (group: B, players: [(name: "Lone Wolf", role: Main)]),
])"#;

const SCHEDULE: &str = "Kolo,Start,Grupa,Team A,Team B
1,2025-11-30 Sun 16:00,A,Milos Milutinovic-Marko Petrovic,Ana Lopez-Eva Ruiz
1,30.11.2025 18:00,Grupa A,Mia Perez – Lia Diaz – Sara Gil,Milos Milutinovic-Marko Petrovic
2,2025-12-07,A,Nobody Here-Someone Else,Ana Lopez-Eva Ruiz
1,2025-11-30 Sun 16:00,A,Milos Milutinovic-Marko Petrovic,Ana Lopez-Eva Ruiz
";

fn team_id(league: &League, name: &str) -> Id {
    league
        .teams(None, true)
        .into_iter()
        .find(|detail| detail.team.name == name)
        .map(|detail| detail.team.id)
        .unwrap()
}

fn row<'a>(standings: &'a [TeamStanding], name: &str) -> &'a TeamStanding {
    standings
        .iter()
        .find(|standing| standing.team_name == name)
        .unwrap()
}

fn imported_league() -> anyhow::Result<League> {
    let mut league = League::default();
    import_teams(&mut league, TEAMS)?;
    import_matches(&mut league, SCHEDULE.as_bytes())?;

    Ok(league)
}

#[test]
fn import_teams_skips_what_it_cannot_create() -> anyhow::Result<()> {
    let mut league = League::default();
    let report = import_teams(&mut league, TEAMS)?;

    assert_eq!(report.created, 3);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.skipped[0], "MIL | PET: already exists");
    assert!(report.skipped[1].starts_with("team #5: "));

    let names: Vec<String> = league
        .teams(None, false)
        .into_iter()
        .map(|detail| detail.team.name)
        .collect();
    assert_eq!(names, vec!["LOP | RUI", "MIL | PET", "PER | DIA | GIL"]);
    assert_eq!(league.players().len(), 7);

    Ok(())
}

#[test]
fn import_matches_resolves_teams_by_generated_name() -> anyhow::Result<()> {
    let mut league = League::default();
    import_teams(&mut league, TEAMS)?;
    let report = import_matches(&mut league, SCHEDULE.as_bytes())?;

    assert_eq!(report.created, 2);
    assert_eq!(report.skipped.len(), 2);
    assert!(report.skipped[0].starts_with("line 4: no team for 'Nobody Here-Someone Else'"));
    assert_eq!(report.skipped[1], "line 5: match already exists");

    let matches = league.matches(&MatchFilter::default());
    assert_eq!(matches.len(), 2);
    assert_eq!(
        matches[0].date,
        Utc.with_ymd_and_hms(2025, 11, 30, 18, 0, 0).unwrap()
    );
    assert_eq!(matches[0].home_team_id, team_id(&league, "PER | DIA | GIL"));
    assert_eq!(matches[1].round.as_deref(), Some("1"));
    assert!(matches.iter().all(|game| game.status == MatchStatus::Scheduled));

    Ok(())
}

#[test]
fn schedules_without_a_group_use_the_home_team_group() -> anyhow::Result<()> {
    let mut league = League::default();
    import_teams(&mut league, TEAMS)?;

    let schedule = "Date,Time,Home,Away\n30/11/2025,19:30,Ana Lopez-Eva Ruiz,Mia Perez-Lia Diaz-Sara Gil\n";
    let report = import_matches(&mut league, schedule.as_bytes())?;
    assert_eq!(report.created, 1);

    let game = &league.matches(&MatchFilter::default())[0];
    assert_eq!(game.group, Group::A);
    assert_eq!(game.date, Utc.with_ymd_and_hms(2025, 11, 30, 19, 30, 0).unwrap());

    assert!(import_matches(&mut league, "Home,Away\nx,y\n".as_bytes()).is_err());

    Ok(())
}

#[test]
fn a_season_in_group_a() -> anyhow::Result<()> {
    let mut league = imported_league()?;
    let mil = team_id(&league, "MIL | PET");
    let per = team_id(&league, "PER | DIA | GIL");

    let filter = MatchFilter {
        team_id: Some(mil),
        ..MatchFilter::default()
    };
    let matches = league.matches(&filter);
    let [second, first] = matches.as_slice() else {
        panic!("expected two matches");
    };

    league.enter_result(first.id, &[SetInput::new(1, 6, 4), SetInput::new(2, 6, 4)])?;
    league.enter_result(
        second.id,
        &[SetInput::new(1, 6, 3), SetInput::new(2, 3, 6), SetInput::new(3, 6, 2)],
    )?;

    let standings = league.standings(Some(Group::A));
    let names: Vec<&str> = standings.iter().map(|row| row.team_name.as_str()).collect();
    assert_eq!(names, vec!["MIL | PET", "PER | DIA | GIL", "LOP | RUI"]);

    let leader = row(&standings, "MIL | PET");
    assert_eq!(leader.points, 4);
    assert_eq!((leader.matches_won, leader.matches_lost), (1, 1));
    assert_eq!((leader.sets_for, leader.sets_against), (3, 2));
    assert_eq!((leader.games_for, leader.games_against), (23, 23));
    assert_eq!(league.team_standing(per)?.points, 2);

    let stats = league.stats();
    assert_eq!(stats.teams.active, 3);
    assert_eq!(stats.teams.group_a, 3);
    assert_eq!(stats.matches.played, 2);
    assert_eq!(stats.matches.total, 2);

    let played = league.matches(&MatchFilter {
        status: Some(MatchStatus::Played),
        date_from: Some(Utc.with_ymd_and_hms(2025, 11, 30, 0, 0, 0).unwrap().date_naive()),
        ..MatchFilter::default()
    });
    assert_eq!(played.len(), 2);

    Ok(())
}

#[test]
fn fixing_a_played_match() -> anyhow::Result<()> {
    let mut league = imported_league()?;
    let lop = team_id(&league, "LOP | RUI");
    let per = team_id(&league, "PER | DIA | GIL");
    let game = league.matches(&MatchFilter::default())[1].clone();

    league.enter_result(game.id, &[SetInput::new(1, 6, 4), SetInput::new(2, 6, 4)])?;

    let moved = league.update_match(
        game.id,
        MatchUpdate {
            date: Some(Utc.with_ymd_and_hms(2025, 12, 1, 20, 0, 0).unwrap()),
            ..MatchUpdate::default()
        },
    )?;
    assert_eq!(moved.status, MatchStatus::Played);
    assert_eq!(moved.sets.len(), 2);

    assert_eq!(
        league.update_match(
            game.id,
            MatchUpdate {
                away_team_id: Some(game.home_team_id),
                ..MatchUpdate::default()
            }
        ),
        Err(LeagueError::Match(InvalidMatch::SameTeams))
    );

    let swapped = league.update_match(
        game.id,
        MatchUpdate {
            home_team_id: Some(per),
            away_team_id: Some(lop),
            ..MatchUpdate::default()
        },
    )?;
    assert_eq!(swapped.winner(), Some(per));
    assert_eq!(league.team_standing(per)?.points, 3);

    Ok(())
}

#[test]
fn rosters_and_players() -> anyhow::Result<()> {
    let mut league = imported_league()?;
    let lop = team_id(&league, "LOP | RUI");

    let ana = league.team(lop)?.players[0].id;
    assert_eq!(league.player_teams(ana)?.len(), 1);
    assert_eq!(league.player_teams(ana)?[0].1, PlayerRole::Main);

    let renamed = league.update_player(
        ana,
        PlayerUpdate {
            email: Some("ana@example.com".to_string()),
            ..PlayerUpdate::default()
        },
    )?;
    assert_eq!(renamed.name, "Ana Lopez");
    assert_eq!(renamed.email.as_deref(), Some("ana@example.com"));

    let archived = league.update_team(
        lop,
        TeamUpdate {
            active: Some(false),
            ..TeamUpdate::default()
        },
    )?;
    assert!(!archived.team.active);
    assert_eq!(league.teams(Some(Group::A), false).len(), 2);
    assert_eq!(league.teams(Some(Group::A), true).len(), 3);

    Ok(())
}
