use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use fpl_transfer_terminal::fpl_fetch::{
    parse_bootstrap_json, parse_fixtures_json, parse_manager_entry_json, parse_manager_picks_json,
};
use fpl_transfer_terminal::model::{PlayerStatus, Position, Price};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_bootstrap_players() {
    let raw = read_fixture("bootstrap_static.json");
    let boot = parse_bootstrap_json(&raw).expect("fixture should parse");
    assert_eq!(boot.players.len(), 12);
    assert_eq!(boot.team_names.get(&2).map(String::as_str), Some("CHE"));

    let saka = boot.players.iter().find(|p| p.id == 7).expect("saka");
    assert_eq!(saka.name, "Bukayo Saka");
    assert_eq!(saka.team, "ARS");
    assert_eq!(saka.position, Position::Midfielder);
    assert_eq!(saka.price, Price(100));
    assert_eq!(saka.points, 120);
    assert_eq!(saka.games_played, 19);
    assert_eq!(saka.form, Some(7.5));
    assert!((saka.selected_by_percent - 45.2).abs() < 1e-9);
    assert_eq!(saka.status, Some(PlayerStatus::Available));
    assert_eq!(saka.chance_of_playing, None);
}

#[test]
fn bootstrap_accepts_numeric_and_blank_decimals() {
    let raw = read_fixture("bootstrap_static.json");
    let boot = parse_bootstrap_json(&raw).expect("fixture should parse");

    let palmer = boot.players.iter().find(|p| p.id == 8).expect("palmer");
    assert_eq!(palmer.form, Some(6.0));
    assert!((palmer.selected_by_percent - 50.0).abs() < 1e-9);

    let jackson = boot.players.iter().find(|p| p.id == 11).expect("jackson");
    assert_eq!(jackson.form, None);
    assert_eq!(jackson.status, Some(PlayerStatus::Suspended));
    assert_eq!(jackson.chance_of_playing, Some(0));
    assert!(jackson.is_flagged());
}

#[test]
fn bootstrap_picks_next_gameweek() {
    let raw = read_fixture("bootstrap_static.json");
    let boot = parse_bootstrap_json(&raw).expect("fixture should parse");
    let gw = boot.next_gameweek.expect("next gameweek");
    assert_eq!(gw.id, 10);
    assert_eq!(gw.deadline_time.as_deref(), Some("2026-10-24T10:00:00Z"));
}

#[test]
fn parses_fixtures_one_record_per_side() {
    let boot = parse_bootstrap_json(&read_fixture("bootstrap_static.json")).expect("bootstrap");
    let fixtures =
        parse_fixtures_json(&read_fixture("fixtures.json"), &boot.team_names).expect("fixtures");

    // Finished gameweek 9 is dropped; four remaining fixtures, two sides each.
    assert_eq!(fixtures.len(), 8);
    let gws: Vec<Option<u32>> = fixtures.iter().map(|f| f.gameweek).collect();
    assert_eq!(
        gws,
        vec![
            Some(10),
            Some(10),
            Some(11),
            Some(11),
            Some(12),
            Some(12),
            None,
            None
        ]
    );

    let ars_home = &fixtures[0];
    assert_eq!(ars_home.team, "ARS");
    assert_eq!(ars_home.opponent, "LIV");
    assert!(ars_home.is_home);
    assert_eq!(ars_home.difficulty, 4);

    let che_away = fixtures
        .iter()
        .find(|f| f.team == "CHE" && f.gameweek == Some(12))
        .expect("che away");
    assert!(!che_away.is_home);
    assert_eq!(che_away.difficulty, 5);
}

#[test]
fn unknown_team_ids_fall_back_to_number() {
    let raw = r#"[{"event": 3, "finished": false, "team_h": 40, "team_a": 41}]"#;
    let fixtures = parse_fixtures_json(raw, &HashMap::new()).expect("fixtures");
    assert_eq!(fixtures.len(), 2);
    assert_eq!(fixtures[0].team, "40");
    assert_eq!(fixtures[0].difficulty, 3);
}

#[test]
fn parses_manager_entry_and_picks() {
    let gw = parse_manager_entry_json(&read_fixture("entry.json")).expect("entry");
    assert_eq!(gw, Some(9));

    let picks = parse_manager_picks_json(&read_fixture("picks.json")).expect("picks");
    assert_eq!(picks.len(), 11);
    assert_eq!(picks[0], 3);
    assert_eq!(picks.last().copied(), Some(999));
}

#[test]
fn blank_payloads_parse_to_empty() {
    assert!(parse_bootstrap_json("").expect("blank").players.is_empty());
    assert!(parse_fixtures_json("null", &HashMap::new()).expect("null").is_empty());
    assert_eq!(parse_manager_entry_json("  ").expect("blank"), None);
    assert!(parse_manager_picks_json("{}").expect("no picks").is_empty());
}

#[test]
fn malformed_payloads_are_errors() {
    assert!(parse_bootstrap_json("{not json").is_err());
    assert!(parse_fixtures_json("{\"a\":1}", &HashMap::new()).is_err());
}
