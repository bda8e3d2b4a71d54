use std::fs;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use fpl_transfer_terminal::config::AnalysisConfig;
use fpl_transfer_terminal::demo_feed::DemoProvider;
use fpl_transfer_terminal::feed::spawn_provider;
use fpl_transfer_terminal::fpl_fetch::{
    FplSnapshot, parse_bootstrap_json, parse_fixtures_json, parse_manager_picks_json,
};
use fpl_transfer_terminal::model::{Position, Price};
use fpl_transfer_terminal::squad_export::{export_squad_plan, plan_rows};
use fpl_transfer_terminal::state::{
    AppState, Delta, PlanOutcome, ProviderCommand, SQUAD_SLOTS, Tab, apply_delta,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn snapshot() -> FplSnapshot {
    let boot = parse_bootstrap_json(&read_fixture("bootstrap_static.json")).expect("bootstrap");
    let fixtures =
        parse_fixtures_json(&read_fixture("fixtures.json"), &boot.team_names).expect("fixtures");
    FplSnapshot {
        players: boot.players,
        fixtures,
        next_gameweek: boot.next_gameweek,
    }
}

fn loaded_state() -> AppState {
    let mut state = AppState::new(AnalysisConfig::default().with_games_ahead(2));
    apply_delta(&mut state, Delta::SetSnapshot(snapshot()));
    state
}

fn with_manager_picks(state: &mut AppState) {
    let picks = parse_manager_picks_json(&read_fixture("picks.json")).expect("picks");
    apply_delta(
        state,
        Delta::SetManagerPicks {
            manager_id: 123456,
            picks,
        },
    );
}

fn squad_ids(state: &AppState) -> Vec<u32> {
    state.squad_players().iter().map(|p| p.id).collect()
}

#[test]
fn snapshot_fills_default_squad_by_position() {
    let state = loaded_state();
    assert!(!state.loading);
    assert_eq!(squad_ids(&state), vec![1, 2, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    for (slot, position) in SQUAD_SLOTS.iter().enumerate() {
        if let Some(p) = state.slot_player(slot) {
            assert_eq!(p.position, *position);
        }
    }
    assert_eq!(state.squad_value(), Price(835));
    assert_eq!(state.budget(), Price(165));
    assert_eq!(state.next_gameweek.as_ref().map(|gw| gw.id), Some(10));
}

#[test]
fn manager_picks_replace_matching_slots() {
    let mut state = loaded_state();
    with_manager_picks(&mut state);
    assert_eq!(state.slot_player(0).map(|p| p.id), Some(3));
    assert_eq!(state.slot_player(1).map(|p| p.id), Some(1));
    assert_eq!(squad_ids(&state), vec![3, 1, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    assert_eq!(state.budget().to_string(), "£15.5m");
    assert_eq!(
        state.logs.back().map(String::as_str),
        Some("[INFO] Loaded 10 players from manager 123456")
    );
}

#[test]
fn unmatched_or_missing_picks_leave_squad_alone() {
    let mut state = loaded_state();
    let before = squad_ids(&state);
    apply_delta(
        &mut state,
        Delta::SetManagerPicks {
            manager_id: 7,
            picks: vec![500, 501],
        },
    );
    assert_eq!(squad_ids(&state), before);
    assert!(state.logs.back().is_some_and(|m| m.starts_with("[WARN]")));

    apply_delta(
        &mut state,
        Delta::SetManagerPicks {
            manager_id: 7,
            picks: Vec::new(),
        },
    );
    assert_eq!(squad_ids(&state), before);
    assert_eq!(
        state.logs.back().map(String::as_str),
        Some("[WARN] Could not fetch team for manager 7")
    );
}

#[test]
fn empty_snapshot_keeps_previous_data() {
    let mut state = loaded_state();
    apply_delta(&mut state, Delta::SetSnapshot(FplSnapshot::default()));
    assert_eq!(state.players.len(), 12);
    assert!(state.logs.back().is_some_and(|m| m.starts_with("[WARN]")));
}

#[test]
fn squad_plan_reports_affordable_good_transfers() {
    let mut state = loaded_state();
    with_manager_picks(&mut state);
    let plan = state.squad_plan();
    assert_eq!(
        plan.outcome,
        PlanOutcome::Found {
            shown: 3,
            filtered_by_budget: 0
        }
    );
    let first = &plan.rows[0];
    assert_eq!(first.transfer.player_out().id, 11);
    assert_eq!(first.transfer.player_in().id, 12);
    assert!((first.in_analysis.average_difficulty - 3.0).abs() < 1e-9);
    assert_eq!(first.out_analysis.form, 0.0);

    let rows = plan_rows(&plan.rows);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[1][0], "Nicolas Jackson");
    assert_eq!(rows[1][11], "GOOD");
}

#[test]
fn quick_analysis_follows_selected_slot() {
    let mut state = loaded_state();
    state.selected_slot = 8;
    let view = state.quick_analysis().expect("palmer selected");
    assert_eq!(view.outgoing.id, 8);
    assert_eq!(view.position, Position::Midfielder);
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].transfer.player_in().id, 7);
    assert!((view.outgoing_analysis.expected_points - 7.2).abs() < 1e-9);

    state.cycle_position_filter();
    let view = state.quick_analysis().expect("palmer selected");
    assert_eq!(view.position, Position::Goalkeeper);
    assert_eq!(view.outcome, PlanOutcome::NoGoodTransfers);
}

#[test]
fn no_data_states() {
    let state = AppState::new(AnalysisConfig::default());
    assert!(state.quick_analysis().is_none());
    assert!(state.compare().is_none());
    assert_eq!(state.squad_plan().outcome, PlanOutcome::NoData);
    assert_eq!(state.budget(), Price(1000));
}

#[test]
fn plan_outcome_classification() {
    assert_eq!(PlanOutcome::classify(0, 0, 0), PlanOutcome::NoData);
    assert_eq!(PlanOutcome::classify(10, 0, 0), PlanOutcome::NoGoodTransfers);
    assert_eq!(
        PlanOutcome::classify(10, 3, 0),
        PlanOutcome::NoneAffordable { good_total: 3 }
    );
    assert_eq!(
        PlanOutcome::classify(10, 3, 1),
        PlanOutcome::Found {
            shown: 1,
            filtered_by_budget: 2
        }
    );
}

#[test]
fn controls_cycle_and_clamp() {
    let mut state = loaded_state();

    for _ in 0..30 {
        state.adjust_horizon(1);
    }
    assert_eq!(state.config.games_ahead, 19);
    for _ in 0..30 {
        state.adjust_horizon(-1);
    }
    assert_eq!(state.config.games_ahead, 1);

    let mut seen = Vec::new();
    for _ in 0..5 {
        state.cycle_position_filter();
        seen.push(state.position_filter);
    }
    assert_eq!(
        seen,
        vec![
            Some(Position::Goalkeeper),
            Some(Position::Defender),
            Some(Position::Midfielder),
            Some(Position::Forward),
            None
        ]
    );

    let model = state.config.model;
    state.toggle_model();
    assert_ne!(state.config.model, model);
    state.toggle_model();
    assert_eq!(state.config.model, model);
}

#[test]
fn plan_scroll_stops_at_last_row() {
    let mut state = loaded_state();
    with_manager_picks(&mut state);
    state.tab = Tab::SquadPlan;
    assert_eq!(state.squad_plan().rows.len(), 3);

    state.select_prev();
    assert_eq!(state.plan_scroll, 0);
    for _ in 0..500 {
        state.select_next();
    }
    assert_eq!(state.plan_scroll, 2);
    state.select_prev();
    assert_eq!(state.plan_scroll, 1);
    assert_eq!(state.selected_slot, 0);

    // A shorter horizon empties the plan; scrolling back starts from the top.
    state.plan_scroll = 2;
    state.adjust_horizon(-1);
    assert!(state.squad_plan().rows.is_empty());
    state.select_prev();
    assert_eq!(state.plan_scroll, 0);
}

#[test]
fn repeated_picks_fill_one_slot() {
    let mut state = loaded_state();
    let matched = state.fill_squad_from_picks(&[8, 8, 8]);
    assert_eq!(matched, 1);
    let ids = squad_ids(&state);
    assert_eq!(ids.iter().filter(|id| **id == 8).count(), 1);
    assert_eq!(state.slot_player(7).map(|p| p.id), Some(8));
    assert_eq!(state.slot_player(8).map(|p| p.id), Some(7));
}

#[test]
fn cycling_a_slot_skips_players_already_in_squad() {
    let mut state = loaded_state();
    with_manager_picks(&mut state);
    state.selected_slot = 0;
    state.cycle_slot_player(true);
    assert_eq!(state.slot_player(0).map(|p| p.id), Some(2));
    state.cycle_slot_player(true);
    assert_eq!(state.slot_player(0).map(|p| p.id), Some(3));

    state.reset_default_squad();
    assert_eq!(squad_ids(&state), vec![1, 2, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
}

#[test]
fn compare_walks_same_position_candidates() {
    let mut state = loaded_state();
    state.selected_slot = 8;
    let view = state.compare().expect("compare view");
    assert_eq!(view.left.id, 8);
    assert_eq!(view.right.map(|p| p.id), Some(7));

    state.cycle_compare(false);
    let view = state.compare().expect("compare view");
    assert_eq!(view.right.map(|p| p.id), Some(9));
    let right = view.right_analysis.expect("right analysis");
    assert!((right.expected_points - 9.6).abs() < 1e-9);
}

#[test]
fn log_console_is_capped() {
    let mut state = AppState::new(AnalysisConfig::default());
    for i in 0..250 {
        apply_delta(&mut state, Delta::Log(format!("msg {i}")));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("msg 50"));
}

#[test]
fn provider_thread_serves_snapshot_and_picks() {
    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let handle = spawn_provider(Box::new(DemoProvider::default()), tx, cmd_rx);
    cmd_tx
        .send(ProviderCommand::LoadManager(42))
        .expect("provider alive");
    drop(cmd_tx);

    let mut state = AppState::new(AnalysisConfig::default());
    let mut picks_seen = false;
    while let Ok(delta) = rx.recv_timeout(Duration::from_secs(10)) {
        if let Delta::SetManagerPicks { picks, .. } = &delta {
            assert_eq!(picks.len(), 15);
            picks_seen = true;
        }
        apply_delta(&mut state, delta);
    }
    handle.join().expect("provider thread");

    assert!(picks_seen);
    assert_eq!(state.players.len(), 300);
    assert_eq!(state.squad_players().len(), SQUAD_SLOTS.len());
    assert!(
        state
            .logs
            .iter()
            .any(|m| m == "[INFO] Loaded 15 players from manager 42")
    );
}

#[test]
fn exports_plan_workbook() {
    let mut state = loaded_state();
    with_manager_picks(&mut state);
    let path = std::env::temp_dir().join(format!("fpl_plan_test_{}.xlsx", std::process::id()));
    let report = export_squad_plan(&path, &state).expect("export");
    assert_eq!(report.transfers, 3);
    assert_eq!(report.squad, 11);
    assert!(path.exists());
    let _ = fs::remove_file(path);
}
