use std::collections::HashMap;

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use fpl_transfer_terminal::config::AnalysisConfig;
use fpl_transfer_terminal::demo_feed::DemoProvider;
use fpl_transfer_terminal::fixture_difficulty::FixtureDifficultyIndex;
use fpl_transfer_terminal::fpl_fetch::{parse_bootstrap_json, parse_fixtures_json};
use fpl_transfer_terminal::model::Player;
use fpl_transfer_terminal::state::AppState;
use fpl_transfer_terminal::transfer_eval::TransferEvaluator;

fn bench_bootstrap_parse(c: &mut Criterion) {
    c.bench_function("bootstrap_parse", |b| {
        b.iter(|| {
            let boot = parse_bootstrap_json(black_box(BOOTSTRAP_JSON)).unwrap();
            black_box(boot.players.len());
        })
    });
}

fn bench_fixtures_parse(c: &mut Criterion) {
    let teams: HashMap<u32, String> = [(1, "ARS"), (2, "CHE"), (3, "LIV")]
        .into_iter()
        .map(|(id, name)| (id, name.to_string()))
        .collect();
    c.bench_function("fixtures_parse", |b| {
        b.iter(|| {
            let rows = parse_fixtures_json(black_box(FIXTURES_JSON), &teams).unwrap();
            black_box(rows.len());
        })
    });
}

fn bench_difficulty_index(c: &mut Criterion) {
    let snapshot = DemoProvider::default().snapshot();
    c.bench_function("difficulty_index_build", |b| {
        b.iter(|| {
            let index = FixtureDifficultyIndex::new(black_box(&snapshot.fixtures));
            black_box(index.team_count());
        })
    });
}

fn bench_evaluate_single(c: &mut Criterion) {
    let snapshot = DemoProvider::default().snapshot();
    let index = FixtureDifficultyIndex::new(&snapshot.fixtures);
    let eval = TransferEvaluator::new(&snapshot.players, &index, AnalysisConfig::default());
    let outgoing = &snapshot.players[0];
    c.bench_function("evaluate_transfers_single", |b| {
        b.iter(|| {
            let out = eval.evaluate_transfers(black_box(outgoing), None);
            black_box(out.len());
        })
    });
}

fn bench_squad_plan(c: &mut Criterion) {
    let snapshot = DemoProvider::default().snapshot();
    let index = FixtureDifficultyIndex::new(&snapshot.fixtures);
    let eval = TransferEvaluator::new(&snapshot.players, &index, AnalysisConfig::default());
    let squad: Vec<&Player> = snapshot.players.iter().step_by(20).take(15).collect();
    c.bench_function("plan_squad_transfers", |b| {
        b.iter(|| {
            let plan = eval.plan_squad_transfers(black_box(&squad));
            black_box(plan.len());
        })
    });
}

fn bench_state_squad_plan(c: &mut Criterion) {
    let mut state = AppState::new(AnalysisConfig::default());
    state.apply_snapshot(DemoProvider::default().snapshot());
    c.bench_function("state_squad_plan", |b| {
        b.iter(|| {
            let view = state.squad_plan();
            black_box(view.rows.len());
        })
    });
}

criterion_group!(
    perf,
    bench_bootstrap_parse,
    bench_fixtures_parse,
    bench_difficulty_index,
    bench_evaluate_single,
    bench_squad_plan,
    bench_state_squad_plan
);
criterion_main!(perf);

static BOOTSTRAP_JSON: &str = include_str!("../tests/fixtures/bootstrap_static.json");
static FIXTURES_JSON: &str = include_str!("../tests/fixtures/fixtures.json");
