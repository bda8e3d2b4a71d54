use std::str::FromStr;

use anyhow::{Result, bail};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fpl_transfer_terminal::config::{AnalysisConfig, DataSource, ProviderSettings};
use fpl_transfer_terminal::demo_feed::DemoProvider;
use fpl_transfer_terminal::fixture_difficulty::format_run;
use fpl_transfer_terminal::fpl_fetch::{DataProvider, FplClient};
use fpl_transfer_terminal::state::{AppState, PlanOutcome};

const DEFAULT_TOP: usize = 20;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fpl_transfer_terminal=warn,fpl_plan=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = AnalysisConfig::from_env();
    if let Some(games) = parse_arg::<u8>("--games") {
        config = config.with_games_ahead(games);
    }
    let mut settings = ProviderSettings::from_env();
    if has_flag("--demo") {
        settings.source = DataSource::Demo;
    }
    if let Some(manager_id) = parse_arg::<u64>("--manager") {
        settings.manager_id = Some(manager_id);
    }
    let top = parse_arg::<usize>("--top").unwrap_or(DEFAULT_TOP).max(1);

    let provider: Box<dyn DataProvider> = match settings.source {
        DataSource::Live => Box::new(FplClient::new(settings.api_base.clone())),
        DataSource::Demo => Box::new(DemoProvider::default()),
    };

    let snapshot = provider.fetch_snapshot();
    if snapshot.players.is_empty() {
        bail!("no player data available; check FPL_API_BASE or pass --demo");
    }
    let mut state = AppState::new(config);
    state.apply_snapshot(snapshot);

    if let Some(manager_id) = settings.manager_id {
        let picks = provider.fetch_manager_picks(manager_id);
        let matched = state.fill_squad_from_picks(&picks);
        info!(manager_id, matched, "loaded manager squad");
        if matched == 0 {
            eprintln!("warning: no picks for manager {manager_id}; using default squad");
        }
    }

    let n = state.config.horizon();
    println!(
        "Horizon {} GW | model {} | squad value {} | bank {}",
        state.config.games_ahead,
        state.config.model.label(),
        state.squad_value(),
        state.budget()
    );
    println!();
    let eval = state.evaluator();
    for p in state.squad_players() {
        println!(
            "  {} {:<22} {:<4} {:>6}  xP {:>5.1}  {}",
            p.position.code(),
            p.name,
            p.team,
            p.price.to_string(),
            eval.expected_points(p),
            format_run(state.index.upcoming(&p.team, n))
        );
    }
    println!();

    let plan = state.squad_plan();
    match plan.outcome {
        PlanOutcome::NoData => bail!("no player data available"),
        PlanOutcome::NoGoodTransfers => {
            println!("No smart transfers found.");
            return Ok(());
        }
        PlanOutcome::NoneAffordable { good_total } => {
            println!(
                "No transfers within your budget of {}. Found {good_total} matches outside budget.",
                state.budget()
            );
            return Ok(());
        }
        PlanOutcome::Found {
            shown,
            filtered_by_budget,
        } => {
            println!("{shown} affordable transfer(s), {filtered_by_budget} over budget");
        }
    }

    println!(
        "{:<22} -> {:<22} {:<4} {:>7} {:>8} {:>7}  Rating",
        "Out", "In", "Team", "£", "xP Gain", "Net"
    );
    for row in plan.rows.iter().take(top) {
        let t = &row.transfer;
        println!(
            "{:<22} -> {:<22} {:<4} {:>7} {:>8.1} {:>7.1}  {}",
            t.player_out().name,
            t.player_in().name,
            t.player_in().team,
            t.price_delta().to_string(),
            t.expected_points_gain(),
            t.net_point_gain(),
            t.recommendation().label()
        );
    }
    Ok(())
}

fn has_flag(name: &str) -> bool {
    std::env::args().skip(1).any(|arg| arg == name)
}

fn parse_arg<T: FromStr>(name: &str) -> Option<T> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(&format!("{name}="))
            && let Ok(v) = raw.trim().parse::<T>()
        {
            return Some(v);
        }
        if arg == name
            && let Some(next) = args.get(idx + 1)
            && let Ok(v) = next.trim().parse::<T>()
        {
            return Some(v);
        }
    }
    None
}
