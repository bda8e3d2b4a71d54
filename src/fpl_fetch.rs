use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::http_cache::fetch_json_cached;
use crate::http_client::http_client;
use crate::model::{Fixture, Player, PlayerStatus, Position, Price};

/// One materialized load of everything an analysis run needs.
#[derive(Debug, Clone, Default)]
pub struct FplSnapshot {
    pub players: Vec<Player>,
    pub fixtures: Vec<Fixture>,
    pub next_gameweek: Option<Gameweek>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gameweek {
    pub id: u32,
    pub deadline_time: Option<String>,
}

/// Source of players and fixtures. Failures surface as empty results, which
/// callers read as "try again later".
pub trait DataProvider {
    fn fetch_snapshot(&self) -> FplSnapshot;

    fn fetch_manager_picks(&self, manager_id: u64) -> Vec<u32>;

    fn fetch_players(&self) -> Vec<Player> {
        self.fetch_snapshot().players
    }

    fn fetch_fixtures(&self) -> Vec<Fixture> {
        self.fetch_snapshot().fixtures
    }
}

/// Client for the public Fantasy Premier League API.
#[derive(Debug, Clone)]
pub struct FplClient {
    base_url: String,
}

impl FplClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn get(&self, endpoint: &str) -> Result<String> {
        let client = http_client()?;
        let url = format!("{}{endpoint}", self.base_url);
        fetch_json_cached(client, &url)
    }

    pub fn load_snapshot(&self) -> Result<FplSnapshot> {
        let bootstrap = self
            .get("/bootstrap-static/")
            .context("bootstrap request failed")?;
        let bootstrap = parse_bootstrap_json(&bootstrap)?;
        let fixtures = self.get("/fixtures/?future=1").context("fixtures request failed")?;
        let fixtures = parse_fixtures_json(&fixtures, &bootstrap.team_names)?;
        info!(
            players = bootstrap.players.len(),
            fixtures = fixtures.len(),
            "loaded fpl snapshot"
        );
        Ok(FplSnapshot {
            players: bootstrap.players,
            fixtures,
            next_gameweek: bootstrap.next_gameweek,
        })
    }

    pub fn load_manager_picks(&self, manager_id: u64) -> Result<Vec<u32>> {
        let entry = self
            .get(&format!("/entry/{manager_id}/"))
            .context("manager request failed")?;
        let Some(gameweek) = parse_manager_entry_json(&entry)? else {
            return Ok(Vec::new());
        };
        let picks = self
            .get(&format!("/entry/{manager_id}/event/{gameweek}/picks/"))
            .context("picks request failed")?;
        parse_manager_picks_json(&picks)
    }
}

impl DataProvider for FplClient {
    fn fetch_snapshot(&self) -> FplSnapshot {
        self.load_snapshot().unwrap_or_else(|err| {
            warn!(error = %format!("{err:#}"), "fpl snapshot unavailable");
            FplSnapshot::default()
        })
    }

    fn fetch_manager_picks(&self, manager_id: u64) -> Vec<u32> {
        self.load_manager_picks(manager_id).unwrap_or_else(|err| {
            warn!(manager_id, error = %format!("{err:#}"), "manager picks unavailable");
            Vec::new()
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Bootstrap {
    pub players: Vec<Player>,
    pub team_names: HashMap<u32, String>,
    pub next_gameweek: Option<Gameweek>,
}

#[derive(Debug, Deserialize)]
struct BootstrapResponse {
    #[serde(default)]
    teams: Vec<BootstrapTeam>,
    #[serde(default)]
    elements: Vec<BootstrapElement>,
    #[serde(default)]
    events: Vec<BootstrapEvent>,
}

#[derive(Debug, Deserialize)]
struct BootstrapTeam {
    id: u32,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    short_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BootstrapElement {
    id: u32,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    second_name: String,
    #[serde(default)]
    team: u32,
    #[serde(default)]
    element_type: u64,
    #[serde(default)]
    now_cost: i32,
    #[serde(default)]
    total_points: i32,
    #[serde(default)]
    minutes: u32,
    #[serde(default)]
    selected_by_percent: Option<Value>,
    #[serde(default)]
    form: Option<Value>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    chance_of_playing_next_round: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct BootstrapEvent {
    id: u32,
    #[serde(default)]
    deadline_time: Option<String>,
    #[serde(default)]
    is_next: bool,
}

pub fn parse_bootstrap_json(raw: &str) -> Result<Bootstrap> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Bootstrap::default());
    }
    let data: BootstrapResponse =
        serde_json::from_str(trimmed).context("invalid bootstrap-static json")?;

    let team_names: HashMap<u32, String> = data
        .teams
        .into_iter()
        .map(|t| {
            let label = t
                .short_name
                .or(t.name)
                .unwrap_or_else(|| t.id.to_string());
            (t.id, label)
        })
        .collect();

    let players = data
        .elements
        .into_iter()
        .map(|e| Player {
            id: e.id,
            name: format!("{} {}", e.first_name, e.second_name).trim().to_string(),
            team: team_label(&team_names, e.team),
            position: Position::from_element_type(e.element_type),
            price: Price(e.now_cost),
            points: e.total_points,
            games_played: e.minutes / 90,
            selected_by_percent: e.selected_by_percent.as_ref().and_then(value_to_f64).unwrap_or(0.0),
            form: e.form.as_ref().and_then(value_to_f64),
            status: e
                .status
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(PlayerStatus::from_code),
            chance_of_playing: e.chance_of_playing_next_round,
        })
        .collect();

    let next_gameweek = data.events.into_iter().find(|ev| ev.is_next).map(|ev| Gameweek {
        id: ev.id,
        deadline_time: ev.deadline_time,
    });

    Ok(Bootstrap {
        players,
        team_names,
        next_gameweek,
    })
}

#[derive(Debug, Deserialize)]
struct FixtureRow {
    #[serde(default)]
    event: Option<u32>,
    #[serde(default)]
    finished: bool,
    #[serde(default)]
    started: Option<bool>,
    team_h: u32,
    team_a: u32,
    #[serde(default = "neutral_difficulty")]
    team_h_difficulty: u8,
    #[serde(default = "neutral_difficulty")]
    team_a_difficulty: u8,
}

fn neutral_difficulty() -> u8 {
    3
}

/// Upcoming fixtures, one record per side, sorted by gameweek with
/// unscheduled fixtures last.
pub fn parse_fixtures_json(raw: &str, team_names: &HashMap<u32, String>) -> Result<Vec<Fixture>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let rows: Vec<FixtureRow> = serde_json::from_str(trimmed).context("invalid fixtures json")?;

    let mut out = Vec::with_capacity(rows.len() * 2);
    for row in rows {
        if row.finished || row.started.unwrap_or(false) {
            continue;
        }
        let home = team_label(team_names, row.team_h);
        let away = team_label(team_names, row.team_a);
        out.push(Fixture {
            gameweek: row.event,
            team: home.clone(),
            opponent: away.clone(),
            difficulty: row.team_h_difficulty.clamp(1, 5),
            is_home: true,
        });
        out.push(Fixture {
            gameweek: row.event,
            team: away,
            opponent: home,
            difficulty: row.team_a_difficulty.clamp(1, 5),
            is_home: false,
        });
    }
    out.sort_by_key(|f| f.gameweek.unwrap_or(u32::MAX));
    Ok(out)
}

/// Current gameweek of a manager entry, if the season has started.
pub fn parse_manager_entry_json(raw: &str) -> Result<Option<u32>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    let v: Value = serde_json::from_str(trimmed).context("invalid manager entry json")?;
    Ok(v.get("current_event")
        .and_then(|x| x.as_u64())
        .map(|x| x as u32))
}

pub fn parse_manager_picks_json(raw: &str) -> Result<Vec<u32>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let v: Value = serde_json::from_str(trimmed).context("invalid picks json")?;
    let Some(picks) = v.get("picks").and_then(|x| x.as_array()) else {
        return Ok(Vec::new());
    };
    Ok(picks
        .iter()
        .filter_map(|p| p.get("element").and_then(|x| x.as_u64()))
        .map(|x| x as u32)
        .collect())
}

fn team_label(team_names: &HashMap<u32, String>, id: u32) -> String {
    team_names
        .get(&id)
        .cloned()
        .unwrap_or_else(|| id.to_string())
}

// FPL publishes decimals as strings ("5.4") in some fields and numbers in others.
fn value_to_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|x| x.is_finite())
}
