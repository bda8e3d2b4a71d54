use std::env;

use tracing::warn;

use crate::expected_points::ScoringModel;
use crate::model::DEFAULT_GOOD_THRESHOLD;

pub const DEFAULT_GAMES_AHEAD: u8 = 8;
pub const MIN_GAMES_AHEAD: u8 = 1;
pub const MAX_GAMES_AHEAD: u8 = 19;
pub const DEFAULT_TRANSFER_COST: f64 = 4.0;

pub const FPL_API_BASE: &str = "https://fantasy.premierleague.com/api";

/// Parameters for one analysis run. Passed explicitly so several runs with
/// different settings can coexist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    pub games_ahead: u8,
    pub transfer_cost: f64,
    pub good_threshold: f64,
    pub model: ScoringModel,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            games_ahead: DEFAULT_GAMES_AHEAD,
            transfer_cost: DEFAULT_TRANSFER_COST,
            good_threshold: DEFAULT_GOOD_THRESHOLD,
            model: ScoringModel::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(n) = parse_env::<u8>("FPL_GAMES_AHEAD") {
            cfg.games_ahead = n;
        }
        if let Some(cost) = parse_env::<f64>("FPL_TRANSFER_COST").filter(|v| v.is_finite()) {
            cfg.transfer_cost = cost.max(0.0);
        }
        if let Some(gain) = parse_env::<f64>("FPL_MIN_NET_GAIN").filter(|v| v.is_finite()) {
            cfg.good_threshold = gain;
        }
        if let Some(model) = parse_env::<ScoringModel>("FPL_SCORING_MODEL") {
            cfg.model = model;
        }
        cfg.with_games_ahead(cfg.games_ahead)
    }

    pub fn with_games_ahead(mut self, n: u8) -> Self {
        self.games_ahead = n.clamp(MIN_GAMES_AHEAD, MAX_GAMES_AHEAD);
        self
    }

    pub fn horizon(&self) -> usize {
        self.games_ahead as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Demo,
}

/// Where data comes from and which manager to load. Read once at startup.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub source: DataSource,
    pub api_base: String,
    pub manager_id: Option<u64>,
    pub export_path: String,
}

impl ProviderSettings {
    pub fn from_env() -> Self {
        let source = match env::var("FPL_SOURCE")
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "demo" | "fake" | "offline" => DataSource::Demo,
            _ => DataSource::Live,
        };
        let api_base = env::var("FPL_API_BASE")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| FPL_API_BASE.to_string());
        let manager_id = parse_env::<u64>("FPL_MANAGER_ID").filter(|id| *id > 0);
        let export_path = env::var("FPL_EXPORT_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "fpl_transfer_plan.xlsx".to_string());
        Self {
            source,
            api_base,
            manager_id,
            export_path,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key, value = trimmed, "ignoring invalid setting");
            None
        }
    }
}
