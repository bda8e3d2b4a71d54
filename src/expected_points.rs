use std::str::FromStr;

use crate::fixture_difficulty::FixtureDifficultyIndex;
use crate::model::{Player, Position, round2};

/// Multiplier applied to players with any doubt flag.
pub const FLAGGED_PENALTY: f64 = 0.5;

/// How a player's projection is computed. A run uses exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringModel {
    /// form × horizon × fixture multiplier × position weight × availability.
    #[default]
    MultiFactor,
    /// form × horizon only. Kept for comparison with older projections.
    FormOnly,
}

impl ScoringModel {
    pub fn label(self) -> &'static str {
        match self {
            ScoringModel::MultiFactor => "MULTI",
            ScoringModel::FormOnly => "FORM",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ScoringModel::MultiFactor => ScoringModel::FormOnly,
            ScoringModel::FormOnly => ScoringModel::MultiFactor,
        }
    }

    /// Scores one player given the average difficulty of their next `n`
    /// fixtures. Absent form projects to zero.
    pub fn score(self, player: &Player, avg_difficulty: f64, n: usize) -> f64 {
        let Some(form) = player.form else {
            return 0.0;
        };
        let mut xp = form * n as f64;
        if self == ScoringModel::MultiFactor {
            xp *= fdr_multiplier(avg_difficulty);
            xp *= position_weight(player.position);
            if player.is_flagged() {
                xp *= FLAGGED_PENALTY;
            }
        }
        round2(xp)
    }
}

impl FromStr for ScoringModel {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "multi" | "multi-factor" | "multifactor" | "full" => Ok(ScoringModel::MultiFactor),
            "form" | "form-only" | "simple" => Ok(ScoringModel::FormOnly),
            other => Err(anyhow::anyhow!("unknown scoring model: {other}")),
        }
    }
}

/// 1 -> 1.667, 3 -> 1.0, 5 -> 0.333.
pub fn fdr_multiplier(avg_difficulty: f64) -> f64 {
    (6.0 - avg_difficulty) / 3.0
}

pub fn position_weight(position: Position) -> f64 {
    match position {
        Position::Goalkeeper => 0.5,
        Position::Defender => 0.8,
        Position::Midfielder => 1.2,
        Position::Forward => 1.5,
        Position::Unknown => 1.0,
    }
}

/// Breakdown shown next to a player in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerAnalysis {
    pub form: f64,
    pub average_difficulty: f64,
    pub position_weight: f64,
    pub expected_points: f64,
}

/// Projects players against one fixture snapshot with one scoring model.
#[derive(Debug, Clone, Copy)]
pub struct Projector<'a> {
    index: &'a FixtureDifficultyIndex,
    model: ScoringModel,
}

impl<'a> Projector<'a> {
    pub fn new(index: &'a FixtureDifficultyIndex, model: ScoringModel) -> Self {
        Self { index, model }
    }

    pub fn average_difficulty(&self, team: &str, n: usize) -> f64 {
        self.index.average_difficulty(team, n)
    }

    pub fn expected_points(&self, player: &Player, n: usize) -> f64 {
        let fdr = self.average_difficulty(&player.team, n);
        self.model.score(player, fdr, n)
    }

    pub fn analyze(&self, player: &Player, n: usize) -> PlayerAnalysis {
        let average_difficulty = self.average_difficulty(&player.team, n);
        PlayerAnalysis {
            form: player.form.map(round2).unwrap_or(0.0),
            average_difficulty,
            position_weight: position_weight(player.position),
            expected_points: self.model.score(player, average_difficulty, n),
        }
    }
}
