use std::cmp::Ordering;

use rayon::prelude::*;

use crate::config::AnalysisConfig;
use crate::expected_points::Projector;
use crate::fixture_difficulty::FixtureDifficultyIndex;
use crate::model::{Player, Position, Recommendation, Transfer};

/// Scores one-for-one swaps against a fixed player pool.
#[derive(Debug, Clone, Copy)]
pub struct TransferEvaluator<'a> {
    pool: &'a [Player],
    projector: Projector<'a>,
    config: AnalysisConfig,
}

impl<'a> TransferEvaluator<'a> {
    pub fn new(pool: &'a [Player], index: &'a FixtureDifficultyIndex, config: AnalysisConfig) -> Self {
        Self {
            pool,
            projector: Projector::new(index, config.model),
            config,
        }
    }

    pub fn projector(&self) -> &Projector<'a> {
        &self.projector
    }

    pub fn expected_points(&self, player: &Player) -> f64 {
        self.projector.expected_points(player, self.config.horizon())
    }

    /// Every candidate for `outgoing`, whatever its rating, best first.
    /// `position_filter` defaults to the outgoing player's own position.
    pub fn evaluate_all(
        &self,
        outgoing: &'a Player,
        position_filter: Option<Position>,
    ) -> Vec<Transfer<'a>> {
        let position = position_filter.unwrap_or(outgoing.position);
        let current_xp = self.expected_points(outgoing);

        let mut transfers: Vec<Transfer<'a>> = self
            .pool
            .iter()
            .filter(|p| p.position == position && p.id != outgoing.id)
            .map(|candidate| {
                let gain = self.expected_points(candidate) - current_xp;
                Transfer::new(
                    outgoing,
                    candidate,
                    self.config.games_ahead,
                    gain,
                    self.config.transfer_cost,
                    self.config.good_threshold,
                )
            })
            .collect();
        transfers.sort_by(by_net_gain);
        transfers
    }

    /// GOOD-rated swaps for `outgoing`, sorted by net gain descending.
    pub fn evaluate_transfers(
        &self,
        outgoing: &'a Player,
        position_filter: Option<Position>,
    ) -> Vec<Transfer<'a>> {
        let mut transfers = self.evaluate_all(outgoing, position_filter);
        transfers.retain(|t| t.recommendation() == Recommendation::Good);
        transfers
    }

    /// GOOD swaps for every squad member (each against its own position),
    /// merged and re-sorted.
    ///
    /// The same incoming player may be suggested for several outgoing players;
    /// no deduplication is done.
    pub fn plan_squad_transfers(&self, squad: &[&'a Player]) -> Vec<Transfer<'a>> {
        let mut all: Vec<Transfer<'a>> = squad
            .par_iter()
            .flat_map_iter(|player| self.evaluate_transfers(*player, None))
            .collect();
        all.sort_by(by_net_gain);
        all
    }
}

/// Net gain descending; ties on incoming id, then outgoing id, ascending.
fn by_net_gain(a: &Transfer<'_>, b: &Transfer<'_>) -> Ordering {
    b.net_point_gain()
        .total_cmp(&a.net_point_gain())
        .then_with(|| a.player_in().id.cmp(&b.player_in().id))
        .then_with(|| a.player_out().id.cmp(&b.player_out().id))
}

pub fn evaluate_transfers<'a>(
    outgoing: &'a Player,
    pool: &'a [Player],
    index: &'a FixtureDifficultyIndex,
    config: AnalysisConfig,
    position_filter: Option<Position>,
) -> Vec<Transfer<'a>> {
    TransferEvaluator::new(pool, index, config).evaluate_transfers(outgoing, position_filter)
}

pub fn plan_squad_transfers<'a>(
    squad: &[&'a Player],
    pool: &'a [Player],
    index: &'a FixtureDifficultyIndex,
    config: AnalysisConfig,
) -> Vec<Transfer<'a>> {
    TransferEvaluator::new(pool, index, config).plan_squad_transfers(squad)
}
