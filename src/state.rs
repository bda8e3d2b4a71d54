use std::collections::{HashMap, HashSet, VecDeque};

use crate::config::{AnalysisConfig, MAX_GAMES_AHEAD, MIN_GAMES_AHEAD};
use crate::expected_points::{PlayerAnalysis, Projector};
use crate::fixture_difficulty::FixtureDifficultyIndex;
use crate::fpl_fetch::{FplSnapshot, Gameweek};
use crate::model::{Player, Position, Price, Transfer, affordable, remaining_budget, squad_value};
use crate::transfer_eval::TransferEvaluator;

/// Slot layout of a 15-man FPL squad.
pub const SQUAD_SLOTS: [Position; 15] = [
    Position::Goalkeeper,
    Position::Goalkeeper,
    Position::Defender,
    Position::Defender,
    Position::Defender,
    Position::Defender,
    Position::Defender,
    Position::Midfielder,
    Position::Midfielder,
    Position::Midfielder,
    Position::Midfielder,
    Position::Midfielder,
    Position::Forward,
    Position::Forward,
    Position::Forward,
];

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    QuickAnalysis,
    SquadPlan,
    Compare,
}

/// Updates pushed from the provider thread to the UI.
#[derive(Debug, Clone)]
pub enum Delta {
    SetSnapshot(FplSnapshot),
    SetManagerPicks { manager_id: u64, picks: Vec<u32> },
    Log(String),
}

/// Requests sent from the UI to the provider thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCommand {
    Reload,
    LoadManager(u64),
}

/// Why a recommendation list looks the way it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOutcome {
    NoData,
    NoGoodTransfers,
    NoneAffordable { good_total: usize },
    Found { shown: usize, filtered_by_budget: usize },
}

impl PlanOutcome {
    pub fn classify(pool_len: usize, good_total: usize, shown: usize) -> Self {
        if pool_len == 0 {
            PlanOutcome::NoData
        } else if good_total == 0 {
            PlanOutcome::NoGoodTransfers
        } else if shown == 0 {
            PlanOutcome::NoneAffordable { good_total }
        } else {
            PlanOutcome::Found {
                shown,
                filtered_by_budget: good_total - shown,
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransferRow<'a> {
    pub transfer: Transfer<'a>,
    pub out_analysis: PlayerAnalysis,
    pub in_analysis: PlayerAnalysis,
}

#[derive(Debug, Clone)]
pub struct QuickAnalysisView<'a> {
    pub outgoing: &'a Player,
    pub outgoing_analysis: PlayerAnalysis,
    pub position: Position,
    pub rows: Vec<TransferRow<'a>>,
    pub outcome: PlanOutcome,
}

#[derive(Debug, Clone)]
pub struct SquadPlanView<'a> {
    pub rows: Vec<TransferRow<'a>>,
    pub outcome: PlanOutcome,
}

#[derive(Debug, Clone)]
pub struct CompareView<'a> {
    pub left: &'a Player,
    pub right: Option<&'a Player>,
    pub left_analysis: PlayerAnalysis,
    pub right_analysis: Option<PlayerAnalysis>,
}

#[derive(Debug)]
pub struct AppState {
    pub players: Vec<Player>,
    pub index: FixtureDifficultyIndex,
    pub next_gameweek: Option<Gameweek>,
    by_id: HashMap<u32, usize>,
    pub squad: Vec<Option<u32>>,
    pub config: AnalysisConfig,
    pub tab: Tab,
    pub selected_slot: usize,
    pub plan_scroll: usize,
    pub compare_cursor: usize,
    /// `None` compares against the outgoing player's own position.
    pub position_filter: Option<Position>,
    pub loading: bool,
    pub help_overlay: bool,
    pub logs: VecDeque<String>,
}

impl AppState {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            players: Vec::new(),
            index: FixtureDifficultyIndex::default(),
            next_gameweek: None,
            by_id: HashMap::new(),
            squad: vec![None; SQUAD_SLOTS.len()],
            config,
            tab: Tab::QuickAnalysis,
            selected_slot: 0,
            plan_scroll: 0,
            compare_cursor: 0,
            position_filter: None,
            loading: true,
            help_overlay: false,
            logs: VecDeque::new(),
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    /// Replaces the player/fixture snapshot. Squad slots whose player is
    /// still present are kept; the rest are refilled with defaults.
    pub fn apply_snapshot(&mut self, snapshot: FplSnapshot) {
        self.loading = false;
        self.index = FixtureDifficultyIndex::new(&snapshot.fixtures);
        self.players = snapshot.players;
        self.next_gameweek = snapshot.next_gameweek;
        self.by_id = self
            .players
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.id, idx))
            .collect();

        for (slot, id) in self.squad.iter_mut().enumerate() {
            let keep = id
                .and_then(|id| self.by_id.get(&id))
                .is_some_and(|idx| self.players[*idx].position == SQUAD_SLOTS[slot]);
            if !keep {
                *id = None;
            }
        }
        self.fill_empty_slots();
        self.plan_scroll = 0;
    }

    pub fn player(&self, id: u32) -> Option<&Player> {
        self.by_id.get(&id).map(|idx| &self.players[*idx])
    }

    pub fn slot_player(&self, slot: usize) -> Option<&Player> {
        self.squad.get(slot).copied().flatten().and_then(|id| self.player(id))
    }

    pub fn squad_players(&self) -> Vec<&Player> {
        (0..self.squad.len())
            .filter_map(|slot| self.slot_player(slot))
            .collect()
    }

    pub fn squad_value(&self) -> Price {
        squad_value(&self.squad_players())
    }

    pub fn budget(&self) -> Price {
        remaining_budget(&self.squad_players())
    }

    /// Each empty slot takes the first unused player of its position, in
    /// pool order.
    pub fn fill_empty_slots(&mut self) {
        let mut used: HashSet<u32> = self.squad.iter().flatten().copied().collect();
        for (slot, position) in SQUAD_SLOTS.iter().enumerate() {
            if self.squad[slot].is_some() {
                continue;
            }
            if let Some(p) = self
                .players
                .iter()
                .find(|p| p.position == *position && !used.contains(&p.id))
            {
                used.insert(p.id);
                self.squad[slot] = Some(p.id);
            }
        }
    }

    pub fn reset_default_squad(&mut self) {
        self.squad = vec![None; SQUAD_SLOTS.len()];
        self.fill_empty_slots();
    }

    /// Places a manager's picks into slots by position, in pick order.
    /// Slots with no matching pick keep their current player. Returns how
    /// many distinct picks were found in the pool.
    pub fn fill_squad_from_picks(&mut self, picks: &[u32]) -> usize {
        let mut by_position: HashMap<Position, VecDeque<u32>> = HashMap::new();
        let mut seen = HashSet::new();
        let mut matched = 0;
        for id in picks {
            if !seen.insert(*id) {
                continue;
            }
            if let Some(p) = self.player(*id) {
                by_position.entry(p.position).or_default().push_back(p.id);
                matched += 1;
            }
        }
        if matched == 0 {
            return 0;
        }
        let picked: HashSet<u32> = by_position.values().flatten().copied().collect();
        for (slot, position) in SQUAD_SLOTS.iter().enumerate() {
            if let Some(id) = by_position.get_mut(position).and_then(|q| q.pop_front()) {
                self.squad[slot] = Some(id);
            } else if self.squad[slot].is_some_and(|id| picked.contains(&id)) {
                // A pick now sits in an earlier slot; avoid listing it twice.
                self.squad[slot] = None;
            }
        }
        self.fill_empty_slots();
        matched
    }

    /// Swaps the selected slot's player for the next (or previous) unused
    /// player of the same position.
    pub fn cycle_slot_player(&mut self, forward: bool) {
        let slot = self.selected_slot;
        let Some(position) = SQUAD_SLOTS.get(slot).copied() else {
            return;
        };
        let others: HashSet<u32> = self
            .squad
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != slot)
            .filter_map(|(_, id)| *id)
            .collect();
        let options: Vec<u32> = self
            .players
            .iter()
            .filter(|p| p.position == position && !others.contains(&p.id))
            .map(|p| p.id)
            .collect();
        if options.is_empty() {
            return;
        }
        let current = self.squad[slot].and_then(|id| options.iter().position(|o| *o == id));
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % options.len(),
            (Some(i), false) => (i + options.len() - 1) % options.len(),
            (None, _) => 0,
        };
        self.squad[slot] = Some(options[next]);
    }

    /// In the squad plan tab the cursor stays on a real row, even after the
    /// plan shrinks.
    pub fn select_next(&mut self) {
        match self.tab {
            Tab::SquadPlan => {
                let last = self.last_plan_row();
                self.plan_scroll = (self.plan_scroll + 1).min(last);
            }
            _ => self.selected_slot = (self.selected_slot + 1).min(SQUAD_SLOTS.len() - 1),
        }
    }

    pub fn select_prev(&mut self) {
        match self.tab {
            Tab::SquadPlan => {
                let last = self.last_plan_row();
                self.plan_scroll = self.plan_scroll.min(last).saturating_sub(1);
            }
            _ => self.selected_slot = self.selected_slot.saturating_sub(1),
        }
    }

    fn last_plan_row(&self) -> usize {
        self.squad_plan().rows.len().saturating_sub(1)
    }

    pub fn adjust_horizon(&mut self, delta: i8) {
        let n = (self.config.games_ahead as i16 + delta as i16)
            .clamp(MIN_GAMES_AHEAD as i16, MAX_GAMES_AHEAD as i16);
        self.config = self.config.with_games_ahead(n as u8);
    }

    pub fn toggle_model(&mut self) {
        self.config.model = self.config.model.toggled();
    }

    pub fn cycle_position_filter(&mut self) {
        self.position_filter = match self.position_filter {
            None => Some(Position::Goalkeeper),
            Some(Position::Goalkeeper) => Some(Position::Defender),
            Some(Position::Defender) => Some(Position::Midfielder),
            Some(Position::Midfielder) => Some(Position::Forward),
            Some(_) => None,
        };
    }

    pub fn cycle_compare(&mut self, forward: bool) {
        let len = self.compare_candidates().len();
        if len == 0 {
            self.compare_cursor = 0;
            return;
        }
        self.compare_cursor = if forward {
            (self.compare_cursor + 1) % len
        } else {
            (self.compare_cursor + len - 1) % len
        };
    }

    pub fn evaluator(&self) -> TransferEvaluator<'_> {
        TransferEvaluator::new(&self.players, &self.index, self.config)
    }

    fn row<'a>(&self, eval: &TransferEvaluator<'a>, transfer: Transfer<'a>) -> TransferRow<'a> {
        let n = self.config.horizon();
        TransferRow {
            out_analysis: eval.projector().analyze(transfer.player_out(), n),
            in_analysis: eval.projector().analyze(transfer.player_in(), n),
            transfer,
        }
    }

    pub fn quick_analysis(&self) -> Option<QuickAnalysisView<'_>> {
        let outgoing = self.slot_player(self.selected_slot)?;
        let eval = self.evaluator();
        let transfers = eval.evaluate_transfers(outgoing, self.position_filter);
        let kept = affordable(&transfers, self.budget());
        let outcome = PlanOutcome::classify(self.players.len(), transfers.len(), kept.len());
        let rows = kept.into_iter().map(|t| self.row(&eval, t)).collect();
        Some(QuickAnalysisView {
            outgoing,
            outgoing_analysis: eval.projector().analyze(outgoing, self.config.horizon()),
            position: self.position_filter.unwrap_or(outgoing.position),
            rows,
            outcome,
        })
    }

    /// Squad-wide plan, budget-filtered per outgoing player.
    pub fn squad_plan(&self) -> SquadPlanView<'_> {
        let eval = self.evaluator();
        let squad = self.squad_players();
        let plan = eval.plan_squad_transfers(&squad);
        let kept = affordable(&plan, self.budget());
        let outcome = PlanOutcome::classify(self.players.len(), plan.len(), kept.len());
        SquadPlanView {
            rows: kept.into_iter().map(|t| self.row(&eval, t)).collect(),
            outcome,
        }
    }

    fn compare_candidates(&self) -> Vec<&Player> {
        let Some(left) = self.slot_player(self.selected_slot) else {
            return Vec::new();
        };
        let position = self.position_filter.unwrap_or(left.position);
        self.players
            .iter()
            .filter(|p| p.position == position && p.id != left.id)
            .collect()
    }

    pub fn compare(&self) -> Option<CompareView<'_>> {
        let left = self.slot_player(self.selected_slot)?;
        let candidates = self.compare_candidates();
        let right = candidates
            .get(self.compare_cursor.min(candidates.len().saturating_sub(1)))
            .copied();
        let projector = Projector::new(&self.index, self.config.model);
        let n = self.config.horizon();
        Some(CompareView {
            left,
            right,
            left_analysis: projector.analyze(left, n),
            right_analysis: right.map(|p| projector.analyze(p, n)),
        })
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetSnapshot(snapshot) => {
            if snapshot.players.is_empty() {
                state.loading = false;
                state.push_log("[WARN] No player data from FPL; press r to retry");
                return;
            }
            let players = snapshot.players.len();
            let fixtures = snapshot.fixtures.len();
            state.apply_snapshot(snapshot);
            state.push_log(format!("[INFO] Loaded {players} players, {fixtures} fixtures"));
        }
        Delta::SetManagerPicks { manager_id, picks } => {
            if picks.is_empty() {
                state.push_log(format!(
                    "[WARN] Could not fetch team for manager {manager_id}"
                ));
                return;
            }
            let matched = state.fill_squad_from_picks(&picks);
            if matched == 0 {
                state.push_log("[WARN] Could not match fetched players to current data");
            } else {
                state.push_log(format!(
                    "[INFO] Loaded {matched} players from manager {manager_id}"
                ));
            }
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
