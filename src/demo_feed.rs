use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::fpl_fetch::{DataProvider, FplSnapshot, Gameweek};
use crate::model::{Fixture, Player, PlayerStatus, Position, Price};

const TEAMS: [&str; 20] = [
    "ARS", "AVL", "BOU", "BRE", "BHA", "BUR", "CHE", "CRY", "EVE", "FUL", "LEE", "LIV", "MCI",
    "MUN", "NEW", "NFO", "SUN", "TOT", "WHU", "WOL",
];

const DEMO_GAMEWEEKS: u32 = 10;
const FIRST_NAMES: [&str; 8] = ["Alex", "Ben", "Carlos", "Dan", "Eli", "Femi", "Gabriel", "Hugo"];
const LAST_NAMES: [&str; 8] = ["Silva", "Jones", "Okafor", "Muller", "Rossi", "Kane", "Diaz", "Berg"];

/// Per-team roster shape, matching a full FPL squad.
const ROSTER: [(Position, usize); 4] = [
    (Position::Goalkeeper, 2),
    (Position::Defender, 5),
    (Position::Midfielder, 5),
    (Position::Forward, 3),
];

/// Offline provider with a reproducible synthetic league.
#[derive(Debug, Clone)]
pub struct DemoProvider {
    seed: u64,
}

impl Default for DemoProvider {
    fn default() -> Self {
        Self { seed: 2026 }
    }
}

impl DemoProvider {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    pub fn snapshot(&self) -> FplSnapshot {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let players = demo_players(&mut rng);
        let fixtures = demo_fixtures(&mut rng);
        FplSnapshot {
            players,
            fixtures,
            next_gameweek: Some(Gameweek {
                id: 1,
                deadline_time: None,
            }),
        }
    }
}

impl DataProvider for DemoProvider {
    fn fetch_snapshot(&self) -> FplSnapshot {
        self.snapshot()
    }

    /// A spread of one team's worth of slots drawn from different clubs.
    fn fetch_manager_picks(&self, manager_id: u64) -> Vec<u32> {
        let players = self.snapshot().players;
        let offset = (manager_id % TEAMS.len() as u64) as usize;
        let mut picks = Vec::new();
        for (position, count) in ROSTER {
            picks.extend(
                players
                    .iter()
                    .filter(|p| p.position == position)
                    .skip(offset)
                    .step_by(7)
                    .take(count)
                    .map(|p| p.id),
            );
        }
        picks
    }
}

fn demo_players(rng: &mut StdRng) -> Vec<Player> {
    let mut players = Vec::new();
    let mut id = 1u32;
    for team in TEAMS {
        for (position, count) in ROSTER {
            for _ in 0..count {
                let (lo, hi) = match position {
                    Position::Goalkeeper => (40, 60),
                    Position::Defender => (40, 70),
                    Position::Midfielder => (45, 130),
                    _ => (45, 145),
                };
                let form = if rng.gen_bool(0.1) {
                    None
                } else {
                    Some((rng.gen_range(0.0..8.0_f64) * 10.0).round() / 10.0)
                };
                let status = match rng.gen_range(0..20) {
                    0 => PlayerStatus::Injured,
                    1 => PlayerStatus::Doubtful,
                    2 => PlayerStatus::Suspended,
                    _ => PlayerStatus::Available,
                };
                let chance_of_playing = match status {
                    PlayerStatus::Available => None,
                    PlayerStatus::Doubtful => Some(50),
                    _ => Some(0),
                };
                let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
                let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
                let minutes = rng.gen_range(0..900u32);
                players.push(Player {
                    id,
                    name: format!("{first} {last} {id}"),
                    team: team.to_string(),
                    position,
                    price: Price(rng.gen_range(lo..=hi)),
                    points: rng.gen_range(0..80),
                    games_played: minutes / 90,
                    selected_by_percent: (rng.gen_range(0.0..40.0_f64) * 10.0).round() / 10.0,
                    form,
                    status: Some(status),
                    chance_of_playing,
                });
                id += 1;
            }
        }
    }
    players
}

fn demo_fixtures(rng: &mut StdRng) -> Vec<Fixture> {
    let mut fixtures = Vec::new();
    let mut order: Vec<&str> = TEAMS.to_vec();
    for gw in 1..=DEMO_GAMEWEEKS {
        order.shuffle(rng);
        for pair in order.chunks(2) {
            let [home, away] = pair else { continue };
            fixtures.push(Fixture {
                gameweek: Some(gw),
                team: home.to_string(),
                opponent: away.to_string(),
                difficulty: rng.gen_range(2..=5),
                is_home: true,
            });
            fixtures.push(Fixture {
                gameweek: Some(gw),
                team: away.to_string(),
                opponent: home.to_string(),
                difficulty: rng.gen_range(2..=5),
                is_home: false,
            });
        }
    }
    fixtures
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_is_reproducible() {
        let a = DemoProvider::with_seed(7).snapshot();
        let b = DemoProvider::with_seed(7).snapshot();
        assert_eq!(a.players, b.players);
        assert_eq!(a.fixtures, b.fixtures);
    }

    #[test]
    fn every_team_plays_every_gameweek() {
        let snap = DemoProvider::default().snapshot();
        assert_eq!(snap.fixtures.len(), TEAMS.len() * DEMO_GAMEWEEKS as usize);
        assert_eq!(snap.players.len(), TEAMS.len() * 15);
    }

    #[test]
    fn trait_accessors_split_the_snapshot() {
        let provider = DemoProvider::default();
        let snap = provider.snapshot();
        assert_eq!(provider.fetch_players(), snap.players);
        let fixtures = provider.fetch_fixtures();
        assert_eq!(fixtures, snap.fixtures);
        assert!(fixtures.iter().all(|f| (1..=5).contains(&f.difficulty)));
    }

    #[test]
    fn picks_fill_a_full_squad() {
        let provider = DemoProvider::default();
        let picks = provider.fetch_manager_picks(3);
        assert_eq!(picks.len(), 15);
    }
}
