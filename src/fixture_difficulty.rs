use std::collections::HashMap;

use crate::model::{Fixture, round2};

/// Difficulty assumed for a team with no known fixtures.
pub const NEUTRAL_DIFFICULTY: f64 = 3.0;

/// Team -> upcoming fixtures, in the order they were supplied.
///
/// Callers hand fixtures over already sorted by gameweek; the horizon window
/// is simply the first `n` entries per team.
#[derive(Debug, Clone, Default)]
pub struct FixtureDifficultyIndex {
    by_team: HashMap<String, Vec<Fixture>>,
}

impl FixtureDifficultyIndex {
    pub fn new(fixtures: &[Fixture]) -> Self {
        let mut by_team: HashMap<String, Vec<Fixture>> = HashMap::new();
        for fixture in fixtures {
            by_team
                .entry(fixture.team.clone())
                .or_default()
                .push(fixture.clone());
        }
        Self { by_team }
    }

    pub fn upcoming(&self, team: &str, n: usize) -> &[Fixture] {
        let Some(list) = self.by_team.get(team) else {
            return &[];
        };
        &list[..n.min(list.len())]
    }

    pub fn average_difficulty(&self, team: &str, n: usize) -> f64 {
        let window = self.upcoming(team, n);
        if window.is_empty() {
            return NEUTRAL_DIFFICULTY;
        }
        let total: f64 = window.iter().map(|f| f.difficulty as f64).sum();
        round2(total / window.len() as f64)
    }

    pub fn team_count(&self) -> usize {
        self.by_team.len()
    }
}

/// Compact fixture run for display, e.g. `CHE(H)2 LIV(A)4`.
pub fn format_run(fixtures: &[Fixture]) -> String {
    fixtures
        .iter()
        .map(|f| {
            let venue = if f.is_home { 'H' } else { 'A' };
            format!("{}({venue}){}", f.opponent, f.difficulty)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(gw: u32, team: &str, opp: &str, difficulty: u8) -> Fixture {
        Fixture {
            gameweek: Some(gw),
            team: team.to_string(),
            opponent: opp.to_string(),
            difficulty,
            is_home: gw % 2 == 0,
        }
    }

    #[test]
    fn unknown_team_is_neutral() {
        let index = FixtureDifficultyIndex::new(&[fixture(1, "ARS", "CHE", 5)]);
        assert_eq!(index.average_difficulty("MUN", 8), 3.0);
    }

    #[test]
    fn average_uses_first_n_in_input_order() {
        let fixtures = vec![
            fixture(1, "ARS", "CHE", 2),
            fixture(2, "ARS", "LIV", 4),
            fixture(3, "ARS", "MCI", 5),
        ];
        let index = FixtureDifficultyIndex::new(&fixtures);
        assert_eq!(index.average_difficulty("ARS", 2), 3.0);
        assert_eq!(index.average_difficulty("ARS", 3), 3.67);
        // Horizon longer than the known schedule averages what exists.
        assert_eq!(index.average_difficulty("ARS", 19), 3.67);
    }

    #[test]
    fn run_strip_formats_venue_and_difficulty() {
        let fixtures = vec![fixture(2, "ARS", "CHE", 2), fixture(3, "ARS", "LIV", 4)];
        assert_eq!(format_run(&fixtures), "CHE(H)2 LIV(A)4");
    }
}
