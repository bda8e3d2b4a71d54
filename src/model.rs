use std::fmt;

/// Net gain at or above which a swap is rated GOOD.
pub const DEFAULT_GOOD_THRESHOLD: f64 = 5.0;

/// FPL squad budget, £100.0m in tenths.
pub const SQUAD_BUDGET: Price = Price(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
    Unknown,
}

impl Position {
    pub fn from_element_type(element_type: u64) -> Self {
        match element_type {
            1 => Position::Goalkeeper,
            2 => Position::Defender,
            3 => Position::Midfielder,
            4 => Position::Forward,
            _ => Position::Unknown,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Position::Goalkeeper => "GKP",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
            Position::Unknown => "UNK",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Money in tenths of £1m, the unit the FPL API reports prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(pub i32);

impl std::ops::Add for Price {
    type Output = Price;
    fn add(self, rhs: Price) -> Price {
        Price(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Price {
    type Output = Price;
    fn sub(self, rhs: Price) -> Price {
        Price(self.0 - rhs.0)
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price(0), |acc, p| acc + p)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}£{}.{}m", abs / 10, abs % 10)
    }
}

/// Availability flag as published by FPL (`a`, `d`, `i`, `s`, `u`, `n`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerStatus {
    Available,
    Doubtful,
    Injured,
    Suspended,
    Unavailable,
    NotInSquad,
    Other(String),
}

impl PlayerStatus {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "a" => PlayerStatus::Available,
            "d" => PlayerStatus::Doubtful,
            "i" => PlayerStatus::Injured,
            "s" => PlayerStatus::Suspended,
            "u" => PlayerStatus::Unavailable,
            "n" => PlayerStatus::NotInSquad,
            other => PlayerStatus::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            PlayerStatus::Available => "a",
            PlayerStatus::Doubtful => "d",
            PlayerStatus::Injured => "i",
            PlayerStatus::Suspended => "s",
            PlayerStatus::Unavailable => "u",
            PlayerStatus::NotInSquad => "n",
            PlayerStatus::Other(raw) => raw,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, PlayerStatus::Available)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub team: String,
    pub position: Position,
    pub price: Price,
    pub points: i32,
    pub games_played: u32,
    pub selected_by_percent: f64,
    pub form: Option<f64>,
    pub status: Option<PlayerStatus>,
    pub chance_of_playing: Option<u8>,
}

impl Player {
    /// True when the player carries any doubt flag.
    pub fn is_flagged(&self) -> bool {
        self.status.as_ref().is_some_and(|s| !s.is_available())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    pub gameweek: Option<u32>,
    pub team: String,
    pub opponent: String,
    pub difficulty: u8,
    pub is_home: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recommendation {
    Good,
    Neutral,
    Bad,
}

impl Recommendation {
    pub fn from_net_gain(net_gain: f64) -> Self {
        Self::classify(net_gain, DEFAULT_GOOD_THRESHOLD)
    }

    pub fn classify(net_gain: f64, good_threshold: f64) -> Self {
        if net_gain >= good_threshold {
            Recommendation::Good
        } else if net_gain >= 0.0 {
            Recommendation::Neutral
        } else {
            Recommendation::Bad
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Recommendation::Good => "GOOD",
            Recommendation::Neutral => "NEUTRAL",
            Recommendation::Bad => "BAD",
        }
    }
}

/// A candidate one-for-one swap. Net gain and recommendation are derived at
/// construction and cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer<'a> {
    player_out: &'a Player,
    player_in: &'a Player,
    games_ahead: u8,
    expected_points_gain: f64,
    transfer_cost: f64,
    net_point_gain: f64,
    recommendation: Recommendation,
}

impl<'a> Transfer<'a> {
    pub fn new(
        player_out: &'a Player,
        player_in: &'a Player,
        games_ahead: u8,
        expected_points_gain: f64,
        transfer_cost: f64,
        good_threshold: f64,
    ) -> Self {
        let net_point_gain = expected_points_gain - transfer_cost;
        Self {
            player_out,
            player_in,
            games_ahead,
            expected_points_gain,
            transfer_cost,
            net_point_gain,
            recommendation: Recommendation::classify(net_point_gain, good_threshold),
        }
    }

    pub fn player_out(&self) -> &'a Player {
        self.player_out
    }

    pub fn player_in(&self) -> &'a Player {
        self.player_in
    }

    pub fn games_ahead(&self) -> u8 {
        self.games_ahead
    }

    pub fn expected_points_gain(&self) -> f64 {
        self.expected_points_gain
    }

    pub fn transfer_cost(&self) -> f64 {
        self.transfer_cost
    }

    pub fn net_point_gain(&self) -> f64 {
        self.net_point_gain
    }

    pub fn recommendation(&self) -> Recommendation {
        self.recommendation
    }

    /// Extra money the swap needs from the bank (negative frees budget).
    pub fn price_delta(&self) -> Price {
        self.player_in.price - self.player_out.price
    }
}

pub fn squad_value(squad: &[&Player]) -> Price {
    squad.iter().map(|p| p.price).sum()
}

pub fn remaining_budget(squad: &[&Player]) -> Price {
    SQUAD_BUDGET - squad_value(squad)
}

/// Keeps transfers whose price difference fits in `budget`.
pub fn affordable<'a>(transfers: &[Transfer<'a>], budget: Price) -> Vec<Transfer<'a>> {
    transfers
        .iter()
        .filter(|t| t.price_delta() <= budget)
        .cloned()
        .collect()
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
pub(crate) fn stub_player(id: u32, team: &str, position: Position, form: Option<f64>) -> Player {
    Player {
        id,
        name: format!("P{id}"),
        team: team.to_string(),
        position,
        price: Price(50),
        points: 0,
        games_played: 0,
        selected_by_percent: 0.0,
        form,
        status: Some(PlayerStatus::Available),
        chance_of_playing: None,
    }
}
