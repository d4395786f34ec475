//! People on court.
//!
//! The scoring core only sees participants through the [`Participant`] hooks: it reports
//! resolution boundaries and never keeps cumulative counts itself. [`Player`] is the stock
//! implementation and accumulates [`PlayerStats`].

use std::{fmt, hash::Hash};

/// Display name and nationality, shared by every role.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub name: String,
    pub nationality: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, nationality: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nationality: nationality.into(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.nationality)
    }
}

/// Hooks invoked by the scoring core at resolution boundaries.
///
/// Every hook defaults to doing nothing.
pub trait Participant {
    /// Name used in narration.
    fn display_name(&self) -> &str;

    fn on_point_won(&mut self) {}
    fn on_point_lost(&mut self) {}
    /// Called on the server, in addition to `on_point_won`.
    fn on_ace(&mut self) {}
    /// Called on the server, in addition to `on_point_lost`.
    fn on_double_fault(&mut self) {}
    fn on_game_won(&mut self) {}
    fn on_game_lost(&mut self) {}
    fn on_set_won(&mut self) {}
    fn on_set_lost(&mut self) {}
    fn on_match_won(&mut self) {}
    fn on_match_lost(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

/// Cumulative counters kept by a [`Player`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub matches_won: u32,
    pub matches_lost: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub points_won: u32,
    pub points_lost: u32,
    pub aces: u32,
    pub double_faults: u32,
    /// Ranking points earned from match wins.
    pub ranking_points: u64,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub id: u32,
    pub identity: Identity,
    pub gender: Gender,
    ranking: u32,
    stats: PlayerStats,
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Player {
    /// `ranking` is validated when the player is entered into a match.
    pub fn new(id: u32, identity: Identity, gender: Gender, ranking: u32) -> Player {
        Player {
            id,
            identity,
            gender,
            ranking,
            stats: PlayerStats::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    /// Current ranking position, 1 being the best.
    pub fn ranking(&self) -> u32 {
        self.ranking
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    /// Move the ranking after a match against a player ranked `opponent_ranking`.
    ///
    /// Beating a better-ranked opponent climbs `(ranking - opponent) / 10 + 1` places, any other
    /// win climbs one; the ranking never goes below 1. A loss drops one place.
    pub fn update_ranking(&mut self, won: bool, opponent_ranking: u32) {
        if won {
            let improvement = if opponent_ranking < self.ranking {
                (self.ranking - opponent_ranking) / 10 + 1
            } else {
                1
            };
            self.ranking = self.ranking.saturating_sub(improvement).max(1);
        } else {
            self.ranking += 1;
        }
    }

    pub(crate) fn award_ranking_points(&mut self, points: u64) {
        self.stats.ranking_points += points;
    }

    pub fn summary(&self) -> String {
        let s = &self.stats;
        format!(
            "{} #{}: matches {}W-{}L, sets {}W-{}L, games {}W-{}L, points {}W-{}L, aces {}, double faults {}, ranking points {}",
            self.identity,
            self.ranking,
            s.matches_won,
            s.matches_lost,
            s.sets_won,
            s.sets_lost,
            s.games_won,
            s.games_lost,
            s.points_won,
            s.points_lost,
            s.aces,
            s.double_faults,
            s.ranking_points
        )
    }
}

impl Participant for Player {
    fn display_name(&self) -> &str {
        self.name()
    }

    fn on_point_won(&mut self) {
        self.stats.points_won += 1;
    }

    fn on_point_lost(&mut self) {
        self.stats.points_lost += 1;
    }

    fn on_ace(&mut self) {
        self.stats.aces += 1;
    }

    fn on_double_fault(&mut self) {
        self.stats.double_faults += 1;
    }

    fn on_game_won(&mut self) {
        self.stats.games_won += 1;
    }

    fn on_game_lost(&mut self) {
        self.stats.games_lost += 1;
    }

    fn on_set_won(&mut self) {
        self.stats.sets_won += 1;
    }

    fn on_set_lost(&mut self) {
        self.stats.sets_lost += 1;
    }

    fn on_match_won(&mut self) {
        self.stats.matches_won += 1;
    }

    fn on_match_lost(&mut self) {
        self.stats.matches_lost += 1;
    }
}

#[derive(Debug, Clone)]
pub struct Referee {
    pub identity: Identity,
    matches_officiated: u32,
}

impl Referee {
    pub fn new(identity: Identity) -> Referee {
        Referee {
            identity,
            matches_officiated: 0,
        }
    }

    pub fn matches_officiated(&self) -> u32 {
        self.matches_officiated
    }

    pub(crate) fn record_match_officiated(&mut self) {
        self.matches_officiated += 1;
    }
}
