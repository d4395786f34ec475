//! Resolution of a single point, from serve to a definitive winner.
//!
//! A [`PointResolver`] turns draws from the match's random stream into a [`PointOutcome`].
//! The built-in [`RallyResolver`] models first and second serves, aces, double faults and a
//! bounded multi-shot exchange. It holds no state between points, so two resolvers fed the
//! same stream produce the same sequence of outcomes.

use rand::{Rng, RngCore};
use tracing::trace;

use crate::side::{Role, Side};

/// How a single point ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointOutcome {
    winner: Role,
    was_ace: bool,
    was_double_fault: bool,
    first_serve_missed: bool,
    shot_count: u32,
}

impl PointOutcome {
    /// Point decided in an exchange of `shot_count` shots (serve included).
    pub fn rally(winner: Role, shot_count: u32, first_serve_missed: bool) -> Self {
        Self {
            winner,
            was_ace: false,
            was_double_fault: false,
            first_serve_missed,
            shot_count,
        }
    }

    /// Untouchable serve. Always one shot, always won by the server.
    pub fn ace(first_serve_missed: bool) -> Self {
        Self {
            winner: Role::Server,
            was_ace: true,
            was_double_fault: false,
            first_serve_missed,
            shot_count: 1,
        }
    }

    /// Both serves missed. No shot was played and the receiver takes the point.
    pub fn double_fault() -> Self {
        Self {
            winner: Role::Receiver,
            was_ace: false,
            was_double_fault: true,
            first_serve_missed: true,
            shot_count: 0,
        }
    }

    /// Who won the point.
    pub fn winner(&self) -> Role {
        self.winner
    }

    /// The winning side, given who served.
    pub fn winning_side(&self, server: Side) -> Side {
        Side::from_role(self.winner, server)
    }

    /// The point was an ace.
    pub fn was_ace(&self) -> bool {
        self.was_ace
    }

    /// The point was a double fault.
    pub fn was_double_fault(&self) -> bool {
        self.was_double_fault
    }

    /// The first serve was a fault (the point went to a second serve or a double fault).
    pub fn first_serve_missed(&self) -> bool {
        self.first_serve_missed
    }

    /// Shots played, serve included. 0 on a double fault.
    pub fn shot_count(&self) -> u32 {
        self.shot_count
    }
}

/// Produces the outcome of the next point.
///
/// Implementations must always return a definitive outcome and must draw randomness only from
/// `rng`, so a fixed seed reproduces the whole match.
pub trait PointResolver {
    /// Resolve one point served by `server`.
    fn resolve(&mut self, server: Side, rng: &mut dyn RngCore) -> PointOutcome;
}

/// Serve and exchange probabilities used by [`RallyResolver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServeProfile {
    /// Chance a first serve lands in.
    pub first_serve_in: f64,
    /// Chance a second serve lands in.
    pub second_serve_in: f64,
    /// Chance of a foot fault on any serve, checked independently of the serve itself.
    pub foot_fault: f64,
    /// Ace chance on a first serve that landed.
    pub first_serve_ace: f64,
    /// Ace chance on a second serve that landed.
    pub second_serve_ace: f64,
    /// Shot budget lower bound, inclusive.
    pub min_shots: u32,
    /// Shot budget upper bound, inclusive.
    pub max_shots: u32,
    /// Unforced error chance before any shot is counted.
    pub error_base: f64,
    /// Extra error chance per shot played.
    pub error_per_shot: f64,
    /// Clean winner chance before any shot is counted.
    pub winner_base: f64,
    /// Extra clean winner chance per shot played.
    pub winner_per_shot: f64,
}

impl Default for ServeProfile {
    fn default() -> Self {
        Self {
            first_serve_in: 0.65,
            second_serve_in: 0.90,
            foot_fault: 0.02,
            first_serve_ace: 0.08,
            second_serve_ace: 0.03,
            min_shots: 3,
            max_shots: 17,
            error_base: 0.15,
            error_per_shot: 0.01,
            winner_base: 0.10,
            winner_per_shot: 0.005,
        }
    }
}

/// The stochastic point model.
#[derive(Debug, Clone, Copy, Default)]
pub struct RallyResolver {
    profile: ServeProfile,
}

impl RallyResolver {
    /// Create a resolver with custom probabilities.
    pub fn new(profile: ServeProfile) -> Self {
        Self { profile }
    }

    /// The probabilities in use.
    pub fn profile(&self) -> &ServeProfile {
        &self.profile
    }

    fn serve_lands(&self, rng: &mut dyn RngCore, in_chance: f64) -> bool {
        let quality: f64 = rng.gen();
        if roll(rng, self.profile.foot_fault) {
            return false;
        }
        quality < in_chance
    }

    fn exchange(&self, rng: &mut dyn RngCore, first_serve_missed: bool) -> PointOutcome {
        let p = &self.profile;
        let (low, high) = (p.min_shots.min(p.max_shots), p.max_shots.max(p.min_shots));
        let budget = rng.gen_range(low..=high);

        // the serve that landed is shot 1
        let mut shot_count = 1;
        for shot in 1..budget {
            shot_count += 1;
            let hitter = if shot % 2 == 0 {
                Role::Server
            } else {
                Role::Receiver
            };

            let error_chance = p.error_base + f64::from(shot_count) * p.error_per_shot;
            if roll(rng, error_chance) {
                return PointOutcome::rally(hitter.opposite(), shot_count, first_serve_missed);
            }

            let winner_chance = p.winner_base + f64::from(shot_count) * p.winner_per_shot;
            if roll(rng, winner_chance) {
                return PointOutcome::rally(hitter, shot_count, first_serve_missed);
            }
        }

        let winner = if rng.gen::<bool>() {
            Role::Server
        } else {
            Role::Receiver
        };
        PointOutcome::rally(winner, shot_count, first_serve_missed)
    }
}

impl PointResolver for RallyResolver {
    fn resolve(&mut self, server: Side, rng: &mut dyn RngCore) -> PointOutcome {
        let first_in = self.serve_lands(rng, self.profile.first_serve_in);
        if !first_in && !self.serve_lands(rng, self.profile.second_serve_in) {
            trace!(%server, "double fault");
            return PointOutcome::double_fault();
        }

        let ace_chance = if first_in {
            self.profile.first_serve_ace
        } else {
            self.profile.second_serve_ace
        };
        if roll(rng, ace_chance) {
            trace!(%server, first_in, "ace");
            return PointOutcome::ace(!first_in);
        }

        let outcome = self.exchange(rng, !first_in);
        trace!(%server, winner = ?outcome.winner(), shots = outcome.shot_count(), "rally");
        outcome
    }
}

/// True with probability `chance`.
fn roll(rng: &mut dyn RngCore, chance: f64) -> bool {
    rng.gen::<f64>() < chance
}
