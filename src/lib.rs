//! # Tennis Sim
//!
//! A point-by-point simulator of professional singles tennis matches.
//!
//! It provides:
//! - The nested scoring state machine: rally, game (regular and tiebreak), set and match
//! - A probabilistic serve and rally model behind the [`PointResolver`](crate::rally::PointResolver) trait
//! - Players and referees with per-match statistics and ranking updates
//! - Umpire-style narration through the [`Narrator`](crate::narration::Narrator) trait
//! - Single elimination draws via [`KnockoutTournament`](crate::tournament::KnockoutTournament)
//!
//! All randomness comes from one caller-owned generator that is borrowed down through every
//! level, so a seeded generator replays the exact same match.
//!
//! # Documentation Overview
//!
//! - For the scoring rules of each level, see [`game`], [`set`] and [`match_state`].
//! - For setting up a match, see [`MatchBuilder`](crate::match_state::MatchBuilder).
//! - For environment driven settings, see [`Configuration`](crate::configuration::Configuration).
//! - For custom point models or players, implement [`PointResolver`](crate::rally::PointResolver)
//!   or [`Participant`](crate::participant::Participant).
//!
//! # Usage Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use tennis_sim::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut rng = ChaCha8Rng::seed_from_u64(7);
//!
//!     let mut tennis_match = MatchBuilder::new()
//!         .with_players(
//!             Player::new(1, Identity::new("Ana", "ESP"), Gender::Female, 4),
//!             Player::new(2, Identity::new("Beth", "GBR"), Gender::Female, 11),
//!         )
//!         .with_referee(Referee::new(Identity::new("Carla", "POR")))
//!         .with_category(Category::WomensSingles)
//!         .with_coin_toss(&mut rng)
//!         .build()?;
//!
//!     let winner = tennis_match.play(&mut rng, &mut RallyResolver::default(), &mut NullNarrator)?;
//!     assert_eq!(tennis_match.state().sets().get(winner), 2);
//!     println!("{}", tennis_match.summary());
//!     Ok(())
//! }
//! ```

pub use anyhow;
pub mod configuration;
pub mod error;
pub mod game;
pub mod logger;
pub mod match_state;
pub mod narration;
pub mod participant;
pub mod playable;
pub mod rally;
pub mod set;
pub mod side;
pub mod tournament;

/// Commonly used types and traits for quick access.
///
/// ```rust
/// use tennis_sim::prelude::*;
/// ```
pub mod prelude {
    pub use crate::configuration::{Configuration, ScoringRules};
    pub use crate::error::{ScoringError, SetupError};
    pub use crate::game::{GameKind, GameState};
    pub use crate::match_state::{Category, Match, MatchBuilder, MatchProgress, MatchState, MatchStatus};
    pub use crate::narration::{ConsoleNarrator, MatchEvent, Narrator, NullNarrator, TracingNarrator};
    pub use crate::participant::{Gender, Identity, Participant, Player, PlayerStats, Referee};
    pub use crate::playable::{Court, Playable};
    pub use crate::rally::{PointOutcome, PointResolver, RallyResolver, ServeProfile};
    pub use crate::set::SetState;
    pub use crate::side::{Role, Side, Tally};
    pub use crate::tournament::{KnockoutTournament, RoundProgress};
}
