//! The interface shared by games, sets and matches, and the context they are played in.

use rand::RngCore;

use crate::{
    error::ScoringError,
    narration::{MatchEvent, Narrator},
    participant::Participant,
    rally::{PointOutcome, PointResolver},
    side::Side,
};

/// Everything a level needs to be played out: the single random stream, the point model,
/// the two participants and the narration sink.
///
/// The court is borrowed down through match, set and game so that every point draws from
/// the same stream, in order.
pub struct Court<'a> {
    pub rng: &'a mut dyn RngCore,
    pub resolver: &'a mut dyn PointResolver,
    pub narrator: &'a mut dyn Narrator,
    pub participants: [&'a mut dyn Participant; 2],
}

impl<'a> Court<'a> {
    pub fn new(
        rng: &'a mut dyn RngCore,
        resolver: &'a mut dyn PointResolver,
        narrator: &'a mut dyn Narrator,
        side_a: &'a mut dyn Participant,
        side_b: &'a mut dyn Participant,
    ) -> Self {
        Court {
            rng,
            resolver,
            narrator,
            participants: [side_a, side_b],
        }
    }

    /// Resolve the next point served by `server`.
    pub(crate) fn resolve_point(&mut self, server: Side) -> PointOutcome {
        self.resolver.resolve(server, &mut *self.rng)
    }

    pub(crate) fn participant(&mut self, side: Side) -> &mut dyn Participant {
        &mut *self.participants[side.index()]
    }

    pub(crate) fn narrate(&mut self, event: MatchEvent) {
        self.narrator.narrate(&event);
    }
}

/// A contest that is played until one side wins it.
pub trait Playable {
    /// Play until complete and return the winner.
    ///
    /// # Error
    /// Returned when the level is already complete or a lower level broke a scoring invariant.
    fn play(&mut self, court: &mut Court<'_>) -> Result<Side, ScoringError>;

    /// True once a winner is frozen.
    fn is_complete(&self) -> bool;

    /// The frozen winner, `None` while in progress.
    fn winner(&self) -> Option<Side>;
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Scripted point resolvers shared by the unit tests.

    use std::collections::VecDeque;

    use rand::RngCore;

    use crate::{
        rally::{PointOutcome, PointResolver},
        side::{Role, Side},
    };

    /// Every point goes to `side`, whoever serves.
    pub struct Favour(pub Side);

    impl PointResolver for Favour {
        fn resolve(&mut self, server: Side, _rng: &mut dyn RngCore) -> PointOutcome {
            let role = if server == self.0 {
                Role::Server
            } else {
                Role::Receiver
            };
            PointOutcome::rally(role, 3, false)
        }
    }

    /// Points go to the listed sides in order, then to side A.
    pub struct Script(pub VecDeque<Side>);

    impl Script {
        pub fn new(sides: impl IntoIterator<Item = Side>) -> Self {
            Script(sides.into_iter().collect())
        }
    }

    impl PointResolver for Script {
        fn resolve(&mut self, server: Side, _rng: &mut dyn RngCore) -> PointOutcome {
            let side = self.0.pop_front().unwrap_or(Side::A);
            let role = if side == server {
                Role::Server
            } else {
                Role::Receiver
            };
            PointOutcome::rally(role, 4, false)
        }
    }
}
