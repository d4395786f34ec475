//! The two ends of the court.
//!
//! Scores are always kept per [`Side`]; a [`Role`] only says who served a given point.

use std::fmt;

/// One of the two participants of a match, in the order they were entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// First participant.
    A,
    /// Second participant.
    B,
}

impl Side {
    /// Both sides, in entry order.
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    /// The other side.
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Position of this side in per-side arrays.
    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    /// The side that holds `role` when `server` is serving.
    pub fn from_role(role: Role, server: Side) -> Side {
        match role {
            Role::Server => server,
            Role::Receiver => server.opponent(),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "side A"),
            Side::B => write!(f, "side B"),
        }
    }
}

/// Who a point outcome is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The player serving the point.
    Server,
    /// The player returning serve.
    Receiver,
}

impl Role {
    /// The other role.
    pub fn opposite(self) -> Role {
        match self {
            Role::Server => Role::Receiver,
            Role::Receiver => Role::Server,
        }
    }
}

/// A pair of per-side counters.
///
/// Counters only ever go up; there is no way to decrement one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Tally([u32; 2]);

impl Tally {
    /// The count for `side`.
    pub fn get(&self, side: Side) -> u32 {
        self.0[side.index()]
    }

    /// Add one to `side`.
    pub(crate) fn increment(&mut self, side: Side) {
        self.0[side.index()] += 1;
    }

    /// The larger of the two counts.
    pub fn max(&self) -> u32 {
        self.0[0].max(self.0[1])
    }

    /// Absolute difference between the two counts.
    pub fn margin(&self) -> u32 {
        self.0[0].abs_diff(self.0[1])
    }

    /// The side with the strictly higher count, if any.
    pub fn leader(&self) -> Option<Side> {
        match self.0[0].cmp(&self.0[1]) {
            std::cmp::Ordering::Greater => Some(Side::A),
            std::cmp::Ordering::Less => Some(Side::B),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// True when the score is exactly `high`-`low` in either order.
    pub fn is_either(&self, high: u32, low: u32) -> bool {
        (self.0[0] == high && self.0[1] == low) || (self.0[0] == low && self.0[1] == high)
    }

    /// Total of both counts.
    pub fn total(&self) -> u32 {
        self.0[0] + self.0[1]
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0[0], self.0[1])
    }
}
