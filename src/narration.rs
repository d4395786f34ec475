//! Observational events emitted while a match is simulated.
//!
//! A [`Narrator`] receives every [`MatchEvent`] by reference and returns nothing, so it cannot
//! influence scoring. Sinks must not block.

use tracing::{debug, info, trace};

use crate::side::{Side, Tally};

/// Something the umpire would announce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    MatchStarted,
    SetStarted {
        number: usize,
        deciding: bool,
    },
    ServerAnnounced {
        server: Side,
    },
    TiebreakStarted,
    /// First serve missed, a second serve follows.
    Fault {
        server: Side,
    },
    DoubleFault {
        server: Side,
    },
    Ace {
        server: Side,
    },
    /// Rendered game score after a point, e.g. `"30 - 15"`, `"Deuce"`, `"5-4"`.
    ScoreChanged {
        score: String,
    },
    GameWon {
        winner: Side,
        games: Tally,
    },
    SetWon {
        winner: Side,
        number: usize,
        games: Tally,
    },
    MatchWon {
        winner: Side,
        sets: Tally,
    },
}

/// Receiver for [`MatchEvent`]s.
pub trait Narrator {
    fn narrate(&mut self, event: &MatchEvent);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNarrator;

impl Narrator for NullNarrator {
    fn narrate(&mut self, _event: &MatchEvent) {}
}

/// Records events in order.
impl Narrator for Vec<MatchEvent> {
    fn narrate(&mut self, event: &MatchEvent) {
        self.push(event.clone());
    }
}

/// Forwards events to `tracing`: points at `trace`, games at `debug`, sets and matches at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNarrator;

impl Narrator for TracingNarrator {
    fn narrate(&mut self, event: &MatchEvent) {
        match event {
            MatchEvent::GameWon { .. } => debug!(?event),
            MatchEvent::SetWon { .. } | MatchEvent::MatchWon { .. } | MatchEvent::MatchStarted => {
                info!(?event)
            }
            _ => trace!(?event),
        }
    }
}

/// Umpire-style announcements on stdout.
#[derive(Debug, Clone)]
pub struct ConsoleNarrator {
    umpire: String,
    names: [String; 2],
}

impl ConsoleNarrator {
    pub fn new(umpire: impl Into<String>, side_a: impl Into<String>, side_b: impl Into<String>) -> Self {
        Self {
            umpire: umpire.into(),
            names: [side_a.into(), side_b.into()],
        }
    }

    fn name(&self, side: Side) -> &str {
        &self.names[side.index()]
    }

    /// The line announced for `event`.
    pub fn announcement(&self, event: &MatchEvent) -> String {
        match event {
            MatchEvent::MatchStarted => format!(
                "Match: {} vs {} (umpire: {})",
                self.name(Side::A),
                self.name(Side::B),
                self.umpire
            ),
            MatchEvent::SetStarted { number, deciding } => {
                if *deciding {
                    format!("=== SET {number} (deciding) ===")
                } else {
                    format!("=== SET {number} ===")
                }
            }
            MatchEvent::ServerAnnounced { server } => format!("{} to serve.", self.name(*server)),
            MatchEvent::TiebreakStarted => "*** TIEBREAK ***".to_owned(),
            MatchEvent::Fault { .. } => "Fault!".to_owned(),
            MatchEvent::DoubleFault { .. } => "Double Fault! Point to opponent.".to_owned(),
            MatchEvent::Ace { .. } => "Ace!".to_owned(),
            MatchEvent::ScoreChanged { score } => match score.as_str() {
                "AD - 40" => format!("Advantage {}", self.name(Side::A)),
                "40 - AD" => format!("Advantage {}", self.name(Side::B)),
                _ => score.clone(),
            },
            MatchEvent::GameWon { winner, .. } => format!("Game, {}!", self.name(*winner)),
            MatchEvent::SetWon { winner, games, .. } => {
                format!("Set, {}! ({games})", self.name(*winner))
            }
            MatchEvent::MatchWon { winner, sets } => format!(
                "*** MATCH WON BY {} *** ({sets} in sets)",
                self.name(*winner).to_uppercase()
            ),
        }
    }
}

impl Narrator for ConsoleNarrator {
    fn narrate(&mut self, event: &MatchEvent) {
        println!("{}", self.announcement(event));
    }
}

#[cfg(test)]
mod narration_tests {
    use super::*;

    #[test]
    fn console_lines() {
        let narrator = ConsoleNarrator::new("Ump", "Alice", "Beth");
        let mut games = Tally::default();
        for _ in 0..6 {
            games.increment(Side::B);
        }
        games.increment(Side::A);
        let set = MatchEvent::SetWon {
            winner: Side::B,
            number: 1,
            games,
        };
        assert_eq!(narrator.announcement(&set), "Set, Beth! (1-6)");
        let serve = MatchEvent::ServerAnnounced { server: Side::A };
        assert_eq!(narrator.announcement(&serve), "Alice to serve.");
    }

    #[test]
    fn advantage_is_called_by_name() {
        let narrator = ConsoleNarrator::new("Ump", "Alice", "Beth");
        let call = |score: &str| {
            narrator.announcement(&MatchEvent::ScoreChanged {
                score: score.to_owned(),
            })
        };
        assert_eq!(call("40 - AD"), "Advantage Beth");
        assert_eq!(call("AD - 40"), "Advantage Alice");
        assert_eq!(call("Deuce"), "Deuce");
        assert_eq!(call("15 - 0"), "15 - 0");
    }

    #[test]
    fn vec_records_in_order() {
        let mut events: Vec<MatchEvent> = Vec::new();
        events.narrate(&MatchEvent::MatchStarted);
        events.narrate(&MatchEvent::TiebreakStarted);
        assert_eq!(events, vec![MatchEvent::MatchStarted, MatchEvent::TiebreakStarted]);
    }
}
