//! A single game, regular or tiebreak.
//!
//! Completion is always decided on the numeric point counts; the tennis rendering
//! (`15`, `Deuce`, `AD`...) is display only.

use tracing::debug;

use crate::{
    error::ScoringError,
    narration::MatchEvent,
    playable::{Court, Playable},
    rally::PointOutcome,
    side::{Side, Tally},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    /// 0/15/30/40 with deuce and advantage. First to 4 points, 2 clear.
    Regular,
    /// Numeric scoring. First to 7 points, 2 clear.
    Tiebreak,
}

impl GameKind {
    /// Points needed before the 2-point margin is checked.
    pub fn points_to_win(self) -> u32 {
        match self {
            GameKind::Regular => 4,
            GameKind::Tiebreak => 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    kind: GameKind,
    server: Side,
    points: Tally,
    winner: Option<Side>,
}

impl GameState {
    /// A game in which `server` serves first.
    pub fn new(kind: GameKind, server: Side) -> Self {
        Self {
            kind,
            server,
            points: Tally::default(),
            winner: None,
        }
    }

    pub fn regular(server: Side) -> Self {
        Self::new(GameKind::Regular, server)
    }

    pub fn tiebreak(server: Side) -> Self {
        Self::new(GameKind::Tiebreak, server)
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn is_tiebreak(&self) -> bool {
        self.kind == GameKind::Tiebreak
    }

    /// The side that served the first point.
    pub fn server(&self) -> Side {
        self.server
    }

    pub fn points(&self) -> Tally {
        self.points
    }

    /// Who serves the next point.
    ///
    /// In a regular game the server never changes. In a tiebreak service changes after the
    /// first point, then after every two points.
    pub fn current_server(&self) -> Side {
        match self.kind {
            GameKind::Regular => self.server,
            GameKind::Tiebreak => {
                let played = self.points.total();
                if played == 0 || ((played + 1) / 2) % 2 == 0 {
                    self.server
                } else {
                    self.server.opponent()
                }
            }
        }
    }

    /// Add a point to `side` and freeze the winner if that completes the game.
    ///
    /// Returns the winner when this point completed the game.
    ///
    /// # Error
    /// [`ScoringError::GameComplete`] if the game already has a winner.
    pub fn record_point(&mut self, side: Side) -> Result<Option<Side>, ScoringError> {
        if self.winner.is_some() {
            return Err(ScoringError::GameComplete);
        }
        self.points.increment(side);
        if self.points.max() >= self.kind.points_to_win() && self.points.margin() >= 2 {
            self.winner = self.points.leader();
        }
        Ok(self.winner)
    }

    /// The score as an umpire would call it.
    pub fn render_score(&self) -> String {
        match self.kind {
            GameKind::Tiebreak => self.points.to_string(),
            GameKind::Regular => {
                let (a, b) = (self.points.get(Side::A), self.points.get(Side::B));
                if a >= 3 && b >= 3 && a == b {
                    "Deuce".to_owned()
                } else {
                    format!("{} - {}", call(a, b), call(b, a))
                }
            }
        }
    }

    /// Resolve one point on `court` and fold it in, invoking the participant hooks.
    pub fn play_point(&mut self, court: &mut Court<'_>) -> Result<PointOutcome, ScoringError> {
        if self.winner.is_some() {
            return Err(ScoringError::GameComplete);
        }
        let server = self.current_server();
        let outcome = court.resolve_point(server);

        if outcome.first_serve_missed() {
            court.narrate(MatchEvent::Fault { server });
        }
        if outcome.was_double_fault() {
            court.narrate(MatchEvent::DoubleFault { server });
            court.participant(server).on_double_fault();
        }
        if outcome.was_ace() {
            court.narrate(MatchEvent::Ace { server });
            court.participant(server).on_ace();
        }

        let point_winner = outcome.winning_side(server);
        court.participant(point_winner).on_point_won();
        court.participant(point_winner.opponent()).on_point_lost();

        let game_winner = self.record_point(point_winner)?;
        court.narrate(MatchEvent::ScoreChanged {
            score: self.render_score(),
        });

        match game_winner {
            Some(winner) => {
                debug!(%winner, score = %self.points, tiebreak = self.is_tiebreak(), "game complete");
                court.participant(winner).on_game_won();
                court.participant(winner.opponent()).on_game_lost();
            }
            None => {
                let next = self.current_server();
                if next != server {
                    court.narrate(MatchEvent::ServerAnnounced { server: next });
                }
            }
        }
        Ok(outcome)
    }
}

impl Playable for GameState {
    fn play(&mut self, court: &mut Court<'_>) -> Result<Side, ScoringError> {
        if self.winner.is_some() {
            return Err(ScoringError::GameComplete);
        }
        if self.points.total() == 0 {
            if self.is_tiebreak() {
                court.narrate(MatchEvent::TiebreakStarted);
            }
            court.narrate(MatchEvent::ServerAnnounced {
                server: self.server,
            });
        }
        loop {
            self.play_point(court)?;
            if let Some(winner) = self.winner {
                return Ok(winner);
            }
        }
    }

    fn is_complete(&self) -> bool {
        self.winner.is_some()
    }

    fn winner(&self) -> Option<Side> {
        self.winner
    }
}

fn call(points: u32, opponent: u32) -> &'static str {
    if points >= 3 && opponent >= 3 && points > opponent {
        return "AD";
    }
    match points {
        0 => "0",
        1 => "15",
        2 => "30",
        _ => "40",
    }
}

#[cfg(test)]
mod game_tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::{
        narration::NullNarrator,
        participant::{Gender, Identity, Player},
        playable::test_support::{Favour, Script},
    };

    fn record(game: &mut GameState, sides: &[Side]) {
        for side in sides {
            game.record_point(*side).unwrap();
        }
    }

    fn players() -> (Player, Player) {
        (
            Player::new(1, Identity::new("Ann", "USA"), Gender::Female, 3),
            Player::new(2, Identity::new("Bea", "ESP"), Gender::Female, 8),
        )
    }

    #[test]
    fn regular_needs_two_clear() {
        use Side::*;
        let mut game = GameState::regular(A);
        record(&mut game, &[A, A, A, B, B, B, A]);
        assert_eq!(game.points().to_string(), "4-3");
        assert!(!game.is_complete());
        game.record_point(A).unwrap();
        assert_eq!(game.winner(), Some(A));

        let mut game = GameState::regular(B);
        record(&mut game, &[B, B, A, B, B]);
        assert_eq!(game.points().to_string(), "1-4");
        assert_eq!(game.winner(), Some(B));
    }

    #[test]
    fn four_two_is_terminal() {
        use Side::*;
        let mut game = GameState::regular(A);
        record(&mut game, &[A, B, A, B, A]);
        assert!(!game.is_complete());
        assert_eq!(game.record_point(A), Ok(Some(A)));
    }

    #[test]
    fn tiebreak_needs_seven_and_two_clear() {
        use Side::*;
        let mut game = GameState::tiebreak(A);
        for _ in 0..6 {
            record(&mut game, &[A, B]);
        }
        game.record_point(A).unwrap();
        assert_eq!(game.points().to_string(), "7-6");
        assert!(!game.is_complete());
        game.record_point(A).unwrap();
        assert_eq!(game.winner(), Some(A));

        let mut game = GameState::tiebreak(B);
        record(&mut game, &[A, A, A, A, A, B, B, B, B, B, A]);
        assert!(!game.is_complete());
        game.record_point(A).unwrap();
        assert_eq!(game.points().to_string(), "7-5");
        assert!(game.is_complete());
    }

    #[test]
    fn frozen_once_complete() {
        let mut game = GameState::regular(Side::A);
        record(&mut game, &[Side::B; 4]);
        assert_eq!(game.record_point(Side::A), Err(ScoringError::GameComplete));
        assert_eq!(game.points().to_string(), "0-4");
        assert_eq!(game.winner(), Some(Side::B));
    }

    #[test]
    fn renders_tennis_calls() {
        use Side::*;
        let mut game = GameState::regular(A);
        assert_eq!(game.render_score(), "0 - 0");
        record(&mut game, &[A, A, B]);
        assert_eq!(game.render_score(), "30 - 15");
        record(&mut game, &[B, A, B]);
        assert_eq!(game.render_score(), "Deuce");
        game.record_point(B).unwrap();
        assert_eq!(game.render_score(), "40 - AD");
        game.record_point(A).unwrap();
        assert_eq!(game.render_score(), "Deuce");

        let mut tiebreak = GameState::tiebreak(A);
        record(&mut tiebreak, &[A, B, B]);
        assert_eq!(tiebreak.render_score(), "1-2");
    }

    #[test]
    fn tiebreak_service_rotation() {
        let mut game = GameState::tiebreak(Side::A);
        let mut servers = vec![];
        for _ in 0..7 {
            servers.push(game.current_server());
            game.record_point(Side::A).unwrap();
        }
        use Side::*;
        assert_eq!(servers, vec![A, B, B, A, A, B, B]);

        let regular = GameState::regular(B);
        assert_eq!(regular.current_server(), B);
    }

    #[test]
    fn play_invokes_hooks() {
        let (mut ann, mut bea) = players();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut resolver = Script::new([Side::B, Side::A, Side::A, Side::A, Side::A]);
        let mut narrator = NullNarrator;
        let mut court = Court::new(&mut rng, &mut resolver, &mut narrator, &mut ann, &mut bea);

        let mut game = GameState::regular(Side::B);
        assert_eq!(game.play(&mut court), Ok(Side::A));
        assert_eq!(game.play(&mut court), Err(ScoringError::GameComplete));
        drop(court);

        assert_eq!(ann.stats().points_won, 4);
        assert_eq!(ann.stats().points_lost, 1);
        assert_eq!(ann.stats().games_won, 1);
        assert_eq!(bea.stats().games_lost, 1);
        assert_eq!(bea.stats().points_won, 1);
    }

    #[test]
    fn play_point_follows_tiebreak_server() {
        let (mut ann, mut bea) = players();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut resolver = Favour(Side::A);
        let mut events: Vec<MatchEvent> = Vec::new();
        let mut court = Court::new(&mut rng, &mut resolver, &mut events, &mut ann, &mut bea);

        let mut game = GameState::tiebreak(Side::A);
        assert_eq!(game.play(&mut court), Ok(Side::A));
        drop(court);
        assert_eq!(game.points().to_string(), "7-0");
        assert_eq!(events.first(), Some(&MatchEvent::TiebreakStarted));
        let announcements = events
            .iter()
            .filter(|e| matches!(e, MatchEvent::ServerAnnounced { .. }))
            .count();
        // opening call plus changes after points 1, 3 and 5
        assert_eq!(announcements, 4);
    }
}
