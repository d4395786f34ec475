//! A set: games folded into a games tally until one side has won it.

use tracing::info;

use crate::{
    configuration::ScoringRules,
    error::ScoringError,
    game::{GameKind, GameState},
    narration::MatchEvent,
    playable::{Court, Playable},
    side::{Side, Tally},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetState {
    number: usize,
    deciding: bool,
    tiebreak_at: Option<u32>,
    starting_server: Side,
    next_server: Side,
    games: Tally,
    completed_games: Vec<GameState>,
    winner: Option<Side>,
}

impl SetState {
    /// Set number `number` (1-based) of a match, first served by `starting_server`.
    pub fn new(number: usize, starting_server: Side, deciding: bool, rules: &ScoringRules) -> Self {
        Self {
            number,
            deciding,
            tiebreak_at: rules.tiebreak_at(deciding),
            starting_server,
            next_server: starting_server,
            games: Tally::default(),
            completed_games: vec![],
            winner: None,
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn is_deciding(&self) -> bool {
        self.deciding
    }

    pub fn starting_server(&self) -> Side {
        self.starting_server
    }

    /// Who serves the next game.
    pub fn next_server(&self) -> Side {
        self.next_server
    }

    pub fn games(&self) -> Tally {
        self.games
    }

    pub fn completed_games(&self) -> &[GameState] {
        &self.completed_games
    }

    /// Flavor of the next game: a tiebreak exactly when the games are level at the tiebreak
    /// threshold. The deciding set has no threshold unless the rules give it one.
    pub fn next_game_kind(&self) -> GameKind {
        match self.tiebreak_at {
            Some(at) if self.games.get(Side::A) == at && self.games.get(Side::B) == at => {
                GameKind::Tiebreak
            }
            _ => GameKind::Regular,
        }
    }

    /// A fresh game of the right flavor, served by [`next_server`](Self::next_server).
    pub fn next_game(&self) -> GameState {
        GameState::new(self.next_game_kind(), self.next_server)
    }

    /// Fold a completed game into the set.
    ///
    /// Returns the set winner when this game completed the set.
    ///
    /// # Error
    /// The set is already complete, or the game has no winner.
    pub fn record_game(&mut self, game: GameState) -> Result<Option<Side>, ScoringError> {
        if self.winner.is_some() {
            return Err(ScoringError::SetComplete);
        }
        let game_winner = game.winner().ok_or(ScoringError::MissingWinner("game"))?;

        self.games.increment(game_winner);
        self.completed_games.push(game);
        self.winner = set_winner(&self.games, self.tiebreak_at);
        if self.winner.is_none() {
            self.next_server = self.next_server.opponent();
        }
        Ok(self.winner)
    }

    /// Play the next game on `court` and fold it in.
    pub fn play_game(&mut self, court: &mut Court<'_>) -> Result<&GameState, ScoringError> {
        if self.winner.is_some() {
            return Err(ScoringError::SetComplete);
        }
        let mut game = self.next_game();
        let game_winner = game.play(court)?;
        let completed = self.record_game(game)?;

        court.narrate(MatchEvent::GameWon {
            winner: game_winner,
            games: self.games,
        });
        if let Some(winner) = completed {
            info!(set = self.number, %winner, games = %self.games, "set complete");
            court.participant(winner).on_set_won();
            court.participant(winner.opponent()).on_set_lost();
            court.narrate(MatchEvent::SetWon {
                winner,
                number: self.number,
                games: self.games,
            });
        }

        self.completed_games
            .last()
            .ok_or(ScoringError::MissingWinner("game"))
    }
}

impl Playable for SetState {
    fn play(&mut self, court: &mut Court<'_>) -> Result<Side, ScoringError> {
        if self.winner.is_some() {
            return Err(ScoringError::SetComplete);
        }
        loop {
            self.play_game(court)?;
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

/// A set with a tiebreak at `t`-`t` is won `t+1`-`t` by that tiebreak. Any set is otherwise won
/// with at least 6 games and a 2-game lead, so a set without a tiebreak runs on from 6-6 until
/// someone is two games clear.
fn set_winner(games: &Tally, tiebreak_at: Option<u32>) -> Option<Side> {
    if let Some(at) = tiebreak_at {
        if games.is_either(at + 1, at) {
            return games.leader();
        }
    }
    if games.max() >= 6 && games.margin() >= 2 {
        games.leader()
    } else {
        None
    }
}
