//! Single elimination draws.
//!
//! A [`KnockoutTournament`] takes a draw of 2^k players of one category, pairs neighbours in
//! draw order, plays each pairing as a [`Match`], and carries the winners into the next round
//! until one champion is left. Every match draws from the same caller-owned random stream.
//!
//! Rounds are named from the end of the draw ("Final", "Semifinals", "Quarterfinals",
//! "Round of 16", then "First Round", "Second Round"... for earlier ones) and the ranking points
//! awarded per round grow towards the final.

use std::collections::HashSet;

use anyhow::{bail, Context};
use rand::RngCore;
use tracing::{info, instrument};

use crate::{
    configuration::ScoringRules,
    error::SetupError,
    match_state::{Category, Match, MatchBuilder},
    narration::Narrator,
    participant::{Player, Referee},
    rally::PointResolver,
    side::Side,
};

/// Ranking points for winning a match in each round, the last entry being the final.
pub const POINTS_PER_ROUND: [i64; 7] = [10, 45, 90, 180, 360, 720, 1200];

/// Outcome of one played match, kept after the players moved on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub winner: String,
    pub loser: String,
    /// Set scores from the winner's side of the net, e.g. `"6-4 3-6 6-2"`.
    pub score_line: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRecord {
    pub name: String,
    pub ranking_points: i64,
    pub matches: Vec<MatchRecord>,
}

/// What a call to [`KnockoutTournament::play_round`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundProgress {
    /// A round was played; `remaining` players are still in the draw.
    Played { round: String, remaining: usize },
    /// Nothing was played: there is already a champion.
    Finished,
}

pub struct KnockoutTournament {
    category: Category,
    rules: ScoringRules,
    round: usize,
    total_rounds: usize,
    draw: Vec<Player>,
    eliminated: Vec<Player>,
    referees: Vec<Referee>,
    next_referee: usize,
    history: Vec<RoundRecord>,
}

impl KnockoutTournament {
    /// Create a draw. Players are paired in the given order: 1 v 2, 3 v 4...
    ///
    /// # Errors
    /// The number of players is not a power of two of at least 2, no referee is given, a player
    /// is entered twice, or a player cannot be entered in `category`.
    pub fn new(
        category: Category,
        players: Vec<Player>,
        referees: Vec<Referee>,
    ) -> Result<Self, SetupError> {
        let n = players.len();
        if n < 2 || !n.is_power_of_two() {
            return Err(SetupError::InvalidDrawSize(n));
        }
        if referees.is_empty() {
            return Err(SetupError::MissingReferee);
        }
        let mut ids = HashSet::with_capacity(n);
        for player in &players {
            category.check_entrant(player)?;
            if !ids.insert(player.id) {
                return Err(SetupError::DuplicateEntrant {
                    name: player.name().to_owned(),
                    id: player.id,
                });
            }
        }
        let total_rounds = n.trailing_zeros() as usize;
        info!(players = n, rounds = total_rounds, %category, "knockout draw");
        Ok(Self {
            category,
            rules: ScoringRules::default(),
            round: 0,
            total_rounds,
            draw: players,
            eliminated: vec![],
            referees,
            next_referee: 0,
            history: vec![],
        })
    }

    pub fn with_rules(mut self, rules: ScoringRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn total_rounds(&self) -> usize {
        self.total_rounds
    }

    /// Name of the round with 0-based index `round`.
    pub fn round_name(&self, round: usize) -> String {
        match self.total_rounds.saturating_sub(round + 1) {
            0 => "Final".to_owned(),
            1 => "Semifinals".to_owned(),
            2 => "Quarterfinals".to_owned(),
            3 => "Round of 16".to_owned(),
            _ => format!("{} Round", ordinal(round + 1)),
        }
    }

    /// Ranking points for winning a match in round `round`, `None` past the final.
    pub fn round_points(&self, round: usize) -> Option<i64> {
        if round >= self.total_rounds {
            return None;
        }
        let from_end = self.total_rounds - round;
        POINTS_PER_ROUND
            .get(POINTS_PER_ROUND.len().saturating_sub(from_end))
            .copied()
    }

    /// Name of the next round to play, `None` once there is a champion.
    pub fn current_round(&self) -> Option<String> {
        (!self.is_finished()).then(|| self.round_name(self.round))
    }

    pub fn is_finished(&self) -> bool {
        self.draw.len() == 1
    }

    pub fn champion(&self) -> Option<&Player> {
        if self.is_finished() {
            self.draw.first()
        } else {
            None
        }
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    /// Players still in the draw.
    pub fn remaining(&self) -> &[Player] {
        &self.draw
    }

    /// Every player, still in the draw or not.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.draw.iter().chain(self.eliminated.iter())
    }

    pub fn referees(&self) -> &[Referee] {
        &self.referees
    }

    fn build_match(
        &self,
        side_a: Player,
        side_b: Player,
        referee: usize,
        ranking_points: i64,
        rng: &mut dyn RngCore,
    ) -> Result<Match, SetupError> {
        MatchBuilder::new()
            .with_players(side_a, side_b)
            .with_referee(self.referees[referee].clone())
            .with_category(self.category)
            .with_coin_toss(rng)
            .with_level(self.round_name(self.round))
            .with_ranking_points(ranking_points)
            .with_rules(self.rules)
            .build()
    }

    /// Play every match of the current round and pair the winners for the next one.
    ///
    /// All pairings are set up before the first point is played, and the draw only moves on once
    /// every match of the round is over: on error the draw is left as it was.
    #[instrument(skip_all, fields(round = self.round))]
    pub fn play_round(
        &mut self,
        rng: &mut dyn RngCore,
        resolver: &mut dyn PointResolver,
        narrator: &mut dyn Narrator,
    ) -> anyhow::Result<RoundProgress> {
        if self.is_finished() {
            return Ok(RoundProgress::Finished);
        }

        let name = self.round_name(self.round);
        let ranking_points = self
            .round_points(self.round)
            .with_context(|| {
                format!("{name} is past the final of a {}-round draw", self.total_rounds)
            })?;

        let mut pairings = Vec::with_capacity(self.draw.len() / 2);
        for (offset, pair) in self.draw.chunks(2).enumerate() {
            let [side_a, side_b] = pair else {
                bail!("{name}: {} has no opponent", pair[0].name());
            };
            let referee = (self.next_referee + offset) % self.referees.len();
            let tennis_match = self
                .build_match(side_a.clone(), side_b.clone(), referee, ranking_points, rng)
                .with_context(|| {
                    format!("setting up {} vs {} ({name})", side_a.name(), side_b.name())
                })?;
            pairings.push((referee, tennis_match));
        }

        let mut played = Vec::with_capacity(pairings.len());
        for (referee, mut tennis_match) in pairings {
            let winner = tennis_match.play(rng, resolver, narrator).with_context(|| {
                format!(
                    "playing {} vs {} ({name})",
                    tennis_match.player(Side::A).name(),
                    tennis_match.player(Side::B).name()
                )
            })?;
            played.push((referee, winner, tennis_match));
        }

        let mut winners = Vec::with_capacity(played.len());
        let mut matches = Vec::with_capacity(played.len());
        for (referee, winner, tennis_match) in played {
            let score_line = winner_view(&tennis_match, winner);
            let ([a, b], _) = tennis_match.into_parts();
            let (won, lost) = match winner {
                Side::A => (a, b),
                Side::B => (b, a),
            };
            info!("{name}: {} def. {} {score_line}", won.name(), lost.name());
            matches.push(MatchRecord {
                winner: won.name().to_owned(),
                loser: lost.name().to_owned(),
                score_line,
            });
            self.referees[referee].record_match_officiated();
            winners.push(won);
            self.eliminated.push(lost);
        }

        self.next_referee = (self.next_referee + matches.len()) % self.referees.len();
        self.draw = winners;
        self.history.push(RoundRecord {
            name: name.clone(),
            ranking_points,
            matches,
        });
        self.round += 1;
        Ok(RoundProgress::Played {
            round: name,
            remaining: self.draw.len(),
        })
    }

    /// Play every remaining round and return the champion.
    pub fn play_all(
        &mut self,
        rng: &mut dyn RngCore,
        resolver: &mut dyn PointResolver,
        narrator: &mut dyn Narrator,
    ) -> anyhow::Result<&Player> {
        while self.play_round(rng, resolver, narrator)? != RoundProgress::Finished {}
        self.champion()
            .context("knockout finished without a champion")
    }
}

/// Set scores with the winner's games first.
fn winner_view(tennis_match: &Match, winner: Side) -> String {
    tennis_match
        .state()
        .completed_sets()
        .iter()
        .map(|set| {
            let games = set.games();
            format!("{}-{}", games.get(winner), games.get(winner.opponent()))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn ordinal(n: usize) -> &'static str {
    match n {
        1 => "First",
        2 => "Second",
        3 => "Third",
        4 => "Fourth",
        5 => "Fifth",
        6 => "Sixth",
        _ => "Early",
    }
}
