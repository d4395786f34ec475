//! Matches: sets folded into a sets tally until one side reaches the sets needed to win.
//!
//! [`MatchState`] is the pure scoring level and works on any [`Court`]. [`Match`] owns the two
//! [`Player`]s and the [`Referee`], validates the setup through [`MatchBuilder`], and applies
//! the ranking consequences exactly once when the match completes.
//!
//! Two entry points drive a match: [`Match::play`] runs every remaining set, and
//! [`Match::play_next_set`] advances by one set so a caller can observe the score in between.
//! Both may be mixed freely; once complete, further calls do nothing and report the winner.

use std::fmt;

use rand::{Rng, RngCore};
use tracing::{info, instrument};

use crate::{
    configuration::ScoringRules,
    error::{ScoringError, SetupError},
    narration::{MatchEvent, Narrator},
    participant::{Gender, Player, Referee},
    playable::{Court, Playable},
    rally::PointResolver,
    set::SetState,
    side::{Side, Tally},
};

/// Competition category, which fixes the match format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Best of five sets.
    MensSingles,
    /// Best of three sets.
    WomensSingles,
}

impl Category {
    pub fn sets_to_win(self) -> u32 {
        match self {
            Category::MensSingles => 3,
            Category::WomensSingles => 2,
        }
    }

    pub fn best_of(self) -> u32 {
        self.sets_to_win() * 2 - 1
    }

    pub fn required_gender(self) -> Gender {
        match self {
            Category::MensSingles => Gender::Male,
            Category::WomensSingles => Gender::Female,
        }
    }

    /// Whether `player` may be entered in this category: right gender, ranking of at least 1.
    pub fn check_entrant(self, player: &Player) -> Result<(), SetupError> {
        if player.gender != self.required_gender() {
            return Err(SetupError::CategoryMismatch {
                category: self,
                expected: match self.required_gender() {
                    Gender::Male => "male",
                    Gender::Female => "female",
                },
                name: player.name().to_owned(),
            });
        }
        if player.ranking() == 0 {
            return Err(SetupError::InvalidRanking {
                name: player.name().to_owned(),
                ranking: player.ranking(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::MensSingles => write!(f, "men's singles"),
            Category::WomensSingles => write!(f, "women's singles"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    NotStarted,
    InProgress,
    Complete,
}

/// What a call to `play_next_set` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchProgress {
    /// A set was played and the match goes on.
    InProgress { sets: Tally },
    /// A set was played and it ended the match; finalization ran.
    Completed { winner: Side, sets: Tally },
    /// Nothing was played: the match was already over.
    AlreadyComplete { winner: Side },
}

impl MatchProgress {
    pub fn is_complete(&self) -> bool {
        !matches!(self, MatchProgress::InProgress { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    category: Category,
    rules: ScoringRules,
    first_server: Side,
    starting_server_of_current_set: Side,
    sets: Tally,
    completed_sets: Vec<SetState>,
    winner: Option<Side>,
    finalized: bool,
}

impl MatchState {
    pub fn new(category: Category, first_server: Side, rules: ScoringRules) -> Self {
        Self {
            category,
            rules,
            first_server,
            starting_server_of_current_set: first_server,
            sets: Tally::default(),
            completed_sets: vec![],
            winner: None,
            finalized: false,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Server of the first game of the first set.
    pub fn first_server(&self) -> Side {
        self.first_server
    }

    /// Server of the first game of the set to be played next.
    pub fn starting_server_of_current_set(&self) -> Side {
        self.starting_server_of_current_set
    }

    /// Sets won per side.
    pub fn sets(&self) -> Tally {
        self.sets
    }

    pub fn completed_sets(&self) -> &[SetState] {
        &self.completed_sets
    }

    pub fn loser(&self) -> Option<Side> {
        self.winner.map(Side::opponent)
    }

    pub fn status(&self) -> MatchStatus {
        if self.winner.is_some() {
            MatchStatus::Complete
        } else if self.completed_sets.is_empty() {
            MatchStatus::NotStarted
        } else {
            MatchStatus::InProgress
        }
    }

    /// The next set is deciding when both sides are one set away from winning.
    pub fn next_set_is_deciding(&self) -> bool {
        let one_away = self.category.sets_to_win() - 1;
        self.sets.get(Side::A) == one_away && self.sets.get(Side::B) == one_away
    }

    /// A fresh set, numbered and flagged for the current score.
    pub fn next_set(&self) -> SetState {
        SetState::new(
            self.completed_sets.len() + 1,
            self.starting_server_of_current_set,
            self.next_set_is_deciding(),
            &self.rules,
        )
    }

    /// Fold a completed set into the match.
    ///
    /// Returns the match winner when this set completed the match. The starting server of the
    /// next set is the opponent of this set's starting server, whoever served last in it.
    ///
    /// # Error
    /// The match is already complete, or the set has no winner.
    pub fn record_set(&mut self, set: SetState) -> Result<Option<Side>, ScoringError> {
        if self.winner.is_some() {
            return Err(ScoringError::MatchComplete);
        }
        let set_winner = set.winner().ok_or(ScoringError::MissingWinner("set"))?;

        self.sets.increment(set_winner);
        self.completed_sets.push(set);
        if self.sets.get(set_winner) == self.category.sets_to_win() {
            self.winner = Some(set_winner);
        } else {
            self.starting_server_of_current_set = self.starting_server_of_current_set.opponent();
        }
        Ok(self.winner)
    }

    /// Play one set on `court`. A no-op when the match is already complete.
    pub fn play_next_set(&mut self, court: &mut Court<'_>) -> Result<MatchProgress, ScoringError> {
        if let Some(winner) = self.winner {
            return Ok(MatchProgress::AlreadyComplete { winner });
        }
        if self.completed_sets.is_empty() {
            court.narrate(MatchEvent::MatchStarted);
        }

        let mut set = self.next_set();
        court.narrate(MatchEvent::SetStarted {
            number: set.number(),
            deciding: set.is_deciding(),
        });
        set.play(court)?;

        match self.record_set(set)? {
            Some(winner) => {
                self.finalize(court, winner);
                Ok(MatchProgress::Completed {
                    winner,
                    sets: self.sets,
                })
            }
            None => Ok(MatchProgress::InProgress { sets: self.sets }),
        }
    }

    fn finalize(&mut self, court: &mut Court<'_>, winner: Side) {
        if self.finalized {
            return;
        }
        self.finalized = true;
        info!(%winner, sets = %self.sets, "match complete");
        court.participant(winner).on_match_won();
        court.participant(winner.opponent()).on_match_lost();
        court.narrate(MatchEvent::MatchWon {
            winner,
            sets: self.sets,
        });
    }

    /// Set scores in order, e.g. `"6-4 3-6 7-6"`.
    pub fn score_line(&self) -> String {
        self.completed_sets
            .iter()
            .map(|set| set.games().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Playable for MatchState {
    fn play(&mut self, court: &mut Court<'_>) -> Result<Side, ScoringError> {
        loop {
            match self.play_next_set(court)? {
                MatchProgress::InProgress { .. } => continue,
                MatchProgress::Completed { winner, .. }
                | MatchProgress::AlreadyComplete { winner } => return Ok(winner),
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

/// A builder validating everything a [`Match`] needs before any point is played.
///
/// # Examples
///
/// ```
/// use tennis_sim::prelude::*;
///
/// let roger = Player::new(1, Identity::new("Roger", "SUI"), Gender::Male, 3);
/// let rafa = Player::new(2, Identity::new("Rafael", "ESP"), Gender::Male, 2);
/// let umpire = Referee::new(Identity::new("Carlos", "POR"));
///
/// let tennis_match = MatchBuilder::new()
///     .with_players(roger, rafa)
///     .with_referee(umpire)
///     .with_category(Category::MensSingles)
///     .with_first_server(2)
///     .with_level("Final")
///     .with_ranking_points(1200)
///     .build()
///     .unwrap();
/// assert_eq!(tennis_match.state().first_server(), Side::B);
/// ```
#[derive(Debug, Default)]
pub struct MatchBuilder {
    player_a: Option<Player>,
    player_b: Option<Player>,
    referee: Option<Referee>,
    category: Option<Category>,
    first_server_id: Option<u32>,
    toss: Option<Side>,
    level: Option<String>,
    ranking_points: i64,
    rules: ScoringRules,
}

impl MatchBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Side A and side B, in that order.
    pub fn with_players(mut self, side_a: Player, side_b: Player) -> Self {
        self.player_a = Some(side_a);
        self.player_b = Some(side_b);
        self
    }

    pub fn with_player_a(mut self, player: Player) -> Self {
        self.player_a = Some(player);
        self
    }

    pub fn with_player_b(mut self, player: Player) -> Self {
        self.player_b = Some(player);
        self
    }

    pub fn with_referee(mut self, referee: Referee) -> Self {
        self.referee = Some(referee);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Id of the player serving first. Must be one of the two players.
    pub fn with_first_server(mut self, player_id: u32) -> Self {
        self.first_server_id = Some(player_id);
        self
    }

    /// Draw the first server from `rng`. Ignored when a first server id is given.
    pub fn with_coin_toss<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        self.toss = Some(if rng.gen::<bool>() { Side::A } else { Side::B });
        self
    }

    /// Round name, e.g. `"Quarterfinals"`.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Ranking points credited to the winner.
    pub fn with_ranking_points(mut self, points: i64) -> Self {
        self.ranking_points = points;
        self
    }

    pub fn with_rules(mut self, rules: ScoringRules) -> Self {
        self.rules = rules;
        self
    }

    /// Validate and build the match. Without a level the match is named `"Exhibition"`.
    /// Without a first server or coin toss, side A serves first.
    ///
    /// # Errors
    /// Any missing participant or category, a player entered twice, a first server who is not
    /// playing, a player of the wrong gender for the category, a ranking of 0, negative ranking
    /// points, or a blank level.
    pub fn build(self) -> Result<Match, SetupError> {
        let player_a = self.player_a.ok_or(SetupError::MissingPlayer("side A"))?;
        let player_b = self.player_b.ok_or(SetupError::MissingPlayer("side B"))?;
        let referee = self.referee.ok_or(SetupError::MissingReferee)?;
        let category = self.category.ok_or(SetupError::MissingCategory)?;

        if player_a.id == player_b.id {
            return Err(SetupError::SamePlayer {
                name: player_a.name().to_owned(),
            });
        }

        for player in [&player_a, &player_b] {
            category.check_entrant(player)?;
        }

        if self.ranking_points < 0 {
            return Err(SetupError::NegativeRankingPoints(self.ranking_points));
        }

        let level = self.level.unwrap_or_else(|| "Exhibition".to_owned());
        if level.trim().is_empty() {
            return Err(SetupError::EmptyLevel);
        }

        let first_server = match self.first_server_id {
            Some(id) if id == player_a.id => Side::A,
            Some(id) if id == player_b.id => Side::B,
            Some(id) => return Err(SetupError::ServerNotInMatch { id }),
            None => self.toss.unwrap_or(Side::A),
        };

        Ok(Match {
            players: [player_a, player_b],
            referee,
            level,
            ranking_points: self.ranking_points.unsigned_abs(),
            state: MatchState::new(category, first_server, self.rules),
        })
    }
}

/// A fully set up match between two players.
#[derive(Debug, Clone)]
pub struct Match {
    players: [Player; 2],
    referee: Referee,
    level: String,
    ranking_points: u64,
    state: MatchState,
}

impl Match {
    /// Advance by exactly one set.
    ///
    /// When the set ends the match, rankings are updated, the winner is credited the round's
    /// ranking points and the referee's officiated count goes up. After that every call is a
    /// no-op returning [`MatchProgress::AlreadyComplete`].
    pub fn play_next_set(
        &mut self,
        rng: &mut dyn RngCore,
        resolver: &mut dyn PointResolver,
        narrator: &mut dyn Narrator,
    ) -> Result<MatchProgress, ScoringError> {
        let progress = {
            let [side_a, side_b] = &mut self.players;
            let mut court = Court::new(rng, resolver, narrator, side_a, side_b);
            self.state.play_next_set(&mut court)?
        };
        if let MatchProgress::Completed { winner, .. } = progress {
            self.apply_result(winner);
        }
        Ok(progress)
    }

    /// Play every remaining set and return the winner.
    #[instrument(skip_all, fields(level = %self.level, category = %self.state.category()))]
    pub fn play(
        &mut self,
        rng: &mut dyn RngCore,
        resolver: &mut dyn PointResolver,
        narrator: &mut dyn Narrator,
    ) -> Result<Side, ScoringError> {
        loop {
            match self.play_next_set(rng, resolver, narrator)? {
                MatchProgress::InProgress { .. } => continue,
                MatchProgress::Completed { winner, .. }
                | MatchProgress::AlreadyComplete { winner } => return Ok(winner),
            }
        }
    }

    fn apply_result(&mut self, winner: Side) {
        let winner_ranking = self.player(winner).ranking();
        let loser_ranking = self.player(winner.opponent()).ranking();
        let points = self.ranking_points;

        let winning = &mut self.players[winner.index()];
        winning.update_ranking(true, loser_ranking);
        winning.award_ranking_points(points);
        self.players[winner.opponent().index()].update_ranking(false, winner_ranking);
        self.referee.record_match_officiated();
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Give the players and the referee back, e.g. to enter them in the next round.
    pub fn into_parts(self) -> ([Player; 2], Referee) {
        (self.players, self.referee)
    }

    pub fn referee(&self) -> &Referee {
        &self.referee
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn ranking_points(&self) -> u64 {
        self.ranking_points
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// Set scores in order, side A first.
    pub fn score_line(&self) -> String {
        self.state.score_line()
    }

    pub fn winner(&self) -> Option<&Player> {
        self.state.winner().map(|side| self.player(side))
    }

    pub fn loser(&self) -> Option<&Player> {
        self.state.loser().map(|side| self.player(side))
    }

    /// Multi-line summary of the match.
    pub fn summary(&self) -> String {
        let sets = self.state.sets();
        let mut out = format!(
            "{} ({}), {} vs {}\nSets: {}\n",
            self.level,
            self.state.category(),
            self.players[0].name(),
            self.players[1].name(),
            sets
        );
        for set in self.state.completed_sets() {
            out.push_str(&format!("Set {}: {}\n", set.number(), set.games()));
        }
        match self.winner() {
            Some(winner) => out.push_str(&format!("Winner: {}", winner.identity)),
            None => out.push_str("In progress"),
        }
        out
    }
}
