use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tennis_sim::prelude::*;

/// Every point goes to one side, whoever serves.
struct Favour(Side);

impl PointResolver for Favour {
    fn resolve(&mut self, server: Side, _rng: &mut dyn RngCore) -> PointOutcome {
        let role = if server == self.0 {
            Role::Server
        } else {
            Role::Receiver
        };
        PointOutcome::rally(role, 5, false)
    }
}

/// The server wins every point.
struct AlwaysServer;

impl PointResolver for AlwaysServer {
    fn resolve(&mut self, _server: Side, _rng: &mut dyn RngCore) -> PointOutcome {
        PointOutcome::rally(Role::Server, 3, false)
    }
}

/// Every serve is a double fault.
struct AlwaysDoubleFault;

impl PointResolver for AlwaysDoubleFault {
    fn resolve(&mut self, _server: Side, _rng: &mut dyn RngCore) -> PointOutcome {
        PointOutcome::double_fault()
    }
}

fn men() -> (Player, Player) {
    (
        Player::new(1, Identity::new("Carlos", "ESP"), Gender::Male, 2),
        Player::new(2, Identity::new("Jannik", "ITA"), Gender::Male, 1),
    )
}

fn women() -> (Player, Player) {
    (
        Player::new(10, Identity::new("Iga", "POL"), Gender::Female, 1),
        Player::new(11, Identity::new("Coco", "USA"), Gender::Female, 3),
    )
}

fn build(category: Category, seed_toss: Option<&mut ChaCha8Rng>) -> Match {
    let (a, b) = match category {
        Category::MensSingles => men(),
        Category::WomensSingles => women(),
    };
    let first = a.id;
    let builder = MatchBuilder::new()
        .with_players(a, b)
        .with_referee(Referee::new(Identity::new("Eva", "SWE")))
        .with_category(category);
    match seed_toss {
        Some(rng) => builder.with_coin_toss(rng),
        None => builder.with_first_server(first),
    }
    .build()
    .unwrap()
}

#[test]
fn side_a_taking_every_point_wins_in_straight_bagels() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events: Vec<MatchEvent> = Vec::new();
    let mut m = build(Category::MensSingles, None);
    assert_eq!(m.state().first_server(), Side::A);

    let winner = m.play(&mut rng, &mut Favour(Side::A), &mut events).unwrap();
    assert_eq!(winner, Side::A);
    assert_eq!(m.state().sets().to_string(), "3-0");
    assert_eq!(m.state().score_line(), "6-0 6-0 6-0");
    for set in m.state().completed_sets() {
        assert!(set
            .completed_games()
            .iter()
            .all(|g| g.points().to_string() == "4-0"));
    }

    let stats = m.player(Side::A).stats();
    assert_eq!(stats.games_won, 18);
    assert_eq!(stats.games_lost, 0);
    assert_eq!(stats.sets_won, 3);
    assert_eq!(stats.matches_won, 1);
    assert_eq!(m.player(Side::B).stats().points_won, 0);

    let finals = events
        .iter()
        .filter(|e| matches!(e, MatchEvent::MatchWon { .. }))
        .count();
    assert_eq!(finals, 1);
}

#[test]
fn double_fault_goes_to_receiver() {
    let outcome = AlwaysDoubleFault.resolve(Side::A, &mut ChaCha8Rng::seed_from_u64(0));
    assert_eq!(outcome.winning_side(Side::A), Side::B);
    assert_eq!(outcome.shot_count(), 0);
    assert!(outcome.was_double_fault());
    assert!(!outcome.was_ace());

    let (mut server, mut receiver) = men();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut resolver = AlwaysDoubleFault;
    let mut narrator = NullNarrator;
    let mut court = Court::new(
        &mut rng,
        &mut resolver,
        &mut narrator,
        &mut server,
        &mut receiver,
    );
    let mut game = GameState::regular(Side::A);
    let outcome = game.play_point(&mut court).unwrap();
    drop(court);

    assert_eq!(outcome.shot_count(), 0);
    assert_eq!(game.points().get(Side::B), 1);
    assert_eq!(server.stats().double_faults, 1);
    assert_eq!(server.stats().points_lost, 1);
    assert_eq!(receiver.stats().points_won, 1);
}

#[test]
fn six_all_in_first_women_set_brings_a_tiebreak() {
    let state = MatchState::new(Category::WomensSingles, Side::A, ScoringRules::default());
    let mut set = state.next_set();
    assert!(!set.is_deciding());

    for _ in 0..6 {
        for side in Side::BOTH {
            let mut game = set.next_game();
            assert_eq!(game.kind(), GameKind::Regular);
            while !game.is_complete() {
                game.record_point(side).unwrap();
            }
            set.record_game(game).unwrap();
        }
    }
    assert_eq!(set.games().to_string(), "6-6");
    assert!(!set.is_complete());
    let next = set.next_game();
    assert!(next.is_tiebreak());
    assert_eq!(next.kind(), GameKind::Tiebreak);
}

#[test]
fn holding_every_serve_reaches_a_tiebreak() {
    let (mut a, mut b) = women();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut resolver = AlwaysServer;
    let mut narrator = NullNarrator;
    let mut court = Court::new(&mut rng, &mut resolver, &mut narrator, &mut a, &mut b);

    let mut set = SetState::new(1, Side::A, false, &ScoringRules::default());
    for _ in 0..12 {
        let game = set.play_game(&mut court).unwrap();
        assert_eq!(game.winner(), Some(game.server()));
        assert_eq!(game.points().max(), 4);
        assert_eq!(game.points().total(), 4);
    }
    drop(court);

    assert_eq!(set.games().to_string(), "6-6");
    assert!(set.next_game().is_tiebreak());
    assert_eq!(a.stats().games_won, 6);
    assert_eq!(b.stats().games_won, 6);
}

#[test]
fn same_seed_same_match() {
    let run = |seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut m = build(Category::MensSingles, Some(&mut rng));
        m.play(&mut rng, &mut RallyResolver::default(), &mut NullNarrator)
            .unwrap();
        (m.score_line(), *m.player(Side::A).stats())
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn seeded_matches_respect_set_rules() {
    for seed in 0..40 {
        for category in [Category::MensSingles, Category::WomensSingles] {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut m = build(category, Some(&mut rng));
            let winner = m
                .play(&mut rng, &mut RallyResolver::default(), &mut NullNarrator)
                .unwrap();
            let state = m.state();

            assert_eq!(state.sets().get(winner), category.sets_to_win());
            assert!(state.sets().get(winner.opponent()) < category.sets_to_win());
            assert_eq!(m.player(winner).stats().matches_won, 1);

            let mut previous_starter = None;
            for set in state.completed_sets() {
                let games = set.games();
                let set_winner = set.winner().unwrap();
                let tiebreaks = set
                    .completed_games()
                    .iter()
                    .filter(|g| g.is_tiebreak())
                    .count();

                if set.is_deciding() {
                    assert_eq!(tiebreaks, 0, "seed {seed}: tiebreak in deciding set");
                    assert!(games.margin() >= 2, "seed {seed}: deciding set {games}");
                } else if games.is_either(7, 6) {
                    assert_eq!(tiebreaks, 1, "seed {seed}: 7-6 without tiebreak");
                    assert!(set.completed_games().last().unwrap().is_tiebreak());
                } else {
                    assert_eq!(tiebreaks, 0);
                    assert!(games.margin() >= 2);
                    assert!(games.max() <= 7);
                }
                assert!(games.get(set_winner) >= 6);

                if let Some(previous) = previous_starter {
                    assert_ne!(set.starting_server(), previous);
                }
                previous_starter = Some(set.starting_server());
            }
        }
    }
}

#[test]
fn stepping_a_finished_match_changes_nothing() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut m = build(Category::WomensSingles, None);
    let winner = m
        .play(&mut rng, &mut RallyResolver::default(), &mut NullNarrator)
        .unwrap();
    let before = (m.state().clone(), *m.player(winner).stats(), m.player(winner).ranking());

    let progress = m
        .play_next_set(&mut rng, &mut RallyResolver::default(), &mut NullNarrator)
        .unwrap();
    assert_eq!(progress, MatchProgress::AlreadyComplete { winner });
    assert_eq!(
        before,
        (m.state().clone(), *m.player(winner).stats(), m.player(winner).ranking())
    );
    assert_eq!(m.referee().matches_officiated(), 1);
}

#[test]
fn knockout_draw_from_seed() {
    let players = (1..=16)
        .map(|id| Player::new(id, Identity::new(format!("P{id}"), "FRA"), Gender::Male, id))
        .collect();
    let referees = vec![Referee::new(Identity::new("Ref", "BEL"))];
    let mut draw = KnockoutTournament::new(Category::MensSingles, players, referees).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    let champion = draw
        .play_all(&mut rng, &mut RallyResolver::default(), &mut NullNarrator)
        .unwrap()
        .id;

    let names: Vec<_> = draw.history().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Round of 16", "Quarterfinals", "Semifinals", "Final"]);
    assert_eq!(draw.referees()[0].matches_officiated(), 15);
    assert_eq!(draw.history()[3].matches.len(), 1);
    assert_eq!(draw.champion().map(|p| p.id), Some(champion));
}
