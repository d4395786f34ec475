use std::env;

use anyhow::{bail, Context};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tennis_sim::{logger::init_logger, prelude::*};
use tracing::info;

const MEN: [(&str, &str, u32); 8] = [
    ("Rafael Nadal", "ESP", 2),
    ("Roger Federer", "SUI", 3),
    ("Novak Djokovic", "SRB", 1),
    ("Andy Murray", "GBR", 4),
    ("Stan Wawrinka", "SUI", 9),
    ("Juan Martin del Potro", "ARG", 7),
    ("Dominic Thiem", "AUT", 8),
    ("Marin Cilic", "CRO", 6),
];

const WOMEN: [(&str, &str, u32); 8] = [
    ("Serena Williams", "USA", 1),
    ("Maria Sharapova", "RUS", 5),
    ("Simona Halep", "ROU", 2),
    ("Petra Kvitova", "CZE", 6),
    ("Angelique Kerber", "GER", 3),
    ("Garbine Muguruza", "ESP", 4),
    ("Naomi Osaka", "JPN", 7),
    ("Caroline Wozniacki", "DEN", 8),
];

const UMPIRES: [(&str, &str); 3] = [
    ("Carlos Ramos", "POR"),
    ("Mohamed Lahyani", "SWE"),
    ("Alison Hughes", "GBR"),
];

fn roster(category: Category) -> Vec<Player> {
    let (entries, gender) = match category {
        Category::MensSingles => (MEN, Gender::Male),
        Category::WomensSingles => (WOMEN, Gender::Female),
    };
    entries
        .iter()
        .zip(1..)
        .map(|((name, nationality, ranking), id)| {
            Player::new(id, Identity::new(*name, *nationality), gender, *ranking)
        })
        .collect()
}

fn umpires() -> Vec<Referee> {
    UMPIRES
        .iter()
        .map(|(name, nationality)| Referee::new(Identity::new(*name, *nationality)))
        .collect()
}

fn play_match(
    category: Category,
    config: &Configuration,
    rng: &mut ChaCha8Rng,
) -> anyhow::Result<()> {
    let mut players = roster(category).into_iter();
    let (Some(side_a), Some(side_b)) = (players.next(), players.next()) else {
        bail!("roster needs two players");
    };
    let umpire = umpires()
        .into_iter()
        .next()
        .context("no umpire available")?;

    let mut narrator: Box<dyn Narrator> = if config.verbose() {
        Box::new(ConsoleNarrator::new(
            umpire.identity.name.clone(),
            side_a.name(),
            side_b.name(),
        ))
    } else {
        Box::new(TracingNarrator)
    };

    let mut tennis_match = MatchBuilder::new()
        .with_players(side_a, side_b)
        .with_referee(umpire)
        .with_category(category)
        .with_coin_toss(rng)
        .with_level("Final")
        .with_ranking_points(1200)
        .with_rules(config.scoring_rules()?)
        .build()
        .context("could not set up the match")?;

    tennis_match.play(rng, &mut RallyResolver::default(), narrator.as_mut())?;

    println!("{}", tennis_match.summary());
    for player in tennis_match.players() {
        println!("{}", player.summary());
    }
    Ok(())
}

fn play_tournament(
    category: Category,
    config: &Configuration,
    rng: &mut ChaCha8Rng,
) -> anyhow::Result<()> {
    let mut draw = KnockoutTournament::new(category, roster(category), umpires())?
        .with_rules(config.scoring_rules()?);
    let mut resolver = RallyResolver::default();

    while let RoundProgress::Played { round, remaining } =
        draw.play_round(rng, &mut resolver, &mut TracingNarrator)?
    {
        info!(%round, remaining, "round complete");
    }

    for round in draw.history() {
        println!("{} ({} pts)", round.name, round.ranking_points);
        for result in &round.matches {
            println!("  {} def. {} {}", result.winner, result.loser, result.score_line);
        }
    }
    let champion = draw.champion().context("the draw has no champion")?;
    println!("Champion: {}", champion.summary());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut args = env::args().skip(1);
    let mode = args.next().unwrap_or_else(|| "match".to_owned());
    let category = match args.next().as_deref() {
        None | Some("men") => Category::MensSingles,
        Some("women") => Category::WomensSingles,
        Some(other) => bail!("unknown category {other:?}, expected men or women"),
    };

    let config = Configuration::from_env();
    if config.log() {
        init_logger()?;
    }
    let mut rng = match config.seed() {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    info!(?config, %category, "starting");

    match mode.as_str() {
        "match" => play_match(category, &config, &mut rng),
        "tournament" => play_tournament(category, &config, &mut rng),
        other => bail!("unknown mode {other:?}, expected match or tournament"),
    }
}
