//! pref-solver - optimal line of play for a three-handed Preferans deal
//!
//! Hands are given as space-separated cards ("J♠ Q♠ 7♣", "JS QS 7C" or "J^ Q^ 7+"),
//! or dealt at random from the 32-card deck with `--random-seed`.
//!
//! Usage: pref-solver --p0 <hand> --p1 <hand> --p2 <hand> [--trump <suit>] [--leader <seat>]

use anyhow::{bail, Context, Result};
use clap::Parser;
use pref_solver::types::char_to_suit;
use pref_solver::{Card, CardPack, GameState, Score, Solver, SolverConfig, Strategy, Suit, NUM_SEATS};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Cards per hand in a random deal; the two left over are the talon
const HAND_SIZE: usize = 10;

#[derive(Parser)]
#[command(name = "pref-solver")]
#[command(about = "Perfect-information solver for three-handed Preferans deals")]
#[command(version)]
struct Args {
    /// Hand of seat 0
    #[arg(long = "p0", required_unless_present = "random_seed")]
    p0: Option<String>,

    /// Hand of seat 1
    #[arg(long = "p1", required_unless_present = "random_seed")]
    p1: Option<String>,

    /// Hand of seat 2
    #[arg(long = "p2", required_unless_present = "random_seed")]
    p2: Option<String>,

    /// Deal three random 10-card hands with this seed instead of reading them
    #[arg(long = "random-seed", conflicts_with_all = ["p0", "p1", "p2"])]
    random_seed: Option<u64>,

    /// Trump suit (S/C/D/H or a suit symbol); no trump if omitted
    #[arg(short = 't', long = "trump")]
    trump: Option<String>,

    /// Seat to lead the first trick
    #[arg(short = 'l', long = "leader", default_value_t = 0)]
    leader: usize,

    /// Strategy per seat, comma separated (e.g. "max1,min1,max1")
    #[arg(short = 's', long = "strategies", default_value = "max1,min1,max1")]
    strategies: String,

    /// Tricks already taken per seat, comma separated (e.g. "2,1,0")
    #[arg(long = "score")]
    score: Option<String>,

    /// Disable the transposition table
    #[arg(long = "no-cache")]
    no_cache: bool,

    /// Disable equivalent-card pruning
    #[arg(long = "no-filter")]
    no_filter: bool,

    /// Log search progress every this many leaves (0 = never)
    #[arg(long = "progress-interval", default_value_t = 100_000)]
    progress_interval: u64,

    /// Verbose output - log search progress
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let hands = match args.random_seed {
        Some(seed) => random_hands(seed),
        None => [
            parse_hand(args.p0.as_deref(), 0)?,
            parse_hand(args.p1.as_deref(), 1)?,
            parse_hand(args.p2.as_deref(), 2)?,
        ],
    };
    let strategies = parse_strategies(&args.strategies)?;
    let trump = args.trump.as_deref().map(parse_trump).transpose()?;

    let mut state = GameState::from_hands(hands, strategies)
        .context("invalid deal")?
        .with_trump(trump)
        .with_active_player(args.leader)
        .context("invalid leader")?;
    if let Some(score) = &args.score {
        state = state.with_score(parse_score(score)?);
    }

    let config = SolverConfig {
        use_cache: !args.no_cache,
        filter_equivalent: !args.no_filter,
        progress_interval: args.progress_interval,
    };
    println!("{}", state);

    let solution = Solver::with_config(state.clone(), config).solve();
    info!(stats = %solution.stats, "search complete");

    println!();
    println!("Result: {}", solution.path.score());
    print_tricks(&state, &solution.path.moves().collect::<Vec<_>>());
    println!(
        "Nodes: {}  Leaves: {}  Cache hits: {}  Cache entries: {}",
        solution.stats.nodes,
        solution.stats.leaves,
        solution.stats.cache_hits,
        solution.stats.cache_entries
    );
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn random_hands(seed: u64) -> [CardPack; NUM_SEATS] {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut deck = CardPack::preferans_deck();
    let hands = [
        deck.extract_random_cards(HAND_SIZE, &mut rng),
        deck.extract_random_cards(HAND_SIZE, &mut rng),
        deck.extract_random_cards(HAND_SIZE, &mut rng),
    ];
    info!(seed, talon = %deck, "dealt random hands");
    hands
}

fn parse_hand(hand: Option<&str>, seat: usize) -> Result<CardPack> {
    let hand = hand.with_context(|| format!("missing hand for seat {}", seat))?;
    hand.parse()
        .with_context(|| format!("invalid hand for seat {}: '{}'", seat, hand))
}

fn parse_trump(s: &str) -> Result<Suit> {
    let mut chars = s.chars();
    match (chars.next().and_then(char_to_suit), chars.next()) {
        (Some(suit), None) => Ok(suit),
        _ => bail!("invalid trump suit '{}'", s),
    }
}

fn parse_strategy(s: &str) -> Result<Strategy> {
    let s = s.trim();
    let (goal, seat) = match (s.get(..3), s.get(3..)) {
        (Some(goal), Some(seat)) => (goal, seat),
        _ => bail!("invalid strategy '{}'", s),
    };
    let seat: usize = seat
        .parse()
        .with_context(|| format!("invalid strategy '{}'", s))?;
    if seat >= NUM_SEATS {
        bail!("strategy seat out of range in '{}'", s);
    }
    match goal.to_ascii_lowercase().as_str() {
        "min" => Ok(Strategy::minimize(seat)),
        "max" => Ok(Strategy::maximize(seat)),
        _ => bail!("invalid strategy '{}': expected min<seat> or max<seat>", s),
    }
}

fn parse_strategies(s: &str) -> Result<[Strategy; NUM_SEATS]> {
    let strategies = s
        .split(',')
        .map(parse_strategy)
        .collect::<Result<Vec<_>>>()?;
    match <[Strategy; NUM_SEATS]>::try_from(strategies) {
        Ok(strategies) => Ok(strategies),
        Err(v) => bail!("expected {} strategies, got {}", NUM_SEATS, v.len()),
    }
}

fn parse_score(s: &str) -> Result<Score> {
    let tricks = s
        .split(',')
        .map(|t| {
            t.trim()
                .parse::<u8>()
                .with_context(|| format!("invalid trick count '{}'", t))
        })
        .collect::<Result<Vec<_>>>()?;
    match <[u8; NUM_SEATS]>::try_from(tricks) {
        Ok(tricks) => Ok(Score::from_tricks(tricks)),
        Err(v) => bail!("expected {} trick counts, got {}", NUM_SEATS, v.len()),
    }
}

/// Print the solved line one trick per row, with the leading seat of each trick
fn print_tricks(state: &GameState, moves: &[Card]) {
    let mut replay = state.clone();
    for trick in moves.chunks(NUM_SEATS) {
        let leader = replay.active_player();
        let cards: Vec<String> = trick.iter().map(|c| c.to_string()).collect();
        for &card in trick {
            if replay.play(card).is_err() {
                return;
            }
        }
        println!("  {}: {}  -> {}", leader, cards.join(" "), replay.score());
    }
}
