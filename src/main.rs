use std::process::ExitCode;
use std::sync::Arc;

use bithello::board::Board;
use bithello::color::Color;
use bithello::config::SearchConfig;
use bithello::error::OthelloError;
use bithello::game::play_game;
use bithello::mcts::MctsPlayer;
use bithello::outcome::GameOutcome;
use bithello::player::Player;
use bithello::random::RandomPlayer;
use bithello::stop::{StopByCount, StopByDuration, StopCondition, DEFAULT_PLAYOUTS};
use bithello::text::TextPlayer;
use clap::{Parser, ValueEnum};
use log::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Kind {
    /// Monte-Carlo tree search
    Mcts,
    /// Uniformly random legal moves
    Random,
    /// Human at the terminal
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "othello", about = "Run a two-player Othello game; dark moves first")]
struct Args {
    /// Player type for dark
    #[arg(long, value_enum)]
    dark: Kind,

    /// Player type for light
    #[arg(long, value_enum)]
    light: Kind,

    /// Playouts per turn for a dark MCTS player
    #[arg(long, conflicts_with = "dark_millis")]
    dark_playouts: Option<u64>,

    /// Milliseconds per turn for a dark MCTS player
    #[arg(long)]
    dark_millis: Option<u64>,

    /// Playouts per turn for a light MCTS player
    #[arg(long, conflicts_with = "light_millis")]
    light_playouts: Option<u64>,

    /// Milliseconds per turn for a light MCTS player
    #[arg(long)]
    light_millis: Option<u64>,

    /// Search threads (defaults to BITHELLO_THREADS, then all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Base RNG seed (defaults to BITHELLO_SEED, then random)
    #[arg(long)]
    seed: Option<u64>,
}

fn stop_condition(playouts: Option<u64>, millis: Option<u64>) -> Result<Arc<dyn StopCondition>, OthelloError> {
    match (playouts, millis) {
        (Some(0), _) | (_, Some(0)) => Err(OthelloError::InvalidConfig(
            "search budget must be at least 1".into(),
        )),
        (_, Some(ms)) => Ok(Arc::new(StopByDuration::from_millis(ms))),
        (n, None) => Ok(Arc::new(StopByCount::new(n.unwrap_or(DEFAULT_PLAYOUTS)))),
    }
}

fn make_player(
    kind: Kind,
    color: Color,
    playouts: Option<u64>,
    millis: Option<u64>,
    config: SearchConfig,
) -> Result<Box<dyn Player>, OthelloError> {
    let player: Box<dyn Player> = match kind {
        Kind::Mcts => Box::new(MctsPlayer::new(color, stop_condition(playouts, millis)?, config)?),
        Kind::Random => match config.seed {
            Some(seed) => Box::new(RandomPlayer::seeded(color, seed.wrapping_add(color.index() as u64))),
            None => Box::new(RandomPlayer::new(color)),
        },
        Kind::Text => Box::new(TextPlayer::stdio(color)),
    };
    Ok(player)
}

fn run(args: Args) -> Result<i32, OthelloError> {
    let mut config = SearchConfig::from_env()?;
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    info!("Search config: {config:?}");

    let mut dark = make_player(args.dark, Color::Dark, args.dark_playouts, args.dark_millis, config)?;
    let mut light = make_player(
        args.light,
        Color::Light,
        args.light_playouts,
        args.light_millis,
        config,
    )?;

    play_game(Board::standard(), dark.as_mut(), light.as_mut())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    match run(args) {
        Ok(difference) => {
            match GameOutcome::from_tile_difference(difference).winner() {
                Some(color) => println!("Winner is: {color}"),
                None => println!("Winner is: tie!"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("othello: {e}");
            ExitCode::FAILURE
        }
    }
}
