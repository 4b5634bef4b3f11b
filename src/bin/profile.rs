//! Self-play run for profiling. Build with `--features hotpath` to get a
//! timing report for the instrumented engine functions on exit.

use std::sync::Arc;

use bithello::board::Board;
use bithello::color::Color;
use bithello::config::SearchConfig;
use bithello::error::OthelloError;
use bithello::game::play_game;
use bithello::mcts::MctsPlayer;
use bithello::outcome::GameOutcome;
use bithello::random::RandomPlayer;
use bithello::stop::StopByCount;
use clap::Parser;
use log::info;

#[derive(Debug, Parser)]
#[command(name = "profile", about = "MCTS versus random self-play for profiling")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 4)]
    games: u64,

    /// Playouts per MCTS turn
    #[arg(long, default_value_t = 2000)]
    playouts: u64,

    /// Search threads
    #[arg(long)]
    threads: Option<usize>,

    /// Base RNG seed
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

fn run(args: &Args) -> Result<(), OthelloError> {
    let mut config = SearchConfig::from_env()?.with_seed(args.seed);
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }

    let mut mcts_wins = 0;
    for game in 0..args.games {
        // Alternate colours so both sides of the engine get exercised.
        let mcts_color = if game % 2 == 0 { Color::Dark } else { Color::Light };
        let mut mcts = MctsPlayer::new(
            mcts_color,
            Arc::new(StopByCount::new(args.playouts)),
            config.with_seed(args.seed.wrapping_add(game)),
        )?;
        let mut random = RandomPlayer::seeded(mcts_color.opposite(), args.seed ^ game);

        let difference = if mcts_color == Color::Dark {
            play_game(Board::standard(), &mut mcts, &mut random)?
        } else {
            play_game(Board::standard(), &mut random, &mut mcts)?
        };
        let outcome = GameOutcome::from_tile_difference(difference);
        if outcome.is_win_for(mcts_color) {
            mcts_wins += 1;
        }
        let margin = difference * mcts_color.sign();
        info!("game {game}: mcts as {mcts_color}, {outcome} (mcts margin {margin:+})");
    }

    println!("MCTS won {mcts_wins} of {} games", args.games);
    Ok(())
}

#[hotpath::main]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("profile: {e}");
        std::process::exit(1);
    }
}
