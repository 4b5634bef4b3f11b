//! Flat Monte-Carlo search: every legal move is scored by random playouts
//! run on a pool of worker threads until the stop condition fires.

use std::sync::{Arc, Mutex, PoisonError};

use log::debug;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::bitboard::{iter_singles, pop_count, Bitboard};
use crate::board::Board;
use crate::color::Color;
use crate::config::SearchConfig;
use crate::error::OthelloError;
use crate::moves::effect_move;
use crate::player::Player;
use crate::r#move::Move;
use crate::random::playout;
use crate::stop::StopCondition;
use crate::tree::{MctsNode, NodeArena, NodeId};

// Spreads per-search seeds apart when a fixed base seed is configured.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// What a worker needs to know about a root child, copied out of the arena
/// so the hot loop never touches the lock.
#[derive(Clone, Copy)]
struct Candidate {
    id: NodeId,
    board: Board,
    turn: Color,
}

#[derive(Clone, Copy, Default)]
struct Tally {
    dark: u64,
    light: u64,
}

pub struct MctsPlayer {
    color: Color,
    stop: Arc<dyn StopCondition>,
    config: SearchConfig,
    pool: ThreadPool,
    searches: u64,
}

impl MctsPlayer {
    pub fn new(
        color: Color,
        stop: Arc<dyn StopCondition>,
        config: SearchConfig,
    ) -> Result<Self, OthelloError> {
        let threads = config.threads.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("mcts-worker-{i}"))
            .build()?;
        Ok(MctsPlayer {
            color,
            stop,
            config: config.with_threads(threads),
            pool,
            searches: 0,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run one search and return the populated tree. Node 0 is the root;
    /// its children are the moves of `legal` in ascending bit order.
    pub fn search(&mut self, board: &Board, legal: Bitboard) -> Result<NodeArena, OthelloError> {
        debug_assert!(legal != 0, "search called without legal moves");
        if legal == 0 {
            return Err(OthelloError::InvariantViolation(
                "search called without legal moves".into(),
            ));
        }

        let me = self.color;
        let mut arena = NodeArena::with_capacity(pop_count(legal) as usize + 1);
        let root = arena.push(MctsNode::new(*board, me, 0, None));
        let candidates: Vec<Candidate> = iter_singles(legal)
            .map(|position| {
                let next = effect_move(board, me, position);
                let id = arena.push(MctsNode::new(next, me.opposite(), position, Some(root)));
                Candidate {
                    id,
                    board: next,
                    turn: me.opposite(),
                }
            })
            .collect();

        let base_seed = match self.config.seed {
            Some(seed) => seed.wrapping_add(self.searches.wrapping_mul(SEED_STRIDE)),
            None => rand::random::<u64>(),
        };
        self.searches += 1;

        self.stop.reset();
        let shared = Mutex::new(arena);
        let stop: &dyn StopCondition = &*self.stop;
        let threads = self.config.threads;

        self.pool.scope(|scope| {
            for worker in 0..threads {
                let shared = &shared;
                let candidates = &candidates;
                scope.spawn(move |_| {
                    let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(worker as u64));
                    let tallies = run_worker(candidates, stop, &mut rng);
                    let mut arena = shared.lock().unwrap_or_else(PoisonError::into_inner);
                    for (candidate, tally) in candidates.iter().zip(tallies) {
                        arena.count_wins(candidate.id, tally.dark, tally.light);
                    }
                });
            }
        });

        let arena = shared.into_inner().unwrap_or_else(PoisonError::into_inner);
        let totals = arena.get(root);
        debug!(
            "{me} search: {} evaluations, root dark={} light={}",
            stop.evaluations(),
            totals.wins(Color::Dark),
            totals.wins(Color::Light)
        );
        Ok(arena)
    }
}

/// Round-robin playouts over `candidates` from a random offset until told to
/// stop. Draws count for neither side.
fn run_worker(candidates: &[Candidate], stop: &dyn StopCondition, rng: &mut StdRng) -> Vec<Tally> {
    let mut tallies = vec![Tally::default(); candidates.len()];
    let mut next = (0..candidates.len()).choose(rng).unwrap_or(0);

    while !stop.should_stop() {
        let candidate = &candidates[next];
        match playout(candidate.board, candidate.turn, rng).signum() {
            1 => tallies[next].dark += 1,
            -1 => tallies[next].light += 1,
            _ => {}
        }
        next = (next + 1) % candidates.len();
    }

    tallies
}

impl Player for MctsPlayer {
    fn color(&self) -> Color {
        self.color
    }

    fn get_move(&mut self, board: &Board, legal: Bitboard) -> Result<Move, OthelloError> {
        let arena = self.search(board, legal)?;
        let root = arena
            .root()
            .ok_or_else(|| OthelloError::InvariantViolation("search tree has no root".into()))?;
        let best = arena
            .best_child(root, self.color)
            .ok_or_else(|| OthelloError::InvariantViolation("search tree has no children".into()))?;

        let node = arena.get(best);
        debug!(
            "{} picks {:#018x} with odds {:.3} ({} playouts)",
            self.color,
            node.position,
            node.win_odds(self.color),
            node.playouts()
        );
        Ok(Move::Place(node.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::{is_single, square};
    use crate::moves::all_legal_moves;
    use crate::stop::{StopByCount, StopByDuration};

    const CORNER_TRAP: [&str; 8] = [
        "oxxxxxx.", "oxxxxxxo", "xxxxxxxx", "xxxxxxxx", "oooxoooo", "ooxooooo", "ooooooxo",
        "xoooooo.",
    ];

    fn player(color: Color, playouts: u64, threads: usize, seed: u64) -> MctsPlayer {
        let config = SearchConfig::default().with_threads(threads).with_seed(seed);
        MctsPlayer::new(color, Arc::new(StopByCount::new(playouts)), config)
            .expect("thread pool builds")
    }

    #[test]
    fn test_corner_trap_picks_corner_for_both_colours() {
        let board = Board::from_rows(&CORNER_TRAP);
        for color in Color::ALL {
            let legal = all_legal_moves(&board, color);
            assert_eq!(legal, square(0, 7) | square(7, 7));

            let mut mcts = player(color, 1000, 4, 11);
            assert_eq!(mcts.get_move(&board, legal).expect("search"), Move::Place(0x80));
        }
    }

    #[test]
    fn test_root_collects_all_playouts() {
        let board = Board::from_rows(&CORNER_TRAP);
        let legal = all_legal_moves(&board, Color::Dark);
        let mut mcts = player(Color::Dark, 1000, 3, 5);
        let arena = mcts.search(&board, legal).expect("search");

        assert_eq!(arena.len(), 3);
        let root = arena.get(arena.root().expect("root"));
        let children: u64 = arena.iter().skip(1).map(|(_, n)| n.playouts()).sum();
        // No draws are possible here, so every playout is counted.
        assert_eq!(root.playouts(), 999);
        assert_eq!(children, 999);

        let positions: Vec<Bitboard> = arena.iter().skip(1).map(|(_, n)| n.position).collect();
        assert_eq!(positions, vec![square(0, 7), square(7, 7)]);
    }

    #[test]
    fn test_children_hold_resulting_boards() {
        let board = Board::standard();
        let legal = all_legal_moves(&board, Color::Light);
        let mut mcts = player(Color::Light, 50, 2, 1);
        let arena = mcts.search(&board, legal).expect("search");
        for (_, node) in arena.iter().skip(1) {
            assert_eq!(node.turn, Color::Dark);
            assert_eq!(node.board, effect_move(&board, Color::Light, node.position));
        }
    }

    #[test]
    fn test_single_thread_is_reproducible() {
        let board = Board::standard();
        let legal = all_legal_moves(&board, Color::Dark);
        let a = player(Color::Dark, 300, 1, 42)
            .get_move(&board, legal)
            .expect("search");
        let b = player(Color::Dark, 300, 1, 42)
            .get_move(&board, legal)
            .expect("search");
        assert_eq!(a, b);
        match a {
            Move::Place(pos) => assert_ne!(pos & legal, 0),
            Move::Undo => panic!("search never undoes"),
        }
    }

    #[test]
    fn test_duration_budget_ends_search() {
        let board = Board::standard();
        let legal = all_legal_moves(&board, Color::Dark);
        let stop = Arc::new(StopByDuration::from_millis(20));
        let config = SearchConfig::default().with_threads(2).with_seed(3);
        let mut mcts = MctsPlayer::new(Color::Dark, stop.clone(), config).expect("thread pool builds");
        assert_eq!(mcts.config().threads, 2);

        match mcts.get_move(&board, legal).expect("search") {
            Move::Place(pos) => {
                assert!(is_single(pos));
                assert_ne!(pos & legal, 0);
            }
            Move::Undo => panic!("search never undoes"),
        }
        assert!(stop.evaluations() > 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "without legal moves")]
    fn test_empty_legal_is_rejected() {
        let mut mcts = player(Color::Dark, 10, 1, 0);
        let _ = mcts.get_move(&Board::standard(), 0);
    }
}
