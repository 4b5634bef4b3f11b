use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;

use crate::bitboard::{iter_singles, Bitboard};
use crate::board::Board;
use crate::color::Color;
use crate::error::OthelloError;
use crate::moves::{all_legal_moves, effect_move};
use crate::player::Player;
use crate::r#move::Move;

/// Uniformly pick one set bit of `legal`.
#[inline]
pub fn random_move(legal: Bitboard, rng: &mut StdRng) -> Option<Bitboard> {
    iter_singles(legal).choose(rng)
}

/// Play uniformly random moves from `board` with `to_move` on turn until
/// neither side can move. Returns dark minus light.
#[hotpath::measure]
pub fn playout(board: Board, to_move: Color, rng: &mut StdRng) -> i32 {
    let mut board = board;
    let mut color = to_move;
    let mut passed = false;

    loop {
        let legal = all_legal_moves(&board, color);
        match random_move(legal, rng) {
            Some(position) => {
                board = effect_move(&board, color, position);
                passed = false;
            }
            None if passed => return board.tile_difference(),
            None => passed = true,
        }
        color = color.opposite();
    }
}

/// Plays a uniformly random legal move.
pub struct RandomPlayer {
    color: Color,
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(color: Color) -> Self {
        Self::with_rng(color, StdRng::seed_from_u64(rand::random::<u64>()))
    }

    pub fn seeded(color: Color, seed: u64) -> Self {
        Self::with_rng(color, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(color: Color, rng: StdRng) -> Self {
        RandomPlayer { color, rng }
    }
}

impl Player for RandomPlayer {
    fn color(&self) -> Color {
        self.color
    }

    fn get_move(&mut self, _board: &Board, legal: Bitboard) -> Result<Move, OthelloError> {
        random_move(legal, &mut self.rng)
            .map(Move::Place)
            .ok_or_else(|| OthelloError::InvariantViolation("no legal moves to choose from".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::{is_single, square};

    const CORNER_TRAP: [&str; 8] = [
        "oxxxxxx.", "oxxxxxxo", "xxxxxxxx", "xxxxxxxx", "oooxoooo", "ooxooooo", "ooooooxo",
        "xoooooo.",
    ];

    #[test]
    fn test_random_move_picks_legal_bit() {
        let mut rng = StdRng::seed_from_u64(1);
        let legal = square(2, 3) | square(3, 2) | square(4, 5);
        for _ in 0..50 {
            let pick = random_move(legal, &mut rng).expect("non-empty");
            assert!(is_single(pick));
            assert_ne!(pick & legal, 0);
        }
        assert_eq!(random_move(0, &mut rng), None);
    }

    #[test]
    fn test_random_move_covers_all_choices() {
        let mut rng = StdRng::seed_from_u64(2);
        let legal = square(0, 0) | square(7, 7);
        let mut seen = 0;
        for _ in 0..100 {
            seen |= random_move(legal, &mut rng).unwrap_or(0);
        }
        assert_eq!(seen, legal);
    }

    #[test]
    fn test_playout_from_opening_is_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let score = playout(Board::standard(), Color::Dark, &mut rng);
            assert!((-64..=64).contains(&score));
        }
    }

    #[test]
    fn test_playout_on_finished_board() {
        let board = Board::from_rows(&[
            "oxxxxxxo", "oxxxxxxo", "xxxxxxxx", "xxxxxxxx", "oooooooo", "oooooooo", "ooooooxo",
            "xoooooox",
        ]);
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(playout(board, Color::Dark, &mut rng), -2);
        assert_eq!(playout(board, Color::Light, &mut rng), -2);
    }

    #[test]
    fn test_corner_trap_playouts_are_forced() {
        let board = Board::from_rows(&CORNER_TRAP);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..10 {
            let good = effect_move(&board, Color::Dark, square(0, 7));
            assert_eq!(playout(good, Color::Light, &mut rng), 2);
            let bad = effect_move(&board, Color::Dark, square(7, 7));
            assert!(playout(bad, Color::Light, &mut rng) < 0);

            let good = effect_move(&board, Color::Light, square(0, 7));
            assert_eq!(playout(good, Color::Dark, &mut rng), -2);
            let bad = effect_move(&board, Color::Light, square(7, 7));
            assert!(playout(bad, Color::Dark, &mut rng) > 0);
        }
    }

    #[test]
    fn test_random_player() {
        let board = Board::standard();
        let legal = all_legal_moves(&board, Color::Dark);
        let mut player = RandomPlayer::seeded(Color::Dark, 9);
        assert_eq!(player.color(), Color::Dark);
        match player.get_move(&board, legal).expect("legal move") {
            Move::Place(pos) => assert_ne!(pos & legal, 0),
            Move::Undo => panic!("random player never undoes"),
        }
        assert!(player.get_move(&board, 0).is_err());
    }
}
