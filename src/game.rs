use log::{debug, info, warn};

use crate::bitboard::{is_single, Bitboard};
use crate::board::Board;
use crate::color::Color;
use crate::error::OthelloError;
use crate::moves::{all_legal_moves, effect_move};
use crate::outcome::GameOutcome;
use crate::player::Player;
use crate::r#move::Move;

/// Undo requests are refused while fewer discs than this are on the board.
pub const MIN_UNDO_PIECES: u32 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlyRecord {
    pub board_before: Board,
    pub mover: Color,
    pub position: Bitboard,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Color,
    history: Vec<PlyRecord>,
}

impl Game {
    pub fn new(board: Board, first: Color) -> Self {
        Game {
            board,
            to_move: first,
            history: Vec::new(),
        }
    }

    /// Opening position with dark to move.
    pub fn standard() -> Self {
        Self::new(Board::standard(), Color::Dark)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn history(&self) -> &[PlyRecord] {
        &self.history
    }

    /// Legal moves for the colour to move.
    pub fn legal_moves(&self) -> Bitboard {
        all_legal_moves(&self.board, self.to_move)
    }

    /// Play `position` for the colour to move. Returns false, changing
    /// nothing, unless it is a single legal square.
    pub fn make_move(&mut self, position: Bitboard) -> bool {
        if !is_single(position) || position & self.legal_moves() == 0 {
            return false;
        }

        self.history.push(PlyRecord {
            board_before: self.board,
            mover: self.to_move,
            position,
        });
        self.board = effect_move(&self.board, self.to_move, position);
        self.board.debug_assert_valid();
        self.to_move = self.to_move.opposite();
        true
    }

    /// Hand the turn to the opponent. Only allowed when the colour to move
    /// has no legal moves.
    pub fn pass(&mut self) -> bool {
        if self.legal_moves() != 0 {
            return false;
        }
        self.to_move = self.to_move.opposite();
        true
    }

    /// Rewind to `color`'s most recent turn, dropping that move and every
    /// move after it. Returns false if `color` has not moved yet.
    pub fn undo_turn(&mut self, color: Color) -> bool {
        let Some(index) = self.history.iter().rposition(|ply| ply.mover == color) else {
            return false;
        };
        self.board = self.history[index].board_before;
        self.to_move = color;
        self.history.truncate(index);
        true
    }

    pub fn is_over(&self) -> bool {
        all_legal_moves(&self.board, Color::Dark) == 0
            && all_legal_moves(&self.board, Color::Light) == 0
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        if self.is_over() {
            Some(GameOutcome::from_tile_difference(self.tile_difference()))
        } else {
            None
        }
    }

    pub fn tile_difference(&self) -> i32 {
        self.board.tile_difference()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::standard()
    }
}

enum TurnResult {
    Continue,
    Finished(i32),
    UndoRequested,
}

fn play_turn(
    game: &mut Game,
    mover: &mut dyn Player,
    other: &mut dyn Player,
) -> Result<TurnResult, OthelloError> {
    let color = game.to_move();
    let board = *game.board();
    let legal = game.legal_moves();

    if legal == 0 {
        if game.is_over() {
            mover.game_over(&board);
            other.game_over(&board);
            return Ok(TurnResult::Finished(board.tile_difference()));
        }
        debug!("{color} has no legal moves and passes");
        game.pass();
        return Ok(TurnResult::Continue);
    }

    mover.display_board(&board);
    match mover.get_move(&board, legal)? {
        Move::Place(position) => {
            if !is_single(position) || position & legal == 0 {
                return Err(OthelloError::IllegalMove { color, position });
            }
            other.notify_move(&board, position);
            game.make_move(position);
            Ok(TurnResult::Continue)
        }
        Move::Undo => Ok(TurnResult::UndoRequested),
    }
}

/// Play `first` against `second` from `board`, `first` moving first, until
/// neither side can move. Returns dark discs minus light discs.
pub fn play_game<'a>(
    board: Board,
    first: &mut (dyn Player + 'a),
    second: &mut (dyn Player + 'a),
) -> Result<i32, OthelloError> {
    board.debug_assert_valid();
    if first.color() == second.color() {
        return Err(OthelloError::InvariantViolation(format!(
            "both players are {}",
            first.color()
        )));
    }

    let mut game = Game::new(board, first.color());
    info!("Game start: {} moves first", first.color());

    loop {
        let (mover, other) = if first.color() == game.to_move() {
            (&mut *first, &mut *second)
        } else {
            (&mut *second, &mut *first)
        };

        match play_turn(&mut game, mover, other)? {
            TurnResult::Continue => {}
            TurnResult::Finished(difference) => {
                info!(
                    "Game over after {} moves: {} ({difference:+})",
                    game.history().len(),
                    GameOutcome::from_tile_difference(difference)
                );
                return Ok(difference);
            }
            TurnResult::UndoRequested => {
                let color = game.to_move();
                if game.board().piece_count() < MIN_UNDO_PIECES {
                    warn!("{color} asked to undo, but it is too early in the game");
                } else if !game.undo_turn(color) {
                    warn!("{color} asked to undo, but has no earlier turn");
                } else {
                    info!("{color} took back a turn");
                }
            }
        }
    }
}
