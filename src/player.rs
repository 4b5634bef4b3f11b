use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::color::Color;
use crate::error::OthelloError;
use crate::r#move::Move;

/// Something that can take a seat at the board.
pub trait Player: Send {
    /// The colour this player plays.
    fn color(&self) -> Color;

    /// Choose a move. `legal` is never empty; a `Move::Place` must name
    /// exactly one of its bits.
    fn get_move(&mut self, board: &Board, legal: Bitboard) -> Result<Move, OthelloError>;

    /// Notified after the opponent places a disc at `position` on `before`.
    fn notify_move(&mut self, _before: &Board, _position: Bitboard) {}

    /// Notified once with the final board.
    fn game_over(&mut self, _board: &Board) {}

    /// Called before `get_move` so interactive players can show the board.
    fn display_board(&self, _board: &Board) {}
}
