use crate::bitboard::Bitboard;
use crate::position::Position;

/// A player's answer when asked for a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// Place a disc on the single square set in the mask.
    Place(Bitboard),
    /// Take back this player's previous turn.
    Undo,
}

impl Move {
    pub fn place(position: Position) -> Self {
        Move::Place(position.to_bitboard())
    }

    pub fn bits(&self) -> Option<Bitboard> {
        match self {
            Move::Place(bits) => Some(*bits),
            Move::Undo => None,
        }
    }

    pub fn position(&self) -> Option<Position> {
        self.bits().and_then(Position::from_bitboard)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Place(bits) => match Position::from_bitboard(*bits) {
                Some(pos) => write!(f, "Place{}", pos),
                None => write!(f, "Place({:#018x})", bits),
            },
            Move::Undo => write!(f, "Undo"),
        }
    }
}
