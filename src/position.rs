use crate::bitboard::{
    index_to_col, index_to_row, is_single, lowest_bit_index, row_col_to_index, square, Bitboard, N,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Self {
        Position { row, col }
    }

    /// `None` when either coordinate is off the board.
    pub fn try_new(row: usize, col: usize) -> Option<Self> {
        if row >= N as usize || col >= N as usize {
            return None;
        }
        Some(Position::new(row as u8, col as u8))
    }

    pub fn from_index(index: u32) -> Self {
        Position {
            row: index_to_row(index) as u8,
            col: index_to_col(index) as u8,
        }
    }

    pub fn to_index(&self) -> u32 {
        row_col_to_index(self.row as u32, self.col as u32)
    }

    pub fn is_valid(&self) -> bool {
        (self.row as u32) < N && (self.col as u32) < N
    }

    /// Single-bit mask for this square.
    pub fn to_bitboard(&self) -> Bitboard {
        debug_assert!(self.is_valid());
        square(self.row as u32, self.col as u32)
    }

    /// Inverse of [`Position::to_bitboard`]; `None` unless exactly one bit is set.
    pub fn from_bitboard(bits: Bitboard) -> Option<Self> {
        if !is_single(bits) {
            return None;
        }
        lowest_bit_index(bits).map(Position::from_index)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
