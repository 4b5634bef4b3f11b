use std::fmt;

use crate::bitboard::{pop_count, square, test_square, Bitboard, N, N2};
use crate::color::Color;
use crate::error::OthelloError;
use crate::moves::effect_move;
use crate::position::Position;

/// The four centre squares, which are occupied from the first move on.
pub const CENTER: Bitboard = square(3, 3) | square(3, 4) | square(4, 3) | square(4, 4);

/// Immutable Othello position: one bitboard per colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    dark: Bitboard,
    light: Bitboard,
}

impl Board {
    pub const fn new(dark: Bitboard, light: Bitboard) -> Self {
        Board { dark, light }
    }

    /// The opening position.
    pub fn standard() -> Self {
        Board::from_rows(&["", "", "", "...ox", "...xo"])
    }

    /// Parse up to eight rows of up to eight characters, `x` for dark and
    /// `o` for light. Any other character, or a missing one, is empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        Board::from_rows_with(rows, Color::Dark.to_char(), Color::Light.to_char())
    }

    pub fn from_rows_with(rows: &[&str], dark: char, light: char) -> Self {
        debug_assert!(rows.len() <= N as usize, "too many rows");
        let mut board = Board::default();
        for (row, line) in rows.iter().take(N as usize).enumerate() {
            debug_assert!(line.chars().count() <= N as usize, "row {row} too long");
            for (col, c) in line.chars().take(N as usize).enumerate() {
                let bit = square(row as u32, col as u32);
                if c == dark {
                    board.dark |= bit;
                } else if c == light {
                    board.light |= bit;
                }
            }
        }
        board
    }

    /// Like [`Board::from_rows`] but rejects oversized input.
    pub fn try_from_rows(rows: &[&str]) -> Result<Self, OthelloError> {
        if rows.len() > N as usize {
            return Err(OthelloError::InvariantViolation(format!(
                "{} rows given, at most {N} allowed",
                rows.len()
            )));
        }
        if let Some((row, line)) = rows
            .iter()
            .enumerate()
            .find(|(_, line)| line.chars().count() > N as usize)
        {
            return Err(OthelloError::InvariantViolation(format!(
                "row {row} has {} columns, at most {N} allowed",
                line.chars().count()
            )));
        }
        Ok(Board::from_rows(rows))
    }

    #[inline]
    pub fn dark(&self) -> Bitboard {
        self.dark
    }

    #[inline]
    pub fn light(&self) -> Bitboard {
        self.light
    }

    #[inline]
    pub fn pieces(&self, color: Color) -> Bitboard {
        match color {
            Color::Dark => self.dark,
            Color::Light => self.light,
        }
    }

    /// `(mine, theirs)` from `color`'s point of view.
    #[inline]
    pub fn split(&self, color: Color) -> (Bitboard, Bitboard) {
        match color {
            Color::Dark => (self.dark, self.light),
            Color::Light => (self.light, self.dark),
        }
    }

    /// Rebuild a board from `(mine, theirs)` as seen by `color`.
    #[inline]
    pub fn from_split(color: Color, mine: Bitboard, theirs: Bitboard) -> Self {
        match color {
            Color::Dark => Board::new(mine, theirs),
            Color::Light => Board::new(theirs, mine),
        }
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.dark | self.light
    }

    #[inline]
    pub fn empty(&self) -> Bitboard {
        !self.occupied()
    }

    #[inline]
    pub fn count(&self, color: Color) -> u32 {
        pop_count(self.pieces(color))
    }

    /// Discs on the board, both colours.
    #[inline]
    pub fn piece_count(&self) -> u32 {
        pop_count(self.occupied())
    }

    #[inline]
    pub fn moves_left(&self) -> u32 {
        N2 - self.piece_count()
    }

    /// Dark discs minus light discs.
    #[inline]
    pub fn tile_difference(&self) -> i32 {
        self.count(Color::Dark) as i32 - self.count(Color::Light) as i32
    }

    pub fn get_piece(&self, pos: &Position) -> Option<Color> {
        if !pos.is_valid() {
            return None;
        }
        let (row, col) = (pos.row as u32, pos.col as u32);
        if test_square(self.dark, row, col) {
            Some(Color::Dark)
        } else if test_square(self.light, row, col) {
            Some(Color::Light)
        } else {
            None
        }
    }

    /// Place a disc for `color` at the single-bit `position`, flipping what
    /// it captures. An illegal position leaves the board unchanged.
    #[inline]
    pub fn play(&self, color: Color, position: Bitboard) -> Board {
        effect_move(self, color, position)
    }

    pub fn validate(&self) -> Result<(), OthelloError> {
        let overlap = self.dark & self.light;
        if overlap != 0 {
            return Err(OthelloError::InvariantViolation(format!(
                "dark and light overlap at {overlap:#018x}"
            )));
        }
        let missing = CENTER & self.empty();
        if missing != 0 {
            return Err(OthelloError::InvariantViolation(format!(
                "centre squares empty at {missing:#018x}"
            )));
        }
        Ok(())
    }

    /// Panic in debug builds if [`Board::validate`] fails.
    #[inline]
    pub fn debug_assert_valid(&self) {
        if cfg!(debug_assertions) {
            if let Err(e) = self.validate() {
                panic!("{e}\n{self}");
            }
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..N as u8 {
            for col in 0..N as u8 {
                let c = match self.get_piece(&Position::new(row, col)) {
                    Some(color) => color.to_char(),
                    None => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
