use std::ops::BitAnd;

use paste::paste;

use crate::bitboard::{
    row_col_to_index, Bitboard, DoubleBitmap, DoubleBitmapHi, DoubleBitmapLo, NDIAG,
};

pub const COL_0: Bitboard = 0x0101_0101_0101_0101;
pub const COL_7: Bitboard = 0x8080_8080_8080_8080;
pub const ROW_0: Bitboard = 0x0000_0000_0000_00FF;
pub const ROW_7: Bitboard = 0xFF00_0000_0000_0000;

/// Anything a scan can step: plain bitboards and double bitmaps.
pub trait Shiftable: Copy {
    fn shift_up(self, count: u32) -> Self;
    fn shift_down(self, count: u32) -> Self;
}

impl Shiftable for Bitboard {
    #[inline]
    fn shift_up(self, count: u32) -> Self {
        self << count
    }

    #[inline]
    fn shift_down(self, count: u32) -> Self {
        self >> count
    }
}

impl<const HI: bool> Shiftable for DoubleBitmap<HI> {
    #[inline]
    fn shift_up(self, count: u32) -> Self {
        self.shift_left(count)
    }

    #[inline]
    fn shift_down(self, count: u32) -> Self {
        self.shift_right(count)
    }
}

/// A start mask: steps like a bitboard and can be intersected with one.
pub trait ScanMask: Shiftable + BitAnd<Bitboard, Output = Bitboard> {}

impl ScanMask for Bitboard {}
impl<const HI: bool> ScanMask for DoubleBitmap<HI> {}

/// One of the eight scan directions.
///
/// `START` holds the first square of every line scanned in this direction, so
/// that stepping it with `next` walks all lines in parallel. `INSIDE` is the
/// set of squares from which one more step stays on the board.
pub trait Direction {
    type Mask: ScanMask;
    const START: Self::Mask;
    const INSIDE: Bitboard;

    fn next<T: Shiftable>(bits: T) -> T;
}

#[inline]
pub const fn inside<D: Direction>() -> Bitboard {
    D::INSIDE
}

/// Diagonal starts from the bottom half. Each pass shifts the lines already
/// placed one row down (into `hi` eventually) and seeds a new one.
const fn bottom_start(seed: u32) -> DoubleBitmapLo {
    let mut bits = DoubleBitmapLo::new(0, 0);
    let mut i = 0;
    while i < NDIAG {
        bits = bits.shift_left(8).with_bit(seed);
        i += 1;
    }
    bits
}

/// Mirror of [`bottom_start`] for lines that begin in the top half.
const fn top_start(seed: u32) -> DoubleBitmapHi {
    let mut bits = DoubleBitmapHi::new(0, 0);
    let mut i = 0;
    while i < NDIAG {
        bits = bits.shift_right(8).with_bit(seed);
        i += 1;
    }
    bits
}

macro_rules! direction {
    ($(#[$meta:meta])* $name:ident / $upper:ident: $mask:ty = $start:expr, $shift:ident($by:literal), inside = $inside:expr) => {
        paste! {
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
            pub struct $name;

            pub const [<$upper _START>]: $mask = $start;
            pub const [<$upper _INSIDE>]: Bitboard = $inside;

            impl Direction for $name {
                type Mask = $mask;
                const START: $mask = [<$upper _START>];
                const INSIDE: Bitboard = [<$upper _INSIDE>];

                #[inline]
                fn next<T: Shiftable>(bits: T) -> T {
                    bits.$shift($by)
                }
            }
        }
    };
}

direction!(LeftToRight / LEFT_TO_RIGHT: Bitboard = COL_0, shift_up(1), inside = !COL_7);
direction!(RightToLeft / RIGHT_TO_LEFT: Bitboard = COL_7, shift_down(1), inside = !COL_0);
direction!(TopToBottom / TOP_TO_BOTTOM: Bitboard = ROW_0, shift_up(8), inside = !ROW_7);
direction!(BottomToTop / BOTTOM_TO_TOP: Bitboard = ROW_7, shift_down(8), inside = !ROW_0);
direction!(
    /// Up and to the right; lines start on column 0 and row 7.
    BottomLeftToTopRight / BOTTOM_LEFT_TO_TOP_RIGHT: DoubleBitmapLo = bottom_start(row_col_to_index(2, 0)),
    shift_down(7),
    inside = !(ROW_0 | COL_7)
);
direction!(
    /// Up and to the left; lines start on column 7 and row 7.
    BottomRightToTopLeft / BOTTOM_RIGHT_TO_TOP_LEFT: DoubleBitmapLo = bottom_start(row_col_to_index(2, 7)),
    shift_down(9),
    inside = !(ROW_0 | COL_0)
);
direction!(
    /// Down and to the right; lines start on column 0 and row 0.
    TopLeftToBottomRight / TOP_LEFT_TO_BOTTOM_RIGHT: DoubleBitmapHi = top_start(row_col_to_index(5, 0)),
    shift_up(9),
    inside = !(ROW_7 | COL_7)
);
direction!(
    /// Down and to the left; lines start on column 7 and row 0.
    TopRightToBottomLeft / TOP_RIGHT_TO_BOTTOM_LEFT: DoubleBitmapHi = top_start(row_col_to_index(5, 7)),
    shift_up(7),
    inside = !(ROW_7 | COL_0)
);
