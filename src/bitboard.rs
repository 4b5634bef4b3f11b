use std::ops::{BitAnd, Shl, Shr};

/// Board dimension: an Othello board is always 8×8.
pub const N: u32 = 8;
/// Number of squares, one bit each.
pub const N2: u32 = N * N;
/// Diagonals of length three or more in each diagonal direction.
pub const NDIAG: u32 = 11;

/// One bit per square. Bit `row * 8 + col` is the square at (row, col); the
/// least-significant bit is the top-left corner.
pub type Bitboard = u64;

pub const EMPTY: Bitboard = 0;
pub const FULL: Bitboard = !0;

#[inline]
pub const fn row_col_to_index(row: u32, col: u32) -> u32 {
    row * N + col
}

#[inline]
pub const fn index_to_row(index: u32) -> u32 {
    index / N
}

#[inline]
pub const fn index_to_col(index: u32) -> u32 {
    index % N
}

/// Single-bit mask for (row, col).
#[inline]
pub const fn square(row: u32, col: u32) -> Bitboard {
    set_bit(EMPTY, row_col_to_index(row, col))
}

#[inline]
pub const fn set_bit(bits: Bitboard, index: u32) -> Bitboard {
    debug_assert!(index < N2);
    bits | (1 << index)
}

#[inline]
pub const fn test_bit(bits: Bitboard, index: u32) -> bool {
    debug_assert!(index < N2);
    (bits >> index) & 1 != 0
}

#[inline]
pub const fn clear_bit(bits: Bitboard, index: u32) -> Bitboard {
    debug_assert!(index < N2);
    bits & !(1 << index)
}

#[inline]
pub const fn set_square(bits: Bitboard, row: u32, col: u32) -> Bitboard {
    set_bit(bits, row_col_to_index(row, col))
}

#[inline]
pub const fn test_square(bits: Bitboard, row: u32, col: u32) -> bool {
    test_bit(bits, row_col_to_index(row, col))
}

#[inline]
pub const fn clear_square(bits: Bitboard, row: u32, col: u32) -> Bitboard {
    clear_bit(bits, row_col_to_index(row, col))
}

/// Number of set bits.
#[inline]
pub const fn pop_count(bits: Bitboard) -> u32 {
    bits.count_ones()
}

/// True if exactly one bit is set.
#[inline]
pub const fn is_single(bits: Bitboard) -> bool {
    bits != 0 && bits & (bits - 1) == 0
}

/// Index of the lowest set bit, or `None` if empty.
#[inline]
pub const fn lowest_bit_index(bits: Bitboard) -> Option<u32> {
    if bits == 0 {
        None
    } else {
        Some(bits.trailing_zeros())
    }
}

/// Iterate over indices of set bits, lowest first.
#[inline]
pub fn iter_ones(bits: Bitboard) -> BitIterator {
    BitIterator { bits }
}

/// Iterate over set bits as single-bit masks, lowest first.
#[inline]
pub fn iter_singles(bits: Bitboard) -> impl Iterator<Item = Bitboard> {
    iter_ones(bits).map(|i| 1 << i)
}

/// Iterator over set-bit indices in a `Bitboard`.
pub struct BitIterator {
    bits: Bitboard,
}

impl Iterator for BitIterator {
    type Item = u32;
    #[inline]
    fn next(&mut self) -> Option<u32> {
        if self.bits == 0 {
            return None;
        }
        let bit = self.bits.trailing_zeros();
        // Clear lowest set bit
        self.bits &= self.bits - 1;
        Some(bit)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitIterator {}

/// Two bitboards glued into a virtual 16-row board. Only the active half
/// (`hi` when `HI` is true, `lo` otherwise) takes part in `&` against a plain
/// bitboard; the other half holds bits that have not yet shifted onto the
/// board, or that already shifted off it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DoubleBitmap<const HI: bool> {
    hi: Bitboard,
    lo: Bitboard,
}

/// Double bitmap whose `hi` half faces the board.
pub type DoubleBitmapHi = DoubleBitmap<true>;
/// Double bitmap whose `lo` half faces the board.
pub type DoubleBitmapLo = DoubleBitmap<false>;

impl<const HI: bool> DoubleBitmap<HI> {
    #[inline]
    pub const fn new(hi: Bitboard, lo: Bitboard) -> Self {
        DoubleBitmap { hi, lo }
    }

    #[inline]
    pub const fn hi(&self) -> Bitboard {
        self.hi
    }

    #[inline]
    pub const fn lo(&self) -> Bitboard {
        self.lo
    }

    /// The half that is compared against the board.
    #[inline]
    pub const fn active(&self) -> Bitboard {
        if HI {
            self.hi
        } else {
            self.lo
        }
    }

    /// Set `index` in the active half.
    #[inline]
    pub const fn with_bit(self, index: u32) -> Self {
        if HI {
            DoubleBitmap::new(set_bit(self.hi, index), self.lo)
        } else {
            DoubleBitmap::new(self.hi, set_bit(self.lo, index))
        }
    }

    #[inline]
    pub const fn count_ones(&self) -> u32 {
        pop_count(self.hi) + pop_count(self.lo)
    }

    /// Shift toward higher indices; `lo` spills into `hi`.
    #[inline]
    pub const fn shift_left(self, count: u32) -> Self {
        debug_assert!(count > 0 && count < N2);
        DoubleBitmap::new(
            (self.hi << count) | (self.lo >> (N2 - count)),
            self.lo << count,
        )
    }

    /// Shift toward lower indices; `hi` spills into `lo`.
    #[inline]
    pub const fn shift_right(self, count: u32) -> Self {
        debug_assert!(count > 0 && count < N2);
        DoubleBitmap::new(
            self.hi >> count,
            (self.hi << (N2 - count)) | (self.lo >> count),
        )
    }
}

impl<const HI: bool> BitAnd<Bitboard> for DoubleBitmap<HI> {
    type Output = Bitboard;
    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        self.active() & rhs
    }
}

impl<const HI: bool> BitAnd<DoubleBitmap<HI>> for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitand(self, rhs: DoubleBitmap<HI>) -> Bitboard {
        rhs.active() & self
    }
}

impl<const HI: bool> Shl<u32> for DoubleBitmap<HI> {
    type Output = Self;
    #[inline]
    fn shl(self, count: u32) -> Self {
        self.shift_left(count)
    }
}

impl<const HI: bool> Shr<u32> for DoubleBitmap<HI> {
    type Output = Self;
    #[inline]
    fn shr(self, count: u32) -> Self {
        self.shift_right(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_col_to_index_in_range() {
        assert_eq!(row_col_to_index(0, 0), 0);
        assert_eq!(row_col_to_index(N - 1, N - 1), N2 - 1);
        assert_eq!(row_col_to_index(N, 0), N2);
    }

    #[test]
    fn test_square_sets_exactly_one_bit() {
        for row in 0..N {
            for col in 0..N {
                let bb = square(row, col);
                assert_eq!(pop_count(bb), 1);
                assert!(is_single(bb));
                assert_eq!(lowest_bit_index(bb), Some(row_col_to_index(row, col)));
            }
        }
    }

    #[test]
    fn test_set_test_clear() {
        let bb = set_bit(EMPTY, 17);
        assert!(test_bit(bb, 17));
        assert!(!test_bit(bb, 16));
        assert!(test_square(bb, 2, 1));
        assert_eq!(clear_bit(bb, 17), EMPTY);
        assert_eq!(clear_square(set_square(EMPTY, 7, 7), 7, 7), EMPTY);
        assert_eq!(set_square(EMPTY, 7, 7), 1 << 63);
    }

    #[test]
    fn test_index_round_trip() {
        assert_eq!(index_to_row(row_col_to_index(5, 3)), 5);
        assert_eq!(index_to_col(row_col_to_index(5, 3)), 3);
    }

    #[test]
    fn test_is_single() {
        assert!(!is_single(EMPTY));
        assert!(is_single(1 << 40));
        assert!(!is_single(0b11));
    }

    #[test]
    fn test_iter_ones() {
        let bb = square(0, 3) | square(1, 0) | square(7, 7);
        let indices: Vec<u32> = iter_ones(bb).collect();
        assert_eq!(indices, vec![3, 8, 63]);
        assert_eq!(iter_ones(bb).len(), 3);

        let singles: Vec<Bitboard> = iter_singles(bb).collect();
        assert_eq!(singles, vec![square(0, 3), square(1, 0), square(7, 7)]);
    }

    #[test]
    fn test_iter_ones_empty() {
        assert_eq!(iter_ones(EMPTY).count(), 0);
        assert!(lowest_bit_index(EMPTY).is_none());
    }

    #[test]
    fn test_hi_shifts_right() {
        let db = DoubleBitmapHi::new(0x8000_0000_0000_0000, 0);
        assert_ne!(db & FULL, 0);
        assert_ne!(FULL & db, 0);
        assert_ne!((db >> 1) & FULL, 0);
        assert_ne!((db >> (N2 - 1)) & FULL, 0);
        assert_ne!(((db >> (N2 - 1)) << (N2 - 1)) & FULL, 0);
    }

    #[test]
    fn test_hi_shifts_left() {
        let db = DoubleBitmapHi::new(0, 1);
        assert_eq!(db & FULL, 0);
        assert_eq!((db << 1) & FULL, 0);
        assert_eq!((db << (N2 - 1)) & FULL, 0);
        assert_eq!(((db << (N2 - 1)) >> (N2 - 1)) & FULL, 0);
    }

    #[test]
    fn test_lo_shifts_right() {
        let db = DoubleBitmapLo::new(0x8000_0000_0000_0001, 0);
        assert_eq!(db & FULL, 0);
        assert_ne!((db >> 1) & FULL, 0);
        assert_ne!((db >> (N2 - 1)) & FULL, 0);
        assert_eq!(((db << (N2 - 1)) >> (N2 - 1)) & FULL, 0);
    }

    #[test]
    fn test_lo_shifts_left() {
        let db = DoubleBitmapLo::new(0, 1);
        assert_ne!(db & FULL, 0);
        assert_ne!((db << 1) & FULL, 0);
        assert_ne!((db << (N2 - 1)) & FULL, 0);
        assert_eq!(((db >> (N2 - 1)) << (N2 - 1)) & FULL, 0);
    }

    #[test]
    fn test_cross_boundary_shift() {
        // Bit 63 of lo moves into bit 0 of hi and back.
        let db = DoubleBitmapLo::new(0, 1 << 63);
        let up = db << 1;
        assert_eq!(up.hi(), 1);
        assert_eq!(up.lo(), 0);
        assert_eq!(up >> 1, db);
    }

    #[test]
    fn test_with_bit_targets_active_half() {
        let hi = DoubleBitmapHi::new(0, 0).with_bit(5);
        assert_eq!(hi.hi(), 1 << 5);
        assert_eq!(hi.lo(), 0);

        let lo = DoubleBitmapLo::new(0, 0).with_bit(5);
        assert_eq!(lo.lo(), 1 << 5);
        assert_eq!(lo.count_ones(), 1);
    }
}
