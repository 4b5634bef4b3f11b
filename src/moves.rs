use crate::bitboard::{is_single, Bitboard, N};
use crate::board::Board;
use crate::color::Color;
use crate::error::OthelloError;
use crate::scan::{
    BottomLeftToTopRight, BottomRightToTopLeft, BottomToTop, Direction, LeftToRight, RightToLeft,
    TopLeftToBottomRight, TopRightToBottomLeft, TopToBottom,
};

/// Legal moves for `mine` that capture along direction `D`.
///
/// Every line governed by `D::START` is scanned at once. Per line the scan
/// tracks whether it has seen one of our discs (`saw_mine`) or a run of
/// opponent discs after one of ours (`saw_theirs`); an empty square reached
/// in the second state is a legal move.
#[inline]
pub fn legal_moves<D: Direction>(mine: Bitboard, theirs: Bitboard) -> Bitboard {
    let mut mask = D::START;
    let mut saw_mine: Bitboard = 0;
    let mut saw_theirs: Bitboard = 0;
    let mut valid: Bitboard = 0;

    for _ in 0..N {
        let m = mask & mine;
        let t = mask & theirs;
        valid |= saw_theirs & !m & !t;
        saw_theirs = D::next((saw_mine | saw_theirs) & t);
        saw_mine = D::next(m);
        mask = D::next(mask);
    }

    valid
}

/// Union of [`legal_moves`] over all eight directions.
#[inline]
pub fn legal_moves_for(mine: Bitboard, theirs: Bitboard) -> Bitboard {
    legal_moves::<LeftToRight>(mine, theirs)
        | legal_moves::<RightToLeft>(mine, theirs)
        | legal_moves::<TopToBottom>(mine, theirs)
        | legal_moves::<BottomToTop>(mine, theirs)
        | legal_moves::<BottomLeftToTopRight>(mine, theirs)
        | legal_moves::<BottomRightToTopLeft>(mine, theirs)
        | legal_moves::<TopLeftToBottomRight>(mine, theirs)
        | legal_moves::<TopRightToBottomLeft>(mine, theirs)
}

#[hotpath::measure]
pub fn all_legal_moves(board: &Board, color: Color) -> Bitboard {
    let (mine, theirs) = board.split(color);
    legal_moves_for(mine, theirs)
}

/// Opponent discs flipped along `D` by a disc placed at `start`.
#[inline]
pub fn find_flipped<D: Direction>(start: Bitboard, mine: Bitboard, theirs: Bitboard) -> Bitboard {
    let mut mask = D::next(start & D::INSIDE);
    let mut flipped: Bitboard = 0;

    while mask & D::INSIDE & theirs != 0 {
        flipped |= mask;
        mask = D::next(mask);
    }

    if mask & mine != 0 {
        flipped
    } else {
        0
    }
}

#[inline]
pub fn all_flipped(mine: Bitboard, theirs: Bitboard, position: Bitboard) -> Bitboard {
    find_flipped::<LeftToRight>(position, mine, theirs)
        | find_flipped::<RightToLeft>(position, mine, theirs)
        | find_flipped::<TopToBottom>(position, mine, theirs)
        | find_flipped::<BottomToTop>(position, mine, theirs)
        | find_flipped::<BottomLeftToTopRight>(position, mine, theirs)
        | find_flipped::<BottomRightToTopLeft>(position, mine, theirs)
        | find_flipped::<TopLeftToBottomRight>(position, mine, theirs)
        | find_flipped::<TopRightToBottomLeft>(position, mine, theirs)
}

/// Board after `color` plays at the single-bit `position`. An occupied
/// position, or one that flips nothing, leaves the board as it was.
#[hotpath::measure]
pub fn effect_move(board: &Board, color: Color, position: Bitboard) -> Board {
    debug_assert!(is_single(position), "position must be a single bit");
    if board.occupied() & position != 0 {
        return *board;
    }

    let (mine, theirs) = board.split(color);
    let flipped = all_flipped(mine, theirs, position);
    if flipped == 0 {
        return *board;
    }

    Board::from_split(color, (mine ^ flipped) | position, theirs ^ flipped)
}

/// Like [`effect_move`], but an illegal position is an error.
pub fn try_effect_move(board: &Board, color: Color, position: Bitboard) -> Result<Board, OthelloError> {
    let illegal = OthelloError::IllegalMove { color, position };
    if !is_single(position) || board.occupied() & position != 0 {
        return Err(illegal);
    }

    let (mine, theirs) = board.split(color);
    let flipped = all_flipped(mine, theirs, position);
    if flipped == 0 {
        return Err(illegal);
    }

    Ok(Board::from_split(color, (mine ^ flipped) | position, theirs ^ flipped))
}
