use std::io;

use thiserror::Error;

use crate::bitboard::Bitboard;
use crate::color::Color;

#[derive(Debug, Error)]
pub enum OthelloError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
    /// `position` is the mask the player offered; it may be empty or hold
    /// more than one bit when the player itself is at fault.
    #[error("Illegal move for {color}: {position:#018x}")]
    IllegalMove { color: Color, position: Bitboard },
    #[error("Failed to build search thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("Input closed")]
    InputClosed,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_move_message() {
        let err = OthelloError::IllegalMove {
            color: Color::Light,
            position: 0x80,
        };
        assert_eq!(
            err.to_string(),
            "Illegal move for Light: 0x0000000000000080"
        );
    }

    #[test]
    fn test_io_conversion() {
        let err: OthelloError = io::Error::other("boom").into();
        assert!(matches!(err, OthelloError::Io(_)));
    }
}
