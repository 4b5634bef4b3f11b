//! Line-oriented interface for a human player.

use std::cell::RefCell;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use log::warn;

use crate::bitboard::{iter_ones, pop_count, Bitboard, N};
use crate::board::Board;
use crate::color::Color;
use crate::error::OthelloError;
use crate::player::Player;
use crate::position::Position;
use crate::r#move::Move;

/// Labels for legal moves, in ascending square order.
pub const SYMBOLS: &str = "123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Typed instead of a label to take back the previous turn.
pub const UNDO_COMMAND: &str = "undo";

/// Board text with the squares in `marked` replaced by successive characters
/// of `labels`.
pub fn display_moves(board: &Board, marked: Bitboard, labels: &str) -> String {
    let mut cells: Vec<char> = board.to_string().chars().collect();
    let mut labels = labels.chars();
    for idx in iter_ones(marked) {
        let (row, col) = ((idx / N) as usize, (idx % N) as usize);
        // Each rendered row is N cells plus a newline.
        cells[row * (N as usize + 1) + col] = labels.next().unwrap_or('?');
    }
    cells.into_iter().collect()
}

pub struct TextPlayer<R, W> {
    color: Color,
    input: R,
    output: RefCell<W>,
}

impl TextPlayer<BufReader<Stdin>, Stdout> {
    pub fn stdio(color: Color) -> Self {
        TextPlayer::new(color, BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> TextPlayer<R, W> {
    pub fn new(color: Color, input: R, output: W) -> Self {
        TextPlayer {
            color,
            input,
            output: RefCell::new(output),
        }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output.into_inner())
    }

    fn say(&self, text: &str) {
        let mut out = self.output.borrow_mut();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            warn!("{} text player could not write: {e}", self.color);
        }
    }

    fn try_say(&self, text: &str) -> Result<(), OthelloError> {
        let mut out = self.output.borrow_mut();
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Map one line of input to a move, or `None` if it names no legal move.
    fn parse_choice(line: &str, legal: Bitboard) -> Option<Move> {
        let word = line.trim();
        if word.eq_ignore_ascii_case(UNDO_COMMAND) {
            return Some(Move::Undo);
        }
        let mut chars = word.chars();
        let c = chars.next()?.to_ascii_uppercase();
        if chars.next().is_some() {
            return None;
        }
        let choice = SYMBOLS.find(c)?;
        if choice >= pop_count(legal) as usize {
            return None;
        }
        iter_ones(legal)
            .nth(choice)
            .map(|idx| Move::place(Position::from_index(idx)))
    }
}

impl<R, W> Player for TextPlayer<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn color(&self) -> Color {
        self.color
    }

    fn get_move(&mut self, board: &Board, legal: Bitboard) -> Result<Move, OthelloError> {
        debug_assert!(legal != 0, "asked for a move without legal moves");
        self.try_say(&format!(
            "Legal moves for {}:\n{}\n",
            self.color.to_char(),
            display_moves(board, legal, SYMBOLS)
        ))?;

        let mut line = String::new();
        loop {
            self.try_say("Enter move> ")?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(OthelloError::InputClosed);
            }
            if let Some(mv) = Self::parse_choice(&line, legal) {
                return Ok(mv);
            }
            warn!("{} entered invalid move {:?}", self.color, line.trim());
            self.try_say("Invalid move, try again\n")?;
        }
    }

    fn notify_move(&mut self, before: &Board, position: Bitboard) {
        let opponent = self.color.opposite();
        let label = opponent.to_char().to_ascii_uppercase().to_string();
        self.say(&format!(
            "{} player chose this move:\n{}",
            opponent,
            display_moves(before, position, &label)
        ));
    }

    fn game_over(&mut self, board: &Board) {
        self.say(&format!(
            "Final board:\n{}\nCount for x: {}\tcount for o: {}\n",
            board,
            board.count(Color::Dark),
            board.count(Color::Light)
        ));
    }

    fn display_board(&self, board: &Board) {
        self.say(&format!("{}\n", board));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::square;
    use crate::moves::all_legal_moves;
    use std::io::Cursor;

    fn player(input: &str) -> TextPlayer<Cursor<Vec<u8>>, Vec<u8>> {
        TextPlayer::new(Color::Dark, Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(player: TextPlayer<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(player.into_parts().1).expect("utf8 output")
    }

    #[test]
    fn test_display_moves_labels_in_order() {
        let board = Board::standard();
        let legal = all_legal_moves(&board, Color::Dark);
        let text = display_moves(&board, legal, SYMBOLS);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2], "...1....");
        assert_eq!(lines[3], "..2ox...");
        assert_eq!(lines[4], "...xo3..");
        assert_eq!(lines[5], "....4...");
    }

    #[test]
    fn test_get_move_by_label() {
        let board = Board::standard();
        let legal = all_legal_moves(&board, Color::Dark);
        let mut p = player("3\n");
        assert_eq!(p.get_move(&board, legal).expect("move"), Move::Place(square(4, 5)));
        let out = output(p);
        assert!(out.starts_with("Legal moves for x:\n"));
        assert!(out.ends_with("Enter move> "));
    }

    #[test]
    fn test_get_move_retries_invalid_input() {
        let board = Board::standard();
        let legal = all_legal_moves(&board, Color::Dark);
        let mut p = player("9\nzz\n\n1\n");
        assert_eq!(p.get_move(&board, legal).expect("move"), Move::Place(square(2, 3)));
        assert_eq!(output(p).matches("Invalid move, try again").count(), 3);
    }

    #[test]
    fn test_get_move_undo() {
        let board = Board::standard();
        let legal = all_legal_moves(&board, Color::Dark);
        let mut p = player("  UNDO \n");
        assert_eq!(p.get_move(&board, legal).expect("move"), Move::Undo);
    }

    #[test]
    fn test_get_move_input_closed() {
        let board = Board::standard();
        let legal = all_legal_moves(&board, Color::Dark);
        let mut p = player("x\n");
        assert!(matches!(
            p.get_move(&board, legal),
            Err(OthelloError::InputClosed)
        ));
    }

    #[test]
    fn test_lowercase_labels_accepted() {
        let legal: Bitboard = (1 << 12) - 1;
        assert_eq!(
            TextPlayer::<Cursor<Vec<u8>>, Vec<u8>>::parse_choice("a\n", legal),
            Some(Move::Place(1 << 9))
        );
    }

    #[test]
    fn test_notify_and_game_over() {
        let board = Board::standard();
        let mut p = player("");
        p.notify_move(&board, square(2, 4));
        p.game_over(&board);
        let out = output(p);
        assert!(out.starts_with("Light player chose this move:\n"));
        assert!(out.contains("....O..."));
        assert!(out.contains("Count for x: 2\tcount for o: 2"));
    }
}
