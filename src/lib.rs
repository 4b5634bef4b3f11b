pub mod bitboard;
pub mod board;
pub mod color;
pub mod config;
pub mod error;
pub mod game;
pub mod mcts;
pub mod r#move;
pub mod moves;
pub mod outcome;
pub mod player;
pub mod position;
pub mod random;
pub mod scan;
pub mod stop;
pub mod text;
pub mod tree;

#[cfg(feature = "python")]
extern crate pyo3;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule(gil_used = false)]
fn bithello(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use color::Color;
    use python_bindings::*;
    m.add_class::<PyBoard>()?;
    m.add_class::<PyGame>()?;
    m.add_class::<PyGameOutcome>()?;
    m.add_class::<PyMctsPlayer>()?;
    m.add("DARK", Color::Dark as i8)?;
    m.add("LIGHT", Color::Light as i8)?;
    Ok(())
}

#[cfg(feature = "python")]
mod python_bindings {
    use std::sync::Arc;

    use super::*;
    use crate::bitboard::{iter_ones, Bitboard};
    use crate::board::Board;
    use crate::color::Color;
    use crate::config::SearchConfig;
    use crate::error::OthelloError;
    use crate::game::Game;
    use crate::mcts::MctsPlayer;
    use crate::moves::all_legal_moves;
    use crate::outcome::GameOutcome;
    use crate::player::Player;
    use crate::position::Position;
    use crate::r#move::Move;
    use crate::stop::{StopByCount, StopByDuration, StopCondition};

    fn value_error(msg: impl Into<String>) -> PyErr {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(msg.into())
    }

    fn to_py_err(err: OthelloError) -> PyErr {
        match err {
            OthelloError::IllegalMove { .. } | OthelloError::InvalidConfig(_) => {
                value_error(err.to_string())
            }
            _ => PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(err.to_string()),
        }
    }

    fn color_from(value: i8) -> PyResult<Color> {
        Color::from_int(value).ok_or_else(|| value_error("color must be 1 (dark) or -1 (light)"))
    }

    fn position_from(row: usize, col: usize) -> PyResult<Position> {
        Position::try_new(row, col).ok_or_else(|| value_error("row and col must be between 0 and 7"))
    }

    fn square_from(row: usize, col: usize) -> PyResult<Bitboard> {
        position_from(row, col).map(|pos| pos.to_bitboard())
    }

    fn squares(bits: Bitboard) -> Vec<(usize, usize)> {
        iter_ones(bits)
            .map(Position::from_index)
            .map(|p| (p.row as usize, p.col as usize))
            .collect()
    }

    #[pyclass(name = "Board")]
    #[derive(Clone)]
    pub struct PyBoard {
        board: Board,
    }

    #[pymethods]
    impl PyBoard {
        #[new]
        pub fn new(rows: Vec<String>) -> PyResult<Self> {
            let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
            Board::try_from_rows(&rows)
                .map(|board| PyBoard { board })
                .map_err(to_py_err)
        }

        #[staticmethod]
        pub fn standard() -> Self {
            PyBoard {
                board: Board::standard(),
            }
        }

        pub fn dark(&self) -> u64 {
            self.board.dark()
        }

        pub fn light(&self) -> u64 {
            self.board.light()
        }

        pub fn get_piece(&self, row: usize, col: usize) -> PyResult<Option<i8>> {
            let pos = position_from(row, col)?;
            Ok(self.board.get_piece(&pos).map(|c| c as i8))
        }

        pub fn count(&self, color: i8) -> PyResult<u32> {
            Ok(self.board.count(color_from(color)?))
        }

        pub fn tile_difference(&self) -> i32 {
            self.board.tile_difference()
        }

        pub fn legal_moves(&self, color: i8) -> PyResult<Vec<(usize, usize)>> {
            Ok(squares(all_legal_moves(&self.board, color_from(color)?)))
        }

        pub fn play(&self, color: i8, row: usize, col: usize) -> PyResult<PyBoard> {
            let color = color_from(color)?;
            let position = square_from(row, col)?;
            crate::moves::try_effect_move(&self.board, color, position)
                .map(|board| PyBoard { board })
                .map_err(to_py_err)
        }

        pub fn __str__(&self) -> String {
            self.board.to_string()
        }

        pub fn __repr__(&self) -> String {
            format!(
                "Board(dark={}, light={})",
                self.board.count(Color::Dark),
                self.board.count(Color::Light)
            )
        }

        pub fn __eq__(&self, other: &PyBoard) -> bool {
            self.board == other.board
        }
    }

    #[pyclass(name = "Game")]
    pub struct PyGame {
        game: Game,
    }

    #[pymethods]
    impl PyGame {
        #[new]
        pub fn new(board: &PyBoard, first: i8) -> PyResult<Self> {
            Ok(PyGame {
                game: Game::new(board.board, color_from(first)?),
            })
        }

        #[staticmethod]
        pub fn standard() -> Self {
            PyGame {
                game: Game::standard(),
            }
        }

        pub fn board(&self) -> PyBoard {
            PyBoard {
                board: *self.game.board(),
            }
        }

        pub fn turn(&self) -> i8 {
            self.game.to_move() as i8
        }

        pub fn move_count(&self) -> usize {
            self.game.history().len()
        }

        pub fn legal_moves(&self) -> Vec<(usize, usize)> {
            squares(self.game.legal_moves())
        }

        pub fn make_move(&mut self, row: usize, col: usize) -> PyResult<bool> {
            Ok(self.game.make_move(square_from(row, col)?))
        }

        pub fn pass_turn(&mut self) -> bool {
            self.game.pass()
        }

        pub fn undo_turn(&mut self, color: i8) -> PyResult<bool> {
            Ok(self.game.undo_turn(color_from(color)?))
        }

        pub fn is_over(&self) -> bool {
            self.game.is_over()
        }

        pub fn tile_difference(&self) -> i32 {
            self.game.tile_difference()
        }

        pub fn outcome(&self) -> Option<PyGameOutcome> {
            self.game.outcome().map(|o| PyGameOutcome { outcome: o })
        }

        pub fn clone(&self) -> PyGame {
            PyGame {
                game: self.game.clone(),
            }
        }

        pub fn __str__(&self) -> String {
            self.game.board().to_string()
        }

        pub fn __repr__(&self) -> String {
            format!(
                "Game(turn={}, moves={}, over={})",
                self.game.to_move(),
                self.game.history().len(),
                self.game.is_over()
            )
        }
    }

    #[pyclass(name = "MctsPlayer")]
    pub struct PyMctsPlayer {
        player: MctsPlayer,
    }

    #[pymethods]
    impl PyMctsPlayer {
        /// Budget is `playouts` evaluations, or `millis` of wall time when given.
        #[new]
        #[pyo3(signature = (color, playouts=None, millis=None, threads=None, seed=None))]
        pub fn new(
            color: i8,
            playouts: Option<u64>,
            millis: Option<u64>,
            threads: Option<usize>,
            seed: Option<u64>,
        ) -> PyResult<Self> {
            let stop: Arc<dyn StopCondition> = match (playouts, millis) {
                (Some(_), Some(_)) => {
                    return Err(value_error("give either playouts or millis, not both"))
                }
                (_, Some(ms)) => Arc::new(StopByDuration::from_millis(ms)),
                (Some(n), None) => Arc::new(StopByCount::new(n)),
                (None, None) => Arc::new(StopByCount::default()),
            };
            let mut config = SearchConfig::from_env().map_err(to_py_err)?;
            if let Some(threads) = threads {
                config = config.with_threads(threads);
            }
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            MctsPlayer::new(color_from(color)?, stop, config)
                .map(|player| PyMctsPlayer { player })
                .map_err(to_py_err)
        }

        pub fn threads(&self) -> usize {
            self.player.config().threads
        }

        /// Best move as `(row, col)`, or `None` when there is no legal move.
        pub fn choose_move(&mut self, board: &PyBoard) -> PyResult<Option<(usize, usize)>> {
            let legal = all_legal_moves(&board.board, self.player.color());
            if legal == 0 {
                return Ok(None);
            }
            match self.player.get_move(&board.board, legal).map_err(to_py_err)? {
                Move::Place(bits) => Ok(Position::from_bitboard(bits)
                    .map(|p| (p.row as usize, p.col as usize))),
                Move::Undo => Ok(None),
            }
        }
    }

    #[pyclass(name = "GameOutcome")]
    #[derive(Clone, Copy, Debug)]
    pub struct PyGameOutcome {
        outcome: GameOutcome,
    }

    #[pymethods]
    impl PyGameOutcome {
        pub fn winner(&self) -> Option<i8> {
            self.outcome.winner().map(|color| color as i8)
        }

        pub fn is_draw(&self) -> bool {
            self.outcome.is_draw()
        }

        pub fn __str__(&self) -> String {
            self.outcome.to_string()
        }

        pub fn __repr__(&self) -> String {
            format!("GameOutcome({})", self.outcome)
        }

        pub fn __eq__(&self, other: &PyGameOutcome) -> bool {
            self.outcome == other.outcome
        }
    }
}
