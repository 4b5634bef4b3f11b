use crate::color::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    DarkWin,
    LightWin,
    Draw,
}

impl GameOutcome {
    /// Classify a dark-minus-light disc difference.
    pub fn from_tile_difference(difference: i32) -> Self {
        match difference.signum() {
            1 => GameOutcome::DarkWin,
            -1 => GameOutcome::LightWin,
            _ => GameOutcome::Draw,
        }
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            GameOutcome::DarkWin => Some(Color::Dark),
            GameOutcome::LightWin => Some(Color::Light),
            GameOutcome::Draw => None,
        }
    }

    pub fn is_win_for(&self, color: Color) -> bool {
        self.winner() == Some(color)
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, GameOutcome::Draw)
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::DarkWin => write!(f, "Dark wins"),
            GameOutcome::LightWin => write!(f, "Light wins"),
            GameOutcome::Draw => write!(f, "Draw"),
        }
    }
}
