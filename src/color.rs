#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Color {
    Dark = 1,
    Light = -1,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Dark, Color::Light];

    pub fn opposite(&self) -> Color {
        match self {
            Color::Dark => Color::Light,
            Color::Light => Color::Dark,
        }
    }

    /// Board-text character for this colour's discs.
    pub fn to_char(&self) -> char {
        match self {
            Color::Dark => 'x',
            Color::Light => 'o',
        }
    }

    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'x' | 'X' => Some(Color::Dark),
            'o' | 'O' => Some(Color::Light),
            _ => None,
        }
    }

    pub fn from_int(i: i8) -> Option<Color> {
        match i {
            1 => Some(Color::Dark),
            -1 => Some(Color::Light),
            _ => None,
        }
    }

    /// `+1` for dark, `-1` for light. Multiplying a dark-minus-light score by
    /// this gives the score from this colour's point of view.
    pub fn sign(&self) -> i32 {
        *self as i8 as i32
    }

    pub fn index(&self) -> usize {
        match self {
            Color::Dark => 0,
            Color::Light => 1,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let color_str = match self {
            Color::Dark => "Dark",
            Color::Light => "Light",
        };
        write!(f, "{}", color_str)
    }
}
