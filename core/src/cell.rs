use rand::Rng;
use rand::RngExt;
use serde::{Deserialize, Serialize};

/// The closed seven-value ball palette.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Blue,
    Cyan,
    Red,
    Brown,
    Green,
    Yellow,
    Magenta,
}

impl Color {
    pub const COUNT: usize = 7;

    /// Every color, positioned at its own `index`.
    pub const ALL: [Color; Self::COUNT] = [
        Color::Blue,
        Color::Cyan,
        Color::Red,
        Color::Brown,
        Color::Green,
        Color::Yellow,
        Color::Magenta,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Color> {
        if index < Self::COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Uniform pick over the palette.
    pub fn random<R: Rng>(rng: &mut R) -> Color {
        Self::ALL[rng.random_range(0..Self::COUNT)]
    }
}

/// Canonical content of one board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Ball(Color),
}

impl Cell {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn ball(self) -> Option<Color> {
        match self {
            Self::Ball(color) => Some(color),
            Self::Empty => None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_lookup_round_trips_both_ways() {
        for color in Color::ALL {
            assert_eq!(Color::from_index(color.index()), Some(color));
        }
        assert_eq!(Color::from_index(Color::COUNT), None);
    }
}
