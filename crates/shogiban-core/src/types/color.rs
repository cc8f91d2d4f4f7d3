//! Side to move

use std::fmt;

/// Player colour. Black (sente) moves first and starts on rows 6-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    White = 1,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    /// Opposite colour
    #[inline]
    pub const fn opposite(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Array index (Black = 0, White = 1)
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Row delta of a forward step.
    ///
    /// Black advances toward row 0, White toward row 8.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Black => -1,
            Color::White => 1,
        }
    }

    /// Whether `rank` lies in this colour's promotion zone
    /// (rows 0-2 for Black, rows 6-8 for White).
    #[inline]
    pub const fn in_promotion_zone(self, rank: u8) -> bool {
        match self {
            Color::Black => rank <= 2,
            Color::White => rank >= 6,
        }
    }

    /// Distance of `rank` from this colour's last row (0 = last row).
    #[inline]
    pub const fn rows_to_last(self, rank: u8) -> u8 {
        match self {
            Color::Black => rank,
            Color::White => 8 - rank,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.opposite()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("BLACK"),
            Color::White => f.write_str("WHITE"),
        }
    }
}
