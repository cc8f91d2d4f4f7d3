use std::fmt;

use super::Board;
use crate::types::{Color, Square};

/// Text diagram: White's hand, the grid from rank a down, Black's hand
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_hand(f, Color::White)?;
        writeln!(f, "   9  8  7  6  5  4  3  2  1")?;
        for rank in 0..9u8 {
            write!(f, " ")?;
            for file in 0..9 {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{:>3}", piece.symbol())?,
                    None => write!(f, "  .")?,
                }
            }
            writeln!(f, "  {}", (b'a' + rank) as char)?;
        }
        self.fmt_hand(f, Color::Black)?;
        write!(f, "{} to move", self.side_to_move())
    }
}

impl Board {
    fn fmt_hand(&self, f: &mut fmt::Formatter<'_>, color: Color) -> fmt::Result {
        write!(f, "{color} hand:")?;
        let mut empty = true;
        for (piece_type, count) in self.hand(color) {
            empty = false;
            write!(f, " {}", piece_type.symbol().to_ascii_uppercase())?;
            if count > 1 {
                write!(f, "x{count}")?;
            }
        }
        if empty {
            write!(f, " -")?;
        }
        writeln!(f)
    }
}
