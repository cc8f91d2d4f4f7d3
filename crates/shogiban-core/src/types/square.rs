//! Board squares
//!
//! Index layout: `index = rank * 9 + file`, where file 0 is the leftmost
//! column (the 9-file in shogi notation) and rank 0 is the top row (rank `a`,
//! White's back rank).

use std::fmt;
use std::str::FromStr;

use crate::error::SquareParseError;

/// Number of squares on the board
pub const BOARD_SQUARES: usize = 81;

/// Square on the board (0-80).
///
/// Only constructible on the board: outside this crate through [`Square::new`],
/// [`Square::from_index`] or USI text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(pub(crate) u8);

impl Square {
    /// Create square from internal file (0 = 9-file) and rank (0 = rank a)
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Self {
        debug_assert!(file < 9 && rank < 9);
        Square(rank * 9 + file)
    }

    /// Square from a raw index, `None` when `index >= 81`
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < BOARD_SQUARES { Some(Square(index as u8)) } else { None }
    }

    /// Column (0-8, left to right)
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 9
    }

    /// Row (0-8, top to bottom)
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 9
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw index as stored in game records
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Point-symmetric square (opponent's perspective)
    #[inline]
    pub const fn flip(self) -> Self {
        Square(80 - self.0)
    }

    /// Square reached by moving `dr` rows and `df` files, if still on the board
    #[inline]
    pub fn offset(self, dr: i8, df: i8) -> Option<Square> {
        let rank = self.rank() as i8 + dr;
        let file = self.file() as i8 + df;
        if (0..9).contains(&rank) && (0..9).contains(&file) {
            Some(Square::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Iterate over all 81 squares in index order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SQUARES as u8).map(Square)
    }
}

/// USI notation, e.g. index 0 is "9a" and index 80 is "1i"
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = b'9' - self.file();
        let rank = b'a' + self.rank();
        write!(f, "{}{}", file as char, rank as char)
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(SquareParseError(s.to_string()));
        };
        let file_idx = match file {
            '1'..='9' => b'9' - file as u8,
            _ => return Err(SquareParseError(s.to_string())),
        };
        let rank_idx = match rank {
            'a'..='i' => rank as u8 - b'a',
            _ => return Err(SquareParseError(s.to_string())),
        };
        Ok(Square::new(file_idx, rank_idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_operations() {
        let sq: Square = "5e".parse().unwrap();
        assert_eq!(sq.file(), 4);
        assert_eq!(sq.rank(), 4);
        assert_eq!(sq.index(), 40);
        assert_eq!(sq.flip(), sq);
    }

    #[test]
    fn test_square_display_matches_layout() {
        assert_eq!(Square(0).to_string(), "9a");
        assert_eq!(Square(8).to_string(), "1a");
        assert_eq!(Square(80).to_string(), "1i");
        // row 2, col 6
        assert_eq!(Square(24).to_string(), "3c");
        assert_eq!("3c".parse::<Square>().unwrap(), Square(24));
    }

    #[test]
    fn test_square_parse_errors() {
        assert!("".parse::<Square>().is_err());
        assert!("5".parse::<Square>().is_err());
        assert!("0a".parse::<Square>().is_err());
        assert!("5j".parse::<Square>().is_err());
        assert!("5ee".parse::<Square>().is_err());
    }

    #[test]
    fn test_offset_stays_on_board() {
        let corner = Square(0);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        assert_eq!(corner.offset(1, 1), Some(Square(10)));
        assert_eq!(Square(80).offset(1, 0), None);
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Square::from_index(80), Some(Square(80)));
        assert_eq!(Square::from_index(81), None);
    }
}
