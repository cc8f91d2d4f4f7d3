//! Square set over the 81 board squares

use super::Square;

/// Bitboard (81 squares)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(pub(crate) u128); // lower 81 bits

impl Bitboard {
    pub const EMPTY: Self = Bitboard(0);

    /// All squares of one file (0 = 9-file)
    pub fn file_mask(file: u8) -> Self {
        debug_assert!(file < 9);
        (0..9).map(|rank| Square::new(file, rank)).collect()
    }

    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.0 |= 1u128 << sq.index();
    }

    #[inline]
    pub fn test(&self, sq: Square) -> bool {
        (self.0 >> sq.index()) & 1 != 0
    }

    #[inline]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let lsb = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(Square(lsb))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl Iterator for Bitboard {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        self.pop_lsb()
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut bb = Bitboard::EMPTY;
        for sq in iter {
            bb.set(sq);
        }
        bb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitboard_operations() {
        let mut bb = Bitboard::EMPTY;
        assert!(bb.is_empty());

        let sq: Square = "5e".parse().unwrap();
        bb.set(sq);
        assert!(bb.test(sq));
        assert!(!bb.test("5d".parse().unwrap()));
        assert_eq!(bb.pop_lsb(), Some(sq));
        assert!(bb.is_empty());
    }

    #[test]
    fn test_file_mask() {
        let mask = Bitboard::file_mask(2);
        let squares: Vec<Square> = mask.collect();
        assert_eq!(squares.len(), 9);
        assert!(squares.iter().all(|sq| sq.file() == 2));
        assert_eq!(squares[0].to_string(), "7a");
    }

    #[test]
    fn test_iteration_in_index_order() {
        let bb: Bitboard = [Square(80), Square(3), Square(40)].into_iter().collect();
        let squares: Vec<Square> = bb.collect();
        assert_eq!(squares, vec![Square(3), Square(40), Square(80)]);
    }
}
