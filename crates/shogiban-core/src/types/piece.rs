//! Piece types and pieces

use std::fmt;

use super::Color;

/// Piece types, including the six promoted forms.
///
/// The discriminants are the stable wire codes used in saved game records
/// (PAWN = 1 ... ROOK = 7, KING = 8, PROMOTED_PAWN = 9 ... PROMOTED_ROOK = 14).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceType {
    Pawn = 1,
    Lance = 2,
    Knight = 3,
    Silver = 4,
    Gold = 5,
    Bishop = 6,
    Rook = 7,
    King = 8,
    PromotedPawn = 9,
    PromotedLance = 10,
    PromotedKnight = 11,
    PromotedSilver = 12,
    PromotedBishop = 13,
    PromotedRook = 14,
}

/// Hand array ordering (King and promoted pieces are never held)
pub const HAND_ORDER: [PieceType; 7] = [
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Gold,
    PieceType::Silver,
    PieceType::Knight,
    PieceType::Lance,
    PieceType::Pawn,
];

/// Number of distinct hand piece types
pub const HAND_KINDS: usize = HAND_ORDER.len();

const N: (i8, i8) = (-1, 0);
const S: (i8, i8) = (1, 0);
const E: (i8, i8) = (0, 1);
const W: (i8, i8) = (0, -1);
const NE: (i8, i8) = (-1, 1);
const NW: (i8, i8) = (-1, -1);
const SE: (i8, i8) = (1, 1);
const SW: (i8, i8) = (1, -1);

// Step and slide directions as (row delta, file delta) for Black.
// White negates the row delta.
const PAWN_STEPS: &[(i8, i8)] = &[N];
const KNIGHT_STEPS: &[(i8, i8)] = &[(-2, -1), (-2, 1)];
const SILVER_STEPS: &[(i8, i8)] = &[NW, N, NE, SW, SE];
const GOLD_STEPS: &[(i8, i8)] = &[NW, N, NE, W, E, S];
const KING_STEPS: &[(i8, i8)] = &[NW, N, NE, W, E, SW, S, SE];
const ORTHOGONAL: &[(i8, i8)] = &[N, S, E, W];
const DIAGONAL: &[(i8, i8)] = &[NE, NW, SE, SW];
const FORWARD: &[(i8, i8)] = &[N];
const NONE: &[(i8, i8)] = &[];

impl PieceType {
    pub const ALL: [PieceType; 14] = [
        PieceType::Pawn,
        PieceType::Lance,
        PieceType::Knight,
        PieceType::Silver,
        PieceType::Gold,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::King,
        PieceType::PromotedPawn,
        PieceType::PromotedLance,
        PieceType::PromotedKnight,
        PieceType::PromotedSilver,
        PieceType::PromotedBishop,
        PieceType::PromotedRook,
    ];

    /// Wire code (1-14)
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Piece type from its wire code
    pub const fn from_code(code: u8) -> Option<PieceType> {
        if code >= 1 && code <= 14 { Some(Self::ALL[code as usize - 1]) } else { None }
    }

    /// Demoted (base) form; identity for unpromoted types
    pub const fn base(self) -> PieceType {
        match self {
            PieceType::PromotedPawn => PieceType::Pawn,
            PieceType::PromotedLance => PieceType::Lance,
            PieceType::PromotedKnight => PieceType::Knight,
            PieceType::PromotedSilver => PieceType::Silver,
            PieceType::PromotedBishop => PieceType::Bishop,
            PieceType::PromotedRook => PieceType::Rook,
            other => other,
        }
    }

    /// Promoted form, `None` for Gold, King and already promoted types
    pub const fn promote(self) -> Option<PieceType> {
        match self {
            PieceType::Pawn => Some(PieceType::PromotedPawn),
            PieceType::Lance => Some(PieceType::PromotedLance),
            PieceType::Knight => Some(PieceType::PromotedKnight),
            PieceType::Silver => Some(PieceType::PromotedSilver),
            PieceType::Bishop => Some(PieceType::PromotedBishop),
            PieceType::Rook => Some(PieceType::PromotedRook),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_promoted(self) -> bool {
        self as u8 >= PieceType::PromotedPawn as u8
    }

    #[inline]
    pub const fn can_promote(self) -> bool {
        self.promote().is_some()
    }

    /// Index into a hand array, `None` for King and promoted types
    pub const fn hand_index(self) -> Option<usize> {
        match self {
            PieceType::Rook => Some(0),
            PieceType::Bishop => Some(1),
            PieceType::Gold => Some(2),
            PieceType::Silver => Some(3),
            PieceType::Knight => Some(4),
            PieceType::Lance => Some(5),
            PieceType::Pawn => Some(6),
            _ => None,
        }
    }

    /// Display symbol in SFEN letters (lowercase; promoted types prefixed with `+`)
    pub const fn symbol(self) -> &'static str {
        match self {
            PieceType::Pawn => "p",
            PieceType::Lance => "l",
            PieceType::Knight => "n",
            PieceType::Silver => "s",
            PieceType::Gold => "g",
            PieceType::Bishop => "b",
            PieceType::Rook => "r",
            PieceType::King => "k",
            PieceType::PromotedPawn => "+p",
            PieceType::PromotedLance => "+l",
            PieceType::PromotedKnight => "+n",
            PieceType::PromotedSilver => "+s",
            PieceType::PromotedBishop => "+b",
            PieceType::PromotedRook => "+r",
        }
    }

    /// Single-step directions (Black orientation)
    pub(crate) const fn steps(self) -> &'static [(i8, i8)] {
        match self {
            PieceType::Pawn => PAWN_STEPS,
            PieceType::Knight => KNIGHT_STEPS,
            PieceType::Silver => SILVER_STEPS,
            PieceType::Gold
            | PieceType::PromotedPawn
            | PieceType::PromotedLance
            | PieceType::PromotedKnight
            | PieceType::PromotedSilver => GOLD_STEPS,
            PieceType::King => KING_STEPS,
            PieceType::PromotedBishop => ORTHOGONAL,
            PieceType::PromotedRook => DIAGONAL,
            PieceType::Lance | PieceType::Bishop | PieceType::Rook => NONE,
        }
    }

    /// Sliding directions (Black orientation)
    pub(crate) const fn slides(self) -> &'static [(i8, i8)] {
        match self {
            PieceType::Lance => FORWARD,
            PieceType::Bishop | PieceType::PromotedBishop => DIAGONAL,
            PieceType::Rook | PieceType::PromotedRook => ORTHOGONAL,
            _ => NONE,
        }
    }

    /// Number of rows from the far edge on which an unpromoted piece of this
    /// type would have no further move (1 for pawn and lance, 2 for knight).
    pub const fn dead_rows(self) -> u8 {
        match self {
            PieceType::Pawn | PieceType::Lance => 1,
            PieceType::Knight => 2,
            _ => 0,
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A piece on the board: type plus owner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Piece { piece_type, color }
    }

    #[inline]
    pub const fn is_promoted(self) -> bool {
        self.piece_type.is_promoted()
    }

    /// Symbol with SFEN casing: uppercase for Black, lowercase for White
    pub fn symbol(self) -> String {
        match self.color {
            Color::Black => self.piece_type.symbol().to_ascii_uppercase(),
            Color::White => self.piece_type.symbol().to_string(),
        }
    }

    /// Parse a symbol produced by [`Piece::symbol`]
    pub fn from_symbol(symbol: &str) -> Option<Piece> {
        let (promoted, letter) = match symbol.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, symbol),
        };
        let mut chars = letter.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return None;
        };
        let color = if c.is_ascii_uppercase() { Color::Black } else { Color::White };
        let base = match c.to_ascii_lowercase() {
            'p' => PieceType::Pawn,
            'l' => PieceType::Lance,
            'n' => PieceType::Knight,
            's' => PieceType::Silver,
            'g' => PieceType::Gold,
            'b' => PieceType::Bishop,
            'r' => PieceType::Rook,
            'k' => PieceType::King,
            _ => return None,
        };
        let piece_type = if promoted { base.promote()? } else { base };
        Some(Piece::new(piece_type, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_and_promote_are_consistent() {
        for pt in PieceType::ALL {
            if let Some(promoted) = pt.promote() {
                assert!(promoted.is_promoted());
                assert_eq!(promoted.base(), pt);
            }
            assert!(!pt.base().is_promoted());
        }
        assert_eq!(PieceType::Gold.promote(), None);
        assert_eq!(PieceType::King.promote(), None);
        assert_eq!(PieceType::PromotedRook.promote(), None);
    }

    #[test]
    fn test_wire_codes() {
        for pt in PieceType::ALL {
            assert_eq!(PieceType::from_code(pt.code()), Some(pt));
        }
        assert_eq!(PieceType::Pawn.code(), 1);
        assert_eq!(PieceType::Rook.code(), 7);
        assert_eq!(PieceType::PromotedRook.code(), 14);
        assert_eq!(PieceType::from_code(0), None);
        assert_eq!(PieceType::from_code(15), None);
    }

    #[test]
    fn test_hand_index_matches_hand_order() {
        for (i, pt) in HAND_ORDER.iter().enumerate() {
            assert_eq!(pt.hand_index(), Some(i));
        }
        assert_eq!(PieceType::King.hand_index(), None);
        assert_eq!(PieceType::PromotedPawn.hand_index(), None);
    }

    #[test]
    fn test_piece_symbols() {
        let black_dragon = Piece::new(PieceType::PromotedRook, Color::Black);
        assert_eq!(black_dragon.symbol(), "+R");
        assert_eq!(Piece::from_symbol("+R"), Some(black_dragon));
        assert_eq!(Piece::from_symbol("k"), Some(Piece::new(PieceType::King, Color::White)));
        assert_eq!(Piece::from_symbol("+g"), None);
        assert_eq!(Piece::from_symbol("x"), None);
        assert_eq!(Piece::from_symbol("pp"), None);
    }
}
