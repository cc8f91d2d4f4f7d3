//! Move representation

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use super::{PieceType, Square};
use crate::error::MoveParseError;

/// Move buffer; shogi positions rarely exceed 128 pseudo-legal moves
pub type MoveVec = SmallVec<[Move; 128]>;

/// A board move or a drop from hand
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// Piece moving on the board
    Normal { from: Square, to: Square, promote: bool },
    /// Piece placed from hand onto an empty square
    Drop { piece_type: PieceType, to: Square },
}

impl Move {
    #[inline]
    pub const fn normal(from: Square, to: Square, promote: bool) -> Self {
        Move::Normal { from, to, promote }
    }

    #[inline]
    pub const fn drop(piece_type: PieceType, to: Square) -> Self {
        Move::Drop { piece_type, to }
    }

    /// Source square (`None` for drops)
    #[inline]
    pub const fn from(self) -> Option<Square> {
        match self {
            Move::Normal { from, .. } => Some(from),
            Move::Drop { .. } => None,
        }
    }

    /// Destination square
    #[inline]
    pub const fn to(self) -> Square {
        match self {
            Move::Normal { to, .. } | Move::Drop { to, .. } => to,
        }
    }

    #[inline]
    pub const fn is_drop(self) -> bool {
        matches!(self, Move::Drop { .. })
    }

    /// Promotion flag; always false for drops
    #[inline]
    pub const fn is_promote(self) -> bool {
        matches!(self, Move::Normal { promote: true, .. })
    }

    /// Dropped piece type (`None` for board moves)
    #[inline]
    pub const fn drop_piece_type(self) -> Option<PieceType> {
        match self {
            Move::Drop { piece_type, .. } => Some(piece_type),
            Move::Normal { .. } => None,
        }
    }
}

/// USI move text: `7g7f`, `8h2b+`, `P*5e`
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Normal { from, to, promote } => {
                write!(f, "{from}{to}")?;
                if promote {
                    f.write_str("+")?;
                }
                Ok(())
            }
            Move::Drop { piece_type, to } => {
                write!(f, "{}*{to}", piece_type.symbol().to_ascii_uppercase())
            }
        }
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MoveParseError(s.to_string());

        if let Some((piece, to)) = s.split_once('*') {
            let piece_type = match piece {
                "P" => PieceType::Pawn,
                "L" => PieceType::Lance,
                "N" => PieceType::Knight,
                "S" => PieceType::Silver,
                "G" => PieceType::Gold,
                "B" => PieceType::Bishop,
                "R" => PieceType::Rook,
                _ => return Err(err()),
            };
            let to = to.parse::<Square>().map_err(|_| err())?;
            return Ok(Move::drop(piece_type, to));
        }

        let (body, promote) = match s.strip_suffix('+') {
            Some(body) => (body, true),
            None => (s, false),
        };
        if body.len() != 4 || !body.is_ascii() {
            return Err(err());
        }
        let from = body[..2].parse::<Square>().map_err(|_| err())?;
        let to = body[2..].parse::<Square>().map_err(|_| err())?;
        Ok(Move::normal(from, to, promote))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_accessors() {
        let mv = Move::normal(Square(60), Square(51), false);
        assert_eq!(mv.from(), Some(Square(60)));
        assert_eq!(mv.to(), Square(51));
        assert!(!mv.is_drop());
        assert!(!mv.is_promote());
        assert_eq!(mv.drop_piece_type(), None);

        let drop = Move::drop(PieceType::Gold, Square(40));
        assert_eq!(drop.from(), None);
        assert!(drop.is_drop());
        assert!(!drop.is_promote());
        assert_eq!(drop.drop_piece_type(), Some(PieceType::Gold));
    }

    #[test]
    fn test_usi_text() {
        assert_eq!("7g7f".parse::<Move>().unwrap(), Move::normal(Square(60), Square(51), false));
        assert_eq!("8h2b+".parse::<Move>().unwrap().to_string(), "8h2b+");
        assert_eq!("P*5e".parse::<Move>().unwrap(), Move::drop(PieceType::Pawn, Square(40)));
        assert_eq!(Move::drop(PieceType::Rook, Square(0)).to_string(), "R*9a");
    }

    #[test]
    fn test_usi_text_rejects_garbage() {
        for bad in ["", "7g", "7g7", "7g7f++", "K*5e", "+P*5e", "P*5j", "7g7z", "７g7f"] {
            assert!(bad.parse::<Move>().is_err(), "{bad} should not parse");
        }
    }
}
