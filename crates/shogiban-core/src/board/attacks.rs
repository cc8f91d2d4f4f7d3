//! Piece reach and attack detection

use super::Board;
use crate::types::{Bitboard, Color, Piece, Square};

impl Board {
    /// Squares `piece` standing on `from` attacks: single steps plus slides up
    /// to and including the first occupied square.
    pub fn attacks_from(&self, from: Square, piece: Piece) -> Bitboard {
        // Tables are in Black orientation; White mirrors the row delta
        let orient = match piece.color {
            Color::Black => 1,
            Color::White => -1,
        };
        let mut attacks = Bitboard::EMPTY;

        for &(dr, df) in piece.piece_type.steps() {
            if let Some(to) = from.offset(dr * orient, df) {
                attacks.set(to);
            }
        }

        for &(dr, df) in piece.piece_type.slides() {
            let mut cursor = from;
            while let Some(to) = cursor.offset(dr * orient, df) {
                attacks.set(to);
                if self.piece_at(to).is_some() {
                    break;
                }
                cursor = to;
            }
        }

        attacks
    }

    /// Whether any board piece of `attacker` attacks `sq`.
    ///
    /// Hand pieces never attack; the occupant of `sq` is irrelevant.
    pub fn is_attacked_by(&self, attacker: Color, sq: Square) -> bool {
        self.occupied_by(attacker)
            .any(|(from, piece)| self.attacks_from(from, piece).test(sq))
    }
}
