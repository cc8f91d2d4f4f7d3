//! Legality rules: drop placement, two pawns on a file, king safety and the
//! drop-pawn-mate prohibition

use super::Board;
use crate::types::{Bitboard, Color, Move, MoveVec, Piece, PieceType, Square};

/// Whether an unpromoted `piece_type` of `color` on `sq` would have no move left
#[inline]
pub(crate) fn is_dead_square(piece_type: PieceType, color: Color, sq: Square) -> bool {
    piece_type.dead_rows() > color.rows_to_last(sq.rank())
}

impl Board {
    /// Whether `mv` is legal for the side to move.
    ///
    /// Agrees with [`Board::legal_moves`] by construction: the move must be
    /// pseudo-legal and survive the same filter.
    pub fn is_legal(&self, mv: Move) -> bool {
        let pseudo = match mv {
            Move::Normal { from, .. } => {
                let mut candidates = MoveVec::new();
                self.generate_pseudo_from(from, &mut candidates);
                candidates.contains(&mv)
            }
            Move::Drop { piece_type, to } => {
                self.hand_count(self.side_to_move, piece_type) > 0
                    && self.drop_allowed(piece_type, to)
            }
        };
        pseudo && self.clone().passes_legality_filter(mv, true)
    }

    /// Whether dropping a pawn with `mv` would checkmate the opponent
    pub fn is_pawn_drop_mate(&self, mv: Move) -> bool {
        if mv.drop_piece_type() != Some(PieceType::Pawn) {
            return false;
        }
        let mut scratch = self.clone();
        let undo = scratch.do_move(mv);
        let mate = scratch.is_check() && !scratch.any_legal_move(false);
        scratch.undo_move(mv, undo);
        mate
    }

    /// Whether `color` has an unpromoted pawn on `file`
    pub fn has_pawn_on_file(&self, color: Color, file: u8) -> bool {
        let pawn = Piece::new(PieceType::Pawn, color);
        Bitboard::file_mask(file).any(|sq| self.piece_at(sq) == Some(pawn))
    }

    /// Placement rules for a drop by the side to move (hand count not checked)
    pub(crate) fn drop_allowed(&self, piece_type: PieceType, to: Square) -> bool {
        let us = self.side_to_move;
        if piece_type.hand_index().is_none() || self.piece_at(to).is_some() {
            return false;
        }
        if is_dead_square(piece_type, us, to) {
            return false;
        }
        !(piece_type == PieceType::Pawn && self.has_pawn_on_file(us, to.file()))
    }

    /// Check a pseudo-legal move by playing it in place and taking it back.
    ///
    /// With `check_pawn_drop_mate` unset the drop-pawn-mate rule is skipped;
    /// the nested mate search uses that to stay one level deep.
    pub(crate) fn passes_legality_filter(&mut self, mv: Move, check_pawn_drop_mate: bool) -> bool {
        let us = self.side_to_move;
        let undo = self.do_move(mv);

        let mut legal = !self.is_attacked_by(us.opposite(), self.king_square(us));
        if legal && check_pawn_drop_mate && mv.drop_piece_type() == Some(PieceType::Pawn) {
            legal = !(self.is_check() && !self.any_legal_move(false));
        }

        self.undo_move(mv, undo);
        legal
    }

    /// Whether the side to move has a move passing the legality filter
    pub(crate) fn any_legal_move(&mut self, check_pawn_drop_mate: bool) -> bool {
        let mut candidates = MoveVec::new();
        self.generate_pseudo_legal(&mut candidates);
        candidates
            .into_iter()
            .any(|mv| self.passes_legality_filter(mv, check_pawn_drop_mate))
    }
}
