//! Move generation
//!
//! Pseudo-legal moves obey piece movement, promotion and drop placement
//! rules. Legal moves additionally leave the mover's king safe and never
//! mate with a dropped pawn; that filter runs lazily in [`LegalMoves`].

use smallvec::IntoIter;

use super::Board;
use super::legality::is_dead_square;
use crate::types::{Bitboard, HAND_ORDER, Move, MoveVec, Piece, PieceType, Square};

/// Lazy iterator over legal moves.
///
/// Holds its own copy of the position; each candidate is checked by making
/// and unmaking it on that copy, so the source board is never touched.
pub struct LegalMoves {
    scratch: Board,
    candidates: IntoIter<[Move; 128]>,
}

impl Iterator for LegalMoves {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        for mv in self.candidates.by_ref() {
            if self.scratch.passes_legality_filter(mv, true) {
                return Some(mv);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.candidates.size_hint().1)
    }
}

impl Board {
    /// Legal moves for the side to move, in generation order
    pub fn legal_moves(&self) -> LegalMoves {
        let mut candidates = MoveVec::new();
        self.generate_pseudo_legal(&mut candidates);
        self.filtered(candidates)
    }

    /// Legal board moves of the piece on `from` (empty when the square is
    /// empty or holds an opponent piece)
    pub fn legal_moves_from(&self, from: Square) -> LegalMoves {
        let mut candidates = MoveVec::new();
        self.generate_pseudo_from(from, &mut candidates);
        self.filtered(candidates)
    }

    /// Legal drops of `piece_type` for the side to move
    pub fn legal_drops(&self, piece_type: PieceType) -> LegalMoves {
        let mut candidates = MoveVec::new();
        self.generate_pseudo_drops_of(piece_type, &mut candidates);
        self.filtered(candidates)
    }

    /// Destination squares of the legal moves from `from`
    pub fn legal_destinations(&self, from: Square) -> Bitboard {
        self.legal_moves_from(from).map(Move::to).collect()
    }

    /// Squares where `piece_type` can legally be dropped
    pub fn legal_drop_destinations(&self, piece_type: PieceType) -> Bitboard {
        self.legal_drops(piece_type).map(Move::to).collect()
    }

    /// Whether the side to move has any legal move
    pub fn has_legal_move(&self) -> bool {
        self.legal_moves().next().is_some()
    }

    fn filtered(&self, candidates: MoveVec) -> LegalMoves {
        LegalMoves { scratch: self.clone(), candidates: candidates.into_iter() }
    }

    /// All pseudo-legal moves: board moves in square order, then drops in hand order
    pub(crate) fn generate_pseudo_legal(&self, moves: &mut MoveVec) {
        for (from, _) in self.occupied_by(self.side_to_move) {
            self.generate_pseudo_from(from, moves);
        }
        for piece_type in HAND_ORDER {
            self.generate_pseudo_drops_of(piece_type, moves);
        }
    }

    pub(crate) fn generate_pseudo_from(&self, from: Square, moves: &mut MoveVec) {
        let Some(piece) = self.piece_at(from) else {
            return;
        };
        if piece.color != self.side_to_move {
            return;
        }

        for to in self.attacks_from(from, piece) {
            match self.piece_at(to) {
                Some(target) if target.color == piece.color => continue,
                Some(target) if target.piece_type == PieceType::King => continue,
                _ => push_with_promotion(piece, from, to, moves),
            }
        }
    }

    pub(crate) fn generate_pseudo_drops_of(&self, piece_type: PieceType, moves: &mut MoveVec) {
        if self.hand_count(self.side_to_move, piece_type) == 0 {
            return;
        }
        for to in Square::all() {
            if self.drop_allowed(piece_type, to) {
                moves.push(Move::drop(piece_type, to));
            }
        }
    }
}

/// Push the promoting and/or non-promoting forms of a board move
fn push_with_promotion(piece: Piece, from: Square, to: Square, moves: &mut MoveVec) {
    let color = piece.color;
    let can_promote = piece.piece_type.can_promote()
        && (color.in_promotion_zone(from.rank()) || color.in_promotion_zone(to.rank()));

    if can_promote {
        moves.push(Move::normal(from, to, true));
    }
    if !is_dead_square(piece.piece_type, color, to) {
        moves.push(Move::normal(from, to, false));
    }
}
