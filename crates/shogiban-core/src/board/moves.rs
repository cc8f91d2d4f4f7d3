//! Applying and taking back moves

use super::zobrist::ZOBRIST;
use super::{Board, UndoInfo};
use crate::error::BoardError;
use crate::types::{Color, Move, Piece, PieceType};

impl Board {
    /// Apply a legal move and record it on the move stack.
    ///
    /// Returns [`BoardError::IllegalMove`] and leaves the board untouched when
    /// the move is not legal in the current position.
    pub fn push(&mut self, mv: Move) -> Result<(), BoardError> {
        if !self.is_legal(mv) {
            log::debug!("rejected illegal move {mv}");
            return Err(BoardError::IllegalMove(mv));
        }
        log::debug!("{} plays {mv}", self.side_to_move);
        self.record(mv);
        Ok(())
    }

    /// Apply a move without the rules check, only requiring that it can be
    /// carried out mechanically: the source square is occupied, no king is
    /// captured, promotion applies to a promotable piece, and a drop comes
    /// from a non-empty hand onto an empty square.
    ///
    /// Used for replaying stored records, which are trusted to have been legal
    /// when played. The move is taken back by [`Board::pop`] like any other.
    pub fn push_unchecked(&mut self, mv: Move) -> Result<(), BoardError> {
        self.check_applicable(mv)
            .map_err(|reason| BoardError::Inapplicable { mv, reason: reason.to_string() })?;
        log::debug!("{} plays {mv} (unchecked)", self.side_to_move);
        self.record(mv);
        Ok(())
    }

    /// Take back the most recent move, restoring the prior position exactly
    pub fn pop(&mut self) -> Result<Move, BoardError> {
        let (Some(mv), Some(undo)) = (self.move_stack.pop(), self.undo_stack.pop()) else {
            return Err(BoardError::EmptyHistory);
        };
        self.undo_move(mv, undo);
        self.history.pop();
        Ok(mv)
    }

    fn record(&mut self, mv: Move) {
        self.history.push(self.key);
        let undo = self.do_move(mv);
        self.move_stack.push(mv);
        self.undo_stack.push(undo);
    }

    fn check_applicable(&self, mv: Move) -> Result<(), &'static str> {
        match mv {
            Move::Normal { from, to, promote } => {
                if from == to {
                    return Err("source and destination are the same square");
                }
                let piece = self.piece_at(from).ok_or("source square is empty")?;
                if let Some(target) = self.piece_at(to) {
                    if target.piece_type == PieceType::King {
                        return Err("destination holds a king");
                    }
                }
                if promote && !piece.piece_type.can_promote() {
                    return Err("piece cannot promote");
                }
                Ok(())
            }
            Move::Drop { piece_type, to } => {
                if piece_type.hand_index().is_none() {
                    return Err("piece type cannot be dropped");
                }
                if self.hand_count(self.side_to_move, piece_type) == 0 {
                    return Err("no such piece in hand");
                }
                if self.piece_at(to).is_some() {
                    return Err("drop target is occupied");
                }
                Ok(())
            }
        }
    }

    /// Make a move in place without touching the move log.
    ///
    /// The caller guarantees the move is applicable (see `check_applicable`).
    pub(crate) fn do_move(&mut self, mv: Move) -> UndoInfo {
        let us = self.side_to_move;
        let previous_key = self.key;
        let mut undo = UndoInfo { captured: None, moved: None, previous_key };

        match mv {
            Move::Drop { piece_type, to } => {
                self.take_from_hand(us, piece_type);
                let piece = Piece::new(piece_type, us);
                self.put_piece(to, piece);
                self.key ^= ZOBRIST.piece(to, piece);
            }
            Move::Normal { from, to, promote } => {
                let Some(moved) = self.remove_piece(from) else {
                    debug_assert!(false, "do_move from empty square {from}");
                    return undo;
                };
                self.key ^= ZOBRIST.piece(from, moved);

                if let Some(captured) = self.remove_piece(to) {
                    self.key ^= ZOBRIST.piece(to, captured);
                    self.add_to_hand(us, captured.piece_type.base());
                    undo.captured = Some(captured);
                }

                let placed = match moved.piece_type.promote() {
                    Some(promoted) if promote => Piece::new(promoted, moved.color),
                    _ => moved,
                };
                self.put_piece(to, placed);
                self.key ^= ZOBRIST.piece(to, placed);
                undo.moved = Some(moved);
            }
        }

        self.side_to_move = us.opposite();
        self.key ^= ZOBRIST.side();
        undo
    }

    /// Exact inverse of [`Board::do_move`]
    pub(crate) fn undo_move(&mut self, mv: Move, undo: UndoInfo) {
        let us = self.side_to_move.opposite();
        self.side_to_move = us;

        match mv {
            Move::Drop { piece_type, to } => {
                self.remove_piece(to);
                self.add_to_hand(us, piece_type);
            }
            Move::Normal { from, to, .. } => {
                self.remove_piece(to);
                if let Some(moved) = undo.moved {
                    self.put_piece(from, moved);
                }
                if let Some(captured) = undo.captured {
                    self.put_piece(to, captured);
                    self.take_from_hand(us, captured.piece_type.base());
                }
            }
        }

        self.key = undo.previous_key;
    }

    fn add_to_hand(&mut self, color: Color, piece_type: PieceType) {
        if let Some(idx) = piece_type.hand_index() {
            let count = &mut self.hands[color.index()][idx];
            self.key ^= ZOBRIST.hand(color, piece_type, *count);
            *count += 1;
            self.key ^= ZOBRIST.hand(color, piece_type, *count);
        }
    }

    fn take_from_hand(&mut self, color: Color, piece_type: PieceType) {
        if let Some(idx) = piece_type.hand_index() {
            let count = &mut self.hands[color.index()][idx];
            debug_assert!(*count > 0, "hand of {color} has no {piece_type}");
            self.key ^= ZOBRIST.hand(color, piece_type, *count);
            *count = count.saturating_sub(1);
            self.key ^= ZOBRIST.hand(color, piece_type, *count);
        }
    }
}
