//! Error types for the rules engine

use crate::types::Move;

/// Errors raised by [`Board`](crate::Board) mutations.
///
/// These are programming or data errors, not user mistakes: a front end is
/// expected to consult [`Board::is_legal`](crate::Board::is_legal) first.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// `push` was given a move that is not in the legal move list
    #[error("illegal move: {0}")]
    IllegalMove(Move),

    /// `pop` was called with an empty move stack
    #[error("no move to take back")]
    EmptyHistory,

    /// `push_unchecked` was given a move that cannot be applied at all
    #[error("move {mv} cannot be applied: {reason}")]
    Inapplicable { mv: Move, reason: String },
}

/// SFEN parse errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SfenError {
    #[error("invalid board: {0}")]
    Board(String),
    #[error("invalid side to move: {0}")]
    SideToMove(String),
    #[error("invalid hand: {0}")]
    Hand(String),
    #[error("invalid ply: {0}")]
    Ply(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid square notation: {0:?}")]
pub struct SquareParseError(pub String);

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid move notation: {0:?}")]
pub struct MoveParseError(pub String);
