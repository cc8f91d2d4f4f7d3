//! # shogiban-core
//!
//! Shogi rules engine: board representation, legal move generation with drops
//! and promotion, check / checkmate / stalemate / repetition detection, and a
//! reversible move stack.
//!
//! ## Module Structure
//!
//! - `types`: Color, Square, PieceType, Piece, Move, Bitboard
//! - `board`: `Board` and its rules
//! - `error`: error types

pub mod board;
pub mod error;
pub mod types;

pub use board::{Board, GameOutcome, LegalMoves, SFEN_HIRATE};
pub use error::{BoardError, MoveParseError, SfenError, SquareParseError};
pub use types::{Bitboard, Color, HAND_ORDER, Move, MoveVec, Piece, PieceType, Square};
