//! Basic types: colours, squares, pieces, moves and square sets

mod bitboard;
mod color;
mod moves;
mod piece;
mod square;

pub use bitboard::Bitboard;
pub use color::Color;
pub use moves::{Move, MoveVec};
pub use piece::{HAND_KINDS, HAND_ORDER, Piece, PieceType};
pub use square::{BOARD_SQUARES, Square};
