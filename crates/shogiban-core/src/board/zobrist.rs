//! Zobrist hashing for repetition detection

use std::sync::LazyLock;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use super::Board;
use crate::types::{BOARD_SQUARES, Color, HAND_KINDS, Piece, PieceType, Square};

/// Largest number of one kind a hand can hold (all 18 pawns)
pub(crate) const MAX_HAND_COUNT: usize = 18;

/// Number of piece codes (wire codes run 1..=14)
const PIECE_CODES: usize = 15;

pub(crate) struct ZobristTable {
    /// [color][piece code][square]
    pieces: [[[u64; BOARD_SQUARES]; PIECE_CODES]; 2],
    /// [color][hand index][count]
    hands: [[[u64; MAX_HAND_COUNT + 1]; HAND_KINDS]; 2],
    /// XORed in when White is to move
    side: u64,
}

impl ZobristTable {
    fn new() -> Self {
        // Fixed seed keeps keys stable across runs
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x5348_4F47_4942_414E);

        let mut pieces = [[[0u64; BOARD_SQUARES]; PIECE_CODES]; 2];
        for per_color in pieces.iter_mut() {
            for per_type in per_color.iter_mut().skip(1) {
                for key in per_type.iter_mut() {
                    *key = rng.random();
                }
            }
        }

        let mut hands = [[[0u64; MAX_HAND_COUNT + 1]; HAND_KINDS]; 2];
        for per_color in hands.iter_mut() {
            for per_kind in per_color.iter_mut() {
                // count 0 contributes nothing
                for key in per_kind.iter_mut().skip(1) {
                    *key = rng.random();
                }
            }
        }

        ZobristTable { pieces, hands, side: rng.random() }
    }

    #[inline]
    pub fn piece(&self, sq: Square, piece: Piece) -> u64 {
        self.pieces[piece.color.index()][piece.piece_type.code() as usize][sq.index()]
    }

    #[inline]
    pub fn hand(&self, color: Color, piece_type: PieceType, count: u8) -> u64 {
        match piece_type.hand_index() {
            Some(idx) => self.hands[color.index()][idx][(count as usize).min(MAX_HAND_COUNT)],
            None => 0,
        }
    }

    #[inline]
    pub fn side(&self) -> u64 {
        self.side
    }
}

pub(crate) static ZOBRIST: LazyLock<ZobristTable> = LazyLock::new(ZobristTable::new);

impl Board {
    /// Key computed from scratch; `do_move` maintains it incrementally
    pub(crate) fn compute_key(&self) -> u64 {
        let mut key = 0;
        for sq in Square::all() {
            if let Some(piece) = self.piece_at(sq) {
                key ^= ZOBRIST.piece(sq, piece);
            }
        }
        for color in Color::ALL {
            for (piece_type, count) in self.hand(color) {
                key ^= ZOBRIST.hand(color, piece_type, count);
            }
        }
        if self.side_to_move() == Color::White {
            key ^= ZOBRIST.side();
        }
        key
    }
}
