//! Board: piece placement, pieces in hand, side to move and the move stack
//!
//! ## Module Structure
//! - `moves` - push/pop and the in-place make/unmake they are built on
//! - `attacks` - piece reach and attack detection
//! - `movegen` - pseudo-legal generation and the lazy legal move iterator
//! - `legality` - drop rules, king safety and the drop-pawn-mate rule
//! - `status` - check, checkmate, stalemate, repetition and game outcome
//! - `sfen` - SFEN parsing and printing
//! - `zobrist` - position keys for repetition detection

mod attacks;
mod display;
mod legality;
mod movegen;
mod moves;
mod sfen;
mod status;
mod zobrist;


use crate::types::{BOARD_SQUARES, Color, HAND_KINDS, HAND_ORDER, Move, Piece, PieceType, Square};

pub use self::movegen::LegalMoves;
pub use self::sfen::SFEN_HIRATE;
pub use self::status::{GameOutcome, REPETITION_LIMIT};

/// Information needed to take a move back
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct UndoInfo {
    /// Piece standing on the destination before the move
    pub captured: Option<Piece>,
    /// Moving piece as it stood on the source square (`None` for drops)
    pub moved: Option<Piece>,
    /// Position key before the move
    pub previous_key: u64,
}

/// Complete game position plus the authoritative move log.
///
/// Every mutation goes through [`Board::push`], [`Board::push_unchecked`] or
/// [`Board::pop`]; popping restores squares, hands and side to move exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// Piece on each square
    squares: [Option<Piece>; BOARD_SQUARES],

    /// Pieces in hand [color][hand index], see [`HAND_ORDER`]
    hands: [[u8; HAND_KINDS]; 2],

    side_to_move: Color,

    /// Moves applied since the initial position
    move_stack: Vec<Move>,

    /// Parallel to `move_stack`
    undo_stack: Vec<UndoInfo>,

    /// Key of the current position
    key: u64,

    /// Keys of every earlier position, oldest first (parallel to `move_stack`)
    history: Vec<u64>,

    /// Move number of the initial position (SFEN ply field)
    initial_ply: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Board {
    /// Board with no pieces; only used while building a position
    pub(crate) fn empty() -> Self {
        Board {
            squares: [None; BOARD_SQUARES],
            hands: [[0; HAND_KINDS]; 2],
            side_to_move: Color::Black,
            move_stack: Vec::new(),
            undo_stack: Vec::new(),
            key: 0,
            history: Vec::new(),
            initial_ply: 1,
        }
    }

    /// Standard starting position, Black to move
    pub fn startpos() -> Self {
        const BACK_RANK: [PieceType; 9] = [
            PieceType::Lance,
            PieceType::Knight,
            PieceType::Silver,
            PieceType::Gold,
            PieceType::King,
            PieceType::Gold,
            PieceType::Silver,
            PieceType::Knight,
            PieceType::Lance,
        ];

        let mut board = Self::empty();
        for (file, &piece_type) in (0u8..).zip(BACK_RANK.iter()) {
            board.put_piece(Square::new(file, 0), Piece::new(piece_type, Color::White));
            board.put_piece(Square::new(file, 2), Piece::new(PieceType::Pawn, Color::White));
            board.put_piece(Square::new(file, 6), Piece::new(PieceType::Pawn, Color::Black));
            board.put_piece(Square::new(file, 8), Piece::new(piece_type, Color::Black));
        }

        // White: rook on 8b, bishop on 2b. Black: bishop on 8h, rook on 2h.
        board.put_piece(Square::new(1, 1), Piece::new(PieceType::Rook, Color::White));
        board.put_piece(Square::new(7, 1), Piece::new(PieceType::Bishop, Color::White));
        board.put_piece(Square::new(1, 7), Piece::new(PieceType::Bishop, Color::Black));
        board.put_piece(Square::new(7, 7), Piece::new(PieceType::Rook, Color::Black));

        board.key = board.compute_key();
        board
    }

    /// Piece on a square
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Number of `piece_type` held by `color`; 0 for types that are never held
    #[inline]
    pub fn hand_count(&self, color: Color, piece_type: PieceType) -> u8 {
        piece_type.hand_index().map_or(0, |idx| self.hands[color.index()][idx])
    }

    /// Non-empty hand entries of `color` in [`HAND_ORDER`]
    pub fn hand(&self, color: Color) -> impl Iterator<Item = (PieceType, u8)> + '_ {
        HAND_ORDER
            .iter()
            .zip(self.hands[color.index()].iter())
            .filter(|&(_, &count)| count > 0)
            .map(|(&pt, &count)| (pt, count))
    }

    /// Moves applied since the initial position, oldest first
    #[inline]
    pub fn move_stack(&self) -> &[Move] {
        &self.move_stack
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.move_stack.last().copied()
    }

    /// Number of moves applied since the initial position
    #[inline]
    pub fn ply(&self) -> usize {
        self.move_stack.len()
    }

    /// Position key (board + hands + side to move)
    #[inline]
    pub fn key(&self) -> u64 {
        self.key
    }

    /// Square of `color`'s king, if present
    pub fn find_king(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| self.piece_at(sq) == Some(Piece::new(PieceType::King, color)))
    }

    /// Square of `color`'s king.
    ///
    /// # Panics
    /// Panics when the king is missing; every position built through this API
    /// has exactly one king per colour.
    pub fn king_square(&self, color: Color) -> Square {
        match self.find_king(color) {
            Some(sq) => sq,
            None => panic!("{color} king missing from the board"),
        }
    }

    /// Squares holding pieces of `color`
    pub(crate) fn occupied_by(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some(piece) if piece.color == color => Some((sq, piece)),
            _ => None,
        })
    }

    pub(crate) fn put_piece(&mut self, sq: Square, piece: Piece) {
        debug_assert!(self.squares[sq.index()].is_none(), "square {sq} already occupied");
        self.squares[sq.index()] = Some(piece);
    }

    pub(crate) fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }
}
