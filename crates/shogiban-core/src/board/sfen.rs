//! SFEN parsing and printing

use super::Board;
use crate::error::SfenError;
use crate::types::{Color, HAND_ORDER, Piece, PieceType, Square};

/// Standard starting position
pub const SFEN_HIRATE: &str = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";

/// Number of pieces of each base type in a full set, both colours together
const fn piece_total(base: PieceType) -> u8 {
    match base {
        PieceType::Pawn => 18,
        PieceType::Lance | PieceType::Knight | PieceType::Silver | PieceType::Gold => 4,
        PieceType::Bishop | PieceType::Rook => 2,
        _ => 0,
    }
}

impl Board {
    /// Parse a position in SFEN.
    ///
    /// Requires exactly one king per colour and no more pieces of a kind than
    /// a full set holds. The move stack starts empty.
    pub fn from_sfen(sfen: &str) -> Result<Board, SfenError> {
        let parts: Vec<&str> = sfen.split_whitespace().collect();
        if parts.len() < 3 || parts.len() > 4 {
            return Err(SfenError::Board(format!("expected 3 or 4 fields, got {}", parts.len())));
        }

        let mut board = Board::empty();
        parse_placement(&mut board, parts[0])?;

        board.side_to_move = match parts[1] {
            "b" => Color::Black,
            "w" => Color::White,
            other => return Err(SfenError::SideToMove(other.to_string())),
        };

        parse_hands(&mut board, parts[2])?;

        if let Some(ply) = parts.get(3) {
            board.initial_ply = match ply.parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => return Err(SfenError::Ply(ply.to_string())),
            };
        }

        validate_material(&board)?;
        board.key = board.compute_key();
        Ok(board)
    }

    /// Current position in SFEN; the move number advances with the move stack
    pub fn to_sfen(&self) -> String {
        let mut ranks = Vec::with_capacity(9);
        for rank in 0..9 {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..9 {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push_str(&piece.symbol());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            ranks.push(row);
        }

        let side = match self.side_to_move {
            Color::Black => "b",
            Color::White => "w",
        };

        let mut hands = String::new();
        for color in Color::ALL {
            for (piece_type, count) in self.hand(color) {
                if count > 1 {
                    hands.push_str(&count.to_string());
                }
                hands.push_str(&Piece::new(piece_type, color).symbol());
            }
        }
        if hands.is_empty() {
            hands.push('-');
        }

        let ply = self.initial_ply as usize + self.move_stack.len();
        format!("{} {side} {hands} {ply}", ranks.join("/"))
    }
}

fn parse_placement(board: &mut Board, placement: &str) -> Result<(), SfenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 9 {
        return Err(SfenError::Board(format!("expected 9 ranks, got {}", ranks.len())));
    }

    for (rank, row) in ranks.iter().enumerate() {
        let mut file = 0u8;
        let mut chars = row.chars();
        while let Some(c) = chars.next() {
            if file >= 9 {
                return Err(SfenError::Board(format!("rank {} is longer than 9 squares", rank + 1)));
            }
            if let Some(count) = c.to_digit(10) {
                if count == 0 || file as u32 + count > 9 {
                    return Err(SfenError::Board(format!(
                        "rank {} has a bad empty-square count {count}",
                        rank + 1
                    )));
                }
                file += count as u8;
                continue;
            }

            let symbol = if c == '+' {
                let letter = chars
                    .next()
                    .ok_or_else(|| SfenError::Board("dangling '+'".to_string()))?;
                format!("+{letter}")
            } else {
                c.to_string()
            };
            let piece = Piece::from_symbol(&symbol)
                .ok_or_else(|| SfenError::Board(format!("unknown piece {symbol:?}")))?;
            board.put_piece(Square::new(file, rank as u8), piece);
            file += 1;
        }
        if file != 9 {
            return Err(SfenError::Board(format!("rank {} has {file} squares", rank + 1)));
        }
    }
    Ok(())
}

fn parse_hands(board: &mut Board, hands: &str) -> Result<(), SfenError> {
    if hands == "-" {
        return Ok(());
    }

    let mut count: Option<u32> = None;
    for c in hands.chars() {
        if let Some(digit) = c.to_digit(10) {
            let next = count.unwrap_or(0) * 10 + digit;
            if next > u8::MAX as u32 {
                return Err(SfenError::Hand(hands.to_string()));
            }
            count = Some(next);
            continue;
        }

        let piece = Piece::from_symbol(&c.to_string())
            .ok_or_else(|| SfenError::Hand(format!("unknown piece {c:?}")))?;
        let idx = piece
            .piece_type
            .hand_index()
            .ok_or_else(|| SfenError::Hand(format!("{c} cannot be held in hand")))?;
        let n = count.take().unwrap_or(1);
        if n == 0 {
            return Err(SfenError::Hand(hands.to_string()));
        }
        let slot = &mut board.hands[piece.color.index()][idx];
        *slot = slot.saturating_add(n as u8);
    }

    if count.is_some() {
        return Err(SfenError::Hand(format!("count without a piece in {hands:?}")));
    }
    Ok(())
}

fn validate_material(board: &Board) -> Result<(), SfenError> {
    for color in Color::ALL {
        let kings = Square::all()
            .filter(|&sq| board.piece_at(sq) == Some(Piece::new(PieceType::King, color)))
            .count();
        if kings != 1 {
            return Err(SfenError::Board(format!("{color} has {kings} kings")));
        }
    }

    for base in HAND_ORDER {
        let on_board = Square::all()
            .filter_map(|sq| board.piece_at(sq))
            .filter(|piece| piece.piece_type.base() == base)
            .count();
        let in_hand: usize = Color::ALL
            .iter()
            .map(|&color| board.hand_count(color, base) as usize)
            .sum();
        if on_board + in_hand > piece_total(base) as usize {
            return Err(SfenError::Board(format!("too many pieces of type {base}")));
        }
    }
    Ok(())
}
