//! Check, game-end detection and repetition

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Board;
use crate::types::{Color, Square};

/// Number of occurrences of one position that ends the game
pub const REPETITION_LIMIT: usize = 4;

/// How a game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Side to move is in check with no legal move
    Checkmate { winner: Color },
    /// Side to move has no legal move but is not in check; it loses
    Stalemate { winner: Color },
    /// Same position reached four times; draw
    Repetition,
}

impl GameOutcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            GameOutcome::Checkmate { winner } | GameOutcome::Stalemate { winner } => Some(winner),
            GameOutcome::Repetition => None,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Checkmate { winner } => write!(f, "{winner} WON!"),
            GameOutcome::Stalemate { winner } => write!(f, "Stalemate! {winner} WON!"),
            GameOutcome::Repetition => f.write_str("Draw by repetition!"),
        }
    }
}

impl Board {
    /// Whether the side to move's king is attacked
    pub fn is_check(&self) -> bool {
        self.checked_king().is_some()
    }

    /// King square of the side to move when it is in check
    pub fn checked_king(&self) -> Option<Square> {
        let us = self.side_to_move();
        let king = self.find_king(us)?;
        self.is_attacked_by(us.opposite(), king).then_some(king)
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_legal_move()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.has_legal_move()
    }

    /// Times the current position has occurred, counting the current one
    pub fn repetition_count(&self) -> usize {
        1 + self.history.iter().filter(|&&key| key == self.key).count()
    }

    pub fn is_fourfold_repetition(&self) -> bool {
        self.repetition_count() >= REPETITION_LIMIT
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Result of the game if it has ended.
    ///
    /// Checkmate and stalemate take precedence over repetition.
    pub fn outcome(&self) -> Option<GameOutcome> {
        let us = self.side_to_move();
        if !self.has_legal_move() {
            let winner = us.opposite();
            return Some(if self.is_check() {
                GameOutcome::Checkmate { winner }
            } else {
                GameOutcome::Stalemate { winner }
            });
        }
        self.is_fourfold_repetition().then_some(GameOutcome::Repetition)
    }
}
