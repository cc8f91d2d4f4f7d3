//! Replay of a stored game
//!
//! Moves are trusted: they are applied with [`Board::push_unchecked`], and a
//! move that cannot be applied at all is reported as corruption.

use std::collections::VecDeque;

use shogiban_core::{Board, Move};
use shogiban_record::{StoredGame, format_clock};

use crate::error::ReplayError;

pub struct AnaliseSession {
    game: StoredGame,
    board: Board,
    /// Moves still to play, next first
    pending: VecDeque<Move>,
    /// Moves played, most recent last
    done: Vec<Move>,
}

impl AnaliseSession {
    /// Replay positioned before the first move
    pub fn new(game: StoredGame) -> Self {
        let pending = game.moves.iter().copied().collect();
        AnaliseSession { game, board: Board::startpos(), pending, done: Vec::new() }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn game(&self) -> &StoredGame {
        &self.game
    }

    /// Moves played so far
    pub fn ply(&self) -> usize {
        self.done.len()
    }

    pub fn total_plies(&self) -> usize {
        self.done.len() + self.pending.len()
    }

    pub fn last_move(&self) -> Option<Move> {
        self.done.last().copied()
    }

    pub fn date(&self) -> &str {
        &self.game.date
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.game.elapsed_seconds
    }

    pub fn clock_label(&self) -> String {
        format_clock(self.game.elapsed_seconds)
    }

    /// Play the next move. `Ok(false)` at the end of the game.
    ///
    /// On corruption nothing changes and the offending move stays next.
    pub fn step_forward(&mut self) -> Result<bool, ReplayError> {
        let Some(&mv) = self.pending.front() else {
            return Ok(false);
        };
        if let Err(source) = self.board.push_unchecked(mv) {
            let ply = self.done.len() + 1;
            log::error!("replay of {} stopped at ply {ply}: {source}", self.game.date);
            return Err(ReplayError::Corruption { ply, mv, source });
        }
        self.pending.pop_front();
        self.done.push(mv);
        Ok(true)
    }

    /// Take back the last move. `false` at the start of the game.
    pub fn step_back(&mut self) -> bool {
        let Some(mv) = self.done.pop() else {
            return false;
        };
        match self.board.pop() {
            Ok(_) => {
                self.pending.push_front(mv);
                true
            }
            Err(err) => {
                log::error!("replay board out of step with its move list: {err}");
                self.done.push(mv);
                false
            }
        }
    }

    pub fn rewind(&mut self) {
        while self.step_back() {}
    }

    pub fn fast_forward(&mut self) -> Result<(), ReplayError> {
        while self.step_forward()? {}
        Ok(())
    }

    /// Position the replay after `ply` moves (clamped to the game length)
    pub fn seek(&mut self, ply: usize) -> Result<(), ReplayError> {
        while self.ply() > ply && self.step_back() {}
        while self.ply() < ply && self.step_forward()? {}
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shogiban_core::{Color, PieceType};

    fn opening() -> StoredGame {
        let moves = ["7g7f", "3c3d", "8h2b+", "3a2b"].iter().map(|m| m.parse().unwrap()).collect();
        StoredGame::new("2024-05-01 10:00:00", 75, moves)
    }

    #[test]
    fn test_step_forward_and_back() {
        let mut replay = AnaliseSession::new(opening());
        assert_eq!(replay.total_plies(), 4);
        assert!(!replay.step_back());

        assert_eq!(replay.step_forward(), Ok(true));
        assert_eq!(replay.last_move(), Some("7g7f".parse().unwrap()));
        replay.fast_forward().unwrap();
        assert_eq!(replay.ply(), 4);
        assert_eq!(replay.step_forward(), Ok(false));
        assert_eq!(replay.board().hand_count(Color::White, PieceType::Bishop), 1);

        replay.rewind();
        assert_eq!(replay.ply(), 0);
        assert_eq!(replay.board(), &Board::startpos());
        assert_eq!(replay.clock_label(), "01:15");
    }

    #[test]
    fn test_seek() {
        let mut replay = AnaliseSession::new(opening());
        replay.seek(3).unwrap();
        assert_eq!(replay.ply(), 3);
        replay.seek(1).unwrap();
        assert_eq!(replay.last_move(), Some("7g7f".parse().unwrap()));
        replay.seek(99).unwrap();
        assert_eq!(replay.ply(), 4);
    }

    #[test]
    fn test_corruption_leaves_replay_unchanged() {
        let moves = vec![
            "7g7f".parse().unwrap(),
            Move::drop(PieceType::Rook, "5e".parse().unwrap()),
        ];
        let mut replay = AnaliseSession::new(StoredGame::new("2024-05-01 10:00:00", 1, moves));
        assert_eq!(replay.step_forward(), Ok(true));
        let before = replay.board().clone();

        match replay.step_forward() {
            Err(ReplayError::Corruption { ply, mv, .. }) => {
                assert_eq!(ply, 2);
                assert_eq!(mv, Move::drop(PieceType::Rook, "5e".parse().unwrap()));
            }
            other => panic!("expected corruption, got {other:?}"),
        }
        assert_eq!(replay.board(), &before);
        assert_eq!(replay.ply(), 1);
        assert_eq!(replay.total_plies(), 2);
    }
}
