//! Live game session
//!
//! Wraps a [`Board`] with the click-driven state a front end needs: the
//! selected piece and its legal destinations, the pending drop, undo/redo,
//! timing, and end-of-game handling.
//!
//! Rejected input never produces an error. The selection is reset and an
//! advisory message is left in [`GameSession::message`].

use chrono::{DateTime, Utc};
use shogiban_core::{Bitboard, Board, Color, GameOutcome, Move, PieceType, Square};
use shogiban_record::{StoredGame, format_clock};

use crate::clock::{Clock, SystemClock};
use crate::prompt::PromotionPrompt;
use crate::recorder::GameRecorder;

pub const MSG_ILLEGAL_MOVE: &str = "illegal move - try something else";
pub const MSG_NO_PIECE_TO_DROP: &str = "No piece to drop";
pub const MSG_NO_UNDO: &str = "No moves to undo!";
pub const MSG_NO_REDO: &str = "No moves to redo";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing selected
    Selecting,
    /// A piece of the side to move is selected
    PieceSelected,
    /// A piece in hand is selected for dropping
    DropPending,
    /// The game has ended; input is ignored
    GameOver,
}

/// What the surrounding shell should do after an input
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionTransition {
    StayInGame,
    /// Leave the game screen; `record` is set when the game just finished
    ReturnToMenu { record: Option<StoredGame> },
}

pub struct GameSession {
    board: Board,
    state: SessionState,
    selected: Option<Square>,
    destinations: Bitboard,
    pending_drop: Option<PieceType>,
    undone: Vec<Move>,
    checked_king: Option<Square>,
    start_time: Option<DateTime<Utc>>,
    final_elapsed: Option<u64>,
    outcome: Option<GameOutcome>,
    message: Option<String>,
    clock: Box<dyn Clock>,
    prompt: Box<dyn PromotionPrompt>,
    recorder: Box<dyn GameRecorder>,
}

impl GameSession {
    /// New game from the starting position, timed by the system clock
    pub fn new(
        prompt: impl PromotionPrompt + 'static,
        recorder: impl GameRecorder + 'static,
    ) -> Self {
        GameSession {
            board: Board::startpos(),
            state: SessionState::Selecting,
            selected: None,
            destinations: Bitboard::EMPTY,
            pending_drop: None,
            undone: Vec::new(),
            checked_king: None,
            start_time: None,
            final_elapsed: None,
            outcome: None,
            message: None,
            clock: Box::new(SystemClock),
            prompt: Box::new(prompt),
            recorder: Box::new(recorder),
        }
    }

    /// Start from `board` instead of the starting position
    pub fn with_board(mut self, board: Board) -> Self {
        self.checked_king = board.checked_king();
        self.board = board;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn selected_square(&self) -> Option<Square> {
        self.selected
    }

    /// Piece type waiting to be dropped
    pub fn pending_drop(&self) -> Option<PieceType> {
        self.pending_drop
    }

    /// Highlight set: destinations of the selected piece or pending drop
    pub fn legal_destinations(&self) -> Bitboard {
        self.destinations
    }

    /// King square of the side to move while it is in check
    pub fn checked_king(&self) -> Option<Square> {
        self.checked_king
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    /// Moves taken back and available for redo, most recent last
    pub fn undone_moves(&self) -> &[Move] {
        &self.undone
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn take_message(&mut self) -> Option<String> {
        self.message.take()
    }

    /// Seconds since the first move; frozen once the game is over
    pub fn elapsed_seconds(&self) -> u64 {
        if let Some(elapsed) = self.final_elapsed {
            return elapsed;
        }
        self.start_time.map_or(0, |start| {
            u64::try_from((self.clock.now() - start).num_seconds()).unwrap_or(0)
        })
    }

    /// Elapsed time as `MM:SS`
    pub fn clock_label(&self) -> String {
        format_clock(self.elapsed_seconds())
    }

    /// Click on a board square, or `None` for a click outside the board.
    ///
    /// With nothing selected, selects a piece of the side to move. With a piece
    /// selected the click is a destination, and with a drop pending it is the
    /// drop target.
    pub fn select_square(&mut self, sq: impl Into<Option<Square>>) -> SessionTransition {
        let sq = sq.into();
        match self.state {
            SessionState::GameOver => SessionTransition::StayInGame,
            SessionState::PieceSelected => self.attempt_move(sq),
            SessionState::DropPending => self.attempt_drop(sq),
            SessionState::Selecting => {
                self.message = None;
                match sq.and_then(|sq| self.board.piece_at(sq).map(|piece| (sq, piece))) {
                    Some((sq, piece)) if piece.color == self.board.side_to_move() => {
                        self.selected = Some(sq);
                        self.destinations = self.board.legal_destinations(sq);
                        self.state = SessionState::PieceSelected;
                        log::debug!("selected {piece} on {sq}");
                    }
                    _ => self.clear_selection(),
                }
                SessionTransition::StayInGame
            }
        }
    }

    /// Move the selected piece to `dest`, asking about promotion when it is
    /// optional. Anything but a highlighted destination drops the selection.
    pub fn attempt_move(&mut self, dest: impl Into<Option<Square>>) -> SessionTransition {
        if self.state != SessionState::PieceSelected {
            return SessionTransition::StayInGame;
        }
        self.message = None;
        let from = self.selected;
        let dest = dest.into().filter(|&dest| self.destinations.test(dest));
        self.clear_selection();

        let (Some(from), Some(dest)) = (from, dest) else {
            return SessionTransition::StayInGame;
        };

        let promoting = Move::normal(from, dest, true);
        let plain = Move::normal(from, dest, false);
        let mv = match (self.board.is_legal(promoting), self.board.is_legal(plain)) {
            (true, true) => {
                if self.prompt.confirm_promotion(promoting) {
                    promoting
                } else {
                    plain
                }
            }
            (true, false) => promoting,
            _ => plain,
        };
        self.commit(mv)
    }

    /// Pick a piece from `color`'s hand for dropping
    pub fn select_drop_piece(&mut self, piece_type: PieceType, color: Color) -> SessionTransition {
        if self.state == SessionState::GameOver {
            return SessionTransition::StayInGame;
        }
        self.message = None;
        self.clear_selection();

        if color != self.board.side_to_move() {
            self.message = Some(format!("It is {}'s turn", self.board.side_to_move()));
            return SessionTransition::StayInGame;
        }
        if self.board.hand_count(color, piece_type) == 0 {
            self.message = Some(MSG_NO_PIECE_TO_DROP.to_string());
            return SessionTransition::StayInGame;
        }

        self.pending_drop = Some(piece_type);
        self.destinations = self.board.legal_drop_destinations(piece_type);
        self.state = SessionState::DropPending;
        log::debug!("drop pending: {piece_type}");
        SessionTransition::StayInGame
    }

    /// Drop the pending piece on `dest`; either way drop mode ends.
    /// A click outside the board just cancels the drop.
    pub fn attempt_drop(&mut self, dest: impl Into<Option<Square>>) -> SessionTransition {
        if self.state != SessionState::DropPending {
            return SessionTransition::StayInGame;
        }
        self.message = None;
        let piece_type = self.pending_drop;
        self.clear_selection();

        let (Some(piece_type), Some(dest)) = (piece_type, dest.into()) else {
            return SessionTransition::StayInGame;
        };
        let mv = Move::drop(piece_type, dest);
        if !self.board.is_legal(mv) {
            self.message = Some(MSG_ILLEGAL_MOVE.to_string());
            return SessionTransition::StayInGame;
        }
        self.commit(mv)
    }

    pub fn undo(&mut self) -> SessionTransition {
        if self.state == SessionState::GameOver {
            return SessionTransition::StayInGame;
        }
        self.message = None;
        self.clear_selection();

        match self.board.pop() {
            Ok(mv) => {
                log::debug!("undo {mv}");
                self.undone.push(mv);
            }
            Err(_) => self.message = Some(MSG_NO_UNDO.to_string()),
        }
        self.checked_king = self.board.checked_king();
        self.on_game_over()
    }

    pub fn redo(&mut self) -> SessionTransition {
        if self.state == SessionState::GameOver {
            return SessionTransition::StayInGame;
        }
        self.message = None;
        self.clear_selection();

        match self.undone.pop() {
            Some(mv) => {
                if let Err(err) = self.board.push(mv) {
                    log::error!("redo of {mv} failed: {err}");
                    self.message = Some(err.to_string());
                } else {
                    log::debug!("redo {mv}");
                }
            }
            None => self.message = Some(MSG_NO_REDO.to_string()),
        }
        self.checked_king = self.board.checked_king();
        self.on_game_over()
    }

    /// Menu button
    pub fn leave(&self) -> SessionTransition {
        SessionTransition::ReturnToMenu { record: None }
    }

    /// Finish the game if the position has ended it.
    ///
    /// Runs after every input and only acts once: it freezes the clock, sets
    /// the result message and hands the record to the recorder. A failed save
    /// is reported in the message; the session stays usable.
    pub fn on_game_over(&mut self) -> SessionTransition {
        if self.state == SessionState::GameOver {
            return SessionTransition::StayInGame;
        }
        let Some(outcome) = self.board.outcome() else {
            return SessionTransition::StayInGame;
        };

        let elapsed = self.elapsed_seconds();
        self.final_elapsed = Some(elapsed);
        self.outcome = Some(outcome);
        self.state = SessionState::GameOver;
        self.clear_selection();
        log::info!("game over after {} moves: {outcome}", self.board.ply());

        let record =
            StoredGame::finished_at(self.clock.now(), elapsed, self.board.move_stack().to_vec());
        self.message = Some(match self.recorder.record(&record) {
            Ok(()) => outcome.to_string(),
            Err(err) => {
                log::warn!("failed to save finished game: {err}");
                format!("{outcome} Saving failed: {err}")
            }
        });

        SessionTransition::ReturnToMenu { record: Some(record) }
    }

    fn commit(&mut self, mv: Move) -> SessionTransition {
        if let Err(err) = self.board.push(mv) {
            log::error!("move {mv} rejected after validation: {err}");
            self.message = Some(MSG_ILLEGAL_MOVE.to_string());
            return SessionTransition::StayInGame;
        }
        self.undone.clear();
        if self.start_time.is_none() {
            self.start_time = Some(self.clock.now());
        }
        self.checked_king = self.board.checked_king();
        self.on_game_over()
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.pending_drop = None;
        self.destinations = Bitboard::EMPTY;
        if self.state != SessionState::GameOver {
            self.state = SessionState::Selecting;
        }
    }
}
