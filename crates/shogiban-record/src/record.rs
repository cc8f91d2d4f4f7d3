//! Finished-game record and its on-disk JSON form
//!
//! ```json
//! {
//!     "date": "2024-05-01 18:30:05",
//!     "time": 42,
//!     "moves": [
//!         { "from": 60, "to": 51, "promo": false, "dropped_type": null },
//!         { "from": null, "to": 40, "promo": false, "dropped_type": 1 }
//!     ]
//! }
//! ```
//!
//! Squares are board indices (0 = 9a, 80 = 1i); `dropped_type` is the piece
//! wire code (pawn = 1 ... rook = 7).

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use shogiban_core::{Move, PieceType, Square};

use crate::error::RecordFormatError;

/// `date` field format (local time)
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A finished game: when it ended, how long it took and every move played
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredGame {
    pub date: String,
    pub elapsed_seconds: u64,
    pub moves: Vec<Move>,
}

#[derive(Serialize, Deserialize)]
struct RecordFile {
    date: String,
    time: u64,
    moves: Vec<RecordedMove>,
}

#[derive(Serialize, Deserialize)]
struct RecordedMove {
    from: Option<u8>,
    to: u8,
    #[serde(default)]
    promo: Option<bool>,
    #[serde(default)]
    dropped_type: Option<u8>,
}

impl From<Move> for RecordedMove {
    fn from(mv: Move) -> Self {
        match mv {
            Move::Normal { from, to, promote } => RecordedMove {
                from: Some(from.raw()),
                to: to.raw(),
                promo: Some(promote),
                dropped_type: None,
            },
            Move::Drop { piece_type, to } => RecordedMove {
                from: None,
                to: to.raw(),
                promo: Some(false),
                dropped_type: Some(piece_type.code()),
            },
        }
    }
}

impl TryFrom<RecordedMove> for Move {
    type Error = String;

    fn try_from(rec: RecordedMove) -> Result<Self, Self::Error> {
        let square = |index: u8| {
            Square::from_index(index as usize)
                .ok_or_else(|| format!("square {index} is off the board"))
        };
        let to = square(rec.to)?;
        match (rec.from, rec.dropped_type) {
            (Some(from), None) => Ok(Move::normal(square(from)?, to, rec.promo.unwrap_or(false))),
            (None, Some(code)) => {
                let piece_type =
                    PieceType::from_code(code).ok_or_else(|| format!("unknown piece code {code}"))?;
                Ok(Move::drop(piece_type, to))
            }
            (Some(_), Some(_)) => Err("both a source square and a dropped piece".to_string()),
            (None, None) => Err("neither a source square nor a dropped piece".to_string()),
        }
    }
}

impl StoredGame {
    pub fn new(date: impl Into<String>, elapsed_seconds: u64, moves: Vec<Move>) -> Self {
        StoredGame { date: date.into(), elapsed_seconds, moves }
    }

    /// Record dated `at`, written in local time
    pub fn finished_at(at: DateTime<Utc>, elapsed_seconds: u64, moves: Vec<Move>) -> Self {
        let date = at.with_timezone(&Local).format(DATE_FORMAT).to_string();
        Self::new(date, elapsed_seconds, moves)
    }

    /// File name stem derived from the date, e.g. `game_2024-05-01 18-30-05`
    pub fn file_stem(&self) -> String {
        format!("game_{}", self.date.replace(':', "-"))
    }

    /// Moves in USI notation separated by spaces
    pub fn move_text(&self) -> String {
        self.moves.iter().map(Move::to_string).collect::<Vec<_>>().join(" ")
    }

    pub fn clock_label(&self) -> String {
        format_clock(self.elapsed_seconds)
    }

    /// Decode a record. Every required key must be present and every move
    /// must decode; nothing partial is returned.
    pub fn from_json(text: &str) -> Result<Self, RecordFormatError> {
        let file: RecordFile = serde_json::from_str(text)?;
        let moves = file
            .moves
            .into_iter()
            .enumerate()
            .map(|(index, rec)| {
                Move::try_from(rec).map_err(|reason| RecordFormatError::Move { index, reason })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StoredGame { date: file.date, elapsed_seconds: file.time, moves })
    }

    /// Pretty-printed JSON with four-space indentation
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let file = RecordFile {
            date: self.date.clone(),
            time: self.elapsed_seconds,
            moves: self.moves.iter().copied().map(RecordedMove::from).collect(),
        };
        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        file.serialize(&mut ser)?;
        // serde_json only ever emits UTF-8
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

/// `MM:SS`; minutes keep counting past an hour
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(index: usize) -> Square {
        Square::from_index(index).unwrap()
    }

    #[test]
    fn test_decode_minimal_record() {
        let text = r#"{"date": "2024-05-01 18:30:05", "time": 42,
            "moves": [{"from": 1, "to": 2, "promo": false, "dropped_type": null}]}"#;
        let game = StoredGame::from_json(text).unwrap();
        assert_eq!(game.elapsed_seconds, 42);
        assert_eq!(game.moves, vec![Move::normal(sq(1), sq(2), false)]);
        assert_eq!(game.file_stem(), "game_2024-05-01 18-30-05");
    }

    #[test]
    fn test_drop_and_promotion_encoding() {
        let game = StoredGame::new(
            "2024-05-01 18:30:05",
            125,
            vec![Move::drop(PieceType::Pawn, sq(40)), Move::normal(sq(70), sq(20), true)],
        );
        let text = game.to_json().unwrap();
        assert!(text.contains("\n    \"date\""));
        assert!(text.contains("\"dropped_type\": 1"));
        assert!(text.contains("\"from\": null"));
        assert_eq!(StoredGame::from_json(&text).unwrap(), game);
    }

    #[test]
    fn test_missing_key_is_rejected() {
        for text in [
            r#"{"time": 1, "moves": []}"#,
            r#"{"date": "x", "moves": []}"#,
            r#"{"date": "x", "time": 1}"#,
        ] {
            assert!(matches!(StoredGame::from_json(text), Err(RecordFormatError::Json(_))), "{text}");
        }
    }

    #[test]
    fn test_undecodable_moves_are_rejected() {
        for (text, index) in [
            (r#"{"date": "x", "time": 1, "moves": [{"from": 1, "to": 81}]}"#, 0),
            (r#"{"date": "x", "time": 1, "moves": [{"from": 60, "to": 51}, {"from": null, "to": 3}]}"#, 1),
            (r#"{"date": "x", "time": 1, "moves": [{"from": null, "to": 3, "dropped_type": 15}]}"#, 0),
            (r#"{"date": "x", "time": 1, "moves": [{"from": 4, "to": 3, "dropped_type": 1}]}"#, 0),
        ] {
            match StoredGame::from_json(text) {
                Err(RecordFormatError::Move { index: i, .. }) => assert_eq!(i, index, "{text}"),
                other => panic!("unexpected result for {text}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(3725), "62:05");
    }
}
