//! # shogiban-record
//!
//! Persistence for finished games.
//!
//! - `record`: `StoredGame` and its JSON file format
//! - `store`: `RecordStore` (save / load / list) and leaderboard ranking
//! - `config`: storage directories and leaderboard size

pub mod config;
pub mod error;
pub mod record;
pub mod store;

pub use config::StorageConfig;
pub use error::{PersistenceError, RecordFormatError};
pub use record::{DATE_FORMAT, StoredGame, format_clock};
pub use store::{RankedGame, RankingReport, RecordEntry, RecordStore};
