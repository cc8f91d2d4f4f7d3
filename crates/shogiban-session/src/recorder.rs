use shogiban_record::{PersistenceError, RecordStore, StoredGame};

/// Receives the record of a finished game
pub trait GameRecorder {
    fn record(&mut self, game: &StoredGame) -> Result<(), PersistenceError>;
}

/// Saves the record, then re-ranks the leaderboard
impl GameRecorder for RecordStore {
    fn record(&mut self, game: &StoredGame) -> Result<(), PersistenceError> {
        self.save(game)?;
        self.rank_and_prune()?;
        Ok(())
    }
}

impl<F> GameRecorder for F
where
    F: FnMut(&StoredGame) -> Result<(), PersistenceError>,
{
    fn record(&mut self, game: &StoredGame) -> Result<(), PersistenceError> {
        self(game)
    }
}
