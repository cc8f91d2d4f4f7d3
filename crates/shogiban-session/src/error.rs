use shogiban_core::{BoardError, Move};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// A stored move cannot be applied to the replayed position
    #[error("corrupted record at ply {ply} ({mv}): {source}")]
    Corruption {
        ply: usize,
        mv: Move,
        #[source]
        source: BoardError,
    },
}
