use std::path::PathBuf;

use qw_core::{QwError, RecordId};
use uuid::Uuid;

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors that abort a simulation run or a result lookup.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// No stored result has this id.
    #[error("simulation not found: {0}")]
    SimulationNotFound(Uuid),

    /// A dialogue names a speaker that is not among the characters.
    #[error("dialogue {dialogue} refers to unknown character {character}")]
    CharacterNotFound {
        /// The dialogue with the dangling reference.
        dialogue: RecordId,
        /// The missing character id.
        character: RecordId,
    },

    /// Lookup or loading error from the content records.
    #[error(transparent)]
    Core(#[from] QwError),

    /// The result store could not be read or written.
    #[error("cannot access {path}: {source}")]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// A result could not be encoded or decoded.
    #[error("cannot encode simulation result: {0}")]
    Serialization(#[from] serde_json::Error),
}
