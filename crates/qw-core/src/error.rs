use std::path::PathBuf;

use crate::record::RecordId;

/// Alias for `Result<T, QwError>`.
pub type QwResult<T> = Result<T, QwError>;

/// Errors raised when looking up or loading narrative content.
///
/// Content defects (broken chains, bad conditions, ...) are never reported
/// through this type; they surface as validation issues instead.
#[derive(Debug, thiserror::Error)]
pub enum QwError {
    /// The requested quest does not exist in the project.
    #[error("quest not found: {0}")]
    QuestNotFound(RecordId),

    /// The requested story arc does not exist in the project.
    #[error("story arc not found: {0}")]
    StoryArcNotFound(RecordId),

    /// The requested character does not exist in the project.
    #[error("character not found: {0}")]
    CharacterNotFound(RecordId),

    /// A project file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// A project document is not valid JSON for the record schema.
    #[error("invalid project document: {0}")]
    Parse(#[from] serde_json::Error),
}
