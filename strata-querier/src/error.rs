use thiserror::Error;

use crate::consistency::MissingBlock;

/// Failure of the blocks consistency check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    /// Known blocks, past both grace windows, that no node returned.
    ///
    /// The message lists their identifiers space-separated, in the order the
    /// known blocks were supplied.
    #[error("consistency check failed because of non-queried blocks: {}", join_ids(.0))]
    MissingBlocks(Vec<MissingBlock>),
}

impl ConsistencyError {
    pub fn missing_blocks(&self) -> &[MissingBlock] {
        match self {
            ConsistencyError::MissingBlocks(missing) => missing,
        }
    }
}

fn join_ids(missing: &[MissingBlock]) -> String {
    missing
        .iter()
        .map(|m| m.id.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Error)]
pub enum QuerierError {
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Invalid snapshot: {0}")]
    Snapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
