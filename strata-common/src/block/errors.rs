use thiserror::Error;

/// Errors raised while reading a block identifier from text.
#[derive(Debug, Error)]
pub enum BlockIdError {
    /// The input is not a 128-bit identifier in hyphenated or simple hex form.
    #[error("Invalid block id {input:?}: {source}")]
    Malformed {
        input: String,
        #[source]
        source: uuid::Error,
    },
}
