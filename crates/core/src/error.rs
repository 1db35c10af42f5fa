//! Error type for the fallible edges of the tokenizers (artifact I/O, option parsing).
//!
//! Encoding itself never returns an error: unknown units degrade to UNK.

/// Result alias using [`TokenizeError`].
pub type Result<T> = std::result::Result<T, TokenizeError>;

/// Errors raised outside the encode hot path.
#[derive(Debug, thiserror::Error)]
pub enum TokenizeError {
    /// Reading or writing an artifact, table or config file failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization of a vocabulary artifact or config failed.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary vocabulary snapshot could not be (de)serialized.
    #[error("bincode: {0}")]
    Bincode(#[from] bincode::Error),

    /// A loaded vocabulary is not a dense bijection with the reserved ids in place.
    #[error("invalid vocabulary: {0}")]
    InvalidVocabulary(String),

    /// Rows of different lengths cannot be packed into a dense array.
    #[error("ragged batch: rows have lengths {min}..={max}, pad the batch before requesting an array")]
    RaggedBatch {
        /// shortest row length
        min: usize,
        /// longest row length
        max: usize,
    },

    /// An option string did not name a known padding target or return format.
    #[error("unknown option value: {0}")]
    UnknownOption(String),
}
