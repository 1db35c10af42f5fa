#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
#![deny(missing_docs, unused_must_use)]

//! Shared building blocks for sub-character tokenizers.
//!
//! Contract: identical text + identical tokenizer -> identical ids. Encoding
//! never fails; unknown units degrade to the UNK id.
//!
//! Layout:
//! - `special.rs`: reserved symbols (PAD/UNK/CLS/SEP) and their fixed ids
//! - `vocab.rs`: dense symbol <-> id table, JSON/bincode persistence
//! - `encoder.rs`: wrap/truncate/pad/mask pipeline, options and outputs
//! - `tokenizer.rs`: `SubcharTokenizer`, the interface both schemes implement

/// Error type and result alias.
pub mod error;
/// Reserved symbols.
pub mod special;
/// Symbol <-> id table.
pub mod vocab;
/// Encode pipeline.
pub mod encoder;
/// Scheme-independent tokenizer interface.
pub mod tokenizer;

pub use encoder::{
    ArrayBatch, EncodeOptions, Encoded, EncodedBatch, EncodedSequence, Encoder, PadTo, ReturnFormat,
    TokenSequence,
};
pub use error::{Result, TokenizeError};
pub use special::{SpecialTokens, TokenId, RESERVED_IDS};
pub use tokenizer::{SubcharTokenizer, TextInput};
pub use vocab::Vocabulary;
