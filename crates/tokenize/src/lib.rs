#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
#![deny(missing_docs, unused_must_use)]

//! Structured sub-character tokenizers.
//!
//! Two schemes share the `subchar-core` encode contract:
//! - phonetic: romanized syllable -> (initial, final, tone), 3 ids per syllable
//! - graphemic: character -> stroke-type symbols, 1 id per stroke
//!
//! ```no_run
//! use subchar_tokenize::{EncodeOptions, GraphemicTokenizer, SubcharTokenizer, TokenizerConfig};
//!
//! let tok = GraphemicTokenizer::new(&TokenizerConfig::graphemic());
//! let batch = tok.apply(&["中国"], &EncodeOptions::pad_to_max_length());
//! assert_eq!(batch.input_ids[0].len(), 256);
//! ```
//!
//! Layout:
//! - `alphabet.rs`: fixed initials/finals/tones
//! - `phonetic.rs`: greedy initial/final/tone split, `PhoneticTokenizer`
//! - `table.rs`: char -> string table loader
//! - `graphemic.rs`: stroke lookup, `GraphemicTokenizer`
//! - `romanize.rs`: `Romanizer` adapters feeding the phonetic scheme
//! - `config.rs`: `TokenizerConfig`, bundled resource paths

/// Phonetic alphabet.
pub mod alphabet;
/// Constructor configuration.
pub mod config;
/// Graphemic (stroke) scheme.
pub mod graphemic;
/// Phonetic (initial/final/tone) scheme.
pub mod phonetic;
/// Romanization adapters.
pub mod romanize;
/// Character table loader.
pub mod table;

pub use alphabet::PhoneticAlphabet;
pub use config::{resource_dir, TokenizerConfig, PINYIN_TABLE_FILE, STROKE_TABLE_FILE};
pub use graphemic::{GraphemicDecomposer, GraphemicTokenizer};
pub use phonetic::{PhoneticDecomposer, PhoneticTokenizer, SyllableParts};
pub use romanize::{PinyinRomanizer, Romanizer, TableRomanizer, ToneSyllables};
pub use table::CharTable;

pub use subchar_core::{
    ArrayBatch, EncodeOptions, Encoded, EncodedBatch, EncodedSequence, PadTo, ReturnFormat, SpecialTokens,
    SubcharTokenizer, TextInput, TokenId, TokenSequence, TokenizeError, Vocabulary,
};
