//! The one interface both schemes implement.

use crate::encoder::{EncodeOptions, Encoded, EncodedBatch, Encoder, TokenSequence};
use crate::error::Result;
use crate::special::{SpecialTokens, TokenId};
use crate::vocab::Vocabulary;

/// Text handed to [`SubcharTokenizer::call`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextInput<'a> {
    /// one text, encoded as a batch of one row
    Single(&'a str),
    /// several texts, one row each
    Batch(Vec<&'a str>),
}

impl<'a> From<&'a str> for TextInput<'a> {
    fn from(text: &'a str) -> Self {
        TextInput::Single(text)
    }
}

impl<'a> From<Vec<&'a str>> for TextInput<'a> {
    fn from(texts: Vec<&'a str>) -> Self {
        TextInput::Batch(texts)
    }
}

/// Sub-character tokenizer: a scheme-specific decomposer in front of the shared pipeline.
///
/// Implementors only provide the vocabulary, a default max length and
/// [`decompose`](Self::decompose); everything else is shared.
pub trait SubcharTokenizer: Send + Sync {
    /// Symbol table, read-only after construction.
    fn vocab(&self) -> &Vocabulary;

    /// Max length used when the options carry no override.
    fn max_length(&self) -> usize;

    /// Flat id sequence for `text`, without boundary markers.
    fn decompose(&self, text: &str) -> Vec<TokenId>;

    /// Special-token spellings and ids.
    fn specials(&self) -> &SpecialTokens {
        self.vocab().specials()
    }

    /// Number of vocabulary entries.
    fn vocab_size(&self) -> usize {
        self.vocab().size()
    }

    /// Id used for padding.
    fn pad_token_id(&self) -> TokenId {
        self.specials().pad_id()
    }

    /// Decomposed ids wrapped in CLS ... SEP, neither truncated nor padded.
    fn encode(&self, text: &str) -> TokenSequence {
        Encoder::new(self.specials()).wrap(&self.decompose(text))
    }

    /// Encode a batch with explicit options.
    fn apply(&self, batch: &[&str], options: &EncodeOptions) -> EncodedBatch {
        let max_length = options.max_length.unwrap_or_else(|| self.max_length());
        let rows = batch.iter().map(|text| self.decompose(text));
        Encoder::new(self.specials()).run(rows, max_length, options)
    }

    /// Encode a single text or a batch and shape the result per `options.return_format`.
    fn call(&self, input: TextInput<'_>, options: &EncodeOptions) -> Result<Encoded> {
        let batch = match input {
            TextInput::Single(text) => self.apply(&[text], options),
            TextInput::Batch(texts) => self.apply(&texts, options),
        };
        Encoder::new(self.specials()).finish(batch, options.return_format)
    }

    /// Symbols for `ids`, for debugging. Unknown ids render as the UNK symbol.
    fn decode(&self, ids: &[TokenId]) -> Vec<String> {
        let vocab = self.vocab();
        ids.iter()
            .map(|&id| vocab.reverse(id).unwrap_or(vocab.specials().unk.as_str()).to_string())
            .collect()
    }
}
