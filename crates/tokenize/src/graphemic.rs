//! Graphemic scheme: character -> stroke-symbol sequence.
//!
//! A mapped character emits one id per stroke symbol, in stroke order. An
//! unmapped character emits exactly one UNK. Nothing is skipped, so every
//! input character contributes at least one id.

use std::path::Path;

use subchar_core::{Result, SpecialTokens, SubcharTokenizer, TokenId, Vocabulary};
use tracing::debug;

use crate::config::{TokenizerConfig, STROKE_TABLE_FILE};
use crate::table::CharTable;

/// Looks characters up in the decomposition table.
#[derive(Clone, Debug, Default)]
pub struct GraphemicDecomposer {
    table: CharTable,
}

impl GraphemicDecomposer {
    /// Decomposer over `table`.
    pub fn new(table: CharTable) -> Self {
        Self { table }
    }

    /// The decomposition table.
    pub fn table(&self) -> &CharTable {
        &self.table
    }

    /// Vocabulary of every distinct stroke symbol in the table, sorted, after the specials.
    pub fn build_vocab(&self, specials: SpecialTokens) -> Vocabulary {
        Vocabulary::from_discovered(specials, self.table.value_chars().map(String::from))
    }

    /// Stroke string for `ch`, if mapped.
    pub fn char_to_strokes(&self, ch: char) -> Option<&str> {
        self.table.get(ch)
    }

    /// Stroke symbols for `text`; unmapped characters appear as `unk`.
    pub fn text_to_strokes(&self, text: &str, unk: &str) -> Vec<String> {
        let mut symbols = Vec::new();
        for ch in text.chars() {
            match self.table.get(ch) {
                Some(strokes) => symbols.extend(strokes.chars().map(String::from)),
                None => symbols.push(unk.to_string()),
            }
        }
        symbols
    }

    /// Flat ids for `text`.
    pub fn decompose(&self, vocab: &Vocabulary, text: &str) -> Vec<TokenId> {
        let unk = vocab.specials().unk_id();
        let mut ids = Vec::with_capacity(text.len());
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            match self.table.get(ch) {
                Some(strokes) => {
                    ids.extend(strokes.chars().map(|s| vocab.lookup(s.encode_utf8(&mut buf))));
                }
                None => ids.push(unk),
            }
        }
        ids
    }
}

/// Graphemic tokenizer: table lookup -> shared pipeline.
#[derive(Clone, Debug)]
pub struct GraphemicTokenizer {
    vocab: Vocabulary,
    decomposer: GraphemicDecomposer,
    max_length: usize,
}

impl GraphemicTokenizer {
    /// Load the table named by `config.table_path` (or the bundled `zh2letter.txt`).
    ///
    /// A missing table is not an error: the tokenizer is still usable and maps
    /// every character to UNK.
    pub fn new(config: &TokenizerConfig) -> Self {
        let table = CharTable::load(config.table_path_or(STROKE_TABLE_FILE));
        Self::from_table(config, table, SpecialTokens::default())
    }

    /// Tokenizer over an already parsed table.
    pub fn from_table(config: &TokenizerConfig, table: CharTable, specials: SpecialTokens) -> Self {
        let decomposer = GraphemicDecomposer::new(table);
        let vocab = decomposer.build_vocab(specials);
        debug!(
            table_size = decomposer.table().len(),
            vocab_size = vocab.size(),
            max_length = config.max_length,
            "graphemic tokenizer initialized"
        );
        Self {
            vocab,
            decomposer,
            max_length: config.max_length,
        }
    }

    /// Stroke string for `ch`, if mapped.
    pub fn char_to_strokes(&self, ch: char) -> Option<&str> {
        self.decomposer.char_to_strokes(ch)
    }

    /// Stroke symbols for `text`, with the UNK symbol for unmapped characters.
    pub fn text_to_strokes(&self, text: &str) -> Vec<String> {
        self.decomposer.text_to_strokes(text, &self.vocab.specials().unk)
    }

    /// Number of entries in the decomposition table.
    pub fn table_len(&self) -> usize {
        self.decomposer.table().len()
    }

    /// Write the symbol -> id table, with the table size, as JSON.
    pub fn save_vocab(&self, path: impl AsRef<Path>) -> Result<()> {
        self.vocab.persist_with_table_size(path, Some(self.table_len()))
    }
}

impl SubcharTokenizer for GraphemicTokenizer {
    fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    fn max_length(&self) -> usize {
        self.max_length
    }

    fn decompose(&self, text: &str) -> Vec<TokenId> {
        self.decomposer.decompose(&self.vocab, text)
    }
}
