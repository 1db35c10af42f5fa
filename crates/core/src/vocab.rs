//! Dense, zero-based symbol <-> id table.
//!
//! A vocabulary is assembled once by one of the two builders and is read-only
//! afterwards:
//! - [`Vocabulary::from_ordered`] keeps the caller's order (fixed alphabets);
//! - [`Vocabulary::from_discovered`] deduplicates and sorts (data-driven sets).
//!
//! Both seed ids 0..=3 with the special tokens first, so discovered symbols can
//! never land on a reserved id.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TokenizeError};
use crate::special::{SpecialTokens, TokenId, RESERVED_IDS};

/// Bijective symbol <-> id mapping with the reserved ids in front.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vocabulary {
    symbols: Vec<String>,
    ids: HashMap<String, TokenId>,
    specials: SpecialTokens,
}

/// On-disk JSON form written by [`Vocabulary::persist`].
#[derive(Debug, Serialize, Deserialize)]
struct VocabArtifact {
    symbol_to_id: BTreeMap<String, TokenId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    table_size: Option<usize>,
}

/// bincode snapshot: symbols in id order.
#[derive(Serialize, Deserialize)]
struct VocabSnapshot {
    symbols: Vec<String>,
}

impl Vocabulary {
    fn seeded(specials: SpecialTokens) -> Self {
        let mut vocab = Self {
            symbols: Vec::with_capacity(RESERVED_IDS),
            ids: HashMap::new(),
            specials,
        };
        let reserved: Vec<String> = vocab.specials.symbols().iter().map(|s| s.to_string()).collect();
        for symbol in reserved {
            vocab.insert(symbol);
        }
        vocab
    }

    /// Append `symbol` unless it is already present; returns its id either way.
    fn insert(&mut self, symbol: String) -> TokenId {
        if let Some(&id) = self.ids.get(&symbol) {
            return id;
        }
        let id = self.symbols.len() as TokenId;
        self.ids.insert(symbol.clone(), id);
        self.symbols.push(symbol);
        id
    }

    /// Specials, then `symbols` in the given order. Repeats keep their first id.
    pub fn from_ordered<I, S>(specials: SpecialTokens, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocab = Self::seeded(specials);
        for symbol in symbols {
            vocab.insert(symbol.into());
        }
        debug!(size = vocab.size(), "built ordered vocabulary");
        vocab
    }

    /// Specials, then the distinct `symbols` sorted lexicographically.
    ///
    /// A discovered symbol that spells a special token keeps the reserved id.
    pub fn from_discovered<I, S>(specials: SpecialTokens, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sorted: BTreeSet<String> = symbols.into_iter().map(Into::into).collect();
        let mut vocab = Self::seeded(specials);
        for symbol in sorted {
            vocab.insert(symbol);
        }
        debug!(size = vocab.size(), "built vocabulary from discovered symbols");
        vocab
    }

    /// Rebuild from symbols in id order, checking the reserved prefix and uniqueness.
    fn from_symbols(symbols: Vec<String>) -> Result<Self> {
        let specials = match symbols.get(..RESERVED_IDS) {
            Some([pad, unk, cls, sep]) => SpecialTokens {
                pad: pad.clone(),
                unk: unk.clone(),
                cls: cls.clone(),
                sep: sep.clone(),
            },
            _ => {
                return Err(TokenizeError::InvalidVocabulary(format!(
                    "{} entries, at least {} reserved symbols are required",
                    symbols.len(),
                    RESERVED_IDS
                )))
            }
        };
        let mut ids = HashMap::with_capacity(symbols.len());
        for (id, symbol) in symbols.iter().enumerate() {
            if ids.insert(symbol.clone(), id as TokenId).is_some() {
                return Err(TokenizeError::InvalidVocabulary(format!(
                    "symbol {symbol:?} appears more than once"
                )));
            }
        }
        Ok(Self { symbols, ids, specials })
    }

    /// Id of `symbol`, or the UNK id when it is not in the table.
    pub fn lookup(&self, symbol: &str) -> TokenId {
        self.get(symbol).unwrap_or_else(|| self.specials.unk_id())
    }

    /// Id of `symbol` if present.
    pub fn get(&self, symbol: &str) -> Option<TokenId> {
        self.ids.get(symbol).copied()
    }

    /// Symbol stored at `id`.
    pub fn reverse(&self, id: TokenId) -> Option<&str> {
        self.symbols.get(id as usize).map(String::as_str)
    }

    /// Number of entries, reserved ids included.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Special-token spellings this table was seeded with.
    pub fn specials(&self) -> &SpecialTokens {
        &self.specials
    }

    /// `(id, symbol)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &str)> {
        self.symbols.iter().enumerate().map(|(id, s)| (id as TokenId, s.as_str()))
    }

    /// Symbol -> id map, ordered by symbol.
    pub fn to_map(&self) -> BTreeMap<String, TokenId> {
        self.ids.iter().map(|(s, &id)| (s.clone(), id)).collect()
    }

    /// Write the symbol -> id table as pretty JSON.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        self.persist_with_table_size(path, None)
    }

    /// Like [`persist`](Self::persist), also recording how many table entries fed the build.
    pub fn persist_with_table_size(&self, path: impl AsRef<Path>, table_size: Option<usize>) -> Result<()> {
        let artifact = VocabArtifact {
            symbol_to_id: self.to_map(),
            table_size,
        };
        let json = serde_json::to_string_pretty(&artifact)?;
        std::fs::write(path.as_ref(), json)?;
        debug!(path = %path.as_ref().display(), size = self.size(), "persisted vocabulary");
        Ok(())
    }

    /// Read an artifact written by [`persist`](Self::persist).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let artifact: VocabArtifact = serde_json::from_str(&text)?;
        let n = artifact.symbol_to_id.len();
        let mut slots: Vec<Option<String>> = vec![None; n];
        for (symbol, id) in artifact.symbol_to_id {
            let slot = slots.get_mut(id as usize).ok_or_else(|| {
                TokenizeError::InvalidVocabulary(format!("id {id} of {symbol:?} is outside 0..{n}"))
            })?;
            if slot.is_some() {
                return Err(TokenizeError::InvalidVocabulary(format!("id {id} is assigned twice")));
            }
            *slot = Some(symbol);
        }
        // n distinct ids inside 0..n fill every slot
        Self::from_symbols(slots.into_iter().flatten().collect())
    }

    /// Write a compact bincode snapshot.
    pub fn save_binary(&self, path: impl AsRef<Path>) -> Result<()> {
        let snapshot = VocabSnapshot {
            symbols: self.symbols.clone(),
        };
        let bytes = bincode::serialize(&snapshot)?;
        std::fs::write(path.as_ref(), bytes)?;
        Ok(())
    }

    /// Read a snapshot written by [`save_binary`](Self::save_binary).
    pub fn load_binary(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        let snapshot: VocabSnapshot = bincode::deserialize(&bytes)?;
        Self::from_symbols(snapshot.symbols)
    }
}
