//! Phonetic scheme: romanized syllable -> (initial, final, tone).
//!
//! Splitting is greedy: the longest prefix of the toneless core that is a
//! known initial wins, so `zhong1` splits as `zh` + `ong`, never `z` + `hong`.
//! Only prefixes up to the longest initial's length are probed.
//!
//! Nothing here fails. A core without any matching initial keeps its tone and
//! emits UNK for both the initial and the final; an empty or whitespace-only
//! entry is dropped; a text with no surviving syllable yields a single UNK.

use std::collections::HashSet;

use subchar_core::{Result, SpecialTokens, SubcharTokenizer, TokenId, Vocabulary};
use tracing::debug;

use crate::alphabet::{PhoneticAlphabet, NEUTRAL_TONE};
use crate::config::{TokenizerConfig, PINYIN_TABLE_FILE};
use crate::romanize::{PinyinRomanizer, Romanizer, TableRomanizer};

/// Ids emitted per retained syllable.
pub const IDS_PER_SYLLABLE: usize = 3;

/// String components of one syllable before id lookup.
///
/// `None` marks a component that will be emitted as UNK.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyllableParts<'a> {
    /// matched onset
    pub initial: Option<&'a str>,
    /// remainder after the onset, possibly empty
    pub final_part: Option<&'a str>,
    /// trailing digit, or the neutral tone
    pub tone: &'a str,
}

/// Longest-prefix matcher over a set of initials.
#[derive(Clone, Debug)]
struct InitialMatcher {
    initials: HashSet<String>,
    max_chars: usize,
}

impl InitialMatcher {
    fn new(alphabet: &PhoneticAlphabet) -> Self {
        Self {
            initials: alphabet.initials.iter().cloned().collect(),
            max_chars: alphabet.max_initial_chars(),
        }
    }

    /// `(initial, rest)` for the longest matching prefix of `core`.
    fn split<'s>(&self, core: &'s str) -> Option<(&'s str, &'s str)> {
        let ends: Vec<usize> = core
            .char_indices()
            .map(|(at, ch)| at + ch.len_utf8())
            .take(self.max_chars)
            .collect();
        ends.into_iter().rev().find_map(|end| {
            let head = core.get(..end)?;
            let tail = core.get(end..)?;
            self.initials.contains(head).then_some((head, tail))
        })
    }
}

/// Splits syllables and maps their parts to ids.
#[derive(Clone, Debug)]
pub struct PhoneticDecomposer {
    matcher: InitialMatcher,
    finals: HashSet<String>,
    tones: HashSet<String>,
}

impl PhoneticDecomposer {
    /// Decomposer over `alphabet`.
    pub fn new(alphabet: &PhoneticAlphabet) -> Self {
        Self {
            matcher: InitialMatcher::new(alphabet),
            finals: alphabet.finals.iter().cloned().collect(),
            tones: alphabet.tones.iter().cloned().collect(),
        }
    }

    /// Split one syllable (surrounding whitespace ignored) into its parts.
    pub fn split_syllable<'a>(&self, syllable: &'a str) -> SyllableParts<'a> {
        let syllable = syllable.trim();
        let (core, tone) = split_tone(syllable);
        match self.matcher.split(core) {
            Some((initial, final_part)) => SyllableParts {
                initial: Some(initial),
                final_part: Some(final_part),
                tone,
            },
            None => SyllableParts {
                initial: None,
                final_part: None,
                tone,
            },
        }
    }

    /// Exactly three ids: initial, final, tone.
    ///
    /// A final or tone outside the alphabet (say `uang` or `0`) becomes UNK.
    pub fn syllable_ids(&self, vocab: &Vocabulary, syllable: &str) -> [TokenId; IDS_PER_SYLLABLE] {
        let unk = vocab.specials().unk_id();
        let parts = self.split_syllable(syllable);
        let initial = parts.initial.map_or(unk, |s| vocab.lookup(s));
        let final_id = parts
            .final_part
            .filter(|s| self.finals.contains(*s))
            .map_or(unk, |s| vocab.lookup(s));
        let tone = if self.tones.contains(parts.tone) {
            vocab.lookup(parts.tone)
        } else {
            unk
        };
        [initial, final_id, tone]
    }

    /// Flat ids for a sequence of romanized entries, applying the skip and fallback policies.
    pub fn decompose<I, S>(&self, vocab: &Vocabulary, entries: I) -> Vec<TokenId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ids = Vec::new();
        let mut skipped = 0usize;
        for entry in entries {
            let entry = entry.as_ref();
            if entry.trim().is_empty() {
                skipped += 1;
                continue;
            }
            ids.extend(self.syllable_ids(vocab, entry));
        }
        if ids.is_empty() {
            debug!(skipped, "no syllable survived, emitting a single UNK");
            ids.push(vocab.specials().unk_id());
        }
        ids
    }
}

/// `(core, tone)`: a trailing ASCII digit is stripped as the tone, otherwise the tone is neutral.
fn split_tone(syllable: &str) -> (&str, &str) {
    match syllable.char_indices().last() {
        Some((at, ch)) if ch.is_ascii_digit() => match (syllable.get(..at), syllable.get(at..)) {
            (Some(core), Some(tone)) => (core, tone),
            _ => (syllable, NEUTRAL_TONE),
        },
        _ => (syllable, NEUTRAL_TONE),
    }
}

/// Phonetic tokenizer: romanizer -> [`PhoneticDecomposer`] -> shared pipeline.
///
/// Vocabulary: specials ++ initials ++ finals ++ tones, identical for every
/// instance built from the same alphabet.
#[derive(Debug)]
pub struct PhoneticTokenizer<R = PinyinRomanizer> {
    vocab: Vocabulary,
    decomposer: PhoneticDecomposer,
    romanizer: R,
    max_length: usize,
}

impl PhoneticTokenizer<PinyinRomanizer> {
    /// Standard alphabet, romanizing through the `pinyin` dictionary.
    ///
    /// `config.table_path` is not consulted; see [`PhoneticTokenizer::from_table`].
    pub fn new(config: &TokenizerConfig) -> Self {
        Self::with_romanizer(config, PinyinRomanizer::new())
    }
}

impl PhoneticTokenizer<TableRomanizer> {
    /// Standard alphabet, romanizing through the char -> syllable table named by
    /// `config.table_path` (or the bundled `zh2pinyin.txt`).
    ///
    /// The bundled table only covers a couple dozen characters; anything it
    /// misses is dropped like punctuation. Point `table_path` at a full table,
    /// or use [`PhoneticTokenizer::new`], for real text.
    pub fn from_table(config: &TokenizerConfig) -> Self {
        let romanizer = TableRomanizer::load(config.table_path_or(PINYIN_TABLE_FILE));
        Self::with_romanizer(config, romanizer)
    }
}

impl<R: Romanizer> PhoneticTokenizer<R> {
    /// Standard alphabet and default specials with a caller-supplied romanizer.
    pub fn with_romanizer(config: &TokenizerConfig, romanizer: R) -> Self {
        Self::with_alphabet(config, PhoneticAlphabet::standard(), SpecialTokens::default(), romanizer)
    }

    /// Fully explicit construction.
    pub fn with_alphabet(
        config: &TokenizerConfig,
        alphabet: PhoneticAlphabet,
        specials: SpecialTokens,
        romanizer: R,
    ) -> Self {
        let vocab = Vocabulary::from_ordered(specials, alphabet.symbols());
        let decomposer = PhoneticDecomposer::new(&alphabet);
        debug!(
            vocab_size = vocab.size(),
            max_length = config.max_length,
            "phonetic tokenizer initialized"
        );
        Self {
            vocab,
            decomposer,
            romanizer,
            max_length: config.max_length,
        }
    }

    /// Parts of one syllable before id lookup.
    pub fn split_syllable<'a>(&self, syllable: &'a str) -> SyllableParts<'a> {
        self.decomposer.split_syllable(syllable)
    }

    /// Write the symbol -> id table as JSON.
    pub fn save_vocab(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        self.vocab.persist(path)
    }
}

impl<R: Romanizer> SubcharTokenizer for PhoneticTokenizer<R> {
    fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    fn max_length(&self) -> usize {
        self.max_length
    }

    fn decompose(&self, text: &str) -> Vec<TokenId> {
        let entries = self.romanizer.romanize(text);
        self.decomposer.decompose(&self.vocab, &entries)
    }
}
