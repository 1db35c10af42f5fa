//! Adapters for the phonetic-romanization step.
//!
//! A romanizer turns text into one entry per syllable (`"zhong1"`, `"guo2"`).
//! Spans it cannot romanize come back as empty entries, which the phonetic
//! decomposer drops.

use std::path::Path;

use pinyin::ToPinyin;
use regex::Regex;

use crate::table::CharTable;

/// Text -> per-syllable romanized entries.
pub trait Romanizer: Send + Sync {
    /// Entries in text order; empty or whitespace-only entries mark non-phonetic spans.
    fn romanize(&self, text: &str) -> Vec<String>;
}

impl<F> Romanizer for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn romanize(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// Reads text that is already romanized, e.g. `"zhong1 guo2, ni3hao3"`.
///
/// Syllables may be glued together when each carries its tone digit. Every
/// run of other non-whitespace characters yields one empty entry. Any digit
/// stays attached to its syllable; the decomposer rejects tones outside the
/// alphabet.
#[derive(Clone, Debug)]
pub struct ToneSyllables {
    pattern: Regex,
}

const SYLLABLE_PATTERN: &str = r"(?i)[a-zü]+[0-9]?";

impl ToneSyllables {
    /// Romanizer matching `[a-zü]+` with an optional trailing digit.
    pub fn new() -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(SYLLABLE_PATTERN)?,
        })
    }
}

impl Romanizer for ToneSyllables {
    fn romanize(&self, text: &str) -> Vec<String> {
        let mut entries = Vec::new();
        let mut last = 0;
        for found in self.pattern.find_iter(text) {
            if text.get(last..found.start()).is_some_and(|gap| !gap.trim().is_empty()) {
                entries.push(String::new());
            }
            entries.push(found.as_str().to_lowercase().replace('ü', "v"));
            last = found.end();
        }
        if text.get(last..).is_some_and(|tail| !tail.trim().is_empty()) {
            entries.push(String::new());
        }
        entries
    }
}

/// Dictionary romanizer backed by the `pinyin` crate, tone number last
/// (`中国` -> `zhong1`, `guo2`).
///
/// Each character gets its most common reading. Characters without a reading
/// give an empty entry; a neutral-tone reading carries no digit and falls back
/// to tone `5` in the decomposer. `ü` is written `v`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PinyinRomanizer;

impl PinyinRomanizer {
    /// The dictionary romanizer.
    pub fn new() -> Self {
        Self
    }
}

impl Romanizer for PinyinRomanizer {
    fn romanize(&self, text: &str) -> Vec<String> {
        text.to_pinyin()
            .map(|reading| {
                reading.map_or_else(String::new, |p| p.with_tone_num_end().replace('ü', "v"))
            })
            .collect()
    }
}

/// Per-character lookup in a char -> toned syllable table (`中 zhong1`).
///
/// Unmapped characters (punctuation, digits, Latin letters) give an empty entry.
#[derive(Clone, Debug, Default)]
pub struct TableRomanizer {
    table: CharTable,
}

impl TableRomanizer {
    /// Romanizer over an already parsed table.
    pub fn new(table: CharTable) -> Self {
        Self { table }
    }

    /// Load the table at `path`; a missing file gives an empty table.
    pub fn load(path: impl AsRef<Path>) -> Self {
        Self::new(CharTable::load(path))
    }

    /// Number of mapped characters.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// True when no character is mapped.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Romanizer for TableRomanizer {
    fn romanize(&self, text: &str) -> Vec<String> {
        text.chars()
            .map(|ch| self.table.get(ch).map(str::to_string).unwrap_or_default())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone_syllables() -> ToneSyllables {
        ToneSyllables::new().unwrap()
    }

    #[test]
    fn splits_spaced_and_glued_syllables() {
        let r = tone_syllables();
        assert_eq!(r.romanize("zhong1 guo2"), vec!["zhong1", "guo2"]);
        assert_eq!(r.romanize("ni3hao3"), vec!["ni3", "hao3"]);
    }

    #[test]
    fn punctuation_becomes_empty_entries() {
        let r = tone_syllables();
        assert_eq!(r.romanize("ni3, hao3!"), vec!["ni3", "", "hao3", ""]);
        assert_eq!(r.romanize("   "), Vec::<String>::new());
    }

    #[test]
    fn normalizes_case_and_umlaut() {
        let r = tone_syllables();
        assert_eq!(r.romanize("Lü4"), vec!["lv4"]);
    }

    #[test]
    fn out_of_range_digit_stays_on_its_syllable() {
        let r = tone_syllables();
        assert_eq!(r.romanize("ma0"), vec!["ma0"]);
        assert_eq!(r.romanize("ma7 ni3"), vec!["ma7", "ni3"]);
    }

    #[test]
    fn pinyin_romanizer_reads_common_characters() {
        let r = PinyinRomanizer::new();
        assert_eq!(r.romanize("中国"), vec!["zhong1", "guo2"]);
        let entries = r.romanize("糖尿病!");
        assert_eq!(entries.len(), 4);
        assert!(entries[..3].iter().all(|e| !e.is_empty()));
        assert_eq!(entries[3], "");
    }

    #[test]
    fn table_romanizer_maps_per_character() {
        let r = TableRomanizer::new(CharTable::parse("中 zhong1\n国 guo2\n"));
        assert_eq!(r.romanize("中国!"), vec!["zhong1", "guo2", ""]);
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn closures_are_romanizers() {
        let r = |text: &str| text.split('-').map(str::to_string).collect::<Vec<_>>();
        assert_eq!(r.romanize("ma1-ma5"), vec!["ma1", "ma5"]);
    }
}
