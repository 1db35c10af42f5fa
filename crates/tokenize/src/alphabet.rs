#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Initials of the standard alphabet, in vocabulary order.
pub const INITIALS: &[&str] = &[
    "b", "p", "m", "f", "d", "t", "n", "l", "g", "k", "h", "j", "q", "x", "zh", "ch", "sh", "r", "z", "c", "s", "y",
    "w",
];

/// Finals of the standard alphabet, in vocabulary order. `v` spells ü.
pub const FINALS: &[&str] = &[
    "a", "o", "e", "i", "u", "v", "ai", "ei", "ui", "ao", "ou", "iu", "ie", "ve", "an", "en", "in", "un", "vn", "ang",
    "eng", "ing", "ong",
];

/// Tone digits; 5 is the neutral tone.
pub const TONES: &[&str] = &["1", "2", "3", "4", "5"];

/// Tone assigned to syllables without a trailing digit.
pub const NEUTRAL_TONE: &str = "5";

/// Initials, finals and tones the phonetic scheme knows about.
///
/// Fixed at construction and independent of any input text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneticAlphabet {
    /// onset clusters, tried longest-first during splitting
    pub initials: Vec<String>,
    /// vowel nucleus + coda
    pub finals: Vec<String>,
    /// tone markers
    pub tones: Vec<String>,
}

impl Default for PhoneticAlphabet {
    fn default() -> Self {
        Self::standard()
    }
}

impl PhoneticAlphabet {
    /// The built-in 23 initials, 23 finals and 5 tones.
    pub fn standard() -> Self {
        Self::new(INITIALS.iter().copied(), FINALS.iter().copied(), TONES.iter().copied())
    }

    /// Alphabet from explicit symbol lists.
    pub fn new<I, F, T, S>(initials: I, finals: F, tones: T) -> Self
    where
        I: IntoIterator<Item = S>,
        F: IntoIterator<Item = S>,
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            initials: initials.into_iter().map(Into::into).collect(),
            finals: finals.into_iter().map(Into::into).collect(),
            tones: tones.into_iter().map(Into::into).collect(),
        }
    }

    /// Same alphabet keeping only the initials accepted by `keep`.
    pub fn retain_initials(mut self, keep: impl Fn(&str) -> bool) -> Self {
        self.initials.retain(|s| keep(s));
        self
    }

    /// Symbols in vocabulary order: initials, finals, tones.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.initials
            .iter()
            .chain(&self.finals)
            .chain(&self.tones)
            .map(String::as_str)
    }

    /// Length in chars of the longest initial.
    pub fn max_initial_chars(&self) -> usize {
        self.initials.iter().map(|s| s.chars().count()).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_sizes() {
        let alphabet = PhoneticAlphabet::standard();
        assert_eq!(alphabet.initials.len(), 23);
        assert_eq!(alphabet.finals.len(), 23);
        assert_eq!(alphabet.tones.len(), 5);
        assert_eq!(alphabet.symbols().count(), 51);
        assert_eq!(alphabet.max_initial_chars(), 2);
    }

    #[test]
    fn initials_and_finals_are_disjoint() {
        let alphabet = PhoneticAlphabet::standard();
        assert!(alphabet.initials.iter().all(|i| !alphabet.finals.contains(i)));
    }

    #[test]
    fn retain_initials_drops_single_letters() {
        let alphabet = PhoneticAlphabet::standard().retain_initials(|s| s.chars().count() > 1);
        assert_eq!(alphabet.initials, vec!["zh", "ch", "sh"]);
    }
}
