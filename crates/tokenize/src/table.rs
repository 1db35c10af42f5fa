#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

/// Immutable key -> string table loaded from a plain-text file.
///
/// One entry per line, whitespace separated: `一    H`. Blank lines and lines
/// starting with `#` are ignored, as are lines with fewer than two fields.
/// Extra fields are ignored and a repeated key keeps its last entry.
///
/// Keys longer than one character are kept: their values still count towards
/// [`CharTable::value_chars`], but per-character lookup never reaches them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharTable {
    entries: HashMap<String, String>,
}

impl CharTable {
    /// Load a table from `path`. An unreadable file is logged and yields an empty table.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let table = Self::parse(&content);
                debug!(path = %path.display(), entries = table.len(), "loaded character table");
                table
            }
            Err(error) => {
                warn!(
                    path = %path.display(),
                    %error,
                    "character table not readable, continuing with an empty table"
                );
                Self::default()
            }
        }
    }

    /// Parse table text.
    pub fn parse(content: &str) -> Self {
        let mut entries = HashMap::new();
        let mut skipped = 0usize;
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (Some(key), Some(value)) = (fields.next(), fields.next()) else {
                debug!(line = index + 1, "skipping table line with fewer than 2 fields");
                skipped += 1;
                continue;
            };
            entries.insert(key.to_string(), value.to_string());
        }
        if skipped > 0 {
            warn!(skipped, "skipped malformed character table lines");
        }
        Self { entries }
    }

    /// Value mapped to `ch`.
    pub fn get(&self, ch: char) -> Option<&str> {
        let mut buf = [0u8; 4];
        self.entries.get(&*ch.encode_utf8(&mut buf)).map(String::as_str)
    }

    /// Number of entries, multi-character keys included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every character of every value, unordered and with repeats.
    pub fn value_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.values().flat_map(|v| v.chars())
    }
}
