//! Constructor configuration and resource-path resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use subchar_core::Result;

/// Bundled char -> stroke-symbol table.
pub const STROKE_TABLE_FILE: &str = "zh2letter.txt";
/// Bundled char -> toned syllable table.
pub const PINYIN_TABLE_FILE: &str = "zh2pinyin.txt";

/// Directory holding the bundled tables.
pub fn resource_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("resources")
}

/// Settings fixed at tokenizer construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// length rows are truncated/padded to unless a call overrides it
    pub max_length: usize,
    /// table file; `None` means the bundled one in [`resource_dir`]
    #[serde(default)]
    pub table_path: Option<PathBuf>,
}

impl TokenizerConfig {
    /// Default max length of the phonetic scheme.
    pub const PHONETIC_MAX_LENGTH: usize = 128;
    /// Default max length of the graphemic scheme; stroke sequences run longer.
    pub const GRAPHEMIC_MAX_LENGTH: usize = 256;

    /// Phonetic defaults, bundled table.
    pub fn phonetic() -> Self {
        Self {
            max_length: Self::PHONETIC_MAX_LENGTH,
            table_path: None,
        }
    }

    /// Graphemic defaults, bundled table.
    pub fn graphemic() -> Self {
        Self {
            max_length: Self::GRAPHEMIC_MAX_LENGTH,
            table_path: None,
        }
    }

    /// Override the max length.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Point at an explicit table file.
    pub fn with_table_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.table_path = Some(path.into());
        self
    }

    /// Read a JSON config such as `{"max_length": 64, "table_path": "zh2letter.txt"}`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Configured table path, or `default_file` inside [`resource_dir`].
    pub fn table_path_or(&self, default_file: &str) -> PathBuf {
        self.table_path
            .clone()
            .unwrap_or_else(|| resource_dir().join(default_file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_per_scheme() {
        assert_eq!(TokenizerConfig::phonetic().max_length, 128);
        assert_eq!(TokenizerConfig::graphemic().max_length, 256);
    }

    #[test]
    fn missing_path_resolves_into_resources() {
        let path = TokenizerConfig::graphemic().table_path_or(STROKE_TABLE_FILE);
        assert!(path.ends_with("resources/zh2letter.txt"));
        assert!(path.exists());
    }

    #[test]
    fn explicit_path_wins() {
        let cfg = TokenizerConfig::graphemic().with_table_path("/tmp/strokes.txt");
        assert_eq!(cfg.table_path_or(STROKE_TABLE_FILE), PathBuf::from("/tmp/strokes.txt"));
    }

    #[test]
    fn loads_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tok.json");
        std::fs::write(&path, r#"{"max_length": 64}"#).unwrap();
        let cfg = TokenizerConfig::from_json_file(&path).unwrap();
        assert_eq!(cfg, TokenizerConfig::phonetic().with_max_length(64));
    }

    #[test]
    fn bad_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tok.json");
        std::fs::write(&path, "max_length = 64").unwrap();
        assert!(TokenizerConfig::from_json_file(&path).is_err());
    }
}
