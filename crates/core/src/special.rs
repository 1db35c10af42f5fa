//! Reserved symbols shared by both schemes.
//!
//! Layout of every vocabulary:
//!   0 = PAD, 1 = UNK, 2 = CLS, 3 = SEP, 4.. = scheme symbols
//!
//! The spellings live in a [`SpecialTokens`] value handed to each tokenizer at
//! construction; the ids are fixed by position.

use serde::{Deserialize, Serialize};

/// Token id type used across the workspace.
pub type TokenId = u32;

const PAD_ID: TokenId = 0;
const UNK_ID: TokenId = 1;
const CLS_ID: TokenId = 2;
const SEP_ID: TokenId = 3;

/// Number of ids reserved at the front of every vocabulary.
pub const RESERVED_IDS: usize = 4;

/// Spellings of the four reserved symbols.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecialTokens {
    /// padding filler, id 0
    pub pad: String,
    /// fallback for unrecognized units, id 1
    pub unk: String,
    /// start boundary, id 2
    pub cls: String,
    /// end boundary, id 3
    pub sep: String,
}

impl Default for SpecialTokens {
    fn default() -> Self {
        Self {
            pad: "[PAD]".to_string(),
            unk: "[UNK]".to_string(),
            cls: "[CLS]".to_string(),
            sep: "[SEP]".to_string(),
        }
    }
}

impl SpecialTokens {
    /// Spellings in id order (PAD, UNK, CLS, SEP).
    pub fn symbols(&self) -> [&str; RESERVED_IDS] {
        [&self.pad, &self.unk, &self.cls, &self.sep]
    }

    /// Id of the padding symbol.
    pub fn pad_id(&self) -> TokenId {
        PAD_ID
    }

    /// Id of the fallback symbol.
    pub fn unk_id(&self) -> TokenId {
        UNK_ID
    }

    /// Id of the start boundary.
    pub fn cls_id(&self) -> TokenId {
        CLS_ID
    }

    /// Id of the end boundary.
    pub fn sep_id(&self) -> TokenId {
        SEP_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_follow_reserved_ids() {
        let specials = SpecialTokens::default();
        let symbols = specials.symbols();
        assert_eq!(symbols, ["[PAD]", "[UNK]", "[CLS]", "[SEP]"]);
        assert_eq!(specials.pad_id(), 0);
        assert_eq!(specials.unk_id(), 1);
        assert_eq!(specials.cls_id(), 2);
        assert_eq!(specials.sep_id(), 3);
    }
}
