//! Shared encode pipeline: wrap -> truncate -> pad -> mask.
//!
//! Every scheme hands its decomposed ids to [`Encoder::run`]; the padding
//! target is always chosen by the caller through [`EncodeOptions::pad_to`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TokenizeError};
use crate::special::{SpecialTokens, TokenId};

/// Length every row is padded to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadTo {
    /// pad each row to the effective max length
    MaxLength,
    /// pad each row to the longest row of the same batch
    LongestInBatch,
    /// leave rows at their own length
    None,
}

impl FromStr for PadTo {
    type Err = TokenizeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "max_length" => Ok(PadTo::MaxLength),
            "longest_in_batch" | "longest" => Ok(PadTo::LongestInBatch),
            "none" => Ok(PadTo::None),
            other => Err(TokenizeError::UnknownOption(format!("padding {other:?}"))),
        }
    }
}

/// Shape of the returned encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnFormat {
    /// one `Vec` per row, rows may differ in length
    Raw,
    /// dense row-major `[rows, cols]` matrix
    Array,
}

impl FromStr for ReturnFormat {
    type Err = TokenizeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "raw" => Ok(ReturnFormat::Raw),
            "array" => Ok(ReturnFormat::Array),
            other => Err(TokenizeError::UnknownOption(format!("return format {other:?}"))),
        }
    }
}

/// Per-call options. There is no `Default`: the padding target must be named.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeOptions {
    /// overrides the tokenizer's configured max length
    pub max_length: Option<usize>,
    /// padding target
    pub pad_to: PadTo,
    /// cut rows longer than the max length
    pub truncation: bool,
    /// raw rows or a dense array
    pub return_format: ReturnFormat,
}

impl EncodeOptions {
    /// Options with the given padding target, truncation on, raw output.
    pub fn new(pad_to: PadTo) -> Self {
        Self {
            max_length: None,
            pad_to,
            truncation: true,
            return_format: ReturnFormat::Raw,
        }
    }

    /// Pad every row to the max length.
    pub fn pad_to_max_length() -> Self {
        Self::new(PadTo::MaxLength)
    }

    /// Pad every row to the longest row in its batch.
    pub fn pad_to_longest() -> Self {
        Self::new(PadTo::LongestInBatch)
    }

    /// Override the max length for this call.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Enable or disable truncation.
    pub fn with_truncation(mut self, truncation: bool) -> Self {
        self.truncation = truncation;
        self
    }

    /// Select the output shape.
    pub fn with_return_format(mut self, return_format: ReturnFormat) -> Self {
        self.return_format = return_format;
        self
    }
}

/// Decomposed ids wrapped in CLS ... SEP, before truncation and padding.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TokenSequence {
    /// wrapped ids
    pub ids: Vec<TokenId>,
}

impl TokenSequence {
    /// Number of ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when there are no ids (never the case for a wrapped sequence).
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// One encoded row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedSequence {
    /// ids, padded
    pub input_ids: Vec<TokenId>,
    /// 1 for real tokens (CLS/SEP included), 0 for padding
    pub attention_mask: Vec<u8>,
}

/// Encoded rows, possibly ragged.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct EncodedBatch {
    /// ids per row
    pub input_ids: Vec<Vec<TokenId>>,
    /// mask per row, same shape as `input_ids`
    pub attention_mask: Vec<Vec<u8>>,
}

impl EncodedBatch {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    /// True for a batch without rows.
    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }

    /// Clone out one row.
    pub fn row(&self, index: usize) -> Option<EncodedSequence> {
        Some(EncodedSequence {
            input_ids: self.input_ids.get(index)?.clone(),
            attention_mask: self.attention_mask.get(index)?.clone(),
        })
    }

    fn push(&mut self, row: EncodedSequence) {
        self.input_ids.push(row.input_ids);
        self.attention_mask.push(row.attention_mask);
    }

    /// Pack into a dense matrix; fails when rows differ in length.
    pub fn into_array(self) -> Result<ArrayBatch> {
        let min = self.input_ids.iter().map(Vec::len).min().unwrap_or(0);
        let max = self.input_ids.iter().map(Vec::len).max().unwrap_or(0);
        if min != max {
            return Err(TokenizeError::RaggedBatch { min, max });
        }
        Ok(ArrayBatch {
            shape: [self.input_ids.len(), max],
            input_ids: self.input_ids.into_iter().flatten().map(i64::from).collect(),
            attention_mask: self.attention_mask.into_iter().flatten().map(i64::from).collect(),
        })
    }
}

/// Dense row-major encoding, `i64` like a long tensor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayBatch {
    /// `[rows, cols]`
    pub shape: [usize; 2],
    /// `rows * cols` ids
    pub input_ids: Vec<i64>,
    /// `rows * cols` mask values
    pub attention_mask: Vec<i64>,
}

impl ArrayBatch {
    /// Ids of one row.
    pub fn ids_row(&self, index: usize) -> Option<&[i64]> {
        self.row_span(index).and_then(|span| self.input_ids.get(span))
    }

    /// Mask of one row.
    pub fn mask_row(&self, index: usize) -> Option<&[i64]> {
        self.row_span(index).and_then(|span| self.attention_mask.get(span))
    }

    fn row_span(&self, index: usize) -> Option<std::ops::Range<usize>> {
        let [rows, cols] = self.shape;
        (index < rows).then(|| index * cols..(index + 1) * cols)
    }
}

/// Output of a tokenizer call, in the requested [`ReturnFormat`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Encoded {
    /// rows as vectors
    Raw(EncodedBatch),
    /// dense matrix
    Array(ArrayBatch),
}

/// Stateless pipeline bound to one set of special tokens.
#[derive(Clone, Copy, Debug)]
pub struct Encoder<'a> {
    specials: &'a SpecialTokens,
}

impl<'a> Encoder<'a> {
    /// Pipeline using `specials` for CLS/SEP/PAD.
    pub fn new(specials: &'a SpecialTokens) -> Self {
        Self { specials }
    }

    /// CLS + `ids` + SEP.
    pub fn wrap(&self, ids: &[TokenId]) -> TokenSequence {
        let mut wrapped = Vec::with_capacity(ids.len() + 2);
        wrapped.push(self.specials.cls_id());
        wrapped.extend_from_slice(ids);
        wrapped.push(self.specials.sep_id());
        TokenSequence { ids: wrapped }
    }

    /// Right-pad to `target` and build the mask. Rows already at or past `target` are left alone.
    pub fn pad(&self, mut ids: Vec<TokenId>, target: usize) -> EncodedSequence {
        let real = ids.len();
        let mut attention_mask = vec![1u8; real];
        if target > real {
            ids.resize(target, self.specials.pad_id());
            attention_mask.resize(target, 0);
        }
        EncodedSequence {
            input_ids: ids,
            attention_mask,
        }
    }

    /// Run the pipeline over already decomposed rows.
    ///
    /// Truncation keeps the left prefix, so on overflow the right-most ids go
    /// first: SEP, then the tail of the last decomposition group.
    pub fn run<I>(&self, rows: I, max_length: usize, options: &EncodeOptions) -> EncodedBatch
    where
        I: IntoIterator<Item = Vec<TokenId>>,
    {
        let wrapped: Vec<Vec<TokenId>> = rows
            .into_iter()
            .map(|ids| {
                let mut seq = self.wrap(&ids).ids;
                if options.truncation {
                    seq.truncate(max_length);
                }
                seq
            })
            .collect();

        let longest = wrapped.iter().map(Vec::len).max().unwrap_or(0);
        let mut batch = EncodedBatch::default();
        for seq in wrapped {
            let target = match options.pad_to {
                PadTo::MaxLength => max_length,
                PadTo::LongestInBatch => longest,
                PadTo::None => seq.len(),
            };
            batch.push(self.pad(seq, target));
        }
        batch
    }

    /// Shape a batch as requested by `format`.
    pub fn finish(&self, batch: EncodedBatch, format: ReturnFormat) -> Result<Encoded> {
        match format {
            ReturnFormat::Raw => Ok(Encoded::Raw(batch)),
            ReturnFormat::Array => batch.into_array().map(Encoded::Array),
        }
    }
}
