//! Tree Encoder
//!
//! Converts a [`Tree`] into its canonical JSON document. A token becomes
//! `{"c": column, "l": line, "text": text, "type": symbolic name}`; a
//! production becomes `{"<rule name>": [children...]}`.
//!
//! Two strategies realize the same contract and produce byte-identical
//! output:
//!
//! - [`Strategy::Stream`] writes JSON incrementally while walking the tree,
//!   so memory beyond the tree itself is bounded by the tree height.
//! - [`Strategy::Materialize`] first builds a complete `serde_json::Value`,
//!   then serializes it in one pass.

use std::io::{BufWriter, Write};

use pest::RuleType;
use serde::Serialize;

use crate::errors::{ExtractError, Result};
use crate::grammar::Vocabulary;
use crate::syntax::Tree;

pub mod materialize;
pub mod stream;

/// JSON key of the token column field.
pub const COLUMN_KEY: &str = "c";
/// JSON key of the token line field.
pub const LINE_KEY: &str = "l";
/// JSON key of the token text field.
pub const TEXT_KEY: &str = "text";
/// JSON key of the token type field.
pub const TYPE_KEY: &str = "type";

// ============================================================================
// OPTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Emit JSON during traversal.
    #[default]
    Stream,
    /// Build the whole document in memory, then serialize it.
    Materialize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    pub strategy: Strategy,
    /// Two-space indentation instead of the compact layout.
    pub pretty: bool,
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Encode `tree` into `sink` and flush it.
///
/// Write failures are reported as [`ExtractError::Output`]; allocation
/// failures while materializing as resource exhaustion.
pub fn encode<R, W>(
    tree: &Tree<'_, R>,
    vocabulary: &Vocabulary<R>,
    options: &EncodeOptions,
    sink: W,
) -> Result<()>
where
    R: RuleType,
    W: Write,
{
    let mut out = BufWriter::new(sink);
    match (options.strategy, options.pretty) {
        (Strategy::Stream, false) => {
            stream::write(&mut out, serde_json::ser::CompactFormatter, tree, vocabulary)?
        }
        (Strategy::Stream, true) => stream::write(
            &mut out,
            serde_json::ser::PrettyFormatter::new(),
            tree,
            vocabulary,
        )?,
        (Strategy::Materialize, pretty) => {
            let document = materialize::build(tree, vocabulary)?;
            let written = if pretty {
                serde_json::to_writer_pretty(&mut out, &document)
            } else {
                serde_json::to_writer(&mut out, &document)
            };
            written.map_err(|e| ExtractError::Output(e.into()))?;
        }
    }
    out.flush().map_err(ExtractError::Output)
}

/// Convenience wrapper returning the encoded document as a `String`.
pub fn encode_to_string<R: RuleType>(
    tree: &Tree<'_, R>,
    vocabulary: &Vocabulary<R>,
    options: &EncodeOptions,
) -> Result<String> {
    let mut buffer = Vec::new();
    encode(tree, vocabulary, options, &mut buffer)?;
    // serde_json only ever writes UTF-8.
    String::from_utf8(buffer).map_err(|e| {
        ExtractError::Output(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
