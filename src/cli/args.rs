//! Defines the command-line arguments for the cstjson CLI.
//!
//! Every tuning flag also reads an environment variable, so a wrapping
//! orchestration system can configure runs without rewriting command lines.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::encode::Strategy;
use crate::engine::ExtractOptions;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "cstjson",
    version,
    about = "Encode the concrete syntax tree of a source file as JSON."
)]
pub struct CstArgs {
    /// Registered grammar name, matched exactly (e.g. Java, Json, Hcl).
    #[arg(required_unless_present = "list_languages")]
    pub language: Option<String>,

    /// Source file to read. Standard input is drained when absent.
    pub file: Option<PathBuf>,

    /// How the document is produced.
    #[arg(long, value_enum, env = "CSTJSON_STRATEGY", default_value_t = Strategy::Stream)]
    pub strategy: Strategy,

    /// Indent the document with two spaces.
    #[arg(long, env = "CSTJSON_PRETTY")]
    pub pretty: bool,

    /// Reject inputs larger than this many bytes.
    #[arg(long, env = "CSTJSON_MAX_INPUT_BYTES", value_name = "BYTES")]
    pub max_input_bytes: Option<u64>,

    /// Abandon parses that invoke more grammar rules than this.
    #[arg(long, env = "CSTJSON_CALL_LIMIT", value_name = "CALLS")]
    pub call_limit: Option<NonZeroUsize>,

    /// Print a full diagnostic report instead of a one-line error.
    #[arg(long)]
    pub explain: bool,

    /// Log to standard error (repeat for more detail).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print the registered grammars as JSON and exit.
    #[arg(long, conflicts_with = "file")]
    pub list_languages: bool,
}

impl CstArgs {
    pub fn options(&self) -> ExtractOptions {
        ExtractOptions {
            strategy: self.strategy,
            pretty: self.pretty,
            max_input_bytes: self.max_input_bytes,
            call_limit: self.call_limit,
        }
    }
}
