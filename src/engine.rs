//! Extraction Pipeline
//!
//! Runs the stages in order for one invocation: load the source, parse it
//! with the selected grammar, encode the tree. Each stage blocks until it
//! completes and the first failure ends the run.

use std::io::Write;
use std::num::NonZeroUsize;
use std::time::Instant;

use tracing::{debug, info};

use crate::encode::{self, EncodeOptions, Strategy};
use crate::errors::Result;
use crate::grammar::{GrammarBundle, HclGrammar, JavaGrammar, JsonGrammar, Language};
use crate::source::SourceInput;
use crate::syntax::{self, ParseLimits};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Everything that tunes a run; the CLI fills it from flags and environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub strategy: Strategy,
    pub pretty: bool,
    /// Reject inputs larger than this many bytes.
    pub max_input_bytes: Option<u64>,
    /// Abandon parses that invoke more grammar rules than this.
    pub call_limit: Option<NonZeroUsize>,
}

impl ExtractOptions {
    fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            strategy: self.strategy,
            pretty: self.pretty,
        }
    }

    fn parse_limits(&self) -> ParseLimits {
        ParseLimits {
            call_limit: self.call_limit,
        }
    }
}

/// Counts reported after a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSummary {
    pub language: Language,
    pub input_bytes: usize,
    pub nodes: usize,
    pub tokens: usize,
}

// ============================================================================
// PIPELINE
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ExtractionPipeline {
    pub options: ExtractOptions,
}

impl ExtractionPipeline {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Load `input`, then parse and encode it into `sink`.
    pub fn run<W: Write>(
        &self,
        language: Language,
        input: &SourceInput,
        sink: W,
    ) -> Result<ExtractSummary> {
        let started = Instant::now();
        let source = input.load(self.options.max_input_bytes)?;
        info!(origin = %input, bytes = source.len(), "source loaded");

        let summary = self.extract(language, &source, &input.origin(), sink)?;
        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "run finished");
        Ok(summary)
    }

    /// Parse and encode text that is already in memory.
    pub fn extract<W: Write>(
        &self,
        language: Language,
        source: &str,
        origin: &str,
        sink: W,
    ) -> Result<ExtractSummary> {
        match language {
            Language::Java => self.extract_with::<JavaGrammar, W>(source, origin, sink),
            Language::Json => self.extract_with::<JsonGrammar, W>(source, origin, sink),
            Language::Hcl => self.extract_with::<HclGrammar, W>(source, origin, sink),
        }
    }

    /// Convenience for callers that want the document as a `String`.
    pub fn extract_to_string(&self, language: Language, source: &str) -> Result<String> {
        let mut buffer = Vec::new();
        self.extract(language, source, "<memory>", &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    fn extract_with<G: GrammarBundle, W: Write>(
        &self,
        source: &str,
        origin: &str,
        sink: W,
    ) -> Result<ExtractSummary> {
        let tree = syntax::parse::<G>(source, origin, &self.options.parse_limits())?;
        let language = G::LANGUAGE;
        let tokens = tree.tokens().count();
        info!(
            %language,
            nodes = tree.len(),
            tokens,
            height = tree.height(),
            "parse finished"
        );

        let options = self.options.encode_options();
        encode::encode(&tree, &G::vocabulary(), &options, sink)?;
        info!(strategy = ?options.strategy, pretty = options.pretty, "encoding finished");

        Ok(ExtractSummary {
            language,
            input_bytes: source.len(),
            nodes: tree.len(),
            tokens,
        })
    }
}
