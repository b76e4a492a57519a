//! cstjson Error Handling
//!
//! Every failure in the pipeline is an [`ExtractError`]. Each variant belongs
//! to exactly one [`ErrorClass`], and the class decides the process exit code.
//! All classes are terminal for the invocation: nothing here is retried.

use std::fmt;
use std::io;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::grammar::Language;

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

/// Coarse error taxonomy reported to callers through the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Malformed or missing CLI arguments, unsupported language name.
    Usage,
    /// Source cannot be read or decoded, or the document cannot be written.
    Io,
    /// Input text does not match the selected grammar.
    Syntax,
    /// Input too large or too complex to parse or encode.
    ResourceExhausted,
}

impl ErrorClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorClass::Usage => "Usage",
            ErrorClass::Io => "Io",
            ErrorClass::Syntax => "Syntax",
            ErrorClass::ResourceExhausted => "ResourceExhausted",
        }
    }

    /// Process exit status for this class.
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorClass::Usage => 1,
            ErrorClass::Io => 1,
            ErrorClass::Syntax => 1,
            ErrorClass::ResourceExhausted => 1,
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pipeline stage in which a resource limit was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Loading,
    Parsing,
    Encoding,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Loading => "loading",
            Stage::Parsing => "parsing",
            Stage::Encoding => "encoding",
        };
        write!(f, "{}", name)
    }
}

// ============================================================================
// THE ERROR TYPE
// ============================================================================

#[derive(Debug, Error, Diagnostic)]
pub enum ExtractError {
    #[error("Invalid arguments")]
    #[diagnostic(code(cstjson::usage))]
    InvalidArguments {
        #[help]
        detail: Option<String>,
    },

    #[error("Invalid parser selected: {name}")]
    #[diagnostic(
        code(cstjson::usage),
        help("run `cstjson --list-languages` to see the registered grammars")
    )]
    UnsupportedLanguage { name: String },

    #[error("Could not read {origin}: {error}")]
    #[diagnostic(code(cstjson::io))]
    Io {
        origin: String,
        #[source]
        error: io::Error,
    },

    #[error("Could not decode {origin}: input is not valid UTF-8")]
    #[diagnostic(code(cstjson::io))]
    Undecodable {
        origin: String,
        #[source]
        error: std::str::Utf8Error,
    },

    #[error("Could not write the encoded document: {0}")]
    #[diagnostic(code(cstjson::io))]
    Output(#[source] io::Error),

    #[error("Input does not match the {language} grammar at line {line}, column {column}")]
    #[diagnostic(code(cstjson::syntax))]
    Syntax {
        language: Language,
        line: usize,
        column: usize,
        #[source_code]
        source_code: NamedSource<String>,
        #[label("parsing stopped here")]
        span: SourceSpan,
        #[help]
        expected: Option<String>,
    },

    #[error("Resource exhausted while {stage}: {reason}")]
    #[diagnostic(
        code(cstjson::resource),
        help("the input is too large or too deeply nested for the configured limits")
    )]
    ResourceExhausted { stage: Stage, reason: String },
}

impl ExtractError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidArguments { .. } | Self::UnsupportedLanguage { .. } => ErrorClass::Usage,
            Self::Io { .. } | Self::Undecodable { .. } | Self::Output(_) => ErrorClass::Io,
            Self::Syntax { .. } => ErrorClass::Syntax,
            Self::ResourceExhausted { .. } => ErrorClass::ResourceExhausted,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.class().exit_code()
    }

    pub fn invalid_arguments(detail: impl Into<String>) -> Self {
        Self::InvalidArguments {
            detail: Some(detail.into()),
        }
    }

    pub fn resource_exhausted(stage: Stage, reason: impl fmt::Display) -> Self {
        Self::ResourceExhausted {
            stage,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = ExtractError> = std::result::Result<T, E>;
