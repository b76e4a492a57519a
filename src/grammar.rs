//! Grammar Registry
//!
//! A static, read-only table mapping a language name to the grammar bundle
//! that parses it. Lookups are exact and case-sensitive; an unknown name is a
//! hard error, never a fallback to a default grammar.
//!
//! Adding a language means adding one [`Language`] variant, one
//! [`GrammarEntry`] in [`REGISTRY`], and one [`GrammarBundle`] implementation
//! under `grammar/`.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use once_cell::sync::Lazy;
use pest::iterators::Pairs;
use pest::RuleType;
use serde::Serialize;

use crate::errors::ExtractError;

pub mod hcl;
pub mod java;
pub mod json;

pub use hcl::HclGrammar;
pub use java::JavaGrammar;
pub use json::JsonGrammar;

// ============================================================================
// LANGUAGE IDENTIFIERS
// ============================================================================

/// Closed set of registered source languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    Java,
    Json,
    Hcl,
}

impl Language {
    pub fn name(&self) -> &'static str {
        match self {
            Language::Java => "Java",
            Language::Json => "Json",
            Language::Hcl => "Hcl",
        }
    }

    /// Registry metadata for this language.
    pub fn entry(&self) -> &'static GrammarEntry {
        match self {
            Language::Java => &REGISTRY[0],
            Language::Json => &REGISTRY[1],
            Language::Hcl => &REGISTRY[2],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Language {
    type Err = ExtractError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        resolve(name)
    }
}

// ============================================================================
// REGISTRY TABLE
// ============================================================================

/// Descriptive metadata for one registered grammar.
#[derive(Debug, Serialize)]
pub struct GrammarEntry {
    pub language: Language,
    pub name: &'static str,
    pub start_rule: &'static str,
    pub extensions: &'static [&'static str],
    /// Whitespace and comments are emitted as tokens, so concatenating token
    /// texts reproduces the source exactly.
    pub retains_trivia: bool,
}

pub static REGISTRY: [GrammarEntry; 3] = [
    GrammarEntry {
        language: Language::Java,
        name: "Java",
        start_rule: "compilationUnit",
        extensions: &["java"],
        retains_trivia: true,
    },
    GrammarEntry {
        language: Language::Json,
        name: "Json",
        start_rule: "document",
        extensions: &["json"],
        retains_trivia: true,
    },
    GrammarEntry {
        language: Language::Hcl,
        name: "Hcl",
        start_rule: "configFile",
        extensions: &["tf", "hcl"],
        retains_trivia: true,
    },
];

static BY_NAME: Lazy<HashMap<&'static str, Language>> = Lazy::new(|| {
    REGISTRY
        .iter()
        .map(|entry| (entry.name, entry.language))
        .collect()
});

/// Looks up a language by its exact registry name.
pub fn resolve(name: &str) -> Result<Language, ExtractError> {
    BY_NAME
        .get(name)
        .copied()
        .ok_or_else(|| ExtractError::UnsupportedLanguage {
            name: name.to_string(),
        })
}

// ============================================================================
// GRAMMAR BUNDLES
// ============================================================================

/// The parsing machinery for one language.
///
/// pest grammars are scannerless, so the lexer and the parser of a bundle are
/// a single generated type; `parse_start` runs it from the start rule.
pub trait GrammarBundle {
    type Rule: RuleType;

    const LANGUAGE: Language;

    fn parse_start(source: &str) -> Result<Pairs<'_, Self::Rule>, pest::error::Error<Self::Rule>>;

    fn vocabulary() -> Vocabulary<Self::Rule> {
        Vocabulary::new()
    }
}

// ============================================================================
// VOCABULARY
// ============================================================================

/// Read-only lookup from a grammar's rule type to its symbolic name.
///
/// Names come from the generated `Rule` enum. Terminal rules are spelled with
/// a leading uppercase letter; productions with a leading lowercase letter.
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary<R> {
    _rules: PhantomData<fn() -> R>,
}

impl<R: RuleType> Vocabulary<R> {
    pub fn new() -> Self {
        Self {
            _rules: PhantomData,
        }
    }

    /// Symbolic name of a token type.
    pub fn symbolic_name(&self, rule: R) -> String {
        format!("{:?}", rule)
    }

    /// JSON key for a production, with any generated suffix removed.
    pub fn rule_name(&self, rule: R) -> String {
        let name = self.symbolic_name(rule);
        match strip_generated_suffix(&name) {
            stripped if stripped.len() == name.len() => name,
            stripped => stripped.to_string(),
        }
    }

    pub fn is_terminal(&self, rule: R) -> bool {
        self.symbolic_name(rule)
            .starts_with(|c: char| c.is_ascii_uppercase())
    }
}

impl<R: RuleType> Default for Vocabulary<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Production names generated by some grammar toolchains end in `Context`.
pub fn strip_generated_suffix(name: &str) -> &str {
    match name.strip_suffix("Context") {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => name,
    }
}
