//! cstjson Parse Stage
//!
//! Runs a grammar bundle over a source buffer and converts the resulting pest
//! pairs into a [`Tree`]. The parser is fail-fast: the first mismatch aborts
//! the parse and no partial tree is ever returned.

use std::num::NonZeroUsize;

use miette::NamedSource;
use pest::error::{Error, ErrorVariant, InputLocation, LineColLocation};
use pest::iterators::Pairs;
use pest::RuleType;

use super::tree::{Node, NodeId, Production, Token, Tree, TreeBuilder};
use crate::errors::{ExtractError, Result, Stage};
use crate::grammar::{GrammarBundle, Language, Vocabulary};

// ============================================================================
// PUBLIC API
// ============================================================================

/// Bounds applied to a single parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseLimits {
    /// Maximum number of rule invocations before the parse is abandoned.
    pub call_limit: Option<NonZeroUsize>,
}

/// Parse `source` with grammar `G` from its start rule.
///
/// `origin` names the input in diagnostics (`<stdin>` or a file path).
pub fn parse<'src, G: GrammarBundle>(
    source: &'src str,
    origin: &str,
    limits: &ParseLimits,
) -> Result<Tree<'src, G::Rule>> {
    // pest keeps the limit in process-wide state; set it on every parse so a
    // previous invocation's limit never leaks into this one.
    pest::set_call_limit(limits.call_limit);

    let pairs = G::parse_start(source)
        .map_err(|error| convert_parse_error(error, G::LANGUAGE, source, origin))?;

    build_tree(pairs, source, &G::vocabulary())?.ok_or_else(|| {
        syntax_error(G::LANGUAGE, source, origin, 0, (1, 1), None)
    })
}

// ============================================================================
// TREE CONSTRUCTION
// ============================================================================

/// Walks the pairs depth-first with an explicit stack of child iterators.
fn build_tree<'src, R: RuleType>(
    pairs: Pairs<'src, R>,
    source: &'src str,
    vocabulary: &Vocabulary<R>,
) -> Result<Option<Tree<'src, R>>> {
    let mut builder = TreeBuilder::new();
    let mut cursor = LineCursor::new(source);
    let mut stack: Vec<(Option<NodeId>, Pairs<'src, R>)> = vec![(None, pairs)];

    while let Some((parent, children)) = stack.last_mut() {
        let parent = *parent;
        let Some(pair) = children.next() else {
            stack.pop();
            continue;
        };

        let rule = pair.as_rule();
        let node = if vocabulary.is_terminal(rule) {
            let (line, column) = cursor.advance_to(pair.as_span().start());
            Node::Token(Token {
                kind: rule,
                text: pair.as_str(),
                line,
                column,
            })
        } else {
            Node::Production(Production {
                rule,
                children: Vec::new(),
            })
        };
        let is_production = matches!(node, Node::Production(_));

        let id = builder
            .push(parent, node)
            .map_err(|e| ExtractError::resource_exhausted(Stage::Parsing, e))?;

        if is_production {
            stack
                .try_reserve(1)
                .map_err(|e| ExtractError::resource_exhausted(Stage::Parsing, e))?;
            stack.push((Some(id), pair.into_inner()));
        }
    }

    Ok(builder.finish())
}

/// Converts byte offsets into (line, column) pairs.
///
/// Token offsets arrive in document order, so the cursor only ever moves
/// forward and the whole source is scanned once.
struct LineCursor<'src> {
    source: &'src str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'src> LineCursor<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 0,
        }
    }

    fn advance_to(&mut self, offset: usize) -> (usize, usize) {
        if offset > self.offset {
            for c in self.source[self.offset..offset].chars() {
                if c == '\n' {
                    self.line += 1;
                    self.column = 0;
                } else {
                    self.column += 1;
                }
            }
            self.offset = offset;
        }
        (self.line, self.column)
    }
}

// ============================================================================
// ERROR CONVERSION
// ============================================================================

fn convert_parse_error<R: RuleType>(
    error: Error<R>,
    language: Language,
    source: &str,
    origin: &str,
) -> ExtractError {
    let expected = match &error.variant {
        // None of the grammars raise custom errors; pest uses them only for
        // its call and stack limits.
        ErrorVariant::CustomError { message } => {
            return ExtractError::resource_exhausted(Stage::Parsing, message);
        }
        ErrorVariant::ParsingError { positives, .. } if !positives.is_empty() => Some(format!(
            "expected one of: {}",
            positives
                .iter()
                .map(|rule| format!("{:?}", rule))
                .collect::<Vec<_>>()
                .join(", ")
        )),
        ErrorVariant::ParsingError { .. } => None,
    };

    let offset = match error.location {
        InputLocation::Pos(pos) => pos,
        InputLocation::Span((start, _)) => start,
    };
    let line_col = match error.line_col {
        LineColLocation::Pos(pos) => pos,
        LineColLocation::Span(start, _) => start,
    };

    syntax_error(language, source, origin, offset, line_col, expected)
}

fn syntax_error(
    language: Language,
    source: &str,
    origin: &str,
    offset: usize,
    (line, column): (usize, usize),
    expected: Option<String>,
) -> ExtractError {
    ExtractError::Syntax {
        language,
        line,
        column,
        source_code: NamedSource::new(origin, source.to_string()),
        span: (offset, 0).into(),
        expected,
    }
}
