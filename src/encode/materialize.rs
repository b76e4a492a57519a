//! Materialize-then-serialize strategy.
//!
//! Builds a `serde_json::Value` isomorphic to the tree. Nodes are visited in
//! reverse arena order, which guarantees every child value is finished before
//! its parent asks for it, so the build needs no recursion.

use pest::RuleType;
use serde_json::{Map, Value};

use super::{COLUMN_KEY, LINE_KEY, TEXT_KEY, TYPE_KEY};
use crate::errors::{ExtractError, Result, Stage};
use crate::grammar::Vocabulary;
use crate::syntax::{Node, Token, Tree};

/// Build the complete document for `tree`.
pub fn build<R: RuleType>(tree: &Tree<'_, R>, vocabulary: &Vocabulary<R>) -> Result<Value> {
    let mut slots: Vec<Option<Value>> = Vec::new();
    slots
        .try_reserve_exact(tree.len())
        .map_err(|e| ExtractError::resource_exhausted(Stage::Encoding, e))?;
    slots.resize_with(tree.len(), || None);

    for (id, node) in tree.iter().rev() {
        let value = match node {
            Node::Token(token) => token_value(token, vocabulary),
            Node::Production(production) => {
                let mut items = Vec::new();
                items
                    .try_reserve_exact(production.children.len())
                    .map_err(|e| ExtractError::resource_exhausted(Stage::Encoding, e))?;
                // A child is always pushed after its parent, so its slot is
                // already filled when the reverse walk reaches the parent.
                for child in &production.children {
                    let value = slots[child.index()].take();
                    debug_assert!(value.is_some(), "child {} built after its parent", child);
                    items.push(value.unwrap_or(Value::Null));
                }
                let mut object = Map::new();
                object.insert(vocabulary.rule_name(production.rule), Value::Array(items));
                Value::Object(object)
            }
        };
        slots[id.index()] = Some(value);
    }

    // The root is node 0 and is visited last.
    let root = slots.get_mut(tree.root().index()).and_then(Option::take);
    debug_assert!(root.is_some(), "root value missing");
    Ok(root.unwrap_or(Value::Null))
}

fn token_value<R: RuleType>(token: &Token<'_, R>, vocabulary: &Vocabulary<R>) -> Value {
    let mut object = Map::new();
    object.insert(COLUMN_KEY.to_string(), Value::from(token.column));
    object.insert(LINE_KEY.to_string(), Value::from(token.line));
    object.insert(TEXT_KEY.to_string(), Value::from(token.text));
    object.insert(TYPE_KEY.to_string(), Value::from(vocabulary.symbolic_name(token.kind)));
    Value::Object(object)
}
