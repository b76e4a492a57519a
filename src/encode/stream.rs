//! Stream-serialize strategy.
//!
//! Drives a `serde_json` [`Formatter`] directly while walking the tree, so no
//! intermediate document exists. The walk keeps one frame per open
//! production; a frame holds the remaining children and whether the next one
//! is the first element of the array.

use std::io::{self, Write};
use std::slice;

use pest::RuleType;
use serde_json::ser::Formatter;

use super::{COLUMN_KEY, LINE_KEY, TEXT_KEY, TYPE_KEY};
use crate::errors::{ExtractError, Result};
use crate::grammar::Vocabulary;
use crate::syntax::{Node, NodeId, Token, Tree};

struct Frame<'t> {
    children: slice::Iter<'t, NodeId>,
    first: bool,
}

/// Write the encoding of `tree` to `out` using `formatter` for layout.
pub fn write<R, W, F>(
    out: &mut W,
    mut formatter: F,
    tree: &Tree<'_, R>,
    vocabulary: &Vocabulary<R>,
) -> Result<()>
where
    R: RuleType,
    W: Write,
    F: Formatter,
{
    walk(out, &mut formatter, tree, vocabulary).map_err(ExtractError::Output)
}

fn walk<R, W, F>(
    out: &mut W,
    f: &mut F,
    tree: &Tree<'_, R>,
    vocabulary: &Vocabulary<R>,
) -> io::Result<()>
where
    R: RuleType,
    W: Write,
    F: Formatter,
{
    let mut stack: Vec<Frame<'_>> = Vec::new();

    if let Some(frame) = open_node(out, f, tree, tree.root(), vocabulary)? {
        stack.push(frame);
    }

    while let Some(frame) = stack.last_mut() {
        match frame.children.next() {
            Some(&child) => {
                f.begin_array_value(out, frame.first)?;
                frame.first = false;
                match open_node(out, f, tree, child, vocabulary)? {
                    Some(child_frame) => stack.push(child_frame),
                    None => f.end_array_value(out)?,
                }
            }
            None => {
                stack.pop();
                close_production(out, f)?;
                if !stack.is_empty() {
                    f.end_array_value(out)?;
                }
            }
        }
    }
    Ok(())
}

/// Writes a token completely, or the opening of a production.
///
/// Returns the frame to push when a production was opened.
fn open_node<'t, R, W, F>(
    out: &mut W,
    f: &mut F,
    tree: &'t Tree<'_, R>,
    id: NodeId,
    vocabulary: &Vocabulary<R>,
) -> io::Result<Option<Frame<'t>>>
where
    R: RuleType,
    W: Write,
    F: Formatter,
{
    match tree.node(id) {
        Node::Token(token) => {
            write_token(out, f, token, vocabulary)?;
            Ok(None)
        }
        Node::Production(production) => {
            f.begin_object(out)?;
            write_key(out, f, &vocabulary.rule_name(production.rule), true)?;
            f.begin_array(out)?;
            Ok(Some(Frame {
                children: production.children.iter(),
                first: true,
            }))
        }
    }
}

fn close_production<W: Write, F: Formatter>(out: &mut W, f: &mut F) -> io::Result<()> {
    f.end_array(out)?;
    f.end_object_value(out)?;
    f.end_object(out)
}

fn write_token<R, W, F>(
    out: &mut W,
    f: &mut F,
    token: &Token<'_, R>,
    vocabulary: &Vocabulary<R>,
) -> io::Result<()>
where
    R: RuleType,
    W: Write,
    F: Formatter,
{
    f.begin_object(out)?;

    write_key(out, f, COLUMN_KEY, true)?;
    f.write_u64(out, token.column as u64)?;
    f.end_object_value(out)?;

    write_key(out, f, LINE_KEY, false)?;
    f.write_u64(out, token.line as u64)?;
    f.end_object_value(out)?;

    write_key(out, f, TEXT_KEY, false)?;
    write_string(out, f, token.text)?;
    f.end_object_value(out)?;

    write_key(out, f, TYPE_KEY, false)?;
    write_string(out, f, &vocabulary.symbolic_name(token.kind))?;
    f.end_object_value(out)?;

    f.end_object(out)
}

/// Writes `"key": ` and leaves the formatter ready for the value.
fn write_key<W: Write, F: Formatter>(out: &mut W, f: &mut F, key: &str, first: bool) -> io::Result<()> {
    f.begin_object_key(out, first)?;
    write_string(out, f, key)?;
    f.end_object_key(out)?;
    f.begin_object_value(out)
}

fn write_string<W: Write, F: Formatter>(out: &mut W, f: &mut F, value: &str) -> io::Result<()> {
    f.begin_string(out)?;
    let mut start = 0;
    for (index, byte) in value.bytes().enumerate() {
        let Some(escape) = escape_for(byte) else {
            continue;
        };
        if start < index {
            f.write_string_fragment(out, &value[start..index])?;
        }
        f.write_char_escape(out, escape)?;
        start = index + 1;
    }
    if start < value.len() {
        f.write_string_fragment(out, &value[start..])?;
    }
    f.end_string(out)
}

/// The escape serde_json applies to `byte`, if any.
fn escape_for(byte: u8) -> Option<serde_json::ser::CharEscape> {
    use serde_json::ser::CharEscape;

    match byte {
        b'"' => Some(CharEscape::Quote),
        b'\\' => Some(CharEscape::ReverseSolidus),
        b'\x08' => Some(CharEscape::Backspace),
        b'\x0C' => Some(CharEscape::FormFeed),
        b'\n' => Some(CharEscape::LineFeed),
        b'\r' => Some(CharEscape::CarriageReturn),
        b'\t' => Some(CharEscape::Tab),
        0x00..=0x1F => Some(CharEscape::AsciiControl(byte)),
        _ => None,
    }
}
