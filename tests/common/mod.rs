//! Shared helpers for walking encoded documents in integration tests.

#![allow(dead_code)]

use serde_json::Value;

/// One decoded token object.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedToken {
    pub column: u64,
    pub line: u64,
    pub text: String,
    pub kind: String,
}

/// Walks `document` in pre-order, checking the shape of every object.
///
/// Returns the tokens in document order, or a description of the first
/// object that is neither a token nor a production.
pub fn tokens(document: &Value) -> Result<Vec<EncodedToken>, String> {
    let mut found = Vec::new();
    let mut stack = vec![document];

    while let Some(value) = stack.pop() {
        let object = value
            .as_object()
            .ok_or_else(|| format!("expected an object, found {}", value))?;

        if object.len() == 1 {
            let (rule, children) = object.iter().next().ok_or("empty object")?;
            let children = children
                .as_array()
                .ok_or_else(|| format!("production {} does not hold an array", rule))?;
            stack.extend(children.iter().rev());
            continue;
        }

        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        if keys != ["c", "l", "text", "type"] {
            return Err(format!("mixed or unknown object shape: {:?}", keys));
        }
        found.push(EncodedToken {
            column: object["c"].as_u64().ok_or("c is not a number")?,
            line: object["l"].as_u64().ok_or("l is not a number")?,
            text: object["text"].as_str().ok_or("text is not a string")?.to_string(),
            kind: object["type"].as_str().ok_or("type is not a string")?.to_string(),
        });
    }

    Ok(found)
}

/// Concatenated token texts.
pub fn reassemble(tokens: &[EncodedToken]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

/// Lines never decrease; on one line, columns never decrease.
pub fn positions_are_monotone(tokens: &[EncodedToken]) -> bool {
    tokens.windows(2).all(|pair| {
        let (a, b) = (&pair[0], &pair[1]);
        a.line < b.line || (a.line == b.line && a.column <= b.column)
    })
}

pub fn fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}

pub fn fixture_path(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}
