//! Handles all user-facing output for the CLI.
//!
//! Standard output only ever carries a JSON document. Everything meant for a
//! human (errors, reports) goes to standard error.

use std::io::{self, IsTerminal, Write};

use miette::Report;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::errors::{ExtractError, Result};
use crate::grammar::REGISTRY;

/// Writes the registry table as a JSON array.
pub fn print_languages<W: Write>(mut out: W) -> Result<()> {
    serde_json::to_writer(&mut out, &REGISTRY[..]).map_err(|e| ExtractError::Output(e.into()))?;
    out.flush().map_err(ExtractError::Output)
}

/// Reports a failed run on standard error.
///
/// The default is a single `error: <message>` line; `explain` switches to the
/// full diagnostic report with help text and, for syntax errors, a source
/// excerpt.
pub fn report_error(error: ExtractError, explain: bool) {
    if explain {
        eprintln!("{:?}", Report::new(error));
        return;
    }

    let choice = if io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(choice);
    // Nothing useful can be done if standard error itself is gone.
    let _ = write_error_line(&mut stderr, &error);
}

fn write_error_line<W: WriteColor>(out: &mut W, error: &ExtractError) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(out, "error")?;
    out.reset()?;
    writeln!(out, ": {}", error)
}
