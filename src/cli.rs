//! The cstjson Command-Line Interface.
//!
//! `cstjson <LANGUAGE> [FILE]` encodes one source text and exits. Every
//! failure maps to exit status 1 with nothing written to standard output.

use std::io;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::debug;

use crate::cli::args::CstArgs;
use crate::engine::ExtractionPipeline;
use crate::errors::{ExtractError, Result};
use crate::grammar;
use crate::source::SourceInput;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() -> ExitCode {
    let args = match CstArgs::try_parse() {
        Ok(args) => args,
        Err(error) => return argument_failure(error),
    };

    crate::init_tracing(args.verbose);

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let code = error.exit_code();
            debug!(class = %error.class(), "run failed");
            output::report_error(error, args.explain);
            ExitCode::from(code)
        }
    }
}

fn execute(args: &CstArgs) -> Result<()> {
    if args.list_languages {
        return output::print_languages(io::stdout().lock());
    }

    let name = args
        .language
        .as_deref()
        .ok_or_else(|| ExtractError::invalid_arguments("a language name is required"))?;
    let language = grammar::resolve(name)?;
    let input = SourceInput::from_path(args.file.clone());

    let pipeline = ExtractionPipeline::new(args.options());
    let summary = pipeline.run(language, &input, io::stdout().lock())?;
    debug!(?summary, "run succeeded");
    Ok(())
}

/// Help and version requests succeed; any other clap failure is a usage error.
fn argument_failure(error: clap::Error) -> ExitCode {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = error.print();
            ExitCode::SUCCESS
        }
        _ => {
            let detail = error.to_string();
            let detail = detail.lines().next().unwrap_or_default().to_string();
            let failure = ExtractError::invalid_arguments(detail);
            let code = failure.exit_code();
            output::report_error(failure, false);
            ExitCode::from(code)
        }
    }
}
