//! cstjson: concrete syntax trees as JSON
//!
//! Turns program text into a position-annotated JSON encoding of its concrete
//! syntax tree. The pipeline is registry lookup ([`grammar`]), loading
//! ([`source`]), parsing ([`syntax`]) and encoding ([`encode`]), driven by
//! [`engine::ExtractionPipeline`].

pub use crate::engine::{ExtractOptions, ExtractSummary, ExtractionPipeline};
pub use crate::errors::{ErrorClass, ExtractError, Result};
pub use crate::grammar::{resolve, Language};

pub mod cli;
pub mod encode;
pub mod engine;
pub mod errors;
pub mod grammar;
pub mod source;
pub mod syntax;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbosity` (the `-v` count) picks the
/// level, starting from errors only.
pub fn init_tracing(verbosity: u8) {
    use std::io::IsTerminal;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = match verbosity {
        0 => "cstjson=error",
        1 => "cstjson=warn",
        2 => "cstjson=info",
        3 => "cstjson=debug",
        _ => "cstjson=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A second initialization (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .try_init();
}
