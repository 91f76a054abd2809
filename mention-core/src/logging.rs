//! Tracing subscriber setup for binaries.
//!
//! The library only emits events through `tracing`; nothing here runs unless a
//! binary calls [`init_tracing`].

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when neither `--verbose` nor `--log-level` is given.
const DEFAULT_FILTER: &str = "mention_core=warn,mention_report=warn";

/// Installs a global subscriber writing to stderr.
///
/// `RUST_LOG`, then `MENTION_LOG`, override the level chosen here. A bare
/// level such as `"trace"` applies to this workspace's crates only; a full
/// directive (`"mention_core::cache=trace"`) is used as given.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let directives = match (verbose, log_level) {
        (_, Some(level)) => directives_for(level),
        (true, None) => directives_for("debug"),
        (false, None) => DEFAULT_FILTER.to_owned(),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("MENTION_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(directives));

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

fn directives_for(level: &str) -> String {
    if level.contains('=') {
        level.to_owned()
    } else {
        format!("mention_core={level},mention_report={level}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_scoped_to_workspace() {
        assert_eq!(directives_for("trace"), "mention_core=trace,mention_report=trace");
    }

    #[test]
    fn full_directive_passes_through() {
        assert_eq!(directives_for("mention_core::cache=trace"), "mention_core::cache=trace");
    }
}
