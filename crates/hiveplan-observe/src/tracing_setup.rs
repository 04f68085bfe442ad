//! Tracing subscriber initialization with human or JSON-lines output.
//!
//! # Usage
//!
//! ```no_run
//! use hiveplan_observe::tracing_setup::{LogOptions, init_tracing};
//!
//! init_tracing(&LogOptions { verbosity: 1, quiet: false, json: false }).unwrap();
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Logging switches collected from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Number of `-v` flags.
    pub verbosity: u8,
    /// `-q`: errors only. Wins over `verbosity`.
    pub quiet: bool,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl LogOptions {
    /// Filter directive used when `RUST_LOG` is not set.
    pub fn default_directive(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbosity {
            0 => "warn",
            1 => "info,hiveplan=debug",
            _ => "trace",
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// - `RUST_LOG` takes precedence; otherwise the filter comes from
///   [`LogOptions::default_directive`].
/// - Logs go to stderr so command output on stdout stays machine-readable.
///
/// # Errors
///
/// Returns an error if the global subscriber has already been set.
pub fn init_tracing(options: &LogOptions) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(options.default_directive()))?;

    if options.json {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
