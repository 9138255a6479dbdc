//! Verbosity policy and log output configuration
//!
//! The repeatable `-v` flag resolves to a pair of log levels (one for every
//! target, a usually-louder one for sprig itself) plus a set of format detail
//! switches. Resolution is pure; applying the result installs the global
//! subscriber once at startup. `RUST_LOG` overrides the derived filter.

use std::io::IsTerminal;

use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

/// Format detail switches derived from the verbosity count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogFormat {
    /// Prefix records with a timestamp
    pub timestamp: bool,
    /// Report the process id once at configuration time
    pub process_id: bool,
    /// Prefix records with the emitting thread id
    pub thread_id: bool,
    /// Include source file and line in records
    pub source_location: bool,
}

/// Log levels and format detail resolved from the verbosity count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogPolicy {
    /// Level applied to targets without a more specific directive
    pub global: Level,
    /// Level applied to sprig's own targets
    pub local: Level,
    /// Format detail switches
    pub format: LogFormat,
}

impl LogPolicy {
    /// Resolve the policy for a repeat count of `-v`; total over all inputs
    #[must_use]
    pub fn resolve(verbosity: u8) -> Self {
        match verbosity {
            0 => Self {
                global: Level::WARN,
                local: Level::WARN,
                format: LogFormat::default(),
            },
            1 => Self {
                global: Level::WARN,
                local: Level::INFO,
                format: LogFormat::default(),
            },
            2 => Self {
                global: Level::WARN,
                local: Level::DEBUG,
                format: LogFormat {
                    timestamp: true,
                    ..LogFormat::default()
                },
            },
            3 => Self {
                global: Level::INFO,
                local: Level::DEBUG,
                format: LogFormat {
                    timestamp: true,
                    process_id: true,
                    ..LogFormat::default()
                },
            },
            _ => Self {
                global: Level::DEBUG,
                local: Level::DEBUG,
                format: LogFormat {
                    timestamp: true,
                    process_id: true,
                    thread_id: true,
                    source_location: true,
                },
            },
        }
    }

    /// Directive string handed to `EnvFilter` when `RUST_LOG` is unset
    #[must_use]
    pub fn directives(&self) -> String {
        format!("{},sprig={}", self.global, self.local)
    }
}

/// Install the global subscriber according to the resolved policy
///
/// ANSI color is applied only when requested and the output stream is a
/// terminal, so piped output stays clean.
pub fn init(policy: &LogPolicy, color: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(policy.directives()));
    let ansi = color && std::io::stdout().is_terminal();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_thread_ids(policy.format.thread_id)
        .with_file(policy.format.source_location)
        .with_line_number(policy.format.source_location);

    if policy.format.timestamp {
        builder.init();
    } else {
        builder.without_time().init();
    }

    if policy.format.process_id {
        debug!(pid = std::process::id(), "logging configured");
    }
}
