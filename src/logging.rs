//! Logging configuration. A [`Logging`] value is built once at startup and
//! installed for the duration of a run; nothing is configured globally as a
//! side effect of loading the library.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

pub struct Logging {
    /// The most verbose level written to stderr.
    pub console_level: LevelFilter,

    /// If set, debug-level logs are additionally written to this file, which
    /// is truncated first.
    pub log_file: Option<PathBuf>,
}

impl Default for Logging {
    fn default() -> Self {
        Logging {
            console_level: LevelFilter::INFO,
            log_file: None,
        }
    }
}

impl Logging {
    /// Builds a configuration from command-line verbosity: `quiet` limits the
    /// console to warnings, otherwise each `verbose` step goes from info to
    /// debug to trace.
    pub fn from_verbosity(verbose: u64, quiet: bool, log_file: Option<PathBuf>) -> Logging {
        Logging {
            console_level: match (quiet, verbose) {
                (true, _) => LevelFilter::WARN,
                (false, 0) => LevelFilter::INFO,
                (false, 1) => LevelFilter::DEBUG,
                (false, _) => LevelFilter::TRACE,
            },
            log_file,
        }
    }

    /// Installs the configured subscriber for the current thread. Logging
    /// stays active until the returned guard is dropped.
    pub fn install(&self) -> io::Result<DefaultGuard> {
        let console = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .compact()
            .with_filter(self.console_level);

        let file = match &self.log_file {
            None => None,
            Some(path) => Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(File::create(path)?))
                    .with_ansi(false)
                    .with_filter(LevelFilter::DEBUG),
            ),
        };

        let subscriber = tracing_subscriber::registry().with(console).with(file);
        Ok(tracing::subscriber::set_default(subscriber))
    }
}
