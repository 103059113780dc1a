// Copyright (c) 2018-2022 The MobileCoin Foundation

//! Logging support.
//!
//! Components never reach for a global logger; each one takes an injected
//! [Logger] so callers control context and fan-out.

pub use slog::{o, Drain, Logger};

/// slog logging macros, usable as `log::info!(logger, ...)`.
pub mod log {
    pub use slog::{crit, debug, error, info, trace, warn};
}

use chrono::Utc;
use std::io::{self, Write};

/// Sets chan_size for the stdout logger.
const STDOUT_CHANNEL_SIZE: usize = 100_000;

/// Custom timestamp function for use with slog-term.
fn custom_timestamp(io: &mut dyn Write) -> io::Result<()> {
    write!(io, "{}", Utc::now())
}

/// Create the application logger, draining to stdout asynchronously.
/// Verbosity is controlled through the standard RUST_LOG environment
/// variable.
pub fn create_app_logger() -> Logger {
    let decorator = slog_term::TermDecorator::new().stdout().build();
    let drain = slog_envlogger::new(
        slog_term::FullFormat::new(decorator)
            .use_custom_timestamp(custom_timestamp)
            .build()
            .fuse(),
    );
    let drain = slog_async::Async::new(drain)
        .thread_name("slog-stdout".into())
        .chan_size(STDOUT_CHANNEL_SIZE)
        .build()
        .fuse();

    Logger::root(drain, o!())
}

/// Create a synchronous logger suitable for use inside tests.
pub fn create_test_logger(test_name: &str) -> Logger {
    let decorator = slog_term::PlainSyncDecorator::new(slog_term::TestStdoutWriter);
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    Logger::root(drain, o!("test" => test_name.to_string()))
}
