//! Tracing subscriber setup

use crate::args::CommonArgs;
use anyhow::{anyhow, Context, Result};
use indicatif::MultiProgress;
use mechacopy_config::LoggingConfig;
use std::io::{self, Write};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriter};
use tracing_subscriber::{fmt, EnvFilter};

/// Level selected by the command-line flags, falling back to the configured one
pub fn log_level<'a>(args: &CommonArgs, logging: &'a LoggingConfig) -> &'a str {
    if args.debug {
        "trace"
    } else if args.quiet {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        &logging.level
    }
}

/// Stderr writer that hides the progress bars while a log line is printed
#[derive(Clone)]
pub struct ProgressAwareWriter {
    multi: MultiProgress,
}

impl ProgressAwareWriter {
    /// Write around the bars drawn on `multi`
    pub fn new(multi: MultiProgress) -> Self {
        Self { multi }
    }
}

impl Write for ProgressAwareWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.multi.suspend(|| io::stderr().write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.multi.suspend(|| io::stderr().flush())
    }
}

impl<'a> MakeWriter<'a> for ProgressAwareWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Initialize logging
///
/// `RUST_LOG` wins over both the flags and the configuration. Terminal
/// output is routed around `progress` when bars are shown. When a log file
/// is configured the returned guard must be held until the program exits so
/// buffered lines get flushed.
pub fn init_logging(
    args: &CommonArgs,
    logging: &LoggingConfig,
    progress: Option<&MultiProgress>,
) -> Result<Option<WorkerGuard>> {
    let level = log_level(args, logging);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log level '{}'", level))?;

    let Some(log_file) = &logging.log_file else {
        let writer = match progress {
            Some(multi) => BoxMakeWriter::new(ProgressAwareWriter::new(multi.clone())),
            None => BoxMakeWriter::new(io::stderr),
        };
        let builder = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_writer(writer);
        let result = if logging.json_format {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
        result.map_err(|e| anyhow!("failed to initialise logging: {}", e))?;
        return Ok(None);
    };

    let dir = log_file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = log_file
        .file_name()
        .with_context(|| format!("log file path '{}' has no file name", log_file.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer);
    let result = if logging.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| anyhow!("failed to initialise logging: {}", e))?;
    Ok(Some(guard))
}
