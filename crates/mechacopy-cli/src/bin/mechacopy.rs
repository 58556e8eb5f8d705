//! mechacopy - parallel directory tree copy with automatic retries

use clap::Parser;
use mechacopy_cli::{args::CopyCli, display, run_copy, EXIT_FATAL};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = CopyCli::parse();

    match run_copy(&cli).await {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            display::print_error(&err);
            ExitCode::from(EXIT_FATAL)
        }
    }
}
