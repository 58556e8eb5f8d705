//! mechadel - parallel directory tree delete

use clap::Parser;
use mechacopy_cli::{args::DeleteCli, display, run_delete, EXIT_FATAL};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = DeleteCli::parse();

    match run_delete(&cli).await {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            display::print_error(&err);
            ExitCode::from(EXIT_FATAL)
        }
    }
}
