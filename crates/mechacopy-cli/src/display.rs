//! Console output for the banner and the end-of-run report

use console::style;
use mechacopy_types::JobSummary;
use std::path::Path;
use std::time::Duration;

/// Print the start-of-run banner
pub fn print_banner(operation: &str, source: &Path, destination: Option<&Path>) {
    println!(
        "{} {} v{}",
        style("mechacopy").cyan().bold(),
        operation,
        env!("CARGO_PKG_VERSION")
    );
    match destination {
        Some(destination) => println!(
            "{} {} {} {}",
            style("→").green().bold(),
            style(source.display()).cyan(),
            style("to").dim(),
            style(destination.display()).cyan()
        ),
        None => println!("{} {}", style("→").green().bold(), style(source.display()).cyan()),
    }
    println!();
}

/// Print the final report
pub fn print_summary(summary: &JobSummary) {
    println!();
    println!("{}", style("Summary:").bold().underlined());
    println!("  Elapsed:     {}", format_elapsed(summary.elapsed));
    println!("  Directories: {}", summary.directories);
    println!("  Total:       {}", summary.total());
    println!("  Success:     {}", style(summary.success_count).green());
    println!("  Skip:        {}", summary.skip_count);

    if summary.error_count > 0 {
        println!("  Error:       {}", style(summary.error_count).red().bold());
    } else {
        println!("  Error:       {}", style(summary.error_count).green());
    }
    if summary.retry_rounds > 0 {
        println!("  Retries:     {}", summary.retry_rounds);
    }

    if !summary.error_items.is_empty() {
        println!();
        println!("{}", style("Failed files:").red().bold());
        for item in &summary.error_items {
            println!("  {}", item.display());
        }
    }
    if !summary.failed_directories.is_empty() {
        println!();
        println!("{}", style("Failed directories:").red().bold());
        for dir in &summary.failed_directories {
            println!("  {}", dir.display());
        }
    }
}

/// Print a fatal error to stderr
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", style("Error:").red().bold(), err);
}

/// Format elapsed time as `HHh MMm SSs`
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}h {:02}m {:02}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}
