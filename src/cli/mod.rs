pub mod download;
pub mod update;

use ghmirror::config::{Config, ConfigOverrides, MirrorConfig};
use ghmirror::core::MirrorResult;
use ghmirror::mirror::BatchSummary;
use std::path::Path;

/// Load the config file (or `path`) and apply command-line overrides
pub fn load_config(path: Option<&Path>, overrides: ConfigOverrides) -> MirrorResult<MirrorConfig> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.resolve(overrides)
}

/// Print one line per repository and a closing count
pub fn print_summary(summary: &BatchSummary) {
    if summary.is_empty() {
        println!("No repositories to process.");
        return;
    }

    println!();
    for outcome in &summary.outcomes {
        match &outcome.result {
            Ok(report) => {
                let mut line = format!(
                    "  ✓ {} ({} file(s) downloaded)",
                    outcome.source,
                    report.downloaded_count()
                );
                if !report.warnings.is_empty() {
                    line.push_str(&format!(", {} warning(s)", report.warnings.len()));
                }
                println!("{}", line);
            }
            Err(e) => println!("  ✗ {}: {}", outcome.source, e),
        }
    }

    let total = summary.outcomes.len();
    let succeeded = summary.succeeded().count();
    println!("\nSynchronized {} of {} repositories", succeeded, total);
}
