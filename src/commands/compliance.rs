use crate::cli::OutputFormat;
use crate::output;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use tokensync_common::SyncConfig;
use tokensync_compliance::ComplianceScanner;

pub fn run(config: &SyncConfig, dir: Option<PathBuf>, format: OutputFormat) -> Result<i32> {
    let dir = dir.unwrap_or_else(|| config.components_dir());
    let report = ComplianceScanner::new()
        .run(&dir)
        .with_context(|| format!("Compliance scan of {} failed", dir.display()))?;

    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => {
            println!(
                "{}",
                format!("🔍 Design system compliance: {}", dir.display()).bold()
            );
            output::print_compliance(&report);

            if report.has_errors() {
                println!(
                    "{}",
                    format!("❌ {} error(s) must be fixed", report.error_count)
                        .red()
                        .bold()
                );
            } else {
                println!("{}", "✅ No compliance errors".green().bold());
            }
        }
    }

    Ok(report.exit_code())
}
