//! Console summaries shared by the commands

use colored::Colorize;
use tokensync_compliance::{ComplianceReport, Severity};
use tokensync_core::{ChangeSet, DiagnosticKind, ValidationResult};
use tokensync_figma::Extraction;

pub fn print_extraction(extraction: &Extraction) {
    println!(
        "📦 Extracted {} token(s) ({} from variables, {} from nodes)",
        extraction.tokens.len(),
        extraction.from_variables,
        extraction.from_nodes
    );
    let dropped = extraction.diagnostics.count(DiagnosticKind::Dropped);
    if dropped > 0 {
        println!(
            "{}",
            format!("⚠️  {} Figma variable(s) skipped, run with -v for details", dropped).yellow()
        );
    }
}

pub fn print_changes(changes: &ChangeSet) {
    println!(
        "📊 {} added, {} updated, {} unchanged",
        changes.added.len().to_string().green(),
        changes.updated.len().to_string().yellow(),
        changes.unchanged.len()
    );
    for (path, value) in &changes.added {
        println!("  {} {}: {}", "+".green(), path, value);
    }
    for (path, change) in &changes.updated {
        println!("  {} {}: {} → {}", "~".yellow(), path, change.from, change.to);
    }
}

pub fn print_validation(label: &str, result: &ValidationResult) {
    if result.is_valid {
        println!("{} {}", "✅".green(), format!("{} is valid", label).bold());
    } else {
        println!("{} {}", "❌".red(), format!("{} is invalid", label).bold());
    }
    for error in &result.errors {
        println!("  {} {}", "error:".red(), error);
    }
    for warning in &result.warnings {
        println!("  {} {}", "warning:".yellow(), warning);
    }
    if !result.extra_tokens.is_empty() {
        println!(
            "  {} {}",
            "extra:".dimmed(),
            result.extra_tokens.join(", ")
        );
    }
}

pub fn print_compliance(report: &ComplianceReport) {
    for (file, issues) in report.by_file() {
        println!("\n📄 {}", file.display().to_string().bold());
        for issue in issues {
            let severity = match issue.severity {
                Severity::Error => "error".red().bold(),
                Severity::Warning => "warning".yellow().bold(),
            };
            println!(
                "  {}:{} {} [{}] {}",
                issue.line, issue.column, severity, issue.rule, issue.message
            );
            println!("      {}", issue.code.dimmed());
            if !issue.suggestions.is_empty() {
                println!("      💡 {}", issue.suggestions.join(" or ").cyan());
            }
        }
    }

    println!(
        "\n{} file(s) scanned: {} error(s), {} warning(s)",
        report.files_scanned,
        report.error_count.to_string().red(),
        report.warning_count.to_string().yellow()
    );
    for (rule, count) in report.by_rule() {
        println!("  {:<32} {}", rule, count);
    }
}
