//! Design-system compliance checks for component stylesheets.
//!
//! Flags hardcoded pixel sizes, colors and media-query breakpoints that
//! should reference design tokens instead.

mod report;
mod rules;
mod scanner;

pub use report::ComplianceReport;
pub use rules::{Rule, RuleKind, Severity};
pub use scanner::{ComplianceScanner, Issue, ScanConfig};
