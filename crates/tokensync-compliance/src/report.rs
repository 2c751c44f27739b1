use crate::rules::Severity;
use crate::scanner::Issue;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tokensync_common::Result;

/// Outcome of a compliance scan
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub files_scanned: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub issues: Vec<Issue>,
}

impl ComplianceReport {
    pub fn new(files_scanned: usize, issues: Vec<Issue>) -> Self {
        let error_count = issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count();
        let warning_count = issues.len() - error_count;
        Self {
            files_scanned,
            error_count,
            warning_count,
            issues,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Warnings alone never fail a run
    pub fn exit_code(&self) -> i32 {
        if self.has_errors() {
            1
        } else {
            0
        }
    }

    pub fn by_file(&self) -> BTreeMap<&Path, Vec<&Issue>> {
        let mut grouped: BTreeMap<&Path, Vec<&Issue>> = BTreeMap::new();
        for issue in &self.issues {
            grouped.entry(issue.file.as_path()).or_default().push(issue);
        }
        grouped
    }

    /// Issue count per rule name
    pub fn by_rule(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for issue in &self.issues {
            *counts.entry(issue.rule.as_str()).or_insert(0) += 1;
        }
        counts
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
