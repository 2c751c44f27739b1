use crate::report::ComplianceReport;
use crate::rules::{Rule, Severity};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tokensync_common::{Result, TokenSyncError};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// One hardcoded value found in a stylesheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub file: PathBuf,
    /// 1-based
    pub line: usize,
    /// 1-based, in characters
    pub column: usize,
    pub rule: String,
    pub severity: Severity,
    pub message: String,
    /// The offending line, trimmed
    pub code: String,
    pub suggestions: Vec<String>,
}

/// Scan configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub extensions: Vec<String>,
    pub exclude_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["scss".to_string()],
            exclude_dirs: vec!["examples".to_string(), "node_modules".to_string()],
        }
    }
}

/// Walks a component tree and reports hardcoded style values
pub struct ComplianceScanner {
    rules: Vec<Rule>,
    config: ScanConfig,
}

impl ComplianceScanner {
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    pub fn with_config(config: ScanConfig) -> Self {
        Self {
            rules: Rule::defaults(),
            config,
        }
    }

    /// Scan every stylesheet under `dir`
    pub fn scan(&self, dir: impl AsRef<Path>) -> Result<Vec<Issue>> {
        Ok(self.run(dir)?.issues)
    }

    /// Scan and summarize
    pub fn run(&self, dir: impl AsRef<Path>) -> Result<ComplianceReport> {
        let root = dir.as_ref();
        if !root.is_dir() {
            return Err(TokenSyncError::Config(format!(
                "Directory not found: {}",
                root.display()
            )));
        }

        info!("Scanning {} for hardcoded values", root.display());

        let mut issues = Vec::new();
        let mut files_scanned = 0;

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e));

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.has_style_extension(entry.path()) {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();

            match fs::read_to_string(path) {
                Ok(content) => {
                    let found = self.scan_content(&content, &relative);
                    debug!("{}: {} issue(s)", relative.display(), found.len());
                    issues.extend(found);
                    files_scanned += 1;
                }
                Err(e) => {
                    warn!("Failed to read {}: {}", path.display(), e);
                }
            }
        }

        let report = ComplianceReport::new(files_scanned, issues);
        info!(
            "Scanned {} file(s): {} error(s), {} warning(s)",
            report.files_scanned, report.error_count, report.warning_count
        );
        Ok(report)
    }

    /// Check one stylesheet's text, attributing issues to `file`
    pub fn scan_content(&self, content: &str, file: &Path) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut in_block_comment = false;

        for (index, line) in content.lines().enumerate() {
            if skip_comment(line, &mut in_block_comment) {
                continue;
            }
            for rule in self.rules.iter().filter(|r| r.applies_to(line)) {
                for caps in rule.pattern.captures_iter(line) {
                    let Some(matched) = caps.get(0) else { continue };
                    issues.push(Issue {
                        file: file.to_path_buf(),
                        line: index + 1,
                        column: line[..matched.start()].chars().count() + 1,
                        rule: rule.name.to_string(),
                        severity: rule.severity,
                        message: rule.message(matched.as_str()),
                        code: line.trim().to_string(),
                        suggestions: rule.suggestions(&caps),
                    });
                }
            }
        }

        issues
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .map(|name| self.config.exclude_dirs.iter().any(|d| d == name))
                .unwrap_or(false)
    }

    fn has_style_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.config.extensions.iter().any(|x| x == ext))
            .unwrap_or(false)
    }
}

impl Default for ComplianceScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `line` is comment-only. Tracks `/* ... */` spanning several lines
/// so that `*`-prefixed continuation lines are skipped but `* { ... }`
/// selectors are not.
fn skip_comment(line: &str, in_block: &mut bool) -> bool {
    let trimmed = line.trim_start();
    if *in_block {
        if trimmed.contains("*/") {
            *in_block = false;
        }
        return true;
    }
    if trimmed.starts_with("//") {
        return true;
    }
    if let Some(rest) = trimmed.strip_prefix("/*") {
        *in_block = !rest.contains("*/");
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(content: &str) -> Vec<Issue> {
        ComplianceScanner::new().scan_content(content, Path::new("Button.module.scss"))
    }

    #[test]
    fn test_single_px_issue() {
        let issues = scan(".button {\n  margin: 8px;\n}\n");

        assert_eq!(issues.len(), 1);
        let issue = &issues[0];
        assert_eq!(issue.rule, "Hardcoded pixel values");
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(issue.line, 2);
        assert_eq!(issue.column, 11);
        assert_eq!(issue.code, "margin: 8px;");
        assert_eq!(issue.suggestions, vec!["var(--spacing-sm)".to_string()]);
    }

    #[test]
    fn test_calc_is_exempt() {
        assert!(scan(".a { margin: calc(8px + 4px); }").is_empty());
    }

    #[test]
    fn test_comments_are_skipped() {
        let content = "// margin: 8px;\n/* color: #fff; */\n/**\n * padding: 16px;\n */\n";
        assert!(scan(content).is_empty());
    }

    #[test]
    fn test_universal_selector_is_scanned() {
        let issues = scan("* { margin: 8px; }");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, "Hardcoded pixel values");
    }

    #[test]
    fn test_code_after_block_comment_is_scanned() {
        let issues = scan("/*\n * margin: 8px;\n */\n* {\n  padding: 16px;\n}\n");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 5);
    }

    #[test]
    fn test_colors() {
        let issues = scan(".a {\n  color: #FFFFFF;\n  background: rgba(0, 0, 0, 0.5);\n  border-color: hsl(210, 50%, 40%);\n}\n");

        let rules: Vec<&str> = issues.iter().map(|i| i.rule.as_str()).collect();
        assert_eq!(
            rules,
            vec![
                "Hardcoded hex colors",
                "Hardcoded RGB/RGBA colors",
                "Hardcoded HSL colors"
            ]
        );
        assert_eq!(issues[0].suggestions, vec!["var(--color-white)".to_string()]);
    }

    #[test]
    fn test_media_query_warning() {
        let issues = scan("@media (min-width: 768px) {\n  .a { display: none; }\n}\n");

        let media: Vec<&Issue> = issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .collect();
        assert_eq!(media.len(), 1);
        assert_eq!(media[0].rule, "Magic numbers in media queries");
        assert_eq!(media[0].suggestions, vec!["$breakpoint-md".to_string()]);
    }

    #[test]
    fn test_multiple_matches_on_one_line() {
        let issues = scan(".a { padding: 4px 16px; }");
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].suggestions, vec!["var(--spacing-xs)".to_string()]);
        assert_eq!(issues[1].suggestions, vec!["var(--spacing-md)".to_string()]);
        assert!(issues[0].column < issues[1].column);
    }

    #[test]
    fn test_walk_skips_examples_and_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let components = dir.path().join("Button");
        fs::create_dir_all(&components).unwrap();
        fs::write(components.join("Button.module.scss"), ".b { margin: 8px; }\n").unwrap();
        fs::write(components.join("Button.tsx"), "const x = '8px';\n").unwrap();

        let examples = dir.path().join("examples");
        fs::create_dir_all(&examples).unwrap();
        fs::write(examples.join("Demo.scss"), ".d { color: #123456; }\n").unwrap();

        let report = ComplianceScanner::new().run(dir.path()).unwrap();
        assert_eq!(report.files_scanned, 1);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(
            report.issues[0].file,
            PathBuf::from("Button").join("Button.module.scss")
        );
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = ComplianceScanner::new().scan(dir.path().join("nope"));
        assert!(matches!(result, Err(TokenSyncError::Config(_))));
    }
}
