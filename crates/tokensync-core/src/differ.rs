use crate::reader::{locate, scan_declarations};
use crate::types::{ChangeSet, Diagnostics, TokenSet, ValueChange};
use std::collections::BTreeMap;
use std::ops::Range;
use tracing::{debug, info};

/// Compares incoming tokens against a baseline and merges them
pub struct TokenDiffer;

impl TokenDiffer {
    pub fn new() -> Self {
        Self
    }

    /// Classify every token of `new` as added, updated or unchanged relative to
    /// `current`, returning the change list and the merged token set.
    ///
    /// Keys that only exist in `current` are carried into the merge untouched.
    /// Equality is strict string equality.
    pub fn diff(&self, new: &TokenSet, current: &TokenSet) -> (ChangeSet, TokenSet) {
        let mut changes = ChangeSet::default();
        let mut merged = current.clone();

        for (category, key, value) in new.iter() {
            let path = ChangeSet::path(category, key);
            match merged.get(category, key) {
                None => {
                    changes.added.insert(path, value.to_string());
                    merged.insert(category, key, value);
                }
                Some(old) if old != value => {
                    changes.updated.insert(
                        path,
                        ValueChange {
                            from: old.to_string(),
                            to: value.to_string(),
                        },
                    );
                    merged.insert(category, key, value);
                }
                Some(_) => {
                    changes.unchanged.insert(path, value.to_string());
                }
            }
        }

        info!(
            "Token diff: {} added, {} updated, {} unchanged",
            changes.added.len(),
            changes.updated.len(),
            changes.unchanged.len()
        );

        (changes, merged)
    }
}

impl Default for TokenDiffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrite an existing token file in place.
///
/// Updated properties get their value replaced on their own line. Added
/// properties are inserted before the closing brace of the first top-level
/// block, or appended in a fresh `:root` block when the file has none.
/// Declarations under dark-theme selectors are left alone.
pub fn apply_to_scss(content: &str, changes: &ChangeSet) -> String {
    let mut lines: Vec<String> = content.lines().map(String::from).collect();
    let mut scratch = Diagnostics::new();

    // Replace right to left so earlier spans on the same line stay valid
    let mut replacements: Vec<(usize, Range<usize>, &str)> = Vec::new();
    for decl in scan_declarations(content) {
        if decl.dark {
            continue;
        }
        let (category, key) = locate(&decl.name, &mut scratch);
        let path = ChangeSet::path(category, &key);
        if let Some(change) = changes.updated.get(&path) {
            debug!("Updated {} on line {}", path, decl.line + 1);
            replacements.push((decl.line, decl.value_span, change.to.as_str()));
        }
    }
    replacements.sort_by(|a, b| (a.0, b.1.start).cmp(&(b.0, a.1.start)));
    for (line, span, value) in replacements {
        lines[line].replace_range(span, value);
    }

    if !changes.added.is_empty() {
        let additions = render_additions(&changes.added);
        match first_block_close(&lines) {
            Some(idx) => {
                for (offset, addition) in additions.into_iter().enumerate() {
                    lines.insert(idx + offset, format!("  {}", addition));
                }
            }
            None => {
                if lines.last().is_some_and(|l| !l.trim().is_empty()) {
                    lines.push(String::new());
                }
                lines.push(":root {".to_string());
                lines.extend(additions.into_iter().map(|a| format!("  {}", a)));
                lines.push("}".to_string());
            }
        }
    }

    let mut output = lines.join("\n");
    if content.ends_with('\n') || content.is_empty() {
        output.push('\n');
    }
    output
}

fn render_additions(added: &BTreeMap<String, String>) -> Vec<String> {
    let mut out = vec!["// Added from Figma".to_string()];
    for (path, value) in added {
        if let Some((category, key)) = ChangeSet::split_path(path) {
            out.push(format!("--{}: {};", category.canonical_key(key), value));
        }
    }
    out
}

/// Index of the line closing the first top-level block
fn first_block_close(lines: &[String]) -> Option<usize> {
    let mut depth = 0usize;
    let mut opened = false;
    for (idx, line) in lines.iter().enumerate() {
        if line.trim_start().starts_with("//") {
            continue;
        }
        for c in line.chars() {
            match c {
                '{' => {
                    depth += 1;
                    opened = true;
                }
                '}' => {
                    depth = depth.saturating_sub(1);
                    if opened && depth == 0 {
                        return Some(idx);
                    }
                }
                _ => {}
            }
        }
    }
    None
}
