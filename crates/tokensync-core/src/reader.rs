use crate::classify::classify_property;
use crate::types::{Category, DiagnosticKind, Diagnostics, TokenSet};
use regex::Regex;
use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;
use tokensync_common::Result;
use tracing::{debug, warn};

fn declaration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"--([A-Za-z0-9_-]+)\s*:\s*([^;{}]+?)\s*;").expect("valid declaration regex")
    })
}

/// A custom property declaration found while scanning an SCSS source
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Zero-based line index
    pub line: usize,
    pub name: String,
    pub value: String,
    /// Byte range of the value within its line
    pub value_span: Range<usize>,
    /// Inside a dark-theme selector
    pub dark: bool,
}

/// Light tokens plus the overrides found under dark-theme selectors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemedTokens {
    pub light: TokenSet,
    pub dark: TokenSet,
}

/// Reads CSS custom properties out of `_tokens.scss` style files
pub struct TokenReader;

impl TokenReader {
    pub fn new() -> Self {
        Self
    }

    /// Read a token file. A missing file yields an empty set.
    pub fn read(&self, path: &Path) -> Result<TokenSet> {
        let (tokens, diagnostics) = self.read_with_diagnostics(path)?;
        for diagnostic in &diagnostics.entries {
            debug!("{}: {}", diagnostic.name, diagnostic.detail);
        }
        Ok(tokens)
    }

    pub fn read_with_diagnostics(&self, path: &Path) -> Result<(TokenSet, Diagnostics)> {
        if !path.exists() {
            warn!("Token file {:?} not found, starting from an empty token set", path);
            return Ok((TokenSet::new(), Diagnostics::new()));
        }

        let content = std::fs::read_to_string(path)?;
        let (tokens, diagnostics) = self.parse(&content);
        debug!("Read {} tokens from {:?}", tokens.len(), path);
        Ok((tokens, diagnostics))
    }

    /// Parse every declaration regardless of the selector it sits under.
    /// Later declarations of the same key win.
    pub fn parse(&self, content: &str) -> (TokenSet, Diagnostics) {
        let mut tokens = TokenSet::new();
        let mut diagnostics = Diagnostics::new();

        for decl in scan_declarations(content) {
            let (category, key) = locate(&decl.name, &mut diagnostics);
            tokens.insert(category, key, decl.value);
        }

        (tokens, diagnostics)
    }

    /// Split declarations into light tokens and dark-theme overrides
    pub fn parse_themed(&self, content: &str) -> ThemedTokens {
        let mut themed = ThemedTokens::default();
        let mut diagnostics = Diagnostics::new();

        for decl in scan_declarations(content) {
            let (category, key) = locate(&decl.name, &mut diagnostics);
            let target = if decl.dark {
                &mut themed.dark
            } else {
                &mut themed.light
            };
            target.insert(category, key, decl.value);
        }

        if !diagnostics.is_empty() {
            debug!("{} properties defaulted to colors", diagnostics.len());
        }
        themed
    }
}

impl Default for TokenReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Category and canonical key for a property name. Unmatched names default
/// to colors and are recorded as unclassified.
pub fn locate(name: &str, diagnostics: &mut Diagnostics) -> (Category, String) {
    match classify_property(name) {
        Some(category) => (category, category.canonical_key(name)),
        None => {
            diagnostics.push(
                DiagnosticKind::Unclassified,
                name,
                "no category matched, defaulted to colors",
            );
            (Category::Colors, Category::Colors.canonical_key(name))
        }
    }
}

/// Walk the source line by line, tracking the selector stack so that
/// declarations under `[data-theme="dark"]` or `.dark` can be told apart.
pub fn scan_declarations(content: &str) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    let mut selectors: Vec<bool> = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("//") {
            continue;
        }

        if let Some(open) = line.find('{') {
            let selector = &line[..open];
            selectors.push(is_dark_selector(selector));
        }

        let dark = selectors.iter().any(|d| *d);
        for caps in declaration_regex().captures_iter(line) {
            let (Some(name), Some(value)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            declarations.push(Declaration {
                line: idx,
                name: name.as_str().to_string(),
                value: value.as_str().trim().to_string(),
                value_span: value.range(),
                dark,
            });
        }

        let opens = line.matches('{').count();
        let closes = line.matches('}').count();
        // The first brace on this line was already pushed above
        for _ in 1..opens {
            selectors.push(dark);
        }
        for _ in 0..closes {
            selectors.pop();
        }
    }

    declarations
}

fn is_dark_selector(selector: &str) -> bool {
    let selector = selector.replace('\'', "\"");
    selector.contains("data-theme=\"dark\"") || has_dark_class(&selector)
}

/// `.dark` as a whole class name, not `.darker` or `.dark-mode`
fn has_dark_class(selector: &str) -> bool {
    selector.match_indices(".dark").any(|(at, m)| {
        selector[at + m.len()..]
            .chars()
            .next()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '-' || c == '_'))
    })
}
