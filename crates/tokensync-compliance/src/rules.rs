use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    HardcodedPixels,
    HardcodedHex,
    HardcodedRgb,
    HardcodedHsl,
    MediaQueryMagicNumber,
}

/// A single hardcoded-value check applied to every line
#[derive(Debug, Clone)]
pub struct Rule {
    pub kind: RuleKind,
    pub name: &'static str,
    pub severity: Severity,
    pub pattern: Regex,
    /// Lines containing any of these are skipped for this rule
    pub exclusions: &'static [&'static str],
    /// The rule only applies to lines containing this
    pub context: Option<&'static str>,
}

/// Pixel values with a spacing token counterpart
const SPACING_SCALE: &[(u32, &str)] = &[
    (4, "spacing-xs"),
    (8, "spacing-sm"),
    (12, "spacing-sm-md"),
    (16, "spacing-md"),
    (24, "spacing-lg"),
    (32, "spacing-xl"),
    (48, "spacing-2xl"),
    (64, "spacing-3xl"),
];

const BREAKPOINT_SCALE: &[(u32, &str)] = &[
    (576, "breakpoint-sm"),
    (768, "breakpoint-md"),
    (992, "breakpoint-lg"),
    (1200, "breakpoint-xl"),
];

const GENERIC_COLOR_SUGGESTIONS: &[&str] = &["var(--color-primary)", "var(--color-gray-500)"];

impl Rule {
    pub fn defaults() -> Vec<Rule> {
        vec![
            Rule {
                kind: RuleKind::HardcodedPixels,
                name: "Hardcoded pixel values",
                severity: Severity::Error,
                pattern: Regex::new(r"\b(\d+(?:\.\d+)?)px\b").expect("valid px regex"),
                exclusions: &["calc(", "var(", "clamp("],
                context: None,
            },
            Rule {
                kind: RuleKind::HardcodedHex,
                name: "Hardcoded hex colors",
                severity: Severity::Error,
                pattern: Regex::new(r"#(?:[0-9a-fA-F]{8}|[0-9a-fA-F]{6}|[0-9a-fA-F]{3,4})\b")
                    .expect("valid hex regex"),
                exclusions: &[],
                context: None,
            },
            Rule {
                kind: RuleKind::HardcodedRgb,
                name: "Hardcoded RGB/RGBA colors",
                severity: Severity::Error,
                pattern: Regex::new(r"\brgba?\([^)]*\)").expect("valid rgb regex"),
                exclusions: &[],
                context: None,
            },
            Rule {
                kind: RuleKind::HardcodedHsl,
                name: "Hardcoded HSL colors",
                severity: Severity::Error,
                pattern: Regex::new(r"\bhsla?\([^)]*\)").expect("valid hsl regex"),
                exclusions: &[],
                context: None,
            },
            Rule {
                kind: RuleKind::MediaQueryMagicNumber,
                name: "Magic numbers in media queries",
                severity: Severity::Warning,
                pattern: Regex::new(r"\(\s*(?:min|max)-width\s*:\s*(\d+)px\s*\)")
                    .expect("valid media query regex"),
                exclusions: &[],
                context: Some("@media"),
            },
        ]
    }

    pub fn applies_to(&self, line: &str) -> bool {
        if let Some(context) = self.context {
            if !line.contains(context) {
                return false;
            }
        }
        !self.exclusions.iter().any(|e| line.contains(e))
    }

    pub fn message(&self, matched: &str) -> String {
        match self.kind {
            RuleKind::HardcodedPixels => {
                format!("Hardcoded pixel value '{}' should use a spacing or size token", matched)
            }
            RuleKind::HardcodedHex | RuleKind::HardcodedRgb | RuleKind::HardcodedHsl => {
                format!("Hardcoded color '{}' should use a color token", matched)
            }
            RuleKind::MediaQueryMagicNumber => {
                format!("Media query '{}' should use a breakpoint token", matched)
            }
        }
    }

    pub fn suggestions(&self, caps: &Captures<'_>) -> Vec<String> {
        match self.kind {
            RuleKind::HardcodedPixels => lookup(SPACING_SCALE, caps.get(1).map(|m| m.as_str()))
                .map(|token| vec![format!("var(--{})", token)])
                .unwrap_or_default(),
            RuleKind::HardcodedHex => hex_suggestions(&caps[0]),
            RuleKind::HardcodedRgb | RuleKind::HardcodedHsl => GENERIC_COLOR_SUGGESTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            RuleKind::MediaQueryMagicNumber => {
                lookup(BREAKPOINT_SCALE, caps.get(1).map(|m| m.as_str()))
                    .map(|token| vec![format!("${}", token)])
                    .unwrap_or_default()
            }
        }
    }
}

fn lookup(scale: &[(u32, &'static str)], value: Option<&str>) -> Option<&'static str> {
    let value: u32 = value?.parse().ok()?;
    scale.iter().find(|(px, _)| *px == value).map(|(_, t)| *t)
}

fn hex_suggestions(hex: &str) -> Vec<String> {
    let hex = hex.to_lowercase();
    if hex.starts_with("#fff") {
        vec!["var(--color-white)".to_string()]
    } else if hex.starts_with("#000") {
        vec!["var(--color-black)".to_string()]
    } else {
        GENERIC_COLOR_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
    }
}
