use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub type TokenMap = BTreeMap<String, String>;

/// Untyped view of a token set as it appears in JSON. Categories may be absent here.
pub type TokenDocument = BTreeMap<String, TokenMap>;

/// The six fixed token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Colors,
    Spacing,
    Typography,
    Effects,
    Sizes,
    Breakpoints,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Colors,
        Category::Spacing,
        Category::Typography,
        Category::Effects,
        Category::Sizes,
        Category::Breakpoints,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Colors => "colors",
            Category::Spacing => "spacing",
            Category::Typography => "typography",
            Category::Effects => "effects",
            Category::Sizes => "sizes",
            Category::Breakpoints => "breakpoints",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Prefix put in front of keys when they become custom properties
    pub fn prefix(&self) -> &'static str {
        match self {
            Category::Colors => "color-",
            Category::Spacing => "spacing-",
            Category::Typography | Category::Effects => "",
            Category::Sizes => "size-",
            Category::Breakpoints => "breakpoint-",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::Colors => "Colors",
            Category::Spacing => "Spacing",
            Category::Typography => "Typography",
            Category::Effects => "Effects",
            Category::Sizes => "Sizes",
            Category::Breakpoints => "Breakpoints",
        }
    }

    /// Canonical key form: the custom property name without `--`.
    ///
    /// Idempotent, so keys read back from SCSS and keys produced from Figma
    /// names end up in the same shape.
    pub fn canonical_key(&self, key: &str) -> String {
        let key = key.trim_start_matches("--");
        let prefix = self.prefix();
        if prefix.is_empty() || key.starts_with(prefix) {
            key.to_string()
        } else {
            format!("{}{}", prefix, key)
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}', expected light or dark", other)),
        }
    }
}

/// Full collection of tokens for one theme of one brand
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    #[serde(default)]
    pub colors: TokenMap,
    #[serde(default)]
    pub spacing: TokenMap,
    #[serde(default)]
    pub typography: TokenMap,
    #[serde(default)]
    pub effects: TokenMap,
    #[serde(default)]
    pub sizes: TokenMap,
    #[serde(default)]
    pub breakpoints: TokenMap,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self, category: Category) -> &TokenMap {
        match category {
            Category::Colors => &self.colors,
            Category::Spacing => &self.spacing,
            Category::Typography => &self.typography,
            Category::Effects => &self.effects,
            Category::Sizes => &self.sizes,
            Category::Breakpoints => &self.breakpoints,
        }
    }

    pub fn category_mut(&mut self, category: Category) -> &mut TokenMap {
        match category {
            Category::Colors => &mut self.colors,
            Category::Spacing => &mut self.spacing,
            Category::Typography => &mut self.typography,
            Category::Effects => &mut self.effects,
            Category::Sizes => &mut self.sizes,
            Category::Breakpoints => &mut self.breakpoints,
        }
    }

    pub fn get(&self, category: Category, key: &str) -> Option<&str> {
        self.category(category).get(key).map(String::as_str)
    }

    /// Insert or overwrite, returning the previous value
    pub fn insert(
        &mut self,
        category: Category,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.category_mut(category).insert(key.into(), value.into())
    }

    /// Insert only if the key is not present yet. Returns whether it was inserted.
    pub fn insert_if_absent(
        &mut self,
        category: Category,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> bool {
        let map = self.category_mut(category);
        let key = key.into();
        if map.contains_key(&key) {
            return false;
        }
        map.insert(key, value.into());
        true
    }

    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.category(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All `(category, key, value)` triples in category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &str, &str)> + '_ {
        Category::ALL.into_iter().flat_map(move |c| {
            self.category(c)
                .iter()
                .map(move |(k, v)| (c, k.as_str(), v.as_str()))
        })
    }

    pub fn to_document(&self) -> TokenDocument {
        Category::ALL
            .iter()
            .map(|c| (c.as_str().to_string(), self.category(*c).clone()))
            .collect()
    }

    /// Build from an untyped document. Unknown categories are ignored.
    pub fn from_document(document: &TokenDocument) -> Self {
        let mut tokens = Self::new();
        for (name, map) in document {
            if let Some(category) = Category::from_name(name) {
                tokens.category_mut(category).extend(map.clone());
            }
        }
        tokens
    }

    /// Overlay `other` on top of `self`
    pub fn overlaid_with(&self, other: &TokenSet) -> TokenSet {
        let mut merged = self.clone();
        for (category, key, value) in other.iter() {
            merged.insert(category, key, value);
        }
        merged
    }
}

/// Value transition recorded for an updated token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueChange {
    pub from: String,
    pub to: String,
}

/// Classification of every incoming token relative to a baseline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub added: BTreeMap<String, String>,
    pub updated: BTreeMap<String, ValueChange>,
    pub unchanged: BTreeMap<String, String>,
}

impl ChangeSet {
    pub fn path(category: Category, key: &str) -> String {
        format!("{}.{}", category, key)
    }

    /// Split a `category.key` path back into its parts
    pub fn split_path(path: &str) -> Option<(Category, &str)> {
        let (category, key) = path.split_once('.')?;
        Some((Category::from_name(category)?, key))
    }

    pub fn total_changes(&self) -> usize {
        self.added.len() + self.updated.len()
    }

    pub fn has_changes(&self) -> bool {
        self.total_changes() > 0
    }
}

/// Outcome of checking a token document against the schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub missing_tokens: Vec<String>,
    pub extra_tokens: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// No category matched; the token was placed in a fallback category
    Unclassified,
    /// The token could not be placed anywhere and was left out
    Dropped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub name: String,
    pub detail: String,
}

/// Side channel for classification outcomes that would otherwise be silent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: DiagnosticKind, name: impl Into<String>, detail: impl Into<String>) {
        self.entries.push(Diagnostic {
            kind,
            name: name.into(),
            detail: detail.into(),
        });
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }
}
