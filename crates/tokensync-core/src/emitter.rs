use crate::types::{Category, Theme, TokenSet};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tokensync_common::Result;
use tracing::info;

/// Prefix of the one header line that changes between otherwise identical runs
pub const GENERATED_AT_PREFIX: &str = "// Generated at: ";

/// Selector a brand/theme pair is scoped under
pub fn brand_selector(brand: &str, theme: Theme) -> String {
    match theme {
        Theme::Light => format!("[data-brand=\"{}\"]", brand),
        Theme::Dark => format!("[data-brand=\"{}\"][data-theme=\"dark\"]", brand),
    }
}

/// Render a token set as a single brand-scoped rule block
pub fn emit_scss(tokens: &TokenSet, brand: &str, theme: Theme, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "// Design tokens for brand \"{}\" ({} theme)", brand, theme);
    let _ = writeln!(out, "// Do not edit by hand: regenerate with `tokensync sync-brand`");
    let _ = writeln!(
        out,
        "{}{}",
        GENERATED_AT_PREFIX,
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    out.push('\n');
    let _ = writeln!(out, "{} {{", brand_selector(brand, theme));

    let mut first = true;
    for category in Category::ALL {
        let map = tokens.category(category);
        if map.is_empty() {
            continue;
        }
        if !first {
            out.push('\n');
        }
        first = false;

        let _ = writeln!(out, "  // {}", category.title());
        for (key, value) in map {
            let _ = writeln!(out, "  --{}: {};", category.canonical_key(key), value);
        }
    }

    out.push_str("}\n");
    out
}

/// Render a token set as a JSON document
pub fn emit_json(tokens: &TokenSet, brand: &str, theme: Theme, generated_at: DateTime<Utc>) -> Result<String> {
    let document = json!({
        "brand": brand,
        "theme": theme,
        "generatedAt": generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        "tokens": tokens,
    });
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Paths written by a single [`BrandWriter::write`] call
#[derive(Debug, Clone)]
pub struct BrandFiles {
    pub scss: PathBuf,
    pub json: PathBuf,
    pub combined: PathBuf,
}

/// Writes brand-scoped token files under `brands/<brand>/`
pub struct BrandWriter {
    brands_dir: PathBuf,
}

impl BrandWriter {
    pub fn new(brands_dir: impl Into<PathBuf>) -> Self {
        Self {
            brands_dir: brands_dir.into(),
        }
    }

    pub fn brand_dir(&self, brand: &str) -> PathBuf {
        self.brands_dir.join(brand)
    }

    /// Write `_tokens-<theme>.scss`, `tokens-<theme>.json` and `tokens.json`.
    ///
    /// The combined `tokens.json` holds only the theme written by this call;
    /// the other theme is an empty object.
    pub fn write(
        &self,
        brand: &str,
        theme: Theme,
        tokens: &TokenSet,
        generated_at: DateTime<Utc>,
    ) -> Result<BrandFiles> {
        let dir = self.brand_dir(brand);
        fs::create_dir_all(&dir)?;

        let scss = dir.join(format!("_tokens-{}.scss", theme));
        fs::write(&scss, emit_scss(tokens, brand, theme, generated_at))?;

        let json_path = dir.join(format!("tokens-{}.json", theme));
        fs::write(&json_path, emit_json(tokens, brand, theme, generated_at)?)?;

        let themed = |t: Theme| {
            if t == theme {
                serde_json::to_value(tokens)
            } else {
                Ok(json!({}))
            }
        };
        let combined_doc = json!({
            "brand": brand,
            "generatedAt": generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            "light": themed(Theme::Light)?,
            "dark": themed(Theme::Dark)?,
        });
        let combined = dir.join("tokens.json");
        fs::write(&combined, serde_json::to_string_pretty(&combined_doc)?)?;

        info!("Wrote {} tokens for brand {} ({} theme) to {:?}", tokens.len(), brand, theme, dir);

        Ok(BrandFiles {
            scss,
            json: json_path,
            combined,
        })
    }
}

/// Drop the generation timestamp line so two renders can be compared
pub fn strip_generated_at(scss: &str) -> String {
    scss.lines()
        .filter(|l| !l.starts_with(GENERATED_AT_PREFIX))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Copy `path` to `<stem>.backup.<timestamp>.<ext>` next to it
pub fn backup_file(path: &Path, at: DateTime<Utc>) -> Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("backup");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("bak");
    let backup = path.with_file_name(format!(
        "{}.backup.{}.{}",
        stem,
        at.format("%Y%m%dT%H%M%S"),
        ext
    ));
    fs::copy(path, &backup)?;
    info!("Backed up {:?} to {:?}", path, backup);
    Ok(Some(backup))
}
