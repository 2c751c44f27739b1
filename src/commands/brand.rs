use crate::output;
use anyhow::{bail, Context, Result};
use chrono::Utc;
use colored::Colorize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tokensync_common::SyncConfig;
use tokensync_core::brand::{validate_brand_id, write_brand_config};
use tokensync_core::{BrandRegistry, NewBrand, SchemaValidator, Theme, TokenDocument, ValidationResult};

pub fn create(
    config: &SyncConfig,
    brand: String,
    figma_file: String,
    name: Option<String>,
    description: Option<String>,
) -> Result<i32> {
    let mut registry = BrandRegistry::load(config.registry_path())?;
    let entry = registry
        .create(
            NewBrand {
                id: brand,
                figma_file_key: figma_file,
                name,
                description,
            },
            Utc::now(),
        )?
        .clone();
    registry.save()?;

    let dir = config.brand_dir(&entry.id);
    write_brand_config(&dir, &entry)
        .with_context(|| format!("Failed to write config for brand '{}'", entry.id))?;

    println!(
        "{}",
        format!("✅ Created brand {} ({})", entry.id, entry.name)
            .green()
            .bold()
    );
    println!("📁 {}", dir.display());
    println!(
        "   Next: tokensync brand sync --brand {} --theme light",
        entry.id
    );
    Ok(0)
}

/// Validate every theme JSON the brand has on disk. Exit 1 if any is invalid.
pub fn validate(config: &SyncConfig, brand: &str) -> Result<i32> {
    validate_brand_id(brand)?;
    let dir = config.brand_dir(brand);
    if !dir.is_dir() {
        bail!("Brand directory not found: {}", dir.display());
    }

    let mut checked = 0;
    let mut failed = 0;

    for theme in Theme::ALL {
        let path = dir.join(format!("tokens-{}.json", theme));
        if !path.exists() {
            println!("⏭️  {} / {}: no {}", brand, theme, path.display());
            continue;
        }

        let result = validate_theme_file(&path)
            .with_context(|| format!("Failed to validate {}", path.display()))?;
        output::print_validation(&format!("{} / {}", brand, theme), &result);

        checked += 1;
        if !result.is_valid {
            failed += 1;
        }
    }

    if checked == 0 {
        bail!(
            "No token files found for brand '{}', run `tokensync brand sync --brand {}` first",
            brand,
            brand
        );
    }

    Ok(if failed > 0 { 1 } else { 0 })
}

/// Validate the `tokens` object of a `tokens-<theme>.json` file
pub fn validate_theme_file(path: &Path) -> Result<ValidationResult> {
    let content = fs::read_to_string(path)?;
    let mut json: Value = serde_json::from_str(&content)?;
    let tokens = json
        .get_mut("tokens")
        .map(Value::take)
        .context("missing \"tokens\" field")?;
    let document: TokenDocument = serde_json::from_value(tokens)?;

    Ok(SchemaValidator::new().validate(&document))
}

pub fn list(config: &SyncConfig) -> Result<i32> {
    let registry = BrandRegistry::load(config.registry_path())?;
    if registry.is_empty() {
        println!("No brands registered");
        return Ok(0);
    }

    println!("{}", format!("📚 {} brand(s)", registry.len()).bold());
    for entry in registry.list() {
        let synced = entry
            .last_synced
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());
        println!(
            "  {} {} [{:?}] file={} last synced: {}",
            entry.id.bold(),
            entry.name,
            entry.status,
            entry.figma_file_key,
            synced
        );
        if !entry.description.is_empty() {
            println!("      {}", entry.description.dimmed());
        }
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokensync_core::{emit_json, TokenSet, Category};

    #[test]
    fn test_validate_emitted_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens-light.json");

        let mut tokens = TokenSet::new();
        tokens.insert(Category::Colors, "color-primary", "#228be6");
        fs::write(&path, emit_json(&tokens, "acme", Theme::Light, Utc::now()).unwrap()).unwrap();

        let result = validate_theme_file(&path).unwrap();
        assert!(result.is_valid);
        assert!(result.missing_tokens.contains(&"spacing.spacing-md".to_string()));
    }

    #[test]
    fn test_validate_missing_category() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens-dark.json");
        let doc = json!({
            "brand": "acme",
            "theme": "dark",
            "tokens": { "colors": { "color-primary": "#fff" } }
        });
        fs::write(&path, doc.to_string()).unwrap();

        let result = validate_theme_file(&path).unwrap();
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e == "Missing category: spacing"));
    }

    #[test]
    fn test_validate_without_files_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = SyncConfig::new(dir.path());
        fs::create_dir_all(config.brand_dir("acme")).unwrap();

        assert!(validate(&config, "acme").is_err());
    }

    #[test]
    fn test_validate_rejects_path_brand_id() {
        let dir = tempfile::tempdir().unwrap();
        let config = SyncConfig::new(dir.path().join("project"));
        fs::create_dir_all(dir.path().join("outside")).unwrap();
        fs::write(
            dir.path().join("outside").join("tokens-light.json"),
            r#"{"tokens": {}}"#,
        )
        .unwrap();

        let err = validate(&config, "../../outside").unwrap_err();
        assert!(err.to_string().contains("Invalid brand id"));
    }

    #[test]
    fn test_create_writes_config_and_rejects_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let config = SyncConfig::new(dir.path());

        create(&config, "acme".into(), "KEY".into(), None, None).unwrap();
        assert!(config.brand_dir("acme").join("brand-config.json").exists());
        assert!(config.brand_dir("acme").join("brand.config.ts").exists());

        assert!(create(&config, "acme".into(), "KEY".into(), None, None).is_err());
    }
}
