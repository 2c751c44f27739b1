use crate::output;
use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use std::sync::Arc;
use tokensync_common::{SyncConfig, TokenSyncError};
use tokensync_core::{BrandRegistry, Theme};
use tokensync_figma::{BrandSyncOptions, FigmaApi, FigmaClient, TokenSync};
use tracing::debug;

pub async fn run(config: &SyncConfig) -> Result<i32> {
    config.require_figma()?;
    let api: Arc<dyn FigmaApi> = Arc::new(FigmaClient::from_config(config)?);

    println!("{}", "🔄 Syncing design tokens from Figma...".cyan().bold());

    let report = TokenSync::new(api, config)
        .sync_source(Utc::now())
        .await
        .context("Token sync failed")?;

    output::print_extraction(&report.extraction);
    output::print_changes(&report.changes);

    if let Some(backup) = &report.backup {
        println!("💾 Backup: {}", backup.display());
    }
    for path in &report.written {
        println!("📝 Wrote {}", path.display());
    }

    if report.changes.has_changes() {
        println!("{}", "✅ Tokens synced".green().bold());
    } else {
        println!("{}", "✅ Tokens already up to date".green().bold());
    }
    Ok(0)
}

pub async fn run_brand(
    config: &SyncConfig,
    brand: &str,
    theme: Theme,
    validate: bool,
    generate: bool,
) -> Result<i32> {
    let file_key = resolve_file_key(config, brand)?;
    let api: Arc<dyn FigmaApi> = Arc::new(FigmaClient::from_config(config)?);

    println!(
        "{}",
        format!("🔄 Syncing brand {} ({} theme)...", brand, theme)
            .cyan()
            .bold()
    );

    let options = BrandSyncOptions {
        theme,
        validate,
        generate,
    };
    let report = TokenSync::new(api, config)
        .sync_brand(brand, &file_key, options, Utc::now())
        .await
        .with_context(|| format!("Sync failed for brand '{}'", brand))?;

    output::print_extraction(&report.extraction);
    output::print_changes(&report.changes);

    if let Some(validation) = &report.validation {
        output::print_validation(&format!("{} / {}", brand, theme), validation);
    }

    if let Some(files) = &report.files {
        println!("📝 Wrote {}", files.scss.display());
        println!("📝 Wrote {}", files.json.display());
        println!("📝 Wrote {}", files.combined.display());
    }

    println!("{}", format!("✅ Brand {} synced", brand).green().bold());
    Ok(0)
}

/// The registry's key for the brand, falling back to FIGMA_FILE_KEY
fn resolve_file_key(config: &SyncConfig, brand: &str) -> Result<String> {
    let registry = BrandRegistry::load(config.registry_path())?;
    if let Some(entry) = registry.get(brand) {
        debug!("Using registry file key for brand {}", brand);
        return Ok(entry.figma_file_key.clone());
    }

    config.figma_file_key.clone().ok_or_else(|| {
        TokenSyncError::FigmaAuth(format!(
            "Brand '{}' is not registered and FIGMA_FILE_KEY is not set",
            brand
        ))
        .into()
    })
}
