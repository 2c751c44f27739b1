use crate::client::FigmaApi;
use crate::extractor::{Extraction, TokenExtractor};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokensync_common::{Result, SyncConfig};
use tokensync_core::brand::validate_brand_id;
use tokensync_core::emitter::backup_file;
use tokensync_core::{
    apply_to_scss, BrandFiles, BrandRegistry, BrandWriter, ChangeSet, SchemaValidator, Theme,
    TokenDiffer, TokenReader, TokenSet, ValidationResult,
};
use tracing::{debug, info, warn};

/// Flags for a brand-scoped sync
#[derive(Debug, Clone, Copy, Default)]
pub struct BrandSyncOptions {
    pub theme: Theme,
    pub validate: bool,
    pub generate: bool,
}

/// Result of syncing the canonical `_tokens.scss`
#[derive(Debug, Clone)]
pub struct SourceSyncReport {
    pub extraction: Extraction,
    pub changes: ChangeSet,
    pub merged: TokenSet,
    pub backup: Option<PathBuf>,
    pub written: Vec<PathBuf>,
}

/// Result of a brand-scoped sync
#[derive(Debug, Clone)]
pub struct BrandSyncReport {
    pub brand: String,
    pub theme: Theme,
    pub extraction: Extraction,
    pub changes: ChangeSet,
    pub merged: TokenSet,
    pub validation: Option<ValidationResult>,
    pub files: Option<BrandFiles>,
}

/// Fetch → extract → validate → diff/merge → emit
pub struct TokenSync<'a> {
    api: Arc<dyn FigmaApi>,
    config: &'a SyncConfig,
}

impl<'a> TokenSync<'a> {
    pub fn new(api: Arc<dyn FigmaApi>, config: &'a SyncConfig) -> Self {
        Self { api, config }
    }

    /// Pull variables and the document tree, then normalize them for `theme`
    pub async fn fetch_tokens(&self, file_key: &str, theme: Theme) -> Result<Extraction> {
        let variables = self.api.fetch_variables(file_key).await?;
        let file = self.api.fetch_file(file_key).await?;
        debug!(
            "Fetched '{}' with {} variables",
            file.name,
            variables.meta.variables.len()
        );

        let extraction = TokenExtractor::new(theme).extract(Some(&variables), Some(&file));
        for diagnostic in &extraction.diagnostics.entries {
            warn!("Skipped Figma variable {}: {}", diagnostic.name, diagnostic.detail);
        }
        Ok(extraction)
    }

    /// Sync the canonical token file in place.
    ///
    /// The file is backed up before it is rewritten, and only rewritten when
    /// something changed. The JSON snapshots under `tokens/` are always written.
    pub async fn sync_source(&self, now: DateTime<Utc>) -> Result<SourceSyncReport> {
        let (_, file_key) = self.config.require_figma()?;
        let extraction = self.fetch_tokens(file_key, Theme::Light).await?;

        // Light mode is diffed against the light declarations only; dark
        // overrides are never rewritten.
        let tokens_path = self.config.tokens_scss();
        let original = if tokens_path.exists() {
            fs::read_to_string(&tokens_path)?
        } else {
            warn!("Token file {:?} not found, starting from an empty token set", tokens_path);
            String::new()
        };
        let current = TokenReader::new().parse_themed(&original).light;
        let (changes, merged) = TokenDiffer::new().diff(&extraction.tokens, &current);

        let mut written = Vec::new();
        let mut backup = None;

        if changes.has_changes() {
            backup = backup_file(&tokens_path, now)?;
            if let Some(parent) = tokens_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&tokens_path, apply_to_scss(&original, &changes))?;
            written.push(tokens_path.clone());
        } else {
            info!("Token file is up to date");
        }

        let out_dir = self.config.tokens_output_dir();
        fs::create_dir_all(&out_dir)?;

        let figma_json = out_dir.join("figma-tokens.json");
        let snapshot = json!({
            "generatedAt": now,
            "fileKey": file_key,
            "tokens": extraction.tokens,
        });
        fs::write(&figma_json, serde_json::to_string_pretty(&snapshot)?)?;
        written.push(figma_json);

        let merged_json = out_dir.join("tokens.json");
        fs::write(&merged_json, serde_json::to_string_pretty(&merged)?)?;
        written.push(merged_json);

        info!(
            "Sync complete: {} change(s), {} file(s) written",
            changes.total_changes(),
            written.len()
        );

        Ok(SourceSyncReport {
            extraction,
            changes,
            merged,
            backup,
            written,
        })
    }

    /// Sync one theme of one brand against its existing `_tokens-<theme>.scss`.
    ///
    /// Validation problems never abort the run. A registered brand gets its
    /// `lastSynced` stamp updated.
    pub async fn sync_brand(
        &self,
        brand: &str,
        file_key: &str,
        options: BrandSyncOptions,
        now: DateTime<Utc>,
    ) -> Result<BrandSyncReport> {
        validate_brand_id(brand)?;
        let extraction = self.fetch_tokens(file_key, options.theme).await?;

        let validation = options.validate.then(|| {
            let result = SchemaValidator::new().validate_tokens(&extraction.tokens);
            for warning in &result.warnings {
                debug!("{}", warning);
            }
            if !result.is_valid {
                warn!("Extracted tokens failed validation: {}", result.errors.join(", "));
            }
            result
        });

        let brand_dir = self.config.brand_dir(brand);
        let current_path = brand_dir.join(format!("_tokens-{}.scss", options.theme));
        let current = TokenReader::new().read(&current_path)?;
        let (changes, merged) = TokenDiffer::new().diff(&extraction.tokens, &current);

        let files = if options.generate {
            let writer = BrandWriter::new(self.config.brands_dir());
            Some(writer.write(brand, options.theme, &merged, now)?)
        } else {
            None
        };

        let registry_path = self.config.registry_path();
        let mut registry = BrandRegistry::load(&registry_path)?;
        if registry.get(brand).is_some() {
            registry.mark_synced(brand, now)?;
            registry.save()?;
        } else {
            debug!("Brand {} is not in the registry, skipping lastSynced update", brand);
        }

        Ok(BrandSyncReport {
            brand: brand.to_string(),
            theme: options.theme,
            extraction,
            changes,
            merged,
            validation,
            files,
        })
    }
}
