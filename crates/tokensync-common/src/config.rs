use crate::{Result, TokenSyncError};
use std::path::PathBuf;

pub const DEFAULT_FIGMA_API_BASE: &str = "https://api.figma.com";

/// Process-wide settings, built once at startup and passed by reference.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub figma_token: Option<String>,
    pub figma_file_key: Option<String>,
    pub api_base_url: String,
    pub project_root: PathBuf,
}

impl SyncConfig {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            figma_token: None,
            figma_file_key: None,
            api_base_url: DEFAULT_FIGMA_API_BASE.to_string(),
            project_root: project_root.into(),
        }
    }

    /// Read `FIGMA_API_TOKEN` and `FIGMA_FILE_KEY`. Empty values count as unset.
    pub fn from_env(project_root: impl Into<PathBuf>) -> Self {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        Self {
            figma_token: non_empty("FIGMA_API_TOKEN"),
            figma_file_key: non_empty("FIGMA_FILE_KEY"),
            ..Self::new(project_root)
        }
    }

    pub fn with_file_key(mut self, key: impl Into<String>) -> Self {
        self.figma_file_key = Some(key.into());
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn require_token(&self) -> Result<&str> {
        self.figma_token.as_deref().ok_or_else(|| {
            TokenSyncError::FigmaAuth("FIGMA_API_TOKEN environment variable not set".to_string())
        })
    }

    /// Pre-flight credential check. Runs before any network call.
    pub fn require_figma(&self) -> Result<(&str, &str)> {
        let token = self.require_token()?;
        let file_key = self.figma_file_key.as_deref().ok_or_else(|| {
            TokenSyncError::FigmaAuth("FIGMA_FILE_KEY environment variable not set".to_string())
        })?;
        Ok((token, file_key))
    }

    pub fn styles_dir(&self) -> PathBuf {
        self.project_root.join("src").join("styles")
    }

    /// Canonical source token file
    pub fn tokens_scss(&self) -> PathBuf {
        self.styles_dir().join("_tokens.scss")
    }

    pub fn themes_ts(&self) -> PathBuf {
        self.styles_dir().join("themes.ts")
    }

    pub fn components_dir(&self) -> PathBuf {
        self.project_root.join("src").join("components")
    }

    pub fn brands_dir(&self) -> PathBuf {
        self.project_root.join("brands")
    }

    pub fn registry_path(&self) -> PathBuf {
        self.brands_dir().join("brand-registry.json")
    }

    pub fn brand_dir(&self, brand: &str) -> PathBuf {
        self.brands_dir().join(brand)
    }

    pub fn tokens_output_dir(&self) -> PathBuf {
        self.project_root.join("tokens")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_figma_missing_token() {
        let config = SyncConfig::new(".").with_file_key("abc");
        let err = config.require_figma().unwrap_err();
        assert!(matches!(err, TokenSyncError::FigmaAuth(_)));
        assert!(err.to_string().contains("FIGMA_API_TOKEN"));
    }

    #[test]
    fn test_require_figma_missing_file_key() {
        let mut config = SyncConfig::new(".");
        config.figma_token = Some("secret".to_string());
        let err = config.require_figma().unwrap_err();
        assert!(err.to_string().contains("FIGMA_FILE_KEY"));
    }

    #[test]
    fn test_derived_paths() {
        let config = SyncConfig::new("/repo");
        assert_eq!(config.tokens_scss(), PathBuf::from("/repo/src/styles/_tokens.scss"));
        assert_eq!(
            config.registry_path(),
            PathBuf::from("/repo/brands/brand-registry.json")
        );
        assert_eq!(config.brand_dir("acme"), PathBuf::from("/repo/brands/acme"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = SyncConfig::new(".").with_api_base_url("http://127.0.0.1:9999/");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9999");
    }
}
