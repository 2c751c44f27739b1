use crate::types::{FigmaFileResponse, FigmaVariablesResponse};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokensync_common::{Result, SyncConfig, TokenSyncError, DEFAULT_FIGMA_API_BASE};
use tracing::{debug, info};

/// Source of Figma file and variable data
#[async_trait]
pub trait FigmaApi: Send + Sync {
    async fn fetch_file(&self, file_key: &str) -> Result<FigmaFileResponse>;

    async fn fetch_variables(&self, file_key: &str) -> Result<FigmaVariablesResponse>;
}

/// Figma REST client. One attempt per request, no retries.
pub struct FigmaClient {
    token: String,
    base_url: String,
    client: reqwest::Client,
}

impl FigmaClient {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(TokenSyncError::FigmaAuth(
                "Figma API token is required".to_string(),
            ));
        }

        Ok(Self {
            token,
            base_url: DEFAULT_FIGMA_API_BASE.to_string(),
            client: reqwest::Client::new(),
        })
    }

    /// Build from config, failing before any network call when the token is absent
    pub fn from_config(config: &SyncConfig) -> Result<Self> {
        let token = config.require_token()?;
        Ok(Self::new(token)?.with_base_url(&config.api_base_url))
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Figma-Token", &self.token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != reqwest::StatusCode::OK {
            return Err(TokenSyncError::FigmaApi {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| TokenSyncError::FigmaParse(e.to_string()))
    }
}

#[async_trait]
impl FigmaApi for FigmaClient {
    async fn fetch_file(&self, file_key: &str) -> Result<FigmaFileResponse> {
        info!("Fetching Figma file {}", file_key);
        self.get_json(&format!("/v1/files/{}", file_key)).await
    }

    async fn fetch_variables(&self, file_key: &str) -> Result<FigmaVariablesResponse> {
        info!("Fetching Figma variables for {}", file_key);
        self.get_json(&format!("/v1/files/{}/variables/local", file_key))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_rejected() {
        assert!(matches!(
            FigmaClient::new("  "),
            Err(TokenSyncError::FigmaAuth(_))
        ));
    }

    #[test]
    fn test_from_config_requires_token() {
        let config = SyncConfig::new(".");
        assert!(matches!(
            FigmaClient::from_config(&config),
            Err(TokenSyncError::FigmaAuth(_))
        ));
    }

    #[tokio::test]
    #[ignore] // Requires FIGMA_API_TOKEN and FIGMA_FILE_KEY
    async fn test_fetch_live_file() {
        let config = SyncConfig::from_env(".");
        let (_, file_key) = config.require_figma().unwrap();
        let client = FigmaClient::from_config(&config).unwrap();
        let file = client.fetch_file(file_key).await;
        assert!(file.is_ok());
    }
}
