mod config;

pub use config::{SyncConfig, DEFAULT_FIGMA_API_BASE};

/// Common error types
#[derive(thiserror::Error, Debug)]
pub enum TokenSyncError {
    #[error("Figma authentication error: {0}")]
    FigmaAuth(String),

    #[error("Figma API error ({status}): {body}")]
    FigmaApi { status: u16, body: String },

    #[error("Failed to parse Figma response: {0}")]
    FigmaParse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Brand error: {0}")]
    Brand(String),
}

pub type Result<T> = std::result::Result<T, TokenSyncError>;
