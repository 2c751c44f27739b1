use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::json;
use std::fs;
use std::sync::Arc;
use tokensync_common::{Result, SyncConfig, TokenSyncError};
use tokensync_core::{BrandRegistry, BrandStatus, Category, NewBrand, Theme, TokenReader};
use tokensync_figma::{
    BrandSyncOptions, FigmaApi, FigmaFileResponse, FigmaVariablesResponse, TokenSync,
};

/// Serves canned responses instead of calling Figma
struct FakeFigma {
    variables: serde_json::Value,
}

#[async_trait]
impl FigmaApi for FakeFigma {
    async fn fetch_file(&self, _file_key: &str) -> Result<FigmaFileResponse> {
        Ok(serde_json::from_value(json!({
            "name": "Design System",
            "document": { "id": "0:0", "name": "Document", "type": "DOCUMENT" }
        }))?)
    }

    async fn fetch_variables(&self, _file_key: &str) -> Result<FigmaVariablesResponse> {
        Ok(serde_json::from_value(self.variables.clone())?)
    }
}

struct FailingFigma;

#[async_trait]
impl FigmaApi for FailingFigma {
    async fn fetch_file(&self, _file_key: &str) -> Result<FigmaFileResponse> {
        Err(TokenSyncError::FigmaApi {
            status: 404,
            body: "Not found".to_string(),
        })
    }

    async fn fetch_variables(&self, _file_key: &str) -> Result<FigmaVariablesResponse> {
        Err(TokenSyncError::FigmaApi {
            status: 404,
            body: "Not found".to_string(),
        })
    }
}

fn fake() -> Arc<dyn FigmaApi> {
    Arc::new(FakeFigma {
        variables: json!({
            "meta": {
                "variableCollections": {
                    "C:1": {
                        "id": "C:1", "name": "Colors",
                        "modes": [{ "modeId": "l", "name": "Light" }, { "modeId": "d", "name": "Dark" }],
                        "defaultModeId": "l"
                    },
                    "C:2": { "id": "C:2", "name": "Spacing", "modes": [{ "modeId": "s", "name": "Value" }], "defaultModeId": "s" }
                },
                "variables": {
                    "V:1": {
                        "id": "V:1", "name": "Primary", "resolvedType": "COLOR", "variableCollectionId": "C:1",
                        "valuesByMode": {
                            "l": { "r": 0.1333, "g": 0.5451, "b": 0.902, "a": 1 },
                            "d": { "r": 1, "g": 1, "b": 1, "a": 1 }
                        }
                    },
                    "V:2": {
                        "id": "V:2", "name": "md", "resolvedType": "FLOAT", "variableCollectionId": "C:2",
                        "valuesByMode": { "s": 16 }
                    }
                }
            }
        }),
    })
}

fn config(root: &std::path::Path) -> SyncConfig {
    let mut config = SyncConfig::new(root).with_file_key("FILE123");
    config.figma_token = Some("secret".to_string());
    config
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap()
}

#[tokio::test]
async fn test_sync_source_updates_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let tokens_path = config.tokens_scss();
    fs::create_dir_all(tokens_path.parent().unwrap()).unwrap();
    fs::write(
        &tokens_path,
        ":root {\n  --color-primary: #339af0;\n  --radius-sm: 4px;\n}\n",
    )
    .unwrap();

    let sync = TokenSync::new(fake(), &config);
    let report = sync.sync_source(now()).await.unwrap();

    assert_eq!(report.changes.updated.len(), 1);
    assert_eq!(report.changes.added.len(), 1);
    assert!(report.changes.added.contains_key("spacing.spacing-md"));

    let rewritten = fs::read_to_string(&tokens_path).unwrap();
    assert!(rewritten.contains("--color-primary: #228be6;"));
    assert!(rewritten.contains("--spacing-md: 16px;"));
    assert!(rewritten.contains("--radius-sm: 4px;"));

    let backup = report.backup.unwrap();
    assert!(backup
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("_tokens.backup."));
    assert!(fs::read_to_string(backup).unwrap().contains("#339af0"));

    let snapshot: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(config.tokens_output_dir().join("figma-tokens.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(snapshot["tokens"]["colors"]["color-primary"], "#228be6");
}

#[tokio::test]
async fn test_sync_source_without_changes_keeps_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let tokens_path = config.tokens_scss();
    fs::create_dir_all(tokens_path.parent().unwrap()).unwrap();
    let original = ":root {\n  --color-primary: #228be6;\n  --spacing-md: 16px;\n}\n";
    fs::write(&tokens_path, original).unwrap();

    let report = TokenSync::new(fake(), &config).sync_source(now()).await.unwrap();

    assert_eq!(report.changes.total_changes(), 0);
    assert!(report.backup.is_none());
    assert_eq!(fs::read_to_string(&tokens_path).unwrap(), original);
}

#[tokio::test]
async fn test_sync_source_diffs_against_light_declarations() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let tokens_path = config.tokens_scss();
    fs::create_dir_all(tokens_path.parent().unwrap()).unwrap();
    fs::write(
        &tokens_path,
        ":root {\n  --color-primary: #ffffff;\n  --spacing-md: 16px;\n}\n\n[data-theme=\"dark\"] {\n  --color-primary: #228be6;\n}\n",
    )
    .unwrap();

    let report = TokenSync::new(fake(), &config).sync_source(now()).await.unwrap();

    assert_eq!(report.changes.updated.len(), 1);
    assert_eq!(report.changes.updated["colors.color-primary"].from, "#ffffff");
    assert!(report.backup.is_some());

    let rewritten = fs::read_to_string(&tokens_path).unwrap();
    assert_eq!(
        rewritten,
        ":root {\n  --color-primary: #228be6;\n  --spacing-md: 16px;\n}\n\n[data-theme=\"dark\"] {\n  --color-primary: #228be6;\n}\n"
    );
}

#[tokio::test]
async fn test_sync_source_dark_override_is_not_a_change() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let tokens_path = config.tokens_scss();
    fs::create_dir_all(tokens_path.parent().unwrap()).unwrap();
    let original = ":root {\n  --color-primary: #228be6;\n  --spacing-md: 16px;\n}\n.dark {\n  --color-primary: #000000;\n}\n";
    fs::write(&tokens_path, original).unwrap();

    let report = TokenSync::new(fake(), &config).sync_source(now()).await.unwrap();

    assert_eq!(report.changes.total_changes(), 0);
    assert!(report.backup.is_none());
    assert_eq!(fs::read_to_string(&tokens_path).unwrap(), original);
}

#[tokio::test]
async fn test_sync_source_requires_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let config = SyncConfig::new(dir.path());

    let err = TokenSync::new(fake(), &config)
        .sync_source(now())
        .await
        .unwrap_err();
    assert!(matches!(err, TokenSyncError::FigmaAuth(_)));
}

#[tokio::test]
async fn test_api_failure_aborts_sync() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());

    let result = TokenSync::new(Arc::new(FailingFigma), &config)
        .sync_source(now())
        .await;
    assert!(matches!(result, Err(TokenSyncError::FigmaApi { status: 404, .. })));
    assert!(!config.tokens_output_dir().exists());
}

#[tokio::test]
async fn test_sync_brand_generates_files_and_stamps_registry() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());

    let mut registry = BrandRegistry::load(config.registry_path()).unwrap();
    registry
        .create(
            NewBrand {
                id: "acme".to_string(),
                figma_file_key: "FILE123".to_string(),
                name: None,
                description: None,
            },
            now(),
        )
        .unwrap();
    registry.save().unwrap();

    let options = BrandSyncOptions {
        theme: Theme::Dark,
        validate: true,
        generate: true,
    };
    let report = TokenSync::new(fake(), &config)
        .sync_brand("acme", "FILE123", options, now())
        .await
        .unwrap();

    let validation = report.validation.unwrap();
    assert!(validation.is_valid);
    assert!(!validation.warnings.is_empty());

    let files = report.files.unwrap();
    let scss = fs::read_to_string(&files.scss).unwrap();
    assert!(scss.contains("[data-brand=\"acme\"][data-theme=\"dark\"] {"));
    assert!(scss.contains("--color-primary: #ffffff;"));

    let reread = TokenReader::new().read(&files.scss).unwrap();
    assert_eq!(reread.get(Category::Spacing, "spacing-md"), Some("16px"));

    let registry = BrandRegistry::load(config.registry_path()).unwrap();
    let entry = registry.require("acme").unwrap();
    assert_eq!(entry.status, BrandStatus::Synced);
    assert_eq!(entry.last_synced, Some(now()));
}

#[tokio::test]
async fn test_sync_brand_second_run_is_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let options = BrandSyncOptions {
        theme: Theme::Light,
        validate: false,
        generate: true,
    };

    let sync = TokenSync::new(fake(), &config);
    let first = sync.sync_brand("acme", "FILE123", options, now()).await.unwrap();
    assert_eq!(first.changes.added.len(), 2);

    let second = sync.sync_brand("acme", "FILE123", options, now()).await.unwrap();
    assert_eq!(second.changes.total_changes(), 0);
    assert_eq!(second.changes.unchanged.len(), 2);
    assert!(second.validation.is_none());
}

#[tokio::test]
async fn test_sync_brand_rejects_unsafe_brand_id() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("project");
    let config = config(&root);
    let options = BrandSyncOptions {
        theme: Theme::Light,
        validate: false,
        generate: true,
    };

    let result = TokenSync::new(fake(), &config)
        .sync_brand("../../escaped", "FILE123", options, now())
        .await;

    assert!(matches!(result, Err(TokenSyncError::Brand(_))));
    assert!(!dir.path().join("escaped").exists());
    assert!(!root.exists());
}
