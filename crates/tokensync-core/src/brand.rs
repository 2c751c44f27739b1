use crate::types::Theme;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tokensync_common::{Result, TokenSyncError};
use tracing::info;

pub const REGISTRY_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrandStatus {
    Created,
    Synced,
}

/// One brand as persisted in `brands/brand-registry.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandRegistryEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub figma_file_key: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_synced: Option<DateTime<Utc>>,
    pub version: String,
    pub themes: Vec<Theme>,
    pub status: BrandStatus,
}

/// Parameters for [`BrandRegistry::create`]
#[derive(Debug, Clone)]
pub struct NewBrand {
    pub id: String,
    pub figma_file_key: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    brands: BTreeMap<String, BrandRegistryEntry>,
}

/// Brand registry backed by a JSON file. Entries are never deleted.
pub struct BrandRegistry {
    path: PathBuf,
    brands: BTreeMap<String, BrandRegistryEntry>,
}

impl BrandRegistry {
    /// Load the registry, treating a missing file as empty
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let brands = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str::<RegistryFile>(&content)?.brands
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, brands })
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = RegistryFile {
            brands: self.brands.clone(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&BrandRegistryEntry> {
        self.brands.get(id)
    }

    pub fn require(&self, id: &str) -> Result<&BrandRegistryEntry> {
        self.get(id)
            .ok_or_else(|| TokenSyncError::Brand(format!("Brand '{}' is not registered", id)))
    }

    pub fn list(&self) -> impl Iterator<Item = &BrandRegistryEntry> {
        self.brands.values()
    }

    pub fn len(&self) -> usize {
        self.brands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }

    /// Register a new brand. Fails if the id is taken or not a valid slug.
    pub fn create(&mut self, brand: NewBrand, now: DateTime<Utc>) -> Result<&BrandRegistryEntry> {
        validate_brand_id(&brand.id)?;
        if self.brands.contains_key(&brand.id) {
            return Err(TokenSyncError::Brand(format!(
                "Brand '{}' already exists",
                brand.id
            )));
        }
        if brand.figma_file_key.trim().is_empty() {
            return Err(TokenSyncError::Config(
                "A Figma file key is required to create a brand".to_string(),
            ));
        }

        let entry = BrandRegistryEntry {
            name: brand.name.unwrap_or_else(|| title_case(&brand.id)),
            description: brand.description.unwrap_or_default(),
            id: brand.id.clone(),
            figma_file_key: brand.figma_file_key,
            created_at: now,
            last_synced: None,
            version: REGISTRY_VERSION.to_string(),
            themes: Theme::ALL.to_vec(),
            status: BrandStatus::Created,
        };

        info!("Registered brand {}", entry.id);
        Ok(self.brands.entry(brand.id).or_insert(entry))
    }

    /// Stamp a successful sync
    pub fn mark_synced(&mut self, id: &str, now: DateTime<Utc>) -> Result<()> {
        let entry = self
            .brands
            .get_mut(id)
            .ok_or_else(|| TokenSyncError::Brand(format!("Brand '{}' is not registered", id)))?;
        entry.last_synced = Some(now);
        entry.status = BrandStatus::Synced;
        Ok(())
    }
}

/// Brand ids become directory names and `data-brand` values
pub fn validate_brand_id(id: &str) -> Result<()> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !id.starts_with('-');
    if valid {
        Ok(())
    } else {
        Err(TokenSyncError::Brand(format!(
            "Invalid brand id '{}': use lowercase letters, digits and dashes",
            id
        )))
    }
}

fn title_case(id: &str) -> String {
    id.split('-')
        .filter(|p| !p.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write `brand-config.json` and `brand.config.ts` for a freshly created brand
pub fn write_brand_config(dir: &Path, entry: &BrandRegistryEntry) -> Result<()> {
    fs::create_dir_all(dir)?;

    let config = json!({
        "id": entry.id,
        "name": entry.name,
        "description": entry.description,
        "figmaFileKey": entry.figma_file_key,
        "themes": entry.themes,
        "createdAt": entry.created_at,
        "tokens": {
            "light": "./_tokens-light.scss",
            "dark": "./_tokens-dark.scss",
        },
    });
    fs::write(dir.join("brand-config.json"), serde_json::to_string_pretty(&config)?)?;

    let themes = entry
        .themes
        .iter()
        .map(|t| format!("'{}'", t))
        .collect::<Vec<_>>()
        .join(", ");
    let ts = format!(
        "// Generated by tokensync brand create\n\
         export const brandConfig = {{\n  \
         id: {id},\n  \
         name: {name},\n  \
         description: {description},\n  \
         figmaFileKey: {key},\n  \
         themes: [{themes}] as const,\n\
         }};\n\n\
         export default brandConfig;\n",
        id = serde_json::to_string(&entry.id)?,
        name = serde_json::to_string(&entry.name)?,
        description = serde_json::to_string(&entry.description)?,
        key = serde_json::to_string(&entry.figma_file_key)?,
        themes = themes,
    );
    fs::write(dir.join("brand.config.ts"), ts)?;

    Ok(())
}
