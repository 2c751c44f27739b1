use crate::types::{Category, TokenDocument, TokenSet, ValidationResult};
use tracing::debug;

/// Expected keys for one category
#[derive(Debug, Clone, Copy)]
pub struct CategorySchema {
    pub category: Category,
    pub keys: &'static [&'static str],
}

/// Required categories and the canonical keys each one should define
pub const TOKEN_SCHEMA: &[CategorySchema] = &[
    CategorySchema {
        category: Category::Colors,
        keys: &[
            "color-primary",
            "color-secondary",
            "color-success",
            "color-warning",
            "color-error",
            "color-info",
            "color-background",
            "color-surface",
            "color-text-primary",
            "color-text-secondary",
            "color-border",
        ],
    },
    CategorySchema {
        category: Category::Spacing,
        keys: &[
            "spacing-xs",
            "spacing-sm",
            "spacing-md",
            "spacing-lg",
            "spacing-xl",
        ],
    },
    CategorySchema {
        category: Category::Typography,
        keys: &[
            "font-family-base",
            "font-size-sm",
            "font-size-md",
            "font-size-lg",
            "font-weight-regular",
            "font-weight-bold",
            "line-height-base",
        ],
    },
    CategorySchema {
        category: Category::Effects,
        keys: &["shadow-sm", "shadow-md", "shadow-lg"],
    },
    CategorySchema {
        category: Category::Sizes,
        keys: &["size-sm", "size-md", "size-lg"],
    },
    CategorySchema {
        category: Category::Breakpoints,
        keys: &[
            "breakpoint-sm",
            "breakpoint-md",
            "breakpoint-lg",
            "breakpoint-xl",
        ],
    },
];

/// Checks token documents against a fixed schema.
///
/// Only a category missing outright makes a document invalid. Missing keys
/// are warnings and unexpected keys are informational.
pub struct SchemaValidator {
    schema: &'static [CategorySchema],
}

impl SchemaValidator {
    pub fn new() -> Self {
        Self {
            schema: TOKEN_SCHEMA,
        }
    }

    pub fn validate(&self, document: &TokenDocument) -> ValidationResult {
        let mut result = ValidationResult {
            is_valid: true,
            ..Default::default()
        };

        for entry in self.schema {
            let name = entry.category.as_str();
            let Some(present) = document.get(name) else {
                result.is_valid = false;
                result.errors.push(format!("Missing category: {}", name));
                continue;
            };

            for key in entry.keys {
                if !present.contains_key(*key) {
                    let path = format!("{}.{}", name, key);
                    result.warnings.push(format!("Missing token: {}", path));
                    result.missing_tokens.push(path);
                }
            }

            for key in present.keys() {
                if !entry.keys.contains(&key.as_str()) {
                    result.extra_tokens.push(format!("{}.{}", name, key));
                }
            }
        }

        debug!(
            "Validation: valid={}, {} errors, {} warnings, {} extra",
            result.is_valid,
            result.errors.len(),
            result.warnings.len(),
            result.extra_tokens.len()
        );

        result
    }

    /// A typed set always carries all six categories, so this never reports
    /// a missing category.
    pub fn validate_tokens(&self, tokens: &TokenSet) -> ValidationResult {
        self.validate(&tokens.to_document())
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}
