//! Category inference from token names.
//!
//! Both the SCSS reader and the Figma extractor place tokens by substring
//! matching on names. The rules live here as pure functions with a fixed
//! precedence so the ambiguous cases can be tested on their own.

use crate::types::Category;

/// Figma variable value type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedType {
    Color,
    Float,
    String,
    Boolean,
}

/// How the value of a classified Figma variable should be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    Color,
    Pixels,
    Number,
    Verbatim,
}

/// Classify a custom property name from an SCSS file.
///
/// Returns `None` when nothing matched; callers default to colors.
pub fn classify_property(name: &str) -> Option<Category> {
    let name = name.trim_start_matches("--").to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| name.contains(n));

    if name.starts_with("color-") {
        Some(Category::Colors)
    } else if has(&["spacing", "margin", "padding"]) {
        Some(Category::Spacing)
    } else if has(&["font", "text", "line-height"]) {
        Some(Category::Typography)
    } else if has(&["shadow", "blur", "opacity"]) {
        Some(Category::Effects)
    } else if has(&["size", "width", "height"]) {
        Some(Category::Sizes)
    } else if has(&["breakpoint", "media"]) {
        Some(Category::Breakpoints)
    } else {
        None
    }
}

/// Classify a Figma variable by name, owning collection and value type.
///
/// Precedence for floats: "spacing" (name or collection), then "size" (name
/// or collection), then `font-size` / `line-height` in the name. A float named
/// `font-size-md` therefore lands in sizes unless its collection says spacing.
pub fn classify_variable(
    name: &str,
    collection: &str,
    resolved_type: ResolvedType,
) -> Option<(Category, ValueFormat)> {
    let name = name.to_lowercase();
    let collection = collection.to_lowercase();
    let mentions = |needle: &str| name.contains(needle) || collection.contains(needle);

    match resolved_type {
        ResolvedType::Color => Some((Category::Colors, ValueFormat::Color)),
        ResolvedType::Float => {
            if mentions("spacing") {
                Some((Category::Spacing, ValueFormat::Pixels))
            } else if mentions("size") {
                Some((Category::Sizes, ValueFormat::Pixels))
            } else if name.contains("font-size") {
                Some((Category::Typography, ValueFormat::Pixels))
            } else if name.contains("line-height") {
                Some((Category::Typography, ValueFormat::Number))
            } else {
                None
            }
        }
        ResolvedType::String => {
            if name.contains("font-family") {
                Some((Category::Typography, ValueFormat::Verbatim))
            } else {
                None
            }
        }
        ResolvedType::Boolean => None,
    }
}

/// Lowercase, collapse every run of non-alphanumerics into a single `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
