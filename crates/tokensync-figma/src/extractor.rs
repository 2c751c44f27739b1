use crate::color::{format_number, to_css_color};
use crate::types::{
    FigmaFileResponse, FigmaNode, FigmaVariable, FigmaVariablesResponse, VariableCollection,
    VariableValue, VariablesMeta,
};
use tokensync_core::{
    classify_variable, slugify, Category, DiagnosticKind, Diagnostics, Theme, TokenSet, ValueFormat,
};
use tracing::{debug, info};

const MAX_ALIAS_DEPTH: usize = 8;

/// Normalized tokens plus everything that could not be placed
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub tokens: TokenSet,
    pub diagnostics: Diagnostics,
    pub from_variables: usize,
    pub from_nodes: usize,
}

/// Maps Figma variables (and, as a fallback, visual nodes) onto a token set
pub struct TokenExtractor {
    theme: Theme,
}

impl TokenExtractor {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn extract(
        &self,
        variables: Option<&FigmaVariablesResponse>,
        file: Option<&FigmaFileResponse>,
    ) -> Extraction {
        let mut extraction = Extraction::default();

        if let Some(variables) = variables {
            self.extract_variables(variables, &mut extraction);
        }

        if extraction.tokens.colors.is_empty() {
            if let Some(file) = file {
                debug!("No color variables found, walking document nodes");
                let before = extraction.tokens.len();
                walk_node(&file.document, &mut extraction.tokens);
                extraction.from_nodes = extraction.tokens.len() - before;
            }
        }

        info!(
            "Extracted {} tokens ({} from variables, {} from nodes, {} dropped)",
            extraction.tokens.len(),
            extraction.from_variables,
            extraction.from_nodes,
            extraction.diagnostics.count(DiagnosticKind::Dropped)
        );

        extraction
    }

    fn extract_variables(&self, response: &FigmaVariablesResponse, extraction: &mut Extraction) {
        let meta = &response.meta;

        for variable in meta.variables.values() {
            let collection = meta.variable_collections.get(&variable.variable_collection_id);
            let collection_name = collection.map(|c| c.name.as_str()).unwrap_or("");
            let slug = slugify(&variable.name);

            if slug.is_empty() {
                extraction.diagnostics.push(
                    DiagnosticKind::Dropped,
                    &variable.name,
                    "name has no alphanumeric characters",
                );
                continue;
            }

            let Some((category, format)) =
                classify_variable(&slug, collection_name, variable.resolved_type.into())
            else {
                extraction.diagnostics.push(
                    DiagnosticKind::Dropped,
                    &variable.name,
                    format!(
                        "{:?} variable in collection '{}' matched no category",
                        variable.resolved_type, collection_name
                    ),
                );
                continue;
            };

            let value = match self.resolve_value(variable, meta, 0) {
                Some(value) => value,
                None => {
                    extraction.diagnostics.push(
                        DiagnosticKind::Dropped,
                        &variable.name,
                        "no value for the selected mode, or alias could not be resolved",
                    );
                    continue;
                }
            };

            match render_value(&value, format) {
                Some(rendered) => {
                    let key = category.canonical_key(&slug);
                    if let Some(previous) = extraction.tokens.insert(category, key.clone(), rendered) {
                        extraction.diagnostics.push(
                            DiagnosticKind::Dropped,
                            &variable.name,
                            format!(
                                "{}.{} was already set to '{}' by another variable and was replaced",
                                category, key, previous
                            ),
                        );
                    } else {
                        extraction.from_variables += 1;
                    }
                }
                None => extraction.diagnostics.push(
                    DiagnosticKind::Dropped,
                    &variable.name,
                    format!("value does not fit the {} category", category),
                ),
            }
        }
    }

    /// Pick the value for this theme's mode, following aliases
    fn resolve_value(
        &self,
        variable: &FigmaVariable,
        meta: &VariablesMeta,
        depth: usize,
    ) -> Option<VariableValue> {
        if depth > MAX_ALIAS_DEPTH {
            return None;
        }

        let collection = meta.variable_collections.get(&variable.variable_collection_id);
        let value = select_mode_value(variable, collection, self.theme)?;

        match value {
            VariableValue::Alias(alias) => {
                let target = meta.variables.get(&alias.id)?;
                self.resolve_value(target, meta, depth + 1)
            }
            other => Some(other.clone()),
        }
    }
}

impl Default for TokenExtractor {
    fn default() -> Self {
        Self::new(Theme::Light)
    }
}

/// Mode named after the theme, then the collection default, then whatever comes first
fn select_mode_value<'a>(
    variable: &'a FigmaVariable,
    collection: Option<&VariableCollection>,
    theme: Theme,
) -> Option<&'a VariableValue> {
    if let Some(collection) = collection {
        let themed = collection
            .modes
            .iter()
            .find(|m| m.name.to_lowercase().contains(theme.as_str()));
        if let Some(value) = themed.and_then(|m| variable.values_by_mode.get(&m.mode_id)) {
            return Some(value);
        }
        if let Some(value) = collection
            .default_mode_id
            .as_ref()
            .and_then(|id| variable.values_by_mode.get(id))
        {
            return Some(value);
        }
    }
    variable.values_by_mode.values().next()
}

fn render_value(value: &VariableValue, format: ValueFormat) -> Option<String> {
    match (format, value) {
        (ValueFormat::Color, VariableValue::Color(color)) => Some(to_css_color(color)),
        (ValueFormat::Pixels, VariableValue::Number(n)) => Some(format!("{}px", format_number(*n))),
        (ValueFormat::Number, VariableValue::Number(n)) => Some(format_number(*n)),
        (ValueFormat::Verbatim, VariableValue::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Best-effort tokens from visual nodes. The first node to claim a key wins.
fn walk_node(node: &FigmaNode, tokens: &mut TokenSet) {
    let slug = slugify(&node.name);

    if !slug.is_empty() {
        if let Some(paint) = node.fills.iter().find(|p| p.is_visible_solid()) {
            if let Some(mut color) = paint.color {
                color.a *= paint.opacity.unwrap_or(1.0);
                tokens.insert_if_absent(
                    Category::Colors,
                    Category::Colors.canonical_key(&slug),
                    to_css_color(&color),
                );
            }
        }

        if node.node_type == "TEXT" {
            if let Some(style) = &node.style {
                if let Some(family) = &style.font_family {
                    tokens.insert_if_absent(
                        Category::Typography,
                        format!("font-family-{}", slug),
                        family.clone(),
                    );
                }
                if let Some(size) = style.font_size {
                    tokens.insert_if_absent(
                        Category::Typography,
                        format!("font-size-{}", slug),
                        format!("{}px", format_number(size)),
                    );
                }
                if let Some(weight) = style.font_weight {
                    tokens.insert_if_absent(
                        Category::Typography,
                        format!("font-weight-{}", slug),
                        format_number(weight),
                    );
                }
                if let Some(line_height) = style.line_height_px {
                    tokens.insert_if_absent(
                        Category::Typography,
                        format!("line-height-{}", slug),
                        format!("{}px", format_number(line_height)),
                    );
                }
            }
        }
    }

    for child in &node.children {
        walk_node(child, tokens);
    }
}
