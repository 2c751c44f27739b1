use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokensync_core::ResolvedType;

/// Response of `GET /v1/files/{key}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaFileResponse {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    pub document: FigmaNode,
}

/// A node of the Figma document tree. Only the fields token extraction needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaNode {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub node_type: String,
    #[serde(default)]
    pub children: Vec<FigmaNode>,
    #[serde(default)]
    pub fills: Vec<Paint>,
    #[serde(default)]
    pub style: Option<TypeStyle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paint {
    #[serde(rename = "type")]
    pub paint_type: String,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub color: Option<RgbaColor>,
}

impl Paint {
    pub fn is_visible_solid(&self) -> bool {
        self.paint_type == "SOLID" && self.visible.unwrap_or(true) && self.color.is_some()
    }
}

/// Color with channels in the 0..=1 range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbaColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub font_weight: Option<f64>,
    #[serde(default)]
    pub line_height_px: Option<f64>,
}

/// Response of `GET /v1/files/{key}/variables/local`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FigmaVariablesResponse {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub error: Option<bool>,
    #[serde(default)]
    pub meta: VariablesMeta,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariablesMeta {
    #[serde(default)]
    pub variables: BTreeMap<String, FigmaVariable>,
    #[serde(default)]
    pub variable_collections: BTreeMap<String, VariableCollection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaVariable {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub resolved_type: VariableType,
    #[serde(default)]
    pub variable_collection_id: String,
    #[serde(default)]
    pub values_by_mode: BTreeMap<String, VariableValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableType {
    Color,
    Float,
    String,
    Boolean,
}

impl From<VariableType> for ResolvedType {
    fn from(t: VariableType) -> Self {
        match t {
            VariableType::Color => ResolvedType::Color,
            VariableType::Float => ResolvedType::Float,
            VariableType::String => ResolvedType::String,
            VariableType::Boolean => ResolvedType::Boolean,
        }
    }
}

/// A per-mode variable value. Aliases point at another variable by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Alias(VariableAlias),
    Color(RgbaColor),
    Boolean(bool),
    Number(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableAlias {
    #[serde(rename = "type")]
    pub alias_type: String,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableCollection {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub modes: Vec<VariableMode>,
    #[serde(default)]
    pub default_mode_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableMode {
    pub mode_id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_variable_values() {
        let json = r#"{
            "id": "VariableID:1",
            "name": "Primary/500",
            "resolvedType": "COLOR",
            "variableCollectionId": "C:1",
            "valuesByMode": {
                "1:0": { "r": 1, "g": 0, "b": 0, "a": 1 },
                "1:1": { "type": "VARIABLE_ALIAS", "id": "VariableID:2" }
            }
        }"#;
        let variable: FigmaVariable = serde_json::from_str(json).unwrap();

        assert_eq!(variable.resolved_type, VariableType::Color);
        assert!(matches!(variable.values_by_mode["1:0"], VariableValue::Color(_)));
        assert!(matches!(
            &variable.values_by_mode["1:1"],
            VariableValue::Alias(alias) if alias.id == "VariableID:2"
        ));
    }

    #[test]
    fn test_deserialize_scalar_values() {
        let number: VariableValue = serde_json::from_str("16").unwrap();
        let text: VariableValue = serde_json::from_str("\"Inter\"").unwrap();
        let flag: VariableValue = serde_json::from_str("true").unwrap();

        assert_eq!(number, VariableValue::Number(16.0));
        assert_eq!(text, VariableValue::String("Inter".to_string()));
        assert_eq!(flag, VariableValue::Boolean(true));
    }

    #[test]
    fn test_deserialize_file_tree() {
        let json = r#"{
            "name": "Design System",
            "document": {
                "id": "0:0",
                "name": "Document",
                "type": "DOCUMENT",
                "children": [{
                    "id": "1:1",
                    "name": "Heading",
                    "type": "TEXT",
                    "fills": [{ "type": "SOLID", "color": { "r": 0, "g": 0, "b": 0 } }],
                    "style": { "fontFamily": "Inter", "fontSize": 32, "fontWeight": 700, "lineHeightPx": 40 }
                }]
            }
        }"#;
        let file: FigmaFileResponse = serde_json::from_str(json).unwrap();
        let heading = &file.document.children[0];

        assert_eq!(heading.node_type, "TEXT");
        assert_eq!(heading.fills[0].color.unwrap().a, 1.0);
        assert!(heading.fills[0].is_visible_solid());
        assert_eq!(heading.style.as_ref().unwrap().font_size, Some(32.0));
    }
}
