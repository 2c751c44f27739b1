use crate::reader::{ThemedTokens, TokenReader};
use crate::types::{Category, TokenSet};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tokensync_common::Result;
use tracing::info;

/// Render `themes.ts` from themed tokens.
///
/// The dark theme is the light set overlaid with the dark overrides.
pub fn render_theme_module(themed: &ThemedTokens) -> Result<String> {
    let dark = themed.light.overlaid_with(&themed.dark);
    let mut out = String::new();

    out.push_str("// Auto-generated by `tokensync generate-themes` from _tokens.scss.\n");
    out.push_str("// Do not edit by hand.\n\n");

    out.push_str("export interface ThemeTokens {\n");
    for category in Category::ALL {
        let _ = writeln!(out, "  {}: Record<string, string>;", category);
    }
    out.push_str("}\n\n");

    render_theme(&mut out, "lightTheme", &themed.light)?;
    out.push('\n');
    render_theme(&mut out, "darkTheme", &dark)?;
    out.push('\n');

    out.push_str("export const themes = {\n  light: lightTheme,\n  dark: darkTheme,\n} as const;\n\n");
    out.push_str("export type ThemeName = keyof typeof themes;\n");

    Ok(out)
}

fn render_theme(out: &mut String, name: &str, tokens: &TokenSet) -> Result<()> {
    let _ = writeln!(out, "export const {}: ThemeTokens = {{", name);
    for category in Category::ALL {
        let map = tokens.category(category);
        if map.is_empty() {
            let _ = writeln!(out, "  {}: {{}},", category);
            continue;
        }
        let _ = writeln!(out, "  {}: {{", category);
        for (key, value) in map {
            let _ = writeln!(
                out,
                "    {}: {},",
                serde_json::to_string(key)?,
                serde_json::to_string(value)?
            );
        }
        out.push_str("  },\n");
    }
    out.push_str("};\n");
    Ok(())
}

/// Regenerate the theme module from a token file, unconditionally overwriting it
pub fn generate_themes(tokens_scss: &Path, output: &Path) -> Result<ThemedTokens> {
    let content = fs::read_to_string(tokens_scss)?;
    let themed = TokenReader::new().parse_themed(&content);

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, render_theme_module(&themed)?)?;

    info!(
        "Generated {:?} ({} light tokens, {} dark overrides)",
        output,
        themed.light.len(),
        themed.dark.len()
    );
    Ok(themed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"
:root {
  --color-background: #ffffff;
  --color-text: #212529;
  --font-family-base: "Inter", sans-serif;
}

[data-theme="dark"] {
  --color-background: #1a1b1e;
}
"#;

    #[test]
    fn test_render_theme_module() {
        let themed = TokenReader::new().parse_themed(SOURCE);
        let module = render_theme_module(&themed).unwrap();

        assert!(module.contains("export interface ThemeTokens {"));
        assert!(module.contains("export const lightTheme: ThemeTokens = {"));
        assert!(module.contains("    \"font-family-base\": \"\\\"Inter\\\", sans-serif\","));
        assert!(module.contains("  spacing: {},"));
        assert!(module.contains("export type ThemeName = keyof typeof themes;"));

        let dark_start = module.find("export const darkTheme").unwrap();
        let dark = &module[dark_start..];
        assert!(dark.contains("\"color-background\": \"#1a1b1e\""));
        assert!(dark.contains("\"color-text\": \"#212529\""));
    }

    #[test]
    fn test_generate_themes_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let scss = dir.path().join("_tokens.scss");
        let out = dir.path().join("nested").join("themes.ts");
        fs::write(&scss, SOURCE).unwrap();

        let themed = generate_themes(&scss, &out).unwrap();
        assert_eq!(themed.light.len(), 3);
        assert!(fs::read_to_string(out).unwrap().contains("darkTheme"));
    }

    #[test]
    fn test_generate_themes_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let result = generate_themes(&dir.path().join("missing.scss"), &dir.path().join("t.ts"));
        assert!(result.is_err());
    }
}
