use anyhow::{Context, Result};
use colored::Colorize;
use tokensync_common::SyncConfig;
use tokensync_core::themes::generate_themes;

pub fn run(config: &SyncConfig) -> Result<i32> {
    let source = config.tokens_scss();
    let output = config.themes_ts();

    let themed = generate_themes(&source, &output)
        .with_context(|| format!("Failed to generate themes from {}", source.display()))?;

    println!(
        "{}",
        format!(
            "✅ Generated {} ({} tokens, {} dark overrides)",
            output.display(),
            themed.light.len(),
            themed.dark.len()
        )
        .green()
        .bold()
    );
    Ok(0)
}
