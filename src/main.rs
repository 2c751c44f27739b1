//! tokensync: keeps SCSS design tokens in step with Figma variables.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use cli::{BrandCommands, Cli, Commands};
use colored::Colorize;
use tokensync_common::SyncConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = SyncConfig::from_env(&cli.project_root);

    match run(cli.command, &config).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {:#}", "❌ Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// RUST_LOG wins over `-v`
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Commands, config: &SyncConfig) -> Result<i32> {
    match command {
        Commands::Sync => commands::sync::run(config).await,

        Commands::SyncBrand {
            brand,
            theme,
            validate,
            generate,
        } => commands::sync::run_brand(config, &brand, theme, validate, generate).await,

        Commands::Brand { command } => match command {
            BrandCommands::Create {
                brand,
                figma_file,
                name,
                description,
            } => commands::brand::create(config, brand, figma_file, name, description),
            BrandCommands::Validate { brand } => commands::brand::validate(config, &brand),
            BrandCommands::Sync { brand, theme } => {
                commands::sync::run_brand(config, &brand, theme, false, true).await
            }
            BrandCommands::List => commands::brand::list(config),
        },

        Commands::ValidateCompliance { dir, format } => {
            commands::compliance::run(config, dir, format)
        }

        Commands::GenerateThemes => commands::themes::run(config),
    }
}
