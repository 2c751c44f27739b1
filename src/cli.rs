use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tokensync_core::Theme;

#[derive(Parser)]
#[command(
    name = "tokensync",
    about = "Sync design tokens from Figma into SCSS and check components for hardcoded styles",
    version
)]
pub struct Cli {
    /// Project root containing src/styles, src/components and brands/
    #[arg(long, global = true, default_value = ".")]
    pub project_root: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sync src/styles/_tokens.scss with the Figma file in FIGMA_FILE_KEY
    Sync,

    /// Sync one theme of one brand
    SyncBrand {
        /// Brand id
        #[arg(long)]
        brand: String,

        /// Theme to sync
        #[arg(long, default_value = "light")]
        theme: Theme,

        /// Validate the extracted tokens against the token schema
        #[arg(long)]
        validate: bool,

        /// Write the brand's SCSS and JSON files
        #[arg(long)]
        generate: bool,
    },

    /// Manage the brand registry
    Brand {
        #[command(subcommand)]
        command: BrandCommands,
    },

    /// Scan component stylesheets for hardcoded values
    ValidateCompliance {
        /// Directory to scan (defaults to src/components)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Regenerate src/styles/themes.ts from src/styles/_tokens.scss
    GenerateThemes,
}

#[derive(Subcommand)]
pub enum BrandCommands {
    /// Register a brand and write its config files
    Create {
        #[arg(long)]
        brand: String,

        /// Figma file key holding the brand's variables
        #[arg(long = "figma-file")]
        figma_file: String,

        /// Display name (defaults to the title-cased id)
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Validate the brand's generated token files
    Validate {
        #[arg(long)]
        brand: String,
    },

    /// Sync a registered brand and regenerate its files
    Sync {
        #[arg(long)]
        brand: String,

        #[arg(long, default_value = "light")]
        theme: Theme,
    },

    /// List registered brands
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
