//! CLI command implementations.

pub mod browse;
pub mod config;
pub mod list;
pub mod show;
pub mod upload;

use clap::{Args, Subcommand};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Category filter (a category label, or "Semua" for all).
    #[arg(short = 'k', long)]
    pub category: Option<String>,

    /// Case-insensitive name search.
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the upload command.
#[derive(Args)]
pub struct UploadArgs {
    /// Image files or directories of images.
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Write the resulting catalog to this JSON file.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Start with this category filter.
    #[arg(short = 'k', long)]
    pub category: Option<String>,

    /// Write the session's catalog to this JSON file on exit.
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
