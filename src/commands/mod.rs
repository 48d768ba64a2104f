//! CLI command definitions and dispatch.

pub mod entity;
pub mod list;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use prodctl_core::config::AppConfig;
use prodctl_core::error::AppError;
use prodctl_database::{ProductRepository, SpacingRepository, SqlEngine, SqlRepository};

/// Production control: read-only access to products and spacing registrations
#[derive(Debug, Parser)]
#[command(name = "prodctl", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands, one per entity
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Products and their product groups
    Products(entity::EntityArgs),
    /// Spacing registrations per batch
    Spacing(entity::EntityArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        let engine = SqlEngine::connect(&config.database).await?;

        let result = match &self.command {
            Commands::Products(args) => {
                let repo: ProductRepository = SqlRepository::new(engine.clone(), config.pagination);
                entity::execute(&repo, args, self.format).await
            }
            Commands::Spacing(args) => {
                let repo: SpacingRepository = SqlRepository::new(engine.clone(), config.pagination);
                entity::execute(&repo, args, self.format).await
            }
        };

        engine.close().await;
        result
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}
