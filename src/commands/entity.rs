//! Read commands shared by every entity.

use std::fmt::Display;
use std::str::FromStr;

use clap::{Args, Subcommand};
use serde::Serialize;

use super::list::ListArgs;
use crate::output::{self, OutputFormat};
use prodctl_core::error::AppError;
use prodctl_core::traits::{Entity, Executor, ReadRepository};
use prodctl_database::SqlRepository;

/// Arguments for entity commands
#[derive(Debug, Args)]
pub struct EntityArgs {
    /// Entity subcommand
    #[command(subcommand)]
    pub command: EntityCommand,
}

/// Entity subcommands
#[derive(Debug, Subcommand)]
pub enum EntityCommand {
    /// List one page of records
    List(ListArgs),
    /// List every record in default order
    All,
    /// Show one record by its identifier
    Get {
        /// Record identifier
        id: String,
    },
    /// Count records, optionally matching a search text
    Count {
        /// Case-insensitive text to search for
        #[arg(long)]
        filter: Option<String>,
    },
    /// Show the declared fields
    Fields,
}

/// Execute an entity command against its repository
pub async fn execute<E, X>(
    repo: &SqlRepository<E, X>,
    args: &EntityArgs,
    format: OutputFormat,
) -> Result<(), AppError>
where
    E: Entity + Serialize,
    E::Id: FromStr,
    <E::Id as FromStr>::Err: Display,
    X: Executor,
{
    let descriptor = E::descriptor();

    match &args.command {
        EntityCommand::List(list) => {
            let page = repo.get_page(&list.to_request(repo.limits())).await?;
            output::print_page(&page, descriptor, format)?;
        }
        EntityCommand::All => {
            let items = repo.get_all().await?;
            output::print_list(&items, descriptor, format)?;
        }
        EntityCommand::Get { id } => {
            let id = parse_id::<E>(id)?;
            let item = repo.get_by_id(&id).await?.ok_or_else(|| {
                AppError::not_found(format!("No record in {} with id '{}'", descriptor.table(), id))
            })?;
            output::print_item(&item, descriptor, format)?;
        }
        EntityCommand::Count { filter } => {
            let total = repo.count(filter.as_deref()).await?;
            match format {
                OutputFormat::Table => println!("{total}"),
                OutputFormat::Json => println!("{}", serde_json::json!({ "total": total })),
            }
        }
        EntityCommand::Fields => output::print_fields(descriptor, format)?,
    }

    Ok(())
}

fn parse_id<E>(raw: &str) -> Result<E::Id, AppError>
where
    E: Entity,
    E::Id: FromStr,
    <E::Id as FromStr>::Err: Display,
{
    raw.parse()
        .map_err(|e| AppError::validation(format!("Invalid identifier '{raw}': {e}")))
}
