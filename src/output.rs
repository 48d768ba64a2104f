//! Table and JSON output formatting for CLI commands.
//!
//! Entities are rendered generically: each is serialized with `serde_json` and
//! the visible fields of its descriptor become the table columns, titled with
//! the field titles.

use serde::Serialize;
use tabled::builder::Builder;

use prodctl_core::result::AppResult;
use prodctl_core::types::descriptor::{EntityDescriptor, FieldDef};
use prodctl_core::types::pagination::PageResponse;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a list of entities in the selected format
pub fn print_list<T: Serialize>(
    items: &[T],
    descriptor: &EntityDescriptor,
    format: OutputFormat,
) -> AppResult<()> {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", render_table(items, descriptor)?);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(items)?),
    }
    Ok(())
}

/// Print one page of entities followed by its position
pub fn print_page<T: Serialize>(
    page: &PageResponse<T>,
    descriptor: &EntityDescriptor,
    format: OutputFormat,
) -> AppResult<()> {
    match format {
        OutputFormat::Table => {
            print_list(&page.items, descriptor, format)?;
            println!(
                "Page {} of {} ({} items, {} per page)",
                page.page, page.total_pages, page.total_items, page.page_size
            );
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(page)?),
    }
    Ok(())
}

/// Print a single entity in the selected format
pub fn print_item<T: Serialize>(
    item: &T,
    descriptor: &EntityDescriptor,
    format: OutputFormat,
) -> AppResult<()> {
    match format {
        OutputFormat::Table => {
            let value = serde_json::to_value(item)?;
            for field in visible_fields(descriptor) {
                print_kv(field.title, &cell(&value[field.name]));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(item)?),
    }
    Ok(())
}

/// Print the declared fields of an entity
pub fn print_fields(descriptor: &EntityDescriptor, format: OutputFormat) -> AppResult<()> {
    match format {
        OutputFormat::Table => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Title", "Sortable", "Searchable", "Hidden"]);
            for field in descriptor.fields() {
                builder.push_record([
                    field.name.to_string(),
                    field.title.to_string(),
                    yes_no(field.sortable),
                    yes_no(descriptor.is_searchable(field.name)),
                    yes_no(field.hidden),
                ]);
            }
            println!("Table: {}", descriptor.table());
            println!("{}", builder.build());
        }
        OutputFormat::Json => {
            let fields: Vec<serde_json::Value> = descriptor
                .fields()
                .iter()
                .map(|field| {
                    serde_json::json!({
                        "name": field.name,
                        "title": field.title,
                        "description": field.description,
                        "sortable": field.sortable,
                        "searchable": descriptor.is_searchable(field.name),
                        "hidden": field.hidden,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&fields)?);
        }
    }
    Ok(())
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {}", msg);
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{}:", key), value);
}

fn render_table<T: Serialize>(items: &[T], descriptor: &EntityDescriptor) -> AppResult<String> {
    let fields: Vec<&FieldDef> = visible_fields(descriptor).collect();

    let mut builder = Builder::default();
    builder.push_record(fields.iter().map(|f| f.title.to_string()));
    for item in items {
        let value = serde_json::to_value(item)?;
        builder.push_record(fields.iter().map(|f| cell(&value[f.name])));
    }
    Ok(builder.build().to_string())
}

fn visible_fields(descriptor: &EntityDescriptor) -> impl Iterator<Item = &FieldDef> {
    descriptor.fields().iter().filter(|f| !f.hidden)
}

fn cell(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn yes_no(flag: bool) -> String {
    let text = if flag { "yes" } else { "no" };
    text.to_string()
}
