use articlesync_core::{CollectionItem, FieldData};
use clap::Args;
use serde_json::Value;

use super::{open_collection, CommandError, OutputFormat};
use crate::config::Config;

/// List the items currently in the collection
#[derive(Args)]
pub struct ItemsCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl ItemsCommand {
    pub fn run(&self, config: &Config) -> Result<(), CommandError> {
        let items = open_collection(config).get_items()?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&items)?),
            OutputFormat::Text => {
                if items.is_empty() {
                    println!("No items.");
                }
                for item in &items {
                    println!("{}", item_line(item));
                }
            }
        }

        Ok(())
    }
}

fn item_line(item: &CollectionItem) -> String {
    let title = display_title(&item.field_data).unwrap_or("(untitled)");
    let draft = if item.draft { " [draft]" } else { "" };
    format!("{}  {}{}", item.slug, title, draft)
}

fn display_title(data: &FieldData) -> Option<&str> {
    match data.get("title").map(|field| &field.value) {
        Some(Value::String(title)) if !title.is_empty() => Some(title.as_str()),
        _ => None,
    }
}
