//! Collection status: sync metadata and schema.

use articlesync_core::{FieldDescriptor, ManagedCollection, PersistedSyncMetadata};
use clap::Args;
use serde::Serialize;

use super::{open_collection, CommandError, OutputFormat};
use crate::config::Config;

/// Show the collection's sync metadata, fields and item count
#[derive(Args)]
pub struct StatusCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct StatusReport {
    collection_path: String,
    data_source_id: Option<String>,
    slug_field_id: Option<String>,
    item_count: usize,
    fields: Vec<FieldDescriptor>,
}

impl StatusCommand {
    pub async fn run(&self, config: &Config) -> Result<(), CommandError> {
        let collection = open_collection(config);
        let metadata = PersistedSyncMetadata::load(&collection).await?;

        let report = StatusReport {
            collection_path: collection.path().display().to_string(),
            data_source_id: metadata.data_source_id,
            slug_field_id: metadata.slug_field_id,
            item_count: collection.get_item_ids().await?.len(),
            fields: collection.get_fields().await?,
        };

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => print!("{}", render_text(&report)),
        }

        Ok(())
    }
}

fn render_text(report: &StatusReport) -> String {
    let mut out = String::new();
    out.push_str("Collection Status\n");
    out.push_str("=================\n\n");
    out.push_str(&format!("Collection:  {}\n", report.collection_path));

    match (&report.data_source_id, &report.slug_field_id) {
        (Some(source), Some(slug)) => {
            out.push_str(&format!("Data source: {}\n", source));
            out.push_str(&format!("Slug field:  {}\n", slug));
        }
        _ => out.push_str("Data source: not configured (run 'articlesync setup')\n"),
    }
    out.push_str(&format!("Items:       {}\n", report.item_count));

    if !report.fields.is_empty() {
        out.push_str("\nFields:\n");
        for field in &report.fields {
            out.push_str(&format!(
                "  - {} ({}, {})\n",
                field.name, field.id, field.field_type
            ));
        }
    }
    out
}
