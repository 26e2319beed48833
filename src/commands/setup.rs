//! First-time setup: pick fields and import the articles.

use articlesync_core::{configure_collection, FieldSelection, HostMode, ValidationError};
use clap::Args;

use super::{articles_client, host_context, interrupt_signal, open_collection, CommandError};
use crate::config::Config;
use crate::notify::TerminalNotifier;

/// Import articles into the collection and remember the choice for resync
#[derive(Debug, Args)]
pub struct SetupCommand {
    /// Field whose value identifies each article (default: article_id)
    #[arg(long, value_name = "FIELD_ID")]
    slug_field: Option<String>,

    /// Field to import (can be repeated; default: all fields)
    #[arg(long = "field", value_name = "FIELD_ID")]
    fields: Vec<String>,
}

impl SetupCommand {
    fn selection(&self) -> FieldSelection {
        FieldSelection {
            slug_field_id: self.slug_field.clone(),
            field_ids: if self.fields.is_empty() {
                None
            } else {
                Some(self.fields.clone())
            },
        }
    }

    pub async fn run(&self, config: &Config, read_only: bool) -> Result<(), CommandError> {
        let collection = open_collection(config);
        let client = articles_client(config);
        let host = host_context(HostMode::ConfigureManagedCollection, read_only);

        println!("Loading articles from {}...", client.endpoint());
        let cancel = interrupt_signal();

        let summary = configure_collection(
            &collection,
            &client,
            &host,
            &TerminalNotifier,
            &self.selection(),
            Some(&cancel),
        )
        .await?;

        println!();
        println!("  ✓ {} article(s) synced", summary.upserted);
        if summary.removed > 0 {
            println!("  ✓ {} stale article(s) removed", summary.removed);
        }
        if !summary.skipped.is_empty() {
            println!(
                "  ! {} article(s) skipped without a valid slug (index: {})",
                summary.skipped.len(),
                skipped_indices(&summary.skipped)
            );
        }
        println!();
        println!("Collection: {}", collection.path().display());

        Ok(())
    }
}

fn skipped_indices(skipped: &[ValidationError]) -> String {
    skipped
        .iter()
        .map(|e| e.index().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
