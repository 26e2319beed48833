//! Resync command: replay the last setup against fresh remote data.

use articlesync_core::{resync_from_metadata, HostMode};
use clap::Args;

use super::{articles_client, host_context, interrupt_signal, open_collection, CommandError};
use crate::config::Config;
use crate::notify::TerminalNotifier;

/// Re-sync the collection using the data source and slug field from the last setup
#[derive(Debug, Args)]
pub struct ResyncCommand {}

impl ResyncCommand {
    pub async fn run(&self, config: &Config, read_only: bool) -> Result<(), CommandError> {
        let collection = open_collection(config);
        let client = articles_client(config);
        let host = host_context(HostMode::SyncManagedCollection, read_only);

        let cancel = interrupt_signal();

        let outcome = resync_from_metadata(
            &collection,
            &client,
            &host,
            &TerminalNotifier,
            Some(&cancel),
        )
        .await?;

        if outcome.did_sync {
            println!("✓ Collection synced ({})", collection.path().display());
        } else {
            println!("Collection not synced.");
            if !collection.exists() {
                println!("Run 'articlesync setup' first to import articles.");
            }
        }

        Ok(())
    }
}
