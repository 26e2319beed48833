mod config_cmd;
mod items;
mod setup;
mod status;
mod sync_cmd;

use articlesync_core::{
    ArticlesClient, CancelSignal, FileCollection, HostContext, HostError, HostMode, SyncError,
};
use clap::ValueEnum;

use crate::config::Config;

pub use config_cmd::ConfigCommand;
pub use items::ItemsCommand;
pub use setup::SetupCommand;
pub use status::StatusCommand;
pub use sync_cmd::ResyncCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Opens the managed collection named in the config.
pub fn open_collection(config: &Config) -> FileCollection {
    FileCollection::new(config.collection_path.value.clone())
}

/// Builds the articles client from the API config.
pub fn articles_client(config: &Config) -> ArticlesClient {
    ArticlesClient::new(config.api.endpoint(), config.api.token.clone())
}

/// Host context for a command run in `mode`.
pub fn host_context(mode: HostMode, read_only: bool) -> HostContext {
    if read_only {
        HostContext::read_only(mode)
    } else {
        HostContext::new(mode)
    }
}

/// Cancel signal that fires on Ctrl-C, so an in-flight fetch is abandoned
/// before anything is written.
pub fn interrupt_signal() -> CancelSignal {
    let signal = CancelSignal::new();
    let on_interrupt = signal.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling fetch");
            on_interrupt.cancel();
        }
    });
    signal
}

/// Errors from collection commands
#[derive(Debug)]
pub enum CommandError {
    Sync(SyncError),
    Host(HostError),
    Output(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Sync(e) => write!(f, "{}", e),
            CommandError::Host(e) => write!(f, "{}", e),
            CommandError::Output(e) => write!(f, "Output error: {}", e),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::Sync(e) => Some(e),
            CommandError::Host(e) => Some(e),
            CommandError::Output(_) => None,
        }
    }
}

impl From<SyncError> for CommandError {
    fn from(e: SyncError) -> Self {
        CommandError::Sync(e)
    }
}

impl From<HostError> for CommandError {
    fn from(e: HostError) -> Self {
        CommandError::Host(e)
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(e: serde_json::Error) -> Self {
        CommandError::Output(e.to_string())
    }
}
