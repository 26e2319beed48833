use std::io;
use std::path::PathBuf;

/// Errors raised by a managed collection implementation.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// I/O error reading or writing the collection file.
    #[error("I/O error for {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    /// The collection file exists but cannot be decoded.
    #[error("Failed to load collection {}: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },

    /// The host refused the call.
    #[error("Host rejected the operation: {0}")]
    Rejected(String),
}
