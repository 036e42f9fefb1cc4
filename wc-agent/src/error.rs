//! Startup errors
//!
//! Everything here happens before the supervisor starts; any of these ends
//! the process with a non-zero exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort agent startup
#[derive(Debug, Error)]
pub enum AgentError {
    /// The home directory could not be determined
    #[error("cannot determine the user's home directory")]
    NoHomeDir,

    /// The running executable could not be located
    #[error("cannot locate the agent executable: {0}")]
    Executable(#[source] std::io::Error),

    /// A data directory could not be created
    #[error("cannot create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The log file could not be opened
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A tracing subscriber was already installed
    #[error("cannot initialize logging: {0}")]
    Logging(String),

    /// Settings could not be written
    #[error("cannot save settings to {path}: {reason}")]
    Settings { path: PathBuf, reason: String },

    /// The background instance could not be started
    #[error("cannot start background instance: {0}")]
    Respawn(#[source] std::io::Error),

    /// The async runtime could not be built
    #[error("cannot start runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// The board monitor task panicked
    #[error("board monitor task failed: {0}")]
    Monitor(#[from] tokio::task::JoinError),
}
