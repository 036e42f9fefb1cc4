//! Logging setup
//!
//! Installs the tracing subscriber for the chosen run mode. The filter
//! defaults to info for the agent's own crates and can be overridden with
//! `RUST_LOG`.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::AgentError;

const DEFAULT_FILTER: &str = "whitecat_agent=info,wc_detect=info,wc_supervisor=info";

/// Where log output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to a file
    File(PathBuf),
    /// Logging enabled, output thrown away
    Discard,
    /// Standard error
    Stderr,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Install the global subscriber
pub fn init(target: &LogTarget) -> Result<(), AgentError> {
    let registry = tracing_subscriber::registry().with(env_filter());

    let result = match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| AgentError::LogFile {
                    path: path.clone(),
                    source,
                })?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        LogTarget::Discard => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink))
            .try_init(),
        LogTarget::Stderr => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| AgentError::Logging(e.to_string()))
}
