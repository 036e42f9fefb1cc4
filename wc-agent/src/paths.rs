//! Application paths
//!
//! Resolves where the agent binary lives and where it keeps its data. The
//! data directory and its `tmp` subdirectory are created on startup; both
//! may already exist.

use std::path::{Path, PathBuf};

use crate::error::AgentError;

/// Name of the per-user data folder on desktop platforms
pub const APP_DATA_NAME: &str = "The Whitecat Create Agent";

/// Resolved application paths
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Absolute path of the running executable
    pub exe: PathBuf,
    /// Folder containing the executable
    pub app_folder: PathBuf,
    /// Per-user data directory
    pub data_dir: PathBuf,
    /// Scratch directory under the data directory
    pub tmp_dir: PathBuf,
}

impl AppPaths {
    /// Resolve paths for the current user and create the data directories
    pub fn resolve() -> Result<Self, AgentError> {
        let exe = std::env::current_exe().map_err(AgentError::Executable)?;
        let app_folder = exe
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));
        let home = dirs::home_dir().ok_or(AgentError::NoHomeDir)?;

        let paths = Self::in_home(exe, app_folder, &home, std::env::consts::OS);
        paths.create_dirs()?;
        Ok(paths)
    }

    fn in_home(exe: PathBuf, app_folder: PathBuf, home: &Path, os: &str) -> Self {
        let data_dir = data_dir_in(home, os);
        let tmp_dir = data_dir.join("tmp");
        Self {
            exe,
            app_folder,
            data_dir,
            tmp_dir,
        }
    }

    /// Create the data and tmp directories if they are missing
    pub fn create_dirs(&self) -> Result<(), AgentError> {
        for dir in [&self.data_dir, &self.tmp_dir] {
            std::fs::create_dir_all(dir).map_err(|source| AgentError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Log file used with `-lf`
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("log.txt")
    }

    /// Settings file
    pub fn settings_file(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }
}

/// Data directory for `os` under `home`
fn data_dir_in(home: &Path, os: &str) -> PathBuf {
    match os {
        "macos" => home
            .join("Library")
            .join("Application Support")
            .join(APP_DATA_NAME),
        "windows" => home.join("AppData").join(APP_DATA_NAME),
        _ => home.join(".whitecat-create-agent"),
    }
}
