//! Agent settings

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;
use wc_detect::DeviceCatalog;
use wc_supervisor::{SerialAttachConfig, SupervisorConfig};

use crate::error::AgentError;

/// Agent settings, stored as JSON in the data directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// USB adapters recognised as boards
    #[serde(default)]
    pub devices: DeviceCatalog,
    /// Baud rate used to open a board's port
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    /// Serial open/read timeout in milliseconds
    #[serde(default = "default_attach_timeout_ms")]
    pub attach_timeout_ms: u64,
    /// Sleep between scans and probes in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Sleep between checks while paused in milliseconds
    #[serde(default = "default_pause_interval_ms")]
    pub pause_interval_ms: u64,
}

fn default_baud_rate() -> u32 {
    115_200
}

fn default_attach_timeout_ms() -> u64 {
    100
}

fn default_poll_interval_ms() -> u64 {
    10
}

fn default_pause_interval_ms() -> u64 {
    500
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            devices: DeviceCatalog::default(),
            baud_rate: default_baud_rate(),
            attach_timeout_ms: default_attach_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            pause_interval_ms: default_pause_interval_ms(),
        }
    }
}

impl Settings {
    /// Load settings from disk, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return Self::default();
        };

        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring invalid settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self, path: &Path) -> Result<(), AgentError> {
        let to_error = |reason: String| AgentError::Settings {
            path: path.to_path_buf(),
            reason,
        };
        let json = serde_json::to_string_pretty(self).map_err(|e| to_error(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| to_error(e.to_string()))
    }

    /// Supervisor timing
    pub fn supervisor_config(&self) -> SupervisorConfig {
        SupervisorConfig {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            pause_interval: Duration::from_millis(self.pause_interval_ms),
        }
    }

    /// Serial attachment parameters
    pub fn attach_config(&self) -> SerialAttachConfig {
        SerialAttachConfig {
            baud_rate: self.baud_rate,
            timeout: Duration::from_millis(self.attach_timeout_ms),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wc_detect::DeviceDescriptor;

    #[test]
    fn test_partial_settings_use_defaults() {
        let json = r#"{ "devices": [{ "VendorId": "0x10C4", "ProductId": "0xEA60" }] }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.devices.len(), 1);
        assert!(settings
            .devices
            .contains(&DeviceDescriptor::from_ids(0x10c4, 0xea60)));
        assert_eq!(settings.baud_rate, 115_200);
        assert_eq!(settings.supervisor_config().pause_interval, Duration::from_millis(500));
    }

    #[test]
    fn test_empty_object_is_default() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("wc-agent-settings-{}.json", std::process::id()));
        let settings = Settings {
            baud_rate: 921_600,
            ..Default::default()
        };

        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_invalid_catalog_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("wc-agent-bad-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "devices": [{ "VendorId": "cp2102", "ProductId": "1" }] }"#).unwrap();

        assert_eq!(Settings::load(&path), Settings::default());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_default() {
        assert_eq!(
            Settings::load(Path::new("/nonexistent/wc-agent/settings.json")),
            Settings::default()
        );
    }

    #[test]
    fn test_attach_config_from_settings() {
        let config = Settings::default().attach_config();
        assert_eq!(config.baud_rate, 115_200);
        assert_eq!(config.timeout, Duration::from_millis(100));
    }
}
