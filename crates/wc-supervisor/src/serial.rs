//! Serial-port attachment to real boards
//!
//! Opens the matched port with an explicit timeout and keeps it open for as
//! long as the board is attached. Liveness is checked by asking the driver
//! how many bytes are waiting, which fails as soon as the USB device is
//! unplugged and never blocks.

use std::time::Duration;

use serialport::{ClearBuffer, SerialPort};
use tracing::{debug, info};
use wc_detect::SerialPortInfo;

use crate::attach::{Attacher, BoardLink};
use crate::error::SupervisorError;

/// Configuration for serial attachment
#[derive(Debug, Clone)]
pub struct SerialAttachConfig {
    /// Baud rate used by the board's console
    pub baud_rate: u32,
    /// Read/write timeout applied to the opened port
    pub timeout: Duration,
    /// Delay after opening before the port is used
    pub settle_delay: Duration,
}

impl Default for SerialAttachConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115_200,
            timeout: Duration::from_millis(100),
            settle_delay: Duration::from_millis(50),
        }
    }
}

/// A board attached over a serial port
pub struct SerialBoard {
    name: String,
    port: Box<dyn SerialPort>,
}

impl BoardLink for SerialBoard {
    fn port_name(&self) -> &str {
        &self.name
    }

    fn probe(&mut self) -> Result<(), SupervisorError> {
        self.port.bytes_to_read()?;
        Ok(())
    }
}

impl Drop for SerialBoard {
    fn drop(&mut self) {
        debug!("Closing serial port {}", self.name);
    }
}

/// Attaches boards by opening their serial port
pub struct SerialAttacher {
    config: SerialAttachConfig,
}

impl SerialAttacher {
    /// Create an attacher with default configuration
    pub fn new() -> Self {
        Self {
            config: SerialAttachConfig::default(),
        }
    }

    /// Create an attacher with custom configuration
    pub fn with_config(config: SerialAttachConfig) -> Self {
        Self { config }
    }
}

impl Default for SerialAttacher {
    fn default() -> Self {
        Self::new()
    }
}

impl Attacher for SerialAttacher {
    type Link = SerialBoard;

    fn attach(&mut self, info: &SerialPortInfo) -> Result<SerialBoard, SupervisorError> {
        debug!("Attaching {} at {} baud", info.port, self.config.baud_rate);

        let port = serialport::new(&info.port, self.config.baud_rate)
            .timeout(self.config.timeout)
            .open()
            .map_err(|e| SupervisorError::OpenFailed {
                port: info.port.clone(),
                reason: e.to_string(),
            })?;

        // Give the port a moment to settle
        std::thread::sleep(self.config.settle_delay);
        port.clear(ClearBuffer::Input)?;

        info!("Board attached on {}", info.port);
        Ok(SerialBoard {
            name: info.port.clone(),
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_config_default() {
        let config = SerialAttachConfig::default();
        assert_eq!(config.baud_rate, 115_200);
        assert_eq!(config.timeout, Duration::from_millis(100));
    }

    #[test]
    fn test_attach_missing_port_fails() {
        let mut attacher = SerialAttacher::with_config(SerialAttachConfig {
            settle_delay: Duration::ZERO,
            ..Default::default()
        });
        let info = SerialPortInfo::usb("/dev/wc-agent-no-such-port", 0x10c4, 0xea60);

        let err = attacher.attach(&info).err().expect("attach must fail");
        assert!(matches!(err, SupervisorError::OpenFailed { ref port, .. } if port == &info.port));
    }
}
