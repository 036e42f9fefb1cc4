//! Serial port scanner
//!
//! This module provides serial port enumeration.

use serialport::{available_ports, SerialPortType};
use tracing::{debug, trace};

use crate::catalog::DeviceDescriptor;
use crate::error::DetectError;

/// Information about a serial port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialPortInfo {
    /// Port name (e.g., /dev/ttyUSB0, COM3)
    pub port: String,
    /// USB Vendor ID (if USB)
    pub vid: Option<u16>,
    /// USB Product ID (if USB)
    pub pid: Option<u16>,
    /// USB serial number (if available)
    pub serial_number: Option<String>,
    /// USB manufacturer string
    pub manufacturer: Option<String>,
    /// USB product string
    pub product: Option<String>,
}

impl SerialPortInfo {
    /// A port without USB identity
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            vid: None,
            pid: None,
            serial_number: None,
            manufacturer: None,
            product: None,
        }
    }

    /// A USB port reporting the given VID/PID
    pub fn usb(port: impl Into<String>, vid: u16, pid: u16) -> Self {
        Self {
            vid: Some(vid),
            pid: Some(pid),
            ..Self::new(port)
        }
    }

    /// Create from serialport crate's port info
    fn from_serialport(name: String, port_type: &SerialPortType) -> Self {
        match port_type {
            SerialPortType::UsbPort(usb) => Self {
                port: name,
                vid: Some(usb.vid),
                pid: Some(usb.pid),
                serial_number: usb.serial_number.clone(),
                manufacturer: usb.manufacturer.clone(),
                product: usb.product.clone(),
            },
            _ => Self::new(name),
        }
    }

    /// USB VID/PID, or `None` when the OS reports no USB identity
    pub fn usb_vid_pid(&self) -> Option<(u16, u16)> {
        self.vid.zip(self.pid)
    }

    /// Canonical descriptor for this port.
    ///
    /// Ports without a USB identity, or reporting a zero vendor or product
    /// id, have no usable identity.
    pub fn identity(&self) -> Option<DeviceDescriptor> {
        match self.usb_vid_pid() {
            Some((vid, pid)) if vid != 0 && pid != 0 => Some(DeviceDescriptor::from_ids(vid, pid)),
            _ => None,
        }
    }
}

/// Source of serial port snapshots
pub trait PortEnumerator {
    /// List the serial ports currently visible to the OS
    fn list_ports(&self) -> Result<Vec<SerialPortInfo>, DetectError>;
}

/// Serial port scanner configuration
#[derive(Debug, Clone, Default)]
pub struct ScannerConfig {
    /// Skip ports matching these patterns
    pub skip_patterns: Vec<String>,
}

/// Serial port scanner backed by the OS
pub struct PortScanner {
    config: ScannerConfig,
}

impl PortScanner {
    /// Create a new scanner with default configuration
    pub fn new() -> Self {
        Self {
            config: ScannerConfig {
                skip_patterns: vec![
                    // Bluetooth ports on macOS
                    "Bluetooth".to_string(),
                    // Debug/logging ports
                    "debug".to_string(),
                ],
            },
        }
    }

    /// Create a scanner with custom configuration
    pub fn with_config(config: ScannerConfig) -> Self {
        Self { config }
    }

    /// Enumerate all available serial ports
    pub fn enumerate_ports(&self) -> Result<Vec<SerialPortInfo>, DetectError> {
        let ports = available_ports().map_err(|e| DetectError::EnumerationFailed(e.to_string()))?;

        let result: Vec<_> = ports
            .into_iter()
            .map(|p| SerialPortInfo::from_serialport(p.port_name, &p.port_type))
            .filter(|p| !self.should_skip_port(p))
            .collect();

        trace!("Found {} serial port(s)", result.len());
        for port in &result {
            if let Some((vid, pid)) = port.usb_vid_pid() {
                trace!("  {} - {:04x}:{:04x}", port.port, vid, pid);
            } else {
                trace!("  {} - no USB identity", port.port);
            }
        }

        Ok(result)
    }

    /// Check if a port should be skipped
    fn should_skip_port(&self, port: &SerialPortInfo) -> bool {
        let skip = self
            .config
            .skip_patterns
            .iter()
            .any(|pattern| port.port.contains(pattern.as_str()));
        if skip {
            debug!("Skipping port {}", port.port);
        }
        skip
    }
}

impl Default for PortScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl PortEnumerator for PortScanner {
    fn list_ports(&self) -> Result<Vec<SerialPortInfo>, DetectError> {
        self.enumerate_ports()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serialport::UsbPortInfo;

    #[test]
    fn test_serial_port_info_from_usb() {
        let usb_info = SerialPortType::UsbPort(UsbPortInfo {
            vid: 0x10C4,
            pid: 0xEA60,
            serial_number: Some("0001".to_string()),
            manufacturer: Some("Silicon Labs".to_string()),
            product: Some("CP2102 USB to UART Bridge Controller".to_string()),
        });

        let info = SerialPortInfo::from_serialport("/dev/ttyUSB0".to_string(), &usb_info);

        assert_eq!(info.usb_vid_pid(), Some((0x10C4, 0xEA60)));
        assert_eq!(
            info.identity(),
            Some(DeviceDescriptor::parse("0x10c4", "0xea60").unwrap())
        );
        assert_eq!(info.manufacturer.as_deref(), Some("Silicon Labs"));
    }

    #[test]
    fn test_non_usb_port_has_no_identity() {
        let info = SerialPortInfo::from_serialport("/dev/ttyS0".to_string(), &SerialPortType::Unknown);

        assert_eq!(info.usb_vid_pid(), None);
        assert_eq!(info.identity(), None);
    }

    #[test]
    fn test_zero_ids_have_no_identity() {
        assert_eq!(SerialPortInfo::usb("/dev/ttyACM0", 0, 0xea60).identity(), None);
        assert_eq!(SerialPortInfo::usb("/dev/ttyACM0", 0x10c4, 0).identity(), None);
    }

    #[test]
    fn test_skip_patterns() {
        let scanner = PortScanner::new();

        assert!(scanner.should_skip_port(&SerialPortInfo::new("/dev/tty.Bluetooth-Incoming-Port")));
        assert!(!scanner.should_skip_port(&SerialPortInfo::new("/dev/tty.SLAB_USBtoUART")));

        let permissive = PortScanner::with_config(ScannerConfig::default());
        assert!(!permissive.should_skip_port(&SerialPortInfo::new("/dev/tty.Bluetooth-Incoming-Port")));
    }
}
