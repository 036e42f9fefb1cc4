//! Error types for board detection

use thiserror::Error;

/// Errors that can occur during detection
#[derive(Debug, Error)]
pub enum DetectError {
    /// Failed to enumerate serial ports
    #[error("failed to enumerate ports: {0}")]
    EnumerationFailed(String),

    /// Serial port error
    #[error("serial port error: {0}")]
    SerialPort(#[from] serialport::Error),
}

/// Errors raised while building the device catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Identifier was empty (or only a `0x` prefix)
    #[error("empty {field} id")]
    Empty { field: &'static str },

    /// Identifier contained something other than hex digits
    #[error("invalid {field} id {value:?}: not a hexadecimal number")]
    NotHex { field: &'static str, value: String },

    /// Identifier does not fit in a USB 16-bit id
    #[error("invalid {field} id {value:?}: exceeds 0xffff")]
    OutOfRange { field: &'static str, value: String },
}
