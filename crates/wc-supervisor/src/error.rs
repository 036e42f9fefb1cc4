//! Error types for the supervisor

use thiserror::Error;

/// Errors that can occur while attaching to or talking with a board
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// Failed to open serial port
    #[error("failed to open port {port}: {reason}")]
    OpenFailed { port: String, reason: String },

    /// The board on the port declined the attachment
    #[error("board on {port} declined attachment: {reason}")]
    Declined { port: String, reason: String },

    /// The attached port stopped answering
    #[error("port {0} is gone")]
    PortGone(String),

    /// Detection error
    #[error("detection error: {0}")]
    Detect(#[from] wc_detect::DetectError),

    /// Serial port error
    #[error("serial port error: {0}")]
    SerialPort(#[from] serialport::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
