//! Attachment contract
//!
//! The handshake that turns a matched serial port into a board connection is
//! not the supervisor's business. It only needs an [`Attacher`] that either
//! claims the port within a bounded time or declines, and a [`BoardLink`] it
//! can probe cheaply to learn whether the board is still there.

use wc_detect::SerialPortInfo;

use crate::error::SupervisorError;

/// An attached board
pub trait BoardLink {
    /// Name of the serial port the board is attached on
    fn port_name(&self) -> &str;

    /// Non-blocking check that the port is still responsive.
    ///
    /// An error means the device is gone. Implementations must not block.
    fn probe(&mut self) -> Result<(), SupervisorError>;
}

/// Claims matched ports as board connections
pub trait Attacher {
    /// Connection type produced on success
    type Link: BoardLink;

    /// Try to claim `port`.
    ///
    /// Must return in bounded time. On failure the port must be left in a
    /// state where it can be retried on a later scan.
    fn attach(&mut self, port: &SerialPortInfo) -> Result<Self::Link, SupervisorError>;
}

impl<L: BoardLink + ?Sized> BoardLink for Box<L> {
    fn port_name(&self) -> &str {
        (**self).port_name()
    }

    fn probe(&mut self) -> Result<(), SupervisorError> {
        (**self).probe()
    }
}
