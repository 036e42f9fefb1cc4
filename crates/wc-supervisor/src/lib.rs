//! Whitecat Board Supervisor
//!
//! This crate provides the discovery and connection supervisor for the
//! Whitecat agent: a polling loop that scans serial ports for boards listed in
//! the device catalog, attaches to the first one that accepts, and watches
//! that connection until the board is unplugged.
//!
//! # Architecture
//!
//! The supervisor owns the only connection slot. Everything else it talks to
//! sits behind a trait so the loop can be driven against real hardware or a
//! simulated bus:
//!
//! - [`PortEnumerator`](wc_detect::PortEnumerator) lists serial ports
//! - [`Attacher`] claims a matched port and returns a [`BoardLink`]
//! - [`Notifier`] receives `boardUpdate` / `boardDetached` events
//!
//! Two [`ControlFlags`] (pause and stop) may be flipped from any thread; the
//! loop observes them once per iteration.
//!
//! # Example
//!
//! ```rust,no_run
//! use wc_detect::{DeviceCatalog, PortScanner};
//! use wc_supervisor::{ChannelNotifier, ControlFlags, SerialAttacher, Supervisor};
//!
//! let (notifier, _events) = ChannelNotifier::new(64);
//! let flags = ControlFlags::new();
//! let supervisor = Supervisor::new(
//!     DeviceCatalog::default(),
//!     PortScanner::new(),
//!     SerialAttacher::new(),
//!     notifier,
//!     flags.clone(),
//! );
//!
//! let handle = std::thread::spawn(move || supervisor.run());
//! flags.request_stop();
//! handle.join().unwrap();
//! ```

pub mod attach;
pub mod control;
pub mod error;
pub mod events;
pub mod liveness;
pub mod serial;
pub mod supervisor;

pub use attach::{Attacher, BoardLink};
pub use control::{ControlFlags, UpgradeGuard};
pub use error::SupervisorError;
pub use events::{BoardEvent, ChannelNotifier, Notifier};
pub use liveness::Liveness;
pub use serial::{SerialAttachConfig, SerialAttacher, SerialBoard};
pub use supervisor::{Step, Supervisor, SupervisorConfig};
