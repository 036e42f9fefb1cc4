//! Whitecat Board Simulation Library
//!
//! This crate provides a simulation layer for exercising the board supervisor
//! without physical hardware. It includes:
//!
//! - **SimBus**: a shared, scriptable view of the serial ports "plugged in"
//! - **SimEnumerator** / **SimAttacher**: supervisor collaborators backed by the bus
//! - **RecordingNotifier**: keeps every event the supervisor emits
//!
//! # Example
//!
//! ```rust
//! use wc_sim::{SimBoard, SimBus};
//!
//! let bus = SimBus::new();
//! bus.plug(SimBoard::new("/dev/ttyUSB0", 0x10c4, 0xea60));
//!
//! let enumerator = bus.enumerator();
//! let attacher = bus.attacher();
//!
//! // Hand both to a Supervisor, then unplug the board to simulate removal
//! bus.unplug("/dev/ttyUSB0");
//! # let _ = (enumerator, attacher);
//! ```

pub mod board;
pub mod bus;
pub mod notifier;

pub use board::{AttachBehavior, SimBoard};
pub use bus::{SimAttacher, SimBus, SimEnumerator, SimLink};
pub use notifier::RecordingNotifier;
