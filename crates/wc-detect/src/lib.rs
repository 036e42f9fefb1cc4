//! Whitecat Board Detection Library
//!
//! This crate provides serial port enumeration and the device catalog used
//! to decide which serial adapters may have a Whitecat board behind them.
//!
//! # Example
//!
//! ```rust,no_run
//! use wc_detect::{match_candidates, DeviceCatalog, PortEnumerator, PortScanner};
//!
//! let scanner = PortScanner::new();
//! let catalog = DeviceCatalog::default();
//! let ports = scanner.list_ports().unwrap();
//!
//! for port in match_candidates(&ports, &catalog) {
//!     println!("Candidate board on {}", port.port);
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod matcher;
pub mod scanner;

pub use catalog::{DeviceCatalog, DeviceDescriptor};
pub use error::{CatalogError, DetectError};
pub use matcher::match_candidates;
pub use scanner::{PortEnumerator, PortScanner, ScannerConfig, SerialPortInfo};
