//! Candidate matching
//!
//! Filters a port snapshot down to the ports whose USB identity is listed in
//! the device catalog. Enumeration order is preserved, so when several boards
//! are plugged in the first one reported by the OS is tried first.

use tracing::debug;

use crate::catalog::{adapter_name, DeviceCatalog};
use crate::scanner::SerialPortInfo;

/// Return the ports whose VID/PID pair is in the catalog, in enumeration order
pub fn match_candidates<'a>(
    ports: &'a [SerialPortInfo],
    catalog: &DeviceCatalog,
) -> Vec<&'a SerialPortInfo> {
    ports
        .iter()
        .filter(|port| {
            let Some(identity) = port.identity() else {
                return false;
            };

            debug!(
                "found adapter on {}, VID {} ({})",
                port.port,
                identity,
                port.vid.and_then(adapter_name).unwrap_or("unknown")
            );

            let matched = catalog.contains(&identity);
            if matched {
                debug!("check adapter on {}, VID {}", port.port, identity);
            }
            matched
        })
        .collect()
}
