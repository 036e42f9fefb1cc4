//! Board discovery and connection supervisor
//!
//! The supervisor loop has two phases. While no board is attached it scans:
//! enumerate serial ports, keep those in the device catalog, and try to
//! attach each in turn until one accepts. Once a board is attached it only
//! probes that connection, at a fine interval, until a probe fails; then it
//! reports `boardDetached` and goes back to scanning.
//!
//! The loop checks the stop flag and then the pause flag at the top of every
//! iteration. A paused iteration touches nothing at all: no enumeration, no
//! probing, no events.

use std::time::Duration;

use tracing::{debug, info, warn};
use wc_detect::{match_candidates, DeviceCatalog, PortEnumerator};

use crate::attach::{Attacher, BoardLink};
use crate::control::ControlFlags;
use crate::events::{BoardEvent, Notifier};
use crate::liveness::{self, Liveness};

/// Status carried by the `boardUpdate` event of each discovery cycle
pub const SCANNING_STATUS: &str = "Scanning boards";

/// Supervisor timing configuration
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    /// Sleep between iterations while scanning or connected
    pub poll_interval: Duration,
    /// Sleep between iterations while paused
    pub pause_interval: Duration,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(10),
            pause_interval: Duration::from_millis(500),
        }
    }
}

/// What a single loop iteration did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Stop was requested; the loop must exit
    Stopped,
    /// Pause is set; nothing was done
    Paused,
    /// The attached board answered its probe
    Alive,
    /// The attached board failed its probe and was dropped
    Detached,
    /// A discovery cycle attached a board
    Attached,
    /// A discovery cycle found nothing to attach
    Scanned,
    /// Port enumeration failed; the cycle was skipped
    ScanFailed,
}

/// Owns the board connection and drives discovery and liveness probing
pub struct Supervisor<E, A, N>
where
    A: Attacher,
{
    catalog: DeviceCatalog,
    enumerator: E,
    attacher: A,
    notifier: N,
    flags: ControlFlags,
    config: SupervisorConfig,
    connection: Option<A::Link>,
}

impl<E, A, N> Supervisor<E, A, N>
where
    E: PortEnumerator,
    A: Attacher,
    N: Notifier,
{
    /// Create a supervisor with default timing
    pub fn new(
        catalog: DeviceCatalog,
        enumerator: E,
        attacher: A,
        notifier: N,
        flags: ControlFlags,
    ) -> Self {
        Self::with_config(
            catalog,
            enumerator,
            attacher,
            notifier,
            flags,
            SupervisorConfig::default(),
        )
    }

    /// Create a supervisor with custom timing
    pub fn with_config(
        catalog: DeviceCatalog,
        enumerator: E,
        attacher: A,
        notifier: N,
        flags: ControlFlags,
        config: SupervisorConfig,
    ) -> Self {
        Self {
            catalog,
            enumerator,
            attacher,
            notifier,
            flags,
            config,
            connection: None,
        }
    }

    /// Whether a board is currently attached
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Port of the attached board, if any
    pub fn connected_port(&self) -> Option<&str> {
        self.connection.as_ref().map(|link| link.port_name())
    }

    /// Control flags this supervisor observes
    pub fn flags(&self) -> &ControlFlags {
        &self.flags
    }

    /// Run one loop iteration without sleeping
    pub fn step(&mut self) -> Step {
        if self.flags.is_stopped() {
            return Step::Stopped;
        }
        if self.flags.is_paused() {
            return Step::Paused;
        }

        if let Some(link) = self.connection.as_mut() {
            return match liveness::check(link) {
                Liveness::Alive => Step::Alive,
                Liveness::Gone(reason) => {
                    self.detach(&reason);
                    Step::Detached
                }
            };
        }

        self.discover()
    }

    /// Run until stop is requested.
    ///
    /// A board still attached when the loop exits is released before
    /// returning.
    pub fn run(mut self) {
        info!(
            "Start monitoring serial ports ({} known device(s))",
            self.catalog.len()
        );

        loop {
            match self.step() {
                Step::Stopped => break,
                Step::Paused => std::thread::sleep(self.config.pause_interval),
                _ => std::thread::sleep(self.config.poll_interval),
            }
        }

        info!("Stop monitoring serial ports");
        self.release();
    }

    /// One discovery cycle: enumerate, match, attach the first that accepts
    fn discover(&mut self) -> Step {
        self.notifier
            .notify(BoardEvent::BoardUpdate(SCANNING_STATUS.to_string()));

        let ports = match self.enumerator.list_ports() {
            Ok(ports) => ports,
            Err(e) => {
                debug!("Skipping scan: {}", e);
                return Step::ScanFailed;
            }
        };

        for candidate in match_candidates(&ports, &self.catalog) {
            match self.attacher.attach(candidate) {
                Ok(link) => {
                    info!("Board connected on {}", link.port_name());
                    self.connection = Some(link);
                    return Step::Attached;
                }
                Err(e) => debug!("Attach failed on {}: {}", candidate.port, e),
            }
        }

        Step::Scanned
    }

    fn detach(&mut self, reason: &str) {
        if let Some(link) = self.connection.take() {
            warn!("Board on {} detached: {}", link.port_name(), reason);
        }
        self.notifier.notify(BoardEvent::BoardDetached);
    }

    fn release(&mut self) {
        if let Some(link) = self.connection.take() {
            info!("Releasing board on {}", link.port_name());
        }
    }
}
