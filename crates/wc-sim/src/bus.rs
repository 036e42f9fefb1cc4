//! Simulated USB serial bus
//!
//! The bus is shared between the enumerator, the attacher and every link it
//! hands out, so a test can plug and unplug boards while a supervisor is
//! running and afterwards inspect every call the supervisor made.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;
use wc_detect::{DetectError, PortEnumerator, SerialPortInfo};
use wc_supervisor::{Attacher, BoardLink, SupervisorError};

use crate::board::SimBoard;

#[derive(Debug, Default)]
struct BusState {
    /// Plugged boards with the id of their plug-in
    boards: Vec<(u64, SimBoard)>,
    next_id: u64,
    /// Remaining enumerations that must fail
    failing_enumerations: u32,
    enumerations: usize,
    attach_attempts: Vec<String>,
    probes: Vec<String>,
    /// Board ids with a live link
    claimed: Vec<u64>,
    max_claimed: usize,
    released: Vec<String>,
}

/// Handle to a simulated bus; clones share the same state
#[derive(Debug, Clone, Default)]
pub struct SimBus {
    state: Arc<Mutex<BusState>>,
}

impl SimBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plug a board in; it shows up at the end of the enumeration order
    pub fn plug(&self, board: SimBoard) {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        debug!("Simulated board plugged on {}", board.port());
        state.boards.push((id, board));
    }

    /// Unplug the board on `port`, if any
    pub fn unplug(&self, port: &str) {
        let mut state = self.state.lock();
        state.boards.retain(|(_, b)| b.port() != port);
        debug!("Simulated board unplugged from {}", port);
    }

    /// Make the next `count` enumerations fail
    pub fn fail_enumerations(&self, count: u32) {
        self.state.lock().failing_enumerations = count;
    }

    /// Enumerator backed by this bus
    pub fn enumerator(&self) -> SimEnumerator {
        SimEnumerator { bus: self.clone() }
    }

    /// Attacher backed by this bus
    pub fn attacher(&self) -> SimAttacher {
        SimAttacher { bus: self.clone() }
    }

    /// Number of enumeration calls, failed ones included
    pub fn enumerations(&self) -> usize {
        self.state.lock().enumerations
    }

    /// Ports passed to `attach`, in call order
    pub fn attach_attempts(&self) -> Vec<String> {
        self.state.lock().attach_attempts.clone()
    }

    /// Ports probed, in call order
    pub fn probes(&self) -> Vec<String> {
        self.state.lock().probes.clone()
    }

    /// Number of links currently alive
    pub fn claimed(&self) -> usize {
        self.state.lock().claimed.len()
    }

    /// Highest number of links that were ever alive at once
    pub fn max_claimed(&self) -> usize {
        self.state.lock().max_claimed
    }

    /// Ports whose link was dropped, in order
    pub fn released(&self) -> Vec<String> {
        self.state.lock().released.clone()
    }
}

/// Lists the ports plugged into a [`SimBus`]
#[derive(Debug, Clone)]
pub struct SimEnumerator {
    bus: SimBus,
}

impl PortEnumerator for SimEnumerator {
    fn list_ports(&self) -> Result<Vec<SerialPortInfo>, DetectError> {
        let mut state = self.bus.state.lock();
        state.enumerations += 1;

        if state.failing_enumerations > 0 {
            state.failing_enumerations -= 1;
            return Err(DetectError::EnumerationFailed(
                "simulated enumeration failure".to_string(),
            ));
        }

        Ok(state.boards.iter().map(|(_, b)| b.info().clone()).collect())
    }
}

/// Attaches to boards plugged into a [`SimBus`]
#[derive(Debug, Clone)]
pub struct SimAttacher {
    bus: SimBus,
}

impl Attacher for SimAttacher {
    type Link = SimLink;

    fn attach(&mut self, port: &SerialPortInfo) -> Result<SimLink, SupervisorError> {
        let mut state = self.bus.state.lock();
        state.attach_attempts.push(port.port.clone());

        let open_failed = |reason: &str| SupervisorError::OpenFailed {
            port: port.port.clone(),
            reason: reason.to_string(),
        };

        let claimed = state.claimed.clone();
        let (id, board) = state
            .boards
            .iter_mut()
            .find(|(_, b)| b.port() == port.port)
            .ok_or_else(|| open_failed("no such device"))?;

        if claimed.contains(id) {
            return Err(open_failed("device busy"));
        }
        if !board.answer_attach() {
            return Err(SupervisorError::Declined {
                port: port.port.clone(),
                reason: "simulated handshake refused".to_string(),
            });
        }

        let id = *id;
        state.claimed.push(id);
        state.max_claimed = state.max_claimed.max(state.claimed.len());

        Ok(SimLink {
            bus: self.bus.clone(),
            port: port.port.clone(),
            board_id: id,
        })
    }
}

/// Connection to a simulated board
///
/// Probes fail once the board it was opened on is unplugged, even if another
/// board is later plugged on the same port name.
#[derive(Debug)]
pub struct SimLink {
    bus: SimBus,
    port: String,
    board_id: u64,
}

impl BoardLink for SimLink {
    fn port_name(&self) -> &str {
        &self.port
    }

    fn probe(&mut self) -> Result<(), SupervisorError> {
        let mut state = self.bus.state.lock();
        state.probes.push(self.port.clone());

        if state.boards.iter().any(|(id, _)| *id == self.board_id) {
            Ok(())
        } else {
            Err(SupervisorError::PortGone(self.port.clone()))
        }
    }
}

impl Drop for SimLink {
    fn drop(&mut self) {
        let mut state = self.bus.state.lock();
        state.claimed.retain(|id| *id != self.board_id);
        state.released.push(self.port.clone());
    }
}
