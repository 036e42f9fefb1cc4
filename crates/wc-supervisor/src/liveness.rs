//! Connection liveness probing
//!
//! One probe per loop iteration while connected. A single failure is taken
//! as proof that the board was unplugged; the supervisor never probes the
//! same connection again after that.

use tracing::trace;

use crate::attach::BoardLink;

/// Outcome of probing an attached board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Liveness {
    /// The port answered
    Alive,
    /// The port failed; carries the probe error text
    Gone(String),
}

/// Probe the link once.
///
/// Returns the outcome without touching the connection slot; the caller
/// applies the transition.
pub fn check<L: BoardLink + ?Sized>(link: &mut L) -> Liveness {
    match link.probe() {
        Ok(()) => {
            trace!("Board on {} alive", link.port_name());
            Liveness::Alive
        }
        Err(e) => Liveness::Gone(e.to_string()),
    }
}
