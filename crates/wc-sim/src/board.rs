//! Simulated boards

use wc_detect::SerialPortInfo;

/// How a simulated board answers attachment attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachBehavior {
    /// Always accept
    Accept,
    /// Always decline
    Decline,
    /// Decline this many attempts, then accept
    DeclineTimes(u32),
}

/// A device plugged into the simulated bus
#[derive(Debug, Clone)]
pub struct SimBoard {
    info: SerialPortInfo,
    behavior: AttachBehavior,
}

impl SimBoard {
    /// A USB board that accepts attachment
    pub fn new(port: impl Into<String>, vid: u16, pid: u16) -> Self {
        Self {
            info: SerialPortInfo::usb(port, vid, pid),
            behavior: AttachBehavior::Accept,
        }
    }

    /// A port the OS reports without USB identity
    pub fn without_identity(port: impl Into<String>) -> Self {
        Self {
            info: SerialPortInfo::new(port),
            behavior: AttachBehavior::Accept,
        }
    }

    /// Change how the board answers attachment
    pub fn with_behavior(mut self, behavior: AttachBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn info(&self) -> &SerialPortInfo {
        &self.info
    }

    pub fn port(&self) -> &str {
        &self.info.port
    }

    /// Consume one attachment attempt, returning whether it is accepted
    pub(crate) fn answer_attach(&mut self) -> bool {
        match self.behavior {
            AttachBehavior::Accept => true,
            AttachBehavior::Decline => false,
            AttachBehavior::DeclineTimes(0) => {
                self.behavior = AttachBehavior::Accept;
                true
            }
            AttachBehavior::DeclineTimes(n) => {
                self.behavior = AttachBehavior::DeclineTimes(n - 1);
                false
            }
        }
    }
}
