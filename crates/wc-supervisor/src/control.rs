//! Pause and stop flags
//!
//! Both flags are written from outside the supervisor (an upgrade in
//! progress, a shutdown handler) and read by the loop once per iteration.
//! Neither is linked to any other state, so plain atomics are enough.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

#[derive(Debug, Default)]
struct Flags {
    pause: AtomicBool,
    stop: AtomicBool,
}

/// Shared handle to the supervisor's control flags
///
/// Cloning is cheap; every clone refers to the same pair of flags.
#[derive(Debug, Clone, Default)]
pub struct ControlFlags {
    inner: Arc<Flags>,
}

impl ControlFlags {
    /// Create a fresh, unpaused and unstopped pair of flags
    pub fn new() -> Self {
        Self::default()
    }

    /// Suspend all discovery and probing
    pub fn pause(&self) {
        self.inner.pause.store(true, Ordering::Release);
    }

    /// Resume discovery and probing
    pub fn resume(&self) {
        self.inner.pause.store(false, Ordering::Release);
    }

    pub fn is_paused(&self) -> bool {
        self.inner.pause.load(Ordering::Acquire)
    }

    /// Ask the supervisor to exit its loop
    pub fn request_stop(&self) {
        self.inner.stop.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.stop.load(Ordering::Acquire)
    }

    /// Pause the supervisor for the lifetime of the returned guard
    pub fn begin_upgrade(&self) -> UpgradeGuard {
        info!("Upgrade started, pausing board monitor");
        self.pause();
        UpgradeGuard {
            flags: self.clone(),
        }
    }
}

/// Keeps the supervisor paused while an upgrade runs
#[must_use = "the supervisor resumes as soon as the guard is dropped"]
#[derive(Debug)]
pub struct UpgradeGuard {
    flags: ControlFlags,
}

impl Drop for UpgradeGuard {
    fn drop(&mut self) {
        info!("Upgrade finished, resuming board monitor");
        self.flags.resume();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let flags = ControlFlags::new();
        assert!(!flags.is_paused());
        assert!(!flags.is_stopped());
    }

    #[test]
    fn test_clones_share_state() {
        let flags = ControlFlags::new();
        let remote = flags.clone();

        remote.pause();
        assert!(flags.is_paused());
        remote.resume();
        assert!(!flags.is_paused());

        remote.request_stop();
        assert!(flags.is_stopped());
    }

    #[test]
    fn test_upgrade_guard_pauses_until_dropped() {
        let flags = ControlFlags::new();
        {
            let _guard = flags.begin_upgrade();
            assert!(flags.is_paused());
        }
        assert!(!flags.is_paused());
    }

    #[test]
    fn test_flags_visible_across_threads() {
        let flags = ControlFlags::new();
        let remote = flags.clone();

        std::thread::spawn(move || remote.request_stop())
            .join()
            .unwrap();

        assert!(flags.is_stopped());
    }
}
