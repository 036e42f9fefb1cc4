//! Notifier that records events for later inspection

use std::sync::Arc;

use parking_lot::Mutex;
use wc_supervisor::{BoardEvent, Notifier};

/// Records every event; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<BoardEvent>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events so far
    pub fn events(&self) -> Vec<BoardEvent> {
        self.events.lock().clone()
    }

    /// Number of events with the given name
    pub fn count(&self, name: &str) -> usize {
        self.events.lock().iter().filter(|e| e.name() == name).count()
    }

    /// Total number of events
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Forget recorded events
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: BoardEvent) {
        self.events.lock().push(event);
    }
}
