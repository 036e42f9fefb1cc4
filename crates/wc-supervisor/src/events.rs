//! Board status events
//!
//! The supervisor reports what it is doing through a [`Notifier`]. The only
//! way for other parts of the agent (the UI bridge, mainly) to learn about
//! the connection is through these events.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::trace;

/// Events emitted by the supervisor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// Discovery cycle started; carries a human-readable status
    BoardUpdate(String),
    /// The attached board disappeared
    BoardDetached,
}

impl BoardEvent {
    pub const BOARD_UPDATE: &'static str = "boardUpdate";
    pub const BOARD_DETACHED: &'static str = "boardDetached";

    /// Event name as seen by the UI
    pub fn name(&self) -> &'static str {
        match self {
            BoardEvent::BoardUpdate(_) => Self::BOARD_UPDATE,
            BoardEvent::BoardDetached => Self::BOARD_DETACHED,
        }
    }

    /// Event payload as seen by the UI
    pub fn payload(&self) -> &str {
        match self {
            BoardEvent::BoardUpdate(status) => status,
            BoardEvent::BoardDetached => "",
        }
    }
}

/// Fire-and-forget sink for board events
///
/// Implementations must return promptly; the supervisor calls this from its
/// polling loop.
pub trait Notifier {
    fn notify(&self, event: BoardEvent);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, event: BoardEvent) {
        (**self).notify(event)
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, event: BoardEvent) {
        (**self).notify(event)
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, event: BoardEvent) {
        (**self).notify(event)
    }
}

/// Notifier that forwards events over a bounded channel
///
/// Events are dropped rather than waited on when the receiver lags behind.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::Sender<BoardEvent>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end of its channel
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<BoardEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, event: BoardEvent) {
        if let Err(e) = self.tx.try_send(event) {
            trace!("Dropping board event: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_and_payloads() {
        let update = BoardEvent::BoardUpdate("Scanning boards".to_string());
        assert_eq!(update.name(), "boardUpdate");
        assert_eq!(update.payload(), "Scanning boards");

        assert_eq!(BoardEvent::BoardDetached.name(), "boardDetached");
        assert_eq!(BoardEvent::BoardDetached.payload(), "");
    }

    #[tokio::test]
    async fn test_channel_notifier_delivers_in_order() {
        let (notifier, mut rx) = ChannelNotifier::new(8);

        notifier.notify(BoardEvent::BoardUpdate("Scanning boards".to_string()));
        notifier.notify(BoardEvent::BoardDetached);

        assert_eq!(
            rx.recv().await,
            Some(BoardEvent::BoardUpdate("Scanning boards".to_string()))
        );
        assert_eq!(rx.recv().await, Some(BoardEvent::BoardDetached));
    }

    #[tokio::test]
    async fn test_channel_notifier_never_blocks_when_full() {
        let (notifier, mut rx) = ChannelNotifier::new(1);

        notifier.notify(BoardEvent::BoardDetached);
        // Channel is full; this one is dropped instead of waiting
        notifier.notify(BoardEvent::BoardUpdate("lost".to_string()));

        assert_eq!(rx.recv().await, Some(BoardEvent::BoardDetached));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_notifier_survives_closed_receiver() {
        let (notifier, rx) = ChannelNotifier::new(1);
        drop(rx);
        notifier.notify(BoardEvent::BoardDetached);
    }
}
