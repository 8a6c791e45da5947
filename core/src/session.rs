//! Session-expiry broadcast.
//!
//! # Design
//! The resolver fires `SessionEvent::Terminated` when the backend reports an
//! expired token. Delivery goes through a `tokio::sync::broadcast` channel
//! owned by whoever builds the `ApiClient`, so listeners (a logout handler,
//! a test) subscribe to that handle instead of to ambient global state.
//! Emission is fire-and-forget: no listeners is not an error, and a listener
//! that falls behind only loses old events.

use tokio::sync::broadcast;
use tracing::info;

/// Name of the session-expiry notification.
pub const SESSION_TERMINATED: &str = "terminateSession";

const CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The credential is no longer valid. `source` names the emitter.
    Terminated { source: &'static str },
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::Terminated { .. } => SESSION_TERMINATED,
        }
    }
}

/// Cloneable handle to the session broadcast channel.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    sender: broadcast::Sender<SessionEvent>,
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub fn emit(&self, source: &'static str) {
        let event = SessionEvent::Terminated { source };
        // Err only means nobody is listening right now.
        let delivered = self.sender.send(event).unwrap_or(0);
        info!(event = event.name(), source, listeners = delivered, "session terminated");
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::broadcast::error::TryRecvError;

    use super::*;

    #[test]
    fn emit_without_listeners_is_silent() {
        let events = SessionEvents::new();
        assert_eq!(events.listener_count(), 0);
        events.emit("test");
    }

    #[test]
    fn every_listener_sees_the_event() {
        let events = SessionEvents::new();
        let mut first = events.subscribe();
        let mut second = events.clone().subscribe();
        assert_eq!(events.listener_count(), 2);

        events.emit("ApiClient");

        let expected = SessionEvent::Terminated { source: "ApiClient" };
        assert_eq!(first.try_recv().unwrap(), expected);
        assert_eq!(second.try_recv().unwrap(), expected);
        assert_eq!(first.try_recv(), Err(TryRecvError::Empty));
        assert_eq!(expected.name(), SESSION_TERMINATED);
    }

    #[test]
    fn late_subscribers_miss_earlier_events() {
        let events = SessionEvents::new();
        events.emit("test");
        let mut late = events.subscribe();
        assert_eq!(late.try_recv(), Err(TryRecvError::Empty));
    }
}
