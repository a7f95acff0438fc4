// Announcer - Accessibility notification sink
//
// The host platform's announcement facility is modeled as an injected,
// fire-and-forget capability: one text message in, no return value, no
// failure signaling. Tests substitute a recording sink at construction
// time instead of stubbing a method on a live control.

use parking_lot::Mutex;
use std::sync::Arc;

/// Receives accessibility announcements intended for assistive technology.
///
/// Announcing is infallible from the caller's point of view; a sink that
/// cannot deliver simply drops the message. The controller's state machine
/// must behave identically regardless of the sink wired in.
pub trait Announcer: Send + Sync {
    /// Delivers a single announcement message.
    fn announce(&self, message: &str);
}

/// Sink that forwards announcements to the `tracing` subscriber.
///
/// Default wiring for demo and diagnostic runs, where no assistive
/// technology is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnnouncer;

impl Announcer for TracingAnnouncer {
    fn announce(&self, message: &str) {
        tracing::info!("announce: {}", message);
    }
}

/// Sink that drops every announcement.
///
/// Stands in for a host environment without an announcement facility.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAnnouncer;

impl Announcer for NullAnnouncer {
    fn announce(&self, _message: &str) {}
}

/// Sink that records every announcement for later inspection.
///
/// The test-side replacement for stubbing the platform call on a live
/// element. Cloning shares the same underlying recording.
///
/// # Example
///
/// ```ignore
/// let announcer = RecordingAnnouncer::new();
/// controller.activate();
/// assert!(announcer.was_called_with("Adding item to cart..."));
/// assert_eq!(announcer.call_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct RecordingAnnouncer {
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingAnnouncer {
    /// Creates a sink with an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded messages, in delivery order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Number of announcements recorded so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Returns whether any recorded announcement equals `message`.
    pub fn was_called_with(&self, message: &str) -> bool {
        self.calls.lock().iter().any(|call| call == message)
    }

    /// The `index`-th recorded message (0-based), if there were that many.
    pub fn nth_call(&self, index: usize) -> Option<String> {
        self.calls.lock().get(index).cloned()
    }
}

impl Announcer for RecordingAnnouncer {
    fn announce(&self, message: &str) {
        tracing::debug!("recorded announcement: {}", message);
        self.calls.lock().push(message.to_string());
    }
}

impl std::fmt::Debug for RecordingAnnouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingAnnouncer")
            .field("calls", &*self.calls.lock())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_announcer_keeps_delivery_order() {
        let announcer = RecordingAnnouncer::new();
        announcer.announce("first");
        announcer.announce("second");
        assert_eq!(announcer.calls(), vec!["first", "second"]);
        assert_eq!(announcer.nth_call(0).as_deref(), Some("first"));
        assert_eq!(announcer.nth_call(2), None);
    }

    #[test]
    fn clones_share_the_recording() {
        let announcer = RecordingAnnouncer::new();
        let clone = announcer.clone();
        clone.announce("shared");
        assert!(announcer.was_called_with("shared"));
        assert_eq!(announcer.call_count(), 1);
    }

    #[test]
    fn null_announcer_swallows_messages() {
        NullAnnouncer.announce("nothing happens");
    }
}
