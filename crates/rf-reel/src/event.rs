//! Reel lifecycle events
//!
//! Listeners are called synchronously, in registration order, with the
//! emitting reel as payload. [`ChannelListener`] turns the callbacks into
//! messages for consumers that prefer to drain a queue.

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::reel::Reel;

/// Lifecycle notification kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReelEventKind {
    /// Roll begins
    Start,
    /// Anticipation phase begins
    Preroll,
    /// Main roll begins
    Roll,
    /// Overshoot phase begins
    Postroll,
    /// Roll complete
    Finish,
}

impl ReelEventKind {
    pub fn name(&self) -> &'static str {
        match self {
            ReelEventKind::Start => "start",
            ReelEventKind::Preroll => "preroll",
            ReelEventKind::Roll => "roll",
            ReelEventKind::Postroll => "postroll",
            ReelEventKind::Finish => "finish",
        }
    }
}

/// Event emitted by a reel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReelEvent {
    /// Index of the emitting reel
    pub reel_index: usize,
    pub kind: ReelEventKind,
}

/// Receives reel lifecycle events
pub trait ReelListener {
    fn on_reel_event(&mut self, event: ReelEvent, reel: &Reel);
}

impl<F> ReelListener for F
where
    F: FnMut(ReelEvent, &Reel),
{
    fn on_reel_event(&mut self, event: ReelEvent, reel: &Reel) {
        self(event, reel)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CHANNEL LISTENER
// ═══════════════════════════════════════════════════════════════════════════════

/// Forwards events over a channel
///
/// Several reels may share one sender; the receiver then sees the events of
/// all of them in emission order.
#[derive(Debug, Clone)]
pub struct ChannelListener {
    tx: Sender<ReelEvent>,
}

impl ChannelListener {
    pub fn new(tx: Sender<ReelEvent>) -> Self {
        Self { tx }
    }

    /// Unbounded listener/receiver pair
    pub fn channel() -> (Self, Receiver<ReelEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::new(tx), rx)
    }
}

impl ReelListener for ChannelListener {
    fn on_reel_event(&mut self, event: ReelEvent, _reel: &Reel) {
        if self.tx.send(event).is_err() {
            log::trace!("reel event dropped, receiver gone: {:?}", event);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// EVENT LOG
// ═══════════════════════════════════════════════════════════════════════════════

/// Records events; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<ReelEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all recorded events
    pub fn events(&self) -> Vec<ReelEvent> {
        self.events.lock().clone()
    }

    /// Recorded event kinds, in order
    pub fn kinds(&self) -> Vec<ReelEventKind> {
        self.events.lock().iter().map(|e| e.kind).collect()
    }

    /// Number of recorded events of a kind
    pub fn count(&self, kind: ReelEventKind) -> usize {
        self.events.lock().iter().filter(|e| e.kind == kind).count()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl ReelListener for EventLog {
    fn on_reel_event(&mut self, event: ReelEvent, _reel: &Reel) {
        self.events.lock().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(ReelEventKind::Start.name(), "start");
        assert_eq!(ReelEventKind::Finish.name(), "finish");
    }

    #[test]
    fn test_event_json() {
        let event = ReelEvent {
            reel_index: 2,
            kind: ReelEventKind::Postroll,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"reel_index":2,"kind":"postroll"}"#);
    }

    #[test]
    fn test_event_log_shared() {
        let log = EventLog::new();
        let other = log.clone();
        other.events.lock().push(ReelEvent {
            reel_index: 0,
            kind: ReelEventKind::Start,
        });
        assert_eq!(log.kinds(), vec![ReelEventKind::Start]);
        assert_eq!(log.count(ReelEventKind::Start), 1);
        log.clear();
        assert!(other.events().is_empty());
    }
}
