use dashmap::DashMap;
use tokio::sync::broadcast;
use ulid::Ulid;

use crate::model::{Day, Span};

/// Pushed to listeners when a day's slot picture changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotEvent {
    /// A booking was committed; slot lists covering this span are stale.
    Booked {
        booking_id: Ulid,
        user_id: Ulid,
        span: Span,
    },
}

/// Broadcast hub keyed by day. UI collaborators subscribe to the dates they
/// render and re-run slot generation when an event arrives, instead of
/// polling the catalog.
pub struct RefreshHub {
    channels: DashMap<Day, broadcast::Sender<SlotEvent>>,
    capacity: usize,
}

impl RefreshHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: DashMap::new(),
            capacity,
        }
    }

    /// Subscribe to refresh events for a day. Creates the channel if needed.
    pub fn subscribe(&self, day: Day) -> broadcast::Receiver<SlotEvent> {
        let sender = self
            .channels
            .entry(day)
            .or_insert_with(|| broadcast::channel(self.capacity).0);
        sender.subscribe()
    }

    /// Send a refresh event. No-op if nobody is listening.
    pub fn send(&self, day: Day, event: &SlotEvent) {
        if let Some(sender) = self.channels.get(&day) {
            let _ = sender.send(event.clone());
        }
    }

    /// Remove a day's channel (e.g. once the date has passed).
    pub fn remove(&self, day: &Day) {
        self.channels.remove(day);
    }
}
