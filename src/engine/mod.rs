mod booking;
mod conflict;
mod error;
mod queries;
mod slots;

pub use conflict::has_conflict;
pub use error::BookingError;
pub use slots::generate_slots;

use std::sync::Arc;

use dashmap::DashMap;
use ulid::Ulid;

use crate::config::EngineConfig;
use crate::gate::PhoneGate;
use crate::notify::RefreshHub;
use crate::store::BookingStore;

/// The booking engine: one reservation coordinator, the catalog queries,
/// and the phone-gate registry, wired to a persistence collaborator.
///
/// The engine holds no booking state of its own — the store is the single
/// shared mutable resource, and the only mutation this engine performs on
/// it is "create new booking."
pub struct BookingEngine {
    store: Arc<dyn BookingStore>,
    pub notify: Arc<RefreshHub>,
    /// One gate per user whose booking attempt is suspended on the phone
    /// prompt. Entries live only for the duration of that suspension.
    gates: DashMap<Ulid, Arc<PhoneGate>>,
    config: EngineConfig,
}

impl BookingEngine {
    pub fn new(store: Arc<dyn BookingStore>, config: EngineConfig) -> Self {
        let notify = Arc::new(RefreshHub::new(config.refresh_channel_capacity));
        Self {
            store,
            notify,
            gates: DashMap::new(),
            config,
        }
    }
}
