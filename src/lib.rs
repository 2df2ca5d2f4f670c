//! Consultation booking engine.
//!
//! Turns administrator-declared availability windows into discrete
//! bookable time slots, prevents double-booking across concurrent client
//! sessions, and gates reservation completion on a phone number collected
//! asynchronously through a suspend/resume gate — no busy-polling.
//!
//! Persistence is a pluggable collaborator behind [`store::BookingStore`];
//! [`store::MemoryStore`] is the bundled in-process implementation.

pub mod config;
pub mod engine;
pub mod gate;
pub mod limits;
pub mod model;
pub mod notify;
pub mod observability;
pub mod store;

pub use config::EngineConfig;
pub use engine::{generate_slots, has_conflict, BookingEngine, BookingError};
pub use gate::{GateOutcome, PhoneGate};
pub use store::{BookingStore, MemoryStore, StoreError};
