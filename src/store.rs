//! Persistence port and the bundled in-memory store.
//!
//! The engine never talks to storage directly; everything goes through the
//! [`BookingStore`] trait so embedders can plug in their own document or
//! row store. [`MemoryStore`] is the reference implementation used by the
//! test suite and by embedders that keep state in-process.

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;
use ulid::Ulid;

use crate::limits::MAX_PHONE_LEN;
use crate::model::{now_ms, Availability, Booking, BookingStatus, Day, Profile, Span};

/// Failure surfaced by the persistence collaborator.
#[derive(Debug)]
pub enum StoreError {
    /// The write collided with an existing active booking.
    Conflict(Ulid),
    /// The store rejected the read or write (validation, encoding).
    Rejected(String),
    /// The store could not be reached.
    Unavailable(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Conflict(id) => write!(f, "conflicts with booking: {id}"),
            StoreError::Rejected(msg) => write!(f, "rejected: {msg}"),
            StoreError::Unavailable(msg) => write!(f, "store unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// The document/row store the engine reads and writes through.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Availability windows whose span overlaps `range`.
    async fn availabilities_in(&self, range: Span) -> Result<Vec<Availability>, StoreError>;

    /// Active (Pending or Confirmed) bookings whose span overlaps `day`.
    async fn active_bookings_on(&self, day: Day) -> Result<Vec<Booking>, StoreError>;

    /// Every booking made by `user_id`, any status.
    async fn bookings_for_user(&self, user_id: Ulid) -> Result<Vec<Booking>, StoreError>;

    /// Create a Confirmed booking over `span`. Implementations may reject a
    /// colliding write with [`StoreError::Conflict`]; the engine treats that
    /// as a lost race, not a fault.
    async fn create_booking(&self, user_id: Ulid, span: Span) -> Result<Ulid, StoreError>;

    async fn load_profile(&self, user_id: Ulid) -> Result<Option<Profile>, StoreError>;

    /// Persist a phone number against the profile. The number has already
    /// passed the gate boundary, but stores revalidate their own writes.
    async fn update_profile_phone(&self, user_id: Ulid, phone: &str) -> Result<(), StoreError>;
}

/// In-memory reference store.
///
/// Enforces the no-overlap invariant at the write: `create_booking`
/// re-checks for collisions under a single writer lock, which closes the
/// read-then-write window the coordinator's pre-flight check leaves open.
pub struct MemoryStore {
    availabilities: DashMap<Ulid, Availability>,
    bookings: DashMap<Ulid, Booking>,
    profiles: DashMap<Ulid, Profile>,
    /// Serializes booking writes so the collision re-check is atomic.
    write_lock: Mutex<()>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            availabilities: DashMap::new(),
            bookings: DashMap::new(),
            profiles: DashMap::new(),
            write_lock: Mutex::new(()),
        }
    }

    // Seeding entry points for the administrator side, which sits outside
    // the booking flow.

    pub fn put_availability(&self, availability: Availability) {
        self.availabilities.insert(availability.id, availability);
    }

    pub fn put_profile(&self, profile: Profile) {
        self.profiles.insert(profile.user_id, profile);
    }

    pub fn put_booking(&self, booking: Booking) {
        self.bookings.insert(booking.id, booking);
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn availabilities_in(&self, range: Span) -> Result<Vec<Availability>, StoreError> {
        let mut windows: Vec<Availability> = self
            .availabilities
            .iter()
            .filter(|entry| entry.value().span.overlaps(&range))
            .map(|entry| entry.value().clone())
            .collect();
        windows.sort_by_key(|a| a.span.start);
        Ok(windows)
    }

    async fn active_bookings_on(&self, day: Day) -> Result<Vec<Booking>, StoreError> {
        let range = day.span();
        let mut bookings: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|entry| {
                let b = entry.value();
                b.status.is_active() && b.span.overlaps(&range)
            })
            .map(|entry| entry.value().clone())
            .collect();
        bookings.sort_by_key(|b| b.span.start);
        Ok(bookings)
    }

    async fn bookings_for_user(&self, user_id: Ulid) -> Result<Vec<Booking>, StoreError> {
        Ok(self
            .bookings
            .iter()
            .filter(|entry| entry.value().user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn create_booking(&self, user_id: Ulid, span: Span) -> Result<Ulid, StoreError> {
        let _guard = self.write_lock.lock().await;
        for entry in self.bookings.iter() {
            let existing = entry.value();
            if existing.status.is_active() && existing.span.overlaps(&span) {
                return Err(StoreError::Conflict(existing.id));
            }
        }
        let id = Ulid::new();
        self.bookings.insert(
            id,
            Booking {
                id,
                user_id,
                span,
                status: BookingStatus::Confirmed,
                created_at: now_ms(),
            },
        );
        Ok(id)
    }

    async fn load_profile(&self, user_id: Ulid) -> Result<Option<Profile>, StoreError> {
        Ok(self.profiles.get(&user_id).map(|entry| entry.value().clone()))
    }

    async fn update_profile_phone(&self, user_id: Ulid, phone: &str) -> Result<(), StoreError> {
        let trimmed = phone.trim();
        if trimmed.is_empty() {
            return Err(StoreError::Rejected("empty phone number".into()));
        }
        if trimmed.len() > MAX_PHONE_LEN {
            return Err(StoreError::Rejected("phone number too long".into()));
        }
        match self.profiles.get_mut(&user_id) {
            Some(mut profile) => {
                profile.phone = Some(trimmed.to_string());
                Ok(())
            }
            None => Err(StoreError::Rejected(format!("unknown profile: {user_id}"))),
        }
    }
}
