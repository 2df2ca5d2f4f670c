use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unix milliseconds — the only time type.
pub type Ms = i64;

pub const MS_PER_MINUTE: Ms = 60_000;
pub const MS_PER_DAY: Ms = 86_400_000;

/// Wall clock in unix milliseconds.
pub fn now_ms() -> Ms {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as Ms)
        .unwrap_or(0)
}

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Ms,
    pub end: Ms,
}

impl Span {
    pub fn new(start: Ms, end: Ms) -> Self {
        debug_assert!(start < end, "Span start must be before end");
        Self { start, end }
    }

    pub fn duration_ms(&self) -> Ms {
        self.end - self.start
    }

    /// Two ranges conflict iff this returns true. Ranges that merely touch
    /// at an endpoint do not overlap.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains_instant(&self, t: Ms) -> bool {
        self.start <= t && t < self.end
    }
}

/// A civil day, stored as the number of whole days since 1970-01-01 UTC.
///
/// Used to key "bookings for this date" queries and refresh channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Day(i64);

impl Day {
    /// The day containing instant `t`.
    pub fn containing(t: Ms) -> Self {
        Day(t.div_euclid(MS_PER_DAY))
    }

    /// Build a day from a calendar date. `None` for invalid dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        let date = chrono::NaiveDate::from_ymd_opt(year, month, day)?;
        let midnight = date.and_hms_opt(0, 0, 0)?.and_utc();
        Some(Day::containing(midnight.timestamp_millis()))
    }

    /// The full `[midnight, next midnight)` range of this day.
    pub fn span(&self) -> Span {
        Span::new(self.0 * MS_PER_DAY, (self.0 + 1) * MS_PER_DAY)
    }
}

/// An administrator-declared window in which consultations may be booked.
///
/// Read-only to the booking flow; expired windows are filtered out by
/// query, never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub id: Ulid,
    pub span: Span,
    pub slot_duration_minutes: i64,
    pub created_at: Ms,
}

impl Availability {
    pub fn slot_duration_ms(&self) -> Ms {
        self.slot_duration_minutes.saturating_mul(MS_PER_MINUTE)
    }

    pub fn is_expired(&self, now: Ms) -> bool {
        self.span.end <= now
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Active bookings hold their time range against new reservations.
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

/// A committed reservation of one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Ulid,
    pub user_id: Ulid,
    pub span: Span,
    pub status: BookingStatus,
    pub created_at: Ms,
}

impl Booking {
    /// Derived from `now`, never stored.
    pub fn is_upcoming(&self, now: Ms) -> bool {
        self.span.start > now
    }

    /// Derived from `now`, never stored.
    pub fn is_past(&self, now: Ms) -> bool {
        self.span.end < now
    }
}

/// One bookable sub-interval of an availability window.
///
/// Derived and ephemeral: rebuilt on every listing, never persisted, owned
/// by the caller that requested it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub availability_id: Ulid,
    pub span: Span,
    pub is_booked: bool,
}

/// The slice of the user profile the booking flow cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: Ulid,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub created_at: Ms,
}

impl Profile {
    /// A blank or whitespace-only number does not count.
    pub fn has_phone(&self) -> bool {
        self.phone.as_deref().is_some_and(|p| !p.trim().is_empty())
    }
}
