use std::cmp::Reverse;

use ulid::Ulid;

use crate::limits::MAX_QUERY_WINDOW_MS;
use crate::model::{now_ms, Availability, Booking, Day, Span, TimeSlot};

use super::slots::generate_slots;
use super::{BookingEngine, BookingError};

impl BookingEngine {
    /// Availability windows overlapping `day`, ordered by start time.
    pub async fn availabilities_for_date(
        &self,
        day: Day,
    ) -> Result<Vec<Availability>, BookingError> {
        let mut windows = self.store.availabilities_in(day.span()).await?;
        windows.sort_by_key(|a| a.span.start);
        Ok(windows)
    }

    /// Availability windows that have not yet ended, scanning at most
    /// `MAX_QUERY_WINDOW_MS` ahead, ordered by start time. Expired windows
    /// are filtered out here, never deleted.
    pub async fn upcoming_availabilities(&self) -> Result<Vec<Availability>, BookingError> {
        let now = now_ms();
        let range = Span::new(now, now.saturating_add(MAX_QUERY_WINDOW_MS));
        let mut windows = self.store.availabilities_in(range).await?;
        windows.retain(|a| !a.is_expired(now));
        windows.sort_by_key(|a| a.span.start);
        Ok(windows)
    }

    /// Expand one availability window into its current slot list.
    ///
    /// Built fresh on every call — slots are ephemeral and never cached,
    /// so a listing after a committed booking always reflects it.
    pub async fn slots_for(
        &self,
        availability: &Availability,
    ) -> Result<Vec<TimeSlot>, BookingError> {
        let day = Day::containing(availability.span.start);
        let active = self.store.active_bookings_on(day).await?;
        Ok(generate_slots(availability, &active))
    }

    /// The user's future active bookings, soonest first.
    pub async fn upcoming_bookings(&self, user_id: Ulid) -> Result<Vec<Booking>, BookingError> {
        let now = now_ms();
        let mut bookings = self.store.bookings_for_user(user_id).await?;
        bookings.retain(|b| b.status.is_active() && b.is_upcoming(now));
        bookings.sort_by_key(|b| b.span.start);
        Ok(bookings)
    }

    /// The user's past bookings, most recent first. Status is not filtered:
    /// cancelled and completed consultations both belong to the record.
    pub async fn history(&self, user_id: Ulid) -> Result<Vec<Booking>, BookingError> {
        let now = now_ms();
        let mut bookings = self.store.bookings_for_user(user_id).await?;
        bookings.retain(|b| b.is_past(now));
        bookings.sort_by_key(|b| Reverse(b.span.start));
        Ok(bookings)
    }
}
