use crate::limits::*;
use crate::model::{Booking, Span};

use super::BookingError;

/// True if `candidate` overlaps any active booking in `active`.
///
/// Callers fetch `active` restricted to the candidate's day; that is a
/// performance contract only — passing a superset is still correct, just
/// slower. Non-active bookings (Cancelled, Completed) never conflict.
pub fn has_conflict(candidate: &Span, active: &[Booking]) -> bool {
    active
        .iter()
        .any(|b| b.status.is_active() && candidate.overlaps(&b.span))
}

/// Reject candidates that could never be booked: inverted ranges,
/// timestamps outside the valid window, or spans wider than any slot we
/// would ever generate.
pub(super) fn validate_candidate(span: &Span) -> Result<(), BookingError> {
    if span.end <= span.start {
        return Err(BookingError::SlotUnavailable);
    }
    if span.start < MIN_VALID_TIMESTAMP_MS || span.end > MAX_VALID_TIMESTAMP_MS {
        return Err(BookingError::SlotUnavailable);
    }
    if span.duration_ms() > MAX_SPAN_DURATION_MS {
        return Err(BookingError::SlotUnavailable);
    }
    Ok(())
}
