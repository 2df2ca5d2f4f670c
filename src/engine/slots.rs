use tracing::warn;

use crate::limits::MAX_SLOTS_PER_WINDOW;
use crate::model::{Availability, Booking, Span, TimeSlot};

/// Expand an availability window into its bookable slots, marking each one
/// booked if it overlaps an active booking.
///
/// The walk steps forward from the window start in whole slot-duration
/// increments and emits only slots that fit entirely inside the window — a
/// trailing remainder shorter than one slot is dropped. Output is ordered
/// ascending by start and is pure in both arguments: identical inputs
/// yield identical slots, `is_booked` flags included.
///
/// Malformed windows (non-positive duration, inverted or zero-length
/// range) produce an empty list rather than an error: availability records
/// are administrator data, and a bad record is not worth failing the end
/// user's request over.
pub fn generate_slots(availability: &Availability, active_bookings: &[Booking]) -> Vec<TimeSlot> {
    let step = availability.slot_duration_ms();
    if step <= 0 {
        warn!(
            availability = %availability.id,
            minutes = availability.slot_duration_minutes,
            "non-positive slot duration, no slots generated"
        );
        return Vec::new();
    }
    if availability.span.end <= availability.span.start {
        warn!(availability = %availability.id, "inverted or empty window, no slots generated");
        return Vec::new();
    }

    let mut slots = Vec::new();
    let mut cursor = availability.span.start;
    loop {
        let Some(slot_end) = cursor.checked_add(step) else {
            break;
        };
        if slot_end > availability.span.end {
            break;
        }
        if slots.len() >= MAX_SLOTS_PER_WINDOW {
            warn!(availability = %availability.id, "slot cap reached, window truncated");
            break;
        }
        let span = Span::new(cursor, slot_end);
        let is_booked = active_bookings
            .iter()
            .any(|b| b.status.is_active() && span.overlaps(&b.span));
        slots.push(TimeSlot {
            availability_id: availability.id,
            span,
            is_booked,
        });
        cursor = slot_end;
    }
    slots
}
