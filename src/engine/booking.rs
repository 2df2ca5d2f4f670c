use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};
use ulid::Ulid;

use crate::gate::{GateOutcome, PhoneGate};
use crate::limits::MAX_PHONE_LEN;
use crate::model::{Day, TimeSlot};
use crate::notify::SlotEvent;
use crate::observability;

use super::conflict::{has_conflict, validate_candidate};
use super::{BookingEngine, BookingError};

impl BookingEngine {
    /// Run one reservation attempt for `slot`.
    ///
    /// Steps, strictly in order, each able to short-circuit the attempt:
    /// authenticate, load the profile, collect a phone number if the
    /// profile has none (this is the one suspension point with gating
    /// semantics — the future parks until the UI answers the prompt),
    /// re-fetch the day's active bookings, pre-flight conflict check,
    /// create the booking, publish a refresh event.
    ///
    /// The conflict check always observes bookings fetched after the gate
    /// resolved, so a phone-number round trip can never validate against
    /// data from before the user paused to type.
    ///
    /// The pre-flight check is cooperative, not transactional; a store
    /// that enforces uniqueness on write reports the lost race as
    /// `SlotUnavailable` through the same error path.
    pub async fn book(&self, user_id: Option<Ulid>, slot: &TimeSlot) -> Result<Ulid, BookingError> {
        let started = Instant::now();
        let result = self.book_inner(user_id, slot).await;
        metrics::counter!(
            observability::BOOKINGS_TOTAL,
            "outcome" => observability::outcome_label(&result)
        )
        .increment(1);
        metrics::histogram!(observability::BOOKING_DURATION_SECONDS)
            .record(started.elapsed().as_secs_f64());
        result
    }

    async fn book_inner(
        &self,
        user_id: Option<Ulid>,
        slot: &TimeSlot,
    ) -> Result<Ulid, BookingError> {
        let user_id = user_id.ok_or(BookingError::Unauthenticated)?;
        validate_candidate(&slot.span)?;

        let profile = self
            .store
            .load_profile(user_id)
            .await?
            .ok_or(BookingError::Unauthenticated)?;

        if !profile.has_phone() {
            let phone = self.wait_for_phone(user_id).await?;
            self.store.update_profile_phone(user_id, &phone).await?;
        }

        let day = Day::containing(slot.span.start);
        let active = self.store.active_bookings_on(day).await?;
        if has_conflict(&slot.span, &active) {
            metrics::counter!(observability::CONFLICTS_TOTAL).increment(1);
            debug!(user = %user_id, start = slot.span.start, "pre-flight found slot taken");
            return Err(BookingError::SlotUnavailable);
        }

        let booking_id = self.store.create_booking(user_id, slot.span).await?;

        info!(
            booking = %booking_id,
            user = %user_id,
            start = slot.span.start,
            end = slot.span.end,
            "booking committed"
        );
        self.notify.send(
            day,
            &SlotEvent::Booked {
                booking_id,
                user_id,
                span: slot.span,
            },
        );
        Ok(booking_id)
    }

    /// Park the flow on a fresh gate until the UI supplies a number or
    /// dismisses the prompt. A second attempt by the same user aborts the
    /// first one rather than leaving it stranded.
    async fn wait_for_phone(&self, user_id: Ulid) -> Result<String, BookingError> {
        let gate = Arc::new(PhoneGate::new());
        if let Some(previous) = self.gates.insert(user_id, gate.clone()) {
            previous.cancel();
        }
        metrics::gauge!(observability::PHONE_GATES_ACTIVE).increment(1.0);
        let waited = Instant::now();

        let outcome = gate.wait(self.config.phone_gate_timeout).await;

        metrics::gauge!(observability::PHONE_GATES_ACTIVE).decrement(1.0);
        metrics::histogram!(observability::PHONE_GATE_WAIT_SECONDS)
            .record(waited.elapsed().as_secs_f64());
        // Only unregister our own gate — a newer attempt may have replaced it.
        self.gates
            .remove_if(&user_id, |_, registered| Arc::ptr_eq(registered, &gate));

        match outcome {
            GateOutcome::Provided(phone) => Ok(phone),
            GateOutcome::Dismissed => {
                debug!(user = %user_id, "phone prompt dismissed, attempt aborted");
                Err(BookingError::PhoneRequired)
            }
        }
    }

    /// Deliver a phone number to a suspended attempt. Returns `false` when
    /// no attempt is waiting or the value is unusable (empty, too long) —
    /// in that case the attempt stays suspended for a corrected value.
    pub fn submit_phone(&self, user_id: Ulid, phone: &str) -> bool {
        let trimmed = phone.trim();
        if trimmed.is_empty() || trimmed.len() > MAX_PHONE_LEN {
            return false;
        }
        match self.gates.get(&user_id) {
            Some(gate) => gate.resume(trimmed.to_string()),
            None => false,
        }
    }

    /// Dismiss the phone prompt; the suspended attempt aborts with
    /// `PhoneRequired`. Other users' in-flight bookings are unaffected.
    pub fn dismiss_phone(&self, user_id: Ulid) -> bool {
        match self.gates.get(&user_id) {
            Some(gate) => gate.cancel(),
            None => false,
        }
    }

    /// True while a booking attempt for `user_id` is waiting on the prompt.
    pub fn phone_prompt_pending(&self, user_id: Ulid) -> bool {
        self.gates
            .get(&user_id)
            .is_some_and(|gate| gate.is_waiting())
    }
}
