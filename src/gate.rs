//! Single-use suspension gate for collecting a phone number mid-booking.
//!
//! A booking flow that needs a phone number parks itself on a gate; the UI
//! layer later delivers a value with [`PhoneGate::resume`] or dismisses the
//! prompt with [`PhoneGate::cancel`], and the flow picks up exactly where
//! it stopped. No polling anywhere: the suspension is a plain
//! `oneshot::Receiver` await.

use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::oneshot;

/// What the suspended flow receives when the gate resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// External code supplied a phone number.
    Provided(String),
    /// The prompt was dismissed or timed out. The attempt must abort; this
    /// is not a retryable error.
    Dismissed,
}

enum GateState {
    Idle,
    Waiting(oneshot::Sender<GateOutcome>),
    Resolved,
}

/// One booking attempt's phone-number gate.
///
/// State machine: Idle → Waiting → Resolved, terminal per instance; a fresh
/// gate is created for every attempt. Completing an already-resolved gate is
/// a no-op, so a UI double-tap can never unblock a second waiter.
///
/// At most one `wait` may be outstanding per instance.
pub struct PhoneGate {
    state: Mutex<GateState>,
}

impl Default for PhoneGate {
    fn default() -> Self {
        Self::new()
    }
}

impl PhoneGate {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GateState::Idle),
        }
    }

    /// Suspend until `resume` or `cancel` arrives, or `timeout` elapses.
    /// Timing out behaves exactly like a dismissal.
    pub async fn wait(&self, timeout: Duration) -> GateOutcome {
        let rx = {
            let mut state = self.lock_state();
            if matches!(*state, GateState::Idle) {
                let (tx, rx) = oneshot::channel();
                *state = GateState::Waiting(tx);
                rx
            } else {
                // A second concurrent wait on the same instance is a caller
                // error; refuse to register another waiter.
                debug_assert!(false, "PhoneGate::wait registered twice");
                return GateOutcome::Dismissed;
            }
        };

        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(outcome)) => outcome,
            // Sender dropped without completing — same as a dismissal.
            Ok(Err(_)) => GateOutcome::Dismissed,
            Err(_) => {
                *self.lock_state() = GateState::Resolved;
                GateOutcome::Dismissed
            }
        }
    }

    /// Deliver a phone number to the suspended flow. Returns `false` when
    /// nothing is waiting or the gate already resolved (late or duplicate
    /// submission).
    pub fn resume(&self, phone: String) -> bool {
        self.complete(GateOutcome::Provided(phone))
    }

    /// Dismiss the prompt; the suspended flow aborts its attempt.
    pub fn cancel(&self) -> bool {
        self.complete(GateOutcome::Dismissed)
    }

    /// True while a flow is suspended on this gate.
    pub fn is_waiting(&self) -> bool {
        matches!(*self.lock_state(), GateState::Waiting(_))
    }

    fn complete(&self, outcome: GateOutcome) -> bool {
        let mut state = self.lock_state();
        match std::mem::replace(&mut *state, GateState::Resolved) {
            GateState::Waiting(tx) => {
                // The receiver may have been dropped (flow cancelled); the
                // gate still counts as resolved either way.
                let _ = tx.send(outcome);
                true
            }
            GateState::Idle => {
                // Nobody waiting yet — keep the gate usable.
                *state = GateState::Idle;
                false
            }
            GateState::Resolved => false,
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
