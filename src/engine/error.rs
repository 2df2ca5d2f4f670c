use crate::store::StoreError;

/// Terminal failure of one booking attempt.
///
/// No partial write precedes any of these: either the booking record was
/// created, or nothing was. The engine never retries on its own.
#[derive(Debug)]
pub enum BookingError {
    /// No user session, or the session resolves to no profile.
    Unauthenticated,
    /// The phone prompt was dismissed (or timed out) without a value.
    PhoneRequired,
    /// An overlapping active booking exists, or the candidate range could
    /// never be booked at all.
    SlotUnavailable,
    /// The storage collaborator rejected the read or write.
    Persistence(String),
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingError::Unauthenticated => write!(f, "no active user session"),
            BookingError::PhoneRequired => {
                write!(f, "phone number required to complete the booking")
            }
            BookingError::SlotUnavailable => write!(f, "slot is no longer available"),
            BookingError::Persistence(msg) => write!(f, "persistence failure: {msg}"),
        }
    }
}

impl std::error::Error for BookingError {}

impl From<StoreError> for BookingError {
    fn from(e: StoreError) -> Self {
        match e {
            // A store-side collision means another caller won the race.
            StoreError::Conflict(_) => BookingError::SlotUnavailable,
            other => BookingError::Persistence(other.to_string()),
        }
    }
}
