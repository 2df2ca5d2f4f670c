//! Guard rails on externally supplied data. Availability records come from
//! administrators and phone numbers from end users; both are validated
//! against these bounds before they can reach the engine's hot paths.

use crate::model::Ms;

/// Earliest timestamp accepted anywhere (1970-01-01T00:00:00Z).
pub const MIN_VALID_TIMESTAMP_MS: Ms = 0;

/// Latest timestamp accepted anywhere (2100-01-01T00:00:00Z).
pub const MAX_VALID_TIMESTAMP_MS: Ms = 4_102_444_800_000;

/// Widest range a single booking candidate may cover.
pub const MAX_SPAN_DURATION_MS: Ms = 7 * 86_400_000;

/// Widest window a catalog query may scan.
pub const MAX_QUERY_WINDOW_MS: Ms = 90 * 86_400_000;

/// Upper bound on slots expanded from one availability window.
pub const MAX_SLOTS_PER_WINDOW: usize = 1_000;

/// Longest accepted phone number, after trimming.
pub const MAX_PHONE_LEN: usize = 32;
