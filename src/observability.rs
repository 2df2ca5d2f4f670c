use std::net::SocketAddr;

use ulid::Ulid;

use crate::engine::BookingError;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: booking attempts. Labels: outcome.
pub const BOOKINGS_TOTAL: &str = "consulta_bookings_total";

/// Histogram: time from book() entry to commit or failure, in seconds.
pub const BOOKING_DURATION_SECONDS: &str = "consulta_booking_duration_seconds";

/// Counter: pre-flight checks that found the slot already taken.
pub const CONFLICTS_TOTAL: &str = "consulta_conflicts_total";

// ── USE metrics (resource utilization) ──────────────────────────

/// Gauge: booking flows currently suspended on a phone gate.
pub const PHONE_GATES_ACTIVE: &str = "consulta_phone_gates_active";

/// Histogram: time a flow spent suspended on the phone gate, in seconds.
pub const PHONE_GATE_WAIT_SECONDS: &str = "consulta_phone_gate_wait_seconds";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}

/// Map a booking outcome to a short label for metrics.
pub fn outcome_label(result: &Result<Ulid, BookingError>) -> &'static str {
    match result {
        Ok(_) => "committed",
        Err(BookingError::Unauthenticated) => "unauthenticated",
        Err(BookingError::PhoneRequired) => "phone_required",
        Err(BookingError::SlotUnavailable) => "slot_unavailable",
        Err(BookingError::Persistence(_)) => "persistence",
    }
}
