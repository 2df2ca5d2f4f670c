use std::time::Duration;

/// Engine tuning knobs.
///
/// `from_env` reads `CONSULTA_*` variables and falls back to the defaults
/// for anything unset or unparsable.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// How long a booking attempt stays suspended on the phone gate before
    /// the attempt aborts as if the prompt had been dismissed.
    pub phone_gate_timeout: Duration,
    /// Capacity of each per-day refresh broadcast channel.
    pub refresh_channel_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            phone_gate_timeout: Duration::from_secs(120),
            refresh_channel_capacity: 256,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let timeout_secs: u64 = lookup("CONSULTA_PHONE_GATE_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.phone_gate_timeout.as_secs());
        let capacity: usize = lookup("CONSULTA_REFRESH_CHANNEL_CAPACITY")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.refresh_channel_capacity);
        Self {
            phone_gate_timeout: Duration::from_secs(timeout_secs),
            refresh_channel_capacity: capacity,
        }
    }
}
