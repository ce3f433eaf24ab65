use std::time::Duration;

/// Event poll interval in milliseconds. The model itself ticks once per
/// whole second; polling faster keeps the UI responsive between ticks.
pub const DEFAULT_POLL_MS: u64 = 250;

/// Interval between model ticks in milliseconds
pub const MODEL_TICK_MS: u64 = 1000;

/// Get the event poll duration
pub fn poll_duration() -> Duration {
    Duration::from_millis(DEFAULT_POLL_MS)
}

/// Get the model tick duration
pub fn model_tick_duration() -> Duration {
    Duration::from_millis(MODEL_TICK_MS)
}
