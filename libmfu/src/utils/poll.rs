//! Poll interval helpers used while waiting for a tag to enter the field.

use std::time::Duration;

use crate::constants::DEFAULT_POLL_INTERVAL_MS;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Delay between selection attempts in wait-for-tag mode.
pub fn default_poll_interval() -> Duration {
    ms(DEFAULT_POLL_INTERVAL_MS)
}
