//! Small shared utilities.

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current time in seconds since the Unix epoch.
///
/// Used to timestamp host notifications. Falls back to zero if the system
/// clock is before the epoch rather than panicking.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
