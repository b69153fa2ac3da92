//! Cache staleness policy.

use chrono::{DateTime, Days, Utc};

/// Number of calendar days a cached feed may be served for.
pub const MAX_CACHE_AGE_DAYS: u64 = 7;

/// Returns true if a cache saved at `timestamp` may still be served at `now`.
///
/// The age limit is added in calendar days, and a cache that is exactly
/// [`MAX_CACHE_AGE_DAYS`] old is already stale. A timestamp too close to the end of the
/// representable range to add the limit is treated as stale.
pub fn validate(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    match timestamp.checked_add_days(Days::new(MAX_CACHE_AGE_DAYS)) {
        Some(max_age) => now < max_age,
        None => false,
    }
}
