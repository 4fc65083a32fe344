//! Representative-timestamp resolution for a dataset's time axis
//!
//! A stats request either pins one timestep or aggregates across all of them.
//! Either way the result reports a single `time`: the exact timestep's
//! timestamp, or the temporal midpoint (epoch-mean) of the whole axis. All
//! timestamps share one reference calendar; no leap-second or calendar-variant
//! correction is performed.

use crate::errors::{ClimoStatError, Result};
use chrono::{DateTime, TimeZone, Utc};

/// Resolve the representative timestamp for a time axis.
///
/// `timestep` is 1-based; `None` (aggregate over all timesteps) yields the
/// [`mean_datetime`] of the axis.
pub fn resolve(timestamps: &[DateTime<Utc>], timestep: Option<usize>) -> Result<DateTime<Utc>> {
    if timestamps.is_empty() {
        return Err(ClimoStatError::EmptyTimeset);
    }

    match timestep {
        Some(t) => {
            if t == 0 || t > timestamps.len() {
                return Err(ClimoStatError::TimestepOutOfRange {
                    index: t,
                    len: timestamps.len(),
                });
            }
            Ok(timestamps[t - 1])
        }
        None => mean_datetime(timestamps),
    }
}

/// Temporal midpoint of a set of timestamps.
///
/// Each timestamp is converted to Unix epoch seconds, averaged (floor
/// division, whole-second precision), and converted back.
pub fn mean_datetime(timestamps: &[DateTime<Utc>]) -> Result<DateTime<Utc>> {
    if timestamps.is_empty() {
        return Err(ClimoStatError::EmptyTimeset);
    }

    // i128 so that summing many post-2100 timestamps cannot overflow.
    let sum: i128 = timestamps.iter().map(|t| t.timestamp() as i128).sum();
    let mean = sum.div_euclid(timestamps.len() as i128);

    Utc.timestamp_opt(mean as i64, 0).single().ok_or_else(|| {
        ClimoStatError::Generic(format!("Epoch mean {} is not a representable timestamp", mean))
    })
}

/// Format a timestamp as ISO-8601 UTC with whole-second precision,
/// e.g. `1985-06-30T12:00:00Z`.
pub fn format_utc(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
