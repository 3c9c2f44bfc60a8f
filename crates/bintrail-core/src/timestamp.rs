//! Timestamp persistence format.
//!
//! All state transitions of one reconciliation run carry the same logical
//! time, stored as RFC 3339 text. Build times stay in epoch seconds as
//! reported by the payload and are only converted for the projection.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

use crate::{error::Error, BintrailResult};

pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn parse_timestamp(raw: &str) -> BintrailResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| Error::InvalidTimestamp(raw.to_string()))
}

/// Converts payload epoch seconds to a timestamp, `None` for out-of-range
/// values.
pub fn buildtime_from_epoch(secs: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0).single()
}
