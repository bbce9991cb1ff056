//! Timestamps for crash search queries.
//!
//! The search backend runs in UTC and only accepts `YYYY-MM-DDTHH:MM:SS`
//! with no zone suffix and no fractional seconds.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Offset, TimeZone, Timelike};

use hockey_core::error::{HockeyError, HockeyResult};

/// A point in time as callers hand it over: either zone-aware, or a civil
/// date-time read as UTC wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    Zoned(DateTime<FixedOffset>),
    Civil(NaiveDateTime),
}

impl Timestamp {
    /// UTC wall-clock time.
    pub fn to_utc(&self) -> NaiveDateTime {
        match self {
            Self::Zoned(dt) => dt.naive_utc(),
            Self::Civil(naive) => *naive,
        }
    }

    /// The backend's text layout, e.g. `2021-06-01T10:00:00`.
    pub fn to_query_string(&self) -> String {
        format_query_time(&self.to_utc())
    }
}

/// Render `YYYY-MM-DDTHH:MM:SS` from the individual fields. Sub-second
/// precision is dropped.
pub fn format_query_time(t: &NaiveDateTime) -> String {
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        t.year(),
        t.month(),
        t.day(),
        t.hour(),
        t.minute(),
        t.second()
    )
}

/// Parse any supported rendering and re-render it in the backend's layout.
pub fn normalize(text: &str) -> HockeyResult<String> {
    Ok(text.parse::<Timestamp>()?.to_query_string())
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(dt: DateTime<Tz>) -> Self {
        let offset = dt.offset().fix();
        Self::Zoned(dt.with_timezone(&offset))
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(naive: NaiveDateTime) -> Self {
        Self::Civil(naive)
    }
}

const CIVIL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

impl FromStr for Timestamp {
    type Err = HockeyError;

    /// Accepts RFC 3339 (`2021-06-01T10:00:00+00:00`, `...Z`), `2021-06-01
    /// 10:00:00 +0000`, `2021-06-01 10:00:00 UTC`, and zone-less civil forms
    /// with either `T` or a space as separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::Zoned(dt));
        }
        if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f %z") {
            return Ok(Self::Zoned(dt));
        }

        let civil = s.strip_suffix(" UTC").unwrap_or(s).trim_end();
        CIVIL_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(civil, fmt).ok())
            .map(Self::Civil)
            .ok_or_else(|| HockeyError::Precondition(format!("unrecognized timestamp: {s}")))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}
