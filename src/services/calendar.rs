//! Calendar helpers: ISO date parsing and pure date arithmetic.
//!
//! Plans work on `NaiveDate` values. A calendar date has no time-of-day or
//! zone, so stepping day by day can never drift across a daylight-saving
//! boundary.

use chrono::{DateTime, Duration, NaiveDate};

use crate::error::{PlanError, PlanResult};

/// Parse a `YYYY-MM-DD` date. Full RFC 3339 timestamps are accepted and
/// reduced to their calendar date; anything else is rejected.
pub fn parse_iso_date(raw: &str) -> PlanResult<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|_| PlanError::InvalidDate(raw.to_string()))
}

/// `date` shifted by `days` (negative moves backwards)
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Whole weeks from `start` to `race`, rounding a partial week up
pub fn weeks_between(start: NaiveDate, race: NaiveDate) -> u32 {
    let days = (race - start).num_days().max(0);
    ((days + 6) / 7) as u32
}
