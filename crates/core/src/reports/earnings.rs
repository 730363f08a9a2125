//! Hours and earnings over a single rate interval.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::errors::EarningsError;
use crate::jobs::JobRate;
use crate::reports::reports_model::Earnings;

/// Layout the record store uses for datetime fields.
const STORE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.fZ";

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Parses an instant stored as RFC 3339 or in the record store's
/// `YYYY-MM-DD HH:MM:SS[.fff]Z` layout.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, STORE_DATETIME_FORMAT)
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// Fractional hours between two instants, millisecond resolution.
///
/// Negative when `end` precedes `start`; callers decide what that means.
pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> Decimal {
    let millis = (end - start).num_milliseconds();
    Decimal::from(millis) / Decimal::from(MILLIS_PER_HOUR)
}

/// Hours and earnings for one rate interval.
///
/// An interval that ends before it starts is rejected rather than allowed to
/// subtract from the totals. A zero-length interval yields zero.
pub fn calculate_earnings(rate: &JobRate) -> Result<Earnings, EarningsError> {
    let start = parse_instant(&rate.start_time).ok_or_else(|| EarningsError::InvalidTimestamp {
        rate_id: rate.id.clone(),
        field: "startTime",
        value: rate.start_time.clone(),
    })?;
    let end = parse_instant(&rate.end_time).ok_or_else(|| EarningsError::InvalidTimestamp {
        rate_id: rate.id.clone(),
        field: "endTime",
        value: rate.end_time.clone(),
    })?;

    if end < start {
        return Err(EarningsError::InvertedInterval {
            rate_id: rate.id.clone(),
            start: rate.start_time.clone(),
            end: rate.end_time.clone(),
        });
    }

    let hours = hours_between(start, end);
    let earnings = hours
        .checked_mul(rate.rate_value)
        .ok_or_else(|| EarningsError::Overflow {
            rate_id: rate.id.clone(),
        })?;
    Ok(Earnings { hours, earnings })
}
