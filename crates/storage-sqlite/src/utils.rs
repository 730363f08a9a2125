//! Shared helpers for SQLite repositories.

use chrono::Utc;
use log::warn;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Timestamp layout used by the record store for `created_at`/`updated_at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3fZ";

pub fn now_timestamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a TEXT decimal column. Unparseable values read as zero and are
/// logged with the owning row.
pub fn parse_decimal_column(value: &str, column: &str, row_id: &str) -> Decimal {
    Decimal::from_str(value.trim())
        .or_else(|_| Decimal::from_scientific(value.trim()))
        .unwrap_or_else(|e| {
            warn!(
                "Invalid decimal '{}' in column '{}' of row {}: {}. Reading as 0.",
                value, column, row_id, e
            );
            Decimal::ZERO
        })
}

/// SQLite's default bound-parameter ceiling is 999; stay under it.
pub const SQLITE_MAX_VARIABLES: usize = 900;

/// Splits `ids` into slices that fit in a single `IN (...)` clause, leaving
/// room for `reserved` other bound parameters in the same statement.
pub fn chunk_ids(ids: &[String], reserved: usize) -> std::slice::Chunks<'_, String> {
    let size = SQLITE_MAX_VARIABLES.saturating_sub(reserved).max(1);
    ids.chunks(size)
}
