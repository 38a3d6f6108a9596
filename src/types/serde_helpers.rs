//! Lenient field deserializers for Swarm payloads.
//!
//! The service writes `null` for empty collections and numbers, and emits
//! `DateTime` values without an offset. Neither should cost the caller the rest
//! of the record.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Deserializes `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes an optional timestamp. Values without an offset are read as UTC.
pub(crate) fn utc_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) => parse_utc_timestamp(&value).map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Parses an RFC 3339 timestamp, falling back to an offset-less one in UTC.
pub(crate) fn parse_utc_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(timestamp) => Ok(timestamp.with_timezone(&Utc)),
        Err(_) => NaiveDateTime::parse_from_str(value, NAIVE_TIMESTAMP_FORMAT)
            .map(|naive| Utc.from_utc_datetime(&naive)),
    }
}
