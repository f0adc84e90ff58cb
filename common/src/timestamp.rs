//! Timestamps as the backend sends them.
//!
//! Most endpoints emit RFC 3339, but some emit a zone-less local date-time
//! (`2025-03-10T12:30:00.123`). Zone-less values are taken as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serializer};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Start of a calendar day, for date-range filters.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default())
}

/// Last millisecond of a calendar day.
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(
        &date
            .and_hms_milli_opt(23, 59, 59, 999)
            .unwrap_or_default(),
    )
}

/// Parse an `<input type="date">` value.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&dt.to_rfc3339())
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        dt: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) => super::parse(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {s}"))),
        }
    }
}

/// For fields the client can live without. Missing, null or unreadable
/// values become `None` instead of failing the enclosing record. Jackson
/// arrays (`[2025,3,10,12,30,0]`) and epoch milliseconds are understood too.
pub mod lenient {
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub use super::option::serialize;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Ok(from_value(&Value::deserialize(deserializer)?))
    }

    fn from_value(value: &Value) -> Option<DateTime<Utc>> {
        match value {
            Value::String(s) => super::parse(s),
            Value::Number(n) => n
                .as_i64()
                .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
            Value::Array(parts) => from_parts(parts),
            _ => None,
        }
    }

    fn from_parts(parts: &[Value]) -> Option<DateTime<Utc>> {
        // Trailing fields may be omitted; they count as zero.
        let field = |i: usize| {
            parts
                .get(i)
                .map_or(Some(0), |v| v.as_u64().and_then(|n| u32::try_from(n).ok()))
        };
        let year = i32::try_from(parts.first()?.as_i64()?).ok()?;
        let date = NaiveDate::from_ymd_opt(year, field(1)?, field(2)?)?;
        let time = date.and_hms_nano_opt(field(3)?, field(4)?, field(5)?, field(6)?)?;
        Some(Utc.from_utc_datetime(&time))
    }
}
