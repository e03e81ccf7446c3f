//! Decoding of backend date fields.
//!
//! The backend serializes `LocalDate`/`LocalDateTime` either as ISO strings or, depending on
//! its Jackson configuration, as `[year, month, day, ...]` arrays or `{year, month, day}`
//! objects. Everything funnels into a `NaiveDate`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const MONTH_NAMES: [&str; 12] = [
    "JANUARY", "FEBRUARY", "MARCH", "APRIL", "MAY", "JUNE", "JULY", "AUGUST", "SEPTEMBER",
    "OCTOBER", "NOVEMBER", "DECEMBER",
];

/// Extract the calendar date from any of the shapes the backend produces
pub fn parse_flexible(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_date_str(s),
        Value::Array(parts) => {
            let year = parts.first()?.as_i64()?;
            let month = parts.get(1)?.as_u64()?;
            let day = parts.get(2)?.as_u64()?;
            NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
        }
        Value::Object(fields) => {
            let year = fields.get("year")?.as_i64()?;
            let month = fields
                .get("monthValue")
                .or_else(|| fields.get("month"))
                .and_then(month_number)?;
            let day = fields
                .get("dayOfMonth")
                .or_else(|| fields.get("day"))?
                .as_u64()?;
            NaiveDate::from_ymd_opt(year as i32, month, day as u32)
        }
        _ => None,
    }
}

fn month_number(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().map(|m| m as u32),
        Value::String(name) => MONTH_NAMES
            .iter()
            .position(|m| m.eq_ignore_ascii_case(name))
            .map(|idx| idx as u32 + 1),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Some(dt.date());
    }

    // Bare date, or the date prefix of anything longer
    s.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// `deserialize_with` adapter for optional date fields
pub fn deserialize_opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_flexible))
}

/// `deserialize_with` adapter mapping `null` to the type's default
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_local_datetime_string() {
        assert_eq!(parse_flexible(&json!("2024-03-09T18:45:00")), Some(ymd(2024, 3, 9)));
        assert_eq!(
            parse_flexible(&json!("2024-03-09T18:45:00.123456")),
            Some(ymd(2024, 3, 9))
        );
    }

    #[test]
    fn test_rfc3339_keeps_its_own_offset_date() {
        assert_eq!(
            parse_flexible(&json!("2024-03-09T23:30:00-05:00")),
            Some(ymd(2024, 3, 9))
        );
    }

    #[test]
    fn test_plain_date() {
        assert_eq!(parse_flexible(&json!("2023-12-31")), Some(ymd(2023, 12, 31)));
    }

    #[test]
    fn test_array_triple() {
        assert_eq!(parse_flexible(&json!([2024, 2, 29, 7, 15])), Some(ymd(2024, 2, 29)));
        assert_eq!(parse_flexible(&json!([2023, 2, 29])), None);
    }

    #[test]
    fn test_structured_object() {
        assert_eq!(
            parse_flexible(&json!({"year": 2024, "month": "MARCH", "dayOfMonth": 4})),
            Some(ymd(2024, 3, 4))
        );
        assert_eq!(
            parse_flexible(&json!({"year": 2024, "month": 11, "day": 30})),
            Some(ymd(2024, 11, 30))
        );
    }

    #[test]
    fn test_garbage_is_none() {
        assert_eq!(parse_flexible(&json!("yesterday")), None);
        assert_eq!(parse_flexible(&json!(17)), None);
        assert_eq!(parse_flexible(&Value::Null), None);
    }
}
