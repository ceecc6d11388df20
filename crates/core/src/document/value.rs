use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde_json::Value;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A date-time as stored in a document: wall-clock fields plus the offset
/// they were recorded in, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub local: NaiveDateTime,
    pub offset: Option<FixedOffset>,
}

impl Timestamp {
    pub fn naive(local: NaiveDateTime) -> Self {
        Self {
            local,
            offset: None,
        }
    }

    pub fn with_offset(value: DateTime<FixedOffset>) -> Self {
        Self {
            local: value.naive_local(),
            offset: Some(*value.offset()),
        }
    }

    /// Drop the offset, keeping the wall-clock fields as they are.
    pub fn strip_offset(self) -> Self {
        Self::naive(self.local)
    }

    pub fn is_naive(&self) -> bool {
        self.offset.is_none()
    }

    /// Parse an RFC 3339 date-time (offset kept) or a naive ISO date-time.
    pub fn parse(input: &str) -> Option<Self> {
        if let Ok(value) = DateTime::parse_from_rfc3339(input) {
            return Some(Self::with_offset(value));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
            .map(Self::naive)
    }

    fn to_json(self) -> Value {
        match self.offset {
            Some(offset) => match self.local.and_local_timezone(offset).single() {
                Some(value) => Value::String(value.to_rfc3339()),
                None => Value::String(self.local.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
            },
            None => Value::String(self.local.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
        }
    }
}

/// A single field of a schema-less document.
///
/// Absence is represented by the field not being in the map at all; `Null`
/// is an explicit null stored in the document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    DateTime(Timestamp),
    /// Nested arrays and maps, kept as-is.
    Json(Value),
}

impl FieldValue {
    /// Decode a stored JSON value. Strings that read as date-times become
    /// [`FieldValue::DateTime`].
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Int(i),
                None => FieldValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => match Timestamp::parse(&s) {
                Some(ts) => FieldValue::DateTime(ts),
                None => FieldValue::String(s),
            },
            nested @ (Value::Array(_) | Value::Object(_)) => FieldValue::Json(nested),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Int(i) => Value::from(*i),
            FieldValue::Float(f) => Value::from(*f),
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::DateTime(ts) => ts.to_json(),
            FieldValue::Json(v) => v.clone(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn parse_keeps_offset_and_wall_clock() {
        let ts = Timestamp::parse("2025-06-04T10:00:00-03:00").unwrap();
        assert_eq!(ts.local, at(2025, 6, 4, 10, 0));
        assert_eq!(ts.offset, FixedOffset::west_opt(3 * 3600));
    }

    #[test]
    fn parse_naive_forms() {
        let ts = Timestamp::parse("2025-06-04T10:00:00").unwrap();
        assert!(ts.is_naive());
        let ts = Timestamp::parse("2025-06-04 10:00:00.250").unwrap();
        assert!(ts.is_naive());
        assert!(Timestamp::parse("Norte").is_none());
        assert!(Timestamp::parse("2025-06-04").is_none());
    }

    #[test]
    fn decode_json_values() {
        assert_eq!(FieldValue::from_json(json!(null)), FieldValue::Null);
        assert_eq!(FieldValue::from_json(json!(3)), FieldValue::Int(3));
        assert_eq!(FieldValue::from_json(json!(2.5)), FieldValue::Float(2.5));
        assert_eq!(FieldValue::from_json(json!("C1")), FieldValue::from("C1"));
        assert!(matches!(
            FieldValue::from_json(json!("2025-01-05T08:30:00Z")),
            FieldValue::DateTime(Timestamp { offset: Some(_), .. })
        ));
        assert_eq!(
            FieldValue::from_json(json!({"a": 1})),
            FieldValue::Json(json!({"a": 1}))
        );
    }

    #[test]
    fn timestamp_json_round_trips_offset() {
        let value = FieldValue::from_json(json!("2025-06-04T10:00:00-03:00"));
        assert_eq!(value.to_json(), json!("2025-06-04T10:00:00-03:00"));
    }
}
