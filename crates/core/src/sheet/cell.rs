use chrono::{NaiveDate, NaiveDateTime};

use crate::document::{FieldValue, Timestamp};

/// A single spreadsheet cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Reduce a date-time cell to its calendar date. Text is parsed first;
    /// anything that is not a date-time is returned unchanged.
    pub fn into_date(self) -> Cell {
        match self {
            Cell::DateTime(dt) => Cell::Date(dt.date()),
            Cell::Text(text) => match Timestamp::parse(&text) {
                Some(ts) => Cell::Date(ts.local.date()),
                None => Cell::Text(text),
            },
            other => other,
        }
    }
}

impl From<&FieldValue> for Cell {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Null => Cell::Empty,
            FieldValue::Bool(b) => Cell::Bool(*b),
            FieldValue::Int(i) => Cell::Int(*i),
            FieldValue::Float(f) => Cell::Float(*f),
            FieldValue::String(s) => Cell::Text(s.clone()),
            FieldValue::DateTime(ts) => Cell::DateTime(ts.local),
            FieldValue::Json(v) => Cell::Text(v.to_string()),
        }
    }
}
