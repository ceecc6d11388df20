//! Document filters understood by every [`DocumentStore`](crate::store::DocumentStore).

use crate::document::{FieldMap, FieldValue};

/// Equality filter on a single top-level field.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    field: String,
    value: FieldValue,
}

impl Filter {
    pub fn field_eq(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Evaluate the filter against a document's fields. A missing field
    /// never matches, not even a `Null` filter value.
    pub fn matches(&self, fields: &FieldMap) -> bool {
        fields.get(&self.field).is_some_and(|v| *v == self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(entries: Vec<(&str, FieldValue)>) -> FieldMap {
        entries.into_iter().collect()
    }

    #[test]
    fn matches_equal_string() {
        let filter = Filter::field_eq("campanaID", "C1");
        assert!(filter.matches(&doc(vec![("campanaID", FieldValue::from("C1"))])));
        assert!(!filter.matches(&doc(vec![("campanaID", FieldValue::from("C2"))])));
    }

    #[test]
    fn type_mismatch_does_not_match() {
        let filter = Filter::field_eq("campanaID", "1");
        assert!(!filter.matches(&doc(vec![("campanaID", FieldValue::Int(1))])));
    }

    #[test]
    fn missing_field_never_matches() {
        let filter = Filter::field_eq("campanaID", FieldValue::Null);
        assert!(!filter.matches(&doc(vec![("other", FieldValue::Null)])));
    }
}
