use super::model::{FieldMap, Record};
use super::value::FieldValue;

/// Build a [`Record`] from a document's fields.
///
/// When `id` is given it is stored under the `id` key, replacing any existing
/// `id` field. Date-time fields lose their offset; the wall-clock value is
/// kept, not converted to UTC.
pub fn normalize(mut fields: FieldMap, id: Option<&str>) -> Record {
    if let Some(id) = id {
        fields.insert("id", FieldValue::String(id.to_string()));
    }
    for value in fields.values_mut() {
        if let FieldValue::DateTime(ts) = value {
            *ts = ts.strip_offset();
        }
    }
    Record::from_normalized(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Timestamp;
    use chrono::NaiveDate;

    fn fields(entries: Vec<(&str, FieldValue)>) -> FieldMap {
        entries.into_iter().collect()
    }

    #[test]
    fn strips_offset_without_converting() {
        let ts = Timestamp::parse("2025-06-04T10:00:00-03:00").unwrap();
        let record = normalize(fields(vec![("startDateCamp", FieldValue::DateTime(ts))]), None);

        let Some(FieldValue::DateTime(out)) = record.get("startDateCamp") else {
            panic!("expected a date-time field");
        };
        assert!(out.is_naive());
        assert_eq!(
            out.local,
            NaiveDate::from_ymd_opt(2025, 6, 4)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn injects_id_over_existing_field() {
        let record = normalize(
            fields(vec![("id", FieldValue::from("stale")), ("nameCamp", FieldValue::from("Norte"))]),
            Some("doc-7"),
        );
        assert_eq!(record.get("id"), Some(&FieldValue::from("doc-7")));
        assert_eq!(record.fields().keys().collect::<Vec<_>>(), vec!["id", "nameCamp"]);
    }

    #[test]
    fn injected_id_is_appended() {
        let record = normalize(fields(vec![("nameCamp", FieldValue::from("Norte"))]), Some("doc-7"));
        assert_eq!(record.fields().keys().collect::<Vec<_>>(), vec!["nameCamp", "id"]);
    }

    #[test]
    fn no_id_without_injection() {
        let record = normalize(fields(vec![("especie", FieldValue::from("Nothofagus"))]), None);
        assert!(record.get("id").is_none());
    }

    #[test]
    fn other_values_pass_through() {
        let input = fields(vec![
            ("a", FieldValue::Int(1)),
            ("b", FieldValue::Bool(true)),
            ("c", FieldValue::Null),
        ]);
        let record = normalize(input.clone(), None);
        assert_eq!(record.fields(), &input);
    }
}
