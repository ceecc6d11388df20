use serde_json::Value;
use thiserror::Error;

use super::value::FieldValue;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document {id} is not a JSON object")]
    NotAnObject { id: String },
}

/// Field name to value mapping that keeps first-insertion order.
///
/// Re-inserting an existing key replaces the value in place, so the key keeps
/// its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: Vec<(String, FieldValue)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Insert a field, returning the previous value if the key was present.
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        let key = key.into();
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut FieldValue> {
        self.entries.iter_mut().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// A document as returned by the store: its stable identifier plus fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: FieldMap,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: FieldMap) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Decode a document from its stored JSON content.
    pub fn from_json(id: impl Into<String>, content: Value) -> Result<Self, DocumentError> {
        let id = id.into();
        match content {
            Value::Object(map) => Ok(Self {
                fields: map
                    .into_iter()
                    .map(|(key, value)| (key, FieldValue::from_json(value)))
                    .collect(),
                id,
            }),
            _ => Err(DocumentError::NotAnObject { id }),
        }
    }
}

/// A flattened, normalized document ready for tabulation.
/// Every date-time field is timezone-naive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: FieldMap,
}

impl Record {
    pub(crate) fn from_normalized(fields: FieldMap) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }
}
