//! Key-value fields attached to log events
//!
//! `Fields` carries the per-call additional arguments, the static logger
//! context and the ambient fields. Values are arbitrary JSON values so that
//! nested structures survive into the output record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered key-value map; insertion order is kept in the output record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields {
    fields: Map<String, Value>,
}

impl Fields {
    /// Create a new empty field set
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Add a field (builder version)
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field, overwriting any previous value for the key
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copy every field into `target`, overriding keys already present
    pub fn merge_into(&self, target: &mut Map<String, Value>) {
        for (key, value) in &self.fields {
            target.insert(key.clone(), value.clone());
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for Fields {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Convert an error and its source chain into a structured message value
///
/// ```
/// use chunked_event_logger::core::error_message;
///
/// let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config missing");
/// let value = error_message(&err);
/// assert_eq!(value["message"], "config missing");
/// ```
pub fn error_message(err: &(dyn std::error::Error + 'static)) -> Value {
    let mut object = Map::new();
    object.insert("message".to_string(), Value::String(err.to_string()));

    let mut causes = Vec::new();
    let mut source = err.source();
    while let Some(cause) = source {
        causes.push(Value::String(cause.to_string()));
        source = cause.source();
    }
    if !causes.is_empty() {
        object.insert("causes".to_string(), Value::Array(causes));
    }

    Value::Object(object)
}
