//! Item records bound to table rows.
//!
//! An [`Item`] is an opaque key-value record supplied by the host. The table
//! never mutates items; rows hold an [`ItemRef`] back-reference and selection
//! correlates rows to items by pointer identity, not by field values.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Shared handle to an item. Identity (`Arc::ptr_eq`) is what selection uses.
pub type ItemRef = Arc<Item>;

/// An ordered key-value record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Item {
    fields: Map<String, Value>,
}

impl Item {
    /// Create an empty item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field (builder).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Parse a single JSON object into an item.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Wrap this item in a shared handle.
    pub fn into_ref(self) -> ItemRef {
        Arc::new(self)
    }

    /// Raw field lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All fields, in insertion order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The value written when binding a field to an element property.
    ///
    /// Missing and `null` fields become an empty string.
    pub fn field_value(&self, key: &str) -> Value {
        match self.fields.get(key) {
            None | Some(Value::Null) => Value::String(String::new()),
            Some(value) => value.clone(),
        }
    }

    /// The text written when binding a field to an attribute or text content.
    pub fn field_text(&self, key: &str) -> String {
        self.fields.get(key).map(value_text).unwrap_or_default()
    }
}

impl From<Map<String, Value>> for Item {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// Parse a JSON array of objects into item handles.
pub fn items_from_json(input: &str) -> Result<Vec<ItemRef>, serde_json::Error> {
    let items: Vec<Item> = serde_json::from_str(input)?;
    Ok(items.into_iter().map(Arc::new).collect())
}

/// Stringify a JSON value the way it is shown in a cell.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        compound => compound.to_string(),
    }
}
