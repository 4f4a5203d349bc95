//! Flat named-field attribute records.
//!
//! An [`AttributeTree`] is the wire format shared by long-term storage and
//! the item-snapshot transform. Each field holds one of three primitive
//! kinds: a string, a 32-bit float, or a 64-bit double.
//!
//! Typed getters return `None` when a key is absent *or* holds a value of
//! a different kind. Callers layer their documented defaults on top of
//! that, so a corrupt field never prevents the rest of a record from
//! loading.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single typed attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum AttributeValue {
    /// UTF-8 string.
    String(String),
    /// 32-bit float.
    Float(f32),
    /// 64-bit double.
    Double(f64),
}

impl AttributeValue {
    /// Short name of the value's kind, for diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
        }
    }
}

/// An ordered map of named attribute values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeTree {
    /// Field name to value.
    values: BTreeMap<String, AttributeValue>,
}

impl AttributeTree {
    /// Create an empty record.
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Set a string field.
    pub fn set_string(&mut self, key: &str, value: impl Into<String>) {
        self.values
            .insert(key.to_owned(), AttributeValue::String(value.into()));
    }

    /// Set a float field.
    pub fn set_float(&mut self, key: &str, value: f32) {
        self.values.insert(key.to_owned(), AttributeValue::Float(value));
    }

    /// Set a double field.
    pub fn set_double(&mut self, key: &str, value: f64) {
        self.values.insert(key.to_owned(), AttributeValue::Double(value));
    }

    /// Read a string field.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(AttributeValue::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Read a float field.
    pub fn get_float(&self, key: &str) -> Option<f32> {
        match self.values.get(key) {
            Some(AttributeValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    /// Read a double field.
    pub fn get_double(&self, key: &str) -> Option<f64> {
        match self.values.get(key) {
            Some(AttributeValue::Double(v)) => Some(*v),
            _ => None,
        }
    }

    /// Raw access to a field of any kind.
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.values.get(key)
    }

    /// Whether a field with this name exists.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Remove a field, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<AttributeValue> {
        self.values.remove(key)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
