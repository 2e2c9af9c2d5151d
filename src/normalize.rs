//! Recursive key normalization for JSON trees.
//!
//! Every object key is rewritten by what its value is:
//!
//! | Value     | Rule                          |
//! |-----------|-------------------------------|
//! | array     | [`format_array_key`]          |
//! | object    | [`format_object_key`]         |
//! | otherwise | [`format_other_key`]          |
//!
//! Values are never touched, only keys. Two keys that normalize to the
//! same name collapse into one entry holding the later value, at the
//! position of the first.

use serde_json::{Map, Value};
use tracing::trace;

use crate::config::FormatToggles;
use crate::fmt::{format_array_key, format_object_key, format_other_key};

/// Rewrites the keys of a JSON tree according to its [`FormatToggles`].
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyNormalizer {
    toggles: FormatToggles,
}

impl KeyNormalizer {
    pub fn new(toggles: FormatToggles) -> Self {
        Self { toggles }
    }

    pub fn toggles(&self) -> &FormatToggles {
        &self.toggles
    }

    /// Build a new tree with normalized keys. The input is left as is.
    pub fn normalize(&self, tree: &Value) -> Value {
        match tree {
            Value::Object(object) if !object.is_empty() => Value::Object(self.normalize_object(object)),
            Value::Array(array) if !array.is_empty() => Value::Array(self.normalize_array(array)),
            Value::Object(_) | Value::Array(_) | Value::Null => {
                trace!("normalize: null or empty container, returned as is");
                tree.clone()
            }
            scalar => scalar.clone(),
        }
    }

    pub fn normalize_object(&self, object: &Map<String, Value>) -> Map<String, Value> {
        let mut formatted = Map::with_capacity(object.len());

        for (key, value) in object {
            let (key, value) = match value {
                Value::Array(_) => (format_array_key(key, &self.toggles), self.normalize(value)),
                Value::Object(_) => (format_object_key(key, &self.toggles), self.normalize(value)),
                _ => (format_other_key(key, &self.toggles), value.clone()),
            };
            formatted.insert(key, value);
        }

        formatted
    }

    pub fn normalize_array(&self, array: &[Value]) -> Vec<Value> {
        array.iter().map(|value| self.normalize(value)).collect()
    }
}

/// Normalize `tree` with the given toggles. See [`KeyNormalizer`].
pub fn normalize(tree: &Value, toggles: &FormatToggles) -> Value {
    KeyNormalizer::new(*toggles).normalize(tree)
}
