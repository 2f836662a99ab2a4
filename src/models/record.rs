use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Value;

/// One park entry: a flat mapping from column name to value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Build a record from `(column, value)` pairs. Later duplicates win.
    ///
    /// # Examples
    ///
    /// ```
    /// use park_inventory_analyzer::{Record, Value};
    ///
    /// let park = Record::from_pairs([("district", Value::from("A")), ("area", Value::Integer(10))]);
    /// assert_eq!(park.get("area"), Some(&Value::Integer(10)));
    /// ```
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self {
            fields: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Look up the value for a column.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    /// Whether this record carries a value for `column`.
    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Column names present in this record, in sorted order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
