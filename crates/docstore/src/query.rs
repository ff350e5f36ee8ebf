//! Query modes and their translation into request parameters.
//!
//! The service answers two kinds of find request:
//!
//! - a **text query** (`json/query`), sent as a single `q` parameter;
//! - a **key/value query** (`json/kvquery`), sent as two parallel `key` and
//!   `value` parameter lists where `key[i]` pairs with `value[i]`.
//!
//! [`Query`] has exactly these two constructors. Dynamic input (e.g. JSON
//! read from a file or command line) goes through [`Query::parse`], which is
//! the only place an unusable query shape is detected.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ErrorKind, StoreError};
use crate::types::{ParamValue, Params, RequestOptions, Resource};

/// Message carried by the `INVALID-QUERY` construction error.
pub const INVALID_QUERY_MESSAGE: &str = "Please provide either a string or a kv object";

// ---------------------------------------------------------------------------
// Key/value query
// ---------------------------------------------------------------------------

/// An equality query: each field must equal its value.
///
/// Fields keep the order in which they were added; that order is the order of
/// the `key` and `value` lists on the wire. Setting a field twice replaces the
/// value in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeyValueQuery {
    pairs: Vec<(String, Value)>,
}

impl KeyValueQuery {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces `field`.
    #[must_use]
    pub fn field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Adds or replaces `field` in place.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == field) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((field, value)),
        }
    }

    /// Returns the value required for `field`.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.pairs.iter().find(|(k, _)| k == field).map(|(_, v)| v)
    }

    /// Iterates over `(field, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Splits into positionally aligned `key` and `value` lists.
    pub fn to_key_value_lists(&self) -> (Vec<String>, Vec<String>) {
        self.pairs
            .iter()
            .map(|(k, v)| (k.clone(), ParamValue::scalar_from_json(v)))
            .unzip()
    }
}

impl From<Map<String, Value>> for KeyValueQuery {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for KeyValueQuery {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = KeyValueQuery::new();
        for (k, v) in iter {
            query.set(k, v);
        }
        query
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// A find query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Query {
    /// Free-text query string.
    Text(String),
    /// Field/value equality query.
    KeyValue(KeyValueQuery),
}

impl Query {
    /// Parses dynamic input into a query.
    ///
    /// Strings become [`Query::Text`] and objects become [`Query::KeyValue`]
    /// (in the object's iteration order). Anything else fails with
    /// [`ErrorKind::InvalidQuery`].
    pub fn parse(value: Value) -> Result<Self, StoreError> {
        match value {
            Value::String(text) => Ok(Query::Text(text)),
            Value::Object(map) => Ok(Query::KeyValue(map.into())),
            _ => Err(StoreError::construction(
                INVALID_QUERY_MESSAGE,
                ErrorKind::InvalidQuery,
            )),
        }
    }

    /// Builds a text query.
    pub fn text(text: impl Into<String>) -> Self {
        Query::Text(text.into())
    }

    /// Returns the resource this query is sent to.
    pub fn resource(&self) -> Resource {
        match self {
            Query::Text(_) => Resource::Query,
            Query::KeyValue(_) => Resource::KvQuery,
        }
    }

    /// Returns the parameters this query contributes.
    pub fn params(&self) -> Params {
        match self {
            Query::Text(q) => Params::new().with("q", q.as_str()),
            Query::KeyValue(kv) => {
                let (keys, values) = kv.to_key_value_lists();
                Params::new()
                    .with("key", ParamValue::Many(keys))
                    .with("value", ParamValue::Many(values))
            }
        }
    }
}

impl From<&str> for Query {
    fn from(value: &str) -> Self {
        Query::Text(value.to_string())
    }
}

impl From<String> for Query {
    fn from(value: String) -> Self {
        Query::Text(value)
    }
}

impl From<KeyValueQuery> for Query {
    fn from(value: KeyValueQuery) -> Self {
        Query::KeyValue(value)
    }
}

/// Resource and parameters of a find request.
///
/// The query's own parameters (`q`, or `key` and `value`) override any
/// caller option with the same name.
pub fn dispatch(query: &Query, options: RequestOptions) -> (Resource, Params) {
    let params = options.into_params().merged_with(query.params());
    (query.resource(), params)
}
