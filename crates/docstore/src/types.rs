//! Shared value types for requests and responses.
//!
//! Unlike the identifiers in [`crate::identifiers`], these types carry
//! structure: query-string parameters, pagination windows, per-call options
//! and the response a transport hands back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Method and resource
// ---------------------------------------------------------------------------

/// HTTP method of a request descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Put,
    Post,
    Delete,
}

impl Method {
    /// Returns the method name as sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical endpoint group a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// Document storage: insert, get, destroy.
    #[serde(rename = "json/store")]
    Store,
    /// Free-text query.
    #[serde(rename = "json/query")]
    Query,
    /// Key/value equality query.
    #[serde(rename = "json/kvquery")]
    KvQuery,
    /// Structured custom query.
    #[serde(rename = "json/customquery")]
    CustomQuery,
    /// Server information.
    #[serde(rename = "manage")]
    Manage,
    /// Field management.
    #[serde(rename = "manage/field")]
    Field,
    /// Range-index management.
    #[serde(rename = "manage/range")]
    Range,
}

impl Resource {
    /// Returns the resource path, e.g. `"json/store"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Store => "json/store",
            Resource::Query => "json/query",
            Resource::KvQuery => "json/kvquery",
            Resource::CustomQuery => "json/customquery",
            Resource::Manage => "manage",
            Resource::Field => "manage/field",
            Resource::Range => "manage/range",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Query-string parameters
// ---------------------------------------------------------------------------

/// Value of a single query-string parameter.
///
/// A [`ParamValue::Many`] is sent by repeating the key once per element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    One(String),
    Many(Vec<String>),
}

impl ParamValue {
    /// Renders a JSON value as a query-string scalar.
    ///
    /// Strings are taken verbatim, `null` becomes the empty string, and every
    /// other value is rendered as its JSON text (`1`, `true`, `{"a":1}`).
    pub fn scalar_from_json(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// Returns the single value, or `None` for a list.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            ParamValue::One(v) => Some(v),
            ParamValue::Many(_) => None,
        }
    }

    /// Iterates over the scalar values in wire order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            ParamValue::One(v) => std::slice::from_ref(v),
            ParamValue::Many(vs) => vs,
        };
        slice.iter().map(String::as_str)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::One(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::One(value)
    }
}

macro_rules! param_from_display {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    ParamValue::One(value.to_string())
                }
            }
        )*
    };
}

param_from_display!(bool, i32, i64, u32, u64, usize, f64);

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::Many(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        ParamValue::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// Query-string parameters of a request, keyed by name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Option<ParamValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder form of [`Params::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.0.remove(key)
    }

    /// Returns `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over `(key, value)` entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns a new set containing `self` overlaid with `overrides`.
    ///
    /// Keys present in `overrides` win.
    #[must_use]
    pub fn merged_with(mut self, overrides: Params) -> Self {
        self.0.extend(overrides.0);
        self
    }

    /// Flattens into wire pairs, repeating the key for list values.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .flat_map(|(k, v)| v.values().map(move |s| (k.clone(), s.to_string())))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ---------------------------------------------------------------------------
// Pagination window
// ---------------------------------------------------------------------------

/// One-based, inclusive pagination window of a query.
///
/// Bounds are forwarded to the service as the `start` and `end` parameters;
/// the client does not validate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Window {
    pub start: Option<u64>,
    pub end: Option<u64>,
}

impl Window {
    /// A window selecting exactly the result ranked `n`.
    pub fn single(n: u64) -> Self {
        Self {
            start: Some(n),
            end: Some(n),
        }
    }

    /// A window selecting results `start..=end`.
    pub fn range(start: u64, end: u64) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Returns `true` when both bounds are set and equal.
    ///
    /// A singular window asks for one ranked result; responses to it are
    /// unwrapped to that single document.
    pub fn is_singular(&self) -> bool {
        matches!((self.start, self.end), (Some(s), Some(e)) if s == e)
    }
}

// ---------------------------------------------------------------------------
// Per-call options
// ---------------------------------------------------------------------------

/// Optional extra query-string parameters of an operation.
///
/// Options are consumed by value; the client never hands a caller back a
/// modified copy of their options.
///
/// The `start` and `end` keys are the pagination window: setting them through
/// [`RequestOptions::param`] with an integer value is the same as calling
/// [`RequestOptions::start`] / [`RequestOptions::end`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestOptions {
    window: Window,
    params: Params,
}

impl RequestOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying only a pagination window.
    pub fn window(window: Window) -> Self {
        Self {
            window,
            params: Params::new(),
        }
    }

    /// Sets the first ranked result to return.
    #[must_use]
    pub fn start(mut self, start: u64) -> Self {
        self.window.start = Some(start);
        self
    }

    /// Sets the last ranked result to return.
    #[must_use]
    pub fn end(mut self, end: u64) -> Self {
        self.window.end = Some(end);
        self
    }

    /// Adds an extra query-string parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        let key = key.into();
        let value = value.into();
        let bound = value.as_single().and_then(|v| v.parse::<u64>().ok());
        match bound {
            Some(n) if key == "start" => self.window.start = Some(n),
            Some(n) if key == "end" => self.window.end = Some(n),
            _ => {
                self.params.insert(key, value);
            }
        }
        self
    }

    /// Returns the pagination window.
    pub fn pagination(&self) -> Window {
        self.window
    }

    /// Returns the extra parameters, excluding the window.
    pub fn extra(&self) -> &Params {
        &self.params
    }

    /// Returns `true` when nothing is set.
    pub fn is_empty(&self) -> bool {
        self.window == Window::default() && self.params.is_empty()
    }

    /// Converts into wire parameters, window bounds included.
    pub fn into_params(self) -> Params {
        let mut params = self.params;
        if let Some(start) = self.window.start {
            params.insert("start", start);
        }
        if let Some(end) = self.window.end {
            params.insert("end", end);
        }
        params
    }
}

impl From<Params> for RequestOptions {
    fn from(params: Params) -> Self {
        params
            .0
            .into_iter()
            .fold(RequestOptions::new(), |opts, (k, v)| opts.param(k, v))
    }
}

impl From<Window> for RequestOptions {
    fn from(window: Window) -> Self {
        RequestOptions::window(window)
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Response headers, lower-cased names mapped to values.
///
/// Repeated headers are joined with `", "`.
pub type Headers = BTreeMap<String, String>;

/// A successful response: the parsed JSON body and the response headers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    pub body: Value,
    pub headers: Headers,
}

impl Response {
    /// Creates a response with a body and no headers.
    pub fn new(body: Value) -> Self {
        Self {
            body,
            headers: Headers::new(),
        }
    }

    /// Returns the `results` sequence of a result envelope, if the body is one.
    pub fn results(&self) -> Option<&Vec<Value>> {
        self.body.get("results").and_then(Value::as_array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn singular_window_requires_both_bounds() {
        assert!(Window::single(5).is_singular());
        assert!(!Window::range(1, 10).is_singular());
        assert!(!Window::default().is_singular());
        assert!(!Window { start: Some(3), end: None }.is_singular());
    }

    #[test]
    fn list_params_repeat_the_key() {
        let params = Params::new()
            .with("key", vec!["a", "b"])
            .with("q", "x");
        assert_eq!(
            params.to_pairs(),
            vec![
                ("key".to_string(), "a".to_string()),
                ("key".to_string(), "b".to_string()),
                ("q".to_string(), "x".to_string()),
            ]
        );
    }

    #[test]
    fn merge_prefers_overrides() {
        let base = Params::new().with("q", "caller").with("collection", "c");
        let merged = base.merged_with(Params::new().with("q", "derived"));
        assert_eq!(merged.get("q"), Some(&ParamValue::from("derived")));
        assert_eq!(merged.get("collection"), Some(&ParamValue::from("c")));
    }

    #[test]
    fn window_bounds_become_params() {
        let params = RequestOptions::new()
            .start(2)
            .end(4)
            .param("quality", 1)
            .into_params();
        assert_eq!(params.get("start"), Some(&ParamValue::from("2")));
        assert_eq!(params.get("end"), Some(&ParamValue::from("4")));
        assert_eq!(params.get("quality"), Some(&ParamValue::from("1")));
    }

    #[test]
    fn start_and_end_params_feed_the_window() {
        let opts = RequestOptions::new().param("start", 5).param("end", "5");
        assert!(opts.pagination().is_singular());
        assert!(opts.extra().is_empty());

        let from_params = RequestOptions::from(Params::new().with("start", 1).with("end", 1));
        assert_eq!(from_params.pagination(), Window::single(1));
    }

    #[test]
    fn non_numeric_start_stays_an_extra_param() {
        let opts = RequestOptions::new().param("start", "soon");
        assert_eq!(opts.pagination(), Window::default());
        assert_eq!(opts.extra().get("start"), Some(&ParamValue::from("soon")));
    }

    #[test]
    fn json_scalars_render_for_query_strings() {
        assert_eq!(ParamValue::scalar_from_json(&json!("x")), "x");
        assert_eq!(ParamValue::scalar_from_json(&json!(1)), "1");
        assert_eq!(ParamValue::scalar_from_json(&json!(true)), "true");
        assert_eq!(ParamValue::scalar_from_json(&Value::Null), "");
    }

    #[test]
    fn resource_and_method_serialise_as_wire_names() {
        assert_eq!(serde_json::to_value(Resource::KvQuery).unwrap(), json!("json/kvquery"));
        assert_eq!(serde_json::to_value(Method::Delete).unwrap(), json!("DELETE"));
        assert_eq!(Resource::Range.as_str(), "manage/range");
    }
}
