//! Transport-agnostic request descriptors.
//!
//! Every operation is described by a [`RequestDescriptor`] before anything is
//! sent. The builders in this module are pure: the same arguments always
//! produce the same descriptor, and none of them perform I/O.
//!
//! | Operation | Resource | Method | Path | Params | Body |
//! |-----------|----------|--------|------|--------|------|
//! | [`insert`] | `json/store` | PUT | document URI | options | document |
//! | [`get`] | `json/store` | GET | document URI | options | |
//! | [`destroy`] | `json/store` | DELETE | URI, or none | filter | |
//! | [`custom_query`] | `json/customquery` | GET | | options + `q` | |
//! | [`find`] | `json/query` / `json/kvquery` | GET | | see [`crate::query`] | |
//! | [`manage_info`] | `manage` | GET | | | |
//! | [`field`] | `manage/field` | GET/POST/DELETE | field name | create only | |
//! | [`range`] | `manage/range` | GET/POST/DELETE | index name | create only | |

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identifiers::{DocumentUri, FieldName, IndexName};
use crate::query::{self, Query};
use crate::types::{Method, Params, RequestOptions, Resource};

/// Canonical request shape handed to a [`crate::Transport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    pub resource: Resource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub method: Method,
    #[serde(default, skip_serializing_if = "Params::is_empty")]
    pub params: Params,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl RequestDescriptor {
    /// A `GET` of `resource` with no path, params or body.
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            path: None,
            method: Method::Get,
            params: Params::new(),
            body: None,
        }
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the path; the value is expected to be normalised already.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Replaces the query-string parameters.
    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// What a destroy request removes.
#[derive(Debug, Clone, PartialEq)]
pub enum DestroyTarget {
    /// The single document at a URI.
    Uri(DocumentUri),
    /// Every document matching the filter parameters (e.g. a collection).
    Filter(Params),
}

/// Stores `document` at `uri`.
pub fn insert(uri: &DocumentUri, document: Value, options: RequestOptions) -> RequestDescriptor {
    RequestDescriptor::new(Resource::Store)
        .method(Method::Put)
        .path(uri.as_str())
        .params(options.into_params())
        .body(document)
}

/// Fetches the document at `uri`.
pub fn get(uri: &DocumentUri, options: RequestOptions) -> RequestDescriptor {
    RequestDescriptor::new(Resource::Store)
        .path(uri.as_str())
        .params(options.into_params())
}

/// Deletes by URI or by filter.
pub fn destroy(target: DestroyTarget) -> RequestDescriptor {
    let descriptor = RequestDescriptor::new(Resource::Store).method(Method::Delete);
    match target {
        DestroyTarget::Uri(uri) => descriptor.path(uri.into_string()),
        DestroyTarget::Filter(filter) => descriptor.params(filter),
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Runs a structured custom query, sent as JSON text in `q`.
pub fn custom_query(query: &Value, options: RequestOptions) -> RequestDescriptor {
    let params = options
        .into_params()
        .merged_with(Params::new().with("q", query.to_string()));
    RequestDescriptor::new(Resource::CustomQuery).params(params)
}

/// Runs a text or key/value find.
pub fn find(query: &Query, options: RequestOptions) -> RequestDescriptor {
    let (resource, params) = query::dispatch(query, options);
    RequestDescriptor::new(resource).params(params)
}

// ---------------------------------------------------------------------------
// Management
// ---------------------------------------------------------------------------

/// Server version, hardware and index settings.
pub fn manage_info() -> RequestDescriptor {
    RequestDescriptor::new(Resource::Manage)
}

/// A management action on a named field or range index.
#[derive(Debug, Clone, PartialEq)]
pub enum ManageAction {
    Get,
    Create(RequestOptions),
    Destroy,
}

fn managed(resource: Resource, name: &str, action: ManageAction) -> RequestDescriptor {
    let descriptor = RequestDescriptor::new(resource).path(name);
    match action {
        ManageAction::Get => descriptor,
        ManageAction::Create(options) => descriptor
            .method(Method::Post)
            .params(options.into_params()),
        ManageAction::Destroy => descriptor.method(Method::Delete),
    }
}

/// Gets, creates or removes field `name`.
pub fn field(name: &FieldName, action: ManageAction) -> RequestDescriptor {
    managed(Resource::Field, name.as_str(), action)
}

/// Gets, creates or removes range index `name`.
pub fn range(name: &IndexName, action: ManageAction) -> RequestDescriptor {
    managed(Resource::Range, name.as_str(), action)
}
