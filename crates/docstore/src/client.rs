//! The operation façade.
//!
//! [`Client`] is the handle every operation goes through. It is built once
//! from a [`Transport`] and holds no other state, so a single client can be
//! shared between tasks (wrap it in an `Arc` if needed).
//!
//! Each operation that accepts extra query-string parameters comes in two
//! forms: `op(..)` and `op_with(.., options)`. The short form is exactly
//! `op_with(.., RequestOptions::default())`.
//!
//! ```rust,ignore
//! let client = Client::new(transport);
//! client.insert("/users/dscape", json!({"github": "dscape"})).await?;
//! let user = client.first(KeyValueQuery::new().field("github", "dscape")).await?;
//! println!("{}", user.body);
//! ```

use serde_json::Value;
use tracing::debug;

use crate::descriptor::{self, DestroyTarget, ManageAction, RequestDescriptor};
use crate::errors::StoreError;
use crate::identifiers::{DocumentUri, FieldName, IndexName};
use crate::query::Query;
use crate::transport::Transport;
use crate::types::{Params, RequestOptions, Response, Window};
use crate::window;

/// Result type of every client operation.
pub type StoreResult<T> = Result<T, StoreError>;

/// Document-store client over a transport `T`.
#[derive(Debug, Clone)]
pub struct Client<T> {
    transport: T,
}

impl<T: Transport> Client<T> {
    /// Creates a client that sends every request through `transport`.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn dispatch(&self, descriptor: RequestDescriptor) -> StoreResult<Response> {
        debug!(
            resource = %descriptor.resource,
            method = %descriptor.method,
            path = descriptor.path.as_deref().unwrap_or(""),
            params = descriptor.params.len(),
            "dispatching request"
        );
        Ok(self.transport.send(descriptor).await?)
    }

    // -----------------------------------------------------------------------
    // Documents
    // -----------------------------------------------------------------------

    /// Stores `document` at `uri`, replacing any existing document.
    pub async fn insert(&self, uri: impl Into<DocumentUri>, document: Value) -> StoreResult<Response> {
        self.insert_with(uri, document, RequestOptions::default()).await
    }

    /// [`Client::insert`] with extra query-string parameters.
    pub async fn insert_with(
        &self,
        uri: impl Into<DocumentUri>,
        document: Value,
        options: RequestOptions,
    ) -> StoreResult<Response> {
        self.dispatch(descriptor::insert(&uri.into(), document, options))
            .await
    }

    /// Fetches the document at `uri`.
    pub async fn get(&self, uri: impl Into<DocumentUri>) -> StoreResult<Response> {
        self.get_with(uri, RequestOptions::default()).await
    }

    /// [`Client::get`] with extra query-string parameters.
    pub async fn get_with(
        &self,
        uri: impl Into<DocumentUri>,
        options: RequestOptions,
    ) -> StoreResult<Response> {
        self.dispatch(descriptor::get(&uri.into(), options)).await
    }

    /// Deletes the document at `uri`.
    pub async fn destroy(&self, uri: impl Into<DocumentUri>) -> StoreResult<Response> {
        self.dispatch(descriptor::destroy(DestroyTarget::Uri(uri.into())))
            .await
    }

    /// Deletes every document matching `filter` (e.g. `collection=c`).
    pub async fn destroy_matching(&self, filter: Params) -> StoreResult<Response> {
        self.dispatch(descriptor::destroy(DestroyTarget::Filter(filter)))
            .await
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Runs a structured custom query.
    pub async fn query(&self, query: &Value) -> StoreResult<Response> {
        self.query_with(query, RequestOptions::default()).await
    }

    /// [`Client::query`] with a window or extra parameters.
    ///
    /// A singular window returns the single matching result as the body.
    pub async fn query_with(&self, query: &Value, options: RequestOptions) -> StoreResult<Response> {
        let window = options.pagination();
        let outcome = self.dispatch(descriptor::custom_query(query, options)).await;
        window::normalize(window, outcome)
    }

    /// Finds documents matching a text or key/value query.
    pub async fn find(&self, query: impl Into<Query>) -> StoreResult<Response> {
        self.find_with(query, RequestOptions::default()).await
    }

    /// [`Client::find`] with a window or extra parameters.
    ///
    /// A singular window returns the single matching result as the body;
    /// any other window returns the full result envelope.
    pub async fn find_with(
        &self,
        query: impl Into<Query>,
        options: RequestOptions,
    ) -> StoreResult<Response> {
        let window = options.pagination();
        let outcome = self
            .dispatch(descriptor::find(&query.into(), options))
            .await;
        window::normalize(window, outcome)
    }

    /// Finds documents matching a dynamically shaped query.
    ///
    /// Fails with `INVALID-QUERY`, without sending anything, unless `query`
    /// is a JSON string or object.
    pub async fn find_value(&self, query: Value) -> StoreResult<Response> {
        self.find_value_with(query, RequestOptions::default()).await
    }

    /// [`Client::find_value`] with a window or extra parameters.
    pub async fn find_value_with(&self, query: Value, options: RequestOptions) -> StoreResult<Response> {
        let query = Query::parse(query).inspect_err(|err| debug!(%err, "rejected query"))?;
        self.find_with(query, options).await
    }

    /// Returns the result ranked `n` (one-based).
    pub async fn nth(&self, n: u64, query: impl Into<Query>) -> StoreResult<Response> {
        self.find_with(query, RequestOptions::window(Window::single(n)))
            .await
    }

    /// Returns the top-ranked result.
    pub async fn first(&self, query: impl Into<Query>) -> StoreResult<Response> {
        self.nth(1, query).await
    }

    // -----------------------------------------------------------------------
    // Management
    // -----------------------------------------------------------------------

    /// Server information and field/range-index management.
    pub fn manage(&self) -> Manage<'_, T> {
        Manage { client: self }
    }
}

/// Management operations, see [`Client::manage`].
#[derive(Debug)]
pub struct Manage<'a, T> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> Manage<'a, T> {
    /// Server version, hardware and index settings.
    pub async fn info(&self) -> StoreResult<Response> {
        self.client.dispatch(descriptor::manage_info()).await
    }

    /// Operations on named fields.
    pub fn field(&self) -> Fields<'a, T> {
        Fields { client: self.client }
    }

    /// Operations on named range indexes.
    pub fn range(&self) -> Ranges<'a, T> {
        Ranges { client: self.client }
    }
}

/// Field management.
#[derive(Debug)]
pub struct Fields<'a, T> {
    client: &'a Client<T>,
}

impl<T: Transport> Fields<'_, T> {
    /// Reads the definition of field `name`.
    pub async fn get(&self, name: impl Into<FieldName>) -> StoreResult<Response> {
        self.send(name.into(), ManageAction::Get).await
    }

    /// Creates field `name` with no extra parameters.
    pub async fn create(&self, name: impl Into<FieldName>) -> StoreResult<Response> {
        self.create_with(name, RequestOptions::default()).await
    }

    /// Creates a field; `options` carries its definition (type, includes, ...).
    pub async fn create_with(
        &self,
        name: impl Into<FieldName>,
        options: RequestOptions,
    ) -> StoreResult<Response> {
        self.send(name.into(), ManageAction::Create(options)).await
    }

    /// Removes field `name`.
    pub async fn destroy(&self, name: impl Into<FieldName>) -> StoreResult<Response> {
        self.send(name.into(), ManageAction::Destroy).await
    }

    async fn send(&self, name: FieldName, action: ManageAction) -> StoreResult<Response> {
        self.client.dispatch(descriptor::field(&name, action)).await
    }
}

/// Range-index management.
#[derive(Debug)]
pub struct Ranges<'a, T> {
    client: &'a Client<T>,
}

impl<T: Transport> Ranges<'_, T> {
    /// Reads the definition of range index `name`.
    pub async fn get(&self, name: impl Into<IndexName>) -> StoreResult<Response> {
        self.send(name.into(), ManageAction::Get).await
    }

    /// Creates range index `name` with no extra parameters.
    pub async fn create(&self, name: impl Into<IndexName>) -> StoreResult<Response> {
        self.create_with(name, RequestOptions::default()).await
    }

    /// Creates a range index; `options` carries its definition (key, type, ...).
    pub async fn create_with(
        &self,
        name: impl Into<IndexName>,
        options: RequestOptions,
    ) -> StoreResult<Response> {
        self.send(name.into(), ManageAction::Create(options)).await
    }

    /// Removes range index `name`.
    pub async fn destroy(&self, name: impl Into<IndexName>) -> StoreResult<Response> {
        self.send(name.into(), ManageAction::Destroy).await
    }

    async fn send(&self, name: IndexName, action: ManageAction) -> StoreResult<Response> {
        self.client.dispatch(descriptor::range(&name, action)).await
    }
}
