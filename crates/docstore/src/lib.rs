//! Client core for a JSON document-store service.
//!
//! The service stores, retrieves, deletes and queries JSON documents and
//! manages fields and range indexes over HTTP. This crate turns each of those
//! operations into a transport-agnostic [`RequestDescriptor`], hands it to a
//! [`Transport`], and post-processes the response.
//!
//! ## Architectural Layer
//!
//! **Request translation + port definition.** This crate has no I/O
//! dependencies. It defines *what* is sent; the `transport` crate defines
//! *how*.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Path newtypes (`DocumentUri`, `FieldName`, `IndexName`) |
//! | [`types`] | `Params`, `Window`, `RequestOptions`, `Response`, `Resource`, `Method` |
//! | [`query`] | `Query` (text or key/value) and find-parameter dispatch |
//! | [`descriptor`] | `RequestDescriptor` and one pure builder per operation |
//! | [`window`] | Singular-window result unwrapping |
//! | [`transport`] | The `Transport` port |
//! | [`client`] | The `Client` operation façade |
//! | [`errors`] | `StoreError`, `TransportError`, `ErrorKind` |

pub mod client;
pub mod descriptor;
pub mod errors;
pub mod identifiers;
pub mod query;
pub mod transport;
pub mod types;
pub mod window;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use client::{Client, Fields, Manage, Ranges, StoreResult};
pub use descriptor::{DestroyTarget, ManageAction, RequestDescriptor};
pub use errors::{ErrorKind, StoreError, TransportError};
pub use identifiers::{DocumentUri, FieldName, IndexName};
pub use query::{KeyValueQuery, Query};
pub use transport::Transport;
pub use types::{Headers, Method, ParamValue, Params, RequestOptions, Resource, Response, Window};
