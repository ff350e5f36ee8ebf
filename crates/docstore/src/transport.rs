//! The port through which descriptors reach the service.
//!
//! The core never performs I/O itself. A [`Transport`] resolves a
//! [`RequestDescriptor`] into an HTTP request, sends it and parses the JSON
//! response. The `transport` crate provides the production implementation;
//! tests substitute recording doubles.

use std::sync::Arc;

use async_trait::async_trait;

use crate::descriptor::RequestDescriptor;
use crate::errors::TransportError;
use crate::types::Response;

/// Sends request descriptors to the document store.
///
/// ## Contract
///
/// - `resource` and `path` are joined onto the configured endpoint.
/// - `params` are sent as query-string pairs; list values repeat the key.
/// - `body`, when present, is sent as JSON.
/// - The response body is parsed as JSON (an empty body is `null`).
/// - A non-success status is reported as [`TransportError::Status`], never as
///   a panic.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, descriptor: RequestDescriptor) -> Result<Response, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, descriptor: RequestDescriptor) -> Result<Response, TransportError> {
        (**self).send(descriptor).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&self, descriptor: RequestDescriptor) -> Result<Response, TransportError> {
        (**self).send(descriptor).await
    }
}
