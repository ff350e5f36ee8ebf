//! A transport that prints descriptors instead of sending them.

use async_trait::async_trait;
use docstore::{RequestDescriptor, Response, Transport, TransportError};
use serde_json::json;

/// Prints each descriptor as JSON on stdout and answers with an empty
/// result envelope.
#[derive(Debug, Default)]
pub struct DryRunTransport;

#[async_trait]
impl Transport for DryRunTransport {
    async fn send(&self, descriptor: RequestDescriptor) -> Result<Response, TransportError> {
        let rendered = serde_json::to_string_pretty(&descriptor)
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        println!("{rendered}");
        Ok(Response::new(json!({ "results": [] })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docstore::Client;

    #[tokio::test]
    async fn dry_run_answers_with_an_empty_envelope() {
        let client = Client::new(DryRunTransport);
        let response = client.first("anything").await.unwrap();
        assert_eq!(response.body, json!({ "results": [] }));
    }
}
