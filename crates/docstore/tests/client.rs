//! End-to-end tests of the client façade against a recording transport.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use docstore::{
    Client, ErrorKind, KeyValueQuery, Method, ParamValue, Params, Query, RequestDescriptor,
    RequestOptions, Resource, Response, StoreError, Transport, TransportError,
};

/// Records every descriptor and answers with a fixed outcome.
struct RecordingTransport {
    sent: Mutex<Vec<RequestDescriptor>>,
    reply: Result<Value, TransportError>,
}

impl RecordingTransport {
    fn replying(body: Value) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reply: Ok(body),
        }
    }

    fn failing(err: TransportError) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reply: Err(err),
        }
    }

    fn sent(&self) -> Vec<RequestDescriptor> {
        self.sent.lock().unwrap().clone()
    }

    fn last(&self) -> RequestDescriptor {
        self.sent().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, descriptor: RequestDescriptor) -> Result<Response, TransportError> {
        self.sent.lock().unwrap().push(descriptor);
        self.reply.clone().map(Response::new)
    }
}

fn client(body: Value) -> Client<RecordingTransport> {
    Client::new(RecordingTransport::replying(body))
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

#[tokio::test]
async fn insert_then_get_share_the_stripped_path() {
    let client = client(json!({"ok": true}));

    client.insert("/users/dscape", json!({"name": "Nuno"})).await.unwrap();
    client.get("/users/dscape").await.unwrap();

    let sent = client.transport().sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].path.as_deref(), Some("users/dscape"));
    assert_eq!(sent[0].method, Method::Put);
    assert_eq!(sent[0].body, Some(json!({"name": "Nuno"})));
    assert_eq!(sent[1].path.as_deref(), Some("users/dscape"));
    assert_eq!(sent[1].method, Method::Get);
}

#[tokio::test]
async fn eliding_options_equals_passing_empty_options() {
    let client = client(json!({}));

    client.get("a").await.unwrap();
    client.get_with("a", RequestOptions::default()).await.unwrap();
    client.insert("a", json!(1)).await.unwrap();
    client.insert_with("a", json!(1), RequestOptions::new()).await.unwrap();
    client.find("text").await.unwrap();
    client.find_with("text", RequestOptions::new()).await.unwrap();
    client.query(&json!({"type": "x"})).await.unwrap();
    client.query_with(&json!({"type": "x"}), RequestOptions::new()).await.unwrap();
    client.find_value(json!({"github": "x"})).await.unwrap();
    client
        .find_value_with(json!({"github": "x"}), RequestOptions::new())
        .await
        .unwrap();
    client.manage().field().create("f").await.unwrap();
    client
        .manage()
        .field()
        .create_with("f", RequestOptions::new())
        .await
        .unwrap();
    client.manage().range().create("idx").await.unwrap();
    client
        .manage()
        .range()
        .create_with("idx", RequestOptions::new())
        .await
        .unwrap();

    let sent = client.transport().sent();
    assert_eq!(sent.len(), 14);
    for pair in sent.chunks(2) {
        assert_eq!(pair[0], pair[1]);
    }
}

#[tokio::test]
async fn destroy_by_uri_and_by_filter() {
    let client = client(Value::Null);

    client.destroy("a/b").await.unwrap();
    assert_eq!(
        client.transport().last(),
        RequestDescriptor::new(Resource::Store)
            .method(Method::Delete)
            .path("a/b")
    );

    client
        .destroy_matching(Params::new().with("collection", "c"))
        .await
        .unwrap();
    assert_eq!(
        client.transport().last(),
        RequestDescriptor::new(Resource::Store)
            .method(Method::Delete)
            .params(Params::new().with("collection", "c"))
    );
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_dynamic_queries_never_reach_the_transport() {
    let client = client(json!({"results": []}));

    for bad in [json!(42), Value::Null, json!(["a", "b"])] {
        let err = client.find_value(bad).await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::InvalidQuery));
    }
    assert!(client.transport().sent().is_empty());
}

#[tokio::test]
async fn dynamic_queries_route_by_shape() {
    let client = client(json!({"results": []}));

    client.find_value(json!("dscape")).await.unwrap();
    assert_eq!(client.transport().last().resource, Resource::Query);

    client.find_value(json!({"github": "x"})).await.unwrap();
    let kv = client.transport().last();
    assert_eq!(kv.resource, Resource::KvQuery);
    assert_eq!(kv.params.get("key"), Some(&ParamValue::from(vec!["github"])));
    assert_eq!(kv.params.get("value"), Some(&ParamValue::from(vec!["x"])));
}

#[tokio::test]
async fn singular_window_delivers_the_document() {
    let client = client(json!({"results": [{"id": "X"}], "meta": {"total": 9}}));

    let single = client
        .find_with("x", RequestOptions::new().start(5).end(5))
        .await
        .unwrap();
    assert_eq!(single.body, json!({"id": "X"}));

    let ranged = client
        .find_with("x", RequestOptions::new().start(1).end(10))
        .await
        .unwrap();
    assert_eq!(ranged.body, json!({"results": [{"id": "X"}], "meta": {"total": 9}}));
}

#[tokio::test]
async fn first_is_find_with_window_one() {
    let query = KeyValueQuery::new().field("github", "x");

    let a = client(json!({"results": [{"login": "x"}]}));
    let via_first = a.first(query.clone()).await.unwrap();

    let b = client(json!({"results": [{"login": "x"}]}));
    let via_find = b
        .find_with(query, RequestOptions::new().start(1).end(1))
        .await
        .unwrap();

    assert_eq!(a.transport().last(), b.transport().last());
    assert_eq!(via_first, via_find);
    assert_eq!(via_first.body, json!({"login": "x"}));
}

#[tokio::test]
async fn nth_requests_a_single_rank() {
    let client = client(json!({"results": [{"rank": 3}]}));
    let response = client.nth(3, Query::text("rust")).await.unwrap();

    let sent = client.transport().last();
    assert_eq!(sent.params.get("start"), Some(&ParamValue::from("3")));
    assert_eq!(sent.params.get("end"), Some(&ParamValue::from("3")));
    assert_eq!(response.body, json!({"rank": 3}));
}

#[tokio::test]
async fn custom_query_is_sent_as_json_and_unwrapped_when_singular() {
    let client = client(json!({"results": [[1, 2]]}));
    let query = json!({"box": {"north": 1, "east": 1, "south": -1, "west": -1}});

    let response = client
        .query_with(&query, RequestOptions::new().start(1).end(1))
        .await
        .unwrap();
    assert_eq!(response.body, json!([1, 2]));

    let sent = client.transport().last();
    assert_eq!(sent.resource, Resource::CustomQuery);
    let q = sent.params.get("q").and_then(ParamValue::as_single).unwrap();
    assert_eq!(serde_json::from_str::<Value>(q).unwrap(), query);
}

#[tokio::test]
async fn caller_options_are_not_observably_mutated() {
    let client = client(json!({"results": []}));
    let options = RequestOptions::new().param("q", "mine");
    let kept = options.clone();

    client.find_with("theirs", options).await.unwrap();

    assert_eq!(kept.extra().get("q"), Some(&ParamValue::from("mine")));
    assert_eq!(
        client.transport().last().params.get("q"),
        Some(&ParamValue::from("theirs"))
    );
}

// ---------------------------------------------------------------------------
// Management and errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn management_operations() {
    let client = client(json!({"version": "1"}));

    let info = client.manage().info().await.unwrap();
    assert_eq!(info.body, json!({"version": "1"}));
    assert_eq!(client.transport().last(), RequestDescriptor::new(Resource::Manage));

    client.manage().range().destroy("/by-date").await.unwrap();
    let sent = client.transport().last();
    assert_eq!(sent.resource, Resource::Range);
    assert_eq!(sent.method, Method::Delete);
    assert_eq!(sent.path.as_deref(), Some("by-date"));

    client.manage().field().get("title").await.unwrap();
    assert_eq!(client.transport().last().resource, Resource::Field);
}

#[tokio::test]
async fn transport_errors_pass_through_verbatim() {
    let failure = TransportError::Status {
        status: 500,
        body: json!({"error": "boom"}),
    };
    let client = Client::new(RecordingTransport::failing(failure.clone()));

    let err = client.first("anything").await.unwrap_err();
    assert_eq!(err, StoreError::Transport(failure));
}
