#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use stripe_client::{
    ClientConfig, HttpRequest, HttpResponse, StripeClient, Transport, TransportError,
};

/// In-memory list endpoint holding `ids`, served `page_size` at a time and
/// honoring `starting_after` and `ending_before`.
pub struct PagedBackend {
    ids: Vec<String>,
    page_size: usize,
    calls: Mutex<usize>,
    failing_calls: Mutex<HashSet<usize>>,
    unreachable_calls: Mutex<HashSet<usize>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl PagedBackend {
    pub fn new(total: usize, page_size: usize) -> Arc<Self> {
        Self::with_ids((0..total).map(|i| format!("item_{:03}", i)).collect(), page_size)
    }

    pub fn with_ids(ids: Vec<String>, page_size: usize) -> Arc<Self> {
        Arc::new(Self {
            ids,
            page_size,
            calls: Mutex::new(0),
            failing_calls: Mutex::new(HashSet::new()),
            unreachable_calls: Mutex::new(HashSet::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// The `n`th request (1-based) answers with a 500 error object.
    pub fn fail_call(&self, n: usize) {
        self.failing_calls.lock().unwrap().insert(n);
    }

    /// The `n`th request (1-based) fails before any response.
    pub fn drop_call(&self, n: usize) {
        self.unreachable_calls.lock().unwrap().insert(n);
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn page_for(&self, request: &HttpRequest) -> HttpResponse {
        if let Some(cursor) = request.query_param("starting_after") {
            let Some(idx) = self.position(cursor) else {
                return no_such_object(cursor, "starting_after");
            };
            let start = idx + 1;
            let end = (start + self.page_size).min(self.ids.len());
            return self.list(start, end, end < self.ids.len());
        }

        if let Some(cursor) = request.query_param("ending_before") {
            let Some(end) = self.position(cursor) else {
                return no_such_object(cursor, "ending_before");
            };
            let start = end.saturating_sub(self.page_size);
            return self.list(start, end, start > 0);
        }

        let end = self.page_size.min(self.ids.len());
        self.list(0, end, end < self.ids.len())
    }

    fn position(&self, cursor: &str) -> Option<usize> {
        self.ids.iter().position(|id| id == cursor)
    }

    fn list(&self, start: usize, end: usize, has_more: bool) -> HttpResponse {
        let data: Vec<_> = self.ids[start..end]
            .iter()
            .map(|id| json!({"id": id, "object": "order"}))
            .collect();

        HttpResponse::new(
            200,
            json!({
                "object": "list",
                "url": "/v1/orders",
                "data": data,
                "has_more": has_more
            })
            .to_string(),
        )
    }
}

fn no_such_object(cursor: &str, param: &str) -> HttpResponse {
    HttpResponse::new(
        400,
        json!({"error": {
            "type": "invalid_request_error",
            "message": format!("No such object: {}", cursor),
            "param": param
        }})
        .to_string(),
    )
}

pub struct SharedBackend(pub Arc<PagedBackend>);

#[async_trait]
impl Transport for SharedBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let backend = &self.0;
        let call = {
            let mut calls = backend.calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        backend.requests.lock().unwrap().push(request.clone());

        if backend.unreachable_calls.lock().unwrap().contains(&call) {
            return Err(TransportError::Connection("connection reset".to_string()));
        }
        if backend.failing_calls.lock().unwrap().contains(&call) {
            return Ok(HttpResponse::new(
                500,
                r#"{"error":{"type":"api_error","message":"Something went wrong"}}"#,
            )
            .with_header("Request-Id", format!("req_{}", call)));
        }

        Ok(backend.page_for(&request))
    }
}

pub fn client_for(backend: &Arc<PagedBackend>) -> StripeClient {
    StripeClient::with_transport(
        ClientConfig::new("sk_test_123").base_url("http://stripe.test"),
        Arc::new(SharedBackend(Arc::clone(backend))),
    )
}
