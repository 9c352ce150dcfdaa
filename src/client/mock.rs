//! In-memory transport for tests

use crate::client::error::{ClientError, Result};
use crate::client::traits::{ApiRequest, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Canned answer replayed by [`MockTransport`]
#[derive(Debug, Clone, PartialEq)]
pub enum MockResponse {
    Json(Value),
    Status { status: u16, detail: String },
}

/// Transport that records every request and replays queued responses in order.
///
/// When the queue runs dry every call fails with a 501, so a test that makes one
/// call too many fails loudly instead of hanging.
#[derive(Debug, Default)]
pub struct MockTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<MockResponse>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful JSON body
    pub fn push_json(&self, body: Value) -> &Self {
        self.push(MockResponse::Json(body))
    }

    /// Queue a failure with the given status and detail message
    pub fn push_status(&self, status: u16, detail: impl Into<String>) -> &Self {
        self.push(MockResponse::Status {
            status,
            detail: detail.into(),
        })
    }

    pub fn push(&self, response: MockResponse) -> &Self {
        lock(&self.responses).push_back(response);
        self
    }

    /// Every request seen so far, oldest first
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        lock(&self.requests).last().cloned()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Responses still waiting to be replayed
    pub fn pending_responses(&self) -> usize {
        lock(&self.responses).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        lock(&self.requests).push(request);

        match lock(&self.responses).pop_front() {
            Some(MockResponse::Json(body)) => Ok(body),
            Some(MockResponse::Status { status, detail }) => {
                Err(ClientError::Status { status, detail })
            }
            None => Err(ClientError::Status {
                status: 501,
                detail: "MockTransport has no queued response".to_string(),
            }),
        }
    }

    fn base_url(&self) -> &str {
        "mock://backend/api"
    }
}
