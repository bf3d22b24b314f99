//! Scripted transport for tests
//!
//! Records every dispatched call and serves queued responses in order,
//! so controller and repository behavior can be asserted without a
//! running backend.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{AdminError, Result};
use crate::transport::{Method, Response, Transport};

/// One call observed by the mock
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// HTTP verb
    pub method: Method,
    /// Path relative to the base URL
    pub path: String,
    /// Request body, if any
    pub body: Option<Value>,
}

/// In-memory transport serving pre-queued responses
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<Response>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    /// Create an empty mock; a request with no queued response fails
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful JSON response
    pub fn push_json(&self, status: u16, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(Response::json(status, body)));
    }

    /// Queue a successful empty response (e.g. 204)
    pub fn push_empty(&self, status: u16) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(Response::empty(status)));
    }

    /// Queue a failure
    pub fn push_err(&self, err: AdminError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    /// Calls dispatched so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls dispatched so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Response> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AdminError::network("no scripted response queued")))
    }
}
