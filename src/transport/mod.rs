//! Transport layer for the beneficios REST backend
//!
//! Wraps raw HTTP verbs behind the [`Transport`] trait so the repository
//! façade and the controllers never touch an HTTP client directly. The
//! production implementation is [`HttpTransport`] (reqwest); tests use
//! [`MockTransport`] with scripted responses.
//!
//! A single failed call surfaces immediately: there are no retries and no
//! caching anywhere in this layer.

mod http;
mod mock;

pub use http::*;
pub use mock::*;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// HTTP verb subset used by the admin API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// HTTP GET
    Get,
    /// HTTP POST
    Post,
    /// HTTP PUT
    Put,
    /// HTTP DELETE
    Delete,
}

impl Method {
    /// Wire name of the verb
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Decoded backend response: status plus optional JSON body
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Parsed JSON body, if the backend sent one
    pub body: Option<Value>,
}

impl Response {
    /// Response with a JSON body
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    /// Response without a body (e.g. 204 No Content)
    pub fn empty(status: u16) -> Self {
        Self { status, body: None }
    }
}

/// Asynchronous request/response transport against a configured base URL.
///
/// Implementations must be non-blocking: the only suspension point is
/// awaiting network I/O. Errors carry the taxonomy from
/// [`crate::error::AdminError`]; callers decide how to surface them.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a single request. `path` is appended to the configured base
    /// URL; `body` is serialized as JSON when present.
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Response>;
}
