//! HTTP transport implementation
//!
//! Maps backend status codes onto the crate's error taxonomy:
//!
//! | Status | Error |
//! |--------|-------|
//! | 404 | `NotFound` |
//! | 409 | `Conflict` (stale version token) |
//! | other 4xx | `Validation` with the body's message when present |
//! | 5xx | `Server` |
//! | no response | `Network` |

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{AdminError, Result};
use crate::transport::{Method, Response, Transport};

/// Production transport backed by a shared reqwest client
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport from the runtime configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AdminError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Response> {
        let url = self.url_for(path);
        debug!(method = method.as_str(), %url, "dispatching request");

        let mut builder = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        // A failure here means no response was received at all.
        let response = builder
            .send()
            .await
            .map_err(|e| AdminError::network(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            None
        } else {
            // Non-JSON error pages (proxies, app servers) are kept as detail text.
            serde_json::from_str(&text).ok().or(Some(Value::String(text)))
        };

        if let Some(err) = error_for_status(status, body.as_ref()) {
            return Err(err);
        }
        Ok(Response { status, body })
    }
}

/// Map a backend status code to an error, or `None` for success.
///
/// The detail message is extracted from the body's `message`, `detail` or
/// `error` field when present, falling back to the raw body text.
pub fn error_for_status(status: u16, body: Option<&Value>) -> Option<AdminError> {
    if status < 400 {
        return None;
    }
    let detail = extract_detail(body).unwrap_or_else(|| format!("HTTP {status}"));
    Some(match status {
        404 => AdminError::NotFound(detail),
        409 => AdminError::Conflict(detail),
        400..=499 => AdminError::Validation(detail),
        _ => AdminError::server(status, detail),
    })
}

fn extract_detail(body: Option<&Value>) -> Option<String> {
    let body = body?;
    for key in ["message", "detail", "error"] {
        if let Some(text) = body.get(key).and_then(Value::as_str) {
            return Some(text.to_string());
        }
    }
    body.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_joining() {
        let config = ClientConfig::new("http://localhost:8080/api/v1/beneficios");
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(
            transport.url_for(""),
            "http://localhost:8080/api/v1/beneficios"
        );
        assert_eq!(
            transport.url_for("7"),
            "http://localhost:8080/api/v1/beneficios/7"
        );
        assert_eq!(
            transport.url_for("/transfer"),
            "http://localhost:8080/api/v1/beneficios/transfer"
        );
    }

    #[test]
    fn test_success_statuses_map_to_none() {
        assert!(error_for_status(200, None).is_none());
        assert!(error_for_status(201, None).is_none());
        assert!(error_for_status(204, None).is_none());
    }

    #[test]
    fn test_status_taxonomy() {
        assert!(matches!(
            error_for_status(404, None),
            Some(AdminError::NotFound(_))
        ));
        assert!(matches!(
            error_for_status(409, None),
            Some(AdminError::Conflict(_))
        ));
        assert!(matches!(
            error_for_status(400, None),
            Some(AdminError::Validation(_))
        ));
        assert!(matches!(
            error_for_status(422, None),
            Some(AdminError::Validation(_))
        ));
        assert!(matches!(
            error_for_status(500, None),
            Some(AdminError::Server { status: 500, .. })
        ));
    }

    #[test]
    fn test_detail_extracted_from_body() {
        let body = json!({ "message": "Saldo insuficiente" });
        match error_for_status(422, Some(&body)) {
            Some(AdminError::Validation(detail)) => assert_eq!(detail, "Saldo insuficiente"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn test_detail_falls_back_to_status_line() {
        match error_for_status(409, None) {
            Some(AdminError::Conflict(detail)) => assert_eq!(detail, "HTTP 409"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
