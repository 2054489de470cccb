//! Contact form relay.
//!
//! Inquiries are forwarded as JSON to a hosted form endpoint (Formspree
//! style), which emails them to the business. Nothing is stored locally.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use bloom_haven_core::inquiry::Inquiry;

/// Errors that can occur when relaying an inquiry.
#[derive(Debug, Error)]
pub enum RelayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Relay refused the submission.
    #[error("relay rejected the submission: {0}")]
    Rejected(String),
}

/// Somewhere inquiries can be sent.
#[async_trait]
pub trait FormRelay: Send + Sync {
    /// Deliver one inquiry.
    async fn submit(&self, inquiry: &Inquiry) -> Result<(), RelayError>;
}

/// Relay over HTTP.
#[derive(Clone)]
pub struct HttpFormRelay {
    client: reqwest::Client,
    endpoint: Url,
}

/// Error bodies the relay may answer with.
#[derive(Debug, Default, Deserialize)]
struct RelayErrorBody {
    error: Option<String>,
    #[serde(default)]
    errors: Vec<RelayFieldError>,
}

#[derive(Debug, Deserialize)]
struct RelayFieldError {
    message: String,
}

impl RelayErrorBody {
    fn into_message(self) -> Option<String> {
        self.error.or_else(|| {
            let joined = self
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join(", ");
            (!joined.is_empty()).then_some(joined)
        })
    }
}

impl HttpFormRelay {
    /// Create a relay posting to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(endpoint: Url) -> Result<Self, RelayError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl FormRelay for HttpFormRelay {
    #[instrument(skip(self, inquiry), fields(service = %inquiry.service))]
    async fn submit(&self, inquiry: &Inquiry) -> Result<(), RelayError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(inquiry)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<RelayErrorBody>(&text)
            .ok()
            .and_then(RelayErrorBody::into_message)
            .unwrap_or_else(|| format!("status {}", status.as_u16()));
        Err(RelayError::Rejected(message))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bloom_haven_core::inquiry::InquiryForm;
    use httpmock::prelude::*;
    use serde_json::json;

    fn inquiry() -> Inquiry {
        Inquiry::parse(InquiryForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Do you deliver to Ikeja?".to_string(),
            ..InquiryForm::default()
        })
        .unwrap()
    }

    fn relay(server: &MockServer) -> HttpFormRelay {
        HttpFormRelay::new(Url::parse(&server.url("/f/abc")).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_submit_posts_json() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(Method::POST)
                .path("/f/abc")
                .header("accept", "application/json")
                .json_body(json!({
                    "name": "Ada",
                    "email": "ada@example.com",
                    "phone": "",
                    "eventType": "",
                    "date": "",
                    "message": "Do you deliver to Ikeja?",
                    "service": "General Inquiry"
                }));
            then.status(200).json_body(json!({ "ok": true }));
        });

        relay(&server).submit(&inquiry()).await.unwrap();
        m.assert();
    }

    #[tokio::test]
    async fn test_error_message_is_surfaced() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::POST).path("/f/abc");
            then.status(422)
                .json_body(json!({ "errors": [{ "message": "email is invalid" }] }));
        });

        let err = relay(&server).submit(&inquiry()).await.unwrap_err();
        assert!(matches!(err, RelayError::Rejected(msg) if msg == "email is invalid"));
    }

    #[tokio::test]
    async fn test_plain_error_field() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::POST).path("/f/abc");
            then.status(400).json_body(json!({ "error": "Form not found" }));
        });

        let err = relay(&server).submit(&inquiry()).await.unwrap_err();
        assert!(matches!(err, RelayError::Rejected(msg) if msg == "Form not found"));
    }
}
