/// Resume parser client: the single point of entry for resume-to-JSON
/// conversion. The external service receives raw resume text and returns a
/// structured-JSON string; everything else in this codebase treats that
/// string as opaque.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// What blank resume text parses to without a service round-trip.
pub const EMPTY_RESUME_JSON: &str = "{}";

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("parser service returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("parser service reported failure: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait ResumeParser: Send + Sync {
    /// Converts raw resume text into a structured-JSON string.
    async fn parse(&self, resume_text: &str) -> Result<String, ParserError>;
}

#[derive(Debug, Serialize)]
struct ParseRequest<'a> {
    #[serde(rename = "resumeText")]
    resume_text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    reply: String,
    success: bool,
}

/// HTTP client for the external parsing service. No request timeout or retry
/// is configured; calls are bounded by the client's own defaults.
pub struct HttpResumeParser {
    client: Client,
    endpoint: String,
}

impl HttpResumeParser {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl ResumeParser for HttpResumeParser {
    async fn parse(&self, resume_text: &str) -> Result<String, ParserError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ParseRequest { resume_text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ParserError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ParseResponse = response.json().await?;
        if !parsed.success {
            return Err(ParserError::Rejected(parsed.reply));
        }

        debug!("parser service returned {} bytes of JSON", parsed.reply.len());
        Ok(parsed.reply)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn parses_resume_text_successfully() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/parse"))
            .and(body_json(serde_json::json!({"resumeText": "Experienced engineer"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "reply": "{\"skills\":[\"rust\"]}",
                "success": true
            })))
            .mount(&mock_server)
            .await;

        let parser = HttpResumeParser::new(format!("{}/api/parse", mock_server.uri()));
        let json = parser.parse("Experienced engineer").await.unwrap();

        assert_eq!(json, "{\"skills\":[\"rust\"]}");
    }

    #[tokio::test]
    async fn service_reported_failure_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "reply": "Failed to parse resume",
                "success": false
            })))
            .mount(&mock_server)
            .await;

        let parser = HttpResumeParser::new(mock_server.uri());
        let result = parser.parse("anything").await;

        assert!(matches!(result, Err(ParserError::Rejected(_))));
    }

    #[tokio::test]
    async fn server_error_status_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let parser = HttpResumeParser::new(mock_server.uri());
        let result = parser.parse("anything").await;

        assert!(matches!(result, Err(ParserError::Api { status: 500, .. })));
    }
}
