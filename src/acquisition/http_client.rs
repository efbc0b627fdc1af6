//! Async HTTP client wrapping reqwest.
//!
//! One attempt per call with an explicit timeout. Acquisition failures are
//! fatal for the render, so there is no retry or backoff here; transport
//! errors are classified into typed variants at the call site.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::error::AcquisitionError;

/// Default user-agent, merged under operator-supplied headers.
pub const USER_AGENT: &str = "E-Paper-Dashboard/1.0";

/// User-agent announced when fetching a feed directly.
pub const RSS_USER_AGENT: &str = "E-Paper-Dashboard/1.0 RSS Reader";

/// HTTP client for the acquisition layer.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client with a per-request timeout in seconds.
    pub fn new(timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// GET a URL and decode the body as JSON. Operator headers override
    /// the default user-agent on collision.
    pub async fn get_json(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<Value, AcquisitionError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let response = request.send().await.map_err(AcquisitionError::from_reqwest)?;
        let body = Self::success_body(response, url).await?;
        serde_json::from_str(&body).map_err(|e| AcquisitionError::Json(e.to_string()))
    }

    /// GET a URL and return the raw body text, announcing `user_agent`
    /// instead of the client default.
    pub async fn get_text(&self, url: &str, user_agent: &str) -> Result<String, AcquisitionError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()
            .await
            .map_err(AcquisitionError::from_reqwest)?;
        Self::success_body(response, url).await
    }

    /// POST a JSON body and decode the JSON response.
    pub async fn post_json(&self, url: &str, body: &Value) -> Result<Value, AcquisitionError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(AcquisitionError::from_reqwest)?;
        let text = Self::success_body(response, url).await?;
        serde_json::from_str(&text).map_err(|e| AcquisitionError::Json(e.to_string()))
    }

    async fn success_body(
        response: reqwest::Response,
        url: &str,
    ) -> Result<String, AcquisitionError> {
        let status = response.status();
        if !status.is_success() {
            return Err(AcquisitionError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        response.text().await.map_err(AcquisitionError::from_reqwest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new(30);
        let _ = client.clone();
    }

    #[tokio::test]
    async fn test_connection_failure_is_typed() {
        // Nothing listens on this port; the error must classify as a
        // connection failure, not a generic transport error.
        let client = HttpClient::new(2);
        let err = client
            .get_json("http://127.0.0.1:1/json", &HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AcquisitionError::Connection(_)));
    }
}
