use log::{debug, error, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::api::token_store::TokenStore;
use crate::config::ClientConfig;
use crate::entity::ApiError;

/// JSON client for the exchange backend.
///
/// Every call reads the bearer token from the [`TokenStore`], so a login in one
/// part of the application is picked up by the next request everywhere else.
/// Requests are sent exactly once; failures are returned to the caller as-is.
pub struct ApiClient {
    http_client: Client,
    base_url: String,
    timeout: Duration,
    token_store: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, token_store: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        // Timeout is fixed for the lifetime of the client
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            timeout: config.request_timeout,
            token_store,
        })
    }

    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        self.token_store.clone()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, None).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        // JSON in both directions
        let mut request = self
            .http_client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        // Token is re-read from storage on every call
        if let Some(token) = self.token_store.load() {
            request = request.bearer_auth(token);
        }

        if let Some(body) = body {
            request = request.json(&body);
        }

        // Single attempt, the client-wide timeout covers connect and body
        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(&method, &url, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(&method, &url, e))?;

        // Error bodies are not always JSON, keep the raw text as a fallback
        let parsed: Option<Value> = if text.trim().is_empty() {
            None
        } else {
            serde_json::from_str(&text).ok()
        };

        if !status.is_success() {
            let err = http_error(status, parsed, &text);
            warn!("{} {} failed: {}", method, url, err);
            return Err(err);
        }

        // Empty 2xx bodies (204) decode as null so `()` works
        let value = match parsed {
            Some(value) => value,
            None if text.trim().is_empty() => Value::Null,
            None => {
                error!("{} {} returned a non-JSON body", method, url);
                return Err(ApiError::Decode("response body is not valid JSON".to_string()));
            }
        };

        serde_json::from_value(value).map_err(|e| {
            error!("Failed to parse response of {} {}: {}", method, url, e);
            ApiError::Decode(e.to_string())
        })
    }

    fn transport_error(&self, method: &Method, url: &str, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            warn!("{} {} timed out after {:?}", method, url, self.timeout);
            ApiError::Timeout(self.timeout)
        } else {
            warn!("{} {} failed: {}", method, url, e);
            ApiError::Network(e.to_string())
        }
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body)
        .map_err(|e| ApiError::InvalidInput(format!("failed to encode request body: {}", e)))
}

fn http_error(status: StatusCode, body: Option<Value>, text: &str) -> ApiError {
    let field = |name: &str| {
        body.as_ref()
            .and_then(|b| b.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    // Machine-readable code, when the backend provides one
    let code = field("code");
    let message = field("message")
        .or_else(|| field("error"))
        .or_else(|| (!text.trim().is_empty() && body.is_none()).then(|| text.trim().to_string()))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

    ApiError::Http {
        status: status.as_u16(),
        message,
        code,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn http_error_prefers_message_then_error_field() {
        let err = http_error(
            StatusCode::CONFLICT,
            Some(json!({ "message": "Already approved", "code": "ALREADY_DECIDED" })),
            "",
        );
        assert_eq!(err.status(), 409);
        assert_eq!(err.user_message(), "Already approved");
        assert_eq!(err.code(), Some("ALREADY_DECIDED"));

        let err = http_error(StatusCode::BAD_REQUEST, Some(json!({ "error": "bad" })), "");
        assert_eq!(err.user_message(), "bad");
    }

    #[test]
    fn http_error_falls_back_to_text_and_reason() {
        let err = http_error(StatusCode::BAD_GATEWAY, None, "upstream down");
        assert_eq!(err.user_message(), "upstream down");
        assert!(err.body().is_none());

        let err = http_error(StatusCode::SERVICE_UNAVAILABLE, None, "");
        assert_eq!(err.user_message(), "Service Unavailable");
    }
}
