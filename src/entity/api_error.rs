use std::time::Duration;

/// Error code the backend returns when the user has no multi-signature row.
pub const MULTISIG_NOT_CONFIGURED: &str = "MULTISIG_NOT_CONFIGURED";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        message: String,
        code: Option<String>,
        body: Option<serde_json::Value>,
    },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Token storage error: {0}")]
    TokenStore(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ApiError {
    /// HTTP-like status: 408 for timeouts, 0 for transport and decode failures.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Timeout(_) => 408,
            ApiError::Http { status, .. } => *status,
            ApiError::InvalidInput(_) => 400,
            ApiError::Network(_) | ApiError::Decode(_) | ApiError::TokenStore(_) => 0,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Http { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        match self {
            ApiError::Http { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == 401
    }

    /// True when the backend reports that multi-signature is not set up for the user.
    pub fn is_not_configured(&self) -> bool {
        match self {
            ApiError::Http { status, code, .. } => {
                code.as_deref() == Some(MULTISIG_NOT_CONFIGURED) || *status == 404
            }
            _ => false,
        }
    }

    /// Text suitable for a banner or notification line.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Timeout(_) => "The server took too long to respond".to_string(),
            ApiError::Network(_) => "Unable to reach the server".to_string(),
            ApiError::Http { message, .. } => message.clone(),
            ApiError::Decode(_) => "Unexpected response from the server".to_string(),
            ApiError::TokenStore(_) => "Unable to save the session".to_string(),
            ApiError::InvalidInput(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn http(status: u16, code: Option<&str>) -> ApiError {
        ApiError::Http {
            status,
            message: "boom".to_string(),
            code: code.map(str::to_string),
            body: Some(json!({ "message": "boom" })),
        }
    }

    #[test]
    fn transport_errors_map_to_pseudo_statuses() {
        assert_eq!(ApiError::Timeout(Duration::from_secs(1)).status(), 408);
        assert_eq!(ApiError::Network("refused".into()).status(), 0);
        assert_eq!(http(502, None).status(), 502);
    }

    #[test]
    fn not_configured_uses_code_or_404() {
        assert!(http(400, Some(MULTISIG_NOT_CONFIGURED)).is_not_configured());
        assert!(http(404, None).is_not_configured());
        assert!(!http(500, None).is_not_configured());
        assert!(!ApiError::Network("undefined".into()).is_not_configured());
    }

    #[test]
    fn user_message_prefers_backend_text() {
        assert_eq!(http(409, None).user_message(), "boom");
        assert_eq!(
            ApiError::Timeout(Duration::from_secs(1)).user_message(),
            "The server took too long to respond"
        );
    }
}
