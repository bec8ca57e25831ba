//! Error taxonomy for the page scripts.
//!
//! Nothing here is fatal to the page: every variant maps to a user-facing
//! message or to a disabled feature.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrontendError {
    /// Browser lacks an optional capability (speech recognition)
    #[error("{feature} is not available in this browser")]
    CapabilityUnavailable { feature: &'static str },

    /// Required input missing; the request is never sent
    #[error("{0}")]
    Validation(String),

    /// Transport failure before any response arrived
    #[error("network error: {0}")]
    Network(String),

    /// Response arrived but could not be decoded
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Server answered with an error status or an error payload
    #[error("server rejected the request (HTTP {status}): {}", .message.as_deref().unwrap_or("no details"))]
    Server { status: u16, message: Option<String> },

    /// A browser API threw or returned something unexpected
    #[error("browser API failure: {0}")]
    BrowserApi(String),
}

impl FrontendError {
    /// Text to show the user: validation text and server-supplied messages
    /// pass through, everything else collapses to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            FrontendError::Validation(message) => message.clone(),
            FrontendError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Wrap a thrown JS value with the call that produced it
pub fn js_error(context: &str, value: JsValue) -> FrontendError {
    let detail = value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value));
    FrontendError::BrowserApi(format!("{}: {}", context, detail))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "Something went wrong.";

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = FrontendError::Server {
            status: 404,
            message: Some("Logistics partner not found".to_string()),
        };
        assert_eq!(err.user_message(FALLBACK), "Logistics partner not found");
    }

    #[test]
    fn test_user_message_falls_back() {
        let silent = FrontendError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(silent.user_message(FALLBACK), FALLBACK);
        assert_eq!(
            FrontendError::Network("connection refused".to_string()).user_message(FALLBACK),
            FALLBACK
        );
        assert_eq!(
            FrontendError::Validation("Please enter a crop name first.".to_string())
                .user_message(FALLBACK),
            "Please enter a crop name first."
        );
    }

    #[test]
    fn test_display() {
        let err = FrontendError::Server {
            status: 403,
            message: Some("Unauthorized".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "server rejected the request (HTTP 403): Unauthorized"
        );
    }
}
