//! API utilities for page-to-backend communication
//!
//! Provides helper functions for constructing API URLs and decoding responses.

use contracts::usecases::common::ErrorBody;
use gloo_net::http::Response;
use serde::de::DeserializeOwned;

use super::error::FrontendError;

/// Resolve the base URL for API requests
///
/// A configured base wins; otherwise requests go to the page's own origin,
/// which is where the marketplace backend serves both pages and API.
///
/// # Returns
/// - Base URL without trailing slash, like "https://agrilink.example"
/// - Empty string if neither a base nor a window is available
pub fn api_base(configured: &str) -> String {
    let configured = configured.trim().trim_end_matches('/');
    if !configured.is_empty() {
        return configured.to_string();
    }
    match web_sys::window() {
        Some(window) => window.location().origin().unwrap_or_default(),
        None => String::new(),
    }
}

/// Build a full API URL from a base and a path
///
/// # Example
/// ```rust
/// # use frontend::shared::api_utils::api_url;
/// assert_eq!(api_url("https://agrilink.example/", "/api/logistics-partners"),
///            "https://agrilink.example/api/logistics-partners");
/// ```
pub fn api_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Decode the outcome of a sent request.
///
/// Non-OK statuses are mapped to [`FrontendError::Server`] carrying the
/// backend's `{ "error": ... }` text when the body has one.
pub async fn read_json<T: DeserializeOwned>(
    sent: Result<Response, gloo_net::Error>,
) -> Result<T, FrontendError> {
    let response = sent.map_err(|e| FrontendError::Network(e.to_string()))?;

    if !response.ok() {
        let status = response.status();
        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        log::warn!("request to {} failed with HTTP {}", response.url(), status);
        return Err(FrontendError::Server {
            status,
            message: body.message().map(str::to_string),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| FrontendError::InvalidResponse(e.to_string()))
}
