//! Generic HTTP client tools
//!
//! Sending requests, logging, and mapping HTTP status codes to `CoreError`.
//! The gateway builds each `RequestBuilder` itself.

use bangumi_core::{CoreError, CoreResult};
use reqwest::RequestBuilder;
use serde::Deserialize;

use crate::log_sanitizer::truncate_for_log;

/// Error body returned by the `/v0` API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the response body of a 2xx reply
    ///
    /// # Arguments
    /// * `request_builder` - configured request constructor (URL, headers, body)
    /// * `method_name` - request method name (such as "GET", used for logs)
    /// * `path` - request path (for logging)
    ///
    /// # Returns
    /// * `Ok(body)` - 2xx response body
    /// * `Err(CoreError::Timeout)` - the client timeout elapsed
    /// * `Err(CoreError::NetworkError)` - connection or body read failure
    /// * `Err(CoreError::NotFound)` - HTTP 404
    /// * `Err(CoreError::ApiError)` - any other non-success status
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        path: &str,
    ) -> CoreResult<Vec<u8>> {
        log::debug!("{method_name} {path}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                CoreError::Timeout(format!("{method_name} {path}: {e}"))
            } else {
                CoreError::NetworkError(format!("{method_name} {path}: {e}"))
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("{method_name} {path} -> {status_code}");

        let body = response
            .bytes()
            .await
            .map_err(|e| CoreError::NetworkError(format!("Failed to read response body: {e}")))?
            .to_vec();

        log::debug!(
            "Response Body: {}",
            truncate_for_log(&String::from_utf8_lossy(&body))
        );

        Self::check_status(status_code, &body, path).map(|()| body)
    }

    /// Map a status code to success or `CoreError`
    pub fn check_status(status_code: u16, body: &[u8], path: &str) -> CoreResult<()> {
        match status_code {
            200..=299 => Ok(()),
            404 => Err(CoreError::NotFound(path.to_string())),
            _ => {
                let message = Self::error_message(body);
                if (500..600).contains(&status_code) {
                    log::error!("Server error (HTTP {status_code}) on {path}: {message}");
                } else {
                    log::warn!("Request rejected (HTTP {status_code}) on {path}: {message}");
                }
                Err(CoreError::ApiError {
                    status: status_code,
                    message,
                })
            }
        }
    }

    /// Extract a readable message from an error body
    pub fn error_message(body: &[u8]) -> String {
        match serde_json::from_slice::<ApiErrorBody>(body) {
            Ok(err) if !err.description.is_empty() => err.description,
            Ok(err) if !err.title.is_empty() => err.title,
            _ => truncate_for_log(String::from_utf8_lossy(body).trim()),
        }
    }
}
