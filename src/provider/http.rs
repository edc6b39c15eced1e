//! HTTP client construction, auth headers, and status mapping.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::{ParleyError, Result};

/// Default transport timeout for completion requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Build the reqwest client shared by every remote call of one process.
///
/// Construct it once at startup and pass it to the components that need it.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(2)
        .build()
        .map_err(ParleyError::Network)
}

/// Build default headers for a Bearer-token API.
pub fn bearer_headers(api_key: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let mut value = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| {
        ParleyError::Authentication("API key contains characters not allowed in a header".into())
    })?;
    value.set_sensitive(true);
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// Map a non-success HTTP status to an error.
pub fn status_to_error(status: u16, body: &str) -> ParleyError {
    match status {
        401 | 403 => ParleyError::Authentication(extract_error_message(body)),
        429 => ParleyError::RateLimited {
            retry_after_ms: extract_retry_after(body),
        },
        _ => ParleyError::api(status, extract_error_message(body)),
    }
}

fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

fn extract_retry_after(body: &str) -> Option<u64> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("retry_after"))
                .and_then(|r| r.as_f64())
                .map(|s| (s * 1000.0) as u64)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_prefers_provider_message() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        match status_to_error(401, body) {
            ParleyError::Authentication(message) => {
                assert_eq!(message, "Incorrect API key provided")
            }
            other => panic!("expected Authentication, got {other:?}"),
        }
    }

    #[test]
    fn status_mapping_falls_back_to_raw_body() {
        let err = status_to_error(502, "bad gateway");
        assert!(matches!(err, ParleyError::Api { status: 502, ref message } if message == "bad gateway"));
    }

    #[test]
    fn rate_limit_reads_retry_after() {
        let err = status_to_error(429, r#"{"error":{"retry_after":1.5}}"#);
        assert!(matches!(
            err,
            ParleyError::RateLimited {
                retry_after_ms: Some(1500)
            }
        ));
    }

    #[test]
    fn bearer_headers_reject_control_characters() {
        assert!(bearer_headers("sk-ok").is_ok());
        assert!(matches!(
            bearer_headers("bad\nkey"),
            Err(ParleyError::Authentication(_))
        ));
    }
}
