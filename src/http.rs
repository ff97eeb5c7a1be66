//! Shared HTTP client, headers, and response-status handling.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::{Result, TranslateError};

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Get (or create) the shared reqwest client.
///
/// A build failure is returned rather than replaced by a client without the
/// default timeout; the next call tries again.
pub fn shared_client() -> Result<&'static reqwest::Client> {
    if let Some(client) = SHARED_CLIENT.get() {
        return Ok(client);
    }
    let client = build_client(DEFAULT_TIMEOUT)?;
    Ok(SHARED_CLIENT.get_or_init(|| client))
}

/// Build a pooled client with the given request timeout.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(10)
        .build()?)
}

/// Build headers for a Bearer-token request with the given content type.
///
/// An access string that cannot be sent as a header value is a
/// [`TranslateError::Decode`] error, since it came back from the token endpoint.
pub fn bearer_headers(access_token: &str, content_type: &'static str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    let authorization = HeaderValue::from_str(&format!("Bearer {access_token}")).map_err(|_| {
        TranslateError::Decode("access token is not a valid header value".to_string())
    })?;
    headers.insert(AUTHORIZATION, authorization);
    Ok(headers)
}

/// Read the full body, failing with [`TranslateError::HttpStatus`] on status >= 400.
///
/// The status is checked before the caller gets a chance to decode, so an
/// error page that happens to parse is still reported as an error.
pub async fn read_body(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_client_error() || status.is_server_error() {
        return Err(TranslateError::http_status(status, body));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_headers_carry_token_and_content_type() {
        let headers = bearer_headers("tok-1", "text/xml").unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer tok-1");
        assert_eq!(headers[CONTENT_TYPE], "text/xml");
    }

    #[test]
    fn token_with_control_characters_is_rejected() {
        let err = bearer_headers("tok\nInjected: yes", "text/plain").unwrap_err();
        assert!(matches!(&err, TranslateError::Decode(msg) if msg.contains("header value")));
    }

    #[test]
    fn shared_client_is_built_once() {
        let first = shared_client().unwrap();
        let second = shared_client().unwrap();
        assert!(std::ptr::eq(first, second));
    }
}
