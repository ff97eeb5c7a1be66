//! One round trip to the token endpoint.

use std::time::Duration;

use serde::Deserialize;

use crate::config::Credentials;
use crate::error::{Result, TranslateError};
use crate::http::read_body;

/// Lifetime of tokens minted by the subscription-key `issueToken` endpoint.
pub const SUBSCRIPTION_TOKEN_VALIDITY: Duration = Duration::from_secs(10 * 60);

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// A freshly issued access token and how long the service honours it.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    pub validity: Duration,
}

impl std::fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenGrant")
            .field("access_token", &"..")
            .field("validity", &self.validity)
            .finish()
    }
}

/// Exchange credentials for a token. Performs exactly one HTTP request.
pub async fn acquire(client: &reqwest::Client, credentials: &Credentials) -> Result<TokenGrant> {
    match credentials {
        Credentials::ClientCredentials {
            grant_type,
            scope,
            client_id,
            client_secret,
            auth_url,
        } => {
            let response = client
                .post(auth_url)
                .header("Accept", "application/json")
                .form(&[
                    ("grant_type", grant_type.as_str()),
                    ("scope", scope.as_str()),
                    ("client_id", client_id.as_str()),
                    ("client_secret", client_secret.as_str()),
                ])
                .send()
                .await?;
            let body = read_body(response).await?;
            parse_oauth_response(&body)
        }
        Credentials::SubscriptionKey { key, auth_url } => {
            let response = client
                .post(auth_url)
                .header(SUBSCRIPTION_KEY_HEADER, key.as_str())
                .body("")
                .send()
                .await?;
            let body = read_body(response).await?;
            let access_token = body.trim();
            if access_token.is_empty() {
                return Err(TranslateError::Decode(
                    "token endpoint returned an empty body".to_string(),
                ));
            }
            Ok(TokenGrant {
                access_token: access_token.to_string(),
                validity: SUBSCRIPTION_TOKEN_VALIDITY,
            })
        }
    }
}

#[derive(Debug, Deserialize)]
struct OAuthTokenResponse {
    access_token: String,
    expires_in: Option<serde_json::Value>,
}

fn parse_oauth_response(body: &str) -> Result<TokenGrant> {
    let payload: OAuthTokenResponse = serde_json::from_str(body)?;
    if payload.access_token.is_empty() {
        return Err(TranslateError::Decode("access_token is empty".to_string()));
    }
    let secs = parse_expires_in(payload.expires_in)?;
    Ok(TokenGrant {
        access_token: payload.access_token,
        validity: Duration::from_secs(secs),
    })
}

/// The service has sent `expires_in` both as `"600"` and as `600`.
fn parse_expires_in(value: Option<serde_json::Value>) -> Result<u64> {
    let secs = match &value {
        Some(serde_json::Value::Number(num)) => num.as_u64(),
        Some(serde_json::Value::String(text)) => text.trim().parse::<u64>().ok(),
        _ => None,
    };
    match secs {
        Some(secs) if secs > 0 => Ok(secs),
        _ => Err(TranslateError::Decode(format!(
            "invalid expires_in: {}",
            value.map(|v| v.to_string()).unwrap_or_else(|| "missing".to_string())
        ))),
    }
}
