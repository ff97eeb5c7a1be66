//! Credentials exchanged for a bearer token.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_GRANT_TYPE: &str = "client_credentials";
pub const DEFAULT_SCOPE: &str = "http://api.microsofttranslator.com";
pub const DEFAULT_OAUTH_URL: &str = "https://datamarket.accesscontrol.windows.net/v2/OAuth2-13";
pub const DEFAULT_ISSUE_TOKEN_URL: &str =
    "https://api.cognitive.microsoft.com/sts/v1.0/issueToken";

/// How to authenticate against the token endpoint.
///
/// # Example
/// ```
/// use mstranslate::config::Credentials;
///
/// let oauth = Credentials::client_credentials("my-app", "s3cret");
/// let key = Credentials::subscription_key("0123abcd")
///     .with_auth_url("http://localhost:8080/issueToken");
/// assert_eq!(key.auth_url(), "http://localhost:8080/issueToken");
/// assert!(!format!("{oauth:?}").contains("s3cret"));
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credentials {
    /// OAuth2 client-credentials grant, posted as a form.
    ClientCredentials {
        #[serde(default = "default_grant_type")]
        grant_type: String,
        #[serde(default = "default_scope")]
        scope: String,
        client_id: String,
        client_secret: String,
        #[serde(default = "default_oauth_url")]
        auth_url: String,
    },
    /// Subscription key sent in the `Ocp-Apim-Subscription-Key` header.
    SubscriptionKey {
        key: String,
        #[serde(default = "default_issue_token_url")]
        auth_url: String,
    },
}

impl Credentials {
    pub fn client_credentials(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self::ClientCredentials {
            grant_type: default_grant_type(),
            scope: default_scope(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            auth_url: default_oauth_url(),
        }
    }

    pub fn subscription_key(key: impl Into<String>) -> Self {
        Self::SubscriptionKey {
            key: key.into(),
            auth_url: default_issue_token_url(),
        }
    }

    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        match &mut self {
            Self::ClientCredentials { auth_url, .. } | Self::SubscriptionKey { auth_url, .. } => {
                *auth_url = url.into();
            }
        }
        self
    }

    /// Only meaningful for the client-credentials variant; ignored otherwise.
    pub fn with_scope(mut self, value: impl Into<String>) -> Self {
        if let Self::ClientCredentials { scope, .. } = &mut self {
            *scope = value.into();
        }
        self
    }

    /// Only meaningful for the client-credentials variant; ignored otherwise.
    pub fn with_grant_type(mut self, value: impl Into<String>) -> Self {
        if let Self::ClientCredentials { grant_type, .. } = &mut self {
            *grant_type = value.into();
        }
        self
    }

    pub fn auth_url(&self) -> &str {
        match self {
            Self::ClientCredentials { auth_url, .. } | Self::SubscriptionKey { auth_url, .. } => {
                auth_url
            }
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientCredentials {
                grant_type,
                scope,
                client_id,
                auth_url,
                ..
            } => f
                .debug_struct("ClientCredentials")
                .field("grant_type", grant_type)
                .field("scope", scope)
                .field("client_id", client_id)
                .field("client_secret", &"..")
                .field("auth_url", auth_url)
                .finish(),
            Self::SubscriptionKey { auth_url, .. } => f
                .debug_struct("SubscriptionKey")
                .field("key", &"..")
                .field("auth_url", auth_url)
                .finish(),
        }
    }
}

fn default_grant_type() -> String {
    DEFAULT_GRANT_TYPE.to_string()
}

fn default_scope() -> String {
    DEFAULT_SCOPE.to_string()
}

fn default_oauth_url() -> String {
    DEFAULT_OAUTH_URL.to_string()
}

fn default_issue_token_url() -> String {
    DEFAULT_ISSUE_TOKEN_URL.to_string()
}
