//! Self-refreshing bearer token handle shared by every translation call.

use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::acquire::{acquire, TokenGrant};
use crate::config::Credentials;
use crate::error::{Result, TranslateError};

/// Shared, self-refreshing bearer token.
///
/// Cloning is cheap and every clone sees the same token. Refreshes are
/// serialized by a lock owned by the token, so concurrent callers that all
/// find it stale trigger a single request to the token endpoint.
///
/// # Example
/// ```no_run
/// use mstranslate::auth::Token;
/// use mstranslate::config::Credentials;
///
/// # async fn example() -> mstranslate::error::Result<()> {
/// let client = reqwest::Client::new();
/// let token = Token::acquire(client, Credentials::subscription_key("key")).await?;
/// assert!(token.is_valid());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Token {
    inner: Arc<TokenInner>,
}

struct TokenInner {
    client: reqwest::Client,
    credentials: Credentials,
    state: RwLock<Option<TokenState>>,
    refresh: tokio::sync::Mutex<()>,
}

#[derive(Clone)]
struct TokenState {
    access_token: String,
    issued_at: Instant,
    validity: Duration,
}

impl TokenState {
    fn is_fresh_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.issued_at) < self.validity
    }
}

impl Token {
    /// Create a handle that has not been issued yet; the first
    /// [`ensure_fresh`](Self::ensure_fresh) acquires it.
    pub fn new(client: reqwest::Client, credentials: Credentials) -> Self {
        Self {
            inner: Arc::new(TokenInner {
                client,
                credentials,
                state: RwLock::new(None),
                refresh: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Create a handle and acquire its first token immediately.
    pub async fn acquire(client: reqwest::Client, credentials: Credentials) -> Result<Self> {
        let token = Self::new(client, credentials);
        token.ensure_fresh().await?;
        Ok(token)
    }

    /// Refresh the token if it is stale. No network call when it is fresh.
    ///
    /// On failure the previous state is kept and the error is returned; the
    /// next call tries again.
    pub async fn ensure_fresh(&self) -> Result<()> {
        self.fresh_access_token().await.map(|_| ())
    }

    /// The refresh gate. Returns the access string it found fresh, or the
    /// one it just acquired, so callers never re-read a state that may have
    /// expired in between.
    async fn fresh_access_token(&self) -> Result<String> {
        if let Some(access) = self.fresh_access_at(Instant::now()) {
            return Ok(access);
        }

        let _guard = self.inner.refresh.lock().await;
        if let Some(access) = self.fresh_access_at(Instant::now()) {
            debug!("access token refreshed by a concurrent caller");
            return Ok(access);
        }

        debug!(auth_url = %self.inner.credentials.auth_url(), "access token stale, refreshing");
        let requested_at = Instant::now();
        let grant = acquire(&self.inner.client, &self.inner.credentials)
            .await
            .map_err(|err| {
                warn!(error = %err, "access token refresh failed");
                err
            })?;
        info!(
            validity_secs = grant.validity.as_secs(),
            "access token acquired"
        );
        let access = grant.access_token.clone();
        *self.write_state() = Some(TokenState::issued(grant, requested_at));
        Ok(access)
    }

    /// Current access string, or [`TranslateError::ExpiredToken`] if the
    /// handle holds no fresh token.
    pub fn access_token(&self) -> Result<String> {
        self.fresh_access_at(Instant::now())
            .ok_or(TranslateError::ExpiredToken)
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Instant::now())
    }

    /// Whether the token would still be fresh at `now`.
    pub fn is_valid_at(&self, now: Instant) -> bool {
        self.read_state()
            .as_ref()
            .is_some_and(|state| state.is_fresh_at(now))
    }

    /// Remaining validity, or `None` when the token is stale or unissued.
    pub fn expires_in(&self) -> Option<Duration> {
        let now = Instant::now();
        self.read_state()
            .as_ref()
            .filter(|state| state.is_fresh_at(now))
            .map(|state| state.validity - now.saturating_duration_since(state.issued_at))
    }

    /// Refresh if needed, then return the access string.
    pub(crate) async fn bearer(&self) -> Result<String> {
        self.fresh_access_token().await
    }

    fn fresh_access_at(&self, now: Instant) -> Option<String> {
        self.read_state()
            .as_ref()
            .filter(|state| state.is_fresh_at(now))
            .map(|state| state.access_token.clone())
    }

    pub(crate) fn http_client(&self) -> &reqwest::Client {
        &self.inner.client
    }

    fn read_state(&self) -> RwLockReadGuard<'_, Option<TokenState>> {
        self.inner
            .state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Option<TokenState>> {
        self.inner
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[cfg(test)]
    fn with_state(client: reqwest::Client, credentials: Credentials, state: TokenState) -> Self {
        let token = Self::new(client, credentials);
        *token.write_state() = Some(state);
        token
    }
}

impl TokenState {
    fn issued(grant: TokenGrant, issued_at: Instant) -> Self {
        Self {
            access_token: grant.access_token,
            issued_at,
            validity: grant.validity,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("credentials", &self.inner.credentials)
            .field("valid", &self.is_valid())
            .field("expires_in", &self.expires_in())
            .finish()
    }
}
