//! Single-string and batch translation against the v2 HTTP API.

pub mod xml;

pub use xml::TranslateArrayItem;

use tracing::debug;

use crate::auth::Token;
use crate::config::{TranslatorConfig, DEFAULT_BASE_URL};
use crate::error::{Result, TranslateError};
use crate::http::{bearer_headers, read_body};

/// Translation client bound to one shared [`Token`].
///
/// Every call refreshes the token first when it is stale. Clones share the
/// token and the HTTP client.
///
/// # Example
/// ```no_run
/// use mstranslate::config::TranslatorConfig;
/// use mstranslate::Translator;
///
/// # async fn example() -> mstranslate::error::Result<()> {
/// let translator = Translator::from_config(&TranslatorConfig::from_env()?)?;
/// let greeting = translator.translate("Hello", "en", "fr").await?;
/// let words = translator.translate_array(&["hello", "world"], "en", "fr").await?;
/// println!("{greeting} {words:?}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Translator {
    client: reqwest::Client,
    token: Token,
    base_url: String,
}

impl Translator {
    /// Use the token's HTTP client and the public endpoint.
    pub fn new(token: Token) -> Self {
        Self {
            client: token.http_client().clone(),
            token,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn from_config(config: &TranslatorConfig) -> Result<Self> {
        let client = config.http_client()?;
        let token = Token::new(client, config.credentials.clone());
        Ok(Self::new(token).with_base_url(config.base_url.clone()))
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Translate one string. An empty `from` asks the service to detect it.
    pub async fn translate(&self, text: &str, from: &str, to: &str) -> Result<String> {
        if text.is_empty() {
            return Err(TranslateError::required("text"));
        }
        if to.is_empty() {
            return Err(TranslateError::required("to"));
        }

        let access_token = self.token.bearer().await?;
        debug!(from, to, len = text.len(), "translate");
        let response = self
            .client
            .get(format!("{}/Translate", self.base_url))
            .headers(bearer_headers(&access_token, "text/plain")?)
            .query(&[("from", from), ("to", to), ("text", text)])
            .send()
            .await?;
        let body = read_body(response).await?;
        xml::decode_string(&body)
    }

    /// Translate a batch; results line up with `texts` one to one.
    pub async fn translate_array<S: AsRef<str>>(
        &self,
        texts: &[S],
        from: &str,
        to: &str,
    ) -> Result<Vec<String>> {
        Ok(self
            .translate_array_detailed(texts, from, to)
            .await?
            .into_iter()
            .map(|item| item.translated_text)
            .collect())
    }

    /// Like [`translate_array`](Self::translate_array), keeping the
    /// per-item metadata the service reports.
    ///
    /// A response whose item count differs from the request is rejected as
    /// a whole rather than returned partially.
    pub async fn translate_array_detailed<S: AsRef<str>>(
        &self,
        texts: &[S],
        from: &str,
        to: &str,
    ) -> Result<Vec<TranslateArrayItem>> {
        if texts.is_empty() {
            return Err(TranslateError::required("texts"));
        }
        if to.is_empty() {
            return Err(TranslateError::required("to"));
        }

        let body = xml::encode_array_request(texts, from, to)?;
        let access_token = self.token.bearer().await?;
        debug!(from, to, count = texts.len(), "translate array");
        let response = self
            .client
            .post(format!("{}/TranslateArray", self.base_url))
            .headers(bearer_headers(&access_token, "text/xml")?)
            .body(body)
            .send()
            .await?;
        let body = read_body(response).await?;
        let items = xml::decode_array_response(&body)?;
        if items.len() != texts.len() {
            return Err(TranslateError::Decode(format!(
                "expected {} translations, got {}",
                texts.len(),
                items.len()
            )));
        }
        Ok(items)
    }
}
