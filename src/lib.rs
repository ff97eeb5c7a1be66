//! mstranslate: Microsoft Translator v2 client
//!
//! Exchanges client credentials or a subscription key for a bearer token,
//! caches it for its validity window, and refreshes it transparently before
//! each `Translate` or `TranslateArray` call. Concurrent callers sharing one
//! [`auth::Token`] trigger at most one refresh at a time.
//!
//! # Quick Start
//!
//! ```no_run
//! use mstranslate::prelude::*;
//!
//! # async fn example() -> mstranslate::error::Result<()> {
//! let config = TranslatorConfig::new(Credentials::client_credentials("my-app", "secret"));
//! let translator = Translator::from_config(&config)?;
//! let text = translator.translate("Hello, world", "en", "de").await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod prelude;
pub mod translate;

#[cfg(feature = "cli")]
pub mod cli;

pub use translate::Translator;
