//! Convenience re-exports for common use.

pub use crate::auth::Token;
pub use crate::config::{Credentials, TranslatorConfig};
pub use crate::error::{Result, TranslateError};
pub use crate::translate::{TranslateArrayItem, Translator};
