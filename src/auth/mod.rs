//! Bearer-token acquisition and the self-refreshing token handle.

pub mod acquire;
pub mod token;

pub use acquire::{acquire, TokenGrant, SUBSCRIPTION_TOKEN_VALIDITY};
pub use token::Token;
