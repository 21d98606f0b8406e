//! Port for signing and checking bearer tokens.

use crate::domain::{AccessToken, TokenClaims, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// Claims could not be signed.
        Signing { message: String } => "token signing failed: {message}",
        /// Token is past its `exp` claim.
        Expired => "token has expired",
        /// Signature, algorithm, issuer or shape did not check out.
        Invalid { message: String } => "token is invalid: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Sign a fresh token for `user`.
    fn issue(&self, user: &User) -> Result<AccessToken, TokenError>;

    /// Check a presented token and return its claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
