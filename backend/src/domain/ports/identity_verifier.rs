//! Port for turning provider-issued access tokens into identities.

use async_trait::async_trait;

use crate::domain::Identity;

use super::define_port_error;

define_port_error! {
    /// Errors raised while verifying an access token.
    pub enum IdentityVerificationError {
        /// The token is malformed, expired, or carries a bad signature.
        Rejected { message: String } => "access token rejected: {message}",
        /// The verifier could not reach its backing provider.
        Unavailable { message: String } => "identity provider unavailable: {message}",
    }
}

/// Verifies access tokens issued by the OAuth provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Resolve the identity embedded in `token`.
    async fn verify(&self, token: &str) -> Result<Identity, IdentityVerificationError>;
}
