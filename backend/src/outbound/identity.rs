//! Identity verifiers for provider-issued access tokens.
//!
//! The OAuth provider signs HS256 access tokens with a shared secret and the
//! audience `authenticated`. [`JwtIdentityVerifier`] checks signature, expiry,
//! and audience before reading the subject, email, and profile name.
//! [`FixtureIdentityVerifier`] stands in when no secret is configured.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::ports::{IdentityVerificationError, IdentityVerifier};
use crate::domain::{Identity, IdentityId};

/// Audience the provider stamps on end-user tokens.
pub const TOKEN_AUDIENCE: &str = "authenticated";

#[derive(Debug, Deserialize)]
struct ProfileMetadata {
    full_name: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Option<ProfileMetadata>,
}

impl Claims {
    fn into_identity(self) -> Result<Identity, IdentityVerificationError> {
        let id = IdentityId::new(self.sub)
            .map_err(|err| IdentityVerificationError::rejected(format!("invalid subject: {err}")))?;
        let display_name = self
            .user_metadata
            .and_then(|meta| meta.full_name.or(meta.name));
        Ok(Identity::new(id, self.email.unwrap_or_default(), display_name))
    }
}

/// Verifies HS256 tokens signed with the provider's JWT secret.
pub struct JwtIdentityVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityVerifier {
    /// Build a verifier for `secret`; the secret buffer is wiped afterwards.
    pub fn new(secret: Zeroizing<String>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[TOKEN_AUDIENCE]);
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl IdentityVerifier for JwtIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, IdentityVerificationError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|err| IdentityVerificationError::rejected(err.to_string()))?;
        data.claims.into_identity()
    }
}

/// Development verifier accepting tokens of the form `dev:<subject>`.
///
/// The email is `<subject>@example.com`. Any other token is rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityVerifier;

/// Prefix recognised by [`FixtureIdentityVerifier`].
pub const FIXTURE_TOKEN_PREFIX: &str = "dev:";

#[async_trait]
impl IdentityVerifier for FixtureIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, IdentityVerificationError> {
        let subject = token
            .strip_prefix(FIXTURE_TOKEN_PREFIX)
            .ok_or_else(|| IdentityVerificationError::rejected("not a development token"))?;
        let id = IdentityId::new(subject)
            .map_err(|err| IdentityVerificationError::rejected(err.to_string()))?;
        Ok(Identity::new(id, format!("{subject}@example.com"), None))
    }
}
