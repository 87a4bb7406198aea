//! The identity a client secret is minted for.

use crate::error::SecretError;

/// The fixed identity under which a client secret is signed.
///
/// Apple's token endpoint expects the developer team identifier as the
/// `iss` claim, the service or app identifier as the `sub` claim, and the
/// identifier of the signing key in the JOSE header. All three are opaque
/// strings from this crate's perspective; whether they exist on the
/// provider side is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningIdentity {
    /// Developer team identifier (token issuer).
    pub issuer: String,

    /// Service or app identifier the secret represents (token subject).
    pub subject: String,

    /// Identifier of the private key, echoed in the token header so the
    /// verifier can select the matching public key.
    pub key_id: String,
}

impl SigningIdentity {
    /// Creates a new signing identity.
    #[must_use]
    pub fn new(
        issuer: impl Into<String>,
        subject: impl Into<String>,
        key_id: impl Into<String>,
    ) -> Self {
        Self {
            issuer: issuer.into(),
            subject: subject.into(),
            key_id: key_id.into(),
        }
    }

    /// Checks that every field is non-empty.
    ///
    /// # Errors
    /// Returns [`SecretError::InvalidIdentity`] naming the first empty field.
    pub fn validate(&self) -> Result<(), SecretError> {
        if self.issuer.is_empty() {
            return Err(SecretError::invalid_identity("issuer"));
        }
        if self.subject.is_empty() {
            return Err(SecretError::invalid_identity("subject"));
        }
        if self.key_id.is_empty() {
            return Err(SecretError::invalid_identity("key id"));
        }
        Ok(())
    }
}
