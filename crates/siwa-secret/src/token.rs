//! Client-secret token construction.
//!
//! A Sign in with Apple client secret is not a static string but a
//! short-lived JWT, signed with the developer's P-256 key and presented to
//! the token endpoint in place of a password. The claim set follows the
//! RFC 7523 bearer-assertion shape:
//!
//! - `iss`: developer team identifier
//! - `sub`: service or app identifier (the client)
//! - `aud`: the identity provider's token endpoint identity
//! - `iat` / `exp`: issue and expiry timestamps
//!
//! The header carries `alg: ES256` and the key identifier so Apple can
//! select the matching public key.

use jsonwebtoken::{Algorithm, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;

use crate::error::SecretError;
use crate::identity::SigningIdentity;
use crate::key::SigningKey;

// ============================================================================
// Claims
// ============================================================================

/// Payload claims of a client-secret token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientSecretClaims {
    /// Issuer, the developer team identifier.
    pub iss: String,

    /// Subject, the service or app identifier.
    pub sub: String,

    /// Audience, the identity provider's token endpoint identity.
    pub aud: String,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

// ============================================================================
// Token
// ============================================================================

/// A signed, immutable client-secret token.
///
/// Produced by [`ClientSecretGenerator::generate`]; each generation call
/// mints a new token with a fresh issue time. The compact form is the
/// artifact presented to the identity provider.
#[derive(Debug, Clone)]
pub struct ClientSecretToken {
    compact: String,
    claims: ClientSecretClaims,
    kid: String,
}

impl ClientSecretToken {
    /// Returns the compact `header.payload.signature` serialization.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.compact
    }

    /// Consumes the token, returning the compact serialization.
    #[must_use]
    pub fn into_compact(self) -> String {
        self.compact
    }

    /// Returns the payload claims.
    #[must_use]
    pub fn claims(&self) -> &ClientSecretClaims {
        &self.claims
    }

    /// Returns the key identifier carried in the token header.
    #[must_use]
    pub fn kid(&self) -> &str {
        &self.kid
    }

    /// Returns the issue time.
    ///
    /// # Panics
    /// Never panics: the timestamp was produced from a valid clock reading.
    #[must_use]
    pub fn issued_at(&self) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(self.claims.iat)
            .expect("iat was derived from a valid clock reading")
    }

    /// Returns the expiry time.
    ///
    /// # Panics
    /// Never panics: the timestamp was produced from a valid clock reading.
    #[must_use]
    pub fn expires_at(&self) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(self.claims.exp)
            .expect("exp was derived from a valid clock reading")
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Builds signed client-secret tokens for a fixed identity and audience.
///
/// Construction validates the identity and validity window up front, so a
/// generator that exists can always attempt to sign. Signing itself only
/// fails if the key and algorithm disagree.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use siwa_secret::{ClientSecretGenerator, SigningIdentity, SigningKey};
///
/// let key = SigningKey::generate().unwrap();
/// let identity = SigningIdentity::new("TEAM123", "com.example.app", "KEY456");
/// let generator = ClientSecretGenerator::new(
///     identity,
///     "https://appleid.apple.com",
///     Duration::from_secs(180 * 24 * 3600),
/// )
/// .unwrap();
///
/// let token = generator.generate(&key).unwrap();
/// assert_eq!(token.claims().iss, "TEAM123");
/// ```
#[derive(Debug, Clone)]
pub struct ClientSecretGenerator {
    identity: SigningIdentity,
    audience: String,
    validity_seconds: i64,
}

impl ClientSecretGenerator {
    /// Creates a generator for the given identity, audience, and validity
    /// window.
    ///
    /// Any positive validity is accepted; note that Apple rejects client
    /// secrets valid for more than six months, so longer windows will
    /// produce tokens the provider turns away.
    ///
    /// # Errors
    /// Returns [`SecretError::InvalidIdentity`] if any identity field or
    /// the audience is empty, and [`SecretError::InvalidValidity`] if the
    /// window would not place the expiry strictly after the issue time.
    pub fn new(
        identity: SigningIdentity,
        audience: impl Into<String>,
        validity: Duration,
    ) -> Result<Self, SecretError> {
        identity.validate()?;

        let audience = audience.into();
        if audience.is_empty() {
            return Err(SecretError::invalid_identity("audience"));
        }

        let seconds = validity.as_secs();
        let validity_seconds =
            i64::try_from(seconds).map_err(|_| SecretError::invalid_validity(seconds))?;
        if validity_seconds == 0 {
            return Err(SecretError::invalid_validity(0));
        }

        Ok(Self {
            identity,
            audience,
            validity_seconds,
        })
    }

    /// Signs a new client-secret token.
    ///
    /// The issue time is read from the clock at each call, so repeated
    /// calls mint distinct tokens; existing tokens are never renewed in
    /// place. ECDSA signatures may differ between runs even for identical
    /// payloads, which is fine: verifiability, not byte equality, is the
    /// contract.
    ///
    /// # Errors
    /// Returns [`SecretError::InvalidKey`] or [`SecretError::Signing`] if
    /// the key cannot produce an ES256 signature.
    pub fn generate(&self, key: &SigningKey) -> Result<ClientSecretToken, SecretError> {
        let iat = OffsetDateTime::now_utc().unix_timestamp();
        let exp = iat + self.validity_seconds;

        let claims = ClientSecretClaims {
            iss: self.identity.issuer.clone(),
            sub: self.identity.subject.clone(),
            aud: self.audience.clone(),
            iat,
            exp,
        };

        let mut header = Header::new(Algorithm::ES256);
        header.kid = Some(self.identity.key_id.clone());

        let compact = encode(&header, &claims, key.encoding_key())?;

        tracing::debug!(
            kid = %self.identity.key_id,
            sub = %self.identity.subject,
            exp,
            "signed client secret"
        );

        Ok(ClientSecretToken {
            compact,
            claims,
            kid: self.identity.key_id.clone(),
        })
    }

    /// Decodes a compact token, verifying its ES256 signature and issuer.
    ///
    /// # Errors
    /// Returns [`SecretError::Signing`] if the signature does not verify
    /// or the claims do not match this generator.
    pub fn decode(
        &self,
        compact: &str,
        key: &SigningKey,
    ) -> Result<ClientSecretClaims, SecretError> {
        let mut validation = Validation::new(Algorithm::ES256);
        validation.set_issuer(&[&self.identity.issuer]);
        validation.validate_exp = true;
        validation.validate_aud = false; // Audience is fixed by construction

        let data = decode::<ClientSecretClaims>(compact, key.decoding_key(), &validation)?;
        Ok(data.claims)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

    const HALF_YEAR: Duration = Duration::from_secs(15_552_000);

    fn generator() -> ClientSecretGenerator {
        let identity = SigningIdentity::new("TEAM123", "com.example.app", "KEY456");
        ClientSecretGenerator::new(identity, "https://idp.example.com", HALF_YEAR).unwrap()
    }

    #[test]
    fn test_payload_reflects_inputs_exactly() {
        let key = SigningKey::generate().unwrap();
        let token = generator().generate(&key).unwrap();

        let claims = token.claims();
        assert_eq!(claims.iss, "TEAM123");
        assert_eq!(claims.sub, "com.example.app");
        assert_eq!(claims.aud, "https://idp.example.com");
        assert_eq!(claims.exp - claims.iat, 15_552_000);
        assert_eq!(token.kid(), "KEY456");
    }

    #[test]
    fn test_decoded_wire_format_matches_expected_header_and_payload() {
        let key = SigningKey::generate().unwrap();
        let token = generator().generate(&key).unwrap();

        let parts: Vec<&str> = token.as_str().split('.').collect();
        assert_eq!(parts.len(), 3);

        let header: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[0]).unwrap()).unwrap();
        assert_eq!(header["alg"], "ES256");
        assert_eq!(header["kid"], "KEY456");

        let payload: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[1]).unwrap()).unwrap();
        assert_eq!(payload["iss"], "TEAM123");
        assert_eq!(payload["sub"], "com.example.app");
        assert_eq!(payload["aud"], "https://idp.example.com");
        let iat = payload["iat"].as_i64().unwrap();
        let exp = payload["exp"].as_i64().unwrap();
        assert_eq!(exp, iat + 15_552_000);
    }

    #[test]
    fn test_signature_verifies_against_signing_key() {
        let key = SigningKey::generate().unwrap();
        let generator = generator();
        let token = generator.generate(&key).unwrap();

        let claims = generator.decode(token.as_str(), &key).unwrap();
        assert_eq!(&claims, token.claims());
    }

    #[test]
    fn test_signature_from_other_key_is_rejected() {
        let key = SigningKey::generate().unwrap();
        let other_key = SigningKey::generate().unwrap();
        let generator = generator();

        let token = generator.generate(&key).unwrap();
        let err = generator.decode(token.as_str(), &other_key).unwrap_err();
        assert!(matches!(err, SecretError::Signing { .. }));
    }

    #[test]
    fn test_repeated_generation_has_non_decreasing_issue_times() {
        let key = SigningKey::generate().unwrap();
        let generator = generator();

        let first = generator.generate(&key).unwrap();
        let second = generator.generate(&key).unwrap();
        assert!(second.claims().iat >= first.claims().iat);
    }

    #[test]
    fn test_empty_subject_fails_before_any_signing() {
        let identity = SigningIdentity::new("TEAM123", "", "KEY456");
        let err = ClientSecretGenerator::new(identity, "https://idp.example.com", HALF_YEAR)
            .unwrap_err();
        assert!(matches!(
            err,
            SecretError::InvalidIdentity { field: "subject" }
        ));
    }

    #[test]
    fn test_empty_audience_is_rejected() {
        let identity = SigningIdentity::new("TEAM123", "com.example.app", "KEY456");
        let err = ClientSecretGenerator::new(identity, "", HALF_YEAR).unwrap_err();
        assert!(matches!(
            err,
            SecretError::InvalidIdentity { field: "audience" }
        ));
    }

    #[test]
    fn test_zero_validity_is_rejected() {
        let identity = SigningIdentity::new("TEAM123", "com.example.app", "KEY456");
        let err =
            ClientSecretGenerator::new(identity, "https://idp.example.com", Duration::ZERO)
                .unwrap_err();
        assert!(matches!(err, SecretError::InvalidValidity { seconds: 0 }));
    }

    #[test]
    fn test_expiry_is_strictly_after_issue_time() {
        let key = SigningKey::generate().unwrap();
        let identity = SigningIdentity::new("TEAM123", "com.example.app", "KEY456");
        let generator =
            ClientSecretGenerator::new(identity, "https://idp.example.com", Duration::from_secs(1))
                .unwrap();

        let token = generator.generate(&key).unwrap();
        assert!(token.expires_at() > token.issued_at());
    }
}
