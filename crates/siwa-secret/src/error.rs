//! Client-secret generation error types.
//!
//! Every failure in this crate surfaces as a [`SecretError`]. There is no
//! retry layer: the caller is a one-shot provisioning command, so a token
//! that was generated but not written must still be reported as a failure.

use std::path::{Path, PathBuf};

/// Errors that can occur while generating or persisting a client secret.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    /// A required identity field is missing or empty.
    #[error("Invalid identity: {field} must not be empty")]
    InvalidIdentity {
        /// Name of the offending field.
        field: &'static str,
    },

    /// The signing key is malformed or does not match the ES256 algorithm.
    #[error("Invalid signing key: {message}")]
    InvalidKey {
        /// Description of why the key is invalid.
        message: String,
    },

    /// The requested validity window would not place the expiry strictly
    /// after the issue time.
    #[error("Invalid validity window: {seconds} seconds")]
    InvalidValidity {
        /// The rejected window length.
        seconds: u64,
    },

    /// The signing primitive failed after the key itself parsed cleanly.
    #[error("Failed to sign client secret: {message}")]
    Signing {
        /// Description of the signing error.
        message: String,
    },

    /// The destination path could not be written.
    #[error("Failed to write client secret to {}: {source}", path.display())]
    Write {
        /// The destination that was being written.
        path: PathBuf,
        /// The underlying OS error.
        source: std::io::Error,
    },
}

impl SecretError {
    /// Creates a new `InvalidIdentity` error.
    #[must_use]
    pub fn invalid_identity(field: &'static str) -> Self {
        Self::InvalidIdentity { field }
    }

    /// Creates a new `InvalidKey` error.
    #[must_use]
    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::InvalidKey {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidValidity` error.
    #[must_use]
    pub fn invalid_validity(seconds: u64) -> Self {
        Self::InvalidValidity { seconds }
    }

    /// Creates a new `Signing` error.
    #[must_use]
    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    /// Creates a new `Write` error for the given destination.
    #[must_use]
    pub fn write(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for SecretError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidEcdsaKey
            | ErrorKind::InvalidRsaKey(_)
            | ErrorKind::InvalidKeyFormat => Self::invalid_key(err.to_string()),
            _ => Self::signing(err.to_string()),
        }
    }
}
