//! # siwa-secret
//!
//! Sign in with Apple client-secret generation.
//!
//! Apple authenticates confidential OAuth clients with a short-lived
//! ES256-signed JWT instead of a static secret. This crate builds that
//! token from an injected identity and private key, and writes it to disk
//! for deployment tooling to pick up. It performs no network calls.
//!
//! ## Modules
//!
//! - [`identity`] - the issuer/subject/key-id triple a secret is minted for
//! - [`key`] - PEM key loading and ES256 key handling
//! - [`token`] - token construction, signing, and verification
//! - [`persist`] - writing the compact token to a file
//! - [`error`] - the error taxonomy
//!
//! ## Example
//!
//! ```no_run
//! use std::time::Duration;
//! use siwa_secret::{ClientSecretGenerator, SigningIdentity, SigningKey, persist};
//!
//! # fn main() -> Result<(), siwa_secret::SecretError> {
//! let key = SigningKey::from_pem_file("AuthKey_KEY456.p8")?;
//! let identity = SigningIdentity::new("TEAM123", "com.example.app", "KEY456");
//! let generator = ClientSecretGenerator::new(
//!     identity,
//!     "https://appleid.apple.com",
//!     Duration::from_secs(180 * 24 * 3600),
//! )?;
//!
//! let token = generator.generate(&key)?;
//! persist(&token, "client_secret.txt")?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod identity;
pub mod key;
pub mod persist;
pub mod token;

pub use error::SecretError;
pub use identity::SigningIdentity;
pub use key::SigningKey;
pub use persist::persist;
pub use token::{ClientSecretClaims, ClientSecretGenerator, ClientSecretToken};

/// Type alias for client-secret operation results.
pub type SecretResult<T> = Result<T, SecretError>;
