//! Writing the minted secret to disk.

use std::path::Path;

use crate::error::SecretError;
use crate::token::ClientSecretToken;

/// Writes the compact token to `path` as UTF-8, overwriting any existing
/// file. No trailing newline or metadata is added; the file content is
/// byte-for-byte the compact serialization.
///
/// # Errors
/// Returns [`SecretError::Write`] with the path and the underlying OS
/// reason when the destination is not writable.
pub fn persist(token: &ClientSecretToken, path: impl AsRef<Path>) -> Result<(), SecretError> {
    let path = path.as_ref();
    std::fs::write(path, token.as_str()).map_err(|source| SecretError::write(path, source))?;

    tracing::info!(
        path = %path.display(),
        kid = token.kid(),
        exp = token.claims().exp,
        "client secret written"
    );
    Ok(())
}
