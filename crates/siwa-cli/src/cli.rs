use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Every input has an environment fallback so that, with the environment
/// prepared (or a `.env` file present), the command runs with no arguments
/// at all, which is the intended invocation from provisioning pipelines.
#[derive(Parser)]
#[command(name = "siwa-secret")]
#[command(about = "Mint a Sign in with Apple client secret and write it to disk")]
#[command(version)]
pub struct Cli {
    /// Apple Developer team identifier (token issuer)
    #[arg(long, env = "SIWA_TEAM_ID")]
    pub team_id: String,

    /// Identifier of the signing key from the developer portal
    #[arg(long, env = "SIWA_KEY_ID")]
    pub key_id: String,

    /// Service or app identifier the secret represents (token subject)
    #[arg(long, env = "SIWA_CLIENT_ID")]
    pub client_id: String,

    /// Path to the PEM-encoded EC private key (AuthKey_*.p8)
    #[arg(long, env = "SIWA_PRIVATE_KEY_PATH")]
    pub key_file: PathBuf,

    /// Token audience (the identity provider's token endpoint identity)
    #[arg(long, env = "SIWA_AUDIENCE", default_value = "https://appleid.apple.com")]
    pub audience: String,

    /// Secret lifetime (e.g. 180d, 12h); Apple rejects more than 6 months
    #[arg(long, env = "SIWA_VALIDITY", default_value = "180d", value_parser = humantime::parse_duration)]
    pub validity: Duration,

    /// Output file for the minted secret
    #[arg(long, env = "SIWA_OUTPUT", default_value = "client_secret.txt")]
    pub output: PathBuf,
}
