mod cli;
mod output;

use anyhow::Result;
use clap::Parser;
use siwa_secret::{ClientSecretGenerator, SigningIdentity, SigningKey, persist};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use output::{print_error, print_success};

fn main() {
    // Load .env if present; provisioning environments often configure the
    // identity there instead of exporting variables.
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: failed to load .env file: {e}");
        }
    }

    init_tracing();

    if let Err(e) = run() {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let key = SigningKey::from_pem_file(&cli.key_file)?;
    let identity = SigningIdentity::new(&cli.team_id, &cli.client_id, &cli.key_id);
    let generator = ClientSecretGenerator::new(identity, &cli.audience, cli.validity)?;

    let token = generator.generate(&key)?;
    persist(&token, &cli.output)?;

    print_success(&format!(
        "Client secret written to {} (expires {})",
        cli.output.display(),
        token.expires_at().date()
    ));
    Ok(())
}

fn init_tracing() {
    // RUST_LOG wins; otherwise stay quiet so the confirmation line is the
    // only normal output.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
}
