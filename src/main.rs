use docqa::cli::{parse_args, run_command, CliCommand, USAGE};
use docqa::client::ApiClient;
use docqa::config::ClientConfig;

use color_eyre::Result;
use tracing_subscriber::EnvFilter;

/// Install the log subscriber. Logs go to stderr so streamed answers on
/// stdout stay clean; RUST_LOG overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let command = parse_args(std::env::args());
    if let CliCommand::Invalid(message) = &command {
        eprintln!("{}\n\n{}", message, USAGE);
        std::process::exit(2);
    }

    let config = ClientConfig::from_env();
    tracing::debug!(base_url = %config.base_url, "Using backend");
    let client = ApiClient::new(config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_command(&client, command, &mut out).await
}
