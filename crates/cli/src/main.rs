use clap::Parser;
use pex_core::{client_config_from_env_values, ExpertSession};
use pex_http::HttpExpertApi;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod shell;
mod terminal;

use commands::Commands;
use terminal::TerminalNotifier;

#[derive(Parser)]
#[command(name = "pex")]
#[command(about = "Plant expert system client")]
struct Cli {
    /// Base URL of the expert-system API (overrides PEX_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// HTTP timeout in seconds (overrides PEX_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("pex=warn".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let cfg = client_config_from_env_values(
        cli.api_url.or_else(|| std::env::var("PEX_API_URL").ok()),
        cli.timeout.or_else(|| std::env::var("PEX_TIMEOUT_SECS").ok()),
    )?;
    let api = HttpExpertApi::new(&cfg)?;
    tracing::debug!("using expert API at {}", api.base_url());

    let Some(command) = cli.command else {
        println!("Use 'pex --help' for commands");
        return Ok(ExitCode::SUCCESS);
    };

    let view = command.view(std::io::stdout());
    let mut session = ExpertSession::new(api, view, TerminalNotifier);
    let succeeded = command.run(&mut session).await?;

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
