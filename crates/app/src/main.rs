//! SalesDesk terminal dashboard

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use salesdesk_app::utils::logging::init_tracing;
use salesdesk_app::{resolve_config, AppContext, Shell};
use tokio::io::BufReader;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "salesdesk", version, about = "Sales opportunity dashboard")]
struct Cli {
    /// Configuration file (JSON or TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend URL, overriding the configured one
    #[arg(long)]
    api_url: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = resolve_config(cli.config, cli.api_url).context("failed to load configuration")?;
    init_tracing(&config.logging.level, cli.verbose, cli.log_json);

    info!(version = env!("CARGO_PKG_VERSION"), "salesdesk starting");
    let ctx = AppContext::new(config).context("failed to initialize application")?;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut shell = Shell::new(ctx.service.clone(), stdin, std::io::stdout());
    shell.run().await.context("terminal I/O failed")?;

    info!("salesdesk stopped");
    Ok(())
}
