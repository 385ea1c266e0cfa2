use anyhow::Result;
use clap::Parser;
use linkdeck::{config, tui};

#[derive(Parser, Debug)]
#[command(name = "linkdeck")]
#[command(about = "Terminal client for a personal link-bookmarking service")]
#[command(version)]
struct Args {
    /// Initialize configuration
    #[arg(long)]
    init: bool,

    /// Path to config file
    #[arg(long, short)]
    config: Option<std::path::PathBuf>,

    /// Override the link service base URL (e.g. http://localhost:5000)
    #[arg(long, short)]
    server: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("linkdeck=info".parse()?),
        )
        .init();

    if args.init {
        config::init_wizard()?;
        return Ok(());
    }

    let mut config = config::load(args.config.as_deref())?;
    if let Some(server) = args.server {
        config.server.base_url = server;
    }

    // Run TUI
    tui::run(config).await
}
