//! Start the console server.

use anyhow::Context;
use clap::Args;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, config_path: &str) -> anyhow::Result<()> {
    let mut config = super::load_config(config_path)?;
    super::init_logging(&config.logging);

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }

    println!("Starting tender console...");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);
    println!("  Store: {}", config.database.provider);
    println!("  Identity provider: {}", config.auth.provider);

    tender_api::run_server(config).await.context("Server stopped with an error")
}
