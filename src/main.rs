//! `paas` CLI entry point.

use anyhow::Result;
use clap::Parser;

use paas_client::cli::commands::{self, CommandContext};
use paas_client::cli::{handle_error, Cli, Commands};
use paas_client::domain::models::Config;
use paas_client::infrastructure::config::ConfigLoader;
use paas_client::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        handle_error(err, json);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let _logger = LoggerImpl::init(&config.logging)?;

    let ctx = CommandContext::new(config, cli.base_url.as_deref()).await;

    match cli.command {
        Commands::Solve(args) => commands::solve::execute(args, ctx, cli.json).await,
        Commands::Packages(args) => commands::packages::execute(args, ctx, cli.json).await,
        Commands::Browse(args) => commands::browse::execute(args, ctx, cli.json).await,
        Commands::Validate(args) => commands::validate::execute(args, ctx, cli.json).await,
        Commands::Settings(args) => commands::settings::execute(args, ctx, cli.json).await,
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}
