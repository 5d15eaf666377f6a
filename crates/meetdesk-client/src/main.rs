//! meetdesk CLI entry point.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use meetdesk_core::{TracingConfig, init_tracing};

use meetdesk_client::cli::{Cli, Command, ConfigAction, ListArgs};
use meetdesk_client::commands::{config as config_cmd, meetings};
use meetdesk_client::config::ClientConfig;
use meetdesk_client::error::ClientResult;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(ClientConfig::default_path);
    let loaded = if cli.config.is_some() {
        ClientConfig::load_from(&config_path)
    } else {
        ClientConfig::load()
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    config.apply(cli.overrides());

    let tracing_config = if config.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cli()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {e}");
    }

    match run(cli.command, &config, &config_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Option<Command>, config: &ClientConfig, config_path: &Path) -> ClientResult<()> {
    match command {
        Some(Command::List(args)) => meetings::list(config, &args).await,
        Some(Command::Add(args)) => meetings::add(config, &args).await,
        Some(Command::Show { id, json }) => meetings::show(config, &id, json).await,
        Some(Command::Update(args)) => meetings::update(config, &args).await,
        Some(Command::Delete { id }) => meetings::delete(config, &id).await,
        Some(Command::Join { id }) => meetings::join(config, &id).await,
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => config_cmd::dump(config, config_path),
            ConfigAction::Validate => config_cmd::validate(config),
            ConfigAction::Path => config_cmd::path(config_path),
        },
        None => meetings::list(config, &ListArgs::default()).await,
    }
}
