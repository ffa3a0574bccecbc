use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use elephant_cli::{read_config, Command, Config};
use elephant_entities::RosterStoreVariant;
use tracing::{error, info};
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "elephant", version, about = "Assigns White Elephant turn numbers and tells everyone theirs")]
struct Cli {
    /// Configuration file, overrides ELEPHANT_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging_config));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<Vec<String>> {
    let store = RosterStoreVariant::open(&config.storage).await?;
    info!("Using {:?}", config.storage);
    cli.command.run(&store, &config).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = read_config(cli.config.as_deref());
    init_logging(&config);

    match run(cli, config).await {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
