//! Banking portal entry point

use anyhow::Context;
use bankportal_api::start_server;
use bankportal_config::error::ConfigError;
use bankportal_config::Config;
use bankportal_core::Ledger;
use bankportal_source::JsonFileSource;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "bankportal")]
#[command(version = "0.1.0")]
#[command(about = "A small banking portal served over HTMX", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    // Logger level comes from the config, so report a missing file after init
    let (config, missing) = match Config::load(&args.config) {
        Ok(config) => (config, false),
        Err(ConfigError::FileNotFound { .. }) => (Config::default(), true),
        Err(e) => {
            // Logger isn't up yet, so the code and suggestions go straight to stderr
            eprintln!("{}", e.to_details());
            return Err(e).with_context(|| format!("failed to load {}", args.config.display()));
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level))
        .init();

    if missing {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }

    let source_path = config.source_path();
    log::info!("Config loaded: data source={}", source_path.display());

    let rt = Runtime::new()?;
    rt.block_on(async {
        let source = Arc::new(JsonFileSource::new(source_path));
        let mut ledger = Ledger::new(config.clone(), source);

        // A failed load is shown in the portal's error card
        if let Err(e) = ledger.load().await {
            log::warn!("Starting with an empty ledger: {}", e);
        }

        start_server(config, Arc::new(RwLock::new(ledger))).await
    })
}
