//! `counter-app`: the counter HTTP service and its terminal client.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use counter_app::config::{Config, ConfigOverrides};
use counter_app::{api, logging, ui};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file (default: <config dir>/counter-app/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the counter HTTP API
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT")]
        port: Option<u16>,

        /// Allowed CORS origin, `*` or a comma-separated list
        #[arg(long, env = "CORS_ORIGIN")]
        cors_origin: Option<String>,

        /// Storage backend URL (memory://, file://<path>, redis://...)
        #[arg(long, env = "COUNTER_STORAGE_URL")]
        storage_url: Option<String>,
    },
    /// Open the terminal client
    Ui {
        /// Base URL of the counter API
        #[arg(long, env = "COUNTER_API_URL")]
        api_url: Option<String>,
    },
}

impl Command {
    fn overrides(&self) -> ConfigOverrides {
        match self {
            Command::Serve {
                port,
                cors_origin,
                storage_url,
            } => ConfigOverrides {
                port: *port,
                cors_origin: cors_origin.clone(),
                storage_url: storage_url.clone(),
                ..ConfigOverrides::default()
            },
            Command::Ui { api_url } => ConfigOverrides {
                api_url: api_url.clone(),
                ..ConfigOverrides::default()
            },
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::resolve(cli.config.as_deref(), &cli.command.overrides())
        .context("failed to load configuration")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    match cli.command {
        Command::Serve { .. } => {
            logging::init_server_tracing();
            runtime.block_on(api::serve(&config))?;
        }
        Command::Ui { .. } => {
            logging::init_ui_tracing();
            ui::run(&config, runtime.handle())?;
        }
    }

    Ok(())
}
