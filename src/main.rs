use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod analysis;

mod config;
use config::{default_allowed_origins, AppConfig, CliConfig, FileConfig};

mod library;
use library::open_library;

mod server;
use server::{run_server, RequestsLoggingLevel};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the directory holding the per-song analysis JSON files.
    #[clap(value_parser = parse_path)]
    pub data_dir: Option<PathBuf>,

    /// Path to a TOML config file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 8000)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Origin allowed to make cross-origin requests. May be repeated; defaults
    /// to the usual local development servers.
    #[clap(long = "allowed-origin")]
    pub allowed_origins: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };

    let allowed_origins = if cli_args.allowed_origins.is_empty() {
        default_allowed_origins()
    } else {
        cli_args.allowed_origins.clone()
    };

    let cli_config = CliConfig {
        data_dir: cli_args.data_dir.clone(),
        frontend_dir_path: cli_args.frontend_dir_path.clone(),
        port: cli_args.port,
        logging_level: cli_args.logging_level.clone(),
        allowed_origins,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Opening analysis library at {:?}...", config.data_dir);
    let library = Arc::new(open_library(&config.data_dir)?);

    if let Some(frontend) = &config.frontend_dir_path {
        info!("Serving frontend from {}", frontend);
    }

    info!("Ready to serve at port {}!", config.port);
    run_server(
        library,
        config.logging_level.clone(),
        config.port,
        config.frontend_dir_path.clone(),
        config.allowed_origins.clone(),
    )
    .await
}
