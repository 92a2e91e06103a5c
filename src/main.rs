use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use joblist_board_server::board_store::SqliteBoardStore;
use joblist_board_server::server::{run_server, RequestsLoggingLevel};
use joblist_board_server::BoardStore;

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
    /// Path to the SQLite board database file.
    #[clap(value_parser = parse_path)]
    pub board_db: PathBuf,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Secret used to sign bearer tokens. Falls back to the JWT_SECRET
    /// environment variable.
    #[clap(long)]
    pub jwt_secret: Option<String>,
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

    let jwt_secret = match cli_args.jwt_secret {
        Some(secret) => secret,
        None => std::env::var("JWT_SECRET")
            .context("No --jwt-secret argument and no JWT_SECRET environment variable")?,
    };

    let board_store: Arc<dyn BoardStore> = Arc::new(
        SqliteBoardStore::new(&cli_args.board_db)
            .with_context(|| format!("Failed to open board database {:?}", cli_args.board_db))?,
    );

    info!("Starting server on port {}", cli_args.port);
    run_server(
        board_store,
        cli_args.logging_level,
        cli_args.port,
        cli_args.frontend_dir_path,
        jwt_secret,
    )
    .await
}
