use std::path::PathBuf;

use anyhow::Result;
use branchdesk::server::{self, ServerConfig};
use clap::Parser;
use tracing::{warn, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about)]
struct ServerArgs {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(short, long, default_value = "3000")]
    port: u16,
    #[clap(short, long, default_value = "branchdesk.db")]
    database: String,
    #[clap(long)]
    cors_origin: Option<String>,
    /// Hard cap on simultaneously in-flight requests.
    #[clap(long, default_value = "2")]
    max_concurrent_requests: usize,
    /// Directory holding uploaded images and assets.
    #[clap(long, default_value = "public")]
    public_dir: PathBuf,
    /// Insert the example administrator and company profile.
    #[clap(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();
    setup_logging(&args.log_level);

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        warn!("JWT_SECRET is not set, using an insecure development secret");
        "development-secret".to_string()
    });

    server::start_server(ServerConfig {
        port: args.port,
        database_path: args.database,
        cors_origin: args.cors_origin,
        max_concurrent_requests: args.max_concurrent_requests,
        public_dir: args.public_dir,
        jwt_secret,
        seed: args.seed,
    })
    .await?;

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_string()))
        .init();
}
