#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::time::Duration;

use clap::Parser;
use pr_reviewer_server::{ServerConfig, run_server};

#[derive(Parser, Debug)]
#[command(name = "pr-reviewer-server")]
#[command(about = "Assigns pull request reviewers from team members", long_about = None)]
struct Args {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Seconds allowed for reading request headers and for each operation
    #[arg(long, env = "HTTP_REQUEST_TIMEOUT", default_value_t = 5)]
    request_timeout_secs: u64,

    /// Seconds in-flight requests get to finish on shutdown
    #[arg(long, env = "HTTP_SHUTDOWN_TIMEOUT", default_value_t = 5)]
    shutdown_timeout_secs: u64,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let config = ServerConfig::new(args.host, args.port)
        .with_request_timeout(Duration::from_secs(args.request_timeout_secs))
        .with_shutdown_timeout(Duration::from_secs(args.shutdown_timeout_secs));

    run_server(config).await?;

    log::info!("Server stopped");

    Ok(())
}
