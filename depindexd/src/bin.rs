use std::net::SocketAddr;

use clap::Parser;
use depindexd::Server;
use depindexd_base::Config;
use tracing_subscriber::EnvFilter;

/// Concurrency-safe package dependency index server.
#[derive(Parser, Debug)]
#[command(name = "depindexd", version, about)]
struct Cli {
    /// Address to bind the TCP listener to.
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: SocketAddr,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config { bind_addr: cli.bind };

    if let Err(error) = Server::new(config).run() {
        tracing::error!(?error, "depindexd exited with an error");
        std::process::exit(1);
    }
}
