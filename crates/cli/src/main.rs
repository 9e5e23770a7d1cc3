use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use zoneward_domain::{CliOverrides, Config};
use zoneward_infrastructure::dns::DnsServerHandler;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "zoneward")]
#[command(version)]
#[command(about = "Zoneward - authoritative DNS responder backed by a zone record store")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port (UDP and TCP)
    #[arg(short = 'd', long, env = "DNS_PORT")]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Database path
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting Zoneward v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = cli.config.clone().or_else(Config::get_config_path) {
        info!(path = %path, "Configuration loaded");
    }

    let pool = bootstrap::init_database(&config.database).await?;

    let repos = di::Repositories::new(pool.clone());
    let use_cases = di::UseCases::new(&config, &repos);

    let handler = DnsServerHandler::new(use_cases.handle_query)
        .with_max_udp_payload(config.dns.max_udp_payload);

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => {
                warn!(error = %e, "Failed to listen for shutdown signal");
                return;
            }
        }
        signal_token.cancel();
    });

    if let Err(e) = server::start_dns_server(&config, handler, shutdown).await {
        error!(error = %e, "DNS server error");
        pool.close().await;
        return Err(e);
    }

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}
