use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::info;
use zoneward_domain::Config;
use zoneward_infrastructure::dns::{BoundDnsListener, DnsListener, DnsServerHandler, ListenerOptions};

/// Binds UDP and TCP on the configured port. Bind failures are returned to
/// the caller and are fatal.
pub async fn bind_dns_server(
    config: &Config,
    handler: DnsServerHandler,
) -> anyhow::Result<BoundDnsListener> {
    let bind_addr: SocketAddr = config.server.dns_bind_addr().parse()?;
    let listener = DnsListener::new(bind_addr, handler, ListenerOptions::from_config(&config.dns));
    Ok(listener.bind().await?)
}

pub async fn start_dns_server(
    config: &Config,
    handler: DnsServerHandler,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let listener = bind_dns_server(config, handler).await?;

    info!(
        address = %listener.local_addr(),
        "DNS server ready (udp + tcp)"
    );

    listener.serve(shutdown).await?;
    Ok(())
}
