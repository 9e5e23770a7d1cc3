use super::framing::{read_with_length_prefix, send_with_length_prefix};
use super::server::{DnsServerHandler, Transport};
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use zoneward_domain::config::DnsConfig;
use zoneward_domain::DomainError;

const MAX_UDP_MESSAGE_SIZE: usize = 4096;
const TCP_BACKLOG: i32 = 1024;
const EPHEMERAL_BIND_ATTEMPTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Unstarted,
    Listening,
    Stopped,
}

#[derive(Debug, Clone)]
pub struct ListenerOptions {
    /// A TCP connection is closed when no complete message arrives in time.
    pub tcp_idle_timeout: Duration,
}

impl ListenerOptions {
    pub fn from_config(config: &DnsConfig) -> Self {
        Self {
            tcp_idle_timeout: Duration::from_secs(config.tcp_idle_timeout_secs),
        }
    }
}

impl Default for ListenerOptions {
    fn default() -> Self {
        Self::from_config(&DnsConfig::default())
    }
}

/// UDP + TCP listener on a single port, not yet bound.
pub struct DnsListener {
    bind_addr: SocketAddr,
    handler: Arc<DnsServerHandler>,
    options: ListenerOptions,
    state_tx: watch::Sender<ListenerState>,
}

impl DnsListener {
    pub fn new(bind_addr: SocketAddr, handler: DnsServerHandler, options: ListenerOptions) -> Self {
        let (state_tx, _) = watch::channel(ListenerState::Unstarted);
        Self {
            bind_addr,
            handler: Arc::new(handler),
            options,
            state_tx,
        }
    }

    pub fn state(&self) -> watch::Receiver<ListenerState> {
        self.state_tx.subscribe()
    }

    /// Binds both transports. With port 0 the datagram socket takes an
    /// ephemeral port and the stream listener binds the same one.
    pub async fn bind(self) -> Result<BoundDnsListener, DomainError> {
        let attempts = if self.bind_addr.port() == 0 {
            EPHEMERAL_BIND_ATTEMPTS
        } else {
            1
        };

        let mut last_error = None;
        for attempt in 1..=attempts {
            match Self::bind_pair(self.bind_addr) {
                Ok((udp, tcp, local_addr)) => {
                    self.state_tx.send_replace(ListenerState::Listening);
                    info!(address = %local_addr, "DNS listener bound (udp + tcp)");
                    return Ok(BoundDnsListener {
                        udp: Arc::new(udp),
                        tcp,
                        local_addr,
                        handler: self.handler,
                        options: self.options,
                        state_tx: self.state_tx,
                    });
                }
                Err(e) => {
                    debug!(attempt, error = %e, "DNS listener bind attempt failed");
                    last_error = Some(e);
                }
            }
        }

        self.state_tx.send_replace(ListenerState::Stopped);
        Err(last_error.unwrap_or_else(|| DomainError::ListenerBind {
            transport: "udp",
            addr: self.bind_addr.to_string(),
            reason: "no bind attempt made".to_string(),
        }))
    }

    fn bind_pair(addr: SocketAddr) -> Result<(UdpSocket, TcpListener, SocketAddr), DomainError> {
        let udp = create_udp_socket(addr).map_err(|e| bind_error("udp", addr, e))?;
        let local_addr = udp.local_addr().map_err(|e| bind_error("udp", addr, e))?;

        let tcp_addr = SocketAddr::new(addr.ip(), local_addr.port());
        let tcp = create_tcp_listener(tcp_addr).map_err(|e| bind_error("tcp", tcp_addr, e))?;

        Ok((udp, tcp, local_addr))
    }
}

/// Listener with both sockets bound, ready to serve.
pub struct BoundDnsListener {
    udp: Arc<UdpSocket>,
    tcp: TcpListener,
    local_addr: SocketAddr,
    handler: Arc<DnsServerHandler>,
    options: ListenerOptions,
    state_tx: watch::Sender<ListenerState>,
}

impl BoundDnsListener {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn state(&self) -> watch::Receiver<ListenerState> {
        self.state_tx.subscribe()
    }

    /// Serves until `shutdown` is cancelled or either transport fails. A
    /// fatal error on one transport stops the other.
    pub async fn serve(self, shutdown: CancellationToken) -> Result<(), DomainError> {
        let stop = shutdown.child_token();
        let mut join_set: JoinSet<Result<(), DomainError>> = JoinSet::new();

        join_set.spawn(run_udp_loop(
            Arc::clone(&self.udp),
            Arc::clone(&self.handler),
            stop.clone(),
        ));
        join_set.spawn(run_tcp_loop(
            self.tcp,
            Arc::clone(&self.handler),
            self.options.tcp_idle_timeout,
            stop.clone(),
        ));

        info!(address = %self.local_addr, "DNS listener serving");

        let mut result = Ok(());
        while let Some(joined) = join_set.join_next().await {
            let outcome = joined.unwrap_or_else(|e| {
                Err(DomainError::IoError(format!("Listener task failed: {}", e)))
            });
            if let Err(e) = outcome {
                error!(error = %e, "DNS listener transport stopped");
                if result.is_ok() {
                    result = Err(e);
                }
            }
            stop.cancel();
        }

        self.state_tx.send_replace(ListenerState::Stopped);
        info!(address = %self.local_addr, "DNS listener stopped");
        result
    }
}

async fn run_udp_loop(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
    shutdown: CancellationToken,
) -> Result<(), DomainError> {
    let mut recv_buf = vec![0u8; MAX_UDP_MESSAGE_SIZE];

    loop {
        let received = tokio::select! {
            _ = shutdown.cancelled() => return Ok(()),
            received = socket.recv_from(&mut recv_buf) => received,
        };

        match received {
            Ok((n, from)) => {
                let query: Arc<[u8]> = Arc::from(&recv_buf[..n]);
                let handler = Arc::clone(&handler);
                let socket = Arc::clone(&socket);
                tokio::spawn(async move {
                    if let Some(response) = handler.handle_raw(&query, from.ip(), Transport::Udp).await
                    {
                        if let Err(e) = socket.send_to(&response, from).await {
                            debug!(client = %from, error = %e, "UDP send failed");
                        }
                    }
                });
            }
            Err(e) if is_transient(&e) => {
                debug!(error = %e, "Transient UDP receive error");
            }
            Err(e) => {
                error!(error = %e, "UDP receive failed");
                return Err(DomainError::IoError(format!("UDP receive failed: {}", e)));
            }
        }
    }
}

async fn run_tcp_loop(
    listener: TcpListener,
    handler: Arc<DnsServerHandler>,
    idle_timeout: Duration,
    shutdown: CancellationToken,
) -> Result<(), DomainError> {
    loop {
        let accepted = tokio::select! {
            _ = shutdown.cancelled() => return Ok(()),
            accepted = listener.accept() => accepted,
        };

        match accepted {
            Ok((stream, peer)) => {
                let handler = Arc::clone(&handler);
                let shutdown = shutdown.clone();
                tokio::spawn(async move {
                    serve_tcp_connection(stream, peer, handler, idle_timeout, shutdown).await;
                });
            }
            Err(e) if is_transient(&e) => {
                debug!(error = %e, "Transient TCP accept error");
            }
            Err(e) => {
                error!(error = %e, "TCP accept failed");
                return Err(DomainError::IoError(format!("TCP accept failed: {}", e)));
            }
        }
    }
}

/// Messages on one connection are answered in order.
async fn serve_tcp_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    handler: Arc<DnsServerHandler>,
    idle_timeout: Duration,
    shutdown: CancellationToken,
) {
    if let Err(e) = stream.set_nodelay(true) {
        debug!(client = %peer, error = %e, "Failed to set TCP_NODELAY");
    }

    loop {
        let frame = tokio::select! {
            _ = shutdown.cancelled() => break,
            frame = tokio::time::timeout(idle_timeout, read_with_length_prefix(&mut stream)) => frame,
        };

        let message = match frame {
            Err(_) => {
                debug!(client = %peer, "Closing idle TCP connection");
                break;
            }
            Ok(Ok(None)) => break,
            Ok(Err(e)) => {
                debug!(client = %peer, error = %e, "TCP read failed");
                break;
            }
            Ok(Ok(Some(message))) => message,
        };

        let Some(response) = handler.handle_raw(&message, peer.ip(), Transport::Tcp).await else {
            continue;
        };

        if let Err(e) = send_with_length_prefix(&mut stream, &response).await {
            warn!(client = %peer, error = %e, "TCP write failed");
            break;
        }
    }
}

fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::Interrupted
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionRefused
    )
}

fn bind_error(transport: &'static str, addr: SocketAddr, e: io::Error) -> DomainError {
    DomainError::ListenerBind {
        transport,
        addr: addr.to_string(),
        reason: e.to_string(),
    }
}

fn socket_domain(addr: SocketAddr) -> Domain {
    if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    }
}

fn create_udp_socket(socket_addr: SocketAddr) -> io::Result<UdpSocket> {
    let socket = Socket::new(socket_domain(socket_addr), Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}

fn create_tcp_listener(socket_addr: SocketAddr) -> io::Result<TcpListener> {
    let socket = Socket::new(socket_domain(socket_addr), Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(TCP_BACKLOG)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
