use gitlink_dns_domain::config::ServerConfig;
use gitlink_dns_infrastructure::dns::GitLinkRequestHandler;
use hickory_server::ServerFuture;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// Per-socket settings shared by every DNS worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DnsSocketOptions {
    pub buffer_bytes: Option<usize>,
    pub tcp_backlog: i32,
    pub tcp_idle_timeout: Duration,
}

impl DnsSocketOptions {
    pub fn from_config(server: &ServerConfig) -> Self {
        Self {
            buffer_bytes: server.dns_socket_buffer_bytes,
            tcp_backlog: i32::try_from(server.dns_tcp_backlog).unwrap_or(i32::MAX),
            tcp_idle_timeout: Duration::from_secs(server.dns_tcp_idle_timeout_secs),
        }
    }
}

pub async fn start_dns_server(
    bind_addr: SocketAddr,
    handler: GitLinkRequestHandler,
    num_workers: usize,
    options: DnsSocketOptions,
) -> anyhow::Result<()> {
    info!(
        bind_address = %bind_addr,
        num_workers,
        buffer_bytes = ?options.buffer_bytes,
        tcp_backlog = options.tcp_backlog,
        "Starting DNS server with SO_REUSEPORT"
    );

    let mut join_set: JoinSet<()> = JoinSet::new();

    for i in 0..num_workers {
        let udp_socket = create_udp_socket(bind_addr, &options)?;
        let tcp_listener = create_tcp_listener(bind_addr, &options)?;

        let mut server = ServerFuture::new(handler.clone());
        server.register_socket(udp_socket);
        server.register_listener(tcp_listener, options.tcp_idle_timeout);

        join_set.spawn(async move {
            if let Err(e) = server.block_until_done().await {
                error!(worker = i, error = %e, "DNS worker error");
            }
        });
    }

    info!("DNS server ready: {} workers on {}", num_workers, bind_addr);

    while join_set.join_next().await.is_some() {}
    Ok(())
}

/// Bound, non-blocking socket with SO_REUSEPORT so workers share the port.
fn bind_socket(
    socket_type: Type,
    protocol: Protocol,
    addr: SocketAddr,
    options: &DnsSocketOptions,
) -> anyhow::Result<Socket> {
    let socket = Socket::new(Domain::for_address(addr), socket_type, Some(protocol))?;
    if addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;

    if let Some(bytes) = options.buffer_bytes {
        // The kernel may clamp the request, so a short buffer is not fatal.
        if let Err(e) = socket.set_recv_buffer_size(bytes) {
            warn!(bytes, error = %e, "Failed to set DNS socket receive buffer");
        }
        if let Err(e) = socket.set_send_buffer_size(bytes) {
            warn!(bytes, error = %e, "Failed to set DNS socket send buffer");
        }
    }

    socket.bind(&addr.into())?;
    socket.set_nonblocking(true)?;
    Ok(socket)
}

fn create_udp_socket(addr: SocketAddr, options: &DnsSocketOptions) -> anyhow::Result<UdpSocket> {
    let socket = bind_socket(Type::DGRAM, Protocol::UDP, addr, options)?;
    Ok(UdpSocket::from_std(socket.into())?)
}

fn create_tcp_listener(
    addr: SocketAddr,
    options: &DnsSocketOptions,
) -> anyhow::Result<TcpListener> {
    let socket = bind_socket(Type::STREAM, Protocol::TCP, addr, options)?;
    socket.listen(options.tcp_backlog)?;
    Ok(TcpListener::from_std(socket.into())?)
}
