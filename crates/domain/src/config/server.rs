use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    #[serde(default = "default_doh_port")]
    pub doh_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// UDP/TCP worker pairs bound with SO_REUSEPORT.
    #[serde(default = "default_dns_workers")]
    pub dns_workers: usize,

    /// SO_RCVBUF / SO_SNDBUF for every DNS socket; OS default when absent.
    #[serde(default)]
    pub dns_socket_buffer_bytes: Option<usize>,

    #[serde(default = "default_dns_tcp_backlog")]
    pub dns_tcp_backlog: u32,

    /// Idle DNS-over-TCP connections are closed after this many seconds.
    #[serde(default = "default_dns_tcp_idle_timeout_secs")]
    pub dns_tcp_idle_timeout_secs: u64,

    #[serde(default = "default_true")]
    pub enable_dns: bool,

    #[serde(default = "default_true")]
    pub enable_doh: bool,

    /// DNS-over-HTTPS is served over plain HTTP when absent.
    #[serde(default)]
    pub tls: Option<TlsConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            doh_port: default_doh_port(),
            bind_address: default_bind_address(),
            dns_workers: default_dns_workers(),
            dns_socket_buffer_bytes: None,
            dns_tcp_backlog: default_dns_tcp_backlog(),
            dns_tcp_idle_timeout_secs: default_dns_tcp_idle_timeout_secs(),
            enable_dns: true,
            enable_doh: true,
            tls: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    #[serde(default = "default_cert_path")]
    pub cert_path: String,

    #[serde(default = "default_key_path")]
    pub key_path: String,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            cert_path: default_cert_path(),
            key_path: default_key_path(),
        }
    }
}

fn default_dns_port() -> u16 {
    53
}

fn default_doh_port() -> u16 {
    3333
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_dns_workers() -> usize {
    2
}

fn default_dns_tcp_backlog() -> u32 {
    1024
}

fn default_dns_tcp_idle_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_cert_path() -> String {
    "server.crt".to_string()
}

fn default_key_path() -> String {
    "server.key".to_string()
}
