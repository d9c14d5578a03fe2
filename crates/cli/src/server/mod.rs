pub mod dns;
pub mod web;

pub use dns::{start_dns_server, DnsSocketOptions};
pub use web::start_doh_server;
