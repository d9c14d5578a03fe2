mod dns_handler;
mod ref_lister;

pub use dns_handler::DnsMessageHandler;
pub use ref_lister::RefLister;
