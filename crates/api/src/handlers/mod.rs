pub mod doh;
pub mod health;

pub use doh::{dns_query, DNS_MESSAGE_CONTENT_TYPE};
pub use health::health_check;
