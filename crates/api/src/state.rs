use gitlink_dns_application::ports::DnsMessageHandler;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dns: Arc<dyn DnsMessageHandler>,
}

impl AppState {
    pub fn new(dns: Arc<dyn DnsMessageHandler>) -> Self {
        Self { dns }
    }
}
