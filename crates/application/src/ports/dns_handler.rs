use async_trait::async_trait;
use gitlink_dns_domain::DomainError;

/// Answers a DNS message given in wire format.
#[async_trait]
pub trait DnsMessageHandler: Send + Sync {
    /// `Ok(None)` when no response must be sent.
    ///
    /// Fails with [`DomainError::InvalidDnsMessage`] when `request` does not
    /// parse as a DNS message.
    async fn handle_message(&self, request: &[u8]) -> Result<Option<Vec<u8>>, DomainError>;
}
