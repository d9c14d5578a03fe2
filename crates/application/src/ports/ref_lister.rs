use async_trait::async_trait;
use gitlink_dns_domain::{DomainError, RefListing};

/// Fetches the advertised references of a remote repository.
///
/// Implementations receive a repository URL that already passed
/// [`gitlink_dns_domain::RepositoryPolicy`] and must hand it to the remote
/// as a single argument. Every failure is reported as
/// [`DomainError::ListingUnavailable`].
#[async_trait]
pub trait RefLister: Send + Sync {
    async fn list(&self, repository: &str) -> Result<RefListing, DomainError>;
}
