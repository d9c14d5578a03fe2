use crate::ports::RefLister;
use gitlink_dns_domain::DomainError;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

pub struct ResolveRefUseCase {
    lister: Arc<dyn RefLister>,
}

impl ResolveRefUseCase {
    pub fn new(lister: Arc<dyn RefLister>) -> Self {
        Self { lister }
    }

    /// Returns the commit `refs/heads/<branch>` points to in `repository`.
    ///
    /// The remote is listed exactly once per call and nothing is retried.
    pub async fn execute(&self, repository: &str, branch: &str) -> Result<String, DomainError> {
        let start = Instant::now();

        let listing = self.lister.list(repository).await.map_err(|e| match e {
            DomainError::ListingUnavailable(_) => e,
            other => DomainError::ListingUnavailable(other.to_string()),
        })?;

        debug!(
            repository = %repository,
            refs = listing.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Remote references listed"
        );

        listing
            .find_branch(branch)
            .map(|remote_ref| remote_ref.commit.clone())
            .ok_or_else(|| DomainError::BranchNotFound {
                branch: branch.to_string(),
                repository: repository.to_string(),
            })
    }
}
