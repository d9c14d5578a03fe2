#![allow(dead_code)]

use async_trait::async_trait;
use gitlink_dns_application::ports::RefLister;
use gitlink_dns_domain::{DomainError, RefListing, RemoteRef};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MockRefLister {
    listings: Arc<RwLock<HashMap<String, RefListing>>>,
    failures: Arc<RwLock<HashMap<String, DomainError>>>,
    calls: Arc<RwLock<Vec<String>>>,
    call_count: Arc<AtomicUsize>,
}

impl MockRefLister {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_refs(&self, repository: &str, refs: &[(&str, &str)]) {
        let listing = refs
            .iter()
            .map(|(name, commit)| RemoteRef::new(*name, *commit))
            .collect();
        self.listings
            .write()
            .await
            .insert(repository.to_string(), listing);
    }

    pub async fn set_failure(&self, repository: &str, error: DomainError) {
        self.failures
            .write()
            .await
            .insert(repository.to_string(), error);
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl RefLister for MockRefLister {
    async fn list(&self, repository: &str) -> Result<RefListing, DomainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.calls.write().await.push(repository.to_string());

        if let Some(error) = self.failures.read().await.get(repository) {
            return Err(error.clone());
        }

        self.listings
            .read()
            .await
            .get(repository)
            .cloned()
            .ok_or_else(|| {
                DomainError::ListingUnavailable(format!("repository not found: {}", repository))
            })
    }
}
