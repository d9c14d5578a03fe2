#![allow(dead_code)]

use async_trait::async_trait;
use gitlink_dns_application::ports::RefLister;
use gitlink_dns_domain::{DomainError, RefListing, RemoteRef};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Answers every repository with the same listing or the same error.
#[derive(Clone)]
pub struct StaticRefLister {
    result: Result<RefListing, DomainError>,
    calls: Arc<AtomicUsize>,
}

impl StaticRefLister {
    pub fn with_refs(refs: &[(&str, &str)]) -> Self {
        Self {
            result: Ok(refs
                .iter()
                .map(|(name, commit)| RemoteRef::new(*name, *commit))
                .collect()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            result: Err(error),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RefLister for StaticRefLister {
    async fn list(&self, _repository: &str) -> Result<RefListing, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}
