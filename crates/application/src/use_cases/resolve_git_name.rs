use super::ResolveRefUseCase;
use crate::ports::RefLister;
use gitlink_dns_domain::{
    AnswerEncoder, DomainError, GitQuery, GitRefDescriptor, NameCodec, QueryType,
    RepositoryPolicy, ResolvedAnswer, ResolverConfig,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Successful resolution of one git name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitAnswer {
    /// Query name as asked, echoed as the answer record owner.
    pub name: Arc<str>,
    pub descriptor: GitRefDescriptor,
    pub commit: String,
    pub answer: ResolvedAnswer,
    pub ttl: u32,
}

/// Name → descriptor → policy → listing → answer text.
pub struct ResolveGitNameUseCase {
    codec: NameCodec,
    policy: RepositoryPolicy,
    resolve_ref: ResolveRefUseCase,
    encoder: AnswerEncoder,
    ttl: u32,
}

impl ResolveGitNameUseCase {
    pub fn new(
        codec: NameCodec,
        policy: RepositoryPolicy,
        lister: Arc<dyn RefLister>,
        encoder: AnswerEncoder,
        ttl: u32,
    ) -> Self {
        Self {
            codec,
            policy,
            resolve_ref: ResolveRefUseCase::new(lister),
            encoder,
            ttl,
        }
    }

    pub fn from_config(config: &ResolverConfig, lister: Arc<dyn RefLister>) -> Self {
        Self::new(
            config.codec(),
            config.policy(),
            lister,
            config.encoder(),
            config.answer_ttl,
        )
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub async fn execute(&self, query: &GitQuery) -> Result<GitAnswer, DomainError> {
        let start = Instant::now();

        let result = self.resolve(query).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(answer) => info!(
                name = %query.name,
                repository = %answer.descriptor.repository,
                branch = %answer.descriptor.branch,
                commit = %answer.commit,
                elapsed_ms,
                "Git name resolved"
            ),
            Err(e @ DomainError::ListingUnavailable(_)) => warn!(
                name = %query.name,
                status = e.status(),
                error = %e,
                elapsed_ms,
                "Git name resolution failed"
            ),
            Err(e) => debug!(
                name = %query.name,
                query_type = %query.query_type,
                status = e.status(),
                error = %e,
                "Git name rejected"
            ),
        }

        result
    }

    async fn resolve(&self, query: &GitQuery) -> Result<GitAnswer, DomainError> {
        if query.query_type != QueryType::Txt {
            return Err(DomainError::UnsupportedQueryType(
                query.query_type.to_string(),
            ));
        }

        let descriptor = self.codec.decode(&query.name)?;
        let url = self.policy.validate(&descriptor.repository)?;

        let commit = self
            .resolve_ref
            .execute(url.as_str(), &descriptor.branch)
            .await?;
        let answer = self.encoder.encode(&commit)?;

        Ok(GitAnswer {
            name: Arc::clone(&query.name),
            descriptor,
            commit,
            answer,
            ttl: self.ttl,
        })
    }
}
