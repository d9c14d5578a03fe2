use super::query_map::QueryMapper;
use super::response_builder::{ResponseBuilder, ResponseCodeMapper};
use async_trait::async_trait;
use gitlink_dns_application::ports::DnsMessageHandler;
use gitlink_dns_application::use_cases::ResolveGitNameUseCase;
use gitlink_dns_domain::{DomainError, FailureMode};
use hickory_proto::op::{Message, Query, ResponseCode};
use hickory_proto::rr::Record;
use std::sync::Arc;
use tracing::debug;

/// Wire stage of the resolution pipeline: DNS message in, DNS message out.
///
/// Shared by the DNS-over-HTTPS endpoint and the classic DNS handler. With
/// [`FailureMode::Silent`] every failure yields no response at all.
pub struct GitLinkResponder {
    use_case: Arc<ResolveGitNameUseCase>,
    failure_mode: FailureMode,
}

impl GitLinkResponder {
    pub fn new(use_case: Arc<ResolveGitNameUseCase>, failure_mode: FailureMode) -> Self {
        Self {
            use_case,
            failure_mode,
        }
    }

    pub fn failure_mode(&self) -> FailureMode {
        self.failure_mode
    }

    /// Resolve one question into its TXT answer record.
    pub async fn answer(&self, query: &Query) -> Result<Record, DomainError> {
        let git_query = QueryMapper::git_query(query)?;
        let answer = self.use_case.execute(&git_query).await?;
        Ok(ResponseBuilder::txt_record(query.name().clone(), &answer))
    }

    /// Only the first question is answered.
    pub async fn respond(&self, request: &Message) -> Option<Message> {
        let Some(query) = request.queries().first() else {
            debug!(id = request.id(), "Request without question");
            return self.failure(request, ResponseCode::FormErr);
        };

        match self.answer(query).await {
            Ok(record) => Some(ResponseBuilder::answer(request, record)),
            Err(e) => self.failure(request, ResponseCodeMapper::for_error(&e)),
        }
    }

    /// `Ok(None)` means nothing should be sent back.
    pub async fn respond_bytes(&self, request: &[u8]) -> Result<Option<Vec<u8>>, DomainError> {
        let message = Message::from_vec(request)
            .map_err(|e| DomainError::InvalidDnsMessage(e.to_string()))?;

        match self.respond(&message).await {
            Some(response) => ResponseBuilder::serialize(&response).map(Some),
            None => Ok(None),
        }
    }

    fn failure(&self, request: &Message, code: ResponseCode) -> Option<Message> {
        match self.failure_mode {
            FailureMode::Signal => Some(ResponseBuilder::error(request, code)),
            FailureMode::Silent => None,
        }
    }
}

#[async_trait]
impl DnsMessageHandler for GitLinkResponder {
    async fn handle_message(&self, request: &[u8]) -> Result<Option<Vec<u8>>, DomainError> {
        self.respond_bytes(request).await
    }
}
