use super::response_builder::ResponseCodeMapper;
use super::GitLinkResponder;
use gitlink_dns_domain::FailureMode;
use hickory_proto::op::{Header, ResponseCode};
use hickory_proto::rr::Record;
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::sync::Arc;
use tracing::{debug, error, info};

/// hickory-server handler for classic UDP/TCP DNS.
#[derive(Clone)]
pub struct GitLinkRequestHandler {
    responder: Arc<GitLinkResponder>,
}

impl GitLinkRequestHandler {
    pub fn new(responder: Arc<GitLinkResponder>) -> Self {
        Self { responder }
    }
}

#[async_trait::async_trait]
impl RequestHandler for GitLinkRequestHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to parse request info");
                return self
                    .send_failure(request, &mut response_handle, ResponseCode::FormErr)
                    .await;
            }
        };

        let query = request_info.query.original();
        info!(
            name = %query.name(),
            record_type = ?query.query_type(),
            client = %request.src().ip(),
            protocol = ?request.protocol(),
            "DNS query received"
        );

        let record = match self.responder.answer(query).await {
            Ok(record) => record,
            Err(e) => {
                let code = ResponseCodeMapper::for_error(&e);
                return self.send_failure(request, &mut response_handle, code).await;
            }
        };

        let builder = MessageResponseBuilder::from_message_request(request);
        let mut header = Header::response_from_request(request.header());
        header.set_authoritative(true);
        let answers = [record];
        let response = builder.build(header, answers.iter(), &[], &[], &[]);

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to send response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

impl GitLinkRequestHandler {
    async fn send_failure<R: ResponseHandler>(
        &self,
        request: &Request,
        response_handle: &mut R,
        code: ResponseCode,
    ) -> ResponseInfo {
        if self.responder.failure_mode() == FailureMode::Silent {
            debug!(code = ?code, "Dropping failed query without response");
            return ResponseInfo::from(*request.header());
        }

        debug!(code = ?code, "Sending error response");
        let builder = MessageResponseBuilder::from_message_request(request);
        let mut header = Header::response_from_request(request.header());
        header.set_authoritative(true);
        header.set_response_code(code);
        let response = builder.build(header, &[] as &[Record], &[], &[], &[]);

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to send error response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}
