use crate::{errors::ApiError, state::AppState};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument, warn};

pub const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

/// Wire-format DNS query in the body, wire-format response out.
///
/// A query that produced no response (silent failure mode) is answered with
/// an empty 200 body.
#[instrument(skip(state, body), name = "api_dns_query")]
pub async fn dns_query(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    debug!(len = body.len(), "DoH query received");

    match state.dns.handle_message(&body).await {
        Ok(Some(response)) => {
            debug!(len = response.len(), "DoH response ready");
            Ok((
                [(header::CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE)],
                response,
            )
                .into_response())
        }
        Ok(None) => Ok(StatusCode::OK.into_response()),
        Err(e) => {
            warn!(error = %e, len = body.len(), "Rejected DoH request");
            Err(e.into())
        }
    }
}
