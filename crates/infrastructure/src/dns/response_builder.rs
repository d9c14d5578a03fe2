//! DNS response construction for resolved git names.
//!
//! Answers are a single TXT record named after the question, class IN.
//! Failures are expressed as an empty response carrying an rcode.

use gitlink_dns_application::use_cases::GitAnswer;
use gitlink_dns_domain::DomainError;
use hickory_proto::op::{Message, MessageType, Query, ResponseCode};
use hickory_proto::rr::rdata::TXT;
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

/// Maps resolution failures to DNS response codes.
pub struct ResponseCodeMapper;

impl ResponseCodeMapper {
    pub fn for_error(error: &DomainError) -> ResponseCode {
        match error {
            DomainError::UnsupportedQueryType(_) => ResponseCode::NotImp,
            DomainError::MalformedName(_)
            | DomainError::InvalidRepository(_)
            | DomainError::BranchNotFound { .. } => ResponseCode::NXDomain,
            DomainError::InvalidDnsMessage(_) => ResponseCode::FormErr,
            DomainError::ListingUnavailable(_)
            | DomainError::DecodeHex(_)
            | DomainError::ConfigError(_) => ResponseCode::ServFail,
        }
    }
}

pub struct ResponseBuilder;

impl ResponseBuilder {
    /// TXT record carrying the answer text, owned by `name`.
    pub fn txt_record(name: Name, answer: &GitAnswer) -> Record {
        let rdata = RData::TXT(TXT::new(vec![answer.answer.to_string()]));
        Record::from_rdata(name, answer.ttl, rdata)
    }

    /// Authoritative NOERROR response with `record` as the only answer.
    pub fn answer(request: &Message, record: Record) -> Message {
        let mut response = Self::response_to(request);
        response.set_response_code(ResponseCode::NoError);
        response.add_answer(record);
        response
    }

    /// Empty response with `code`, echoing the question section.
    pub fn error(request: &Message, code: ResponseCode) -> Message {
        let mut response = Self::response_to(request);
        response.set_response_code(code);
        response
    }

    pub fn serialize(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsMessage(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }

    fn response_to(request: &Message) -> Message {
        let mut response = Message::new();
        response
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .set_op_code(request.op_code())
            .set_recursion_desired(request.recursion_desired())
            .set_authoritative(true);
        response.add_queries(request.queries().iter().cloned().collect::<Vec<Query>>());
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitlink_dns_domain::{GitRefDescriptor, ResolvedAnswer};
    use hickory_proto::rr::RecordType;
    use std::sync::Arc;

    const NAME: &str = "master.go-ipfs.ipfs.-.github.com.git.";

    fn sample_answer() -> GitAnswer {
        GitAnswer {
            name: Arc::from(NAME),
            descriptor: GitRefDescriptor::new("master", "https://github.com/ipfs/go-ipfs"),
            commit: "1234567890abcdef1234567890abcdef12345678".to_string(),
            answer: ResolvedAnswer::ContentLink(
                "dnslink=/ipfs/baf4bcfasgrlhreflzxxrencwpcikxtppci2fm6a".to_string(),
            ),
            ttl: 5,
        }
    }

    #[test]
    fn test_error_code_mapping() {
        let cases = [
            (
                DomainError::UnsupportedQueryType("A".into()),
                ResponseCode::NotImp,
            ),
            (DomainError::MalformedName("x".into()), ResponseCode::NXDomain),
            (
                DomainError::InvalidRepository("x".into()),
                ResponseCode::NXDomain,
            ),
            (
                DomainError::BranchNotFound {
                    branch: "main".into(),
                    repository: "r".into(),
                },
                ResponseCode::NXDomain,
            ),
            (
                DomainError::ListingUnavailable("x".into()),
                ResponseCode::ServFail,
            ),
            (DomainError::DecodeHex("x".into()), ResponseCode::ServFail),
            (
                DomainError::InvalidDnsMessage("x".into()),
                ResponseCode::FormErr,
            ),
        ];

        for (error, code) in cases {
            assert_eq!(ResponseCodeMapper::for_error(&error), code, "{:?}", error);
        }
    }

    #[test]
    fn test_txt_record_shape() {
        let mut name =
            Name::from_labels(NAME.trim_end_matches('.').split('.').map(str::as_bytes)).unwrap();
        name.set_fqdn(true);
        let record = ResponseBuilder::txt_record(name.clone(), &sample_answer());

        assert_eq!(record.name(), &name);
        assert_eq!(record.record_type(), RecordType::TXT);
        assert_eq!(record.ttl(), 5);
        match record.data() {
            RData::TXT(txt) => {
                let strings: Vec<&[u8]> = txt.iter().map(|s| s.as_ref()).collect();
                assert_eq!(
                    strings,
                    vec![b"dnslink=/ipfs/baf4bcfasgrlhreflzxxrencwpcikxtppci2fm6a".as_slice()]
                );
            }
            other => panic!("expected TXT rdata, got {:?}", other),
        }
    }
}
