//! Mapping from a hickory question to `gitlink_dns_domain::GitQuery`

use gitlink_dns_domain::{DomainError, GitQuery, QueryType};
use hickory_proto::op::Query;
use hickory_proto::rr::{Name, RecordType as HickoryRecordType};

pub struct QueryMapper;

impl QueryMapper {
    /// Non-TXT questions are rejected before their labels are looked at.
    pub fn git_query(query: &Query) -> Result<GitQuery, DomainError> {
        let query_type = Self::query_type(query.query_type());
        if query_type != QueryType::Txt {
            return Err(DomainError::UnsupportedQueryType(query_type.to_string()));
        }

        let name = Self::name_text(query.name())?;
        Ok(GitQuery::new(name, query_type))
    }

    pub fn query_type(record_type: HickoryRecordType) -> QueryType {
        QueryType::from_code(u16::from(record_type))
    }

    /// Dotted text of the raw wire labels, with a trailing dot.
    ///
    /// hickory's presentation forms escape `-` and turn `xn--` labels into
    /// Unicode; the codec needs the labels exactly as they were sent.
    pub fn name_text(name: &Name) -> Result<String, DomainError> {
        let mut text = String::new();
        for label in name.iter() {
            if let Some(&byte) = label
                .iter()
                .find(|b| !(b.is_ascii_alphanumeric() || **b == b'-' || **b == b'_'))
            {
                return Err(DomainError::MalformedName(format!(
                    "label '{}' contains byte 0x{:02x}",
                    String::from_utf8_lossy(label),
                    byte
                )));
            }
            // ASCII checked above
            text.push_str(&String::from_utf8_lossy(label));
            text.push('.');
        }
        Ok(text)
    }
}
