use std::fmt;
use std::sync::Arc;

/// Record type of an incoming question. Only TXT questions are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    Txt,
    Other(u16),
}

impl QueryType {
    pub const TXT_CODE: u16 = 16;

    pub fn from_code(code: u16) -> Self {
        if code == Self::TXT_CODE {
            Self::Txt
        } else {
            Self::Other(code)
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Txt => f.write_str("TXT"),
            Self::Other(code) => write!(f, "TYPE{}", code),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GitQuery {
    pub name: Arc<str>,
    pub query_type: QueryType,
}

impl GitQuery {
    pub fn new(name: impl Into<Arc<str>>, query_type: QueryType) -> Self {
        Self {
            name: name.into(),
            query_type,
        }
    }

    pub fn txt(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, QueryType::Txt)
    }
}
