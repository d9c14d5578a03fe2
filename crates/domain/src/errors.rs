use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed git name: {0}")]
    MalformedName(String),

    #[error("Unsupported query type: {0}")]
    UnsupportedQueryType(String),

    #[error("Repository location rejected: {0}")]
    InvalidRepository(String),

    #[error("Remote reference listing unavailable: {0}")]
    ListingUnavailable(String),

    #[error("Branch '{branch}' not found in {repository}")]
    BranchNotFound { branch: String, repository: String },

    #[error("Invalid commit hash: {0}")]
    DecodeHex(String),

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Short status label used in structured logs.
    pub fn status(&self) -> &'static str {
        match self {
            Self::MalformedName(_) => "MALFORMED_NAME",
            Self::UnsupportedQueryType(_) => "UNSUPPORTED_TYPE",
            Self::InvalidRepository(_) => "INVALID_REPOSITORY",
            Self::ListingUnavailable(_) => "LISTING_UNAVAILABLE",
            Self::BranchNotFound { .. } => "BRANCH_NOT_FOUND",
            Self::DecodeHex(_) => "DECODE_HEX",
            Self::InvalidDnsMessage(_) => "INVALID_MESSAGE",
            Self::ConfigError(_) => "CONFIG",
        }
    }
}
