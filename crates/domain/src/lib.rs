//! gitlink-dns Domain Layer
pub mod answer;
pub mod config;
pub mod dns_query;
pub mod errors;
pub mod git_name;
pub mod git_ref;
pub mod ref_listing;

pub use answer::{AnswerEncoder, AnswerMode, HashAlgorithm, ResolvedAnswer};
pub use config::{CliOverrides, Config, FailureMode, ListerKind, ResolverConfig};
pub use dns_query::{GitQuery, QueryType};
pub use errors::DomainError;
pub use git_name::{NameCodec, NameGrammar};
pub use git_ref::{GitRefDescriptor, OriginScheme, RepositoryPolicy};
pub use ref_listing::{RefListing, RemoteRef};
