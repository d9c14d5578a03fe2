use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::{Host, Url};

/// URL scheme used to reach the repository origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginScheme {
    #[default]
    Https,
    Http,
}

impl OriginScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Https => "https",
            Self::Http => "http",
        }
    }
}

impl fmt::Display for OriginScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OriginScheme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "https" => Ok(Self::Https),
            "http" => Ok(Self::Http),
            other => Err(DomainError::InvalidRepository(format!(
                "unsupported scheme '{}'",
                other
            ))),
        }
    }
}

/// A branch of a remote repository, as decoded from a query name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRefDescriptor {
    pub branch: String,
    pub repository: String,
}

impl GitRefDescriptor {
    pub fn new(branch: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            repository: repository.into(),
        }
    }

    /// Fully qualified ref name of the branch (`refs/heads/<branch>`).
    pub fn ref_name(&self) -> String {
        format!("refs/heads/{}", self.branch)
    }
}

impl fmt::Display for GitRefDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.repository, self.branch)
    }
}

/// Allow-list applied to a decoded repository location before it is handed
/// to a lister.
///
/// Only `<scheme>://<hostname>/<segment>/...` URLs pass: no IP literals,
/// userinfo, ports, queries or fragments, and no host label or path segment
/// may start with `-` (it would read as an option to a git process).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryPolicy {
    allowed_schemes: Vec<OriginScheme>,
    allowed_hosts: Vec<String>,
}

impl Default for RepositoryPolicy {
    fn default() -> Self {
        Self {
            allowed_schemes: vec![OriginScheme::Https],
            allowed_hosts: Vec::new(),
        }
    }
}

impl RepositoryPolicy {
    pub fn new(allowed_schemes: Vec<OriginScheme>, allowed_hosts: Vec<String>) -> Self {
        Self {
            allowed_schemes,
            allowed_hosts,
        }
    }

    pub fn validate(&self, repository: &str) -> Result<Url, DomainError> {
        let url = Url::parse(repository).map_err(|e| {
            DomainError::InvalidRepository(format!("'{}' is not a URL: {}", repository, e))
        })?;

        let scheme = OriginScheme::from_str(url.scheme())?;
        if !self.allowed_schemes.contains(&scheme) {
            return Err(DomainError::InvalidRepository(format!(
                "scheme '{}' is not allowed",
                scheme
            )));
        }

        if !url.username().is_empty() || url.password().is_some() {
            return Err(DomainError::InvalidRepository(
                "credentials are not allowed".to_string(),
            ));
        }
        if url.port().is_some() {
            return Err(DomainError::InvalidRepository(
                "explicit ports are not allowed".to_string(),
            ));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(DomainError::InvalidRepository(
                "query strings and fragments are not allowed".to_string(),
            ));
        }

        let host = match url.host() {
            Some(Host::Domain(host)) => host,
            Some(other) => {
                return Err(DomainError::InvalidRepository(format!(
                    "host '{}' is not a hostname",
                    other
                )))
            }
            None => {
                return Err(DomainError::InvalidRepository(
                    "missing host".to_string(),
                ))
            }
        };

        if !host.split('.').all(is_host_label) {
            return Err(DomainError::InvalidRepository(format!(
                "host '{}' contains an invalid label",
                host
            )));
        }

        if !self.allowed_hosts.is_empty()
            && !self
                .allowed_hosts
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(host))
        {
            return Err(DomainError::InvalidRepository(format!(
                "host '{}' is not in the allow list",
                host
            )));
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.collect())
            .unwrap_or_default();
        if segments.is_empty() || segments.iter().any(|s| !is_path_segment(s)) {
            return Err(DomainError::InvalidRepository(format!(
                "path '{}' is not a repository path",
                url.path()
            )));
        }

        Ok(url)
    }
}

fn is_host_label(label: &str) -> bool {
    !label.is_empty()
        && !label.starts_with('-')
        && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

fn is_path_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment.starts_with('-')
        && segment != "."
        && segment != ".."
        && segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}
