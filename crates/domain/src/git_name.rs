//! Mapping between DNS query names and `(branch, repository)` pairs.
//!
//! A repository branch is addressed as
//! `<branch>.<path labels...>.-.<host labels...>.<tag>.`, for example
//! `github.com/ipfs/go-ipfs@master` is `master.go-ipfs.ipfs.-.github.com.git.`.
//!
//! Path segments that contain characters a DNS label cannot carry (most
//! commonly `.`) cannot be expressed.

use crate::git_ref::{GitRefDescriptor, OriginScheme};
use crate::DomainError;
use serde::{Deserialize, Serialize};

/// Label that separates path labels from host labels.
pub const SEPARATOR_LABEL: &str = "-";

/// Default trailing label every git name carries.
pub const DEFAULT_TAG: &str = "git";

/// Branch, at least one label between branch and tag, and the tag itself.
pub const MIN_LABELS: usize = 4;

/// Label ordering between the branch and the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameGrammar {
    /// `<branch>.<path reversed>.-.<host>.<tag>.`
    #[default]
    PathReversed,
    /// `<branch>.<path reversed>.-.<host reversed>.<tag>.`, i.e. the whole
    /// label run between branch and tag is reversed.
    FullyReversed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCodec {
    tag: String,
    grammar: NameGrammar,
    scheme: OriginScheme,
}

impl Default for NameCodec {
    fn default() -> Self {
        Self::new(DEFAULT_TAG, NameGrammar::default(), OriginScheme::default())
    }
}

impl NameCodec {
    pub fn new(tag: impl Into<String>, grammar: NameGrammar, scheme: OriginScheme) -> Self {
        Self {
            tag: tag.into(),
            grammar,
            scheme,
        }
    }

    /// Decode a query name into the branch and repository it addresses.
    ///
    /// The tag label matches ASCII case-insensitively and the trailing dot is
    /// optional. [`NameCodec::encode`] always writes the configured tag with a
    /// trailing dot, so a round trip preserves the name up to DNS name
    /// equality rather than byte for byte.
    ///
    /// Names without a separator label decode to the bare dot-joined labels
    /// with no scheme. That output is kept for compatibility only and never
    /// passes [`crate::RepositoryPolicy`].
    pub fn decode(&self, name: &str) -> Result<GitRefDescriptor, DomainError> {
        let trimmed = name.strip_suffix('.').unwrap_or(name);
        let labels: Vec<&str> = trimmed.split('.').collect();

        if labels.len() < MIN_LABELS {
            return Err(DomainError::MalformedName(format!(
                "'{}' needs at least {} labels",
                name, MIN_LABELS
            )));
        }
        if labels.iter().any(|label| label.is_empty()) {
            return Err(DomainError::MalformedName(format!(
                "'{}' contains an empty label",
                name
            )));
        }

        let branch = labels[0];
        let tag = labels[labels.len() - 1];
        let middle = &labels[1..labels.len() - 1];

        if !tag.eq_ignore_ascii_case(&self.tag) {
            return Err(DomainError::MalformedName(format!(
                "'{}' does not end in the '{}' label",
                name, self.tag
            )));
        }
        if branch == SEPARATOR_LABEL {
            return Err(DomainError::MalformedName(format!(
                "'{}' has no branch label",
                name
            )));
        }

        let repository = match self.split_middle(middle) {
            Some((host, path)) => {
                if host.is_empty() || path.is_empty() {
                    return Err(DomainError::MalformedName(format!(
                        "'{}' needs both path and host labels around '{}'",
                        name, SEPARATOR_LABEL
                    )));
                }
                format!("{}://{}/{}", self.scheme, host.join("."), path.join("/"))
            }
            None => middle.join("."),
        };

        Ok(GitRefDescriptor::new(branch, repository))
    }

    /// Encode a branch and repository URL into the query name that decodes
    /// back to them. The result is fully qualified (trailing dot).
    pub fn encode(&self, descriptor: &GitRefDescriptor) -> Result<String, DomainError> {
        let branch = descriptor.branch.as_str();
        if branch.is_empty() || branch.contains('.') || branch == SEPARATOR_LABEL {
            return Err(DomainError::MalformedName(format!(
                "branch '{}' cannot be a single label",
                branch
            )));
        }

        let prefix = format!("{}://", self.scheme);
        let rest = descriptor
            .repository
            .strip_prefix(&prefix)
            .ok_or_else(|| {
                DomainError::MalformedName(format!(
                    "'{}' is not a {} URL",
                    descriptor.repository, self.scheme
                ))
            })?;

        let (host, path) = rest.split_once('/').ok_or_else(|| {
            DomainError::MalformedName(format!(
                "'{}' has no repository path",
                descriptor.repository
            ))
        })?;

        let host: Vec<&str> = host.split('.').collect();
        let path: Vec<&str> = path.trim_end_matches('/').split('/').collect();

        let bad_label = |label: &&str| label.is_empty() || *label == SEPARATOR_LABEL;
        if host.iter().any(bad_label) || path.iter().any(bad_label) {
            return Err(DomainError::MalformedName(format!(
                "'{}' contains an empty or separator segment",
                descriptor.repository
            )));
        }
        if let Some(segment) = path.iter().find(|segment| segment.contains('.')) {
            return Err(DomainError::MalformedName(format!(
                "path segment '{}' cannot be a DNS label",
                segment
            )));
        }

        let middle: Vec<&str> = match self.grammar {
            NameGrammar::PathReversed => path
                .iter()
                .rev()
                .copied()
                .chain(std::iter::once(SEPARATOR_LABEL))
                .chain(host.iter().copied())
                .collect(),
            NameGrammar::FullyReversed => {
                let mut labels: Vec<&str> = host
                    .iter()
                    .copied()
                    .chain(std::iter::once(SEPARATOR_LABEL))
                    .chain(path.iter().copied())
                    .collect();
                labels.reverse();
                labels
            }
        };

        Ok(format!("{}.{}.{}.", branch, middle.join("."), self.tag))
    }

    /// Split the labels between branch and tag into `(host, path)`, both in
    /// URL order. `None` when no separator label is present.
    fn split_middle<'a>(&self, middle: &[&'a str]) -> Option<(Vec<&'a str>, Vec<&'a str>)> {
        match self.grammar {
            NameGrammar::PathReversed => {
                let at = middle.iter().position(|l| *l == SEPARATOR_LABEL)?;
                let path = middle[..at].iter().rev().copied().collect();
                let host = middle[at + 1..].to_vec();
                Some((host, path))
            }
            NameGrammar::FullyReversed => {
                let reversed: Vec<&str> = middle.iter().rev().copied().collect();
                let at = reversed.iter().position(|l| *l == SEPARATOR_LABEL)?;
                let host = reversed[..at].to_vec();
                let path = reversed[at + 1..].to_vec();
                Some((host, path))
            }
        }
    }
}
