use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::answer::{AnswerEncoder, AnswerMode, HashAlgorithm};
use crate::git_name::{NameCodec, NameGrammar, DEFAULT_TAG};
use crate::git_ref::{OriginScheme, RepositoryPolicy};

/// How a failed resolution is reported to the requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureMode {
    /// Reply with NOTIMP / NXDOMAIN / SERVFAIL / FORMERR.
    #[default]
    Signal,
    /// Send nothing back.
    Silent,
}

/// Which remote-reference lister backs the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListerKind {
    /// `git ls-remote` child process.
    #[default]
    GitCli,
    /// Native `info/refs` request over HTTP(S).
    SmartHttp,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default = "default_tag")]
    pub tag: String,

    #[serde(default)]
    pub grammar: NameGrammar,

    #[serde(default)]
    pub scheme: OriginScheme,

    #[serde(default)]
    pub answer_mode: AnswerMode,

    #[serde(default)]
    pub hash_algorithm: HashAlgorithm,

    #[serde(default = "default_answer_ttl")]
    pub answer_ttl: u32,

    #[serde(default)]
    pub failure_mode: FailureMode,

    #[serde(default)]
    pub lister: ListerKind,

    #[serde(default = "default_git_binary")]
    pub git_binary: String,

    #[serde(default = "default_listing_timeout_ms")]
    pub listing_timeout_ms: u64,

    /// Empty means any hostname.
    #[serde(default)]
    pub allowed_hosts: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            tag: default_tag(),
            grammar: NameGrammar::default(),
            scheme: OriginScheme::default(),
            answer_mode: AnswerMode::default(),
            hash_algorithm: HashAlgorithm::default(),
            answer_ttl: default_answer_ttl(),
            failure_mode: FailureMode::default(),
            lister: ListerKind::default(),
            git_binary: default_git_binary(),
            listing_timeout_ms: default_listing_timeout_ms(),
            allowed_hosts: Vec::new(),
        }
    }
}

impl ResolverConfig {
    pub fn codec(&self) -> NameCodec {
        NameCodec::new(self.tag.clone(), self.grammar, self.scheme)
    }

    pub fn encoder(&self) -> AnswerEncoder {
        AnswerEncoder::new(self.answer_mode, self.hash_algorithm)
    }

    pub fn policy(&self) -> RepositoryPolicy {
        RepositoryPolicy::new(vec![self.scheme], self.allowed_hosts.clone())
    }

    pub fn listing_timeout(&self) -> Duration {
        Duration::from_millis(self.listing_timeout_ms)
    }
}

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

fn default_answer_ttl() -> u32 {
    5
}

fn default_git_binary() -> String {
    "git".to_string()
}

fn default_listing_timeout_ms() -> u64 {
    10_000
}
