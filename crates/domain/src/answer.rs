use crate::DomainError;
use cid::Cid;
use multihash::Multihash;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Multicodec code of raw git objects.
pub const GIT_RAW_CODEC: u64 = 0x78;

pub const DNSLINK_PREFIX: &str = "dnslink=/ipfs/";

/// Object format of the repositories being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha1,
    Sha256,
}

impl HashAlgorithm {
    /// Multihash code for the algorithm.
    pub fn multihash_code(&self) -> u64 {
        match self {
            Self::Sha1 => 0x11,
            Self::Sha256 => 0x12,
        }
    }

    pub fn digest_len(&self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
        }
    }

    pub fn hex_len(&self) -> usize {
        self.digest_len() * 2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerMode {
    #[default]
    ContentLink,
    RawHash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAnswer {
    RawHash(String),
    ContentLink(String),
}

impl ResolvedAnswer {
    pub fn as_str(&self) -> &str {
        match self {
            Self::RawHash(text) | Self::ContentLink(text) => text,
        }
    }
}

impl fmt::Display for ResolvedAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns a commit hash into TXT answer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnswerEncoder {
    mode: AnswerMode,
    algorithm: HashAlgorithm,
}

impl AnswerEncoder {
    pub fn new(mode: AnswerMode, algorithm: HashAlgorithm) -> Self {
        Self { mode, algorithm }
    }

    pub fn encode(&self, commit: &str) -> Result<ResolvedAnswer, DomainError> {
        let digest = self.decode_commit(commit)?;

        match self.mode {
            AnswerMode::RawHash => Ok(ResolvedAnswer::RawHash(commit.to_string())),
            AnswerMode::ContentLink => {
                let cid = self.content_id(&digest)?;
                Ok(ResolvedAnswer::ContentLink(format!("{}{}", DNSLINK_PREFIX, cid)))
            }
        }
    }

    fn decode_commit(&self, commit: &str) -> Result<Vec<u8>, DomainError> {
        if commit.len() != self.algorithm.hex_len() {
            return Err(DomainError::DecodeHex(format!(
                "expected {} hex characters, got {}",
                self.algorithm.hex_len(),
                commit.len()
            )));
        }
        hex::decode(commit).map_err(|e| DomainError::DecodeHex(format!("'{}': {}", commit, e)))
    }

    fn content_id(&self, digest: &[u8]) -> Result<Cid, DomainError> {
        let hash = Multihash::<64>::wrap(self.algorithm.multihash_code(), digest)
            .map_err(|e| DomainError::DecodeHex(format!("multihash: {}", e)))?;
        Ok(Cid::new_v1(GIT_RAW_CODEC, hash))
    }
}
