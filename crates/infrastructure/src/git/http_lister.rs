//! Smart HTTP reference discovery (`GET <repo>/info/refs?service=git-upload-pack`).
//!
//! Servers that only speak the dumb protocol answer the same URL with the
//! plain `info/refs` file; that is detected from the content type.
//!
//! Redirects are not followed: the validated repository URL is the only
//! host ever contacted.

use super::advertisement::{parse_ls_remote_output, parse_upload_pack_advertisement};
use super::MAX_LISTING_BYTES;
use async_trait::async_trait;
use gitlink_dns_application::ports::RefLister;
use gitlink_dns_domain::{DomainError, RefListing};
use reqwest::header::CONTENT_TYPE;
use std::time::{Duration, Instant};
use tracing::debug;

const ADVERTISEMENT_CONTENT_TYPE: &str = "application/x-git-upload-pack-advertisement";
const USER_AGENT: &str = concat!("git/gitlink-dns-", env!("CARGO_PKG_VERSION"));

pub struct SmartHttpRefLister {
    client: reqwest::Client,
}

impl SmartHttpRefLister {
    pub fn new(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| DomainError::ConfigError(format!("HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    async fn read_body(
        mut response: reqwest::Response,
        url: &str,
    ) -> Result<Vec<u8>, DomainError> {
        let too_large = || {
            DomainError::ListingUnavailable(format!(
                "{} advertisement exceeds {} bytes",
                url, MAX_LISTING_BYTES
            ))
        };

        if response
            .content_length()
            .is_some_and(|len| len > MAX_LISTING_BYTES)
        {
            return Err(too_large());
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| {
            DomainError::ListingUnavailable(format!("reading {} failed: {}", url, e))
        })? {
            if (body.len() + chunk.len()) as u64 > MAX_LISTING_BYTES {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }

    fn discovery_url(repository: &str) -> String {
        format!(
            "{}/info/refs?service=git-upload-pack",
            repository.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl RefLister for SmartHttpRefLister {
    async fn list(&self, repository: &str) -> Result<RefListing, DomainError> {
        let start = Instant::now();
        let url = Self::discovery_url(repository);

        let response = self.client.get(&url).send().await.map_err(|e| {
            DomainError::ListingUnavailable(format!("request to {} failed: {}", url, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::ListingUnavailable(format!(
                "{} answered {}",
                url, status
            )));
        }

        let smart = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with(ADVERTISEMENT_CONTENT_TYPE));

        let body = Self::read_body(response, &url).await?;

        let listing = if smart {
            parse_upload_pack_advertisement(&body)?
        } else {
            parse_ls_remote_output(&String::from_utf8_lossy(&body))
        };

        debug!(
            repository = %repository,
            smart,
            refs = listing.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Reference advertisement fetched"
        );

        Ok(listing)
    }
}
