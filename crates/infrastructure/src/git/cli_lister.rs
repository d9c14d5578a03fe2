use super::advertisement::parse_ls_remote_output;
use super::MAX_LISTING_BYTES;
use async_trait::async_trait;
use gitlink_dns_application::ports::RefLister;
use gitlink_dns_domain::{DomainError, RefListing};
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tracing::debug;

const MAX_STDERR_BYTES: u64 = 64 * 1024;

/// Lists branches by running `git ls-remote --heads -- <repository>`.
///
/// The repository is passed as one argument after `--`; no shell is
/// involved. Credential prompts and HTTP redirects are disabled, output is
/// bounded and the child is killed when the timeout fires.
pub struct GitCliRefLister {
    git_binary: String,
    timeout: Duration,
}

impl GitCliRefLister {
    pub fn new(git_binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            git_binary: git_binary.into(),
            timeout,
        }
    }

    fn command(&self, repository: &str) -> Command {
        let mut command = Command::new(&self.git_binary);
        command
            .args(["-c", "http.followRedirects=false"])
            .args(["ls-remote", "--heads", "--", repository])
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

impl GitCliRefLister {
    async fn run(child: &mut Child) -> std::io::Result<(ExitStatus, Vec<u8>, Vec<u8>)> {
        let not_captured = || std::io::Error::new(std::io::ErrorKind::Other, "pipe not captured");
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(not_captured)?
            .take(MAX_LISTING_BYTES + 1);
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(not_captured)?
            .take(MAX_STDERR_BYTES);

        let mut out = Vec::new();
        let mut err = Vec::new();
        let read_out = async {
            stdout.read_to_end(&mut out).await?;
            if out.len() as u64 > MAX_LISTING_BYTES {
                child.start_kill()?;
            }
            Ok::<_, std::io::Error>(())
        };
        let (read_out, read_err) = tokio::join!(read_out, stderr.read_to_end(&mut err));
        read_out?;
        read_err?;

        if out.len() as u64 > MAX_LISTING_BYTES {
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("listing exceeds {} bytes", MAX_LISTING_BYTES),
            ));
        }

        let status = child.wait().await?;
        Ok((status, out, err))
    }
}

#[async_trait]
impl RefLister for GitCliRefLister {
    async fn list(&self, repository: &str) -> Result<RefListing, DomainError> {
        let start = Instant::now();

        let mut child = self.command(repository).spawn().map_err(|e| {
            DomainError::ListingUnavailable(format!("failed to run {}: {}", self.git_binary, e))
        })?;

        let (status, stdout, stderr) = tokio::time::timeout(self.timeout, Self::run(&mut child))
            .await
            .map_err(|_| {
                DomainError::ListingUnavailable(format!(
                    "git ls-remote timed out after {}ms for {}",
                    self.timeout.as_millis(),
                    repository
                ))
            })?
            .map_err(|e| {
                DomainError::ListingUnavailable(format!(
                    "git ls-remote failed for {}: {}",
                    repository, e
                ))
            })?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr);
            return Err(DomainError::ListingUnavailable(format!(
                "git ls-remote exited with {} for {}: {}",
                status,
                repository,
                stderr.trim()
            )));
        }

        let listing = parse_ls_remote_output(&String::from_utf8_lossy(&stdout));

        debug!(
            repository = %repository,
            refs = listing.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "git ls-remote finished"
        );

        Ok(listing)
    }
}
