#![cfg(unix)]

use gitlink_dns_application::ports::RefLister;
use gitlink_dns_domain::DomainError;
use gitlink_dns_infrastructure::git::GitCliRefLister;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

mod fixtures;

use fixtures::{DEV_COMMIT, MASTER_COMMIT};
use gitlink_dns_infrastructure::git::MAX_LISTING_BYTES;

const REPO: &str = "https://example.com/team/app";

/// Writes an executable stand-in for `git` into a fresh directory.
fn fake_git(script_body: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("git");
    std::fs::write(&path, format!("#!/bin/sh\n{}", script_body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    (dir, path)
}

fn lister(path: &PathBuf, timeout: Duration) -> GitCliRefLister {
    GitCliRefLister::new(path.to_string_lossy().to_string(), timeout)
}

#[tokio::test]
async fn test_lists_refs_with_argument_vector() {
    let (_dir, path) = fake_git(&format!(
        r#"
if [ "$1" != "-c" ] || [ "$2" != "http.followRedirects=false" ]; then
  echo "redirects not disabled: $*" >&2
  exit 4
fi
shift 2
if [ "$1" != "ls-remote" ] || [ "$2" != "--heads" ] || [ "$3" != "--" ] || [ "$4" != "{repo}" ]; then
  echo "unexpected arguments: $*" >&2
  exit 2
fi
if [ "$GIT_TERMINAL_PROMPT" != "0" ]; then
  echo "prompt enabled" >&2
  exit 3
fi
printf '%s\trefs/heads/master\n' {master}
printf '%s\trefs/heads/dev\n' {dev}
"#,
        repo = REPO,
        master = MASTER_COMMIT,
        dev = DEV_COMMIT,
    ));

    let listing = lister(&path, Duration::from_secs(5))
        .list(REPO)
        .await
        .unwrap();

    assert_eq!(listing.len(), 2);
    assert_eq!(listing.find_branch("master").unwrap().commit, MASTER_COMMIT);
    assert_eq!(listing.find_branch("dev").unwrap().commit, DEV_COMMIT);
}

#[tokio::test]
async fn test_non_zero_exit_is_listing_unavailable() {
    let (_dir, path) = fake_git(
        "echo \"fatal: repository 'https://example.com/team/app/' not found\" >&2\nexit 128\n",
    );

    let result = lister(&path, Duration::from_secs(5)).list(REPO).await;

    match result {
        Err(DomainError::ListingUnavailable(message)) => {
            assert!(message.contains("not found"), "{}", message)
        }
        other => panic!("expected ListingUnavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_binary_is_listing_unavailable() {
    let lister = GitCliRefLister::new("/nonexistent/bin/git", Duration::from_secs(5));

    let result = lister.list(REPO).await;
    assert!(matches!(result, Err(DomainError::ListingUnavailable(_))));
}

#[tokio::test]
async fn test_slow_remote_times_out() {
    let (_dir, path) = fake_git("sleep 5\n");

    let start = std::time::Instant::now();
    let result = lister(&path, Duration::from_millis(200)).list(REPO).await;

    assert!(matches!(result, Err(DomainError::ListingUnavailable(_))));
    assert!(start.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_empty_output_is_an_empty_listing() {
    let (_dir, path) = fake_git("exit 0\n");

    let listing = lister(&path, Duration::from_secs(5))
        .list(REPO)
        .await
        .unwrap();
    assert!(listing.is_empty());
}

#[tokio::test]
async fn test_redirects_are_disabled_on_the_command_line() {
    let (_dir, path) = fake_git(&format!(
        r#"
case " $* " in
  *" -c http.followRedirects=false ls-remote "*) ;;
  *) echo "redirects allowed: $*" >&2; exit 5 ;;
esac
printf '%s\trefs/heads/master\n' {master}
"#,
        master = MASTER_COMMIT,
    ));

    let listing = lister(&path, Duration::from_secs(5))
        .list(REPO)
        .await
        .unwrap();
    assert_eq!(listing.find_branch("master").unwrap().commit, MASTER_COMMIT);
}

#[tokio::test]
async fn test_oversized_output_is_listing_unavailable() {
    let (_dir, path) = fake_git(&format!(
        "head -c {} /dev/zero\n",
        MAX_LISTING_BYTES + 1024
    ));

    let result = lister(&path, Duration::from_secs(10)).list(REPO).await;

    match result {
        Err(DomainError::ListingUnavailable(message)) => {
            assert!(message.contains("exceeds"), "{}", message)
        }
        other => panic!("expected ListingUnavailable, got {:?}", other),
    }
}
