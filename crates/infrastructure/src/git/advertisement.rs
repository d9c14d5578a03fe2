//! Parsers for the reference advertisements a git remote sends back.
//!
//! Two formats are understood:
//! - the tab separated `<commit>\t<ref>` lines printed by `git ls-remote`
//!   (identical to the dumb HTTP `info/refs` file), and
//! - the pkt-line framed advertisement of the smart HTTP protocol.
//!
//! Content comes from an untrusted remote. Lines that do not look like a
//! reference are dropped, never interpreted.

use gitlink_dns_domain::{DomainError, RefListing, RemoteRef};

const PKT_LEN_SIZE: usize = 4;
const PEELED_CAPABILITIES: &str = "capabilities^{}";

pub fn parse_ls_remote_output(output: &str) -> RefListing {
    output
        .lines()
        .filter_map(|line| {
            let (commit, name) = line.split_once('\t')?;
            let name = name.trim_end();
            if is_object_id(commit) && !name.is_empty() {
                Some(RemoteRef::new(name, commit))
            } else {
                None
            }
        })
        .collect()
}

pub fn parse_upload_pack_advertisement(body: &[u8]) -> Result<RefListing, DomainError> {
    let mut refs = Vec::new();
    let mut rest = body;

    while !rest.is_empty() {
        let len = pkt_len(rest)?;

        // flush-pkt, delim-pkt and response-end-pkt carry no payload
        if len < PKT_LEN_SIZE {
            if len == 3 {
                return Err(DomainError::ListingUnavailable(
                    "invalid pkt-line length 0003".to_string(),
                ));
            }
            rest = &rest[PKT_LEN_SIZE..];
            continue;
        }

        if len > rest.len() {
            return Err(DomainError::ListingUnavailable(format!(
                "truncated pkt-line: expected {} bytes, {} left",
                len,
                rest.len()
            )));
        }

        if let Some(remote_ref) = parse_advertised_ref(&rest[PKT_LEN_SIZE..len]) {
            refs.push(remote_ref);
        }
        rest = &rest[len..];
    }

    Ok(RefListing::new(refs))
}

fn pkt_len(data: &[u8]) -> Result<usize, DomainError> {
    let header = data.get(..PKT_LEN_SIZE).ok_or_else(|| {
        DomainError::ListingUnavailable("truncated pkt-line length".to_string())
    })?;

    if !header.iter().all(u8::is_ascii_hexdigit) {
        return Err(DomainError::ListingUnavailable(format!(
            "invalid pkt-line length {:?}",
            String::from_utf8_lossy(header)
        )));
    }

    header.iter().try_fold(0usize, |acc, digit| {
        let value = (*digit as char).to_digit(16).ok_or_else(|| {
            DomainError::ListingUnavailable("invalid pkt-line length".to_string())
        })?;
        Ok(acc * 16 + value as usize)
    })
}

fn parse_advertised_ref(payload: &[u8]) -> Option<RemoteRef> {
    let line = std::str::from_utf8(payload).ok()?;
    let line = line.strip_suffix('\n').unwrap_or(line);
    // the first ref carries the capability list after a NUL
    let line = line.split('\0').next()?;

    if line.starts_with('#') {
        return None;
    }

    let (commit, name) = line.split_once(' ')?;
    if !is_object_id(commit) || name.is_empty() || name == PEELED_CAPABILITIES {
        return None;
    }

    Some(RemoteRef::new(name, commit))
}

/// SHA-1 or SHA-256 object name in hex.
fn is_object_id(value: &str) -> bool {
    matches!(value.len(), 40 | 64) && value.bytes().all(|b| b.is_ascii_hexdigit())
}
