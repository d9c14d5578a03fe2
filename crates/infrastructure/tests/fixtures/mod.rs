#![allow(dead_code)]

use hickory_proto::rr::Name;

pub const MASTER_COMMIT: &str = "1234567890abcdef1234567890abcdef12345678";
pub const DEV_COMMIT: &str = "abcdef1234567890abcdef1234567890abcdef12";
pub const TAG_COMMIT: &str = "0123456789012345678901234567890123456789";

/// `git ls-remote` output, including a tag and noise a remote could send.
pub fn ls_remote_output() -> String {
    format!(
        "{master}\tHEAD\n\
         {master}\trefs/heads/master\n\
         {dev}\trefs/heads/dev\n\
         warning: redirecting to https://github.com/ipfs/kubo.git/\n\
         {tag}\trefs/tags/v0.4.0\n\
         \n\
         nothex\trefs/heads/broken\n",
        master = MASTER_COMMIT,
        dev = DEV_COMMIT,
        tag = TAG_COMMIT,
    )
}

pub fn pkt_line(payload: &str) -> String {
    format!("{:04x}{}", payload.len() + 4, payload)
}

/// Smart HTTP advertisement as served by `info/refs?service=git-upload-pack`.
pub fn upload_pack_advertisement() -> String {
    let mut body = String::new();
    body.push_str(&pkt_line("# service=git-upload-pack\n"));
    body.push_str("0000");
    body.push_str(&pkt_line(&format!(
        "{} HEAD\0multi_ack thin-pack side-band symref=HEAD:refs/heads/master agent=git/2.43.0\n",
        MASTER_COMMIT
    )));
    body.push_str(&pkt_line(&format!("{} refs/heads/dev\n", DEV_COMMIT)));
    body.push_str(&pkt_line(&format!("{} refs/heads/master\n", MASTER_COMMIT)));
    body.push_str(&pkt_line(&format!("{} refs/tags/v0.4.0\n", TAG_COMMIT)));
    body.push_str(&pkt_line(&format!("{} refs/tags/v0.4.0^{{}}\n", DEV_COMMIT)));
    body.push_str("0000");
    body
}

/// Advertisement of a repository without any refs.
pub fn empty_repository_advertisement() -> String {
    let mut body = String::new();
    body.push_str(&pkt_line("# service=git-upload-pack\n"));
    body.push_str("0000");
    body.push_str(&pkt_line(&format!(
        "{} capabilities^{{}}\0report-status delete-refs\n",
        "0".repeat(40)
    )));
    body.push_str("0000");
    body
}

/// Query name built from raw labels, the way it arrives off the wire.
pub fn wire_name(text: &str) -> Name {
    let mut name = Name::from_labels(text.trim_end_matches('.').split('.').map(str::as_bytes))
        .expect("valid raw labels");
    name.set_fqdn(true);
    name
}
