use gitlink_dns_domain::answer::DNSLINK_PREFIX;
use gitlink_dns_domain::{AnswerEncoder, AnswerMode, DomainError, HashAlgorithm, ResolvedAnswer};

const SHA1_HASH: &str = "1234567890abcdef1234567890abcdef12345678";

#[test]
fn test_raw_hash_returns_input_unchanged() {
    let encoder = AnswerEncoder::new(AnswerMode::RawHash, HashAlgorithm::Sha1);
    let answer = encoder.encode(SHA1_HASH).unwrap();

    assert_eq!(answer, ResolvedAnswer::RawHash(SHA1_HASH.to_string()));
    assert_eq!(answer.as_str(), SHA1_HASH);
}

#[test]
fn test_content_link_fixture() {
    let encoder = AnswerEncoder::new(AnswerMode::ContentLink, HashAlgorithm::Sha1);
    let answer = encoder.encode(SHA1_HASH).unwrap();

    assert_eq!(
        answer,
        ResolvedAnswer::ContentLink(
            "dnslink=/ipfs/baf4bcfasgrlhreflzxxrencwpcikxtppci2fm6a".to_string()
        )
    );
}

#[test]
fn test_content_link_is_deterministic() {
    let encoder = AnswerEncoder::new(AnswerMode::ContentLink, HashAlgorithm::Sha1);
    let first = encoder.encode(SHA1_HASH).unwrap();
    let second = encoder.encode(SHA1_HASH).unwrap();

    assert_eq!(first, second);
    assert!(first.as_str().starts_with(DNSLINK_PREFIX));
}

#[test]
fn test_content_link_second_fixture() {
    let encoder = AnswerEncoder::default();
    let answer = encoder
        .encode("deadbeefdeadbeefdeadbeefdeadbeefdeadbeef")
        .unwrap();

    assert_eq!(
        answer.to_string(),
        "dnslink=/ipfs/baf4bcfg6vw7o7xvnx3x55ln657pk3pxp32w353y"
    );
}

#[test]
fn test_content_link_sha256() {
    let encoder = AnswerEncoder::new(AnswerMode::ContentLink, HashAlgorithm::Sha256);
    let answer = encoder.encode(&"ab".repeat(32)).unwrap();

    assert_eq!(
        answer.as_str(),
        "dnslink=/ipfs/baf4beiflvov2xk5lvov2xk5lvov2xk5lvov2xk5lvov2xk5lvov2xk5lvm"
    );
}

#[test]
fn test_sha1_and_sha256_tags_differ() {
    assert_ne!(
        HashAlgorithm::Sha1.multihash_code(),
        HashAlgorithm::Sha256.multihash_code()
    );
    assert_eq!(HashAlgorithm::Sha1.hex_len(), 40);
    assert_eq!(HashAlgorithm::Sha256.hex_len(), 64);
}

#[test]
fn test_rejects_non_hex_input() {
    let encoder = AnswerEncoder::default();
    let result = encoder.encode("zz34567890abcdef1234567890abcdef12345678");
    assert!(matches!(result, Err(DomainError::DecodeHex(_))));
}

#[test]
fn test_rejects_wrong_length_in_both_modes() {
    for mode in [AnswerMode::RawHash, AnswerMode::ContentLink] {
        let encoder = AnswerEncoder::new(mode, HashAlgorithm::Sha1);
        let result = encoder.encode("1234");
        assert!(matches!(result, Err(DomainError::DecodeHex(_))));
    }
}
