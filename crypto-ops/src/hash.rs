//! Hash engine.
//!
//! Computes and verifies hex digests over arbitrary byte payloads for the
//! supported digest set. Verification recomputes the digest and compares
//! with a timing-safe equality check. No side effects.

use crate::algorithm::HashAlgorithm;
use crate::constant_time;
use md5::Md5;
use serde::Serialize;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

/// Outcome of an integrity check. `expected` and `actual` are echoed so the
/// caller can log both sides of a mismatch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HashVerification {
    pub is_valid: bool,
    pub expected: String,
    pub actual: String,
}

/// Compute the lowercase hex digest of `payload`.
///
/// Deterministic: repeated calls over the same payload yield the identical
/// digest. The algorithm has already been validated by the time this runs.
pub fn digest(payload: &[u8], algorithm: HashAlgorithm) -> String {
    let bytes = match algorithm {
        HashAlgorithm::Md5 => Md5::digest(payload).to_vec(),
        HashAlgorithm::Sha1 => Sha1::digest(payload).to_vec(),
        HashAlgorithm::Sha256 => Sha256::digest(payload).to_vec(),
        HashAlgorithm::Sha512 => Sha512::digest(payload).to_vec(),
    };
    hex::encode(bytes)
}

/// Recompute the digest of `payload` and compare against `expected_digest`.
///
/// Hex case is folded before the comparison; the comparison itself is
/// constant-time.
pub fn verify(payload: &[u8], expected_digest: &str, algorithm: HashAlgorithm) -> HashVerification {
    let actual = digest(payload, algorithm);
    let expected = expected_digest.to_ascii_lowercase();
    let is_valid = constant_time::ct_eq_str(&expected, &actual);
    HashVerification {
        is_valid,
        expected,
        actual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    #[test]
    fn test_known_digests() {
        let payload = b"hello world";
        assert_eq!(
            digest(payload, HashAlgorithm::Md5),
            "5eb63bbbe01eeed093cb22bb8f5acdc3"
        );
        assert_eq!(
            digest(payload, HashAlgorithm::Sha1),
            "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"
        );
        assert_eq!(digest(payload, HashAlgorithm::Sha256), HELLO_SHA256);
        assert_eq!(
            digest(payload, HashAlgorithm::Sha512),
            "309ecc489c12d6eb4cc40f50c902f2b4d0ed77ee511a7c7a9bcd3ca86d4cd86f\
             989dd35bc5ff499670da34255b45b0cfd830e81f605dcf7dc5542e93ae9cd76f"
        );
    }

    #[test]
    fn test_digest_is_deterministic() {
        let payload = b"determinism check";
        for algorithm in [
            HashAlgorithm::Md5,
            HashAlgorithm::Sha1,
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha512,
        ] {
            assert_eq!(digest(payload, algorithm), digest(payload, algorithm));
        }
    }

    #[test]
    fn test_verify_matching_payload() {
        let result = verify(b"hello world", HELLO_SHA256, HashAlgorithm::Sha256);
        assert!(result.is_valid);
        assert_eq!(result.expected, result.actual);
    }

    #[test]
    fn test_verify_altered_payload() {
        let result = verify(b"hello world!", HELLO_SHA256, HashAlgorithm::Sha256);
        assert!(!result.is_valid);
        assert_ne!(result.expected, result.actual);
    }

    #[test]
    fn test_verify_folds_hex_case() {
        let result = verify(
            b"hello world",
            &HELLO_SHA256.to_uppercase(),
            HashAlgorithm::Sha256,
        );
        assert!(result.is_valid);
    }
}
