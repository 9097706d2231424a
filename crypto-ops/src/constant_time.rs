//! Constant-time comparisons.
//!
//! Digest and integrity checks MUST NOT short-circuit on the first
//! mismatching byte: an attacker who can time the comparison learns how
//! much of a forged value matched. All equality checks on digests,
//! signatures, and other verifier-visible values go through here.

use subtle::ConstantTimeEq;

/// Constant-time comparison of byte slices.
///
/// Returns true if the slices are equal. The early length check is safe:
/// length is not secret for any value compared by this engine.
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Constant-time comparison of strings (hex digests, tokens).
pub fn ct_eq_str(a: &str, b: &str) -> bool {
    ct_eq(a.as_bytes(), b.as_bytes())
}
