use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Compares two secrets without leaking their content or length through timing.
///
/// Both sides are reduced to fixed-size SHA-256 digests first, so the
/// comparison always touches 32 bytes regardless of input length.
pub fn constant_time_eq(provided: &str, expected: &str) -> bool {
    let provided = Sha256::digest(provided.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());

    provided.as_slice().ct_eq(expected.as_slice()).into()
}
