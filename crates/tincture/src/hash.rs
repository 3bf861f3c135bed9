//! Stable hashing for generated class and keyframe names.
//!
//! Names must be identical across processes and builds, so this uses
//! FNV-1a rather than the randomly seeded std hasher.

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// 64-bit FNV-1a hash of `bytes`.
pub fn fnv1a_hash(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Encodes `value` in lowercase base 36.
pub fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::with_capacity(13);
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Builds a name from a prefix and the hash of `input`.
///
/// The prefix is expected to start with a letter so the result is always a
/// valid CSS identifier.
pub fn hashed_name(prefix: &str, input: &str) -> String {
    format!("{}{}", prefix, to_base36(fnv1a_hash(input.as_bytes())))
}
