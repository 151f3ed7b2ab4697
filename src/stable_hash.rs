//! Deterministic hashing helpers for per-decision seed derivation.
//!
//! This module intentionally does **not** provide cryptographic guarantees; it is meant for
//! repeatable, well-distributed seeding of the per-decision generator. Determinism holds for
//! a given input across calls and processes on the same build.

/// Deterministic (non-crypto) stable string hash.
///
/// Implementation:
/// - FNV-1a over bytes (cheap, stable across platforms)
/// - SplitMix64 finalizer (improves bit diffusion / uniformity)
#[must_use]
pub fn stable_hash64(s: &str) -> u64 {
    let mut h: u64 = 14695981039346656037u64;
    for b in s.as_bytes() {
        h ^= *b as u64;
        h = h.wrapping_mul(1099511628211u64);
    }
    splitmix64(h)
}

/// Derive the per-decision seed from a pre-hashed application id and the decision's
/// unique key: `stable_hash64(unique_key) + app_hash` with wrapping 64-bit addition.
///
/// The application salt keeps two deployments with colliding unique keys from drawing
/// identical randomness; the unique key keeps every decision distinct within one app.
#[must_use]
pub fn salted_seed(app_hash: u64, unique_key: &str) -> u64 {
    stable_hash64(unique_key).wrapping_add(app_hash)
}

#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_across_calls() {
        assert_eq!(stable_hash64("abc"), stable_hash64("abc"));
        assert_eq!(
            salted_seed(stable_hash64("app"), "key-1"),
            salted_seed(stable_hash64("app"), "key-1")
        );
    }

    #[test]
    fn distinct_keys_hash_differently() {
        assert_ne!(stable_hash64("key-1"), stable_hash64("key-2"));
        assert_ne!(stable_hash64(""), stable_hash64(" "));
    }

    #[test]
    fn app_salt_separates_deployments() {
        let a = salted_seed(stable_hash64("app-a"), "key");
        let b = salted_seed(stable_hash64("app-b"), "key");
        assert_ne!(a, b);
    }
}
