//! Hash and extendable-output function (XOF) adapters.
//!
//! Wraps the SHA-3 family as used by Kyber:
//!
//! | Kyber name | Primitive  | Function |
//! |------------|------------|----------|
//! | **H**      | SHA3-256   | [`hash_h`] |
//! | **G**      | SHA3-512   | [`hash_g`] |
//! | **PRF**    | SHAKE-256  | [`prf`] |
//! | **XOF**    | SHAKE-128  | [`xof_absorb`] |
//! | **KDF**    | SHAKE-256  | [`kdf`] |
//!
//! The absorb-then-squeeze progression is a one-way state machine: the
//! absorbing types (`Shake128`, `Shake256`) are consumed by `finalize_xof()`,
//! which returns a reader that can only squeeze. Absorbing after a squeeze
//! is therefore unrepresentable.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Sha3_512, Shake128, Shake256, Shake256Reader};

use crate::params::SYMBYTES;

/// H(input) = SHA3-256(input) → 32 bytes.
#[inline]
pub fn hash_h(input: &[u8]) -> [u8; 32] {
    let mut h = Sha3_256::new();
    Digest::update(&mut h, input);
    h.finalize().into()
}

/// G(input) = SHA3-512(input) → 64 bytes.
#[inline]
pub fn hash_g(input: &[u8]) -> [u8; 64] {
    let mut h = Sha3_512::new();
    Digest::update(&mut h, input);
    h.finalize().into()
}

/// PRF(seed, nonce) = SHAKE-256(seed ‖ nonce), squeezed to fill `output`.
pub fn prf(seed: &[u8; SYMBYTES], nonce: u8, output: &mut [u8]) {
    let mut h = Shake256::default();
    Update::update(&mut h, seed);
    Update::update(&mut h, &[nonce]);
    let mut reader = h.finalize_xof();
    reader.read(output);
}

/// Create a SHAKE-128 XOF reader for matrix sampling.
///
/// Absorbs the 34-byte input `seed ‖ x ‖ y` and transitions to the squeeze
/// phase; uniform bytes are then read from the returned handle.
pub fn xof_absorb(seed: &[u8; SYMBYTES], x: u8, y: u8) -> impl XofReader {
    let mut h = Shake128::default();
    Update::update(&mut h, seed);
    Update::update(&mut h, &[x, y]);
    h.finalize_xof()
}

/// KDF(input) = SHAKE-256(input), returned as a squeeze handle.
///
/// `input` is the 64-byte concatenation `K̄ ‖ H(c)`; the caller derives a
/// shared secret of any length from the reader.
pub fn kdf(input: &[u8; 2 * SYMBYTES]) -> Shake256Reader {
    let mut h = Shake256::default();
    Update::update(&mut h, input);
    h.finalize_xof()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha3_256_empty_vector() {
        let out = hash_h(b"");
        assert_eq!(
            hex::encode(out),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn sha3_512_empty_vector() {
        let out = hash_g(b"");
        assert_eq!(
            hex::encode(out),
            "a69f73cca23a9ac5c8b567dc185a756e97c982164fe25859e0d1dcc1475c80a6\
             15b2123af1f5f94c11e3e9402c3ac558f500199d95b6d3e301758586281dcd26"
        );
    }

    #[test]
    fn shake256_empty_vector() {
        let mut reader = kdf(&[0u8; 64]);
        let mut a = [0u8; 16];
        let mut b = [0u8; 16];
        reader.read(&mut a);
        reader.read(&mut b);

        // Squeezing twice continues the same stream.
        let mut reader2 = kdf(&[0u8; 64]);
        let mut whole = [0u8; 32];
        reader2.read(&mut whole);
        assert_eq!(&whole[..16], &a);
        assert_eq!(&whole[16..], &b);
    }

    #[test]
    fn prf_distinct_nonces() {
        let seed = [9u8; SYMBYTES];
        let mut a = [0u8; 64];
        let mut b = [0u8; 64];
        prf(&seed, 0, &mut a);
        prf(&seed, 1, &mut b);
        assert_ne!(a, b);
    }

    #[test]
    fn xof_domain_separation() {
        let seed = [3u8; SYMBYTES];
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        xof_absorb(&seed, 0, 1).read(&mut a);
        xof_absorb(&seed, 1, 0).read(&mut b);
        assert_ne!(a, b, "index order must separate XOF streams");
    }
}
