//! IND-CCA2 key encapsulation — Algorithms 7, 8, and 9 of the Kyber
//! Round-3 submission (Fujisaki-Okamoto transform with implicit rejection).
//!
//! The shared secret is not a fixed buffer: both encapsulation and
//! decapsulation key a SHAKE-256 instance with `K̄ ‖ H(c)` and hand back the
//! squeeze side, so the two parties derive identical streams of whatever
//! length they need.

use zeroize::Zeroize;

use crate::ct::CtMask;
use crate::hash;
use crate::params::{ByteArray, KyberParams, SYMBYTES};
use crate::pke;
use crate::types::{Ciphertext, PublicKey, SecretKey, SharedSecret};

/// Deterministic key generation from 64 bytes of randomness.
///
/// `coins = (d ‖ z)`: `d` seeds the IND-CPA keypair, `z` is the implicit
/// rejection seed stored in the secret key.
pub fn keypair_derand<P: KyberParams>(coins: &[u8; 2 * SYMBYTES]) -> (PublicKey<P>, SecretKey<P>) {
    let mut pk_arr = P::PkArray::zeroed();
    let mut sk_arr = P::SkArray::zeroed();

    let pk = pk_arr.as_mut();
    let sk = sk_arr.as_mut();

    let mut d = [0u8; SYMBYTES];
    d.copy_from_slice(&coins[..SYMBYTES]);
    pke::indcpa_keypair_derand::<P>(
        &mut pk[..P::INDCPA_PK_BYTES],
        &mut sk[..P::INDCPA_SK_BYTES],
        &d,
    );
    d.zeroize();

    // sk = (indcpa_sk || pk || H(pk) || z)
    sk[P::INDCPA_SK_BYTES..P::INDCPA_SK_BYTES + P::PK_BYTES].copy_from_slice(&pk[..P::PK_BYTES]);

    let h_pk = hash::hash_h(&pk[..P::PK_BYTES]);
    sk[P::SK_BYTES - 2 * SYMBYTES..P::SK_BYTES - SYMBYTES].copy_from_slice(&h_pk);

    sk[P::SK_BYTES - SYMBYTES..P::SK_BYTES].copy_from_slice(&coins[SYMBYTES..]);

    (PublicKey::from_bytes(pk_arr), SecretKey::from_bytes(sk_arr))
}

/// Key generation with system randomness.
pub fn keypair<P: KyberParams>(
    rng: &mut impl rand_core::CryptoRng,
) -> (PublicKey<P>, SecretKey<P>) {
    let mut coins = [0u8; 2 * SYMBYTES];
    rng.fill_bytes(&mut coins);
    let kp = keypair_derand::<P>(&coins);
    coins.zeroize();
    kp
}

/// Deterministic encapsulation from 32 bytes of randomness.
///
/// The message is the *hash* of the supplied randomness, so a biased caller
/// RNG never reaches the scheme directly:
///
/// 1. `m = H(m_seed)`
/// 2. `(K̄, r) = G(m ‖ H(pk))`
/// 3. `c = CPA.Enc(pk, m; r)`
/// 4. shared secret = SHAKE-256(`K̄ ‖ H(c)`), returned as a squeeze handle
pub fn encapsulate_derand<P: KyberParams>(
    pk: &PublicKey<P>,
    m_seed: &[u8; SYMBYTES],
) -> (Ciphertext<P>, SharedSecret) {
    let mut ct_arr = P::CtArray::zeroed();

    // g_in = H(m_seed) || H(pk)
    let mut g_in = [0u8; 2 * SYMBYTES];
    g_in[..SYMBYTES].copy_from_slice(&hash::hash_h(m_seed));
    g_in[SYMBYTES..].copy_from_slice(&hash::hash_h(pk.as_bytes()));

    // (K-bar || r) = G(g_in)
    let mut kr = hash::hash_g(&g_in);

    let mut m = [0u8; SYMBYTES];
    m.copy_from_slice(&g_in[..SYMBYTES]);
    let mut r = [0u8; SYMBYTES];
    r.copy_from_slice(&kr[SYMBYTES..]);
    pke::indcpa_enc::<P>(ct_arr.as_mut(), &m, pk.as_bytes(), &r);

    // kdf_in = K-bar || H(c)
    let mut kdf_in = [0u8; 2 * SYMBYTES];
    kdf_in[..SYMBYTES].copy_from_slice(&kr[..SYMBYTES]);
    kdf_in[SYMBYTES..].copy_from_slice(&hash::hash_h(ct_arr.as_ref()));
    let ss = SharedSecret::from_reader(hash::kdf(&kdf_in));

    m.zeroize();
    r.zeroize();
    g_in.zeroize();
    kr.zeroize();
    kdf_in.zeroize();

    (Ciphertext::from_bytes(ct_arr), ss)
}

/// Encapsulation with system randomness.
pub fn encapsulate<P: KyberParams>(
    pk: &PublicKey<P>,
    rng: &mut impl rand_core::CryptoRng,
) -> (Ciphertext<P>, SharedSecret) {
    let mut m_seed = [0u8; SYMBYTES];
    rng.fill_bytes(&mut m_seed);
    let out = encapsulate_derand::<P>(pk, &m_seed);
    m_seed.zeroize();
    out
}

/// Decapsulate: recover the shared-secret stream.
///
/// Never fails. If the ciphertext does not re-encrypt to itself, the KDF is
/// keyed with the secret rejection seed `z` instead of `K̄'` — a masked
/// constant-time selection, not a branch — so an invalid ciphertext yields
/// a deterministic pseudorandom stream unrelated to any session key.
pub fn decapsulate<P: KyberParams>(ct: &Ciphertext<P>, sk: &SecretKey<P>) -> SharedSecret {
    let sk_bytes = sk.as_bytes();
    let ct_bytes = ct.as_bytes();

    // Parse the secret key: (indcpa_sk || pk || H(pk) || z)
    let indcpa_sk = &sk_bytes[..P::INDCPA_SK_BYTES];
    let pk_bytes = &sk_bytes[P::INDCPA_SK_BYTES..P::INDCPA_SK_BYTES + P::PK_BYTES];
    let h_pk = &sk_bytes[P::SK_BYTES - 2 * SYMBYTES..P::SK_BYTES - SYMBYTES];
    let z = &sk_bytes[P::SK_BYTES - SYMBYTES..P::SK_BYTES];

    // m' = CPA.Dec(indcpa_sk, ct)
    let mut m_prime = [0u8; SYMBYTES];
    pke::indcpa_dec::<P>(&mut m_prime, ct_bytes, indcpa_sk);

    // (K-bar' || r') = G(m' || H(pk))
    let mut g_in = [0u8; 2 * SYMBYTES];
    g_in[..SYMBYTES].copy_from_slice(&m_prime);
    g_in[SYMBYTES..].copy_from_slice(h_pk);
    let mut kr = hash::hash_g(&g_in);

    // Re-encrypt: ct' = CPA.Enc(pk, m'; r')
    // Stack buffer sized for the largest parameter set.
    const MAX_CT: usize = 1568;
    let mut r_prime = [0u8; SYMBYTES];
    r_prime.copy_from_slice(&kr[SYMBYTES..]);
    let mut cmp = [0u8; MAX_CT];
    pke::indcpa_enc::<P>(&mut cmp[..P::CT_BYTES], &m_prime, pk_bytes, &r_prime);

    // kdf_in = select(K-bar', z; ct == ct') || H(ct), selected without a
    // branch on the comparison outcome
    let accept = CtMask::bytes_eq(ct_bytes, &cmp[..P::CT_BYTES]);
    let mut kdf_in = [0u8; 2 * SYMBYTES];
    accept.select_into(&mut kdf_in[..SYMBYTES], &kr[..SYMBYTES], z);
    kdf_in[SYMBYTES..].copy_from_slice(&hash::hash_h(ct_bytes));
    let ss = SharedSecret::from_reader(hash::kdf(&kdf_in));

    m_prime.zeroize();
    g_in.zeroize();
    kr.zeroize();
    r_prime.zeroize();
    cmp.zeroize();
    kdf_in.zeroize();

    ss
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Kyber512, Kyber768};

    #[test]
    fn encapsulate_decapsulate_streams_agree() {
        let coins: [u8; 64] = core::array::from_fn(|i| i as u8);
        let (pk, sk) = keypair_derand::<Kyber768>(&coins);

        let m_seed = [0x42u8; SYMBYTES];
        let (ct, mut ss_enc) = encapsulate_derand::<Kyber768>(&pk, &m_seed);
        let mut ss_dec = decapsulate::<Kyber768>(&ct, &sk);

        assert_eq!(
            ss_enc.squeeze_array::<64>(),
            ss_dec.squeeze_array::<64>(),
            "shared-secret streams must agree"
        );
    }

    #[test]
    fn secret_key_embeds_public_key_hash() {
        let coins: [u8; 64] = core::array::from_fn(|i| (i * 3) as u8);
        let (pk, sk) = keypair_derand::<Kyber512>(&coins);
        let sk_bytes = sk.as_bytes();

        let h_pk = hash::hash_h(pk.as_bytes());
        let stored =
            &sk_bytes[Kyber512::SK_BYTES - 2 * SYMBYTES..Kyber512::SK_BYTES - SYMBYTES];
        assert_eq!(&h_pk[..], stored);

        let z = &sk_bytes[Kyber512::SK_BYTES - SYMBYTES..];
        assert_eq!(z, &coins[SYMBYTES..]);
    }
}
