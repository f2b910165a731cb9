//! IND-CPA public-key encryption — the inner scheme wrapped by the KEM.
//!
//! Algorithms 4, 5, and 6 of the Kyber Round-3 submission. Not exposed
//! directly; called by [`crate::kem`].

use zeroize::Zeroize;

use crate::hash;
use crate::math::poly::{NttPoly, Poly};
use crate::math::polyvec::{NttPolyVec, PolyVec};
use crate::math::sample;
use crate::params::{KyberParams, SYMBYTES};

// ---------------------------------------------------------------------------
// Matrix generation
// ---------------------------------------------------------------------------

/// Sample the K×K public matrix Â from seed ρ using SHAKE-128.
///
/// Row `i`, column `j` is parsed from the 34-byte XOF input
/// `ρ ‖ j ‖ i` — or `ρ ‖ i ‖ j` when `transposed`, which yields Âᵀ laid out
/// row-major so encryption can multiply it against r̂ row by row.
fn gen_matrix<const K: usize>(seed: &[u8; SYMBYTES], transposed: bool) -> [NttPolyVec<K>; K] {
    let mut a: [NttPolyVec<K>; K] = core::array::from_fn(|_| NttPolyVec::zero());
    for (i, row) in a.iter_mut().enumerate() {
        for (j, poly) in row.polys.iter_mut().enumerate() {
            let (x, y) = if transposed {
                (i as u8, j as u8)
            } else {
                (j as u8, i as u8)
            };
            let mut xof = hash::xof_absorb(seed, x, y);
            sample::rej_uniform(&mut poly.coeffs, &mut xof);
        }
    }
    a
}

/// Sample a vector of K noise polynomials, bumping the PRF nonce once per
/// polynomial.
fn getnoise_vec<const K: usize>(eta: usize, seed: &[u8; SYMBYTES], nonce: &mut u8) -> PolyVec<K> {
    let mut v = PolyVec::<K>::zero();
    for p in v.polys.iter_mut() {
        *p = Poly::getnoise_eta(eta, seed, *nonce);
        *nonce += 1;
    }
    v
}

// ---------------------------------------------------------------------------
// IND-CPA key generation
// ---------------------------------------------------------------------------

pub(crate) fn indcpa_keypair_derand<P: KyberParams>(
    pk_bytes: &mut [u8],
    sk_bytes: &mut [u8],
    d: &[u8; SYMBYTES],
) {
    match P::K {
        2 => indcpa_keypair_inner::<P, 2>(pk_bytes, sk_bytes, d),
        3 => indcpa_keypair_inner::<P, 3>(pk_bytes, sk_bytes, d),
        4 => indcpa_keypair_inner::<P, 4>(pk_bytes, sk_bytes, d),
        _ => unreachable!("sealed parameter sets have K in {{2, 3, 4}}"),
    }
}

fn indcpa_keypair_inner<P: KyberParams, const K: usize>(
    pk_bytes: &mut [u8],
    sk_bytes: &mut [u8],
    d: &[u8; SYMBYTES],
) {
    // (rho || sigma) = G(d)
    let mut g_out = hash::hash_g(d);
    let mut public_seed = [0u8; SYMBYTES];
    let mut noise_seed = [0u8; SYMBYTES];
    public_seed.copy_from_slice(&g_out[..SYMBYTES]);
    noise_seed.copy_from_slice(&g_out[SYMBYTES..]);

    let a = gen_matrix::<K>(&public_seed, false);

    let mut nonce: u8 = 0;
    let s = getnoise_vec::<K>(P::ETA1, &noise_seed, &mut nonce);
    let e = getnoise_vec::<K>(P::ETA1, &noise_seed, &mut nonce);

    let mut s_hat = s.ntt();
    s_hat.reduce();
    let mut e_hat = e.ntt();

    // t = A * s + e (NTT domain)
    let mut t_hat = NttPolyVec::<K>::zero();
    for (t_poly, a_row) in t_hat.polys.iter_mut().zip(a.iter()) {
        *t_poly = a_row.inner_product(&s_hat);
        t_poly.tomont();
    }
    t_hat += &e_hat;
    t_hat.reduce();

    // pk = Encode_12(t) || rho, sk = Encode_12(s)
    t_hat.tobytes(&mut pk_bytes[..P::POLYVEC_BYTES]);
    pk_bytes[P::POLYVEC_BYTES..P::INDCPA_PK_BYTES].copy_from_slice(&public_seed);
    s_hat.tobytes(&mut sk_bytes[..P::INDCPA_SK_BYTES]);

    s_hat.zeroize();
    e_hat.zeroize();
    g_out.zeroize();
    noise_seed.zeroize();
}

// ---------------------------------------------------------------------------
// IND-CPA encryption
// ---------------------------------------------------------------------------

pub(crate) fn indcpa_enc<P: KyberParams>(
    ct_bytes: &mut [u8],
    m: &[u8; SYMBYTES],
    pk_bytes: &[u8],
    coins: &[u8; SYMBYTES],
) {
    match P::K {
        2 => indcpa_enc_inner::<P, 2>(ct_bytes, m, pk_bytes, coins),
        3 => indcpa_enc_inner::<P, 3>(ct_bytes, m, pk_bytes, coins),
        4 => indcpa_enc_inner::<P, 4>(ct_bytes, m, pk_bytes, coins),
        _ => unreachable!("sealed parameter sets have K in {{2, 3, 4}}"),
    }
}

fn indcpa_enc_inner<P: KyberParams, const K: usize>(
    ct_bytes: &mut [u8],
    m: &[u8; SYMBYTES],
    pk_bytes: &[u8],
    coins: &[u8; SYMBYTES],
) {
    let t_hat = NttPolyVec::<K>::frombytes(&pk_bytes[..P::POLYVEC_BYTES]);
    let mut seed = [0u8; SYMBYTES];
    seed.copy_from_slice(&pk_bytes[P::POLYVEC_BYTES..P::INDCPA_PK_BYTES]);
    let mut m_poly = Poly::frommsg(m);

    let at = gen_matrix::<K>(&seed, true);

    // Noise nonce ordering is part of the wire format: r fully, then e1
    // fully, then e2, one nonce increment per polynomial.
    let mut nonce: u8 = 0;
    let r = getnoise_vec::<K>(P::ETA1, coins, &mut nonce);
    let mut e1 = getnoise_vec::<K>(P::ETA2, coins, &mut nonce);
    let mut e2 = Poly::getnoise_eta(P::ETA2, coins, nonce);

    let mut r_hat = r.ntt();

    // u = INTT(A^T * r) + e1
    let mut u_hat = NttPolyVec::<K>::zero();
    for (u_poly, at_row) in u_hat.polys.iter_mut().zip(at.iter()) {
        *u_poly = at_row.inner_product(&r_hat);
    }
    let mut u = u_hat.invntt();
    u += &e1;
    u.reduce();

    // v = INTT(t^T * r) + e2 + Decompress_1(m)
    let mut v = t_hat.inner_product(&r_hat).invntt();
    v += &e2;
    v += &m_poly;
    v.reduce();

    u.compress(&mut ct_bytes[..P::POLYVEC_COMPRESSED_BYTES], P::D_U);
    v.compress(
        &mut ct_bytes[P::POLYVEC_COMPRESSED_BYTES..P::CT_BYTES],
        P::D_V,
    );

    r_hat.zeroize();
    e1.zeroize();
    e2.zeroize();
    m_poly.zeroize();
    v.zeroize();
}

// ---------------------------------------------------------------------------
// IND-CPA decryption
// ---------------------------------------------------------------------------

pub(crate) fn indcpa_dec<P: KyberParams>(
    m: &mut [u8; SYMBYTES],
    ct_bytes: &[u8],
    sk_bytes: &[u8],
) {
    match P::K {
        2 => indcpa_dec_inner::<P, 2>(m, ct_bytes, sk_bytes),
        3 => indcpa_dec_inner::<P, 3>(m, ct_bytes, sk_bytes),
        4 => indcpa_dec_inner::<P, 4>(m, ct_bytes, sk_bytes),
        _ => unreachable!("sealed parameter sets have K in {{2, 3, 4}}"),
    }
}

fn indcpa_dec_inner<P: KyberParams, const K: usize>(
    m: &mut [u8; SYMBYTES],
    ct_bytes: &[u8],
    sk_bytes: &[u8],
) {
    let u = PolyVec::<K>::decompress(&ct_bytes[..P::POLYVEC_COMPRESSED_BYTES], P::D_U);
    let v = Poly::decompress(
        &ct_bytes[P::POLYVEC_COMPRESSED_BYTES..P::CT_BYTES],
        P::D_V,
    );
    let s_hat = NttPolyVec::<K>::frombytes(&sk_bytes[..P::INDCPA_SK_BYTES]);

    // m' = v - INTT(s^T * NTT(u))
    let u_hat = u.ntt();
    let mut mp = s_hat.inner_product(&u_hat).invntt();

    let mut msg_poly = &v - &mp;
    msg_poly.reduce();
    *m = msg_poly.tomsg();

    mp.zeroize();
    msg_poly.zeroize();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
