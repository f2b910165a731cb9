//! Polynomial types and coefficient-level operations.
//!
//! The representation domain is part of the type: [`Poly`] holds a
//! polynomial in coefficient form, [`NttPoly`] one in the NTT domain. The
//! only way to move between them is the consuming [`Poly::ntt`] /
//! [`NttPoly::invntt`] pair, so a double transform or a pointwise product of
//! coefficient-form polynomials does not compile.

use core::ops;

use zeroize::Zeroize;

use super::{ntt, pack, reduce, sample};
use crate::hash;
use crate::params::{N, Q, SYMBYTES};

/// Polynomial in `R_q = Z_q[X]/(X^256 + 1)`, coefficient form.
#[derive(Clone, Copy)]
pub struct Poly {
    pub(crate) coeffs: [i16; N],
}

/// Polynomial in the NTT domain (bit-reversed order).
#[derive(Clone, Copy)]
pub struct NttPoly {
    pub(crate) coeffs: [i16; N],
}

impl Poly {
    /// The zero polynomial.
    #[inline]
    pub const fn zero() -> Self {
        Poly { coeffs: [0i16; N] }
    }

    /// Consuming forward NTT.
    #[inline]
    pub fn ntt(mut self) -> NttPoly {
        ntt::ntt(&mut self.coeffs);
        NttPoly { coeffs: self.coeffs }
    }

    /// Barrett-reduce every coefficient to the centered range.
    #[inline]
    pub fn reduce(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = reduce::barrett_reduce(*c);
        }
    }

    // ---- Message encoding -------------------------------------------------

    /// Decode a 32-byte message to a polynomial (1 bit per coefficient).
    pub fn frommsg(msg: &[u8; SYMBYTES]) -> Self {
        let mut p = Poly::zero();
        pack::poly_frommsg(&mut p.coeffs, msg);
        p
    }

    /// Encode a polynomial to a 32-byte message.
    pub fn tomsg(&self) -> [u8; SYMBYTES] {
        let mut msg = [0u8; SYMBYTES];
        pack::poly_tomsg(&mut msg, &self.coeffs);
        msg
    }

    // ---- Compression (d = 4 or 5, ciphertext v component) -----------------

    /// Compress to `d` bits per coefficient and write to `r`.
    pub fn compress(&self, r: &mut [u8], d: u32) {
        match d {
            4 => pack::poly_compress_d4(r, &self.coeffs),
            5 => pack::poly_compress_d5(r, &self.coeffs),
            _ => panic!("unsupported compression parameter d={d}"),
        }
    }

    /// Decompress from `d`-bit packed form.
    pub fn decompress(a: &[u8], d: u32) -> Self {
        let mut p = Poly::zero();
        match d {
            4 => pack::poly_decompress_d4(&mut p.coeffs, a),
            5 => pack::poly_decompress_d5(&mut p.coeffs, a),
            _ => panic!("unsupported compression parameter d={d}"),
        }
        p
    }

    // ---- Noise sampling ---------------------------------------------------

    /// Sample a noise polynomial from `CBD_η(PRF(seed, nonce))`.
    pub fn getnoise_eta(eta: usize, seed: &[u8; SYMBYTES], nonce: u8) -> Self {
        let mut p = Poly::zero();
        match eta {
            2 => {
                let mut buf = [0u8; 2 * N / 4]; // 128 bytes
                hash::prf(seed, nonce, &mut buf);
                sample::cbd2(&mut p.coeffs, &buf);
                buf.zeroize();
            }
            3 => {
                let mut buf = [0u8; 3 * N / 4]; // 192 bytes
                hash::prf(seed, nonce, &mut buf);
                sample::cbd3(&mut p.coeffs, &buf);
                buf.zeroize();
            }
            _ => unreachable!("eta is 2 or 3 for every parameter set"),
        }
        p
    }
}

impl NttPoly {
    /// The zero polynomial.
    #[inline]
    pub const fn zero() -> Self {
        NttPoly { coeffs: [0i16; N] }
    }

    /// Consuming inverse NTT; the result carries a Montgomery factor `R`.
    #[inline]
    pub fn invntt(mut self) -> Poly {
        ntt::invntt(&mut self.coeffs);
        Poly { coeffs: self.coeffs }
    }

    /// Barrett-reduce every coefficient to the centered range.
    #[inline]
    pub fn reduce(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = reduce::barrett_reduce(*c);
        }
    }

    /// Convert all coefficients to Montgomery representation.
    pub fn tomont(&mut self) {
        const F: i32 = ((1u64 << 32) % (Q as u64)) as i32; // R² mod q = 1353
        for c in self.coeffs.iter_mut() {
            *c = reduce::montgomery_reduce((*c as i32) * F);
        }
    }

    /// Pointwise Montgomery multiplication: 128 degree-1 products in
    /// `Z_q[X]/(X² − ζ_i)`.
    pub fn basemul(&self, other: &Self) -> Self {
        let mut r = NttPoly::zero();
        for i in 0..N / 4 {
            let zeta = ntt::ZETAS[64 + i];
            ntt::basemul(
                (&mut r.coeffs[4 * i..4 * i + 2]).try_into().unwrap(),
                (&self.coeffs[4 * i..4 * i + 2]).try_into().unwrap(),
                (&other.coeffs[4 * i..4 * i + 2]).try_into().unwrap(),
                zeta,
            );
            ntt::basemul(
                (&mut r.coeffs[4 * i + 2..4 * i + 4]).try_into().unwrap(),
                (&self.coeffs[4 * i + 2..4 * i + 4]).try_into().unwrap(),
                (&other.coeffs[4 * i + 2..4 * i + 4]).try_into().unwrap(),
                -zeta,
            );
        }
        r
    }

    // ---- 12-bit wire serialisation ----------------------------------------

    /// Serialise to 384 bytes (12-bit packing, canonical `[0, q)`).
    pub fn tobytes(&self, r: &mut [u8]) {
        pack::poly_tobytes(r, &self.coeffs);
    }

    /// Deserialise from 12-bit packed bytes.
    pub fn frombytes(a: &[u8]) -> Self {
        let mut p = NttPoly::zero();
        pack::poly_frombytes(&mut p.coeffs, a);
        p
    }
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

impl ops::AddAssign<&Poly> for Poly {
    #[inline]
    fn add_assign(&mut self, rhs: &Poly) {
        for i in 0..N {
            self.coeffs[i] += rhs.coeffs[i];
        }
    }
}

impl<'b> ops::Sub<&'b Poly> for &Poly {
    type Output = Poly;

    #[inline]
    fn sub(self, rhs: &'b Poly) -> Poly {
        let mut r = Poly::zero();
        for i in 0..N {
            r.coeffs[i] = self.coeffs[i] - rhs.coeffs[i];
        }
        r
    }
}

impl ops::AddAssign<&NttPoly> for NttPoly {
    #[inline]
    fn add_assign(&mut self, rhs: &NttPoly) {
        for i in 0..N {
            self.coeffs[i] += rhs.coeffs[i];
        }
    }
}

impl Default for Poly {
    #[inline]
    fn default() -> Self {
        Poly::zero()
    }
}

impl Default for NttPoly {
    #[inline]
    fn default() -> Self {
        NttPoly::zero()
    }
}

impl Zeroize for Poly {
    fn zeroize(&mut self) {
        self.coeffs.zeroize();
    }
}

impl Zeroize for NttPoly {
    fn zeroize(&mut self) {
        self.coeffs.zeroize();
    }
}

impl core::fmt::Debug for Poly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Poly")
            .field("coeffs[..4]", &&self.coeffs[..4])
            .finish_non_exhaustive()
    }
}

impl core::fmt::Debug for NttPoly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NttPoly")
            .field("coeffs[..4]", &&self.coeffs[..4])
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
