//! Vectors of polynomials, in both representation domains.
//!
//! `PolyVec<K>` holds `K` coefficient-form polynomials, `NttPolyVec<K>` the
//! NTT-domain counterpart — all parameterised by the const-generic rank `K`.

use core::ops;

use zeroize::Zeroize;

use super::poly::{NttPoly, Poly};
use crate::params::{N, POLYBYTES};

/// A vector of `K` coefficient-form polynomials (K = 2, 3, or 4).
#[derive(Clone)]
pub struct PolyVec<const K: usize> {
    pub(crate) polys: [Poly; K],
}

/// A vector of `K` NTT-domain polynomials.
#[derive(Clone)]
pub struct NttPolyVec<const K: usize> {
    pub(crate) polys: [NttPoly; K],
}

impl<const K: usize> PolyVec<K> {
    /// Zero-initialised vector.
    #[inline]
    pub fn zero() -> Self {
        PolyVec {
            polys: [Poly::zero(); K],
        }
    }

    /// Consuming forward NTT on every polynomial.
    pub fn ntt(self) -> NttPolyVec<K> {
        NttPolyVec {
            polys: self.polys.map(Poly::ntt),
        }
    }

    /// Barrett-reduce all coefficients in every polynomial.
    pub fn reduce(&mut self) {
        for p in self.polys.iter_mut() {
            p.reduce();
        }
    }

    // ---- Compression for the ciphertext u component -----------------------

    /// Compress with `d_u` bits per coefficient.
    pub fn compress(&self, r: &mut [u8], d_u: u32) {
        let bytes_per_poly = N * d_u as usize / 8;
        for i in 0..K {
            let slice = &mut r[i * bytes_per_poly..(i + 1) * bytes_per_poly];
            match d_u {
                10 => super::pack::poly_compress_d10(slice, &self.polys[i].coeffs),
                11 => super::pack::poly_compress_d11(slice, &self.polys[i].coeffs),
                _ => panic!("unsupported d_u={d_u}"),
            }
        }
    }

    /// Decompress with `d_u` bits per coefficient.
    pub fn decompress(a: &[u8], d_u: u32) -> Self {
        let bytes_per_poly = N * d_u as usize / 8;
        let mut pv = PolyVec::zero();
        for i in 0..K {
            let slice = &a[i * bytes_per_poly..(i + 1) * bytes_per_poly];
            match d_u {
                10 => super::pack::poly_decompress_d10(&mut pv.polys[i].coeffs, slice),
                11 => super::pack::poly_decompress_d11(&mut pv.polys[i].coeffs, slice),
                _ => panic!("unsupported d_u={d_u}"),
            }
        }
        pv
    }
}

impl<const K: usize> NttPolyVec<K> {
    /// Zero-initialised vector.
    #[inline]
    pub fn zero() -> Self {
        NttPolyVec {
            polys: [NttPoly::zero(); K],
        }
    }

    /// Consuming inverse NTT on every polynomial (Montgomery factor applies).
    pub fn invntt(self) -> PolyVec<K> {
        PolyVec {
            polys: self.polys.map(NttPoly::invntt),
        }
    }

    /// Barrett-reduce all coefficients in every polynomial.
    pub fn reduce(&mut self) {
        for p in self.polys.iter_mut() {
            p.reduce();
        }
    }

    /// Pointwise Montgomery inner product: `Σ_i self[i] · other[i]`.
    pub fn inner_product(&self, other: &Self) -> NttPoly {
        let mut r = self.polys[0].basemul(&other.polys[0]);
        for i in 1..K {
            let t = self.polys[i].basemul(&other.polys[i]);
            for j in 0..N {
                r.coeffs[j] += t.coeffs[j];
            }
        }
        r.reduce();
        r
    }

    // ---- 12-bit wire serialisation ----------------------------------------

    /// Serialise to `K × 384` bytes.
    pub fn tobytes(&self, r: &mut [u8]) {
        for i in 0..K {
            self.polys[i].tobytes(&mut r[i * POLYBYTES..(i + 1) * POLYBYTES]);
        }
    }

    /// Deserialise from `K × 384` bytes.
    pub fn frombytes(a: &[u8]) -> Self {
        let mut pv = NttPolyVec::zero();
        for i in 0..K {
            pv.polys[i] = NttPoly::frombytes(&a[i * POLYBYTES..(i + 1) * POLYBYTES]);
        }
        pv
    }
}

impl<const K: usize> ops::AddAssign<&PolyVec<K>> for PolyVec<K> {
    fn add_assign(&mut self, rhs: &PolyVec<K>) {
        for i in 0..K {
            self.polys[i] += &rhs.polys[i];
        }
    }
}

impl<const K: usize> ops::AddAssign<&NttPolyVec<K>> for NttPolyVec<K> {
    fn add_assign(&mut self, rhs: &NttPolyVec<K>) {
        for i in 0..K {
            self.polys[i] += &rhs.polys[i];
        }
    }
}

impl<const K: usize> Default for PolyVec<K> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const K: usize> Default for NttPolyVec<K> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const K: usize> Zeroize for PolyVec<K> {
    fn zeroize(&mut self) {
        for p in self.polys.iter_mut() {
            p.zeroize();
        }
    }
}

impl<const K: usize> Zeroize for NttPolyVec<K> {
    fn zeroize(&mut self) {
        for p in self.polys.iter_mut() {
            p.zeroize();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Q;

    #[test]
    fn tobytes_frombytes_roundtrip() {
        let mut pv = NttPolyVec::<3>::zero();
        for k in 0..3 {
            for i in 0..N {
                pv.polys[k].coeffs[i] = ((k * N + i) as i16 * 7) % (Q - 1);
            }
        }
        let mut buf = [0u8; 3 * POLYBYTES];
        pv.tobytes(&mut buf);

        let pv2 = NttPolyVec::<3>::frombytes(&buf);
        for k in 0..3 {
            assert_eq!(pv.polys[k].coeffs, pv2.polys[k].coeffs, "poly {k} mismatch");
        }
    }

    #[test]
    fn add_zero_identity() {
        let mut pv = PolyVec::<2>::zero();
        pv.polys[0].coeffs[0] = 42;
        pv.polys[1].coeffs[255] = 100;

        let zero = PolyVec::<2>::zero();
        pv += &zero;

        assert_eq!(pv.polys[0].coeffs[0], 42);
        assert_eq!(pv.polys[1].coeffs[255], 100);
    }

    #[test]
    fn compress_decompress_vector_bounded_error() {
        let mut pv = PolyVec::<2>::zero();
        for k in 0..2 {
            for i in 0..N {
                pv.polys[k].coeffs[i] = ((k * 711 + i * 23) % Q as usize) as i16;
            }
        }
        let mut buf = [0u8; 2 * 320];
        pv.compress(&mut buf, 10);
        let back = PolyVec::<2>::decompress(&buf, 10);

        for k in 0..2 {
            for i in 0..N {
                let orig = pv.polys[k].coeffs[i] as i32;
                let rec = back.polys[k].coeffs[i] as i32;
                let diff = (orig - rec).rem_euclid(Q as i32);
                let diff = diff.min(Q as i32 - diff);
                assert!(diff <= Q as i32 / (1 << 10) + 1, "poly {k} coeff {i}");
            }
        }
    }
}
