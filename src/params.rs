//! Kyber parameter sets and derived sizes.
//!
//! The sealed [`KyberParams`] trait fixes (k, η₁, η₂, d_u, d_v) per variant
//! at compile time; every buffer length in the crate is derived from it, so
//! mismatched sizes are unrepresentable.

use zeroize::Zeroize;

/// Polynomial ring degree.
pub const N: usize = 256;

/// Field modulus.
pub const Q: i16 = 3329;

/// Size in bytes of hashes, seeds, and messages.
pub const SYMBYTES: usize = 32;

/// Size in bytes of a serialised polynomial (12 bits × 256 / 8).
pub const POLYBYTES: usize = 384;

/// Shared-secret length distributed with the KAT vectors (the caller may
/// squeeze any length from the handle).
pub const SSBYTES: usize = 32;

/// Fixed-size byte storage selected per parameter set.
pub trait ByteArray:
    AsRef<[u8]> + AsMut<[u8]> + Clone + Zeroize + Send + Sync + 'static
{
    const LEN: usize;
    fn zeroed() -> Self;
}

impl<const SIZE: usize> ByteArray for [u8; SIZE] {
    const LEN: usize = SIZE;

    #[inline]
    fn zeroed() -> Self {
        [0u8; SIZE]
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Kyber parameter set. Sealed — implemented only for [`Kyber512`],
/// [`Kyber768`], and [`Kyber1024`].
pub trait KyberParams: sealed::Sealed + 'static {
    /// Module rank (number of polynomials per vector).
    const K: usize;
    /// CBD width for the secret vector and the encryption vector r.
    const ETA1: usize;
    /// CBD width for the error terms e₁, e₂.
    const ETA2: usize;
    /// Compression width for the ciphertext vector u.
    const D_U: u32;
    /// Compression width for the ciphertext polynomial v.
    const D_V: u32;

    const POLYVEC_BYTES: usize = Self::K * POLYBYTES;
    const POLYVEC_COMPRESSED_BYTES: usize = Self::K * SYMBYTES * Self::D_U as usize;
    const POLY_COMPRESSED_BYTES: usize = SYMBYTES * Self::D_V as usize;
    const INDCPA_PK_BYTES: usize = Self::POLYVEC_BYTES + SYMBYTES;
    const INDCPA_SK_BYTES: usize = Self::POLYVEC_BYTES;
    const PK_BYTES: usize = Self::INDCPA_PK_BYTES;
    const SK_BYTES: usize = Self::INDCPA_SK_BYTES + Self::PK_BYTES + 2 * SYMBYTES;
    const CT_BYTES: usize = Self::POLYVEC_COMPRESSED_BYTES + Self::POLY_COMPRESSED_BYTES;

    type PkArray: ByteArray;
    type SkArray: ByteArray;
    type CtArray: ByteArray;
}

/// Kyber512 (k = 2, NIST security level 1).
#[derive(Debug, Clone, Copy)]
pub struct Kyber512;

/// Kyber768 (k = 3, NIST security level 3).
#[derive(Debug, Clone, Copy)]
pub struct Kyber768;

/// Kyber1024 (k = 4, NIST security level 5).
#[derive(Debug, Clone, Copy)]
pub struct Kyber1024;

impl sealed::Sealed for Kyber512 {}
impl KyberParams for Kyber512 {
    const K: usize = 2;
    const ETA1: usize = 3;
    const ETA2: usize = 2;
    const D_U: u32 = 10;
    const D_V: u32 = 4;

    type PkArray = [u8; 800];
    type SkArray = [u8; 1632];
    type CtArray = [u8; 768];
}

impl sealed::Sealed for Kyber768 {}
impl KyberParams for Kyber768 {
    const K: usize = 3;
    const ETA1: usize = 2;
    const ETA2: usize = 2;
    const D_U: u32 = 10;
    const D_V: u32 = 4;

    type PkArray = [u8; 1184];
    type SkArray = [u8; 2400];
    type CtArray = [u8; 1088];
}

impl sealed::Sealed for Kyber1024 {}
impl KyberParams for Kyber1024 {
    const K: usize = 4;
    const ETA1: usize = 2;
    const ETA2: usize = 2;
    const D_U: u32 = 11;
    const D_V: u32 = 5;

    type PkArray = [u8; 1568];
    type SkArray = [u8; 3168];
    type CtArray = [u8; 1568];
}

const _: () = {
    macro_rules! check_params {
        ($t:ty, pk = $pk:literal, sk = $sk:literal, ct = $ct:literal) => {
            assert!(<$t as KyberParams>::PK_BYTES == $pk);
            assert!(<$t as KyberParams>::SK_BYTES == $sk);
            assert!(<$t as KyberParams>::CT_BYTES == $ct);
            assert!(<<$t as KyberParams>::PkArray as ByteArray>::LEN == $pk);
            assert!(<<$t as KyberParams>::SkArray as ByteArray>::LEN == $sk);
            assert!(<<$t as KyberParams>::CtArray as ByteArray>::LEN == $ct);
        };
    }
    check_params!(Kyber512, pk = 800, sk = 1632, ct = 768);
    check_params!(Kyber768, pk = 1184, sk = 2400, ct = 1088);
    check_params!(Kyber1024, pk = 1568, sk = 3168, ct = 1568);
};
