//! Key, ciphertext, and shared-secret types.
//!
//! Keys and ciphertexts are byte-array newtypes sized by the parameter set.
//! Their plumbing (constructors, slice validation, views, `Debug`) is
//! generated by one macro so the three types cannot drift apart; slice
//! constructors validate lengths before any cryptographic work runs.
//! Secret-bearing types zeroize on drop and redact their `Debug` output.

use sha3::digest::XofReader;
use sha3::Shake256Reader;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::Error;
use crate::params::{ByteArray, KyberParams};

/// Generates the shared plumbing for a parameter-set-sized byte newtype:
/// array constructor, byte views, validating `TryFrom<&[u8]>`, `Clone`, and
/// a `Debug` that prints only the type and its length.
macro_rules! byte_newtype {
    ($(#[$doc:meta])* $name:ident, $array:ident, $len:ident) => {
        $(#[$doc])*
        pub struct $name<P: KyberParams> {
            pub(crate) bytes: P::$array,
        }

        impl<P: KyberParams> $name<P> {
            /// Wrap an exact-size byte array.
            #[inline]
            pub fn from_bytes(bytes: P::$array) -> Self {
                Self { bytes }
            }

            /// View the contents as a byte slice.
            #[inline]
            pub fn as_bytes(&self) -> &[u8] {
                self.bytes.as_ref()
            }
        }

        impl<P: KyberParams> TryFrom<&[u8]> for $name<P> {
            type Error = Error;

            /// Validating constructor: the slice must match the parameter
            /// set's declared size for this type.
            fn try_from(bytes: &[u8]) -> Result<Self, Error> {
                if bytes.len() != P::$len {
                    return Err(Error::InvalidLength {
                        expected: P::$len,
                        actual: bytes.len(),
                    });
                }
                let mut arr = <P::$array as ByteArray>::zeroed();
                arr.as_mut().copy_from_slice(bytes);
                Ok(Self { bytes: arr })
            }
        }

        impl<P: KyberParams> AsRef<[u8]> for $name<P> {
            #[inline]
            fn as_ref(&self) -> &[u8] {
                self.bytes.as_ref()
            }
        }

        impl<P: KyberParams> Clone for $name<P> {
            fn clone(&self) -> Self {
                Self {
                    bytes: self.bytes.clone(),
                }
            }
        }

        impl<P: KyberParams> core::fmt::Debug for $name<P> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                // Contents are never printed; only the type and size.
                write!(f, concat!(stringify!($name), "({} bytes)"), P::$len)
            }
        }
    };
}

byte_newtype! {
    /// Kyber public (encapsulation) key: `Encode_12(t̂) ‖ ρ`.
    PublicKey, PkArray, PK_BYTES
}

byte_newtype! {
    /// Kyber secret (decapsulation) key:
    /// `Encode_12(ŝ) ‖ pk ‖ H(pk) ‖ z`. Zeroized on drop.
    SecretKey, SkArray, SK_BYTES
}

byte_newtype! {
    /// Kyber ciphertext:
    /// `Encode_du(Compress_du(u)) ‖ Encode_dv(Compress_dv(v))`.
    Ciphertext, CtArray, CT_BYTES
}

impl<P: KyberParams> PublicKey<P> {
    /// Consume the wrapper and return the inner byte array.
    #[inline]
    pub fn into_bytes(self) -> P::PkArray {
        self.bytes
    }
}

impl<P: KyberParams> Ciphertext<P> {
    /// Consume the wrapper and return the inner byte array.
    #[inline]
    pub fn into_bytes(self) -> P::CtArray {
        self.bytes
    }
}

// The secret key deliberately has no `into_bytes`: handing out the inner
// array would sidestep the drop-time wipe.

impl<P: KyberParams> Zeroize for SecretKey<P> {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl<P: KyberParams> Drop for SecretKey<P> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<P: KyberParams> ZeroizeOnDrop for SecretKey<P> {}

/// The derived shared secret, as a SHAKE-256 squeeze handle.
///
/// Both sides of the exchange hold the same keyed stream; each call to
/// [`squeeze`](Self::squeeze) continues it, so the caller chooses the total
/// secret length. The handle is already past its absorb phase — no further
/// input can reach it.
pub struct SharedSecret {
    reader: Shake256Reader,
}

impl SharedSecret {
    #[inline]
    pub(crate) fn from_reader(reader: Shake256Reader) -> Self {
        Self { reader }
    }

    /// Fill `out` with the next bytes of the shared-secret stream.
    #[inline]
    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }

    /// Squeeze a fixed-size chunk of the stream.
    #[inline]
    pub fn squeeze_array<const LEN: usize>(&mut self) -> [u8; LEN] {
        let mut out = [0u8; LEN];
        self.reader.read(&mut out);
        out
    }
}

impl core::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SharedSecret(stream)")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
