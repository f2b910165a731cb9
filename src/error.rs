//! Structural errors raised before any cryptographic work.
//!
//! The KEM core itself is total: correct-length inputs never fail, and
//! decapsulation of a malformed ciphertext yields a pseudorandom secret
//! (implicit rejection) rather than an error.

/// Error returned by the slice-validating key and ciphertext constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Input byte length does not match the parameter set.
    InvalidLength { expected: usize, actual: usize },
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidLength { expected, actual } => {
                write!(
                    f,
                    "invalid input length: expected {expected} bytes, got {actual}"
                )
            }
        }
    }
}

impl std::error::Error for Error {}
