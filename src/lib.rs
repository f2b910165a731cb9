//! `kyber-kem` — the Kyber key encapsulation mechanism, as submitted to
//! Round 3 of the NIST post-quantum cryptography process.
//!
//! Implements the IND-CCA2-secure KEM for all three parameter sets:
//! Kyber512, Kyber768, and Kyber1024.
//!
//! # Design principles
//!
//! - **No `unsafe`** — enforced by `#![deny(unsafe_code)]`.
//! - **Typed polynomial domains** — coefficient form and NTT form are
//!   distinct types, so applying the NTT twice or multiplying polynomials in
//!   the wrong domain is a compile-time error.
//! - **RAII zeroization** of secret material via the `zeroize` crate.
//! - **Constant-time** operations for secret-dependent comparisons and
//!   moves; implicit rejection on invalid ciphertexts, never an error.
//! - **Streamed shared secret** — encapsulation and decapsulation return a
//!   SHAKE-256 handle from which the caller squeezes a secret of any length.

#![deny(unsafe_code)]

mod ct;
pub mod error;
pub mod hash;
pub mod kem;
mod math;
pub mod params;
mod pke;
pub mod types;

// Re-export the public API surface.
pub use error::Error;
pub use kem::{decapsulate, encapsulate, encapsulate_derand, keypair, keypair_derand};
pub use params::{Kyber1024, Kyber512, Kyber768, KyberParams};
pub use types::{Ciphertext, PublicKey, SecretKey, SharedSecret};
