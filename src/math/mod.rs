//! Polynomial arithmetic over `R_q = Z_q[X]/(X^256 + 1)` with q = 3329.

pub mod ntt;
pub mod pack;
pub mod poly;
pub mod polyvec;
pub mod reduce;
pub mod sample;
