//! Error correction code implementations.
//!
//! This module provides systematic binary BCH codes built on plain
//! polynomial arithmetic over GF(2):
//! - `gf2`: bit-vector polynomials (add, multiply, long division, padding)
//! - `bch`: code parameters, the systematic encoder and the cyclic
//!   error-trapping decoder
//! - `channel`: bit-flip channel models used to exercise the codes
//!
//! # Examples
//!
//! ```
//! use bch_codes::cs::ecc::bch::BchCode;
//! use bitvec::prelude::*;
//!
//! let code = BchCode::bch_7_4();
//! let codeword = code.encode(bits![u8, Msb0; 1, 0, 0, 1]).unwrap();
//! assert_eq!(codeword, bitvec![u8, Msb0; 1, 0, 0, 1, 1, 1, 0]);
//!
//! let mut received = codeword.clone();
//! let flipped = !received[2];
//! received.set(2, flipped);
//!
//! let decoded = code.decode(&received).unwrap().unwrap();
//! assert_eq!(decoded.codeword, codeword);
//! assert_eq!(decoded.errors_corrected, 1);
//! ```

use crate::cs::error::Error;
use bitvec::prelude::*;

/// Result type for error correction operations
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for binary block codes that map `k` message bits to `n` code bits
pub trait BlockCode {
    /// Codeword length in bits
    fn n(&self) -> usize;

    /// Message length in bits
    fn k(&self) -> usize;

    /// Number of bit errors the code corrects per block
    fn t(&self) -> usize;

    /// Encode exactly `k` message bits into an `n`-bit codeword
    fn encode(&self, message: &BitSlice<u8, Msb0>) -> Result<BitVec<u8, Msb0>>;

    /// Decode an `n`-bit received word.
    ///
    /// Returns `Ok(None)` when the error pattern is beyond what the decoder
    /// can correct.
    fn decode(&self, received: &BitSlice<u8, Msb0>) -> Result<Option<bch::Decoded>>;
}

/// Binary BCH codes
pub mod bch;
/// Bit-flip channel models
pub mod channel;
/// Polynomials over GF(2)
pub mod gf2;

pub use bch::{systematic_encode, trapping_decode, BchCode, CodeParams, Decoded, Encoding};
pub use channel::{flip_by_rate, flip_fixed_count, transmit, ChannelModel, Transmission};
pub use gf2::{Gf2Poly, PadSide};
