//! BCH (Bose-Chaudhuri-Hocquenghem) error correction code implementation.
//!
//! BCH codes are a class of cyclic error-correcting codes constructed using polynomials over finite fields.
//! Named after their inventors Raj Bose, Dwijendra Kumar Chaudhuri, and Alexis Hocquenghem, they can
//! detect and correct multiple random bit errors per block.
//!
//! This implementation provides:
//! - Immutable code parameters `(n, k, t, generator)` with validated presets for
//!   BCH(7,4), BCH(15,11), BCH(15,7), BCH(15,5), BCH(31,6) and BCH(127,8)
//! - Systematic encoding: the message occupies the high-order `k` bits and the
//!   remainder of `message * x^(n-k)` modulo the generator fills the parity bits
//! - Error-trapping decoding by cyclic shifts and syndrome weights
//!
//! # Decoding limits
//!
//! The decoder is not an algebraic (Berlekamp-Massey / Chien search) decoder.
//! It rotates the received word until the syndrome has weight at most `t`,
//! which succeeds when every error fits inside `n - k` cyclically consecutive
//! positions. That covers every pattern of weight `<= t` for BCH(7,4),
//! BCH(15,11) and BCH(15,7). For the wider codes some spread-out patterns of
//! weight `<= t` are reported as uncorrectable. A reported correction of at
//! most `t` bits is always the nearest codeword, because the generator's
//! minimum distance is at least `2t + 1`.
//!
//! The `t` values of the presets are design constants tied to their generator
//! polynomials. Custom parameter sets only get the necessary checks done by
//! `CodeParams::new`.

use crate::cs::ecc::gf2::{Gf2Poly, PadSide};
use crate::cs::ecc::{BlockCode, Result};
use crate::cs::error::Error;
use bitvec::prelude::*;
use log::{debug, trace};
use rayon::prelude::*;
use std::fmt::{Display, Formatter};

/// x^3 + x + 1
const GENERATOR_7_4: [u8; 4] = [1, 0, 1, 1];

/// x^4 + x + 1
const GENERATOR_15_11: [u8; 5] = [1, 0, 0, 1, 1];

/// x^8 + x^7 + x^6 + x^4 + 1
const GENERATOR_15_7: [u8; 9] = [1, 1, 1, 0, 1, 0, 0, 0, 1];

/// x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
const GENERATOR_15_5: [u8; 11] = [1, 0, 1, 0, 0, 1, 1, 0, 1, 1, 1];

const GENERATOR_31_6: [u8; 26] = [
    1, 1, 0, 0, 1, 0, 1, 1, 0, 1, 1, 1, 1, 0, 1, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 1,
];

const GENERATOR_127_8: [u8; 120] = [
    1, 1, 1, 0, 0, 0, 1, 0, 0, 1, 1, 1, 0, 1, 0, 1, 1, 0, 1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 1, 0,
    1, 1, 1, 1, 0, 1, 0, 0, 1, 0, 0, 0, 0, 1, 1, 0, 0, 0, 1, 1, 0, 1, 0, 1, 0, 0, 1, 1, 0, 0,
    1, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 0, 1, 0, 0, 0, 1, 0, 1, 1, 1, 0, 0, 1, 1, 0, 1, 1, 1, 0,
    1, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 0, 0, 1, 0, 1, 1, 0, 0, 0, 0, 1, 0, 0, 0, 1, 1, 1, 1,
];

/// Parameters of one binary BCH code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeParams {
    /// Codeword length in bits (n)
    n: usize,
    /// Message length in bits (k)
    k: usize,
    /// Maximum number of correctable bit errors (t)
    t: usize,
    /// Generator polynomial of degree n - k, highest order first
    generator: Gf2Poly,
}

impl CodeParams {
    /// Create a validated parameter set
    ///
    /// # Arguments
    ///
    /// * `n` - Codeword length in bits
    /// * `k` - Message length in bits
    /// * `t` - Number of bit errors the code is designed to correct
    /// * `generator` - Generator polynomial, `n - k + 1` coefficients, highest order first
    ///
    /// # Returns
    ///
    /// The parameters, or `InvalidInput` when the generator cannot define a
    /// cyclic `(n, k)` code correcting `t` errors. The checks are necessary
    /// conditions only: they do not prove the minimum distance.
    pub fn new(n: usize, k: usize, t: usize, generator: Gf2Poly) -> Result<Self> {
        if k == 0 || k >= n {
            return Err(Error::InvalidInput(format!(
                "Message length must satisfy 0 < k < n, got n = {}, k = {}",
                n, k
            )));
        }

        if t == 0 {
            return Err(Error::InvalidInput(
                "Error correction capability must be positive".to_string(),
            ));
        }

        let parity_length = n - k;
        if generator.width() != parity_length + 1 || generator.degree() != Some(parity_length) {
            return Err(Error::InvalidInput(format!(
                "Generator polynomial must have degree {} stored in {} bits, got {}",
                parity_length,
                parity_length + 1,
                generator
            )));
        }

        // Cyclic codes of length n are generated by divisors of x^n + 1
        let cyclic_modulus = Gf2Poly::monomial(n).add(&Gf2Poly::monomial(0));
        if !cyclic_modulus.rem(&generator)?.is_zero() {
            return Err(Error::InvalidInput(format!(
                "Generator polynomial {} does not divide x^{} + 1",
                generator, n
            )));
        }

        // 2t <= n - k and 2t + 1 <= weight(g)
        if t > parity_length / 2 || t > generator.weight().saturating_sub(1) / 2 {
            return Err(Error::InvalidInput(format!(
                "Error correction capability too large: BCH({},{}) with generator {} cannot correct {} errors",
                n, k, generator, t
            )));
        }

        Ok(CodeParams {
            n,
            k,
            t,
            generator,
        })
    }

    fn preset(n: usize, k: usize, t: usize, generator: &[u8]) -> Self {
        CodeParams {
            n,
            k,
            t,
            generator: Gf2Poly::from_coefficients(generator),
        }
    }

    /// BCH(7,4), corrects 1 error (the Hamming code)
    pub fn bch_7_4() -> Self {
        Self::preset(7, 4, 1, &GENERATOR_7_4)
    }

    /// BCH(15,11), corrects 1 error
    pub fn bch_15_11() -> Self {
        Self::preset(15, 11, 1, &GENERATOR_15_11)
    }

    /// BCH(15,7), corrects 2 errors
    pub fn bch_15_7() -> Self {
        Self::preset(15, 7, 2, &GENERATOR_15_7)
    }

    /// BCH(15,5), corrects 3 errors
    pub fn bch_15_5() -> Self {
        Self::preset(15, 5, 3, &GENERATOR_15_5)
    }

    /// BCH(31,6), corrects 7 errors
    pub fn bch_31_6() -> Self {
        Self::preset(31, 6, 7, &GENERATOR_31_6)
    }

    /// BCH(127,8), corrects 31 errors
    pub fn bch_127_8() -> Self {
        Self::preset(127, 8, 31, &GENERATOR_127_8)
    }

    /// All preset codes, shortest first
    pub fn standard_codes() -> Vec<Self> {
        vec![
            Self::bch_7_4(),
            Self::bch_15_11(),
            Self::bch_15_7(),
            Self::bch_15_5(),
            Self::bch_31_6(),
            Self::bch_127_8(),
        ]
    }

    /// Codeword length (n)
    pub fn n(&self) -> usize {
        self.n
    }

    /// Message length (k)
    pub fn k(&self) -> usize {
        self.k
    }

    /// Error correction capability (t)
    pub fn t(&self) -> usize {
        self.t
    }

    /// Generator polynomial
    pub fn generator(&self) -> &Gf2Poly {
        &self.generator
    }

    /// Number of parity bits (n - k)
    pub fn parity_length(&self) -> usize {
        self.n - self.k
    }

    /// Fraction of codeword bits that carry the message (k / n)
    pub fn code_rate(&self) -> f64 {
        self.k as f64 / self.n as f64
    }
}

impl Display for CodeParams {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "BCH({},{})", self.n, self.k)
    }
}

/// Codeword together with the generator and parity that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    /// The `n`-bit systematic codeword
    pub codeword: BitVec<u8, Msb0>,
    /// Generator coefficients without leading zeros
    pub generator: BitVec<u8, Msb0>,
    /// The `n - k` parity bits
    pub parity: BitVec<u8, Msb0>,
}

/// Successful decoding result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The corrected `n`-bit codeword
    pub codeword: BitVec<u8, Msb0>,
    /// Number of bits that were flipped to reach it
    pub errors_corrected: usize,
}

/// Systematically encode `message` with `generator` into an `n`-bit codeword.
///
/// The message is multiplied by x^deg(generator), the remainder modulo the
/// generator is added as parity, and the result is zero-extended on the
/// high-order side to `n` bits. The codeword is always a multiple of the
/// generator.
///
/// # Errors
///
/// `DivisionByZero` for an all-zero generator, `WidthTooSmall` when the
/// message and parity do not fit in `n` bits.
pub fn systematic_encode(
    message: &BitSlice<u8, Msb0>,
    generator: &Gf2Poly,
    n: usize,
) -> Result<Encoding> {
    let degree = generator.degree().ok_or(Error::DivisionByZero)?;

    let shifted = Gf2Poly::from_bits(message).shift_left(degree);
    let parity = shifted.rem(generator)?;
    let codeword = shifted.add(&parity).pad_to(n, PadSide::High)?;

    Ok(Encoding {
        codeword: codeword.into_bits(),
        generator: generator.trimmed().into_bits(),
        parity: parity.into_bits(),
    })
}

/// Correct up to `t` errors in `received` by cyclic error trapping.
///
/// The syndrome of the received word is computed at every cyclic rotation,
/// starting from the original alignment. The first rotation whose syndrome
/// has weight at most `t` has all of its errors inside the parity positions:
/// adding the syndrome removes them, and rotating back restores the original
/// alignment.
///
/// # Returns
///
/// `Ok(Some(decoded))` with the corrected word and the number of flipped
/// bits, or `Ok(None)` when no rotation traps the errors.
///
/// # Errors
///
/// `DivisionByZero` for an all-zero generator.
pub fn trapping_decode(
    received: &BitSlice<u8, Msb0>,
    generator: &Gf2Poly,
    t: usize,
) -> Result<Option<Decoded>> {
    let n = received.len();
    let original = Gf2Poly::from_bits(received);
    let mut current = original.clone();

    for shift in 0..n {
        let syndrome = current.rem(generator)?;
        let weight = syndrome.weight();
        trace!("shift {}: syndrome {} has weight {}", shift, syndrome, weight);

        if weight <= t {
            let corrected = current.add(&syndrome).pad_to(n, PadSide::High)?;
            let corrected = corrected.rotate_left(shift);
            debug!(
                "corrected {} bit errors after {} cyclic shifts",
                weight, shift
            );
            return Ok(Some(Decoded {
                codeword: corrected.into_bits(),
                errors_corrected: weight,
            }));
        }

        current = original.rotate_right(shift + 1);
    }

    debug!(
        "no cyclic shift of the {}-bit word trapped at most {} errors",
        n, t
    );
    Ok(None)
}

/// A BCH code instance bound to one parameter set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BchCode {
    params: CodeParams,
}

impl BchCode {
    /// Create a code from parameters
    pub fn new(params: CodeParams) -> Self {
        BchCode { params }
    }

    /// Create a code from raw parameters, validating them first
    pub fn from_parameters(n: usize, k: usize, t: usize, generator: Gf2Poly) -> Result<Self> {
        CodeParams::new(n, k, t, generator).map(Self::new)
    }

    /// BCH(7,4) code correcting 1 error
    pub fn bch_7_4() -> Self {
        Self::new(CodeParams::bch_7_4())
    }

    /// BCH(15,11) code correcting 1 error
    pub fn bch_15_11() -> Self {
        Self::new(CodeParams::bch_15_11())
    }

    /// BCH(15,7) code correcting 2 errors
    pub fn bch_15_7() -> Self {
        Self::new(CodeParams::bch_15_7())
    }

    /// BCH(15,5) code correcting 3 errors
    pub fn bch_15_5() -> Self {
        Self::new(CodeParams::bch_15_5())
    }

    /// BCH(31,6) code correcting 7 errors
    pub fn bch_31_6() -> Self {
        Self::new(CodeParams::bch_31_6())
    }

    /// BCH(127,8) code correcting 31 errors
    pub fn bch_127_8() -> Self {
        Self::new(CodeParams::bch_127_8())
    }

    /// Parameters of this code
    pub fn params(&self) -> &CodeParams {
        &self.params
    }

    /// Get the code length (n)
    pub fn code_length(&self) -> usize {
        self.params.n
    }

    /// Get the message length (k)
    pub fn data_length(&self) -> usize {
        self.params.k
    }

    /// Get the error correction capability (t)
    pub fn error_correction_capability(&self) -> usize {
        self.params.t
    }

    /// Encode a `k`-bit message into an `n`-bit codeword
    ///
    /// # Errors
    ///
    /// `InvalidLength` when the message is not exactly `k` bits.
    pub fn encode(&self, message: &BitSlice<u8, Msb0>) -> Result<BitVec<u8, Msb0>> {
        self.encode_detailed(message)
            .map(|encoding| encoding.codeword)
    }

    /// Encode a `k`-bit message, also returning the generator and parity bits
    pub fn encode_detailed(&self, message: &BitSlice<u8, Msb0>) -> Result<Encoding> {
        check_length(message, self.params.k)?;
        systematic_encode(message, &self.params.generator, self.params.n)
    }

    /// Decode an `n`-bit received word
    ///
    /// # Returns
    ///
    /// The corrected codeword and error count, or `None` when the errors
    /// cannot be corrected.
    ///
    /// # Errors
    ///
    /// `InvalidLength` when the word is not exactly `n` bits.
    pub fn decode(&self, received: &BitSlice<u8, Msb0>) -> Result<Option<Decoded>> {
        check_length(received, self.params.n)?;
        trapping_decode(received, &self.params.generator, self.params.t)
    }

    /// Syndrome of an `n`-bit word: its remainder modulo the generator, `n - k` bits wide
    pub fn syndrome(&self, word: &BitSlice<u8, Msb0>) -> Result<Gf2Poly> {
        check_length(word, self.params.n)?;
        Gf2Poly::from_bits(word).rem(&self.params.generator)
    }

    /// Whether an `n`-bit word is a multiple of the generator
    pub fn is_codeword(&self, word: &BitSlice<u8, Msb0>) -> Result<bool> {
        self.syndrome(word).map(|syndrome| syndrome.is_zero())
    }

    /// The message bits of an `n`-bit codeword (its high-order `k` bits)
    pub fn extract_message(&self, codeword: &BitSlice<u8, Msb0>) -> Result<BitVec<u8, Msb0>> {
        check_length(codeword, self.params.n)?;
        Ok(codeword[..self.params.k].to_bitvec())
    }

    /// Encode independent messages in parallel
    pub fn encode_blocks(&self, messages: &[BitVec<u8, Msb0>]) -> Result<Vec<BitVec<u8, Msb0>>> {
        messages
            .par_iter()
            .map(|message| self.encode(message))
            .collect()
    }

    /// Decode independent received words in parallel
    pub fn decode_blocks(&self, words: &[BitVec<u8, Msb0>]) -> Result<Vec<Option<Decoded>>> {
        words.par_iter().map(|word| self.decode(word)).collect()
    }
}

impl BlockCode for BchCode {
    fn n(&self) -> usize {
        self.params.n
    }

    fn k(&self) -> usize {
        self.params.k
    }

    fn t(&self) -> usize {
        self.params.t
    }

    fn encode(&self, message: &BitSlice<u8, Msb0>) -> Result<BitVec<u8, Msb0>> {
        BchCode::encode(self, message)
    }

    fn decode(&self, received: &BitSlice<u8, Msb0>) -> Result<Option<Decoded>> {
        BchCode::decode(self, received)
    }
}

impl Display for BchCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BCH({},{},{})",
            self.params.n, self.params.k, self.params.t
        )
    }
}

fn check_length(bits: &BitSlice<u8, Msb0>, expected: usize) -> Result<()> {
    if bits.len() != expected {
        return Err(Error::InvalidLength {
            expected,
            actual: bits.len(),
        });
    }
    Ok(())
}
