//! Polynomial arithmetic over GF(2).
//!
//! A polynomial is stored as a bit vector, highest-order coefficient first.
//! Coefficients live in the two-element field, so addition is XOR and
//! multiplication is AND.
//!
//! The width of a polynomial (its number of stored coefficients) may exceed
//! its degree: codewords, parity words and syndromes are all kept at fixed
//! widths with leading zeros. Operations that produce a new polynomial state
//! the width of their result.
//!
//! # Examples
//!
//! ```
//! use bch_codes::cs::ecc::gf2::Gf2Poly;
//!
//! let dividend: Gf2Poly = "1001000".parse().unwrap();
//! let divisor: Gf2Poly = "1011".parse().unwrap();
//! let (quotient, remainder) = dividend.div_rem(&divisor).unwrap();
//!
//! assert_eq!(quotient.to_string(), "1010");
//! assert_eq!(remainder.to_string(), "110");
//! ```

use crate::cs::ecc::Result;
use crate::cs::error::Error;
use bitvec::prelude::*;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Side of a polynomial on which zero coefficients are added or removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadSide {
    /// Highest-order end (the start of the bit vector); preserves the value
    High,
    /// Lowest-order end (the end of the bit vector)
    Low,
}

/// Polynomial over GF(2) with most-significant coefficient first
///
/// Equality compares the stored coefficients, width included.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Gf2Poly {
    coeffs: BitVec<u8, Msb0>,
}

impl Gf2Poly {
    /// Wrap an owned coefficient vector
    pub fn new(coeffs: BitVec<u8, Msb0>) -> Self {
        Gf2Poly { coeffs }
    }

    /// Copy coefficients out of a bit slice
    pub fn from_bits(bits: &BitSlice<u8, Msb0>) -> Self {
        Gf2Poly {
            coeffs: bits.to_bitvec(),
        }
    }

    /// Build a polynomial from integer coefficients, reduced modulo 2
    pub fn from_coefficients(coeffs: &[u8]) -> Self {
        Gf2Poly {
            coeffs: coeffs.iter().map(|&c| c & 1 == 1).collect(),
        }
    }

    /// The zero polynomial stored at the given width
    pub fn zero(width: usize) -> Self {
        Gf2Poly {
            coeffs: BitVec::repeat(false, width),
        }
    }

    /// The monomial x^degree
    pub fn monomial(degree: usize) -> Self {
        let mut coeffs = BitVec::<u8, Msb0>::repeat(false, degree + 1);
        coeffs.set(0, true);
        Gf2Poly { coeffs }
    }

    /// Stored coefficients, highest order first
    pub fn as_bits(&self) -> &BitSlice<u8, Msb0> {
        &self.coeffs
    }

    /// Consume the polynomial, returning its coefficient vector
    pub fn into_bits(self) -> BitVec<u8, Msb0> {
        self.coeffs
    }

    /// Number of stored coefficients
    pub fn width(&self) -> usize {
        self.coeffs.len()
    }

    /// True when every coefficient is zero (including the empty polynomial)
    pub fn is_zero(&self) -> bool {
        self.coeffs.not_any()
    }

    /// Degree of the polynomial, or `None` for the zero polynomial
    pub fn degree(&self) -> Option<usize> {
        self.coeffs
            .first_one()
            .map(|index| self.coeffs.len() - 1 - index)
    }

    /// Number of nonzero coefficients
    pub fn weight(&self) -> usize {
        self.coeffs.count_ones()
    }

    /// Copy with leading zeros removed. The zero polynomial trims to width 1.
    pub fn trimmed(&self) -> Gf2Poly {
        match self.coeffs.first_one() {
            Some(index) => Gf2Poly::from_bits(&self.coeffs[index..]),
            None => Gf2Poly::zero(1),
        }
    }

    /// Sum of two polynomials.
    ///
    /// The narrower operand is zero-extended on its high-order side, so the
    /// result width is the larger of the two widths.
    pub fn add(&self, other: &Gf2Poly) -> Gf2Poly {
        let width = self.width().max(other.width());
        let mut coeffs = self.widened(width);
        let offset = width - other.width();

        for (i, bit) in other.coeffs.iter().by_vals().enumerate() {
            if bit {
                let sum = !coeffs[offset + i];
                coeffs.set(offset + i, sum);
            }
        }

        Gf2Poly { coeffs }
    }

    /// Product of two polynomials, of width `width(a) + width(b) - 1`.
    ///
    /// An empty operand yields the empty polynomial.
    pub fn multiply(&self, other: &Gf2Poly) -> Gf2Poly {
        if self.coeffs.is_empty() || other.coeffs.is_empty() {
            return Gf2Poly::default();
        }

        let mut coeffs = BitVec::<u8, Msb0>::repeat(false, self.width() + other.width() - 1);

        for i in self.coeffs.iter_ones() {
            for j in other.coeffs.iter_ones() {
                let product = !coeffs[i + j];
                coeffs.set(i + j, product);
            }
        }

        Gf2Poly { coeffs }
    }

    /// Quotient and remainder of modulo-2 long division.
    ///
    /// The remainder is always exactly `degree(divisor)` coefficients wide.
    /// The quotient is `width(self) - degree(divisor)` wide, or a single zero
    /// coefficient when the dividend is narrower than the divisor.
    ///
    /// # Errors
    ///
    /// `DivisionByZero` when the divisor has no nonzero coefficient.
    pub fn div_rem(&self, divisor: &Gf2Poly) -> Result<(Gf2Poly, Gf2Poly)> {
        let degree = divisor.degree().ok_or(Error::DivisionByZero)?;
        let divisor = divisor.trimmed();

        if self.width() <= degree {
            return Ok((Gf2Poly::zero(1), Gf2Poly::new(self.widened(degree))));
        }

        let steps = self.width() - degree;
        let mut work = self.coeffs.clone();
        let mut quotient = BitVec::<u8, Msb0>::repeat(false, steps);

        for i in 0..steps {
            if !work[i] {
                continue;
            }

            quotient.set(i, true);
            for j in divisor.coeffs.iter_ones() {
                let reduced = !work[i + j];
                work.set(i + j, reduced);
            }
        }

        let remainder = work.split_off(steps);
        Ok((Gf2Poly::new(quotient), Gf2Poly::new(remainder)))
    }

    /// Remainder of division by `divisor`, `degree(divisor)` coefficients wide
    pub fn rem(&self, divisor: &Gf2Poly) -> Result<Gf2Poly> {
        self.div_rem(divisor).map(|(_, remainder)| remainder)
    }

    /// Multiply by x^by, appending `by` zero coefficients on the low-order side
    pub fn shift_left(&self, by: usize) -> Gf2Poly {
        let mut coeffs = self.coeffs.clone();
        coeffs.resize(self.width() + by, false);
        Gf2Poly { coeffs }
    }

    /// Zero-extend or trim to exactly `width` coefficients on the given side.
    ///
    /// # Errors
    ///
    /// `WidthTooSmall` when trimming would drop a nonzero coefficient.
    pub fn pad_to(&self, width: usize, side: PadSide) -> Result<Gf2Poly> {
        let len = self.width();

        if width >= len {
            let coeffs = match side {
                PadSide::High => self.widened(width),
                PadSide::Low => {
                    let mut coeffs = self.coeffs.clone();
                    coeffs.resize(width, false);
                    coeffs
                }
            };
            return Ok(Gf2Poly { coeffs });
        }

        let excess = len - width;
        let (dropped, kept, required) = match side {
            PadSide::High => (
                &self.coeffs[..excess],
                &self.coeffs[excess..],
                self.coeffs.first_one().map_or(0, |index| len - index),
            ),
            PadSide::Low => (
                &self.coeffs[width..],
                &self.coeffs[..width],
                self.coeffs.last_one().map_or(0, |index| index + 1),
            ),
        };

        if dropped.any() {
            return Err(Error::WidthTooSmall { width, required });
        }

        Ok(Gf2Poly::from_bits(kept))
    }

    /// Cyclic rotation towards the low-order end.
    ///
    /// Rotating right by one moves the lowest-order coefficient to the
    /// highest-order position.
    pub fn rotate_right(&self, by: usize) -> Gf2Poly {
        let mut coeffs = self.coeffs.clone();
        if !coeffs.is_empty() {
            let by = by % coeffs.len();
            coeffs.rotate_right(by);
        }
        Gf2Poly { coeffs }
    }

    /// Cyclic rotation towards the high-order end, the inverse of `rotate_right`
    pub fn rotate_left(&self, by: usize) -> Gf2Poly {
        let mut coeffs = self.coeffs.clone();
        if !coeffs.is_empty() {
            let by = by % coeffs.len();
            coeffs.rotate_left(by);
        }
        Gf2Poly { coeffs }
    }

    /// Coefficients zero-extended on the high-order side to `width`.
    /// Callers guarantee `width >= self.width()`.
    fn widened(&self, width: usize) -> BitVec<u8, Msb0> {
        let mut coeffs = BitVec::<u8, Msb0>::repeat(false, width - self.width());
        coeffs.extend_from_bitslice(&self.coeffs);
        coeffs
    }
}

impl From<BitVec<u8, Msb0>> for Gf2Poly {
    fn from(coeffs: BitVec<u8, Msb0>) -> Self {
        Gf2Poly::new(coeffs)
    }
}

impl Display for Gf2Poly {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for bit in self.coeffs.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Gf2Poly {
    type Err = Error;

    /// Parse a string of `0` and `1` characters, highest order first
    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(Error::InvalidInput(format!(
                    "Invalid bit character '{}' in polynomial string",
                    other
                ))),
            })
            .collect::<Result<BitVec<u8, Msb0>>>()
            .map(Gf2Poly::new)
    }
}
