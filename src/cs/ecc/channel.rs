//! Binary channel models for exercising block codes.
//!
//! Two error models are supported:
//! - a fixed number of distinct bit flips at uniformly chosen positions
//! - independent flips of every bit with a given bit error rate (BER)
//!
//! `transmit` runs one encode / corrupt / decode trial against any
//! `BlockCode`.

use crate::cs::ecc::bch::Decoded;
use crate::cs::ecc::{BlockCode, Result};
use crate::cs::error::Error;
use bitvec::prelude::*;
use log::trace;
use rand::seq::index;
use rand::Rng;

/// How a channel corrupts the bits sent through it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelModel {
    /// Flip exactly this many distinct bits
    FixedCount(usize),
    /// Flip each bit independently with this probability
    BitErrorRate(f64),
}

impl ChannelModel {
    /// Pass `bits` through the channel
    pub fn apply<R: Rng + ?Sized>(
        &self,
        bits: &BitSlice<u8, Msb0>,
        rng: &mut R,
    ) -> Result<BitVec<u8, Msb0>> {
        match *self {
            ChannelModel::FixedCount(count) => flip_fixed_count(bits, count, rng),
            ChannelModel::BitErrorRate(probability) => flip_by_rate(bits, probability, rng),
        }
    }
}

/// Flip exactly `count` distinct, uniformly chosen positions
///
/// # Errors
///
/// `InvalidInput` when `count` exceeds the number of bits.
pub fn flip_fixed_count<R: Rng + ?Sized>(
    bits: &BitSlice<u8, Msb0>,
    count: usize,
    rng: &mut R,
) -> Result<BitVec<u8, Msb0>> {
    if count > bits.len() {
        return Err(Error::InvalidInput(format!(
            "Cannot flip {} distinct bits in a {}-bit word",
            count,
            bits.len()
        )));
    }

    let mut flipped = bits.to_bitvec();
    for position in index::sample(rng, bits.len(), count) {
        let bit = !flipped[position];
        flipped.set(position, bit);
    }

    trace!("flipped {} of {} bits", count, bits.len());
    Ok(flipped)
}

/// Flip every bit independently with the given probability
///
/// # Errors
///
/// `InvalidInput` when the probability is not within `[0, 1]`.
pub fn flip_by_rate<R: Rng + ?Sized>(
    bits: &BitSlice<u8, Msb0>,
    probability: f64,
    rng: &mut R,
) -> Result<BitVec<u8, Msb0>> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(Error::InvalidInput(format!(
            "Bit error rate must be between 0 and 1, got {}",
            probability
        )));
    }

    let flipped: BitVec<u8, Msb0> = bits
        .iter()
        .by_vals()
        .map(|bit| bit ^ rng.gen_bool(probability))
        .collect();

    trace!("passed {} bits through a channel with BER {}", bits.len(), probability);
    Ok(flipped)
}

/// Number of positions at which two equal-length words differ
pub fn hamming_distance(a: &BitSlice<u8, Msb0>, b: &BitSlice<u8, Msb0>) -> Result<usize> {
    if a.len() != b.len() {
        return Err(Error::InvalidLength {
            expected: a.len(),
            actual: b.len(),
        });
    }

    Ok((a.to_bitvec() ^ b).count_ones())
}

/// Outcome of sending one message through a channel
#[derive(Debug, Clone, PartialEq)]
pub struct Transmission {
    /// The message that was sent
    pub message: BitVec<u8, Msb0>,
    /// The encoded message
    pub codeword: BitVec<u8, Msb0>,
    /// The codeword after the channel
    pub received: BitVec<u8, Msb0>,
    /// Number of bits the channel flipped
    pub injected_errors: usize,
    /// Decoder output, `None` when the word was uncorrectable
    pub decoded: Option<Decoded>,
}

impl Transmission {
    /// Whether the decoded codeword carries the message that was sent
    pub fn is_recovered(&self) -> bool {
        self.decoded.as_ref().is_some_and(|decoded| {
            decoded.codeword.len() >= self.message.len()
                && decoded.codeword[..self.message.len()] == self.message[..]
        })
    }
}

/// Encode `message`, pass it through `model`, and decode the result
pub fn transmit<C: BlockCode + ?Sized, R: Rng + ?Sized>(
    code: &C,
    message: &BitSlice<u8, Msb0>,
    model: ChannelModel,
    rng: &mut R,
) -> Result<Transmission> {
    let codeword = code.encode(message)?;
    let received = model.apply(&codeword, rng)?;
    let injected_errors = hamming_distance(&codeword, &received)?;
    let decoded = code.decode(&received)?;

    Ok(Transmission {
        message: message.to_bitvec(),
        codeword,
        received,
        injected_errors,
        decoded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::ecc::bch::BchCode;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_flip_fixed_count() {
        let mut rng = StdRng::seed_from_u64(3);
        let word = bitvec![u8, Msb0; 0; 31];

        for count in [0, 1, 7, 31] {
            let flipped = flip_fixed_count(&word, count, &mut rng).unwrap();
            assert_eq!(flipped.len(), 31);
            assert_eq!(hamming_distance(&word, &flipped).unwrap(), count);
        }

        assert!(matches!(
            flip_fixed_count(&word, 32, &mut rng),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_flip_fixed_count_positions_vary() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let word = bitvec![u8, Msb0; 0; 15];

        let mut hit = bitvec![u8, Msb0; 0; 15];
        for _ in 0..200 {
            let flipped = flip_fixed_count(&word, 1, &mut rng).unwrap();
            for position in flipped.iter_ones() {
                hit.set(position, true);
            }
        }
        assert!(hit.all());
    }

    #[test]
    fn test_flip_by_rate_extremes() {
        let mut rng = StdRng::seed_from_u64(5);
        let word = bitvec![u8, Msb0; 1, 0, 1, 1, 0, 0, 1];

        assert_eq!(flip_by_rate(&word, 0.0, &mut rng).unwrap(), word);
        assert_eq!(
            flip_by_rate(&word, 1.0, &mut rng).unwrap(),
            bitvec![u8, Msb0; 0, 1, 0, 0, 1, 1, 0]
        );

        assert!(flip_by_rate(&word, -0.1, &mut rng).is_err());
        assert!(flip_by_rate(&word, 1.5, &mut rng).is_err());
        assert!(flip_by_rate(&word, f64::NAN, &mut rng).is_err());
    }

    #[test]
    fn test_flip_by_rate_statistics() {
        let mut rng = StdRng::seed_from_u64(17);
        let word = BitVec::<u8, Msb0>::repeat(false, 10_000);

        let flipped = flip_by_rate(&word, 0.1, &mut rng).unwrap();
        let errors = flipped.count_ones();
        assert!((800..1200).contains(&errors), "errors = {}", errors);
    }

    #[test]
    fn test_hamming_distance() {
        let a = bitvec![u8, Msb0; 1, 0, 1, 1];
        let b = bitvec![u8, Msb0; 0, 0, 1, 0];
        assert_eq!(hamming_distance(&a, &b).unwrap(), 2);
        assert_eq!(hamming_distance(&a, &a).unwrap(), 0);
        assert!(matches!(
            hamming_distance(&a, &b[..3]),
            Err(Error::InvalidLength {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_transmit_within_radius() {
        let code = BchCode::bch_15_7();
        let mut rng = StdRng::seed_from_u64(99);
        let message = bitvec![u8, Msb0; 1, 0, 1, 0, 1, 0, 1];

        for _ in 0..50 {
            let trial = transmit(&code, &message, ChannelModel::FixedCount(2), &mut rng).unwrap();
            assert_eq!(trial.injected_errors, 2);
            assert!(trial.is_recovered());

            let decoded = trial.decoded.as_ref().unwrap();
            assert_eq!(decoded.codeword, trial.codeword);
            assert_eq!(decoded.errors_corrected, 2);
        }
    }

    #[test]
    fn test_transmit_noiseless_channel() {
        let code = BchCode::bch_31_6();
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let message = bitvec![u8, Msb0; 0, 1, 1, 0, 1, 0];

        let trial = transmit(&code, &message, ChannelModel::BitErrorRate(0.0), &mut rng).unwrap();
        assert_eq!(trial.received, trial.codeword);
        assert_eq!(trial.injected_errors, 0);
        assert!(trial.is_recovered());
    }

    #[test]
    fn test_transmit_unrecovered() {
        let code = BchCode::bch_15_7();
        let mut rng = StdRng::seed_from_u64(1);
        let message = bitvec![u8, Msb0; 0, 0, 0, 0, 0, 0, 0];

        // Every bit flipped: the all-ones word is a codeword of weight 15,
        // never the all-zero codeword that was sent
        let trial = transmit(&code, &message, ChannelModel::BitErrorRate(1.0), &mut rng).unwrap();
        assert_eq!(trial.injected_errors, 15);
        assert!(!trial.is_recovered());
    }

    #[test]
    fn test_transmit_rejects_bad_message() {
        let code = BchCode::bch_7_4();
        let mut rng = StdRng::seed_from_u64(2);
        let message = bitvec![u8, Msb0; 1, 0];

        assert!(matches!(
            transmit(&code, &message, ChannelModel::FixedCount(1), &mut rng),
            Err(Error::InvalidLength { .. })
        ));
    }
}
