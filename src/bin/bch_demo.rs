use bch_codes::cs::ecc::bch::{BchCode, CodeParams};
use bch_codes::cs::ecc::channel::{transmit, ChannelModel};
use bch_codes::cs::ecc::gf2::Gf2Poly;
use bitvec::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn show(bits: &BitSlice<u8, Msb0>) -> String {
    Gf2Poly::from_bits(bits).to_string()
}

fn main() -> bch_codes::Result<()> {
    println!("Encoding, corrupting and decoding one block per preset code");

    let mut rng = ChaCha20Rng::seed_from_u64(2024);

    for params in CodeParams::standard_codes() {
        let code = BchCode::new(params);
        let message: BitVec<u8, Msb0> = (0..code.data_length())
            .map(|_| rng.gen::<bool>())
            .collect();

        let encoding = code.encode_detailed(&message)?;
        println!("\n{} (rate {:.3})", code, code.params().code_rate());
        println!("Message:   {}", show(&message));
        println!("Generator: {}", show(&encoding.generator));
        println!("Parity:    {}", show(&encoding.parity));

        let errors = code.error_correction_capability().min(2);
        let trial = transmit(&code, &message, ChannelModel::FixedCount(errors), &mut rng)?;
        println!("Codeword:  {}", show(&trial.codeword));
        println!(
            "Received:  {} ({} errors)",
            show(&trial.received),
            trial.injected_errors
        );

        match &trial.decoded {
            Some(decoded) => println!(
                "Decoded:   {} ({} errors corrected)",
                show(&decoded.codeword),
                decoded.errors_corrected
            ),
            None => println!("Decoded:   uncorrectable"),
        }

        if trial.is_recovered() {
            println!("Decoding successful");
        } else {
            println!("Decoding failed");
        }
    }

    Ok(())
}
