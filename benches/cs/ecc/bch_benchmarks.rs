use bch_codes::cs::ecc::bch::{BchCode, CodeParams};
use bitvec::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn pattern(len: usize) -> BitVec<u8, Msb0> {
    (0..len).map(|i| i % 3 != 1).collect()
}

fn flip(word: &BitSlice<u8, Msb0>, positions: impl Iterator<Item = usize>) -> BitVec<u8, Msb0> {
    let mut flipped = word.to_bitvec();
    for p in positions {
        let bit = !flipped[p];
        flipped.set(p, bit);
    }
    flipped
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("bch/encode");

    for params in CodeParams::standard_codes() {
        let code = BchCode::new(params);
        let message = pattern(code.data_length());
        group.bench_with_input(
            BenchmarkId::from_parameter(code.to_string()),
            &message,
            |b, message| b.iter(|| code.encode(black_box(message)).unwrap()),
        );
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("bch/decode");

    for params in CodeParams::standard_codes() {
        let code = BchCode::new(params);
        let codeword = code.encode(&pattern(code.data_length())).unwrap();

        // A burst of t errors at the high-order end needs the most cyclic shifts
        let received = flip(&codeword, 0..code.error_correction_capability());
        group.bench_with_input(
            BenchmarkId::from_parameter(code.to_string()),
            &received,
            |b, received| b.iter(|| code.decode(black_box(received)).unwrap()),
        );
    }

    group.finish();
}

fn bench_decode_blocks(c: &mut Criterion) {
    let code = BchCode::bch_31_6();
    let codeword = code.encode(&pattern(6)).unwrap();
    let words: Vec<_> = (0..256)
        .map(|i| flip(&codeword, (i % 25..).take(7)))
        .collect();

    c.bench_function("bch/decode_blocks/BCH(31,6,7)x256", |b| {
        b.iter(|| code.decode_blocks(black_box(&words)).unwrap())
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_decode_blocks);
criterion_main!(benches);
