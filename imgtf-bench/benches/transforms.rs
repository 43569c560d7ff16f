use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use imgtf::{CosineEngine, FourierEngine, HadamardEngine, RealMatrix, Transform2d, WaveletEngine};

const SIZES: [usize; 3] = [32, 64, 128];

fn random_image(size: usize) -> RealMatrix {
    let mut rng = StdRng::seed_from_u64(size as u64);
    RealMatrix::from_fn(size, size, |_, _| rng.gen_range(0.0..255.0))
}

fn bench_engine<E: Transform2d>(c: &mut Criterion, name: &str, engine: E) {
    let mut group = c.benchmark_group(name);
    for &size in &SIZES {
        let image = random_image(size);
        group.bench_with_input(BenchmarkId::new("forward", size), &image, |b, image| {
            b.iter(|| engine.transform(black_box(image)).unwrap())
        });
        let coeffs = engine.transform(&image).unwrap();
        group.bench_with_input(BenchmarkId::new("inverse", size), &coeffs, |b, coeffs| {
            b.iter(|| engine.inverse_transform(black_box(coeffs)).unwrap())
        });
    }
    group.finish();
}

fn bench_transforms(c: &mut Criterion) {
    bench_engine(c, "fft_2d", FourierEngine);
    bench_engine(c, "dct_2d", CosineEngine);
    bench_engine(c, "wht_2d", HadamardEngine);
    bench_engine(c, "wavelet_2d", WaveletEngine);
}

criterion_group!(benches, bench_transforms);
criterion_main!(benches);
