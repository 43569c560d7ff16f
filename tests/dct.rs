use imgtf::dct::{
    compress_by_region, compress_by_threshold, cutoff_for_ratio, dct_1d, dct_2d, high_pass,
    high_pass_filter, idct_1d, idct_2d, low_pass, low_pass_filter, magnitude_spectrum,
    phase_spectrum, reconstruct_from_spectrum,
};
use imgtf::{CosineEngine, RealMatrix, Transform2d, TransformError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_image(seed: u64, rows: usize, cols: usize) -> RealMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    RealMatrix::from_fn(rows, cols, |_, _| rng.gen_range(-128.0..128.0))
}

fn count_nonzero(m: &RealMatrix) -> usize {
    m.as_slice().iter().filter(|v| **v != 0.0).count()
}

#[test]
fn dct_1d_dc_term() {
    let y = dct_1d(&[1.0, 2.0, 3.0, 4.0]).unwrap();
    assert!((y[0] - 5.0).abs() < 1e-12);
    let x = idct_1d(&y).unwrap();
    for (a, b) in x.iter().zip([1.0, 2.0, 3.0, 4.0].iter()) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
fn dct_2d_roundtrip_any_size() {
    for (rows, cols) in [(1, 1), (3, 5), (7, 4), (16, 16)] {
        let image = random_image(rows as u64 * 31 + cols as u64, rows, cols);
        let back = CosineEngine.round_trip(&image).unwrap();
        assert!(
            back.max_abs_diff(&image) < 1e-9,
            "{}x{} error {}",
            rows,
            cols,
            back.max_abs_diff(&image)
        );
    }
}

#[test]
fn dct_2d_preserves_energy() {
    let image = random_image(3, 6, 10);
    let coeffs = dct_2d(&image).unwrap();
    assert!((coeffs.energy() - image.energy()).abs() < 1e-6 * image.energy());
}

#[test]
fn dct_2d_constant_is_pure_dc() {
    let coeffs = dct_2d(&RealMatrix::filled(4, 4, 2.0)).unwrap();
    assert!((coeffs.get(0, 0) - 8.0).abs() < 1e-12);
    assert!(coeffs.max_abs_diff(&RealMatrix::from_fn(4, 4, |r, c| {
        if r == 0 && c == 0 {
            8.0
        } else {
            0.0
        }
    })) < 1e-12);
}

#[test]
fn dct_rejects_empty() {
    assert_eq!(dct_2d(&RealMatrix::zeros(0, 3)), Err(TransformError::EmptyInput));
    assert_eq!(idct_2d(&RealMatrix::zeros(2, 0)), Err(TransformError::EmptyInput));
}

#[test]
fn cutoff_follows_smaller_side() {
    assert_eq!(cutoff_for_ratio(4, 8, 0.5), 2);
    assert_eq!(cutoff_for_ratio(10, 10, 0.25), 2);
    assert_eq!(cutoff_for_ratio(10, 10, 0.0), 0);
}

#[test]
fn low_pass_keeps_square_block() {
    let coeffs = RealMatrix::filled(4, 6, 1.0);
    let out = low_pass(&coeffs, 0.5).unwrap();
    assert_eq!(count_nonzero(&out), 4);
    assert_eq!(out.get(1, 1), 1.0);
    assert_eq!(out.get(1, 2), 0.0);
    assert_eq!(count_nonzero(&coeffs), 24);
}

#[test]
fn high_pass_zeroes_square_block() {
    let coeffs = RealMatrix::filled(4, 6, 1.0);
    let out = high_pass(&coeffs, 0.5).unwrap();
    assert_eq!(count_nonzero(&out), 20);
    assert_eq!(out.get(0, 0), 0.0);
    assert_eq!(out.get(0, 2), 1.0);
}

#[test]
fn image_filters_on_constant_image() {
    let _ = env_logger::builder().is_test(true).try_init();
    let image = RealMatrix::filled(4, 4, 5.0);
    let low = low_pass_filter(&image, 0.25).unwrap();
    assert!(low.max_abs_diff(&image) < 1e-9);
    let high = high_pass_filter(&image, 0.25).unwrap();
    assert!(high.max_abs() < 1e-9);
}

#[test]
fn sign_spectrum_roundtrip() {
    let image = random_image(5, 5, 7);
    let coeffs = dct_2d(&image).unwrap();
    let magnitude = magnitude_spectrum(&coeffs);
    let phase = phase_spectrum(&coeffs);
    assert!(phase.as_slice().iter().all(|p| *p == 0.0 || *p == 1.0));
    let back = reconstruct_from_spectrum(&magnitude, &phase).unwrap();
    assert!(back.max_abs_diff(&image) < 1e-9);
}

#[test]
fn region_compression_counts_outside_block() {
    let image = random_image(9, 4, 6);
    let result = compress_by_region(&image, 0.5).unwrap();
    assert_eq!(result.zeroed, 18);
    assert_eq!(result.total, 24);
    assert_eq!(result.rate(), 0.75);

    let full = compress_by_region(&image, 1.0).unwrap();
    assert_eq!(full.zeroed, 0);
    assert!(full.image.max_abs_diff(&image) < 1e-9);
}

#[test]
fn threshold_zero_is_plain_roundtrip() {
    let image = random_image(13, 8, 8);
    let result = compress_by_threshold(&image, 0.0).unwrap();
    assert_eq!(result.zeroed, 0);
    assert!(result.image.max_abs_diff(&image) < 1e-9);
}

#[test]
fn threshold_one_keeps_only_the_largest() {
    let image = RealMatrix::filled(4, 4, 1.0);
    let result = compress_by_threshold(&image, 1.0).unwrap();
    assert_eq!(result.zeroed, 15);
    assert!(result.image.max_abs_diff(&image) < 1e-9);
}

#[test]
fn filters_reject_invalid_ratio() {
    let coeffs = RealMatrix::filled(2, 2, 1.0);
    assert_eq!(low_pass(&coeffs, -1.0), Err(TransformError::InvalidParameter));
    assert_eq!(
        compress_by_region(&coeffs, f64::INFINITY),
        Err(TransformError::InvalidParameter)
    );
}
