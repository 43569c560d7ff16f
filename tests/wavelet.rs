use imgtf::wavelet::{
    compress_by_threshold, decompose_1d, decompose_2d, high_pass, high_pass_filter, low_pass,
    low_pass_filter, multi_level_transform, reconstruct_1d, reconstruct_2d, threshold,
};
use imgtf::{RealMatrix, Transform2d, TransformError, WaveletEngine, WaveletSubbands};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_image(seed: u64, rows: usize, cols: usize) -> RealMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    RealMatrix::from_fn(rows, cols, |_, _| rng.gen_range(0.0..255.0))
}

#[test]
/// Even sizes that are not powers of two are accepted.
fn roundtrip_2d_even_sizes() {
    for (rows, cols) in [(2, 2), (8, 8), (6, 10), (4, 16)] {
        let image = random_image((rows * 100 + cols) as u64, rows, cols);
        let back = WaveletEngine.round_trip(&image).unwrap();
        let err = back.max_abs_diff(&image);
        assert!(err < 1e-8, "{}x{} error {}", rows, cols, err);
    }
}

#[test]
fn roundtrip_1d() {
    let x: Vec<f64> = (0..12).map(|i| (i as f64 * 0.7).sin() * 10.0).collect();
    let (approx, detail) = decompose_1d(&x).unwrap();
    assert_eq!(approx.len(), 6);
    assert_eq!(detail.len(), 6);
    let y = reconstruct_1d(&approx, &detail).unwrap();
    for (a, b) in x.iter().zip(y.iter()) {
        assert!((a - b).abs() < 1e-10);
    }
}

#[test]
fn reconstruct_1d_rejects_mismatched_halves() {
    assert_eq!(
        reconstruct_1d(&[1.0, 2.0], &[1.0]),
        Err(TransformError::DimensionMismatch {
            expected: (1, 2),
            found: (1, 1)
        })
    );
}

#[test]
fn constant_image_lands_in_approx() {
    let subbands = decompose_2d(&RealMatrix::filled(8, 8, 3.0)).unwrap();
    assert_eq!(subbands.approx.shape(), (4, 4));
    // the low-pass taps sum to sqrt(2) per axis
    assert!(subbands.approx.max_abs_diff(&RealMatrix::filled(4, 4, 6.0)) < 1e-12);
    assert!(subbands.horizontal.max_abs() < 1e-12);
    assert!(subbands.vertical.max_abs() < 1e-12);
    assert!(subbands.diagonal.max_abs() < 1e-12);
}

#[test]
fn subbands_follow_edge_orientation() {
    // left half dark, right half bright: a vertical edge shows up in the
    // horizontal-detail quadrant, which filters along rows
    let image = RealMatrix::from_fn(8, 8, |_, c| if c < 4 { 0.0 } else { 10.0 });
    let subbands = decompose_2d(&image).unwrap();
    assert!(subbands.horizontal.max_abs() > 1.0);
    assert!(subbands.vertical.max_abs() < 1e-12);
    assert!(subbands.diagonal.max_abs() < 1e-12);
}

#[test]
fn packed_layout_roundtrip() {
    let image = random_image(17, 6, 8);
    let subbands = decompose_2d(&image).unwrap();
    let packed = subbands.to_matrix().unwrap();
    assert_eq!(packed.shape(), (6, 8));
    assert_eq!(packed.get(0, 0), subbands.approx.get(0, 0));
    assert_eq!(packed.get(0, 4), subbands.horizontal.get(0, 0));
    assert_eq!(packed.get(3, 0), subbands.vertical.get(0, 0));
    assert_eq!(packed.get(5, 7), subbands.diagonal.get(2, 3));
    assert_eq!(WaveletSubbands::from_matrix(&packed).unwrap(), subbands);
}

#[test]
fn odd_dimensions_are_rejected() {
    assert_eq!(
        decompose_2d(&RealMatrix::zeros(3, 4)),
        Err(TransformError::OddDimensions { rows: 3, cols: 4 })
    );
    assert_eq!(
        WaveletSubbands::from_matrix(&RealMatrix::zeros(4, 5)),
        Err(TransformError::OddDimensions { rows: 4, cols: 5 })
    );
}

#[test]
fn inconsistent_subbands_are_rejected() {
    let mut subbands = decompose_2d(&RealMatrix::filled(4, 4, 1.0)).unwrap();
    subbands.diagonal = RealMatrix::zeros(3, 2);
    assert_eq!(
        reconstruct_2d(&subbands),
        Err(TransformError::DimensionMismatch {
            expected: (2, 2),
            found: (3, 2)
        })
    );
}

#[test]
fn threshold_zero_is_plain_roundtrip() {
    let _ = env_logger::builder().is_test(true).try_init();
    let image = random_image(23, 8, 8);
    let result = compress_by_threshold(&image, 0.0).unwrap();
    assert_eq!(result.zeroed, 0);
    assert_eq!(result.total, 64);
    assert!(result.image.max_abs_diff(&image) < 1e-8);
}

#[test]
fn threshold_one_zeroes_everything_but_the_peak() {
    let subbands = decompose_2d(&random_image(29, 4, 4)).unwrap();
    let (kept, zeroed) = threshold(&subbands, 1.0).unwrap();
    assert_eq!(zeroed, 15);
    let packed = kept.to_matrix().unwrap();
    assert_eq!(packed.as_slice().iter().filter(|v| **v != 0.0).count(), 1);
}

#[test]
fn threshold_above_one_zeroes_everything() {
    let subbands = decompose_2d(&random_image(53, 4, 4)).unwrap();
    let (kept, zeroed) = threshold(&subbands, 1.5).unwrap();
    assert_eq!(zeroed, 16);
    assert_eq!(kept.to_matrix().unwrap().max_abs(), 0.0);
}

#[test]
fn full_energy_low_pass_is_lossless() {
    let image = random_image(31, 8, 8);
    let filtered = low_pass_filter(&image, 1.0).unwrap();
    assert!(filtered.max_abs_diff(&image) < 1e-8);
}

#[test]
fn full_ratio_high_pass_is_lossless() {
    let image = random_image(37, 8, 8);
    let filtered = high_pass_filter(&image, 1.0).unwrap();
    assert!(filtered.max_abs_diff(&image) < 1e-8);
}

#[test]
fn energy_filters_split_around_the_crossover() {
    let subbands = decompose_2d(&random_image(41, 8, 8)).unwrap();
    let (low, low_zeroed) = low_pass(&subbands, 0.9).unwrap();
    let (high, high_zeroed) = high_pass(&subbands, 0.1).unwrap();
    assert!(low_zeroed > 0);
    assert!(high_zeroed > 0);

    let low = low.to_matrix().unwrap();
    let high = high.to_matrix().unwrap();
    let original = subbands.to_matrix().unwrap();
    // the crossover coefficient is kept by both
    let both = low
        .as_slice()
        .iter()
        .zip(high.as_slice())
        .filter(|(a, b)| **a != 0.0 && **b != 0.0)
        .count();
    assert_eq!(both, 1);
    // the low pass keeps the largest coefficient, the high pass drops it
    let peak = original.max_abs();
    assert_eq!(low.max_abs(), peak);
    assert!(high.max_abs() < peak);
}

#[test]
fn filters_reject_invalid_ratio() {
    let image = RealMatrix::filled(4, 4, 1.0);
    assert_eq!(
        low_pass_filter(&image, -0.5),
        Err(TransformError::InvalidParameter)
    );
    assert_eq!(
        compress_by_threshold(&image, f64::NAN),
        Err(TransformError::InvalidParameter)
    );
}

#[test]
fn multi_level_repeats_on_whole_matrix() {
    let image = random_image(43, 8, 8);
    let one = multi_level_transform(&image, 1).unwrap();
    assert_eq!(one.levels, 1);
    assert_eq!(
        one.coefficients,
        decompose_2d(&image).unwrap().to_matrix().unwrap()
    );

    let three = multi_level_transform(&image, 3).unwrap();
    assert_eq!(three.levels, 3);
    assert_eq!(three.coefficients.shape(), (8, 8));
}

#[test]
fn multi_level_stops_on_small_images() {
    let image = random_image(47, 2, 8);
    let result = multi_level_transform(&image, 4).unwrap();
    assert_eq!(result.levels, 0);
    assert_eq!(result.coefficients, image);

    let none = multi_level_transform(&RealMatrix::filled(8, 8, 1.0), 0).unwrap();
    assert_eq!(none.levels, 0);
}
