//! Walsh-Hadamard Transform (WHT) engine
//! Natural-order fast WHT over power-of-two lengths: butterflies of `a + b`,
//! `a - b` with no twiddle factors.
//!
//! Scaling is asymmetric. The forward pass is unnormalised, so a
//! constant sequence of ones collapses to `[N, 0, ...]`; the inverse halves
//! every butterfly stage, which folds the whole `1/N` into the inverse.

use alloc::vec::Vec;

use crate::compress::{keep_top_k, keep_top_left, scaled, zero_below, Compression};
use crate::error::{check_ratio, TransformError};
use crate::matrix::RealMatrix;
use crate::Transform2d;

fn check_len(n: usize) -> Result<(), TransformError> {
    if n == 0 {
        Err(TransformError::EmptyInput)
    } else if !n.is_power_of_two() {
        Err(TransformError::NonPowerOfTwo { rows: 1, cols: n })
    } else {
        Ok(())
    }
}

fn forward_unchecked(input: &[f64]) -> Vec<f64> {
    let mut y = input.to_vec();
    let n = y.len();
    let mut span = 1;
    while span < n {
        for start in (0..n).step_by(2 * span) {
            for i in start..start + span {
                let (a, b) = (y[i], y[i + span]);
                y[i] = a + b;
                y[i + span] = a - b;
            }
        }
        span *= 2;
    }
    y
}

fn inverse_unchecked(input: &[f64]) -> Vec<f64> {
    let mut y = input.to_vec();
    let mut span = y.len() / 2;
    while span >= 1 {
        for start in (0..y.len()).step_by(2 * span) {
            for i in start..start + span {
                let (a, b) = (y[i], y[i + span]);
                y[i] = (a + b) / 2.0;
                y[i + span] = (a - b) / 2.0;
            }
        }
        span /= 2;
    }
    y
}

/// Unnormalised forward WHT.
pub fn wht_1d(input: &[f64]) -> Result<Vec<f64>, TransformError> {
    check_len(input.len())?;
    Ok(forward_unchecked(input))
}

/// Inverse WHT: descending spans, each output pair halved.
pub fn iwht_1d(input: &[f64]) -> Result<Vec<f64>, TransformError> {
    check_len(input.len())?;
    Ok(inverse_unchecked(input))
}

/// Separable 2D WHT; both dimensions must be powers of two.
pub fn wht_2d(image: &RealMatrix) -> Result<RealMatrix, TransformError> {
    image.require_power_of_two()?;
    Ok(image.separable(forward_unchecked))
}

/// Separable 2D inverse WHT.
pub fn iwht_2d(coeffs: &RealMatrix) -> Result<RealMatrix, TransformError> {
    coeffs.require_power_of_two()?;
    Ok(coeffs.separable(inverse_unchecked))
}

fn finish(
    coeffs: &RealMatrix,
    zeroed: usize,
    policy: &str,
) -> Result<Compression, TransformError> {
    let result = Compression {
        image: iwht_2d(coeffs)?,
        zeroed,
        total: coeffs.len(),
    };
    log::debug!(
        "wht {} compression: {:.2}% zeroed",
        policy,
        result.rate() * 100.0
    );
    Ok(result)
}

/// Zero coefficients with `|v| < max|v| · ratio`.
pub fn compress_by_threshold(image: &RealMatrix, ratio: f64) -> Result<Compression, TransformError> {
    check_ratio(ratio)?;
    let mut coeffs = wht_2d(image)?;
    let threshold = coeffs.max_abs() * ratio;
    let zeroed = zero_below(coeffs.as_mut_slice(), threshold);
    finish(&coeffs, zeroed, "threshold")
}

/// Keep the `k` largest-magnitude coefficients; ties keep scan order.
pub fn compress_by_top_coefficients(
    image: &RealMatrix,
    k: usize,
) -> Result<Compression, TransformError> {
    let coeffs = wht_2d(image)?;
    let (kept, zeroed) = keep_top_k(&coeffs, k);
    finish(&kept, zeroed, "top-k")
}

/// Keep the top-left `floor(rows·ratio) × floor(cols·ratio)` block.
pub fn compress_by_region(image: &RealMatrix, ratio: f64) -> Result<Compression, TransformError> {
    check_ratio(ratio)?;
    let mut coeffs = wht_2d(image)?;
    let (keep_rows, keep_cols) = (scaled(coeffs.rows(), ratio), scaled(coeffs.cols(), ratio));
    let zeroed = keep_top_left(&mut coeffs, keep_rows, keep_cols);
    finish(&coeffs, zeroed, "region")
}

/// Hadamard engine: [`wht_2d`] / [`iwht_2d`].
#[derive(Clone, Copy, Debug, Default)]
pub struct HadamardEngine;

impl Transform2d for HadamardEngine {
    type Coefficients = RealMatrix;

    fn transform(&self, image: &RealMatrix) -> Result<RealMatrix, TransformError> {
        wht_2d(image)
    }

    fn inverse_transform(&self, coeffs: &RealMatrix) -> Result<RealMatrix, TransformError> {
        iwht_2d(coeffs)
    }
}


#[cfg(all(feature = "internal-tests", test))]
mod prop_tests {
    use super::*;
    use alloc::format;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_wht_roundtrip(log_n in 0usize..8, ref signal in proptest::collection::vec(-1000.0f64..1000.0, 128)) {
            let x: Vec<f64> = signal.iter().take(1 << log_n).cloned().collect();
            let z = iwht_1d(&wht_1d(&x).unwrap()).unwrap();
            for (a, b) in x.iter().zip(z.iter()) {
                prop_assert!((a - b).abs() < 1e-9, "{} vs {}", a, b);
            }
        }
    }
}
