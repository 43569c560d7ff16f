//! Discrete Cosine Transform (DCT) engine
//! Orthonormal DCT-II forward / DCT-III inverse over real matrices of any
//! non-empty size. Direct `O(N²)` summation, no fast algorithm.
//!
//! Coefficients are corner-ordered: `(0, 0)` is DC and frequency grows toward
//! the bottom-right.

use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::PI;
use hashbrown::HashMap;

use crate::compress::{keep_top_left, scaled, zero_below, Compression};
use crate::error::{check_ratio, TransformError};
use crate::matrix::RealMatrix;
use crate::num::Float;
use crate::Transform2d;

/// Orthonormal weight `c_k`: `sqrt(1/N)` for DC, `sqrt(2/N)` otherwise.
fn weight(k: usize, n: usize) -> f64 {
    if k == 0 {
        Float::sqrt(1.0 / n as f64)
    } else {
        Float::sqrt(2.0 / n as f64)
    }
}

/// Weighted basis `c_k · cos(πk(2i+1) / 2N)`.
fn basis(k: usize, i: usize, n: usize) -> f64 {
    let angle = PI * k as f64 * (2 * i + 1) as f64 / (2 * n) as f64;
    weight(k, n) * libm::cos(angle)
}

/// Weighted cosine tables keyed by length.
///
/// One planner lives for the duration of a single 2D transform so the row and
/// column passes share tables; nothing is cached across calls.
#[derive(Default)]
pub struct DctPlanner {
    cache: HashMap<usize, Vec<f64>>,
}

impl DctPlanner {
    /// Create a new empty planner
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with `table[k * n + i] = c_k · cos(πk(2i+1) / 2N)`.
    pub fn table(&mut self, n: usize) -> &[f64] {
        self.cache
            .entry(n)
            .or_insert_with(|| {
                let mut table = vec![0.0; n * n];
                for k in 0..n {
                    for i in 0..n {
                        table[k * n + i] = basis(k, i, n);
                    }
                }
                table
            })
            .as_slice()
    }

    fn forward(&mut self, input: &[f64]) -> Vec<f64> {
        let n = input.len();
        let table = self.table(n);
        (0..n)
            .map(|k| {
                input
                    .iter()
                    .zip(&table[k * n..(k + 1) * n])
                    .map(|(x, b)| x * b)
                    .sum()
            })
            .collect()
    }

    fn inverse(&mut self, input: &[f64]) -> Vec<f64> {
        let n = input.len();
        let table = self.table(n);
        (0..n)
            .map(|i| {
                input
                    .iter()
                    .enumerate()
                    .map(|(k, x)| x * table[k * n + i])
                    .sum()
            })
            .collect()
    }
}

/// Orthonormal DCT-II: `y[k] = c_k Σ x[n] cos(πk(2n+1) / 2N)`.
pub fn dct_1d(input: &[f64]) -> Result<Vec<f64>, TransformError> {
    let n = input.len();
    if n == 0 {
        return Err(TransformError::EmptyInput);
    }
    let mut output = vec![0.0; n];
    for (k, out) in output.iter_mut().enumerate() {
        let mut sum = 0.0;
        for (i, &x) in input.iter().enumerate() {
            sum += x * basis(k, i, n);
        }
        *out = sum;
    }
    Ok(output)
}

/// Orthonormal DCT-III, the inverse of [`dct_1d`].
pub fn idct_1d(input: &[f64]) -> Result<Vec<f64>, TransformError> {
    let n = input.len();
    if n == 0 {
        return Err(TransformError::EmptyInput);
    }
    let mut output = vec![0.0; n];
    for (i, out) in output.iter_mut().enumerate() {
        let mut sum = 0.0;
        for (k, &x) in input.iter().enumerate() {
            sum += x * basis(k, i, n);
        }
        *out = sum;
    }
    Ok(output)
}

/// Separable 2D DCT.
pub fn dct_2d(image: &RealMatrix) -> Result<RealMatrix, TransformError> {
    image.require_non_empty()?;
    let mut planner = DctPlanner::new();
    Ok(image.separable(|row| planner.forward(row)))
}

/// Separable 2D inverse DCT.
pub fn idct_2d(coeffs: &RealMatrix) -> Result<RealMatrix, TransformError> {
    coeffs.require_non_empty()?;
    let mut planner = DctPlanner::new();
    Ok(coeffs.separable(|row| planner.inverse(row)))
}

/// Square cutoff `floor(min(rows, cols) · ratio)` used by both filters.
pub fn cutoff_for_ratio(rows: usize, cols: usize, ratio: f64) -> usize {
    scaled(rows.min(cols), ratio)
}

/// Keep the low-frequency block: zero every coefficient with
/// `row >= cutoff` or `col >= cutoff`.
pub fn low_pass(dct: &RealMatrix, ratio: f64) -> Result<RealMatrix, TransformError> {
    dct.require_non_empty()?;
    check_ratio(ratio)?;
    let cutoff = cutoff_for_ratio(dct.rows(), dct.cols(), ratio);
    let mut out = dct.clone();
    keep_top_left(&mut out, cutoff, cutoff);
    Ok(out)
}

/// Zero the top-left `cutoff × cutoff` block and keep everything else.
///
/// The mask is defined as that square block, not derived from
/// [`low_pass`]; both use the same `min(rows, cols)`-based cutoff.
pub fn high_pass(dct: &RealMatrix, ratio: f64) -> Result<RealMatrix, TransformError> {
    dct.require_non_empty()?;
    check_ratio(ratio)?;
    let cutoff = cutoff_for_ratio(dct.rows(), dct.cols(), ratio);
    let mut out = dct.clone();
    for r in 0..cutoff.min(out.rows()) {
        for c in 0..cutoff.min(out.cols()) {
            out.set(r, c, 0.0);
        }
    }
    Ok(out)
}

/// `|coefficient|`.
pub fn magnitude_spectrum(dct: &RealMatrix) -> RealMatrix {
    dct.map(<f64 as Float>::abs)
}

/// Sign as phase: `0` for non-negative coefficients, `1` for negative ones.
pub fn phase_spectrum(dct: &RealMatrix) -> RealMatrix {
    dct.map(|v| if v >= 0.0 { 0.0 } else { 1.0 })
}

/// Restore signed coefficients (`phase > 0.5` means negative) and invert.
pub fn reconstruct_from_spectrum(
    magnitude: &RealMatrix,
    phase: &RealMatrix,
) -> Result<RealMatrix, TransformError> {
    magnitude.require_non_empty()?;
    phase.require_shape(magnitude.shape())?;
    let signed = RealMatrix::from_fn(magnitude.rows(), magnitude.cols(), |r, c| {
        if phase.get(r, c) > 0.5 {
            -magnitude.get(r, c)
        } else {
            magnitude.get(r, c)
        }
    });
    idct_2d(&signed)
}

/// Transform, [`low_pass`], invert.
pub fn low_pass_filter(image: &RealMatrix, ratio: f64) -> Result<RealMatrix, TransformError> {
    let dct = dct_2d(image)?;
    let filtered = low_pass(&dct, ratio)?;
    log::debug!(
        "dct low-pass: keeping {0}x{0} block (ratio {1})",
        cutoff_for_ratio(dct.rows(), dct.cols(), ratio),
        ratio
    );
    idct_2d(&filtered)
}

/// Transform, [`high_pass`], invert.
pub fn high_pass_filter(image: &RealMatrix, ratio: f64) -> Result<RealMatrix, TransformError> {
    let dct = dct_2d(image)?;
    let filtered = high_pass(&dct, ratio)?;
    log::debug!(
        "dct high-pass: removing {0}x{0} block (ratio {1})",
        cutoff_for_ratio(dct.rows(), dct.cols(), ratio),
        ratio
    );
    idct_2d(&filtered)
}

/// Keep the top-left `floor(rows·ratio) × floor(cols·ratio)` block.
pub fn compress_by_region(image: &RealMatrix, ratio: f64) -> Result<Compression, TransformError> {
    check_ratio(ratio)?;
    let mut coeffs = dct_2d(image)?;
    let (keep_rows, keep_cols) = (scaled(coeffs.rows(), ratio), scaled(coeffs.cols(), ratio));
    let zeroed = keep_top_left(&mut coeffs, keep_rows, keep_cols);
    let result = Compression {
        image: idct_2d(&coeffs)?,
        zeroed,
        total: coeffs.len(),
    };
    log::debug!(
        "dct region compression: {:.2}% zeroed",
        result.rate() * 100.0
    );
    Ok(result)
}

/// Zero coefficients with `|v| < max|v| · ratio`.
pub fn compress_by_threshold(image: &RealMatrix, ratio: f64) -> Result<Compression, TransformError> {
    check_ratio(ratio)?;
    let mut coeffs = dct_2d(image)?;
    let threshold = coeffs.max_abs() * ratio;
    let zeroed = zero_below(coeffs.as_mut_slice(), threshold);
    let result = Compression {
        image: idct_2d(&coeffs)?,
        zeroed,
        total: coeffs.len(),
    };
    log::debug!(
        "dct threshold compression: {:.2}% zeroed",
        result.rate() * 100.0
    );
    Ok(result)
}

/// Cosine engine: [`dct_2d`] / [`idct_2d`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CosineEngine;

impl Transform2d for CosineEngine {
    type Coefficients = RealMatrix;

    fn transform(&self, image: &RealMatrix) -> Result<RealMatrix, TransformError> {
        dct_2d(image)
    }

    fn inverse_transform(&self, coeffs: &RealMatrix) -> Result<RealMatrix, TransformError> {
        idct_2d(coeffs)
    }
}


#[cfg(all(feature = "internal-tests", test))]
mod prop_tests {
    use super::*;
    use alloc::format;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_dct_idct_roundtrip(len in 1usize..24, ref signal in proptest::collection::vec(-1000.0f64..1000.0, 24)) {
            let x: Vec<f64> = signal.iter().take(len).cloned().collect();
            let z = idct_1d(&dct_1d(&x).unwrap()).unwrap();
            for (a, b) in x.iter().zip(z.iter()) {
                prop_assert!((a - b).abs() < 1e-8, "{} vs {}", a, b);
            }
        }
    }
}
