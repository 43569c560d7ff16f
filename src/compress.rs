//! Coefficient selection policies shared by the engines.
//!
//! Every compression entry point follows the same shape: transform, clone the
//! coefficients, zero a subset chosen by one of the policies below, invert.
//! The policies mutate only the clone they are handed.

use alloc::vec::Vec;

use crate::matrix::RealMatrix;
use crate::num::Float;

/// Result of a lossy round trip.
#[derive(Clone, Debug, PartialEq)]
pub struct Compression {
    /// Reconstructed signal.
    pub image: RealMatrix,
    /// Coefficients zeroed by the policy.
    pub zeroed: usize,
    /// Coefficients the policy considered.
    pub total: usize,
}

impl Compression {
    /// Fraction of coefficients that were zeroed, in `[0, 1]`.
    pub fn rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.zeroed as f64 / self.total as f64
        }
    }
}

/// One coefficient of a ranking pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankedCoefficient {
    pub row: usize,
    pub col: usize,
    pub magnitude: f64,
    pub value: f64,
}

/// All coefficients sorted by magnitude, largest first.
///
/// The sort is stable, so equal magnitudes keep row-major scan order.
pub fn rank_coefficients(coeffs: &RealMatrix) -> Vec<RankedCoefficient> {
    let mut ranked: Vec<RankedCoefficient> = coeffs
        .as_slice()
        .iter()
        .enumerate()
        .map(|(i, &value)| RankedCoefficient {
            row: i / coeffs.cols(),
            col: i % coeffs.cols(),
            magnitude: Float::abs(value),
            value,
        })
        .collect();
    ranked.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));
    ranked
}

/// Zero every coefficient with `|v| < threshold`. Returns how many matched.
pub(crate) fn zero_below(values: &mut [f64], threshold: f64) -> usize {
    let mut zeroed = 0;
    for v in values.iter_mut() {
        if Float::abs(*v) < threshold {
            *v = 0.0;
            zeroed += 1;
        }
    }
    zeroed
}

/// Zero every coefficient with `|v| > threshold`. Returns how many matched.
pub(crate) fn zero_above(values: &mut [f64], threshold: f64) -> usize {
    let mut zeroed = 0;
    for v in values.iter_mut() {
        if Float::abs(*v) > threshold {
            *v = 0.0;
            zeroed += 1;
        }
    }
    zeroed
}

/// Keep only the top-left `keep_rows × keep_cols` block.
pub(crate) fn keep_top_left(coeffs: &mut RealMatrix, keep_rows: usize, keep_cols: usize) -> usize {
    let mut zeroed = 0;
    for r in 0..coeffs.rows() {
        for c in 0..coeffs.cols() {
            if r >= keep_rows || c >= keep_cols {
                coeffs.set(r, c, 0.0);
                zeroed += 1;
            }
        }
    }
    zeroed
}

/// Keep the `k` largest-magnitude coefficients, zero the rest.
pub(crate) fn keep_top_k(coeffs: &RealMatrix, k: usize) -> (RealMatrix, usize) {
    let ranked = rank_coefficients(coeffs);
    let keep = k.min(ranked.len());
    let mut out = RealMatrix::zeros(coeffs.rows(), coeffs.cols());
    for rc in &ranked[..keep] {
        out.set(rc.row, rc.col, rc.value);
    }
    (out, ranked.len() - keep)
}

/// `floor(len · ratio)`, saturating at `usize::MAX`.
pub(crate) fn scaled(len: usize, ratio: f64) -> usize {
    let v = len as f64 * ratio;
    if v >= usize::MAX as f64 {
        usize::MAX
    } else {
        v as usize
    }
}

/// Magnitude at which the running energy of the sorted coefficients first
/// reaches `fraction` of the total energy.
///
/// Coefficients are visited largest first and their squares accumulated; the
/// magnitude of the coefficient that crosses the target is returned. Returns
/// `0.0` if the target is never reached.
pub fn energy_threshold(values: &[f64], fraction: f64) -> f64 {
    let mut magnitudes: Vec<f64> = values.iter().map(|&v| Float::abs(v)).collect();
    magnitudes.sort_by(|a, b| b.total_cmp(a));
    let total: f64 = magnitudes.iter().map(|m| m * m).sum();
    let target = total * fraction;
    let mut running = 0.0;
    for m in magnitudes {
        running += m * m;
        if running >= target {
            return m;
        }
    }
    0.0
}
