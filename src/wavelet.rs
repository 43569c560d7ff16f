//! Wavelet Transform module
//! Single-level two-band decomposition with a fixed 8-tap orthogonal filter
//! pair (Daubechies, four vanishing moments) and periodic boundaries.
//!
//! In 2D the rows are split first, then the columns, giving four quadrant
//! subbands. Their packed layout is
//!
//! ```text
//! +-------------+-------------+
//! | approx      | horizontal  |
//! +-------------+-------------+
//! | vertical    | diagonal    |
//! +-------------+-------------+
//! ```

#![allow(clippy::excessive_precision)]

use alloc::vec;
use alloc::vec::Vec;

use crate::compress::{energy_threshold, zero_above, zero_below, Compression};
use crate::error::{check_ratio, TransformError};
use crate::matrix::RealMatrix;
use crate::Transform2d;

/// Number of filter taps.
pub const TAPS: usize = 8;

/// Analysis low-pass filter.
pub const LOW_PASS: [f64; TAPS] = [
    0.2303778133088965,
    0.7148465705529157,
    0.6308807679298589,
    -0.027983769416859854,
    -0.18703481171909309,
    0.030841381835560764,
    0.0328830116668852,
    -0.010597401785069032,
];

/// Analysis high-pass filter, the quadrature mirror of [`LOW_PASS`]:
/// `HIGH_PASS[k] = (-1)^k · LOW_PASS[7 - k]`.
pub const HIGH_PASS: [f64; TAPS] = [
    -0.010597401785069032,
    -0.0328830116668852,
    0.030841381835560764,
    0.18703481171909309,
    -0.027983769416859854,
    -0.6308807679298589,
    0.7148465705529157,
    -0.2303778133088965,
];

fn analyze(signal: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = signal.len();
    let half = n / 2;
    let mut approx = vec![0.0; half];
    let mut detail = vec![0.0; half];
    for i in 0..half {
        for k in 0..TAPS {
            let x = signal[(2 * i + k) % n];
            approx[i] += LOW_PASS[k] * x;
            detail[i] += HIGH_PASS[k] * x;
        }
    }
    (approx, detail)
}

/// Transpose of [`analyze`]: upsample and convolve with the same filters.
///
/// Even outputs take the even taps and odd outputs the odd taps, both walking
/// the coefficients backwards through the circular index `(i - p) mod half`.
fn synthesize(approx: &[f64], detail: &[f64]) -> Vec<f64> {
    let half = approx.len() as isize;
    let mut output = vec![0.0; approx.len() * 2];
    for i in 0..half {
        let (mut even, mut odd) = (0.0, 0.0);
        for p in 0..(TAPS / 2) as isize {
            let k = (i - p).rem_euclid(half) as usize;
            let e = 2 * p as usize;
            even += approx[k] * LOW_PASS[e] + detail[k] * HIGH_PASS[e];
            odd += approx[k] * LOW_PASS[e + 1] + detail[k] * HIGH_PASS[e + 1];
        }
        output[2 * i as usize] = even;
        output[2 * i as usize + 1] = odd;
    }
    output
}

fn analyze_packed(signal: &[f64]) -> Vec<f64> {
    let (mut approx, detail) = analyze(signal);
    approx.extend(detail);
    approx
}

fn synthesize_packed(coeffs: &[f64]) -> Vec<f64> {
    let (approx, detail) = coeffs.split_at(coeffs.len() / 2);
    synthesize(approx, detail)
}

/// Split `signal` into approximation and detail halves.
pub fn decompose_1d(signal: &[f64]) -> Result<(Vec<f64>, Vec<f64>), TransformError> {
    if signal.is_empty() {
        return Err(TransformError::EmptyInput);
    }
    if signal.len() % 2 != 0 {
        return Err(TransformError::OddDimensions {
            rows: 1,
            cols: signal.len(),
        });
    }
    Ok(analyze(signal))
}

/// Inverse of [`decompose_1d`].
pub fn reconstruct_1d(approx: &[f64], detail: &[f64]) -> Result<Vec<f64>, TransformError> {
    if approx.is_empty() {
        return Err(TransformError::EmptyInput);
    }
    if approx.len() != detail.len() {
        return Err(TransformError::DimensionMismatch {
            expected: (1, approx.len()),
            found: (1, detail.len()),
        });
    }
    Ok(synthesize(approx, detail))
}

/// The four quadrant subbands of one 2D decomposition level.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveletSubbands {
    pub approx: RealMatrix,
    pub horizontal: RealMatrix,
    pub vertical: RealMatrix,
    pub diagonal: RealMatrix,
}

impl WaveletSubbands {
    /// Shared subband shape, or an error if the four disagree.
    pub fn shape(&self) -> Result<(usize, usize), TransformError> {
        self.approx.require_non_empty()?;
        let shape = self.approx.shape();
        self.horizontal.require_shape(shape)?;
        self.vertical.require_shape(shape)?;
        self.diagonal.require_shape(shape)?;
        Ok(shape)
    }

    /// Pack into one `2·rows × 2·cols` matrix (see module docs for layout).
    pub fn to_matrix(&self) -> Result<RealMatrix, TransformError> {
        let (hr, hc) = self.shape()?;
        Ok(RealMatrix::from_fn(2 * hr, 2 * hc, |r, c| {
            match (r < hr, c < hc) {
                (true, true) => self.approx.get(r, c),
                (true, false) => self.horizontal.get(r, c - hc),
                (false, true) => self.vertical.get(r - hr, c),
                (false, false) => self.diagonal.get(r - hr, c - hc),
            }
        }))
    }

    /// Unpack a matrix laid out by [`WaveletSubbands::to_matrix`].
    pub fn from_matrix(packed: &RealMatrix) -> Result<Self, TransformError> {
        packed.require_even()?;
        let (hr, hc) = (packed.rows() / 2, packed.cols() / 2);
        let quadrant = |r0: usize, c0: usize| {
            RealMatrix::from_fn(hr, hc, |r, c| packed.get(r0 + r, c0 + c))
        };
        Ok(Self {
            approx: quadrant(0, 0),
            horizontal: quadrant(0, hc),
            vertical: quadrant(hr, 0),
            diagonal: quadrant(hr, hc),
        })
    }
}

/// Rows first, then columns. Both dimensions must be even.
pub fn decompose_2d(image: &RealMatrix) -> Result<WaveletSubbands, TransformError> {
    image.require_even()?;
    WaveletSubbands::from_matrix(&image.separable(analyze_packed))
}

/// Columns first, then rows. Fails if the subbands are not all the same size.
pub fn reconstruct_2d(subbands: &WaveletSubbands) -> Result<RealMatrix, TransformError> {
    let packed = subbands.to_matrix()?;
    let columns_done = packed.transpose().map_rows(synthesize_packed).transpose();
    Ok(columns_done.map_rows(synthesize_packed))
}

/// Keep coefficients at or above `max|v| · ratio` across all four subbands.
pub fn threshold(subbands: &WaveletSubbands, ratio: f64) -> Result<(WaveletSubbands, usize), TransformError> {
    check_ratio(ratio)?;
    let mut packed = subbands.to_matrix()?;
    let cutoff = packed.max_abs() * ratio;
    let zeroed = zero_below(packed.as_mut_slice(), cutoff);
    Ok((WaveletSubbands::from_matrix(&packed)?, zeroed))
}

/// Keep the largest coefficients that together carry `ratio` of the energy.
///
/// Zeroes everything strictly below the crossover magnitude found by
/// [`energy_threshold`].
pub fn low_pass(subbands: &WaveletSubbands, ratio: f64) -> Result<(WaveletSubbands, usize), TransformError> {
    check_ratio(ratio)?;
    let mut packed = subbands.to_matrix()?;
    let cutoff = energy_threshold(packed.as_slice(), ratio);
    let zeroed = zero_below(packed.as_mut_slice(), cutoff);
    log::debug!("wavelet low-pass: threshold {} zeroed {}", cutoff, zeroed);
    Ok((WaveletSubbands::from_matrix(&packed)?, zeroed))
}

/// Drop the largest coefficients, keeping roughly `ratio` of the energy in
/// the small ones.
///
/// The crossover is taken at `1 - ratio` of the energy and the comparison is
/// flipped: everything strictly above it is zeroed. This is not the mask of
/// [`low_pass`] inverted; the crossover coefficient survives both.
pub fn high_pass(subbands: &WaveletSubbands, ratio: f64) -> Result<(WaveletSubbands, usize), TransformError> {
    check_ratio(ratio)?;
    let mut packed = subbands.to_matrix()?;
    let cutoff = energy_threshold(packed.as_slice(), 1.0 - ratio);
    let zeroed = zero_above(packed.as_mut_slice(), cutoff);
    log::debug!("wavelet high-pass: threshold {} zeroed {}", cutoff, zeroed);
    Ok((WaveletSubbands::from_matrix(&packed)?, zeroed))
}

fn round_trip_with(
    image: &RealMatrix,
    policy: impl FnOnce(&WaveletSubbands) -> Result<(WaveletSubbands, usize), TransformError>,
) -> Result<Compression, TransformError> {
    let subbands = decompose_2d(image)?;
    let (kept, zeroed) = policy(&subbands)?;
    Ok(Compression {
        image: reconstruct_2d(&kept)?,
        zeroed,
        total: image.len(),
    })
}

/// Decompose, [`threshold`], reconstruct.
pub fn compress_by_threshold(image: &RealMatrix, ratio: f64) -> Result<Compression, TransformError> {
    let result = round_trip_with(image, |s| threshold(s, ratio))?;
    log::debug!(
        "wavelet threshold compression: {:.2}% zeroed",
        result.rate() * 100.0
    );
    Ok(result)
}

/// Decompose, [`low_pass`], reconstruct.
pub fn low_pass_filter(image: &RealMatrix, ratio: f64) -> Result<RealMatrix, TransformError> {
    Ok(round_trip_with(image, |s| low_pass(s, ratio))?.image)
}

/// Decompose, [`high_pass`], reconstruct.
pub fn high_pass_filter(image: &RealMatrix, ratio: f64) -> Result<RealMatrix, TransformError> {
    Ok(round_trip_with(image, |s| high_pass(s, ratio))?.image)
}

/// Output of [`multi_level_transform`].
#[derive(Clone, Debug, PartialEq)]
pub struct MultiLevel {
    /// Packed coefficients after the last level that ran.
    pub coefficients: RealMatrix,
    /// Levels actually applied.
    pub levels: usize,
}

/// Apply the packed 2D decomposition to the whole matrix `levels` times,
/// stopping early once either dimension is below 4.
pub fn multi_level_transform(image: &RealMatrix, levels: usize) -> Result<MultiLevel, TransformError> {
    image.require_non_empty()?;
    let mut current = image.clone();
    let mut done = 0;
    while done < levels {
        let (rows, cols) = current.shape();
        if rows < 4 || cols < 4 {
            log::debug!(
                "wavelet level {} skipped: {}x{} is too small",
                done + 1,
                rows,
                cols
            );
            break;
        }
        current = decompose_2d(&current)?.to_matrix()?;
        done += 1;
        log::trace!("wavelet level {} done ({}x{})", done, rows, cols);
    }
    Ok(MultiLevel {
        coefficients: current,
        levels: done,
    })
}

/// Wavelet engine: [`decompose_2d`] / [`reconstruct_2d`].
#[derive(Clone, Copy, Debug, Default)]
pub struct WaveletEngine;

impl Transform2d for WaveletEngine {
    type Coefficients = WaveletSubbands;

    fn transform(&self, image: &RealMatrix) -> Result<WaveletSubbands, TransformError> {
        decompose_2d(image)
    }

    fn inverse_transform(&self, coeffs: &WaveletSubbands) -> Result<RealMatrix, TransformError> {
        reconstruct_2d(coeffs)
    }
}


#[cfg(all(feature = "internal-tests", test))]
mod prop_tests {
    use super::*;
    use alloc::format;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_wavelet_roundtrip(half in 1usize..16, ref signal in proptest::collection::vec(-1000.0f64..1000.0, 32)) {
            let x: Vec<f64> = signal.iter().take(2 * half).cloned().collect();
            let (a, d) = decompose_1d(&x).unwrap();
            let y = reconstruct_1d(&a, &d).unwrap();
            for (p, q) in x.iter().zip(y.iter()) {
                prop_assert!((p - q).abs() < 1e-8, "{} vs {}", p, q);
            }
        }
    }
}
