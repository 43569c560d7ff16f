//! Fast Fourier Transform (FFT) engine.
//!
//! The 1D kernel is the recursive radix-2 decimation-in-time
//! [Cooley–Tukey algorithm](https://en.wikipedia.org/wiki/Cooley%E2%80%93Tukey_FFT_algorithm);
//! the inverse uses the conjugate trick. The 2D transform is separable: every
//! row, then every column via a transpose. All lengths must be powers of two.
//!
//! Spectra are returned in the natural (unshifted) layout with DC at `(0, 0)`.
//! [`shift_spectrum`] swaps quadrants to centre DC for display or for the
//! radial filters.

use alloc::vec::Vec;

use crate::compress::{zero_below, Compression};
use crate::error::{check_ratio, TransformError};
use crate::matrix::{ComplexMatrix, Matrix, RealMatrix};
use crate::num::{Complex64, Float};
use crate::Transform2d;

/// Forward 1D FFT of a power-of-two length sequence.
pub fn fft_1d(input: &[Complex64]) -> Result<Vec<Complex64>, TransformError> {
    check_len(input.len())?;
    Ok(fft_recursive(input))
}

/// Inverse 1D FFT, scaled by `1/N`.
pub fn ifft_1d(input: &[Complex64]) -> Result<Vec<Complex64>, TransformError> {
    check_len(input.len())?;
    Ok(ifft_unchecked(input))
}

fn check_len(n: usize) -> Result<(), TransformError> {
    if n == 0 {
        Err(TransformError::EmptyInput)
    } else if !n.is_power_of_two() {
        Err(TransformError::NonPowerOfTwo { rows: 1, cols: n })
    } else {
        Ok(())
    }
}

fn fft_recursive(x: &[Complex64]) -> Vec<Complex64> {
    let n = x.len();
    if n <= 1 {
        return x.to_vec();
    }
    let half = n / 2;
    let even: Vec<Complex64> = x.iter().step_by(2).copied().collect();
    let odd: Vec<Complex64> = x.iter().skip(1).step_by(2).copied().collect();
    let even = fft_recursive(&even);
    let odd = fft_recursive(&odd);

    let mut out = alloc::vec![Complex64::zero(); n];
    let step = -2.0 * core::f64::consts::PI / n as f64;
    for k in 0..half {
        let t = Complex64::from_polar(1.0, step * k as f64) * odd[k];
        out[k] = even[k] + t;
        out[k + half] = even[k] - t;
    }
    out
}

fn ifft_unchecked(x: &[Complex64]) -> Vec<Complex64> {
    let conj: Vec<Complex64> = x.iter().map(|z| z.conj()).collect();
    let scale = 1.0 / x.len() as f64;
    fft_recursive(&conj)
        .into_iter()
        .map(|z| z.conj().scale(scale))
        .collect()
}

/// Forward 2D FFT of a real matrix with power-of-two dimensions.
pub fn fft_2d(image: &RealMatrix) -> Result<ComplexMatrix, TransformError> {
    image.require_power_of_two()?;
    Ok(image.to_complex().separable(fft_recursive))
}

/// Inverse 2D FFT. The imaginary residue is discarded without validation.
pub fn ifft_2d(freq: &ComplexMatrix) -> Result<RealMatrix, TransformError> {
    freq.require_power_of_two()?;
    Ok(freq.separable(ifft_unchecked).re())
}

/// Per-coefficient magnitude `|X|`.
pub fn magnitude_spectrum(freq: &ComplexMatrix) -> RealMatrix {
    freq.map(|z| z.norm())
}

/// Per-coefficient phase, mapped from `[-π, π]` to `[0, 1]`.
pub fn phase_spectrum(freq: &ComplexMatrix) -> RealMatrix {
    let pi = core::f64::consts::PI;
    freq.map(|z| (z.arg() + pi) / (2.0 * pi))
}

/// `ln(1 + |X|)` with DC moved to the centre, for display.
pub fn log_magnitude_spectrum(freq: &ComplexMatrix) -> RealMatrix {
    shift_spectrum(&freq.map(|z| Float::ln_1p(z.norm())))
}

/// Swap quadrants so that index `(0, 0)` lands at `(rows/2, cols/2)`.
///
/// Self-inverse for even dimensions, which covers every power-of-two size
/// above one.
pub fn shift_spectrum<T: Copy>(m: &Matrix<T>) -> Matrix<T> {
    let (rows, cols) = m.shape();
    let (hr, hc) = (rows / 2, cols / 2);
    Matrix::from_fn(rows, cols, |r, c| {
        m.get((r + rows - hr) % rows, (c + cols - hc) % cols)
    })
}

fn distance_from_centre(rows: usize, cols: usize, r: usize, c: usize) -> f64 {
    let dy = r as f64 - (rows / 2) as f64;
    let dx = c as f64 - (cols / 2) as f64;
    Float::sqrt(dy * dy + dx * dx)
}

fn radial_mask(
    freq: &ComplexMatrix,
    cutoff: f64,
    zero_if: impl Fn(f64, f64) -> bool,
) -> Result<ComplexMatrix, TransformError> {
    freq.require_non_empty()?;
    check_ratio(cutoff)?;
    let (rows, cols) = freq.shape();
    let mut out = freq.clone();
    for r in 0..rows {
        for c in 0..cols {
            if zero_if(distance_from_centre(rows, cols, r, c), cutoff) {
                out.set(r, c, Complex64::zero());
            }
        }
    }
    Ok(out)
}

/// Zero every coefficient farther than `cutoff` from `(rows/2, cols/2)`.
///
/// Operates on the layout it is given; no quadrant shift is applied. On the
/// natural layout from [`fft_2d`] the centre is the highest frequency, so
/// callers wanting a classic low-pass shift first (see [`low_pass_filter`]).
pub fn low_pass(freq: &ComplexMatrix, cutoff: f64) -> Result<ComplexMatrix, TransformError> {
    radial_mask(freq, cutoff, |dist, cutoff| dist > cutoff)
}

/// Zero every coefficient closer than `cutoff` to `(rows/2, cols/2)`.
///
/// Same layout caveat as [`low_pass`].
pub fn high_pass(freq: &ComplexMatrix, cutoff: f64) -> Result<ComplexMatrix, TransformError> {
    radial_mask(freq, cutoff, |dist, cutoff| dist < cutoff)
}

/// Filter radius for an image-level ratio: `floor(min(rows/2, cols/2) · ratio)`.
pub fn radius_for_ratio(rows: usize, cols: usize, ratio: f64) -> f64 {
    libm::floor((rows / 2).min(cols / 2) as f64 * ratio)
}

fn filter_centred(
    image: &RealMatrix,
    ratio: f64,
    mask: fn(&ComplexMatrix, f64) -> Result<ComplexMatrix, TransformError>,
    label: &str,
) -> Result<RealMatrix, TransformError> {
    check_ratio(ratio)?;
    let freq = fft_2d(image)?;
    let radius = radius_for_ratio(freq.rows(), freq.cols(), ratio);
    log::debug!("fft {}: radius {} (ratio {})", label, radius, ratio);
    let filtered = mask(&shift_spectrum(&freq), radius)?;
    ifft_2d(&shift_spectrum(&filtered))
}

/// Transform, keep frequencies within the ratio-derived radius of DC, invert.
pub fn low_pass_filter(image: &RealMatrix, ratio: f64) -> Result<RealMatrix, TransformError> {
    filter_centred(image, ratio, low_pass, "low-pass")
}

/// Transform, drop frequencies within the ratio-derived radius of DC, invert.
///
/// Uses the strict `dist < radius` test of [`high_pass`], so a radius of 0
/// (ratio 0, or a ratio too small to reach 1) keeps DC and returns the image
/// unchanged.
pub fn high_pass_filter(image: &RealMatrix, ratio: f64) -> Result<RealMatrix, TransformError> {
    filter_centred(image, ratio, high_pass, "high-pass")
}

/// Rebuild coefficients from a magnitude and a `[0, 1]`-normalised phase
/// spectrum and invert them.
pub fn reconstruct_from_spectrum(
    magnitude: &RealMatrix,
    phase: &RealMatrix,
) -> Result<RealMatrix, TransformError> {
    magnitude.require_power_of_two()?;
    phase.require_shape(magnitude.shape())?;
    let pi = core::f64::consts::PI;
    let freq = Matrix::from_fn(magnitude.rows(), magnitude.cols(), |r, c| {
        let theta = phase.get(r, c) * 2.0 * pi - pi;
        Complex64::from_polar(magnitude.get(r, c), theta)
    });
    ifft_2d(&freq)
}

/// Zero real and imaginary parts below `ratio` times their plane's largest
/// absolute value, then invert.
///
/// The two planes are thresholded independently, so the rate is counted over
/// `2 · rows · cols` entries.
pub fn compress_by_threshold(image: &RealMatrix, ratio: f64) -> Result<Compression, TransformError> {
    check_ratio(ratio)?;
    let freq = fft_2d(image)?;
    let mut re = freq.re();
    let mut im = freq.im();
    let re_threshold = re.max_abs() * ratio;
    let im_threshold = im.max_abs() * ratio;
    let zeroed = zero_below(re.as_mut_slice(), re_threshold)
        + zero_below(im.as_mut_slice(), im_threshold);
    let compressed = Matrix::from_fn(freq.rows(), freq.cols(), |r, c| {
        Complex64::new(re.get(r, c), im.get(r, c))
    });
    let result = Compression {
        image: ifft_2d(&compressed)?,
        zeroed,
        total: 2 * freq.len(),
    };
    log::debug!(
        "fft threshold compression: {:.2}% zeroed (ratio {})",
        result.rate() * 100.0,
        ratio
    );
    Ok(result)
}

/// Fourier engine: [`fft_2d`] / [`ifft_2d`].
#[derive(Clone, Copy, Debug, Default)]
pub struct FourierEngine;

impl Transform2d for FourierEngine {
    type Coefficients = ComplexMatrix;

    fn transform(&self, image: &RealMatrix) -> Result<ComplexMatrix, TransformError> {
        fft_2d(image)
    }

    fn inverse_transform(&self, coeffs: &ComplexMatrix) -> Result<RealMatrix, TransformError> {
        ifft_2d(coeffs)
    }
}


#[cfg(all(feature = "internal-tests", test))]
mod prop_tests {
    use super::*;
    use alloc::format;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_fft_ifft_roundtrip(log_n in 0usize..7, ref seed in proptest::collection::vec(-100.0f64..100.0, 128)) {
            let n = 1usize << log_n;
            let x: Vec<Complex64> = seed.iter().take(n).map(|&v| Complex64::new(v, -v / 2.0)).collect();
            let y = ifft_1d(&fft_1d(&x).unwrap()).unwrap();
            for (a, b) in x.iter().zip(y.iter()) {
                prop_assert!((a.re - b.re).abs() < 1e-9 && (a.im - b.im).abs() < 1e-9);
            }
        }
    }
}
