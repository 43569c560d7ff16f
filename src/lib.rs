//! # imgtf - Time-frequency transforms for 2D images
//!
//! Four separable transform engines over rectangular real matrices, with
//! filtering and lossy compression built on each of them.
//!
//! ## Features
//!
//! - **Fourier**: radix-2 FFT, magnitude / phase / log spectra, radial low- and
//!   high-pass filters, reconstruction from magnitude and phase
//! - **Cosine**: orthonormal DCT-II / DCT-III of any size, block filters,
//!   sign-as-phase spectra
//! - **Walsh-Hadamard**: fast natural-order WHT with threshold, top-K and
//!   region compression
//! - **Wavelet**: 8-tap orthogonal filter bank, four-subband decomposition,
//!   energy-based filters, repeated multi-level decomposition
//! - **`no_std` + `alloc`** core
//!
//! ## Cargo Features
//!
//! - `std` (default): `std::error::Error` for [`TransformError`]
//! - `internal-tests`: property tests inside the library modules
//!
//! ## Quick start
//!
//! ```
//! use imgtf::{CosineEngine, RealMatrix, Transform2d};
//!
//! let image = RealMatrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
//! let coeffs = CosineEngine.transform(&image).unwrap();
//! let back = CosineEngine.inverse_transform(&coeffs).unwrap();
//! assert!(back.max_abs_diff(&image) < 1e-9);
//! ```
//!
//! All operations borrow their input and return fresh matrices; nothing is
//! modified in place and no state survives between calls.

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Real and complex scalars
pub mod num;

/// Row-major rectangular matrices and shape checks
pub mod matrix;

/// Error type shared by every engine
pub mod error;

/// Coefficient selection policies and compression reports
pub mod compress;

/// Fast Fourier Transform (FFT)
///
/// Radix-2 FFT, spectra and radial filters. Power-of-two dimensions only.
pub mod fft;

/// Discrete Cosine Transform (DCT)
///
/// Orthonormal DCT-II forward and DCT-III inverse for any size.
pub mod dct;

/// Walsh-Hadamard Transform (WHT)
///
/// Fast in-order butterflies, power-of-two dimensions only.
pub mod hadamard;

/// Wavelet transforms
///
/// 8-tap orthogonal decomposition into approximation and detail subbands.
pub mod wavelet;

pub use compress::{Compression, RankedCoefficient};
pub use dct::CosineEngine;
pub use error::TransformError;
pub use fft::FourierEngine;
pub use hadamard::HadamardEngine;
pub use matrix::{ComplexMatrix, Matrix, RealMatrix};
pub use num::{Complex, Complex32, Complex64, Float};
pub use wavelet::{WaveletEngine, WaveletSubbands};

/// A reversible 2D transform.
///
/// Implementors are stateless unit structs; each call validates its input
/// and allocates its own output.
pub trait Transform2d {
    /// Coefficient representation produced by [`Transform2d::transform`].
    type Coefficients;

    /// Forward transform.
    fn transform(&self, image: &RealMatrix) -> Result<Self::Coefficients, TransformError>;

    /// Inverse transform.
    fn inverse_transform(&self, coeffs: &Self::Coefficients) -> Result<RealMatrix, TransformError>;

    /// Forward then inverse.
    fn round_trip(&self, image: &RealMatrix) -> Result<RealMatrix, TransformError> {
        self.inverse_transform(&self.transform(image)?)
    }
}
