//! Dense row-major matrices shared by every engine.
//!
//! A [`Matrix`] is rectangular by construction: the only constructors that
//! accept nested rows check every row length. Deep copies are plain
//! [`Clone`]s; the engines clone coefficients before zeroing so the caller's
//! matrix is never mutated.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::TransformError;
use crate::num::{Complex64, Float};

/// Rectangular `rows × cols` grid stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Real-valued signal or coefficient matrix.
pub type RealMatrix = Matrix<f64>;
/// Complex coefficient matrix produced by the Fourier engine.
pub type ComplexMatrix = Matrix<Complex64>;

impl<T: Copy> Matrix<T> {
    /// Matrix of `rows × cols` copies of `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Wrap a row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, TransformError> {
        if data.len() != rows * cols {
            return Err(TransformError::DimensionMismatch {
                expected: (rows, cols),
                found: (data.len() / cols.max(1), cols),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build from nested rows, rejecting jagged input.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, TransformError> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(TransformError::RaggedRows {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Build by evaluating `f(row, col)` for every cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    #[inline(always)]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Copy out column `col`.
    pub fn column(&self, col: usize) -> Vec<T> {
        (0..self.rows).map(|r| self.get(r, col)).collect()
    }

    /// Nested-row copy, mostly useful for printing and tests.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.data.chunks(self.cols.max(1)).map(|r| r.to_vec()).collect()
    }

    pub fn transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |r, c| self.get(c, r))
    }

    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Matrix<U> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Replace every row with `f(row)`; `f` must preserve the length.
    pub(crate) fn map_rows(&self, mut f: impl FnMut(&[T]) -> Vec<T>) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for r in 0..self.rows {
            let out = f(self.row(r));
            debug_assert_eq!(out.len(), self.cols);
            data.extend(out);
        }
        Self {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    /// Row pass, transpose, row pass, transpose back.
    ///
    /// Applying a 1D kernel this way is equivalent to running it over every
    /// row and then every column.
    pub(crate) fn separable(&self, mut f: impl FnMut(&[T]) -> Vec<T>) -> Self {
        let rows_done = self.map_rows(&mut f);
        rows_done.transpose().map_rows(&mut f).transpose()
    }

    pub(crate) fn require_non_empty(&self) -> Result<(), TransformError> {
        if self.rows == 0 || self.cols == 0 {
            Err(TransformError::EmptyInput)
        } else {
            Ok(())
        }
    }

    pub(crate) fn require_power_of_two(&self) -> Result<(), TransformError> {
        self.require_non_empty()?;
        if self.rows.is_power_of_two() && self.cols.is_power_of_two() {
            Ok(())
        } else {
            Err(TransformError::NonPowerOfTwo {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub(crate) fn require_even(&self) -> Result<(), TransformError> {
        self.require_non_empty()?;
        if self.rows % 2 == 0 && self.cols % 2 == 0 {
            Ok(())
        } else {
            Err(TransformError::OddDimensions {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub(crate) fn require_shape(&self, expected: (usize, usize)) -> Result<(), TransformError> {
        if self.shape() == expected {
            Ok(())
        } else {
            Err(TransformError::DimensionMismatch {
                expected,
                found: self.shape(),
            })
        }
    }
}

impl RealMatrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0.0)
    }

    /// Largest absolute value, `0.0` for an empty matrix.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0, |m, &v| m.max(Float::abs(v)))
    }

    /// Sum of squared entries.
    pub fn energy(&self) -> f64 {
        self.data.iter().map(|&v| v * v).sum()
    }

    /// Largest absolute elementwise difference against `other`.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        self.data
            .iter()
            .zip(other.data.iter())
            .fold(0.0, |m, (&a, &b)| m.max(Float::abs(a - b)))
    }

    /// Embed as complex values with zero imaginary part.
    pub fn to_complex(&self) -> ComplexMatrix {
        self.map(|v| Complex64::new(v, 0.0))
    }
}

impl ComplexMatrix {
    /// Real parts; imaginary parts are discarded.
    pub fn re(&self) -> RealMatrix {
        self.map(|z| z.re)
    }

    /// Imaginary parts.
    pub fn im(&self) -> RealMatrix {
        self.map(|z| z.im)
    }
}

/// Smallest power of two `>= n` (`1` for `n == 0`).
pub fn next_power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// Zero-pad `input` into the top-left corner of a square matrix whose side is
/// the next power of two of the larger dimension.
pub fn pad_to_power_of_two(input: &RealMatrix) -> Result<RealMatrix, TransformError> {
    input.require_non_empty()?;
    let size = next_power_of_two(input.rows().max(input.cols()));
    Ok(RealMatrix::from_fn(size, size, |r, c| {
        if r < input.rows() && c < input.cols() {
            input.get(r, c)
        } else {
            0.0
        }
    }))
}
