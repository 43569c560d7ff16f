use core::fmt;

/// Errors reported by the transform engines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformError {
    /// The input had zero rows or zero columns.
    EmptyInput,
    /// A row did not have the same length as the first row.
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A dimension was not a power of two where the algorithm requires one.
    NonPowerOfTwo { rows: usize, cols: usize },
    /// A dimension was odd where the algorithm halves it.
    OddDimensions { rows: usize, cols: usize },
    /// Two inputs that must share a shape did not.
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// A ratio, cutoff or count was negative, NaN or infinite.
    InvalidParameter,
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::EmptyInput => write!(f, "input matrix is empty"),
            TransformError::RaggedRows {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} columns, expected {}",
                row, found, expected
            ),
            TransformError::NonPowerOfTwo { rows, cols } => write!(
                f,
                "dimensions {}x{} must both be powers of two",
                rows, cols
            ),
            TransformError::OddDimensions { rows, cols } => {
                write!(f, "dimensions {}x{} must both be even", rows, cols)
            }
            TransformError::DimensionMismatch { expected, found } => write!(
                f,
                "expected a {}x{} matrix, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            TransformError::InvalidParameter => {
                write!(f, "parameter must be finite and non-negative")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TransformError {}

/// Fail fast on negative, NaN or infinite ratios and cutoffs.
pub(crate) fn check_ratio(value: f64) -> Result<(), TransformError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TransformError::InvalidParameter)
    }
}
