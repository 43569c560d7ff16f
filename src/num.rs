//! Scalar and complex number primitives.
//!
//! The crate is `no_std`, so transcendental functions go through `libm`
//! rather than the inherent float methods that live in `std`.

/// Minimal float abstraction used by [`Complex`].
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + core::fmt::Debug
    + core::ops::Add<Output = Self>
    + core::ops::Sub<Output = Self>
    + core::ops::Mul<Output = Self>
    + core::ops::Div<Output = Self>
    + core::ops::Neg<Output = Self>
    + 'static
{
    fn zero() -> Self;
    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    fn sin_cos(self) -> (Self, Self);
    fn atan2(self, other: Self) -> Self;
    fn ln_1p(self) -> Self;
}

impl Float for f32 {
    fn zero() -> Self {
        0.0
    }
    fn sqrt(self) -> Self {
        libm::sqrtf(self)
    }
    fn abs(self) -> Self {
        libm::fabsf(self)
    }
    fn sin_cos(self) -> (Self, Self) {
        libm::sincosf(self)
    }
    fn atan2(self, other: Self) -> Self {
        libm::atan2f(self, other)
    }
    fn ln_1p(self) -> Self {
        libm::log1pf(self)
    }
}

impl Float for f64 {
    fn zero() -> Self {
        0.0
    }
    fn sqrt(self) -> Self {
        libm::sqrt(self)
    }
    fn abs(self) -> Self {
        libm::fabs(self)
    }
    fn sin_cos(self) -> (Self, Self) {
        libm::sincos(self)
    }
    fn atan2(self, other: Self) -> Self {
        libm::atan2(self, other)
    }
    fn ln_1p(self) -> Self {
        libm::log1p(self)
    }
}

/// Complex value type. Every operation returns a new value.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Complex<T: Float> {
    pub re: T,
    pub im: T,
}

impl<T: Float> Complex<T> {
    pub fn new(re: T, im: T) -> Self {
        Self { re, im }
    }

    pub fn zero() -> Self {
        Self {
            re: T::zero(),
            im: T::zero(),
        }
    }

    /// Build `m·(cos θ + i·sin θ)`.
    #[inline(always)]
    pub fn from_polar(magnitude: T, theta: T) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self {
            re: magnitude * cos,
            im: magnitude * sin,
        }
    }

    #[inline(always)]
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }

    /// Euclidean magnitude `sqrt(re² + im²)`.
    #[inline(always)]
    pub fn norm(self) -> T {
        (self.re * self.re + self.im * self.im).sqrt()
    }

    /// Phase angle in `[-π, π]`.
    #[inline(always)]
    pub fn arg(self) -> T {
        self.im.atan2(self.re)
    }

    #[inline(always)]
    pub fn scale(self, factor: T) -> Self {
        Self {
            re: self.re * factor,
            im: self.im * factor,
        }
    }
}

impl<T: Float> core::ops::Neg for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl<T: Float> core::ops::Add for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        Self {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }
}

impl<T: Float> core::ops::Sub for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        Self {
            re: self.re - other.re,
            im: self.im - other.im,
        }
    }
}

impl<T: Float> core::ops::Mul for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        Self {
            re: self.re * other.re - self.im * other.im,
            im: self.re * other.im + self.im * other.re,
        }
    }
}

impl<T: Float> Default for Complex<T> {
    fn default() -> Self {
        Self::zero()
    }
}

pub type Complex32 = Complex<f32>;
pub type Complex64 = Complex<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_operations() {
        let a = Complex64::new(1.0, -2.0);
        let b = Complex64::new(3.0, 4.0);
        let c = a * b;
        assert!((c.re - (1.0 * 3.0 - (-2.0) * 4.0)).abs() < 1e-12);
        assert!((c.im - (1.0 * 4.0 + (-2.0) * 3.0)).abs() < 1e-12);
        let n = -a;
        assert_eq!(n.re, -1.0);
        assert_eq!(n.im, 2.0);
        assert_eq!(a.conj(), Complex64::new(1.0, 2.0));
        assert!((b.norm() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_float_paths_are_libm_backed() {
        assert_eq!(Float::abs(-2.5f64), 2.5);
        assert_eq!(Float::sqrt(16.0f64), 4.0);
        assert_eq!(Float::abs(-1.5f32), 1.5);
        assert!((Float::ln_1p(core::f64::consts::E - 1.0) - 1.0).abs() < 1e-12);
        assert_eq!(<f64 as Float>::zero(), 0.0);
    }

    #[test]
    fn test_from_polar_matches_arg_and_norm() {
        let z = Complex64::from_polar(2.0, core::f64::consts::FRAC_PI_3);
        assert!((z.norm() - 2.0).abs() < 1e-12);
        assert!((z.arg() - core::f64::consts::FRAC_PI_3).abs() < 1e-12);
    }
}
