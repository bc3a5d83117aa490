//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned from all evaluator and solver functions.
#[derive(Debug, Error)]
pub enum QError {
    /// Returned when grid bounds are non-finite or out of order, or when too
    /// few points are requested.
    #[error("invalid grid: need finite min < max and at least 3 points; got [{0}, {1}] with {2} points")]
    BadGrid(f64, f64, usize),

    /// Returned when a physical parameter is outside its allowed range.
    #[error("invalid parameter {0}: {1}")]
    BadParameter(&'static str, f64),

    /// Returned when a scattering energy is non-positive or non-finite.
    #[error("energies must be finite and greater than 0; got {0}")]
    BadEnergy(f64),

    /// Returned when a negative quantum number is encountered.
    #[error("quantum numbers must be non-negative; got {0}")]
    BadQuantumNumber(i64),

    /// Returned when a non-positive `epsilon` value is encountered.
    #[error("epsilon values must be greater than 0; got {0}")]
    BadEpsilon(f64),

    /// Returned when a non-positive `maxiters` value is encountered.
    #[error("maxiters must be greater than 0; got {0}")]
    BadMaxiters(usize),

    /// Returned when the initial level search fails to reach the desired node
    /// count in [`solve_level`][crate::numerov::solve_level].
    #[error("numerov::solve_level: FATAL: level search failed to find the correct interval")]
    LevelSearch,

    /// Returned when a sampled function has too few points to integrate.
    #[error("quadrature requires at least 3 samples; got {0}")]
    TooShort(usize),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

impl QError {
    pub(crate) fn check_epsilon(epsilon: f64) -> Result<(), Self> {
        (epsilon > 0.0).then_some(()).ok_or(Self::BadEpsilon(epsilon))
    }

    pub(crate) fn check_maxiters(maxiters: usize) -> Result<(), Self> {
        (maxiters != 0).then_some(()).ok_or(Self::BadMaxiters(maxiters))
    }

    pub(crate) fn check_positive(name: &'static str, val: f64)
        -> Result<(), Self>
    {
        (val.is_finite() && val > 0.0).then_some(())
            .ok_or(Self::BadParameter(name, val))
    }

    pub(crate) fn check_nonneg(name: &'static str, val: f64)
        -> Result<(), Self>
    {
        (val.is_finite() && val >= 0.0).then_some(())
            .ok_or(Self::BadParameter(name, val))
    }

    pub(crate) fn check_len(n: usize) -> Result<(), Self> {
        (n >= 3).then_some(()).ok_or(Self::TooShort(n))
    }
}

pub type QResult<T> = Result<T, QError>;
