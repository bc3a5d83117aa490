//! Uniform sampling grids and quadrature over them.
//!
//! All integrals are computed with the composite Simpson rule. When a grid has
//! an even number of points (so an odd number of intervals), the last interval
//! is handled with a three-point end correction.
//!
//! ```
//! use qmech::grid::{ Grid, simpson };
//!
//! let grid = Grid::new(0.0, 2.0, 1001).unwrap();
//! let y = grid.x().mapv(|xk| xk.powi(3));
//! assert!((simpson(&y, grid.dx()) - 4.0).abs() < 1e-12);
//! ```

use ndarray::{ self as nd, Ix1 };
use num_traits::Float;
use crate::error::{ LengthError, QError, QResult };

/// A fixed, evenly spaced set of real sample points.
#[derive(Clone, Debug)]
pub struct Grid {
    min: f64,
    max: f64,
    x: nd::Array1<f64>,
}

impl Grid {
    /// Create a new grid of `count` points spanning `[min, max]` inclusively.
    pub fn new(min: f64, max: f64, count: usize) -> QResult<Self> {
        let good = min.is_finite() && max.is_finite() && min < max && count >= 3;
        if !good { return Err(QError::BadGrid(min, max, count)); }
        let x = nd::Array1::linspace(min, max, count);
        Ok(Self { min, max, x })
    }

    /// Create a grid symmetric about zero, spanning `[-half_width, half_width]`.
    pub fn symmetric(half_width: f64, count: usize) -> QResult<Self> {
        Self::new(-half_width, half_width, count)
    }

    /// Get the sample points.
    pub fn x(&self) -> &nd::Array1<f64> { &self.x }

    /// Get the lower and upper bounds.
    pub fn bounds(&self) -> (f64, f64) { (self.min, self.max) }

    /// Get the spacing between adjacent points.
    pub fn dx(&self) -> f64 { (self.max - self.min) / (self.x.len() - 1) as f64 }

    /// Get the number of points.
    pub fn len(&self) -> usize { self.x.len() }

    /// Always `false`; a grid holds at least three points.
    pub fn is_empty(&self) -> bool { false }

    /// Sample a function over the grid.
    pub fn sample<F>(&self, f: F) -> nd::Array1<f64>
    where F: FnMut(f64) -> f64
    {
        self.x.mapv(f)
    }

    /// Integrate a function over the grid.
    pub fn integrate<F>(&self, f: F) -> f64
    where F: FnMut(f64) -> f64
    {
        simpson(&self.sample(f), self.dx())
    }
}

/// Integrate evenly sampled data using the composite Simpson rule.
///
/// *Panics if `y` has length less than 3*.
pub fn simpson<S, A>(y: &nd::ArrayBase<S, Ix1>, dx: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let n: usize = y.len();
    let two = A::one() + A::one();
    let three = two + A::one();
    let four = two + two;
    // largest odd-length prefix
    let m: usize = if n % 2 == 1 { n } else { n - 1 };
    let inner: A
        = y.iter().enumerate().take(m - 1).skip(1)
        .fold(A::zero(), |acc, (k, yk)| {
            if k % 2 == 1 { acc + four * *yk } else { acc + two * *yk }
        });
    let mut res = (dx / three) * (y[0] + inner + y[m - 1]);
    if m < n {
        let five = four + A::one();
        let eight = four + four;
        let twelve = four * three;
        res = res
            + (dx / twelve) * (five * y[n - 1] + eight * y[n - 2] - y[n - 3]);
    }
    res
}

/// Calculate the norm ∫|q|² of a wavefunction.
///
/// *Panics if `q` has length less than 3*.
pub fn wf_norm<S>(q: &nd::ArrayBase<S, Ix1>, dx: f64) -> f64
where S: nd::Data<Elem = f64>
{
    simpson(&q.mapv(|qk| qk * qk), dx)
}

/// Calculate the inner product of two wavefunctions.
pub fn wf_dot<S, T>(
    q: &nd::ArrayBase<S, Ix1>,
    p: &nd::ArrayBase<T, Ix1>,
    dx: f64,
) -> QResult<f64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    LengthError::check(q, p)?;
    QError::check_len(q.len())?;
    Ok(simpson(&(q * p), dx))
}

/// Calculate the expectation value ∫|q|² v of a sampled potential `v` in the
/// state `q`.
pub fn expectation<S, T>(
    q: &nd::ArrayBase<S, Ix1>,
    v: &nd::ArrayBase<T, Ix1>,
    dx: f64,
) -> QResult<f64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    LengthError::check(q, v)?;
    QError::check_len(q.len())?;
    let integrand: nd::Array1<f64>
        = q.iter().zip(v)
        .map(|(qk, vk)| qk * qk * vk)
        .collect();
    Ok(simpson(&integrand, dx))
}

/// Renormalize a wavefunction in place.
///
/// *Panics if `q` has length less than 3*.
pub fn wf_renormalize<S>(q: &mut nd::ArrayBase<S, Ix1>, dx: f64)
where S: nd::DataMut<Elem = f64>
{
    let norm = wf_norm(q, dx).sqrt();
    q.iter_mut().for_each(|qk| { *qk /= norm; });
}

/// Return a normalized copy of a wavefunction.
///
/// *Panics if `q` has length less than 3*.
pub fn wf_normalized<S>(q: &nd::ArrayBase<S, Ix1>, dx: f64) -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    let norm = wf_norm(q, dx).sqrt();
    q.mapv(|qk| qk / norm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rejects_bad_grids() {
        assert!(Grid::new(1.0, -1.0, 100).is_err());
        assert!(Grid::new(-1.0, 1.0, 2).is_err());
        assert!(Grid::new(f64::NEG_INFINITY, 1.0, 100).is_err());
        assert!(Grid::new(0.0, 0.0, 100).is_err());
    }

    #[test]
    fn grid_spacing() {
        let grid = Grid::new(-5.0, 5.0, 1000).unwrap();
        assert_eq!(grid.len(), 1000);
        assert_abs_diff_eq!(grid.dx(), grid.x()[1] - grid.x()[0], epsilon = 1e-12);
        assert_abs_diff_eq!(grid.x()[999], 5.0, epsilon = 1e-12);
        assert_eq!(grid.bounds(), (-5.0, 5.0));
    }

    #[test]
    fn simpson_exact_for_cubics_odd_count() {
        let grid = Grid::new(-1.0, 3.0, 11).unwrap();
        let y = grid.sample(|x| 2.0 * x.powi(3) - x + 1.0);
        // [x⁴/2 - x²/2 + x] from -1 to 3
        assert_abs_diff_eq!(simpson(&y, grid.dx()), 40.0 - 4.0 + 4.0, epsilon = 1e-10);
    }

    #[test]
    fn simpson_exact_for_quadratics_even_count() {
        for n in [4, 10, 1000] {
            let grid = Grid::new(0.0, 3.0, n).unwrap();
            let y = grid.sample(|x| 3.0 * x * x + 1.0);
            assert_abs_diff_eq!(simpson(&y, grid.dx()), 30.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn simpson_converges_on_gaussian() {
        let grid = Grid::symmetric(8.0, 1000).unwrap();
        let val = grid.integrate(|x| (-x * x).exp());
        assert_abs_diff_eq!(val, std::f64::consts::PI.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn normalization_helpers() {
        let grid = Grid::symmetric(10.0, 2001).unwrap();
        let mut q = grid.sample(|x| 3.0 * (-x * x / 2.0).exp());
        assert!(wf_norm(&q, grid.dx()) > 1.0);
        let qn = wf_normalized(&q, grid.dx());
        assert_abs_diff_eq!(wf_norm(&qn, grid.dx()), 1.0, epsilon = 1e-10);
        wf_renormalize(&mut q, grid.dx());
        assert_abs_diff_eq!(wf_dot(&q, &qn, grid.dx()).unwrap(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn expectation_checks_lengths() {
        let q = nd::Array1::<f64>::ones(10);
        let v = nd::Array1::<f64>::ones(11);
        assert!(matches!(expectation(&q, &v, 0.1), Err(QError::Length(_))));
        let short = nd::Array1::<f64>::ones(2);
        assert!(matches!(expectation(&short, &short, 0.1), Err(QError::TooShort(2))));
    }
}
