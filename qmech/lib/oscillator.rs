//! The quantum harmonic oscillator: potential, energy levels, and normalized
//! Hermite-Gaussian eigenfunctions.
//!
//! All physical constants are carried by an [`Oscillator`] value rather than
//! fixed globally, so the same evaluator serves any choice of units.
//!
//! ```
//! use qmech::{ grid::{ Grid, wf_norm }, oscillator::Oscillator };
//!
//! let osc = Oscillator::natural();
//! let grid = Grid::symmetric(5.0, 1000).unwrap();
//! let psi = osc.wavefunction(2, &grid);
//! assert_eq!(osc.energy(2), 2.5);
//! assert!((wf_norm(&psi, grid.dx()) - 1.0).abs() < 1e-6);
//! ```

use std::f64::consts::PI;
use ndarray as nd;
use crate::{
    error::{ QError, QResult },
    grid::Grid,
};

/// Evaluate the (physicists') Hermite polynomial *H*<sub>n</sub>(*x*) by
/// upward recurrence.
pub fn hermite(n: usize, x: f64) -> f64 {
    if n == 0 { return 1.0; }
    let mut hprev: f64 = 1.0;
    let mut h: f64 = 2.0 * x;
    let mut hnext: f64;
    for k in 1..n {
        hnext = 2.0 * x * h - 2.0 * k as f64 * hprev;
        hprev = h;
        h = hnext;
    }
    h
}

/// Convert a signed integer to a quantum number, rejecting negative values.
pub fn quantum_number(n: i64) -> QResult<usize> {
    usize::try_from(n).map_err(|_| QError::BadQuantumNumber(n))
}

/// Physical constants for a single harmonic oscillator.
///
/// Constants are only set through [`Oscillator::new`] (or
/// [`Oscillator::natural`]), so they are always positive and finite.
///
/// ```compile_fail
/// use qmech::oscillator::Oscillator;
///
/// let osc = Oscillator { hbar: 1.0, mass: 0.0, omega: 1.0 };
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Oscillator {
    hbar: f64,
    mass: f64,
    omega: f64,
}

impl Default for Oscillator {
    fn default() -> Self { Self::natural() }
}

impl Oscillator {
    /// Create a new oscillator, checking that all constants are positive and
    /// finite.
    pub fn new(hbar: f64, mass: f64, omega: f64) -> QResult<Self> {
        QError::check_positive("hbar", hbar)?;
        QError::check_positive("mass", mass)?;
        QError::check_positive("omega", omega)?;
        Ok(Self { hbar, mass, omega })
    }

    /// Natural units, *ħ* = *m* = *ω* = 1.
    pub const fn natural() -> Self {
        Self { hbar: 1.0, mass: 1.0, omega: 1.0 }
    }

    /// Get the reduced Planck constant.
    pub fn hbar(&self) -> f64 { self.hbar }

    /// Get the particle mass.
    pub fn mass(&self) -> f64 { self.mass }

    /// Get the angular frequency.
    pub fn omega(&self) -> f64 { self.omega }

    /// Inverse squared length scale, *α* = *mω*/*ħ*.
    pub fn alpha(&self) -> f64 { self.mass * self.omega / self.hbar }

    /// Ground state length scale, √(*ħ*/*mω*).
    pub fn length_scale(&self) -> f64 { self.alpha().recip().sqrt() }

    /// Level spacing *ħω*.
    pub fn quantum(&self) -> f64 { self.hbar * self.omega }

    /// Energy of the `n`-th level, (*n* + ½)*ħω*.
    pub fn energy(&self, n: usize) -> f64 { (n as f64 + 0.5) * self.quantum() }

    /// Evaluate the potential ½*mω*²*x*² at a point.
    pub fn potential(&self, x: f64) -> f64 {
        0.5 * self.mass * self.omega.powi(2) * x.powi(2)
    }

    /// Sample the potential over a grid.
    pub fn potential_on(&self, grid: &Grid) -> nd::Array1<f64> {
        grid.sample(|xk| self.potential(xk))
    }

    /// Position of the (positive) classical turning point for the `n`-th
    /// level.
    pub fn turning_point(&self, n: usize) -> f64 {
        (2.0 * self.energy(n) / self.mass / self.omega.powi(2)).sqrt()
    }

    /// Evaluate the normalized eigenfunction *ψ*<sub>n</sub>(*x*).
    ///
    /// This uses the recurrence for normalized Hermite functions, which is
    /// equivalent to *N* *H*<sub>n</sub>(√*α* *x*) exp(-*αx*²/2) with
    /// *N* = (*α*/*π*)<sup>1/4</sup> / √(2<sup>n</sup> *n*!) but does not
    /// overflow for large `n`.
    pub fn psi(&self, n: usize, x: f64) -> f64 {
        let alpha = self.alpha();
        let xi = alpha.sqrt() * x;
        let p0 = (alpha / PI).powf(0.25) * (-0.5 * xi * xi).exp();
        if n == 0 { return p0; }
        let mut pprev: f64 = p0;
        let mut p: f64 = 2.0_f64.sqrt() * xi * p0;
        let mut pnext: f64;
        for k in 1..n {
            let kf = k as f64;
            pnext
                = (2.0 / (kf + 1.0)).sqrt() * xi * p
                - (kf / (kf + 1.0)).sqrt() * pprev;
            pprev = p;
            p = pnext;
        }
        p
    }

    /// Sample the `n`-th eigenfunction over a grid.
    pub fn wavefunction(&self, n: usize, grid: &Grid) -> nd::Array1<f64> {
        grid.sample(|xk| self.psi(n, xk))
    }

    /// Compute the `n`-th eigenstate over a grid.
    pub fn eigenstate(&self, n: usize, grid: &Grid) -> Eigenstate {
        Eigenstate { n, e: self.energy(n), wf: self.wavefunction(n, grid) }
    }

    /// Compute all eigenstates up to and including `max_n`.
    pub fn eigenstates(&self, max_n: usize, grid: &Grid) -> Vec<Eigenstate> {
        (0..=max_n).map(|n| self.eigenstate(n, grid)).collect()
    }
}

/// A single oscillator eigenstate sampled over a grid.
#[derive(Clone, Debug)]
pub struct Eigenstate {
    /// Quantum number
    pub n: usize,
    /// Energy
    pub e: f64,
    /// Wavefunction
    pub wf: nd::Array1<f64>,
}

impl Eigenstate {
    /// Return the probability density |*ψ*|².
    pub fn density(&self) -> nd::Array1<f64> { self.wf.mapv(|q| q * q) }

    /// Return the parity (-1)<sup>n</sup> of the state.
    pub fn parity(&self) -> i8 { if self.n % 2 == 0 { 1 } else { -1 } }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{ assert_abs_diff_eq, assert_relative_eq };
    use crate::grid::wf_norm;

    fn factorial(n: usize) -> f64 { (1..=n).map(|k| k as f64).product() }

    #[test]
    fn hermite_low_orders() {
        for &x in &[-2.0, -0.3, 0.0, 0.7, 1.9] {
            assert_eq!(hermite(0, x), 1.0);
            assert_relative_eq!(hermite(1, x), 2.0 * x);
            assert_abs_diff_eq!(hermite(2, x), 4.0 * x * x - 2.0, epsilon = 1e-12);
            assert_abs_diff_eq!(
                hermite(3, x), 8.0 * x.powi(3) - 12.0 * x, epsilon = 1e-12);
            assert_abs_diff_eq!(
                hermite(4, x),
                16.0 * x.powi(4) - 48.0 * x * x + 12.0,
                epsilon = 1e-10,
            );
        }
    }

    #[test]
    fn psi_matches_closed_form() {
        let osc = Oscillator::new(1.0, 2.0, 1.5).unwrap();
        let alpha = osc.alpha();
        for n in 0..=10 {
            let norm
                = (alpha / PI).powf(0.25)
                / (2.0_f64.powi(n as i32) * factorial(n)).sqrt();
            for &x in &[-1.7, -0.2, 0.0, 0.4, 1.1] {
                let expected
                    = norm * hermite(n, alpha.sqrt() * x)
                    * (-alpha * x * x / 2.0).exp();
                assert_abs_diff_eq!(osc.psi(n, x), expected, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn energies_are_exact() {
        let osc = Oscillator::natural();
        for n in 0..=20 {
            assert_eq!(osc.energy(n), n as f64 + 0.5);
        }
    }

    #[test]
    fn normalized_on_wide_grid() {
        let osc = Oscillator::natural();
        let grid = Grid::symmetric(8.0, 2001).unwrap();
        for n in 0..=10 {
            let psi = osc.wavefunction(n, &grid);
            assert_abs_diff_eq!(wf_norm(&psi, grid.dx()), 1.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn normalized_on_script_grid() {
        let osc = Oscillator::natural();
        let grid = Grid::symmetric(5.0, 1000).unwrap();
        for n in 0..4 {
            let psi = osc.wavefunction(n, &grid);
            assert_abs_diff_eq!(wf_norm(&psi, grid.dx()), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn normalized_in_other_units() {
        let osc = Oscillator::new(1.0, 2.0, 3.0).unwrap();
        let grid = Grid::symmetric(3.0, 1001).unwrap();
        for n in 0..=5 {
            let psi = osc.wavefunction(n, &grid);
            assert_abs_diff_eq!(wf_norm(&psi, grid.dx()), 1.0, epsilon = 1e-6);
        }
        assert_relative_eq!(osc.length_scale(), 6.0_f64.recip().sqrt());
    }

    #[test]
    fn parity() {
        let osc = Oscillator::natural();
        let grid = Grid::symmetric(4.5, 1000).unwrap();
        for n in 0..=10 {
            let state = osc.eigenstate(n, &grid);
            let sign = state.parity() as f64;
            for &x in grid.x() {
                assert_abs_diff_eq!(
                    osc.psi(n, -x), sign * osc.psi(n, x), epsilon = 1e-12);
            }
            let flipped: Vec<f64> = state.wf.iter().rev().copied().collect();
            for (a, b) in flipped.iter().zip(&state.wf) {
                assert_abs_diff_eq!(*a, sign * b, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn turning_points() {
        let osc = Oscillator::natural();
        for n in 0..5 {
            let xt = osc.turning_point(n);
            assert_relative_eq!(osc.potential(xt), osc.energy(n), epsilon = 1e-12);
        }
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(matches!(quantum_number(-1), Err(QError::BadQuantumNumber(-1))));
        assert_eq!(quantum_number(3).unwrap(), 3);
        assert!(Oscillator::new(0.0, 1.0, 1.0).is_err());
        assert!(Oscillator::new(1.0, -1.0, 1.0).is_err());
        assert!(Oscillator::new(1.0, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn constants_are_read_back() {
        let osc = Oscillator::new(0.5, 2.0, 1.5).unwrap();
        assert_eq!((osc.hbar(), osc.mass(), osc.omega()), (0.5, 2.0, 1.5));
        assert_eq!(Oscillator::default(), Oscillator::natural());
        assert_eq!(Oscillator::natural().mass(), 1.0);
    }
}
