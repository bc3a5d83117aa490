//! First-order energy corrections to harmonic oscillator levels.
//!
//! For a small perturbing potential *V*′(*x*) added to the harmonic potential,
//! the first-order shift of the *n*-th level is the expectation value
//! ```text
//! ΔEₙ = ∫ |ψₙ(x)|² V'(x) dx
//! ```
//! which is computed here by Simpson quadrature over a finite grid. The grid
//! truncates an integral over the whole real line; because |*ψ*<sub>n</sub>|²
//! decays like a Gaussian, the error is negligible as long as the grid extends
//! well past the classical turning point (for *n* < 4 on [-5, 5] in natural
//! units, less than 1e-7 of the probability lies outside). Use
//! [`truncation_weight`] to check a particular choice.
//!
//! ```
//! use qmech::{ grid::Grid, oscillator::Oscillator, perturbation::Perturbation };
//!
//! let osc = Oscillator::natural();
//! let grid = Grid::symmetric(5.0, 1000).unwrap();
//! let de = Perturbation::Quartic(0.1).first_order(&osc, &grid, 0);
//! assert!((de - 0.075).abs() < 1e-6);
//! ```

use ndarray as nd;
use crate::{
    error::QResult,
    grid::Grid,
    numerov,
    oscillator::Oscillator,
};

/// Compute the first-order energy correction to the `n`-th oscillator level for
/// an arbitrary perturbing potential.
pub fn energy_correction<F>(osc: &Oscillator, grid: &Grid, n: usize, mut v: F)
    -> f64
where F: FnMut(f64) -> f64
{
    grid.integrate(|xk| osc.psi(n, xk).powi(2) * v(xk))
}

/// Return the probability of the `n`-th oscillator eigenstate that is missed by
/// integrating only over `grid`.
pub fn truncation_weight(osc: &Oscillator, grid: &Grid, n: usize) -> f64 {
    1.0 - grid.integrate(|xk| osc.psi(n, xk).powi(2))
}

/// A perturbing potential added to the harmonic oscillator.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Perturbation {
    /// *λ* *x*³
    Cubic(f64),
    /// *λ* *x*⁴
    Quartic(f64),
    /// -*m* *F* *x*, for a particle in a uniform field of strength *F*.
    Field {
        /// Coupling mass.
        mass: f64,
        /// Field strength.
        field: f64,
    },
}

impl Perturbation {
    /// Short identifier.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cubic(_) => "cubic",
            Self::Quartic(_) => "quartic",
            Self::Field { .. } => "field",
        }
    }

    /// Evaluate the perturbing potential at a point.
    pub fn eval(&self, x: f64) -> f64 {
        match *self {
            Self::Cubic(l) => l * x.powi(3),
            Self::Quartic(l) => l * x.powi(4),
            Self::Field { mass, field } => -mass * field * x,
        }
    }

    /// Sample the perturbing potential over a grid.
    pub fn on_grid(&self, grid: &Grid) -> nd::Array1<f64> {
        grid.sample(|xk| self.eval(xk))
    }

    /// Evaluate the full perturbed potential at a point.
    pub fn total_potential(&self, osc: &Oscillator, x: f64) -> f64 {
        osc.potential(x) + self.eval(x)
    }

    /// Sample the full perturbed potential over a grid.
    pub fn total_potential_on(&self, osc: &Oscillator, grid: &Grid)
        -> nd::Array1<f64>
    {
        grid.sample(|xk| self.total_potential(osc, xk))
    }

    /// Compute the first-order correction to the `n`-th level.
    pub fn first_order(&self, osc: &Oscillator, grid: &Grid, n: usize) -> f64 {
        energy_correction(osc, grid, n, |xk| self.eval(xk))
    }

    /// Compute first-order corrections for all levels up to and including
    /// `max_n`.
    pub fn corrections(&self, osc: &Oscillator, grid: &Grid, max_n: usize)
        -> Vec<f64>
    {
        (0..=max_n).map(|n| self.first_order(osc, grid, n)).collect()
    }

    /// Closed-form value of the first-order correction to the `n`-th level over
    /// the whole real line.
    ///
    /// ```text
    /// ⟨x³⟩ = ⟨x⟩ = 0
    /// ⟨x⁴⟩ = (ħ / 2mω)² (6n² + 6n + 3)
    /// ```
    pub fn analytic_first_order(&self, osc: &Oscillator, n: usize) -> f64 {
        match *self {
            Self::Cubic(_) | Self::Field { .. } => 0.0,
            Self::Quartic(l) => {
                let nf = n as f64;
                let s = osc.hbar() / (2.0 * osc.mass() * osc.omega());
                l * s.powi(2) * (6.0 * nf * nf + 6.0 * nf + 3.0)
            },
        }
    }

    /// Return `true` if the perturbed potential is bounded from below on the
    /// whole real line, so that its levels are true bound states.
    pub fn is_bounded_below(&self) -> bool {
        match *self {
            Self::Cubic(l) => l == 0.0,
            Self::Quartic(l) => l >= 0.0,
            Self::Field { .. } => true,
        }
    }

    /// Compute the first-order corrections for all levels up to and including
    /// `max_n`, along with the level shifts found by solving for the bound
    /// states of the perturbed potential directly.
    ///
    /// Direct solutions are only attempted when the perturbed potential is
    /// [bounded from below][Self::is_bounded_below]; both the perturbed and
    /// unperturbed levels are solved on the same grid so that discretization
    /// errors largely cancel.
    pub fn compare_with_exact(
        &self,
        osc: &Oscillator,
        grid: &Grid,
        max_n: usize,
    ) -> QResult<Vec<LevelShift>>
    {
        let v0 = osc.potential_on(grid);
        let v = self.total_potential_on(osc, grid);
        let bounded = self.is_bounded_below();
        (0..=max_n)
            .map(|n| -> QResult<LevelShift> {
                let exact
                    = if bounded {
                        let e0 = numerov::solve_level_in(
                            grid, &v0, osc.mass(), osc.hbar(), n)?;
                        let e = numerov::solve_level_in(
                            grid, &v, osc.mass(), osc.hbar(), n)?;
                        Some(e - e0)
                    } else {
                        None
                    };
                let first_order = self.first_order(osc, grid, n);
                Ok(LevelShift { n, first_order, exact })
            })
            .collect()
    }
}

/// Comparison between perturbative and directly computed level shifts.
#[derive(Copy, Clone, Debug)]
pub struct LevelShift {
    /// Quantum number
    pub n: usize,
    /// First-order estimate
    pub first_order: f64,
    /// Directly computed shift, if available
    pub exact: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn setup() -> (Oscillator, Grid) {
        (Oscillator::natural(), Grid::symmetric(5.0, 1000).unwrap())
    }

    #[test]
    fn cubic_vanishes_by_parity() {
        let (osc, grid) = setup();
        let de = Perturbation::Cubic(0.1).corrections(&osc, &grid, 3);
        assert_eq!(de.len(), 4);
        for den in de {
            assert_abs_diff_eq!(den, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn field_vanishes_by_parity() {
        let (osc, grid) = setup();
        let pert = Perturbation::Field { mass: 1.0, field: 0.1 };
        for den in pert.corrections(&osc, &grid, 3) {
            assert_abs_diff_eq!(den, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn quartic_ground_state() {
        let (osc, grid) = setup();
        let de0 = Perturbation::Quartic(0.1).first_order(&osc, &grid, 0);
        assert_abs_diff_eq!(de0, 0.1 * 0.75, epsilon = 1e-2);
        assert_abs_diff_eq!(de0, 0.075, epsilon = 1e-6);
    }

    #[test]
    fn quartic_positive_and_analytic() {
        let (osc, grid) = setup();
        let pert = Perturbation::Quartic(0.1);
        for (n, den) in pert.corrections(&osc, &grid, 3).into_iter().enumerate() {
            assert!(den > 0.0);
            assert_abs_diff_eq!(
                den, pert.analytic_first_order(&osc, n), epsilon = 1e-4);
        }
    }

    #[test]
    fn analytic_in_other_units() {
        let osc = Oscillator::new(1.0, 2.0, 0.5).unwrap();
        let grid = Grid::symmetric(6.0, 1201).unwrap();
        let pert = Perturbation::Quartic(0.3);
        for n in 0..3 {
            assert_abs_diff_eq!(
                pert.first_order(&osc, &grid, n),
                pert.analytic_first_order(&osc, n),
                epsilon = 1e-6,
            );
        }
    }

    #[test]
    fn arbitrary_potentials() {
        let (osc, grid) = setup();
        let pert = Perturbation::Quartic(0.1);
        assert_abs_diff_eq!(
            energy_correction(&osc, &grid, 2, |x| 0.1 * x.powi(4)),
            pert.first_order(&osc, &grid, 2),
            epsilon = 1e-14,
        );
        // ⟨x²⟩ = (n + ½) ħ/mω
        assert_abs_diff_eq!(
            energy_correction(&osc, &grid, 1, |x| x * x), 1.5, epsilon = 1e-6);
    }

    #[test]
    fn potentials() {
        let osc = Oscillator::natural();
        let pert = Perturbation::Field { mass: 1.0, field: 0.1 };
        assert_abs_diff_eq!(pert.total_potential(&osc, 2.0), 2.0 - 0.2);
        assert_abs_diff_eq!(Perturbation::Cubic(0.1).eval(-2.0), -0.8);
        assert_abs_diff_eq!(Perturbation::Quartic(0.1).eval(-2.0), 1.6);
        assert_eq!(pert.name(), "field");
    }

    #[test]
    fn truncation() {
        let (osc, grid) = setup();
        for n in 0..4 {
            assert!(truncation_weight(&osc, &grid, n).abs() < 1e-6);
        }
        let narrow = Grid::symmetric(4.5, 1000).unwrap();
        assert!(truncation_weight(&osc, &narrow, 10) > 1e-3);
    }

    #[test]
    fn compare_quartic_with_exact() {
        let (osc, grid) = setup();
        let shifts = Perturbation::Quartic(0.1)
            .compare_with_exact(&osc, &grid, 1)
            .unwrap();
        assert_eq!(shifts.len(), 2);
        let exact0 = shifts[0].exact.unwrap();
        assert_abs_diff_eq!(exact0, 0.059146, epsilon = 1e-4);
        assert!(shifts.iter().all(|s| s.exact.unwrap() < s.first_order));
    }

    #[test]
    fn compare_field_with_exact() {
        let (osc, grid) = setup();
        let shifts = Perturbation::Field { mass: 1.0, field: 0.1 }
            .compare_with_exact(&osc, &grid, 2)
            .unwrap();
        for s in shifts {
            assert_abs_diff_eq!(s.exact.unwrap(), -0.005, epsilon = 1e-5);
        }
    }

    #[test]
    fn cubic_has_no_exact_shift() {
        let (osc, grid) = setup();
        let shifts = Perturbation::Cubic(0.1)
            .compare_with_exact(&osc, &grid, 3)
            .unwrap();
        assert!(shifts.iter().all(|s| s.exact.is_none()));
    }
}
