//! Transmission through a rectangular potential barrier.
//!
//! For a barrier of height *V*<sub>0</sub> and width *a*, a particle of mass
//! *m* and energy *E* is transmitted with probability
//! ```text
//!                     1
//! T = --------------------------------    E < V₀,  κ = √(2m(V₀ - E)) / ħ
//!          V₀² sinh²(κa)
//!     1 + ---------------
//!          4 E (V₀ - E)
//!
//!                     1
//! T = --------------------------------    E > V₀,  k = √(2m(E - V₀)) / ħ
//!          V₀² sin²(ka)
//!     1 + --------------
//!          4 E (E - V₀)
//! ```
//! Both branches are evaluated in the equivalent form
//! ```text
//! T = 1 / (1 + (m V₀² / 2 E ħ²) (s(qa) / q)²)
//! ```
//! where `s` is `sinh` or `sin` and `s(qa) / q → a` as `q → 0`, so that the
//! removable singularity at *E* = *V*<sub>0</sub> is handled exactly.
//!
//! ```
//! use qmech::tunneling::Barrier;
//!
//! let barrier = Barrier::natural(1.0, 1.0).unwrap();
//! let t = barrier.transmission(1.0).unwrap();
//! assert!((t - 2.0 / 3.0).abs() < 1e-12);
//! ```

use std::f64::consts::PI;
use ndarray as nd;
use crate::{
    Arr1,
    error::{ QError, QResult },
};

// sinh(q a) / q with the q → 0 limit
fn sinh_over(q: f64, a: f64) -> f64 {
    if q == 0.0 { a } else { (q * a).sinh() / q }
}

// sin(q a) / q with the q → 0 limit
fn sin_over(q: f64, a: f64) -> f64 {
    if q == 0.0 { a } else { (q * a).sin() / q }
}

/// A rectangular potential barrier seen by a particle of fixed mass.
///
/// Parameters are only set through [`Barrier::new`] and friends, so a
/// `Barrier` never carries a negative size or a non-positive mass or *ħ*.
///
/// ```compile_fail
/// use qmech::tunneling::Barrier;
///
/// let barrier = Barrier { height: 1.0, width: 1.0, mass: 1.0, hbar: 0.0 };
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Barrier {
    height: f64,
    width: f64,
    mass: f64,
    hbar: f64,
}

impl Barrier {
    /// Create a new barrier, checking that the height and width are
    /// non-negative and that the mass and *ħ* are positive.
    pub fn new(height: f64, width: f64, mass: f64, hbar: f64) -> QResult<Self> {
        QError::check_nonneg("height", height)?;
        QError::check_nonneg("width", width)?;
        QError::check_positive("mass", mass)?;
        QError::check_positive("hbar", hbar)?;
        Ok(Self { height, width, mass, hbar })
    }

    /// Create a new barrier in units where *m* = *ħ* = 1.
    pub fn natural(height: f64, width: f64) -> QResult<Self> {
        Self::new(height, width, 1.0, 1.0)
    }

    /// Get the barrier height *V*<sub>0</sub>.
    pub fn height(&self) -> f64 { self.height }

    /// Get the barrier width *a*.
    pub fn width(&self) -> f64 { self.width }

    /// Get the particle mass.
    pub fn mass(&self) -> f64 { self.mass }

    /// Get the reduced Planck constant.
    pub fn hbar(&self) -> f64 { self.hbar }

    /// Return a copy of `self` with a different width.
    pub fn with_width(&self, width: f64) -> QResult<Self> {
        Self::new(self.height, width, self.mass, self.hbar)
    }

    /// Compute the transmission probability at energy `e > 0`.
    ///
    /// The result lies in (0, 1] whenever it is representable. Deep below
    /// thick or tall barriers `sinh²(κa)` overflows and the result underflows
    /// to exactly 0.
    pub fn transmission(&self, e: f64) -> QResult<f64> {
        if !(e.is_finite() && e > 0.0) { return Err(QError::BadEnergy(e)); }
        let diff = self.height - e;
        let q = (2.0 * self.mass * diff.abs()).sqrt() / self.hbar;
        let s
            = if diff > 0.0 {
                sinh_over(q, self.width)
            } else {
                sin_over(q, self.width)
            };
        let ratio
            = self.height.powi(2) * self.mass
            / (2.0 * e * self.hbar.powi(2))
            * s.powi(2);
        Ok((1.0 + ratio).recip())
    }

    /// Transmission probability exactly at the barrier height,
    /// 1 / (1 + *m* *V*<sub>0</sub> *a*² / 2*ħ*²).
    pub fn limit_at_height(&self) -> f64 {
        (
            1.0 + self.mass * self.height * self.width.powi(2)
                / (2.0 * self.hbar.powi(2))
        ).recip()
    }

    /// Return the first `count` energies above the barrier at which the
    /// transmission is exactly 1, i.e. where *ka* = *jπ*.
    ///
    /// Returns nothing for a barrier of zero width.
    pub fn resonances(&self, count: usize) -> Vec<f64> {
        if self.width == 0.0 { return Vec::new(); }
        (1..=count)
            .map(|j| {
                let k = j as f64 * PI / self.width;
                self.height + (self.hbar * k).powi(2) / (2.0 * self.mass)
            })
            .collect()
    }

    /// Compute the transmission probability over a set of energies.
    pub fn transmission_curve<S>(&self, energies: &Arr1<S>)
        -> QResult<TransmissionCurve>
    where S: nd::Data<Elem = f64>
    {
        let t: nd::Array1<f64>
            = energies.iter()
            .map(|ek| self.transmission(*ek))
            .collect::<QResult<_>>()?;
        Ok(TransmissionCurve {
            width: self.width,
            e: energies.to_owned(),
            t,
        })
    }
}

/// Transmission probability as a function of energy for a single barrier
/// width.
#[derive(Clone, Debug)]
pub struct TransmissionCurve {
    /// Barrier width
    pub width: f64,
    /// Energies
    pub e: nd::Array1<f64>,
    /// Transmission probabilities
    pub t: nd::Array1<f64>,
}

/// Compute one [`TransmissionCurve`] for each barrier width in `widths`.
pub fn transmission_sweep<S>(
    height: f64,
    widths: &[f64],
    energies: &Arr1<S>,
    mass: f64,
    hbar: f64,
) -> QResult<Vec<TransmissionCurve>>
where S: nd::Data<Elem = f64>
{
    widths.iter()
        .map(|a| Barrier::new(height, *a, mass, hbar)?.transmission_curve(energies))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{ assert_abs_diff_eq, assert_relative_eq };

    const WIDTHS: [f64; 5] = [0.2, 0.5, 1.0, 1.5, 2.0];

    #[test]
    fn bounded_in_unit_interval() {
        let energies: nd::Array1<f64> = nd::Array1::linspace(0.01, 2.0, 400);
        let curves = transmission_sweep(1.0, &WIDTHS, &energies, 1.0, 1.0)
            .unwrap();
        assert_eq!(curves.len(), WIDTHS.len());
        for curve in curves.iter() {
            assert_eq!(curve.t.len(), 400);
            assert!(curve.t.iter().all(|t| *t > 0.0 && *t <= 1.0));
        }
    }

    #[test]
    fn limits_at_extreme_energies() {
        for &a in WIDTHS.iter() {
            let barrier = Barrier::natural(1.0, a).unwrap();
            assert!(barrier.transmission(1e-8).unwrap() < 1e-6);
            assert!(barrier.transmission(1e6).unwrap() > 1.0 - 1e-9);
        }
    }

    #[test]
    fn increasing_below_barrier() {
        let barrier = Barrier::natural(1.0, 1.0).unwrap();
        let energies: nd::Array1<f64> = nd::Array1::linspace(0.01, 0.99, 200);
        let curve = barrier.transmission_curve(&energies).unwrap();
        assert!(
            curve.t.iter().zip(curve.t.iter().skip(1))
                .all(|(tk, tkp1)| tkp1 > tk)
        );
    }

    #[test]
    fn continuous_at_barrier_height() {
        let barrier = Barrier::natural(1.0, 1.0).unwrap();
        let limit = barrier.limit_at_height();
        assert_relative_eq!(limit, 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(barrier.transmission(1.0).unwrap(), limit);
        let below = barrier.transmission(1.0 - 1e-7).unwrap();
        let above = barrier.transmission(1.0 + 1e-7).unwrap();
        assert_abs_diff_eq!(below, limit, epsilon = 1e-6);
        assert_abs_diff_eq!(above, limit, epsilon = 1e-6);
    }

    #[test]
    fn matches_textbook_branches() {
        let barrier = Barrier::new(2.0, 0.7, 1.3, 0.9).unwrap();
        let (v0, a, m, hbar) = (2.0_f64, 0.7_f64, 1.3_f64, 0.9_f64);
        for &e in &[0.3, 1.1, 1.9] {
            let kappa = (2.0 * m * (v0 - e)).sqrt() / hbar;
            let expected
                = (1.0 + v0.powi(2) * (kappa * a).sinh().powi(2)
                    / (4.0 * e * (v0 - e))).recip();
            assert_relative_eq!(
                barrier.transmission(e).unwrap(), expected, epsilon = 1e-12);
        }
        for &e in &[2.2, 3.5, 10.0] {
            let k = (2.0 * m * (e - v0)).sqrt() / hbar;
            let expected
                = (1.0 + v0.powi(2) * (k * a).sin().powi(2)
                    / (4.0 * e * (e - v0))).recip();
            assert_relative_eq!(
                barrier.transmission(e).unwrap(), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn wider_barriers_transmit_less() {
        let narrow = Barrier::natural(1.0, 0.5).unwrap();
        let wide = narrow.with_width(2.0).unwrap();
        assert!(wide.transmission(0.5).unwrap() < narrow.transmission(0.5).unwrap());
    }

    #[test]
    fn perfect_transmission_at_resonances() {
        let barrier = Barrier::natural(1.0, 2.0).unwrap();
        let res = barrier.resonances(3);
        assert_eq!(res.len(), 3);
        for e in res {
            assert!(e > 1.0);
            assert_abs_diff_eq!(barrier.transmission(e).unwrap(), 1.0, epsilon = 1e-12);
        }
        assert!(Barrier::natural(1.0, 0.0).unwrap().resonances(3).is_empty());
    }

    #[test]
    fn degenerate_barriers() {
        let thin = Barrier::natural(1.0, 0.0).unwrap();
        let flat = Barrier::natural(0.0, 1.0).unwrap();
        for &e in &[0.1, 1.0, 5.0] {
            assert_eq!(thin.transmission(e).unwrap(), 1.0);
            assert_eq!(flat.transmission(e).unwrap(), 1.0);
        }
    }

    #[test]
    fn underflows_to_zero_deep_below_barrier() {
        // sinh(κa) overflows; the true value is below the smallest f64
        let thick = Barrier::natural(1.0, 1000.0).unwrap();
        assert_eq!(thick.transmission(0.5).unwrap(), 0.0);
        let tall = Barrier::natural(1e200, 1.0).unwrap();
        assert_eq!(tall.transmission(0.5).unwrap(), 0.0);
        // still strictly positive while representable
        let t = Barrier::natural(1.0, 100.0).unwrap().transmission(0.5).unwrap();
        assert!(t > 0.0 && t < 1e-50);
    }

    #[test]
    fn parameters_are_validated() {
        let barrier = Barrier::new(2.0, 0.7, 1.3, 0.9).unwrap();
        assert_eq!(barrier.height(), 2.0);
        assert_eq!(barrier.width(), 0.7);
        assert_eq!(barrier.mass(), 1.3);
        assert_eq!(barrier.hbar(), 0.9);
        assert_eq!(barrier.with_width(1.5).unwrap().width(), 1.5);
        assert!(barrier.with_width(-1.0).is_err());
        assert!(Barrier::new(1.0, 1.0, 1.0, 0.0).is_err());
        assert!(Barrier::new(1.0, 1.0, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn rejects_bad_inputs() {
        let barrier = Barrier::natural(1.0, 1.0).unwrap();
        assert!(matches!(barrier.transmission(0.0), Err(QError::BadEnergy(_))));
        assert!(barrier.transmission(-1.0).is_err());
        assert!(barrier.transmission(f64::NAN).is_err());
        assert!(Barrier::natural(-1.0, 1.0).is_err());
        assert!(Barrier::natural(1.0, -1.0).is_err());
        assert!(Barrier::new(1.0, 1.0, 0.0, 1.0).is_err());
    }
}
