//! Numerical bound states of arbitrary one-dimensional potentials via
//! Numerov's method, used to check perturbative estimates against the levels
//! they approximate.
//!
//! The time-independent Schrödinger equation is written as
//! ```text
//! ∂²ψ
//! --- = -c (E - V(x)) ψ(x),    c = 2 m / ħ²
//! ∂x²
//! ```
//! and integrated from the left edge of the grid with *ψ* = 0 there. Since the
//! number of sign changes in the integrated solution counts the levels lying
//! below the trial energy (with *ψ* = 0 enforced on both edges of the grid), a
//! level is first bracketed by bisection on the node count.
//!
//! The bracket is then refined with the renormalized form of the scheme, which
//! propagates only the ratios
//! ```text
//! R[k] = F[k + 1] / F[k],    F[k] = (1 + dx² c (E - V[k]) / 12) ψ[k]
//! ```
//! inward from both edges of the grid. Joining the two at the outermost maximum
//! of the right-hand solution gives a criterion that vanishes at a bound
//! state, and a secant search on it converges much faster than bisection
//! alone.
//!
//! ```
//! use qmech::{ grid::Grid, numerov, oscillator::Oscillator };
//!
//! let osc = Oscillator::natural();
//! let grid = Grid::symmetric(5.0, 1000).unwrap();
//! let v = osc.potential_on(&grid);
//! let e1 = numerov::solve_level_in(&grid, &v, 1.0, 1.0, 1).unwrap();
//! assert!((e1 - 1.5).abs() < 1e-5);
//! ```

use ndarray as nd;
use crate::{
    Arr1,
    error::{ LengthError, QError, QResult },
    grid::{ Grid, wf_renormalize },
    DEF_EPSILON,
    DEF_MAXITERS,
};

// magnitude above which the running solution is scaled back down
const RESCALE: f64 = 1e100;

/// Integrate the Schrödinger equation at fixed energy `e` from left to right
/// using Numerov's scheme, with `c = 2m/ħ²`.
///
/// The returned array has the correct shape but arbitrary overall scale.
///
/// *Panics if `v` has length less than 2*.
pub fn integrate<S>(dx: f64, v: &Arr1<S>, e: f64, c: f64) -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    let n = v.len();
    let a = dx.powi(2) / 12.0;
    let w = |vk: f64| 1.0 + a * c * (e - vk);
    let mut q: nd::Array1<f64> = nd::Array1::zeros(n);
    q[1] = dx;
    for k in 1..n - 1 {
        let qnext
            = (2.0 * (6.0 - 5.0 * w(v[k])) * q[k] - w(v[k - 1]) * q[k - 1])
            / w(v[k + 1]);
        q[k + 1] = qnext;
        if qnext.abs() > RESCALE {
            q.slice_mut(nd::s![..k + 2]).map_inplace(|qj| { *qj /= RESCALE; });
        }
    }
    q
}

/// Integrate the Schrödinger equation at fixed energy `e` from the left and
/// return the result normalized over the grid.
///
/// This is only a good approximation to a bound state when `e` is very close to
/// a level; otherwise the solution diverges toward the right edge.
pub fn numerov<S>(grid: &Grid, v: &Arr1<S>, e: f64, mass: f64, hbar: f64)
    -> QResult<nd::Array1<f64>>
where S: nd::Data<Elem = f64>
{
    LengthError::check(grid.x(), v)?;
    let mut q = integrate(grid.dx(), v, e, 2.0 * mass / hbar.powi(2));
    wf_renormalize(&mut q, grid.dx());
    Ok(q)
}

/// Return the number of levels below energy `e`, as the number of sign changes
/// in the left-integrated solution.
pub fn node_count<S>(dx: f64, v: &Arr1<S>, e: f64, c: f64) -> usize
where S: nd::Data<Elem = f64>
{
    let q = integrate(dx, v, e, c);
    q.iter().skip(1).zip(q.iter().skip(2))
        .filter(|(qk, qkp1)| **qk * **qkp1 < 0.0)
        .count()
}

// a = dx²/12; F = (1 + a c (E - V)) ψ obeys F[k+1] = U[k] F[k] - F[k-1]
fn renorm_pot_u(a: f64, c: f64, e: f64, vk: f64) -> f64 {
    let w = 1.0 + a * c * (e - vk);
    (12.0 - 10.0 * w) / w
}

// left-to-right ratios R[k] = F[k+1] / F[k], with F[0] = 0
fn renorm_ratios_left<S>(dx: f64, v: &Arr1<S>, e: f64, c: f64)
    -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    let a = dx.powi(2) / 12.0;
    let mut r: nd::Array1<f64> = nd::Array1::from_elem(v.len(), f64::INFINITY);
    let mut rprev = f64::INFINITY;
    for (rk, &vk) in r.iter_mut().zip(v).skip(1) {
        *rk = renorm_pot_u(a, c, e, vk) - rprev.recip();
        rprev = *rk;
    }
    r
}

// right-to-left ratios S[k] = F[k-1] / F[k], with F[n - 1] = 0
fn renorm_ratios_right<S>(dx: f64, v: &Arr1<S>, e: f64, c: f64)
    -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    let n = v.len();
    let a = dx.powi(2) / 12.0;
    let mut s: nd::Array1<f64> = nd::Array1::from_elem(n, f64::INFINITY);
    let mut sprev = f64::INFINITY;
    for (sk, &vk) in s.iter_mut().zip(v).take(n - 1).rev() {
        *sk = renorm_pot_u(a, c, e, vk) - sprev.recip();
        sprev = *sk;
    }
    s
}

/// Return the grid index at which left- and right-integrated solutions are
/// matched for energy `e`: the first point, coming in from the right, past
/// which the solution stops growing inward (its outermost maximum).
///
/// The result always lies in `1..=v.len() - 2`.
///
/// *Panics if `v` has length less than 3*.
pub fn matching_point<S>(dx: f64, v: &Arr1<S>, e: f64, c: f64) -> usize
where S: nd::Data<Elem = f64>
{
    let n = v.len();
    let a = dx.powi(2) / 12.0;
    let mut sprev = f64::INFINITY;
    for k in (1..n - 1).rev() {
        sprev = renorm_pot_u(a, c, e, v[k]) - sprev.recip();
        if sprev <= 1.0 { return k; }
    }
    1
}

/// Compute the matching criterion of the two-sided shooting method at energy
/// `e`, joining the two renormalized Numerov solutions at grid index `m`.
///
/// This is zero exactly when the solution integrated from the left also
/// vanishes on the right edge of the grid, i.e. at a bound state energy.
///
/// *Panics if `m` is not in `1..=v.len() - 2`*.
pub fn shoot_two_sided<S>(dx: f64, v: &Arr1<S>, e: f64, c: f64, m: usize)
    -> f64
where S: nd::Data<Elem = f64>
{
    let n = v.len();
    assert!(m >= 1 && m + 2 <= n, "matching point out of range");
    let a = dx.powi(2) / 12.0;
    let rl
        = (1..m)
        .fold(f64::INFINITY, |r, k| renorm_pot_u(a, c, e, v[k]) - r.recip());
    let sr
        = (m + 1..n - 1).rev()
        .fold(f64::INFINITY, |s, k| renorm_pot_u(a, c, e, v[k]) - s.recip());
    renorm_pot_u(a, c, e, v[m]) - rl.recip() - sr.recip()
}

/// Build the wavefunction at energy `e` from renormalized Numerov integrations
/// coming in from both edges of the grid, joined at the [matching
/// point][matching_point], and normalize it over the grid.
///
/// Only ratios of successive values are propagated, so the result does not
/// overflow in classically forbidden regions.
pub fn renorm_numerov<S>(grid: &Grid, v: &Arr1<S>, e: f64, mass: f64, hbar: f64)
    -> QResult<nd::Array1<f64>>
where S: nd::Data<Elem = f64>
{
    LengthError::check(grid.x(), v)?;
    QError::check_len(v.len())?;
    let n = v.len();
    let dx = grid.dx();
    let c = 2.0 * mass / hbar.powi(2);
    let a = dx.powi(2) / 12.0;
    let m = matching_point(dx, v, e, c);
    let rl = renorm_ratios_left(dx, v, e, c);
    let sr = renorm_ratios_right(dx, v, e, c);
    let mut f: nd::Array1<f64> = nd::Array1::zeros(n);
    f[m] = 1.0;
    for k in (0..m).rev() { f[k] = f[k + 1] / rl[k]; }
    for k in m + 1..n { f[k] = f[k - 1] / sr[k]; }
    let mut q: nd::Array1<f64>
        = f.iter().zip(v)
        .map(|(fk, vk)| {
            let qk = fk / (1.0 + a * c * (e - vk));
            if qk.is_finite() { qk } else { 0.0 }
        })
        .collect();
    wf_renormalize(&mut q, dx);
    Ok(q)
}

/// Find the `nu`-th bound state energy (`nu` nodes) of the potential `v`
/// sampled on `grid`, for a particle of mass `mass`, within the energy
/// `bounds`.
///
/// This search is divided into two parts:
///
/// - A coarse bisection on the node count, narrowing the bounds until the
///   lower one has exactly `nu` levels beneath it and the upper one `nu + 1`.
/// - A finer, bounded secant search on the [matching
///   criterion][shoot_two_sided] of the two-sided shooting method. Secant
///   steps that would leave the bounds fall back to bisection, and the bounds
///   are always updated by node count so the level can never be lost.
///
/// The bounds must bracket the level: the lower bound must have no more than
/// `nu` levels beneath it and the upper bound more than `nu`. Otherwise (or if
/// the first part fails within `maxiters`) [`QError::LevelSearch`] is
/// returned. The second part continues until the energy changes by less than
/// `epsilon` relative to its magnitude (or 1, whichever is larger), for at
/// most `maxiters` iterations.
#[allow(clippy::too_many_arguments)]
pub fn solve_level<S>(
    grid: &Grid,
    v: &Arr1<S>,
    mass: f64,
    hbar: f64,
    nu: usize,
    bounds: (f64, f64),
    epsilon: f64,
    maxiters: usize,
) -> QResult<f64>
where S: nd::Data<Elem = f64>
{
    QError::check_epsilon(epsilon)?;
    QError::check_maxiters(maxiters)?;
    QError::check_positive("mass", mass)?;
    QError::check_positive("hbar", hbar)?;
    LengthError::check(grid.x(), v)?;
    QError::check_len(v.len())?;

    let dx = grid.dx();
    let c = 2.0 * mass / hbar.powi(2);
    let tol = |e: f64| epsilon * e.abs().max(1.0);

    let mut eb = Bounds::from_ord(bounds);
    let mut nb = eb.map(|e| node_count(dx, v, e, c));
    if nb.0 > nu || nb.1 <= nu { return Err(QError::LevelSearch); }
    for _ in 0..maxiters {
        if nb.0 == nu && nb.1 == nu + 1 { break; }
        let e = eb.midpoint();
        let n = node_count(dx, v, e, c);
        if n > nu { eb.1 = e; nb.1 = n; } else { eb.0 = e; nb.0 = n; }
        if eb.diff() < tol(e) { return Ok(eb.midpoint()); }
    }
    if nb.0 != nu || nb.1 != nu + 1 { return Err(QError::LevelSearch); }

    let m = matching_point(dx, v, eb.midpoint(), c);
    let mut db = eb.map(|e| shoot_two_sided(dx, v, e, c, m));
    // which end was replaced last, for the Illinois modification
    let mut last_lower: Option<bool> = None;
    let mut e = eb.midpoint();
    let mut converged = false;
    for _ in 0..maxiters {
        let elast = e;
        let secant
            = db.0.is_finite() && db.1.is_finite() && db.0 * db.1 < 0.0;
        e = if secant {
            eb.1 - db.1 * eb.diff() / (db.1 - db.0)
        } else {
            eb.midpoint()
        };
        if !(eb.0 < e && e < eb.1) { e = eb.midpoint(); }
        let d = shoot_two_sided(dx, v, e, c, m);
        if d == 0.0 { converged = true; break; }
        if node_count(dx, v, e, c) > nu {
            eb.1 = e;
            db.1 = d;
            if last_lower == Some(false) { db.0 /= 2.0; }
            last_lower = Some(false);
        } else {
            eb.0 = e;
            db.0 = d;
            if last_lower == Some(true) { db.1 /= 2.0; }
            last_lower = Some(true);
        }
        if eb.diff() < tol(e) || (e - elast).abs() < tol(e) {
            converged = true;
            break;
        }
    }
    if !converged {
        println!(
            "numerov::solve_level: WARNING: energy convergence reached \
            maxiters"
        );
    }
    Ok(e)
}

/// Like [`solve_level`], but searching the full range of the sampled
/// potential with default precision.
pub fn solve_level_in<S>(
    grid: &Grid,
    v: &Arr1<S>,
    mass: f64,
    hbar: f64,
    nu: usize,
) -> QResult<f64>
where S: nd::Data<Elem = f64>
{
    let vmin = v.iter().copied().fold(f64::INFINITY, f64::min);
    let vmax = v.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    solve_level(
        grid, v, mass, hbar, nu, (vmin, vmax), DEF_EPSILON, DEF_MAXITERS)
}

#[derive(Copy, Clone, Debug)]
struct Bounds<T>(T, T);

impl Bounds<f64> {
    fn midpoint(self) -> f64 { (self.0 + self.1) / 2.0 }

    fn diff(self) -> f64 { self.1 - self.0 }
}

impl<T> Bounds<T> {
    fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Bounds<U> {
        (f(self.0), f(self.1)).into()
    }
}

impl<T: PartialOrd> Bounds<T> {
    fn from_ord(xx: (T, T)) -> Self {
        if xx.0 > xx.1 { Self(xx.1, xx.0) } else { Self(xx.0, xx.1) }
    }
}

impl<T> From<(T, T)> for Bounds<T> {
    fn from(xx: (T, T)) -> Self { Self(xx.0, xx.1) }
}
