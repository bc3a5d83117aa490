//! Theoretical background.
//!
//! # Contents
//! - [Harmonic oscillator](#harmonic-oscillator)
//! - [Rectangular barrier](#rectangular-barrier)
//! - [First-order perturbation theory](#first-order-perturbation-theory)
//! - [Numerical checks](#numerical-checks)
//!
//! # Harmonic oscillator
//! A particle of mass *m* in the potential *V*(*x*) = *mω*²*x*²/2 has the
//! time-independent Schrödinger equation (TISE)
//! ```text
//!    ħ² ∂²ψ   1
//! - --- --- + - m ω² x² ψ = E ψ
//!   2 m ∂x²   2
//! ```
//! whose bound states are indexed by a non-negative integer *n*,
//! ```text
//! Eₙ = (n + ½) ħ ω
//!
//!          ⎛ α ⎞¼      1
//! ψₙ(x) = ⎜---⎟  ---------- Hₙ(√α x) exp(-α x² / 2),    α = m ω / ħ
//!          ⎝ π ⎠   √(2ⁿ n!)
//! ```
//! where *H*<sub>n</sub> is the *n*-th (physicists') Hermite polynomial,
//! ```text
//! H₀(ξ) = 1
//! H₁(ξ) = 2 ξ
//! Hₙ₊₁(ξ) = 2 ξ Hₙ(ξ) - 2 n Hₙ₋₁(ξ)
//! ```
//! The prefactor 1/√(2<sup>n</sup> *n*!) overflows quickly, so
//! [`Oscillator::psi`][crate::oscillator::Oscillator::psi] instead iterates
//! the equivalent recurrence for the normalized Hermite functions,
//! ```text
//! hₙ₊₁(ξ) = √(2 / (n + 1)) ξ hₙ(ξ) - √(n / (n + 1)) hₙ₋₁(ξ)
//! ```
//! starting from *h*<sub>0</sub> = (*α*/*π*)<sup>¼</sup> exp(-*ξ*²/2) and
//! *h*<sub>1</sub> = √2 *ξ* *h*<sub>0</sub>. Each eigenfunction has definite
//! parity, *ψ*<sub>n</sub>(-*x*) = (-1)<sup>n</sup> *ψ*<sub>n</sub>(*x*), and
//! the classical turning points lie at ±√(2*E*<sub>n</sub> / *mω*²).
//!
//! # Rectangular barrier
//! For a barrier *V*(*x*) = *V*<sub>0</sub> on 0 < *x* < *a* (and 0 elsewhere),
//! matching plane waves across both edges gives the transmission probability
//! ```text
//!                 V₀² sinh²(κ a)
//! 1 / T = 1 + ----------------,    κ = √(2 m (V₀ - E)) / ħ,   E < V₀
//!              4 E (V₀ - E)
//!
//!                 V₀² sin²(k a)
//! 1 / T = 1 + ---------------,     k = √(2 m (E - V₀)) / ħ,   E > V₀
//!              4 E (E - V₀)
//! ```
//! Both expressions are 0/0 at *E* = *V*<sub>0</sub>, but the singularity is
//! removable: writing *V*<sub>0</sub> - *E* = *ħ*²*κ*²/2*m* gives
//! ```text
//!              m V₀²  ⎛ sinh(κ a) ⎞²
//! 1 / T = 1 + ------- ⎜-----------⎟
//!             2 E ħ²  ⎝     κ     ⎠
//! ```
//! and likewise for the second branch, so that as *κ*, *k* → 0,
//! ```text
//! T → 1 / (1 + m V₀ a² / 2 ħ²)
//! ```
//! Above the barrier, *T* = 1 whenever *ka* = *jπ* for integer *j* > 0
//! (transmission resonances), and *T* → 1 as *E* → ∞. Below the barrier, *T*
//! increases monotonically with *E* and vanishes as *E* → 0.
//!
//! # First-order perturbation theory
//! Adding a small potential *V*′ to the oscillator shifts the *n*-th level by
//! ```text
//! ΔEₙ = ⟨ψₙ| V' |ψₙ⟩ + O(V'²)
//! ```
//! Three perturbations are considered:
//! - *λ* *x*³: the integrand is odd, so Δ*E*<sub>n</sub> = 0 for all *n*. The
//!   perturbed potential is unbounded below, and its "levels" are only
//!   metastable.
//! - *λ* *x*⁴: Δ*E*<sub>n</sub> = *λ* (*ħ*/2*mω*)² (6*n*² + 6*n* + 3) > 0.
//! - -*mFx* (uniform field): Δ*E*<sub>n</sub> = 0 at first order, while the
//!   exact shift is -*mF*²/2*ω*², since completing the square only displaces
//!   the oscillator.
//!
//! The corrections are computed numerically with Simpson's rule[^1] over a
//! finite grid. For an even number of samples, the last interval is integrated
//! with the three-point rule
//! ```text
//! ∫ f dx ≈ (h / 12) (5 f[N - 1] + 8 f[N - 2] - f[N - 3])
//! ```
//! over [*x*\[*N* - 2\], *x*\[*N* - 1\]].
//!
//! # Numerical checks
//! Bound states of the perturbed potentials are found with Numerov's
//! method[^2], a three-point scheme for equations of the form ∂²*f*/∂*x*² =
//! -*Q*(*x*) *f*(*x*) with local error *O*(*δx*⁶):
//! ```text
//!      δx²                             5 δx²                   δx²
//! (1 + --- Q[i + 1]) f[i + 1] = 2 (1 - ----- Q[i]) f[i] - (1 + --- Q[i - 1]) f[i - 1]
//!      12                               12                     12
//! ```
//! with *Q*(*x*) = (2*m*/*ħ*²)(*E* - *V*(*x*)). Integrating from the left edge
//! of the grid with *f* = 0 there, the number of sign changes in *f* equals the
//! number of levels below *E* (for a grid whose right edge also has *f* = 0),
//! so bisecting on the node count brackets a level with a known index.
//!
//! Within that bracket the level is refined with the renormalized scheme[^3].
//! Writing *F*\[*i*\] = (1 + *δx*² *Q*\[*i*\] / 12) *f*\[*i*\], only the ratios
//! *R*\[*i*\] = *F*\[*i* + 1\] / *F*\[*i*\] are propagated, from both edges of the
//! grid toward a matching point *m*:
//! ```text
//!                                       12 - 10 (1 + δx² Q[i] / 12)
//! R[i] = U[i] - 1 / R[i - 1],    U[i] = ---------------------------
//!                                           1 + δx² Q[i] / 12
//! ```
//! The two solutions describe the same bound state only when
//! *U*\[*m*\] - *F*\[*m* - 1\]/*F*\[*m*\] - *F*\[*m* + 1\]/*F*\[*m*\] = 0, with each
//! ratio taken from the side it was integrated on, and a secant search on this
//! criterion converges superlinearly.
//!
//! [^1]: W. H. Press, S. A. Teukolsky, W. T. Vetterling, and B. P. Flannery,
//! *Numerical Recipes: The Art of Scientific Computing*, 3rd ed., §4.1.
//!
//! [^2]: B. V. Numerov, "Note on the numerical integration of d²x/dt² =
//! f(x, t)." Astron. Nachr. **230** 19 (1927).
//!
//! [^3]: B. R. Johnson, "New numerical methods applied to solving the
//! one-dimensional eigenvalue problem." J. Chem. Phys. **67**:4086 (1977).
