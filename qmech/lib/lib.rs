#![allow(dead_code)]

//! Provides evaluators for a handful of closed-form results in one-dimensional
//! quantum mechanics, along with the quadrature needed to apply them on a
//! sampled grid:
//! - Harmonic oscillator energy levels and normalized Hermite-Gaussian
//!   eigenfunctions
//! - Transmission through a rectangular potential barrier
//! - First-order energy corrections for cubic, quartic, and uniform-field
//!   perturbations to the harmonic oscillator, with a Numerov-based check
//!   against the perturbed levels themselves
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod grid;
pub mod oscillator;
pub mod tunneling;
pub mod perturbation;
pub mod numerov;

pub mod docs;

pub(crate) const DEF_EPSILON: f64 = 1e-9;
pub(crate) const DEF_MAXITERS: usize = 1000;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
