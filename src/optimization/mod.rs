//! optimization — argmin-backed MLE stack, bounded transforms, and error surface.
//!
//! Purpose
//! -------
//! Provide the generic optimization layer used to fit ETAS models: a
//! log-likelihood maximizer built on argmin's L-BFGS, numerically stable
//! transforms that map box-bounded parameters into an unconstrained search
//! space, and a single error/result surface. Model code implements a
//! log-likelihood, picks tolerances, and receives fitted parameters plus
//! diagnostics without touching argmin types.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **maximizing log-likelihoods** `ℓ(θ)`
//!   (`loglik_optimizer`), including solver, line-search and stopping-rule
//!   configuration.
//! - Supply scalar helpers (`numerical_stability`) for the logistic box map
//!   `x = lo + (hi − lo)·σ(θ)`, its inverse, and a cancellation-free form of
//!   the Omori power-difference quotient used by the ETAS integral term.
//! - Normalize configuration issues, numerical failures, backend solver
//!   errors and model-layer errors into [`errors::OptError`] with the alias
//!   [`errors::OptResult`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Optimizers operate in unconstrained θ-space; any box constraint is
//!   realized by the model layer through the logistic map, so every iterate
//!   maps strictly inside its bounds.
//! - Objective values that are not finite abort the argmin run and are
//!   surfaced as `OptError::NonFiniteCost`; callers decide whether that is a
//!   fallback condition or a hard failure.
//!
//! Conventions
//! -----------
//! - All solvers maximize `ℓ(θ)` by minimizing `c(θ) = -ℓ(θ)`; user-facing
//!   outcomes are expressed in terms of `ℓ`.
//! - Parameters, gradients and Hessians use the `ndarray` aliases in
//!   [`loglik_optimizer::types`].
//! - This module performs no I/O and no logging; the ETAS orchestrator is the
//!   only layer that reports progress.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules cover solver wiring, tolerance validation,
//!   finite-difference fallbacks, transform accuracy and error conversions.
//! - End-to-end behavior is exercised through the ETAS model tests and the
//!   integration test in `tests/`.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
