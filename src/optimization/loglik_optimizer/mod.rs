//! loglik_optimizer — argmin-powered log-likelihood maximizer.
//!
//! Purpose
//! -------
//! Provide the optimization engine behind ETAS fitting. Callers implement
//! [`LogLikelihood`] for their model and invoke [`maximize`] to run L-BFGS
//! with a configurable line search, tolerances, and a finite-difference
//! fallback when no analytic gradient is supplied.
//!
//! Key behaviors
//! -------------
//! - Convert a log-likelihood `ℓ(θ)` into the argmin cost `c(θ) = -ℓ(θ)` via
//!   [`adapter::ArgMinAdapter`].
//! - [`maximize`] validates the initial guess with [`LogLikelihood::check`],
//!   builds the solver in [`builders`], runs it through [`run::run_lbfgs`] and
//!   normalizes the final state into an [`OptimOutcome`].
//! - [`finite_diff`] supplies forward-difference gradients and validated,
//!   symmetrized Hessians; the inference layer reuses the Hessian helper for
//!   standard errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer always maximizes `ℓ(θ)`; user code returns `ℓ(θ)` and
//!   `∇ℓ(θ)`, never the cost.
//! - [`OptimOutcome::converged`] is `true` only when the solver met its own
//!   stopping rule; an exhausted iteration budget is reported as
//!   not converged.
//!
//! Conventions
//! -----------
//! - Parameters live in unconstrained optimizer space as [`Theta`]. Mapping
//!   between bounded model space and θ happens in the model layer.
//! - Errors bubble up as [`OptResult<T>`]; nothing in here panics on bad
//!   numeric input.
//!
//! Testing notes
//! -------------
//! - Unit tests cover tolerance validation, solver construction, the
//!   finite-difference paths, adapter sign conventions, and a small quadratic
//!   fit through [`maximize`].

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
