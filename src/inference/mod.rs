//! inference — post-estimation uncertainty for fitted ETAS models.
//!
//! Purpose
//! -------
//! Compute classical (observed-information) standard errors at a fitted
//! parameter vector. The observed information is the finite-difference
//! Hessian of the analytic negative log-likelihood gradient, taken in model
//! space so the reported errors are on the same scale as the estimates.
//!
//! Conventions
//! -----------
//! - Pure numerics: no logging, no global state. Failures are returned as
//!   `OptResult` and the caller decides whether they are fatal (the fit
//!   orchestrator logs and carries on without standard errors).
//!
//! Testing notes
//! -------------
//! - Unit tests in [`hessian`] check the eigen-based solve on quadratics with
//!   known information matrices and the ETAS wrapper on a small catalog.

pub mod hessian;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::hessian::{calc_standard_errors, etas_standard_errors};

pub mod prelude {
    pub use super::hessian::{calc_standard_errors, etas_standard_errors};
}
