//! numerical_stability — guarded transforms and shared tolerances.
//!
//! Purpose
//! -------
//! Collect the small scalar primitives the ETAS stack relies on to stay
//! finite: the logistic box map used to enforce parameter bounds during
//! L-BFGS, and a cancellation-free power-difference quotient for the Omori
//! integral. Shared tolerances (`LOGIT_EPS`, `EIGEN_EPS`) live here so the
//! model and inference layers agree on them.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite `f64`; positivity of bases passed to the power
//!   helpers and `lo < hi` for the box map are checked upstream (domain
//!   guard, `ParamBounds::new`).
//!
//! Conventions
//! -----------
//! - Pure functions only: no I/O, no logging, no global state.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] compare against naive formulas on
//!   safe inputs and check continuity at the `q = 0` branch.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    EIGEN_EPS, LOGIT_EPS, bounded_jacobian, from_bounded, power_diff_quotient,
    power_diff_quotient_dq, safe_logistic, safe_logit, to_bounded,
};

pub mod prelude {
    pub use super::transformations::{
        EIGEN_EPS, LOGIT_EPS, from_bounded, safe_logistic, safe_logit, to_bounded,
    };
}
