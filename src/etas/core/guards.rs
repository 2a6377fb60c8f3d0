//! Domain guard for candidate ETAS parameters.
//!
//! The evaluator calls [`is_feasible`] before any arithmetic and returns
//! `+∞` when it fails. The check is independent of the optimizer's box:
//! line searches may step outside the declared bounds, and callers may
//! evaluate arbitrary vectors directly.
use crate::etas::core::params::{EtasParams, PARAM_NAMES};

/// `true` when every component is finite and strictly positive.
pub fn is_feasible(params: &EtasParams) -> bool {
    first_violation(params).is_none()
}

/// Name and value of the first component that is not finite and `> 0`.
pub fn first_violation(params: &EtasParams) -> Option<(&'static str, f64)> {
    PARAM_NAMES.into_iter().zip(params.to_array()).find(|&(_, v)| !(v.is_finite() && v > 0.0))
}
