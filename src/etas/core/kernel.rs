//! Omori–Utsu triggering kernel and its closed-form time integral.
//!
//! Purpose
//! -------
//! Pure scalar functions shared by the likelihood evaluator and the
//! intensity helpers:
//! - [`contribution`]: rate added at `t` by an earlier event,
//!   `K·e^{alpha(m − m0)} / (t − t_j + c)^p`.
//! - [`omori_integral`]: that rate integrated from the event time to
//!   `t_end`, the per-event compensator term.
//!
//! Conventions
//! -----------
//! - Lags `≤ 0` contribute nothing; an event does not trigger itself or its
//!   predecessors, and simultaneous events do not trigger each other.
//! - No feasibility checks happen here; callers gate with the domain guard.
//! - The integral is evaluated as `productivity · Q(t_end − t_j + c, c, 1 − p)`
//!   with `Q` the power-difference quotient, so `p = 1` reduces exactly to
//!   the logarithmic form and `p` near 1 does not cancel.
use crate::{
    etas::core::{catalog::Event, params::EtasParams},
    optimization::numerical_stability::power_diff_quotient,
};

/// Rate contribution at time `t` from the earlier event `source`.
///
/// Returns `0.0` for `t ≤ source.time`.
pub fn contribution(params: &EtasParams, m0: f64, t: f64, source: &Event) -> f64 {
    let dt = t - source.time;
    if dt <= 0.0 {
        return 0.0;
    }
    params.productivity(source.magnitude, m0) * (dt + params.c).powf(-params.p)
}

/// `∫_{t_j}^{t_end}` of [`contribution`] for the event `source`.
///
/// Returns `0.0` when the event is not strictly before `t_end`.
pub fn omori_integral(params: &EtasParams, m0: f64, t_end: f64, source: &Event) -> f64 {
    let span = t_end - source.time;
    if span <= 0.0 {
        return 0.0;
    }
    let c = params.c;
    params.productivity(source.magnitude, m0) * power_diff_quotient(span + c, c, 1.0 - params.p)
}
