//! ETAS negative log-likelihood and its analytic gradient.
//!
//! Purpose
//! -------
//! Evaluate the objective the optimizer minimizes,
//!
//! ```text
//! NLL(θ) = I − S
//! S = Σ_i ln( mu + Σ_{j<i} K e^{α(m_j − m0)} / (t_i − t_j + c)^p )
//! I = mu · t_end + Σ_j K e^{α(m_j − m0)} · ∫_0^{t_end − t_j} (s + c)^{−p} ds
//! ```
//!
//! and its gradient with respect to `(mu, K, c, p, alpha)`.
//!
//! Key behaviors
//! -------------
//! - The domain guard runs first; infeasible vectors cost `+∞` with no
//!   further work.
//! - A per-event rate that is not strictly positive makes the whole
//!   objective `+∞`. So does any non-finite total.
//! - Neither case is an error. Both are routine while a line search explores
//!   the parameter space.
//!
//! Complexity
//! ----------
//! The event-sum term pairs every event with all earlier ones and is
//! `O(n²)`. This is inherent to the model. Each `rate_i` is independent once
//! the parameters are fixed, so the outer loop is a plain reduction; with
//! [`EvalStrategy::Parallel`] (or `Auto` on large catalogs) it runs on the
//! rayon pool. The integral term is an `O(n)` reduction handled the same
//! way.
//!
//! Conventions
//! -----------
//! - Gradients are returned as `[f64; N_PARAMS]` in model-space order.
//! - Nothing here logs or allocates beyond the reduction itself.
use crate::{
    etas::core::{
        catalog::{Catalog, Event},
        guards::is_feasible,
        kernel::{contribution, omori_integral},
        options::EvalStrategy,
        params::{EtasParams, N_PARAMS},
    },
    optimization::numerical_stability::{power_diff_quotient, power_diff_quotient_dq},
};
use rayon::prelude::*;

type ParamGrad = [f64; N_PARAMS];

/// Negative log-likelihood of `catalog` under `params`.
///
/// Returns `+∞` for infeasible parameters, a non-positive event rate, or a
/// non-finite result.
pub fn negative_log_likelihood(
    params: &EtasParams, catalog: &Catalog, strategy: EvalStrategy,
) -> f64 {
    if !is_feasible(params) {
        return f64::INFINITY;
    }
    let Some(sum) = event_sum(params, catalog, strategy) else {
        return f64::INFINITY;
    };
    let nll = integral_term(params, catalog, strategy) - sum;
    if nll.is_finite() { nll } else { f64::INFINITY }
}

/// `S = Σ_i ln(rate_i)`, or `None` when some `rate_i ≤ 0`.
///
/// Does not run the domain guard.
pub fn event_sum(params: &EtasParams, catalog: &Catalog, strategy: EvalStrategy) -> Option<f64> {
    let events = catalog.events();
    let m0 = catalog.m0();
    let log_rate = |i: usize| {
        let rate = rate_at(params, m0, events, i);
        (rate > 0.0).then(|| rate.ln())
    };

    if strategy.is_parallel(events.len()) {
        (0..events.len()).into_par_iter().map(log_rate).try_reduce(|| 0.0, |a, b| Some(a + b))
    } else {
        (0..events.len()).map(log_rate).try_fold(0.0, |acc, term| term.map(|v| acc + v))
    }
}

/// `I = mu · t_end + Σ_j omori_integral_j`.
///
/// Does not run the domain guard.
pub fn integral_term(params: &EtasParams, catalog: &Catalog, strategy: EvalStrategy) -> f64 {
    let events = catalog.events();
    let (m0, t_end) = (catalog.m0(), catalog.t_end());
    let per_event = |src: &Event| omori_integral(params, m0, t_end, src);

    let triggered: f64 = if strategy.is_parallel(events.len()) {
        events.par_iter().map(per_event).sum()
    } else {
        events.iter().map(per_event).sum()
    };
    params.mu * t_end + triggered
}

/// Gradient of [`negative_log_likelihood`] in model space.
///
/// Returns `None` when the objective is `+∞` or a component is not finite.
pub fn nll_gradient(
    params: &EtasParams, catalog: &Catalog, strategy: EvalStrategy,
) -> Option<ParamGrad> {
    if !is_feasible(params) {
        return None;
    }
    let d_sum = event_sum_gradient(params, catalog, strategy)?;
    let d_int = integral_gradient(params, catalog, strategy);
    let mut grad = d_int;
    for (g, s) in grad.iter_mut().zip(d_sum) {
        *g -= s;
    }
    grad.iter().all(|g| g.is_finite()).then_some(grad)
}

// ---- Helper Methods ----

/// `mu + Σ_{j<i} contribution(t_i, t_j, m_j)`.
fn rate_at(params: &EtasParams, m0: f64, events: &[Event], i: usize) -> f64 {
    let t_i = events[i].time;
    params.mu + events[..i].iter().map(|src| contribution(params, m0, t_i, src)).sum::<f64>()
}

/// `∇S = Σ_i ∇rate_i / rate_i`.
fn event_sum_gradient(
    params: &EtasParams, catalog: &Catalog, strategy: EvalStrategy,
) -> Option<ParamGrad> {
    let events = catalog.events();
    let m0 = catalog.m0();
    let per_event = |i: usize| -> Option<ParamGrad> {
        let t_i = events[i].time;
        let mut rate = params.mu;
        let mut d_rate = [1.0, 0.0, 0.0, 0.0, 0.0];
        for src in &events[..i] {
            let dt = t_i - src.time;
            if dt <= 0.0 {
                continue;
            }
            let g = contribution(params, m0, t_i, src);
            let lag = dt + params.c;
            rate += g;
            d_rate[1] += g / params.k;
            d_rate[2] -= params.p * g / lag;
            d_rate[3] -= g * lag.ln();
            d_rate[4] += g * (src.magnitude - m0);
        }
        (rate > 0.0).then(|| d_rate.map(|d| d / rate))
    };

    if strategy.is_parallel(events.len()) {
        (0..events.len())
            .into_par_iter()
            .map(per_event)
            .try_reduce(|| [0.0; N_PARAMS], |a, b| Some(add(a, b)))
    } else {
        (0..events.len()).map(per_event).try_fold([0.0; N_PARAMS], |acc, d| d.map(|d| add(acc, d)))
    }
}

/// `∇I`. With `x = t_end − t_j + c`, `q = 1 − p` and `A_j` the productivity:
/// `∂c = A_j (x^{−p} − c^{−p})`, `∂p = −A_j ∂Q/∂q`.
fn integral_gradient(params: &EtasParams, catalog: &Catalog, strategy: EvalStrategy) -> ParamGrad {
    let events = catalog.events();
    let (m0, t_end) = (catalog.m0(), catalog.t_end());
    let (c, p) = (params.c, params.p);
    let q = 1.0 - p;
    let per_event = |src: &Event| -> ParamGrad {
        let span = t_end - src.time;
        if span <= 0.0 {
            return [0.0; N_PARAMS];
        }
        let a = params.productivity(src.magnitude, m0);
        let x = span + c;
        let integral = a * power_diff_quotient(x, c, q);
        [
            0.0,
            integral / params.k,
            a * (x.powf(-p) - c.powf(-p)),
            -a * power_diff_quotient_dq(x, c, q),
            integral * (src.magnitude - m0),
        ]
    };

    let mut grad = if strategy.is_parallel(events.len()) {
        events.par_iter().map(per_event).reduce(|| [0.0; N_PARAMS], add)
    } else {
        events.iter().map(per_event).fold([0.0; N_PARAMS], add)
    };
    grad[0] += t_end;
    grad
}

fn add(mut a: ParamGrad, b: ParamGrad) -> ParamGrad {
    for (x, y) in a.iter_mut().zip(b) {
        *x += y;
    }
    a
}
