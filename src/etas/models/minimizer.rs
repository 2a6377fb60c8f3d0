//! Bounded minimizers for the ETAS objective.
//!
//! [`BoundedMinimizer`] is the capability the fit orchestrator depends on:
//! minimize the negative log-likelihood of a catalog from a starting point
//! inside a parameter box. Two implementations exist:
//! - [`LbfgsMinimizer`]: argmin L-BFGS in θ-space through [`EtasModel`].
//! - [`FallbackMinimizer`]: ignores its inputs and reports the region's
//!   baseline as unavailable, for builds or deployments without an optimizer.
//!
//! Neither implementation returns an error. Failures inside the optimizer are
//! reported as [`MinimizeStatus::NotConverged`] with a message, so the
//! orchestrator's fallback policy sees every outcome.
use crate::{
    etas::{
        core::{
            catalog::Catalog,
            likelihood::negative_log_likelihood,
            options::{EtasOptions, EvalStrategy},
            params::{EtasParams, ParamBounds},
        },
        models::etas::EtasModel,
    },
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{Theta, maximize},
    },
};

/// How a minimization run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinimizeStatus {
    /// The solver's own stopping criterion was met.
    Converged,
    /// The solver stopped without converging or failed numerically.
    NotConverged,
    /// No optimizer ran.
    Unavailable,
}

/// Result of one [`BoundedMinimizer::minimize`] call.
///
/// - `params`: best parameters found (inside the box for [`LbfgsMinimizer`]).
/// - `objective`: negative log-likelihood at `params`.
/// - `status` / `message`: outcome and a human-readable description.
/// - `iterations`: solver iterations, `0` when nothing ran.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizeOutcome {
    pub params: EtasParams,
    pub objective: f64,
    pub status: MinimizeStatus,
    pub message: String,
    pub iterations: usize,
}

impl MinimizeOutcome {
    pub fn converged(&self) -> bool {
        self.status == MinimizeStatus::Converged
    }
}

/// Minimize the ETAS negative log-likelihood inside a box.
pub trait BoundedMinimizer: Send + Sync {
    fn minimize(
        &self, catalog: &Catalog, initial_guess: &EtasParams, bounds: &ParamBounds,
    ) -> MinimizeOutcome;
}

/// L-BFGS in logistic θ-space.
#[derive(Debug, Clone, PartialEq)]
pub struct LbfgsMinimizer {
    pub options: EtasOptions,
}

impl LbfgsMinimizer {
    pub fn new(options: EtasOptions) -> Self {
        Self { options }
    }

    fn run(
        &self, model: &EtasModel, theta0: Theta, catalog: &Catalog,
    ) -> OptResult<MinimizeOutcome> {
        let out = maximize(model, theta0, catalog, &self.options.mle_opts)?;
        let params = model.params(&out.theta_hat)?;
        let status =
            if out.converged { MinimizeStatus::Converged } else { MinimizeStatus::NotConverged };
        Ok(MinimizeOutcome {
            params,
            objective: -out.value,
            status,
            message: out.status,
            iterations: out.iterations,
        })
    }
}

impl BoundedMinimizer for LbfgsMinimizer {
    /// Project the guess into the box, run L-BFGS, and map the optimum back.
    ///
    /// On any optimizer error the outcome carries the projected start, its
    /// objective, and the error text.
    fn minimize(
        &self, catalog: &Catalog, initial_guess: &EtasParams, bounds: &ParamBounds,
    ) -> MinimizeOutcome {
        let model = EtasModel::new(*bounds, &self.options);
        let theta0 = bounds.to_theta(initial_guess);
        self.run(&model, theta0.clone(), catalog).unwrap_or_else(|err| {
            let params =
                bounds.from_theta(&theta0).unwrap_or_else(|_| bounds.project(initial_guess));
            MinimizeOutcome {
                params,
                objective: negative_log_likelihood(&params, catalog, self.options.eval_strategy),
                status: MinimizeStatus::NotConverged,
                message: err.to_string(),
                iterations: 0,
            }
        })
    }
}

/// Constant minimizer returning a fixed baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackMinimizer {
    pub baseline: EtasParams,
    pub eval_strategy: EvalStrategy,
}

impl FallbackMinimizer {
    pub fn new(baseline: EtasParams, eval_strategy: EvalStrategy) -> Self {
        Self { baseline, eval_strategy }
    }
}

impl BoundedMinimizer for FallbackMinimizer {
    fn minimize(&self, catalog: &Catalog, _: &EtasParams, _: &ParamBounds) -> MinimizeOutcome {
        MinimizeOutcome {
            params: self.baseline,
            objective: negative_log_likelihood(&self.baseline, catalog, self.eval_strategy),
            status: MinimizeStatus::Unavailable,
            message: OptError::OptimizerUnavailable.to_string(),
            iterations: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        etas::core::catalog::Event,
        optimization::loglik_optimizer::{LineSearcher, MLEOptions, Tolerances},
    };

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The fallback minimizer ignoring its inputs.
    // - L-BFGS staying inside the box and reporting a budget stop as
    //   non-convergence.
    // - An optimizer abort reported as non-convergence at the projected
    //   start.
    //
    // They intentionally DO NOT cover:
    // - Orchestrator fallback policy (see `models::fit`).
    // -------------------------------------------------------------------------

    fn catalog() -> Catalog {
        let events = [(10.5, 2.5), (12.1, 2.1), (45.3, 4.2), (45.4, 2.8), (45.8, 2.3)]
            .into_iter()
            .map(|(t, m)| Event::new(t, m))
            .collect();
        Catalog::new(events, 2.0, 365.0).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // The fallback reports its baseline as unavailable whatever it is given.
    fn fallback_returns_baseline() {
        let baseline = EtasParams::new(0.01, 0.025, 0.012, 1.15, 0.95);
        let m = FallbackMinimizer::new(baseline, EvalStrategy::Sequential);
        let data = catalog();

        let wild = EtasParams::new(9.0, 9.0, 9.0, 9.0, 9.0);

        let out = m.minimize(&data, &wild, &ParamBounds::default());

        assert_eq!(out.params, baseline);
        assert_eq!(out.status, MinimizeStatus::Unavailable);
        assert!(!out.converged());
        assert_eq!(out.iterations, 0);
        let expected = negative_log_likelihood(&baseline, &data, EvalStrategy::Sequential);
        assert_eq!(out.objective, expected);
    }

    #[test]
    // Purpose
    // -------
    // A one-iteration budget is not convergence, and the iterate is still in
    // the box.
    //
    // Given
    // -----
    // - `max_iter = 1`, no gradient or cost tolerance.
    //
    // Expect
    // ------
    // - `NotConverged`, params inside the default bounds, finite objective.
    fn lbfgs_budget_stop_is_not_convergence() {
        let tols = Tolerances::new(None, None, Some(1)).unwrap();
        let mle_opts = MLEOptions::new(tols, LineSearcher::MoreThuente, false, None).unwrap();
        let opts = EtasOptions { mle_opts, std_errors: false, ..EtasOptions::default() };
        let bounds = ParamBounds::default();

        let out = LbfgsMinimizer::new(opts).minimize(
            &catalog(),
            &EtasParams::new(0.01, 0.02, 0.01, 1.1, 1.0),
            &bounds,
        );

        assert_eq!(out.status, MinimizeStatus::NotConverged);
        assert!(bounds.contains(&out.params));
        assert!(out.objective.is_finite());
    }

    #[test]
    // Purpose
    // -------
    // A numerical failure inside argmin is absorbed into `NotConverged`
    // instead of surfacing as an error.
    //
    // Given
    // -----
    // - A final event 800 magnitude units above `m0`, so its productivity
    //   `K·e^{alpha·800}` overflows at the start and the first cost is
    //   non-finite.
    //
    // Expect
    // ------
    // - `NotConverged`, zero iterations, params inside the box, and a
    //   non-empty message.
    fn lbfgs_abort_is_not_convergence() {
        let events = vec![Event::new(10.5, 2.5), Event::new(45.3, 2.0 + 800.0)];
        let data = Catalog::new(events, 2.0, 365.0).unwrap();
        let bounds = ParamBounds::default();
        let opts = EtasOptions { std_errors: false, ..EtasOptions::default() };

        let out = LbfgsMinimizer::new(opts).minimize(
            &data,
            &EtasParams::new(0.01, 0.02, 0.01, 1.1, 1.0),
            &bounds,
        );

        assert_eq!(out.status, MinimizeStatus::NotConverged);
        assert_eq!(out.iterations, 0);
        assert!(bounds.contains(&out.params));
        assert!(!out.message.is_empty());
        assert_eq!(out.objective, f64::INFINITY);
    }
}
