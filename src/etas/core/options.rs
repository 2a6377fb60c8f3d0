//! ETAS options — configuration for likelihood evaluation and fitting.
//!
//! Purpose
//! -------
//! Collect the knobs that change *how* a fit is computed without changing the
//! model: optimizer settings, whether the evaluator runs on the rayon pool,
//! which gradient the optimizer sees, and whether standard errors are
//! computed after a converged fit.
//!
//! Invariants & assumptions
//! ------------------------
//! - [`EtasOptions`] assumes `MLEOptions` was validated by its own builders;
//!   it adds no cross-field checks.
//! - [`EvalStrategy`] only affects summation order, so sequential and
//!   parallel results agree up to floating-point rounding.
use crate::optimization::loglik_optimizer::MLEOptions;
use serde::{Deserialize, Serialize};

/// Catalog size at which [`EvalStrategy::Auto`] switches to rayon.
pub const PARALLEL_THRESHOLD: usize = 512;

/// How the evaluator reduces over events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EvalStrategy {
    /// Parallel from [`PARALLEL_THRESHOLD`] events upwards, sequential below.
    #[default]
    Auto,
    Sequential,
    Parallel,
}

impl EvalStrategy {
    /// Whether a catalog of `n_events` should be reduced in parallel.
    pub fn is_parallel(self, n_events: usize) -> bool {
        match self {
            EvalStrategy::Auto => n_events >= PARALLEL_THRESHOLD,
            EvalStrategy::Sequential => false,
            EvalStrategy::Parallel => true,
        }
    }
}

/// Gradient handed to the optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GradientMode {
    /// Closed-form gradient of the log-likelihood, chained through the box map.
    #[default]
    Analytic,
    /// Finite differences of the objective, computed by the optimizer adapter.
    FiniteDifference,
}

/// Estimation options for an ETAS fit.
///
/// Fields
/// ------
/// - `mle_opts`: L-BFGS tolerances, line search, memory and verbosity.
/// - `eval_strategy`: sequential or rayon reduction in the evaluator.
/// - `gradient`: analytic or finite-difference gradient.
/// - `std_errors`: compute Hessian-based standard errors after a converged
///   fit.
#[derive(Debug, Clone, PartialEq)]
pub struct EtasOptions {
    pub mle_opts: MLEOptions,
    pub eval_strategy: EvalStrategy,
    pub gradient: GradientMode,
    pub std_errors: bool,
}

impl EtasOptions {
    pub fn new(
        mle_opts: MLEOptions, eval_strategy: EvalStrategy, gradient: GradientMode, std_errors: bool,
    ) -> Self {
        Self { mle_opts, eval_strategy, gradient, std_errors }
    }
}

impl Default for EtasOptions {
    /// Default optimizer options, automatic strategy, analytic gradient, and
    /// standard errors on.
    fn default() -> Self {
        Self {
            mle_opts: MLEOptions::default(),
            eval_strategy: EvalStrategy::Auto,
            gradient: GradientMode::Analytic,
            std_errors: true,
        }
    }
}
