//! Fit orchestration: start point, minimization, fallback, and packaging.
//!
//! [`FitOrchestrator`] owns a region configuration, evaluator options, and a
//! [`BoundedMinimizer`]. A run never fails because the optimizer is missing
//! or does not converge; in both cases the region baseline is reported with
//! `converged = false` and the reason in `status`. Only malformed input
//! (a catalog rejected at construction, or a non-finite seed) is an error.
//!
//! This is the only layer in the crate that logs.
use crate::{
    etas::{
        core::{
            catalog::Catalog, likelihood::negative_log_likelihood, options::EtasOptions,
            params::EtasParams, region::RegionConfig,
        },
        errors::EtasResult,
        models::{
            minimizer::{BoundedMinimizer, FallbackMinimizer, LbfgsMinimizer, MinimizeStatus},
            record::{Attempt, FitRecord, FitResult, FitSink},
        },
    },
    inference::hessian::etas_standard_errors,
};

pub struct FitOrchestrator {
    region: RegionConfig,
    options: EtasOptions,
    minimizer: Box<dyn BoundedMinimizer>,
}

impl std::fmt::Debug for FitOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FitOrchestrator")
            .field("region", &self.region)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl FitOrchestrator {
    /// Build an orchestrator, resolving optimizer availability once.
    ///
    /// `has_optimizer = false` installs a [`FallbackMinimizer`] over the
    /// region baseline.
    ///
    /// # Errors
    /// - Any [`RegionConfig::validate`] failure.
    pub fn new(
        region: RegionConfig, options: EtasOptions, has_optimizer: bool,
    ) -> EtasResult<Self> {
        let minimizer: Box<dyn BoundedMinimizer> = if has_optimizer {
            Box::new(LbfgsMinimizer::new(options.clone()))
        } else {
            Box::new(FallbackMinimizer::new(region.baseline, options.eval_strategy))
        };
        Self::with_minimizer(region, options, minimizer)
    }

    /// Build an orchestrator around a caller-supplied minimizer.
    ///
    /// # Errors
    /// - Any [`RegionConfig::validate`] failure.
    pub fn with_minimizer(
        region: RegionConfig, options: EtasOptions, minimizer: Box<dyn BoundedMinimizer>,
    ) -> EtasResult<Self> {
        region.validate()?;
        Ok(Self { region, options, minimizer })
    }

    pub fn region(&self) -> &RegionConfig {
        &self.region
    }

    pub fn options(&self) -> &EtasOptions {
        &self.options
    }

    /// Fit the region's ETAS parameters to `catalog`.
    ///
    /// The start is `seed` when given, otherwise the region's initial guess.
    /// On convergence the optimum is reported, with standard errors when
    /// enabled. Otherwise the region baseline is reported, its objective
    /// evaluated on `catalog`, and any attempted iterate kept in `attempt`.
    ///
    /// # Errors
    /// - [`crate::etas::errors::EtasError::Param`] for a non-finite seed.
    pub fn fit(&self, catalog: &Catalog, seed: Option<EtasParams>) -> EtasResult<FitResult> {
        if let Some(seed) = &seed {
            seed.ensure_finite()?;
        }
        if catalog.m0() != self.region.m0 {
            log::warn!(
                "region {}: catalog m0 = {} differs from configured m0 = {}",
                self.region.label,
                catalog.m0(),
                self.region.m0
            );
        }
        let guess = seed.unwrap_or_else(|| self.region.initial_guess());
        log::info!(
            "region {}: fitting {} events over {} days from {:?}",
            self.region.label,
            catalog.len(),
            catalog.t_end(),
            guess
        );

        let outcome = self.minimizer.minimize(catalog, &guess, &self.region.bounds);
        log::debug!(
            "region {}: minimizer finished with {:?} after {} iterations ({})",
            self.region.label,
            outcome.status,
            outcome.iterations,
            outcome.message
        );

        let (parameters, objective_value, attempt) = match outcome.status {
            MinimizeStatus::Converged => {
                log::info!(
                    "region {}: converged, objective = {}",
                    self.region.label,
                    outcome.objective
                );
                (outcome.params, outcome.objective, None)
            }
            MinimizeStatus::NotConverged => {
                log::warn!(
                    "region {}: optimizer did not converge ({}); using baseline",
                    self.region.label,
                    outcome.message
                );
                let attempt = Attempt { params: outcome.params, objective: outcome.objective };
                (self.region.baseline, self.baseline_objective(catalog), Some(attempt))
            }
            MinimizeStatus::Unavailable => {
                log::warn!(
                    "region {}: optimizer unavailable ({}); using baseline",
                    self.region.label,
                    outcome.message
                );
                (self.region.baseline, self.baseline_objective(catalog), None)
            }
        };

        let converged = outcome.status == MinimizeStatus::Converged;
        let std_errors = if converged && self.options.std_errors {
            match etas_standard_errors(&parameters, catalog, self.options.eval_strategy) {
                Ok(se) => Some(se),
                Err(err) => {
                    log::warn!(
                        "region {}: standard errors unavailable: {}",
                        self.region.label,
                        err
                    );
                    None
                }
            }
        } else {
            None
        };

        Ok(FitResult {
            parameters,
            converged,
            objective_value,
            region_label: self.region.label.clone(),
            m0: catalog.m0(),
            status: outcome.message,
            iterations: outcome.iterations,
            attempt,
            std_errors,
        })
    }

    /// [`FitOrchestrator::fit`], then publish the record to `sink`.
    ///
    /// # Errors
    /// - Any error from [`FitOrchestrator::fit`].
    /// - [`crate::etas::errors::EtasError::SinkFailed`] from the sink.
    pub fn fit_and_publish<S: FitSink + ?Sized>(
        &self, catalog: &Catalog, seed: Option<EtasParams>, sink: &mut S,
    ) -> EtasResult<FitResult> {
        let result = self.fit(catalog, seed)?;
        sink.publish(&FitRecord::from(&result))?;
        Ok(result)
    }

    fn baseline_objective(&self, catalog: &Catalog) -> f64 {
        negative_log_likelihood(&self.region.baseline, catalog, self.options.eval_strategy)
    }
}
