//! ETAS model in optimizer space.
//!
//! [`EtasModel`] implements [`LogLikelihood`] over unconstrained θ so the
//! generic L-BFGS driver can fit it. θ is mapped into the parameter box by
//! [`ParamBounds::from_theta`]; the log-likelihood is the negated
//! [`negative_log_likelihood`] and the analytic gradient is chained through
//! the diagonal box Jacobian.
use crate::{
    etas::core::{
        catalog::Catalog,
        likelihood::{negative_log_likelihood, nll_gradient},
        options::{EtasOptions, EvalStrategy, GradientMode},
        params::{EtasParams, ParamBounds, validate_theta},
    },
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{Grad, LogLikelihood, Theta},
    },
};

/// θ-space view of the ETAS likelihood for a fixed parameter box.
#[derive(Debug, Clone, PartialEq)]
pub struct EtasModel {
    pub bounds: ParamBounds,
    pub eval_strategy: EvalStrategy,
    pub gradient: GradientMode,
}

impl EtasModel {
    pub fn new(bounds: ParamBounds, options: &EtasOptions) -> Self {
        Self { bounds, eval_strategy: options.eval_strategy, gradient: options.gradient }
    }

    /// Model-space parameters for `theta`.
    ///
    /// # Errors
    /// - `ThetaLengthMismatch` / `InvalidThetaInput` for malformed θ.
    pub fn params(&self, theta: &Theta) -> OptResult<EtasParams> {
        Ok(self.bounds.from_theta(theta)?)
    }
}

impl LogLikelihood for EtasModel {
    type Data = Catalog;

    /// `ℓ(θ) = −NLL(x(θ))`. May be `−∞`, which the adapter reports as
    /// `NonFiniteCost`.
    fn value(&self, theta: &Theta, data: &Catalog) -> OptResult<f64> {
        let params = self.params(theta)?;
        Ok(-negative_log_likelihood(&params, data, self.eval_strategy))
    }

    fn check(&self, theta: &Theta, _data: &Catalog) -> OptResult<()> {
        validate_theta(theta)?;
        Ok(())
    }

    /// `∂ℓ/∂θ_k = −∂NLL/∂x_k · dx_k/dθ_k`.
    ///
    /// # Errors
    /// - `GradientNotImplemented` in finite-difference mode, which hands the
    ///   derivative to the adapter.
    /// - `NonFiniteCost` where the objective is infinite.
    fn grad(&self, theta: &Theta, data: &Catalog) -> OptResult<Grad> {
        if self.gradient == GradientMode::FiniteDifference {
            return Err(OptError::GradientNotImplemented);
        }
        let params = self.params(theta)?;
        let jac = self.bounds.jacobian(theta)?;
        let d_nll = nll_gradient(&params, data, self.eval_strategy)
            .ok_or(OptError::NonFiniteCost { value: f64::INFINITY })?;
        Ok(d_nll.iter().zip(jac).map(|(g, j)| -g * j).collect())
    }
}
