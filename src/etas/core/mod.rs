//! core — ETAS catalog, parameters, kernel, and likelihood evaluator.
//!
//! Purpose
//! -------
//! Collect the numerical and structural building blocks for temporal ETAS
//! models: validated event catalogs, the parameter vector and its optimizer
//! box, the domain guard, the Omori–Utsu kernel, the negative log-likelihood
//! with its gradient, and the configuration types that steer a fit. The
//! model layer in [`crate::etas::models`] builds on these primitives.
//!
//! Invariants & assumptions
//! ------------------------
//! - Catalogs are validated once at construction ([`Catalog::new`]); the
//!   evaluator trusts their ordering, finiteness and completeness.
//! - Infeasible parameters and degenerate rates are absorbed as `+∞` cost by
//!   [`negative_log_likelihood`], never raised as errors.
//! - Bounds are strictly positive, so every θ mapped through
//!   [`ParamBounds::from_theta`] passes [`is_feasible`].
//!
//! Conventions
//! -----------
//! - Time is in days, indices are 0-based in catalog order, and parameter
//!   vectors use the order `(mu, K, c, p, alpha)`.
//! - This module performs no I/O and no logging.

pub mod catalog;
pub mod guards;
pub mod intensity;
pub mod kernel;
pub mod likelihood;
pub mod options;
pub mod params;
pub mod region;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::catalog::{Catalog, Event, MS_PER_DAY};
pub use self::guards::{first_violation, is_feasible};
pub use self::intensity::{conditional_intensity, elevated_risk_percent, triggered_rate};
pub use self::kernel::{contribution, omori_integral};
pub use self::likelihood::{event_sum, integral_term, negative_log_likelihood, nll_gradient};
pub use self::options::{EtasOptions, EvalStrategy, GradientMode, PARALLEL_THRESHOLD};
pub use self::params::{EtasParams, N_PARAMS, PARAM_NAMES, ParamBounds};
pub use self::region::{DEFAULT_INITIAL_GUESS, RegionConfig};

pub mod prelude {
    pub use super::catalog::{Catalog, Event};
    pub use super::likelihood::negative_log_likelihood;
    pub use super::options::{EtasOptions, EvalStrategy, GradientMode};
    pub use super::params::{EtasParams, ParamBounds};
    pub use super::region::RegionConfig;
}
