//! etas — temporal ETAS likelihood and bounded maximum-likelihood fitting.
//!
//! Purpose
//! -------
//! Provide the ETAS (Epidemic-Type Aftershock Sequence) stack: validated
//! earthquake catalogs, the Omori–Utsu triggering kernel, the negative
//! log-likelihood with its analytic gradient, and a fit orchestrator that
//! minimizes it inside a parameter box and degrades to a calibrated regional
//! baseline when the optimizer is unavailable or does not converge.
//!
//! Key behaviors
//! -------------
//! - [`core`]: catalogs, parameters and bounds, the domain guard, kernel,
//!   evaluator, conditional intensity, options, and region presets.
//! - [`models`]: the θ-space adapter for the generic optimizer, the
//!   [`BoundedMinimizer`] implementations, [`FitOrchestrator`], and output
//!   records and sinks.
//! - [`errors`]: [`EtasError`] / [`ParamError`] and their result aliases.
//!
//! Invariants & assumptions
//! ------------------------
//! - Only malformed input (catalog, region configuration, seed) is a hard
//!   error. Numerical degeneracy is `+∞` cost; optimizer trouble is a
//!   flagged fallback result.
//! - The model is
//!   `λ(t) = mu + Σ_{t_i < t} K·e^{alpha(m_i − m0)} / (t − t_i + c)^p`
//!   with parameters in the order `(mu, K, c, p, alpha)`.
//!
//! Downstream usage
//! ----------------
//! 1. Build a [`Catalog`] (days since an origin, magnitudes ≥ `m0`).
//! 2. Pick a [`RegionConfig`] (e.g. [`RegionConfig::dead_sea_fault`] or
//!    [`RegionConfig::from_json`]) and [`EtasOptions`].
//! 3. `FitOrchestrator::new(region, options, true)?.fit(&catalog, None)?`,
//!    or `fit_and_publish` with a [`JsonSink`].

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    Catalog, EtasOptions, EtasParams, EvalStrategy, Event, GradientMode, ParamBounds, RegionConfig,
    negative_log_likelihood,
};

pub use self::errors::{EtasError, EtasResult, ParamError, ParamResult};

pub use self::models::{BoundedMinimizer, FitOrchestrator, FitRecord, FitResult, FitSink, JsonSink};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use etas_mle::etas::prelude::*;
//
// to import the everyday fitting surface in a single line.

pub mod prelude {
    pub use super::{
        BoundedMinimizer, Catalog, EtasError, EtasOptions, EtasParams, EtasResult, EvalStrategy,
        Event, FitOrchestrator, FitRecord, FitResult, FitSink, GradientMode, JsonSink, ParamBounds,
        ParamError, RegionConfig, negative_log_likelihood,
    };
}
