//! models — ETAS fitting: optimizer adapter, minimizers, orchestrator, and
//! result records.
//!
//! Purpose
//! -------
//! Turn the pure evaluator in [`crate::etas::core`] into a complete fitting
//! run for one region: map parameters into the optimizer's unconstrained
//! space, minimize inside a box, decide between the optimum and the region
//! baseline, and hand a flat record to an output sink.
//!
//! Key behaviors
//! -------------
//! - [`EtasModel`] implements the generic `LogLikelihood` trait in θ-space,
//!   with the analytic gradient chained through the box Jacobian.
//! - [`BoundedMinimizer`] abstracts the optimizer. [`LbfgsMinimizer`] runs
//!   argmin L-BFGS; [`FallbackMinimizer`] reports the baseline as
//!   unavailable.
//! - [`FitOrchestrator`] resolves optimizer availability once at
//!   construction and never fails a run for lack of convergence.
//! - [`FitRecord`] / [`FitSink`] / [`JsonSink`] package and publish results.
//!
//! Invariants & assumptions
//! ------------------------
//! - Optimizer iterates are always inside the region's bounds (inclusive).
//! - `converged = true` only when the solver's own stopping rule fired; a
//!   reported fallback always carries `converged = false`.
//!
//! Conventions
//! -----------
//! - The orchestrator is the only component that logs, through the `log`
//!   facade. Minimizers and the adapter return values only.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`etas`] check the θ-space gradient against central
//!   differences; [`minimizer`] and [`fit`] cover the fallback policy with
//!   stub minimizers; [`record`] covers JSON output and sink failures.

pub mod etas;
pub mod fit;
pub mod minimizer;
pub mod record;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::etas::EtasModel;
pub use self::fit::FitOrchestrator;
pub use self::minimizer::{
    BoundedMinimizer, FallbackMinimizer, LbfgsMinimizer, MinimizeOutcome, MinimizeStatus,
};
pub use self::record::{Attempt, FitRecord, FitResult, FitSink, JsonSink};

pub mod prelude {
    pub use super::fit::FitOrchestrator;
    pub use super::minimizer::BoundedMinimizer;
    pub use super::record::{FitRecord, FitResult, FitSink, JsonSink};
}
