//! etas_mle — ETAS likelihood evaluation and bounded maximum-likelihood
//! fitting for earthquake catalogs.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers. The crate evaluates the
//! temporal ETAS negative log-likelihood of a catalog, fits its five
//! parameters with box-bounded L-BFGS, and falls back to a calibrated
//! regional baseline when fitting is unavailable or does not converge.
//!
//! Key behaviors
//! -------------
//! - [`etas`]: catalog, kernel, domain guard, evaluator, region presets,
//!   fit orchestrator, and output records.
//! - [`optimization`]: a generic log-likelihood maximizer over argmin with
//!   finite-difference helpers and numerically stable transforms.
//! - [`inference`]: observed-information standard errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - The core performs no network, filesystem, or environment access; output
//!   goes to a caller-supplied [`etas::FitSink`].
//! - Independent fitting runs share no mutable state and may run on separate
//!   threads.
//!
//! Conventions
//! -----------
//! - Errors are hand-written enums per layer (`EtasError`, `ParamError`,
//!   `OptError`) with `From` conversions across layer boundaries.
//! - Logging goes through the `log` facade and is emitted only by the fit
//!   orchestrator; install any `log` backend to see it.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use etas_mle::etas::prelude::*;
//!
//! let events = vec![Event::new(10.5, 2.5), Event::new(45.3, 4.2), Event::new(45.4, 2.8)];
//! let catalog = Catalog::new(events, 2.0, 365.0).unwrap();
//! let orch = FitOrchestrator::new(RegionConfig::dead_sea_fault(), EtasOptions::default(), false)
//!     .unwrap();
//!
//! let result = orch.fit(&catalog, None).unwrap();
//! assert!(!result.converged);
//! assert_eq!(result.region_label, "Dead_Sea_Fault");
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/integration_etas_pipeline.rs`
//!   exercises catalog → fit → record end to end.

pub mod etas;
pub mod inference;
pub mod optimization;
