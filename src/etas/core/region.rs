//! Per-region fitting configuration.
//!
//! A [`RegionConfig`] carries everything the orchestrator needs that is not
//! in the catalog: the label written to the output record, the expected
//! completeness magnitude, the optimizer box, the pre-calibrated baseline
//! used when optimization is unavailable or fails, and an optional default
//! starting point. Configs (de)serialize with serde so presets can be kept
//! as JSON next to the catalogs they describe.
use crate::etas::{
    core::params::{EtasParams, ParamBounds},
    errors::{EtasError, EtasResult},
};
use serde::{Deserialize, Serialize};

/// Starting point used when neither the caller nor the region supplies one.
pub const DEFAULT_INITIAL_GUESS: EtasParams = EtasParams::new(0.01, 0.02, 0.01, 1.1, 1.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Opaque label copied into the fit record.
    pub label: String,
    /// Completeness magnitude the region's catalogs are expected to use.
    pub m0: f64,
    /// Optimizer box; the default bounds when omitted.
    #[serde(default)]
    pub bounds: ParamBounds,
    /// Fallback parameters.
    pub baseline: EtasParams,
    /// Default starting point for this region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_guess: Option<EtasParams>,
}

impl RegionConfig {
    /// Construct a validated region configuration.
    ///
    /// # Errors
    /// - See [`RegionConfig::validate`].
    pub fn new(
        label: impl Into<String>, m0: f64, bounds: ParamBounds, baseline: EtasParams,
        initial_guess: Option<EtasParams>,
    ) -> EtasResult<Self> {
        let config = Self { label: label.into(), m0, bounds, baseline, initial_guess };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON preset.
    ///
    /// # Errors
    /// - [`EtasError::InvalidConfig`] when the JSON does not describe a
    ///   region.
    /// - See [`RegionConfig::validate`].
    pub fn from_json(text: &str) -> EtasResult<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|err| EtasError::InvalidConfig { reason: err.to_string() })?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// - [`EtasError::InvalidConfig`] for an empty label.
    /// - [`EtasError::InvalidCompleteness`] for a non-finite `m0`.
    /// - [`EtasError::Param`] for malformed bounds or a non-finite baseline
    ///   or initial guess.
    pub fn validate(&self) -> EtasResult<()> {
        if self.label.trim().is_empty() {
            return Err(EtasError::InvalidConfig { reason: "region label is empty".to_string() });
        }
        if !self.m0.is_finite() {
            return Err(EtasError::InvalidCompleteness { m0: self.m0 });
        }
        self.bounds.validate()?;
        self.baseline.ensure_finite()?;
        if let Some(guess) = &self.initial_guess {
            guess.ensure_finite()?;
        }
        Ok(())
    }

    /// Region default start, or [`DEFAULT_INITIAL_GUESS`].
    pub fn initial_guess(&self) -> EtasParams {
        self.initial_guess.unwrap_or(DEFAULT_INITIAL_GUESS)
    }

    /// Dead Sea Fault preset: `m0 = 2.0`, default bounds, and the calibrated
    /// baseline `mu = 0.01, K = 0.025, c = 0.012, p = 1.15, alpha = 0.95`.
    pub fn dead_sea_fault() -> Self {
        Self {
            label: "Dead_Sea_Fault".to_string(),
            m0: 2.0,
            bounds: ParamBounds::default(),
            baseline: EtasParams::new(0.01, 0.025, 0.012, 1.15, 0.95),
            initial_guess: None,
        }
    }
}
