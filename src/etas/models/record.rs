//! Fit results and their hand-off to output sinks.
//!
//! - [`FitResult`]: the in-memory terminal artifact of one orchestrator run.
//! - [`FitRecord`]: its serialized shape, with the flat field names
//!   `mu, k, c, p, alpha, m0, region, converged` plus optional diagnostics.
//! - [`FitSink`]: where records go. [`JsonSink`] writes pretty JSON to any
//!   `io::Write`; `Vec<FitRecord>` collects in memory.
use crate::etas::{
    core::params::{EtasParams, N_PARAMS},
    errors::{EtasError, EtasResult},
};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// The optimizer iterate that a fallback replaced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub params: EtasParams,
    pub objective: f64,
}

/// Outcome of one fitting run.
///
/// Fields
/// ------
/// - `parameters`: fitted parameters, or the region baseline on fallback.
/// - `converged`: `true` only when the optimizer converged and its estimate
///   is reported.
/// - `objective_value`: negative log-likelihood of the catalog at
///   `parameters`.
/// - `region_label`, `m0`: copied from the configuration and catalog.
/// - `status`: optimizer termination description, or why it did not run.
/// - `iterations`: solver iterations, `0` when nothing ran.
/// - `attempt`: the non-converged iterate and its objective, when a fallback
///   replaced one.
/// - `std_errors`: model-space standard errors, when requested and
///   computable.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    pub parameters: EtasParams,
    pub converged: bool,
    pub objective_value: f64,
    pub region_label: String,
    pub m0: f64,
    pub status: String,
    pub iterations: usize,
    pub attempt: Option<Attempt>,
    pub std_errors: Option<[f64; N_PARAMS]>,
}

/// Flat, serializable view of a [`FitResult`].
///
/// A non-finite objective or standard error is written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitRecord {
    pub mu: f64,
    pub k: f64,
    pub c: f64,
    pub p: f64,
    pub alpha: f64,
    pub m0: f64,
    pub region: String,
    pub converged: bool,
    pub objective: Option<f64>,
    pub status: String,
    pub iterations: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt: Option<Attempt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std_errors: Option<[Option<f64>; N_PARAMS]>,
}

impl From<&FitResult> for FitRecord {
    fn from(result: &FitResult) -> Self {
        let EtasParams { mu, k, c, p, alpha } = result.parameters;
        Self {
            mu,
            k,
            c,
            p,
            alpha,
            m0: result.m0,
            region: result.region_label.clone(),
            converged: result.converged,
            objective: finite(result.objective_value),
            status: result.status.clone(),
            iterations: result.iterations,
            attempt: result.attempt,
            std_errors: result.std_errors.map(|se| se.map(finite)),
        }
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Destination for fit records.
pub trait FitSink {
    /// # Errors
    /// - [`EtasError::SinkFailed`] when the record cannot be written.
    fn publish(&mut self, record: &FitRecord) -> EtasResult<()>;
}

impl FitSink for Vec<FitRecord> {
    fn publish(&mut self, record: &FitRecord) -> EtasResult<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Pretty-printed JSON, one record per `publish`, each followed by a
/// newline and a flush.
#[derive(Debug)]
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FitSink for JsonSink<W> {
    fn publish(&mut self, record: &FitRecord) -> EtasResult<()> {
        serde_json::to_writer_pretty(&mut self.writer, record)
            .map_err(|err| EtasError::SinkFailed { reason: err.to_string() })?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
