//! Errors for the ETAS stack (catalog validation, parameter/bounds checks,
//! output hand-off, and optimizer failures that reach the caller).
//!
//! Two types live here: [`EtasError`] for catalog and run-level failures and
//! [`ParamError`] for parameter vectors and box bounds. Both implement
//! `Display` / `Error`.
//!
//! ## Conventions
//! - **Indices are 0-based** and refer to catalog order.
//! - Numerical degeneracy inside the objective (infeasible parameters,
//!   non-positive intensity) is **not** an error; the evaluator returns `+∞`
//!   and the optimizer steers away.
//! - Optimizer non-convergence and an unavailable optimizer are handled by
//!   the fallback policy and never reach the caller as errors.

/// Result alias for ETAS operations that may produce [`EtasError`].
pub type EtasResult<T> = Result<T, EtasError>;

/// Result alias for parameter-construction paths that may produce
/// [`ParamError`].
pub type ParamResult<T> = Result<T, ParamError>;

/// Catalog- and run-level errors.
#[derive(Debug, Clone, PartialEq)]
pub enum EtasError {
    // ---- Catalog validation ----
    /// An event time is NaN or ±∞.
    NonFiniteTime { index: usize, value: f64 },

    /// An event time is negative.
    NegativeTime { index: usize, value: f64 },

    /// Event times decrease between `index - 1` and `index`.
    TimeOrderViolated { index: usize, previous: f64, value: f64 },

    /// A magnitude is NaN or ±∞.
    NonFiniteMagnitude { index: usize, value: f64 },

    /// A magnitude lies below the completeness magnitude.
    MagnitudeBelowCompleteness { index: usize, value: f64, m0: f64 },

    /// Completeness magnitude must be finite.
    InvalidCompleteness { m0: f64 },

    /// Observation window must be finite and > 0.
    EmptyWindow { t_end: f64 },

    /// Observation window must extend past the last event.
    WindowTooShort { t_end: f64, last_time: f64 },

    // ---- Parameters / configuration ----
    /// Parameter vector or bounds are malformed.
    Param(ParamError),

    /// Region configuration could not be parsed or is inconsistent.
    InvalidConfig { reason: String },

    // ---- Output ----
    /// The output sink refused the record.
    SinkFailed { reason: String },
}

impl std::error::Error for EtasError {}

impl std::fmt::Display for EtasError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Catalog validation ----
            EtasError::NonFiniteTime { index, value } => {
                write!(f, "Event time at index {index} is non-finite: {value}")
            }
            EtasError::NegativeTime { index, value } => {
                write!(f, "Event time at index {index} is negative: {value}")
            }
            EtasError::TimeOrderViolated { index, previous, value } => {
                write!(
                    f,
                    "Event times must be non-decreasing: index {index} has {value} after {previous}"
                )
            }
            EtasError::NonFiniteMagnitude { index, value } => {
                write!(f, "Magnitude at index {index} is non-finite: {value}")
            }
            EtasError::MagnitudeBelowCompleteness { index, value, m0 } => {
                write!(f, "Magnitude at index {index} ({value}) is below completeness m0 = {m0}")
            }
            EtasError::InvalidCompleteness { m0 } => {
                write!(f, "Completeness magnitude must be finite; got: {m0}")
            }
            EtasError::EmptyWindow { t_end } => {
                write!(f, "Observation window t_end must be finite and > 0; got: {t_end}")
            }
            EtasError::WindowTooShort { t_end, last_time } => {
                write!(
                    f,
                    "Observation window t_end ({t_end}) must exceed the last event time ({last_time})"
                )
            }
            // ---- Parameters / configuration ----
            EtasError::Param(err) => write!(f, "{err}"),
            EtasError::InvalidConfig { reason } => {
                write!(f, "Invalid region configuration: {reason}")
            }
            // ---- Output ----
            EtasError::SinkFailed { reason } => {
                write!(f, "Output sink rejected the fit record: {reason}")
            }
        }
    }
}

impl From<ParamError> for EtasError {
    fn from(err: ParamError) -> Self {
        EtasError::Param(err)
    }
}

impl From<std::io::Error> for EtasError {
    fn from(err: std::io::Error) -> Self {
        EtasError::SinkFailed { reason: err.to_string() }
    }
}

/// Parameter-vector and bounds errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// Optimizer vector has the wrong length.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Optimizer vector entries must be finite.
    InvalidThetaInput { index: usize, value: f64 },

    /// Bounds must be finite with `0 < lower < upper`.
    InvalidBounds { name: &'static str, lower: f64, upper: f64 },

    /// A model-space parameter is NaN or ±∞.
    NonFiniteParam { name: &'static str, value: f64 },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            ParamError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }
            ParamError::InvalidBounds { name, lower, upper } => {
                write!(
                    f,
                    "Bounds for {name} must be finite with 0 < lower < upper; got [{lower}, {upper}]"
                )
            }
            ParamError::NonFiniteParam { name, value } => {
                write!(f, "Parameter {name} must be finite; got: {value}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover `Display` wording for representative variants and the
    // lifting of foreign errors into `EtasError`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Catalog errors mention the offending index and value.
    fn display_mentions_index_and_value() {
        let err = EtasError::MagnitudeBelowCompleteness { index: 3, value: 1.5, m0: 2.0 };

        let text = err.to_string();

        assert!(text.contains("index 3"));
        assert!(text.contains("1.5"));
        assert!(text.contains("m0 = 2"));
    }

    #[test]
    // Purpose
    // -------
    // `ParamError` converts into the `Param` variant and keeps its text.
    fn param_error_lifts_into_etas_error() {
        let inner = ParamError::InvalidBounds { name: "p", lower: 2.0, upper: 1.0 };

        let lifted: EtasError = inner.clone().into();

        assert_eq!(lifted, EtasError::Param(inner.clone()));
        assert_eq!(lifted.to_string(), inner.to_string());
    }

    #[test]
    // Purpose
    // -------
    // I/O failures from a sink become `SinkFailed`.
    fn io_error_becomes_sink_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");

        let err: EtasError = io.into();

        assert!(
            matches!(err, EtasError::SinkFailed { ref reason } if reason.contains("pipe closed"))
        );
    }
}
