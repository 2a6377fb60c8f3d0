//! ETAS parameter vector, box bounds, and the θ-space mapping.
//!
//! This module provides the **model-space** container [`EtasParams`] and the
//! per-parameter box [`ParamBounds`], together with the **optimizer-space**
//! mapping used during L-BFGS.
//!
//! ## Layout
//! Both model space and θ-space use the fixed order
//! `(mu, K, c, p, alpha)`; [`PARAM_NAMES`] gives the matching labels.
//!
//! ## Mapping conventions
//! - Each coordinate is mapped independently through the logistic box map
//!   `x = lo + (hi − lo)·σ(θ)`, so every θ lands inside the box.
//! - The inverse map projects out-of-box values onto the box and keeps the
//!   relative position at least `LOGIT_EPS` away from either edge, so a
//!   starting value sitting on a bound still has a finite θ.
//!
//! ## Invariants validated by constructors
//! - Bounds are finite with `0 < lower < upper` for every parameter. Strictly
//!   positive lower bounds keep every mapped θ inside the feasible region of
//!   the domain guard.
//! - θ has length [`N_PARAMS`] and finite entries.
use crate::{
    etas::errors::{ParamError, ParamResult},
    optimization::{
        loglik_optimizer::Theta,
        numerical_stability::{bounded_jacobian, from_bounded, to_bounded},
    },
};
use serde::{Deserialize, Serialize};

/// Number of free ETAS parameters.
pub const N_PARAMS: usize = 5;

/// Parameter labels in vector order.
pub const PARAM_NAMES: [&str; N_PARAMS] = ["mu", "k", "c", "p", "alpha"];

/// Model-space ETAS parameters.
///
/// - `mu`: background rate (events/day).
/// - `k`: aftershock productivity scale.
/// - `c`: Omori time offset (days).
/// - `p`: Omori decay exponent.
/// - `alpha`: magnitude efficiency of productivity.
///
/// Construction does not check feasibility; that is the domain guard's job
/// at evaluation time (see [`crate::etas::core::guards`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EtasParams {
    pub mu: f64,
    pub k: f64,
    pub c: f64,
    pub p: f64,
    pub alpha: f64,
}

impl EtasParams {
    pub const fn new(mu: f64, k: f64, c: f64, p: f64, alpha: f64) -> Self {
        Self { mu, k, c, p, alpha }
    }

    pub fn to_array(&self) -> [f64; N_PARAMS] {
        [self.mu, self.k, self.c, self.p, self.alpha]
    }

    pub fn from_array(values: [f64; N_PARAMS]) -> Self {
        let [mu, k, c, p, alpha] = values;
        Self { mu, k, c, p, alpha }
    }

    /// Reject NaN / ±∞ components.
    ///
    /// # Errors
    /// - [`ParamError::NonFiniteParam`] naming the first offending parameter.
    pub fn ensure_finite(&self) -> ParamResult<()> {
        for (name, value) in PARAM_NAMES.into_iter().zip(self.to_array()) {
            if !value.is_finite() {
                return Err(ParamError::NonFiniteParam { name, value });
            }
        }
        Ok(())
    }

    /// Expected number of direct aftershocks per unit Omori mass,
    /// `K · e^{alpha·(m − m0)}`.
    pub fn productivity(&self, magnitude: f64, m0: f64) -> f64 {
        self.k * (self.alpha * (magnitude - m0)).exp()
    }
}

/// Per-parameter closed intervals `[lower, upper]`.
///
/// Serialized as `{"mu": [lo, hi], ...}`. Deserialized values are not
/// validated automatically; call [`ParamBounds::validate`] (region configs
/// do this on load).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamBounds {
    pub mu: (f64, f64),
    pub k: (f64, f64),
    pub c: (f64, f64),
    pub p: (f64, f64),
    pub alpha: (f64, f64),
}

impl Default for ParamBounds {
    /// `mu, K, c ∈ [1e-5, 1]`, `p ∈ [1.001, 2]`, `alpha ∈ [0.1, 3]`.
    ///
    /// The lower bound on `p` keeps a default search off the `p = 1` branch
    /// of the integral term.
    fn default() -> Self {
        Self {
            mu: (1e-5, 1.0),
            k: (1e-5, 1.0),
            c: (1e-5, 1.0),
            p: (1.001, 2.0),
            alpha: (0.1, 3.0),
        }
    }
}

impl ParamBounds {
    /// Construct validated bounds.
    ///
    /// # Errors
    /// - [`ParamError::InvalidBounds`] for the first interval that is not
    ///   finite with `0 < lower < upper`.
    pub fn new(
        mu: (f64, f64), k: (f64, f64), c: (f64, f64), p: (f64, f64), alpha: (f64, f64),
    ) -> ParamResult<Self> {
        let bounds = Self { mu, k, c, p, alpha };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> ParamResult<()> {
        for (name, (lower, upper)) in PARAM_NAMES.into_iter().zip(self.intervals()) {
            let ok = lower.is_finite() && upper.is_finite() && lower > 0.0 && lower < upper;
            if !ok {
                return Err(ParamError::InvalidBounds { name, lower, upper });
            }
        }
        Ok(())
    }

    /// Intervals in vector order.
    pub fn intervals(&self) -> [(f64, f64); N_PARAMS] {
        [self.mu, self.k, self.c, self.p, self.alpha]
    }

    /// `true` when every component lies in its closed interval.
    pub fn contains(&self, params: &EtasParams) -> bool {
        params.to_array().iter().zip(self.intervals()).all(|(&x, (lo, hi))| lo <= x && x <= hi)
    }

    /// Clamp each component onto its interval.
    pub fn project(&self, params: &EtasParams) -> EtasParams {
        let mut out = params.to_array();
        for (x, (lo, hi)) in out.iter_mut().zip(self.intervals()) {
            *x = x.clamp(lo, hi);
        }
        EtasParams::from_array(out)
    }

    /// Map model-space parameters to θ, projecting onto the box first.
    pub fn to_theta(&self, params: &EtasParams) -> Theta {
        params
            .to_array()
            .iter()
            .zip(self.intervals())
            .map(|(&x, (lo, hi))| from_bounded(x, lo, hi))
            .collect()
    }

    /// Map θ to model-space parameters inside the box.
    ///
    /// # Errors
    /// - [`ParamError::ThetaLengthMismatch`] when `theta.len() != N_PARAMS`.
    /// - [`ParamError::InvalidThetaInput`] for the first non-finite entry.
    pub fn from_theta(&self, theta: &Theta) -> ParamResult<EtasParams> {
        validate_theta(theta)?;
        let mut out = [0.0; N_PARAMS];
        for ((x, &t), (lo, hi)) in out.iter_mut().zip(theta.iter()).zip(self.intervals()) {
            *x = to_bounded(t, lo, hi);
        }
        Ok(EtasParams::from_array(out))
    }

    /// Diagonal Jacobian `dx_k/dθ_k` of [`ParamBounds::from_theta`].
    ///
    /// # Errors
    /// - Same as [`ParamBounds::from_theta`].
    pub fn jacobian(&self, theta: &Theta) -> ParamResult<[f64; N_PARAMS]> {
        validate_theta(theta)?;
        let mut out = [0.0; N_PARAMS];
        for ((d, &t), (lo, hi)) in out.iter_mut().zip(theta.iter()).zip(self.intervals()) {
            *d = bounded_jacobian(t, lo, hi);
        }
        Ok(out)
    }
}

/// Length and finiteness checks shared by the θ-space maps.
pub fn validate_theta(theta: &Theta) -> ParamResult<()> {
    if theta.len() != N_PARAMS {
        return Err(ParamError::ThetaLengthMismatch { expected: N_PARAMS, actual: theta.len() });
    }
    if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ParamError::InvalidThetaInput { index, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Bounds validation and projection.
    // - θ ↔ model-space mapping, including boundary and out-of-box inputs.
    // - θ validation errors.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Non-positive, inverted or non-finite intervals are rejected and named.
    fn bounds_new_rejects_bad_intervals() {
        let d = ParamBounds::default();

        assert!(ParamBounds::new(d.mu, d.k, d.c, d.p, d.alpha).is_ok());
        assert_eq!(
            ParamBounds::new((0.0, 1.0), d.k, d.c, d.p, d.alpha).unwrap_err(),
            ParamError::InvalidBounds { name: "mu", lower: 0.0, upper: 1.0 }
        );
        assert!(matches!(
            ParamBounds::new(d.mu, d.k, d.c, (2.0, 1.5), d.alpha),
            Err(ParamError::InvalidBounds { name: "p", .. })
        ));
        assert!(matches!(
            ParamBounds::new(d.mu, d.k, d.c, d.p, (0.1, f64::INFINITY)),
            Err(ParamError::InvalidBounds { name: "alpha", .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Interior parameters survive the θ round trip.
    //
    // Given
    // -----
    // - Default bounds and `(0.01, 0.02, 0.01, 1.1, 1.0)`.
    //
    // Expect
    // ------
    // - `from_theta(to_theta(x)) ≈ x` componentwise.
    fn theta_round_trip_interior() {
        let bounds = ParamBounds::default();
        let params = EtasParams::new(0.01, 0.02, 0.01, 1.1, 1.0);

        let back = bounds.from_theta(&bounds.to_theta(&params)).unwrap();

        for (a, b) in back.to_array().iter().zip(params.to_array()) {
            assert_relative_eq!(*a, b, max_relative = 1e-9);
        }
    }

    #[test]
    // Purpose
    // -------
    // Values outside or on the box map to finite θ whose image is inside.
    fn to_theta_projects_out_of_box_values() {
        let bounds = ParamBounds::default();
        let params = EtasParams::new(5.0, 1e-9, 1.0, 0.5, 3.0);

        let theta = bounds.to_theta(&params);
        let back = bounds.from_theta(&theta).unwrap();

        assert!(theta.iter().all(|t| t.is_finite()));
        assert!(bounds.contains(&back));
    }

    #[test]
    // Purpose
    // -------
    // Extreme θ still maps inside the closed box.
    fn from_theta_extreme_values_stay_in_box() {
        let bounds = ParamBounds::default();
        let theta = array![1e8, -1e8, 750.0, -750.0, 0.0];

        let params = bounds.from_theta(&theta).unwrap();

        assert!(bounds.contains(&params));
    }

    #[test]
    // Purpose
    // -------
    // Wrong length and non-finite θ are rejected.
    fn from_theta_validates_input() {
        let bounds = ParamBounds::default();

        assert_eq!(
            bounds.from_theta(&array![0.0, 0.0]).unwrap_err(),
            ParamError::ThetaLengthMismatch { expected: 5, actual: 2 }
        );
        assert!(matches!(
            bounds.from_theta(&array![0.0, f64::NAN, 0.0, 0.0, 0.0]),
            Err(ParamError::InvalidThetaInput { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `project` clamps and `ensure_finite` names the bad component.
    fn project_and_finiteness() {
        let bounds = ParamBounds::default();

        let projected = bounds.project(&EtasParams::new(-1.0, 0.5, 9.0, 1.0, 0.2));

        assert_eq!(projected, EtasParams::new(1e-5, 0.5, 1.0, 1.001, 0.2));
        assert_eq!(
            EtasParams::new(0.1, 0.1, f64::NAN, 1.1, 1.0).ensure_finite().unwrap_err().to_string(),
            ParamError::NonFiniteParam { name: "c", value: f64::NAN }.to_string()
        );
    }

    #[test]
    // Purpose
    // -------
    // Bounds serialize as two-element arrays keyed by parameter name.
    fn bounds_serialize_as_named_pairs() {
        let json = serde_json::to_value(ParamBounds::default()).unwrap();

        assert_eq!(json["p"], serde_json::json!([1.001, 2.0]));
    }
}
