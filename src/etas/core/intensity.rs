//! Point evaluations of the fitted intensity.
//!
//! - [`conditional_intensity`]: `λ(t) = mu + Σ_{t_j < t} contribution`.
//! - [`triggered_rate`]: the aftershock part alone, over an arbitrary (for
//!   example "recent") event list that may contain sub-threshold events.
//! - [`elevated_risk_percent`]: map a triggered rate to a bounded
//!   percentage, `(1 − e^{−5·rate})·100`.
use crate::etas::core::{
    catalog::{Catalog, Event},
    kernel::contribution,
    params::EtasParams,
};

/// Scale applied to a triggered rate before the exponential saturation in
/// [`elevated_risk_percent`].
pub const RISK_RATE_SCALE: f64 = 5.0;

/// Conditional intensity at `t` given the catalog history strictly before
/// `t`. Events at or after `t` are ignored.
pub fn conditional_intensity(params: &EtasParams, catalog: &Catalog, t: f64) -> f64 {
    let history = &catalog.events()[..catalog.count_before(t)];
    params.mu + history.iter().map(|src| contribution(params, catalog.m0(), t, src)).sum::<f64>()
}

/// Aftershock rate at `t` from `events`, skipping events below `m0` and
/// events not strictly before `t`.
///
/// `events` need not be sorted or validated.
pub fn triggered_rate(params: &EtasParams, events: &[Event], m0: f64, t: f64) -> f64 {
    events
        .iter()
        .filter(|e| e.magnitude >= m0 && e.time < t)
        .map(|src| contribution(params, m0, t, src))
        .sum()
}

/// Percentage in `[0, 100]` derived from a triggered rate. Non-finite or
/// negative rates give `0`, `+∞` gives `100`.
pub fn elevated_risk_percent(rate: f64) -> f64 {
    if rate.is_nan() {
        return 0.0;
    }
    (-(-RISK_RATE_SCALE * rate).exp_m1() * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - λ(t) before the first event, right after a large event, and its
    //   agreement with the background plus triggered split.
    // - Filtering in `triggered_rate`.
    // - Clamping of the risk percentage.
    // -------------------------------------------------------------------------

    fn params() -> EtasParams {
        EtasParams::new(0.01, 0.02, 0.01, 1.1, 1.0)
    }

    #[test]
    // Purpose
    // -------
    // Before any event the intensity is the background rate; right after an
    // event it jumps above it.
    fn conditional_intensity_background_and_jump() {
        let catalog = Catalog::new(vec![Event::new(5.0, 4.0)], 2.0, 30.0).unwrap();

        assert_eq!(conditional_intensity(&params(), &catalog, 5.0), 0.01);
        assert!(conditional_intensity(&params(), &catalog, 5.01) > 1.0);
    }

    #[test]
    // Purpose
    // -------
    // λ(t) equals `mu` plus the triggered rate of the same history.
    fn conditional_intensity_splits_into_background_and_triggered() {
        let events = vec![Event::new(1.0, 2.5), Event::new(2.0, 3.3), Event::new(8.0, 2.1)];
        let catalog = Catalog::new(events.clone(), 2.0, 20.0).unwrap();
        let p = params();

        let lam = conditional_intensity(&p, &catalog, 6.0);

        assert_relative_eq!(
            lam,
            p.mu + triggered_rate(&p, &events, 2.0, 6.0),
            max_relative = 1e-15
        );
    }

    #[test]
    // Purpose
    // -------
    // Sub-threshold and future events are ignored.
    fn triggered_rate_filters_events() {
        let p = params();
        let kept = Event::new(1.0, 3.0);
        let events = [kept, Event::new(2.0, 1.5), Event::new(9.0, 5.0)];

        let rate = triggered_rate(&p, &events, 2.0, 4.0);

        assert_eq!(rate, contribution(&p, 2.0, 4.0, &kept));
        assert_eq!(triggered_rate(&p, &[], 2.0, 4.0), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // The risk percentage saturates and stays within `[0, 100]`.
    fn elevated_risk_percent_is_bounded() {
        assert_eq!(elevated_risk_percent(0.0), 0.0);
        assert_eq!(elevated_risk_percent(f64::INFINITY), 100.0);
        assert_eq!(elevated_risk_percent(-3.0), 0.0);
        assert_eq!(elevated_risk_percent(f64::NAN), 0.0);
        assert_relative_eq!(
            elevated_risk_percent(0.1),
            (1.0 - (-0.5_f64).exp()) * 100.0,
            max_relative = 1e-12
        );
    }
}
