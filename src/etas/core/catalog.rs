//! Event catalogs for ETAS fitting.
//!
//! Purpose
//! -------
//! Provide the validated, immutable container the likelihood evaluator and
//! the fit orchestrator consume. All input checks for raw catalogs live here
//! so the numerical code can assume ordered, finite, complete data.
//!
//! Key behaviors
//! -------------
//! - [`Event`] is a `(time, magnitude)` pair with time in days since the
//!   catalog origin.
//! - [`Catalog::new`] rejects malformed input outright; it never drops,
//!   reorders or clamps events.
//! - [`Catalog::with_completeness_filter`] is the explicit opt-in for
//!   discarding events below `m0` before validation.
//!
//! Invariants & assumptions
//! ------------------------
//! - Event times are finite, `≥ 0`, and non-decreasing (ties allowed).
//! - Every magnitude is finite and `≥ m0`.
//! - `t_end` is finite, `> 0`, and strictly greater than the last event time.
//! - An empty event list is valid; the likelihood then reduces to
//!   `mu · t_end`.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based in catalog order; error payloads carry that index.
//! - Time is measured in days. [`Event::from_epoch_millis`] converts
//!   millisecond timestamps using [`MS_PER_DAY`].
use crate::etas::errors::{EtasError, EtasResult};
use serde::{Deserialize, Serialize};

/// Milliseconds in one day.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// A single catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Days since the catalog origin.
    pub time: f64,
    /// Event magnitude.
    pub magnitude: f64,
}

impl Event {
    pub const fn new(time: f64, magnitude: f64) -> Self {
        Self { time, magnitude }
    }

    /// Build an event from a millisecond timestamp relative to `origin_ms`.
    ///
    /// No validation happens here; a timestamp before the origin yields a
    /// negative time that [`Catalog::new`] will reject.
    pub fn from_epoch_millis(epoch_ms: i64, origin_ms: i64, magnitude: f64) -> Self {
        let time = (epoch_ms - origin_ms) as f64 / MS_PER_DAY;
        Self { time, magnitude }
    }
}

/// `Catalog` — ordered events plus completeness magnitude and window length.
///
/// Fields are private; construct through [`Catalog::new`] or
/// [`Catalog::with_completeness_filter`] so the invariants in the module
/// docs always hold.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    events: Vec<Event>,
    m0: f64,
    t_end: f64,
}

impl Catalog {
    /// Construct a validated catalog.
    ///
    /// Parameters
    /// ----------
    /// - `events`: `Vec<Event>`
    ///   Events in non-decreasing time order.
    /// - `m0`: `f64`
    ///   Completeness magnitude; must be finite.
    /// - `t_end`: `f64`
    ///   Observation-window length in days.
    ///
    /// Errors
    /// ------
    /// - `EtasError::InvalidCompleteness` when `m0` is not finite.
    /// - `EtasError::EmptyWindow` when `t_end` is not finite or `≤ 0`.
    /// - `EtasError::NonFiniteTime` / `NegativeTime` / `TimeOrderViolated`
    ///   for the first offending event time.
    /// - `EtasError::NonFiniteMagnitude` / `MagnitudeBelowCompleteness` for
    ///   the first offending magnitude.
    /// - `EtasError::WindowTooShort` when `t_end` does not exceed the last
    ///   event time.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use etas_mle::etas::core::catalog::{Catalog, Event};
    /// let events = vec![Event::new(1.0, 2.5), Event::new(3.0, 2.1)];
    /// let catalog = Catalog::new(events, 2.0, 30.0).unwrap();
    /// assert_eq!(catalog.len(), 2);
    /// ```
    pub fn new(events: Vec<Event>, m0: f64, t_end: f64) -> EtasResult<Self> {
        if !m0.is_finite() {
            return Err(EtasError::InvalidCompleteness { m0 });
        }
        if !t_end.is_finite() || t_end <= 0.0 {
            return Err(EtasError::EmptyWindow { t_end });
        }

        let mut previous = 0.0_f64;
        for (index, event) in events.iter().enumerate() {
            let Event { time, magnitude } = *event;
            if !time.is_finite() {
                return Err(EtasError::NonFiniteTime { index, value: time });
            }
            if time < 0.0 {
                return Err(EtasError::NegativeTime { index, value: time });
            }
            if time < previous {
                return Err(EtasError::TimeOrderViolated { index, previous, value: time });
            }
            if !magnitude.is_finite() {
                return Err(EtasError::NonFiniteMagnitude { index, value: magnitude });
            }
            if magnitude < m0 {
                return Err(EtasError::MagnitudeBelowCompleteness { index, value: magnitude, m0 });
            }
            previous = time;
        }

        if let Some(last) = events.last() {
            if t_end <= last.time {
                return Err(EtasError::WindowTooShort { t_end, last_time: last.time });
            }
        }

        Ok(Self { events, m0, t_end })
    }

    /// Drop events below `m0`, then validate as in [`Catalog::new`].
    ///
    /// Events with a NaN magnitude are kept so the validation step reports
    /// them instead of discarding them silently.
    pub fn with_completeness_filter(events: Vec<Event>, m0: f64, t_end: f64) -> EtasResult<Self> {
        if !m0.is_finite() {
            return Err(EtasError::InvalidCompleteness { m0 });
        }
        let kept: Vec<Event> =
            events.into_iter().filter(|e| e.magnitude >= m0 || e.magnitude.is_nan()).collect();
        Self::new(kept, m0, t_end)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn m0(&self) -> f64 {
        self.m0
    }

    pub fn t_end(&self) -> f64 {
        self.t_end
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of leading events that occurred strictly before `t`.
    pub fn count_before(&self, t: f64) -> usize {
        self.events.partition_point(|e| e.time < t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Happy-path construction, including ties and the empty catalog.
    // - Each rejection path of `Catalog::new`.
    // - The completeness filter and epoch-millisecond conversion.
    //
    // They intentionally DO NOT cover:
    // - Likelihood behavior on catalogs (see `core::likelihood`).
    // -------------------------------------------------------------------------

    fn scenario_events() -> Vec<Event> {
        [
            (10.5, 2.5),
            (12.1, 2.1),
            (45.3, 4.2),
            (45.4, 2.8),
            (45.8, 2.3),
            (110.2, 3.1),
            (205.1, 2.2),
        ]
        .into_iter()
        .map(|(t, m)| Event::new(t, m))
        .collect()
    }

    #[test]
    // Purpose
    // -------
    // A well-formed catalog is accepted unchanged.
    //
    // Expect
    // ------
    // - Seven events, `m0 = 2`, `t_end = 365`, events preserved in order.
    fn new_accepts_valid_catalog() {
        let catalog = Catalog::new(scenario_events(), 2.0, 365.0).expect("valid catalog");

        assert_eq!(catalog.len(), 7);
        assert_eq!(catalog.m0(), 2.0);
        assert_eq!(catalog.t_end(), 365.0);
        assert_eq!(catalog.events()[2], Event::new(45.3, 4.2));
    }

    #[test]
    // Purpose
    // -------
    // Simultaneous events and an empty event list are both valid.
    fn new_accepts_ties_and_empty_list() {
        let ties = vec![Event::new(1.0, 2.0), Event::new(1.0, 3.0)];

        assert!(Catalog::new(ties, 2.0, 5.0).is_ok());
        assert!(Catalog::new(Vec::new(), 2.0, 5.0).unwrap().is_empty());
    }

    #[test]
    // Purpose
    // -------
    // Out-of-order times are rejected, not sorted.
    //
    // Expect
    // ------
    // - `TimeOrderViolated { index: 1, previous: 5.0, value: 3.0 }`.
    fn new_rejects_decreasing_times() {
        let events = vec![Event::new(5.0, 2.0), Event::new(3.0, 2.0)];

        let err = Catalog::new(events, 2.0, 10.0).unwrap_err();

        assert_eq!(err, EtasError::TimeOrderViolated { index: 1, previous: 5.0, value: 3.0 });
    }

    #[test]
    // Purpose
    // -------
    // Each malformed field maps to its own error variant.
    fn new_rejects_malformed_fields() {
        assert!(matches!(
            Catalog::new(vec![Event::new(f64::NAN, 2.0)], 2.0, 10.0),
            Err(EtasError::NonFiniteTime { index: 0, .. })
        ));
        assert!(matches!(
            Catalog::new(vec![Event::new(-1.0, 2.0)], 2.0, 10.0),
            Err(EtasError::NegativeTime { index: 0, .. })
        ));
        assert!(matches!(
            Catalog::new(vec![Event::new(1.0, f64::INFINITY)], 2.0, 10.0),
            Err(EtasError::NonFiniteMagnitude { index: 0, .. })
        ));
        assert!(matches!(
            Catalog::new(vec![Event::new(1.0, 1.9)], 2.0, 10.0),
            Err(EtasError::MagnitudeBelowCompleteness { index: 0, .. })
        ));
        assert!(matches!(
            Catalog::new(Vec::new(), f64::NAN, 10.0),
            Err(EtasError::InvalidCompleteness { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // The observation window must be positive and extend past the last event.
    fn new_rejects_bad_window() {
        assert_eq!(
            Catalog::new(Vec::new(), 2.0, 0.0).unwrap_err(),
            EtasError::EmptyWindow { t_end: 0.0 }
        );
        assert_eq!(
            Catalog::new(vec![Event::new(4.0, 2.0)], 2.0, 4.0).unwrap_err(),
            EtasError::WindowTooShort { t_end: 4.0, last_time: 4.0 }
        );
    }

    #[test]
    // Purpose
    // -------
    // The completeness filter drops small events but still reports NaN
    // magnitudes.
    fn completeness_filter_drops_small_events_only() {
        let events = vec![Event::new(1.0, 1.2), Event::new(2.0, 2.4), Event::new(3.0, 1.9)];

        let catalog = Catalog::with_completeness_filter(events, 2.0, 10.0).unwrap();

        assert_eq!(catalog.events(), &[Event::new(2.0, 2.4)]);
        assert!(matches!(
            Catalog::with_completeness_filter(vec![Event::new(1.0, f64::NAN)], 2.0, 10.0),
            Err(EtasError::NonFiniteMagnitude { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Millisecond timestamps convert to fractional days since the origin.
    fn from_epoch_millis_converts_to_days() {
        let origin = 1_700_000_000_000_i64;

        let event = Event::from_epoch_millis(origin + 36 * 3_600_000, origin, 3.0);

        assert_eq!(event.time, 1.5);
        assert_eq!(event.magnitude, 3.0);
    }

    #[test]
    // Purpose
    // -------
    // `count_before` counts strictly earlier events, treating ties as "not
    // before".
    fn count_before_is_strict() {
        let catalog = Catalog::new(scenario_events(), 2.0, 365.0).unwrap();

        assert_eq!(catalog.count_before(45.3), 2);
        assert_eq!(catalog.count_before(45.31), 3);
        assert_eq!(catalog.count_before(0.0), 0);
        assert_eq!(catalog.count_before(400.0), 7);
    }
}
