//! Numerical stability utilities.
//!
//! Guarded scalar transforms used to keep ETAS fitting in a well-conditioned
//! `f64` regime:
//! - [`safe_logistic`] / [`safe_logit`]: overflow-free logistic map and its
//!   inverse.
//! - [`to_bounded`] / [`from_bounded`] / [`bounded_jacobian`]: the box map
//!   `x = lo + (hi − lo)·σ(θ)` that lets an unconstrained solver respect
//!   per-parameter bounds.
//! - [`power_diff_quotient`] / [`power_diff_quotient_dq`]: `(x^q − y^q)/q`
//!   and its `q`-derivative, continuous through `q = 0` where the quotient
//!   becomes `ln(x/y)`. The Omori integral term is this quotient with
//!   `q = 1 − p`.

/// Distance kept from the edges of `(0, 1)` before taking a logit, so a
/// starting value sitting exactly on a bound maps to a finite θ.
pub const LOGIT_EPS: f64 = 1e-6;

/// Eigenvalues at or below this are treated as zero when inverting an
/// observed information matrix.
pub const EIGEN_EPS: f64 = 1e-10;

/// Below this `|q·ln(x/y)|` the `q`-derivative uses its Taylor expansion.
const SERIES_CUTOFF: f64 = 1e-4;

/// Logistic function `σ(x) = 1 / (1 + e^{-x})` without overflow for large
/// `|x|`.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Inverse logistic `ln(u / (1 − u))` for `u ∈ (0, 1)`.
pub fn safe_logit(u: f64) -> f64 {
    u.ln() - (-u).ln_1p()
}

/// Map an unconstrained `theta` into `[lo, hi]`.
///
/// The result is clamped so rounding can never leave the box.
pub fn to_bounded(theta: f64, lo: f64, hi: f64) -> f64 {
    (lo + (hi - lo) * safe_logistic(theta)).clamp(lo, hi)
}

/// Inverse of [`to_bounded`].
///
/// Values outside `[lo, hi]` are projected onto the box first, and the
/// relative position is kept at least [`LOGIT_EPS`] away from either edge.
pub fn from_bounded(x: f64, lo: f64, hi: f64) -> f64 {
    let u = ((x - lo) / (hi - lo)).clamp(LOGIT_EPS, 1.0 - LOGIT_EPS);
    safe_logit(u)
}

/// `dx/dθ` of [`to_bounded`]: `(hi − lo)·σ(θ)·(1 − σ(θ))`.
pub fn bounded_jacobian(theta: f64, lo: f64, hi: f64) -> f64 {
    let s = safe_logistic(theta);
    (hi - lo) * s * (1.0 - s)
}

/// `(x^q − y^q) / q` for `x, y > 0`, equal to `ln x − ln y` at `q = 0`.
///
/// Evaluated as `y^q · expm1(q·ln(x/y)) / q`, which stays accurate as
/// `q → 0` instead of cancelling.
pub fn power_diff_quotient(x: f64, y: f64, q: f64) -> f64 {
    let log_ratio = x.ln() - y.ln();
    if q == 0.0 {
        return log_ratio;
    }
    y.powf(q) * (q * log_ratio).exp_m1() / q
}

/// `∂/∂q` of [`power_diff_quotient`].
///
/// With `L = ln(x/y)` and `E(q) = expm1(qL)/q` the quotient is `y^q E(q)`, so
/// the derivative is `y^q (ln y · E(q) + E'(q))`. `E'(q)` switches to
/// `L²/2 + qL³/3` when `|qL|` is small.
pub fn power_diff_quotient_dq(x: f64, y: f64, q: f64) -> f64 {
    let log_ratio = x.ln() - y.ln();
    let ql = q * log_ratio;
    let (e, de) = if ql.abs() < SERIES_CUTOFF {
        let l2 = log_ratio * log_ratio;
        (log_ratio + q * l2 / 2.0, l2 / 2.0 + q * l2 * log_ratio / 3.0)
    } else {
        let em1 = ql.exp_m1();
        (em1 / q, (ql * ql.exp() - em1) / (q * q))
    };
    y.powf(q) * (y.ln() * e + de)
}
