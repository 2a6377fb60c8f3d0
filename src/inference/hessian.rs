//! inference::hessian — standard errors from the observed information.
//!
//! Purpose
//! -------
//! Turn a finite-difference Hessian of the negative log-likelihood into
//! classical standard errors. The Hessian of the summed NLL at the estimate
//! is the observed information `J(x̂)`; standard errors are the square roots
//! of the diagonal of its pseudoinverse.
//!
//! Key behaviors
//! -------------
//! - [`calc_standard_errors`] works on any gradient map `g: x ↦ ∇NLL(x)`:
//!   it differentiates `g` with [`compute_hessian`] (central, forward as a
//!   fallback, symmetrized), copies the result into a `nalgebra::DMatrix`,
//!   and solves through a symmetric eigendecomposition.
//! - [`etas_standard_errors`] wires the analytic ETAS gradient into that
//!   routine, in **model space** `(mu, K, c, p, alpha)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - No explicit inverse is formed. Eigenvalues `λ ≤ EIGEN_EPS` are dropped
//!   from the variance sum. A parameter with weight on a dropped direction is
//!   not identified by the data and gets `SE = +∞`.
//! - The gradient map must be finite in a small neighbourhood of the
//!   estimate; otherwise the Hessian fails validation and the error is
//!   returned.
//!
//! Conventions
//! -----------
//! - Errors are reported as [`OptResult`]; nothing here logs. The fit
//!   orchestrator decides what to do with a failure.
use crate::{
    etas::core::{
        catalog::Catalog,
        likelihood::nll_gradient,
        options::EvalStrategy,
        params::{EtasParams, N_PARAMS},
    },
    optimization::{
        errors::OptResult, loglik_optimizer::finite_diff::compute_hessian,
        numerical_stability::EIGEN_EPS,
    },
};
use nalgebra::DMatrix;
use ndarray::Array1;

/// Squared eigenvector loading above which a dropped direction makes a
/// parameter unidentified.
pub const UNIDENTIFIED_WEIGHT_EPS: f64 = 1e-10;

/// Classical standard errors from the Hessian of `f` at `x_hat`.
///
/// `f` is the gradient of the *summed* negative log-likelihood, so its
/// Jacobian is the observed information.
///
/// # Errors
/// - Any error from [`compute_hessian`] (dimension mismatch, non-finite
///   entries).
///
/// # Example
/// ```rust
/// # use ndarray::array;
/// # use etas_mle::inference::hessian::calc_standard_errors;
/// let a = array![[4.0, 0.0], [0.0, 1.0]];
/// let grad = |x: &ndarray::Array1<f64>| a.dot(x);
///
/// let se = calc_standard_errors(&grad, &array![1.0, -1.0]).unwrap();
/// assert!((se[0] - 0.5).abs() < 1e-6);
/// assert!((se[1] - 1.0).abs() < 1e-6);
/// ```
pub fn calc_standard_errors<F: Fn(&Array1<f64>) -> Array1<f64>>(
    f: &F, x_hat: &Array1<f64>,
) -> OptResult<Array1<f64>> {
    let obs_info = compute_hessian(f, x_hat)?;
    let n = obs_info.nrows();
    let obs_info_nalg = DMatrix::<f64>::from_fn(n, n, |i, j| obs_info[[i, j]]);
    Ok(solve_for_se(obs_info_nalg))
}

/// Model-space standard errors of an ETAS fit at `params`.
///
/// Where the analytic gradient is undefined the gradient map returns `NaN`,
/// which surfaces as `InvalidHessian`.
///
/// # Errors
/// - See [`calc_standard_errors`].
pub fn etas_standard_errors(
    params: &EtasParams, catalog: &Catalog, strategy: EvalStrategy,
) -> OptResult<[f64; N_PARAMS]> {
    let grad = |x: &Array1<f64>| -> Array1<f64> {
        let mut values = [f64::NAN; N_PARAMS];
        values.iter_mut().zip(x.iter()).for_each(|(v, &xi)| *v = xi);
        let candidate = EtasParams::from_array(values);
        match nll_gradient(&candidate, catalog, strategy) {
            Some(g) => Array1::from(g.to_vec()),
            None => Array1::from_elem(N_PARAMS, f64::NAN),
        }
    };
    let x_hat = Array1::from(params.to_array().to_vec());
    let se = calc_standard_errors(&grad, &x_hat)?;
    let mut out = [0.0; N_PARAMS];
    out.iter_mut().zip(se.iter()).for_each(|(o, &s)| *o = s);
    Ok(out)
}

// ---- Helper methods ----

/// `SE_i = sqrt(Σ_{k: λ_k > EIGEN_EPS} Q[i,k]² / λ_k)` from `J = Q Λ Qᵀ`,
/// or `+∞` when `Q[i,k]² > UNIDENTIFIED_WEIGHT_EPS` for some dropped `k`.
fn solve_for_se(obs_info_nalg: DMatrix<f64>) -> Array1<f64> {
    let n = obs_info_nalg.nrows();
    let eigen_decomp = obs_info_nalg.symmetric_eigen();
    let q = eigen_decomp.eigenvectors;
    let eigenvals = eigen_decomp.eigenvalues;
    Array1::from_shape_fn(n, |i| {
        let unidentified = eigenvals.iter().enumerate().any(|(k, &lambda)| {
            lambda <= EIGEN_EPS && q[(i, k)] * q[(i, k)] > UNIDENTIFIED_WEIGHT_EPS
        });
        if unidentified {
            return f64::INFINITY;
        }
        eigenvals
            .iter()
            .enumerate()
            .filter(|(_, lambda)| **lambda > EIGEN_EPS)
            .map(|(k, &lambda)| q[(i, k)] * q[(i, k)] / lambda)
            .sum::<f64>()
            .sqrt()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::etas::core::catalog::Event;
    use crate::optimization::errors::OptError;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Classical SEs for quadratics with known information matrices,
    //   including a rank-deficient one.
    // - The ETAS wrapper on a small catalog, an empty catalog, and at an
    //   infeasible point.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // For a non-diagonal information matrix the SEs are the square roots of
    // the diagonal of its inverse.
    //
    // Given
    // -----
    // - `J = [[2, 1], [1, 2]]`, so `J⁻¹ = [[2, −1], [−1, 2]] / 3`.
    //
    // Expect
    // ------
    // - `SE = (sqrt(2/3), sqrt(2/3))`.
    fn classical_se_matches_inverse_diagonal() {
        let j = array![[2.0, 1.0], [1.0, 2.0]];
        let grad = |x: &Array1<f64>| j.dot(x);

        let se = calc_standard_errors(&grad, &array![0.3, -0.7]).unwrap();

        assert_relative_eq!(se[0], (2.0_f64 / 3.0).sqrt(), max_relative = 1e-6);
        assert_relative_eq!(se[1], (2.0_f64 / 3.0).sqrt(), max_relative = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // A flat direction leaves its parameter unidentified without disturbing
    // the identified one.
    //
    // Given
    // -----
    // - `J = diag(4, 0)`.
    //
    // Expect
    // ------
    // - `SE = (0.5, +∞)`.
    fn flat_direction_is_unidentified() {
        let grad = |x: &Array1<f64>| array![4.0 * x[0], 0.0];

        let se = calc_standard_errors(&grad, &array![1.0, 1.0]).unwrap();

        assert_relative_eq!(se[0], 0.5, max_relative = 1e-6);
        assert_eq!(se[1], f64::INFINITY);
    }

    #[test]
    // Purpose
    // -------
    // With no events the objective is linear in `mu` and flat in the rest,
    // so nothing is identified.
    //
    // Expect
    // ------
    // - Every SE is `+∞`, never `0`.
    fn empty_catalog_identifies_nothing() {
        let catalog = Catalog::new(Vec::new(), 2.0, 10.0).unwrap();
        let params = EtasParams::new(0.01, 0.02, 0.01, 1.1, 1.0);

        let se = etas_standard_errors(&params, &catalog, EvalStrategy::Sequential).unwrap();

        assert!(se.iter().all(|s| *s == f64::INFINITY));
    }

    #[test]
    // Purpose
    // -------
    // The ETAS wrapper yields non-negative SEs (possibly `+∞` where the
    // curvature is not positive) at a feasible point and fails cleanly at an
    // infeasible one.
    fn etas_wrapper_finite_and_failure_paths() {
        let events = vec![
            Event::new(1.0, 3.5),
            Event::new(1.2, 2.4),
            Event::new(1.9, 2.1),
            Event::new(30.0, 2.9),
            Event::new(30.4, 2.2),
        ];
        let catalog = Catalog::new(events, 2.0, 100.0).unwrap();
        let params = EtasParams::new(0.03, 0.1, 0.05, 1.2, 0.9);

        let se = etas_standard_errors(&params, &catalog, EvalStrategy::Sequential).unwrap();
        assert!(se.iter().all(|s| *s >= 0.0));

        let bad = EtasParams::new(0.0, 0.1, 0.05, 1.2, 0.9);
        assert!(matches!(
            etas_standard_errors(&bad, &catalog, EvalStrategy::Sequential),
            Err(OptError::InvalidHessian { .. })
        ));
    }
}
