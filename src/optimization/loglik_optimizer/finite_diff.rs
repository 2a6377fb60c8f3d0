//! loglik_optimizer::finite_diff — finite-difference gradients and Hessians.
//!
//! Purpose
//! -------
//! Wrap the `finitediff` crate so the optimizer and the inference layer can
//! request derivatives with uniform validation and error capture:
//! - [`run_fd_diff`]: forward-difference gradient of a scalar objective, used
//!   by the argmin adapter when a model opts out of its analytic gradient or
//!   when central differences fail validation.
//! - [`compute_hessian`]: Hessian of a gradient function, central first and
//!   forward as a fallback, symmetrized before it is returned. The ETAS
//!   standard-error routine differentiates the analytic NLL gradient with it.
//!
//! Conventions
//! -----------
//! - The objective closures handed to `finitediff` must return `f64`, so
//!   evaluation errors travel through a `RefCell<Option<Error>>` side channel
//!   and the closure returns `NaN`.
//! - Derivatives returned from this module always pass [`validate_grad`] /
//!   [`validate_hessian`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, Theta,
        types::Hessian,
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Forward-difference gradient of `func` at `theta` with error capture.
///
/// Clears `closure_err`, differentiates, then returns the first error the
/// closure recorded, if any; otherwise validates and returns the gradient.
///
/// # Errors
/// - The captured closure error, lifted into `OptError`.
/// - `GradientDimMismatch` / `InvalidGradient` from [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// Finite-difference Hessian of the gradient function `f` at `theta`.
///
/// Central differences are tried first; if that matrix fails validation the
/// forward-difference matrix is used instead. The central-difference failure
/// itself is not reported.
///
/// # Errors
/// - `HessianDimMismatch` / `InvalidHessian` from the forward-difference
///   matrix when both schemes fail.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut hess = theta.central_hessian(f);
    if validate_hessian(&hess, dim).is_err() {
        hess = theta.forward_hessian(f);
        validate_hessian(&hess, dim)?;
    }
    symmetrize_hess(&mut hess);
    Ok(hess)
}

// ---- Helper methods ----

/// Average each off-diagonal pair in place; the diagonal is untouched.
fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}
