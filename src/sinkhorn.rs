//! Sinkhorn-Knopp doubly-stochastic balancing
//!
//! Rescales a strictly positive square matrix toward the Birkhoff
//! polytope by alternating reciprocal column and row scaling vectors:
//!
//! ```text
//! c = 1 / (r · P)        (column scalings)
//! r = 1 / (P · c)        (row scalings)
//! P' = diag(r) · P · diag(c)
//! ```
//!
//! Iteration stops once every row sum and column sum is within the
//! tolerance of 1, or after [`MAX_ITER`] rounds. There is no convergence
//! guarantee: if the cap is reached, the best-effort matrix is returned
//! silently and callers must not assume exact doubly-stochasticity.
//! The FAQ solver uses this to build its randomized initial positions.

use crate::matrix::Mat;

/// Marginal-sum tolerance used by the FAQ solver.
pub const DEFAULT_TOL: f64 = 1e-3;

/// Iteration cap for the balancing loop.
pub const MAX_ITER: usize = 1000;

/// Balance a strictly positive square matrix so that its row and column
/// sums are all within `tol` of 1.
///
/// The marginals are checked *before* each scaling round, so an input
/// that is already balanced is returned after zero rounds.
pub fn doubly_stochastic(p: &Mat, tol: f64) -> Mat {
    assert!(p.is_square(), "input must be square");
    let n = p.rows();
    if n == 0 {
        return p.clone();
    }

    // c = 1 / column sums, r = 1 / (P c)
    let mut c: Vec<f64> = p.col_sums().iter().map(|&s| 1.0 / s).collect();
    let mut r: Vec<f64> = mat_vec(p, &c).iter().map(|&s| 1.0 / s).collect();
    let mut p_eps = p.clone();

    for _ in 0..MAX_ITER {
        if within_tol(&p_eps.row_sums(), tol) && within_tol(&p_eps.col_sums(), tol) {
            break;
        }
        // c = 1 / (r P), r = 1 / (P c)
        c = vec_mat(&r, p).iter().map(|&s| 1.0 / s).collect();
        r = mat_vec(p, &c).iter().map(|&s| 1.0 / s).collect();
        for i in 0..n {
            for j in 0..n {
                p_eps[(i, j)] = r[i] * p[(i, j)] * c[j];
            }
        }
    }
    p_eps
}

fn within_tol(sums: &[f64], tol: f64) -> bool {
    sums.iter().all(|&s| (s - 1.0).abs() < tol)
}

/// `P · v`
fn mat_vec(p: &Mat, v: &[f64]) -> Vec<f64> {
    let n = p.rows();
    let mut out = vec![0.0; n];
    for i in 0..n {
        for (j, &vj) in v.iter().enumerate() {
            out[i] += p[(i, j)] * vj;
        }
    }
    out
}

/// `vᵀ · P`
fn vec_mat(v: &[f64], p: &Mat) -> Vec<f64> {
    let n = p.cols();
    let mut out = vec![0.0; n];
    for (i, &vi) in v.iter().enumerate() {
        for (j, o) in out.iter_mut().enumerate() {
            *o += vi * p[(i, j)];
        }
    }
    out
}
