//! Fast Approximate QAP (FAQ) solver
//!
//! Frank-Wolfe iteration over the convex hull of the doubly-stochastic
//! matrices (Vogelstein et al., "Fast approximate quadratic programming
//! for graph matching", PLOS ONE 2015), with seeded matching per
//! Fishkind et al., "Seeded graph matching", Pattern Recognition 2019.
//!
//! ```text
//! partition A, B into seed/non-seed blocks; P = initial position
//! repeat up to maxiter times:
//!     G = const + A22 P B22ᵀ + A22ᵀ P B22        (gradient)
//!     Q = argopt over permutations of <G, Q>     (linear assignment)
//!     α = argopt over [0,1] of f(αP + (1−α)Q)    (exact line search)
//!     P ← αP + (1−α)Q
//!     stop when ‖ΔP‖_F / √(n−m) < tol
//! round −P to a permutation by linear assignment; prepend seeds
//! ```
//!
//! Reaching `maxiter` without meeting the tolerance is a normal
//! termination mode, visible only through the returned iteration count.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::lap::{lap, lap_min};
use crate::matrix::Mat;
use crate::sinkhorn::{self, doubly_stochastic};

use super::options::{FaqOptions, InitMethod};
use super::{score, seeded_result, validate_common, QapResult};

/// Solve the QAP/GMP approximately with the FAQ algorithm.
///
/// Returns the matched permutation, its objective value, and the number
/// of Frank-Wolfe iterations performed. Seeded pairs in
/// `options.partial_match` are honored exactly.
pub fn faq(a: &Mat, b: &Mat, options: &FaqOptions) -> Result<QapResult> {
    validate_common(a, b, &options.partial_match)?;
    if options.maxiter == 0 {
        return Err(Error::NonPositiveMaxIter);
    }
    if !(options.tol > 0.0) {
        return Err(Error::NonPositiveTol { tol: options.tol });
    }

    let n = a.rows();
    let m = options.partial_match.len();
    if n == 0 || m == n {
        return Ok(seeded_result(a, b, &options.partial_match));
    }
    let nu = n - m;

    // Negate the objective when maximizing.
    let sign = if options.maximize { -1.0 } else { 1.0 };
    let mut rng = StdRng::seed_from_u64(options.seed);

    // Reorder both node sets seeds-first; unseeded nodes keep their
    // ascending order unless shuffling is requested for B.
    let seeds_a: Vec<usize> = options.partial_match.iter().map(|&(ra, _)| ra).collect();
    let seeds_b: Vec<usize> = options.partial_match.iter().map(|&(_, rb)| rb).collect();
    let nonseed_a = complement(n, &seeds_a);
    let mut nonseed_b = complement(n, &seeds_b);
    if options.shuffle_input {
        nonseed_b.shuffle(&mut rng);
    }
    let perm_a: Vec<usize> = seeds_a.iter().chain(&nonseed_a).copied().collect();
    let perm_b: Vec<usize> = seeds_b.iter().chain(&nonseed_b).copied().collect();

    let (_, a12, a21, a22) = a.permuted(&perm_a, &perm_a).split_blocks(m);
    let (_, b12, b21, b22) = b.permuted(&perm_b, &perm_b).split_blocks(m);
    let a22t = a22.transpose();
    let b22t = b22.transpose();

    // Seed-coupling term of the gradient, constant across iterations.
    let const_sum = a21.matmul_nt(&b21).add(&a12.matmul_tn(&b12));

    let mut p = initial_position(&options.init, nu, &mut rng)?;

    let mut nit = 0;
    for it in 1..=options.maxiter {
        nit = it;

        // Gradient of f(P) = tr(const) + tr(A22ᵀ P B22 Pᵀ) w.r.t. P.
        let grad = const_sum
            .add(&a22.matmul(&p.matmul(&b22t)))
            .add(&a22t.matmul(&p.matmul(&b22)));

        // Direction: the permutation best aligned with the gradient.
        let cols = lap(&grad, options.maximize);

        // Exact line search. Along P(x) = Q + x·R with R = P − Q the
        // objective is the parabola a·x² + b·x + c; c never moves the
        // optimum and is dropped.
        let r = sub_permutation(&p, &cols);
        let b21_term = r.matmul_tn(&a21).dot_sum(&b21);
        let b12_term = a12.matmul(&r).dot_sum(&b12);
        let ar22 = a22t.matmul(&r);
        let br22 = b22.matmul_nt(&r);
        let b22a = dot_rows_permuted(&ar22, &b22t, &cols);
        let b22b = dot_rows_permuted(&a22, &br22, &cols);
        let a_coef = dot_transposed(&ar22, &br22);
        let b_coef = b21_term + b12_term + b22a + b22b;

        // The parabola's vertex −b/(2a) is optimal only when it opens
        // the right way for the chosen sense and lies inside [0,1];
        // otherwise compare the endpoint objectives f(0) = 0 and
        // f(1) = a + b, favoring step 0 on an exact tie.
        let vertex = -b_coef / (2.0 * a_coef);
        let alpha = if a_coef * sign > 0.0 && (0.0..=1.0).contains(&vertex) {
            vertex
        } else if (a_coef + b_coef) * sign < 0.0 {
            1.0
        } else {
            0.0
        };

        // P ← αP + (1−α)Q
        let p_next = step_towards(&p, &cols, alpha);
        let delta = p.frobenius_distance(&p_next);
        p = p_next;
        if delta / (nu as f64).sqrt() < options.tol {
            break;
        }
    }

    // Round the relaxation to a permutation of the unseeded nodes and
    // translate back to the original node order.
    let projected = lap_min(&p.neg());
    let mut col_ind = vec![0_usize; n];
    for i in 0..m {
        col_ind[perm_a[i]] = perm_b[i];
    }
    for (i, &c) in projected.iter().enumerate() {
        col_ind[perm_a[m + i]] = perm_b[m + c];
    }
    debug_assert!(is_permutation(&col_ind));

    let fun = score(a, b, &col_ind);
    Ok(QapResult { col_ind, fun, nit })
}

/// Build the initial search position for the unseeded block.
fn initial_position(init: &InitMethod, nu: usize, rng: &mut StdRng) -> Result<Mat> {
    let barycenter = Mat::filled(nu, nu, 1.0 / nu as f64);
    match init {
        InitMethod::Barycenter => Ok(barycenter),
        InitMethod::Randomized => {
            let mut k = Mat::zeros(nu, nu);
            for i in 0..nu {
                for j in 0..nu {
                    k[(i, j)] = rng.random::<f64>();
                }
            }
            let k = doubly_stochastic(&k, sinkhorn::DEFAULT_TOL);
            let mut p = Mat::zeros(nu, nu);
            for i in 0..nu {
                for j in 0..nu {
                    p[(i, j)] = 0.5 * barycenter[(i, j)] + 0.5 * k[(i, j)];
                }
            }
            Ok(p)
        }
        InitMethod::Explicit(p0) => {
            if (p0.rows(), p0.cols()) != (nu, nu) {
                return Err(Error::InitPositionShape {
                    expected: nu,
                    rows: p0.rows(),
                    cols: p0.cols(),
                });
            }
            let marginals_ok = |sums: &[f64]| {
                sums.iter().all(|&s| (s - 1.0).abs() < sinkhorn::DEFAULT_TOL)
            };
            if !marginals_ok(&p0.row_sums())
                || !marginals_ok(&p0.col_sums())
                || p0.as_slice().iter().any(|&x| x < 0.0)
            {
                return Err(Error::InitPositionNotDoublyStochastic);
            }
            Ok(p0.clone())
        }
    }
}

/// Ascending complement of `taken` in `0..n`.
fn complement(n: usize, taken: &[usize]) -> Vec<usize> {
    let mut is_taken = vec![false; n];
    for &t in taken {
        is_taken[t] = true;
    }
    (0..n).filter(|&i| !is_taken[i]).collect()
}

/// `P − Q` for the permutation matrix `Q` induced by `cols`.
fn sub_permutation(p: &Mat, cols: &[usize]) -> Mat {
    let mut r = p.clone();
    for (i, &c) in cols.iter().enumerate() {
        r[(i, c)] -= 1.0;
    }
    r
}

/// `αP + (1−α)Q` for the permutation matrix `Q` induced by `cols`.
fn step_towards(p: &Mat, cols: &[usize], alpha: f64) -> Mat {
    let nu = p.rows();
    let mut out = Mat::zeros(nu, nu);
    for i in 0..nu {
        for j in 0..nu {
            let q = if cols[i] == j { 1.0 } else { 0.0 };
            out[(i, j)] = alpha * p[(i, j)] + (1.0 - alpha) * q;
        }
    }
    out
}

/// `Σ_{i,j} x[i,j] · y[rows[i], j]`
fn dot_rows_permuted(x: &Mat, y: &Mat, rows: &[usize]) -> f64 {
    let mut total = 0.0;
    for i in 0..x.rows() {
        let ri = rows[i];
        for j in 0..x.cols() {
            total += x[(i, j)] * y[(ri, j)];
        }
    }
    total
}

/// `Σ_{i,j} x[j,i] · y[i,j]`
fn dot_transposed(x: &Mat, y: &Mat) -> f64 {
    let mut total = 0.0;
    for i in 0..y.rows() {
        for j in 0..y.cols() {
            total += x[(j, i)] * y[(i, j)];
        }
    }
    total
}

fn is_permutation(perm: &[usize]) -> bool {
    let mut seen = vec![false; perm.len()];
    perm.iter().all(|&c| {
        if c >= seen.len() || seen[c] {
            false
        } else {
            seen[c] = true;
            true
        }
    })
}
