//! Quadratic assignment and graph matching solvers
//!
//! Approximates solutions to problems of the form
//!
//! ```text
//! min_P  trace(Aᵀ P B Pᵀ)     (maximize for graph matching)
//! s.t.   P a permutation matrix
//! ```
//!
//! where `A` and `B` are square weight matrices. Two methods are
//! provided: [`faq`], the Fast Approximate QAP algorithm of Vogelstein
//! et al. (a Frank-Wolfe relaxation over the doubly-stochastic
//! polytope with seeded-matching support per Fishkind et al.), and
//! [`two_opt`], greedy pairwise-swap refinement. QAP is NP-hard; the
//! results are approximations with no optimality guarantee.

mod faq;
mod options;
mod two_opt;

pub use faq::faq;
pub use options::{FaqOptions, InitMethod, TwoOptOptions};
pub use two_opt::two_opt;

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::matrix::Mat;

/// Solver selector, parsed case-insensitively from `"faq"` or `"2opt"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Fast Approximate QAP (Frank-Wolfe relaxation).
    Faq,
    /// Greedy pairwise-swap local search.
    TwoOpt,
}

impl Method {
    fn name(&self) -> &'static str {
        match self {
            Method::Faq => "faq",
            Method::TwoOpt => "2opt",
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "faq" => Ok(Method::Faq),
            "2opt" => Ok(Method::TwoOpt),
            _ => Err(Error::UnknownMethod {
                name: s.to_string(),
            }),
        }
    }
}

/// Per-method options for [`solve`].
#[derive(Debug, Clone, PartialEq)]
pub enum SolverOptions {
    /// Options for [`Method::Faq`].
    Faq(FaqOptions),
    /// Options for [`Method::TwoOpt`].
    TwoOpt(TwoOptOptions),
}

impl SolverOptions {
    fn name(&self) -> &'static str {
        match self {
            SolverOptions::Faq(_) => "faq",
            SolverOptions::TwoOpt(_) => "2opt",
        }
    }
}

/// Outcome of one solve call.
#[derive(Debug, Clone, PartialEq)]
pub struct QapResult {
    /// `col_ind[i]` is the node of B matched to node `i` of A. Always a
    /// full permutation; seeded pairs are honored exactly.
    pub col_ind: Vec<usize>,

    /// Objective value at `col_ind`, recomputed from scratch on the
    /// final permutation.
    pub fun: f64,

    /// Iterations performed: Frank-Wolfe rounds for FAQ, pair
    /// evaluations for 2-opt. Zero for the trivial short circuits.
    pub nit: usize,
}

/// Solve the quadratic assignment problem with the named method.
///
/// `method` is matched case-insensitively against `"faq"` and `"2opt"`;
/// the options variant must agree with it.
///
/// ```
/// use gmatch::prelude::*;
///
/// let a = Mat::from_slice(
///     &[
///         0.0, 80.0, 150.0, 170.0, 80.0, 0.0, 130.0, 100.0, 150.0, 130.0, 0.0, 120.0, 170.0,
///         100.0, 120.0, 0.0,
///     ],
///     4,
///     4,
/// );
/// let b = Mat::from_slice(
///     &[
///         0.0, 5.0, 2.0, 7.0, 0.0, 0.0, 3.0, 8.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 0.0,
///     ],
///     4,
///     4,
/// );
/// let res = solve(&a, &b, "faq", &SolverOptions::Faq(FaqOptions::default()))?;
/// assert_eq!(res.col_ind, vec![0, 3, 2, 1]);
/// assert_eq!(res.fun, 3260.0);
/// # Ok::<(), gmatch::Error>(())
/// ```
pub fn solve(a: &Mat, b: &Mat, method: &str, options: &SolverOptions) -> Result<QapResult> {
    let method: Method = method.parse()?;
    match (method, options) {
        (Method::Faq, SolverOptions::Faq(o)) => faq(a, b, o),
        (Method::TwoOpt, SolverOptions::TwoOpt(o)) => two_opt(a, b, o),
        (m, o) => Err(Error::OptionsMismatch {
            method: m.name(),
            options: o.name(),
        }),
    }
}

/// Objective value of a permutation: `Σ_{i,j} A[i,j] · B[perm[i], perm[j]]`,
/// numerically equal to `trace(Aᵀ P B Pᵀ)` for the permutation matrix `P`
/// induced by `perm`, without forming any product. O(n²).
pub fn score(a: &Mat, b: &Mat, perm: &[usize]) -> f64 {
    let n = a.rows();
    debug_assert_eq!(perm.len(), n);
    let mut total = 0.0;
    for i in 0..n {
        let pi = perm[i];
        for j in 0..n {
            total += a[(i, j)] * b[(pi, perm[j])];
        }
    }
    total
}

/// Validate A, B, and the partial match; shared by both solvers.
pub(crate) fn validate_common(a: &Mat, b: &Mat, partial_match: &[(usize, usize)]) -> Result<()> {
    if !a.is_square() {
        return Err(Error::NotSquare {
            name: "A",
            rows: a.rows(),
            cols: a.cols(),
        });
    }
    if !b.is_square() {
        return Err(Error::NotSquare {
            name: "B",
            rows: b.rows(),
            cols: b.cols(),
        });
    }
    if a.rows() != b.rows() {
        return Err(Error::ShapeMismatch {
            a_order: a.rows(),
            b_order: b.rows(),
        });
    }
    validate_pairs("partial_match", partial_match, a.rows())
}

/// Validate a pair list: at most n pairs, indices in range, unique
/// within each column independently.
pub(crate) fn validate_pairs(
    name: &'static str,
    pairs: &[(usize, usize)],
    nodes: usize,
) -> Result<()> {
    if pairs.len() > nodes {
        return Err(Error::PairCardinality {
            name,
            pairs: pairs.len(),
            nodes,
        });
    }
    let mut seen_a = vec![false; nodes];
    let mut seen_b = vec![false; nodes];
    for &(ra, rb) in pairs {
        for (value, seen, side) in [(ra, &mut seen_a, "A"), (rb, &mut seen_b, "B")] {
            if value >= nodes {
                return Err(Error::PairOutOfRange { name, value, nodes });
            }
            if seen[value] {
                return Err(Error::DuplicatePair { name, side, value });
            }
            seen[value] = true;
        }
    }
    Ok(())
}

/// Short-circuit result for n == 0 or a fully seeded input: the seed
/// pairs already determine the whole permutation.
pub(crate) fn seeded_result(a: &Mat, b: &Mat, partial_match: &[(usize, usize)]) -> QapResult {
    let n = a.rows();
    let mut col_ind = vec![0_usize; n];
    for &(ra, rb) in partial_match {
        col_ind[ra] = rb;
    }
    let fun = score(a, b, &col_ind);
    QapResult {
        col_ind,
        fun,
        nit: 0,
    }
}
