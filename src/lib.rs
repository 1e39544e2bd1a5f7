//! # gmatch
//!
//! **Seeded graph matching and approximate quadratic assignment.**
//!
//! gmatch aligns the nodes of two weighted graphs by approximately
//! solving the quadratic assignment problem (QAP)
//!
//! ```text
//! min_P  trace(Aᵀ P B Pᵀ)    over permutation matrices P
//! ```
//!
//! (maximized instead for the graph matching problem). Two solvers are
//! provided:
//!
//! - **FAQ** — the Fast Approximate QAP algorithm: Frank-Wolfe
//!   iteration over the doubly-stochastic relaxation, with an exact
//!   closed-form line search and a final rounding step via linear
//!   assignment. Typically the best speed/accuracy trade-off.
//! - **2-opt** — greedy pairwise-swap local search over permutations.
//!   Slower, but useful on its own or to refine an FAQ solution.
//!
//! Both support *seeded* matching: fixed node correspondences that are
//! honored exactly. QAP is NP-hard; results are approximations.
//!
//! ## Quick start
//!
//! ```
//! use gmatch::prelude::*;
//!
//! let a = Mat::from_slice(&[0.0, 3.0, 3.0, 0.0], 2, 2);
//! let b = Mat::from_slice(&[0.0, 5.0, 5.0, 0.0], 2, 2);
//!
//! let res = faq(&a, &b, &FaqOptions::default())?;
//! assert_eq!(res.col_ind.len(), 2);
//! # Ok::<(), gmatch::Error>(())
//! ```
//!
//! ## Determinism
//!
//! There is no hidden global random state: all stochastic choices
//! (randomized initialization, input shuffling, random starting
//! permutations) derive from the explicit `seed` in the options.
//! Identical inputs and seed reproduce bit-identical results.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod lap;
pub mod matrix;
pub mod qap;
pub mod sinkhorn;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::matrix::Mat;
    pub use crate::qap::{
        faq, score, solve, two_opt, FaqOptions, InitMethod, Method, QapResult, SolverOptions,
        TwoOptOptions,
    };
}
