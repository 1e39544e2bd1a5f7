//! Solver configuration
//!
//! Strongly-typed per-method option structs with their defaults fixed at
//! definition time. The recognized knobs are exactly the struct fields;
//! there is no dynamic key space, so an unknown option cannot be
//! expressed at all. Randomness is never implicit: every stochastic
//! choice derives from the `seed` field.

use crate::matrix::Mat;

/// Initial search position for the FAQ solver.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InitMethod {
    /// The flat doubly-stochastic matrix `J = 1·1ᵀ/(n−m)`, the
    /// barycenter of the search polytope.
    #[default]
    Barycenter,

    /// `(J + K)/2` where `K` is a Sinkhorn-balanced matrix of uniform
    /// random entries.
    Randomized,

    /// A caller-supplied `(n−m)×(n−m)` matrix. Validated for shape and
    /// doubly-stochasticity (tolerance 1e-3) before use.
    Explicit(Mat),
}

/// Options for the FAQ (Fast Approximate QAP) solver.
#[derive(Debug, Clone, PartialEq)]
pub struct FaqOptions {
    /// Fixed node correspondences `(node of A, node of B)`, honored
    /// exactly in the returned permutation.
    pub partial_match: Vec<(usize, usize)>,

    /// Maximize the objective (graph matching) instead of minimizing it
    /// (quadratic assignment).
    pub maximize: bool,

    /// Seed for all random draws. Identical seed and inputs reproduce
    /// bit-identical results.
    pub seed: u64,

    /// Initial search position.
    pub init: InitMethod,

    /// Shuffle the unseeded nodes of B before solving, to avoid bias
    /// from pre-aligned inputs. Results are un-shuffled on return.
    pub shuffle_input: bool,

    /// Maximum number of Frank-Wolfe iterations. Must be positive.
    pub maxiter: usize,

    /// Stopping threshold on the relative Frobenius change of the
    /// search position between iterations. Must be positive.
    pub tol: f64,
}

impl Default for FaqOptions {
    fn default() -> Self {
        Self {
            partial_match: Vec::new(),
            maximize: false,
            seed: 0,
            init: InitMethod::Barycenter,
            shuffle_input: false,
            maxiter: 30,
            tol: 0.03,
        }
    }
}

/// Options for the 2-opt pairwise-swap solver.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TwoOptOptions {
    /// Fixed node correspondences, honored exactly and excluded from
    /// swapping.
    pub partial_match: Vec<(usize, usize)>,

    /// Non-binding starting correspondences. Seeds override conflicting
    /// guesses; guessed nodes remain free to be swapped.
    pub partial_guess: Vec<(usize, usize)>,

    /// Maximize instead of minimize.
    pub maximize: bool,

    /// Seed for the random fill of unconstrained nodes.
    pub seed: u64,
}
