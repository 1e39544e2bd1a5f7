//! Error types for gmatch

use thiserror::Error;

/// Result type alias using gmatch's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating solver inputs.
///
/// Every variant is detected eagerly, before any numerical work begins.
/// Non-convergence of the Frank-Wolfe iteration or of the Sinkhorn-Knopp
/// balancer is *not* an error; best-effort results are returned and callers
/// may inspect the iteration count instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A solver input matrix is not square
    #[error("`{name}` must be square (got {rows}x{cols})")]
    NotSquare {
        /// Which argument ("A" or "B")
        name: &'static str,
        /// Row count of the offending matrix
        rows: usize,
        /// Column count of the offending matrix
        cols: usize,
    },

    /// The two input matrices differ in size
    #[error("`A` and `B` matrices must be of equal size (got {a_order} and {b_order} nodes)")]
    ShapeMismatch {
        /// Order of A
        a_order: usize,
        /// Order of B
        b_order: usize,
    },

    /// More seed/guess pairs than nodes
    #[error("`{name}` can have only as many pairs as there are nodes ({pairs} > {nodes})")]
    PairCardinality {
        /// Which argument ("partial_match" or "partial_guess")
        name: &'static str,
        /// Number of pairs supplied
        pairs: usize,
        /// Number of nodes
        nodes: usize,
    },

    /// A seed/guess index is not a valid node index
    #[error("`{name}` entries must be less than the number of nodes ({value} >= {nodes})")]
    PairOutOfRange {
        /// Which argument ("partial_match" or "partial_guess")
        name: &'static str,
        /// The offending index
        value: usize,
        /// Number of nodes
        nodes: usize,
    },

    /// A node index repeats within one column of the pair list
    #[error("`{name}` column entries must be unique (node {value} repeats in the {side} column)")]
    DuplicatePair {
        /// Which argument ("partial_match" or "partial_guess")
        name: &'static str,
        /// "A" or "B"
        side: &'static str,
        /// The repeated index
        value: usize,
    },

    /// `maxiter` must be at least 1
    #[error("`maxiter` must be a positive integer")]
    NonPositiveMaxIter,

    /// `tol` must be strictly positive
    #[error("`tol` must be a positive float (got {tol})")]
    NonPositiveTol {
        /// The offending tolerance
        tol: f64,
    },

    /// An explicit initial search position has the wrong shape
    #[error("initial position must have shape {expected}x{expected} (got {rows}x{cols})")]
    InitPositionShape {
        /// Required order, n minus the number of seeds
        expected: usize,
        /// Row count supplied
        rows: usize,
        /// Column count supplied
        cols: usize,
    },

    /// An explicit initial search position is not doubly stochastic
    #[error("initial position matrix must be doubly stochastic")]
    InitPositionNotDoublyStochastic,

    /// The method name did not parse
    #[error("unknown method `{name}`; expected \"faq\" or \"2opt\"")]
    UnknownMethod {
        /// The unrecognized name
        name: String,
    },

    /// The options variant does not belong to the requested method
    #[error("method `{method}` does not accept `{options}` options")]
    OptionsMismatch {
        /// The requested method
        method: &'static str,
        /// The supplied options variant
        options: &'static str,
    },
}
