//! 2-opt pairwise-swap solver
//!
//! Greedy local search directly over permutations: starting from a
//! seeded/guessed/random permutation, sweep all unordered pairs of free
//! indices and accept the first swap that strictly improves the
//! objective, restarting the sweep after every acceptance. Terminates
//! when a full sweep makes no swap, which certifies that no single
//! pairwise swap among free indices can improve the returned score.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::Result;
use crate::matrix::Mat;

use super::options::TwoOptOptions;
use super::{score, seeded_result, validate_common, validate_pairs, QapResult};

/// Solve the QAP/GMP approximately by greedy pairwise swaps.
///
/// `options.partial_match` pairs are fixed and never swapped;
/// `options.partial_guess` pairs only shape the starting permutation.
/// `nit` counts pair evaluations, not sweeps.
pub fn two_opt(a: &Mat, b: &Mat, options: &TwoOptOptions) -> Result<QapResult> {
    validate_common(a, b, &options.partial_match)?;

    let n = a.rows();
    if n == 0 || options.partial_match.len() == n {
        return Ok(seeded_result(a, b, &options.partial_match));
    }

    validate_pairs("partial_guess", &options.partial_guess, n)?;
    let mut rng = StdRng::seed_from_u64(options.seed);

    // Initial permutation: seeds are binding, guesses fill still-free
    // rows whose guessed column is also still free, and everything left
    // gets a uniformly random assignment of the remaining columns.
    const UNSET: usize = usize::MAX;
    let mut perm = vec![UNSET; n];
    let mut col_used = vec![false; n];
    let mut row_fixed = vec![false; n];
    for &(ra, rb) in &options.partial_match {
        perm[ra] = rb;
        col_used[rb] = true;
        row_fixed[ra] = true;
    }
    for &(ra, rb) in &options.partial_guess {
        if perm[ra] == UNSET && !col_used[rb] {
            perm[ra] = rb;
            col_used[rb] = true;
        }
    }
    let mut free_cols: Vec<usize> = (0..n).filter(|&c| !col_used[c]).collect();
    free_cols.shuffle(&mut rng);
    let mut next_free = free_cols.into_iter();
    for slot in perm.iter_mut() {
        if *slot == UNSET {
            // complement sizes match by construction
            *slot = next_free.next().unwrap();
        }
    }

    let i_free: Vec<usize> = (0..n).filter(|&i| !row_fixed[i]).collect();
    let mut best = score(a, b, &perm);
    let mut nit = 0_usize;

    // First-improvement sweeps, restarted from the top after every
    // accepted swap. The degenerate i == j pair still counts as an
    // evaluation.
    'sweep: loop {
        for x in 0..i_free.len() {
            for y in x..i_free.len() {
                let (i, j) = (i_free[x], i_free[y]);
                nit += 1;
                perm.swap(i, j);
                let trial = score(a, b, &perm);
                let improved = if options.maximize {
                    trial > best
                } else {
                    trial < best
                };
                if improved {
                    best = trial;
                    continue 'sweep;
                }
                perm.swap(i, j);
            }
        }
        // a full pass made no swap
        break;
    }

    Ok(QapResult {
        col_ind: perm,
        fun: best,
        nit,
    })
}
