//! Dense linear assignment
//!
//! Shortest-augmenting-path solver with dual potentials (the dense
//! Jonker-Volgenant formulation, the same family as Duff and Koster's
//! MC64). One row is inserted per outer round; each insertion grows a
//! Dijkstra-style alternating tree until it reaches a free column, then
//! augments along the recorded path. O(n³) overall, fully deterministic:
//! ties are resolved by the lowest column index.
//!
//! The FAQ solver calls this twice per use: on the gradient to pick a
//! descent direction, and on the negated search position to round the
//! relaxation back to a permutation.

use crate::matrix::Mat;

/// Minimum-cost assignment of rows to columns of a square cost matrix.
///
/// Returns `cols` with `cols[i]` the column assigned to row `i`.
///
/// # Panics
/// Panics if `cost` is not square.
pub fn lap_min(cost: &Mat) -> Vec<usize> {
    assert!(cost.is_square(), "cost matrix must be square");
    let n = cost.rows();
    if n == 0 {
        return Vec::new();
    }

    // 1-based internals; index 0 is the virtual root holding the row
    // currently being inserted. p[j] is the row matched to column j
    // (0 = free), way[j] the previous column on the alternating path.
    let mut u = vec![0.0_f64; n + 1];
    let mut v = vec![0.0_f64; n + 1];
    let mut p = vec![0_usize; n + 1];
    let mut way = vec![0_usize; n + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0_usize;
        let mut minv = vec![f64::INFINITY; n + 1];
        let mut used = vec![false; n + 1];

        // Grow the tree until the cheapest frontier column is free.
        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0_usize;
            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let cur = cost[(i0 - 1, j - 1)] - u[i0] - v[j];
                if cur < minv[j] {
                    minv[j] = cur;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }
            // Shift potentials so the chosen edge becomes tight.
            for j in 0..=n {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }
            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        // Augment: walk the path back to the root, shifting matches.
        while j0 != 0 {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
        }
    }

    let mut cols = vec![0_usize; n];
    for j in 1..=n {
        if p[j] != 0 {
            cols[p[j] - 1] = j - 1;
        }
    }
    cols
}

/// Maximum-weight assignment, via `lap_min` on the negated costs.
pub fn lap_max(cost: &Mat) -> Vec<usize> {
    lap_min(&cost.neg())
}

/// Dispatch on the optimization sense.
pub fn lap(cost: &Mat, maximize: bool) -> Vec<usize> {
    if maximize {
        lap_max(cost)
    } else {
        lap_min(cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost_of(cost: &Mat, cols: &[usize]) -> f64 {
        cols.iter()
            .enumerate()
            .map(|(i, &j)| cost[(i, j)])
            .sum()
    }

    #[test]
    fn empty_matrix() {
        assert!(lap_min(&Mat::zeros(0, 0)).is_empty());
    }

    #[test]
    fn known_3x3_minimum() {
        let cost = Mat::from_slice(&[4.0, 1.0, 3.0, 2.0, 0.0, 5.0, 3.0, 2.0, 2.0], 3, 3);
        let cols = lap_min(&cost);
        assert_eq!(cols, vec![1, 0, 2]);
        assert!((cost_of(&cost, &cols) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn known_2x2_maximum() {
        let cost = Mat::from_slice(&[1.0, 2.0, 2.0, 4.0], 2, 2);
        // diagonal beats anti-diagonal: 1 + 4 > 2 + 2
        assert_eq!(lap_max(&cost), vec![0, 1]);
    }

    #[test]
    fn result_is_a_permutation() {
        let cost = Mat::from_slice(
            &[
                7.0, 3.0, 1.0, 9.0, //
                2.0, 8.0, 6.0, 4.0, //
                5.0, 5.0, 2.0, 8.0, //
                9.0, 1.0, 3.0, 2.0,
            ],
            4,
            4,
        );
        let mut cols = lap_min(&cost);
        cols.sort_unstable();
        assert_eq!(cols, vec![0, 1, 2, 3]);
    }

    #[test]
    fn optimal_against_brute_force() {
        let cost = Mat::from_slice(
            &[
                7.0, 3.0, 1.0, 9.0, //
                2.0, 8.0, 6.0, 4.0, //
                5.0, 5.0, 2.0, 8.0, //
                9.0, 1.0, 3.0, 2.0,
            ],
            4,
            4,
        );
        let best = permutations(4)
            .into_iter()
            .map(|p| cost_of(&cost, &p))
            .fold(f64::INFINITY, f64::min);
        let cols = lap_min(&cost);
        assert!((cost_of(&cost, &cols) - best).abs() < 1e-12);
    }

    fn permutations(n: usize) -> Vec<Vec<usize>> {
        if n == 0 {
            return vec![Vec::new()];
        }
        let mut out = Vec::new();
        for p in permutations(n - 1) {
            for k in 0..n {
                let mut q = p.clone();
                q.insert(k, n - 1);
                out.push(q);
            }
        }
        out
    }
}
