//! Integration tests for the QAP solvers

use gmatch::prelude::*;

/// The 4-node distance/flow pair from the classic FAQ example; the
/// global optimum is col_ind = [0, 3, 2, 1] with objective 3260.
fn classic_pair() -> (Mat, Mat) {
    let a = Mat::from_slice(
        &[
            0.0, 80.0, 150.0, 170.0, //
            80.0, 0.0, 130.0, 100.0, //
            150.0, 130.0, 0.0, 120.0, //
            170.0, 100.0, 120.0, 0.0,
        ],
        4,
        4,
    );
    let b = Mat::from_slice(
        &[
            0.0, 5.0, 2.0, 7.0, //
            0.0, 0.0, 3.0, 8.0, //
            0.0, 0.0, 0.0, 3.0, //
            0.0, 0.0, 0.0, 0.0,
        ],
        4,
        4,
    );
    (a, b)
}

/// A pair where FAQ stops at a local optimum (objective 178; the true
/// optimum is 176).
fn local_optimum_pair() -> (Mat, Mat) {
    let a = Mat::from_slice(
        &[
            0.0, 5.0, 8.0, 6.0, //
            5.0, 0.0, 5.0, 1.0, //
            8.0, 5.0, 0.0, 2.0, //
            6.0, 1.0, 2.0, 0.0,
        ],
        4,
        4,
    );
    let b = Mat::from_slice(
        &[
            0.0, 1.0, 8.0, 4.0, //
            1.0, 0.0, 5.0, 2.0, //
            8.0, 5.0, 0.0, 5.0, //
            4.0, 2.0, 5.0, 0.0,
        ],
        4,
        4,
    );
    (a, b)
}

fn assert_is_permutation(perm: &[usize]) {
    let mut sorted = perm.to_vec();
    sorted.sort_unstable();
    let expected: Vec<usize> = (0..perm.len()).collect();
    assert_eq!(sorted, expected, "not a permutation: {perm:?}");
}

// ============================================================================
// FAQ
// ============================================================================

#[test]
fn faq_known_answer() {
    let (a, b) = classic_pair();
    let res = faq(&a, &b, &FaqOptions::default()).unwrap();
    assert_eq!(res.col_ind, vec![0, 3, 2, 1]);
    assert_eq!(res.fun, 3260.0);
    assert_eq!(res.nit, 9);
}

#[test]
fn faq_known_local_optimum() {
    let (a, b) = local_optimum_pair();
    let res = faq(&a, &b, &FaqOptions::default()).unwrap();
    assert_eq!(res.col_ind, vec![1, 0, 3, 2]);
    assert_eq!(res.fun, 178.0);
    assert_eq!(res.nit, 13);
}

#[test]
fn faq_maximize() {
    let (a, b) = classic_pair();
    let options = FaqOptions {
        maximize: true,
        ..Default::default()
    };
    let res = faq(&a, &b, &options).unwrap();
    assert_eq!(res.col_ind, vec![3, 2, 1, 0]);
    assert_eq!(res.fun, 3820.0);
    assert_eq!(res.nit, 2);
}

#[test]
fn faq_seeds_are_honored() {
    let (a, b) = classic_pair();
    let options = FaqOptions {
        partial_match: vec![(0, 0)],
        ..Default::default()
    };
    let res = faq(&a, &b, &options).unwrap();
    assert_eq!(res.col_ind[0], 0);
    assert_eq!(res.col_ind, vec![0, 3, 1, 2]);
    assert_eq!(res.fun, 3350.0);
    assert_eq!(res.nit, 14);

    let options = FaqOptions {
        partial_match: vec![(2, 2), (1, 3)],
        ..Default::default()
    };
    let res = faq(&a, &b, &options).unwrap();
    assert_eq!(res.col_ind[2], 2);
    assert_eq!(res.col_ind[1], 3);
    assert_eq!(res.col_ind, vec![0, 3, 2, 1]);
    assert_eq!(res.fun, 3260.0);
    assert_eq!(res.nit, 1);
}

#[test]
fn faq_seeds_honored_with_shuffle_and_random_init() {
    let (a, b) = classic_pair();
    for n_seeds in 0..=4 {
        let seeds: Vec<(usize, usize)> = (0..n_seeds).map(|i| (i, i)).collect();
        let options = FaqOptions {
            partial_match: seeds.clone(),
            shuffle_input: true,
            init: InitMethod::Randomized,
            seed: 11,
            ..Default::default()
        };
        let res = faq(&a, &b, &options).unwrap();
        assert_is_permutation(&res.col_ind);
        for (ra, rb) in seeds {
            assert_eq!(res.col_ind[ra], rb, "seed ({ra},{rb}) violated");
        }
    }
}

#[test]
fn faq_fully_seeded_short_circuit() {
    let (a, b) = classic_pair();
    // seeds given out of row order on purpose
    let options = FaqOptions {
        partial_match: vec![(2, 0), (0, 1), (3, 3), (1, 2)],
        ..Default::default()
    };
    let res = faq(&a, &b, &options).unwrap();
    assert_eq!(res.nit, 0);
    assert_eq!(res.col_ind, vec![1, 2, 0, 3]);
    assert_eq!(res.fun, score(&a, &b, &res.col_ind));
}

#[test]
fn faq_empty_input() {
    let empty = Mat::zeros(0, 0);
    let res = faq(&empty, &empty, &FaqOptions::default()).unwrap();
    assert!(res.col_ind.is_empty());
    assert_eq!(res.fun, 0.0);
    assert_eq!(res.nit, 0);
}

#[test]
fn faq_single_node() {
    let a = Mat::from_slice(&[3.0], 1, 1);
    let b = Mat::from_slice(&[2.0], 1, 1);
    let res = faq(&a, &b, &FaqOptions::default()).unwrap();
    assert_eq!(res.col_ind, vec![0]);
    assert_eq!(res.fun, 6.0);
    assert_eq!(res.nit, 1);
}

#[test]
fn faq_explicit_initial_position() {
    let (a, b) = classic_pair();
    let options = FaqOptions {
        init: InitMethod::Explicit(Mat::filled(4, 4, 0.25)),
        ..Default::default()
    };
    // the barycenter passed explicitly must match the default run
    let explicit = faq(&a, &b, &options).unwrap();
    let default = faq(&a, &b, &FaqOptions::default()).unwrap();
    assert_eq!(explicit, default);
}

#[test]
fn faq_reproducible_with_equal_seeds() {
    let (a, b) = classic_pair();
    let options = FaqOptions {
        init: InitMethod::Randomized,
        shuffle_input: true,
        seed: 1234,
        ..Default::default()
    };
    let first = faq(&a, &b, &options).unwrap();
    let second = faq(&a, &b, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn faq_score_is_recomputed_from_the_permutation() {
    let (a, b) = classic_pair();
    for maximize in [false, true] {
        let options = FaqOptions {
            maximize,
            ..Default::default()
        };
        let res = faq(&a, &b, &options).unwrap();
        assert_eq!(res.fun, score(&a, &b, &res.col_ind));
    }
}

// ============================================================================
// FAQ validation
// ============================================================================

#[test]
fn faq_rejects_non_square() {
    let a = Mat::zeros(2, 3);
    let b = Mat::zeros(3, 3);
    let err = faq(&a, &b, &FaqOptions::default()).unwrap_err();
    assert!(err.to_string().contains("square"));
}

#[test]
fn faq_rejects_shape_mismatch() {
    let a = Mat::zeros(2, 2);
    let b = Mat::zeros(3, 3);
    assert!(matches!(
        faq(&a, &b, &FaqOptions::default()),
        Err(Error::ShapeMismatch { .. })
    ));
}

#[test]
fn faq_rejects_duplicate_seeds() {
    let (a, b) = classic_pair();
    let options = FaqOptions {
        partial_match: vec![(0, 1), (0, 2)],
        ..Default::default()
    };
    let err = faq(&a, &b, &options).unwrap_err();
    assert!(err.to_string().contains("unique"));
}

#[test]
fn faq_rejects_bad_iteration_options() {
    let (a, b) = classic_pair();
    let options = FaqOptions {
        maxiter: 0,
        ..Default::default()
    };
    assert!(matches!(
        faq(&a, &b, &options),
        Err(Error::NonPositiveMaxIter)
    ));
    let options = FaqOptions {
        tol: 0.0,
        ..Default::default()
    };
    assert!(matches!(
        faq(&a, &b, &options),
        Err(Error::NonPositiveTol { .. })
    ));
}

#[test]
fn faq_rejects_malformed_explicit_position() {
    let (a, b) = classic_pair();
    // wrong size once the two seeds are removed
    let options = FaqOptions {
        partial_match: vec![(0, 0), (1, 1)],
        init: InitMethod::Explicit(Mat::filled(4, 4, 0.25)),
        ..Default::default()
    };
    assert!(matches!(
        faq(&a, &b, &options),
        Err(Error::InitPositionShape { .. })
    ));
    let options = FaqOptions {
        init: InitMethod::Explicit(Mat::filled(4, 4, 0.5)),
        ..Default::default()
    };
    assert!(matches!(
        faq(&a, &b, &options),
        Err(Error::InitPositionNotDoublyStochastic)
    ));
}

// ============================================================================
// 2-opt
// ============================================================================

#[test]
fn two_opt_reaches_a_pairwise_local_optimum() {
    let (a, b) = classic_pair();
    for maximize in [false, true] {
        let options = TwoOptOptions {
            maximize,
            seed: 3,
            ..Default::default()
        };
        let res = two_opt(&a, &b, &options).unwrap();
        assert_is_permutation(&res.col_ind);
        assert_eq!(res.fun, score(&a, &b, &res.col_ind));
        assert!(res.nit > 0);

        // defining post-condition: no single swap improves the score
        let mut perm = res.col_ind.clone();
        for i in 0..4 {
            for j in i..4 {
                perm.swap(i, j);
                let trial = score(&a, &b, &perm);
                perm.swap(i, j);
                if maximize {
                    assert!(trial <= res.fun);
                } else {
                    assert!(trial >= res.fun);
                }
            }
        }
    }
}

#[test]
fn two_opt_seeds_are_honored_and_never_swapped() {
    let (a, b) = classic_pair();
    for n_seeds in 0..=4 {
        let seeds: Vec<(usize, usize)> = (0..n_seeds).map(|i| (i, 3 - i)).collect();
        let options = TwoOptOptions {
            partial_match: seeds.clone(),
            seed: 99,
            ..Default::default()
        };
        let res = two_opt(&a, &b, &options).unwrap();
        assert_is_permutation(&res.col_ind);
        for (ra, rb) in seeds {
            assert_eq!(res.col_ind[ra], rb, "seed ({ra},{rb}) violated");
        }
    }
}

#[test]
fn two_opt_guess_can_start_at_the_optimum() {
    let (a, b) = classic_pair();
    let options = TwoOptOptions {
        partial_guess: vec![(0, 0), (1, 3), (2, 2), (3, 1)],
        ..Default::default()
    };
    let res = two_opt(&a, &b, &options).unwrap();
    // the guess is the global optimum; 2-opt must not leave it
    assert_eq!(res.col_ind, vec![0, 3, 2, 1]);
    assert_eq!(res.fun, 3260.0);
}

#[test]
fn two_opt_trivial_short_circuits() {
    let empty = Mat::zeros(0, 0);
    let res = two_opt(&empty, &empty, &TwoOptOptions::default()).unwrap();
    assert!(res.col_ind.is_empty());
    assert_eq!(res.fun, 0.0);
    assert_eq!(res.nit, 0);

    let (a, b) = classic_pair();
    let options = TwoOptOptions {
        partial_match: vec![(3, 0), (2, 1), (1, 2), (0, 3)],
        ..Default::default()
    };
    let res = two_opt(&a, &b, &options).unwrap();
    assert_eq!(res.nit, 0);
    assert_eq!(res.col_ind, vec![3, 2, 1, 0]);
}

#[test]
fn two_opt_reproducible_with_equal_seeds() {
    let (a, b) = classic_pair();
    let options = TwoOptOptions {
        seed: 77,
        ..Default::default()
    };
    assert_eq!(
        two_opt(&a, &b, &options).unwrap(),
        two_opt(&a, &b, &options).unwrap()
    );
}

#[test]
fn two_opt_refines_an_faq_solution() {
    let (a, b) = local_optimum_pair();
    let faq_res = faq(&a, &b, &FaqOptions::default()).unwrap();
    let guess: Vec<(usize, usize)> = faq_res.col_ind.iter().copied().enumerate().collect();
    let options = TwoOptOptions {
        partial_guess: guess,
        ..Default::default()
    };
    let refined = two_opt(&a, &b, &options).unwrap();
    assert!(refined.fun <= faq_res.fun);
    assert_eq!(refined.fun, 176.0);
}

// ============================================================================
// Dispatcher
// ============================================================================

#[test]
fn solve_dispatches_case_insensitively() {
    let (a, b) = classic_pair();
    let res = solve(&a, &b, "FaQ", &SolverOptions::Faq(FaqOptions::default())).unwrap();
    assert_eq!(res.col_ind, vec![0, 3, 2, 1]);

    let res = solve(
        &a,
        &b,
        "2OPT",
        &SolverOptions::TwoOpt(TwoOptOptions::default()),
    )
    .unwrap();
    assert_is_permutation(&res.col_ind);
}

#[test]
fn solve_rejects_unknown_method_and_mismatched_options() {
    let (a, b) = classic_pair();
    assert!(matches!(
        solve(&a, &b, "anneal", &SolverOptions::Faq(FaqOptions::default())),
        Err(Error::UnknownMethod { .. })
    ));
    assert!(matches!(
        solve(&a, &b, "2opt", &SolverOptions::Faq(FaqOptions::default())),
        Err(Error::OptionsMismatch { .. })
    ));
}
