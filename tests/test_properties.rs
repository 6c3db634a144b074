//! Property tests over small random functions

use patrick_logic::{
    generate_prime_implicants, minimize_multiple_functions, minimize_single_function,
    CoverageTable, EssentialAnalysis, Function, GenerationMode, Implicant, Minimizer,
    MinimizerConfig, NoTrace, Pattern,
};
use proptest::prelude::*;

/// Random on-set and don't-care set (disjoint) over `n` variables
fn function(max_vars: usize) -> impl Strategy<Value = (usize, Vec<u32>, Vec<u32>)> {
    (1..=max_vars).prop_flat_map(|n| {
        let size = 1usize << n;
        prop::collection::vec(0u8..3, size).prop_map(move |cells| {
            let on = (0..size as u32).filter(|&m| cells[m as usize] == 1).collect();
            let dc = (0..size as u32).filter(|&m| cells[m as usize] == 2).collect();
            (n, on, dc)
        })
    })
}

fn pattern(n: usize) -> impl Strategy<Value = Pattern> {
    prop::collection::vec(prop::option::of(any::<bool>()), n).prop_map(|bits| Pattern::new(&bits))
}

/// Minimum cover cost by dynamic programming over covered-target sets
fn brute_force_cost(targets: &[u32], primes: &[Implicant]) -> u32 {
    let full = (1usize << targets.len()) - 1;
    let masks: Vec<usize> = primes
        .iter()
        .map(|pi| {
            targets
                .iter()
                .enumerate()
                .filter(|(_, &m)| pi.covers(m))
                .fold(0, |acc, (i, _)| acc | (1 << i))
        })
        .collect();

    let mut best = vec![u32::MAX; full + 1];
    best[0] = 0;
    for covered in 0..=full {
        if best[covered] == u32::MAX || covered == full {
            continue;
        }
        let missing = (!covered & full).trailing_zeros();
        for (pi, &mask) in primes.iter().zip(&masks) {
            if mask & (1 << missing) != 0 {
                let next = covered | mask;
                best[next] = best[next].min(best[covered] + pi.cost());
            }
        }
    }
    best[full]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_primes_cover_exactly_the_targets((n, on, dc) in function(4)) {
        let primes = generate_prime_implicants(&on, &dc, n, GenerationMode::TruePrimes);
        for pi in &primes {
            prop_assert!(!pi.minterms().is_empty());
            for m in pi.pattern().minterms() {
                prop_assert!(on.contains(&m) || dc.contains(&m));
            }
        }
        for &m in &on {
            prop_assert!(primes.iter().any(|pi| pi.covers(m)));
        }
    }

    #[test]
    fn prop_essential_iff_sole_cover((n, on, dc) in function(4)) {
        let primes = generate_prime_implicants(&on, &dc, n, GenerationMode::TruePrimes);
        let table = CoverageTable::build(&on, &primes);
        let analysis = EssentialAnalysis::analyze(&table, &primes);
        for i in 0..primes.len() {
            let sole = on.iter().any(|&m| table.covering(m) == [i]);
            prop_assert_eq!(analysis.is_essential(i), sole);
        }
    }

    #[test]
    fn prop_solutions_are_minimal((n, on, dc) in function(4)) {
        let result = minimize_single_function(&on, &dc, n).unwrap();
        let expected = brute_force_cost(&result.minterms, &result.prime_implicants);
        prop_assert!(!result.solutions.is_empty());
        for solution in &result.solutions {
            prop_assert_eq!(solution.cost(), expected);
            for m in 0..(1u32 << n) {
                if on.contains(&m) {
                    prop_assert!(solution.covers(m));
                } else if !dc.contains(&m) {
                    prop_assert!(solution.implicants().iter().all(|pi| !pi.pattern().covers(m)));
                }
            }
        }
    }

    #[test]
    fn prop_combine_is_symmetric(
        (a, b) in (1usize..6).prop_flat_map(|n| (pattern(n), pattern(n)))
    ) {
        prop_assert_eq!(a.combine(&b), b.combine(&a));
        if let Some(merged) = a.combine(&b) {
            for m in a.minterms().into_iter().chain(b.minterms()) {
                prop_assert!(merged.covers(m));
            }
            let same_free = a
                .bits()
                .iter()
                .zip(b.bits())
                .all(|(x, y)| x.is_none() == y.is_none());
            if same_free {
                prop_assert_eq!(merged.free_count(), a.free_count() + 1);
            }
        }
    }

    #[test]
    fn prop_cost_law(p in (1usize..8).prop_flat_map(pattern)) {
        let literals = p.literal_count() as u32;
        let expected = if literals <= 1 { 1 } else { literals + 1 };
        prop_assert_eq!(p.cost(), expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_joint_solutions_cover_and_save(
        (n, f1, f2) in (1usize..=3).prop_flat_map(|n| {
            let size = 1u32 << n;
            (
                Just(n),
                prop::collection::btree_set(0..size, 0..=size as usize),
                prop::collection::btree_set(0..size, 0..=size as usize),
            )
        })
    ) {
        let f1: Vec<u32> = f1.into_iter().collect();
        let f2: Vec<u32> = f2.into_iter().collect();
        let functions = [Function::new("F1", &f1), Function::new("F2", &f2)];
        let result = minimize_multiple_functions(&functions, &[], n).unwrap();

        prop_assert!(result.shared_cost <= result.total_individual_cost);
        prop_assert_eq!(result.savings, result.total_individual_cost - result.shared_cost);
        if result.shared_patterns.is_empty() {
            prop_assert_eq!(result.savings, 0);
        }
        for function in &functions {
            let solution = &result.per_function[&function.name];
            for m in 0..(1u32 << n) {
                prop_assert_eq!(solution.covers(m), function.minterms.contains(&m));
                prop_assert!(
                    function.minterms.contains(&m)
                        || solution.implicants().iter().all(|pi| !pi.pattern().covers(m))
                );
            }
        }
    }

    #[test]
    fn prop_joint_strategies_agree(
        f1 in prop::collection::btree_set(0u32..8, 1..=5),
        f2 in prop::collection::btree_set(0u32..8, 1..=5),
    ) {
        let f1: Vec<u32> = f1.into_iter().collect();
        let f2: Vec<u32> = f2.into_iter().collect();
        let functions = [Function::new("F1", &f1), Function::new("F2", &f2)];
        let run = |limit: usize| {
            let config = MinimizerConfig::new().with_joint_exhaustive_limit(limit);
            Minimizer::with_trace(config, NoTrace)
                .minimize_multiple_functions(&functions, &[], 3)
                .unwrap()
        };

        let bounded = run(0);
        prop_assume!(bounded.registry.len() <= 18);
        let exhaustive = run(30);
        prop_assert_eq!(bounded.shared_cost, exhaustive.shared_cost);
        prop_assert_eq!(bounded.expressions(), exhaustive.expressions());
        prop_assert_eq!(bounded.joint_solutions.len(), exhaustive.joint_solutions.len());
    }
}
