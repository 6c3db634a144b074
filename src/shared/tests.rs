//! Tests for multi-function sharing

use super::*;
use crate::config::MinimizerConfig;
use crate::minimize::{minimize_multiple_functions, Minimizer};
use crate::trace::{NoTrace, Recorder};
use std::collections::BTreeSet;
use test_log::test;

fn p(s: &str) -> Pattern {
    s.parse().unwrap()
}

fn names(result: &MultiFunctionResult, pattern: &str) -> Vec<String> {
    result
        .registry
        .get(&p(pattern))
        .map(|e| e.used_by().iter().map(|n| n.to_string()).collect())
        .unwrap_or_default()
}

#[test]
fn test_identical_functions_share_one_term() {
    let functions = [Function::new("F1", &[0, 1]), Function::new("F2", &[0, 1])];
    let result = minimize_multiple_functions(&functions, &[], 2).unwrap();

    assert_eq!(names(&result, "0-"), ["F1", "F2"]);
    assert_eq!(result.joint_solutions.len(), 1);
    assert_eq!(result.joint_solutions[0].patterns, vec![p("0-")]);
    assert_eq!(result.joint_solutions[0].stage3_cost, 2);
    assert_eq!(result.shared_cost, 2);
    assert_eq!(result.total_individual_cost, 2);
    assert_eq!(result.savings, 0);
    assert_eq!(result.expressions(), ["F1 = A'", "F2 = A'"]);
}

#[test]
fn test_shared_multi_literal_term_saves_cost() {
    let functions = [Function::new("F1", &[3]), Function::new("F2", &[3])];
    let result = minimize_multiple_functions(&functions, &[], 2).unwrap();

    assert_eq!(
        result.shared_patterns,
        vec![SharedPattern {
            pattern: p("11"),
            used_by: vec![Arc::from("F1"), Arc::from("F2")],
            cost: 3,
        }]
    );
    // 3 + (2 - 1) shared against 3 + 3 separately
    assert_eq!(result.shared_cost, 4);
    assert_eq!(result.total_individual_cost, 6);
    assert_eq!(result.savings, 2);
    assert_eq!(result.primary().map(JointSolution::savings), Some(2));
}

#[test]
fn test_unused_shared_pattern_saves_nothing() {
    let functions = [Function::new("F1", &[0, 1]), Function::new("F2", &[1, 3])];
    let result = minimize_multiple_functions(&functions, &[], 2).unwrap();

    assert_eq!(names(&result, "01"), ["F1", "F2"]);
    assert_eq!(result.shared_patterns.len(), 1);
    assert_eq!(result.expression("F1").as_deref(), Some("A'"));
    assert_eq!(result.expression("F2").as_deref(), Some("B"));
    assert_eq!(result.shared_cost, 2);
    assert_eq!(result.savings, 0);
}

#[test]
fn test_dont_cares_apply_to_every_function() {
    let functions = [Function::new("F1", &[0]), Function::new("F2", &[1])];
    let result = minimize_multiple_functions(&functions, &[2, 3], 2).unwrap();

    assert_eq!(result.expressions(), ["F1 = B'", "F2 = B"]);
    assert_eq!(result.shared_cost, 2);
    // Terms covering only don't-cares are never registered
    assert!(result.registry.get(&p("1-")).is_none());
}

#[test]
fn test_registry_minterms_are_a_union() {
    let functions = [Function::new("F1", &[0]), Function::new("F2", &[1])];
    let result = minimize_multiple_functions(&functions, &[2, 3], 2).unwrap();
    for entry in result.registry.entries() {
        assert!(!entry.minterms().is_empty());
        assert!(!entry.used_by().is_empty());
        assert_eq!(entry.cost(), entry.pattern().cost());
    }
}

fn depth_first(functions: &[Function], num_vars: usize) -> MultiFunctionResult {
    let config = MinimizerConfig::new().with_joint_exhaustive_limit(0);
    Minimizer::with_trace(config, NoTrace)
        .minimize_multiple_functions(functions, &[], num_vars)
        .unwrap()
}

#[test]
fn test_depth_first_matches_exhaustive() {
    let functions = [Function::new("F1", &[0, 1]), Function::new("F2", &[1, 3])];
    let exhaustive = minimize_multiple_functions(&functions, &[], 2).unwrap();
    let bounded = depth_first(&functions, 2);

    assert_eq!(bounded.shared_cost, exhaustive.shared_cost);
    assert_eq!(bounded.expressions(), exhaustive.expressions());
}

#[test]
fn test_depth_first_keeps_redundant_pattern_that_lowers_shared_cost() {
    // F1 = m(4,5,6) needs 10- and 1-0, which also cover part of F2.
    // Adding 1-- lets F2 drop both of them: F2 = BC + A.
    let functions = [
        Function::new("F1", &[4, 5, 6]),
        Function::new("F2", &[3, 4, 5, 6, 7]),
    ];
    let config = MinimizerConfig::new().with_joint_exhaustive_limit(30);
    let exhaustive = Minimizer::with_trace(config, NoTrace)
        .minimize_multiple_functions(&functions, &[], 3)
        .unwrap();
    let bounded = depth_first(&functions, 3);

    assert_eq!(exhaustive.shared_cost, 10);
    assert_eq!(bounded.shared_cost, 10);
    assert_eq!(bounded.expression("F2").as_deref(), Some("BC + A"));
    assert_eq!(bounded.expressions(), exhaustive.expressions());
    assert_eq!(
        bounded.primary().map(|j| j.selection.len()),
        exhaustive.primary().map(|j| j.selection.len())
    );
}

#[test]
fn test_seed_selection_is_served_from_cache() {
    let functions = [
        Function::new("F1", &[4, 5, 6]),
        Function::new("F2", &[3, 4, 5, 6, 7]),
    ];
    let config = MinimizerConfig::new().with_joint_exhaustive_limit(0);
    let mut minimizer = Minimizer::with_trace(config, Recorder::new());
    minimizer
        .minimize_multiple_functions(&functions, &[], 3)
        .unwrap();

    assert!(minimizer.trace().events().iter().any(|e| matches!(
        e,
        TraceEvent::JointSearchFinished { stage3_cost: 10, cache_hits, .. } if *cache_hits > 0
    )));
}

#[test]
fn test_depth_first_covers_every_function() {
    let functions = [
        Function::new("F1", &[0, 1, 3]),
        Function::new("F2", &[1, 3, 7]),
        Function::new("F3", &[3, 7]),
    ];
    let result = depth_first(&functions, 3);

    assert!(!result.joint_solutions.is_empty());
    for function in &functions {
        let solution = &result.per_function[&function.name];
        assert!(
            function.minterms.iter().all(|&m| solution.covers(m)),
            "{}",
            function.name
        );
    }
    assert!(result.shared_cost <= result.total_individual_cost);
}

#[test]
fn test_joint_solutions_are_distinct_and_tied() {
    let functions = [
        Function::new("F1", &[0, 1, 2, 5, 6, 7]),
        Function::new("F2", &[0, 1, 2, 5, 6, 7]),
    ];
    let result = minimize_multiple_functions(&functions, &[], 3).unwrap();

    let mut seen = BTreeSet::new();
    for solution in &result.joint_solutions {
        assert_eq!(solution.stage3_cost, result.shared_cost);
        assert!(seen.insert(solution.patterns.clone()));
        for (name, per_function) in &solution.per_function {
            let targets = &functions.iter().find(|f| &f.name == name).unwrap().minterms;
            assert!(targets.iter().all(|&m| per_function.covers(m)));
        }
    }
    // Each cyclic cover costs 9; sharing all three terms adds one per term
    assert_eq!(result.shared_cost, 12);
    assert_eq!(result.total_individual_cost, 18);
    assert_eq!(result.savings, 6);
}

#[test]
fn test_all_functions_empty() {
    let functions = [Function::new("F1", &[]), Function::new("F2", &[9])];
    let result = minimize_multiple_functions(&functions, &[], 3).unwrap();

    assert!(result.joint_solutions.is_empty());
    assert!(result.registry.is_empty());
    assert_eq!(result.expressions(), ["F1 = 0", "F2 = 0"]);
    assert_eq!(result.savings, 0);
    assert_eq!(result.diagnostics.len(), 3);
}

#[test]
fn test_trace_reports_registry_and_cache() {
    let functions = [Function::new("F1", &[0, 1]), Function::new("F2", &[0, 1])];
    let mut minimizer = Minimizer::with_trace(MinimizerConfig::default(), Recorder::new());
    minimizer
        .minimize_multiple_functions(&functions, &[], 2)
        .unwrap();

    let events = minimizer.trace().events();
    assert!(events.iter().any(|e| matches!(
        e,
        TraceEvent::RegistryBuilt { patterns: 3, shared } if shared.len() == 3
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        TraceEvent::JointSearchFinished { stage3_cost: 2, cache_misses, .. } if *cache_misses > 0
    )));
}

#[test]
fn test_display_lists_functions_and_costs() {
    let functions = [Function::new("F1", &[3]), Function::new("F2", &[3])];
    let result = minimize_multiple_functions(&functions, &[], 2).unwrap();
    assert_eq!(
        result.to_string(),
        "F1 = AB\nF2 = AB\ncost 4 (individual 6, saved 2)"
    );
}
