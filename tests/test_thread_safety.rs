//! Tests for running minimizations on several threads
//!
//! Every call owns its state, so concurrent minimizations need no
//! synchronization and must agree with a sequential run.

use patrick_logic::{minimize_multiple_functions, minimize_single_function, Function};
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_single_function() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            thread::spawn(|| {
                let result = minimize_single_function(&[0, 1, 2, 5, 6, 7], &[], 3)
                    .expect("Minimization failed");
                let mut expressions = result.expressions();
                expressions.sort();
                expressions
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("Thread panicked"))
        .collect();

    assert_eq!(results.len(), 4);
    for expressions in &results {
        assert_eq!(expressions, &results[0]);
        assert_eq!(expressions.len(), 2);
    }
}

#[test]
fn test_shared_inputs_across_threads() {
    let functions: Arc<[Function]> = Arc::from(vec![
        Function::new("F1", &[1, 3, 5]),
        Function::new("F2", &[3, 5, 7]),
    ]);
    let sequential = minimize_multiple_functions(&functions, &[], 3).expect("Minimization failed");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let functions = Arc::clone(&functions);
            thread::spawn(move || {
                minimize_multiple_functions(&functions, &[], 3).expect("Minimization failed")
            })
        })
        .collect();

    for handle in handles {
        let result = handle.join().expect("Thread panicked");
        assert_eq!(result.shared_cost, sequential.shared_cost);
        assert_eq!(result.expressions(), sequential.expressions());
    }
}

#[test]
fn test_results_move_between_threads() {
    let result = minimize_single_function(&[3], &[], 2).expect("Minimization failed");
    let expression = thread::spawn(move || result.expression())
        .join()
        .expect("Thread panicked");
    assert_eq!(expression, "AB");
}
