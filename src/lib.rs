//! # Patrick Logic Minimizer
//!
//! Exact two-level minimization of Boolean functions given as minterm lists.
//!
//! ## Overview
//!
//! The crate implements the classic textbook pipeline:
//!
//! 1. **Quine–McCluskey** generates the prime implicants of a function
//! 2. **Essential extraction** keeps every implicant that is the only cover of
//!    some minterm
//! 3. **Patrick's method** finds *every* minimum-cost selection of the remaining
//!    implicants
//!
//! For several functions over the same variables it additionally searches for
//! product terms that can be shared, scoring candidates with a three-stage
//! cost model (see [`shared`]).
//!
//! A product term with `k` literals costs `k + 1` (one gate plus its inputs);
//! single literals and the constant `1` cost 1.
//!
//! ## Single Function
//!
//! ```
//! use patrick_logic::minimize_single_function;
//!
//! # fn main() -> Result<(), patrick_logic::MinimizeError> {
//! // f(A, B, C) = Σm(1, 3, 5, 7)
//! let result = minimize_single_function(&[1, 3, 5, 7], &[], 3)?;
//! assert_eq!(result.expression(), "C");
//! assert_eq!(result.cost(), 1);
//!
//! // Don't-cares may be used to grow terms but never have to be covered
//! let result = minimize_single_function(&[1, 3], &[5, 7], 3)?;
//! assert_eq!(result.expression(), "C");
//! # Ok(())
//! # }
//! ```
//!
//! Every tied minimum is reported:
//!
//! ```
//! use patrick_logic::minimize_single_function;
//!
//! # fn main() -> Result<(), patrick_logic::MinimizeError> {
//! let result = minimize_single_function(&[0, 1, 2, 5, 6, 7], &[], 3)?;
//! assert_eq!(result.solutions.len(), 2);
//! for expression in result.expressions() {
//!     println!("F = {}", expression);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Multiple Functions
//!
//! ```
//! use patrick_logic::{minimize_multiple_functions, Function};
//!
//! # fn main() -> Result<(), patrick_logic::MinimizeError> {
//! let functions = [Function::new("F1", &[3]), Function::new("F2", &[3])];
//! let result = minimize_multiple_functions(&functions, &[], 2)?;
//!
//! assert_eq!(result.expressions(), ["F1 = AB", "F2 = AB"]);
//! // AB costs 3 on its own; the second use only adds one gate input
//! assert_eq!(result.shared_cost, 4);
//! assert_eq!(result.total_individual_cost, 6);
//! assert_eq!(result.savings, 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration and Tracing
//!
//! [`Minimizer`] takes a [`MinimizerConfig`] and a [`Trace`] sink. The free
//! functions use the defaults and forward progress to the [`log`] facade
//! through [`LogTrace`]; pass [`Recorder`] to keep every step for display.
//!
//! ## Thread Safety
//!
//! Every call is synchronous and owns all of its state, so independent
//! minimizations can run on as many threads as needed.

pub(crate) mod bitset;
mod config;
pub mod cover;
pub mod error;
pub mod expression;
pub mod minimize;
pub mod pattern;
pub mod primes;
pub mod shared;
pub mod trace;

// Re-export high-level public API
pub use config::MinimizerConfig;
pub use cover::{find_minimal_covers, CoverSearch, CoverStrategy, CoverageTable, EssentialAnalysis};
pub use error::{Diagnostic, MinimizeError};
pub use expression::Variables;
pub use minimize::{
    minimize_multiple_functions, minimize_single_function, Minimizer, SingleFunctionResult,
    Solution,
};
pub use pattern::{ParsePatternError, Pattern};
pub use primes::{generate_prime_implicants, GenerationMode, Implicant};
pub use shared::{
    Function, JointSolution, MultiFunctionResult, Registry, RegistryEntry, SharedPattern,
};
pub use trace::{LogTrace, NoTrace, Recorder, Trace, TraceEvent};

/// Largest supported number of variables (minterms are `u32`)
pub const MAX_VARIABLES: usize = 32;
