//! Multi-function minimization with shared product terms
//!
//! Several functions over the same variables can reuse one product term. Each
//! function generates its implicants in [`GenerationMode::AllLevels`] so that
//! smaller cubes stay available for matching, and every pattern is recorded in
//! a [`Registry`] together with the functions that produced it.
//!
//! Candidate selections of registry patterns are then scored in three stages:
//!
//! 1. **Stage 1**: sum of base costs, used only to prune the search
//! 2. **Stage 2**: per function, the selection is reduced to an irredundant
//!    cover of that function's targets
//! 3. **Stage 3**: a pattern used by `U` functions after Stage 2 costs
//!    `base + (U - 1)`; the total is the shared cost being minimized
//!
//! Stage-2 results are memoized per selection for the duration of one call;
//! hits and misses are reported through
//! [`TraceEvent::JointSearchFinished`](crate::TraceEvent::JointSearchFinished).

mod cache;
mod joint;
mod reduce;
mod registry;

pub use registry::{Registry, RegistryEntry};

use cache::Stage2Cache;
use crate::cover::CoverStrategy;
use crate::error::{Diagnostic, MinimizeError};
use crate::expression::Variables;
use crate::minimize::Solution;
use crate::pattern::Pattern;
use crate::primes::{generate_prime_implicants, GenerationMode, Implicant};
use crate::trace::{Trace, TraceEvent};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// A named boolean function given by its target minterms
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Function {
    /// Function name, unique within one request
    pub name: Arc<str>,
    /// Minterms the function must cover
    pub minterms: Vec<u32>,
}

impl Function {
    /// Create a function from a name and its target minterms
    ///
    /// # Examples
    ///
    /// ```
    /// use patrick_logic::Function;
    ///
    /// let f = Function::new("F1", &[1, 3, 5]);
    /// assert_eq!(f.name.as_ref(), "F1");
    /// ```
    pub fn new(name: impl Into<Arc<str>>, minterms: &[u32]) -> Self {
        Function {
            name: name.into(),
            minterms: minterms.to_vec(),
        }
    }
}

/// A function after input normalization: sorted, distinct, in-range targets
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Target {
    pub(crate) name: Arc<str>,
    pub(crate) minterms: Vec<u32>,
}

/// A registry pattern generated by more than one function
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharedPattern {
    /// The shared cube
    pub pattern: Pattern,
    /// Functions that generated it
    pub used_by: Vec<Arc<str>>,
    /// Base cost of the product term
    pub cost: u32,
}

/// One optimal way to cover every function at once
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JointSolution {
    /// Registry patterns chosen by the search, in registry order
    pub selection: Vec<Pattern>,
    /// Patterns actually used after Stage 2, sorted
    pub patterns: Vec<Pattern>,
    /// Stage-2 term list of every function
    pub per_function: BTreeMap<Arc<str>, Solution>,
    /// Sum of base costs of `selection`
    pub stage1_cost: u32,
    /// Shared cost of `patterns`
    pub stage3_cost: u32,
}

impl JointSolution {
    /// Sum of per-function costs, each function paying full price for every
    /// term it uses
    pub fn individual_cost(&self) -> u32 {
        self.per_function.values().map(Solution::cost).sum()
    }

    /// Cost saved by sharing: individual cost minus Stage-3 cost
    pub fn savings(&self) -> u32 {
        self.individual_cost().saturating_sub(self.stage3_cost)
    }
}

/// Result of a multi-function minimization
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiFunctionResult {
    /// Number of input variables
    pub num_vars: usize,
    /// Names used to render expressions
    pub variables: Variables,
    /// Term list of every function, taken from the first joint solution
    pub per_function: BTreeMap<Arc<str>, Solution>,
    /// Registry patterns generated by more than one function
    pub shared_patterns: Vec<SharedPattern>,
    /// Cost of the primary solution without sharing
    pub total_individual_cost: u32,
    /// Stage-3 cost of the primary solution
    pub shared_cost: u32,
    /// `total_individual_cost - shared_cost`
    pub savings: u32,
    /// Every tied joint solution, deduplicated by Stage-2 pattern set
    pub joint_solutions: Vec<JointSolution>,
    /// Every pattern generated during the run
    pub registry: Registry,
    /// Recoverable input problems
    pub diagnostics: Vec<Diagnostic>,
}

impl MultiFunctionResult {
    /// The primary joint solution
    pub fn primary(&self) -> Option<&JointSolution> {
        self.joint_solutions.first()
    }

    /// Rendered expression of one function
    pub fn expression(&self, function: &str) -> Option<String> {
        self.per_function
            .get(function)
            .map(|solution| solution.expression(&self.variables))
    }

    /// Lines `"F = ..."` for every function, sorted by function name
    pub fn expressions(&self) -> Vec<String> {
        self.per_function
            .iter()
            .map(|(name, solution)| format!("{} = {}", name, solution.expression(&self.variables)))
            .collect()
    }
}

impl fmt::Display for MultiFunctionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.expressions() {
            writeln!(f, "{}", line)?;
        }
        write!(
            f,
            "cost {} (individual {}, saved {})",
            self.shared_cost, self.total_individual_cost, self.savings
        )
    }
}

/// Generate every function's implicants and register them
pub(crate) fn build_registry<T: Trace>(
    functions: &[Target],
    dont_cares: &[u32],
    num_vars: usize,
    trace: &mut T,
) -> Registry {
    let mut registry = Registry::new();
    for function in functions {
        let implicants = generate_prime_implicants(
            &function.minterms,
            dont_cares,
            num_vars,
            GenerationMode::AllLevels,
        );
        trace.event(&TraceEvent::PrimesGenerated {
            function: Some(Arc::clone(&function.name)),
            mode: GenerationMode::AllLevels,
            patterns: implicants.iter().map(|pi| pi.pattern().clone()).collect(),
        });
        for implicant in &implicants {
            registry.register(&function.name, implicant);
        }
    }

    trace.event(&TraceEvent::RegistryBuilt {
        patterns: registry.len(),
        shared: registry.shared().map(|e| e.pattern().clone()).collect(),
    });
    registry
}

/// Run the joint search and turn its tied selections into joint solutions
pub(crate) fn solve_jointly<T: Trace>(
    registry: &Registry,
    functions: &[Target],
    exhaustive_limit: usize,
    trace: &mut T,
) -> Result<Vec<JointSolution>, MinimizeError> {
    let obligations = functions.iter().map(|f| f.minterms.len()).sum();
    let strategy = CoverStrategy::select(registry.len(), exhaustive_limit);
    trace.event(&TraceEvent::JointSearchStarted {
        strategy,
        patterns: registry.len(),
        obligations,
    });

    let mut cache = Stage2Cache::new();
    let search = joint::search(registry, functions, strategy, &mut cache)?;
    trace.event(&TraceEvent::JointSearchFinished {
        solutions: search.selections.len(),
        stage3_cost: search.stage3_cost,
        cache_hits: cache.hits(),
        cache_misses: cache.misses(),
    });

    let mut seen: BTreeSet<Vec<usize>> = BTreeSet::new();
    let mut solutions = Vec::new();
    for selection in &search.selections {
        let evaluation = &selection.evaluation;
        if !seen.insert(evaluation.used.clone()) {
            continue;
        }

        let per_function = functions
            .iter()
            .zip(&evaluation.per_function)
            .map(|(function, terms)| {
                let implicants = terms
                    .iter()
                    .map(|&i| {
                        let entry = registry.entry(i);
                        Implicant::new(
                            entry.pattern().clone(),
                            entry.minterms_within(&function.minterms),
                        )
                    })
                    .collect();
                (Arc::clone(&function.name), Solution::new(implicants))
            })
            .collect();

        let mut patterns: Vec<Pattern> = evaluation
            .used
            .iter()
            .map(|&i| registry.entry(i).pattern().clone())
            .collect();
        patterns.sort();

        solutions.push(JointSolution {
            selection: selection
                .members
                .iter()
                .map(|&i| registry.entry(i).pattern().clone())
                .collect(),
            patterns,
            per_function,
            stage1_cost: selection.stage1_cost,
            stage3_cost: evaluation.stage3_cost,
        });
    }
    Ok(solutions)
}

#[cfg(test)]
mod tests;
