//! Single- and multi-function minimization entry points
//!
//! [`Minimizer`] runs the complete pipeline with an explicit
//! [`MinimizerConfig`] and a caller-supplied [`Trace`] sink. The free functions
//! [`minimize_single_function`] and [`minimize_multiple_functions`] use the
//! default configuration and log through [`LogTrace`].

use crate::config::MinimizerConfig;
use crate::cover::{find_minimal_covers, CoverStrategy, CoverageTable, EssentialAnalysis};
use crate::error::{Diagnostic, MinimizeError};
use crate::expression::Variables;
use crate::primes::{generate_prime_implicants, in_range, GenerationMode, Implicant};
use crate::shared::{
    build_registry, solve_jointly, Function, JointSolution, MultiFunctionResult, Registry,
    SharedPattern, Target,
};
use crate::trace::{LogTrace, Trace, TraceEvent};
use crate::MAX_VARIABLES;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

/// A sum of products covering every target of one function
///
/// All solutions reported for one function share the same cost.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Solution {
    implicants: Vec<Implicant>,
    cost: u32,
}

impl Solution {
    /// Create a solution; the cost is the sum of the member costs
    pub fn new(implicants: Vec<Implicant>) -> Self {
        let cost = implicants.iter().map(Implicant::cost).sum();
        Solution { implicants, cost }
    }

    /// Product terms in selection order (essentials first)
    pub fn implicants(&self) -> &[Implicant] {
        &self.implicants
    }

    /// Total cost of the product terms
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Number of product terms
    pub fn len(&self) -> usize {
        self.implicants.len()
    }

    /// True for the constant-0 solution
    pub fn is_empty(&self) -> bool {
        self.implicants.is_empty()
    }

    /// Check whether some term covers the target minterm `m`
    pub fn covers(&self, m: u32) -> bool {
        self.implicants.iter().any(|pi| pi.covers(m))
    }

    /// Render as `"AB' + C"`; an empty solution renders as `"0"`
    ///
    /// # Examples
    ///
    /// ```
    /// use patrick_logic::{minimize_single_function, Variables};
    ///
    /// # fn main() -> Result<(), patrick_logic::MinimizeError> {
    /// let result = minimize_single_function(&[1, 3, 5, 7], &[], 3)?;
    /// assert_eq!(result.solutions[0].expression(&Variables::default_for(3)), "C");
    /// assert_eq!(result.solutions[0].expression(&Variables::new(&["x", "y", "z"])), "z");
    /// # Ok(())
    /// # }
    /// ```
    pub fn expression(&self, variables: &Variables) -> String {
        if self.implicants.is_empty() {
            return "0".to_string();
        }
        self.implicants
            .iter()
            .map(|pi| pi.to_algebraic(variables))
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression(&Variables::default()))
    }
}

/// Result of minimizing one function
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingleFunctionResult {
    /// Number of input variables
    pub num_vars: usize,
    /// Names used to render expressions
    pub variables: Variables,
    /// Normalized target minterms
    pub minterms: Vec<u32>,
    /// Normalized don't-cares
    pub dont_cares: Vec<u32>,
    /// Every prime implicant, sorted by level then pattern
    pub prime_implicants: Vec<Implicant>,
    /// Essential prime implicants, in discovery order
    pub essentials: Vec<Implicant>,
    /// Targets the essentials leave uncovered
    pub remaining: Vec<u32>,
    /// Strategy used for the remaining targets
    pub strategy: CoverStrategy,
    /// Every minimum-cost solution
    pub solutions: Vec<Solution>,
    /// Recoverable input problems
    pub diagnostics: Vec<Diagnostic>,
}

impl SingleFunctionResult {
    /// The first minimal solution
    pub fn best(&self) -> Option<&Solution> {
        self.solutions.first()
    }

    /// Cost shared by every solution
    pub fn cost(&self) -> u32 {
        self.best().map_or(0, Solution::cost)
    }

    /// Rendered expression of the first solution
    pub fn expression(&self) -> String {
        self.best()
            .map_or_else(|| "0".to_string(), |s| s.expression(&self.variables))
    }

    /// Rendered expressions of every solution
    pub fn expressions(&self) -> Vec<String> {
        self.solutions
            .iter()
            .map(|s| s.expression(&self.variables))
            .collect()
    }
}

impl fmt::Display for SingleFunctionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (cost {})", self.expression(), self.cost())
    }
}

/// Runs minimizations with a fixed configuration and trace sink
///
/// # Examples
///
/// ```
/// use patrick_logic::{Function, Minimizer, MinimizerConfig, NoTrace};
///
/// # fn main() -> Result<(), patrick_logic::MinimizeError> {
/// let mut minimizer = Minimizer::with_trace(MinimizerConfig::default(), NoTrace);
/// let result = minimizer.minimize_multiple_functions(
///     &[Function::new("F1", &[0, 1]), Function::new("F2", &[0, 1])],
///     &[],
///     2,
/// )?;
/// assert_eq!(result.expressions(), ["F1 = A'", "F2 = A'"]);
/// assert_eq!(result.shared_cost, 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Minimizer<T: Trace = LogTrace> {
    config: MinimizerConfig,
    trace: T,
}

impl Minimizer<LogTrace> {
    /// Create a minimizer that logs through the `log` facade
    pub fn new(config: MinimizerConfig) -> Self {
        Minimizer {
            config,
            trace: LogTrace,
        }
    }
}

impl Default for Minimizer<LogTrace> {
    fn default() -> Self {
        Self::new(MinimizerConfig::default())
    }
}

impl<T: Trace> Minimizer<T> {
    /// Create a minimizer reporting to `trace`
    pub fn with_trace(config: MinimizerConfig, trace: T) -> Self {
        Minimizer { config, trace }
    }

    /// The configuration in use
    pub fn config(&self) -> &MinimizerConfig {
        &self.config
    }

    /// The trace sink
    pub fn trace(&self) -> &T {
        &self.trace
    }

    /// Mutable access to the trace sink
    pub fn trace_mut(&mut self) -> &mut T {
        &mut self.trace
    }

    /// Consume the minimizer and return its trace sink
    pub fn into_trace(self) -> T {
        self.trace
    }

    /// Minimize one function given by target minterms and don't-cares
    ///
    /// Values that do not fit in `num_vars` bits are dropped and reported as
    /// [`Diagnostic::InvalidInput`]; duplicates are ignored.
    ///
    /// # Errors
    ///
    /// [`MinimizeError::TooManyVariables`] when `num_vars` exceeds
    /// [`MAX_VARIABLES`].
    pub fn minimize_single_function(
        &mut self,
        targets: &[u32],
        dont_cares: &[u32],
        num_vars: usize,
    ) -> Result<SingleFunctionResult, MinimizeError> {
        check_num_vars(num_vars)?;
        let mut diagnostics = Vec::new();
        let targets = self.normalize(targets, num_vars, None, &mut diagnostics);
        let dont_cares = self.normalize(dont_cares, num_vars, None, &mut diagnostics);
        self.trace.event(&TraceEvent::InputNormalized {
            function: None,
            minterms: targets.len(),
            dont_cares: dont_cares.len(),
        });
        self.solve_single(None, targets, dont_cares, num_vars, diagnostics)
    }

    /// Minimize several functions over the same variables, sharing product
    /// terms between them
    ///
    /// `dont_cares` apply to every function. A function without targets is
    /// reported as [`Diagnostic::EmptyFunctionSet`] and gets the constant-0
    /// solution. With a single remaining function the single-function pipeline
    /// is used and nothing is shared.
    ///
    /// # Errors
    ///
    /// [`MinimizeError::TooManyVariables`] when `num_vars` exceeds
    /// [`MAX_VARIABLES`], [`MinimizeError::DuplicateFunction`] when two
    /// functions share a name.
    pub fn minimize_multiple_functions(
        &mut self,
        functions: &[Function],
        dont_cares: &[u32],
        num_vars: usize,
    ) -> Result<MultiFunctionResult, MinimizeError> {
        check_num_vars(num_vars)?;
        let mut names = HashSet::new();
        for function in functions {
            if !names.insert(Arc::clone(&function.name)) {
                return Err(MinimizeError::DuplicateFunction {
                    name: Arc::clone(&function.name),
                });
            }
        }

        let mut diagnostics = Vec::new();
        let dont_cares = self.normalize(dont_cares, num_vars, None, &mut diagnostics);
        let mut per_function = BTreeMap::new();
        let mut active = Vec::with_capacity(functions.len());
        for function in functions {
            let minterms = self.normalize(
                &function.minterms,
                num_vars,
                Some(&function.name),
                &mut diagnostics,
            );
            self.trace.event(&TraceEvent::InputNormalized {
                function: Some(Arc::clone(&function.name)),
                minterms: minterms.len(),
                dont_cares: dont_cares.len(),
            });
            if minterms.is_empty() {
                self.report(
                    Diagnostic::EmptyFunctionSet {
                        function: Arc::clone(&function.name),
                    },
                    &mut diagnostics,
                );
                per_function.insert(Arc::clone(&function.name), Solution::default());
            } else {
                active.push(Target {
                    name: Arc::clone(&function.name),
                    minterms,
                });
            }
        }

        let (registry, joint_solutions) = match active.as_slice() {
            [] => (Registry::new(), Vec::new()),
            [only] => self.solve_alone(only, dont_cares, num_vars, &mut diagnostics)?,
            _ => {
                let registry = build_registry(&active, &dont_cares, num_vars, &mut self.trace);
                let solutions = solve_jointly(
                    &registry,
                    &active,
                    self.config.joint_exhaustive_limit,
                    &mut self.trace,
                )?;
                (registry, solutions)
            }
        };

        let (total_individual_cost, shared_cost) = match joint_solutions.first() {
            Some(primary) => {
                per_function.extend(
                    primary
                        .per_function
                        .iter()
                        .map(|(name, solution)| (Arc::clone(name), solution.clone())),
                );
                (primary.individual_cost(), primary.stage3_cost)
            }
            None => (0, 0),
        };

        let shared_patterns = registry
            .shared()
            .map(|entry| SharedPattern {
                pattern: entry.pattern().clone(),
                used_by: entry.used_by().to_vec(),
                cost: entry.cost(),
            })
            .collect();

        Ok(MultiFunctionResult {
            num_vars,
            variables: self.config.variables_for(num_vars),
            per_function,
            shared_patterns,
            total_individual_cost,
            shared_cost,
            savings: total_individual_cost.saturating_sub(shared_cost),
            joint_solutions,
            registry,
            diagnostics,
        })
    }

    /// Quine–McCluskey, essentials, then Patrick's method on the rest
    fn solve_single(
        &mut self,
        function: Option<Arc<str>>,
        targets: Vec<u32>,
        dont_cares: Vec<u32>,
        num_vars: usize,
        diagnostics: Vec<Diagnostic>,
    ) -> Result<SingleFunctionResult, MinimizeError> {
        let primes =
            generate_prime_implicants(&targets, &dont_cares, num_vars, GenerationMode::TruePrimes);
        self.trace.event(&TraceEvent::PrimesGenerated {
            function,
            mode: GenerationMode::TruePrimes,
            patterns: primes.iter().map(|pi| pi.pattern().clone()).collect(),
        });

        let table = CoverageTable::build(&targets, &primes);
        let analysis = EssentialAnalysis::analyze(&table, &primes);
        let essentials: Vec<Implicant> = analysis
            .essentials
            .iter()
            .map(|&i| primes[i].clone())
            .collect();
        self.trace.event(&TraceEvent::EssentialsFound {
            essentials: essentials.iter().map(|pi| pi.pattern().clone()).collect(),
            covered: analysis.covered.clone(),
            remaining: analysis.remaining.clone(),
        });

        let candidates: Vec<Implicant> = analysis
            .candidates(primes.len())
            .into_iter()
            .map(|i| primes[i].clone())
            .collect();
        self.trace.event(&TraceEvent::CoverSearchStarted {
            strategy: CoverStrategy::select(candidates.len(), self.config.exhaustive_limit),
            candidates: candidates.len(),
        });
        let search =
            find_minimal_covers(&analysis.remaining, &candidates, self.config.exhaustive_limit)?;
        self.trace.event(&TraceEvent::CoverSearchFinished {
            strategy: search.strategy,
            solutions: search.covers.len(),
            cost: search.cost,
        });

        let solutions = search
            .covers
            .iter()
            .map(|cover| {
                let mut implicants = essentials.clone();
                implicants.extend(cover.iter().map(|&i| candidates[i].clone()));
                Solution::new(implicants)
            })
            .collect();

        Ok(SingleFunctionResult {
            num_vars,
            variables: self.config.variables_for(num_vars),
            minterms: targets,
            dont_cares,
            prime_implicants: primes,
            essentials,
            remaining: analysis.remaining,
            strategy: search.strategy,
            solutions,
            diagnostics,
        })
    }

    /// Multi-function request with one non-empty function
    fn solve_alone(
        &mut self,
        function: &Target,
        dont_cares: Vec<u32>,
        num_vars: usize,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(Registry, Vec<JointSolution>), MinimizeError> {
        let single = self.solve_single(
            Some(Arc::clone(&function.name)),
            function.minterms.clone(),
            dont_cares,
            num_vars,
            Vec::new(),
        )?;
        diagnostics.extend(single.diagnostics);

        let mut registry = Registry::new();
        for pi in &single.prime_implicants {
            registry.register(&function.name, pi);
        }

        let mut seen = BTreeSet::new();
        let mut joint = Vec::with_capacity(single.solutions.len());
        for solution in single.solutions {
            let selection: Vec<_> = solution
                .implicants()
                .iter()
                .map(|pi| pi.pattern().clone())
                .collect();
            let mut patterns = selection.clone();
            patterns.sort();
            if !seen.insert(patterns.clone()) {
                continue;
            }
            joint.push(JointSolution {
                selection,
                patterns,
                stage1_cost: solution.cost(),
                stage3_cost: solution.cost(),
                per_function: BTreeMap::from([(Arc::clone(&function.name), solution)]),
            });
        }
        Ok((registry, joint))
    }

    /// Sort, deduplicate and range-check input values
    fn normalize(
        &mut self,
        values: &[u32],
        num_vars: usize,
        function: Option<&Arc<str>>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<u32> {
        let (kept, dropped): (BTreeSet<u32>, BTreeSet<u32>) =
            values.iter().partition(|&&m| in_range(m, num_vars));
        for value in dropped {
            self.report(
                Diagnostic::InvalidInput {
                    value,
                    num_vars,
                    function: function.cloned(),
                },
                diagnostics,
            );
        }
        kept.into_iter().collect()
    }

    fn report(&mut self, diagnostic: Diagnostic, diagnostics: &mut Vec<Diagnostic>) {
        self.trace.event(&TraceEvent::Diagnostic(diagnostic.clone()));
        diagnostics.push(diagnostic);
    }
}

fn check_num_vars(num_vars: usize) -> Result<(), MinimizeError> {
    if num_vars > MAX_VARIABLES {
        return Err(MinimizeError::TooManyVariables {
            requested: num_vars,
            max: MAX_VARIABLES,
        });
    }
    Ok(())
}

/// Minimize one function with the default configuration
///
/// # Examples
///
/// ```
/// use patrick_logic::minimize_single_function;
///
/// # fn main() -> Result<(), patrick_logic::MinimizeError> {
/// let result = minimize_single_function(&[0, 1, 2, 3], &[], 2)?;
/// assert_eq!(result.expression(), "1");
/// assert_eq!(result.cost(), 1);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// See [`Minimizer::minimize_single_function`].
pub fn minimize_single_function(
    targets: &[u32],
    dont_cares: &[u32],
    num_vars: usize,
) -> Result<SingleFunctionResult, MinimizeError> {
    Minimizer::default().minimize_single_function(targets, dont_cares, num_vars)
}

/// Minimize several functions jointly with the default configuration
///
/// # Errors
///
/// See [`Minimizer::minimize_multiple_functions`].
pub fn minimize_multiple_functions(
    functions: &[Function],
    dont_cares: &[u32],
    num_vars: usize,
) -> Result<MultiFunctionResult, MinimizeError> {
    Minimizer::default().minimize_multiple_functions(functions, dont_cares, num_vars)
}
