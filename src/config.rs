use crate::cover::MAX_EXHAUSTIVE_LIMIT;
use crate::expression::Variables;

/// Configuration for a [`Minimizer`](crate::Minimizer)
///
/// The two limits decide when a cover search switches from enumerating every
/// subset to depth-first branch-and-bound. Subset enumeration visits `2^k - 1`
/// selections, so values much above the default get slow quickly.
///
/// # Examples
///
/// ```
/// use patrick_logic::MinimizerConfig;
///
/// let config = MinimizerConfig::new()
///     .with_exhaustive_limit(12)
///     .with_variables(&["x", "y", "z"]);
/// assert_eq!(config.exhaustive_limit, 12);
/// assert_eq!(config.joint_exhaustive_limit, 20);
///
/// // Limits are clamped so the subset mask fits in 32 bits
/// let config = MinimizerConfig::new().with_joint_exhaustive_limit(64);
/// assert_eq!(config.joint_exhaustive_limit, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimizerConfig {
    /// Largest number of non-essential candidates searched by subset
    /// enumeration in the single-function solver
    ///
    /// **Default:** `20`
    pub exhaustive_limit: usize,

    /// Largest registry size searched by subset enumeration in the joint
    /// multi-function solver
    ///
    /// **Default:** `20`
    pub joint_exhaustive_limit: usize,

    /// Variable names used when rendering expressions
    ///
    /// **Default:** `None` (`A`, `B`, `C`, ...)
    pub variables: Option<Variables>,
}

impl Default for MinimizerConfig {
    fn default() -> Self {
        MinimizerConfig {
            exhaustive_limit: 20,
            joint_exhaustive_limit: 20,
            variables: None,
        }
    }
}

impl MinimizerConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the single-function subset enumeration limit (at most 30)
    pub fn with_exhaustive_limit(mut self, limit: usize) -> Self {
        self.exhaustive_limit = limit.min(MAX_EXHAUSTIVE_LIMIT);
        self
    }

    /// Set the joint subset enumeration limit (at most 30)
    pub fn with_joint_exhaustive_limit(mut self, limit: usize) -> Self {
        self.joint_exhaustive_limit = limit.min(MAX_EXHAUSTIVE_LIMIT);
        self
    }

    /// Set the variable names used for rendering
    pub fn with_variables<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.variables = Some(Variables::new(names));
        self
    }

    pub(crate) fn variables_for(&self, num_vars: usize) -> Variables {
        self.variables
            .clone()
            .unwrap_or_else(|| Variables::default_for(num_vars))
    }
}
