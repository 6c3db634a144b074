//! Coverage analysis and minimal-cover search (Patrick's method)
//!
//! This module answers the covering half of two-level minimization:
//!
//! - [`CoverageTable`]: which implicants cover each target minterm
//! - [`EssentialAnalysis`]: implicants that are the only cover of some minterm
//! - [`find_minimal_covers`]: every minimum-cost selection of the remaining
//!   candidates that covers the minterms the essentials left open
//!
//! The search picks one of two strategies by candidate count (see
//! [`CoverStrategy`]); both return *all* covers tied at the minimum.

mod branch_bound;
mod essential;
mod exhaustive;
mod table;

pub use essential::EssentialAnalysis;
pub use table::CoverageTable;

use crate::bitset::BitSet;
use crate::error::MinimizeError;
use crate::primes::Implicant;

/// How a cover search enumerates candidate subsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoverStrategy {
    /// Enumerate every non-empty subset
    Exhaustive,
    /// Index-ordered depth-first search with cost bounds
    BranchAndBound,
}

/// Largest candidate count subset enumeration accepts (the mask is a `u32`)
pub const MAX_EXHAUSTIVE_LIMIT: usize = 30;

impl CoverStrategy {
    /// Pick the strategy for `candidates` items under the given subset limit
    ///
    /// Limits above [`MAX_EXHAUSTIVE_LIMIT`] are clamped to it.
    pub fn select(candidates: usize, exhaustive_limit: usize) -> Self {
        if candidates <= exhaustive_limit.min(MAX_EXHAUSTIVE_LIMIT) {
            CoverStrategy::Exhaustive
        } else {
            CoverStrategy::BranchAndBound
        }
    }
}

/// Result of a minimal-cover search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverSearch {
    /// Strategy that produced the covers
    pub strategy: CoverStrategy,
    /// Every minimal cover, as ascending indices into the candidate slice
    pub covers: Vec<Vec<usize>>,
    /// Total cost shared by every cover
    pub cost: u32,
}

/// Dense bit-level view of a covering problem shared by both strategies
pub(crate) struct Problem<'a> {
    pub(crate) candidates: &'a [Implicant],
    pub(crate) coverage: Vec<BitSet>,
    pub(crate) target: BitSet,
}

impl<'a> Problem<'a> {
    fn new(remaining: &[u32], candidates: &'a [Implicant]) -> Self {
        let coverage = candidates
            .iter()
            .map(|pi| {
                let mut bits = BitSet::new(remaining.len());
                for (slot, &m) in remaining.iter().enumerate() {
                    if pi.covers(m) {
                        bits.insert(slot);
                    }
                }
                bits
            })
            .collect();
        Problem {
            candidates,
            coverage,
            target: BitSet::full(remaining.len()),
        }
    }

    fn is_coverable(&self) -> bool {
        let mut all = BitSet::new(self.target_len());
        for bits in &self.coverage {
            all.union_with(bits);
        }
        all.is_superset(&self.target)
    }

    fn target_len(&self) -> usize {
        self.target.len()
    }
}

/// Find every minimum-cost subset of `candidates` covering `remaining`
///
/// Up to `exhaustive_limit` candidates every subset is enumerated and covers
/// are ranked by cost first and implicant count second. Above the limit a
/// two-phase branch-and-bound search first finds the minimum cost and then
/// collects every cover of exactly that cost.
///
/// An empty `remaining` set yields a single empty cover of cost 0.
///
/// # Errors
///
/// Returns [`MinimizeError::NoValidCover`] when the candidates together do not
/// cover `remaining`.
///
/// # Examples
///
/// ```
/// use patrick_logic::{find_minimal_covers, generate_prime_implicants, GenerationMode};
///
/// # fn main() -> Result<(), patrick_logic::MinimizeError> {
/// // The cyclic function m(0,1,2,5,6,7) has no essential implicants
/// // and two minimal covers of three terms each.
/// let minterms = [0, 1, 2, 5, 6, 7];
/// let primes = generate_prime_implicants(&minterms, &[], 3, GenerationMode::TruePrimes);
/// let search = find_minimal_covers(&minterms, &primes, 20)?;
/// assert_eq!(search.covers.len(), 2);
/// assert_eq!(search.cost, 9);
/// # Ok(())
/// # }
/// ```
pub fn find_minimal_covers(
    remaining: &[u32],
    candidates: &[Implicant],
    exhaustive_limit: usize,
) -> Result<CoverSearch, MinimizeError> {
    let strategy = CoverStrategy::select(candidates.len(), exhaustive_limit);
    if remaining.is_empty() {
        return Ok(CoverSearch {
            strategy,
            covers: vec![Vec::new()],
            cost: 0,
        });
    }

    let problem = Problem::new(remaining, candidates);
    if !problem.is_coverable() {
        return Err(MinimizeError::NoValidCover {
            remaining: remaining.to_vec(),
        });
    }

    let (covers, cost) = match strategy {
        CoverStrategy::Exhaustive => exhaustive::search(&problem),
        CoverStrategy::BranchAndBound => branch_bound::search(&problem),
    };

    if covers.is_empty() {
        return Err(MinimizeError::NoValidCover {
            remaining: remaining.to_vec(),
        });
    }

    Ok(CoverSearch {
        strategy,
        covers,
        cost,
    })
}
