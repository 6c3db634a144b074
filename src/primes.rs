//! Quine–McCluskey implicant generation
//!
//! Terms start as the individual minterms and don't-cares (level 0). Each level
//! groups its terms by the number of `1` positions and tries to
//! [`combine`](Pattern::combine) every term of group `k` with every term of
//! group `k + 1`; successful merges form the next level. Two policies decide
//! which terms come out at the end, see [`GenerationMode`].

use crate::expression::Variables;
use crate::pattern::Pattern;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Which terms the generator emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationMode {
    /// Only terms that never merged at their level (the classic prime implicants)
    ///
    /// Used when a single function is minimized on its own.
    TruePrimes,
    /// Every term of every level, merged or not
    ///
    /// Used for multi-function runs: non-maximal terms stay available so that
    /// functions producing the same smaller cube can share it. The output is
    /// therefore not prime in the classical sense.
    AllLevels,
}

/// A generated product term together with the target minterms it covers
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Implicant {
    pub(crate) pattern: Pattern,
    pub(crate) minterms: Vec<u32>,
    pub(crate) cost: u32,
}

impl Implicant {
    /// Create an implicant; `minterms` is sorted and deduplicated
    pub fn new(pattern: Pattern, mut minterms: Vec<u32>) -> Self {
        minterms.sort_unstable();
        minterms.dedup();
        let cost = pattern.cost();
        Implicant {
            pattern,
            minterms,
            cost,
        }
    }

    /// The cube of this implicant
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Covered target minterms, ascending (don't-cares are not listed)
    pub fn minterms(&self) -> &[u32] {
        &self.minterms
    }

    /// Cost of the product term, see [`Pattern::cost`]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Check whether this implicant covers the target minterm `m`
    pub fn covers(&self, m: u32) -> bool {
        self.minterms.binary_search(&m).is_ok()
    }

    /// Render the product term with the given variable names
    pub fn to_algebraic(&self, variables: &Variables) -> String {
        self.pattern.to_algebraic(variables)
    }
}

#[derive(Clone, Debug)]
struct Term {
    pattern: Pattern,
    covered: BTreeSet<u32>,
}

pub(crate) fn in_range(m: u32, num_vars: usize) -> bool {
    num_vars >= 32 || u64::from(m) < (1u64 << num_vars)
}

/// Generate implicants for one function
///
/// `targets` are the minterms the function must cover and `dont_cares` may be
/// used to grow cubes. Values that do not fit in `num_vars` bits are ignored;
/// duplicates are harmless. Every returned implicant covers at least one
/// target, and together they cover every target. The output is sorted by level
/// (number of `-` positions) and then by pattern.
///
/// # Examples
///
/// ```
/// use patrick_logic::{generate_prime_implicants, GenerationMode};
///
/// let primes = generate_prime_implicants(&[0, 1, 2, 5, 6, 7], &[], 3, GenerationMode::TruePrimes);
/// let patterns: Vec<String> = primes.iter().map(|pi| pi.pattern().to_string()).collect();
/// assert_eq!(patterns, ["-01", "-10", "0-0", "00-", "1-1", "11-"]);
/// ```
pub fn generate_prime_implicants(
    targets: &[u32],
    dont_cares: &[u32],
    num_vars: usize,
    mode: GenerationMode,
) -> Vec<Implicant> {
    let target_set: BTreeSet<u32> = targets
        .iter()
        .copied()
        .filter(|&m| in_range(m, num_vars))
        .collect();
    let seeds: BTreeSet<u32> = target_set
        .iter()
        .copied()
        .chain(
            dont_cares
                .iter()
                .copied()
                .filter(|&m| in_range(m, num_vars)),
        )
        .collect();

    let mut level: Vec<Term> = seeds
        .into_iter()
        .map(|m| Term {
            pattern: Pattern::from_minterm(m, num_vars),
            covered: BTreeSet::from([m]),
        })
        .collect();

    let mut emitted: Vec<Term> = Vec::new();
    while !level.is_empty() {
        let (next, used) = combine_level(&level);
        match mode {
            GenerationMode::TruePrimes => emitted.extend(
                level
                    .into_iter()
                    .zip(used)
                    .filter(|(_, used)| !used)
                    .map(|(term, _)| term),
            ),
            GenerationMode::AllLevels => emitted.extend(level),
        }
        level = next;
    }

    let mut implicants: Vec<Implicant> = emitted
        .into_iter()
        .filter_map(|term| {
            let minterms: Vec<u32> = term.covered.intersection(&target_set).copied().collect();
            if minterms.is_empty() {
                None
            } else {
                Some(Implicant::new(term.pattern, minterms))
            }
        })
        .collect();

    implicants.sort_by(|a, b| {
        a.pattern
            .free_count()
            .cmp(&b.pattern.free_count())
            .then_with(|| a.pattern.cmp(&b.pattern))
    });
    implicants
}

/// Merge one level into the next; returns the next level and which terms merged
fn combine_level(level: &[Term]) -> (Vec<Term>, Vec<bool>) {
    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, term) in level.iter().enumerate() {
        groups.entry(term.pattern.ones()).or_default().push(i);
    }

    let mut next: Vec<Term> = Vec::new();
    let mut index: HashMap<Pattern, usize> = HashMap::new();
    let mut used = vec![false; level.len()];

    for (ones, lower) in &groups {
        let Some(upper) = groups.get(&(ones + 1)) else {
            continue;
        };
        for &i in lower {
            for &j in upper {
                let Some(merged) = level[i].pattern.combine(&level[j].pattern) else {
                    continue;
                };
                used[i] = true;
                used[j] = true;
                if !index.contains_key(&merged) {
                    let covered = level[i].covered.union(&level[j].covered).copied().collect();
                    index.insert(merged.clone(), next.len());
                    next.push(Term {
                        pattern: merged,
                        covered,
                    });
                }
            }
        }
    }

    (next, used)
}
