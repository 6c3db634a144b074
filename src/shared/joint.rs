//! Joint cover search over the registry
//!
//! Every (function, target minterm) pair is an obligation; a registry entry
//! satisfies the obligations of the functions that registered it. Covering
//! selections are scored with the three-stage cost model and ranked by
//! (Stage-3 cost, selection size), keeping all ties.
//!
//! A greedy cover seeds the Stage-3 bound. Both strategies then visit the
//! same subsets in the same order and skip any whose Stage-1 cost exceeds
//! the best Stage-3 cost so far, so they return the same solutions; they
//! differ only in how skipped subsets are avoided.

use super::cache::{Evaluation, Stage2Cache};
use super::reduce::evaluate;
use super::registry::Registry;
use super::Target;
use crate::bitset::BitSet;
use crate::cover::CoverStrategy;
use crate::error::MinimizeError;
use crate::pattern::Pattern;
use std::collections::BTreeSet;
use std::rc::Rc;

/// One tied selection with its evaluation
#[derive(Debug)]
pub(crate) struct Selection {
    pub(crate) members: Vec<usize>,
    pub(crate) stage1_cost: u32,
    pub(crate) evaluation: Rc<Evaluation>,
}

#[derive(Debug)]
pub(crate) struct JointSearch {
    pub(crate) selections: Vec<Selection>,
    pub(crate) stage3_cost: u32,
}

struct Problem<'a> {
    registry: &'a Registry,
    functions: &'a [Target],
    coverage: Vec<BitSet>,
    target: BitSet,
}

impl Problem<'_> {
    fn stage1(&self, members: &[usize]) -> u32 {
        members.iter().map(|&i| self.registry.entry(i).cost()).sum()
    }

    fn evaluate(&self, members: &[usize], cache: &mut Stage2Cache) -> Rc<Evaluation> {
        let mut key: Vec<Pattern> = members
            .iter()
            .map(|&i| self.registry.entry(i).pattern().clone())
            .collect();
        key.sort();
        cache.get_or_insert_with(key, || evaluate(self.registry, members, self.functions))
    }
}

/// Tied best selections, ranked by (Stage-3 cost, selection size)
#[derive(Default)]
struct Ranking {
    best: Option<(u32, usize)>,
    selections: Vec<Selection>,
}

impl Ranking {
    fn bound(&self) -> Option<u32> {
        self.best.map(|(cost, _)| cost)
    }

    fn offer(&mut self, members: &[usize], stage1_cost: u32, evaluation: Rc<Evaluation>) {
        let rank = (evaluation.stage3_cost, members.len());
        if self.best.is_some_and(|best| rank > best) {
            return;
        }
        if self.best != Some(rank) {
            self.best = Some(rank);
            self.selections.clear();
        } else if self.selections.iter().any(|s| s.members == members) {
            return;
        }
        self.selections.push(Selection {
            members: members.to_vec(),
            stage1_cost,
            evaluation,
        });
    }
}

pub(crate) fn search(
    registry: &Registry,
    functions: &[Target],
    strategy: CoverStrategy,
    cache: &mut Stage2Cache,
) -> Result<JointSearch, MinimizeError> {
    let obligations: Vec<(usize, u32)> = functions
        .iter()
        .enumerate()
        .flat_map(|(fi, f)| f.minterms.iter().map(move |&m| (fi, m)))
        .collect();

    let coverage: Vec<BitSet> = registry
        .entries()
        .iter()
        .map(|entry| {
            let mut bits = BitSet::new(obligations.len());
            for (slot, &(fi, m)) in obligations.iter().enumerate() {
                if entry.is_used_by(&functions[fi].name)
                    && entry.minterms().binary_search(&m).is_ok()
                {
                    bits.insert(slot);
                }
            }
            bits
        })
        .collect();

    let mut all = BitSet::new(obligations.len());
    for bits in &coverage {
        all.union_with(bits);
    }
    let uncovered: BTreeSet<u32> = obligations
        .iter()
        .enumerate()
        .filter(|(slot, _)| !all.contains(*slot))
        .map(|(_, &(_, m))| m)
        .collect();
    if !uncovered.is_empty() {
        return Err(MinimizeError::NoValidCover {
            remaining: uncovered.into_iter().collect(),
        });
    }

    let problem = Problem {
        registry,
        functions,
        coverage,
        target: BitSet::full(obligations.len()),
    };
    let mut ranking = Ranking::default();
    let seed = greedy_cover(&problem);
    let seed_cost = problem.stage1(&seed);
    let evaluation = problem.evaluate(&seed, cache);
    ranking.offer(&seed, seed_cost, evaluation);
    log::trace!(
        "joint search seeded with {} patterns at stage 3 cost {:?}",
        seed.len(),
        ranking.bound()
    );

    match strategy {
        CoverStrategy::Exhaustive => exhaustive(&problem, cache, &mut ranking),
        CoverStrategy::BranchAndBound => {
            let mut reach = Vec::with_capacity(registry.len() + 1);
            let mut prefix = BitSet::new(obligations.len());
            reach.push(prefix.clone());
            for bits in &problem.coverage {
                prefix.union_with(bits);
                reach.push(prefix.clone());
            }
            let mut walk = Walk {
                problem: &problem,
                cache,
                ranking: &mut ranking,
                reach,
                selected: Vec::new(),
            };
            let empty = BitSet::new(obligations.len());
            walk.descend(registry.len(), &empty, 0);
        }
    }

    let stage3_cost = ranking.bound().unwrap_or(0);
    Ok(JointSearch {
        selections: ranking.selections,
        stage3_cost,
    })
}

/// Cover every obligation by repeatedly taking the entry with the best
/// newly-covered count per unit of cost
fn greedy_cover(problem: &Problem<'_>) -> Vec<usize> {
    let mut covered = BitSet::new(problem.target.len());
    let mut members = Vec::new();
    while !covered.is_superset(&problem.target) {
        let mut best: Option<(usize, usize, u32)> = None;
        for (i, bits) in problem.coverage.iter().enumerate() {
            let gain = bits.count_difference(&covered);
            if gain == 0 {
                continue;
            }
            let cost = problem.registry.entry(i).cost();
            let better = best.map_or(true, |(_, best_gain, best_cost)| {
                gain as u64 * u64::from(best_cost) > best_gain as u64 * u64::from(cost)
            });
            if better {
                best = Some((i, gain, cost));
            }
        }
        let Some((i, _, _)) = best else {
            break;
        };
        covered.union_with(&problem.coverage[i]);
        members.push(i);
    }
    members.sort_unstable();
    members
}

fn exhaustive(problem: &Problem<'_>, cache: &mut Stage2Cache, ranking: &mut Ranking) {
    let k = problem.registry.len();
    let mut union = BitSet::new(problem.target.len());
    let mut members = Vec::with_capacity(k);

    for mask in 1u32..(1u32 << k) {
        members.clear();
        members.extend((0..k).filter(|&i| mask & (1 << i) != 0));

        let stage1_cost = problem.stage1(&members);
        if ranking.bound().is_some_and(|bound| stage1_cost > bound) {
            continue;
        }

        union.clear();
        for &i in &members {
            union.union_with(&problem.coverage[i]);
        }
        if !union.is_superset(&problem.target) {
            continue;
        }

        let evaluation = problem.evaluate(&members, cache);
        ranking.offer(&members, stage1_cost, evaluation);
    }
}

/// Depth-first walk over the same subsets as [`exhaustive`], in the same
/// order (ascending as bit masks), without a limit on the registry size
///
/// The highest undecided entry is decided first, leaving it out first.
/// A branch is cut when its Stage-1 cost already exceeds the best Stage-3
/// cost, or when the undecided entries can no longer complete a cover.
struct Walk<'p, 'a, 'c> {
    problem: &'p Problem<'a>,
    cache: &'c mut Stage2Cache,
    ranking: &'c mut Ranking,
    /// `reach[j]` is the union of the coverage of entries `0..j`
    reach: Vec<BitSet>,
    /// Decided members, highest index first
    selected: Vec<usize>,
}

impl Walk<'_, '_, '_> {
    fn descend(&mut self, undecided: usize, covered: &BitSet, stage1_cost: u32) {
        if self.ranking.bound().is_some_and(|bound| stage1_cost > bound) {
            return;
        }
        if undecided == 0 {
            if self.selected.is_empty() || !covered.is_superset(&self.problem.target) {
                return;
            }
            let members: Vec<usize> = self.selected.iter().rev().copied().collect();
            let evaluation = self.problem.evaluate(&members, self.cache);
            self.ranking.offer(&members, stage1_cost, evaluation);
            return;
        }

        let mut reachable = covered.clone();
        reachable.union_with(&self.reach[undecided]);
        if !reachable.is_superset(&self.problem.target) {
            return;
        }

        let i = undecided - 1;
        self.descend(i, covered, stage1_cost);

        let mut next = covered.clone();
        next.union_with(&self.problem.coverage[i]);
        self.selected.push(i);
        self.descend(i, &next, stage1_cost + self.problem.registry.entry(i).cost());
        self.selected.pop();
    }
}
