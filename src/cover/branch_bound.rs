//! Two-phase branch-and-bound cover search
//!
//! Both phases walk the candidates in index order and only extend a partial
//! selection with a higher-indexed candidate that covers a still uncovered
//! minterm. A selection stops growing as soon as it is a cover, so only
//! irredundant covers are visited; every minimum-cost cover is irredundant
//! because costs are positive.

use super::Problem;
use crate::bitset::BitSet;
use crate::pattern::Pattern;
use std::collections::BTreeSet;

pub(super) fn search(problem: &Problem<'_>) -> (Vec<Vec<usize>>, u32) {
    let mut walk = Walk {
        problem,
        selected: Vec::new(),
        best: u32::MAX,
        collect: false,
        found: Vec::new(),
        seen: BTreeSet::new(),
    };

    // Phase 1: minimum cost, pruning once a partial selection reaches it
    walk.descend(0, &BitSet::new(problem.target_len()), 0);
    if walk.best == u32::MAX {
        return (Vec::new(), 0);
    }
    log::trace!("branch-and-bound phase 1 found minimum cost {}", walk.best);

    // Phase 2: every cover of exactly that cost
    walk.collect = true;
    walk.descend(0, &BitSet::new(problem.target_len()), 0);

    (walk.found, walk.best)
}

struct Walk<'p, 'a> {
    problem: &'p Problem<'a>,
    selected: Vec<usize>,
    best: u32,
    collect: bool,
    found: Vec<Vec<usize>>,
    seen: BTreeSet<Vec<Pattern>>,
}

impl Walk<'_, '_> {
    fn descend(&mut self, start: usize, covered: &BitSet, cost: u32) {
        if covered.is_superset(&self.problem.target) {
            self.record(cost);
            return;
        }

        for i in start..self.problem.candidates.len() {
            let bits = &self.problem.coverage[i];
            if bits.count_difference(covered) == 0 {
                continue;
            }
            let next_cost = cost + self.problem.candidates[i].cost();
            let pruned = if self.collect {
                next_cost > self.best
            } else {
                next_cost >= self.best
            };
            if pruned {
                continue;
            }

            let mut next = covered.clone();
            next.union_with(bits);
            self.selected.push(i);
            self.descend(i + 1, &next, next_cost);
            self.selected.pop();
        }
    }

    fn record(&mut self, cost: u32) {
        if !self.collect {
            self.best = self.best.min(cost);
            return;
        }
        if cost != self.best {
            return;
        }
        let mut key: Vec<Pattern> = self
            .selected
            .iter()
            .map(|&i| self.problem.candidates[i].pattern().clone())
            .collect();
        key.sort();
        if self.seen.insert(key) {
            self.found.push(self.selected.clone());
        }
    }
}
