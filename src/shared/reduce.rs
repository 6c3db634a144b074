//! Stage 2 (per-function redundancy removal) and Stage 3 (shared cost)

use super::cache::Evaluation;
use super::registry::Registry;
use super::Target;
use std::collections::BTreeMap;

#[derive(Debug)]
struct Term {
    index: usize,
    minterms: Vec<u32>,
    cost: u32,
}

/// Evaluate a joint selection of registry indices for every function
pub(crate) fn evaluate(
    registry: &Registry,
    selection: &[usize],
    functions: &[Target],
) -> Evaluation {
    let per_function: Vec<Vec<usize>> = functions
        .iter()
        .map(|f| reduce(registry, selection, f))
        .collect();

    let mut usage: BTreeMap<usize, u32> = BTreeMap::new();
    for terms in &per_function {
        for &i in terms {
            *usage.entry(i).or_insert(0) += 1;
        }
    }
    let stage3_cost = usage
        .iter()
        .map(|(&i, &uses)| registry.entry(i).cost() + (uses - 1))
        .sum();

    Evaluation {
        per_function,
        used: usage.into_keys().collect(),
        stage3_cost,
    }
}

/// Reduce the part of `selection` that `function` may use to an irredundant
/// cover of its targets
///
/// 1. Drop terms whose targets another term covers at no higher cost; among
///    exact equals the earlier term survives.
/// 2. Keep the terms that are the only cover of some target.
/// 3. Greedily add the term covering the most open targets per unit of cost.
/// 4. Walk the result once, dropping each term the others make unnecessary.
pub(crate) fn reduce(registry: &Registry, selection: &[usize], function: &Target) -> Vec<usize> {
    let terms: Vec<Term> = selection
        .iter()
        .filter_map(|&index| {
            let entry = registry.entry(index);
            if !entry.is_used_by(&function.name) {
                return None;
            }
            let minterms = entry.minterms_within(&function.minterms);
            (!minterms.is_empty()).then(|| Term {
                index,
                minterms,
                cost: entry.cost(),
            })
        })
        .collect();
    if terms.len() <= 1 {
        return terms.into_iter().map(|t| t.index).collect();
    }

    let kept: Vec<&Term> = terms
        .iter()
        .enumerate()
        .filter(|&(i, term)| {
            !terms
                .iter()
                .enumerate()
                .any(|(j, other)| i != j && dominates(other, term, j < i))
        })
        .map(|(_, term)| term)
        .collect();

    let mut selected: Vec<&Term> = Vec::new();
    for &m in &function.minterms {
        let mut covering = kept.iter().filter(|t| t.minterms.binary_search(&m).is_ok());
        if let (Some(only), None) = (covering.next(), covering.next()) {
            if !selected.iter().any(|s| s.index == only.index) {
                selected.push(*only);
            }
        }
    }

    let mut open: Vec<u32> = function
        .minterms
        .iter()
        .copied()
        .filter(|m| !selected.iter().any(|t| t.minterms.binary_search(m).is_ok()))
        .collect();
    let mut unused: Vec<&Term> = kept
        .iter()
        .copied()
        .filter(|t| !selected.iter().any(|s| s.index == t.index))
        .collect();

    while !open.is_empty() {
        let mut best: Option<(usize, usize)> = None;
        for (pos, term) in unused.iter().enumerate() {
            let gain = open
                .iter()
                .filter(|m| term.minterms.binary_search(m).is_ok())
                .count();
            if gain == 0 {
                continue;
            }
            // gain / cost > best_gain / best_cost
            let better = match best {
                None => true,
                Some((best_pos, best_gain)) => {
                    gain as u64 * u64::from(unused[best_pos].cost)
                        > best_gain as u64 * u64::from(term.cost)
                }
            };
            if better {
                best = Some((pos, gain));
            }
        }
        let Some((pos, _)) = best else {
            break;
        };
        let term = unused.remove(pos);
        open.retain(|m| term.minterms.binary_search(m).is_err());
        selected.push(term);
    }

    let mut i = 0;
    while i < selected.len() {
        let covered_by_others = function.minterms.iter().all(|m| {
            selected
                .iter()
                .enumerate()
                .any(|(j, t)| j != i && t.minterms.binary_search(m).is_ok())
        });
        if covered_by_others {
            selected.remove(i);
        } else {
            i += 1;
        }
    }

    selected.into_iter().map(|t| t.index).collect()
}

/// `other` makes `term` unnecessary; `other_first` breaks exact ties
fn dominates(other: &Term, term: &Term, other_first: bool) -> bool {
    if other.cost > term.cost || !is_subset(&term.minterms, &other.minterms) {
        return false;
    }
    let exact_tie = other.cost == term.cost && other.minterms == term.minterms;
    !exact_tie || other_first
}

fn is_subset(small: &[u32], large: &[u32]) -> bool {
    small.iter().all(|m| large.binary_search(m).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primes::Implicant;
    use std::sync::Arc;

    fn registry(name: &str, terms: &[(&str, &[u32])]) -> Registry {
        let function: Arc<str> = Arc::from(name);
        let mut registry = Registry::new();
        for (pattern, minterms) in terms {
            registry.register(
                &function,
                &Implicant::new(pattern.parse().unwrap(), minterms.to_vec()),
            );
        }
        registry
    }

    fn target(name: &str, minterms: &[u32]) -> Target {
        Target {
            name: Arc::from(name),
            minterms: minterms.to_vec(),
        }
    }

    #[test]
    fn test_dominated_terms_are_dropped() {
        // 00 ⊂ 0- at lower cost, so 00 goes
        let registry = registry("F", &[("00", &[0]), ("0-", &[0, 1])]);
        let f = target("F", &[0, 1]);
        assert_eq!(reduce(&registry, &[0, 1], &f), vec![1]);
    }

    #[test]
    fn test_equal_terms_keep_the_earlier_one() {
        // -1 and 1- both cover only m3 of F at cost 1
        let registry = registry("F", &[("-1", &[1, 3]), ("1-", &[3])]);
        let f = target("F", &[3]);
        assert_eq!(reduce(&registry, &[0, 1], &f), vec![0]);
        assert_eq!(reduce(&registry, &[1, 0], &f), vec![1]);
    }

    #[test]
    fn test_other_functions_terms_are_ignored() {
        let mut reg = registry("F", &[("0-", &[0, 1])]);
        reg.register(&Arc::from("G"), &Implicant::new("--".parse().unwrap(), vec![0, 1]));
        let f = target("F", &[0, 1]);
        assert_eq!(reduce(&reg, &[0, 1], &f), vec![0]);
    }

    #[test]
    fn test_greedy_then_necessity_check() {
        // Cyclic m(0,1,2,5,6,7): every term has the same ratio, so the greedy
        // walk takes the first covering term each round; the final pass then
        // drops whatever the others cover.
        let registry = registry(
            "F",
            &[
                ("-01", &[1, 5]),
                ("-10", &[2, 6]),
                ("0-0", &[0, 2]),
                ("00-", &[0, 1]),
                ("1-1", &[5, 7]),
                ("11-", &[6, 7]),
            ],
        );
        let f = target("F", &[0, 1, 2, 5, 6, 7]);
        let reduced = reduce(&registry, &[0, 1, 2, 3, 4, 5], &f);
        let covered: Vec<u32> = f
            .minterms
            .iter()
            .copied()
            .filter(|m| {
                reduced
                    .iter()
                    .any(|&i| registry.entry(i).minterms().contains(m))
            })
            .collect();
        assert_eq!(covered, f.minterms);
        // Irredundant: removing any term uncovers something
        for skip in 0..reduced.len() {
            let all = f.minterms.iter().all(|m| {
                reduced
                    .iter()
                    .enumerate()
                    .any(|(j, &i)| j != skip && registry.entry(i).minterms().contains(m))
            });
            assert!(!all);
        }
    }

    #[test]
    fn test_stage3_charges_extra_users() {
        let f1: Arc<str> = Arc::from("F1");
        let f2: Arc<str> = Arc::from("F2");
        let mut registry = Registry::new();
        let shared = Implicant::new("11".parse().unwrap(), vec![3]);
        registry.register(&f1, &shared);
        registry.register(&f2, &shared);

        let functions = [
            Target {
                name: f1,
                minterms: vec![3],
            },
            Target {
                name: f2,
                minterms: vec![3],
            },
        ];
        let evaluation = evaluate(&registry, &[0], &functions);
        assert_eq!(evaluation.per_function, vec![vec![0], vec![0]]);
        assert_eq!(evaluation.used, vec![0]);
        // base 3 plus one extra user
        assert_eq!(evaluation.stage3_cost, 4);
    }
}
