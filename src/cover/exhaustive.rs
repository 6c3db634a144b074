use super::Problem;
use crate::bitset::BitSet;

/// Enumerate every non-empty candidate subset and keep the covers minimal in
/// (cost, implicant count)
pub(super) fn search(problem: &Problem<'_>) -> (Vec<Vec<usize>>, u32) {
    let k = problem.candidates.len();
    debug_assert!(k < 32);

    let mut best: Option<(u32, usize)> = None;
    let mut covers: Vec<Vec<usize>> = Vec::new();
    let mut union = BitSet::new(problem.target_len());

    for mask in 1u32..(1u32 << k) {
        let cost: u32 = members(mask, k).map(|i| problem.candidates[i].cost()).sum();
        if best.is_some_and(|(best_cost, _)| cost > best_cost) {
            continue;
        }

        union.clear();
        for i in members(mask, k) {
            union.union_with(&problem.coverage[i]);
        }
        if !union.is_superset(&problem.target) {
            continue;
        }

        let rank = (cost, mask.count_ones() as usize);
        match best {
            Some(current) if rank > current => {}
            Some(current) if rank == current => covers.push(members(mask, k).collect()),
            _ => {
                best = Some(rank);
                covers.clear();
                covers.push(members(mask, k).collect());
            }
        }
    }

    log::trace!("exhaustive search over {} candidates kept {} covers", k, covers.len());
    (covers, best.map_or(0, |(cost, _)| cost))
}

fn members(mask: u32, k: usize) -> impl Iterator<Item = usize> {
    (0..k).filter(move |&i| mask & (1 << i) != 0)
}
