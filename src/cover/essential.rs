use super::CoverageTable;
use crate::primes::Implicant;
use std::collections::BTreeSet;

/// Essential implicants of a coverage table and what they leave open
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EssentialAnalysis {
    /// Indices of essential implicants, in the order they were discovered
    pub essentials: Vec<usize>,
    /// Target minterms covered by at least one essential, ascending
    pub covered: Vec<u32>,
    /// Target minterms not covered by any essential, ascending
    pub remaining: Vec<u32>,
}

impl EssentialAnalysis {
    /// Extract essentials: an implicant is essential when it is the only
    /// cover of some target minterm
    ///
    /// Minterms are visited in ascending order, so discovery order follows the
    /// smallest minterm each essential is the sole cover of.
    pub fn analyze(table: &CoverageTable, implicants: &[Implicant]) -> Self {
        let mut essentials = Vec::new();
        for (_, pis) in table.iter() {
            if let [only] = pis {
                if !essentials.contains(only) {
                    essentials.push(*only);
                }
            }
        }

        let covered: BTreeSet<u32> = essentials
            .iter()
            .flat_map(|&i| implicants[i].minterms().iter().copied())
            .collect();
        let remaining = table
            .iter()
            .map(|(m, _)| m)
            .filter(|m| !covered.contains(m))
            .collect();

        EssentialAnalysis {
            essentials,
            covered: covered.into_iter().collect(),
            remaining,
        }
    }

    /// Check whether implicant `index` is essential
    pub fn is_essential(&self, index: usize) -> bool {
        self.essentials.contains(&index)
    }

    /// Indices of the implicants that are not essential, ascending
    pub fn candidates(&self, total: usize) -> Vec<usize> {
        (0..total).filter(|&i| !self.is_essential(i)).collect()
    }
}
