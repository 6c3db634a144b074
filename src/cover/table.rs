//! Minterm to implicant coverage table

use crate::primes::Implicant;
use std::collections::BTreeMap;

/// For each target minterm, the indices of the implicants covering it
///
/// Indices refer to the implicant slice the table was built from and are kept
/// in ascending order. Minterms no implicant covers are still listed, with an
/// empty entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoverageTable {
    entries: BTreeMap<u32, Vec<usize>>,
}

impl CoverageTable {
    /// Build the table for `targets` over `implicants`
    pub fn build(targets: &[u32], implicants: &[Implicant]) -> Self {
        let mut entries: BTreeMap<u32, Vec<usize>> =
            targets.iter().map(|&m| (m, Vec::new())).collect();
        for (i, pi) in implicants.iter().enumerate() {
            for m in pi.minterms() {
                if let Some(entry) = entries.get_mut(m) {
                    entry.push(i);
                }
            }
        }
        CoverageTable { entries }
    }

    /// Implicants covering `m`, empty when `m` is not a target
    pub fn covering(&self, m: u32) -> &[usize] {
        self.entries.get(&m).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate `(minterm, covering implicants)` in ascending minterm order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[usize])> + '_ {
        self.entries.iter().map(|(&m, pis)| (m, pis.as_slice()))
    }

    /// Number of target minterms in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no targets
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Targets no implicant covers
    pub fn uncovered(&self) -> Vec<u32> {
        self.iter()
            .filter(|(_, pis)| pis.is_empty())
            .map(|(m, _)| m)
            .collect()
    }
}
