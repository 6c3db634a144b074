use crate::pattern::Pattern;
use crate::primes::Implicant;
use std::collections::HashMap;
use std::sync::Arc;

/// One distinct pattern of a multi-function run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryEntry {
    pattern: Pattern,
    minterms: Vec<u32>,
    used_by: Vec<Arc<str>>,
    cost: u32,
}

impl RegistryEntry {
    /// The registered cube
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Union of the target minterms covered for every registering function
    pub fn minterms(&self) -> &[u32] {
        &self.minterms
    }

    /// Functions whose own generation run produced this pattern, in
    /// registration order
    pub fn used_by(&self) -> &[Arc<str>] {
        &self.used_by
    }

    /// Base cost of the product term
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Check whether `function` registered this pattern
    pub fn is_used_by(&self, function: &str) -> bool {
        self.used_by.iter().any(|name| name.as_ref() == function)
    }

    /// True when more than one function registered this pattern
    pub fn is_shared(&self) -> bool {
        self.used_by.len() > 1
    }

    /// Covered minterms restricted to one function's sorted `targets`
    pub fn minterms_within(&self, targets: &[u32]) -> Vec<u32> {
        self.minterms
            .iter()
            .copied()
            .filter(|m| targets.binary_search(m).is_ok())
            .collect()
    }
}

/// Every pattern generated during a multi-function run, keyed by pattern
///
/// Entries keep their first registration order, which is also the order the
/// joint search walks them in.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
    index: HashMap<Pattern, usize>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `function` generated `implicant`
    ///
    /// A function is listed in `used_by` at most once per pattern.
    pub fn register(&mut self, function: &Arc<str>, implicant: &Implicant) {
        match self.index.get(implicant.pattern()) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                if !entry.is_used_by(function) {
                    entry.used_by.push(Arc::clone(function));
                }
                entry.minterms.extend_from_slice(implicant.minterms());
                entry.minterms.sort_unstable();
                entry.minterms.dedup();
            }
            None => {
                self.index
                    .insert(implicant.pattern().clone(), self.entries.len());
                self.entries.push(RegistryEntry {
                    pattern: implicant.pattern().clone(),
                    minterms: implicant.minterms().to_vec(),
                    used_by: vec![Arc::clone(function)],
                    cost: implicant.cost(),
                });
            }
        }
    }

    /// Number of distinct patterns
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in registration order
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Look up the entry for `pattern`
    pub fn get(&self, pattern: &Pattern) -> Option<&RegistryEntry> {
        self.index.get(pattern).map(|&i| &self.entries[i])
    }

    /// Entries generated by more than one function
    pub fn shared(&self) -> impl Iterator<Item = &RegistryEntry> + '_ {
        self.entries.iter().filter(|entry| entry.is_shared())
    }

    pub(crate) fn entry(&self, index: usize) -> &RegistryEntry {
        &self.entries[index]
    }
}

impl PartialEq for Registry {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Registry {}
