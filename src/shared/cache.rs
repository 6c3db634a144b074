use crate::pattern::Pattern;
use std::collections::HashMap;
use std::rc::Rc;

/// Stage-2 and Stage-3 evaluation of one candidate joint selection
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Evaluation {
    /// Per function slot: reduced term list as registry indices
    pub(crate) per_function: Vec<Vec<usize>>,
    /// Sorted union of every reduced term list, as registry indices
    pub(crate) used: Vec<usize>,
    /// Shared cost: each used pattern costs `base + (functions using it - 1)`
    pub(crate) stage3_cost: u32,
}

/// Memo of Stage-2 results keyed by the sorted pattern list of a selection
///
/// Lives for exactly one multi-function call: entries refer to the indices of
/// that call's registry. Each strategy visits a selection once, so hits come
/// from the greedy seed being visited again by the search.
#[derive(Debug, Default)]
pub(crate) struct Stage2Cache {
    map: HashMap<Vec<Pattern>, Rc<Evaluation>>,
    hits: usize,
    misses: usize,
}

impl Stage2Cache {
    /// Creates an empty cache.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of lookups answered from the cache.
    pub(crate) fn hits(&self) -> usize {
        self.hits
    }

    /// Number of lookups that had to be computed.
    pub(crate) fn misses(&self) -> usize {
        self.misses
    }

    /// Returns the cached evaluation for `key`, computing it on a miss.
    pub(crate) fn get_or_insert_with(
        &mut self,
        key: Vec<Pattern>,
        compute: impl FnOnce() -> Evaluation,
    ) -> Rc<Evaluation> {
        if let Some(found) = self.map.get(&key) {
            self.hits += 1;
            return Rc::clone(found);
        }
        self.misses += 1;
        let value = Rc::new(compute());
        self.map.insert(key, Rc::clone(&value));
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_and_misses() {
        let mut cache = Stage2Cache::new();
        let key: Vec<Pattern> = vec!["0-".parse().unwrap(), "11".parse().unwrap()];
        let make = || Evaluation {
            per_function: vec![vec![0]],
            used: vec![0],
            stage3_cost: 1,
        };

        let first = cache.get_or_insert_with(key.clone(), make);
        let second = cache.get_or_insert_with(key, || unreachable!());
        assert_eq!(first, second);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }
}
