//! Variable naming for rendered sum-of-products expressions
//!
//! Minimization works purely on [`Pattern`](crate::Pattern)s; names only matter
//! when a result is turned into text. [`Variables`] holds the ordered names,
//! falling back to `A`, `B`, `C`, ... (and `X26`, `X27`, ... past the alphabet)
//! for positions the caller did not name.

use std::sync::Arc;

/// Ordered variable names, position 0 being the most significant bit
///
/// # Examples
///
/// ```
/// use patrick_logic::Variables;
///
/// let vars = Variables::default_for(3);
/// assert_eq!(vars.name(0).as_ref(), "A");
/// assert_eq!(vars.name(2).as_ref(), "C");
///
/// let named = Variables::new(&["x", "y"]);
/// assert_eq!(named.name(1).as_ref(), "y");
/// // Unnamed positions fall back to the default scheme
/// assert_eq!(named.name(2).as_ref(), "C");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Variables {
    names: Vec<Arc<str>>,
}

impl Variables {
    /// Create a variable list from explicit names
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        Variables {
            names: names.iter().map(|s| Arc::from(s.as_ref())).collect(),
        }
    }

    /// Create the default list for `num_vars` variables
    pub fn default_for(num_vars: usize) -> Self {
        Variables {
            names: (0..num_vars)
                .map(|i| Arc::from(default_name(i).as_str()))
                .collect(),
        }
    }

    /// Number of explicitly known names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when no names are known
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of the variable at `index`
    pub fn name(&self, index: usize) -> Arc<str> {
        match self.names.get(index) {
            Some(name) => Arc::clone(name),
            None => Arc::from(default_name(index).as_str()),
        }
    }

    /// The explicit names as a slice
    pub fn as_slice(&self) -> &[Arc<str>] {
        &self.names
    }
}

fn default_name(index: usize) -> String {
    if index < 26 {
        ((b'A' + index as u8) as char).to_string()
    } else {
        format!("X{}", index)
    }
}
