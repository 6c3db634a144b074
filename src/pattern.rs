//! Ternary cube patterns and the term combiner
//!
//! A [`Pattern`] is a fixed-width string over `{0, 1, -}` describing a cube of
//! minterms: position 0 is the most significant bit (the first variable), and
//! every `-` position is free. Patterns order exactly like their string form,
//! so sorting a list of patterns sorts it the way a reader would expect.

use crate::expression::Variables;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A product term over `len()` variables
///
/// Each position is:
/// - `Some(false)` - the variable appears complemented (`0`)
/// - `Some(true)` - the variable appears uncomplemented (`1`)
/// - `None` - the variable is absent (`-`)
///
/// # Examples
///
/// ```
/// use patrick_logic::Pattern;
///
/// let a: Pattern = "0-1".parse().unwrap();
/// assert_eq!(a.literal_count(), 2);
/// assert_eq!(a.cost(), 3);
/// assert_eq!(a.minterms(), vec![1, 3]);
/// assert_eq!(a.to_string(), "0-1");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pattern {
    bits: Arc<[Option<bool>]>,
}

impl Pattern {
    /// Build a pattern from its positions
    pub fn new(bits: &[Option<bool>]) -> Self {
        Pattern { bits: bits.into() }
    }

    /// Render `minterm` as a fully specified pattern of width `num_vars`
    ///
    /// Bits above `num_vars` are ignored; callers validate the range first.
    pub fn from_minterm(minterm: u32, num_vars: usize) -> Self {
        let bits: Vec<Option<bool>> = (0..num_vars)
            .map(|i| {
                let shift = num_vars - 1 - i;
                Some(shift < 32 && (minterm >> shift) & 1 == 1)
            })
            .collect();
        Pattern { bits: bits.into() }
    }

    /// Number of variables
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True for the zero-variable pattern
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The positions of this pattern
    pub fn bits(&self) -> &[Option<bool>] {
        &self.bits
    }

    /// Number of `1` positions (`-` is not counted)
    pub fn ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b == Some(true)).count()
    }

    /// Number of `-` positions
    pub fn free_count(&self) -> usize {
        self.bits.iter().filter(|b| b.is_none()).count()
    }

    /// Number of literals in the product term
    pub fn literal_count(&self) -> usize {
        self.bits.len() - self.free_count()
    }

    /// Gate cost of the product term
    ///
    /// A single literal needs no gate and costs 1. A product of `L > 1`
    /// literals costs `L + 1` (its inputs plus the gate). The constant `1`
    /// (no literals) also costs 1.
    ///
    /// ```
    /// use patrick_logic::Pattern;
    ///
    /// let cost = |s: &str| s.parse::<Pattern>().unwrap().cost();
    /// assert_eq!(cost("---"), 1);
    /// assert_eq!(cost("-1-"), 1);
    /// assert_eq!(cost("0-1"), 3);
    /// assert_eq!(cost("011"), 4);
    /// ```
    pub fn cost(&self) -> u32 {
        match self.literal_count() {
            0 | 1 => 1,
            n => n as u32 + 1,
        }
    }

    /// Merge two patterns that differ in exactly one position
    ///
    /// The differing position becomes `-`; every other position is copied.
    /// Patterns of different width, identical patterns, and patterns that
    /// differ in two or more positions do not combine.
    ///
    /// ```
    /// use patrick_logic::Pattern;
    ///
    /// let p = |s: &str| s.parse::<Pattern>().unwrap();
    /// assert_eq!(p("010").combine(&p("011")), Some(p("01-")));
    /// assert_eq!(p("010").combine(&p("001")), None);
    /// assert_eq!(p("0-1").combine(&p("0-1")), None);
    /// ```
    pub fn combine(&self, other: &Pattern) -> Option<Pattern> {
        if self.bits.len() != other.bits.len() {
            return None;
        }

        let mut diff = None;
        for (i, (a, b)) in self.bits.iter().zip(other.bits.iter()).enumerate() {
            if a != b {
                if diff.is_some() {
                    return None;
                }
                diff = Some(i);
            }
        }

        let pos = diff?;
        let mut merged = self.bits.to_vec();
        merged[pos] = None;
        Some(Pattern {
            bits: merged.into(),
        })
    }

    /// Check whether `minterm` lies inside this cube
    pub fn covers(&self, minterm: u32) -> bool {
        let width = self.bits.len();
        if width < 32 && minterm >> width != 0 {
            return false;
        }
        self.bits.iter().enumerate().all(|(i, bit)| match bit {
            None => true,
            Some(value) => {
                let shift = width - 1 - i;
                let set = shift < 32 && (minterm >> shift) & 1 == 1;
                set == *value
            }
        })
    }

    /// Every minterm inside this cube, in ascending order
    pub fn minterms(&self) -> Vec<u32> {
        let width = self.bits.len();
        let mut base = 0u32;
        let mut free = Vec::new();
        for (i, bit) in self.bits.iter().enumerate() {
            let shift = width - 1 - i;
            match bit {
                Some(true) => base |= 1 << shift,
                Some(false) => {}
                None => free.push(shift),
            }
        }

        let mut minterms: Vec<u32> = (0..1u64 << free.len())
            .map(|combo| {
                free.iter()
                    .enumerate()
                    .filter(|(k, _)| (combo >> k) & 1 == 1)
                    .fold(base, |acc, (_, &shift)| acc | (1 << shift))
            })
            .collect();
        minterms.sort_unstable();
        minterms
    }

    /// Check whether this pattern strictly contains `other`
    ///
    /// `self` must be free wherever `other` is free, agree on every other
    /// position, and be free in at least one position where `other` is not.
    pub fn is_more_general(&self, other: &Pattern) -> bool {
        if self.bits.len() != other.bits.len() {
            return false;
        }

        let mut wider = false;
        for (a, b) in self.bits.iter().zip(other.bits.iter()) {
            match (a, b) {
                (None, Some(_)) => wider = true,
                (Some(_), None) => return false,
                (x, y) if x != y => return false,
                _ => {}
            }
        }
        wider
    }

    /// Render the product term with the given variable names
    ///
    /// Complemented variables carry a trailing `'`; the empty product is `1`.
    ///
    /// ```
    /// use patrick_logic::{Pattern, Variables};
    ///
    /// let vars = Variables::default_for(3);
    /// let p = |s: &str| s.parse::<Pattern>().unwrap();
    /// assert_eq!(p("1-0").to_algebraic(&vars), "AC'");
    /// assert_eq!(p("---").to_algebraic(&vars), "1");
    /// ```
    pub fn to_algebraic(&self, variables: &Variables) -> String {
        let mut out = String::new();
        for (i, bit) in self.bits.iter().enumerate() {
            if let Some(value) = bit {
                out.push_str(&variables.name(i));
                if !value {
                    out.push('\'');
                }
            }
        }
        if out.is_empty() {
            out.push('1');
        }
        out
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter() {
            let c = match bit {
                Some(false) => '0',
                Some(true) => '1',
                None => '-',
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern(\"{}\")", self)
    }
}

/// Error returned when a string is not a valid pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePatternError {
    /// The offending character
    pub character: char,
    /// Its position in the input
    pub position: usize,
}

impl fmt::Display for ParsePatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid pattern character {:?} at position {}. Expected '0', '1' or '-'.",
            self.character, self.position
        )
    }
}

impl std::error::Error for ParsePatternError {}

impl FromStr for Pattern {
    type Err = ParsePatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .chars()
            .enumerate()
            .map(|(position, character)| match character {
                '0' => Ok(Some(false)),
                '1' => Ok(Some(true)),
                '-' => Ok(None),
                _ => Err(ParsePatternError {
                    character,
                    position,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Pattern { bits: bits.into() })
    }
}
