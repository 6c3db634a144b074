//! Error types for the Patrick logic minimizer
//!
//! Fatal conditions are reported through [`MinimizeError`]. Conditions that the
//! minimizer recovers from on its own (dropped input terms, functions that
//! contribute nothing to a joint run) are reported as [`Diagnostic`]s attached
//! to the result instead.

use std::fmt;
use std::io;
use std::sync::Arc;

/// The main error type for the minimizer
///
/// Every variant is deterministic given the same input, so retrying a failed
/// request without changing it never helps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinimizeError {
    /// The candidate implicants cannot cover every remaining minterm
    ///
    /// This cannot happen when the implicants were generated from the
    /// function's own minterms, so it indicates an inconsistent request.
    NoValidCover {
        /// The minterms that were still uncovered when the search gave up
        remaining: Vec<u32>,
    },

    /// More variables were requested than a `u32` minterm can address
    TooManyVariables {
        /// The requested number of variables
        requested: usize,
        /// The largest supported number of variables
        max: usize,
    },

    /// Two functions in a multi-function request share the same name
    DuplicateFunction {
        /// The repeated function name
        name: Arc<str>,
    },
}

impl fmt::Display for MinimizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinimizeError::NoValidCover { remaining } => write!(
                f,
                "No valid cover exists for the remaining minterms {:?}",
                remaining
            ),
            MinimizeError::TooManyVariables { requested, max } => write!(
                f,
                "Cannot minimize over {} variables (at most {} are supported)",
                requested, max
            ),
            MinimizeError::DuplicateFunction { name } => {
                write!(f, "Function '{}' is defined more than once", name)
            }
        }
    }
}

impl std::error::Error for MinimizeError {}

impl From<MinimizeError> for io::Error {
    fn from(err: MinimizeError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}

/// A recoverable problem found while normalizing or solving a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A minterm or don't-care does not fit in `num_vars` bits and was dropped
    InvalidInput {
        /// The offending value
        value: u32,
        /// The number of variables of the request
        num_vars: usize,
        /// The function the value belonged to (`None` for don't-cares)
        function: Option<Arc<str>>,
    },

    /// A function produced no usable implicants and was left out of joint solving
    EmptyFunctionSet {
        /// The omitted function
        function: Arc<str>,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidInput {
                value,
                num_vars,
                function: Some(name),
            } => write!(
                f,
                "Dropped minterm {} of '{}': out of range for {} variables",
                value, name, num_vars
            ),
            Diagnostic::InvalidInput {
                value,
                num_vars,
                function: None,
            } => write!(
                f,
                "Dropped don't-care {}: out of range for {} variables",
                value, num_vars
            ),
            Diagnostic::EmptyFunctionSet { function } => write!(
                f,
                "Function '{}' has no minterms and was omitted from joint solving",
                function
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_valid_cover_display() {
        let err = MinimizeError::NoValidCover {
            remaining: vec![3, 5],
        };
        let msg = err.to_string();
        assert!(msg.contains("No valid cover"));
        assert!(msg.contains("[3, 5]"));
    }

    #[test]
    fn test_too_many_variables_display() {
        let err = MinimizeError::TooManyVariables {
            requested: 40,
            max: 32,
        };
        let msg = err.to_string();
        assert!(msg.contains("40 variables"));
        assert!(msg.contains("at most 32"));
    }

    #[test]
    fn test_duplicate_function_display() {
        let err = MinimizeError::DuplicateFunction {
            name: Arc::from("F1"),
        };
        assert!(err.to_string().contains("'F1'"));
    }

    #[test]
    fn test_error_to_io_error() {
        let err = MinimizeError::NoValidCover { remaining: vec![1] };
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_diagnostic_display() {
        let dropped = Diagnostic::InvalidInput {
            value: 9,
            num_vars: 3,
            function: Some(Arc::from("F")),
        };
        assert!(dropped.to_string().contains("minterm 9 of 'F'"));

        let dc = Diagnostic::InvalidInput {
            value: 8,
            num_vars: 3,
            function: None,
        };
        assert!(dc.to_string().contains("don't-care 8"));

        let empty = Diagnostic::EmptyFunctionSet {
            function: Arc::from("G"),
        };
        assert!(empty.to_string().contains("'G'"));
    }
}
