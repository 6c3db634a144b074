//! Progress reporting for minimization runs
//!
//! The minimizer never prints. Instead it reports structured [`TraceEvent`]s to
//! a [`Trace`] sink supplied by the caller:
//!
//! - [`NoTrace`] discards everything
//! - [`LogTrace`] forwards events to the [`log`] facade (the default)
//! - [`Recorder`] keeps every event so the steps of a run can be shown later
//!
//! ```
//! use patrick_logic::{Minimizer, MinimizerConfig, Recorder, TraceEvent};
//!
//! # fn main() -> Result<(), patrick_logic::MinimizeError> {
//! let mut minimizer = Minimizer::with_trace(MinimizerConfig::default(), Recorder::new());
//! minimizer.minimize_single_function(&[1, 3, 5, 7], &[], 3)?;
//!
//! let steps = minimizer.trace().events();
//! assert!(steps
//!     .iter()
//!     .any(|e| matches!(e, TraceEvent::EssentialsFound { .. })));
//! # Ok(())
//! # }
//! ```

use crate::cover::CoverStrategy;
use crate::error::Diagnostic;
use crate::pattern::Pattern;
use crate::primes::GenerationMode;
use std::sync::Arc;

/// One step of a minimization run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// A function's input was validated and deduplicated
    InputNormalized {
        /// Function name (`None` for a single-function request)
        function: Option<Arc<str>>,
        /// Number of distinct target minterms kept
        minterms: usize,
        /// Number of distinct don't-cares kept
        dont_cares: usize,
    },
    /// A recoverable input problem
    Diagnostic(Diagnostic),
    /// Implicants were generated for one function
    PrimesGenerated {
        /// Function name (`None` for a single-function request)
        function: Option<Arc<str>>,
        /// Generation mode used
        mode: GenerationMode,
        /// Generated patterns in output order
        patterns: Vec<Pattern>,
    },
    /// Essential implicants were extracted from the coverage table
    EssentialsFound {
        /// Essential patterns in discovery order
        essentials: Vec<Pattern>,
        /// Target minterms covered by the essentials
        covered: Vec<u32>,
        /// Target minterms left for the cover search
        remaining: Vec<u32>,
    },
    /// A minimal-cover search started
    CoverSearchStarted {
        /// Search strategy picked from the candidate count
        strategy: CoverStrategy,
        /// Number of candidate implicants
        candidates: usize,
    },
    /// A minimal-cover search finished
    CoverSearchFinished {
        /// Search strategy used
        strategy: CoverStrategy,
        /// Number of tied minimal covers
        solutions: usize,
        /// Cost of each minimal cover (candidates only, without essentials)
        cost: u32,
    },
    /// The shared implicant registry of a multi-function run was built
    RegistryBuilt {
        /// Number of distinct patterns
        patterns: usize,
        /// Patterns generated by more than one function
        shared: Vec<Pattern>,
    },
    /// The joint search of a multi-function run started
    JointSearchStarted {
        /// Search strategy picked from the registry size
        strategy: CoverStrategy,
        /// Number of registry patterns searched over
        patterns: usize,
        /// Number of (function, minterm) coverage obligations
        obligations: usize,
    },
    /// The joint search of a multi-function run finished
    JointSearchFinished {
        /// Number of tied joint solutions before deduplication
        solutions: usize,
        /// Best Stage-3 cost
        stage3_cost: u32,
        /// Stage-2 cache hits
        cache_hits: usize,
        /// Stage-2 cache misses
        cache_misses: usize,
    },
}

/// A sink for [`TraceEvent`]s
pub trait Trace {
    /// Receive one event
    fn event(&mut self, event: &TraceEvent);
}

impl<T: Trace + ?Sized> Trace for &mut T {
    fn event(&mut self, event: &TraceEvent) {
        (**self).event(event)
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl Trace for NoTrace {
    fn event(&mut self, _event: &TraceEvent) {}
}

/// Forwards events to the `log` facade
///
/// Search results go out at `info`, intermediate steps at `debug`, and
/// diagnostics at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl Trace for LogTrace {
    fn event(&mut self, event: &TraceEvent) {
        match event {
            TraceEvent::InputNormalized {
                function,
                minterms,
                dont_cares,
            } => log::debug!(
                "input {}: {} minterms, {} don't-cares",
                display_name(function),
                minterms,
                dont_cares
            ),
            TraceEvent::Diagnostic(diagnostic) => log::warn!("{}", diagnostic),
            TraceEvent::PrimesGenerated {
                function,
                mode,
                patterns,
            } => log::debug!(
                "{:?} implicants of {}: {}",
                mode,
                display_name(function),
                join(patterns)
            ),
            TraceEvent::EssentialsFound {
                essentials,
                covered,
                remaining,
            } => log::debug!(
                "essentials [{}] cover {:?}, remaining {:?}",
                join(essentials),
                covered,
                remaining
            ),
            TraceEvent::CoverSearchStarted {
                strategy,
                candidates,
            } => log::debug!("{:?} cover search over {} candidates", strategy, candidates),
            TraceEvent::CoverSearchFinished {
                strategy,
                solutions,
                cost,
            } => log::info!(
                "{:?} cover search found {} minimal covers of cost {}",
                strategy,
                solutions,
                cost
            ),
            TraceEvent::RegistryBuilt { patterns, shared } => log::debug!(
                "registry holds {} patterns, shared: [{}]",
                patterns,
                join(shared)
            ),
            TraceEvent::JointSearchStarted {
                strategy,
                patterns,
                obligations,
            } => log::debug!(
                "{:?} joint search over {} patterns, {} obligations",
                strategy,
                patterns,
                obligations
            ),
            TraceEvent::JointSearchFinished {
                solutions,
                stage3_cost,
                cache_hits,
                cache_misses,
            } => log::info!(
                "joint search found {} solutions of shared cost {} (stage 2 cache: {} hits, {} misses)",
                solutions,
                stage3_cost,
                cache_hits,
                cache_misses
            ),
        }
    }
}

fn display_name(function: &Option<Arc<str>>) -> &str {
    function.as_deref().unwrap_or("f")
}

fn join(patterns: &[Pattern]) -> String {
    patterns
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Keeps every event in order
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Vec<TraceEvent>,
}

impl Recorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the recorder empty
    pub fn take(&mut self) -> Vec<TraceEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Trace for Recorder {
    fn event(&mut self, event: &TraceEvent) {
        self.events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_recorder_keeps_order() {
        let mut recorder = Recorder::new();
        recorder.event(&TraceEvent::CoverSearchStarted {
            strategy: CoverStrategy::Exhaustive,
            candidates: 3,
        });
        recorder.event(&TraceEvent::CoverSearchFinished {
            strategy: CoverStrategy::Exhaustive,
            solutions: 1,
            cost: 2,
        });
        assert_eq!(recorder.events().len(), 2);
        assert!(matches!(
            recorder.events()[0],
            TraceEvent::CoverSearchStarted { candidates: 3, .. }
        ));

        let taken = recorder.take();
        assert_eq!(taken.len(), 2);
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn test_log_trace_accepts_every_event() {
        let mut sink = LogTrace;
        let p: Pattern = "0-".parse().unwrap();
        sink.event(&TraceEvent::RegistryBuilt {
            patterns: 1,
            shared: vec![p.clone()],
        });
        sink.event(&TraceEvent::Diagnostic(Diagnostic::EmptyFunctionSet {
            function: Arc::from("F"),
        }));
        sink.event(&TraceEvent::PrimesGenerated {
            function: None,
            mode: GenerationMode::TruePrimes,
            patterns: vec![p],
        });
    }

    #[test]
    fn test_mut_reference_forwards() {
        fn feed<T: Trace>(mut sink: T) {
            sink.event(&TraceEvent::InputNormalized {
                function: None,
                minterms: 2,
                dont_cares: 0,
            });
        }

        let mut recorder = Recorder::new();
        feed(&mut recorder);
        assert_eq!(recorder.events().len(), 1);
    }
}
