//! Failure kinds for the optimizer core.
//!
//! Every error propagates to the caller as-is: a failed pass is fatal for
//! the invocation, and no error is downgraded to a partial or best-effort
//! lineup. The only infeasibility detected without solving is the
//! roster-capacity pre-check.

use thiserror::Error;

use crate::catalog::Gender;
use crate::solver::Pass;

/// Errors surfaced by catalog lookups and optimizer invocations.
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// No program is configured for this (gender, category) pair.
    #[error("no schedule configured for {gender} / {category}")]
    UnsupportedConfiguration {
        /// Requested roster gender.
        gender: Gender,
        /// Requested competition category.
        category: String,
    },

    /// No race cap is configured for this category.
    #[error("no race cap configured for category {category}")]
    UnknownCategory {
        /// Requested competition category.
        category: String,
    },

    /// The roster cannot cover the schedule even with every swimmer at
    /// the race cap. Detected arithmetically, before any solve.
    #[error(
        "roster too small: {total_slots} starts to cover, but {roster_size} \
         swimmers with a cap of {max_races} races each fall short"
    )]
    InfeasibleRoster {
        /// Slots in the flattened schedule.
        total_slots: usize,
        /// Swimmers on the roster.
        roster_size: usize,
        /// Per-swimmer race cap.
        max_races: u32,
    },

    /// A pass ended without a proven optimum (solver infeasible,
    /// unbounded, errored, or over its time budget).
    #[error("optimization pass '{pass}' failed: {reason}")]
    OptimizationFailed {
        /// The pass that could not be completed.
        pass: Pass,
        /// Solver-reported reason.
        reason: String,
    },

    /// A decision variable came back fractional, or a slot ended up with
    /// zero or several swimmers selected. Indicates a solver defect and
    /// is never silently coerced.
    #[error("solver returned a non-integral assignment for slot {slot}")]
    NonIntegralSolution {
        /// Global index of the offending slot.
        slot: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_cite_the_numbers() {
        let err = OptimizeError::InfeasibleRoster {
            total_slots: 20,
            roster_size: 3,
            max_races: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("20 starts"));
        assert!(msg.contains("3 swimmers"));
        assert!(msg.contains("cap of 5"));
    }

    #[test]
    fn test_pass_failure_names_the_pass() {
        let err = OptimizeError::OptimizationFailed {
            pass: Pass::MinimaxLoad,
            reason: "model infeasible".into(),
        };
        assert!(err.to_string().contains("minimax-load"));
    }
}
