//! ILP lineup solver.
//!
//! The solver turns a [`MeetProblem`] into a lineup through sequential
//! integer-programming solves. Two entry points:
//!
//! - [`compute_best_lineup`]: the four-pass lexicographic pipeline —
//!   maximize points, maximize swimmers used, minimize the maximum
//!   per-swimmer load, then refine spacing/fairness.
//! - [`enumerate_top_k`]: locks the points optimum, then enumerates
//!   distinct lineups ranked by windowed congestion via no-good cuts.
//!
//! Each invocation is synchronous and self-contained: every pass builds a
//! fresh model, and no state is shared between invocations, so independent
//! calls may run on parallel threads.

mod model;
mod pipeline;
mod topk;

pub use pipeline::{compute_best_lineup, Pass};
pub use topk::{enumerate_top_k, CongestionParams};

use std::collections::HashMap;
use std::time::Duration;

use crate::error::OptimizeError;
use crate::models::{Event, Segment, SlotPlan, SwimmerId};

/// Inputs to one optimizer invocation.
///
/// Constructed fresh per call from externally supplied roster, points,
/// and schedule data; the optimizer itself holds no state.
#[derive(Debug, Clone)]
pub struct MeetProblem {
    /// Roster members eligible for assignment.
    pub roster: Vec<SwimmerId>,
    /// (swimmer, event) → score. A missing entry counts as zero: such a
    /// swimmer may still be assigned to the event, contributing nothing.
    pub points: HashMap<(SwimmerId, Event), u32>,
    /// The meet schedule, in session order.
    pub segments: Vec<Segment>,
    /// Per-swimmer race cap across the whole meet.
    pub max_races: u32,
    /// Forbid back-to-back starts within a segment as a hard constraint.
    pub enforce_adjacent_rest: bool,
}

impl MeetProblem {
    /// Score for a (swimmer, event) pair; missing entries are zero.
    pub fn points_for(&self, swimmer: SwimmerId, event: Event) -> u32 {
        self.points.get(&(swimmer, event)).copied().unwrap_or(0)
    }

    /// Rejects a provably infeasible instance before any solve: the
    /// roster at full cap must be able to cover every slot.
    pub fn precheck(&self, plan: &SlotPlan) -> Result<(), OptimizeError> {
        let capacity = self.roster.len() * self.max_races as usize;
        if capacity < plan.total_slots() {
            return Err(OptimizeError::InfeasibleRoster {
                total_slots: plan.total_slots(),
                roster_size: self.roster.len(),
                max_races: self.max_races,
            });
        }
        Ok(())
    }
}

/// Solver tuning knobs.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Wall-clock budget per pass. A pass whose solve exceeds the budget
    /// aborts the invocation; no best-effort lineup is substituted. The
    /// bundled pure-Rust backend has no interrupt hook, so the budget is
    /// checked when each solve returns.
    pub pass_time_budget: Option<Duration>,
}
