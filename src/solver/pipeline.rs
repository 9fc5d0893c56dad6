//! Lexicographic pass pipeline.
//!
//! Four solves in strict priority order; each pass rebuilds the hard
//! constraints from scratch and locks every earlier optimum before
//! optimizing its own objective:
//!
//! 1. **points** — maximize total points; optimum locked as an equality.
//! 2. **swimmers-used** — maximize the number of swimmers with at least
//!    one race; locked as an equality.
//! 3. **minimax-load** — minimize the maximum per-swimmer race count;
//!    locked as a ceiling (an inequality, not re-derived).
//! 4. **spacing** — minimize one weighted scalar over back-to-back
//!    starts, three-slot congestion, worst per-segment load, and (for
//!    two-day programs) the worst day imbalance. Dominance weights are
//!    computed from structural bounds so the single solve is equivalent
//!    to four more lexicographic ones.
//!
//! A pass that cannot prove optimality aborts the invocation with a
//! pass-specific error; there is no best-effort lineup.

use std::fmt;

use good_lp::Expression;
use tracing::info;

use crate::error::OptimizeError;
use crate::models::{LineupSolution, SlotPlan};

use super::model::{ModelScaffold, Sense, SolvedModel};
use super::{MeetProblem, SolverConfig};

/// Identifies a solve within the optimizer, for failure reports and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Pass 1: maximize total points.
    Points,
    /// Pass 2: maximize the number of swimmers used.
    SwimmersUsed,
    /// Pass 3: minimize the maximum per-swimmer race count.
    MinimaxLoad,
    /// Pass 4: spacing/fairness refinement.
    Spacing,
    /// Top-k mode: congestion minimization under the points lock.
    Congestion,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pass::Points => "points",
            Pass::SwimmersUsed => "swimmers-used",
            Pass::MinimaxLoad => "minimax-load",
            Pass::Spacing => "spacing",
            Pass::Congestion => "congestion",
        })
    }
}

/// An optimum carried forward from an earlier pass. Applying a lock
/// re-creates the expression it constrains inside the fresh model.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Lock {
    /// Total points fixed to the pass-1 optimum.
    Points(f64),
    /// Swimmers-used count fixed to the pass-2 optimum.
    SwimmersUsed(f64),
    /// Every race count capped at the pass-3 optimum.
    LoadCeiling(f64),
}

/// Re-asserts earlier optima on a fresh scaffold.
pub(crate) fn apply_locks(scaffold: &mut ModelScaffold<'_>, locks: &[Lock]) {
    for lock in locks {
        match *lock {
            Lock::Points(optimum) => {
                let total = scaffold.total_points();
                scaffold.push(total.eq(optimum));
            }
            Lock::SwimmersUsed(optimum) => {
                let used = scaffold.used_indicators();
                let mut total = Expression::default();
                for indicator in used {
                    total.add_mul(1.0, indicator);
                }
                scaffold.push(total.eq(optimum));
            }
            Lock::LoadCeiling(ceiling) => {
                for count in scaffold.race_counts() {
                    scaffold.push(Expression::from(count).leq(ceiling));
                }
            }
        }
    }
}

/// Converts an infeasible solve into a pass failure. Only the top-k loop
/// treats infeasibility as a normal outcome.
pub(crate) fn require_optimal(
    outcome: Option<SolvedModel>,
    pass: Pass,
) -> Result<SolvedModel, OptimizeError> {
    outcome.ok_or_else(|| OptimizeError::OptimizationFailed {
        pass,
        reason: "model infeasible".into(),
    })
}

/// Computes the single best lineup via the four-pass pipeline.
///
/// Fails with [`OptimizeError::InfeasibleRoster`] before solving when the
/// roster cannot cover the schedule, and with
/// [`OptimizeError::OptimizationFailed`] naming the pass that could not
/// reach a proven optimum.
pub fn compute_best_lineup(
    problem: &MeetProblem,
    config: &SolverConfig,
) -> Result<LineupSolution, OptimizeError> {
    let plan = SlotPlan::from_segments(&problem.segments);
    problem.precheck(&plan)?;
    if plan.total_slots() == 0 {
        return Ok(LineupSolution::new(Vec::new()));
    }
    let budget = config.pass_time_budget;

    // Pass 1: maximize total points.
    let scaffold = ModelScaffold::new(problem, &plan);
    let objective = scaffold.total_points();
    let solved = require_optimal(
        scaffold.solve(Sense::Maximize, objective, Pass::Points, budget)?,
        Pass::Points,
    )?;
    let best_points = solved.objective.round();
    info!(pass = %Pass::Points, optimum = best_points, "pass optimum locked");
    let mut locks = vec![Lock::Points(best_points)];

    // Pass 2: maximize swimmers used.
    let mut scaffold = ModelScaffold::new(problem, &plan);
    apply_locks(&mut scaffold, &locks);
    let used = scaffold.used_indicators();
    let mut objective = Expression::default();
    for indicator in used {
        objective.add_mul(1.0, indicator);
    }
    let solved = require_optimal(
        scaffold.solve(Sense::Maximize, objective, Pass::SwimmersUsed, budget)?,
        Pass::SwimmersUsed,
    )?;
    let best_used = solved.objective.round();
    info!(pass = %Pass::SwimmersUsed, optimum = best_used, "pass optimum locked");
    locks.push(Lock::SwimmersUsed(best_used));

    // Pass 3: minimize the maximum per-swimmer race count.
    let mut scaffold = ModelScaffold::new(problem, &plan);
    apply_locks(&mut scaffold, &locks);
    let bound = scaffold.load_bound();
    let max_load = scaffold.add_int_var(bound);
    for count in scaffold.race_counts() {
        let mut below = Expression::default();
        below.add_mul(1.0, count);
        below.add_mul(-1.0, max_load);
        scaffold.push(below.leq(0.0));
    }
    let solved = require_optimal(
        scaffold.solve(
            Sense::Minimize,
            Expression::from(max_load),
            Pass::MinimaxLoad,
            budget,
        )?,
        Pass::MinimaxLoad,
    )?;
    let load_ceiling = solved.objective.round();
    info!(pass = %Pass::MinimaxLoad, optimum = load_ceiling, "pass optimum locked");
    locks.push(Lock::LoadCeiling(load_ceiling));

    // Pass 4: spacing refinement under all locks.
    let mut scaffold = ModelScaffold::new(problem, &plan);
    apply_locks(&mut scaffold, &locks);
    let objective = spacing_objective(&mut scaffold);
    let solved = require_optimal(
        scaffold.solve(Sense::Minimize, objective, Pass::Spacing, budget)?,
        Pass::Spacing,
    )?;
    info!(pass = %Pass::Spacing, penalty = solved.objective, "pipeline complete");

    solved.extract_lineup(problem, &plan)
}

/// Builds the pass-4 objective: a single weighted sum whose coefficients
/// make each term strictly dominate everything below it.
///
/// Priority order: back-to-back starts (2-windows), three-slot
/// congestion (3-windows), worst per-segment load, then — only for
/// four-segment programs read as two days of two segments — the worst
/// day imbalance. Each weight exceeds the maximum possible weighted sum
/// of all lower-priority terms, derived from structural bounds: a
/// 2-window contributes at most 1, a 3-window at most 2, the segment
/// load at most the longest segment, the day gap at most the race cap.
fn spacing_objective(scaffold: &mut ModelScaffold<'_>) -> Expression {
    let plan = scaffold.plan();
    let day_split = plan.day_split();

    let adjacent_max = plan.windows(2).len() as f64;
    let triple_max = 2.0 * plan.windows(3).len() as f64;
    let segment_max = plan.max_segment_len() as f64;
    let day_gap_max = if day_split.is_some() {
        scaffold.load_bound()
    } else {
        0.0
    };

    let day_weight = 1.0;
    let segment_weight = day_gap_max * day_weight + 1.0;
    let triple_weight = segment_max * segment_weight + day_gap_max * day_weight + 1.0;
    let adjacent_weight =
        triple_max * triple_weight + segment_max * segment_weight + day_gap_max * day_weight + 1.0;
    // adjacent_max only feeds sanity: the top term needs no dominance margin.
    let _ = adjacent_max;

    let mut objective = Expression::default();

    for excess in scaffold.window_excess(2) {
        objective.add_mul(adjacent_weight, excess);
    }
    for excess in scaffold.window_excess(3) {
        objective.add_mul(triple_weight, excess);
    }

    // Worst per-(swimmer, segment) load.
    let segment_counts = scaffold.segment_counts();
    let max_segment_load = scaffold.add_int_var(segment_max);
    for per_segment in &segment_counts {
        for &count in per_segment {
            let mut below = Expression::default();
            below.add_mul(1.0, count);
            below.add_mul(-1.0, max_segment_load);
            scaffold.push(below.leq(0.0));
        }
    }
    objective.add_mul(segment_weight, max_segment_load);

    // Worst |day 1 − day 2| race-count gap, two-day programs only.
    if let Some((day1, day2)) = day_split {
        let day_gap = scaffold.add_int_var(day_gap_max);
        for row in 0..scaffold.roster_len() {
            let mut forward = Expression::default();
            let mut backward = Expression::default();
            for &slot in &day1 {
                forward.add_mul(1.0, scaffold.var(row, slot));
                backward.add_mul(-1.0, scaffold.var(row, slot));
            }
            for &slot in &day2 {
                forward.add_mul(-1.0, scaffold.var(row, slot));
                backward.add_mul(1.0, scaffold.var(row, slot));
            }
            forward.add_mul(-1.0, day_gap);
            backward.add_mul(-1.0, day_gap);
            scaffold.push(forward.leq(0.0));
            scaffold.push(backward.leq(0.0));
        }
        objective.add_mul(day_weight, day_gap);
    }

    objective
}
