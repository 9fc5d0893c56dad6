//! ILP model assembly.
//!
//! One [`ModelScaffold`] per pass: fresh binary decision variables
//! `x[swimmer][slot]` plus the hard constraints every pass shares —
//! coverage (exactly one swimmer per slot), the per-swimmer race cap,
//! no duplicate event per swimmer, and optional hard rest on adjacent
//! in-segment slots. Passes layer their auxiliary variables and locked
//! objectives on top, then hand the scaffold to [`ModelScaffold::solve`].
//!
//! Auxiliary counting variables are always bounded `[0, structural max]`
//! (race counts by the cap, window excesses by the window width), so
//! the model never carries an open-ended integer.

use std::time::{Duration, Instant};

use good_lp::{
    default_solver, variable, variables, Constraint, Expression, ProblemVariables,
    ResolutionError, Solution, SolverModel, Variable,
};
use tracing::debug;

use crate::error::OptimizeError;
use crate::models::{LineupEntry, LineupSolution, SlotPlan};

use super::{MeetProblem, Pass};

/// Objective direction for one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sense {
    Maximize,
    Minimize,
}

/// A fresh assignment model: decision variables, shared hard constraints,
/// and lazily created auxiliary variables.
pub(crate) struct ModelScaffold<'a> {
    problem: &'a MeetProblem,
    plan: &'a SlotPlan,
    vars: ProblemVariables,
    /// `x[swimmer_row][slot]`, binary.
    x: Vec<Vec<Variable>>,
    constraints: Vec<Constraint>,
    race_counts: Option<Vec<Variable>>,
    segment_counts: Option<Vec<Vec<Variable>>>,
}

impl<'a> ModelScaffold<'a> {
    /// Builds the decision variables and the hard constraints.
    pub fn new(problem: &'a MeetProblem, plan: &'a SlotPlan) -> Self {
        let mut vars = variables!();
        let x: Vec<Vec<Variable>> = (0..problem.roster.len())
            .map(|_| {
                (0..plan.total_slots())
                    .map(|_| vars.add(variable().binary()))
                    .collect()
            })
            .collect();

        let mut constraints = Vec::new();

        // Coverage: exactly one swimmer per slot.
        for slot in &plan.slots {
            let mut cover = Expression::default();
            for row in &x {
                cover.add_mul(1.0, row[slot.index]);
            }
            constraints.push(cover.eq(1.0));
        }

        // Per-swimmer race cap across the whole meet.
        for row in &x {
            let mut load = Expression::default();
            for slot in &plan.slots {
                load.add_mul(1.0, row[slot.index]);
            }
            constraints.push(load.leq(f64::from(problem.max_races)));
        }

        // No duplicate event per swimmer, across all segments.
        for event in plan.events_present() {
            for row in &x {
                let mut starts = Expression::default();
                for slot in plan.slots.iter().filter(|s| s.event == event) {
                    starts.add_mul(1.0, row[slot.index]);
                }
                constraints.push(starts.leq(1.0));
            }
        }

        // Hard rest: no back-to-back starts within a segment.
        if problem.enforce_adjacent_rest {
            for (a, b) in plan.adjacent_pairs() {
                for row in &x {
                    let mut pair = Expression::default();
                    pair.add_mul(1.0, row[a]);
                    pair.add_mul(1.0, row[b]);
                    constraints.push(pair.leq(1.0));
                }
            }
        }

        Self {
            problem,
            plan,
            vars,
            x,
            constraints,
            race_counts: None,
            segment_counts: None,
        }
    }

    /// The slot plan this scaffold was built from.
    #[inline]
    pub fn plan(&self) -> &'a SlotPlan {
        self.plan
    }

    /// Number of roster rows.
    #[inline]
    pub fn roster_len(&self) -> usize {
        self.x.len()
    }

    /// The decision variable for (swimmer row, slot).
    #[inline]
    pub fn var(&self, swimmer_row: usize, slot: usize) -> Variable {
        self.x[swimmer_row][slot]
    }

    /// Tight upper bound on any swimmer's race count: the cap, or the
    /// slot count if the schedule is smaller.
    pub fn load_bound(&self) -> f64 {
        f64::from(self.problem.max_races).min(self.plan.total_slots() as f64)
    }

    /// Adds an extra constraint.
    pub fn push(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Adds a bounded auxiliary integer variable in `[0, max]`.
    pub fn add_int_var(&mut self, max: f64) -> Variable {
        self.vars.add(variable().integer().min(0.0).max(max))
    }

    /// Total points scored, as a linear expression over the decisions.
    pub fn total_points(&self) -> Expression {
        let mut expr = Expression::default();
        for (row, &swimmer) in self.problem.roster.iter().enumerate() {
            for slot in &self.plan.slots {
                let points = self.problem.points_for(swimmer, slot.event);
                if points > 0 {
                    expr.add_mul(f64::from(points), self.x[row][slot.index]);
                }
            }
        }
        expr
    }

    /// Per-swimmer race-count variables, each tied to the sum of that
    /// swimmer's decisions. Created once and shared by later callers.
    pub fn race_counts(&mut self) -> Vec<Variable> {
        if let Some(counts) = &self.race_counts {
            return counts.clone();
        }
        let bound = self.load_bound();
        let mut counts = Vec::with_capacity(self.x.len());
        for row in 0..self.x.len() {
            let count = self.vars.add(variable().integer().min(0.0).max(bound));
            let mut total = Expression::default();
            for slot in 0..self.plan.total_slots() {
                total.add_mul(1.0, self.x[row][slot]);
            }
            total.add_mul(-1.0, count);
            self.constraints.push(total.eq(0.0));
            counts.push(count);
        }
        self.race_counts = Some(counts.clone());
        counts
    }

    /// Per-swimmer "used" indicators: 1 iff the swimmer has at least one
    /// race. Linked to the race count with the cap as the big-M bound.
    pub fn used_indicators(&mut self) -> Vec<Variable> {
        let counts = self.race_counts();
        let bound = self.load_bound();
        let mut used = Vec::with_capacity(counts.len());
        for count in counts {
            let indicator = self.vars.add(variable().binary());
            // used <= count, count <= bound * used
            let mut lower = Expression::default();
            lower.add_mul(1.0, indicator);
            lower.add_mul(-1.0, count);
            self.constraints.push(lower.leq(0.0));
            let mut upper = Expression::default();
            upper.add_mul(1.0, count);
            upper.add_mul(-bound, indicator);
            self.constraints.push(upper.leq(0.0));
            used.push(indicator);
        }
        used
    }

    /// Per-(swimmer, segment) race-count variables, bounded by each
    /// segment's length.
    pub fn segment_counts(&mut self) -> Vec<Vec<Variable>> {
        if let Some(counts) = &self.segment_counts {
            return counts.clone();
        }
        let mut all = Vec::with_capacity(self.x.len());
        for row in 0..self.x.len() {
            let mut per_segment = Vec::with_capacity(self.plan.segment_count());
            for segment in 0..self.plan.segment_count() {
                let len = self.plan.segment_slots[segment].len() as f64;
                let count = self.vars.add(variable().integer().min(0.0).max(len));
                let mut total = Expression::default();
                for &slot in &self.plan.segment_slots[segment] {
                    total.add_mul(1.0, self.x[row][slot]);
                }
                total.add_mul(-1.0, count);
                self.constraints.push(total.eq(0.0));
                per_segment.push(count);
            }
            all.push(per_segment);
        }
        self.segment_counts = Some(all.clone());
        all
    }

    /// Windowed congestion excesses: one variable per (window of `width`
    /// consecutive in-segment slots, swimmer), equal to max(0, races in
    /// window − 1). A swimmer racing once in a window costs nothing.
    pub fn window_excess(&mut self, width: usize) -> Vec<Variable> {
        let windows = self.plan.windows(width);
        let mut excesses = Vec::with_capacity(windows.len() * self.x.len());
        for window in &windows {
            for row in 0..self.x.len() {
                let excess = self
                    .vars
                    .add(variable().integer().min(0.0).max((width - 1) as f64));
                let mut count = Expression::default();
                for &slot in window {
                    count.add_mul(1.0, self.x[row][slot]);
                }
                count.add_mul(-1.0, excess);
                self.constraints.push(count.leq(1.0));
                excesses.push(excess);
            }
        }
        excesses
    }

    /// Runs one solve. `Ok(None)` means the model is infeasible (the
    /// top-k loop treats that as exhaustion); any other solver failure,
    /// or a solve exceeding `budget`, is an error.
    pub fn solve(
        self,
        sense: Sense,
        objective: Expression,
        pass: Pass,
        budget: Option<Duration>,
    ) -> Result<Option<SolvedModel>, OptimizeError> {
        let ModelScaffold {
            vars,
            x,
            constraints,
            ..
        } = self;

        let eval_expr = objective.clone();
        let unsolved = match sense {
            Sense::Maximize => vars.maximise(objective),
            Sense::Minimize => vars.minimise(objective),
        };
        let mut model = unsolved.using(default_solver);
        for constraint in constraints {
            model = model.with(constraint);
        }

        let started = Instant::now();
        let outcome = model.solve();
        let elapsed = started.elapsed();
        if let Some(budget) = budget {
            if elapsed > budget {
                return Err(OptimizeError::OptimizationFailed {
                    pass,
                    reason: format!("time budget {budget:?} exceeded ({elapsed:?} elapsed)"),
                });
            }
        }

        match outcome {
            Ok(solution) => {
                let values = x
                    .iter()
                    .map(|row| row.iter().map(|&v| solution.value(v)).collect())
                    .collect();
                let objective = solution.eval(eval_expr);
                debug!(%pass, objective, ?elapsed, "solve completed");
                Ok(Some(SolvedModel { objective, values }))
            }
            Err(ResolutionError::Infeasible) => {
                debug!(%pass, ?elapsed, "model infeasible");
                Ok(None)
            }
            Err(err) => Err(OptimizeError::OptimizationFailed {
                pass,
                reason: err.to_string(),
            }),
        }
    }
}

/// Variable values read out of one completed solve.
pub(crate) struct SolvedModel {
    /// Objective value reached by the solver.
    pub objective: f64,
    values: Vec<Vec<f64>>,
}

impl SolvedModel {
    /// Tolerance for treating a relaxed value as integral.
    const INT_TOL: f64 = 1e-4;

    /// Row index of the swimmer assigned to `slot`. Fails loudly on
    /// fractional values or on zero/several selected swimmers.
    fn assigned_row(&self, slot: usize) -> Result<usize, OptimizeError> {
        let mut chosen = None;
        for (row, values) in self.values.iter().enumerate() {
            let value = values[slot];
            if value > Self::INT_TOL && value < 1.0 - Self::INT_TOL {
                return Err(OptimizeError::NonIntegralSolution { slot });
            }
            if value > 0.5 {
                if chosen.is_some() {
                    return Err(OptimizeError::NonIntegralSolution { slot });
                }
                chosen = Some(row);
            }
        }
        chosen.ok_or(OptimizeError::NonIntegralSolution { slot })
    }

    /// Reads the assignment into lineup entries, one per slot.
    pub fn extract_lineup(
        &self,
        problem: &MeetProblem,
        plan: &SlotPlan,
    ) -> Result<LineupSolution, OptimizeError> {
        let mut entries = Vec::with_capacity(plan.total_slots());
        for slot in &plan.slots {
            let row = self.assigned_row(slot.index)?;
            let swimmer = problem.roster[row];
            entries.push(LineupEntry {
                slot: slot.index,
                segment: slot.segment,
                position: slot.position,
                event: slot.event,
                swimmer,
                points: problem.points_for(swimmer, slot.event),
            });
        }
        Ok(LineupSolution::new(entries))
    }

    /// The selected (swimmer row, slot) pairs, for no-good cuts.
    pub fn chosen_pairs(&self, plan: &SlotPlan) -> Result<Vec<(usize, usize)>, OptimizeError> {
        plan.slots
            .iter()
            .map(|slot| self.assigned_row(slot.index).map(|row| (row, slot.index)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Event, Segment};
    use std::collections::HashMap;

    fn tiny_problem() -> MeetProblem {
        let mut points = HashMap::new();
        points.insert((1, Event::Free50), 900);
        points.insert((1, Event::Back50), 100);
        points.insert((2, Event::Free50), 100);
        points.insert((2, Event::Back50), 900);
        MeetProblem {
            roster: vec![1, 2],
            points,
            segments: vec![Segment::new(vec![Event::Free50, Event::Back50])],
            max_races: 1,
            enforce_adjacent_rest: false,
        }
    }

    #[test]
    fn test_hard_constraint_count() {
        let problem = tiny_problem();
        let plan = SlotPlan::from_segments(&problem.segments);
        let scaffold = ModelScaffold::new(&problem, &plan);
        // 2 coverage + 2 caps + 2 events x 2 swimmers no-dup = 8.
        assert_eq!(scaffold.constraints.len(), 8);

        let mut rested = problem.clone();
        rested.enforce_adjacent_rest = true;
        let scaffold = ModelScaffold::new(&rested, &plan);
        // One adjacent pair x 2 swimmers more.
        assert_eq!(scaffold.constraints.len(), 10);
    }

    #[test]
    fn test_maximize_points_picks_strengths() {
        let problem = tiny_problem();
        let plan = SlotPlan::from_segments(&problem.segments);
        let scaffold = ModelScaffold::new(&problem, &plan);
        let objective = scaffold.total_points();
        let solved = scaffold
            .solve(Sense::Maximize, objective, Pass::Points, None)
            .unwrap()
            .expect("feasible");
        assert_eq!(solved.objective.round() as i64, 1800);

        let lineup = solved.extract_lineup(&problem, &plan).unwrap();
        assert_eq!(lineup.swimmer_for_slot(0), Some(1));
        assert_eq!(lineup.swimmer_for_slot(1), Some(2));
    }

    #[test]
    fn test_infeasible_model_reports_none() {
        // One swimmer, the same event twice: no-duplicate-event makes
        // coverage impossible even though the capacity pre-check passes.
        let problem = MeetProblem {
            roster: vec![1],
            points: HashMap::new(),
            segments: vec![Segment::new(vec![Event::Free50, Event::Free50])],
            max_races: 2,
            enforce_adjacent_rest: false,
        };
        let plan = SlotPlan::from_segments(&problem.segments);
        let scaffold = ModelScaffold::new(&problem, &plan);
        let objective = scaffold.total_points();
        let outcome = scaffold
            .solve(Sense::Maximize, objective, Pass::Points, None)
            .unwrap();
        assert!(outcome.is_none());
    }

    #[test]
    fn test_chosen_pairs_cover_every_slot() {
        let problem = tiny_problem();
        let plan = SlotPlan::from_segments(&problem.segments);
        let scaffold = ModelScaffold::new(&problem, &plan);
        let objective = scaffold.total_points();
        let solved = scaffold
            .solve(Sense::Maximize, objective, Pass::Points, None)
            .unwrap()
            .unwrap();
        let pairs = solved.chosen_pairs(&plan).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], (0, 0));
        assert_eq!(pairs[1], (1, 1));
    }
}
