//! Top-k lineup enumeration.
//!
//! Enumerates distinct points-optimal lineups ranked by windowed
//! congestion. Pass 1 of the lexicographic pipeline fixes the points
//! optimum; every subsequent solve minimizes a weighted sum of window
//! excesses under that lock, and each found lineup is excluded from the
//! next solve with a no-good cut over its selected (swimmer, slot)
//! pairs. Enumeration stops at `top_k` lineups or when the cuts make the
//! model infeasible, whichever comes first, so penalties come back in
//! non-decreasing order.
//!
//! The solver consumes its model on every call, so each iteration
//! rebuilds the scaffold and re-applies the accumulated cuts.

use good_lp::Expression;
use tracing::info;

use crate::error::OptimizeError;
use crate::models::{LineupSolution, RankedLineup, SlotPlan};

use super::model::{ModelScaffold, Sense};
use super::pipeline::{apply_locks, require_optimal, Lock, Pass};
use super::{MeetProblem, SolverConfig};

/// Congestion weighting and enumeration limits.
#[derive(Debug, Clone)]
pub struct CongestionParams {
    /// (window width, weight) pairs; each swimmer's excess races inside a
    /// window of that width are charged the weight. Widths below 2 are
    /// ignored.
    pub window_weights: Vec<(usize, u64)>,
    /// Maximum number of lineups to return.
    pub top_k: usize,
}

impl Default for CongestionParams {
    fn default() -> Self {
        Self {
            window_weights: vec![(3, 2), (4, 1)],
            top_k: 100,
        }
    }
}

/// Enumerates up to `params.top_k` distinct points-optimal lineups in
/// non-decreasing order of congestion penalty.
///
/// Returns fewer lineups when the points lock admits fewer distinct
/// assignments; an empty schedule yields a single empty lineup.
pub fn enumerate_top_k(
    problem: &MeetProblem,
    params: &CongestionParams,
    config: &SolverConfig,
) -> Result<Vec<RankedLineup>, OptimizeError> {
    let plan = SlotPlan::from_segments(&problem.segments);
    problem.precheck(&plan)?;
    if plan.total_slots() == 0 {
        return Ok(vec![RankedLineup {
            penalty: 0,
            lineup: LineupSolution::new(Vec::new()),
        }]);
    }
    let budget = config.pass_time_budget;

    // Fix the points optimum first.
    let scaffold = ModelScaffold::new(problem, &plan);
    let objective = scaffold.total_points();
    let solved = require_optimal(
        scaffold.solve(Sense::Maximize, objective, Pass::Points, budget)?,
        Pass::Points,
    )?;
    let locks = [Lock::Points(solved.objective.round())];

    let mut cuts: Vec<Vec<(usize, usize)>> = Vec::new();
    let mut ranked = Vec::new();

    while ranked.len() < params.top_k {
        let mut scaffold = ModelScaffold::new(problem, &plan);
        apply_locks(&mut scaffold, &locks);

        // Exclude every lineup already found.
        for cut in &cuts {
            let mut chosen = Expression::default();
            for &(row, slot) in cut {
                chosen.add_mul(1.0, scaffold.var(row, slot));
            }
            scaffold.push(chosen.leq(plan.total_slots() as f64 - 1.0));
        }

        let objective = congestion_objective(&mut scaffold, params);
        let Some(solved) =
            scaffold.solve(Sense::Minimize, objective, Pass::Congestion, budget)?
        else {
            break; // all points-optimal lineups enumerated
        };

        let penalty = solved.objective.round().max(0.0) as u64;
        let lineup = solved.extract_lineup(problem, &plan)?;
        cuts.push(solved.chosen_pairs(&plan)?);
        ranked.push(RankedLineup { penalty, lineup });
    }

    info!(
        found = ranked.len(),
        requested = params.top_k,
        "top-k enumeration complete"
    );
    Ok(ranked)
}

/// The weighted window-excess objective over all configured widths.
fn congestion_objective(scaffold: &mut ModelScaffold<'_>, params: &CongestionParams) -> Expression {
    let mut objective = Expression::default();
    for &(width, weight) in &params.window_weights {
        if width < 2 || weight == 0 {
            continue;
        }
        for excess in scaffold.window_excess(width) {
            objective.add_mul(weight as f64, excess);
        }
    }
    objective
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Event, Segment, SwimmerId};
    use std::collections::{HashMap, HashSet};

    fn config() -> SolverConfig {
        SolverConfig::default()
    }

    #[test]
    fn test_unique_optimum_yields_one_lineup() {
        let mut points = HashMap::new();
        points.insert((1, Event::Free50), 900);
        points.insert((1, Event::Back50), 100);
        points.insert((2, Event::Free50), 100);
        points.insert((2, Event::Back50), 900);
        let problem = MeetProblem {
            roster: vec![1, 2],
            points,
            segments: vec![Segment::new(vec![Event::Free50, Event::Back50])],
            max_races: 1,
            enforce_adjacent_rest: false,
        };
        let ranked = enumerate_top_k(&problem, &CongestionParams::default(), &config()).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].lineup.total_points(), 1800);
        assert_eq!(ranked[0].penalty, 0);
    }

    #[test]
    fn test_penalty_charges_weighted_window_excess() {
        // Swimmer 1 dominates every event, so the points lock forces all
        // four starts onto them. In one 4-slot segment that costs two
        // 3-windows at excess 2 (weight 2) plus one 4-window at excess 3
        // (weight 1): 2*2*2 + 3 = 11.
        let mut points = HashMap::new();
        for event in [Event::Free50, Event::Back50, Event::Breast50, Event::Fly50] {
            points.insert((1, event), 900);
            points.insert((2, event), 100);
        }
        let problem = MeetProblem {
            roster: vec![1, 2],
            points,
            segments: vec![Segment::new(vec![
                Event::Free50,
                Event::Back50,
                Event::Breast50,
                Event::Fly50,
            ])],
            max_races: 4,
            enforce_adjacent_rest: false,
        };
        let ranked = enumerate_top_k(&problem, &CongestionParams::default(), &config()).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].penalty, 11);
    }

    #[test]
    fn test_enumeration_is_exhaustive_and_ordered() {
        // Uniform points over three distinct events and three swimmers
        // with a slack cap: every one of the 27 assignments is
        // points-optimal. Six use each swimmer once (penalty 0), eighteen
        // double up one swimmer (3-window excess 1, penalty 2), three put
        // everything on one swimmer (excess 2, penalty 4).
        let roster: Vec<SwimmerId> = vec![1, 2, 3];
        let mut points = HashMap::new();
        for &swimmer in &roster {
            for event in [Event::Free50, Event::Back50, Event::Fly50] {
                points.insert((swimmer, event), 700);
            }
        }
        let problem = MeetProblem {
            roster,
            points,
            segments: vec![Segment::new(vec![
                Event::Free50,
                Event::Back50,
                Event::Fly50,
            ])],
            max_races: 3,
            enforce_adjacent_rest: false,
        };
        let params = CongestionParams {
            top_k: 50,
            ..CongestionParams::default()
        };
        let ranked = enumerate_top_k(&problem, &params, &config()).unwrap();
        assert_eq!(ranked.len(), 27);

        let penalties: Vec<u64> = ranked.iter().map(|r| r.penalty).collect();
        let mut sorted = penalties.clone();
        sorted.sort_unstable();
        assert_eq!(penalties, sorted);
        assert_eq!(penalties.iter().filter(|&&p| p == 0).count(), 6);
        assert_eq!(penalties.iter().filter(|&&p| p == 2).count(), 18);
        assert_eq!(penalties.iter().filter(|&&p| p == 4).count(), 3);

        // No lineup repeats.
        let distinct: HashSet<Vec<SwimmerId>> = ranked
            .iter()
            .map(|r| r.lineup.entries.iter().map(|e| e.swimmer).collect())
            .collect();
        assert_eq!(distinct.len(), 27);
    }

    #[test]
    fn test_top_k_truncates() {
        let roster: Vec<SwimmerId> = vec![1, 2, 3];
        let mut points = HashMap::new();
        for &swimmer in &roster {
            for event in [Event::Free50, Event::Back50, Event::Fly50] {
                points.insert((swimmer, event), 700);
            }
        }
        let problem = MeetProblem {
            roster,
            points,
            segments: vec![Segment::new(vec![
                Event::Free50,
                Event::Back50,
                Event::Fly50,
            ])],
            max_races: 3,
            enforce_adjacent_rest: false,
        };
        let params = CongestionParams {
            top_k: 5,
            ..CongestionParams::default()
        };
        let ranked = enumerate_top_k(&problem, &params, &config()).unwrap();
        assert_eq!(ranked.len(), 5);
        assert!(ranked.iter().all(|r| r.penalty == 0));
    }
}
