//! Swim-meet lineup optimization.
//!
//! Assigns one swimmer to every race slot of a meet program so that team
//! points are maximized, then refines the assignment over lower-priority
//! goals in strict lexicographic order: use as many swimmers as possible,
//! minimize the heaviest individual race load, and spread each swimmer's
//! starts out within and across sessions. A second entry point enumerates
//! the distinct points-optimal lineups ranked by how congested they are.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Event`, `Segment`, `Slot`/`SlotPlan`,
//!   `LineupEntry`/`LineupSolution`, `RankedLineup`
//! - **`catalog`**: Static meet programs per (gender, category) and the
//!   per-category race caps
//! - **`solver`**: The ILP passes — [`solver::compute_best_lineup`] and
//!   [`solver::enumerate_top_k`]
//! - **`error`**: [`OptimizeError`], the single failure type
//!
//! # Approach
//!
//! Every objective is solved as an integer program over binary
//! swimmer-per-slot decisions; each pass locks the previous optimum as a
//! constraint before optimizing its own criterion, so no lower-priority
//! goal can ever trade away a higher one. Solves run through `good_lp`
//! on the bundled pure-Rust backend. The optimizer is stateless: each
//! invocation builds its models from the inputs and returns either a
//! proven-optimal lineup or an error, never a best-effort one.
//!
//! # Example
//!
//! ```no_run
//! use std::collections::HashMap;
//! use swim_lineup::catalog::{Gender, ScheduleCatalog};
//! use swim_lineup::solver::{compute_best_lineup, MeetProblem, SolverConfig};
//!
//! # fn main() -> Result<(), swim_lineup::OptimizeError> {
//! let catalog = ScheduleCatalog::standard();
//! let category = ScheduleCatalog::OPEN;
//!
//! let problem = MeetProblem {
//!     roster: (1..=10).collect(),
//!     points: HashMap::new(), // (swimmer, event) -> points
//!     segments: catalog.segments(Gender::Female, category)?.to_vec(),
//!     max_races: catalog.max_races(category)?,
//!     enforce_adjacent_rest: false,
//! };
//!
//! let lineup = compute_best_lineup(&problem, &SolverConfig::default())?;
//! println!(
//!     "{} points over {} swimmers",
//!     lineup.total_points(),
//!     lineup.swimmers_used()
//! );
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod error;
pub mod models;
pub mod solver;

pub use error::OptimizeError;
pub use models::{LineupEntry, LineupSolution, RankedLineup};
pub use solver::{
    compute_best_lineup, enumerate_top_k, CongestionParams, MeetProblem, SolverConfig,
};
