//! Lineup-optimization domain models.
//!
//! Core data types for representing a meet and its solutions. All of
//! these are constructed fresh per optimizer invocation from externally
//! supplied schedule and points data; none persist between calls.
//!
//! # Domain Mappings
//!
//! | swim-lineup | Meet program | Solver |
//! |-------------|--------------|--------|
//! | Event | Race type (stroke + distance) | No-duplicate-entry group |
//! | Segment | Session block | Rest/congestion scope |
//! | Slot | One race occurrence | Coverage constraint |
//! | LineupSolution | Start list | Extracted assignment |

mod event;
mod lineup;
mod segment;
mod slot;

pub use event::Event;
pub use lineup::{LineupEntry, LineupSolution, RankedLineup, SwimmerId};
pub use segment::Segment;
pub use slot::{Slot, SlotPlan};
