//! Lineup (solution) model.
//!
//! A lineup is a complete assignment of one swimmer to every slot of the
//! meet, plus derived aggregates (total points, per-swimmer race counts,
//! per-segment loads). Lineups are entirely computed by the solver and
//! never stored between invocations.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Event;

/// Opaque roster-member identifier.
pub type SwimmerId = u32;

/// One slot assignment in a finished lineup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupEntry {
    /// Global slot index.
    pub slot: usize,
    /// Owning segment index.
    pub segment: usize,
    /// Position within the segment.
    pub position: usize,
    /// Event contested in this slot.
    pub event: Event,
    /// Assigned swimmer.
    pub swimmer: SwimmerId,
    /// Points this swimmer scores in this event.
    pub points: u32,
}

/// A complete lineup: exactly one swimmer per slot, in meet order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupSolution {
    /// Slot assignments, ordered by global slot index.
    pub entries: Vec<LineupEntry>,
}

/// A lineup ranked by its congestion penalty (top-k enumeration output).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedLineup {
    /// Weighted windowed-congestion penalty; lower is better.
    pub penalty: u64,
    /// The points-optimal lineup achieving that penalty.
    pub lineup: LineupSolution,
}

impl LineupSolution {
    /// Creates a lineup from its entries.
    pub fn new(entries: Vec<LineupEntry>) -> Self {
        Self { entries }
    }

    /// Sum of points over all slots.
    pub fn total_points(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.points)).sum()
    }

    /// Number of races assigned to each swimmer that appears.
    pub fn races_per_swimmer(&self) -> HashMap<SwimmerId, usize> {
        let mut counts = HashMap::new();
        for entry in &self.entries {
            *counts.entry(entry.swimmer).or_insert(0) += 1;
        }
        counts
    }

    /// Number of distinct swimmers with at least one race.
    pub fn swimmers_used(&self) -> usize {
        self.races_per_swimmer().len()
    }

    /// Number of assigned slots per segment, indexed by segment.
    pub fn segment_loads(&self) -> Vec<usize> {
        let segments = self
            .entries
            .iter()
            .map(|e| e.segment + 1)
            .max()
            .unwrap_or(0);
        let mut loads = vec![0; segments];
        for entry in &self.entries {
            loads[entry.segment] += 1;
        }
        loads
    }

    /// Entries belonging to one segment, in position order.
    pub fn entries_for_segment(&self, segment: usize) -> Vec<&LineupEntry> {
        self.entries
            .iter()
            .filter(|e| e.segment == segment)
            .collect()
    }

    /// The swimmer assigned to a global slot, if the slot exists.
    pub fn swimmer_for_slot(&self, slot: usize) -> Option<SwimmerId> {
        self.entries
            .iter()
            .find(|e| e.slot == slot)
            .map(|e| e.swimmer)
    }

    /// Number of assigned slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the lineup holds no assignments.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
