//! Slot flattening.
//!
//! Expands an ordered segment list into a single flat, globally indexed
//! slot sequence, plus the index arithmetic every downstream component
//! needs to translate between segment-local and meet-global positions:
//! per-segment slot lists, segment offsets, adjacent in-segment pairs,
//! sliding windows, and the two-day split of a four-segment program.
//!
//! Slots are derived, never mutated; a `SlotPlan` is recomputed per
//! optimizer invocation from the segment list, and its output order
//! always matches the input order.

use serde::{Deserialize, Serialize};

use super::{Event, Segment};

/// One globally indexed occurrence of an event within a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Global index across the whole meet.
    pub index: usize,
    /// Owning segment index.
    pub segment: usize,
    /// Position within the owning segment.
    pub position: usize,
    /// Event contested in this slot.
    pub event: Event,
}

/// Flattened view of a schedule.
#[derive(Debug, Clone)]
pub struct SlotPlan {
    /// All slots in meet order.
    pub slots: Vec<Slot>,
    /// Global slot indices owned by each segment, in position order.
    pub segment_slots: Vec<Vec<usize>>,
    /// First global slot index of each segment.
    pub segment_offsets: Vec<usize>,
}

impl SlotPlan {
    /// Flattens a schedule into its slot plan.
    pub fn from_segments(segments: &[Segment]) -> Self {
        let total: usize = segments.iter().map(Segment::len).sum();
        let mut slots = Vec::with_capacity(total);
        let mut segment_slots = Vec::with_capacity(segments.len());
        let mut segment_offsets = Vec::with_capacity(segments.len());

        for (seg_idx, segment) in segments.iter().enumerate() {
            segment_offsets.push(slots.len());
            let mut indices = Vec::with_capacity(segment.len());
            for (position, &event) in segment.events.iter().enumerate() {
                indices.push(slots.len());
                slots.push(Slot {
                    index: slots.len(),
                    segment: seg_idx,
                    position,
                    event,
                });
            }
            segment_slots.push(indices);
        }

        Self {
            slots,
            segment_slots,
            segment_offsets,
        }
    }

    /// Total number of slots across all segments.
    #[inline]
    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    /// Number of segments.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segment_slots.len()
    }

    /// Distinct events present in the schedule, in first-occurrence order.
    pub fn events_present(&self) -> Vec<Event> {
        let mut seen = Vec::new();
        for slot in &self.slots {
            if !seen.contains(&slot.event) {
                seen.push(slot.event);
            }
        }
        seen
    }

    /// Pairs of slots adjacent in local position within the same segment.
    pub fn adjacent_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for indices in &self.segment_slots {
            for pair in indices.windows(2) {
                pairs.push((pair[0], pair[1]));
            }
        }
        pairs
    }

    /// Sliding windows of `width` consecutive slots inside each segment.
    ///
    /// Windows never cross a segment boundary; segments shorter than
    /// `width` contribute none.
    pub fn windows(&self, width: usize) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        if width < 2 {
            return out;
        }
        for indices in &self.segment_slots {
            if indices.len() < width {
                continue;
            }
            for window in indices.windows(width) {
                out.push(window.to_vec());
            }
        }
        out
    }

    /// Length of the longest segment.
    pub fn max_segment_len(&self) -> usize {
        self.segment_slots
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }

    /// Splits a four-segment program into its two competition days
    /// (segments 0–1 and 2–3), returning the global slot indices of each.
    ///
    /// `None` for any other segment count — day balancing only applies to
    /// the two-days-of-two-segments program shape.
    pub fn day_split(&self) -> Option<(Vec<usize>, Vec<usize>)> {
        if self.segment_count() != 4 {
            return None;
        }
        let day1 = [&self.segment_slots[0][..], &self.segment_slots[1][..]].concat();
        let day2 = [&self.segment_slots[2][..], &self.segment_slots[3][..]].concat();
        Some((day1, day2))
    }
}
