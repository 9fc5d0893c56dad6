//! Segment model.
//!
//! A segment is one uninterrupted block of scheduled race occurrences —
//! typically one session, with breaks between segments. A meet schedule
//! is an ordered list of segments. The same event may occur in several
//! segments (and even several times overall); each occurrence becomes its
//! own slot when the schedule is flattened.

use serde::{Deserialize, Serialize};

use super::Event;

/// One uninterrupted block of race occurrences, in program order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Race occurrences in the order they are swum.
    pub events: Vec<Event>,
}

impl Segment {
    /// Creates a segment from its event occurrences.
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Number of race occurrences in this segment.
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the segment holds no races.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl From<Vec<Event>> for Segment {
    fn from(events: Vec<Event>) -> Self {
        Self::new(events)
    }
}
