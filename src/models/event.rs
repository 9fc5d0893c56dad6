//! Race event model.
//!
//! An event is a stroke + distance race type. The set is closed: meet
//! programs, points tables, and lineups reference these variants and
//! nothing else. Event identity is what the no-duplicate-entry rule
//! counts — a swimmer may start each event at most once per meet,
//! regardless of how many program slots it occupies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A race type: stroke plus distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    Free50,
    Free100,
    Free200,
    Free400,
    Free800,
    Free1500,
    Back50,
    Back100,
    Back200,
    Breast50,
    Breast100,
    Breast200,
    Fly50,
    Fly100,
    Fly200,
    Medley50,
    Medley100,
    Medley200,
    Medley400,
}

impl Event {
    /// All events, in program-book order.
    pub const ALL: [Event; 19] = [
        Event::Free50,
        Event::Free100,
        Event::Free200,
        Event::Free400,
        Event::Free800,
        Event::Free1500,
        Event::Back50,
        Event::Back100,
        Event::Back200,
        Event::Breast50,
        Event::Breast100,
        Event::Breast200,
        Event::Fly50,
        Event::Fly100,
        Event::Fly200,
        Event::Medley50,
        Event::Medley100,
        Event::Medley200,
        Event::Medley400,
    ];

    /// Display label as printed on a meet program.
    pub fn label(&self) -> &'static str {
        match self {
            Event::Free50 => "50m Free",
            Event::Free100 => "100m Free",
            Event::Free200 => "200m Free",
            Event::Free400 => "400m Free",
            Event::Free800 => "800m Free",
            Event::Free1500 => "1500m Free",
            Event::Back50 => "50m Back",
            Event::Back100 => "100m Back",
            Event::Back200 => "200m Back",
            Event::Breast50 => "50m Breast",
            Event::Breast100 => "100m Breast",
            Event::Breast200 => "200m Breast",
            Event::Fly50 => "50m Fly",
            Event::Fly100 => "100m Fly",
            Event::Fly200 => "200m Fly",
            Event::Medley50 => "50m Medley",
            Event::Medley100 => "100m Medley",
            Event::Medley200 => "200m Medley",
            Event::Medley400 => "400m Medley",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_distinct() {
        for (i, a) in Event::ALL.iter().enumerate() {
            for b in &Event::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(Event::ALL.len(), 19);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Event::Free50.label(), "50m Free");
        assert_eq!(Event::Medley400.label(), "400m Medley");
        assert_eq!(Event::Breast100.to_string(), "100m Breast");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Event::Free1500).unwrap();
        assert_eq!(json, "\"Free1500\"");
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Event::Free1500);
    }
}
