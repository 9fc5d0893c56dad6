//! Schedule catalog.
//!
//! Static meet programs keyed by (gender, competition category), plus the
//! per-category race cap. The catalog is an immutable configuration value
//! built once at startup and passed by reference into the optimizer —
//! lookups are pure and have no side effects.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::OptimizeError;
use crate::models::{Event, Segment};

/// Roster gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Female => "female",
            Gender::Male => "male",
        })
    }
}

/// Immutable (gender, category) → meet program table.
#[derive(Debug, Clone, Default)]
pub struct ScheduleCatalog {
    programs: HashMap<(Gender, String), Vec<Segment>>,
    max_races: HashMap<String, u32>,
}

impl ScheduleCatalog {
    /// The open (senior) competition category.
    pub const OPEN: &'static str = "Open";
    /// The junior competition category.
    pub const JUNIOR: &'static str = "Junior";

    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a program for a (gender, category) pair.
    pub fn with_program(
        mut self,
        gender: Gender,
        category: impl Into<String>,
        segments: Vec<Segment>,
    ) -> Self {
        self.programs.insert((gender, category.into()), segments);
        self
    }

    /// Sets the per-swimmer race cap for a category.
    pub fn with_max_races(mut self, category: impl Into<String>, cap: u32) -> Self {
        self.max_races.insert(category.into(), cap);
        self
    }

    /// The production catalog.
    ///
    /// Open: four segments over two days, seven races each, cap 5.
    /// Junior: two segments of eight, cap 4. Women swim 800m Free where
    /// men swim 1500m Free; the programs are otherwise identical.
    pub fn standard() -> Self {
        Self::new()
            .with_program(Gender::Male, Self::OPEN, open_program(Event::Free1500))
            .with_program(Gender::Female, Self::OPEN, open_program(Event::Free800))
            .with_program(Gender::Male, Self::JUNIOR, junior_program(Event::Free1500))
            .with_program(Gender::Female, Self::JUNIOR, junior_program(Event::Free800))
            .with_max_races(Self::OPEN, 5)
            .with_max_races(Self::JUNIOR, 4)
    }

    /// The program for a (gender, category) pair.
    pub fn segments(&self, gender: Gender, category: &str) -> Result<&[Segment], OptimizeError> {
        self.programs
            .get(&(gender, category.to_string()))
            .map(Vec::as_slice)
            .ok_or_else(|| OptimizeError::UnsupportedConfiguration {
                gender,
                category: category.to_string(),
            })
    }

    /// The per-swimmer race cap for a category.
    pub fn max_races(&self, category: &str) -> Result<u32, OptimizeError> {
        self.max_races
            .get(category)
            .copied()
            .ok_or_else(|| OptimizeError::UnknownCategory {
                category: category.to_string(),
            })
    }
}

/// Open-category program; `distance_free` is the long freestyle raced on
/// the first evening (800m for women, 1500m for men).
fn open_program(distance_free: Event) -> Vec<Segment> {
    vec![
        Segment::new(vec![
            Event::Fly50,
            Event::Free200,
            Event::Breast100,
            Event::Back200,
            Event::Fly100,
            Event::Medley200,
            Event::Free400,
        ]),
        Segment::new(vec![
            Event::Breast200,
            Event::Back100,
            Event::Fly200,
            Event::Medley400,
            Event::Back50,
            distance_free,
            Event::Free100,
        ]),
        Segment::new(vec![
            Event::Free200,
            Event::Breast100,
            Event::Back200,
            Event::Fly100,
            Event::Medley200,
            Event::Free50,
            Event::Breast200,
        ]),
        Segment::new(vec![
            Event::Medley100,
            Event::Back100,
            Event::Fly200,
            Event::Medley400,
            Event::Free400,
            Event::Breast50,
            Event::Free100,
        ]),
    ]
}

/// Junior-category program: a single two-segment day.
fn junior_program(distance_free: Event) -> Vec<Segment> {
    vec![
        Segment::new(vec![
            Event::Medley200,
            Event::Free400,
            Event::Back200,
            Event::Medley100,
            Event::Fly200,
            Event::Breast100,
            Event::Free100,
            Event::Medley400,
        ]),
        Segment::new(vec![
            Event::Free200,
            Event::Back100,
            Event::Medley200,
            Event::Fly100,
            Event::Breast200,
            distance_free,
            Event::Medley100,
            Event::Free50,
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_shapes() {
        let catalog = ScheduleCatalog::standard();

        let open = catalog.segments(Gender::Male, ScheduleCatalog::OPEN).unwrap();
        assert_eq!(open.len(), 4);
        assert!(open.iter().all(|s| s.len() == 7));

        let junior = catalog
            .segments(Gender::Female, ScheduleCatalog::JUNIOR)
            .unwrap();
        assert_eq!(junior.len(), 2);
        assert!(junior.iter().all(|s| s.len() == 8));
    }

    #[test]
    fn test_distance_free_differs_by_gender() {
        let catalog = ScheduleCatalog::standard();
        let men = catalog.segments(Gender::Male, ScheduleCatalog::OPEN).unwrap();
        let women = catalog
            .segments(Gender::Female, ScheduleCatalog::OPEN)
            .unwrap();
        assert_eq!(men[1].events[5], Event::Free1500);
        assert_eq!(women[1].events[5], Event::Free800);
        // All other occurrences match.
        assert_eq!(men[0], women[0]);
        assert_eq!(men[2], women[2]);
        assert_eq!(men[3], women[3]);
    }

    #[test]
    fn test_max_races() {
        let catalog = ScheduleCatalog::standard();
        assert_eq!(catalog.max_races(ScheduleCatalog::OPEN).unwrap(), 5);
        assert_eq!(catalog.max_races(ScheduleCatalog::JUNIOR).unwrap(), 4);
    }

    #[test]
    fn test_unknown_configuration() {
        let catalog = ScheduleCatalog::standard();
        let err = catalog.segments(Gender::Male, "Masters").unwrap_err();
        assert!(matches!(
            err,
            OptimizeError::UnsupportedConfiguration { gender: Gender::Male, .. }
        ));
        assert!(matches!(
            catalog.max_races("Masters"),
            Err(OptimizeError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_custom_program() {
        let catalog = ScheduleCatalog::new()
            .with_program(
                Gender::Female,
                "Sprint Cup",
                vec![Segment::new(vec![Event::Free50, Event::Fly50])],
            )
            .with_max_races("Sprint Cup", 2);
        let segs = catalog.segments(Gender::Female, "Sprint Cup").unwrap();
        assert_eq!(segs[0].len(), 2);
        assert_eq!(catalog.max_races("Sprint Cup").unwrap(), 2);
    }
}
