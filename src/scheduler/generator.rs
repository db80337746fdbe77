//! Cartesian-product combination generator.
//!
//! # Algorithm
//!
//! Odometer enumeration over per-group alternative indices. The last group
//! varies fastest, so output order is lexicographic over
//! (group order, alternative order). Each step assembles one schedule in
//! O(n) for n groups; nothing is materialized ahead of the consumer.
//!
//! # Edge Cases
//! - Zero groups: exactly one (empty) combination.
//! - Any group with zero alternatives: zero combinations.

use std::sync::Arc;

use crate::models::{Catalog, Schedule, Section};

/// Lazy iterator over every one-section-per-group combination.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Catalog, GroupBy, SectionRecord};
/// use u_timetable::scheduler::CombinationGenerator;
///
/// let records = vec![
///     SectionRecord::new("MATH101"),
///     SectionRecord::new("MATH101"),
///     SectionRecord::new("PHYS101"),
/// ];
/// let catalog = Catalog::from_records(&records, GroupBy::Title);
/// let generator = CombinationGenerator::new(&catalog);
/// assert_eq!(generator.total(), Some(2));
/// assert_eq!(generator.count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CombinationGenerator<'c> {
    groups: Vec<&'c [Arc<Section>]>,
    cursor: Option<Vec<usize>>,
    total: Option<usize>,
    produced: usize,
}

impl<'c> CombinationGenerator<'c> {
    /// Creates a generator over the catalog's groups.
    pub fn new(catalog: &'c Catalog) -> Self {
        Self::from_groups(catalog.groups().iter().map(|g| g.sections()).collect())
    }

    /// Creates a generator over explicit alternative lists.
    pub fn from_groups(groups: Vec<&'c [Arc<Section>]>) -> Self {
        let cursor = if groups.iter().any(|g| g.is_empty()) {
            None
        } else {
            Some(vec![0; groups.len()])
        };
        let total = groups
            .iter()
            .try_fold(1usize, |acc, g| acc.checked_mul(g.len()));
        Self {
            groups,
            cursor,
            total,
            produced: 0,
        }
    }

    /// Size of the full product, or `None` if it overflows `usize`.
    pub fn total(&self) -> Option<usize> {
        self.total
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    fn advance(&mut self) {
        let Some(cursor) = self.cursor.as_mut() else {
            return;
        };
        for pos in (0..cursor.len()).rev() {
            cursor[pos] += 1;
            if cursor[pos] < self.groups[pos].len() {
                return;
            }
            cursor[pos] = 0;
        }
        // Every position wrapped: the product is exhausted.
        self.cursor = None;
    }
}

impl Iterator for CombinationGenerator<'_> {
    type Item = Schedule;

    fn next(&mut self) -> Option<Schedule> {
        let cursor = self.cursor.as_ref()?;
        let sections = cursor
            .iter()
            .zip(&self.groups)
            .map(|(&i, group)| Arc::clone(&group[i]))
            .collect();
        self.advance();
        self.produced += 1;
        Some(Schedule::new(sections))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.cursor.is_none() {
            return (0, Some(0));
        }
        match self.total {
            Some(total) => {
                let remaining = total - self.produced;
                (remaining, Some(remaining))
            }
            None => (0, None),
        }
    }
}
