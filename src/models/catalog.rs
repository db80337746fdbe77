//! Section catalog.
//!
//! The catalog partitions sections into groups of mutually-exclusive
//! alternatives. Groups keep first-seen order of their key and sections
//! keep input row order, which makes combination order reproducible.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::{GroupBy, Section, SectionRecord};

/// Alternatives sharing one group key.
#[derive(Debug, Clone, Serialize)]
pub struct SectionGroup {
    key: String,
    sections: Vec<Arc<Section>>,
}

impl SectionGroup {
    fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            sections: Vec::new(),
        }
    }

    /// Group key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Alternatives in input order.
    pub fn sections(&self) -> &[Arc<Section>] {
        &self.sections
    }

    /// Number of alternatives.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the group has no eligible alternative.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// All sections of a run, grouped by key.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    groups: Vec<SectionGroup>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Creates an empty catalog (no groups).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from raw records.
    ///
    /// Every record registers its group key, but only records with
    /// `include == true` become alternatives. A group whose records are
    /// all excluded therefore stays empty and yields no combinations.
    pub fn from_records(records: &[SectionRecord], group_by: GroupBy) -> Self {
        let mut catalog = Self::new();
        for record in records {
            let slot = catalog.slot(record.group_key(group_by));
            if record.include {
                let section = Section::from_record(record, group_by);
                catalog.groups[slot].sections.push(Arc::new(section));
            } else {
                debug!(section = %record.title, "section excluded by include flag");
            }
        }
        for group in catalog.groups.iter().filter(|g| g.is_empty()) {
            warn!(group = %group.key, "group has no eligible sections");
        }
        catalog
    }

    /// Adds a section to its group.
    pub fn with_section(mut self, section: Section) -> Self {
        let slot = self.slot(section.group_key());
        self.groups[slot].sections.push(Arc::new(section));
        self
    }

    /// Registers a group without alternatives.
    pub fn with_empty_group(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.slot(&key);
        self
    }

    fn slot(&mut self, key: &str) -> usize {
        if let Some(&i) = self.index.get(key) {
            return i;
        }
        let i = self.groups.len();
        self.groups.push(SectionGroup::new(key));
        self.index.insert(key.to_string(), i);
        i
    }

    /// Groups in first-seen order.
    pub fn groups(&self) -> &[SectionGroup] {
        &self.groups
    }

    /// Looks up a group by key.
    pub fn group(&self, key: &str) -> Option<&SectionGroup> {
        self.index.get(key).map(|&i| &self.groups[i])
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of eligible sections across all groups.
    pub fn section_count(&self) -> usize {
        self.groups.iter().map(SectionGroup::len).sum()
    }

    /// Whether the catalog has no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Size of the full cartesian product (saturating).
    pub fn combination_count(&self) -> usize {
        self.groups
            .iter()
            .fold(1usize, |acc, g| acc.saturating_mul(g.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weekday::*;

    fn sample_records() -> Vec<SectionRecord> {
        vec![
            SectionRecord::new("MATH101").with_lecture(&[Mon], 900, 1000),
            SectionRecord::new("PHYS101").with_lecture(&[Mon], 900, 1000),
            SectionRecord::new("MATH101").with_lecture(&[Tue], 900, 1000),
            SectionRecord::new("CHEM110").with_lecture(&[Wed], 1300, 1400),
            SectionRecord::new("PHYS101").with_lecture(&[Fri], 900, 1000),
        ]
    }

    #[test]
    fn test_first_seen_group_order() {
        let catalog = Catalog::from_records(&sample_records(), GroupBy::Title);
        let keys: Vec<&str> = catalog.groups().iter().map(|g| g.key()).collect();
        assert_eq!(keys, vec!["MATH101", "PHYS101", "CHEM110"]);
        assert_eq!(catalog.group_count(), 3);
        assert_eq!(catalog.section_count(), 5);
        assert_eq!(catalog.combination_count(), 4);
    }

    #[test]
    fn test_alternatives_keep_row_order() {
        let catalog = Catalog::from_records(&sample_records(), GroupBy::Title);
        let math = catalog.group("MATH101").unwrap();
        assert_eq!(math.len(), 2);
        assert!(math.sections()[0].lecture().days().contains(Mon));
        assert!(math.sections()[1].lecture().days().contains(Tue));
    }

    #[test]
    fn test_me_group_partition() {
        let records = vec![
            SectionRecord::new("CS101").with_me_group("intro"),
            SectionRecord::new("CS102").with_me_group("intro"),
            SectionRecord::new("ENG101").with_me_group("writing"),
        ];
        let catalog = Catalog::from_records(&records, GroupBy::MeGroup);
        assert_eq!(catalog.group_count(), 2);
        assert_eq!(catalog.group("intro").unwrap().len(), 2);
        assert_eq!(catalog.combination_count(), 2);
    }

    #[test]
    fn test_excluded_rows_leave_empty_group() {
        let records = vec![
            SectionRecord::new("MATH101"),
            SectionRecord::new("ART100").with_include(false),
        ];
        let catalog = Catalog::from_records(&records, GroupBy::Title);
        assert_eq!(catalog.group_count(), 2);
        assert!(catalog.group("ART100").unwrap().is_empty());
        assert_eq!(catalog.combination_count(), 0);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.combination_count(), 1);
    }

    #[test]
    fn test_builder() {
        use crate::models::{DayPattern, TimeWindow};
        let absent = TimeWindow::absent(DayPattern::NONE);
        let catalog = Catalog::new()
            .with_section(Section::new("A", "A", absent, absent))
            .with_section(Section::new("A2", "A", absent, absent))
            .with_empty_group("B");
        assert_eq!(catalog.group("A").unwrap().len(), 2);
        assert!(catalog.group("B").unwrap().is_empty());
        assert!(catalog.group("C").is_none());
    }
}
