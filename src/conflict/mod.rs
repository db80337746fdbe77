//! Pairwise section conflict rules and checker.
//!
//! Two sections can share a schedule only if no conflict rule fires for
//! the pair. Rules are small, pure predicates composed by a
//! [`ConflictChecker`].
//!
//! # Usage
//!
//! ```
//! use u_timetable::conflict::{rules, ConflictChecker};
//!
//! // Default: duplicate titles and overlapping meetings both conflict.
//! let standard = ConflictChecker::default();
//! assert_eq!(standard.rule_names(), vec!["DuplicateTitle", "MeetingOverlap"]);
//!
//! // Time overlap only.
//! let relaxed = ConflictChecker::new().with_rule(rules::MeetingOverlap);
//! assert_eq!(relaxed.len(), 1);
//! ```

pub mod rules;

use std::fmt::Debug;
use std::sync::Arc;

use crate::models::Section;

/// A pairwise conflict predicate.
///
/// Implementations must be symmetric: `conflicts(a, b) == conflicts(b, a)`.
pub trait ConflictRule: Send + Sync + Debug {
    /// Rule name (e.g., "MeetingOverlap").
    fn name(&self) -> &'static str;

    /// Whether `a` and `b` cannot appear in the same schedule.
    fn conflicts(&self, a: &Section, b: &Section) -> bool;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Composes conflict rules; a pair conflicts if any rule fires.
#[derive(Debug, Clone)]
pub struct ConflictChecker {
    rules: Vec<Arc<dyn ConflictRule>>,
}

impl ConflictChecker {
    /// Creates a checker with no rules (nothing conflicts).
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The standard rule set: [`rules::DuplicateTitle`] then
    /// [`rules::MeetingOverlap`].
    pub fn standard() -> Self {
        Self::new()
            .with_rule(rules::DuplicateTitle)
            .with_rule(rules::MeetingOverlap)
    }

    /// Standard rules, optionally without the duplicate-title rule.
    pub fn with_duplicate_titles(allow_duplicate_titles: bool) -> Self {
        if allow_duplicate_titles {
            Self::new().with_rule(rules::MeetingOverlap)
        } else {
            Self::standard()
        }
    }

    /// Appends a rule.
    pub fn with_rule<R: ConflictRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Whether any rule fires for the pair.
    pub fn conflicts(&self, a: &Section, b: &Section) -> bool {
        self.rules.iter().any(|r| r.conflicts(a, b))
    }

    /// First rule that fires for the pair.
    pub fn first_rule(&self, a: &Section, b: &Section) -> Option<&dyn ConflictRule> {
        self.rules
            .iter()
            .find(|r| r.conflicts(a, b))
            .map(|r| r.as_ref())
    }

    /// Name of the first rule that fires for the pair.
    pub fn explain(&self, a: &Section, b: &Section) -> Option<&'static str> {
        self.first_rule(a, b).map(|r| r.name())
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rule is configured.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for ConflictChecker {
    fn default() -> Self {
        Self::standard()
    }
}

/// Whether two sections conflict under the standard rules.
pub fn conflicts(a: &Section, b: &Section) -> bool {
    rules::DuplicateTitle.conflicts(a, b) || rules::MeetingOverlap.conflicts(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weekday::*;
    use crate::models::{GroupBy, SectionRecord};

    fn section(rec: SectionRecord) -> Section {
        Section::from_record(&rec, GroupBy::Title)
    }

    #[derive(Debug)]
    struct Always;

    impl ConflictRule for Always {
        fn name(&self) -> &'static str {
            "Always"
        }

        fn conflicts(&self, _a: &Section, _b: &Section) -> bool {
            true
        }
    }

    #[test]
    fn test_section_conflicts_with_itself() {
        let a = section(SectionRecord::new("MATH101").with_lecture(&[Mon], 900, 1000));
        assert!(conflicts(&a, &a));

        let online = section(SectionRecord::new("ONLINE"));
        assert!(conflicts(&online, &online));
    }

    #[test]
    fn test_disjoint_days_never_conflict() {
        let a = section(
            SectionRecord::new("A")
                .with_lecture(&[Mon, Wed], 900, 1000)
                .with_lab(&[Fri], 1300, 1600),
        );
        let b = section(
            SectionRecord::new("B")
                .with_lecture(&[Tue, Thu], 900, 1000)
                .with_lab(&[Tue], 1300, 1600),
        );
        assert!(!conflicts(&a, &b));
        assert!(!conflicts(&b, &a));
    }

    #[test]
    fn test_empty_checker_accepts_everything() {
        let a = section(SectionRecord::new("A").with_lecture(&[Mon], 900, 1000));
        let checker = ConflictChecker::new();
        assert!(checker.is_empty());
        assert!(!checker.conflicts(&a, &a));
        assert_eq!(checker.explain(&a, &a), None);
    }

    #[test]
    fn test_explain_reports_first_rule() {
        let a = section(SectionRecord::new("A").with_lecture(&[Mon], 900, 1000));
        let b = section(SectionRecord::new("A").with_lecture(&[Mon], 930, 1030));
        let checker = ConflictChecker::default();
        assert_eq!(checker.explain(&a, &b), Some("DuplicateTitle"));

        let rule = checker.first_rule(&a, &b).unwrap();
        assert_eq!(rule.description(), "Sections share a course title");

        let custom = ConflictChecker::new().with_rule(Always);
        assert_eq!(
            custom.first_rule(&a, &b).map(|r| r.description()),
            Some("Always")
        );
        assert_eq!(custom.explain(&a, &b), Some("Always"));
        assert_eq!(custom.rule_names(), vec!["Always"]);
    }

    #[test]
    fn test_allow_duplicate_titles() {
        let a = section(SectionRecord::new("LAB").with_lab(&[Mon], 900, 1000));
        let b = section(SectionRecord::new("LAB").with_lab(&[Tue], 900, 1000));
        assert!(ConflictChecker::with_duplicate_titles(false).conflicts(&a, &b));
        assert!(!ConflictChecker::with_duplicate_titles(true).conflicts(&a, &b));
    }
}
