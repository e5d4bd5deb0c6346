//! Documentation scoring
//!
//! # Scoring Formula
//!
//! ```text
//! score(entity) = Σ priority(role)  for every role in the catalog that applies
//!
//! grade = A  if score >= a
//!         B  if score >= b
//!         C  if score >  c
//!         U  otherwise
//! ```
//!
//! With the standard priority table a documented public root entity scores
//! `WithDoc (+4) + Public (+2) + InRoot (+3) + WithoutCodeExample (-1) = 8`.
//!
//! Every entity must resolve exactly one role from each mutually exclusive
//! group of the catalog. A violation is reported as an integrity warning and
//! the entity is still scored from whatever roles matched.

mod aggregate;

pub use aggregate::{ProjectAggregator, WeightedAverage};

use crate::entity::Entity;
use crate::models::{
    AppliedRole, EntityReport, Grade, GradeDistribution, IntegrityWarning, ProjectSummary,
};
use crate::roles::{Evidence, Role, RoleCatalog};
use serde::Deserialize;
use tracing::warn;

/// Score thresholds for each grade tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GradeThresholds {
    /// Minimum score for `A`
    #[serde(default = "default_a")]
    pub a: i32,
    /// Minimum score for `B`
    #[serde(default = "default_b")]
    pub b: i32,
    /// Scores above this are at least `C`; at or below it is `U`
    #[serde(default = "default_c")]
    pub c: i32,
}

impl Default for GradeThresholds {
    fn default() -> Self {
        Self {
            a: default_a(),
            b: default_b(),
            c: default_c(),
        }
    }
}

fn default_a() -> i32 {
    6
}
fn default_b() -> i32 {
    3
}
fn default_c() -> i32 {
    0
}

impl GradeThresholds {
    /// Thresholds must be strictly decreasing from `a` to `c`
    pub fn is_valid(&self) -> bool {
        self.a > self.b && self.b > self.c
    }

    pub fn grade(&self, score: f64) -> Grade {
        if score >= f64::from(self.a) {
            Grade::A
        } else if score >= f64::from(self.b) {
            Grade::B
        } else if score > f64::from(self.c) {
            Grade::C
        } else {
            Grade::U
        }
    }
}

/// Evaluates entities against a role catalog
#[derive(Debug, Clone)]
pub struct Scorer {
    catalog: RoleCatalog,
    thresholds: GradeThresholds,
}

impl Scorer {
    pub fn new(catalog: RoleCatalog, thresholds: GradeThresholds) -> Self {
        let thresholds = if thresholds.is_valid() {
            thresholds
        } else {
            warn!(
                "Grade thresholds a={} b={} c={} are not strictly decreasing, using defaults",
                thresholds.a, thresholds.b, thresholds.c
            );
            GradeThresholds::default()
        };
        Self {
            catalog,
            thresholds,
        }
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    pub fn thresholds(&self) -> &GradeThresholds {
        &self.thresholds
    }

    /// Sum of priorities of all applicable roles
    pub fn score(&self, entity: &Entity) -> i32 {
        total(self.catalog.applicable(entity))
    }

    /// Score, grade and snapshot one linked entity.
    ///
    /// Returns group violations alongside the report; they never prevent
    /// scoring.
    pub fn evaluate(&self, entity: &Entity) -> (EntityReport, Vec<IntegrityWarning>) {
        let applied: Vec<&Role> = self.catalog.applicable(entity).collect();
        let warnings = self.check_groups(entity, &applied);

        let score = total(applied.iter().copied());
        let report = EntityReport {
            name: entity.name().to_string(),
            full_name: entity.full_name().to_string(),
            parent_full_name: entity.parent_full_name().map(str::to_string),
            children_full_names: entity.children_full_names().to_vec(),
            depth: entity.depth(),
            visibility: entity.visibility(),
            kind: entity.kind(),
            parameters: entity.parameters(),
            source_locations: entity.source_locations(),
            undocumented: entity.is_undocumented(),
            nodoc: entity.is_nodoc(),
            code_examples: entity.docstring().code_example_count(),
            return_mentioned: entity.return_mentioned(),
            return_described: entity.return_described(),
            roles: applied
                .iter()
                .map(|r| AppliedRole {
                    name: r.name().to_string(),
                    priority: r.priority(),
                })
                .collect(),
            suggestions: applied
                .iter()
                .filter(|r| r.evidence() == Evidence::Missing)
                .map(|r| r.name().to_string())
                .collect(),
            score,
            grade: self.thresholds.grade(f64::from(score)),
        };

        (report, warnings)
    }

    fn check_groups(&self, entity: &Entity, applied: &[&Role]) -> Vec<IntegrityWarning> {
        self.catalog
            .groups()
            .into_iter()
            .filter_map(|group| {
                let matched: Vec<String> = applied
                    .iter()
                    .filter(|r| r.group() == Some(group))
                    .map(|r| r.name().to_string())
                    .collect();
                if matched.len() == 1 {
                    return None;
                }
                warn!(
                    "{} resolved {} roles in group {}",
                    entity.full_name(),
                    matched.len(),
                    group.name()
                );
                Some(IntegrityWarning::RoleGroupViolation {
                    full_name: entity.full_name().to_string(),
                    group: group.name().to_string(),
                    matched,
                })
            })
            .collect()
    }

    /// Project rollup of already evaluated entities
    pub fn summarize(
        &self,
        reports: &[EntityReport],
        aggregator: &dyn ProjectAggregator,
    ) -> ProjectSummary {
        let score = aggregator.aggregate(reports);
        ProjectSummary {
            score,
            grade: self.thresholds.grade(score),
            entity_count: reports.len(),
            distribution: GradeDistribution::from_reports(reports),
        }
    }
}

/// Sum of role priorities, clamped to the `i32` range
fn total<'a>(roles: impl IntoIterator<Item = &'a Role>) -> i32 {
    let sum: i64 = roles.into_iter().map(|r| i64::from(r.priority())).sum();
    sum.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(RoleCatalog::default(), GradeThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::tests::TestObject;
    use crate::models::Visibility;
    use crate::roles::{PriorityTable, RoleGroup, RoleKind};

    #[test]
    fn test_grade_thresholds() {
        let t = GradeThresholds::default();
        assert_eq!(t.grade(10.0), Grade::A);
        assert_eq!(t.grade(6.0), Grade::A);
        assert_eq!(t.grade(5.9), Grade::B);
        assert_eq!(t.grade(3.0), Grade::B);
        assert_eq!(t.grade(1.0), Grade::C);
        assert_eq!(t.grade(0.0), Grade::U);
        assert_eq!(t.grade(-7.0), Grade::U);
    }

    #[test]
    fn test_grade_is_monotonic() {
        let t = GradeThresholds::default();
        let mut last = Grade::U;
        for s in -20..20 {
            let g = t.grade(f64::from(s));
            assert!(g >= last);
            last = g;
        }
    }

    #[test]
    fn test_invalid_thresholds_fall_back() {
        let scorer = Scorer::new(RoleCatalog::default(), GradeThresholds { a: 1, b: 5, c: 0 });
        assert_eq!(*scorer.thresholds(), GradeThresholds::default());
    }

    #[test]
    fn test_documented_public_root_score() {
        let e = TestObject::new("Foo")
            .with_comment("Does X.")
            .with_access(Visibility::Public)
            .entity();
        let (report, warnings) = Scorer::default().evaluate(&e);
        assert!(warnings.is_empty());
        // WithDoc 4 + InRoot 3 + Public 2 + WithoutCodeExample -1
        assert_eq!(report.score, 8);
        assert_eq!(report.grade, Grade::A);
        assert_eq!(report.suggestions, vec!["WithoutCodeExample".to_string()]);
    }

    #[test]
    fn test_suppressed_member_score() {
        let e = TestObject::new("Foo.bar").suppressed().entity();
        let (report, _) = Scorer::default().evaluate(&e);
        // WithoutDoc -4 + TaggedAsNodoc -5 + Public 2 + WithoutCodeExample -1
        assert_eq!(report.score, -8);
        assert_eq!(report.grade, Grade::U);
        assert!(report.nodoc);
        assert!(report.undocumented);
    }

    #[test]
    fn test_private_documented_member() {
        let e = TestObject::new("Foo._bar").with_comment("doc").entity();
        let (report, _) = Scorer::default().evaluate(&e);
        let names: Vec<_> = report.roles.iter().map(|r| r.name.as_str()).collect();
        assert!(names.contains(&"Private"));
        assert!(names.contains(&"WithDoc"));
        // 4 - 2 - 1
        assert_eq!(report.score, 1);
        assert_eq!(report.visibility, Visibility::Private);
    }

    #[test]
    fn test_missing_group_member_is_flagged() {
        let catalog = RoleCatalog::default().without(RoleKind::WithoutDoc);
        let scorer = Scorer::new(catalog, GradeThresholds::default());
        let e = TestObject::new("Foo.bar").entity();

        let (report, warnings) = scorer.evaluate(&e);
        assert_eq!(
            warnings,
            vec![IntegrityWarning::RoleGroupViolation {
                full_name: "Foo.bar".into(),
                group: "documentation".into(),
                matched: vec![],
            }]
        );
        // Public 2 + WithoutCodeExample -1, nothing from the documentation group
        assert_eq!(report.score, 1);
    }

    #[test]
    fn test_multiple_group_members_are_flagged() {
        let mut roles = RoleCatalog::default()
            .without(RoleKind::Protected)
            .roles()
            .to_vec();
        roles.push(Role::new(
            RoleKind::Protected,
            Some(RoleGroup::Visibility),
            Evidence::Present,
            1,
            |_| true,
        ));
        let scorer = Scorer::new(RoleCatalog::from_roles(roles), GradeThresholds::default());
        let e = TestObject::new("Foo.bar").entity();

        let (report, warnings) = scorer.evaluate(&e);
        assert_eq!(
            warnings,
            vec![IntegrityWarning::RoleGroupViolation {
                full_name: "Foo.bar".into(),
                group: "visibility".into(),
                matched: vec!["Public".into(), "Protected".into()],
            }]
        );
        // WithoutDoc -4 + Public 2 + Protected 1 + WithoutCodeExample -1
        assert_eq!(report.score, -2);
        assert_eq!(scorer.score(&e), -2);
    }

    #[test]
    fn test_extreme_priorities_saturate() {
        let e = TestObject::new("Foo").with_comment("Does X.").entity();

        let mut table = PriorityTable::standard();
        table.set(RoleKind::WithDoc, i32::MAX);
        let scorer = Scorer::new(RoleCatalog::standard(&table), GradeThresholds::default());
        let (report, _) = scorer.evaluate(&e);
        assert_eq!(report.score, i32::MAX);
        assert_eq!(report.grade, Grade::A);
        assert_eq!(scorer.score(&e), i32::MAX);

        let mut table = PriorityTable::standard();
        table.set(RoleKind::InRoot, i32::MIN);
        table.set(RoleKind::Public, i32::MIN);
        let scorer = Scorer::new(RoleCatalog::standard(&table), GradeThresholds::default());
        let (report, _) = scorer.evaluate(&e);
        assert_eq!(report.score, i32::MIN);
        assert_eq!(report.grade, Grade::U);
    }

    #[test]
    fn test_score_matches_evaluate() {
        let scorer = Scorer::default();
        let e = TestObject::new("A.b").with_comment("x\n@example\ny()").entity();
        assert_eq!(scorer.score(&e), scorer.evaluate(&e).0.score);
    }

    #[test]
    fn test_summarize() {
        let scorer = Scorer::default();
        let reports: Vec<EntityReport> = [
            TestObject::new("Foo").with_comment("Does X.").entity(),
            TestObject::new("Foo.bar").entity(),
        ]
        .iter()
        .map(|e| scorer.evaluate(e).0)
        .collect();

        let summary = scorer.summarize(&reports, &WeightedAverage::default());
        // (8*1 + (-4 + 2 - 1)*2) / 3 = 2/3
        assert!((summary.score - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.grade, Grade::C);
        assert_eq!(summary.entity_count, 2);
        assert_eq!(summary.distribution.a, 1);
        assert_eq!(summary.distribution.u, 1);
    }
}
