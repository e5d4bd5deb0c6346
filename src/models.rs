//! Core data models for docgrade
//!
//! These models are shared by the entity layer, the role catalog, the scorer
//! and the reporters.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Visibility of a code entity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// Parse an access keyword (`public`, `protected`, `private`), case-insensitive
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "public" => Some(Visibility::Public),
            "protected" => Some(Visibility::Protected),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

/// Where an entity is declared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: PathBuf,
    #[serde(default)]
    pub line: Option<u32>,
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.file.display(), line),
            None => write!(f, "{}", self.file.display()),
        }
    }
}

/// A declared parameter of a function or method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// A `@param` tag names this parameter
    #[serde(default)]
    pub mentioned: bool,
    /// The `@param` tag carries description text
    #[serde(default)]
    pub described: bool,
}

/// Kind flags a provider may set for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KindFlags {
    #[serde(default)]
    pub method: bool,
    #[serde(default)]
    pub constructor: bool,
    #[serde(default)]
    pub constant: bool,
    #[serde(default)]
    pub namespace: bool,
}

/// Documentation grade tiers, ordered worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// Undocumented tier
    U,
    C,
    B,
    A,
}

impl Grade {
    /// All grades, best first
    pub const ALL: [Grade; 4] = [Grade::A, Grade::B, Grade::C, Grade::U];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "A" => Some(Grade::A),
            "B" => Some(Grade::B),
            "C" => Some(Grade::C),
            "U" => Some(Grade::U),
            _ => None,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::U => write!(f, "U"),
        }
    }
}

/// Recoverable data problems found during a run.
///
/// None of these abort the run; they are collected and reported next to the
/// evaluation results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityWarning {
    /// A raw record could not be turned into an entity
    SkippedRecord { index: usize, reason: String },
    /// A second record claimed an already loaded full name
    DuplicateFullName { index: usize, full_name: String },
    /// The entity's parent is not part of the loaded set
    OrphanedEntity {
        full_name: String,
        parent_full_name: String,
    },
    /// Zero or several roles of a mutually exclusive group matched
    RoleGroupViolation {
        full_name: String,
        group: String,
        matched: Vec<String>,
    },
}

impl std::fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntegrityWarning::SkippedRecord { index, reason } => {
                write!(f, "record #{index} skipped: {reason}")
            }
            IntegrityWarning::DuplicateFullName { index, full_name } => {
                write!(f, "record #{index} duplicates `{full_name}`")
            }
            IntegrityWarning::OrphanedEntity {
                full_name,
                parent_full_name,
            } => write!(
                f,
                "`{full_name}` references missing parent `{parent_full_name}`"
            ),
            IntegrityWarning::RoleGroupViolation {
                full_name,
                group,
                matched,
            } => {
                if matched.is_empty() {
                    write!(f, "`{full_name}` matched no {group} role")
                } else {
                    write!(
                        f,
                        "`{full_name}` matched several {group} roles: {}",
                        matched.join(", ")
                    )
                }
            }
        }
    }
}

/// A role that applied to an entity, with the weight it contributed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedRole {
    pub name: String,
    pub priority: i32,
}

/// Snapshot of one evaluated entity
#[derive(Debug, Clone, Serialize)]
pub struct EntityReport {
    pub name: String,
    pub full_name: String,
    pub parent_full_name: Option<String>,
    pub children_full_names: Vec<String>,
    pub depth: usize,
    pub visibility: Visibility,
    pub kind: KindFlags,
    pub parameters: Vec<Parameter>,
    pub source_locations: Vec<SourceLocation>,
    pub undocumented: bool,
    pub nodoc: bool,
    pub code_examples: usize,
    pub return_mentioned: bool,
    pub return_described: bool,
    pub roles: Vec<AppliedRole>,
    /// "Missing" roles that applied: things the docs could add
    pub suggestions: Vec<String>,
    pub score: i32,
    pub grade: Grade,
}

/// Count of entities per grade
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GradeDistribution {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub u: usize,
}

impl GradeDistribution {
    pub fn from_reports(reports: &[EntityReport]) -> Self {
        let mut dist = Self::default();
        for r in reports {
            match r.grade {
                Grade::A => dist.a += 1,
                Grade::B => dist.b += 1,
                Grade::C => dist.c += 1,
                Grade::U => dist.u += 1,
            }
        }
        dist
    }

    pub fn count(&self, grade: Grade) -> usize {
        match grade {
            Grade::A => self.a,
            Grade::B => self.b,
            Grade::C => self.c,
            Grade::U => self.u,
        }
    }

    pub fn total(&self) -> usize {
        self.a + self.b + self.c + self.u
    }
}

/// Project-level rollup
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub score: f64,
    pub grade: Grade,
    pub entity_count: usize,
    pub distribution: GradeDistribution,
}

/// Full output of one evaluation pass
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub entities: Vec<EntityReport>,
    pub project: ProjectSummary,
    pub warnings: Vec<IntegrityWarning>,
    /// Number of raw records that produced no entity
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_ordering() {
        assert!(Grade::A > Grade::B);
        assert!(Grade::B > Grade::C);
        assert!(Grade::C > Grade::U);
    }

    #[test]
    fn test_grade_parse() {
        assert_eq!(Grade::parse("a"), Some(Grade::A));
        assert_eq!(Grade::parse(" U "), Some(Grade::U));
        assert_eq!(Grade::parse("F"), None);
    }

    #[test]
    fn test_visibility_parse() {
        assert_eq!(Visibility::parse("Private"), Some(Visibility::Private));
        assert_eq!(Visibility::parse("protected"), Some(Visibility::Protected));
        assert_eq!(Visibility::parse("package"), None);
    }

    #[test]
    fn test_warning_display() {
        let w = IntegrityWarning::RoleGroupViolation {
            full_name: "Foo".into(),
            group: "documentation".into(),
            matched: vec![],
        };
        assert_eq!(w.to_string(), "`Foo` matched no documentation role");
    }
}
