//! Role catalog
//!
//! A role is a named predicate over an [`Entity`] with a signed priority.
//! Roles come in two families: evidence that something is present
//! ("has a docstring") and evidence that something is missing ("lacks a
//! docstring"). Complementary roles share a group; exactly one member of each
//! group is expected to apply to any entity.
//!
//! | role | group | family |
//! |---|---|---|
//! | `WithDoc` / `WithoutDoc` | documentation | present / missing |
//! | `Public` / `Protected` / `Private` | visibility | present |
//! | `WithCodeExample` / `WithoutCodeExample` | code-example | present / missing |
//! | `TaggedAsNodoc` | - | present |
//! | `InRoot` | - | present |

mod priorities;

pub use priorities::{normalize_role_name, PriorityTable, DEFAULT_PRIORITY};

use crate::entity::Entity;
use serde::Serialize;

/// Identifier of a role in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RoleKind {
    WithDoc,
    WithoutDoc,
    TaggedAsNodoc,
    InRoot,
    Public,
    Protected,
    Private,
    WithCodeExample,
    WithoutCodeExample,
}

impl RoleKind {
    pub const ALL: [RoleKind; 9] = [
        RoleKind::WithDoc,
        RoleKind::WithoutDoc,
        RoleKind::TaggedAsNodoc,
        RoleKind::InRoot,
        RoleKind::Public,
        RoleKind::Protected,
        RoleKind::Private,
        RoleKind::WithCodeExample,
        RoleKind::WithoutCodeExample,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RoleKind::WithDoc => "WithDoc",
            RoleKind::WithoutDoc => "WithoutDoc",
            RoleKind::TaggedAsNodoc => "TaggedAsNodoc",
            RoleKind::InRoot => "InRoot",
            RoleKind::Public => "Public",
            RoleKind::Protected => "Protected",
            RoleKind::Private => "Private",
            RoleKind::WithCodeExample => "WithCodeExample",
            RoleKind::WithoutCodeExample => "WithoutCodeExample",
        }
    }

    /// Look up a role by any spelling of its name
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize_role_name(name);
        Self::ALL
            .into_iter()
            .find(|k| normalize_role_name(k.name()) == wanted)
    }
}

impl std::fmt::Display for RoleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Mutually exclusive role groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RoleGroup {
    Documentation,
    Visibility,
    CodeExample,
}

impl RoleGroup {
    pub const ALL: [RoleGroup; 3] = [
        RoleGroup::Documentation,
        RoleGroup::Visibility,
        RoleGroup::CodeExample,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RoleGroup::Documentation => "documentation",
            RoleGroup::Visibility => "visibility",
            RoleGroup::CodeExample => "code-example",
        }
    }
}

/// Which family a role belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Evidence {
    /// Applies when a condition holds
    Present,
    /// Applies when a condition fails; doubles as a suggestion
    Missing,
}

pub type Predicate = fn(&Entity) -> bool;

/// One entry of the catalog
#[derive(Debug, Clone)]
pub struct Role {
    kind: RoleKind,
    group: Option<RoleGroup>,
    evidence: Evidence,
    priority: i32,
    predicate: Predicate,
}

impl Role {
    pub fn new(
        kind: RoleKind,
        group: Option<RoleGroup>,
        evidence: Evidence,
        priority: i32,
        predicate: Predicate,
    ) -> Self {
        Self {
            kind,
            group,
            evidence,
            priority,
            predicate,
        }
    }

    pub fn applies(&self, entity: &Entity) -> bool {
        (self.predicate)(entity)
    }

    pub fn kind(&self) -> RoleKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn group(&self) -> Option<RoleGroup> {
        self.group
    }

    pub fn evidence(&self) -> Evidence {
        self.evidence
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }
}

/// Ordered list of roles evaluated against every entity
#[derive(Debug, Clone)]
pub struct RoleCatalog {
    roles: Vec<Role>,
}

impl Default for RoleCatalog {
    fn default() -> Self {
        Self::standard(&PriorityTable::standard())
    }
}

impl RoleCatalog {
    /// The built-in catalog with weights taken from `table`
    pub fn standard(table: &PriorityTable) -> Self {
        use Evidence::{Missing, Present};
        use RoleGroup::{CodeExample, Documentation, Visibility};

        let role = |kind, group, evidence, predicate: Predicate| {
            Role::new(kind, group, evidence, table.get(kind), predicate)
        };

        Self::from_roles(vec![
            role(RoleKind::WithDoc, Some(Documentation), Present, |e| e.has_doc()),
            role(RoleKind::WithoutDoc, Some(Documentation), Missing, |e| {
                e.is_undocumented()
            }),
            role(RoleKind::TaggedAsNodoc, None, Present, |e| e.is_nodoc()),
            role(RoleKind::InRoot, None, Present, |e| e.in_root()),
            role(RoleKind::Public, Some(Visibility), Present, |e| e.is_public()),
            role(RoleKind::Protected, Some(Visibility), Present, |e| {
                e.is_protected()
            }),
            role(RoleKind::Private, Some(Visibility), Present, |e| e.is_private()),
            role(RoleKind::WithCodeExample, Some(CodeExample), Present, |e| {
                e.has_code_example()
            }),
            role(RoleKind::WithoutCodeExample, Some(CodeExample), Missing, |e| {
                !e.has_code_example()
            }),
        ])
    }

    pub fn from_roles(roles: Vec<Role>) -> Self {
        Self { roles }
    }

    /// Same catalog minus one role
    pub fn without(&self, kind: RoleKind) -> Self {
        Self::from_roles(
            self.roles
                .iter()
                .filter(|r| r.kind != kind)
                .cloned()
                .collect(),
        )
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn get(&self, kind: RoleKind) -> Option<&Role> {
        self.roles.iter().find(|r| r.kind == kind)
    }

    /// Groups that have at least one member in this catalog
    pub fn groups(&self) -> Vec<RoleGroup> {
        RoleGroup::ALL
            .into_iter()
            .filter(|g| self.roles.iter().any(|r| r.group == Some(*g)))
            .collect()
    }

    /// Roles that apply to `entity`, in catalog order
    pub fn applicable<'a>(&'a self, entity: &'a Entity) -> impl Iterator<Item = &'a Role> + 'a {
        self.roles.iter().filter(move |r| r.applies(entity))
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
