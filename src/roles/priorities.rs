//! Priority table: the signed weight each role contributes
//!
//! Kept as data so the grading policy can be tuned from config without
//! touching any predicate.

use super::RoleKind;
use std::collections::BTreeMap;
use tracing::warn;

/// Weight used for roles without an explicit entry
pub const DEFAULT_PRIORITY: i32 = 0;

/// Roles whose standard weight yields to a configured default priority
const DEFAULT_WEIGHTED: [RoleKind; 4] = [
    RoleKind::WithDoc,
    RoleKind::WithoutDoc,
    RoleKind::WithCodeExample,
    RoleKind::WithoutCodeExample,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityTable {
    default: i32,
    entries: BTreeMap<RoleKind, i32>,
}

impl Default for PriorityTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl PriorityTable {
    /// Table with no entries: every role weighs `default`
    pub fn empty(default: i32) -> Self {
        Self {
            default,
            entries: BTreeMap::new(),
        }
    }

    /// The built-in grading policy
    pub fn standard() -> Self {
        let mut table = Self::empty(DEFAULT_PRIORITY);
        table.set(RoleKind::WithDoc, 4);
        table.set(RoleKind::WithoutDoc, -4);
        table.set(RoleKind::TaggedAsNodoc, -5);
        table.set(RoleKind::InRoot, 3);
        table.set(RoleKind::Public, 2);
        table.set(RoleKind::Protected, 1);
        table.set(RoleKind::Private, -2);
        table.set(RoleKind::WithCodeExample, 1);
        table.set(RoleKind::WithoutCodeExample, -1);
        table
    }

    pub fn set(&mut self, kind: RoleKind, priority: i32) {
        self.entries.insert(kind, priority);
    }

    pub fn get(&self, kind: RoleKind) -> i32 {
        self.entries.get(&kind).copied().unwrap_or(self.default)
    }

    pub fn default_priority(&self) -> i32 {
        self.default
    }

    /// Apply overrides keyed by role name (`WithDoc`, `with_doc`, `with-doc`).
    ///
    /// A `default` replaces the standard weights of the documentation and
    /// code-example roles; named overrides still win over it. Unknown names
    /// are logged and returned.
    pub fn apply_overrides<'a, I>(&mut self, default: Option<i32>, overrides: I) -> Vec<String>
    where
        I: IntoIterator<Item = (&'a String, &'a i32)>,
    {
        if let Some(d) = default {
            self.default = d;
            for kind in DEFAULT_WEIGHTED {
                self.entries.remove(&kind);
            }
        }

        let mut unknown = Vec::new();
        for (name, &priority) in overrides {
            match RoleKind::from_name(name) {
                Some(kind) => self.set(kind, priority),
                None => {
                    warn!("Ignoring priority for unknown role `{}`", name);
                    unknown.push(name.clone());
                }
            }
        }
        unknown.sort();
        unknown
    }
}

/// Normalize a role name to kebab-case for lookup
///
/// `WithDoc` -> `with-doc`, `tagged_as_nodoc` -> `tagged-as-nodoc`
pub fn normalize_role_name(name: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = name.trim().chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_is_lower = i > 0 && chars[i - 1].is_lowercase();
            let is_acronym_end = i > 0
                && chars[i - 1].is_uppercase()
                && i + 1 < chars.len()
                && chars[i + 1].is_lowercase();

            if prev_is_lower || is_acronym_end {
                result.push('-');
            }
            result.push(c.to_lowercase().next().unwrap_or(*c));
        } else if *c == '_' || *c == ' ' {
            result.push('-');
        } else {
            result.push(*c);
        }
    }

    result
}
