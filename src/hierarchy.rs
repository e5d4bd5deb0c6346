//! Hierarchy builder
//!
//! Resolves every entity's parent and fills in the children lists. Runs once,
//! after all records are loaded and before any role is evaluated.
//!
//! Parent resolution runs in parallel (it only reads each entity). Appending
//! children is a single-threaded reduction in load order, so every parent
//! sees its children in input order.

use crate::entity::EntityRegistry;
use crate::models::IntegrityWarning;
use rayon::prelude::*;
use tracing::{debug, warn};

/// Outcome of linking a registry
#[derive(Debug, Default)]
pub struct LinkStats {
    /// Entities whose parent resolved to a loaded entity
    pub linked: usize,
    /// Root entities (no parent)
    pub roots: usize,
    /// Entities with a parent reference that does not resolve
    pub orphans: Vec<IntegrityWarning>,
}

/// Resolve parents and populate children lists for the whole registry
pub fn link(registry: &mut EntityRegistry) -> LinkStats {
    let parents: Vec<Option<String>> = registry
        .entities()
        .par_iter()
        .map(|e| e.resolve_parent())
        .collect();

    let mut stats = LinkStats::default();
    // (parent index, child full name) in load order
    let mut edges: Vec<(usize, String)> = Vec::new();

    for (entity, parent) in registry.entities().iter().zip(&parents) {
        let Some(parent) = parent else {
            stats.roots += 1;
            continue;
        };

        match registry.position(parent) {
            Some(idx) if parent != entity.full_name() => {
                edges.push((idx, entity.full_name().to_string()));
                stats.linked += 1;
            }
            _ => {
                debug!("{} has unresolved parent {}", entity.full_name(), parent);
                stats.orphans.push(IntegrityWarning::OrphanedEntity {
                    full_name: entity.full_name().to_string(),
                    parent_full_name: parent.clone(),
                });
            }
        }
    }

    let entities = registry.entities_mut();
    for (entity, parent) in entities.iter_mut().zip(parents) {
        entity.parent_full_name = parent;
        entity.children_full_names.clear();
    }
    for (idx, child) in edges {
        entities[idx].children_full_names.push(child);
    }

    if !stats.orphans.is_empty() {
        warn!(
            "{} entities reference a parent that was not loaded",
            stats.orphans.len()
        );
    }
    debug!(
        "Linked hierarchy: {} roots, {} linked, {} orphans",
        stats.roots,
        stats.linked,
        stats.orphans.len()
    );

    stats
}
