//! Grading pipeline
//!
//! Runs one evaluation pass over an extractor's output:
//! 1. Split the input into raw records (provider)
//! 2. Build code objects from records, in parallel
//! 3. Register entities in load order, dropping duplicate full names
//! 4. Link the hierarchy (barrier: all entities must be loaded)
//! 5. Evaluate roles and score every entity, in parallel
//! 6. Aggregate the project score
//!
//! Record-level problems never abort a run. They are collected as
//! [`IntegrityWarning`]s on the returned [`Evaluation`].

use crate::entity::jsdoc::JsDocProvider;
use crate::entity::{Entity, EntityRegistry, Provider, ProviderError};
use crate::hierarchy;
use crate::models::{Evaluation, IntegrityWarning};
use crate::scoring::{ProjectAggregator, Scorer, WeightedAverage};
use rayon::prelude::*;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Full grading pipeline.
pub struct Pipeline {
    provider: Box<dyn Provider>,
    scorer: Scorer,
    aggregator: Box<dyn ProjectAggregator>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Box::new(JsDocProvider::new()))
    }
}

impl Pipeline {
    /// Create a pipeline with the standard scorer and aggregation.
    pub fn new(provider: Box<dyn Provider>) -> Self {
        Self {
            provider,
            scorer: Scorer::default(),
            aggregator: Box::new(WeightedAverage::default()),
        }
    }

    /// Use a custom scorer (role catalog and grade thresholds).
    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Use a custom project aggregation policy.
    pub fn with_aggregator(mut self, aggregator: Box<dyn ProjectAggregator>) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Parse the extractor output and evaluate it.
    ///
    /// Fails only when the document as a whole is unreadable.
    pub fn run_input(&self, input: &str) -> Result<Evaluation, ProviderError> {
        let records = self.provider.parse_input(input)?;
        Ok(self.run(&records))
    }

    /// Evaluate already split raw records.
    pub fn run(&self, records: &[Value]) -> Evaluation {
        let start = Instant::now();
        let mut stats = RunStats {
            records: records.len(),
            ..Default::default()
        };
        let mut warnings = Vec::new();

        let mut registry = self.load(records, &mut stats, &mut warnings);

        let link = hierarchy::link(&mut registry);
        stats.orphans = link.orphans.len();
        warnings.extend(link.orphans);

        let evaluated: Vec<_> = registry
            .entities()
            .par_iter()
            .map(|entity| self.scorer.evaluate(entity))
            .collect();

        let mut entities = Vec::with_capacity(evaluated.len());
        for (report, group_warnings) in evaluated {
            stats.violations += group_warnings.len();
            warnings.extend(group_warnings);
            entities.push(report);
        }

        let project = self.scorer.summarize(&entities, self.aggregator.as_ref());
        stats.entities = entities.len();

        info!(
            "Graded {} ({}) in {:?}: project {:.2} ({})",
            stats.summary(),
            self.aggregator.name(),
            start.elapsed(),
            project.score,
            project.grade
        );

        Evaluation {
            entities,
            project,
            warnings,
            skipped: stats.skipped,
        }
    }

    /// Build entities in parallel, then register them in input order.
    fn load(
        &self,
        records: &[Value],
        stats: &mut RunStats,
        warnings: &mut Vec<IntegrityWarning>,
    ) -> EntityRegistry {
        let built: Vec<_> = records
            .par_iter()
            .map(|record| self.provider.parse_record(record).map(Entity::new))
            .collect();

        let mut registry = EntityRegistry::with_capacity(built.len());
        for (index, result) in built.into_iter().enumerate() {
            match result {
                Ok(entity) => {
                    if let Err(dup) = registry.insert(entity) {
                        warn!(
                            "Record #{} duplicates `{}`, keeping the first",
                            index,
                            dup.full_name()
                        );
                        stats.duplicates += 1;
                        warnings.push(IntegrityWarning::DuplicateFullName {
                            index,
                            full_name: dup.full_name().to_string(),
                        });
                    }
                }
                Err(e) => {
                    debug!("Skipping record #{}: {}", index, e);
                    stats.skipped += 1;
                    warnings.push(IntegrityWarning::SkippedRecord {
                        index,
                        reason: e.to_string(),
                    });
                }
            }
        }

        debug!(
            "Loaded {} entities from {} {} records",
            registry.len(),
            records.len(),
            self.provider.name()
        );
        registry
    }
}

/// Counters for one run.
#[derive(Default, Debug)]
struct RunStats {
    records: usize,
    entities: usize,
    skipped: usize,
    duplicates: usize,
    orphans: usize,
    violations: usize,
}

impl RunStats {
    fn summary(&self) -> String {
        let mut parts = vec![
            format!("{} records", self.records),
            format!("{} entities", self.entities),
        ];
        if self.skipped > 0 {
            parts.push(format!("{} skipped", self.skipped));
        }
        if self.duplicates > 0 {
            parts.push(format!("{} duplicates", self.duplicates));
        }
        if self.orphans > 0 {
            parts.push(format!("{} orphans", self.orphans));
        }
        if self.violations > 0 {
            parts.push(format!("{} role violations", self.violations));
        }
        parts.join(", ")
    }
}
