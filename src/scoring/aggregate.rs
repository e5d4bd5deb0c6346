//! Project-level aggregation policy
//!
//! Rolls per-entity scores up into one project score. The policy sits behind
//! [`ProjectAggregator`] so it can be swapped without touching role logic.

use crate::models::EntityReport;

/// Turns per-entity results into a single project score
pub trait ProjectAggregator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Project score for the given entity reports. Must return 0.0 when
    /// nothing is eligible.
    fn aggregate(&self, reports: &[EntityReport]) -> f64;
}

/// Weighted mean of entity scores.
///
/// Root entities are structurally easier to document, so non-root entities
/// weigh more by default. Suppressed (`nodoc`) entities are left out unless
/// `include_nodoc` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedAverage {
    pub root_weight: f64,
    pub member_weight: f64,
    pub include_nodoc: bool,
}

impl Default for WeightedAverage {
    fn default() -> Self {
        Self {
            root_weight: 1.0,
            member_weight: 2.0,
            include_nodoc: false,
        }
    }
}

impl ProjectAggregator for WeightedAverage {
    fn name(&self) -> &'static str {
        "weighted-average"
    }

    fn aggregate(&self, reports: &[EntityReport]) -> f64 {
        let (sum, weights) = reports
            .iter()
            .filter(|r| self.include_nodoc || !r.nodoc)
            .map(|r| {
                let w = if r.depth == 1 {
                    self.root_weight
                } else {
                    self.member_weight
                };
                (f64::from(r.score) * w, w)
            })
            .fold((0.0, 0.0), |(s, ws), (v, w)| (s + v, ws + w));

        if weights > 0.0 {
            sum / weights
        } else {
            0.0
        }
    }
}
