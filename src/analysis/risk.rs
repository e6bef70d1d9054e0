//! Migration-risk scoring.
//!
//! `risk = usages * usage_weight + symbols * symbol_weight + complexity * complexity_weight`,
//! banded into low / medium / high. The default weights and thresholds are
//! heuristics; they are exposed as configuration rather than derived.

use serde::{Deserialize, Serialize};

use super::report::{MigrationRisk, PackageUsageRecord};

/// Weights and band thresholds for the risk formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskWeights {
    pub usage_weight: f64,
    pub symbol_weight: f64,
    pub complexity_weight: f64,
    /// Scores above this are at least medium.
    pub medium_threshold: f64,
    /// Scores above this are high.
    pub high_threshold: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            usage_weight: 1.0,
            symbol_weight: 2.0,
            complexity_weight: 0.5,
            medium_threshold: 5.0,
            high_threshold: 15.0,
        }
    }
}

impl RiskWeights {
    /// Raw risk value for a finished record.
    pub fn risk_value(&self, record: &PackageUsageRecord) -> f64 {
        record.usage_nodes.len() as f64 * self.usage_weight
            + record.exported_symbols.len() as f64 * self.symbol_weight
            + record.complexity_score as f64 * self.complexity_weight
    }

    /// Band a raw risk value. Both thresholds are inclusive upper bounds.
    pub fn classify(&self, risk: f64) -> MigrationRisk {
        if risk <= self.medium_threshold {
            MigrationRisk::Low
        } else if risk <= self.high_threshold {
            MigrationRisk::Medium
        } else {
            MigrationRisk::High
        }
    }

    pub fn score(&self, record: &PackageUsageRecord) -> MigrationRisk {
        self.classify(self.risk_value(record))
    }
}

/// Score a record with the default weights.
pub fn score(record: &PackageUsageRecord) -> MigrationRisk {
    RiskWeights::default().score(record)
}

/// Raw risk value with the default weights.
pub fn risk_value(record: &PackageUsageRecord) -> f64 {
    RiskWeights::default().risk_value(record)
}
