//! Merges per-file extractions into per-package records.
//!
//! Aggregation runs on one thread after every file has been extracted, in
//! batch order, so `fileUsage` sequences never depend on worker timing.

use std::collections::BTreeMap;

use tracing::debug;

use super::extractor::FileExtraction;
use super::report::{AnalysisReport, CodeMetrics, FileUsage, PackageUsageRecord};
use super::risk::RiskWeights;
use crate::graph::UsageGraph;
use crate::parser::DependencySet;

/// Default cap on `usageExamples` per file entry.
pub const DEFAULT_USAGE_EXAMPLE_CAP: usize = 10;

/// Accumulates records, metrics and the co-usage graph for one run.
pub struct Aggregator {
    records: BTreeMap<String, PackageUsageRecord>,
    metrics: CodeMetrics,
    graph: UsageGraph,
    usage_example_cap: usize,
}

impl Aggregator {
    /// Start a run with one empty record per declared package.
    pub fn new(declared: &DependencySet) -> Self {
        let mut graph = UsageGraph::with_capacity(declared.len(), 0);
        let records = declared
            .names()
            .map(|name| {
                graph.add_package(name);
                (name.to_string(), PackageUsageRecord::default())
            })
            .collect();

        Self {
            records,
            metrics: CodeMetrics::default(),
            graph,
            usage_example_cap: DEFAULT_USAGE_EXAMPLE_CAP,
        }
    }

    pub fn with_usage_example_cap(mut self, cap: usize) -> Self {
        self.usage_example_cap = cap;
        self
    }

    /// Fold one file into the run.
    pub fn add_file(&mut self, extraction: FileExtraction) {
        let file_metrics = extraction.metrics;
        self.metrics.total_functions += file_metrics.functions;
        self.metrics.total_classes += file_metrics.classes;
        self.metrics.total_imports += file_metrics.imports;
        self.metrics.cyclomatic_complexity += 1 + file_metrics.decision_points;

        let packages: Vec<&str> = extraction.evidence.keys().map(String::as_str).collect();
        self.graph.record_file(&packages);

        for (package, evidence) in extraction.evidence {
            let Some(record) = self.records.get_mut(&package) else {
                debug!(package = %package, "evidence for undeclared package dropped");
                continue;
            };

            record
                .import_nodes
                .extend(evidence.import_statements.iter().cloned());
            record
                .usage_nodes
                .extend(evidence.usage_snippets.iter().cloned());
            record.exported_symbols.extend(evidence.symbols_touched);
            record.complexity_score += evidence.complexity;

            record.file_usage.push(FileUsage {
                file_name: extraction.file_name.clone(),
                import_statements: evidence.import_statements,
                usage_examples: evidence
                    .usage_snippets
                    .into_iter()
                    .take(self.usage_example_cap)
                    .collect(),
                line_numbers: evidence.line_numbers,
            });
        }
    }

    /// Records as they stand, before risk scoring.
    pub fn records(&self) -> &BTreeMap<String, PackageUsageRecord> {
        &self.records
    }

    /// Score every record and assemble the report.
    pub fn finish(self, weights: &RiskWeights) -> AnalysisReport {
        let mut package_usage = self.records;
        for record in package_usage.values_mut() {
            record.migration_risk = weights.score(record);
        }

        AnalysisReport {
            package_usage,
            code_metrics: self.metrics,
            dependency_graph: self.graph.to_adjacency(),
        }
    }
}

/// Merge extractions in the order given, without scoring.
pub fn aggregate<I>(per_file: I, declared: &DependencySet) -> BTreeMap<String, PackageUsageRecord>
where
    I: IntoIterator<Item = FileExtraction>,
{
    let mut aggregator = Aggregator::new(declared);
    for extraction in per_file {
        aggregator.add_file(extraction);
    }
    aggregator.records
}
