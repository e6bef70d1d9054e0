//! Output types of an analysis run.
//!
//! All of these serialize to the camelCase JSON shape handed back to
//! callers: `{ packageUsage, codeMetrics, dependencyGraph }`.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Coarse estimate of how disruptive upgrading or replacing a package would be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationRisk {
    #[default]
    Low,
    Medium,
    High,
}

impl fmt::Display for MigrationRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationRisk::Low => write!(f, "low"),
            MigrationRisk::Medium => write!(f, "medium"),
            MigrationRisk::High => write!(f, "high"),
        }
    }
}

/// How one file uses one package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUsage {
    pub file_name: String,
    pub import_statements: Vec<String>,
    /// Earliest usage snippets of the file, capped.
    pub usage_examples: Vec<String>,
    pub line_numbers: Vec<usize>,
}

/// Aggregated usage of one declared package across the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageUsageRecord {
    pub import_nodes: Vec<String>,
    pub usage_nodes: Vec<String>,
    /// Symbols touched through imports or calls, in first-seen order.
    pub exported_symbols: IndexSet<String>,
    pub complexity_score: u64,
    pub migration_risk: MigrationRisk,
    pub file_usage: Vec<FileUsage>,
}

impl PackageUsageRecord {
    /// Returns true if no file imports or calls the package.
    pub fn is_unused(&self) -> bool {
        self.import_nodes.is_empty() && self.usage_nodes.is_empty()
    }

    /// Number of files that reference the package.
    pub fn file_count(&self) -> usize {
        self.file_usage.len()
    }
}

/// Batch-wide structural counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeMetrics {
    pub total_functions: usize,
    pub total_classes: usize,
    pub total_imports: usize,
    pub cyclomatic_complexity: usize,
}

/// The structured result of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub package_usage: BTreeMap<String, PackageUsageRecord>,
    pub code_metrics: CodeMetrics,
    /// Declared packages used together in at least one file.
    pub dependency_graph: BTreeMap<String, Vec<String>>,
}

impl AnalysisReport {
    /// Packages sorted by risk (highest first), then by name.
    pub fn packages_by_risk(&self) -> Vec<(&String, &PackageUsageRecord)> {
        let mut packages: Vec<_> = self.package_usage.iter().collect();
        packages.sort_by(|a, b| {
            b.1.migration_risk
                .cmp(&a.1.migration_risk)
                .then_with(|| a.0.cmp(b.0))
        });
        packages
    }

    /// Names of declared packages nothing references.
    pub fn unused_packages(&self) -> Vec<&str> {
        self.package_usage
            .iter()
            .filter(|(_, record)| record.is_unused())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// What went wrong with a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The file was skipped.
    ParseFailure,
    /// The file had syntax errors but was extracted from the recovered tree.
    RecoveredSyntax,
}

/// Per-file warning produced during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDiagnostic {
    pub file_name: String,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for FileDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file_name, self.message)
    }
}

/// A report plus the per-file diagnostics gathered while building it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub report: AnalysisReport,
    pub diagnostics: Vec<FileDiagnostic>,
    /// Files that produced a syntax tree and were extracted.
    pub files_analyzed: usize,
}
