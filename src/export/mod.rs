//! Export functionality for usage analysis results.
//!
//! This module provides exporters for writing an analysis outcome in
//! JSON (the machine-readable report) or Markdown (a human summary).

pub mod json;
pub mod markdown;

use crate::analysis::AnalysisOutcome;
use crate::parser::DependencySet;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON format - the report exactly as returned by the analyzer
    Json,
    /// Markdown format - documentation/reporting
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Data container for export operations.
#[derive(Debug, Clone)]
pub struct ExportData {
    /// Project name
    pub project_name: String,
    /// Declared dependencies the run tracked
    pub dependencies: DependencySet,
    /// Report and diagnostics of the run
    pub outcome: AnalysisOutcome,
}

impl ExportData {
    pub fn new(
        project_name: impl Into<String>,
        dependencies: DependencySet,
        outcome: AnalysisOutcome,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            dependencies,
            outcome,
        }
    }

    /// Count of declared packages nothing references.
    pub fn unused_count(&self) -> usize {
        self.outcome.report.unused_packages().len()
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the data to the given writer.
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()>;
}

/// Export data in the specified format.
pub fn export<W: Write>(format: ExportFormat, data: &ExportData, writer: &mut W) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter.export(data, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter.export(data, writer),
    }
}

/// Export data to a string.
pub fn export_to_string(format: ExportFormat, data: &ExportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
