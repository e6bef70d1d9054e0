//! usagescope - dependency usage analysis for JavaScript/TypeScript projects
//!
//! This crate finds where a project's declared npm dependencies are used in
//! source code, collects evidence for each (import sites, member calls,
//! touched symbols), and rates how risky each one would be to migrate.

pub mod analysis;
pub mod config;
pub mod export;
pub mod graph;
pub mod parser;
pub mod project;

pub use analysis::{
    analyze, AnalysisError, AnalysisOutcome, AnalysisReport, Analyzer, CancellationToken,
    MigrationRisk, SourceFile,
};
pub use config::AnalyzerConfig;
