//! Source code analysis module.
//!
//! Parses JavaScript/TypeScript sources with tree-sitter, attributes imports
//! and member calls to declared dependencies, and scores how risky each
//! dependency would be to migrate.
//!
//! # Pipeline
//!
//! 1. [`SourceParser`] turns each [`SourceFile`] into a [`ParsedUnit`]
//! 2. [`UsageExtractor`] produces a self-contained [`FileExtraction`] per file
//! 3. [`Aggregator`] merges extractions in batch order
//! 4. [`RiskWeights`] scores every merged record
//!
//! Steps 1 and 2 are independent per file and may run in parallel. Step 3
//! only starts once every file is done, so an aborted run never leaves a
//! half-merged record behind.
//!
//! # Example
//!
//! ```
//! use usagescope::analysis::{analyze, MigrationRisk, SourceFile};
//! use usagescope::parser::DependencySet;
//!
//! let deps: DependencySet = [("lodash", "4.17.19")].into_iter().collect();
//! let files = vec![SourceFile::new(
//!     "index.js",
//!     "const _ = require('lodash'); _.merge(a, b); _.get(a, 'x');",
//! )];
//!
//! let outcome = analyze(&files, &deps).unwrap();
//! let lodash = &outcome.report.package_usage["lodash"];
//! assert_eq!(lodash.usage_nodes.len(), 2);
//! assert_eq!(lodash.migration_risk, MigrationRisk::Medium);
//! ```

pub mod aggregator;
pub mod extractor;
pub mod identifiers;
pub mod report;
pub mod resolver;
pub mod risk;
pub mod source;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::AnalyzerConfig;
use crate::parser::DependencySet;

pub use aggregator::{aggregate, Aggregator, DEFAULT_USAGE_EXAMPLE_CAP};
pub use extractor::{FileExtraction, FileMetrics, UsageEvidence, UsageExtractor};
pub use identifiers::{map_identifier, IdentifierMapper};
pub use report::{
    AnalysisOutcome, AnalysisReport, CodeMetrics, DiagnosticKind, FileDiagnostic, FileUsage,
    MigrationRisk, PackageUsageRecord,
};
pub use resolver::resolve_package_name;
pub use risk::{score, RiskWeights};
pub use source::{Grammar, ParseFailure, ParsedUnit, SourceFile, SourceParser};

/// Run-level errors. Per-file problems never surface here.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Tree-sitter language initialization failed")]
    LanguageInit,

    #[error("Analysis cancelled")]
    Cancelled,
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Shared flag used to abort a run from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Result of parsing and extracting one file.
enum FileOutcome {
    Extracted(FileExtraction, Option<FileDiagnostic>),
    Failed(FileDiagnostic),
    Cancelled,
}

/// Runs the full pipeline with a fixed configuration.
pub struct Analyzer {
    config: AnalyzerConfig,
    mapper: IdentifierMapper,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let mapper = IdentifierMapper::new().with_aliases(config.aliases.clone());
        Self { config, mapper }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze a batch. File order determines the order of every sequence in the report.
    pub fn analyze(
        &self,
        files: &[SourceFile],
        declared: &DependencySet,
    ) -> AnalysisResult<AnalysisOutcome> {
        self.analyze_with_cancellation(files, declared, &CancellationToken::new())
    }

    /// Like [`Analyzer::analyze`], but returns [`AnalysisError::Cancelled`]
    /// and no report if `token` fires before every file is processed.
    pub fn analyze_with_cancellation(
        &self,
        files: &[SourceFile],
        declared: &DependencySet,
        token: &CancellationToken,
    ) -> AnalysisResult<AnalysisOutcome> {
        // Fail the whole run up front if a grammar cannot be loaded.
        let parser = self.new_parser()?;

        let outcomes: Vec<FileOutcome> = if self.config.parallel && files.len() > 1 {
            files
                .par_iter()
                .map_init(
                    || self.new_parser().ok(),
                    |parser, file| match parser {
                        Some(parser) => self.process_file(parser, file, declared, token),
                        None => FileOutcome::Failed(FileDiagnostic {
                            file_name: file.name.clone(),
                            kind: DiagnosticKind::ParseFailure,
                            message: AnalysisError::LanguageInit.to_string(),
                        }),
                    },
                )
                .collect()
        } else {
            let mut parser = parser;
            files
                .iter()
                .map(|file| self.process_file(&mut parser, file, declared, token))
                .collect()
        };

        if token.is_cancelled() {
            info!("analysis cancelled, discarding per-file results");
            return Err(AnalysisError::Cancelled);
        }

        let mut aggregator =
            Aggregator::new(declared).with_usage_example_cap(self.config.usage_example_cap);
        let mut diagnostics = Vec::new();
        let mut files_analyzed = 0;

        for outcome in outcomes {
            match outcome {
                FileOutcome::Extracted(extraction, diagnostic) => {
                    files_analyzed += 1;
                    diagnostics.extend(diagnostic);
                    aggregator.add_file(extraction);
                }
                FileOutcome::Failed(diagnostic) => diagnostics.push(diagnostic),
                FileOutcome::Cancelled => return Err(AnalysisError::Cancelled),
            }
        }

        let report = aggregator.finish(&self.config.risk);

        info!(
            files = files.len(),
            analyzed = files_analyzed,
            skipped = files.len() - files_analyzed,
            packages = report.package_usage.len(),
            "analysis complete"
        );

        Ok(AnalysisOutcome {
            report,
            diagnostics,
            files_analyzed,
        })
    }

    fn new_parser(&self) -> AnalysisResult<SourceParser> {
        Ok(SourceParser::new()?.tolerate_syntax_errors(self.config.tolerate_syntax_errors))
    }

    fn process_file(
        &self,
        parser: &mut SourceParser,
        file: &SourceFile,
        declared: &DependencySet,
        token: &CancellationToken,
    ) -> FileOutcome {
        if token.is_cancelled() {
            return FileOutcome::Cancelled;
        }

        let unit = match parser.parse(file) {
            Ok(unit) => unit,
            Err(failure) => {
                warn!(file = %file.name, error = %failure, "skipping file that failed to parse");
                return FileOutcome::Failed(FileDiagnostic {
                    file_name: file.name.clone(),
                    kind: DiagnosticKind::ParseFailure,
                    message: failure.to_string(),
                });
            }
        };

        let diagnostic = unit.syntax_error().map(|failure| {
            warn!(file = %file.name, error = %failure, "extracting from error-recovered tree");
            FileDiagnostic {
                file_name: file.name.clone(),
                kind: DiagnosticKind::RecoveredSyntax,
                message: failure.to_string(),
            }
        });

        debug!(file = %file.name, grammar = ?unit.grammar(), "parsed");
        let extraction = UsageExtractor::new(declared, &self.mapper).extract(&unit);
        FileOutcome::Extracted(extraction, diagnostic)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

/// Analyze a batch with the default configuration.
pub fn analyze(files: &[SourceFile], declared: &DependencySet) -> AnalysisResult<AnalysisOutcome> {
    Analyzer::default().analyze(files, declared)
}
