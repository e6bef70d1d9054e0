//! Markdown export implementation.
//!
//! Renders a usage report for documentation and code review.

use super::{ExportData, Exporter};
use std::io::{self, Write};

/// Markdown exporter implementation.
pub struct MarkdownExporter;

/// Escape pipes so snippets do not break table cells.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let report = &data.outcome.report;
        let metrics = &report.code_metrics;

        // Title
        writeln!(writer, "# Dependency Usage Report")?;
        writeln!(writer)?;
        writeln!(writer, "**Project:** {}", data.project_name)?;
        writeln!(writer)?;

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Count |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Declared Dependencies | {} |", data.dependencies.len())?;
        writeln!(writer, "| Unused Dependencies | {} |", data.unused_count())?;
        writeln!(writer, "| Files Analyzed | {} |", data.outcome.files_analyzed)?;
        writeln!(writer, "| Diagnostics | {} |", data.outcome.diagnostics.len())?;
        writeln!(writer, "| Functions | {} |", metrics.total_functions)?;
        writeln!(writer, "| Classes | {} |", metrics.total_classes)?;
        writeln!(writer, "| Imports | {} |", metrics.total_imports)?;
        writeln!(
            writer,
            "| Cyclomatic Complexity | {} |",
            metrics.cyclomatic_complexity
        )?;
        writeln!(writer)?;

        if !report.package_usage.is_empty() {
            writeln!(writer, "## Packages")?;
            writeln!(writer)?;
            writeln!(
                writer,
                "| Package | Version | Risk | Files | Imports | Usages | Symbols | Complexity |"
            )?;
            writeln!(
                writer,
                "|---------|---------|------|-------|---------|--------|---------|------------|"
            )?;
            for (name, record) in report.packages_by_risk() {
                writeln!(
                    writer,
                    "| {} | {} | {} | {} | {} | {} | {} | {} |",
                    name,
                    data.dependencies.version(name).unwrap_or("-"),
                    record.migration_risk,
                    record.file_count(),
                    record.import_nodes.len(),
                    record.usage_nodes.len(),
                    record.exported_symbols.len(),
                    record.complexity_score
                )?;
            }
            writeln!(writer)?;
        }

        let used: Vec<_> = report
            .packages_by_risk()
            .into_iter()
            .filter(|(_, record)| !record.usage_nodes.is_empty())
            .collect();

        if !used.is_empty() {
            writeln!(writer, "## Usage Details")?;
            writeln!(writer)?;
            for (name, record) in used {
                writeln!(writer, "### {}", name)?;
                writeln!(writer)?;
                let symbols: Vec<&str> =
                    record.exported_symbols.iter().map(String::as_str).collect();
                writeln!(writer, "**Symbols:** {}", symbols.join(", "))?;
                writeln!(writer)?;
                for usage in &record.file_usage {
                    writeln!(writer, "- `{}`", usage.file_name)?;
                    for example in &usage.usage_examples {
                        writeln!(writer, "  - `{}`", cell(example))?;
                    }
                }
                writeln!(writer)?;
            }
        }

        let linked: Vec<_> = report
            .dependency_graph
            .iter()
            .filter(|(_, neighbors)| !neighbors.is_empty())
            .collect();

        if !linked.is_empty() {
            writeln!(writer, "## Used Together")?;
            writeln!(writer)?;
            for (name, neighbors) in linked {
                writeln!(writer, "- **{}** → {}", name, neighbors.join(", "))?;
            }
            writeln!(writer)?;
        }

        if !data.outcome.diagnostics.is_empty() {
            writeln!(writer, "## ⚠️ Diagnostics")?;
            writeln!(writer)?;
            for diagnostic in &data.outcome.diagnostics {
                writeln!(writer, "- `{}`: {}", diagnostic.file_name, cell(&diagnostic.message))?;
            }
            writeln!(writer)?;
        }

        writeln!(writer, "---")?;
        writeln!(writer, "*Generated by usagescope*")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze, SourceFile};
    use crate::parser::DependencySet;

    fn render(files: Vec<SourceFile>, deps: &[(&str, &str)]) -> String {
        let deps: DependencySet = deps.iter().copied().collect();
        let outcome = analyze(&files, &deps).unwrap();
        let data = ExportData::new("test-project", deps, outcome);

        let mut output = Vec::new();
        MarkdownExporter.export(&data, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_markdown_export_basic() {
        let md = render(
            vec![SourceFile::new("a.js", "import _ from 'lodash';\n_.merge(a, b);")],
            &[("lodash", "^4.17.21"), ("react", "^18.2.0")],
        );

        assert!(md.contains("# Dependency Usage Report"));
        assert!(md.contains("**Project:** test-project"));
        assert!(md.contains("| Declared Dependencies | 2 |"));
        assert!(md.contains("| Unused Dependencies | 1 |"));
        assert!(md.contains("| lodash | ^4.17.21 | low |"));
        assert!(md.contains("### lodash"));
        assert!(md.contains("`_.merge(a, b)`"));
    }

    #[test]
    fn test_markdown_export_diagnostics() {
        let md = render(
            vec![SourceFile::new("broken.js", "function (")],
            &[("react", "^18.2.0")],
        );

        assert!(md.contains("## ⚠️ Diagnostics"));
        assert!(md.contains("`broken.js`"));
        assert!(md.contains("| Diagnostics | 1 |"));
    }

    #[test]
    fn test_markdown_export_used_together() {
        let md = render(
            vec![SourceFile::new(
                "a.js",
                "import React from 'react';\nimport { connect } from 'react-redux';",
            )],
            &[("react", "^18.2.0"), ("react-redux", "^9.0.0")],
        );

        assert!(md.contains("## Used Together"));
        assert!(md.contains("- **react** → react-redux"));
    }

    #[test]
    fn test_cell_escapes_pipes() {
        assert_eq!(cell("a || b\nc"), "a \\|\\| b c");
    }
}
