//! JSON export implementation.
//!
//! Writes the [`AnalysisReport`](crate::analysis::AnalysisReport) as-is:
//! `{ packageUsage, codeMetrics, dependencyGraph }` with camelCase keys.
//! Diagnostics are not part of the report and are left out.

use super::{ExportData, Exporter};
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let json = serde_json::to_string_pretty(&data.outcome.report)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}
