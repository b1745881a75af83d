//! Report construction and the spreadsheet sink.
//!
//! Building the tables is a pure transformation over the final assignment
//! and statistics; writing them out is a separate step so the tables can be
//! tested without touching the filesystem. The report is two CSV files in
//! the source folder: a per-designer file listing and a summary sheet.

use std::path::{Path, PathBuf};

use tracing::info;

use super::distribution::WorkerAssignment;
use super::stats::RunStatistics;

/// Filename of the per-designer file listing, written into the source folder.
pub const REPORT_FILENAME: &str = "SplitImg_Report.csv";

/// Filename of the summary sheet, written into the source folder.
pub const SUMMARY_FILENAME: &str = "SplitImg_Summary.csv";

/// A rectangular table: one header row plus equally long data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Error types for report writing
#[derive(Debug)]
pub enum ReportError {
    Csv(csv::Error),
    Io(std::io::Error),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Csv(e) => write!(f, "CSV error: {}", e),
            ReportError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<csv::Error> for ReportError {
    fn from(error: csv::Error) -> Self {
        ReportError::Csv(error)
    }
}

impl From<std::io::Error> for ReportError {
    fn from(error: std::io::Error) -> Self {
        ReportError::Io(error)
    }
}

/// Build the per-designer table: one column per designer holding its
/// assigned filenames, shorter columns padded with empty cells to the
/// longest column's length.
pub fn build_assignment_table(assignment: &WorkerAssignment) -> ReportTable {
    let headers: Vec<String> = (1..=assignment.num_workers())
        .map(|n| format!("Designer_{}", n))
        .collect();

    let depth = assignment.max_files_per_worker();
    let mut rows = Vec::with_capacity(depth);

    for row_idx in 0..depth {
        let mut row = Vec::with_capacity(assignment.num_workers());
        for worker in 0..assignment.num_workers() {
            let cell = assignment
                .files_for(worker)
                .get(row_idx)
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            row.push(cell);
        }
        rows.push(row);
    }

    ReportTable { headers, rows }
}

/// Build the summary table of metric/value pairs.
pub fn build_summary_table(stats: &RunStatistics) -> ReportTable {
    let headers = vec!["Metric".to_string(), "Value".to_string()];
    let rows = vec![
        row("Total Images Processed", stats.total_images.to_string()),
        row("White Background Images", stats.white_background.to_string()),
        row(
            "Non-White Background Images",
            stats.non_white_background.to_string(),
        ),
        row("Supported Extensions", stats.extensions_summary()),
        row("Total Processing Time", stats.elapsed_display()),
    ];

    ReportTable { headers, rows }
}

fn row(metric: &str, value: String) -> Vec<String> {
    vec![metric.to_string(), value]
}

fn write_table(path: &Path, table: &ReportTable) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write both report files into `source_folder`. Returns the written paths.
pub fn write_report(
    source_folder: &Path,
    assignment: &WorkerAssignment,
    stats: &RunStatistics,
) -> Result<(PathBuf, PathBuf), ReportError> {
    let report_path = source_folder.join(REPORT_FILENAME);
    let summary_path = source_folder.join(SUMMARY_FILENAME);

    write_table(&report_path, &build_assignment_table(assignment))?;
    write_table(&summary_path, &build_summary_table(stats))?;

    info!(
        "Report written to {:?} and {:?}",
        report_path, summary_path
    );

    Ok((report_path, summary_path))
}
