//! File and console [`ReportSink`]: writes `report-<timestamp>.json` and
//! `report-<timestamp>.csv` into the output directory and prints a table to stdout.

use std::fs;
use std::path::PathBuf;

use artifact_report_core::contract::{ReportRow, ReportSink};
use artifact_report_core::error::SinkError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

const CSV_HEADER: [&str; 4] = ["name", "count", "totalSizeInBytes", "totalSizeHumanReadable"];

pub struct FileReportSink {
    output_dir: PathBuf,
    timestamp: String,
}

impl FileReportSink {
    /// Sink stamped with the current wall-clock time.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self::at(output_dir, Utc::now())
    }

    pub fn at(output_dir: impl Into<PathBuf>, run_time: DateTime<Utc>) -> Self {
        Self {
            output_dir: output_dir.into(),
            timestamp: file_timestamp(run_time),
        }
    }

    pub fn json_path(&self) -> PathBuf {
        self.output_dir.join(format!("report-{}.json", self.timestamp))
    }

    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(format!("report-{}.csv", self.timestamp))
    }

    /// Both documents are rendered before anything touches the disk, and a
    /// failed CSV write removes the JSON file again, so a failed publish
    /// leaves no half-written report behind.
    fn write_files(&self, rows: &[ReportRow]) -> Result<(), SinkError> {
        let json = render_json(rows)?;
        let csv = render_csv(rows)?;

        fs::create_dir_all(&self.output_dir).map_err(|e| {
            error!(error = ?e, path = %self.output_dir.display(), "[OUTPUT][ERROR] Failed to create output directory");
            e
        })?;

        let json_path = self.json_path();
        debug!(path = %json_path.display(), "[OUTPUT] Writing JSON report");
        fs::write(&json_path, json)?;

        let csv_path = self.csv_path();
        debug!(path = %csv_path.display(), "[OUTPUT] Writing CSV report");
        if let Err(e) = fs::write(&csv_path, csv) {
            error!(error = ?e, path = %csv_path.display(), "[OUTPUT][ERROR] Failed to write CSV report, removing JSON report");
            if let Err(cleanup) = fs::remove_file(&json_path) {
                error!(error = ?cleanup, path = %json_path.display(), "[OUTPUT][ERROR] Failed to remove JSON report");
            }
            return Err(e.into());
        }

        Ok(())
    }
}

#[async_trait]
impl ReportSink for FileReportSink {
    async fn publish(&self, rows: &[ReportRow]) -> Result<(), SinkError> {
        info!(rows = rows.len(), "[OUTPUT] Outputting report");

        if let Err(e) = self.write_files(rows) {
            error!(error = %e, "[OUTPUT][ERROR] Error encountered writing report");
            return Err(e);
        }

        println!("{}", render_table(rows));
        info!(path = %self.json_path().display(), "[OUTPUT] Report written");
        Ok(())
    }
}

/// ISO-8601 UTC with `:` replaced by `-`, e.g. `2026-10-19T08-15-30.123Z`.
pub fn file_timestamp(run_time: DateTime<Utc>) -> String {
    run_time.format("%Y-%m-%dT%H-%M-%S%.3fZ").to_string()
}

/// Pretty JSON array, two-space indent.
pub fn render_json(rows: &[ReportRow]) -> Result<String, SinkError> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// CSV with a header line, present even when there are no rows.
pub fn render_csv(rows: &[ReportRow]) -> Result<String, SinkError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    Ok(String::from_utf8(bytes)?)
}

/// Column-aligned table for the console.
pub fn render_table(rows: &[ReportRow]) -> String {
    let body: Vec<[String; 4]> = rows
        .iter()
        .map(|row| {
            [
                row.name.clone(),
                row.count.to_string(),
                row.total_size_in_bytes.to_string(),
                row.total_size_human_readable.clone(),
            ]
        })
        .collect();

    let mut widths = CSV_HEADER.map(str::len);
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.len());
        }
    }

    let line = |cells: [&str; 4]| {
        format!(
            "| {:<w0$} | {:>w1$} | {:>w2$} | {:>w3$} |",
            cells[0],
            cells[1],
            cells[2],
            cells[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
            w3 = widths[3],
        )
    };

    let mut out = vec![line(CSV_HEADER)];
    out.push(format!(
        "|{}|",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("|")
    ));
    for cells in &body {
        out.push(line([
            cells[0].as_str(),
            cells[1].as_str(),
            cells[2].as_str(),
            cells[3].as_str(),
        ]));
    }
    out.join("\n")
}
