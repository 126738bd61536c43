//! Tabular adapter for bulk allowance files.
//!
//! Turns an uploaded CSV document into the header-driven row maps the bulk
//! pipeline consumes, and produces the reference import template. A
//! malformed document is a single top-level error here, never a per-row
//! outcome; per-row problems are the validation layer's job.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Writer};
use std::io::Read;

use crate::domain::commands::bulk::RawRow;

/// Canonical column set of the bulk import template.
pub const TEMPLATE_COLUMNS: [&str; 12] = [
    "student_id",
    "student_name",
    "chl_number",
    "month",
    "year",
    "program_level",
    "stipend",
    "medical",
    "transportation",
    "school_supplies",
    "accommodation",
    "flmi_comments",
];

/// Read data rows from a CSV document.
///
/// Column names are lowercased and trimmed, values trimmed; one map per
/// data row. The header row itself is consumed here, which is why bulk
/// error reporting numbers data rows from 2.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut csv_reader = ReaderBuilder::new().from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .context("bulk file has no readable header row")?
        .iter()
        .map(|header| header.trim().to_lowercase())
        .collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.context("bulk file contains an unreadable row")?;
        let mut row = RawRow::new();
        for (column, value) in headers.iter().zip(record.iter()) {
            row.insert(column.clone(), value.trim().to_string());
        }
        rows.push(row);
    }

    Ok(rows)
}

/// The reference bulk import document: canonical header plus two example
/// rows, one per amount regime.
pub fn template_csv() -> Result<String> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(TEMPLATE_COLUMNS)?;
    writer.write_record([
        "STU-1001",
        "Amina Yusuf",
        "CHL-2043",
        "January",
        "2025",
        "university",
        "1500",
        "200",
        "300",
        "500",
        "1200",
        "",
    ])?;
    writer.write_record([
        "",
        "Daniel Okello",
        "CHL-1187",
        "January",
        "2025",
        "launch_year",
        "1000",
        "",
        "",
        "",
        "",
        "",
    ])?;

    let bytes = writer
        .into_inner()
        .context("failed to finish template document")?;
    Ok(String::from_utf8(bytes)?)
}
