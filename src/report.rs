//! Spreadsheet output. Reports are written as CSV with upper-case column names.

use crate::error::AppError;
use serde::Serialize;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use tracing::{info, warn};

/// A serialisable report row with a fixed column layout.
///
/// `HEADERS` lists the serialised field names in order. It is written on its own
/// when a report has no rows.
pub trait ReportRow: Serialize {
    const HEADERS: &'static [&'static str];
}

/// A table whose columns are only known at runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn create_output_file(path: &Path) -> Result<File, AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(File::create(path)?)
}

/// Writes `rows` to `path`, one line per row, after a header line. An empty slice
/// produces a file holding only the header.
pub fn write_report<T: ReportRow>(path: &Path, rows: &[T]) -> Result<(), AppError> {
    if rows.is_empty() {
        warn!("No rows to write to {}", path.display());
    }
    let file = create_output_file(path)?;
    write_report_to(file, rows)?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

pub fn write_report_to<W: io::Write, T: ReportRow>(writer: W, rows: &[T]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(writer);
    // serialize() only emits the header along with the first row
    if rows.is_empty() {
        writer.write_record(T::HEADERS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_table(path: &Path, table: &Table) -> Result<(), AppError> {
    let file = create_output_file(path)?;
    write_table_to(file, table)?;
    info!("Wrote {} rows to {}", table.rows.len(), path.display());
    Ok(())
}

pub fn write_table_to<W: io::Write>(writer: W, table: &Table) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Asserts that `T::HEADERS` matches the header serde produces for `row`.
#[cfg(test)]
pub(crate) fn assert_headers_match<T: ReportRow>(row: &T) {
    let mut buffer = Vec::new();
    write_report_to(&mut buffer, std::slice::from_ref(row)).unwrap();
    let output = String::from_utf8(buffer).unwrap();
    assert_eq!(output.lines().next(), Some(T::HEADERS.join(",").as_str()));
}
