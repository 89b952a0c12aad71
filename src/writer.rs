//! Flattening of a record sequence into delimited rows.
//!
//! The column schema is taken from the first record alone. Later records are
//! projected onto it: missing fields become empty cells and fields the first
//! record did not have are dropped. The dropped count is reported in the
//! [`WriteSummary`] so callers can surface it.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::{
    error::{Result, ScrubError},
    io_utils,
    record::{Record, cell_text},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    pub columns: Vec<String>,
}

impl ColumnSchema {
    pub fn from_first(records: &[Record]) -> Result<Self> {
        let first = records.first().ok_or(ScrubError::EmptyInput)?;
        if first.as_object().is_none() {
            return Err(ScrubError::UnkeyedSchema { kind: first.kind() });
        }
        Ok(Self {
            columns: first.keys().map(str::to_string).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Projects `record` onto the schema, returning the cells and the number
    /// of fields that had no column.
    pub fn project(&self, record: &Record) -> (Vec<String>, usize) {
        let cells = self
            .columns
            .iter()
            .map(|column| record.field(column).map(cell_text).unwrap_or_default())
            .collect();
        let dropped = record
            .keys()
            .filter(|key| !self.columns.iter().any(|column| column.as_str() == *key))
            .count();
        (cells, dropped)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub rows: usize,
    pub columns: usize,
    pub dropped_fields: usize,
}

/// Writes the header and one row per record to `sink`.
pub fn write_records<W: Write>(
    records: &[Record],
    sink: W,
    delimiter: u8,
) -> Result<WriteSummary> {
    let schema = ColumnSchema::from_first(records)?;
    let mut writer = io_utils::csv_writer(sink, delimiter);
    write_row(&mut writer, &schema.columns)?;

    let mut summary = WriteSummary {
        columns: schema.len(),
        ..WriteSummary::default()
    };
    for (idx, record) in records.iter().enumerate() {
        let (cells, dropped) = schema.project(record);
        if dropped > 0 {
            debug!(
                "Record {} has {dropped} field(s) outside the column schema; omitted",
                idx + 1
            );
        }
        write_row(&mut writer, &cells)?;
        summary.rows += 1;
        summary.dropped_fields += dropped;
    }
    writer.flush()?;
    Ok(summary)
}

/// The csv crate renders a zero-field record as `""`; with no columns the row
/// is written as an empty line instead.
fn write_row<W: Write>(writer: &mut csv::Writer<W>, cells: &[String]) -> Result<()> {
    if cells.is_empty() {
        writer.flush()?;
        writer.get_mut().write_all(io_utils::ROW_TERMINATOR)?;
    } else {
        writer.write_record(cells)?;
    }
    Ok(())
}

/// Writes `records` to `output`, replacing it only once every row is written.
///
/// An empty sequence fails before anything is created on disk.
pub fn write_csv(records: &[Record], output: &Path, delimiter: u8) -> Result<WriteSummary> {
    ColumnSchema::from_first(records)?;
    info!("Writing data to {output:?}");

    let mut staging = NamedTempFile::new_in(staging_dir(output))?;
    let summary = write_records(records, staging.as_file_mut(), delimiter)?;
    staging.persist(output).map_err(|err| err.error)?;

    info!("Data successfully written to {output:?}");
    Ok(summary)
}

fn staging_dir(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
