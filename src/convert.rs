use std::{io, path::Path, time::Duration};

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::info;

use crate::{
    aggregate::{LogObserver, aggregate_reader},
    archive,
    cli::{ConvertArgs, ExtractArgs, FetchArgs, OutputArgs, UnpackArgs},
    discover, download, io_utils,
    writer::{self, WriteSummary},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub records: usize,
    pub blank_lines: usize,
    pub malformed_lines: usize,
    pub written: WriteSummary,
}

/// Parses `input` line by line and writes the surviving records to `output`.
///
/// Fails with [`crate::error::ScrubError::EmptyInput`] (and writes nothing)
/// when no line decodes.
pub fn convert_file(
    input: &Path,
    output: &Path,
    delimiter: u8,
    encoding: &'static Encoding,
) -> Result<ConversionSummary> {
    info!("Reading and cleaning data from {input:?}");
    let reader = io_utils::open_text_reader(input, encoding)?;
    let mut observer = LogObserver::default();
    let records = aggregate_reader(reader, &mut observer)
        .with_context(|| format!("Reading lines from {input:?}"))?;
    info!(
        "Parsed {} record(s); skipped {} blank and {} malformed line(s)",
        records.len(),
        observer.blank,
        observer.malformed
    );

    let written = if io_utils::is_dash(output) {
        writer::write_records(&records, io::stdout().lock(), delimiter)?
    } else {
        writer::write_csv(&records, output, delimiter)
            .with_context(|| format!("Writing CSV to {output:?}"))?
    };
    if written.dropped_fields > 0 {
        info!(
            "{} field(s) absent from the first record's columns were omitted",
            written.dropped_fields
        );
    }
    Ok(ConversionSummary {
        records: records.len(),
        blank_lines: observer.blank,
        malformed_lines: observer.malformed,
        written,
    })
}

fn convert_with(input: &Path, args: &OutputArgs) -> Result<ConversionSummary> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let delimiter = io_utils::resolve_output_delimiter(&args.output, args.delimiter);
    let summary = convert_file(input, &args.output, delimiter, encoding)?;
    info!(
        "Wrote {} row(s) across {} column(s) -> {}",
        summary.written.rows,
        summary.written.columns,
        destination_label(&args.output)
    );
    Ok(summary)
}

fn unpack_and_convert(
    archive_path: &Path,
    extract: &ExtractArgs,
    output: &OutputArgs,
) -> Result<ConversionSummary> {
    archive::extract_zip(archive_path, &extract.extract_dir)
        .with_context(|| format!("Extracting {archive_path:?}"))?;
    let data_file = discover::discover_data_file(&extract.extract_dir, &extract.extensions)?;
    convert_with(&data_file, output)
}

pub fn execute_convert(args: &ConvertArgs) -> Result<()> {
    convert_with(&args.input, &args.output).map(|_| ())
}

pub fn execute_unpack(args: &UnpackArgs) -> Result<()> {
    unpack_and_convert(&args.archive, &args.extract, &args.output).map(|_| ())
}

pub fn execute_fetch(args: &FetchArgs) -> Result<()> {
    download::download_to(
        &args.url,
        &args.download_path,
        Duration::from_secs(args.timeout_secs),
    )
    .with_context(|| format!("Downloading {}", args.url))?;
    unpack_and_convert(&args.download_path, &args.extract, &args.output).map(|_| ())
}

fn destination_label(path: &Path) -> String {
    if io_utils::is_dash(path) {
        "stdout".to_string()
    } else {
        path.display().to_string()
    }
}
