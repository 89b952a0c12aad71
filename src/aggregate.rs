//! Collection of decoded records in source order.
//!
//! Skipped lines are reported to a [`SkipObserver`] instead of being logged
//! from here, so callers decide whether to log, collect or ignore them.

use std::io::{self, BufRead};

use log::{debug, warn};

use crate::{
    parse::{LineOutcome, SkipReason, parse_line},
    record::Record,
};

pub trait SkipObserver {
    /// Called once per skipped line. `line_number` is 1-based.
    fn skipped(&mut self, line_number: usize, reason: &SkipReason);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_number: usize,
    pub reason: SkipReason,
}

impl SkipObserver for Vec<SkippedLine> {
    fn skipped(&mut self, line_number: usize, reason: &SkipReason) {
        self.push(SkippedLine {
            line_number,
            reason: reason.clone(),
        });
    }
}

/// Forwards skips to the `log` facade and keeps counts for the run summary.
#[derive(Debug, Default)]
pub struct LogObserver {
    pub blank: usize,
    pub malformed: usize,
}

impl LogObserver {
    pub fn total(&self) -> usize {
        self.blank + self.malformed
    }
}

impl SkipObserver for LogObserver {
    fn skipped(&mut self, line_number: usize, reason: &SkipReason) {
        match reason {
            SkipReason::Blank => {
                self.blank += 1;
                debug!("Line {line_number} is blank after markup removal");
            }
            SkipReason::Malformed { content, error } => {
                self.malformed += 1;
                warn!("Could not parse line {line_number} as JSON ({error}): {content}");
            }
        }
    }
}

pub fn aggregate<I, S, O>(lines: I, observer: &mut O) -> Vec<Record>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    O: SkipObserver + ?Sized,
{
    let mut records = Vec::new();
    for (idx, line) in lines.into_iter().enumerate() {
        match parse_line(line.as_ref()) {
            LineOutcome::Record(record) => records.push(record),
            LineOutcome::Skipped(reason) => observer.skipped(idx + 1, &reason),
        }
    }
    records
}

/// Splits `text` on `\r\n`, `\n` or a lone `\r`. A trailing terminator does
/// not produce an extra empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(['\r', '\n']) {
            Some(idx) => {
                let line = &rest[..idx];
                let terminator = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx + terminator..];
                Some(line)
            }
            None => Some(std::mem::take(&mut rest)),
        }
    })
}

/// Reads `reader` to the end and aggregates its lines.
///
/// Only I/O failures of the reader itself are returned as errors.
pub fn aggregate_reader<R, O>(mut reader: R, observer: &mut O) -> io::Result<Vec<Record>>
where
    R: BufRead,
    O: SkipObserver + ?Sized,
{
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(aggregate(split_lines(&text), observer))
}
