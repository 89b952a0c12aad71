//! Tolerant per-line decoding.
//!
//! Each raw line is stripped of markup and then decoded as a JSON document.
//! A line that fails to decode only affects itself: the caller receives a
//! [`LineOutcome::Skipped`] describing why and moves on to the next line.

use std::fmt;

use crate::{markup, record::Record};

#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Record(Record),
    Skipped(SkipReason),
}

impl LineOutcome {
    pub fn into_record(self) -> Option<Record> {
        match self {
            LineOutcome::Record(record) => Some(record),
            LineOutcome::Skipped(_) => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, LineOutcome::Skipped(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing remained after markup removal and trimming.
    Blank,
    /// The cleaned content is not valid JSON.
    Malformed { content: String, error: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Blank => write!(f, "blank after markup removal"),
            SkipReason::Malformed { content, error } => {
                write!(f, "could not parse line as JSON ({error}): {content}")
            }
        }
    }
}

pub fn parse_line(line: &str) -> LineOutcome {
    let cleaned = markup::strip(line);
    if cleaned.is_empty() {
        return LineOutcome::Skipped(SkipReason::Blank);
    }
    match serde_json::from_str(&cleaned) {
        Ok(value) => LineOutcome::Record(Record::new(value)),
        Err(err) => LineOutcome::Skipped(SkipReason::Malformed {
            content: cleaned.into_owned(),
            error: err.to_string(),
        }),
    }
}
