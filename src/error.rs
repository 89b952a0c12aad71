//! Error taxonomy shared by the conversion pipeline and its collaborators.
//!
//! Per-line decode failures are not represented here: the line parser turns
//! them into [`crate::parse::SkipReason::Malformed`] and the pipeline carries on.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrubError>;

#[derive(Debug, Error)]
pub enum ScrubError {
    /// No line of the input decoded to a record, so there is nothing to tabulate.
    #[error("No data to write to CSV.")]
    EmptyInput,

    #[error("No {} file found in {directory:?}", extensions.join(" or "))]
    NoMatchingFile {
        directory: PathBuf,
        extensions: Vec<String>,
    },

    /// The first record decides the column schema and must therefore be an object.
    #[error("First record is a JSON {kind}, expected an object to derive columns from")]
    UnkeyedSchema { kind: &'static str },

    #[error("Download of {url} failed with HTTP status {status}")]
    Download { url: String, status: u16 },

    #[error("Archive {path:?} could not be extracted: {reason}")]
    Archive { path: PathBuf, reason: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
