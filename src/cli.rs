use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Convert markup-contaminated JSON-lines data into CSV",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a local JSON-lines file into CSV
    Convert(ConvertArgs),
    /// Extract a ZIP archive, locate its data file and convert it
    Unpack(UnpackArgs),
    /// Download a ZIP archive, then extract and convert it
    Fetch(FetchArgs),
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Destination CSV file ('-' for stdout)
    #[arg(short = 'o', long = "output", default_value = "cleaned_data.csv")]
    pub output: PathBuf,
    /// Output delimiter (supports ',', 'tab', ';', '|'); defaults by output extension
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the data file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// JSON-lines data file to convert ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Directory the archive is extracted into
    #[arg(long = "extract-dir", default_value = "extracted_data")]
    pub extract_dir: PathBuf,
    /// Data file extensions to look for, in priority order
    #[arg(
        long = "extension",
        value_delimiter = ',',
        default_values = [".txt", ".json"]
    )]
    pub extensions: Vec<String>,
}

#[derive(Debug, Args)]
pub struct UnpackArgs {
    /// ZIP archive to extract
    #[arg(short = 'a', long = "archive")]
    pub archive: PathBuf,
    #[command(flatten)]
    pub extract: ExtractArgs,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// URL of the ZIP archive to download
    #[arg(long, env = "JSONL_SCRUB_URL")]
    pub url: String,
    /// Where the downloaded archive is stored
    #[arg(long = "download-path", default_value = "downloaded.zip")]
    pub download_path: PathBuf,
    /// Request timeout in seconds
    #[arg(long = "timeout-secs", default_value_t = 120)]
    pub timeout_secs: u64,
    #[command(flatten)]
    pub extract: ExtractArgs,
    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            if first == '"' || first == '\n' || first == '\r' {
                return Err("Delimiter cannot be a quote or line break".to_string());
            }
            Ok(first as u8)
        }
    }
}
