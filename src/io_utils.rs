//! I/O helpers shared by the pipeline commands.
//!
//! - **Encoding**: input decoding via `encoding_rs`, defaulting to UTF-8. A
//!   byte-order mark is sniffed and stripped; undecodable bytes are replaced
//!   so one bad byte cannot abort the whole file.
//! - **Delimiter resolution**: extension-based (`.tsv` → tab, anything else →
//!   comma) with manual override.
//! - **stdin/stdout**: the `-` path convention routes through standard streams.
//! - **Quoting**: CSV output quotes only fields that need it; rows end in CRLF.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use csv::{QuoteStyle, Terminator};
use encoding_rs::{Encoding, UTF_8};
use encoding_rs_io::DecodeReaderBytesBuilder;

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';
pub const ROW_TERMINATOR: &[u8] = b"\r\n";

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_output_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

/// Wraps `reader` so it yields UTF-8 text decoded from `encoding`.
pub fn decoding_reader<R>(reader: R, encoding: &'static Encoding) -> impl BufRead
where
    R: Read,
{
    BufReader::new(
        DecodeReaderBytesBuilder::new()
            .encoding(Some(encoding))
            .bom_sniffing(true)
            .build(reader),
    )
}

pub fn open_text_reader(path: &Path, encoding: &'static Encoding) -> Result<Box<dyn BufRead>> {
    let source: Box<dyn Read> = if is_dash(path) {
        Box::new(io::stdin().lock())
    } else {
        Box::new(File::open(path).with_context(|| format!("Opening input file {path:?}"))?)
    };
    Ok(Box::new(decoding_reader(source, encoding)))
}

pub fn csv_writer<W>(sink: W, delimiter: u8) -> csv::Writer<W>
where
    W: Write,
{
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Necessary)
        .double_quote(true)
        .terminator(Terminator::CRLF)
        .flexible(false);
    builder.from_writer(sink)
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    #[test]
    fn tsv_extension_selects_tab() {
        assert_eq!(resolve_output_delimiter(Path::new("out.TSV"), None), b'\t');
        assert_eq!(resolve_output_delimiter(Path::new("out.csv"), None), b',');
        assert_eq!(resolve_output_delimiter(Path::new("out.tsv"), Some(b';')), b';');
    }

    #[test]
    fn unknown_encoding_label_is_rejected() {
        assert!(resolve_encoding(Some("not-an-encoding")).is_err());
        assert_eq!(resolve_encoding(Some(" latin1 ")).unwrap().name(), "windows-1252");
    }

    #[test]
    fn decoding_reader_strips_bom_and_transcodes() {
        let bytes = b"\xEF\xBB\xBF{\"a\":1}\n".to_vec();
        let mut text = String::new();
        decoding_reader(bytes.as_slice(), UTF_8)
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "{\"a\":1}\n");

        let latin = b"{\"name\":\"caf\xE9\"}".to_vec();
        let encoding = resolve_encoding(Some("latin1")).unwrap();
        let mut text = String::new();
        decoding_reader(latin.as_slice(), encoding)
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "{\"name\":\"café\"}");
    }
}
