//! I/O utilities for CSV reading, encoding, and delimiter resolution.
//!
//! All input handling in csv-profiler flows through this module. It provides:
//!
//! - **Delimiter resolution**: extension-based auto-detection (`.csv` → comma,
//!   `.tsv` → tab) with manual override support.
//! - **Encoding**: input decoding via `encoding_rs`, defaulting to UTF-8.
//! - **Reader construction**: readers are built flexible so that ragged rows
//!   reach the ingestor, which owns the row-width policy.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

pub fn open_csv_reader<R>(reader: R, delimiter: u8, has_headers: bool) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(has_headers)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

pub fn open_csv_reader_from_path(
    path: &Path,
    delimiter: u8,
    has_headers: bool,
) -> Result<csv::Reader<BufReader<File>>> {
    let reader =
        BufReader::new(File::open(path).with_context(|| format!("Opening input file {path:?}"))?);
    Ok(open_csv_reader(reader, delimiter, has_headers))
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}

pub fn reader_headers<R>(
    reader: &mut csv::Reader<R>,
    encoding: &'static Encoding,
) -> Result<Vec<String>>
where
    R: Read,
{
    let headers = reader.byte_headers()?.clone();
    decode_record(&headers, encoding)
}
