//! CSV ingestion: raw delimited text → [`ColumnStore`].
//!
//! Ingestion is a single linear pass that applies the header policy, the
//! null-token policy, and the row-width policy. Field values are never type
//! converted here; dtype inference is a separate later step so that parsing
//! stays independent of statistics.
//!
//! ## Row-width policy
//!
//! Rows with fewer fields than the header are padded with missing cells.
//! Rows with more fields are skipped: each skip is recorded as a
//! [`IngestError::RowWidthMismatch`] in [`IngestReport::warnings`] and logged,
//! but never aborts the pass. Only a duplicate header name is fatal.

use std::{collections::HashSet, io::Read, path::Path};

use anyhow::Context;
use encoding_rs::{Encoding, UTF_8};
use log::{debug, info, warn};
use thiserror::Error;

use crate::{
    io_utils,
    store::{Column, ColumnStore},
};

/// Null markers recognized out of the box, compared case-insensitively.
pub const DEFAULT_NULL_TOKENS: &[&str] = &["", "NaN", "NA", "null"];

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("duplicate column name '{name}' in header")]
    DuplicateColumnName { name: String },
    #[error("row {row} has {actual} field(s) but the dataset has {expected} column(s)")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("reading delimited input")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Ingestion settings. All configuration is explicit; there is no ambient
/// state and no locale handling.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub has_header: bool,
    /// `None` resolves from the file extension for path-based ingestion and
    /// falls back to a comma otherwise.
    pub delimiter: Option<u8>,
    pub null_tokens: Vec<String>,
    pub encoding: &'static Encoding,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: None,
            null_tokens: DEFAULT_NULL_TOKENS.iter().map(|t| t.to_string()).collect(),
            encoding: UTF_8,
        }
    }
}

impl IngestOptions {
    fn is_null(&self, field: &str) -> bool {
        self.null_tokens
            .iter()
            .any(|token| token.eq_ignore_ascii_case(field))
    }

    fn resolved_delimiter(&self) -> u8 {
        self.delimiter.unwrap_or(io_utils::DEFAULT_CSV_DELIMITER)
    }
}

/// Outcome of an ingestion pass: the frozen store plus the side-channel
/// warning list of skipped rows.
#[derive(Debug)]
pub struct IngestReport {
    pub store: ColumnStore,
    pub warnings: Vec<IngestError>,
}

impl IngestReport {
    pub fn skipped_rows(&self) -> usize {
        self.warnings.len()
    }
}

pub fn ingest_str(text: &str, options: &IngestOptions) -> Result<IngestReport, IngestError> {
    ingest_reader(text.as_bytes(), options)
}

pub fn ingest_path(path: &Path, options: &IngestOptions) -> Result<IngestReport, IngestError> {
    let delimiter = io_utils::resolve_input_delimiter(path, options.delimiter);
    let reader = io_utils::open_csv_reader_from_path(path, delimiter, options.has_header)?;
    let report = ingest_records(reader, options)?;
    info!(
        "Ingested {} row(s) across {} column(s) from {:?}",
        report.store.row_count(),
        report.store.column_count(),
        path
    );
    Ok(report)
}

pub fn ingest_reader<R: Read>(
    reader: R,
    options: &IngestOptions,
) -> Result<IngestReport, IngestError> {
    let csv_reader = io_utils::open_csv_reader(
        reader,
        options.resolved_delimiter(),
        options.has_header,
    );
    ingest_records(csv_reader, options)
}

fn ingest_records<R: Read>(
    mut reader: csv::Reader<R>,
    options: &IngestOptions,
) -> Result<IngestReport, IngestError> {
    let mut names: Vec<String> = if options.has_header {
        let headers = io_utils::reader_headers(&mut reader, options.encoding)?;
        let mut seen = HashSet::new();
        for name in &headers {
            if !seen.insert(name.as_str()) {
                return Err(IngestError::DuplicateColumnName { name: name.clone() });
            }
        }
        headers
    } else {
        Vec::new()
    };

    let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
    let mut warnings = Vec::new();
    let mut record = csv::ByteRecord::new();
    let mut data_row = 0usize;

    while reader.read_byte_record(&mut record)? {
        data_row += 1;
        let fields = io_utils::decode_record(&record, options.encoding)?;

        // Headerless input: the first data row fixes the column count.
        if names.is_empty() && !fields.is_empty() {
            names = (0..fields.len()).map(|idx| format!("col_{idx}")).collect();
            values = vec![Vec::new(); names.len()];
        }

        if fields.len() > names.len() {
            let skip = IngestError::RowWidthMismatch {
                row: data_row,
                expected: names.len(),
                actual: fields.len(),
            };
            warn!("Skipping {skip}");
            warnings.push(skip);
            continue;
        }

        for (idx, column_values) in values.iter_mut().enumerate() {
            let cell = match fields.get(idx) {
                Some(field) if !options.is_null(field) => Some(field.clone()),
                _ => None,
            };
            column_values.push(cell);
        }
    }

    let columns = names
        .into_iter()
        .zip(values)
        .map(|(name, tokens)| Column::new(name, tokens))
        .collect();
    let store = ColumnStore::from_columns(columns).context("Assembling column store")?;
    debug!(
        "Built column store: {} row(s), {} column(s), {} skipped",
        store.row_count(),
        store.column_count(),
        warnings.len()
    );
    Ok(IngestReport { store, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Dtype;

    fn ingest(text: &str) -> IngestReport {
        ingest_str(text, &IngestOptions::default()).expect("ingest")
    }

    #[test]
    fn header_names_become_columns() {
        let report = ingest("x,y\n1,red\n2,blue\n");
        assert_eq!(report.store.column_names().collect::<Vec<_>>(), ["x", "y"]);
        assert_eq!(report.store.row_count(), 2);
        assert_eq!(report.store.dtype("x"), Some(Dtype::Unknown));
    }

    #[test]
    fn headerless_input_synthesizes_names() {
        let options = IngestOptions {
            has_header: false,
            ..IngestOptions::default()
        };
        let report = ingest_str("1,red\n2,blue\n", &options).expect("ingest");
        assert_eq!(
            report.store.column_names().collect::<Vec<_>>(),
            ["col_0", "col_1"]
        );
        assert_eq!(report.store.row_count(), 2);
    }

    #[test]
    fn duplicate_header_names_are_fatal() {
        let err = ingest_str("id,id\n1,2\n", &IngestOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            IngestError::DuplicateColumnName { name } if name == "id"
        ));
    }

    #[test]
    fn null_tokens_map_to_missing_case_insensitively() {
        let report = ingest("a,b\nnan,1\nNULL,na\n,2\n");
        let column = report.store.column("a").expect("column a");
        assert_eq!(column.missing_count(), 3);
        let column = report.store.column("b").expect("column b");
        assert_eq!(column.missing_count(), 1);
    }

    #[test]
    fn custom_null_tokens_replace_the_defaults() {
        let options = IngestOptions {
            null_tokens: vec!["?".to_string()],
            ..IngestOptions::default()
        };
        let report = ingest_str("a\n?\nNA\n", &options).expect("ingest");
        let column = report.store.column("a").expect("column a");
        assert_eq!(column.missing_count(), 1);
        assert_eq!(column.values()[1].as_deref(), Some("NA"));
    }

    #[test]
    fn short_rows_pad_with_missing_cells() {
        let report = ingest("a,b,c\n1,2\n");
        assert_eq!(report.store.row_count(), 1);
        assert_eq!(report.store.row(0), Some(vec![Some("1"), Some("2"), None]));
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn wide_rows_are_skipped_and_counted() {
        let report = ingest("a,b\n1,2\n1,2,3\n4,5\n");
        assert_eq!(report.store.row_count(), 2);
        assert_eq!(report.skipped_rows(), 1);
        assert!(matches!(
            report.warnings[0],
            IngestError::RowWidthMismatch {
                row: 2,
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn empty_input_yields_an_empty_store() {
        let report = ingest_str(
            "",
            &IngestOptions {
                has_header: false,
                ..IngestOptions::default()
            },
        )
        .expect("ingest");
        assert!(report.store.is_empty());
        assert_eq!(report.store.row_count(), 0);
    }

    #[test]
    fn quoted_fields_keep_embedded_delimiters() {
        let report = ingest("a,b\n\"1,5\",x\n");
        let column = report.store.column("a").expect("column a");
        assert_eq!(column.values()[0].as_deref(), Some("1,5"));
    }
}
