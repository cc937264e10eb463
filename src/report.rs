//! Report assembly: metadata plus the finished per-column maps merged into
//! one immutable [`AnalysisResults`]. No computation happens here beyond the
//! metadata derivation; assembly is a pure merge that stamps the analysis id
//! and timestamp.

use std::{fs::File, io::BufReader, mem, path::Path};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    categorical::CategoricalAnalysis, duplicates::DuplicateAnalysis, infer,
    numerical::NumericalAnalysis, quality::DataQuality, store::ColumnStore,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub total_rows: usize,
    pub total_columns: usize,
    /// Column names in header order.
    pub columns: Vec<String>,
    pub data_types: IndexMap<String, String>,
    pub memory_usage_bytes: u64,
}

impl Metadata {
    pub fn from_store(store: &ColumnStore) -> Self {
        let columns: Vec<String> = store.column_names().map(str::to_string).collect();
        let data_types = store
            .columns()
            .iter()
            .map(|column| (column.name().to_string(), infer::dtype_label(column).to_string()))
            .collect();
        Self {
            total_rows: store.row_count(),
            total_columns: store.column_count(),
            columns,
            data_types,
            memory_usage_bytes: estimate_memory(store),
        }
    }
}

/// Token byte lengths plus a fixed per-cell overhead for the `Option<String>`
/// slot itself. An estimate, not an allocator measurement.
fn estimate_memory(store: &ColumnStore) -> u64 {
    let cell_overhead = mem::size_of::<Option<String>>() as u64;
    store
        .columns()
        .iter()
        .map(|column| {
            let tokens: u64 = column.non_missing().map(|token| token.len() as u64).sum();
            tokens + cell_overhead * column.len() as u64
        })
        .sum()
}

/// The sole artifact returned to callers; immutable once assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    pub analysis_id: String,
    pub analysis_timestamp: DateTime<Utc>,
    pub metadata: Metadata,
    pub duplicate_analysis: IndexMap<String, DuplicateAnalysis>,
    /// Numeric columns only; mutually exclusive with the categorical map.
    pub numerical_analysis: IndexMap<String, NumericalAnalysis>,
    pub categorical_analysis: IndexMap<String, CategoricalAnalysis>,
    pub data_quality: DataQuality,
}

impl AnalysisResults {
    /// Persists the report as a pretty-printed JSON document.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).with_context(|| format!("Creating report file {path:?}"))?;
        serde_json::to_writer_pretty(file, self).context("Writing report JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening report file {path:?}"))?;
        let reader = BufReader::new(file);
        let results = serde_json::from_reader(reader).context("Parsing report JSON")?;
        Ok(results)
    }
}

pub fn assemble(
    store: &ColumnStore,
    analysis_id: Option<String>,
    duplicate_analysis: IndexMap<String, DuplicateAnalysis>,
    numerical_analysis: IndexMap<String, NumericalAnalysis>,
    categorical_analysis: IndexMap<String, CategoricalAnalysis>,
    data_quality: DataQuality,
) -> AnalysisResults {
    AnalysisResults {
        analysis_id: analysis_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        analysis_timestamp: Utc::now(),
        metadata: Metadata::from_store(store),
        duplicate_analysis,
        numerical_analysis,
        categorical_analysis,
        data_quality,
    }
}
