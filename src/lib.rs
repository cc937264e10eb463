//! Columnar CSV profiling engine.
//!
//! csv-profiler ingests delimited text into a frozen column store, infers a
//! dtype per column, and profiles the dataset: per-column duplicate
//! statistics, descriptive statistics for numeric columns, distribution
//! statistics for categorical columns, and dataset-wide quality metrics
//! (missingness, whole-row duplication), all merged into one serializable
//! [`AnalysisResults`].
//!
//! ```
//! use csv_profiler::{IngestOptions, profile_str};
//!
//! # fn main() -> anyhow::Result<()> {
//! let text = "x,y\n1,red\n2,blue\n1,red\n";
//! let profile = profile_str(text, &IngestOptions::default(), None)?;
//! assert_eq!(profile.results.metadata.total_rows, 3);
//! assert_eq!(profile.results.data_quality.complete_duplicates_count, 1);
//! # Ok(())
//! # }
//! ```

pub mod analyze;
pub mod categorical;
pub mod duplicates;
pub mod infer;
pub mod ingest;
pub mod io_utils;
pub mod numerical;
pub mod quality;
pub mod report;
pub mod store;

use std::{env, path::Path, sync::OnceLock};

use anyhow::{Context, Result};
use log::{LevelFilter, info};

pub use analyze::{AnalyzeError, analyze};
pub use ingest::{IngestError, IngestOptions, IngestReport, ingest_path, ingest_reader, ingest_str};
pub use report::{AnalysisResults, Metadata};
pub use store::{Column, ColumnStore, Dtype};

static LOGGER: OnceLock<()> = OnceLock::new();

/// Opt-in logger setup for embedding applications that do not configure
/// `env_logger` themselves. Safe to call more than once.
pub fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_profiler", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

/// A finished profiling run: the report plus any rows skipped during
/// ingestion (already logged as warnings).
#[derive(Debug)]
pub struct Profile {
    pub results: AnalysisResults,
    pub warnings: Vec<IngestError>,
}

impl Profile {
    pub fn skipped_rows(&self) -> usize {
        self.warnings.len()
    }
}

/// Ingests, annotates, and analyzes a file in one call.
pub fn profile_path(
    path: &Path,
    options: &IngestOptions,
    analysis_id: Option<String>,
) -> Result<Profile> {
    let report =
        ingest::ingest_path(path, options).with_context(|| format!("Ingesting {path:?}"))?;
    finish(report, analysis_id)
}

/// Ingests, annotates, and analyzes in-memory text in one call.
pub fn profile_str(
    text: &str,
    options: &IngestOptions,
    analysis_id: Option<String>,
) -> Result<Profile> {
    let report = ingest::ingest_str(text, options).context("Ingesting text input")?;
    finish(report, analysis_id)
}

fn finish(report: IngestReport, analysis_id: Option<String>) -> Result<Profile> {
    let IngestReport {
        mut store,
        warnings,
    } = report;
    infer::annotate(&mut store);
    let results = analyze::analyze(&store, analysis_id).context("Analyzing dataset")?;
    info!(
        "Profiled dataset {}: {} column(s), {} skipped row(s)",
        results.analysis_id,
        results.metadata.total_columns,
        warnings.len()
    );
    Ok(Profile { results, warnings })
}
