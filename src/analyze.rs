//! Pipeline orchestration: frozen store in, [`AnalysisResults`] out.
//!
//! Once the store is frozen the per-column analyzers are pure functions of
//! one column each, so they fan out over a rayon parallel iterator; the
//! row-duplicate scan reads the whole store but shares nothing with them and
//! runs alongside. Results are collected back in header order, keeping the
//! output deterministic regardless of scheduling.

use indexmap::IndexMap;
use log::info;
use rayon::prelude::*;
use thiserror::Error;

use crate::{
    categorical::{self, CategoricalAnalysis},
    duplicates::{self, DuplicateAnalysis},
    infer,
    numerical::{self, NumericalAnalysis},
    quality,
    report::{self, AnalysisResults},
    store::{Column, ColumnStore, Dtype},
};

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("dataset has no columns to analyze")]
    EmptyDataset,
}

struct ColumnReport {
    name: String,
    duplicate: DuplicateAnalysis,
    numerical: Option<NumericalAnalysis>,
    categorical: Option<CategoricalAnalysis>,
    missing_values: usize,
}

fn profile_column(column: &Column) -> ColumnReport {
    let dtype = match column.dtype() {
        Dtype::Unknown => infer::infer_dtype(column),
        annotated => annotated,
    };
    let duplicate = duplicates::analyze(column);
    let (numerical, categorical, missing_values) = match dtype {
        Dtype::Numeric => {
            let analysis = numerical::analyze(column);
            let missing = analysis.missing_values;
            (Some(analysis), None, missing)
        }
        _ => {
            let analysis = categorical::analyze(column);
            let missing = analysis.missing_values;
            (None, Some(analysis), missing)
        }
    };
    ColumnReport {
        name: column.name().to_string(),
        duplicate,
        numerical,
        categorical,
        missing_values,
    }
}

/// Runs every analyzer over the frozen store and assembles the final report.
///
/// The only fatal condition is a store with zero columns; degenerate columns
/// (empty, all-missing) narrow their analysis fields instead of erroring.
pub fn analyze(
    store: &ColumnStore,
    analysis_id: Option<String>,
) -> Result<AnalysisResults, AnalyzeError> {
    if store.is_empty() {
        return Err(AnalyzeError::EmptyDataset);
    }
    info!(
        "Analyzing {} row(s) across {} column(s)",
        store.row_count(),
        store.column_count()
    );

    let (profiles, duplicate_rows) = rayon::join(
        || {
            store
                .columns()
                .par_iter()
                .map(profile_column)
                .collect::<Vec<_>>()
        },
        || quality::count_duplicate_rows(store),
    );

    let mut duplicate_analysis = IndexMap::with_capacity(profiles.len());
    let mut numerical_analysis = IndexMap::new();
    let mut categorical_analysis = IndexMap::new();
    let mut missing_by_column = IndexMap::with_capacity(profiles.len());
    for profile in profiles {
        missing_by_column.insert(profile.name.clone(), profile.missing_values);
        duplicate_analysis.insert(profile.name.clone(), profile.duplicate);
        if let Some(analysis) = profile.numerical {
            numerical_analysis.insert(profile.name, analysis);
        } else if let Some(analysis) = profile.categorical {
            categorical_analysis.insert(profile.name, analysis);
        }
    }

    let data_quality = quality::aggregate(duplicate_rows, missing_by_column);
    Ok(report::assemble(
        store,
        analysis_id,
        duplicate_analysis,
        numerical_analysis,
        categorical_analysis,
        data_quality,
    ))
}
