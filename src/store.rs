//! Columnar storage for an ingested dataset.
//!
//! The [`ColumnStore`] is built once by ingestion and is read-only from then
//! on: analyzers fan out over immutable column references and never mutate
//! shared state. Cells are raw string tokens; a missing cell is `None`. Type
//! conversion never happens here — a [`Column`] carries an inferred [`Dtype`]
//! annotation but its storage stays untyped.

use std::collections::HashMap;

use anyhow::{Result, ensure};

/// Inferred semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dtype {
    /// Not yet annotated; only observable between ingestion and inference.
    Unknown,
    Numeric,
    Categorical,
}

/// A named column of raw optional tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: Dtype,
    values: Vec<Option<String>>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            dtype: Dtype::Unknown,
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> Dtype {
        self.dtype
    }

    pub(crate) fn set_dtype(&mut self, dtype: Dtype) {
        self.dtype = dtype;
    }

    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// Iterator over the non-missing tokens, in row order.
    pub fn non_missing(&self) -> impl Iterator<Item = &str> {
        self.values.iter().filter_map(|v| v.as_deref())
    }
}

/// Frozen columnar container: column name → column, in header order.
#[derive(Debug, Clone)]
pub struct ColumnStore {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
    row_count: usize,
}

impl ColumnStore {
    /// Builds a store from already-assembled columns, enforcing the two
    /// structural invariants: unique names and a uniform row count.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map_or(0, Column::len);
        let mut index = HashMap::with_capacity(columns.len());
        for (position, column) in columns.iter().enumerate() {
            ensure!(
                column.len() == row_count,
                "column '{}' has {} row(s) but the dataset has {}",
                column.name(),
                column.len(),
                row_count
            );
            ensure!(
                index.insert(column.name().to_string(), position).is_none(),
                "duplicate column name '{}'",
                column.name()
            );
        }
        Ok(Self {
            columns,
            index,
            row_count,
        })
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&idx| &self.columns[idx])
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    pub fn dtype(&self, name: &str) -> Option<Dtype> {
        self.column(name).map(Column::dtype)
    }

    /// Materializes one row as the ordered tuple of raw tokens.
    pub fn row(&self, index: usize) -> Option<Vec<Option<&str>>> {
        if index >= self.row_count {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|column| column.values()[index].as_deref())
                .collect(),
        )
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
