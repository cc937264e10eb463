//! Dtype inference over raw column tokens.
//!
//! A column is Numeric when every non-missing token matches the decimal
//! grammar below and at least one non-missing token exists; everything else
//! is Categorical, including pure-boolean columns (boolean survives only as
//! a metadata label). Inference is deterministic and total: no column is
//! left [`Dtype::Unknown`] after [`annotate`] runs.

use log::debug;

use crate::store::{Column, ColumnStore, Dtype};

/// Decimal-number grammar: optional leading sign, digits with at most one
/// decimal point and at least one digit, then an optional exponent with its
/// own optional sign. Deliberately narrower than `f64::from_str`, which also
/// admits `inf` and `nan` spellings.
pub fn is_numeric_token(token: &str) -> bool {
    let bytes = token.as_bytes();
    let mut rest = match bytes.split_first() {
        Some((&(b'+' | b'-'), tail)) => tail,
        _ => bytes,
    };
    let mut digits = 0usize;
    let mut seen_point = false;
    loop {
        match rest.split_first() {
            Some((&(b'0'..=b'9'), tail)) => {
                digits += 1;
                rest = tail;
            }
            Some((&b'.', tail)) if !seen_point => {
                seen_point = true;
                rest = tail;
            }
            Some((&(b'e' | b'E'), tail)) => {
                return digits > 0 && is_exponent(tail);
            }
            Some(_) => return false,
            None => return digits > 0,
        }
    }
}

fn is_exponent(bytes: &[u8]) -> bool {
    let rest = match bytes.split_first() {
        Some((&(b'+' | b'-'), tail)) => tail,
        _ => bytes,
    };
    !rest.is_empty() && rest.iter().all(u8::is_ascii_digit)
}

fn is_boolean_token(token: &str) -> bool {
    token.eq_ignore_ascii_case("true") || token.eq_ignore_ascii_case("false")
}

/// Decides the dtype of a single column. An all-missing column cannot be
/// proven numeric and defaults to Categorical.
pub fn infer_dtype(column: &Column) -> Dtype {
    let mut non_missing = 0usize;
    for token in column.non_missing() {
        if !is_numeric_token(token) {
            return Dtype::Categorical;
        }
        non_missing += 1;
    }
    if non_missing > 0 {
        Dtype::Numeric
    } else {
        Dtype::Categorical
    }
}

/// Annotates every column in the store with its inferred dtype.
pub fn annotate(store: &mut ColumnStore) {
    for column in store.columns_mut() {
        let dtype = infer_dtype(column);
        debug!("Inferred {dtype:?} for column '{}'", column.name());
        column.set_dtype(dtype);
    }
}

/// Metadata label for a column. Boolean is not a storage dtype, only a
/// labeling nuance for categorical columns whose tokens are all true/false.
pub fn dtype_label(column: &Column) -> &'static str {
    match column.dtype() {
        Dtype::Numeric => "numeric",
        Dtype::Unknown if infer_dtype(column) == Dtype::Numeric => "numeric",
        _ => {
            let mut tokens = column.non_missing().peekable();
            if tokens.peek().is_some() && tokens.all(is_boolean_token) {
                "boolean"
            } else {
                "categorical"
            }
        }
    }
}
