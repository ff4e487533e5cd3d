use std::path::Path;

use super::error::LoadError;
use super::model::{Column, ColumnKind, RecordTable, Value};
use crate::config::ColumnNameCase;

/// Cell spellings read as missing, in addition to the empty string.
const MISSING_MARKERS: &[&str] = &["NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the source CSV, converting every failure into an empty table.
///
/// The failure is logged; callers detect it with [`RecordTable::is_empty`].
pub fn load_table(path: &Path) -> RecordTable {
    log::info!("Attempting to load data from: {}", path.display());
    match load_csv(path) {
        Ok(table) => {
            log::info!(
                "Loaded {} rows; columns in dataset: {:?}",
                table.len(),
                table.column_names()
            );
            table
        }
        Err(e) => {
            log::error!("Error loading data: {e}");
            RecordTable::default()
        }
    }
}

/// CSV layout: one header row, then one record per line.
///
/// Headers are normalized with [`to_snake_case`] before anything else sees
/// them. A column whose non-missing cells all parse as numbers becomes
/// [`ColumnKind::Numeric`]; every other column is [`ColumnKind::Categorical`].
pub fn load_csv(path: &Path) -> Result<RecordTable, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let csv_err = |source: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(to_snake_case)
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::MissingHeader(path.to_path_buf()));
    }

    let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        for (col_idx, cells) in raw.iter_mut().enumerate() {
            cells.push(record.get(col_idx).and_then(non_missing));
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| typed_column(name, cells))
        .collect();
    Ok(RecordTable::from_columns(columns))
}

fn non_missing(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() || MISSING_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(cell.to_string())
    }
}

fn typed_column(name: String, cells: Vec<Option<String>>) -> Column {
    let numbers: Option<Vec<Option<f64>>> = cells
        .iter()
        .map(|c| match c {
            Some(s) => s.trim().parse::<f64>().ok().map(Some),
            None => Some(None),
        })
        .collect();

    match numbers {
        Some(nums) if nums.iter().any(Option::is_some) => Column::new(
            name,
            ColumnKind::Numeric,
            nums.into_iter().map(Value::from_option).collect(),
        ),
        _ => Column::new(
            name,
            ColumnKind::Categorical,
            cells
                .into_iter()
                .map(|c| c.map(Value::Text).unwrap_or(Value::Null))
                .collect(),
        ),
    }
}

// ---------------------------------------------------------------------------
// Column-name normalization
// ---------------------------------------------------------------------------

/// `"Company Name"` → `"company_name"`.
///
/// Runs of non-word characters collapse to a single underscore; leading and
/// trailing underscores are dropped.
pub fn to_snake_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_gap = false;
    for c in text.trim().chars() {
        if c.is_alphanumeric() || c == '_' {
            out.extend(c.to_lowercase());
            in_gap = false;
        } else if !in_gap {
            out.push('_');
            in_gap = true;
        }
    }
    out.trim_matches('_').to_string()
}

/// `"company_name"` → `"Company Name"`.
pub fn to_title_case(text: &str) -> String {
    text.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Header text shown to the user for a normalized column name.
pub fn display_name(column: &str, case: ColumnNameCase) -> String {
    match case {
        ColumnNameCase::Title => to_title_case(column),
        ColumnNameCase::Lower => column.to_lowercase(),
    }
}
