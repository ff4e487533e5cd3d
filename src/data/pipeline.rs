use std::path::Path;

use super::analysis::DatasetSummary;
use super::clean::clean;
use super::error::PipelineError;
use super::features::derive_features;
use super::filter::{SalaryBounds, LOCATION};
use super::loader::load_table;
use super::model::{RecordTable, Value};
use super::validate::RequiredColumns;
use crate::config::Config;

/// A fully derived table plus the session-wide facts the filters need.
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub table: RecordTable,
    /// Salary slider limits, from the whole table.
    pub salary_bounds: Option<SalaryBounds>,
    /// Distinct locations in first-seen order.
    pub locations: Vec<Value>,
    pub summary: DatasetSummary,
}

/// Load → clean → validate → derive.
///
/// Returns before derivation when the source is empty or validation fails.
pub fn prepare(config: &Config, source: &Path) -> Result<PreparedData, PipelineError> {
    let raw = load_table(source);
    if raw.is_empty() {
        return Err(PipelineError::EmptySource(source.to_path_buf()));
    }

    let cleaned = clean(raw, config.data.date_format.as_deref());

    RequiredColumns::from_config(config.data.required_columns.as_deref()).validate(&cleaned)?;

    let table = derive_features(cleaned, &config.data.group_column)?;
    log::info!(
        "Feature engineering applied; columns now {:?}",
        table.column_names()
    );

    let salary_bounds = SalaryBounds::from_table(&table);
    let locations = distinct_in_order(&table, LOCATION);
    let summary = DatasetSummary::compute(&table, &config.analysis);
    Ok(PreparedData {
        table,
        salary_bounds,
        locations,
        summary,
    })
}

fn distinct_in_order(table: &RecordTable, column: &str) -> Vec<Value> {
    let mut seen = std::collections::HashSet::new();
    table
        .column(column)
        .map(|c| {
            c.values
                .iter()
                .filter(|v| !v.is_null() && seen.insert(*v))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}
