use std::collections::HashMap;

use super::model::{ColumnKind, RecordTable, Value};
use crate::config::{AnalysisConfig, OutlierMethod};

/// Descriptive statistics of one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `NaN` with fewer than two values.
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCounts {
    pub column: String,
    /// Most frequent values first; ties broken by value.
    pub top: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlierCount {
    pub column: String,
    pub outliers: usize,
    pub lower: f64,
    pub upper: f64,
}

/// Everything shown in the "Dataset summary" section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSummary {
    pub numeric: Vec<NumericSummary>,
    pub categories: Vec<CategoryCounts>,
    pub outliers: Vec<OutlierCount>,
}

impl DatasetSummary {
    pub fn compute(table: &RecordTable, config: &AnalysisConfig) -> Self {
        DatasetSummary {
            numeric: numeric_summary(table),
            categories: top_categories(table, config.top_n_categories),
            outliers: detect_outliers(table, config.outlier_detection_method, config.outlier_threshold),
        }
    }
}

fn numeric_values(values: &[Value]) -> Vec<f64> {
    values.iter().filter_map(Value::as_f64).collect()
}

fn mean_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if values.len() < 2 {
        return (mean, f64::NAN);
    }
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var.sqrt())
}

/// Linear-interpolated quantile of sorted data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

pub fn numeric_summary(table: &RecordTable) -> Vec<NumericSummary> {
    table
        .columns()
        .iter()
        .filter(|c| c.kind == ColumnKind::Numeric)
        .filter_map(|c| {
            let values = numeric_values(&c.values);
            let (min, max) = c.min_max()?;
            let (mean, std) = mean_std(&values);
            Some(NumericSummary {
                column: c.name.clone(),
                count: values.len(),
                mean,
                std,
                min,
                max,
            })
        })
        .collect()
}

pub fn top_categories(table: &RecordTable, top_n: usize) -> Vec<CategoryCounts> {
    table
        .columns()
        .iter()
        .filter(|c| c.kind == ColumnKind::Categorical)
        .map(|c| {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for v in c.values.iter().filter_map(Value::as_text) {
                *counts.entry(v).or_default() += 1;
            }
            let mut top: Vec<(String, usize)> = counts.into_iter().map(|(v, n)| (v.to_string(), n)).collect();
            top.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            top.truncate(top_n);
            CategoryCounts {
                column: c.name.clone(),
                top,
            }
        })
        .collect()
}

/// Count values outside the fences of `method` for every numeric column.
pub fn detect_outliers(table: &RecordTable, method: OutlierMethod, threshold: f64) -> Vec<OutlierCount> {
    table
        .columns()
        .iter()
        .filter(|c| c.kind == ColumnKind::Numeric)
        .filter_map(|c| {
            let mut values = numeric_values(&c.values);
            if values.is_empty() {
                return None;
            }
            let (lower, upper) = match method {
                OutlierMethod::Iqr => {
                    values.sort_by(f64::total_cmp);
                    let q1 = quantile(&values, 0.25);
                    let q3 = quantile(&values, 0.75);
                    let iqr = q3 - q1;
                    (q1 - threshold * iqr, q3 + threshold * iqr)
                }
                OutlierMethod::ZScore => {
                    let (mean, std) = mean_std(&values);
                    if std.is_nan() {
                        return None;
                    }
                    (mean - threshold * std, mean + threshold * std)
                }
            };
            let outliers = values.iter().filter(|&&v| v < lower || v > upper).count();
            Some(OutlierCount {
                column: c.name.clone(),
                outliers,
                lower,
                upper,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;

    fn numbers(name: &str, vals: &[f64]) -> Column {
        Column::new(name, ColumnKind::Numeric, vals.iter().map(|v| Value::Number(*v)).collect())
    }

    #[test]
    fn summary_matches_hand_computation() {
        let table = RecordTable::from_columns(vec![numbers("rating", &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0])]);
        let summary = numeric_summary(&table);
        assert_eq!(summary.len(), 1);
        let s = &summary[0];
        assert_eq!(s.count, 8);
        assert_eq!(s.mean, 5.0);
        assert!((s.std - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!((s.min, s.max), (2.0, 9.0));
    }

    #[test]
    fn top_categories_sorted_by_count() {
        let table = RecordTable::from_columns(vec![Column::new(
            "location",
            ColumnKind::Categorical,
            ["Pune", "Delhi", "Pune", "Goa", "Delhi", "Pune"]
                .iter()
                .map(|s| Value::Text(s.to_string()))
                .collect(),
        )]);
        let top = top_categories(&table, 2);
        assert_eq!(
            top[0].top,
            vec![("Pune".to_string(), 3), ("Delhi".to_string(), 2)]
        );
    }

    #[test]
    fn iqr_and_zscore_outliers() {
        let table = RecordTable::from_columns(vec![numbers("n", &[1.0, 2.0, 3.0, 4.0, 100.0])]);
        let iqr = detect_outliers(&table, OutlierMethod::Iqr, 1.5);
        // q1 = 2, q3 = 4, fences at -1 and 7.
        assert_eq!(iqr[0].outliers, 1);
        assert_eq!((iqr[0].lower, iqr[0].upper), (-1.0, 7.0));

        let z = detect_outliers(&table, OutlierMethod::ZScore, 3.0);
        assert_eq!(z[0].outliers, 0);
        let z = detect_outliers(&table, OutlierMethod::ZScore, 1.0);
        assert_eq!(z[0].outliers, 1);
    }
}
