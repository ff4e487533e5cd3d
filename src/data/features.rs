use std::collections::HashMap;

use super::error::FeatureError;
use super::model::{Column, ColumnKind, RecordTable, Value};

pub const SALARY: &str = "salary";
pub const SALARY_NUMERIC: &str = "salary_numeric";
pub const SALARY_BAND: &str = "salary_band";
pub const SALARIES_REPORTED: &str = "salaries_reported";
pub const SALARIES_PER_REPORTED: &str = "salaries_per_reported";
pub const JOB_TITLE: &str = "job_title";
pub const JOB_SENIORITY: &str = "job_seniority";

// ---------------------------------------------------------------------------
// Salary text → number
// ---------------------------------------------------------------------------

/// Literal substitutions applied to raw salary text, in order.
/// `k` is expanded textually to three zeros, not multiplied.
const SALARY_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("₹", ""),
    ("/yr", ""),
    (",", ""),
    ("mo", ""),
    ("k", "000"),
];

/// Clean raw salary text the way the dataset encodes it; `None` if unparsable.
///
/// `"₹500000/yr"` → `500000.0`, `"₹50k"` → `50000.0`.
pub fn parse_salary(raw: &str) -> Option<f64> {
    let cleaned = SALARY_SUBSTITUTIONS
        .iter()
        .fold(raw.to_string(), |s, (from, to)| s.replace(from, to));
    cleaned.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn salary_cell_to_number(cell: &Value) -> Option<f64> {
    match cell {
        Value::Number(_) => cell.as_f64(),
        Value::Text(s) => parse_salary(s),
        Value::Date(_) | Value::Null => None,
    }
}

// ---------------------------------------------------------------------------
// Salary bands
// ---------------------------------------------------------------------------

/// Left-closed salary bands in currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SalaryBand {
    Below5L,
    From5To10L,
    From10To15L,
    From15To20L,
    Above20L,
}

impl SalaryBand {
    pub const ALL: [SalaryBand; 5] = [
        SalaryBand::Below5L,
        SalaryBand::From5To10L,
        SalaryBand::From10To15L,
        SalaryBand::From15To20L,
        SalaryBand::Above20L,
    ];

    /// Lower bound of each band in [`Self::ALL`] order.
    const LOWER_BOUNDS: [f64; 5] = [0.0, 500_000.0, 1_000_000.0, 1_500_000.0, 2_000_000.0];

    pub fn label(self) -> &'static str {
        match self {
            SalaryBand::Below5L => "<5L",
            SalaryBand::From5To10L => "5-10L",
            SalaryBand::From10To15L => "10-15L",
            SalaryBand::From15To20L => "15-20L",
            SalaryBand::Above20L => "20L+",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }

    /// Band containing `salary`; `None` below zero or for NaN.
    pub fn classify(salary: f64) -> Option<Self> {
        if salary.is_nan() || salary < 0.0 {
            return None;
        }
        Self::ALL
            .into_iter()
            .zip(Self::LOWER_BOUNDS)
            .rev()
            .find(|(_, lower)| salary >= *lower)
            .map(|(band, _)| band)
    }
}

// ---------------------------------------------------------------------------
// Seniority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seniority {
    Junior,
    Senior,
    MidLevel,
}

impl Seniority {
    const SENIOR_MARKERS: [&'static str; 3] = ["senior", "lead", "manager"];

    /// First matching rule wins: "junior", then any senior marker, else mid-level.
    pub fn from_title(title: &str) -> Self {
        let lower = title.to_lowercase();
        if lower.contains("junior") {
            Seniority::Junior
        } else if Self::SENIOR_MARKERS.iter().any(|m| lower.contains(m)) {
            Seniority::Senior
        } else {
            Seniority::MidLevel
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Seniority::Junior => "Junior",
            Seniority::Senior => "Senior",
            Seniority::MidLevel => "Mid-level",
        }
    }
}

// ---------------------------------------------------------------------------
// Derivation steps
// ---------------------------------------------------------------------------

fn require<'a>(table: &'a RecordTable, step: &'static str, column: &str) -> Result<&'a Column, FeatureError> {
    table.column(column).ok_or_else(|| FeatureError::MissingColumn {
        step,
        column: column.to_string(),
    })
}

/// `salary` → `salary_numeric`.
pub fn add_salary_numeric(mut table: RecordTable) -> Result<RecordTable, FeatureError> {
    let salary = require(&table, "salary normalization", SALARY)?;
    let values = salary
        .values
        .iter()
        .map(|c| Value::from_option(salary_cell_to_number(c)))
        .collect();
    table.set_column(Column::new(SALARY_NUMERIC, ColumnKind::Numeric, values));
    Ok(table)
}

/// `salary_numeric` → `salary_band`.
pub fn add_salary_band(mut table: RecordTable) -> Result<RecordTable, FeatureError> {
    let numeric = require(&table, "salary banding", SALARY_NUMERIC)?;
    let values = numeric
        .values
        .iter()
        .map(|c| match c.as_f64().and_then(SalaryBand::classify) {
            Some(band) => Value::Text(band.label().to_string()),
            None => Value::Null,
        })
        .collect();
    table.set_column(Column::new(SALARY_BAND, ColumnKind::Categorical, values));
    Ok(table)
}

/// Name of the column written by [`add_group_average`].
pub fn group_average_column(group_column: &str) -> String {
    format!("avg_salary_by_{group_column}")
}

/// Broadcast the per-group mean of `salary_numeric` onto every row of the group.
pub fn add_group_average(mut table: RecordTable, group_column: &str) -> Result<RecordTable, FeatureError> {
    let step = "grouped average";
    let keys = require(&table, step, group_column)?;
    let numeric = require(&table, step, SALARY_NUMERIC)?;

    let values: Vec<Value> = {
        let mut sums: HashMap<&Value, (f64, usize)> = HashMap::new();
        for (key, cell) in keys.values.iter().zip(&numeric.values) {
            if key.is_null() {
                continue;
            }
            let entry = sums.entry(key).or_insert((0.0, 0));
            if let Some(v) = cell.as_f64() {
                entry.0 += v;
                entry.1 += 1;
            }
        }
        keys.values
            .iter()
            .map(|key| match sums.get(key) {
                Some(&(sum, count)) if count > 0 => Value::Number(sum / count as f64),
                _ => Value::Null,
            })
            .collect()
    };
    table.set_column(Column::new(group_average_column(group_column), ColumnKind::Numeric, values));
    Ok(table)
}

/// Raw `salary` divided by `salaries_reported`.
///
/// Reads the raw salary cell, not `salary_numeric`: a text salary such as
/// `"₹500000/yr"` gives null here even though it parses in step one.
pub fn add_salaries_per_reported(mut table: RecordTable) -> Result<RecordTable, FeatureError> {
    let values: Vec<Value> = match table.column(SALARIES_REPORTED) {
        Some(reported) => {
            let salary = require(&table, "per-report salary", SALARY)?;
            salary
                .values
                .iter()
                .zip(&reported.values)
                .map(|(s, r)| match (raw_number(s), r.as_f64()) {
                    (Some(s), Some(r)) if r != 0.0 => Value::Number(s / r),
                    _ => Value::Null,
                })
                .collect()
        }
        None => {
            log::warn!("Column '{SALARIES_REPORTED}' is missing, defaulting to null");
            vec![Value::Null; table.len()]
        }
    };
    table.set_column(Column::new(SALARIES_PER_REPORTED, ColumnKind::Numeric, values));
    Ok(table)
}

/// A raw cell used as-is in arithmetic. Only numeric cells qualify; text never
/// divides, even when it spells a plain number.
fn raw_number(cell: &Value) -> Option<f64> {
    match cell {
        Value::Number(_) => cell.as_f64(),
        Value::Text(_) | Value::Date(_) | Value::Null => None,
    }
}

/// `job_title` → `job_seniority`. A null title is mid-level.
pub fn add_job_seniority(mut table: RecordTable) -> Result<RecordTable, FeatureError> {
    let titles = require(&table, "seniority extraction", JOB_TITLE)?;
    let values = titles
        .values
        .iter()
        .map(|t| {
            let level = Seniority::from_title(t.as_text().unwrap_or_default());
            Value::Text(level.label().to_string())
        })
        .collect();
    table.set_column(Column::new(JOB_SENIORITY, ColumnKind::Categorical, values));
    Ok(table)
}

/// Run every derivation in order; each step may read columns written by earlier ones.
pub fn derive_features(table: RecordTable, group_column: &str) -> Result<RecordTable, FeatureError> {
    let table = add_salary_numeric(table)?;
    let table = add_salary_band(table)?;
    let table = add_group_average(table, group_column)?;
    let table = add_salaries_per_reported(table)?;
    add_job_seniority(table)
}
