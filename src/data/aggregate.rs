use std::collections::BTreeMap;

use super::features::{SalaryBand, SALARY_BAND, SALARY_NUMERIC};
use super::filter::COMPANY_NAME;
use super::model::{RecordTable, Value};

/// Mean `salary_numeric` per company, sorted by company name.
/// Companies without any numeric salary are left out.
pub fn avg_salary_by_company(table: &RecordTable) -> Vec<(String, f64)> {
    let (Some(companies), Some(salaries)) = (table.column(COMPANY_NAME), table.column(SALARY_NUMERIC)) else {
        return Vec::new();
    };
    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for (company, salary) in companies.values.iter().zip(&salaries.values) {
        if company.is_null() {
            continue;
        }
        if let Some(v) = salary.as_f64() {
            let entry = sums.entry(company.to_string()).or_insert((0.0, 0));
            entry.0 += v;
            entry.1 += 1;
        }
    }
    sums.into_iter()
        .map(|(company, (sum, count))| (company, sum / count as f64))
        .collect()
}

/// Row count per salary band, in band order, including empty bands.
pub fn salary_band_counts(table: &RecordTable) -> Vec<(SalaryBand, usize)> {
    let mut counts: BTreeMap<SalaryBand, usize> = SalaryBand::ALL.into_iter().map(|b| (b, 0)).collect();
    if let Some(bands) = table.column(SALARY_BAND) {
        for band in bands.values.iter().filter_map(Value::as_text).filter_map(SalaryBand::from_label) {
            *counts.entry(band).or_default() += 1;
        }
    }
    counts.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, ColumnKind};

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn company_means_skip_missing_salaries() {
        let table = RecordTable::from_columns(vec![
            Column::new(
                COMPANY_NAME,
                ColumnKind::Categorical,
                vec![text("Globex"), text("Acme"), text("Acme"), text("Initech")],
            ),
            Column::new(
                SALARY_NUMERIC,
                ColumnKind::Numeric,
                vec![Value::Number(10.0), Value::Number(1.0), Value::Number(3.0), Value::Null],
            ),
        ]);
        assert_eq!(
            avg_salary_by_company(&table),
            vec![("Acme".to_string(), 2.0), ("Globex".to_string(), 10.0)]
        );
    }

    #[test]
    fn band_counts_cover_all_bands() {
        let table = RecordTable::from_columns(vec![Column::new(
            SALARY_BAND,
            ColumnKind::Categorical,
            vec![text("<5L"), text("20L+"), Value::Null, text("<5L")],
        )]);
        assert_eq!(
            salary_band_counts(&table),
            vec![
                (SalaryBand::Below5L, 2),
                (SalaryBand::From5To10L, 0),
                (SalaryBand::From10To15L, 0),
                (SalaryBand::From15To20L, 0),
                (SalaryBand::Above20L, 1),
            ]
        );
    }

    #[test]
    fn empty_table_has_no_company_bars() {
        assert!(avg_salary_by_company(&RecordTable::default()).is_empty());
        assert_eq!(salary_band_counts(&RecordTable::default()).len(), 5);
    }
}
