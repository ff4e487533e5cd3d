use regex::Regex;

use super::error::FilterError;
use super::features::{JOB_TITLE, SALARY_NUMERIC};
use super::model::{RecordTable, Value};

pub const COMPANY_NAME: &str = "company_name";
pub const LOCATION: &str = "location";

// ---------------------------------------------------------------------------
// Filter parameters supplied by the widgets
// ---------------------------------------------------------------------------

/// Raw user input for the four filters. Empty / `None` means "no filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterParams {
    /// Regular expression searched for in `job_title`.
    pub title_pattern: String,
    /// Inclusive `[min, max]` on `salary_numeric`.
    pub salary_range: Option<(f64, f64)>,
    /// Literal, case-sensitive substring of `company_name`.
    pub company_query: String,
    /// Exact `location` value.
    pub location: Option<Value>,
}

/// Observed salary extent of the full prepared table, fixed for the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryBounds {
    pub min: f64,
    pub max: f64,
}

impl SalaryBounds {
    /// `None` when no row has a numeric salary.
    pub fn from_table(table: &RecordTable) -> Option<Self> {
        table
            .column(SALARY_NUMERIC)
            .and_then(|c| c.min_max())
            .map(|(min, max)| SalaryBounds { min, max })
    }
}

// ---------------------------------------------------------------------------
// Row predicates
// ---------------------------------------------------------------------------

/// One compiled, independent row predicate.
#[derive(Debug, Clone)]
pub enum RowFilter {
    TitlePattern(Regex),
    SalaryRange { min: f64, max: f64 },
    CompanySubstring(String),
    LocationEquals(Value),
}

impl RowFilter {
    pub fn name(&self) -> &'static str {
        match self {
            RowFilter::TitlePattern(_) => "title pattern",
            RowFilter::SalaryRange { .. } => "salary range",
            RowFilter::CompanySubstring(_) => "company substring",
            RowFilter::LocationEquals(_) => "location",
        }
    }

    /// Null or absent cells never match.
    pub fn keep(&self, table: &RecordTable, row: usize) -> bool {
        match self {
            RowFilter::TitlePattern(re) => table
                .value(row, JOB_TITLE)
                .and_then(Value::as_text)
                .is_some_and(|t| re.is_match(t)),
            RowFilter::SalaryRange { min, max } => table
                .value(row, SALARY_NUMERIC)
                .and_then(Value::as_f64)
                .is_some_and(|v| *min <= v && v <= *max),
            RowFilter::CompanySubstring(query) => table
                .value(row, COMPANY_NAME)
                .and_then(Value::as_text)
                .is_some_and(|c| c.contains(query.as_str())),
            RowFilter::LocationEquals(selected) => table
                .value(row, LOCATION)
                .is_some_and(|v| !v.is_null() && v == selected),
        }
    }
}

impl FilterParams {
    /// Compile the active filters in their fixed application order.
    pub fn compile(&self) -> Result<Vec<RowFilter>, FilterError> {
        let mut filters = Vec::new();
        if !self.title_pattern.is_empty() {
            let re = Regex::new(&self.title_pattern).map_err(|e| FilterError::InvalidPattern {
                pattern: self.title_pattern.clone(),
                message: e.to_string(),
            })?;
            filters.push(RowFilter::TitlePattern(re));
        }
        if let Some((min, max)) = self.salary_range {
            filters.push(RowFilter::SalaryRange { min, max });
        }
        if !self.company_query.is_empty() {
            filters.push(RowFilter::CompanySubstring(self.company_query.clone()));
        }
        if let Some(loc) = &self.location {
            filters.push(RowFilter::LocationEquals(loc.clone()));
        }
        Ok(filters)
    }
}

/// Narrow all rows through `filters` one after another.
pub fn narrow(table: &RecordTable, filters: &[RowFilter]) -> Vec<usize> {
    let mut rows: Vec<usize> = (0..table.len()).collect();
    for filter in filters {
        let before = rows.len();
        rows.retain(|&r| filter.keep(table, r));
        log::debug!("{} filter: {before} → {} rows", filter.name(), rows.len());
    }
    rows
}

/// Return indices of rows that pass every active filter.
pub fn filtered_indices(table: &RecordTable, params: &FilterParams) -> Result<Vec<usize>, FilterError> {
    let filters = params.compile()?;
    Ok(narrow(table, &filters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, ColumnKind};

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    fn table() -> RecordTable {
        RecordTable::from_columns(vec![
            Column::new(
                JOB_TITLE,
                ColumnKind::Categorical,
                vec![
                    text("Data Scientist"),
                    text("Senior Data Engineer"),
                    Value::Null,
                    text("Android Developer"),
                    text("data analyst"),
                ],
            ),
            Column::new(
                SALARY_NUMERIC,
                ColumnKind::Numeric,
                vec![
                    Value::Number(400_000.0),
                    Value::Number(1_800_000.0),
                    Value::Number(900_000.0),
                    Value::Null,
                    Value::Number(600_000.0),
                ],
            ),
            Column::new(
                COMPANY_NAME,
                ColumnKind::Categorical,
                vec![text("Acme Labs"), text("acme"), text("Globex"), Value::Null, text("Acme Labs")],
            ),
            Column::new(
                LOCATION,
                ColumnKind::Categorical,
                vec![text("Pune"), text("Pune"), Value::Null, text("Pune"), text("Delhi")],
            ),
        ])
    }

    #[test]
    fn no_params_keeps_everything() {
        let rows = filtered_indices(&table(), &FilterParams::default()).unwrap();
        assert_eq!(rows, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn title_pattern_is_a_regex_search() {
        let params = FilterParams {
            title_pattern: "^Data|Engineer$".into(),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&table(), &params).unwrap(), vec![0, 1]);
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let params = FilterParams {
            title_pattern: "(unclosed".into(),
            ..Default::default()
        };
        let err = filtered_indices(&table(), &params).unwrap_err();
        assert!(matches!(err, FilterError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn salary_range_is_inclusive_and_drops_nulls() {
        let params = FilterParams {
            salary_range: Some((400_000.0, 900_000.0)),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&table(), &params).unwrap(), vec![0, 2, 4]);
    }

    #[test]
    fn company_substring_is_literal_and_case_sensitive() {
        let params = FilterParams {
            company_query: "Acme".into(),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&table(), &params).unwrap(), vec![0, 4]);

        let params = FilterParams {
            company_query: "Ac.e".into(),
            ..Default::default()
        };
        assert!(filtered_indices(&table(), &params).unwrap().is_empty());
    }

    #[test]
    fn location_equality() {
        let params = FilterParams {
            location: Some(text("Delhi")),
            ..Default::default()
        };
        let t = table();
        let view = t.take_rows(&filtered_indices(&t, &params).unwrap());
        assert_eq!(view.len(), 1);
        assert_eq!(view.value(0, JOB_TITLE), Some(&text("data analyst")));
    }

    #[test]
    fn null_location_never_matches() {
        let t = table();
        assert_eq!(t.value(2, LOCATION), Some(&Value::Null));
        for location in [text("Pune"), text("Delhi"), Value::Null] {
            let params = FilterParams {
                location: Some(location),
                ..Default::default()
            };
            assert!(!filtered_indices(&t, &params).unwrap().contains(&2));
        }
    }

    #[test]
    fn filters_commute() {
        let t = table();
        let params = FilterParams {
            title_pattern: "(?i)data".into(),
            salary_range: Some((500_000.0, 2_000_000.0)),
            company_query: "Acme".into(),
            location: Some(text("Delhi")),
        };
        let filters = params.compile().unwrap();
        let expected = narrow(&t, &filters);
        assert_eq!(expected, vec![4]);

        // Every rotation and the full reversal give the same rows.
        for shift in 0..filters.len() {
            let mut reordered = filters.clone();
            reordered.rotate_left(shift);
            assert_eq!(narrow(&t, &reordered), expected);
            reordered.reverse();
            assert_eq!(narrow(&t, &reordered), expected);
        }
    }

    #[test]
    fn salary_bounds_from_table() {
        assert_eq!(
            SalaryBounds::from_table(&table()),
            Some(SalaryBounds {
                min: 400_000.0,
                max: 1_800_000.0
            })
        );
        assert_eq!(SalaryBounds::from_table(&RecordTable::default()), None);
    }
}
