use chrono::{NaiveDate, NaiveDateTime};

use super::model::{Column, ColumnKind, RecordTable, Value};

/// Sentinel written into missing categorical cells.
pub const UNKNOWN: &str = "Unknown";

// ---------------------------------------------------------------------------
// Missing-value fill
// ---------------------------------------------------------------------------

/// How missing cells of a column are replaced; chosen from the column's kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FillStrategy {
    /// Replace with the mean of the column's non-missing cells.
    Mean,
    /// Replace with a fixed text value.
    Sentinel(&'static str),
    /// Leave missing cells untouched.
    Keep,
}

impl FillStrategy {
    pub fn for_kind(kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Numeric => FillStrategy::Mean,
            ColumnKind::Categorical => FillStrategy::Sentinel(UNKNOWN),
            ColumnKind::Temporal => FillStrategy::Keep,
        }
    }

    fn apply(&self, column: &mut Column) {
        let replacement = match self {
            // Computed before any cell is written, so fills never feed back.
            FillStrategy::Mean => match column.mean() {
                Some(mean) => Value::Number(mean),
                None => return,
            },
            FillStrategy::Sentinel(text) => Value::Text((*text).to_string()),
            FillStrategy::Keep => return,
        };
        for cell in column.values.iter_mut().filter(|v| v.is_null()) {
            *cell = replacement.clone();
        }
    }
}

/// Fill missing cells in every column by its kind's [`FillStrategy`].
pub fn fill_missing(mut table: RecordTable) -> RecordTable {
    for column in table.columns_mut() {
        FillStrategy::for_kind(column.kind).apply(column);
    }
    log::info!("Handled missing values");
    table
}

// ---------------------------------------------------------------------------
// Type coercion
// ---------------------------------------------------------------------------

/// Parse every column whose name contains `"date"` with `format`.
///
/// Cells that fail to parse keep their value and produce a warning. A column
/// with at least one parsed cell is tagged [`ColumnKind::Temporal`].
pub fn coerce_dates(mut table: RecordTable, format: Option<&str>) -> RecordTable {
    let Some(format) = format else {
        return table;
    };
    for column in table.columns_mut().filter(|c| c.name.contains("date")) {
        let mut parsed_any = false;
        for (row, cell) in column.values.iter_mut().enumerate() {
            let Some(text) = cell.as_text() else {
                continue;
            };
            match parse_date(text.trim(), format) {
                Some(dt) => {
                    *cell = Value::Date(dt);
                    parsed_any = true;
                }
                None => log::warn!(
                    "Failed to parse date '{text}' in column {} row {row} with format '{format}'",
                    column.name
                ),
            }
        }
        if parsed_any {
            column.kind = ColumnKind::Temporal;
        }
    }
    log::info!("Data types set according to configuration");
    table
}

/// Accepts both date-time and date-only formats; dates land at midnight.
fn parse_date(text: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, format)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Fill then coerce, in that order.
pub fn clean(table: RecordTable, date_format: Option<&str>) -> RecordTable {
    coerce_dates(fill_missing(table), date_format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn numeric_fill_uses_pre_fill_mean() {
        let table = RecordTable::from_columns(vec![Column::new(
            "rating",
            ColumnKind::Numeric,
            vec![Value::Number(1.0), Value::Null, Value::Number(5.0), Value::Null],
        )]);
        let cleaned = fill_missing(table);
        let values = &cleaned.column("rating").unwrap().values;
        assert_eq!(
            values,
            &vec![Value::Number(1.0), Value::Number(3.0), Value::Number(5.0), Value::Number(3.0)]
        );
    }

    #[test]
    fn categorical_fill_uses_unknown() {
        let table = RecordTable::from_columns(vec![Column::new(
            "location",
            ColumnKind::Categorical,
            vec![text("Pune"), Value::Null],
        )]);
        let cleaned = fill_missing(table);
        assert_eq!(cleaned.value(1, "location"), Some(&text(UNKNOWN)));
    }

    #[test]
    fn all_null_numeric_column_stays_null() {
        let table = RecordTable::from_columns(vec![Column::new(
            "n",
            ColumnKind::Numeric,
            vec![Value::Null, Value::Null],
        )]);
        assert_eq!(fill_missing(table).value(0, "n"), Some(&Value::Null));
    }

    #[test]
    fn date_columns_parse_and_keep_failures() {
        let table = RecordTable::from_columns(vec![
            Column::new(
                "posted_date",
                ColumnKind::Categorical,
                vec![text("2023-01-15"), text("garbage")],
            ),
            Column::new("location", ColumnKind::Categorical, vec![text("2023-01-15"), text("x")]),
        ]);
        let cleaned = coerce_dates(table, Some("%Y-%m-%d"));
        let expected = NaiveDate::from_ymd_opt(2023, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(cleaned.value(0, "posted_date"), Some(&Value::Date(expected)));
        assert_eq!(cleaned.value(1, "posted_date"), Some(&text("garbage")));
        assert_eq!(cleaned.column("posted_date").unwrap().kind, ColumnKind::Temporal);
        // Only names containing "date" are touched.
        assert_eq!(cleaned.value(0, "location"), Some(&text("2023-01-15")));
    }

    #[test]
    fn no_format_skips_coercion() {
        let table = RecordTable::from_columns(vec![Column::new(
            "start_date",
            ColumnKind::Categorical,
            vec![text("2023-01-15")],
        )]);
        let cleaned = coerce_dates(table.clone(), None);
        assert_eq!(cleaned, table);
    }
}
