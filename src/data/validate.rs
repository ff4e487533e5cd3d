use super::error::ValidationError;
use super::model::RecordTable;

/// Required columns when the configuration names none.
pub const DEFAULT_REQUIRED_COLUMNS: &[&str] = &["company_name", "job_title", "location", "salary"];

/// Expected-schema descriptor: the column names a table must carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredColumns(Vec<String>);

impl RequiredColumns {
    /// Use `configured` if present, otherwise [`DEFAULT_REQUIRED_COLUMNS`].
    pub fn from_config(configured: Option<&[String]>) -> Self {
        match configured {
            Some(cols) => RequiredColumns(cols.to_vec()),
            None => RequiredColumns(DEFAULT_REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect()),
        }
    }

    /// Check column presence only; cell contents are not inspected.
    pub fn validate(&self, table: &RecordTable) -> Result<(), ValidationError> {
        let missing: Vec<String> = self
            .0
            .iter()
            .filter(|c| !table.has_column(c))
            .cloned()
            .collect();
        if missing.is_empty() {
            log::info!("Data validation passed");
            Ok(())
        } else {
            log::error!("Missing required columns: {missing:?}");
            Err(ValidationError { missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, ColumnKind, Value};

    fn table_with(names: &[&str]) -> RecordTable {
        RecordTable::from_columns(
            names
                .iter()
                .map(|n| Column::new(*n, ColumnKind::Categorical, vec![Value::Null]))
                .collect(),
        )
    }

    #[test]
    fn default_columns_pass() {
        let required = RequiredColumns::from_config(None);
        let table = table_with(&["company_name", "job_title", "location", "salary", "rating"]);
        assert!(required.validate(&table).is_ok());
    }

    #[test]
    fn reports_every_missing_column() {
        let required = RequiredColumns::from_config(None);
        let err = required.validate(&table_with(&["company_name", "salary"])).unwrap_err();
        assert_eq!(err.missing, vec!["job_title", "location"]);
    }

    #[test]
    fn configured_list_overrides_default() {
        let configured = vec!["salary".to_string()];
        let required = RequiredColumns::from_config(Some(configured.as_slice()));
        assert_eq!(required, RequiredColumns(configured.clone()));
        assert!(required.validate(&table_with(&["salary"])).is_ok());
    }
}
