use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// Value – a single cell of the record table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.
/// Values key group-by maps and sort in tables, so `Value` is `Ord` and `Hash`.
#[derive(Debug, Clone)]
pub enum Value {
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
    /// Explicit "missing" marker, distinct from zero and from the empty string.
    Null,
}

/// Equality agrees with `Ord` and `Hash`: numbers compare by `total_cmp`, so
/// `0.0` and `-0.0` differ and `NaN` equals itself.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn rank(v: &Value) -> u8 {
            match v {
                Null => 0,
                Number(_) => 1,
                Date(_) => 2,
                Text(_) => 3,
            }
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Number(a), Number(b)) => a.total_cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Text(s) => s.hash(state),
            Value::Number(v) => v.to_bits().hash(state),
            Value::Date(d) => d.hash(state),
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{v:.0}"),
            Value::Number(v) => write!(f, "{v:.2}"),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d %H:%M:%S")),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl Value {
    /// Numeric view of the cell; `NaN` counts as missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null) || matches!(self, Value::Number(v) if v.is_nan())
    }

    /// Wrap an optional number, mapping `None` to the null sentinel.
    pub fn from_option(v: Option<f64>) -> Self {
        v.map(Value::Number).unwrap_or(Value::Null)
    }
}

// ---------------------------------------------------------------------------
// Column – a named, typed vector of cells
// ---------------------------------------------------------------------------

/// Type tag carried by every column; drives the missing-value fill strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Categorical,
    Temporal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Arithmetic mean of the non-null numeric cells.
    pub fn mean(&self) -> Option<f64> {
        let (sum, count) = self
            .values
            .iter()
            .filter_map(Value::as_f64)
            .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
        (count > 0).then(|| sum / count as f64)
    }

    /// Smallest and largest non-null numeric cell.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.values.iter().filter_map(Value::as_f64).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

// ---------------------------------------------------------------------------
// RecordTable – the dataset flowing through the pipeline
// ---------------------------------------------------------------------------

/// Column-major table with ordered columns and a name → position index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    columns: Vec<Column>,
    index: BTreeMap<String, usize>,
    rows: usize,
}

impl RecordTable {
    /// Build a table from columns of equal length.
    /// Later columns with a duplicate name replace earlier ones.
    pub fn from_columns(columns: Vec<Column>) -> Self {
        let mut table = RecordTable::default();
        for col in columns {
            table.set_column(col);
        }
        table
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> impl Iterator<Item = &mut Column> {
        self.columns.iter_mut()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    /// Cell at (`row`, `name`), `None` if the column does not exist.
    pub fn value(&self, row: usize, name: &str) -> Option<&Value> {
        self.column(name).and_then(|c| c.values.get(row))
    }

    /// Insert a column, or replace the existing column of the same name in place.
    ///
    /// The first column fixes the row count; a later column with a different
    /// length is padded with nulls or truncated so the table stays rectangular.
    pub fn set_column(&mut self, mut column: Column) {
        if self.columns.is_empty() {
            self.rows = column.values.len();
        } else if column.values.len() != self.rows {
            log::warn!(
                "Column '{}' has {} values for {} rows; resizing",
                column.name,
                column.values.len(),
                self.rows
            );
            column.values.resize(self.rows, Value::Null);
        }
        match self.index.get(&column.name) {
            Some(&i) => self.columns[i] = column,
            None => {
                self.index.insert(column.name.clone(), self.columns.len());
                self.columns.push(column);
            }
        }
    }

    /// New table containing only the given rows, in the given order.
    pub fn take_rows(&self, rows: &[usize]) -> RecordTable {
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                kind: c.kind,
                values: rows.iter().map(|&r| c.values[r].clone()).collect(),
            })
            .collect::<Vec<_>>();
        let mut table = RecordTable::from_columns(columns);
        table.rows = rows.len();
        table
    }
}
