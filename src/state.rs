use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::data::aggregate::{avg_salary_by_company, salary_band_counts};
use crate::data::error::FilterError;
use crate::data::features::SalaryBand;
use crate::data::filter::{filtered_indices, FilterParams};
use crate::data::model::RecordTable;
use crate::data::pipeline::{prepare, PreparedData};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
pub struct AppState {
    pub config: Config,

    /// File the current session was prepared from.
    pub source: PathBuf,

    /// Prepared dataset (None when preparation failed).
    pub data: Option<PreparedData>,

    /// Current widget values.
    pub params: FilterParams,

    /// Rows of `data.table` passing the last valid filter set.
    pub visible_indices: Vec<usize>,

    /// Filtered view handed to the charts and preview.
    pub view: RecordTable,
    pub company_means: Vec<(String, f64)>,
    pub band_counts: Vec<(SalaryBand, usize)>,

    /// Invalid filter input; the previous view stays in place meanwhile.
    pub filter_error: Option<FilterError>,

    /// Blocking error that replaces the dashboard.
    pub fatal_error: Option<String>,
}

impl AppState {
    /// Start a session from the configured source file.
    pub fn new(config: Config) -> Self {
        let source = config.data.source_file.clone();
        let mut state = Self {
            config,
            source: source.clone(),
            data: None,
            params: FilterParams::default(),
            visible_indices: Vec::new(),
            view: RecordTable::default(),
            company_means: Vec::new(),
            band_counts: Vec::new(),
            filter_error: None,
            fatal_error: None,
        };
        state.open(&source);
        state
    }

    /// (Re)initialise the session from `path`, resetting all filters.
    pub fn open(&mut self, path: &Path) {
        self.source = path.to_path_buf();
        self.params = FilterParams::default();
        self.filter_error = None;
        match prepare(&self.config, path) {
            Ok(data) => {
                log::info!("Using data from {}", path.display());
                self.params.salary_range = data.salary_bounds.map(|b| (b.min, b.max));
                self.params.location = data.locations.first().cloned();
                self.data = Some(data);
                self.fatal_error = None;
                self.refilter();
            }
            Err(e) => {
                log::error!("Session preparation failed: {e}");
                self.data = None;
                self.visible_indices.clear();
                self.view = RecordTable::default();
                self.company_means.clear();
                self.band_counts.clear();
                self.fatal_error = Some(e.to_string());
            }
        }
    }

    /// Recompute the filtered view after a widget change.
    ///
    /// On a filter error the previous view is kept and the error recorded.
    pub fn refilter(&mut self) {
        let Some(data) = &self.data else {
            return;
        };
        match filtered_indices(&data.table, &self.params) {
            Ok(rows) => {
                self.view = data.table.take_rows(&rows);
                self.company_means = avg_salary_by_company(&self.view);
                self.band_counts = salary_band_counts(&self.view);
                self.visible_indices = rows;
                self.filter_error = None;
            }
            Err(e) => {
                log::warn!("{e}");
                self.filter_error = Some(e);
            }
        }
    }

    pub fn total_rows(&self) -> usize {
        self.data.as_ref().map_or(0, |d| d.table.len())
    }
}
