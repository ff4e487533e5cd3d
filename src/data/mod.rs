/// Data layer: table model, preparation pipeline, filtering and aggregates.
///
/// Architecture:
/// ```text
///   salary_dataset.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV, snake_case headers → RecordTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  fill missing values, coerce date columns
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ validate  │  required columns present? otherwise halt
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ features  │  salary_numeric, salary_band, group average, seniority
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  title regex, salary range, company, location → row indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ aggregate │  chart inputs
///   └──────────┘
/// ```

pub mod aggregate;
pub mod analysis;
pub mod clean;
pub mod error;
pub mod features;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod validate;
