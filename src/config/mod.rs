/// Settings file and environment loading
pub mod settings;

/// Report source table with per-source column aliases
pub mod sources;

pub use settings::{Settings, load_settings};
pub use sources::{ColumnMap, ReportSource, default_report_sources};
