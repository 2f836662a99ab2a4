pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod report;
pub mod visualization;

pub use analysis::Analyzer;
pub use config::{ColorScheme, ColumnConfig, Config, ReportOptions};
pub use error::ParkError;
pub use io::{DatasetReader, DatasetWriter};
pub use models::{Dataset, Record, Value};
