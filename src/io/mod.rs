mod csv_io;
mod json_io;
mod excel_io;

use std::path::Path;

use crate::error::ParkError;
use crate::models::Dataset;

pub use csv_io::{read_csv, read_csv_from_bytes, write_csv};
pub use json_io::{read_json, read_json_from_bytes, write_json};
pub use excel_io::{read_excel, read_excel_from_bytes, write_excel, write_summary_excel};

/// Trait for reading a park dataset from a file.
pub trait DatasetReader {
    fn read(&self, path: &Path) -> Result<Dataset, ParkError>;
}

/// Trait for writing a park dataset to a file.
pub trait DatasetWriter {
    fn write(&self, dataset: &Dataset, path: &Path) -> Result<(), ParkError>;
}

/// CSV format reader/writer.
pub struct CsvFormat;

impl DatasetReader for CsvFormat {
    fn read(&self, path: &Path) -> Result<Dataset, ParkError> {
        read_csv(path)
    }
}

impl DatasetWriter for CsvFormat {
    fn write(&self, dataset: &Dataset, path: &Path) -> Result<(), ParkError> {
        write_csv(dataset, path)
    }
}

/// JSON format reader/writer.
#[derive(Default)]
pub struct JsonFormat {
    pub pretty: bool,
}

impl DatasetReader for JsonFormat {
    fn read(&self, path: &Path) -> Result<Dataset, ParkError> {
        read_json(path)
    }
}

impl DatasetWriter for JsonFormat {
    fn write(&self, dataset: &Dataset, path: &Path) -> Result<(), ParkError> {
        write_json(dataset, path, self.pretty)
    }
}

/// Excel (.xlsx) format reader/writer.
pub struct ExcelFormat;

impl DatasetReader for ExcelFormat {
    fn read(&self, path: &Path) -> Result<Dataset, ParkError> {
        read_excel(path)
    }
}

impl DatasetWriter for ExcelFormat {
    fn write(&self, dataset: &Dataset, path: &Path) -> Result<(), ParkError> {
        write_excel(dataset, path)
    }
}

/// Pick a reader from the file extension (`.csv`, `.json`, `.xlsx`/`.xls`).
pub fn reader_for(path: &Path) -> Result<Box<dyn DatasetReader>, ParkError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => Ok(Box::new(CsvFormat)),
        "json" => Ok(Box::new(JsonFormat::default())),
        "xlsx" | "xls" => Ok(Box::new(ExcelFormat)),
        _ => Err(ParkError::InvalidParameter(format!(
            "Unsupported file format: .{ext}. Use .csv, .json, or .xlsx"
        ))),
    }
}

/// Pick a writer from the file extension (`.csv`, `.json`, `.xlsx`).
pub fn writer_for(path: &Path, pretty: bool) -> Result<Box<dyn DatasetWriter>, ParkError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => Ok(Box::new(CsvFormat)),
        "json" => Ok(Box::new(JsonFormat { pretty })),
        "xlsx" => Ok(Box::new(ExcelFormat)),
        _ => Err(ParkError::InvalidParameter(format!(
            "Unsupported output format: .{ext}. Use .csv, .json, or .xlsx"
        ))),
    }
}

/// Load a dataset, choosing the format by extension.
pub fn load_dataset(path: &Path) -> Result<Dataset, ParkError> {
    let dataset = reader_for(path)?.read(path)?;
    tracing::debug!(
        records = dataset.len(),
        columns = dataset.columns().len(),
        "loaded {}",
        path.display()
    );
    Ok(dataset)
}

/// Dataset name from a file path: its stem, or "Unknown".
pub(crate) fn dataset_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}
