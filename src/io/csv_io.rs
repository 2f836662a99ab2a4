use std::io::Read;
use std::path::Path;

use crate::error::ParkError;
use crate::models::{Dataset, Record, Value};

use super::dataset_name;

fn parse_csv_records<R: Read>(
    rdr: &mut csv::Reader<R>,
    name: String,
) -> Result<Dataset, ParkError> {
    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if columns.is_empty() || columns.iter().all(String::is_empty) {
        return Err(ParkError::ParseError("CSV header row is empty".to_string()));
    }

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        records.push(Record::from_pairs(
            columns
                .iter()
                .zip(row.iter())
                .map(|(column, cell)| (column.clone(), Value::infer(cell))),
        ));
    }

    tracing::debug!(
        records = records.len(),
        columns = columns.len(),
        "parsed CSV dataset '{name}'"
    );
    Dataset::new(name, columns, records)
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).trim(csv::Trim::All);
    builder
}

/// Read a park dataset from a CSV file with a header row.
///
/// Every row must have as many fields as the header. Cells are typed as integer,
/// float or text by [`Value::infer`].
pub fn read_csv(path: impl AsRef<Path>) -> Result<Dataset, ParkError> {
    let path = path.as_ref();
    let mut rdr = reader_builder().from_path(path)?;
    parse_csv_records(&mut rdr, dataset_name(path))
}

/// Read a park dataset from CSV bytes.
pub fn read_csv_from_bytes(data: &[u8], name: &str) -> Result<Dataset, ParkError> {
    let mut rdr = reader_builder().from_reader(data);
    parse_csv_records(&mut rdr, name.to_string())
}

/// Text for a CSV cell. Floats keep a fractional part so they read back as floats.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Float(f) => format!("{f:?}"),
        other => other.to_string(),
    }
}

/// Write a dataset to a CSV file, columns in schema order.
pub fn write_csv(dataset: &Dataset, path: impl AsRef<Path>) -> Result<(), ParkError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    wtr.write_record(dataset.columns())?;

    for record in dataset.records() {
        wtr.write_record(
            dataset
                .columns()
                .iter()
                .map(|column| record.get(column).map(cell_text).unwrap_or_default()),
        )?;
    }

    wtr.flush()?;
    Ok(())
}
