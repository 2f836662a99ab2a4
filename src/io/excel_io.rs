use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook, open_workbook_from_rs, Data, Range, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};

use crate::analysis::GroupSummary;
use crate::error::ParkError;
use crate::models::{Dataset, Record, Value};

use super::dataset_name;

fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Int(i) => Value::Integer(*i),
        Data::Float(f) => Value::Float(*f),
        Data::String(s) => Value::infer(s),
        Data::Bool(b) => Value::Text(b.to_string()),
        Data::Empty => Value::Text(String::new()),
        other => Value::Text(other.to_string()),
    }
}

fn first_sheet<R: Reader<RS>, RS>(workbook: &mut R) -> Result<Range<Data>, ParkError>
where
    R::Error: Into<ParkError>,
    RS: std::io::Read + std::io::Seek,
{
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ParkError::Excel("No sheets found in workbook".to_string()))?;

    workbook.worksheet_range(&sheet_name).map_err(Into::into)
}

fn range_to_dataset(range: &Range<Data>, name: String) -> Result<Dataset, ParkError> {
    let mut rows = range.rows();
    let columns: Vec<String> = rows
        .next()
        .ok_or_else(|| ParkError::Excel("Sheet has no header row".to_string()))?
        .iter()
        .map(|c| c.to_string().trim().to_string())
        .collect();

    let mut records = Vec::new();
    for (offset, row) in rows.enumerate() {
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            tracing::warn!("sheet row {}: empty, skipping", offset + 2);
            continue;
        }
        records.push(Record::from_pairs(
            columns
                .iter()
                .zip(row.iter())
                .map(|(column, cell)| (column.clone(), cell_to_value(cell))),
        ));
    }

    tracing::debug!(records = records.len(), "parsed Excel dataset '{name}'");
    Dataset::new(name, columns, records)
}

/// Read a park dataset from the first sheet of an Excel (.xlsx) file.
///
/// Row 1 holds the column names. Fully empty rows are skipped.
pub fn read_excel(path: impl AsRef<Path>) -> Result<Dataset, ParkError> {
    let path = path.as_ref();
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = first_sheet(&mut workbook)?;
    range_to_dataset(&range, dataset_name(path))
}

/// Read a park dataset from Excel bytes.
pub fn read_excel_from_bytes(data: &[u8], name: &str) -> Result<Dataset, ParkError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(data))?;
    let range = first_sheet(&mut workbook)?;
    range_to_dataset(&range, name.to_string())
}

/// Write dataset records to an Excel (.xlsx) file, columns in schema order.
pub fn write_excel(dataset: &Dataset, path: impl AsRef<Path>) -> Result<(), ParkError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, column) in dataset.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, column, &bold)?;
    }

    for (i, record) in dataset.records().iter().enumerate() {
        let row = i as u32 + 1;
        for (col, column) in dataset.columns().iter().enumerate() {
            let col = col as u16;
            match record.get(column) {
                Some(Value::Integer(v)) => {
                    worksheet.write_number(row, col, *v as f64)?;
                }
                Some(Value::Float(v)) => {
                    worksheet.write_number(row, col, *v)?;
                }
                Some(Value::Text(s)) => {
                    worksheet.write_string(row, col, s)?;
                }
                None => {}
            }
        }
    }

    workbook.save(path.as_ref())?;
    Ok(())
}

/// Write a group summary as a single-sheet workbook, one row per group.
pub fn write_summary_excel(
    summary: &GroupSummary,
    path: impl AsRef<Path>,
) -> Result<(), ParkError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Summary")?;
    let bold = Format::new().set_bold();
    let number = Format::new().set_num_format("#,##0.00");

    let headers = [
        summary.group_column.as_str(),
        "count",
        "sum",
        "mean",
        "max",
        "min",
        "share",
    ];
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }

    for (i, (key, agg)) in summary.groups.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet.write_string(row, 0, key)?;
        worksheet.write_number(row, 1, agg.count as f64)?;
        worksheet.write_number_with_format(row, 2, agg.sum, &number)?;
        worksheet.write_number_with_format(row, 3, agg.mean, &number)?;
        worksheet.write_number_with_format(row, 4, agg.max, &number)?;
        worksheet.write_number_with_format(row, 5, agg.min, &number)?;
        worksheet.write_number(row, 6, summary.share(key).unwrap_or(0.0))?;
    }

    workbook.save(path.as_ref())?;
    tracing::info!("wrote summary workbook {}", path.as_ref().display());
    Ok(())
}
