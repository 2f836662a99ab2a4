use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::ParkError;
use crate::models::Dataset;

/// Dense cross-tabulation of record counts over two categorical columns.
///
/// Rows and columns are the distinct observed categories in sorted order; every
/// row/column pair has a cell, zero when no record falls into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotTable {
    pub row_column: String,
    pub col_column: String,
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    /// `counts[r][c]` is the number of records in `rows[r]` and `columns[c]`
    pub counts: Vec<Vec<usize>>,
}

impl PivotTable {
    /// Count for a pair of categories; zero for unknown categories.
    pub fn get(&self, row: &str, col: &str) -> usize {
        let r = self.rows.iter().position(|x| x == row);
        let c = self.columns.iter().position(|x| x == col);
        match (r, c) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }

    pub fn row_total(&self, row: &str) -> usize {
        self.rows
            .iter()
            .position(|x| x == row)
            .map(|r| self.counts[r].iter().sum())
            .unwrap_or(0)
    }

    pub fn column_total(&self, col: &str) -> usize {
        self.columns
            .iter()
            .position(|x| x == col)
            .map(|c| self.counts.iter().map(|row| row[c]).sum())
            .unwrap_or(0)
    }

    /// Total number of records counted.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Largest single cell, used to scale heatmap shading.
    pub fn max_count(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Count records per (`row_column`, `col_column`) category pair.
///
/// An empty dataset yields an empty table.
pub fn pivot_count(
    dataset: &Dataset,
    row_column: &str,
    col_column: &str,
) -> Result<PivotTable, ParkError> {
    dataset.require_column(row_column)?;
    dataset.require_column(col_column)?;

    let mut pairs: BTreeMap<(String, String), usize> = BTreeMap::new();
    let mut row_keys = BTreeSet::new();
    let mut col_keys = BTreeSet::new();
    for row in 0..dataset.len() {
        let r = dataset.category(row, row_column)?;
        let c = dataset.category(row, col_column)?;
        row_keys.insert(r.clone());
        col_keys.insert(c.clone());
        *pairs.entry((r, c)).or_insert(0) += 1;
    }

    let rows: Vec<String> = row_keys.into_iter().collect();
    let columns: Vec<String> = col_keys.into_iter().collect();
    let counts = rows
        .iter()
        .map(|r| {
            columns
                .iter()
                .map(|c| pairs.get(&(r.clone(), c.clone())).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    tracing::debug!(
        rows = rows.len(),
        columns = columns.len(),
        "pivoted '{row_column}' x '{col_column}'"
    );

    Ok(PivotTable {
        row_column: row_column.to_string(),
        col_column: col_column.to_string(),
        rows,
        columns,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Record, Value};

    fn park(district: &str, kind: &str) -> Record {
        Record::from_pairs([
            ("district", Value::from(district)),
            ("type", Value::from(kind)),
        ])
    }

    fn sample() -> Dataset {
        Dataset::new(
            "pivot",
            vec!["district".into(), "type".into()],
            vec![
                park("Mapo-gu", "Neighborhood"),
                park("Jongno-gu", "Children"),
                park("Mapo-gu", "Neighborhood"),
                park("Mapo-gu", "Children"),
                park("Jongno-gu", "Cultural"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_pivot_dense_and_sorted() {
        let table = pivot_count(&sample(), "district", "type").unwrap();
        assert_eq!(table.rows, vec!["Jongno-gu", "Mapo-gu"]);
        assert_eq!(table.columns, vec!["Children", "Cultural", "Neighborhood"]);
        assert_eq!(table.counts, vec![vec![1, 1, 0], vec![1, 0, 2]]);
    }

    #[test]
    fn test_pivot_get_defaults_to_zero() {
        let table = pivot_count(&sample(), "district", "type").unwrap();
        assert_eq!(table.get("Mapo-gu", "Neighborhood"), 2);
        assert_eq!(table.get("Mapo-gu", "Cultural"), 0);
        assert_eq!(table.get("Gangnam-gu", "Children"), 0);
    }

    #[test]
    fn test_pivot_totals() {
        let table = pivot_count(&sample(), "district", "type").unwrap();
        assert_eq!(table.total(), 5);
        assert_eq!(table.row_total("Mapo-gu"), 3);
        assert_eq!(table.column_total("Children"), 2);
        assert_eq!(table.row_total("Nowhere"), 0);
        assert_eq!(table.max_count(), 2);
    }

    #[test]
    fn test_pivot_empty_dataset() {
        let ds = Dataset::empty("none", vec!["district".into(), "type".into()]);
        let table = pivot_count(&ds, "district", "type").unwrap();
        assert!(table.is_empty());
        assert!(table.columns.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.max_count(), 0);
    }

    #[test]
    fn test_pivot_missing_column() {
        assert!(matches!(
            pivot_count(&sample(), "district", "area"),
            Err(ParkError::MissingColumn { column }) if column == "area"
        ));
    }

    #[test]
    fn test_pivot_same_column_is_diagonal() {
        let table = pivot_count(&sample(), "district", "district").unwrap();
        assert_eq!(table.counts, vec![vec![2, 0], vec![0, 3]]);
    }
}
