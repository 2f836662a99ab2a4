use serde::Serialize;

use super::{Record, Value};
use crate::error::ParkError;

/// An ordered collection of park records sharing one schema.
///
/// Construction checks that every record carries exactly the schema's columns,
/// so any column that passes [`Dataset::require_column`] is present on every record.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    /// Name or identifier for this dataset (usually the source file stem)
    pub name: String,
    columns: Vec<String>,
    records: Vec<Record>,
    label_column: Option<String>,
}

impl Dataset {
    /// Create a dataset, validating each record against the column list.
    ///
    /// # Examples
    ///
    /// ```
    /// use park_inventory_analyzer::{Dataset, Record, Value};
    ///
    /// let records = vec![
    ///     Record::from_pairs([("district", Value::from("A")), ("area", Value::Integer(10))]),
    ///     Record::from_pairs([("district", Value::from("B")), ("area", Value::Integer(5))]),
    /// ];
    /// let ds = Dataset::new("parks", vec!["district".into(), "area".into()], records).unwrap();
    /// assert_eq!(ds.len(), 2);
    /// ```
    pub fn new(
        name: impl Into<String>,
        columns: Vec<String>,
        records: Vec<Record>,
    ) -> Result<Self, ParkError> {
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].contains(column) {
                return Err(ParkError::ParseError(format!(
                    "Duplicate column name '{column}'"
                )));
            }
        }

        for (row, record) in records.iter().enumerate() {
            if let Some(missing) = columns.iter().find(|c| !record.contains(c)) {
                return Err(ParkError::SchemaMismatch {
                    row,
                    detail: format!("missing column '{missing}'"),
                });
            }
            if record.len() != columns.len() {
                let extra = record
                    .columns()
                    .find(|c| !columns.iter().any(|s| s == *c))
                    .unwrap_or_default()
                    .to_string();
                return Err(ParkError::SchemaMismatch {
                    row,
                    detail: format!("unexpected column '{extra}'"),
                });
            }
        }

        Ok(Self {
            name: name.into(),
            columns,
            records,
            label_column: None,
        })
    }

    /// An empty dataset with the given schema.
    pub fn empty(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            records: Vec::new(),
            label_column: None,
        }
    }

    /// Use `column` to identify records in error messages (typically the park name).
    pub fn with_label_column(mut self, column: impl Into<String>) -> Result<Self, ParkError> {
        let column = column.into();
        self.require_column(&column)?;
        self.label_column = Some(column);
        Ok(self)
    }

    /// Column names in schema order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Records in input order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The configured label column, if any.
    pub fn label_column(&self) -> Option<&str> {
        self.label_column.as_deref()
    }

    /// Whether `column` belongs to the schema.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Fail with `MissingColumn` unless `column` belongs to the schema.
    pub fn require_column(&self, column: &str) -> Result<(), ParkError> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(ParkError::MissingColumn {
                column: column.to_string(),
            })
        }
    }

    /// Human-readable identity of the record at `row`, from the label column.
    pub fn label_of(&self, row: usize) -> Option<String> {
        let column = self.label_column.as_deref()?;
        self.records.get(row)?.get(column).map(Value::to_string)
    }

    /// Numeric value of `column` for the record at `row`.
    ///
    /// Fails with `MalformedValue` when the cell is not a finite number.
    pub fn numeric(&self, row: usize, column: &str) -> Result<f64, ParkError> {
        let value = self.value(row, column)?;
        value.as_f64().ok_or_else(|| ParkError::MalformedValue {
            row,
            label: self.label_of(row),
            column: column.to_string(),
            value: value.to_string(),
        })
    }

    /// Category key of `column` for the record at `row`.
    pub fn category(&self, row: usize, column: &str) -> Result<String, ParkError> {
        Ok(self.value(row, column)?.to_string())
    }

    fn value(&self, row: usize, column: &str) -> Result<&Value, ParkError> {
        self.records
            .get(row)
            .and_then(|r| r.get(column))
            .ok_or_else(|| ParkError::MissingColumn {
                column: column.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn park(name: &str, district: &str, area: Value) -> Record {
        Record::from_pairs([
            ("name", Value::from(name)),
            ("district", Value::from(district)),
            ("area", area),
        ])
    }

    fn columns() -> Vec<String> {
        vec!["name".into(), "district".into(), "area".into()]
    }

    fn sample() -> Dataset {
        Dataset::new(
            "sample",
            columns(),
            vec![
                park("Namsan", "Jung-gu", Value::Integer(2900)),
                park("Dosan", "Gangnam-gu", Value::Text("N/A".into())),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_new_dataset() {
        let ds = sample();
        assert_eq!(ds.name, "sample");
        assert_eq!(ds.len(), 2);
        assert!(!ds.is_empty());
        assert_eq!(ds.columns(), &["name", "district", "area"]);
        assert!(ds.label_column().is_none());
    }

    #[test]
    fn test_new_rejects_missing_column() {
        let bad = Record::from_pairs([("name", Value::from("X")), ("area", Value::Integer(1))]);
        let err = Dataset::new("bad", columns(), vec![bad]).unwrap_err();
        match err {
            ParkError::SchemaMismatch { row, detail } => {
                assert_eq!(row, 0);
                assert!(detail.contains("district"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_new_rejects_extra_column() {
        let mut recs = vec![park("A", "B", Value::Integer(1))];
        recs.push(Record::from_pairs([
            ("name", Value::from("X")),
            ("district", Value::from("Y")),
            ("area", Value::Integer(2)),
            ("type", Value::from("Z")),
        ]));
        let err = Dataset::new("bad", columns(), recs).unwrap_err();
        match err {
            ParkError::SchemaMismatch { row, detail } => {
                assert_eq!(row, 1);
                assert!(detail.contains("type"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_new_rejects_duplicate_columns() {
        let cols = vec!["a".to_string(), "a".to_string()];
        assert!(matches!(
            Dataset::new("dup", cols, vec![]),
            Err(ParkError::ParseError(_))
        ));
    }

    #[test]
    fn test_require_column() {
        let ds = sample();
        assert!(ds.require_column("area").is_ok());
        assert!(matches!(
            ds.require_column("type"),
            Err(ParkError::MissingColumn { column }) if column == "type"
        ));
    }

    #[test]
    fn test_with_label_column_unknown() {
        assert!(sample().with_label_column("park_name").is_err());
    }

    #[test]
    fn test_numeric_ok() {
        let ds = sample();
        assert_eq!(ds.numeric(0, "area").unwrap(), 2900.0);
    }

    #[test]
    fn test_numeric_malformed_carries_label() {
        let ds = sample().with_label_column("name").unwrap();
        match ds.numeric(1, "area").unwrap_err() {
            ParkError::MalformedValue {
                row,
                label,
                column,
                value,
            } => {
                assert_eq!(row, 1);
                assert_eq!(label.as_deref(), Some("Dosan"));
                assert_eq!(column, "area");
                assert_eq!(value, "N/A");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_category() {
        let ds = sample();
        assert_eq!(ds.category(1, "district").unwrap(), "Gangnam-gu");
    }

    #[test]
    fn test_empty() {
        let ds = Dataset::empty("none", columns());
        assert!(ds.is_empty());
        assert!(ds.has_column("area"));
        assert!(ds.label_of(0).is_none());
    }
}
