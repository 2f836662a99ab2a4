use std::path::Path;

use crate::error::ParkError;
use crate::models::{Dataset, Record, Value};

use super::dataset_name;

fn json_to_value(row: usize, column: &str, v: serde_json::Value) -> Result<Value, ParkError> {
    Ok(match v {
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::Text(s),
        serde_json::Value::Bool(b) => Value::Text(b.to_string()),
        serde_json::Value::Null => Value::Text(String::new()),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            return Err(ParkError::ParseError(format!(
                "Record {row}: column '{column}' holds a nested value; records must be flat"
            )))
        }
    })
}

fn parse_json_records(content: &str, name: String) -> Result<Dataset, ParkError> {
    let rows: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_str(content)?;

    let columns: Vec<String> = rows
        .first()
        .map(|first| first.keys().cloned().collect())
        .unwrap_or_default();

    let mut records = Vec::with_capacity(rows.len());
    for (row, object) in rows.into_iter().enumerate() {
        let pairs = object
            .into_iter()
            .map(|(column, v)| {
                let value = json_to_value(row, &column, v)?;
                Ok((column, value))
            })
            .collect::<Result<Vec<_>, ParkError>>()?;
        records.push(Record::from_pairs(pairs));
    }

    tracing::debug!(records = records.len(), "parsed JSON dataset '{name}'");
    Dataset::new(name, columns, records)
}

/// Read a park dataset from a JSON file holding an array of flat objects.
///
/// The schema is taken from the first object; every other object must carry the
/// same keys.
pub fn read_json(path: impl AsRef<Path>) -> Result<Dataset, ParkError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    parse_json_records(&content, dataset_name(path))
}

/// Read a park dataset from JSON bytes.
pub fn read_json_from_bytes(data: &[u8], name: &str) -> Result<Dataset, ParkError> {
    let content = std::str::from_utf8(data)
        .map_err(|e| ParkError::ParseError(format!("Invalid UTF-8: {e}")))?;
    parse_json_records(content, name.to_string())
}

/// Write dataset records to a JSON file as an array of objects.
pub fn write_json(
    dataset: &Dataset,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), ParkError> {
    let content = if pretty {
        serde_json::to_string_pretty(dataset.records())?
    } else {
        serde_json::to_string(dataset.records())?
    };
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"name": "Namsan", "district": "Jung-gu", "area": 2900},
        {"name": "Dosan", "district": "Gangnam-gu", "area": 30.5},
        {"name": "Unknown", "district": "Mapo-gu", "area": "N/A"}
    ]"#;

    #[test]
    fn test_read_json_from_bytes() {
        let ds = read_json_from_bytes(SAMPLE.as_bytes(), "parks").unwrap();
        assert_eq!(ds.len(), 3);
        assert!(ds.has_column("district"));
        assert_eq!(ds.records()[0].get("area"), Some(&Value::Integer(2900)));
        assert_eq!(ds.records()[1].get("area"), Some(&Value::Float(30.5)));
        assert_eq!(
            ds.records()[2].get("area"),
            Some(&Value::Text("N/A".to_string()))
        );
    }

    #[test]
    fn test_bool_and_null_become_text() {
        let ds = read_json_from_bytes(br#"[{"open": true, "note": null}]"#, "x").unwrap();
        assert_eq!(ds.records()[0].get("open"), Some(&Value::from("true")));
        assert_eq!(ds.records()[0].get("note"), Some(&Value::from("")));
    }

    #[test]
    fn test_nested_value_rejected() {
        let err = read_json_from_bytes(br#"[{"area": [1, 2]}]"#, "x").unwrap_err();
        assert!(err.to_string().contains("nested"));
    }

    #[test]
    fn test_inconsistent_keys_rejected() {
        let data = br#"[{"name": "A", "area": 1}, {"name": "B"}]"#;
        assert!(matches!(
            read_json_from_bytes(data, "x"),
            Err(ParkError::SchemaMismatch { row: 1, .. })
        ));
    }

    #[test]
    fn test_empty_array() {
        let ds = read_json_from_bytes(b"[]", "none").unwrap();
        assert!(ds.is_empty());
        assert!(ds.columns().is_empty());
    }

    #[test]
    fn test_not_an_array() {
        assert!(matches!(
            read_json_from_bytes(br#"{"area": 1}"#, "x"),
            Err(ParkError::Json(_))
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        assert!(matches!(
            read_json_from_bytes(&[0xff, 0xfe], "x"),
            Err(ParkError::ParseError(_))
        ));
    }

    #[test]
    fn test_write_then_read_file() {
        let ds = read_json_from_bytes(SAMPLE.as_bytes(), "parks").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parks.json");
        write_json(&ds, &path, true).unwrap();

        let loaded = read_json(&path).unwrap();
        assert_eq!(loaded.name, "parks");
        assert_eq!(loaded.records(), ds.records());
    }
}
