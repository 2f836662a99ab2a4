use serde::Serialize;

use crate::error::ParkError;
use crate::models::{Dataset, Record};

/// Direction of a ranked extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Largest values first (top N)
    Largest,
    /// Smallest values first (bottom N)
    Smallest,
}

impl Direction {
    pub fn is_ascending(self) -> bool {
        self == Direction::Smallest
    }
}

/// A record selected by [`top_n`], with its position in the dataset and its parsed value.
#[derive(Debug, Clone, Serialize)]
pub struct Ranked<'a> {
    pub row: usize,
    pub value: f64,
    pub record: &'a Record,
}

/// The `n` records with the largest (`ascending = false`) or smallest values in `value_column`.
///
/// The sort is stable: records with equal values keep their input order. Every record
/// is validated before sorting, so a malformed cell fails the call even if it would not
/// have been selected. Asking for more records than exist returns all of them, sorted.
///
/// # Examples
///
/// ```
/// use park_inventory_analyzer::{Dataset, Record, Value};
/// use park_inventory_analyzer::analysis::top_n;
///
/// let ds = Dataset::new(
///     "parks",
///     vec!["district".into(), "area".into()],
///     vec![
///         Record::from_pairs([("district", Value::from("A")), ("area", Value::Integer(10))]),
///         Record::from_pairs([("district", Value::from("A")), ("area", Value::Integer(30))]),
///         Record::from_pairs([("district", Value::from("B")), ("area", Value::Integer(5))]),
///     ],
/// )
/// .unwrap();
///
/// let smallest = top_n(&ds, "area", 2, true).unwrap();
/// assert_eq!(smallest[0].get("district"), Some(&Value::from("B")));
/// assert_eq!(smallest[1].get("area"), Some(&Value::Integer(10)));
/// ```
pub fn top_n<'a>(
    dataset: &'a Dataset,
    value_column: &str,
    n: usize,
    ascending: bool,
) -> Result<Vec<&'a Record>, ParkError> {
    let direction = if ascending {
        Direction::Smallest
    } else {
        Direction::Largest
    };
    Ok(rank(dataset, value_column, n, direction)?
        .into_iter()
        .map(|r| r.record)
        .collect())
}

/// Like [`top_n`], but keeps each record's row index and parsed value.
pub fn rank<'a>(
    dataset: &'a Dataset,
    value_column: &str,
    n: usize,
    direction: Direction,
) -> Result<Vec<Ranked<'a>>, ParkError> {
    dataset.require_column(value_column)?;

    let mut ranked = dataset
        .records()
        .iter()
        .enumerate()
        .map(|(row, record)| {
            Ok(Ranked {
                row,
                value: dataset.numeric(row, value_column)?,
                record,
            })
        })
        .collect::<Result<Vec<_>, ParkError>>()?;

    match direction {
        Direction::Smallest => ranked.sort_by(|a, b| a.value.total_cmp(&b.value)),
        Direction::Largest => ranked.sort_by(|a, b| b.value.total_cmp(&a.value)),
    }
    ranked.truncate(n);

    tracing::debug!(
        selected = ranked.len(),
        requested = n,
        ?direction,
        "ranked '{value_column}'"
    );
    Ok(ranked)
}

/// Parse a user-supplied record count (for example the N of a top-N report).
pub fn parse_count(raw: &str) -> Result<usize, ParkError> {
    raw.trim().parse::<usize>().map_err(|_| {
        ParkError::InvalidParameter(format!(
            "expected a non-negative whole number, got '{raw}'"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Value;

    fn park(name: &str, area: Value) -> Record {
        Record::from_pairs([("name", Value::from(name)), ("area", area)])
    }

    fn dataset(parks: Vec<Record>) -> Dataset {
        Dataset::new("ranked", vec!["name".into(), "area".into()], parks).unwrap()
    }

    fn names(records: &[&Record]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.get("name").unwrap().to_string())
            .collect()
    }

    fn sample() -> Dataset {
        dataset(vec![
            park("Namsan", Value::Integer(2900)),
            park("Seoul Forest", Value::Integer(4800)),
            park("Dosan", Value::Integer(30)),
            park("Haneul", Value::Float(190.5)),
            park("Marronnier", Value::Integer(30)),
        ])
    }

    #[test]
    fn test_top_n_largest() {
        let ds = sample();
        let top = top_n(&ds, "area", 2, false).unwrap();
        assert_eq!(names(&top), vec!["Seoul Forest", "Namsan"]);
    }

    #[test]
    fn test_top_n_smallest_ties_keep_input_order() {
        let ds = sample();
        let bottom = top_n(&ds, "area", 3, true).unwrap();
        assert_eq!(names(&bottom), vec!["Dosan", "Marronnier", "Haneul"]);
    }

    #[test]
    fn test_top_n_largest_ties_keep_input_order() {
        let ds = dataset(vec![
            park("first", Value::Integer(7)),
            park("second", Value::Integer(7)),
            park("third", Value::Integer(1)),
        ]);
        let top = top_n(&ds, "area", 2, false).unwrap();
        assert_eq!(names(&top), vec!["first", "second"]);
    }

    #[test]
    fn test_top_n_zero_is_empty() {
        let ds = sample();
        assert!(top_n(&ds, "area", 0, false).unwrap().is_empty());
        assert!(top_n(&ds, "area", 0, true).unwrap().is_empty());
    }

    #[test]
    fn test_top_n_exceeding_size_returns_all_sorted() {
        let ds = sample();
        let all = top_n(&ds, "area", 100, false).unwrap();
        assert_eq!(all.len(), ds.len());
        assert_eq!(
            names(&all),
            vec!["Seoul Forest", "Namsan", "Haneul", "Dosan", "Marronnier"]
        );
    }

    #[test]
    fn test_top_n_empty_dataset() {
        let ds = Dataset::empty("none", vec!["name".into(), "area".into()]);
        assert!(top_n(&ds, "area", 5, true).unwrap().is_empty());
    }

    #[test]
    fn test_top_n_missing_column() {
        let ds = sample();
        assert!(matches!(
            top_n(&ds, "size", 1, true),
            Err(ParkError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_top_n_malformed_anywhere_fails() {
        let ds = dataset(vec![
            park("big", Value::Integer(1000)),
            park("broken", Value::Text("n/a".into())),
        ])
        .with_label_column("name")
        .unwrap();
        match top_n(&ds, "area", 1, false).unwrap_err() {
            ParkError::MalformedValue { row, label, .. } => {
                assert_eq!(row, 1);
                assert_eq!(label.as_deref(), Some("broken"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rank_keeps_rows_and_values() {
        let ds = sample();
        let ranked = rank(&ds, "area", 1, Direction::Largest).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].row, 1);
        assert_eq!(ranked[0].value, 4800.0);
    }

    #[test]
    fn test_direction_ascending() {
        assert!(Direction::Smallest.is_ascending());
        assert!(!Direction::Largest.is_ascending());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("5").unwrap(), 5);
        assert_eq!(parse_count(" 0 ").unwrap(), 0);
        assert!(matches!(
            parse_count("-1"),
            Err(ParkError::InvalidParameter(_))
        ));
        assert!(parse_count("three").is_err());
        assert!(parse_count("2.5").is_err());
    }
}
