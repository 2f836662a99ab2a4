use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ParkError;
use crate::models::{Dataset, Record};

/// Per-group derived statistics over one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

impl Aggregate {
    /// Summarize a non-empty slice of values.
    ///
    /// # Examples
    ///
    /// ```
    /// use park_inventory_analyzer::analysis::Aggregate;
    ///
    /// let agg = Aggregate::from_values(&[10.0, 30.0]).unwrap();
    /// assert_eq!(agg.count, 2);
    /// assert_eq!(agg.mean, 20.0);
    /// assert!(Aggregate::from_values(&[]).is_err());
    /// ```
    pub fn from_values(values: &[f64]) -> Result<Self, ParkError> {
        let mut iter = values.iter();
        let Some(&first) = iter.next() else {
            return Err(ParkError::EmptyDataset(
                "mean, max and min are undefined over zero values".to_string(),
            ));
        };
        let mut agg = AggregateBuilder::new(first);
        for &v in iter {
            agg.push(v);
        }
        Ok(agg.finish())
    }

    /// Value of the chosen metric.
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Count => self.count as f64,
            Metric::Sum => self.sum,
            Metric::Mean => self.mean,
            Metric::Max => self.max,
            Metric::Min => self.min,
        }
    }
}

/// Running accumulator; a group only exists once it has seen one value.
struct AggregateBuilder {
    count: usize,
    sum: f64,
    max: f64,
    min: f64,
}

impl AggregateBuilder {
    fn new(first: f64) -> Self {
        Self {
            count: 1,
            sum: first,
            max: first,
            min: first,
        }
    }

    fn push(&mut self, v: f64) {
        self.count += 1;
        self.sum += v;
        self.max = self.max.max(v);
        self.min = self.min.min(v);
    }

    fn finish(self) -> Aggregate {
        Aggregate {
            count: self.count,
            sum: self.sum,
            mean: self.sum / self.count as f64,
            max: self.max,
            min: self.min,
        }
    }
}

/// Which aggregate field to rank or chart by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Count,
    Sum,
    Mean,
    Max,
    Min,
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Count => write!(f, "Count"),
            Metric::Sum => write!(f, "Total"),
            Metric::Mean => write!(f, "Mean"),
            Metric::Max => write!(f, "Max"),
            Metric::Min => write!(f, "Min"),
        }
    }
}

/// Aggregates keyed by group, in sorted key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Column the dataset was partitioned by
    pub group_column: String,
    /// Numeric column the aggregates were computed over
    pub value_column: String,
    pub groups: BTreeMap<String, Aggregate>,
}

impl GroupSummary {
    pub fn get(&self, key: &str) -> Option<&Aggregate> {
        self.groups.get(key)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sum of per-group counts; equals the size of the summarized dataset.
    pub fn total_count(&self) -> usize {
        self.groups.values().map(|a| a.count).sum()
    }

    /// Sum of all group sums.
    pub fn grand_total(&self) -> f64 {
        self.groups.values().map(|a| a.sum).sum()
    }

    /// Fraction of the grand total held by `key`, in `0.0..=1.0`.
    pub fn share(&self, key: &str) -> Option<f64> {
        let total = self.grand_total();
        let agg = self.groups.get(key)?;
        Some(if total == 0.0 { 0.0 } else { agg.sum / total })
    }

    /// Fraction of all records that fall into `key`.
    pub fn count_share(&self, key: &str) -> Option<f64> {
        let total = self.total_count();
        let agg = self.groups.get(key)?;
        Some(agg.count as f64 / total as f64)
    }

    /// Groups ordered by `metric`. The sort is stable, so ties keep key order.
    pub fn ranked_by(&self, metric: Metric, descending: bool) -> Vec<(&str, &Aggregate)> {
        let mut ranked: Vec<(&str, &Aggregate)> =
            self.groups.iter().map(|(k, a)| (k.as_str(), a)).collect();
        if descending {
            ranked.sort_by(|a, b| b.1.metric(metric).total_cmp(&a.1.metric(metric)));
        } else {
            ranked.sort_by(|a, b| a.1.metric(metric).total_cmp(&b.1.metric(metric)));
        }
        ranked
    }

    /// Largest/smallest total and largest mean, or `None` for an empty summary.
    ///
    /// Ties go to the first group in key order.
    pub fn highlights(&self) -> Option<GroupHighlights> {
        let largest_first = self.ranked_by(Metric::Sum, true);
        let smallest_first = self.ranked_by(Metric::Sum, false);
        let by_mean = self.ranked_by(Metric::Mean, true);
        let (largest_key, largest) = largest_first.first()?;
        let (smallest_key, smallest) = smallest_first.first()?;
        let (mean_key, mean) = by_mean.first()?;
        Some(GroupHighlights {
            largest_total: (largest_key.to_string(), largest.sum),
            smallest_total: (smallest_key.to_string(), smallest.sum),
            largest_mean: (mean_key.to_string(), mean.mean),
        })
    }
}

/// Headline groups of a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupHighlights {
    pub largest_total: (String, f64),
    pub smallest_total: (String, f64),
    pub largest_mean: (String, f64),
}

/// Partition records by the category in `column`, keeping input order inside each group.
pub fn partition_by<'a>(
    dataset: &'a Dataset,
    column: &str,
) -> Result<BTreeMap<String, Vec<&'a Record>>, ParkError> {
    dataset.require_column(column)?;
    let mut groups: BTreeMap<String, Vec<&Record>> = BTreeMap::new();
    for (row, record) in dataset.records().iter().enumerate() {
        let key = dataset.category(row, column)?;
        groups.entry(key).or_default().push(record);
    }
    Ok(groups)
}

/// Per-group count, sum, mean, max and min of `value_column`.
///
/// Every record must hold a finite number in `value_column`; the first one that does
/// not aborts the computation with `MalformedValue`.
pub fn group_summary(
    dataset: &Dataset,
    group_column: &str,
    value_column: &str,
) -> Result<GroupSummary, ParkError> {
    dataset.require_column(group_column)?;
    dataset.require_column(value_column)?;
    if dataset.is_empty() {
        return Err(ParkError::EmptyDataset(format!(
            "cannot summarize '{value_column}' by '{group_column}' over zero records"
        )));
    }

    let mut builders: BTreeMap<String, AggregateBuilder> = BTreeMap::new();
    for row in 0..dataset.len() {
        let key = dataset.category(row, group_column)?;
        let value = dataset.numeric(row, value_column)?;
        match builders.get_mut(&key) {
            Some(b) => b.push(value),
            None => {
                builders.insert(key, AggregateBuilder::new(value));
            }
        }
    }

    tracing::debug!(
        groups = builders.len(),
        records = dataset.len(),
        "summarized '{value_column}' by '{group_column}'"
    );

    Ok(GroupSummary {
        group_column: group_column.to_string(),
        value_column: value_column.to_string(),
        groups: builders.into_iter().map(|(k, b)| (k, b.finish())).collect(),
    })
}

/// Aggregate of `value_column` over the whole dataset.
pub fn summarize(dataset: &Dataset, value_column: &str) -> Result<Aggregate, ParkError> {
    dataset.require_column(value_column)?;
    let values = (0..dataset.len())
        .map(|row| dataset.numeric(row, value_column))
        .collect::<Result<Vec<f64>, _>>()?;
    Aggregate::from_values(&values)
}
