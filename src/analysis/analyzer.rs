use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::{
    group_summary, partition_by, pivot_count, rank, summarize, Aggregate, Direction,
    GroupHighlights, GroupSummary, PivotTable, Ranked,
};
use crate::config::ColumnConfig;
use crate::error::ParkError;
use crate::models::{Dataset, Record};

/// Per-district statistics with the dataset-wide aggregate and headline districts.
#[derive(Debug, Clone, Serialize)]
pub struct DistrictOverview {
    pub summary: GroupSummary,
    pub overall: Aggregate,
    pub highlights: Option<GroupHighlights>,
}

/// Per-type statistics with the district by type record counts.
#[derive(Debug, Clone, Serialize)]
pub struct TypeBreakdown {
    pub summary: GroupSummary,
    pub heatmap: PivotTable,
}

/// Park-report API over a dataset, using the configured column names.
pub struct Analyzer<'a> {
    dataset: &'a Dataset,
    columns: ColumnConfig,
}

impl<'a> Analyzer<'a> {
    /// Create a new Analyzer for the given dataset.
    pub fn new(dataset: &'a Dataset, columns: ColumnConfig) -> Self {
        Self { dataset, columns }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn columns(&self) -> &ColumnConfig {
        &self.columns
    }

    /// Count, total, mean, max and min park area per district.
    pub fn district_summary(&self) -> Result<GroupSummary, ParkError> {
        group_summary(self.dataset, &self.columns.district, &self.columns.area)
    }

    /// Park count and area statistics per park type.
    pub fn type_summary(&self) -> Result<GroupSummary, ParkError> {
        group_summary(self.dataset, &self.columns.park_type, &self.columns.area)
    }

    /// Area statistics over every park.
    pub fn overall(&self) -> Result<Aggregate, ParkError> {
        summarize(self.dataset, &self.columns.area)
    }

    /// The `n` largest parks by area.
    pub fn largest(&self, n: usize) -> Result<Vec<Ranked<'a>>, ParkError> {
        rank(self.dataset, &self.columns.area, n, Direction::Largest)
    }

    /// The `n` smallest parks by area.
    pub fn smallest(&self, n: usize) -> Result<Vec<Ranked<'a>>, ParkError> {
        rank(self.dataset, &self.columns.area, n, Direction::Smallest)
    }

    /// District by park-type record counts.
    pub fn district_type_heatmap(&self) -> Result<PivotTable, ParkError> {
        pivot_count(self.dataset, &self.columns.district, &self.columns.park_type)
    }

    /// Parks of each district, in input order.
    pub fn parks_by_district(&self) -> Result<BTreeMap<String, Vec<&'a Record>>, ParkError> {
        partition_by(self.dataset, &self.columns.district)
    }

    /// `(park name, area)` pairs for each district, in input order.
    ///
    /// Every area is validated, so a malformed cell reports its row.
    pub fn district_park_areas(&self) -> Result<BTreeMap<String, Vec<(String, f64)>>, ParkError> {
        let ds = self.dataset;
        ds.require_column(&self.columns.name)?;
        ds.require_column(&self.columns.district)?;
        ds.require_column(&self.columns.area)?;

        let mut out: BTreeMap<String, Vec<(String, f64)>> = BTreeMap::new();
        for row in 0..ds.len() {
            let district = ds.category(row, &self.columns.district)?;
            let name = ds.category(row, &self.columns.name)?;
            let area = ds.numeric(row, &self.columns.area)?;
            out.entry(district).or_default().push((name, area));
        }
        Ok(out)
    }

    /// District summary, overall area statistics and highlights together.
    pub fn district_overview(&self) -> Result<DistrictOverview, ParkError> {
        let summary = self.district_summary()?;
        let overall = self.overall()?;
        let highlights = summary.highlights();
        Ok(DistrictOverview {
            summary,
            overall,
            highlights,
        })
    }

    /// Type summary and district by type heatmap together.
    pub fn type_breakdown(&self) -> Result<TypeBreakdown, ParkError> {
        Ok(TypeBreakdown {
            summary: self.type_summary()?,
            heatmap: self.district_type_heatmap()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::top_n;
    use crate::models::Value;

    fn columns() -> ColumnConfig {
        ColumnConfig {
            name: "name".into(),
            district: "district".into(),
            park_type: "type".into(),
            area: "area".into(),
        }
    }

    fn park(name: &str, district: &str, kind: &str, area: i64) -> Record {
        Record::from_pairs([
            ("name", Value::from(name)),
            ("district", Value::from(district)),
            ("type", Value::from(kind)),
            ("area", Value::from(area)),
        ])
    }

    fn sample() -> Dataset {
        Dataset::new(
            "Analyzer Test",
            vec!["name".into(), "district".into(), "type".into(), "area".into()],
            vec![
                park("P1", "Mapo-gu", "Neighborhood", 1200),
                park("P2", "Mapo-gu", "Children", 300),
                park("P3", "Jung-gu", "Neighborhood", 2900),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_district_summary_matches_standalone() {
        let ds = sample();
        let analyzer = Analyzer::new(&ds, columns());
        assert_eq!(
            analyzer.district_summary().unwrap(),
            group_summary(&ds, "district", "area").unwrap()
        );
    }

    #[test]
    fn test_type_summary() {
        let ds = sample();
        let summary = Analyzer::new(&ds, columns()).type_summary().unwrap();
        assert_eq!(summary.get("Neighborhood").unwrap().count, 2);
        assert_eq!(summary.get("Children").unwrap().sum, 300.0);
    }

    #[test]
    fn test_largest_and_smallest_match_top_n() {
        let ds = sample();
        let analyzer = Analyzer::new(&ds, columns());
        let largest: Vec<&Record> = analyzer
            .largest(2)
            .unwrap()
            .into_iter()
            .map(|r| r.record)
            .collect();
        assert_eq!(largest, top_n(&ds, "area", 2, false).unwrap());
        let smallest = analyzer.smallest(1).unwrap();
        assert_eq!(smallest[0].row, 1);
    }

    #[test]
    fn test_heatmap_and_partition() {
        let ds = sample();
        let analyzer = Analyzer::new(&ds, columns());
        let heat = analyzer.district_type_heatmap().unwrap();
        assert_eq!(heat.get("Mapo-gu", "Children"), 1);
        assert_eq!(heat.get("Jung-gu", "Children"), 0);

        let parts = analyzer.parks_by_district().unwrap();
        assert_eq!(parts["Mapo-gu"].len(), 2);
        assert_eq!(parts["Jung-gu"].len(), 1);
    }

    #[test]
    fn test_district_park_areas_in_input_order() {
        let ds = sample();
        let areas = Analyzer::new(&ds, columns()).district_park_areas().unwrap();
        assert_eq!(
            areas["Mapo-gu"],
            vec![("P1".to_string(), 1200.0), ("P2".to_string(), 300.0)]
        );
    }

    #[test]
    fn test_district_overview() {
        let ds = sample();
        let overview = Analyzer::new(&ds, columns()).district_overview().unwrap();
        assert_eq!(overview.summary.total_count(), 3);
        assert_eq!(overview.overall.sum, 4400.0);
        let h = overview.highlights.unwrap();
        assert_eq!(h.largest_total.0, "Jung-gu");
        assert_eq!(h.smallest_total.0, "Mapo-gu");
    }

    #[test]
    fn test_type_breakdown() {
        let ds = sample();
        let breakdown = Analyzer::new(&ds, columns()).type_breakdown().unwrap();
        assert_eq!(breakdown.summary.len(), 2);
        assert_eq!(breakdown.heatmap.total(), 3);
    }

    #[test]
    fn test_overall() {
        let ds = sample();
        let agg = Analyzer::new(&ds, columns()).overall().unwrap();
        assert_eq!(agg.count, 3);
        assert_eq!(agg.max, 2900.0);
    }

    #[test]
    fn test_analyzer_missing_configured_column() {
        let ds = sample();
        let analyzer = Analyzer::new(&ds, ColumnConfig::default());
        assert!(matches!(
            analyzer.district_summary(),
            Err(ParkError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_analyzer_empty_dataset() {
        let ds = Dataset::empty("Empty", vec!["district".into(), "area".into(), "type".into()]);
        let analyzer = Analyzer::new(&ds, columns());
        assert!(matches!(
            analyzer.district_summary(),
            Err(ParkError::EmptyDataset(_))
        ));
        assert!(analyzer.largest(3).unwrap().is_empty());
        assert!(analyzer.district_type_heatmap().unwrap().is_empty());
    }
}
