mod aggregate;
mod ranking;
mod pivot;
mod analyzer;

pub use aggregate::{
    group_summary, partition_by, summarize, Aggregate, GroupHighlights, GroupSummary, Metric,
};
pub use ranking::{parse_count, rank, top_n, Direction, Ranked};
pub use pivot::{pivot_count, PivotTable};
pub use analyzer::{Analyzer, DistrictOverview, TypeBreakdown};
