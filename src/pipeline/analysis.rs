use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::model::Dataset;
use crate::pipeline::aggregate::{AggregateTable, GroupField, count_by_group_and_medal};
use crate::pipeline::distribution::{DistributionSummary, NumericField, numeric_distribution};
use crate::pipeline::filter::filter;
use crate::pipeline::histogram::{DEFAULT_MAX_BINS, Histogram};
use crate::pipeline::selection::FilterSelection;

/// Summary and binned counts for one numeric field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDistribution {
    pub field: NumericField,
    pub summary: DistributionSummary,
    pub histogram: Histogram,
}

/// Everything the presentation layer needs for one selection.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub generated_at: DateTime<Utc>,
    pub selection: FilterSelection,
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub medals_by_team: AggregateTable,
    pub medals_by_sport: AggregateTable,
    pub medals_by_year: AggregateTable,
    pub distributions: Vec<FieldDistribution>,
}

impl Analysis {
    /// Filters `dataset` once and derives all tables and distributions from the view.
    pub fn compute(dataset: &Dataset, selection: &FilterSelection) -> Self {
        let view = filter(dataset, selection);
        debug!(total = dataset.len(), filtered = view.len(), "Selection applied");

        let distributions = NumericField::ALL
            .iter()
            .map(|&field| {
                let values = numeric_distribution(&view, field);
                FieldDistribution {
                    field,
                    summary: DistributionSummary::from_values(&values),
                    histogram: Histogram::from_values(&values, DEFAULT_MAX_BINS),
                }
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            selection: selection.clone(),
            total_rows: dataset.len(),
            filtered_rows: view.len(),
            medals_by_team: count_by_group_and_medal(&view, GroupField::Team),
            medals_by_sport: count_by_group_and_medal(&view, GroupField::Sport),
            medals_by_year: count_by_group_and_medal(&view, GroupField::Year),
            distributions,
        }
    }

    pub fn table(&self, field: GroupField) -> &AggregateTable {
        match field {
            GroupField::Team => &self.medals_by_team,
            GroupField::Sport => &self.medals_by_sport,
            GroupField::Year => &self.medals_by_year,
        }
    }

    pub fn distribution(&self, field: NumericField) -> Option<&FieldDistribution> {
        self.distributions.iter().find(|d| d.field == field)
    }
}
