use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Record;

/// Numeric columns available for distribution extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericField {
    Age,
    Height,
    Weight,
}

impl NumericField {
    pub const ALL: [NumericField; 3] = [NumericField::Age, NumericField::Height, NumericField::Weight];

    pub fn name(&self) -> &'static str {
        match self {
            NumericField::Age => "Age",
            NumericField::Height => "Height",
            NumericField::Weight => "Weight",
        }
    }

    pub fn value_of(&self, record: &Record) -> Option<f64> {
        match self {
            NumericField::Age => record.age,
            NumericField::Height => record.height,
            NumericField::Weight => record.weight,
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Non-null values of `field` across `view`, in row order.
pub fn numeric_distribution<'a, I>(view: I, field: NumericField) -> Vec<f64>
where
    I: IntoIterator<Item = &'a Record>,
{
    view.into_iter().filter_map(|r| field.value_of(r)).collect()
}

/// Descriptive statistics over one extract. All zero for an empty extract.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub stddev: f64,
}

impl DistributionSummary {
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg = mean(values);

        Self {
            count: values.len(),
            min,
            max,
            mean: avg,
            stddev: stddev(values, avg),
        }
    }
}

/// Arithmetic mean. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation around a pre-computed mean.
/// Returns 0.0 for empty input.
pub fn stddev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Dataset;

    fn aged(age: Option<f64>) -> Record {
        Record {
            age,
            ..Default::default()
        }
    }

    #[test]
    fn test_age_drops_nulls_and_keeps_order() {
        let dataset = Dataset::new(vec![aged(Some(23.0)), aged(None), aged(Some(31.0))]);
        assert_eq!(numeric_distribution(&dataset, NumericField::Age), vec![23.0, 31.0]);
    }

    #[test]
    fn test_fields_are_independent() {
        let dataset = Dataset::new(vec![
            Record {
                age: Some(20.0),
                height: None,
                weight: Some(70.0),
                ..Default::default()
            },
            Record {
                age: None,
                height: Some(180.0),
                weight: Some(82.5),
                ..Default::default()
            },
        ]);

        assert_eq!(numeric_distribution(&dataset, NumericField::Age), vec![20.0]);
        assert_eq!(numeric_distribution(&dataset, NumericField::Height), vec![180.0]);
        assert_eq!(numeric_distribution(&dataset, NumericField::Weight), vec![70.0, 82.5]);
    }

    #[test]
    fn test_summary() {
        let summary = DistributionSummary::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(summary.count, 8);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 9.0);
        assert_eq!(summary.mean, 5.0);
        assert_eq!(summary.stddev, 2.0);
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(DistributionSummary::from_values(&[]), DistributionSummary::default());
    }

    #[test]
    fn test_mean_and_stddev_empty() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(stddev(&[], 0.0), 0.0);
    }
}
