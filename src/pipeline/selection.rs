use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

use crate::model::{Dataset, Record};

/// Allowed values per filterable field. An empty set matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub years: BTreeSet<i32>,
    pub sports: BTreeSet<String>,
    pub sexes: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new(
        years: impl IntoIterator<Item = i32>,
        sports: impl IntoIterator<Item = impl Into<String>>,
        sexes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            years: years.into_iter().collect(),
            sports: sports.into_iter().map(Into::into).collect(),
            sexes: sexes.into_iter().map(Into::into).collect(),
        }
    }

    /// Selects every distinct value present in `dataset`.
    pub fn all(dataset: &Dataset) -> Self {
        Self {
            years: dataset.distinct_years(),
            sports: dataset.distinct_sports(),
            sexes: dataset.distinct_sexes(),
        }
    }

    /// Builds a selection from explicit values, where an empty list selects
    /// every distinct value of that field in `dataset`.
    ///
    /// Values missing from `dataset` are kept (they match nothing) and logged.
    pub fn with_defaults(
        dataset: &Dataset,
        years: Vec<i32>,
        sports: Vec<String>,
        sexes: Vec<String>,
    ) -> Self {
        let selection = Self {
            years: if years.is_empty() {
                dataset.distinct_years()
            } else {
                years.into_iter().collect()
            },
            sports: if sports.is_empty() {
                dataset.distinct_sports()
            } else {
                sports.into_iter().collect()
            },
            sexes: if sexes.is_empty() {
                dataset.distinct_sexes()
            } else {
                sexes.into_iter().collect()
            },
        };

        for value in selection.unknown_values(dataset) {
            warn!(value = %value, "Filter value not present in dataset, it will match nothing");
        }

        selection
    }

    /// Whether `record` passes on Year, Sport and Sex. Nulls never pass.
    pub fn matches(&self, record: &Record) -> bool {
        record.year.is_some_and(|y| self.years.contains(&y))
            && record
                .sport
                .as_ref()
                .is_some_and(|s| self.sports.contains(s))
            && record.sex.as_ref().is_some_and(|s| self.sexes.contains(s))
    }

    /// Selected values that do not occur in `dataset`, as `field=value` strings.
    pub fn unknown_values(&self, dataset: &Dataset) -> Vec<String> {
        let years = dataset.distinct_years();
        let sports = dataset.distinct_sports();
        let sexes = dataset.distinct_sexes();

        let mut unknown: Vec<String> = self
            .years
            .difference(&years)
            .map(|y| format!("year={y}"))
            .collect();
        unknown.extend(self.sports.difference(&sports).map(|s| format!("sport={s}")));
        unknown.extend(self.sexes.difference(&sexes).map(|s| format!("sex={s}")));
        unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: Option<i32>, sport: Option<&str>, sex: Option<&str>) -> Record {
        Record {
            year,
            sport: sport.map(str::to_string),
            sex: sex.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_matches_requires_all_three_fields() {
        let selection = FilterSelection::new([2000], ["Judo"], ["M"]);

        assert!(selection.matches(&record(Some(2000), Some("Judo"), Some("M"))));
        assert!(!selection.matches(&record(Some(2004), Some("Judo"), Some("M"))));
        assert!(!selection.matches(&record(Some(2000), Some("Rowing"), Some("M"))));
        assert!(!selection.matches(&record(Some(2000), Some("Judo"), Some("F"))));
    }

    #[test]
    fn test_null_fields_never_match() {
        let selection = FilterSelection::new([2000], ["Judo"], ["M"]);
        assert!(!selection.matches(&record(None, Some("Judo"), Some("M"))));
        assert!(!selection.matches(&record(Some(2000), None, Some("M"))));
        assert!(!selection.matches(&record(Some(2000), Some("Judo"), None)));
    }

    #[test]
    fn test_empty_set_matches_nothing() {
        let selection = FilterSelection::new(Vec::<i32>::new(), ["Judo"], ["M"]);
        assert!(!selection.matches(&record(Some(2000), Some("Judo"), Some("M"))));
    }

    #[test]
    fn test_all_selects_distinct_values() {
        let dataset = Dataset::new(vec![
            record(Some(2000), Some("Judo"), Some("M")),
            record(Some(2004), Some("Rowing"), Some("F")),
        ]);
        let selection = FilterSelection::all(&dataset);

        assert_eq!(selection, FilterSelection::new([2000, 2004], ["Judo", "Rowing"], ["F", "M"]));
        assert!(dataset.iter().all(|r| selection.matches(r)));
    }

    #[test]
    fn test_with_defaults_no_values_selects_all() {
        let dataset = Dataset::new(vec![
            record(Some(2000), Some("Judo"), Some("M")),
            record(Some(2004), Some("Rowing"), Some("F")),
        ]);
        let selection = FilterSelection::with_defaults(&dataset, vec![], vec![], vec![]);
        assert_eq!(selection, FilterSelection::all(&dataset));
    }

    #[test]
    fn test_with_defaults_narrows_only_given_field() {
        let dataset = Dataset::new(vec![
            record(Some(2000), Some("Judo"), Some("M")),
            record(Some(2004), Some("Rowing"), Some("F")),
        ]);
        let selection =
            FilterSelection::with_defaults(&dataset, vec![], vec!["Rowing".to_string()], vec![]);

        assert_eq!(selection.years, dataset.distinct_years());
        assert_eq!(selection.sexes, dataset.distinct_sexes());
        assert_eq!(selection.sports, BTreeSet::from(["Rowing".to_string()]));
    }

    #[test]
    fn test_with_defaults_keeps_unknown_values() {
        let dataset = Dataset::new(vec![record(Some(2000), Some("Judo"), Some("M"))]);
        let selection = FilterSelection::with_defaults(&dataset, vec![1896], vec![], vec![]);

        assert_eq!(selection.years, BTreeSet::from([1896]));
        assert!(!dataset.iter().any(|r| selection.matches(r)));
    }

    #[test]
    fn test_unknown_values() {
        let dataset = Dataset::new(vec![record(Some(2000), Some("Judo"), Some("M"))]);
        let selection = FilterSelection::new([2000, 1896], ["Judo", "Curling"], ["M"]);

        assert_eq!(
            selection.unknown_values(&dataset),
            vec!["year=1896".to_string(), "sport=Curling".to_string()]
        );
        assert!(FilterSelection::all(&dataset).unknown_values(&dataset).is_empty());
    }
}
