//! Core data types: athlete-event records, medals and the loaded dataset.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Placeholder the source document uses for missing values.
pub const MISSING: &str = "NA";

/// Medal category of a single entry.
///
/// `NoMedal` is an explicit category rather than a null, so it can appear as
/// a column of an [`crate::pipeline::AggregateTable`]. Variant order is the
/// column order used in tables.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
    #[default]
    #[serde(rename = "No medal")]
    NoMedal,
}

impl Medal {
    pub const ALL: [Medal; 4] = [Medal::Gold, Medal::Silver, Medal::Bronze, Medal::NoMedal];

    pub fn label(&self) -> &'static str {
        match self {
            Medal::Gold => "Gold",
            Medal::Silver => "Silver",
            Medal::Bronze => "Bronze",
            Medal::NoMedal => "No medal",
        }
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Medal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Gold" => Ok(Medal::Gold),
            "Silver" => Ok(Medal::Silver),
            "Bronze" => Ok(Medal::Bronze),
            "" | MISSING => Ok(Medal::NoMedal),
            other => Err(format!("unknown medal '{other}'")),
        }
    }
}

/// One athlete-event entry (a row of the source CSV).
///
/// Every column is optional: a missing column, an empty cell or `NA` all
/// decode to `None` (or [`Medal::NoMedal`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    #[serde(rename = "ID", deserialize_with = "na_as_none")]
    pub id: Option<u64>,
    #[serde(rename = "Name", deserialize_with = "na_as_none")]
    pub name: Option<String>,
    #[serde(rename = "Sex", deserialize_with = "na_as_none")]
    pub sex: Option<String>,
    #[serde(rename = "Age", deserialize_with = "finite_or_none")]
    pub age: Option<f64>,
    #[serde(rename = "Height", deserialize_with = "finite_or_none")]
    pub height: Option<f64>,
    #[serde(rename = "Weight", deserialize_with = "finite_or_none")]
    pub weight: Option<f64>,
    #[serde(rename = "Team", deserialize_with = "na_as_none")]
    pub team: Option<String>,
    #[serde(rename = "NOC", deserialize_with = "na_as_none")]
    pub noc: Option<String>,
    #[serde(rename = "Games", deserialize_with = "na_as_none")]
    pub games: Option<String>,
    #[serde(rename = "Year", deserialize_with = "na_as_none")]
    pub year: Option<i32>,
    #[serde(rename = "Season", deserialize_with = "na_as_none")]
    pub season: Option<String>,
    #[serde(rename = "City", deserialize_with = "na_as_none")]
    pub city: Option<String>,
    #[serde(rename = "Sport", deserialize_with = "na_as_none")]
    pub sport: Option<String>,
    #[serde(rename = "Event", deserialize_with = "na_as_none")]
    pub event: Option<String>,
    #[serde(
        rename = "Medal",
        deserialize_with = "medal_or_none",
        serialize_with = "medal_as_source"
    )]
    pub medal: Medal,
}

fn na_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some(MISSING) => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(de::Error::custom),
    }
}

// "NaN" and "inf" parse as f64 but are not measurements.
fn finite_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(na_as_none::<D, f64>(deserializer)?.filter(|v| v.is_finite()))
}

fn medal_or_none<'de, D>(deserializer: D) -> Result<Medal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(value) => value.parse().map_err(de::Error::custom),
        None => Ok(Medal::NoMedal),
    }
}

// Exports keep the source document's spelling so they load back unchanged.
fn medal_as_source<S: Serializer>(medal: &Medal, serializer: S) -> Result<S::Ok, S::Error> {
    match medal {
        Medal::NoMedal => serializer.serialize_str(MISSING),
        other => serializer.serialize_str(other.label()),
    }
}

/// The full loaded dataset. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Distinct non-null years, ascending.
    pub fn distinct_years(&self) -> BTreeSet<i32> {
        self.records.iter().filter_map(|r| r.year).collect()
    }

    /// Distinct non-null sports, sorted.
    pub fn distinct_sports(&self) -> BTreeSet<String> {
        self.records.iter().filter_map(|r| r.sport.clone()).collect()
    }

    /// Distinct non-null sexes, sorted.
    pub fn distinct_sexes(&self) -> BTreeSet<String> {
        self.records.iter().filter_map(|r| r.sex.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
