use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::model::{Medal, Record};

/// Dimension a medal table is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupField {
    Team,
    Sport,
    Year,
}

impl GroupField {
    pub const ALL: [GroupField; 3] = [GroupField::Team, GroupField::Sport, GroupField::Year];

    pub fn name(&self) -> &'static str {
        match self {
            GroupField::Team => "Team",
            GroupField::Sport => "Sport",
            GroupField::Year => "Year",
        }
    }

    /// The record's value for this field, if present.
    pub fn value_of(&self, record: &Record) -> Option<GroupValue> {
        match self {
            GroupField::Team => record.team.clone().map(GroupValue::Text),
            GroupField::Sport => record.sport.clone().map(GroupValue::Text),
            GroupField::Year => record.year.map(GroupValue::Year),
        }
    }
}

impl fmt::Display for GroupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single group key: a year or a text label (team, sport).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum GroupValue {
    Year(i32),
    Text(String),
}

impl From<i32> for GroupValue {
    fn from(year: i32) -> Self {
        GroupValue::Year(year)
    }
}

impl From<&str> for GroupValue {
    fn from(text: &str) -> Self {
        GroupValue::Text(text.to_string())
    }
}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupValue::Year(year) => write!(f, "{year}"),
            GroupValue::Text(text) => f.write_str(text),
        }
    }
}

/// Dense medal counts per group value.
///
/// Every observed group has a cell for every observed medal, zero when the
/// pair never occurs. Groups iterate ascending, medals in [`Medal`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateTable {
    group_field: GroupField,
    medals: Vec<Medal>,
    counts: BTreeMap<GroupValue, BTreeMap<Medal, usize>>,
}

impl AggregateTable {
    pub fn group_field(&self) -> GroupField {
        self.group_field
    }

    /// Medal columns, in table order.
    pub fn medals(&self) -> &[Medal] {
        &self.medals
    }

    pub fn groups(&self) -> impl Iterator<Item = &GroupValue> {
        self.counts.keys()
    }

    /// Count for one cell; `None` only when the group or medal was never observed.
    pub fn get(&self, group: &GroupValue, medal: Medal) -> Option<usize> {
        self.counts.get(group)?.get(&medal).copied()
    }

    pub fn row(&self, group: &GroupValue) -> Option<&BTreeMap<Medal, usize>> {
        self.counts.get(group)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&GroupValue, &BTreeMap<Medal, usize>)> {
        self.counts.iter()
    }

    /// Sum over all cells.
    pub fn total(&self) -> usize {
        self.counts.values().flat_map(|row| row.values()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Counts rows per (`group_field` value, medal).
///
/// Rows without a value for `group_field` are left out. Medal columns are the
/// medal categories seen anywhere in `view`.
pub fn count_by_group_and_medal<'a, I>(view: I, group_field: GroupField) -> AggregateTable
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut medals = BTreeSet::new();
    let mut counts: BTreeMap<GroupValue, BTreeMap<Medal, usize>> = BTreeMap::new();

    for record in view {
        medals.insert(record.medal);
        if let Some(group) = group_field.value_of(record) {
            *counts.entry(group).or_default().entry(record.medal).or_default() += 1;
        }
    }

    for row in counts.values_mut() {
        for medal in &medals {
            row.entry(*medal).or_insert(0);
        }
    }

    AggregateTable {
        group_field,
        medals: medals.into_iter().collect(),
        counts,
    }
}
