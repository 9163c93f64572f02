use crate::model::Record;
use crate::pipeline::selection::FilterSelection;

/// Rows of a dataset that passed a [`FilterSelection`], in original order.
///
/// Borrows from the dataset; recompute it whenever the selection changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView<'a> {
    rows: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    pub fn rows(&self) -> &[&'a Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.rows.iter().copied()
    }
}

impl<'v, 'a> IntoIterator for &'v FilteredView<'a> {
    type Item = &'a Record;
    type IntoIter = std::iter::Copied<std::slice::Iter<'v, &'a Record>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter().copied()
    }
}

/// Keeps the rows whose Year, Sport and Sex are all selected.
///
/// `rows` may be a whole [`crate::model::Dataset`] or an existing view.
pub fn filter<'a, I>(rows: I, selection: &FilterSelection) -> FilteredView<'a>
where
    I: IntoIterator<Item = &'a Record>,
{
    FilteredView {
        rows: rows
            .into_iter()
            .filter(|record| selection.matches(record))
            .collect(),
    }
}
