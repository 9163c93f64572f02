//! Filter-aggregate pipeline.
//!
//! Pure, synchronous transforms over an in-memory [`crate::model::Dataset`]:
//!
//! ```text
//!   Dataset + FilterSelection
//!        │ filter
//!        ▼
//!   FilteredView ──count_by_group_and_medal──▶ AggregateTable (Team, Sport, Year)
//!        │
//!        └──────numeric_distribution──────▶ Vec<f64> (Age, Height, Weight) ─▶ Histogram
//! ```

pub mod aggregate;
pub mod analysis;
pub mod distribution;
pub mod filter;
pub mod histogram;
pub mod selection;

pub use aggregate::{AggregateTable, GroupField, GroupValue, count_by_group_and_medal};
pub use analysis::{Analysis, FieldDistribution};
pub use distribution::{DistributionSummary, NumericField, numeric_distribution};
pub use filter::{FilteredView, filter};
pub use histogram::{Bin, Histogram};
pub use selection::FilterSelection;
