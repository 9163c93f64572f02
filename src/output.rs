//! Output formatting and persistence for pipeline results.
//!
//! Supports plain-text tables, JSON, and CSV export.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::{debug, info};

use crate::model::{Dataset, Record};
use crate::pipeline::{
    AggregateTable, FieldDistribution, FilterSelection, GroupField, Histogram,
    count_by_group_and_medal, filter,
};

const BAR_WIDTH: usize = 40;

/// Renders a value as pretty-printed JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Writes rows to a new CSV file with the source document's headers.
pub fn write_rows<'a, I>(path: &Path, rows: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a Record>,
{
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let written = write_rows_to(file, rows)?;

    debug!(path = %path.display(), rows = written, "Rows written");
    Ok(written)
}

/// Writes rows as CSV, header first, to any writer.
pub fn write_rows_to<'a, W, I>(writer: W, rows: I) -> Result<usize>
where
    W: io::Write,
    I: IntoIterator<Item = &'a Record>,
{
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);

    let mut written = 0;
    for row in rows {
        writer.serialize(row)?;
        written += 1;
    }
    writer.flush()?;

    Ok(written)
}

/// Writes a medal table as CSV: one row per group, one column per medal.
pub fn write_table(path: &Path, table: &AggregateTable) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = WriterBuilder::new().from_writer(file);

    let mut header = vec![table.group_field().name().to_string()];
    header.extend(table.medals().iter().map(|m| m.label().to_string()));
    writer.write_record(&header)?;

    for (group, counts) in table.rows() {
        let mut record = vec![group.to_string()];
        record.extend(table.medals().iter().map(|m| {
            counts.get(m).copied().unwrap_or_default().to_string()
        }));
        writer.write_record(&record)?;
    }
    writer.flush()?;

    debug!(path = %path.display(), groups = table.rows().count(), "Table written");
    Ok(())
}

/// File name of the exported medal table for `field`.
pub fn table_file_name(field: GroupField) -> String {
    format!("medals_by_{}.csv", field.name().to_lowercase())
}

/// Writes `filtered.csv` plus one `medals_by_*.csv` per group field into
/// `output_dir`, creating it if needed. Returns the number of rows written.
#[tracing::instrument(skip_all, fields(output_dir = %output_dir.display()))]
pub fn export(output_dir: &Path, dataset: &Dataset, selection: &FilterSelection) -> Result<usize> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let view = filter(dataset, selection);
    let rows = write_rows(&output_dir.join("filtered.csv"), &view)?;

    for field in GroupField::ALL {
        let table = count_by_group_and_medal(&view, field);
        write_table(&output_dir.join(table_file_name(field)), &table)?;
    }

    info!(rows, "Export complete");
    Ok(rows)
}

/// Formats a medal table as aligned text columns.
pub fn render_table(table: &AggregateTable) -> String {
    let group_width = table
        .groups()
        .map(|g| g.to_string().chars().count())
        .chain(std::iter::once(table.group_field().name().len()))
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = table.medals().iter().map(|m| m.label().len().max(5)).collect();

    let mut out = String::new();
    let _ = write!(out, "{:<group_width$}", table.group_field().name());
    for (medal, width) in table.medals().iter().zip(widths.iter().copied()) {
        let _ = write!(out, "  {:>width$}", medal.label());
    }
    out.push('\n');

    for (group, counts) in table.rows() {
        let _ = write!(out, "{:<group_width$}", group.to_string());
        for (medal, width) in table.medals().iter().zip(widths.iter().copied()) {
            let count = counts.get(medal).copied().unwrap_or_default();
            let _ = write!(out, "  {count:>width$}");
        }
        out.push('\n');
    }

    out
}

/// Formats a histogram as one text bar per bin, scaled to the fullest bin.
pub fn render_histogram(histogram: &Histogram) -> String {
    let peak = histogram.bins.iter().map(|b| b.count).max().unwrap_or(0);
    let mut out = String::new();

    for bin in &histogram.bins {
        let len = if peak == 0 { 0 } else { bin.count * BAR_WIDTH / peak };
        let _ = writeln!(
            out,
            "{:>8} - {:<8} {:>7} {}",
            bin.start,
            bin.end,
            bin.count,
            "#".repeat(len)
        );
    }

    out
}

/// Summary line plus histogram for one numeric field.
pub fn render_distribution(distribution: &FieldDistribution) -> String {
    let s = &distribution.summary;
    let mut out = format!(
        "{} (n={}, min={:.1}, max={:.1}, mean={:.2}, sd={:.2})\n",
        distribution.field, s.count, s.min, s.max, s.mean, s.stddev
    );
    out.push_str(&render_histogram(&distribution.histogram));
    out
}
