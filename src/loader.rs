//! Memoized, one-time loading of the dataset from a URL or local file.

use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

use crate::fetch::{BasicClient, HttpClient, fetch_bytes};
use crate::model::Dataset;
use crate::parser::{LoadReport, parse_dataset};

/// Where the source document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// Anything starting with `http` is fetched, everything else is read from disk.
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http") {
            DataSource::Url(source.to_string())
        } else {
            DataSource::File(PathBuf::from(source))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => f.write_str(url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Reads the raw bytes of `source`, over HTTP or from the filesystem.
#[tracing::instrument(skip_all, fields(source = %source))]
pub async fn read_source<C: HttpClient>(client: &C, source: &DataSource) -> Result<Vec<u8>> {
    match source {
        DataSource::Url(url) => fetch_bytes(client, url).await,
        DataSource::File(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display())),
    }
}

/// Loads the dataset on first use and hands out the same immutable copy afterwards.
///
/// There is no invalidation: a loader is bound to one source for its lifetime.
pub struct DatasetLoader<C = BasicClient> {
    source: DataSource,
    client: C,
    cell: OnceCell<(Arc<Dataset>, LoadReport)>,
}

impl DatasetLoader<BasicClient> {
    pub fn from_source(source: DataSource) -> Self {
        Self::new(source, BasicClient::new())
    }
}

impl<C: HttpClient> DatasetLoader<C> {
    pub fn new(source: DataSource, client: C) -> Self {
        Self {
            source,
            client,
            cell: OnceCell::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Counters from the load, once it has happened.
    pub fn report(&self) -> Option<LoadReport> {
        self.cell.get().map(|(_, report)| *report)
    }

    /// Returns the dataset, fetching and parsing it on the first call only.
    ///
    /// A failed load leaves the loader empty, so a later call tries again.
    pub async fn load(&self) -> Result<Arc<Dataset>> {
        let (dataset, _) = self
            .cell
            .get_or_try_init(|| async {
                let bytes = read_source(&self.client, &self.source).await?;
                let (dataset, report) = parse_dataset(&bytes)
                    .with_context(|| format!("failed to parse {}", self.source))?;
                info!(
                    source = %self.source,
                    rows = report.rows,
                    skipped = report.skipped,
                    "Dataset loaded"
                );
                Ok::<_, anyhow::Error>((Arc::new(dataset), report))
            })
            .await?;

        Ok(Arc::clone(dataset))
    }
}
