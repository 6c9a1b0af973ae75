//! Load-or-fetch orchestration around the cache artifact.
//!
//! A single file-existence check decides between loading the cached,
//! already-transformed table and running the full fetch → transform →
//! persist sequence. An existing artifact is trusted unconditionally;
//! delete the file to force a refresh.

use std::path::PathBuf;

use crate::error::Result;
use crate::fetch::StarSource;
use crate::table::StarTable;
use crate::transform::transform_table;

/// Default artifact location, relative to the working directory.
pub const DEFAULT_ARTIFACT_PATH: &str = "data/stars_transformed.csv.gz";

/// Default row cap for the remote query.
pub const DEFAULT_ROW_LIMIT: usize = 1_000_000;

/// Pipeline parameters.
///
/// Explicit so tests can point the cache at a temporary directory and
/// keep the row cap small.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Cache artifact path; `.gz` suffix selects gzip compression.
    pub artifact_path: PathBuf,
    /// Row cap for the remote query.
    pub row_limit: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            row_limit: DEFAULT_ROW_LIMIT,
        }
    }
}

/// Return the transformed star table, fetching only on a cache miss.
///
/// On a hit the artifact is deserialized and returned as stored; the
/// source is never consulted. On a miss the fetched rows are
/// transformed, persisted to the artifact path (parent directories are
/// created as needed), and returned. Not safe against concurrent
/// invocations racing on the artifact file.
pub fn load_or_fetch<S: StarSource + ?Sized>(
    source: &S,
    config: &PipelineConfig,
) -> Result<StarTable> {
    if config.artifact_path.exists() {
        log::info!(
            "Loading cached star table from {}",
            config.artifact_path.display()
        );
        return StarTable::read_csv(&config.artifact_path);
    }

    log::info!(
        "No cache artifact at {}; fetching up to {} rows",
        config.artifact_path.display(),
        config.row_limit
    );
    let rows = source.fetch(config.row_limit)?;
    let table = transform_table(rows);

    if let Some(parent) = config.artifact_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    table.write_csv(&config.artifact_path)?;
    log::info!(
        "Cached {} transformed stars at {}",
        table.len(),
        config.artifact_path.display()
    );

    Ok(table)
}
