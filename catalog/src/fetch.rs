//! Remote catalog access over the TAP protocol.
//!
//! A single synchronous ADQL query retrieves galactic coordinates and
//! a distance estimate (joined from the external distance table by
//! `source_id`) for a bounded number of rows. There is no retry,
//! pagination, or streaming: the call blocks until the full CSV body
//! has arrived.

use crate::error::{CatalogError, Result};
use crate::table::SkyRecord;

/// Synchronous query endpoint of the ESA Gaia archive.
pub const GAIA_TAP_SYNC_URL: &str = "https://gea.esac.esa.int/tap-server/tap/sync";

/// A source of raw catalog rows.
///
/// The single seam between the pipeline and the network: tests swap in
/// an in-memory implementation, production uses [`TapClient`].
pub trait StarSource {
    /// Fetch up to `limit` rows of `(l, b, d)`.
    fn fetch(&self, limit: usize) -> Result<Vec<SkyRecord>>;
}

/// Blocking TAP client for the Gaia archive.
pub struct TapClient {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl TapClient {
    /// Client for an arbitrary TAP sync endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Client for the ESA Gaia archive.
    pub fn gaia() -> Self {
        Self::new(GAIA_TAP_SYNC_URL)
    }

    /// The ADQL text sent for a given row cap.
    ///
    /// Distances come from the photogeometric estimate table, joined
    /// to the main source table by `source_id`; rows without a
    /// positive distance estimate are excluded at the service.
    pub fn adql_query(limit: usize) -> String {
        format!(
            "SELECT TOP {limit} l, b, e3d.r_med_geo AS d \
             FROM ( \
                 SELECT source_id, r_med_geo \
                 FROM external.gaiaedr3_distance \
                 WHERE r_med_geo > 0 \
             ) AS e3d \
             JOIN gaiaedr3.gaia_source USING (source_id)"
        )
    }
}

impl StarSource for TapClient {
    fn fetch(&self, limit: usize) -> Result<Vec<SkyRecord>> {
        let query = Self::adql_query(limit);
        log::info!("Querying {} for up to {} rows", self.endpoint, limit);

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[
                ("REQUEST", "doQuery"),
                ("LANG", "ADQL"),
                ("FORMAT", "csv"),
                ("QUERY", query.as_str()),
            ])
            .send()?
            .error_for_status()?;

        let body = response.text()?;
        let rows = parse_csv_body(&body)?;
        log::info!("Received {} rows", rows.len());
        Ok(rows)
    }
}

/// Parse a CSV response body into sky records.
///
/// Columns are located by header name, so the service is free to
/// reorder them or append extras. A missing required column is
/// reported by name before any row is parsed.
pub(crate) fn parse_csv_body(body: &str) -> Result<Vec<SkyRecord>> {
    let mut reader = csv::Reader::from_reader(body.as_bytes());

    let headers = reader.headers()?.clone();
    for required in ["l", "b", "d"] {
        if !headers.iter().any(|h| h == required) {
            return Err(CatalogError::MissingColumn(required.to_string()));
        }
    }

    let mut rows = Vec::new();
    for record in reader.deserialize::<SkyRecord>() {
        rows.push(record?);
    }
    Ok(rows)
}
