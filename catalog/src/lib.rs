//! Gaia star catalog pipeline.
//!
//! This crate retrieves star positions and distance estimates from the
//! Gaia archive, converts the spherical sky coordinates to Cartesian,
//! and caches the transformed table on disk so later runs skip the
//! download entirely.
//!
//! The pipeline is a linear sequence driven by [`pipeline::load_or_fetch`]:
//! query the TAP service, transform the rows, persist the result, and
//! hand the table to whatever wants to render it.

pub mod chunks;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod table;
pub mod transform;

pub use chunks::ChunkGrid;
pub use error::{CatalogError, Result};
pub use fetch::{StarSource, TapClient};
pub use pipeline::{load_or_fetch, PipelineConfig};
pub use table::{SkyRecord, StarRecord, StarTable};
pub use transform::{to_cartesian, transform_table};
