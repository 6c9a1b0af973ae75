//! Star record and table types, with CSV artifact I/O.
//!
//! The cache artifact is a flat CSV file with header `l,b,d,x,y,z`,
//! gzip-compressed when the path ends in `.gz`. Columns are matched by
//! header name on load, so column order is not significant.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A raw catalog row as returned by the remote query: galactic
/// longitude and latitude in degrees, radial distance in parsecs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyRecord {
    /// Galactic longitude, degrees, [0, 360).
    pub l: f64,
    /// Galactic latitude, degrees, [-90, 90].
    pub b: f64,
    /// Radial distance, parsecs.
    pub d: f64,
}

/// A transformed catalog row: the sky coordinates plus derived
/// Cartesian position in the same unit as `d`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    pub l: f64,
    pub b: f64,
    pub d: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl StarRecord {
    /// Cartesian position as a vector.
    pub fn position(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// An ordered collection of transformed star records.
///
/// Row order is the order returned by the remote query; it carries no
/// meaning after caching. The table is never mutated once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StarTable {
    stars: Vec<StarRecord>,
}

impl StarTable {
    /// Build a table from already-transformed records.
    pub fn from_stars(stars: Vec<StarRecord>) -> Self {
        Self { stars }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StarRecord> {
        self.stars.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StarRecord> {
        self.stars.iter()
    }

    /// Load a table from a CSV artifact, decompressing if the path
    /// ends in `.gz`. The file is trusted as-is: no schema or
    /// staleness check beyond what deserialization itself enforces.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)?;
        let reader: Box<dyn BufRead> = if is_gzip_path(&path) {
            Box::new(BufReader::new(GzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut stars = Vec::new();
        for record in csv_reader.deserialize::<StarRecord>() {
            stars.push(record?);
        }

        log::debug!(
            "Loaded {} stars from {}",
            stars.len(),
            path.as_ref().display()
        );
        Ok(Self { stars })
    }

    /// Persist the table as a CSV artifact, compressing if the path
    /// ends in `.gz`.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(&path)?;
        let writer: Box<dyn Write> = if is_gzip_path(&path) {
            Box::new(GzEncoder::new(BufWriter::new(file), Compression::default()))
        } else {
            Box::new(BufWriter::new(file))
        };

        let mut csv_writer = csv::Writer::from_writer(writer);
        for star in &self.stars {
            csv_writer.serialize(star)?;
        }
        csv_writer.flush()?;

        log::debug!(
            "Wrote {} stars to {}",
            self.stars.len(),
            path.as_ref().display()
        );
        Ok(())
    }
}

fn is_gzip_path<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}
