//! Polygon dataset loading.
//!
//! Parses the extracted neighbourhood boundary file produced by the data
//! pipeline: a JSON document with one record per region carrying the display
//! name, the region code, and the exterior ring in planar Web Mercator
//! coordinates. The dataset is loaded once at startup and never mutated.

use std::fs;
use std::path::Path;

use geo::{Coord, LineString, Polygon};
use hashbrown::HashMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::models::{format_code, Region, RegionId};

/// Fatal startup errors. A resolver must not become ready if any of these
/// occur; there is no partial or degraded service.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("region code {0:?} is not numeric")]
    InvalidCode(String),

    #[error("region {0} appears more than once in the dataset")]
    DuplicateRegion(RegionId),

    #[error("region {0} has a degenerate ring ({1} vertices, need at least 3)")]
    DegenerateRing(RegionId, usize),

    #[error("failed to initialize coordinate projection: {0}")]
    Projection(#[from] crate::resolve::ProjectionError),
}

#[derive(Debug, Deserialize)]
struct RawDataset {
    regions: Vec<RawRegion>,
}

#[derive(Debug, Deserialize)]
struct RawRegion {
    #[serde(rename = "NEIGHBOURHOOD_140")]
    name: String,
    #[serde(rename = "HOOD_140")]
    code: RawCode,
    geometry: Vec<[f64; 2]>,
}

/// The source data is inconsistent about whether codes are numbers or
/// zero-padded strings; accept both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCode {
    Number(u32),
    Text(String),
}

impl RawCode {
    fn parse(&self) -> Result<RegionId, LoadError> {
        match self {
            RawCode::Number(n) => Ok(*n),
            RawCode::Text(s) => s
                .trim()
                .parse::<RegionId>()
                .map_err(|_| LoadError::InvalidCode(s.clone())),
        }
    }
}

/// Immutable set of neighbourhood regions, addressed by numeric id.
#[derive(Debug, Clone)]
pub struct RegionDataset {
    regions: HashMap<RegionId, Region>,
}

impl RegionDataset {
    /// Load the dataset from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path.as_ref())?;
        let dataset = Self::from_json_str(&content)?;
        info!(
            "Loaded {} regions from {}",
            dataset.len(),
            path.as_ref().display()
        );
        Ok(dataset)
    }

    /// Parse a dataset from an in-memory JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        let raw: RawDataset = serde_json::from_str(content)?;

        let mut regions = HashMap::with_capacity(raw.regions.len());

        for record in raw.regions {
            let id = record.code.parse()?;

            if record.geometry.len() < 3 {
                return Err(LoadError::DegenerateRing(id, record.geometry.len()));
            }

            let ring: Vec<Coord<f64>> = record
                .geometry
                .iter()
                .map(|&[x, y]| Coord { x, y })
                .collect();

            // Polygon::new closes an open ring
            let region = Region {
                code: format_code(id),
                name: record.name,
                geometry: Polygon::new(LineString::new(ring), vec![]),
            };

            if regions.insert(id, region).is_some() {
                return Err(LoadError::DuplicateRegion(id));
            }
        }

        Ok(Self { regions })
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(&id)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Iterate over all regions with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &Region)> {
        self.regions.iter().map(|(id, region)| (*id, region))
    }
}
