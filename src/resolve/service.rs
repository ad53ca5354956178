//! Containment resolver: lat/lon -> neighbourhood (code, name).

use std::sync::OnceLock;

use geo::{Intersects, Point};
use thiserror::Error;
use tracing::{debug, warn};

use super::{Crosswalk, Projector, RegionSpatialIndex};
use crate::dataset::{LoadError, RegionDataset};
use crate::models::{Region, RegionId, Resolution};

/// Returned for queries that arrive before the resolver is installed.
/// Distinct from [`Resolution::NotFound`], which is a successful result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("neighbourhood resolver is not ready: dataset not loaded yet")]
pub struct NotReady;

/// Point-to-neighbourhood resolver.
///
/// Built once from a loaded dataset; all fields are immutable afterwards, so
/// a shared reference can serve unlimited concurrent queries without locking.
pub struct NeighbourhoodResolver {
    dataset: RegionDataset,
    index: RegionSpatialIndex,
    crosswalk: Crosswalk,
    projector: Projector,
}

impl NeighbourhoodResolver {
    pub fn new(dataset: RegionDataset, crosswalk: Crosswalk) -> Result<Self, LoadError> {
        let projector = Projector::new()?;
        let index = RegionSpatialIndex::build(&dataset);
        Ok(Self {
            dataset,
            index,
            crosswalk,
            projector,
        })
    }

    /// Load the dataset (and optionally the crosswalk) and build the resolver.
    pub fn from_files<P: AsRef<std::path::Path>>(
        dataset_path: P,
        crosswalk_path: Option<P>,
    ) -> Result<Self, LoadError> {
        let dataset = RegionDataset::load(dataset_path)?;
        let crosswalk = match crosswalk_path {
            Some(path) => Crosswalk::load(path)?,
            None => Crosswalk::default(),
        };
        Self::new(dataset, crosswalk)
    }

    /// Resolve a WGS84 coordinate to its containing neighbourhood.
    ///
    /// A point outside every region resolves to [`Resolution::NotFound`];
    /// that is an ordinary result, never an error. Boundary rule: a point
    /// exactly on a polygon edge counts as contained (inclusive).
    ///
    /// Coordinates outside the valid lat/lon range are the caller's problem;
    /// for such input the projection may fail, which degrades to `NotFound`.
    pub fn resolve(&self, lat: f64, lon: f64) -> Resolution {
        let (x, y) = match self.projector.project(lat, lon) {
            Ok(planar) => planar,
            Err(err) => {
                warn!("projection failed for ({lat}, {lon}): {err}");
                return Resolution::NotFound;
            }
        };
        let point = Point::new(x, y);

        let mut hit: Option<(RegionId, &Region)> = None;
        let mut candidates = 0usize;

        for id in self.index.query_point(x, y) {
            candidates += 1;
            let Some(region) = self.dataset.get(id) else {
                continue;
            };
            if region.geometry.intersects(&point) {
                match hit {
                    None => hit = Some((id, region)),
                    Some((first, _)) => {
                        // Non-overlap invariant violated by the input data;
                        // the first match in index order stands.
                        warn!(
                            "regions {first} and {id} both contain ({lat}, {lon}); \
                             keeping region {first}"
                        );
                    }
                }
            }
        }

        debug!(
            "resolve ({lat}, {lon}): {candidates} envelope candidates, hit = {:?}",
            hit.as_ref().map(|(id, _)| id)
        );

        let Some((id, region)) = hit else {
            return Resolution::NotFound;
        };

        // Prefer the legacy crosswalk when a mapping exists; otherwise fall
        // back to the region's own zero-padded code and stored name.
        match self.crosswalk.map(id) {
            Some((code, name)) => Resolution::Found {
                code: code.to_owned(),
                name: name.to_owned(),
            },
            None => Resolution::Found {
                code: region.code.clone(),
                name: region.name.clone(),
            },
        }
    }

    pub fn dataset(&self) -> &RegionDataset {
        &self.dataset
    }

    pub fn index(&self) -> &RegionSpatialIndex {
        &self.index
    }
}

/// One-time installation barrier for process-wide use.
///
/// The hosting layer constructs the cell up front, installs the resolver once
/// the dataset has loaded, and serves queries from shared references. Queries
/// before installation get [`NotReady`]; after installation all reads are
/// lock-free.
pub struct ResolverCell {
    inner: OnceLock<NeighbourhoodResolver>,
}

impl ResolverCell {
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Install the resolver. Fails if one is already installed.
    pub fn install(&self, resolver: NeighbourhoodResolver) -> Result<(), NeighbourhoodResolver> {
        self.inner.set(resolver)
    }

    pub fn get(&self) -> Result<&NeighbourhoodResolver, NotReady> {
        self.inner.get().ok_or(NotReady)
    }

    pub fn resolve(&self, lat: f64, lon: f64) -> Result<Resolution, NotReady> {
        Ok(self.get()?.resolve(lat, lon))
    }
}

impl Default for ResolverCell {
    fn default() -> Self {
        Self::new()
    }
}
