//! hood140 - point-to-neighbourhood resolution for Toronto's
//! "Neighbourhood 140" boundary scheme.
//!
//! Given a WGS84 latitude/longitude, the resolver projects the point to the
//! dataset's planar reference system, narrows candidates with an R-tree over
//! polygon envelopes, and confirms with an exact point-in-polygon test. The
//! dataset and index are built once at startup and are immutable thereafter.

pub mod dataset;
pub mod models;
pub mod resolve;

pub use dataset::{LoadError, RegionDataset};
pub use models::{Region, RegionId, Resolution, NSA};
pub use resolve::{
    Crosswalk, NeighbourhoodResolver, NotReady, ProjectionError, Projector, RegionSpatialIndex,
    ResolverCell,
};
