//! Neighbourhood resolution stack.
//!
//! Projects query coordinates into the dataset's planar system, narrows
//! candidates with an R-tree over polygon envelopes, and confirms with an
//! exact point-in-polygon test, applying the legacy code crosswalk to hits.

mod crosswalk;
mod index;
mod projection;
mod service;

pub use crosswalk::Crosswalk;
pub use index::RegionSpatialIndex;
pub use projection::{ProjectionError, Projector};
pub use service::{NeighbourhoodResolver, NotReady, ResolverCell};
