//! Spatial index over region bounding envelopes.
//!
//! The index is a coarse filter: it owns only (id, envelope) pairs and never
//! polygon geometry. Envelope containment does not imply polygon containment;
//! exact testing is the resolver's job, against geometry fetched from the
//! dataset by id.

use rstar::{RTree, RTreeObject, AABB};
use tracing::info;

use crate::dataset::RegionDataset;
use crate::models::RegionId;

/// One R-tree entry: a region id keyed by its bounding envelope.
#[derive(Debug, Clone)]
struct IndexedEnvelope {
    id: RegionId,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Bounding-box index over all regions, built once and never mutated.
pub struct RegionSpatialIndex {
    tree: RTree<IndexedEnvelope>,
}

impl RegionSpatialIndex {
    /// Build the index from the loaded dataset's envelopes.
    pub fn build(dataset: &RegionDataset) -> Self {
        let entries: Vec<IndexedEnvelope> = dataset
            .iter()
            .filter_map(|(id, region)| {
                let (min_x, min_y, max_x, max_y) = region.bbox()?;
                Some(IndexedEnvelope {
                    id,
                    envelope: AABB::from_corners([min_x, min_y], [max_x, max_y]),
                })
            })
            .collect();

        let tree = RTree::bulk_load(entries);
        info!("Spatial index built with {} entries", tree.size());

        Self { tree }
    }

    /// Region ids whose envelope contains (x, y), boundary inclusive.
    ///
    /// Order is unspecified but stable for a given build. An empty result
    /// only means the point is outside every envelope, which is an ordinary
    /// outcome, not a failure.
    pub fn query_point(&self, x: f64, y: f64) -> impl Iterator<Item = RegionId> + '_ {
        self.tree
            .locate_in_envelope_intersecting(&AABB::from_point([x, y]))
            .map(|entry| entry.id)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::RegionDataset;

    fn two_squares() -> RegionDataset {
        // 10: [0,10]x[0,10], 20: [10,20]x[0,10] (envelopes touch at x=10)
        RegionDataset::from_json_str(
            r#"{
            "regions": [
                {"NEIGHBOURHOOD_140": "A (10)", "HOOD_140": "010",
                 "geometry": [[0,0],[10,0],[10,10],[0,10]]},
                {"NEIGHBOURHOOD_140": "B (20)", "HOOD_140": "020",
                 "geometry": [[10,0],[20,0],[20,10],[10,10]]}
            ]
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_query_inside_envelope() {
        let index = RegionSpatialIndex::build(&two_squares());
        assert_eq!(index.len(), 2);

        let hits: Vec<RegionId> = index.query_point(5.0, 5.0).collect();
        assert_eq!(hits, vec![10]);

        let hits: Vec<RegionId> = index.query_point(15.0, 5.0).collect();
        assert_eq!(hits, vec![20]);
    }

    #[test]
    fn test_query_shared_edge_returns_both() {
        let index = RegionSpatialIndex::build(&two_squares());
        let mut hits: Vec<RegionId> = index.query_point(10.0, 5.0).collect();
        hits.sort_unstable();
        assert_eq!(hits, vec![10, 20]);
    }

    #[test]
    fn test_query_outside_is_empty() {
        let index = RegionSpatialIndex::build(&two_squares());
        assert_eq!(index.query_point(100.0, 100.0).count(), 0);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = RegionDataset::from_json_str(r#"{"regions": []}"#).unwrap();
        let index = RegionSpatialIndex::build(&dataset);
        assert!(index.is_empty());
        assert_eq!(index.query_point(0.0, 0.0).count(), 0);
    }

    #[test]
    fn test_stable_order_within_build() {
        let index = RegionSpatialIndex::build(&two_squares());
        let a: Vec<RegionId> = index.query_point(10.0, 5.0).collect();
        let b: Vec<RegionId> = index.query_point(10.0, 5.0).collect();
        assert_eq!(a, b);
    }
}
