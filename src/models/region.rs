//! Neighbourhood region types for the 140-region scheme.

use geo::Polygon;
use serde::Serialize;

/// Numeric region identifier (the `HOOD_140` code as an integer).
pub type RegionId = u32;

/// Sentinel code/name returned for points outside every known region
/// ("not spatially assigned").
pub const NSA: &str = "NSA";

/// One named neighbourhood polygon.
///
/// Geometry is stored in planar Web Mercator (EPSG:3857) coordinates, the
/// same reference system the source dataset ships in.
#[derive(Debug, Clone)]
pub struct Region {
    /// Canonical 3-digit zero-padded code, e.g. `"097"`.
    pub code: String,
    /// Display name combining the human name and code, e.g.
    /// `"Yonge-St.Clair (97)"`.
    pub name: String,
    /// Exterior ring of the neighbourhood boundary.
    pub geometry: Polygon<f64>,
}

impl Region {
    /// Bounding box of the region's polygon as (min_x, min_y, max_x, max_y).
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        use geo::BoundingRect;
        self.geometry
            .bounding_rect()
            .map(|rect| (rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }
}

/// Outcome of a point resolution.
///
/// `NotFound` is an ordinary result, not an error: the query point is simply
/// outside every known neighbourhood (outside city limits, on water, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    Found { code: String, name: String },
    NotFound,
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found { .. })
    }

    /// The (code, name) pair the query interface reports, with the `"NSA"`
    /// sentinel substituted for unresolved points.
    pub fn as_pair(&self) -> (&str, &str) {
        match self {
            Resolution::Found { code, name } => (code, name),
            Resolution::NotFound => (NSA, NSA),
        }
    }
}

/// Format a numeric region id as its canonical 3-digit code.
pub fn format_code(id: RegionId) -> String {
    format!("{id:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_code_pads() {
        assert_eq!(format_code(7), "007");
        assert_eq!(format_code(97), "097");
        assert_eq!(format_code(140), "140");
    }

    #[test]
    fn test_not_found_pair_is_sentinel() {
        assert_eq!(Resolution::NotFound.as_pair(), ("NSA", "NSA"));
    }

    #[test]
    fn test_found_pair() {
        let res = Resolution::Found {
            code: "097".into(),
            name: "Yonge-St.Clair (97)".into(),
        };
        assert_eq!(res.as_pair(), ("097", "Yonge-St.Clair (97)"));
        assert!(res.is_found());
    }
}
