//! WGS84 -> Web Mercator coordinate projection.
//!
//! The boundary dataset ships in planar EPSG:3857 coordinates, so each query
//! point must be projected before any index or containment work. Projection
//! is deterministic and stateless: the `Proj` definitions are parsed once at
//! construction and never mutated.

use proj4rs::proj::Proj;
use proj4rs::transform::transform;
use thiserror::Error;

/// WGS84 geographic coordinates (EPSG:4326).
const WGS84: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Web Mercator (EPSG:3857), the dataset's planar reference system.
const WEB_MERCATOR: &str = "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 \
     +x_0=0 +y_0=0 +k=1 +units=m +nadgrids=@null +wgs84=0,0,0,0,0,0,0 +no_defs";

#[derive(Debug, Error)]
#[error("projection failed: {0}")]
pub struct ProjectionError(#[from] proj4rs::errors::Error);

/// Projects query coordinates between WGS84 and the dataset's planar system.
///
/// Latitude/longitude outside the valid WGS84 range is not validated here;
/// range checks belong to the caller.
pub struct Projector {
    wgs84: Proj,
    mercator: Proj,
}

impl Projector {
    pub fn new() -> Result<Self, ProjectionError> {
        Ok(Self {
            wgs84: Proj::from_proj_string(WGS84)?,
            mercator: Proj::from_proj_string(WEB_MERCATOR)?,
        })
    }

    /// Project a geodetic (lat, lon) pair to planar (x, y) meters.
    pub fn project(&self, lat: f64, lon: f64) -> Result<(f64, f64), ProjectionError> {
        // proj4rs expects geographic coordinates in radians, lon first
        let mut point = (lon.to_radians(), lat.to_radians(), 0.0);
        transform(&self.wgs84, &self.mercator, &mut point)?;
        Ok((point.0, point.1))
    }

    /// Inverse projection: planar (x, y) meters back to (lat, lon) degrees.
    pub fn unproject(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        let mut point = (x, y, 0.0);
        transform(&self.mercator, &self.wgs84, &mut point)?;
        Ok((point.1.to_degrees(), point.0.to_degrees()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-3; // meters

    #[test]
    fn test_project_origin() {
        let projector = Projector::new().unwrap();
        let (x, y) = projector.project(0.0, 0.0).unwrap();
        assert!(x.abs() < EPS);
        assert!(y.abs() < EPS);
    }

    #[test]
    fn test_project_toronto() {
        // Reference values from pyproj, EPSG:4326 -> EPSG:3857
        let projector = Projector::new().unwrap();
        let (x, y) = projector.project(43.693449, -79.433288).unwrap();
        assert!((x - -8842473.172).abs() < EPS, "x = {x}");
        assert!((y - 5418124.619).abs() < EPS, "y = {y}");
    }

    #[test]
    fn test_project_sign_quadrants() {
        let projector = Projector::new().unwrap();
        let (x, y) = projector.project(45.0, 90.0).unwrap();
        assert!(x > 0.0 && y > 0.0);
        let (x, y) = projector.project(-45.0, -90.0).unwrap();
        assert!(x < 0.0 && y < 0.0);
    }

    #[test]
    fn test_roundtrip() {
        let projector = Projector::new().unwrap();
        for (lat, lon) in [(43.693449, -79.433288), (0.0, 0.0), (-33.87, 151.21)] {
            let (x, y) = projector.project(lat, lon).unwrap();
            let (lat2, lon2) = projector.unproject(x, y).unwrap();
            assert!((lat - lat2).abs() < 1e-9, "lat {lat} -> {lat2}");
            assert!((lon - lon2).abs() < 1e-9, "lon {lon} -> {lon2}");
        }
    }

    #[test]
    fn test_deterministic() {
        let projector = Projector::new().unwrap();
        let a = projector.project(43.693449, -79.433288).unwrap();
        let b = projector.project(43.693449, -79.433288).unwrap();
        assert_eq!(a, b);
    }
}
