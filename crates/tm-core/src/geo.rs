//! Planar/geographic points and the coordinate reference systems used to
//! measure distances between them.
//!
//! Geometry parsing proper is out of scope; documents carry plain `[x, y]`
//! coordinate pairs.  For a geographic CRS `x` is longitude and `y` latitude,
//! both in degrees; for a cartesian CRS both are metres.

use crate::{CoreError, CoreResult};

/// A coordinate pair in the network's CRS.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub x: f64,
    pub y: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}

/// Coordinate reference system of a network document.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Crs {
    /// WGS-84 longitude/latitude in degrees (EPSG:4326).
    #[default]
    Wgs84,
    /// Planar coordinates in metres.
    Cartesian,
}

impl Crs {
    /// Resolve a CRS by name.  Matching is case-insensitive.
    pub fn resolve(name: &str) -> CoreResult<Crs> {
        match name.trim().to_ascii_uppercase().as_str() {
            "EPSG:4326" | "WGS84" | "WGS 84" | "WGS-84" => Ok(Crs::Wgs84),
            "CARTESIAN" | "PLANAR"                      => Ok(Crs::Cartesian),
            _ => Err(CoreError::UnknownCrs(name.to_owned())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Crs::Wgs84     => "EPSG:4326",
            Crs::Cartesian => "CARTESIAN",
        }
    }

    /// Distance between two points in kilometres.
    pub fn distance_km(self, a: GeoPoint, b: GeoPoint) -> f64 {
        match self {
            Crs::Wgs84 => haversine_km(a, b),
            Crs::Cartesian => {
                let dx = b.x - a.x;
                let dy = b.y - a.y;
                (dx * dx + dy * dy).sqrt() / 1_000.0
            }
        }
    }
}

/// Haversine great-circle distance in kilometres.
fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    const R: f64 = 6_371.0; // mean Earth radius, km

    let d_lat = (b.y - a.y).to_radians();
    let d_lon = (b.x - a.x).to_radians();

    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();

    let h = (d_lat * 0.5).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

    2.0 * R * h.sqrt().atan2((1.0 - h).sqrt())
}
