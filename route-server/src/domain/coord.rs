//! Geographic coordinate type.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A WGS84 (longitude, latitude) pair.
///
/// Coordinates key the projection cache, so equality and hashing use the
/// exact bit pattern of both components. Two coordinates compare equal only
/// when they were built from the same floating-point values.
///
/// # Examples
///
/// ```
/// use route_server::domain::Coordinate;
///
/// let dock = Coordinate::new(2.37001, 48.8461);
/// assert_eq!(dock.lon(), 2.37001);
/// assert_eq!(dock.location_ref(), "2.37001;48.84610");
/// ```
#[derive(Clone, Copy)]
pub struct Coordinate {
    lon: f64,
    lat: f64,
}

impl Coordinate {
    /// Creates a coordinate from longitude and latitude in degrees.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Returns the caller-facing location reference for this point:
    /// `"<lon>;<lat>"` at fixed 5-decimal precision (roughly 1 metre).
    pub fn location_ref(&self) -> String {
        format!("{:.5};{:.5}", self.lon, self.lat)
    }

    fn bits(&self) -> (u64, u64) {
        (self.lon.to_bits(), self.lat.to_bits())
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({};{})", self.lon, self.lat)
    }
}

impl fmt::Display for Coordinate {
    /// Full-precision `"<lon>;<lat>"` form; parseable back by the place
    /// token parser.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.lon, self.lat)
    }
}
