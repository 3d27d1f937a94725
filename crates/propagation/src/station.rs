//! Ground-station geodetic coordinates and the ECEF conversion.

use broom_core::constants::{EARTH_EQUATORIAL_RADIUS_KM, EARTH_FLATTENING};
use broom_core::vector::Vector3;

/// A ground station placed by the calling application. Immutable once built;
/// the engine only borrows it for the duration of a scan.
#[derive(Debug, Clone)]
pub struct GroundStation {
    pub name: String,
    /// Geodetic latitude in degrees, north positive.
    pub latitude_deg: f64,
    /// Geodetic longitude in degrees, east positive.
    pub longitude_deg: f64,
    /// Height above the WGS-84 ellipsoid in metres.
    pub altitude_m: f64,
}

impl GroundStation {
    /// Station at the given geodetic coordinates at ellipsoid height zero.
    pub fn new(name: impl Into<String>, latitude_deg: f64, longitude_deg: f64) -> Self {
        GroundStation {
            name: name.into(),
            latitude_deg,
            longitude_deg,
            altitude_m: 0.0,
        }
    }

    /// Convert geodetic coordinates to ECEF (km), WGS-84 ellipsoid.
    pub fn to_ecef_km(&self) -> Vector3 {
        let lat = self.latitude_deg.to_radians();
        let lon = self.longitude_deg.to_radians();
        let alt_km = self.altitude_m / 1_000.0;

        let e2 = EARTH_FLATTENING * (2.0 - EARTH_FLATTENING);
        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let n = EARTH_EQUATORIAL_RADIUS_KM / (1.0 - e2 * sin_lat * sin_lat).sqrt();

        [
            (n + alt_km) * cos_lat * lon.cos(),
            (n + alt_km) * cos_lat * lon.sin(),
            (n * (1.0 - e2) + alt_km) * sin_lat,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use broom_core::vector;

    #[test]
    fn equator_prime_meridian_lies_on_x_axis() {
        let station = GroundStation::new("null island", 0.0, 0.0);
        let ecef = station.to_ecef_km();
        assert!((ecef[0] - EARTH_EQUATORIAL_RADIUS_KM).abs() < 1e-6);
        assert!(ecef[1].abs() < 1e-9);
        assert!(ecef[2].abs() < 1e-9);
    }

    #[test]
    fn pole_is_shorter_than_equator() {
        let pole = GroundStation::new("pole", 90.0, 0.0).to_ecef_km();
        assert!(pole[2] < EARTH_EQUATORIAL_RADIUS_KM);
        assert!(pole[2] > 6_350.0);
    }

    #[test]
    fn altitude_extends_the_radius() {
        let sea = GroundStation::new("sea", 45.0, 10.0);
        let mut high = sea.clone();
        high.altitude_m = 2_000.0;
        let d = vector::norm(&high.to_ecef_km()) - vector::norm(&sea.to_ecef_km());
        assert!((d - 2.0).abs() < 1e-3);
    }
}
