//! SGP4-class propagation with J2 secular rates and B* drag, plus the
//! topocentric transform used for look angles.

use std::f64::consts::PI;

use thiserror::Error;

use broom_core::constants::{
    EARTH_RADIUS_KM, EARTH_ROTATION_RAD_S, J2_EARTH, MU_EARTH_KM3_S2,
};
use broom_core::vector::Vector3;

use crate::station::GroundStation;
use crate::tle::OrbitalElements;

const MINUTES_PER_DAY: f64 = 1_440.0;

/// Inertial (ECI) state at a propagation instant.
#[derive(Debug, Clone)]
pub struct EciState {
    pub position_km: Vector3,
    pub velocity_km_s: Vector3,
    /// Seconds since the element epoch.
    pub time_s: f64,
}

impl EciState {
    /// Geocentric radius (km).
    pub fn radius_km(&self) -> f64 {
        broom_core::vector::norm(&self.position_km)
    }

    /// Altitude above the mean Earth radius (km).
    pub fn altitude_km(&self) -> f64 {
        self.radius_km() - EARTH_RADIUS_KM
    }
}

/// Topocentric observation of the target from a ground station.
#[derive(Debug, Clone, Copy)]
pub struct LookAngles {
    /// Elevation above the local horizon (degrees).
    pub elevation_deg: f64,
    /// Azimuth clockwise from true north (degrees, 0..360).
    pub azimuth_deg: f64,
    /// Slant range from the station to the target (km).
    pub range_km: f64,
}

/// Propagation failures. These are surfaced to the caller, never treated as
/// "no visibility".
#[derive(Debug, Error)]
pub enum PropagationError {
    #[error("orbit decayed: geocentric radius {radius_km:.1} km is below the physical floor")]
    OrbitDecayed { radius_km: f64 },
    #[error("Kepler solver failed to converge (e = {eccentricity:.6})")]
    KeplerNotConverged { eccentricity: f64 },
}

/// Simplified SGP4-class propagator over one set of mean elements.
///
/// Models secular J2 perturbations on the node and argument of perigee and a
/// first-order B* drag decay of mean motion and eccentricity. Suitable for
/// the short-horizon LEO predictions the visibility scanner needs; not a
/// substitute for a full SGP4/SDP4 implementation.
pub struct OrbitPropagator {
    elements: OrbitalElements,
    /// Semi-major axis at epoch (km).
    a0_km: f64,
    cos_i0: f64,
    sin_i0: f64,
    /// Greenwich mean sidereal time at the element epoch (rad).
    gmst_epoch_rad: f64,
}

impl OrbitPropagator {
    pub fn new(elements: &OrbitalElements) -> Self {
        let n0_rad_s = elements.mean_motion_rad_min / 60.0;
        let a0_km = (MU_EARTH_KM3_S2 / (n0_rad_s * n0_rad_s)).powf(1.0 / 3.0);
        let gmst_epoch_rad = elements
            .epoch_datetime()
            .map(|epoch| gmst_rad(julian_date(epoch.timestamp() as f64)))
            .unwrap_or(0.0);

        OrbitPropagator {
            elements: elements.clone(),
            a0_km,
            cos_i0: elements.inclination_rad.cos(),
            sin_i0: elements.inclination_rad.sin(),
            gmst_epoch_rad,
        }
    }

    /// Mean elements this propagator was built from.
    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    /// Propagate to `t_s` seconds after the element epoch.
    pub fn propagate(&self, t_s: f64) -> Result<EciState, PropagationError> {
        let dt_min = t_s / 60.0;
        let e0 = self.elements.eccentricity;
        let n0 = self.elements.mean_motion_rad_min;
        let a0 = self.a0_km;

        // Secular J2 rates on the node and the argument of perigee (rad/min).
        let p0 = a0 * (1.0 - e0 * e0);
        let j2_factor = 1.5 * J2_EARTH * (EARTH_RADIUS_KM / p0).powi(2);
        let raan_dot = -j2_factor * n0 * self.cos_i0;
        let argp_dot = j2_factor * n0 * (2.0 - 2.5 * self.sin_i0 * self.sin_i0);

        // B* drag: linear mean-motion growth plus eccentricity decay.
        let ndot_rad_min2 =
            self.elements.ndot_over_2 * 2.0 * 2.0 * PI / (MINUTES_PER_DAY * MINUTES_PER_DAY);
        let n_t = n0 + ndot_rad_min2 * dt_min;
        let n_t_rad_s = n_t / 60.0;
        let a_t = (MU_EARTH_KM3_S2 / (n_t_rad_s * n_t_rad_s)).powf(1.0 / 3.0);
        let e_t = (e0 - 2.0 * self.elements.bstar * EARTH_RADIUS_KM * dt_min * 60.0 / a0)
            .clamp(1.0e-6, 1.0 - 1.0e-6);

        let m_t = normalize_angle(
            self.elements.mean_anomaly_rad + n0 * dt_min + 0.5 * ndot_rad_min2 * dt_min * dt_min,
        );
        let raan_t = normalize_angle(self.elements.raan_rad + raan_dot * dt_min);
        let argp_t = normalize_angle(self.elements.arg_perigee_rad + argp_dot * dt_min);

        let ecc_anomaly = solve_kepler(m_t, e_t)?;

        let sin_e = ecc_anomaly.sin();
        let cos_e = ecc_anomaly.cos();
        let true_anomaly = f64::atan2((1.0 - e_t * e_t).sqrt() * sin_e, cos_e - e_t);
        let r = a_t * (1.0 - e_t * cos_e);
        if r < EARTH_RADIUS_KM {
            return Err(PropagationError::OrbitDecayed { radius_km: r });
        }

        // Perifocal to ECI.
        let u = argp_t + true_anomaly;
        let (sin_u, cos_u) = u.sin_cos();
        let (sin_raan, cos_raan) = raan_t.sin_cos();
        let (sin_i, cos_i) = (self.sin_i0, self.cos_i0);

        let position_km = [
            r * (cos_raan * cos_u - sin_raan * sin_u * cos_i),
            r * (sin_raan * cos_u + cos_raan * sin_u * cos_i),
            r * sin_u * sin_i,
        ];

        let p_t = a_t * (1.0 - e_t * e_t);
        let r_dot = (MU_EARTH_KM3_S2 / p_t).sqrt() * e_t * true_anomaly.sin();
        let r_f_dot = (MU_EARTH_KM3_S2 / p_t).sqrt() * (1.0 + e_t * true_anomaly.cos());

        let velocity_km_s = [
            r_dot * (cos_raan * cos_u - sin_raan * sin_u * cos_i)
                - r_f_dot * (cos_raan * sin_u + sin_raan * cos_u * cos_i),
            r_dot * (sin_raan * cos_u + cos_raan * sin_u * cos_i)
                - r_f_dot * (sin_raan * sin_u - cos_raan * cos_u * cos_i),
            r_dot * sin_u * sin_i + r_f_dot * cos_u * sin_i,
        ];

        Ok(EciState {
            position_km,
            velocity_km_s,
            time_s: t_s,
        })
    }

    /// Topocentric look angles from a ground station at `t_s` seconds after
    /// the element epoch. Applies the sidereal rotation at the query instant
    /// before rotating into the station's ENU frame.
    pub fn look_angles(
        &self,
        t_s: f64,
        station: &GroundStation,
    ) -> Result<LookAngles, PropagationError> {
        let state = self.propagate(t_s)?;

        let gmst = self.gmst_epoch_rad + EARTH_ROTATION_RAD_S * t_s;
        let (sin_g, cos_g) = gmst.sin_cos();
        let sat_ecef = [
            state.position_km[0] * cos_g + state.position_km[1] * sin_g,
            -state.position_km[0] * sin_g + state.position_km[1] * cos_g,
            state.position_km[2],
        ];

        let obs_ecef = station.to_ecef_km();
        let dx = sat_ecef[0] - obs_ecef[0];
        let dy = sat_ecef[1] - obs_ecef[1];
        let dz = sat_ecef[2] - obs_ecef[2];
        let range_km = (dx * dx + dy * dy + dz * dz).sqrt();

        let lat = station.latitude_deg.to_radians();
        let lon = station.longitude_deg.to_radians();
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();

        // ECEF range vector into ENU.
        let east = -sin_lon * dx + cos_lon * dy;
        let north = -sin_lat * cos_lon * dx - sin_lat * sin_lon * dy + cos_lat * dz;
        let up = cos_lat * cos_lon * dx + cos_lat * sin_lon * dy + sin_lat * dz;

        let elevation_deg = (up / range_km).asin().to_degrees();
        let azimuth_deg = east.atan2(north).to_degrees().rem_euclid(360.0);

        Ok(LookAngles {
            elevation_deg,
            azimuth_deg,
            range_km,
        })
    }
}

/// Solve Kepler's equation `M = E - e sin E` by Newton-Raphson.
fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> Result<f64, PropagationError> {
    let m = normalize_angle(mean_anomaly);
    let mut e_anom = if eccentricity > 0.8 { PI } else { m };

    for _ in 0..50 {
        let f = e_anom - eccentricity * e_anom.sin() - m;
        let f_prime = 1.0 - eccentricity * e_anom.cos();
        let delta = f / f_prime;
        e_anom -= delta;
        if delta.abs() < 1.0e-12 {
            return Ok(e_anom);
        }
    }
    Err(PropagationError::KeplerNotConverged { eccentricity })
}

fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(2.0 * PI)
}

/// Julian date from a Unix timestamp in seconds.
fn julian_date(unix_s: f64) -> f64 {
    unix_s / 86_400.0 + 2_440_587.5
}

/// Greenwich mean sidereal time (rad) at the given Julian date.
fn gmst_rad(jd: f64) -> f64 {
    let gmst_deg = 280.460_618_37 + 360.985_647_366_29 * (jd - 2_451_545.0);
    gmst_deg.rem_euclid(360.0).to_radians()
}
