//! Classical orbital elements and the bidirectional state-vector conversion.

use std::f64::consts::PI;

use thiserror::Error;

use broom_core::constants::{EARTH_RADIUS_KM, MU_EARTH_KM3_S2};
use broom_core::vector::{self, Vector3};

/// Threshold below which the node/eccentricity vectors degenerate and the
/// angular elements lose meaning.
const DEGENERACY_EPS: f64 = 1.0e-10;

/// Classical Keplerian elements (angles in radians).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerianElements {
    pub semi_major_axis_km: f64,
    pub eccentricity: f64,
    pub inclination_rad: f64,
    pub raan_rad: f64,
    pub arg_perigee_rad: f64,
    pub true_anomaly_rad: f64,
}

/// Inertial position/velocity pair (km, km/s).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position_km: Vector3,
    pub velocity_km_s: Vector3,
}

/// Conversion failures for degenerate geometries.
#[derive(Debug, Error)]
pub enum ElementsError {
    #[error("state vector is degenerate (|r| = {radius_km:.3} km)")]
    DegenerateRadius { radius_km: f64 },
    #[error("orbit is not elliptical (specific energy >= 0)")]
    NotElliptical,
}

impl KeplerianElements {
    /// Elements from a perigee/apogee altitude pair above the mean Earth
    /// radius, with the remaining angles supplied by the caller.
    pub fn from_altitudes(
        perigee_alt_km: f64,
        apogee_alt_km: f64,
        inclination_rad: f64,
    ) -> KeplerianElements {
        let r_perigee = EARTH_RADIUS_KM + perigee_alt_km.min(apogee_alt_km);
        let r_apogee = EARTH_RADIUS_KM + perigee_alt_km.max(apogee_alt_km);
        KeplerianElements {
            semi_major_axis_km: 0.5 * (r_perigee + r_apogee),
            eccentricity: (r_apogee - r_perigee) / (r_apogee + r_perigee),
            inclination_rad,
            raan_rad: 0.0,
            arg_perigee_rad: 0.0,
            true_anomaly_rad: 0.0,
        }
    }

    /// Perigee altitude above the mean Earth radius (km).
    pub fn perigee_altitude_km(&self) -> f64 {
        self.semi_major_axis_km * (1.0 - self.eccentricity) - EARTH_RADIUS_KM
    }

    /// Apogee altitude above the mean Earth radius (km).
    pub fn apogee_altitude_km(&self) -> f64 {
        self.semi_major_axis_km * (1.0 + self.eccentricity) - EARTH_RADIUS_KM
    }

    /// Orbital period (s).
    pub fn period_s(&self) -> f64 {
        2.0 * PI * (self.semi_major_axis_km.powi(3) / MU_EARTH_KM3_S2).sqrt()
    }

    /// Convert to an inertial state vector via the perifocal frame.
    pub fn to_state_vector(&self) -> StateVector {
        let p = self.semi_major_axis_km * (1.0 - self.eccentricity * self.eccentricity);
        let (sin_nu, cos_nu) = self.true_anomaly_rad.sin_cos();
        let r = p / (1.0 + self.eccentricity * cos_nu);

        // Perifocal position and velocity.
        let r_pqw = [r * cos_nu, r * sin_nu, 0.0];
        let v_scale = (MU_EARTH_KM3_S2 / p).sqrt();
        let v_pqw = [
            -v_scale * sin_nu,
            v_scale * (self.eccentricity + cos_nu),
            0.0,
        ];

        let (sin_raan, cos_raan) = self.raan_rad.sin_cos();
        let (sin_argp, cos_argp) = self.arg_perigee_rad.sin_cos();
        let (sin_i, cos_i) = self.inclination_rad.sin_cos();

        // Rows of the PQW -> ECI rotation.
        let rot = [
            [
                cos_raan * cos_argp - sin_raan * sin_argp * cos_i,
                -cos_raan * sin_argp - sin_raan * cos_argp * cos_i,
                sin_raan * sin_i,
            ],
            [
                sin_raan * cos_argp + cos_raan * sin_argp * cos_i,
                -sin_raan * sin_argp + cos_raan * cos_argp * cos_i,
                -cos_raan * sin_i,
            ],
            [sin_argp * sin_i, cos_argp * sin_i, cos_i],
        ];

        let rotate = |v: &Vector3| -> Vector3 {
            [
                rot[0][0] * v[0] + rot[0][1] * v[1] + rot[0][2] * v[2],
                rot[1][0] * v[0] + rot[1][1] * v[1] + rot[1][2] * v[2],
                rot[2][0] * v[0] + rot[2][1] * v[1] + rot[2][2] * v[2],
            ]
        };

        StateVector {
            position_km: rotate(&r_pqw),
            velocity_km_s: rotate(&v_pqw),
        }
    }
}

impl StateVector {
    /// Recover classical elements from the state vector.
    ///
    /// Round-trips with [`KeplerianElements::to_state_vector`] to 1e-6
    /// relative for non-degenerate orbits (e > 1e-4, non-equatorial). For
    /// circular or equatorial geometries the undefined angles fall back to
    /// zero rather than erroring.
    pub fn to_elements(&self) -> Result<KeplerianElements, ElementsError> {
        let r_vec = &self.position_km;
        let v_vec = &self.velocity_km_s;
        let r = vector::norm(r_vec);
        if r < 1.0 {
            return Err(ElementsError::DegenerateRadius { radius_km: r });
        }
        let v2 = vector::dot(v_vec, v_vec);

        let energy = v2 / 2.0 - MU_EARTH_KM3_S2 / r;
        if energy >= 0.0 {
            return Err(ElementsError::NotElliptical);
        }
        let semi_major_axis_km = -MU_EARTH_KM3_S2 / (2.0 * energy);

        let h_vec = vector::cross(r_vec, v_vec);
        let h = vector::norm(&h_vec);
        let n_vec = [-h_vec[1], h_vec[0], 0.0];
        let n = vector::norm(&n_vec);

        let rv_dot = vector::dot(r_vec, v_vec);
        let e_vec = vector::scale(
            &vector::sub(
                &vector::scale(r_vec, v2 - MU_EARTH_KM3_S2 / r),
                &vector::scale(v_vec, rv_dot),
            ),
            1.0 / MU_EARTH_KM3_S2,
        );
        let eccentricity = vector::norm(&e_vec);

        let inclination_rad = (h_vec[2] / h).clamp(-1.0, 1.0).acos();

        let raan_rad = if n > DEGENERACY_EPS {
            let raw = (n_vec[0] / n).clamp(-1.0, 1.0).acos();
            if n_vec[1] < 0.0 { 2.0 * PI - raw } else { raw }
        } else {
            0.0
        };

        let arg_perigee_rad = if n > DEGENERACY_EPS && eccentricity > DEGENERACY_EPS {
            let raw = (vector::dot(&n_vec, &e_vec) / (n * eccentricity))
                .clamp(-1.0, 1.0)
                .acos();
            if e_vec[2] < 0.0 { 2.0 * PI - raw } else { raw }
        } else {
            0.0
        };

        let true_anomaly_rad = if eccentricity > DEGENERACY_EPS {
            let raw = (vector::dot(&e_vec, r_vec) / (eccentricity * r))
                .clamp(-1.0, 1.0)
                .acos();
            if rv_dot < 0.0 { 2.0 * PI - raw } else { raw }
        } else {
            0.0
        };

        Ok(KeplerianElements {
            semi_major_axis_km,
            eccentricity,
            inclination_rad,
            raan_rad,
            arg_perigee_rad,
            true_anomaly_rad,
        })
    }

    /// Geocentric radius (km).
    pub fn radius_km(&self) -> f64 {
        vector::norm(&self.position_km)
    }

    /// Speed (km/s).
    pub fn speed_km_s(&self) -> f64 {
        vector::norm(&self.velocity_km_s)
    }
}
