//! Core units, constants, and shared primitives for the laser_broom workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Earth gravitational parameter (km³/s²).
    pub const MU_EARTH_KM3_S2: f64 = 398_600.4418;
    /// Mean Earth radius used for altitude bookkeeping (km).
    pub const EARTH_RADIUS_KM: f64 = 6_371.0;
    /// Earth equatorial radius, WGS-84 (km).
    pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6_378.137;
    /// Earth flattening factor, WGS-84.
    pub const EARTH_FLATTENING: f64 = 1.0 / 298.257_223_563;
    /// Earth rotation rate (rad/s).
    pub const EARTH_ROTATION_RAD_S: f64 = 7.292_115_9e-5;
    /// Earth J2 zonal harmonic.
    pub const J2_EARTH: f64 = 1.082_63e-3;
    /// Stefan-Boltzmann constant (W/(m²·K⁴)).
    pub const STEFAN_BOLTZMANN: f64 = 5.670_374_419e-8;
    /// Solar constant at 1 AU (W/cm²).
    pub const SOLAR_CONSTANT_W_CM2: f64 = 0.1361;
    /// Seconds per Julian day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Perigee altitude below which natural drag guarantees decay (km).
    pub const REENTRY_PERIGEE_ALT_KM: f64 = 200.0;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert kilometres to metres.
    #[inline]
    pub fn km_to_m(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert metres per second to kilometres per second.
    #[inline]
    pub fn ms_to_kms(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert kilometres per second to metres per second.
    #[inline]
    pub fn kms_to_ms(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert a fluence in J/cm² to J/m².
    #[inline]
    pub fn j_cm2_to_j_m2(v: f64) -> f64 {
        v * 1.0e4
    }

    /// Convert joules to kilowatt-hours.
    #[inline]
    pub fn joules_to_kwh(v: f64) -> f64 {
        v / 3.6e6
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::SECONDS_PER_DAY;

    /// Convert days to seconds.
    #[inline]
    pub fn days_to_seconds(days: f64) -> f64 {
        days * SECONDS_PER_DAY
    }

    /// Convert seconds to days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in kilometres or km/s depending on context.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Cross product of two vectors.
    #[inline]
    pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Unit vector in the direction of `v`. Returns zero vector for zero input.
    #[inline]
    pub fn unit(v: &Vector3) -> Vector3 {
        let n = norm(v);
        if n == 0.0 { [0.0, 0.0, 0.0] } else { scale(v, 1.0 / n) }
    }
}

/// Piecewise-linear breakpoint tables for the empirical physical curves.
///
/// The curves used by the beam model and the decay estimator are load-bearing
/// empirical data; keeping them as ordered `(x, y)` tables makes each boundary
/// value addressable from a test.
pub mod piecewise {
    /// Evaluate a piecewise-linear curve described by ordered breakpoints.
    ///
    /// Values below the first breakpoint clamp to the first `y`; values above
    /// the last breakpoint clamp to the last `y`. Breakpoints must be sorted
    /// by `x`.
    pub fn linear(table: &[(f64, f64)], x: f64) -> f64 {
        debug_assert!(table.len() >= 2);
        if x <= table[0].0 {
            return table[0].1;
        }
        for pair in table.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            if x <= x1 {
                let t = (x - x0) / (x1 - x0);
                return y0 + t * (y1 - y0);
            }
        }
        table[table.len() - 1].1
    }

    /// Evaluate a step function keyed on descending thresholds.
    ///
    /// Returns the `y` of the first entry whose threshold is at or below `x`,
    /// or `floor` when `x` is below every threshold.
    pub fn step_down(table: &[(f64, f64)], x: f64, floor: f64) -> f64 {
        for &(threshold, y) in table {
            if x >= threshold {
                return y;
            }
        }
        floor
    }
}
