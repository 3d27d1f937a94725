//! Banded passive atmospheric-decay estimate.

use broom_core::constants::{EARTH_RADIUS_KM, MU_EARTH_KM3_S2, SECONDS_PER_DAY};
use broom_core::piecewise;

/// Drag coefficient assumed for tumbling debris.
const DRAG_COEFFICIENT: f64 = 2.2;

/// Altitude at which the object is considered decayed (km).
const DECAY_FLOOR_ALT_KM: f64 = 100.0;

/// Atmospheric density bands keyed on perigee altitude: (floor km, kg/m³).
/// Representative exospheric values for moderate solar activity; the bands,
/// not the in-band profile, are the model.
const DENSITY_BANDS: [(f64, f64); 4] = [
    (600.0, 1.0e-14),
    (400.0, 1.0e-13),
    (300.0, 1.0e-12),
    (200.0, 1.0e-11),
];

/// Density below the lowest band (kg/m³).
const DENSITY_BELOW_200_KM: f64 = 1.0e-9;

/// Passive decay estimate for a near-circular orbit at the perigee altitude.
#[derive(Debug, Clone, Copy)]
pub struct DecayEstimate {
    /// Band density used (kg/m³).
    pub density_kg_m3: f64,
    /// Semi-major-axis decay rate (km/day).
    pub decay_rate_km_day: f64,
    /// Extrapolated days until the 100 km floor; infinite when the decay
    /// rate is not positive.
    pub lifetime_days: f64,
}

/// Estimate the passive orbital decay for a perigee altitude and
/// area-to-mass ratio (m²/kg).
///
/// Uses the banded density with a King-Hele style per-revolution contraction
/// of a circular orbit at the perigee radius, extrapolated linearly to the
/// 100 km floor.
pub fn estimate_atmospheric_decay(perigee_alt_km: f64, area_to_mass_m2_kg: f64) -> DecayEstimate {
    let density_kg_m3 =
        piecewise::step_down(&DENSITY_BANDS, perigee_alt_km, DENSITY_BELOW_200_KM);

    let r_km = EARTH_RADIUS_KM + perigee_alt_km;
    let a_m = r_km * 1_000.0;
    let period_s = 2.0 * std::f64::consts::PI * (r_km.powi(3) / MU_EARTH_KM3_S2).sqrt();
    let revs_per_day = SECONDS_PER_DAY / period_s;

    // King-Hele circular-orbit contraction per revolution.
    let da_per_rev_m =
        2.0 * std::f64::consts::PI * DRAG_COEFFICIENT * area_to_mass_m2_kg * density_kg_m3 * a_m * a_m;
    let decay_rate_km_day = da_per_rev_m * revs_per_day / 1_000.0;

    let lifetime_days = if decay_rate_km_day > 0.0 {
        ((perigee_alt_km - DECAY_FLOOR_ALT_KM) / decay_rate_km_day).max(0.0)
    } else {
        f64::INFINITY
    };

    DecayEstimate {
        density_kg_m3,
        decay_rate_km_day,
        lifetime_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_bands_are_honoured() {
        let high = estimate_atmospheric_decay(700.0, 0.02);
        let mid = estimate_atmospheric_decay(480.0, 0.02);
        let low = estimate_atmospheric_decay(250.0, 0.02);
        let floor = estimate_atmospheric_decay(150.0, 0.02);
        assert_eq!(high.density_kg_m3, 1.0e-14);
        assert_eq!(mid.density_kg_m3, 1.0e-13);
        assert_eq!(low.density_kg_m3, 1.0e-11);
        assert_eq!(floor.density_kg_m3, 1.0e-9);
    }

    #[test]
    fn lower_orbits_decay_faster() {
        let high = estimate_atmospheric_decay(700.0, 0.02);
        let low = estimate_atmospheric_decay(250.0, 0.02);
        assert!(low.decay_rate_km_day > high.decay_rate_km_day);
        assert!(low.lifetime_days < high.lifetime_days);
    }

    #[test]
    fn zero_area_to_mass_lives_forever() {
        let estimate = estimate_atmospheric_decay(480.0, 0.0);
        assert_eq!(estimate.decay_rate_km_day, 0.0);
        assert!(estimate.lifetime_days.is_infinite());
    }

    #[test]
    fn leo_lifetime_is_years_not_hours() {
        let estimate = estimate_atmospheric_decay(480.0, 0.02);
        assert!(estimate.lifetime_days > 365.0, "{}", estimate.lifetime_days);
        assert!(estimate.lifetime_days.is_finite());
    }
}
