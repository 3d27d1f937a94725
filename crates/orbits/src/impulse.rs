//! Velocity impulses and the apogee-anchored perigee recurrence.

use broom_core::constants::{EARTH_RADIUS_KM, MU_EARTH_KM3_S2, REENTRY_PERIGEE_ALT_KM};
use broom_core::vector;

use crate::elements::StateVector;

/// Direction basis for an applied impulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnDirection {
    /// Along the velocity vector.
    Prograde,
    /// Against the velocity vector; the campaign default (lowers perigee).
    Retrograde,
    /// Along the position vector, away from Earth.
    RadialOut,
    /// Against the position vector, toward Earth.
    RadialIn,
}

/// Apply a velocity impulse of `magnitude_m_s` along the chosen basis vector.
///
/// This is the true-anomaly-aware path: the impulse acts wherever the state
/// vector currently is on the orbit. The campaign-level recurrence in
/// [`track_perigee_evolution`] instead assumes every impulse lands at apogee;
/// both models are intentionally kept.
pub fn apply_delta_v(state: &StateVector, magnitude_m_s: f64, direction: BurnDirection) -> StateVector {
    let basis = match direction {
        BurnDirection::Prograde => vector::unit(&state.velocity_km_s),
        BurnDirection::Retrograde => vector::scale(&vector::unit(&state.velocity_km_s), -1.0),
        BurnDirection::RadialOut => vector::unit(&state.position_km),
        BurnDirection::RadialIn => vector::scale(&vector::unit(&state.position_km), -1.0),
    };
    let dv_km_s = magnitude_m_s / 1_000.0;
    StateVector {
        position_km: state.position_km,
        velocity_km_s: vector::add(&state.velocity_km_s, &vector::scale(&basis, dv_km_s)),
    }
}

/// Perigee history produced by [`track_perigee_evolution`].
#[derive(Debug, Clone)]
pub struct PerigeeEvolution {
    /// Perigee altitude after each applied impulse (km).
    pub perigee_alt_series_km: Vec<f64>,
    /// Index of the first impulse that drove perigee below the re-entry
    /// threshold, if any. The series ends at that step.
    pub reentry_index: Option<usize>,
}

/// Evolve perigee under a sequence of retrograde impulse magnitudes (m/s),
/// holding the apogee radius fixed.
///
/// Each step reduces the apogee velocity by the impulse, re-solves the
/// semi-major axis from vis-viva at the fixed apogee radius, and reads the
/// new perigee from `2a - r_apogee`. Every impulse is assumed to occur
/// exactly at apogee regardless of where the engagement actually happened on
/// the orbit; this is a deliberate simplification of the campaign model.
pub fn track_perigee_evolution(
    initial_perigee_alt_km: f64,
    initial_apogee_alt_km: f64,
    delta_vs_m_s: &[f64],
) -> PerigeeEvolution {
    let r_apogee = EARTH_RADIUS_KM + initial_apogee_alt_km;
    let mut r_perigee = EARTH_RADIUS_KM + initial_perigee_alt_km;

    let mut series = Vec::with_capacity(delta_vs_m_s.len());
    let mut reentry_index = None;

    for (index, &dv_m_s) in delta_vs_m_s.iter().enumerate() {
        let a = 0.5 * (r_apogee + r_perigee);
        let v_apogee = (MU_EARTH_KM3_S2 * (2.0 / r_apogee - 1.0 / a)).sqrt();
        let v_new = v_apogee - dv_m_s / 1_000.0;

        // Vis-viva inverted for the new semi-major axis at fixed r_apogee.
        let a_new = 1.0 / (2.0 / r_apogee - v_new * v_new / MU_EARTH_KM3_S2);
        r_perigee = 2.0 * a_new - r_apogee;

        let perigee_alt = r_perigee - EARTH_RADIUS_KM;
        series.push(perigee_alt);

        if perigee_alt < REENTRY_PERIGEE_ALT_KM {
            reentry_index = Some(index);
            break;
        }
    }

    PerigeeEvolution {
        perigee_alt_series_km: series,
        reentry_index,
    }
}

/// One step of the apogee-anchored recurrence: new perigee altitude after a
/// single retrograde impulse (m/s) at apogee.
pub fn perigee_after_retro_burn(
    perigee_alt_km: f64,
    apogee_alt_km: f64,
    dv_m_s: f64,
) -> f64 {
    track_perigee_evolution(perigee_alt_km, apogee_alt_km, &[dv_m_s])
        .perigee_alt_series_km
        .pop()
        .unwrap_or(perigee_alt_km)
}
