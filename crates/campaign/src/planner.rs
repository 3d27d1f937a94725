//! Pass-by-pass engagement planner.
//!
//! Walks the chronological pass list once, carrying the thermal ledger and
//! the evolving perigee between passes. Every processed pass produces a
//! result record, engaged or skipped, so the report is a complete audit of
//! the campaign.

use log::{debug, info, warn};
use serde::Serialize;

use broom_core::constants::{EARTH_RADIUS_KM, REENTRY_PERIGEE_ALT_KM};
use broom_core::time::seconds_to_days;
use broom_core::units::km_to_m;
use broom_laser::LaserConfig;
use broom_orbits::{estimate_atmospheric_decay, perigee_after_retro_burn};
use broom_thermal::{HeatingRejection, ThermalLedger};
use broom_visibility::VisibilityPass;

use crate::report::MissionReport;
use crate::target::{DebrisTarget, ValidationError, validate};

/// Ledger ambient when the caller does not override it: a rough LEO
/// equilibrium between sunlit and eclipse phases (K).
pub const DEFAULT_AMBIENT_TEMP_K: f64 = 250.0;

/// Why a pass was recorded but not fired on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Beam intensity on a large target exceeded the safety limit.
    IntensityTooHigh,
    /// The thermal budget admits no pulse yet; a longer gap would.
    InsufficientCooldown,
    /// No amount of cooling lets even one pulse fit the thermal budget.
    ThermalLimitReached,
    /// The heating proposal would reach the melting point.
    MeltingRisk,
    /// The heating proposal would exceed the safe temperature rise.
    TempLimitExceeded,
}

/// Which resource capped the pulse count of an engaged pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingConstraint {
    /// The thermal margin admitted fewer pulses than the pass could fit.
    Thermal,
    /// The repetition rate over the pass duration was the cap.
    LaserSystem,
}

/// Engagement status of one processed pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PassOutcome {
    Engaged,
    Skipped { reason: SkipReason },
}

/// Full record of one processed pass.
#[derive(Debug, Clone, Serialize)]
pub struct PassEngagementResult {
    /// Index into the chronological pass list.
    pub pass_index: usize,
    pub station_name: String,
    pub start_s: f64,
    pub duration_s: f64,
    pub max_elevation_deg: f64,
    /// Engagement slant range at the pass peak (km).
    pub slant_range_km: f64,
    /// Fluence on target at that range (J/cm²).
    pub fluence_j_cm2: f64,
    pub pulses: u32,
    /// Set for engaged passes and for zero-budget skips.
    pub binding_constraint: Option<BindingConstraint>,
    /// Velocity decrement imparted by this pass (m/s).
    pub delta_v_m_s: f64,
    /// Temperature rise applied by this pass (K).
    pub heating_delta_k: f64,
    /// Ledger temperature after the pass (K).
    pub temp_after_k: f64,
    /// Perigee altitude after the pass (km).
    pub perigee_alt_km: f64,
    pub outcome: PassOutcome,
}

/// Slant range (km) from a station to a target at `altitude_km` seen at
/// `elevation_deg`, spherical Earth.
pub fn slant_range_km(altitude_km: f64, elevation_deg: f64) -> f64 {
    let re = EARTH_RADIUS_KM;
    let r = re + altitude_km;
    let el = elevation_deg.to_radians();
    let cos_el = el.cos();
    (r * r - re * re * cos_el * cos_el).sqrt() - re * el.sin()
}

#[allow(clippy::too_many_arguments)]
fn skipped_result(
    pass_index: usize,
    pass: &VisibilityPass,
    slant_range_km: f64,
    fluence_j_cm2: f64,
    temp_after_k: f64,
    perigee_alt_km: f64,
    reason: SkipReason,
    binding: Option<BindingConstraint>,
) -> PassEngagementResult {
    PassEngagementResult {
        pass_index,
        station_name: pass.station_name.clone(),
        start_s: pass.start_s,
        duration_s: pass.duration_s,
        max_elevation_deg: pass.max_elevation_deg,
        slant_range_km,
        fluence_j_cm2,
        pulses: 0,
        binding_constraint: binding,
        delta_v_m_s: 0.0,
        heating_delta_k: 0.0,
        temp_after_k,
        perigee_alt_km,
        outcome: PassOutcome::Skipped { reason },
    }
}

/// Run the engagement campaign over an already-scanned pass list.
///
/// Inputs are validated up front; no simulation state is created while any
/// violation is present. A zero-length pass list is a normal campaign that
/// fired nothing.
pub fn run_campaign(
    target: &DebrisTarget,
    laser: &LaserConfig,
    passes: &[VisibilityPass],
    ambient_temp_k: f64,
) -> Result<MissionReport, ValidationError> {
    validate(target, laser)?;

    let profile = target.material.profile();
    let mut ledger = ThermalLedger::new(
        ambient_temp_k,
        target.cross_section_m2,
        target.mass_kg,
        profile,
    );

    let initial_perigee_alt_km = target.elements.perigee_altitude_km();
    // The recurrence holds the apogee radius fixed; every impulse is taken
    // at apogee.
    let apogee_alt_km = target.elements.apogee_altitude_km();
    let mut perigee_alt_km = initial_perigee_alt_km;

    let mut pass_results: Vec<PassEngagementResult> = Vec::new();
    let mut perigee_alt_series_km: Vec<f64> = Vec::new();
    let mut total_pulses: u64 = 0;
    let mut total_energy_j = 0.0;
    let mut total_delta_v_m_s = 0.0;
    let mut completion_pass_index = None;
    let mut previous_start_s = None;

    for (pass_index, pass) in passes.iter().enumerate() {
        if let Some(prev) = previous_start_s {
            ledger.apply_cooling(pass.start_s - prev);
        }
        previous_start_s = Some(pass.start_s);

        // Engagement geometry at the pass peak, from the current orbit.
        let mid_altitude_km = 0.5 * (perigee_alt_km + apogee_alt_km);
        let range_km = slant_range_km(mid_altitude_km, pass.max_elevation_deg);
        let range_m = km_to_m(range_km);
        let fluence_j_cm2 = laser.fluence_j_cm2(range_m);

        if let Err(refusal) = laser.check_intensity(target.size_m, range_m) {
            warn!("pass {pass_index} ({}): {refusal}", pass.station_name);
            pass_results.push(skipped_result(
                pass_index,
                pass,
                range_km,
                fluence_j_cm2,
                ledger.current_temp_k(),
                perigee_alt_km,
                SkipReason::IntensityTooHigh,
                None,
            ));
            perigee_alt_series_km.push(perigee_alt_km);
            continue;
        }

        // Adaptive pulse budget: whichever of the thermal margin and the
        // repetition rate over the pass admits fewer pulses wins.
        let delta_t_one_k = ledger.heating_delta_k(1, fluence_j_cm2);
        let margin_k = profile.max_temp_rise_k - (ledger.current_temp_k() - ambient_temp_k);
        let thermal_budget = if delta_t_one_k > 0.0 {
            (margin_k / delta_t_one_k).floor().max(0.0) as u32
        } else {
            u32::MAX
        };
        let time_budget = (laser.max_rep_rate_hz * pass.duration_s).floor() as u32;
        let pulses = thermal_budget.min(time_budget);
        let binding = if thermal_budget < time_budget {
            BindingConstraint::Thermal
        } else {
            BindingConstraint::LaserSystem
        };

        if pulses == 0 {
            // Distinguish "wait longer" from "never": a finite cooldown for
            // a single pulse means the gap was simply too short.
            let reason = if ledger.required_cooldown_s(1, fluence_j_cm2).is_finite() {
                SkipReason::InsufficientCooldown
            } else {
                SkipReason::ThermalLimitReached
            };
            debug!(
                "pass {pass_index} ({}): zero pulse budget, {reason:?}",
                pass.station_name
            );
            pass_results.push(skipped_result(
                pass_index,
                pass,
                range_km,
                fluence_j_cm2,
                ledger.current_temp_k(),
                perigee_alt_km,
                reason,
                Some(binding),
            ));
            perigee_alt_series_km.push(perigee_alt_km);
            continue;
        }

        let receipt = match ledger.apply_heating(pulses, fluence_j_cm2) {
            Ok(receipt) => receipt,
            Err(rejection) => {
                let reason = match rejection {
                    HeatingRejection::MeltingRisk => SkipReason::MeltingRisk,
                    HeatingRejection::TempLimitExceeded => SkipReason::TempLimitExceeded,
                };
                warn!("pass {pass_index} ({}): {rejection}", pass.station_name);
                pass_results.push(skipped_result(
                    pass_index,
                    pass,
                    range_km,
                    fluence_j_cm2,
                    ledger.current_temp_k(),
                    perigee_alt_km,
                    reason,
                    Some(binding),
                ));
                perigee_alt_series_km.push(perigee_alt_km);
                continue;
            }
        };

        let delta_v_m_s = pulses as f64 * laser.delta_v_per_pulse_m_s(fluence_j_cm2, target.mass_kg);
        perigee_alt_km = perigee_after_retro_burn(perigee_alt_km, apogee_alt_km, delta_v_m_s);

        total_pulses += u64::from(pulses);
        total_energy_j += pulses as f64 * laser.pulse_energy_j;
        total_delta_v_m_s += delta_v_m_s;

        debug!(
            "pass {pass_index} ({}): {pulses} pulses ({binding:?}-bound), \
             dv {delta_v_m_s:.4} m/s, perigee {perigee_alt_km:.1} km",
            pass.station_name
        );

        pass_results.push(PassEngagementResult {
            pass_index,
            station_name: pass.station_name.clone(),
            start_s: pass.start_s,
            duration_s: pass.duration_s,
            max_elevation_deg: pass.max_elevation_deg,
            slant_range_km: range_km,
            fluence_j_cm2,
            pulses,
            binding_constraint: Some(binding),
            delta_v_m_s,
            heating_delta_k: receipt.delta_t_k,
            temp_after_k: receipt.new_temp_k,
            perigee_alt_km,
            outcome: PassOutcome::Engaged,
        });
        perigee_alt_series_km.push(perigee_alt_km);

        if perigee_alt_km < REENTRY_PERIGEE_ALT_KM {
            info!(
                "target '{}' reaches re-entry perigee after pass {pass_index} \
                 ({perigee_alt_km:.1} km)",
                target.name
            );
            completion_pass_index = Some(pass_index);
            break;
        }
    }

    let campaign_duration_days = pass_results
        .last()
        .map(|result| seconds_to_days(result.start_s + result.duration_s))
        .unwrap_or(0.0);

    let passes_engaged = pass_results
        .iter()
        .filter(|result| result.outcome == PassOutcome::Engaged)
        .count();
    let passes_processed = pass_results.len();

    let passive = estimate_atmospheric_decay(initial_perigee_alt_km, target.area_to_mass_m2_kg());
    let cost = broom_cost::estimate(total_energy_j, campaign_duration_days);

    info!(
        "campaign for '{}': {passes_engaged}/{passes_processed} passes engaged, \
         {total_pulses} pulses, perigee {initial_perigee_alt_km:.1} -> {perigee_alt_km:.1} km",
        target.name
    );

    Ok(MissionReport {
        debris_name: target.name.clone(),
        material: profile.name,
        initial_perigee_alt_km,
        initial_apogee_alt_km: apogee_alt_km,
        final_perigee_alt_km: perigee_alt_km,
        final_apogee_alt_km: apogee_alt_km,
        passes_processed,
        passes_engaged,
        passes_skipped: passes_processed - passes_engaged,
        total_pulses,
        total_energy_j,
        total_delta_v_m_s,
        re_entry_achieved: completion_pass_index.is_some(),
        completion_pass_index,
        campaign_duration_days,
        perigee_alt_series_km,
        passive_lifetime_days: passive.lifetime_days,
        cost,
        scan_diagnostics: None,
        pass_results,
    })
}
