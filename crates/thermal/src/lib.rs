//! Thermal budget tracking for one debris target across a campaign.
//!
//! One scalar temperature per target. Heating proposals are accepted or
//! rejected against the material's safe rise and melting point; rejected
//! proposals leave the ledger untouched. Cooling relaxes exponentially toward
//! ambient with a radiative time constant linearized at the current
//! temperature.

pub mod materials;

pub use materials::{MaterialId, MaterialProfile};

use thiserror::Error;

use broom_core::constants::STEFAN_BOLTZMANN;
use broom_core::units::j_cm2_to_j_m2;

/// Fixed surface emissivity used for the radiative cooling constant.
const EMISSIVITY: f64 = 0.8;

/// Safety factor applied to the needed margin by the cooldown solver.
const COOLDOWN_SAFETY_FACTOR: f64 = 1.5;

/// Heating proposal rejected; the ledger state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeatingRejection {
    #[error("projected temperature reaches the material melting point")]
    MeltingRisk,
    #[error("projected temperature rise exceeds the safe limit")]
    TempLimitExceeded,
}

/// Accepted heating result.
#[derive(Debug, Clone, Copy)]
pub struct HeatingReceipt {
    /// Temperature rise applied by this engagement (K).
    pub delta_t_k: f64,
    /// Ledger temperature after the engagement (K).
    pub new_temp_k: f64,
    /// Remaining margin to the safe rise limit (K).
    pub safety_margin_k: f64,
}

/// Mutable thermal state for one debris target. Owned by exactly one campaign
/// run; the material profile is borrowed from the static table.
#[derive(Debug, Clone)]
pub struct ThermalLedger<'a> {
    current_temp_k: f64,
    ambient_temp_k: f64,
    area_m2: f64,
    mass_kg: f64,
    material: &'a MaterialProfile,
}

impl<'a> ThermalLedger<'a> {
    /// New ledger in equilibrium at the ambient temperature.
    pub fn new(
        ambient_temp_k: f64,
        area_m2: f64,
        mass_kg: f64,
        material: &'a MaterialProfile,
    ) -> Self {
        ThermalLedger {
            current_temp_k: ambient_temp_k,
            ambient_temp_k,
            area_m2,
            mass_kg,
            material,
        }
    }

    pub fn current_temp_k(&self) -> f64 {
        self.current_temp_k
    }

    pub fn ambient_temp_k(&self) -> f64 {
        self.ambient_temp_k
    }

    pub fn material(&self) -> &MaterialProfile {
        self.material
    }

    /// Temperature rise (K) a burst of `pulses` pulses at the given fluence
    /// would deposit. Pure; does not touch the ledger.
    pub fn heating_delta_k(&self, pulses: u32, fluence_j_cm2: f64) -> f64 {
        let absorbed_j_m2 =
            broom_laser::absorption_efficiency(fluence_j_cm2) * j_cm2_to_j_m2(fluence_j_cm2);
        (self.area_m2 / self.mass_kg) / self.material.specific_heat_j_kg_k
            * absorbed_j_m2
            * pulses as f64
    }

    /// Propose a heating step. Accepts and mutates only when the projected
    /// temperature stays under both the safe-rise limit and the melting
    /// point; otherwise the ledger is left bit-identical.
    pub fn apply_heating(
        &mut self,
        pulses: u32,
        fluence_j_cm2: f64,
    ) -> Result<HeatingReceipt, HeatingRejection> {
        let delta_t_k = self.heating_delta_k(pulses, fluence_j_cm2);
        let new_temp_k = self.current_temp_k + delta_t_k;

        if new_temp_k >= self.material.melting_point_k {
            return Err(HeatingRejection::MeltingRisk);
        }
        if new_temp_k - self.ambient_temp_k > self.material.max_temp_rise_k {
            return Err(HeatingRejection::TempLimitExceeded);
        }

        self.current_temp_k = new_temp_k;
        Ok(HeatingReceipt {
            delta_t_k,
            new_temp_k,
            safety_margin_k: self.material.max_temp_rise_k - (new_temp_k - self.ambient_temp_k),
        })
    }

    /// Radiative cooling time constant (s), Stefan-Boltzmann linearized at
    /// the current temperature.
    pub fn cooling_time_constant_s(&self) -> f64 {
        let rate = EMISSIVITY * STEFAN_BOLTZMANN * self.area_m2
            / (self.mass_kg * self.material.specific_heat_j_kg_k);
        let t = self.current_temp_k;
        1.0 / (4.0 * rate * t * t * t)
    }

    /// Relax toward ambient over `elapsed_s` seconds. Always succeeds;
    /// never increases |T - ambient|.
    pub fn apply_cooling(&mut self, elapsed_s: f64) {
        if elapsed_s <= 0.0 {
            return;
        }
        let tau = self.cooling_time_constant_s();
        let offset = self.current_temp_k - self.ambient_temp_k;
        self.current_temp_k = self.ambient_temp_k + offset * (-elapsed_s / tau).exp();
    }

    /// Wait time (s) needed before a burst of `pulses` pulses at the given
    /// fluence fits the thermal budget, with a 1.5x safety factor on the
    /// needed margin. Zero when the current margin already admits the burst;
    /// infinite when no amount of cooling can. Read-only.
    pub fn required_cooldown_s(&self, pulses: u32, fluence_j_cm2: f64) -> f64 {
        let delta_t_k = self.heating_delta_k(pulses, fluence_j_cm2);
        let current_offset = self.current_temp_k - self.ambient_temp_k;
        if delta_t_k <= self.material.max_temp_rise_k - current_offset {
            return 0.0;
        }

        let needed_margin_k = delta_t_k * COOLDOWN_SAFETY_FACTOR;
        let target_offset_k = self.material.max_temp_rise_k - needed_margin_k;
        if target_offset_k <= 0.0 {
            return f64::INFINITY;
        }
        if current_offset <= target_offset_k {
            return 0.0;
        }
        self.cooling_time_constant_s() * (current_offset / target_offset_k).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aluminum_ledger() -> ThermalLedger<'static> {
        ThermalLedger::new(250.0, 0.3, 15.0, MaterialId::Aluminum.profile())
    }

    #[test]
    fn heating_accumulates_and_reports_margin() {
        let mut ledger = aluminum_ledger();
        let receipt = ledger.apply_heating(10, 5.0).unwrap();
        assert!(receipt.delta_t_k > 0.0);
        assert!(ledger.current_temp_k() > ledger.ambient_temp_k());
        assert!(receipt.safety_margin_k < ledger.material().max_temp_rise_k);
    }

    #[test]
    fn rejected_heating_is_idempotent() {
        let mut ledger = aluminum_ledger();
        let before = ledger.current_temp_k();
        // Huge burst guaranteed to blow the budget.
        let err = ledger.apply_heating(1_000_000, 50.0).unwrap_err();
        assert!(matches!(
            err,
            HeatingRejection::MeltingRisk | HeatingRejection::TempLimitExceeded
        ));
        assert_eq!(ledger.current_temp_k().to_bits(), before.to_bits());
    }

    #[test]
    fn melting_risk_takes_precedence_near_melting_point() {
        let profile = MaterialId::Aluminum.profile();
        // Ambient chosen so the melting point sits inside the safe rise band.
        let mut ledger = ThermalLedger::new(profile.melting_point_k - 10.0, 0.3, 15.0, profile);
        let err = ledger.apply_heating(1_000, 30.0).unwrap_err();
        assert_eq!(err, HeatingRejection::MeltingRisk);
    }

    #[test]
    fn cooling_never_increases_offset() {
        let mut ledger = aluminum_ledger();
        ledger.apply_heating(50, 10.0).unwrap();
        let mut offset = ledger.current_temp_k() - ledger.ambient_temp_k();
        for _ in 0..10 {
            ledger.apply_cooling(600.0);
            let next = ledger.current_temp_k() - ledger.ambient_temp_k();
            assert!(next <= offset);
            assert!(next >= 0.0);
            offset = next;
        }
    }

    #[test]
    fn cooling_with_zero_elapsed_is_a_no_op() {
        let mut ledger = aluminum_ledger();
        ledger.apply_heating(50, 10.0).unwrap();
        let before = ledger.current_temp_k();
        ledger.apply_cooling(0.0);
        assert_eq!(ledger.current_temp_k(), before);
    }

    #[test]
    fn cooldown_zero_when_margin_fits() {
        let ledger = aluminum_ledger();
        assert_eq!(ledger.required_cooldown_s(1, 5.0), 0.0);
    }

    #[test]
    fn cooldown_positive_after_heavy_heating() {
        let mut ledger = aluminum_ledger();
        // Drive the ledger close to the limit.
        loop {
            if ledger.apply_heating(100, 10.0).is_err() {
                break;
            }
        }
        let wait = ledger.required_cooldown_s(100, 10.0);
        assert!(wait > 0.0);
        assert!(wait.is_finite());
    }

    #[test]
    fn cooldown_infinite_when_burst_cannot_fit() {
        let ledger = aluminum_ledger();
        // A burst whose 1.5x-margined rise exceeds the whole budget can never
        // be admitted by cooling alone.
        let wait = ledger.required_cooldown_s(10_000_000, 50.0);
        assert!(wait.is_infinite());
    }

    #[test]
    fn cooldown_is_read_only() {
        let mut ledger = aluminum_ledger();
        ledger.apply_heating(50, 10.0).unwrap();
        let before = ledger.current_temp_k();
        let _ = ledger.required_cooldown_s(500, 20.0);
        assert_eq!(ledger.current_temp_k().to_bits(), before.to_bits());
    }
}
