//! Pulsed-laser beam model: Gaussian propagation to range, fluence on target,
//! and the empirical momentum-coupling and heat-absorption curves.
//!
//! The coupling and absorption curves are the canonical four- and
//! three-segment breakpoint tables; they are empirical calibration data and
//! their values are part of the model contract.

use serde::Deserialize;
use thiserror::Error;

use broom_core::constants::SOLAR_CONSTANT_W_CM2;
use broom_core::piecewise;

/// Transmitter and pulse parameters of the ground laser site.
#[derive(Debug, Clone, Deserialize)]
pub struct LaserConfig {
    /// Energy per pulse (J).
    pub pulse_energy_j: f64,
    /// Wavelength (m).
    pub wavelength_m: f64,
    /// Pulse duration (s).
    pub pulse_duration_s: f64,
    /// Transmitter aperture diameter (m).
    pub aperture_diameter_m: f64,
    /// Beam quality factor M².
    pub beam_quality_m2: f64,
    /// One-way atmospheric transmission fraction.
    pub atmospheric_transmission: f64,
    /// Maximum pulse repetition rate (Hz).
    pub max_rep_rate_hz: f64,
}

impl Default for LaserConfig {
    /// Reference 100 kJ / 1030 nm system with a 4 m aperture.
    fn default() -> Self {
        LaserConfig {
            pulse_energy_j: 1.0e5,
            wavelength_m: 1.03e-6,
            pulse_duration_s: 5.0e-9,
            aperture_diameter_m: 4.0,
            beam_quality_m2: 2.0,
            atmospheric_transmission: 0.7,
            max_rep_rate_hz: 10.0,
        }
    }
}

/// Momentum-coupling coefficient c_m breakpoints: (fluence J/cm², µN·s/J).
/// Rising onset below 10, ablation peak at 50, slow fall to the plasma
/// shielding floor above 150.
const COUPLING_TABLE: [(f64, f64); 4] = [(0.0, 5.0), (10.0, 10.0), (50.0, 25.0), (150.0, 17.5)];

/// Heat-absorption efficiency η breakpoints: (fluence J/cm², fraction).
/// Flat below 20, decaying to the 0.3 floor at 100 as ablation carries more
/// of the energy away.
const ABSORPTION_TABLE: [(f64, f64); 3] = [(0.0, 0.7), (20.0, 0.7), (100.0, 0.3)];

/// Intensity gate for large debris: 100x the solar constant (W/cm²).
const INTENSITY_LIMIT_W_CM2: f64 = 100.0 * SOLAR_CONSTANT_W_CM2;

/// Debris size above which the intensity gate applies (m).
const INTENSITY_GATE_SIZE_M: f64 = 5.0;

/// Engagement refused because beam intensity on a large target exceeds the
/// safety limit.
#[derive(Debug, Clone, Copy, Error)]
#[error(
    "beam intensity {intensity_w_cm2:.1} W/cm² exceeds the {limit_w_cm2:.1} W/cm² limit for targets larger than 5 m"
)]
pub struct IntensityRefusal {
    pub intensity_w_cm2: f64,
    pub limit_w_cm2: f64,
}

impl LaserConfig {
    /// Transmitter aperture radius w₀ (m).
    pub fn aperture_radius_m(&self) -> f64 {
        self.aperture_diameter_m / 2.0
    }

    /// Far-field divergence half-angle θ = M²λ/(π·w₀) (rad).
    pub fn divergence_rad(&self) -> f64 {
        self.beam_quality_m2 * self.wavelength_m
            / (std::f64::consts::PI * self.aperture_radius_m())
    }

    /// Rayleigh range z_R = πw₀²/(M²λ) (m).
    pub fn rayleigh_range_m(&self) -> f64 {
        let w0 = self.aperture_radius_m();
        std::f64::consts::PI * w0 * w0 / (self.beam_quality_m2 * self.wavelength_m)
    }

    /// Gaussian beam radius at `range_m` (m). Uses the far-field linear
    /// expansion beyond 10 Rayleigh ranges, the full Gaussian form below.
    pub fn beam_radius_m(&self, range_m: f64) -> f64 {
        let w0 = self.aperture_radius_m();
        let z_r = self.rayleigh_range_m();
        if range_m > 10.0 * z_r {
            w0 + range_m * self.divergence_rad()
        } else {
            let ratio = range_m / z_r;
            w0 * (1.0 + ratio * ratio).sqrt()
        }
    }

    /// Fluence delivered on target at `range_m` (J/cm²), after atmospheric
    /// transmission losses.
    pub fn fluence_j_cm2(&self, range_m: f64) -> f64 {
        let w = self.beam_radius_m(range_m);
        let beam_area_m2 = std::f64::consts::PI * w * w;
        self.pulse_energy_j * self.atmospheric_transmission / beam_area_m2 / 1.0e4
    }

    /// Peak power of a single pulse (W).
    pub fn peak_power_w(&self) -> f64 {
        self.pulse_energy_j / self.pulse_duration_s
    }

    /// Peak beam intensity at `range_m` (W/cm²).
    pub fn intensity_w_cm2(&self, range_m: f64) -> f64 {
        let w = self.beam_radius_m(range_m);
        let beam_area_cm2 = std::f64::consts::PI * w * w * 1.0e4;
        self.peak_power_w() / beam_area_cm2
    }

    /// Velocity increment per pulse for a target of `mass_kg` (m/s).
    pub fn delta_v_per_pulse_m_s(&self, fluence_j_cm2: f64, mass_kg: f64) -> f64 {
        coupling_coefficient(fluence_j_cm2) * 1.0e-6 * self.pulse_energy_j / mass_kg
    }

    /// Intensity safety gate. Targets larger than 5 m are refused when the
    /// beam intensity exceeds 100x the solar constant.
    pub fn check_intensity(
        &self,
        target_size_m: f64,
        range_m: f64,
    ) -> Result<(), IntensityRefusal> {
        if target_size_m <= INTENSITY_GATE_SIZE_M {
            return Ok(());
        }
        let intensity = self.intensity_w_cm2(range_m);
        if intensity > INTENSITY_LIMIT_W_CM2 {
            return Err(IntensityRefusal {
                intensity_w_cm2: intensity,
                limit_w_cm2: INTENSITY_LIMIT_W_CM2,
            });
        }
        Ok(())
    }
}

/// Momentum-coupling coefficient c_m (µN·s/J) for a given fluence (J/cm²).
pub fn coupling_coefficient(fluence_j_cm2: f64) -> f64 {
    piecewise::linear(&COUPLING_TABLE, fluence_j_cm2)
}

/// Heat-absorption efficiency η (fraction) for a given fluence (J/cm²).
pub fn absorption_efficiency(fluence_j_cm2: f64) -> f64 {
    piecewise::linear(&ABSORPTION_TABLE, fluence_j_cm2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coupling_curve_breakpoints_are_exact() {
        assert_eq!(coupling_coefficient(0.0), 5.0);
        assert_eq!(coupling_coefficient(10.0), 10.0);
        assert_eq!(coupling_coefficient(50.0), 25.0);
        assert_eq!(coupling_coefficient(150.0), 17.5);
        // Clamped floor above the last breakpoint.
        assert_eq!(coupling_coefficient(500.0), 17.5);
        // Interior slopes.
        assert!((coupling_coefficient(5.0) - 7.5).abs() < 1e-12);
        assert!((coupling_coefficient(30.0) - 17.5).abs() < 1e-12);
        assert!((coupling_coefficient(100.0) - 21.25).abs() < 1e-12);
    }

    #[test]
    fn absorption_curve_breakpoints_are_exact() {
        assert_eq!(absorption_efficiency(0.0), 0.7);
        assert_eq!(absorption_efficiency(20.0), 0.7);
        assert!((absorption_efficiency(60.0) - 0.5).abs() < 1e-12);
        assert_eq!(absorption_efficiency(100.0), 0.3);
        assert_eq!(absorption_efficiency(250.0), 0.3);
    }

    #[test]
    fn beam_radius_switches_to_far_field() {
        let laser = LaserConfig::default();
        let z_r = laser.rayleigh_range_m();
        // Near field: full Gaussian expansion.
        let near = laser.beam_radius_m(z_r);
        assert!((near - laser.aperture_radius_m() * 2f64.sqrt()).abs() < 1e-9);
        // Far field: linear expansion dominates.
        let far_range = 20.0 * z_r;
        let far = laser.beam_radius_m(far_range);
        let expected = laser.aperture_radius_m() + far_range * laser.divergence_rad();
        assert!((far - expected).abs() < 1e-9);
        // Radius grows monotonically through the switch.
        assert!(far > near);
    }

    #[test]
    fn fluence_decreases_with_range() {
        let laser = LaserConfig::default();
        let near = laser.fluence_j_cm2(100.0e3);
        let far = laser.fluence_j_cm2(2_000.0e3);
        assert!(near > far);
        assert!(far > 0.0);
    }

    #[test]
    fn delta_v_tracks_coupling_band() {
        let laser = LaserConfig::default();
        let fluence = laser.fluence_j_cm2(500.0e3);
        let dv = laser.delta_v_per_pulse_m_s(fluence, 15.0);
        let expected = coupling_coefficient(fluence) * 1.0e-6 * laser.pulse_energy_j / 15.0;
        assert!((dv - expected).abs() < 1e-15);
        assert!(dv > 0.0);
    }

    #[test]
    fn intensity_gate_ignores_small_targets() {
        let laser = LaserConfig::default();
        assert!(laser.check_intensity(1.0, 500.0e3).is_ok());
    }

    #[test]
    fn intensity_gate_refuses_large_bright_targets() {
        // Short pulse at close range: intensity far above the solar limit.
        let laser = LaserConfig {
            pulse_duration_s: 1.0e-9,
            ..LaserConfig::default()
        };
        let intensity = laser.intensity_w_cm2(10.0e3);
        assert!(intensity > 100.0 * SOLAR_CONSTANT_W_CM2);
        let err = laser.check_intensity(8.0, 10.0e3).unwrap_err();
        assert!(err.intensity_w_cm2 > err.limit_w_cm2);
    }
}
