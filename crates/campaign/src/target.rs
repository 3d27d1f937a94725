//! Debris target resolution and campaign input validation.

use thiserror::Error;

use broom_config::DebrisConfig;
use broom_core::constants::EARTH_RADIUS_KM;
use broom_laser::LaserConfig;
use broom_propagation::{OrbitalElements, TleError, parse_tle};
use broom_thermal::MaterialId;

/// A debris target resolved from catalog data: material identifier looked up,
/// orbit expressed as mean elements regardless of how the catalog stated it.
#[derive(Debug, Clone)]
pub struct DebrisTarget {
    pub name: String,
    /// Characteristic size (m); drives the intensity safety gate.
    pub size_m: f64,
    pub mass_kg: f64,
    pub cross_section_m2: f64,
    pub material: MaterialId,
    pub elements: OrbitalElements,
}

impl DebrisTarget {
    /// Resolve a catalog entry. A TLE takes precedence over the altitude
    /// pair when both are present.
    pub fn from_config(config: &DebrisConfig) -> Result<DebrisTarget, TargetError> {
        let material = MaterialId::parse(&config.material).ok_or_else(|| {
            TargetError::UnknownMaterial {
                debris: config.name.clone(),
                material: config.material.clone(),
            }
        })?;

        let elements = match (&config.tle_line1, &config.tle_line2) {
            (Some(l1), Some(l2)) => parse_tle(l1, l2)?,
            (None, None) => OrbitalElements::from_altitudes(
                config.perigee_alt_km,
                config.apogee_alt_km,
                config.inclination_deg,
            ),
            _ => {
                return Err(TargetError::IncompleteTle {
                    debris: config.name.clone(),
                });
            }
        };

        Ok(DebrisTarget {
            name: config.name.clone(),
            size_m: config.size_m,
            mass_kg: config.mass_kg,
            cross_section_m2: config.cross_section_m2,
            material,
            elements,
        })
    }

    /// Area-to-mass ratio (m²/kg).
    pub fn area_to_mass_m2_kg(&self) -> f64 {
        self.cross_section_m2 / self.mass_kg
    }
}

/// Catalog entry could not be turned into a target.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("debris '{debris}': unknown material '{material}'")]
    UnknownMaterial { debris: String, material: String },
    #[error("debris '{debris}': only one TLE line given")]
    IncompleteTle { debris: String },
    #[error("debris TLE rejected: {0}")]
    Tle(#[from] TleError),
}

/// One physically impossible input value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("mass must be positive, got {0} kg")]
    NonPositiveMass(f64),
    #[error("cross-section must be positive, got {0} m²")]
    NonPositiveCrossSection(f64),
    #[error("size must be positive, got {0} m")]
    NonPositiveSize(f64),
    #[error("eccentricity must lie in [0, 1), got {0}")]
    EccentricityOutOfRange(f64),
    #[error("semi-major axis {0} km is at or below the Earth surface")]
    SemiMajorAxisBelowSurface(f64),
    #[error("pulse energy must be positive, got {0} J")]
    NonPositivePulseEnergy(f64),
    #[error("repetition rate must be positive, got {0} Hz")]
    NonPositiveRepRate(f64),
}

/// All violations found in one pass over the inputs. The campaign never
/// starts while any are present.
#[derive(Debug, Error)]
#[error("invalid campaign input: {}", .violations.iter().map(|v| v.to_string()).collect::<Vec<_>>().join("; "))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

/// Check every campaign input and collect all violations together, so a bad
/// catalog entry reports everything wrong with it at once.
pub fn validate(target: &DebrisTarget, laser: &LaserConfig) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    if target.mass_kg <= 0.0 {
        violations.push(Violation::NonPositiveMass(target.mass_kg));
    }
    if target.cross_section_m2 <= 0.0 {
        violations.push(Violation::NonPositiveCrossSection(target.cross_section_m2));
    }
    if target.size_m <= 0.0 {
        violations.push(Violation::NonPositiveSize(target.size_m));
    }

    let e = target.elements.eccentricity;
    if !(0.0..1.0).contains(&e) {
        violations.push(Violation::EccentricityOutOfRange(e));
    }
    let a = target.elements.semi_major_axis_km();
    if a <= EARTH_RADIUS_KM {
        violations.push(Violation::SemiMajorAxisBelowSurface(a));
    }

    if laser.pulse_energy_j <= 0.0 {
        violations.push(Violation::NonPositivePulseEnergy(laser.pulse_energy_j));
    }
    if laser.max_rep_rate_hz <= 0.0 {
        violations.push(Violation::NonPositiveRepRate(laser.max_rep_rate_hz));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}
