//! Static material property table for common debris compositions.

use std::fmt;

use serde::Deserialize;

/// Thermophysical properties of a debris material. Entries are static and
/// read-only at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialProfile {
    pub name: &'static str,
    /// Bulk density (kg/m³).
    pub density_kg_m3: f64,
    /// Specific heat capacity (J/(kg·K)).
    pub specific_heat_j_kg_k: f64,
    /// Maximum safe temperature rise above ambient (K).
    pub max_temp_rise_k: f64,
    /// Melting (or decomposition) point (K).
    pub melting_point_k: f64,
    /// Thermal conductivity (W/(m·K)).
    pub thermal_conductivity_w_m_k: f64,
}

/// Identifier for the supported debris materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialId {
    Aluminum,
    Steel,
    Titanium,
    CarbonComposite,
}

static ALUMINUM: MaterialProfile = MaterialProfile {
    name: "aluminum",
    density_kg_m3: 2_700.0,
    specific_heat_j_kg_k: 900.0,
    max_temp_rise_k: 300.0,
    melting_point_k: 933.0,
    thermal_conductivity_w_m_k: 237.0,
};

static STEEL: MaterialProfile = MaterialProfile {
    name: "steel",
    density_kg_m3: 7_850.0,
    specific_heat_j_kg_k: 500.0,
    max_temp_rise_k: 400.0,
    melting_point_k: 1_810.0,
    thermal_conductivity_w_m_k: 50.0,
};

static TITANIUM: MaterialProfile = MaterialProfile {
    name: "titanium",
    density_kg_m3: 4_500.0,
    specific_heat_j_kg_k: 520.0,
    max_temp_rise_k: 500.0,
    melting_point_k: 1_941.0,
    thermal_conductivity_w_m_k: 22.0,
};

// Melting point stands in for the epoxy decomposition temperature.
static CARBON_COMPOSITE: MaterialProfile = MaterialProfile {
    name: "carbon_composite",
    density_kg_m3: 1_600.0,
    specific_heat_j_kg_k: 1_050.0,
    max_temp_rise_k: 250.0,
    melting_point_k: 600.0,
    thermal_conductivity_w_m_k: 7.0,
};

impl MaterialId {
    /// Profile from the static table.
    pub fn profile(self) -> &'static MaterialProfile {
        match self {
            MaterialId::Aluminum => &ALUMINUM,
            MaterialId::Steel => &STEEL,
            MaterialId::Titanium => &TITANIUM,
            MaterialId::CarbonComposite => &CARBON_COMPOSITE,
        }
    }

    /// Parse a catalog identifier (case-insensitive).
    pub fn parse(name: &str) -> Option<MaterialId> {
        match name.to_ascii_lowercase().as_str() {
            "aluminum" | "aluminium" => Some(MaterialId::Aluminum),
            "steel" => Some(MaterialId::Steel),
            "titanium" => Some(MaterialId::Titanium),
            "carbon_composite" | "carbon-composite" | "composite" => {
                Some(MaterialId::CarbonComposite)
            }
            _ => None,
        }
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile().name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_material_resolves_to_a_profile() {
        for id in [
            MaterialId::Aluminum,
            MaterialId::Steel,
            MaterialId::Titanium,
            MaterialId::CarbonComposite,
        ] {
            let profile = id.profile();
            assert!(profile.density_kg_m3 > 0.0);
            assert!(profile.melting_point_k > profile.max_temp_rise_k);
        }
    }

    #[test]
    fn parse_accepts_common_spellings() {
        assert_eq!(MaterialId::parse("Aluminium"), Some(MaterialId::Aluminum));
        assert_eq!(MaterialId::parse("steel"), Some(MaterialId::Steel));
        assert_eq!(
            MaterialId::parse("carbon-composite"),
            Some(MaterialId::CarbonComposite)
        );
        assert_eq!(MaterialId::parse("unobtainium"), None);
    }
}
