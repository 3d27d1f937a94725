//! Campaign cost estimate and comparison ratios against alternative debris
//! removal methods. Pure functions; no state.

use serde::Serialize;

use broom_core::units::joules_to_kwh;

/// Industrial electricity price (USD per kWh).
const PRICE_PER_KWH_USD: f64 = 0.12;

/// Wall-plug efficiency of the laser system (optical out / electrical in).
const WALL_PLUG_EFFICIENCY: f64 = 0.20;

/// Fixed daily operating cost of the ground site (USD/day): staffing,
/// maintenance, tracking time.
const DAILY_OPERATIONS_USD: f64 = 15_000.0;

/// Reference costs of alternative removal methods (USD per object).
const ALTERNATIVE_METHODS: [(&str, f64); 3] = [
    ("robotic capture mission", 150.0e6),
    ("deorbit tug", 80.0e6),
    ("net capture vehicle", 40.0e6),
];

/// Cost breakdown for one campaign.
#[derive(Debug, Clone, Serialize)]
pub struct CostBreakdown {
    pub electricity_usd: f64,
    pub operations_usd: f64,
    pub total_usd: f64,
    pub comparisons: Vec<AlternativeComparison>,
}

/// Ratio of a campaign cost against one fixed-cost alternative.
#[derive(Debug, Clone, Serialize)]
pub struct AlternativeComparison {
    pub method: &'static str,
    pub reference_cost_usd: f64,
    /// How many times cheaper the laser campaign is; infinite when the
    /// campaign cost is zero.
    pub times_cheaper: f64,
    /// Savings as a percentage of the reference cost.
    pub savings_percent: f64,
}

/// Estimate the campaign cost from delivered optical energy (J) and campaign
/// duration (days).
pub fn estimate(total_energy_j: f64, duration_days: f64) -> CostBreakdown {
    let electrical_kwh = joules_to_kwh(total_energy_j) / WALL_PLUG_EFFICIENCY;
    let electricity_usd = electrical_kwh * PRICE_PER_KWH_USD;
    let operations_usd = DAILY_OPERATIONS_USD * duration_days.max(0.0);
    let total_usd = electricity_usd + operations_usd;

    let comparisons = ALTERNATIVE_METHODS
        .iter()
        .map(|&(method, reference_cost_usd)| {
            let times_cheaper = if total_usd > 0.0 {
                reference_cost_usd / total_usd
            } else {
                f64::INFINITY
            };
            let savings_percent = if reference_cost_usd > 0.0 {
                (reference_cost_usd - total_usd) / reference_cost_usd * 100.0
            } else {
                0.0
            };
            AlternativeComparison {
                method,
                reference_cost_usd,
                times_cheaper,
                savings_percent,
            }
        })
        .collect();

    CostBreakdown {
        electricity_usd,
        operations_usd,
        total_usd,
        comparisons,
    }
}
