//! Campaign orchestration: resolve a catalog entry, scan the station
//! network for passes, and run the pass-by-pass engagement planner.

pub mod planner;
pub mod report;
pub mod target;

pub use planner::{
    BindingConstraint, DEFAULT_AMBIENT_TEMP_K, PassEngagementResult, PassOutcome, SkipReason,
    run_campaign, slant_range_km,
};
pub use report::MissionReport;
pub use target::{DebrisTarget, TargetError, ValidationError, Violation, validate};

use thiserror::Error;

use broom_config::{DebrisConfig, StationConfig};
use broom_laser::LaserConfig;
use broom_propagation::{GroundStation, OrbitPropagator};
use broom_visibility::{ScanError, ScanParams, scan_network};

/// Knobs of a full scan-and-plan run.
#[derive(Debug, Clone)]
pub struct CampaignParams {
    pub scan: ScanParams,
    /// Ledger ambient temperature (K).
    pub ambient_temp_k: f64,
}

impl Default for CampaignParams {
    fn default() -> Self {
        CampaignParams {
            scan: ScanParams::default(),
            ambient_temp_k: DEFAULT_AMBIENT_TEMP_K,
        }
    }
}

/// Campaign failures, from catalog resolution through the scan.
#[derive(Debug, Error)]
pub enum CampaignError {
    #[error(transparent)]
    Target(#[from] TargetError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("visibility scan failed: {0}")]
    Scan(#[from] ScanError),
}

/// Ground stations from catalog entries, in catalog order.
pub fn stations_from_config(configs: &[StationConfig]) -> Vec<GroundStation> {
    configs
        .iter()
        .map(|config| GroundStation {
            name: config.name.clone(),
            latitude_deg: config.latitude_deg,
            longitude_deg: config.longitude_deg,
            altitude_m: config.altitude_m,
        })
        .collect()
}

/// Plan a campaign for one catalog entry: resolve the target, scan every
/// station, and run the planner over the merged pass list.
///
/// An empty station list is a normal run: no passes, nothing engaged.
pub fn plan_campaign(
    debris: &DebrisConfig,
    stations: &[GroundStation],
    laser: &LaserConfig,
    params: &CampaignParams,
) -> Result<MissionReport, CampaignError> {
    let target = DebrisTarget::from_config(debris)?;
    plan_campaign_for_target(&target, stations, laser, params)
}

/// Same as [`plan_campaign`], starting from an already-resolved target.
pub fn plan_campaign_for_target(
    target: &DebrisTarget,
    stations: &[GroundStation],
    laser: &LaserConfig,
    params: &CampaignParams,
) -> Result<MissionReport, CampaignError> {
    // Validate before the scan so bad inputs fail fast, not after ninety
    // days of sampling.
    validate(target, laser)?;

    let propagator = OrbitPropagator::new(&target.elements);
    let outcome = scan_network(&propagator, stations, &params.scan, None)?;

    let mut report = run_campaign(target, laser, &outcome.passes, params.ambient_temp_k)?;
    report.scan_diagnostics = Some(outcome.diagnostics);
    Ok(report)
}
