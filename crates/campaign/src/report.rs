//! Campaign mission report: the single serializable artifact of a run.

use serde::Serialize;

use broom_cost::CostBreakdown;
use broom_visibility::ScanDiagnostics;

use crate::planner::PassEngagementResult;

/// Everything a campaign run produced, ready for JSON serialization or CSV
/// flattening by the export layer.
#[derive(Debug, Clone, Serialize)]
pub struct MissionReport {
    pub debris_name: String,
    /// Resolved material table name.
    pub material: &'static str,
    pub initial_perigee_alt_km: f64,
    pub initial_apogee_alt_km: f64,
    pub final_perigee_alt_km: f64,
    pub final_apogee_alt_km: f64,
    /// Passes walked before the campaign ended, engaged or not.
    pub passes_processed: usize,
    pub passes_engaged: usize,
    pub passes_skipped: usize,
    pub total_pulses: u64,
    /// Delivered optical energy (J).
    pub total_energy_j: f64,
    pub total_delta_v_m_s: f64,
    pub re_entry_achieved: bool,
    /// Index of the pass whose impulse drove perigee below the re-entry
    /// threshold.
    pub completion_pass_index: Option<usize>,
    pub campaign_duration_days: f64,
    /// Perigee altitude after each processed pass (km), skips included.
    pub perigee_alt_series_km: Vec<f64>,
    /// Passive atmospheric-decay lifetime from the initial orbit, the
    /// do-nothing baseline the campaign is judged against.
    pub passive_lifetime_days: f64,
    pub cost: CostBreakdown,
    /// Present when the report came from a full scan-and-plan run.
    pub scan_diagnostics: Option<ScanDiagnostics>,
    pub pass_results: Vec<PassEngagementResult>,
}

impl MissionReport {
    /// Days of orbital lifetime removed per dollar spent; zero-cost runs
    /// report zero rather than dividing by zero.
    pub fn lifetime_days_saved_per_usd(&self) -> f64 {
        if self.cost.total_usd <= 0.0 || !self.passive_lifetime_days.is_finite() {
            return 0.0;
        }
        if !self.re_entry_achieved {
            return 0.0;
        }
        self.passive_lifetime_days / self.cost.total_usd
    }
}
