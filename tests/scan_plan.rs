//! Full scan-and-plan runs: TLE propagation through the visibility scanner
//! into the campaign planner.

use laser_broom::campaign::{self, CampaignError, CampaignParams};
use laser_broom::config::DebrisConfig;
use laser_broom::propagation::GroundStation;
use laser_broom::laser::LaserConfig;
use laser_broom::visibility::ScanParams;

const ISS_TLE1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
const ISS_TLE2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

fn tracked_entry() -> DebrisConfig {
    DebrisConfig {
        name: "tracked rocket body".into(),
        size_m: 3.0,
        mass_kg: 120.0,
        cross_section_m2: 1.5,
        material: "aluminum".into(),
        tle_line1: Some(ISS_TLE1.into()),
        tle_line2: Some(ISS_TLE2.into()),
        perigee_alt_km: 0.0,
        apogee_alt_km: 0.0,
        inclination_deg: 0.0,
    }
}

fn scan_params(horizon_days: f64) -> CampaignParams {
    CampaignParams {
        scan: ScanParams {
            horizon_days,
            min_elevation_deg: 20.0,
            step_minutes: 0.25,
        },
        ..CampaignParams::default()
    }
}

#[test]
fn tle_target_is_seen_from_a_mid_latitude_station() {
    let stations = vec![GroundStation::new("albuquerque", 35.05, -106.54)];
    let report = campaign::plan_campaign(
        &tracked_entry(),
        &stations,
        &LaserConfig::default(),
        &scan_params(3.0),
    )
    .unwrap();

    assert!(report.passes_processed > 0);
    let diagnostics = report.scan_diagnostics.unwrap();
    assert!(diagnostics.samples_evaluated > 0);

    // Chronological pass order survives into the result list.
    for window in report.pass_results.windows(2) {
        assert!(window[0].start_s <= window[1].start_s);
    }
}

#[test]
fn no_stations_means_no_passes_and_no_heating() {
    let report = campaign::plan_campaign(
        &tracked_entry(),
        &[],
        &LaserConfig::default(),
        &scan_params(1.0),
    )
    .unwrap();
    assert_eq!(report.passes_processed, 0);
    assert_eq!(report.total_pulses, 0);
    assert_eq!(report.total_energy_j, 0.0);
    assert_eq!(report.final_perigee_alt_km, report.initial_perigee_alt_km);
}

#[test]
fn polar_station_sees_a_high_inclination_target_often() {
    let entry = DebrisConfig {
        name: "sso fragment".into(),
        size_m: 1.0,
        mass_kg: 50.0,
        cross_section_m2: 0.5,
        material: "steel".into(),
        tle_line1: None,
        tle_line2: None,
        perigee_alt_km: 480.0,
        apogee_alt_km: 520.0,
        inclination_deg: 98.0,
    };
    let near_pole = vec![GroundStation::new("svalbard", 78.2, 15.4)];
    let report = campaign::plan_campaign(
        &entry,
        &near_pole,
        &LaserConfig::default(),
        &scan_params(1.0),
    )
    .unwrap();
    // A sun-synchronous orbit crosses the polar cap every revolution.
    assert!(report.passes_processed >= 5);
}

#[test]
fn malformed_tle_surfaces_as_a_target_error() {
    let mut entry = tracked_entry();
    entry.tle_line1 = Some("1 25544U garbage".into());
    let err = campaign::plan_campaign(
        &entry,
        &[],
        &LaserConfig::default(),
        &scan_params(1.0),
    )
    .unwrap_err();
    assert!(matches!(err, CampaignError::Target(_)));
}
