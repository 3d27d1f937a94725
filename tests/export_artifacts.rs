//! Chronology CSV and JSON sidecar round trips through the export layer.

use std::fs;

use laser_broom::campaign::{DEFAULT_AMBIENT_TEMP_K, DebrisTarget, run_campaign};
use laser_broom::config::DebrisConfig;
use laser_broom::export::{chronology, sidecar};
use laser_broom::laser::LaserConfig;
use laser_broom::visibility::VisibilityPass;

fn small_report() -> laser_broom::campaign::MissionReport {
    let target = DebrisTarget::from_config(&DebrisConfig {
        name: "spent stage".into(),
        size_m: 2.5,
        mass_kg: 200.0,
        cross_section_m2: 0.3,
        material: "aluminum".into(),
        tle_line1: None,
        tle_line2: None,
        perigee_alt_km: 480.0,
        apogee_alt_km: 520.0,
        inclination_deg: 98.0,
    })
    .unwrap();
    let passes: Vec<VisibilityPass> = (0..5)
        .map(|i| VisibilityPass {
            station_index: 0,
            station_name: "maui".into(),
            start_s: i as f64 * 40_000.0,
            end_s: i as f64 * 40_000.0 + 300.0,
            duration_s: 300.0,
            max_elevation_deg: 70.0,
            start_azimuth_deg: 120.0,
        })
        .collect();
    run_campaign(&target, &LaserConfig::default(), &passes, DEFAULT_AMBIENT_TEMP_K).unwrap()
}

#[test]
fn chronology_csv_has_one_row_per_processed_pass() {
    let report = small_report();
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("campaign.csv");

    let mut writer = chronology::writer_for_path(&csv_path).unwrap();
    chronology::write_report(&mut *writer, &report).unwrap();
    drop(writer);

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(&csv_path)
        .unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert!(headers.iter().any(|h| h == "perigee_alt_km"));
    assert!(headers.iter().any(|h| h == "skip_reason"));

    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), report.passes_processed);
    for row in &rows {
        assert_eq!(row.len(), headers.len());
    }
}

#[test]
fn json_sidecar_lands_next_to_the_csv() {
    let report = small_report();
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("campaign.csv");

    let sidecar_path = sidecar::report_path(&csv_path);
    sidecar::write_report(&sidecar_path, &report).unwrap();

    assert_eq!(sidecar_path, dir.path().join("campaign_report.json"));
    let text = fs::read_to_string(&sidecar_path).unwrap();
    assert!(text.contains("\"debris_name\": \"spent stage\""));
    assert!(text.contains("\"perigee_alt_series_km\""));
    assert!(text.contains("\"comparisons\""));
}
